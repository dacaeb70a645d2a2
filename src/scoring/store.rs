use serde::{Deserialize, Serialize};

use super::domain::{AccountId, LeadEvent, OwnerId, ScoreResult};
use super::settings::{ScoringSettings, ScoringSettingsPatch};

/// Identifier assigned by the event store on append.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventId(pub String);

/// Append-only behavioral event log, owned by the surrounding application.
pub trait EventStore: Send + Sync {
    fn append(&self, account: &AccountId, event: LeadEvent) -> Result<EventId, StoreError>;

    /// Events at or after `since_millis`, ordered by occurrence time
    /// (ties in store order).
    fn events_since(
        &self,
        account: &AccountId,
        since_millis: i64,
    ) -> Result<Vec<LeadEvent>, StoreError>;

    /// Marker timestamp opening the account's current scoring cycle, if one
    /// was ever set. Events before the marker belong to a prior cycle.
    fn cycle_reset(&self, account: &AccountId) -> Result<Option<i64>, StoreError>;
}

/// Per-owner scoring configuration store.
pub trait SettingsStore: Send + Sync {
    /// Settings for the owner, merged with system defaults.
    fn load(&self, owner: &OwnerId) -> Result<ScoringSettings, StoreError>;

    /// Applies a partial update and returns the merged, normalized settings.
    fn save(
        &self,
        owner: &OwnerId,
        patch: &ScoringSettingsPatch,
    ) -> Result<ScoringSettings, StoreError>;
}

/// Latest-snapshot store; each save fully replaces the prior snapshot.
pub trait SnapshotStore: Send + Sync {
    fn save(&self, account: &AccountId, snapshot: &ScoreResult) -> Result<(), StoreError>;
    fn latest(&self, account: &AccountId) -> Result<Option<ScoreResult>, StoreError>;
}

/// Error enumeration for collaborator store failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("record not found")]
    NotFound,
    #[error("store unavailable: {0}")]
    Unavailable(String),
}
