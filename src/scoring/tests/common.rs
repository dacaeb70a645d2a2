use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use crate::scoring::domain::{
    AccountAttributes, AccountId, EventType, LeadEvent, OwnerId, ScoreResult,
};
use crate::scoring::settings::{ScoringSettings, ScoringSettingsPatch};
use crate::scoring::store::{
    EventId, EventStore, SettingsStore, SnapshotStore, StoreError,
};
use crate::scoring::RecomputeService;

/// Fixed "now" for deterministic scoring: 2025-08-25T12:00:00Z.
pub(super) const NOW: i64 = 1_756_123_200_000;

pub(super) const MILLIS_PER_HOUR: i64 = 3_600_000;
pub(super) const MILLIS_PER_DAY: i64 = 86_400_000;

pub(super) fn days_ago(days: i64) -> i64 {
    NOW - days * MILLIS_PER_DAY
}

pub(super) fn hours_ago(hours: i64) -> i64 {
    NOW - hours * MILLIS_PER_HOUR
}

pub(super) fn event(event_type: EventType, occurred_at_millis: i64) -> LeadEvent {
    LeadEvent::new(event_type, occurred_at_millis)
}

pub(super) fn attributes() -> AccountAttributes {
    AccountAttributes {
        industry: "Construction".to_string(),
        location: "Malaysia".to_string(),
    }
}

/// Default settings with the Construction/MY targets used across scenarios.
pub(super) fn settings() -> ScoringSettings {
    let mut settings = ScoringSettings::default();
    settings
        .fit
        .target_industries
        .insert("Construction".to_string());
    settings.fit.target_countries.insert("MY".to_string());
    settings.normalized()
}

pub(super) fn account() -> AccountId {
    AccountId("acct-100".to_string())
}

pub(super) fn owner() -> OwnerId {
    OwnerId("owner-1".to_string())
}

pub(super) fn build_service() -> (
    RecomputeService<MemoryEventStore, MemorySettingsStore, MemorySnapshotStore>,
    Arc<MemoryEventStore>,
    Arc<MemorySettingsStore>,
    Arc<MemorySnapshotStore>,
) {
    let events = Arc::new(MemoryEventStore::default());
    let settings_store = Arc::new(MemorySettingsStore::default());
    settings_store.seed(&owner(), settings());
    let snapshots = Arc::new(MemorySnapshotStore::default());
    let service = RecomputeService::new(events.clone(), settings_store.clone(), snapshots.clone());
    (service, events, settings_store, snapshots)
}

#[derive(Default)]
pub(super) struct MemoryEventStore {
    events: Mutex<HashMap<AccountId, Vec<LeadEvent>>>,
    resets: Mutex<HashMap<AccountId, i64>>,
    sequence: AtomicU64,
}

impl MemoryEventStore {
    pub(super) fn seed(&self, account: &AccountId, events: Vec<LeadEvent>) {
        self.events
            .lock()
            .expect("event mutex poisoned")
            .insert(account.clone(), events);
    }

    pub(super) fn set_reset(&self, account: &AccountId, marker: i64) {
        self.resets
            .lock()
            .expect("reset mutex poisoned")
            .insert(account.clone(), marker);
    }
}

impl EventStore for MemoryEventStore {
    fn append(&self, account: &AccountId, event: LeadEvent) -> Result<EventId, StoreError> {
        let id = self.sequence.fetch_add(1, Ordering::Relaxed);
        self.events
            .lock()
            .expect("event mutex poisoned")
            .entry(account.clone())
            .or_default()
            .push(event);
        Ok(EventId(format!("evt-{id:06}")))
    }

    fn events_since(
        &self,
        account: &AccountId,
        since_millis: i64,
    ) -> Result<Vec<LeadEvent>, StoreError> {
        let guard = self.events.lock().expect("event mutex poisoned");
        Ok(guard
            .get(account)
            .map(|events| {
                events
                    .iter()
                    .filter(|event| event.occurred_at_millis >= since_millis)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    fn cycle_reset(&self, account: &AccountId) -> Result<Option<i64>, StoreError> {
        let guard = self.resets.lock().expect("reset mutex poisoned");
        Ok(guard.get(account).copied())
    }
}

#[derive(Default)]
pub(super) struct MemorySettingsStore {
    settings: Mutex<HashMap<OwnerId, ScoringSettings>>,
}

impl MemorySettingsStore {
    pub(super) fn seed(&self, owner: &OwnerId, settings: ScoringSettings) {
        self.settings
            .lock()
            .expect("settings mutex poisoned")
            .insert(owner.clone(), settings);
    }
}

impl SettingsStore for MemorySettingsStore {
    fn load(&self, owner: &OwnerId) -> Result<ScoringSettings, StoreError> {
        let guard = self.settings.lock().expect("settings mutex poisoned");
        guard.get(owner).cloned().ok_or(StoreError::NotFound)
    }

    fn save(
        &self,
        owner: &OwnerId,
        patch: &ScoringSettingsPatch,
    ) -> Result<ScoringSettings, StoreError> {
        let mut guard = self.settings.lock().expect("settings mutex poisoned");
        let current = guard.get(owner).cloned().unwrap_or_default();
        let merged = current.merged(patch);
        guard.insert(owner.clone(), merged.clone());
        Ok(merged)
    }
}

#[derive(Default)]
pub(super) struct MemorySnapshotStore {
    snapshots: Mutex<HashMap<AccountId, ScoreResult>>,
}

impl SnapshotStore for MemorySnapshotStore {
    fn save(&self, account: &AccountId, snapshot: &ScoreResult) -> Result<(), StoreError> {
        self.snapshots
            .lock()
            .expect("snapshot mutex poisoned")
            .insert(account.clone(), snapshot.clone());
        Ok(())
    }

    fn latest(&self, account: &AccountId) -> Result<Option<ScoreResult>, StoreError> {
        let guard = self.snapshots.lock().expect("snapshot mutex poisoned");
        Ok(guard.get(account).cloned())
    }
}

/// Store fake that fails every call, for graceful-degradation tests.
pub(super) struct UnavailableStore;

impl EventStore for UnavailableStore {
    fn append(&self, _account: &AccountId, _event: LeadEvent) -> Result<EventId, StoreError> {
        Err(StoreError::Unavailable("event log offline".to_string()))
    }

    fn events_since(
        &self,
        _account: &AccountId,
        _since_millis: i64,
    ) -> Result<Vec<LeadEvent>, StoreError> {
        Err(StoreError::Unavailable("event log offline".to_string()))
    }

    fn cycle_reset(&self, _account: &AccountId) -> Result<Option<i64>, StoreError> {
        Err(StoreError::Unavailable("event log offline".to_string()))
    }
}

impl SettingsStore for UnavailableStore {
    fn load(&self, _owner: &OwnerId) -> Result<ScoringSettings, StoreError> {
        Err(StoreError::Unavailable("settings store offline".to_string()))
    }

    fn save(
        &self,
        _owner: &OwnerId,
        _patch: &ScoringSettingsPatch,
    ) -> Result<ScoringSettings, StoreError> {
        Err(StoreError::Unavailable("settings store offline".to_string()))
    }
}

impl SnapshotStore for UnavailableStore {
    fn save(&self, _account: &AccountId, _snapshot: &ScoreResult) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("snapshot store offline".to_string()))
    }

    fn latest(&self, _account: &AccountId) -> Result<Option<ScoreResult>, StoreError> {
        Err(StoreError::Unavailable("snapshot store offline".to_string()))
    }
}
