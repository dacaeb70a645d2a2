use std::sync::Arc;

use chrono::{Duration, Utc};
use tracing::warn;

use super::domain::{AccountAttributes, AccountId, OwnerId, ScoreResult};
use super::settings::ScoringSettings;
use super::store::{EventStore, SettingsStore, SnapshotStore};
use super::ScoreEngine;

/// Bound on how far back a recompute reads the event log.
pub const DEFAULT_LOOKBACK_DAYS: i64 = 120;

/// Orchestrates load -> score -> persist for one account. Storage failures
/// degrade to defaults or an empty log instead of surfacing, so the business
/// action that triggered the recompute is never blocked by scoring.
pub struct RecomputeService<E, S, P> {
    events: Arc<E>,
    settings: Arc<S>,
    snapshots: Arc<P>,
    lookback_days: i64,
}

impl<E, S, P> RecomputeService<E, S, P>
where
    E: EventStore,
    S: SettingsStore,
    P: SnapshotStore,
{
    pub fn new(events: Arc<E>, settings: Arc<S>, snapshots: Arc<P>) -> Self {
        Self {
            events,
            settings,
            snapshots,
            lookback_days: DEFAULT_LOOKBACK_DAYS,
        }
    }

    pub fn with_lookback_days(mut self, days: i64) -> Self {
        self.lookback_days = days;
        self
    }

    /// Recompute against the wall clock.
    pub fn recompute(
        &self,
        account: &AccountId,
        owner: &OwnerId,
        attributes: &AccountAttributes,
    ) -> ScoreResult {
        self.recompute_at(account, owner, attributes, Utc::now().timestamp_millis())
    }

    /// Deterministic recompute for a fixed `now`.
    pub fn recompute_at(
        &self,
        account: &AccountId,
        owner: &OwnerId,
        attributes: &AccountAttributes,
        now_millis: i64,
    ) -> ScoreResult {
        let settings = match self.settings.load(owner) {
            Ok(settings) => settings,
            Err(err) => {
                warn!(
                    owner = %owner.0,
                    error = %err,
                    "settings load failed; scoring with defaults"
                );
                ScoringSettings::default()
            }
        };

        let reset = match self.events.cycle_reset(account) {
            Ok(marker) => marker,
            Err(err) => {
                warn!(
                    account = %account.0,
                    error = %err,
                    "cycle reset lookup failed; ignoring reset boundary"
                );
                None
            }
        };

        let lookback_floor = now_millis - Duration::days(self.lookback_days).num_milliseconds();
        let since = reset.map_or(lookback_floor, |marker| marker.max(lookback_floor));

        let mut events = match self.events.events_since(account, since) {
            Ok(events) => events,
            Err(err) => {
                warn!(
                    account = %account.0,
                    error = %err,
                    "event log read failed; scoring without events"
                );
                Vec::new()
            }
        };
        // Stable sort keeps store order for same-millisecond ties.
        events.sort_by_key(|event| event.occurred_at_millis);

        let result = ScoreEngine::new(settings).score(attributes, &events, now_millis);

        if let Err(err) = self.snapshots.save(account, &result) {
            warn!(
                account = %account.0,
                error = %err,
                "snapshot persist failed; returning transient result"
            );
        }

        result
    }
}
