//! Lead scoring: fit and intent sub-scores, aggregation, and recomputation.
//!
//! The scorers are pure functions with no shared state; [`ScoreEngine`]
//! composes them under one settings snapshot, and [`RecomputeService`]
//! drives the load -> score -> persist cycle against the store traits.

pub mod aggregate;
pub mod domain;
pub mod fit;
pub mod intent;
pub mod recompute;
pub mod settings;
pub mod store;

#[cfg(test)]
mod tests;

pub use aggregate::aggregate;
pub use domain::{
    AccountAttributes, AccountId, Band, EventType, LeadEvent, OwnerId, ScoreResult,
};
pub use fit::{compute_fit, FitOutcome};
pub use intent::{compute_intent, IntentOutcome};
pub use recompute::{RecomputeService, DEFAULT_LOOKBACK_DAYS};
pub use settings::{
    Distribution, FitSettings, IntentSettings, PenaltySettings, ScoringSettings,
    ScoringSettingsPatch, Thresholds,
};
pub use store::{EventId, EventStore, SettingsStore, SnapshotStore, StoreError};

/// Stateless engine applying one settings snapshot to an account.
pub struct ScoreEngine {
    settings: ScoringSettings,
}

impl ScoreEngine {
    /// Settings are normalized on construction so the percent/ceiling
    /// coupling holds regardless of what the caller loaded.
    pub fn new(settings: ScoringSettings) -> Self {
        Self {
            settings: settings.normalized(),
        }
    }

    pub fn settings(&self) -> &ScoringSettings {
        &self.settings
    }

    /// Scores one account: fit and intent run independently, then the
    /// aggregator merges them. The breakdown lists fit lines first, then
    /// intent awards and penalties in rule order.
    pub fn score(
        &self,
        attributes: &AccountAttributes,
        events: &[LeadEvent],
        now_millis: i64,
    ) -> ScoreResult {
        let fit = compute_fit(attributes, &self.settings.fit);
        let intent = compute_intent(
            events,
            &self.settings.intent,
            &self.settings.penalties,
            &self.settings.thresholds,
            now_millis,
        );

        let (score, band) = aggregate(
            fit.points,
            self.settings.distribution.fit_percent,
            intent.intent_points,
            self.settings.distribution.intent_percent,
            intent.penalty_points,
        );

        let mut breakdown = fit.breakdown;
        breakdown.extend(intent.breakdown);

        ScoreResult {
            score,
            band,
            breakdown,
            fit_points: fit.points,
            intent_points: intent.intent_points,
            penalty_points: intent.penalty_points,
            computed_at_millis: now_millis,
        }
    }
}
