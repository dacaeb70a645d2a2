use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Weight split between the fit and intent sub-scores; always sums to 100.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Distribution {
    pub fit_percent: f64,
    pub intent_percent: f64,
}

impl Default for Distribution {
    fn default() -> Self {
        Self {
            fit_percent: 20.0,
            intent_percent: 80.0,
        }
    }
}

/// Static-attribute scoring weights and target criteria.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitSettings {
    pub max_points: f64,
    pub industry_match_score: f64,
    pub location_match_score: f64,
    pub target_industries: BTreeSet<String>,
    pub target_countries: BTreeSet<String>,
    pub worldwide: bool,
}

impl Default for FitSettings {
    fn default() -> Self {
        Self {
            max_points: 20.0,
            industry_match_score: 12.0,
            location_match_score: 8.0,
            target_industries: BTreeSet::new(),
            target_countries: BTreeSet::new(),
            worldwide: false,
        }
    }
}

/// Behavioral scoring weights and per-window caps.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IntentSettings {
    pub max_points: f64,
    pub stage_advanced_points: f64,
    pub stage_advance_cap_per_day: f64,
    pub approval_requested_points: f64,
    pub approval_approved_points: f64,
    pub quote_created_points: f64,
    pub task_completed_points: f64,
    pub task_cap_per_14d: f64,
    pub email_reply_bonus: f64,
}

impl Default for IntentSettings {
    fn default() -> Self {
        Self {
            max_points: 80.0,
            stage_advanced_points: 20.0,
            stage_advance_cap_per_day: 20.0,
            approval_requested_points: 10.0,
            approval_approved_points: 15.0,
            quote_created_points: 15.0,
            task_completed_points: 5.0,
            task_cap_per_14d: 15.0,
            email_reply_bonus: 10.0,
        }
    }
}

/// Penalty magnitudes, stored as signed numbers; scorers take the absolute
/// value so a misconfigured sign never turns a penalty into a bonus.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PenaltySettings {
    pub no_reply_7d: f64,
    pub stuck_penalty: f64,
    pub inactivity_penalty: f64,
    pub approval_rejected: f64,
}

impl Default for PenaltySettings {
    fn default() -> Self {
        Self {
            no_reply_7d: -5.0,
            stuck_penalty: -10.0,
            inactivity_penalty: -5.0,
            approval_rejected: -10.0,
        }
    }
}

/// Time windows consumed by the intent scorer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thresholds {
    pub email_reply_window_hours: i64,
    pub stuck_days: i64,
    pub activity_window_days: i64,
    pub quote_window_days: i64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            email_reply_window_hours: 48,
            stuck_days: 14,
            activity_window_days: 14,
            quote_window_days: 30,
        }
    }
}

/// Fully-specified scoring configuration. Every numeric field carries a
/// system default, so a freshly created owner scores sensibly before any
/// explicit save.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringSettings {
    pub distribution: Distribution,
    pub fit: FitSettings,
    pub intent: IntentSettings,
    pub penalties: PenaltySettings,
    pub thresholds: Thresholds,
}

impl ScoringSettings {
    /// Applies a partial update on top of `self`, then re-normalizes the
    /// coupled fields. Unset patch fields keep their current value, so the
    /// merge can never produce a missing numeric.
    pub fn merged(&self, patch: &ScoringSettingsPatch) -> ScoringSettings {
        let mut next = self.clone();

        // Changing either percent forces the other to its complement.
        if let Some(fit_percent) = patch.distribution.fit_percent {
            next.distribution.fit_percent = fit_percent;
            next.distribution.intent_percent = 100.0 - fit_percent;
        } else if let Some(intent_percent) = patch.distribution.intent_percent {
            next.distribution.intent_percent = intent_percent;
            next.distribution.fit_percent = 100.0 - intent_percent;
        }

        let fit = &patch.fit;
        if let Some(value) = fit.industry_match_score {
            next.fit.industry_match_score = value;
        }
        if let Some(value) = fit.location_match_score {
            next.fit.location_match_score = value;
        }
        if let Some(targets) = &fit.target_industries {
            next.fit.target_industries = targets.clone();
        }
        if let Some(targets) = &fit.target_countries {
            next.fit.target_countries = targets.clone();
        }
        if let Some(value) = fit.worldwide {
            next.fit.worldwide = value;
        }

        let intent = &patch.intent;
        if let Some(value) = intent.stage_advanced_points {
            next.intent.stage_advanced_points = value;
        }
        if let Some(value) = intent.stage_advance_cap_per_day {
            next.intent.stage_advance_cap_per_day = value;
        }
        if let Some(value) = intent.approval_requested_points {
            next.intent.approval_requested_points = value;
        }
        if let Some(value) = intent.approval_approved_points {
            next.intent.approval_approved_points = value;
        }
        if let Some(value) = intent.quote_created_points {
            next.intent.quote_created_points = value;
        }
        if let Some(value) = intent.task_completed_points {
            next.intent.task_completed_points = value;
        }
        if let Some(value) = intent.task_cap_per_14d {
            next.intent.task_cap_per_14d = value;
        }
        if let Some(value) = intent.email_reply_bonus {
            next.intent.email_reply_bonus = value;
        }

        let penalties = &patch.penalties;
        if let Some(value) = penalties.no_reply_7d {
            next.penalties.no_reply_7d = value;
        }
        if let Some(value) = penalties.stuck_penalty {
            next.penalties.stuck_penalty = value;
        }
        if let Some(value) = penalties.inactivity_penalty {
            next.penalties.inactivity_penalty = value;
        }
        if let Some(value) = penalties.approval_rejected {
            next.penalties.approval_rejected = value;
        }

        let thresholds = &patch.thresholds;
        if let Some(value) = thresholds.email_reply_window_hours {
            next.thresholds.email_reply_window_hours = value;
        }
        if let Some(value) = thresholds.stuck_days {
            next.thresholds.stuck_days = value;
        }
        if let Some(value) = thresholds.activity_window_days {
            next.thresholds.activity_window_days = value;
        }
        if let Some(value) = thresholds.quote_window_days {
            next.thresholds.quote_window_days = value;
        }

        next.normalized()
    }

    /// Enforces the coupled invariants the aggregation math relies on:
    /// the percents sum to 100 and each sub-score ceiling equals its
    /// distribution percent.
    pub fn normalized(mut self) -> Self {
        let fit_percent = self.distribution.fit_percent.clamp(0.0, 100.0);
        self.distribution.fit_percent = fit_percent;
        self.distribution.intent_percent = 100.0 - fit_percent;
        self.fit.max_points = fit_percent;
        self.intent.max_points = self.distribution.intent_percent;
        self
    }
}

/// Partial settings as submitted by a caller; any subset of leaves may be
/// present. Missing groups deserialize to empty patches.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringSettingsPatch {
    pub distribution: DistributionPatch,
    pub fit: FitPatch,
    pub intent: IntentPatch,
    pub penalties: PenaltyPatch,
    pub thresholds: ThresholdPatch,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DistributionPatch {
    pub fit_percent: Option<f64>,
    pub intent_percent: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FitPatch {
    pub industry_match_score: Option<f64>,
    pub location_match_score: Option<f64>,
    pub target_industries: Option<BTreeSet<String>>,
    pub target_countries: Option<BTreeSet<String>>,
    pub worldwide: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IntentPatch {
    pub stage_advanced_points: Option<f64>,
    pub stage_advance_cap_per_day: Option<f64>,
    pub approval_requested_points: Option<f64>,
    pub approval_approved_points: Option<f64>,
    pub quote_created_points: Option<f64>,
    pub task_completed_points: Option<f64>,
    pub task_cap_per_14d: Option<f64>,
    pub email_reply_bonus: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PenaltyPatch {
    pub no_reply_7d: Option<f64>,
    pub stuck_penalty: Option<f64>,
    pub inactivity_penalty: Option<f64>,
    pub approval_rejected: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ThresholdPatch {
    pub email_reply_window_hours: Option<i64>,
    pub stuck_days: Option<i64>,
    pub activity_window_days: Option<i64>,
    pub quote_window_days: Option<i64>,
}
