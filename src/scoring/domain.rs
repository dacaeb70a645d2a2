use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Identifier wrapper for scored accounts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccountId(pub String);

/// Identifier wrapper for the settings owner (a sales team or user).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OwnerId(pub String);

/// Static facts about an account, snapshotted by the caller at scoring time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountAttributes {
    pub industry: String,
    pub location: String,
}

/// Behavioral event types recognized by the intent scorer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EventType {
    StageAdvanced,
    ApprovalRequested,
    ApprovalApproved,
    ApprovalRejected,
    QuoteCreated,
    TaskCompleted,
    EmailOutbound,
    EmailReply,
    /// Stored types this build does not recognize; they score zero.
    #[serde(other)]
    Unknown,
}

/// Immutable entry in an account's append-only event log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeadEvent {
    pub event_type: EventType,
    #[serde(default)]
    pub meta: BTreeMap<String, serde_json::Value>,
    pub occurred_at_millis: i64,
}

impl LeadEvent {
    pub fn new(event_type: EventType, occurred_at_millis: i64) -> Self {
        Self {
            event_type,
            meta: BTreeMap::new(),
            occurred_at_millis,
        }
    }
}

/// Qualitative label derived from the numeric score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Band {
    Hot,
    Warm,
    Cold,
}

impl Band {
    /// Boundaries are inclusive: 80 is hot, 50 is warm.
    pub fn for_score(score: u8) -> Self {
        if score >= 80 {
            Band::Hot
        } else if score >= 50 {
            Band::Warm
        } else {
            Band::Cold
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Band::Hot => "hot",
            Band::Warm => "warm",
            Band::Cold => "cold",
        }
    }
}

/// Latest scoring snapshot for an account. Recomputed wholesale on demand;
/// a new snapshot fully replaces the previous one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub score: u8,
    pub band: Band,
    pub breakdown: Vec<String>,
    pub fit_points: f64,
    pub intent_points: f64,
    pub penalty_points: f64,
    pub computed_at_millis: i64,
}
