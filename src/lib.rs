//! Deterministic lead-scoring core.
//!
//! Given an account's static attributes and its time-ordered behavioral
//! event log, the engine produces a 0-100 conversion-likelihood score, a
//! qualitative band (hot/warm/cold), and a human-readable breakdown of every
//! contributing factor. Scoring is a pure function over
//! `(attributes, events, settings, now)`; persistence lives behind the store
//! traits in [`scoring::store`] so the surrounding application owns all I/O.

pub mod config;
pub mod scoring;
pub mod telemetry;

pub use scoring::{
    aggregate, compute_fit, compute_intent, AccountAttributes, AccountId, Band, EventType,
    LeadEvent, OwnerId, RecomputeService, ScoreEngine, ScoreResult, ScoringSettings,
    ScoringSettingsPatch,
};
