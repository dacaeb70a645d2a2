use std::collections::BTreeMap;

use chrono::{DateTime, Duration, NaiveDate, Utc};

use super::domain::{EventType, LeadEvent};
use super::settings::{IntentSettings, PenaltySettings, Thresholds};

/// Outcome of the behavioral scorer. `penalty_points` is a raw accumulator;
/// only `intent_points` is clamped to the configured ceiling.
#[derive(Debug, Clone, PartialEq)]
pub struct IntentOutcome {
    pub intent_points: f64,
    pub penalty_points: f64,
    pub breakdown: Vec<String>,
}

/// Task completions are counted over a fixed 14-day window.
const TASK_WINDOW_DAYS: i64 = 14;
/// Outreach older than this without a reply draws the no-reply penalty.
const NO_REPLY_DAYS: i64 = 7;

/// Pure function over `(events, settings, now)`: replays the event log and
/// accumulates windowed awards and time-decay penalties.
pub fn compute_intent(
    events: &[LeadEvent],
    intent: &IntentSettings,
    penalties: &PenaltySettings,
    thresholds: &Thresholds,
    now_millis: i64,
) -> IntentOutcome {
    let mut points = 0.0;
    let mut penalty_points = 0.0;
    let mut breakdown = Vec::new();

    // Stage advances, capped per calendar day.
    let mut advances_by_day: BTreeMap<NaiveDate, u32> = BTreeMap::new();
    for event in events_of(events, EventType::StageAdvanced) {
        *advances_by_day
            .entry(day_of(event.occurred_at_millis))
            .or_default() += 1;
    }
    for (day, count) in &advances_by_day {
        let awarded = (f64::from(*count) * intent.stage_advanced_points)
            .min(intent.stage_advance_cap_per_day);
        if awarded > 0.0 {
            points += awarded;
            breakdown.push(format!("{count} stage advance(s) on {day} (+{awarded})"));
        }
    }

    // Approval lifecycle scores once per milestone, not per event.
    if events_of(events, EventType::ApprovalRequested).next().is_some() {
        points += intent.approval_requested_points;
        breakdown.push(format!(
            "approval requested (+{})",
            intent.approval_requested_points
        ));
    }
    if events_of(events, EventType::ApprovalApproved).next().is_some() {
        points += intent.approval_approved_points;
        breakdown.push(format!(
            "approval approved (+{})",
            intent.approval_approved_points
        ));
    }
    if events_of(events, EventType::ApprovalRejected).next().is_some() {
        let hit = penalties.approval_rejected.abs();
        penalty_points += hit;
        breakdown.push(format!("approval rejected (-{hit})"));
    }

    // Only the earliest quote counts, and only while it is fresh.
    if let Some(first_quote) =
        events_of(events, EventType::QuoteCreated).min_by_key(|event| event.occurred_at_millis)
    {
        let window = Duration::days(thresholds.quote_window_days).num_milliseconds();
        if now_millis - first_quote.occurred_at_millis <= window {
            points += intent.quote_created_points;
            breakdown.push(format!(
                "first quote within {}d window (+{})",
                thresholds.quote_window_days, intent.quote_created_points
            ));
        }
    }

    // Recent task completions, clamped to the 14-day cap.
    let task_window = Duration::days(TASK_WINDOW_DAYS).num_milliseconds();
    let recent_tasks = events_of(events, EventType::TaskCompleted)
        .filter(|event| now_millis - event.occurred_at_millis <= task_window)
        .count();
    if recent_tasks > 0 {
        let awarded = (recent_tasks as f64 * intent.task_completed_points)
            .min(intent.task_cap_per_14d)
            .max(0.0);
        points += awarded;
        breakdown.push(format!(
            "{recent_tasks} task(s) completed in last {TASK_WINDOW_DAYS}d (+{awarded})"
        ));
    }

    // Reply latency: bonus for a prompt reply to the latest outreach, penalty
    // for prolonged silence. The two outcomes are mutually exclusive, and an
    // account that was never emailed is exempt from both.
    if let Some(outbound) =
        events_of(events, EventType::EmailOutbound).max_by_key(|event| event.occurred_at_millis)
    {
        let earliest_reply = events_of(events, EventType::EmailReply)
            .filter(|event| event.occurred_at_millis >= outbound.occurred_at_millis)
            .min_by_key(|event| event.occurred_at_millis);

        match earliest_reply {
            Some(reply) => {
                let window =
                    Duration::hours(thresholds.email_reply_window_hours).num_milliseconds();
                let elapsed = reply.occurred_at_millis - outbound.occurred_at_millis;
                if elapsed <= window && intent.email_reply_bonus > 0.0 {
                    points += intent.email_reply_bonus;
                    breakdown.push(format!(
                        "reply within {}h of outreach (+{})",
                        thresholds.email_reply_window_hours, intent.email_reply_bonus
                    ));
                }
            }
            None => {
                let silence = Duration::days(NO_REPLY_DAYS).num_milliseconds();
                if now_millis - outbound.occurred_at_millis >= silence {
                    let hit = penalties.no_reply_7d.abs();
                    penalty_points += hit;
                    breakdown.push(format!("no reply {NO_REPLY_DAYS}d after outreach (-{hit})"));
                }
            }
        }
    }

    // Inactivity decay over the whole log.
    if let Some(latest) = events.iter().max_by_key(|event| event.occurred_at_millis) {
        let window = Duration::days(thresholds.activity_window_days).num_milliseconds();
        if now_millis - latest.occurred_at_millis > window {
            let hit = penalties.inactivity_penalty.abs();
            penalty_points += hit;
            breakdown.push(format!(
                "no activity in {}d (-{hit})",
                thresholds.activity_window_days
            ));
        }
    }

    // Stuck decay applies only to accounts that have advanced at least once.
    if let Some(latest_advance) =
        events_of(events, EventType::StageAdvanced).max_by_key(|event| event.occurred_at_millis)
    {
        let window = Duration::days(thresholds.stuck_days).num_milliseconds();
        if now_millis - latest_advance.occurred_at_millis > window {
            let hit = penalties.stuck_penalty.abs();
            penalty_points += hit;
            breakdown.push(format!(
                "no stage advance in {}d (-{hit})",
                thresholds.stuck_days
            ));
        }
    }

    IntentOutcome {
        intent_points: points.min(intent.max_points).max(0.0),
        penalty_points,
        breakdown,
    }
}

fn events_of(events: &[LeadEvent], event_type: EventType) -> impl Iterator<Item = &LeadEvent> {
    events
        .iter()
        .filter(move |event| event.event_type == event_type)
}

/// Calendar-day bucket for a timestamp (UTC day boundary).
fn day_of(millis: i64) -> NaiveDate {
    DateTime::<Utc>::from_timestamp_millis(millis)
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
        .date_naive()
}
