use super::domain::Band;

/// Weighted merge of the two sub-scores, minus penalties, clamped to 0-100
/// and rounded to the nearest integer.
///
/// Each sub-score ceiling is kept equal to its distribution percent (see
/// `ScoringSettings::normalized`), so dividing by the percent normalizes the
/// sub-score to 0-1 before weighting. A zero percent contributes zero rather
/// than dividing by zero.
pub fn aggregate(
    fit_points: f64,
    fit_percent: f64,
    intent_points: f64,
    intent_percent: f64,
    penalty_points: f64,
) -> (u8, Band) {
    let fit_normalized = if fit_percent > 0.0 {
        fit_points / fit_percent
    } else {
        0.0
    };
    let intent_normalized = if intent_percent > 0.0 {
        intent_points / intent_percent
    } else {
        0.0
    };

    let weighted =
        (fit_percent / 100.0 * fit_normalized + intent_percent / 100.0 * intent_normalized) * 100.0;
    let score = (weighted - penalty_points).clamp(0.0, 100.0).round() as u8;

    (score, Band::for_score(score))
}
