use super::domain::DailyCheckCounts;

/// Score reported for a category with nothing to check.
pub const VACUOUS_SCORE: f64 = 100.0;

/// Percentage of `numerator` over `denominator`, or `vacuous_value` when the
/// denominator is zero. A day without checks scores as fully compliant.
pub fn safe_ratio(numerator: u32, denominator: u32, vacuous_value: f64) -> f64 {
    if denominator == 0 {
        return vacuous_value;
    }

    let pct = (numerator as f64 / denominator as f64) * 100.0;
    pct.clamp(0.0, 100.0)
}

/// Intermediate figures derived from a day's counts.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct CheckMetrics {
    pub average_temperature: f64,
    pub temperature_readings: u32,
    pub temperature_violation_count: u32,
    pub temperature_score_percent: f64,
    pub cleaning_outstanding: u32,
    pub cleaning_score_percent: f64,
    pub hygiene_failures: u32,
    pub hygiene_score_percent: f64,
    pub total_checks: u32,
    pub violations: u32,
    pub compliance_percent: f64,
}

pub(crate) fn measure(counts: &DailyCheckCounts) -> CheckMetrics {
    let readings = &counts.temperature_readings;
    let temperature_readings = readings.len() as u32;

    let average_temperature = if readings.is_empty() {
        0.0
    } else {
        readings.iter().map(|reading| reading.value).sum::<f64>() / readings.len() as f64
    };

    let temperature_violation_count = readings
        .iter()
        .filter(|reading| !reading.within_range)
        .count() as u32;

    let cleaning_outstanding = counts
        .cleaning_tasks_total
        .saturating_sub(counts.cleaning_tasks_completed);
    let hygiene_failures = counts
        .hygiene_checks_total
        .saturating_sub(counts.hygiene_checks_passed);

    let total_checks = counts
        .cleaning_tasks_total
        .saturating_add(counts.hygiene_checks_total)
        .saturating_add(temperature_readings);
    let violations = temperature_violation_count
        .saturating_add(cleaning_outstanding)
        .saturating_add(hygiene_failures);

    CheckMetrics {
        average_temperature,
        temperature_readings,
        temperature_violation_count,
        temperature_score_percent: safe_ratio(
            temperature_readings - temperature_violation_count,
            temperature_readings,
            VACUOUS_SCORE,
        ),
        cleaning_outstanding,
        cleaning_score_percent: safe_ratio(
            counts.cleaning_tasks_completed,
            counts.cleaning_tasks_total,
            VACUOUS_SCORE,
        ),
        hygiene_failures,
        hygiene_score_percent: safe_ratio(
            counts.hygiene_checks_passed,
            counts.hygiene_checks_total,
            VACUOUS_SCORE,
        ),
        total_checks,
        violations,
        compliance_percent: safe_ratio(
            total_checks.saturating_sub(violations),
            total_checks,
            VACUOUS_SCORE,
        ),
    }
}
