//! Timestamp and recency-decay utilities

use chrono::{DateTime, Utc};

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Get current UTC timestamp
pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Age of `then` relative to `now`, in fractional days
///
/// Timestamps in the future are clamped to an age of zero.
pub fn age_days(now: DateTime<Utc>, then: DateTime<Utc>) -> f64 {
    let seconds = (now - then).num_seconds().max(0) as f64;
    seconds / SECONDS_PER_DAY
}

/// Exponential decay weight for a signal of the given age
///
/// Returns 1.0 at age zero and 0.5 after one half-life.
/// A non-positive half-life disables decay.
pub fn decay_weight(age_days: f64, half_life_days: f64) -> f64 {
    if half_life_days <= 0.0 {
        return 1.0;
    }
    0.5_f64.powf(age_days.max(0.0) / half_life_days)
}
