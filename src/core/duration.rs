//! Worked and planned durations, expressed in fractional hours.
//!
//! Both are rounded to 2 decimals. The rounding matters: the reconciler
//! compares a rounded worked duration against a rounded planned duration,
//! so a session 4h55m long is seen as `4.92`, not `4.9166…`.

use chrono::{NaiveDateTime, NaiveTime};

const MS_PER_HOUR: f64 = 3_600_000.0;

/// Round to 2 decimal places, half away from zero.
pub fn round_hours(hours: f64) -> f64 {
    (hours * 100.0).round() / 100.0
}

/// `(exit - entry)` in hours, or `None` when either side is missing.
pub fn worked_hours(entry: Option<NaiveDateTime>, exit: Option<NaiveDateTime>) -> Option<f64> {
    let (entry, exit) = (entry?, exit?);
    let ms = (exit - entry).num_milliseconds();
    Some(round_hours(ms as f64 / MS_PER_HOUR))
}

/// Planned length of a same-day shift window.
pub fn planned_hours(start: NaiveTime, end: NaiveTime) -> f64 {
    let ms = (end - start).num_milliseconds();
    round_hours(ms as f64 / MS_PER_HOUR)
}
