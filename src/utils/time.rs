//! Time utilities: parsing HH:MM and full timestamps, formatting for storage.

use crate::errors::{AppError, AppResult};
use chrono::{Local, NaiveDateTime, NaiveTime, Timelike};

/// Storage and display format of record timestamps (local wall clock).
pub const TIMESTAMP_FMT: &str = "%Y-%m-%d %H:%M:%S";

const ACCEPTED_TIMESTAMP_FMTS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

pub fn parse_time(t: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(t.trim(), "%H:%M").ok()
}

pub fn parse_time_arg(t: &str) -> AppResult<NaiveTime> {
    parse_time(t).ok_or_else(|| AppError::InvalidTime(t.to_string()))
}

pub fn parse_optional_time(input: Option<&String>) -> AppResult<Option<NaiveTime>> {
    input.map(|s| parse_time_arg(s)).transpose()
}

pub fn parse_timestamp(s: &str) -> AppResult<NaiveDateTime> {
    let s = s.trim();
    ACCEPTED_TIMESTAMP_FMTS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .ok_or_else(|| AppError::InvalidTimestamp(s.to_string()))
}

/// `--at` value, or the current local time truncated to the second.
pub fn timestamp_or_now(at: Option<&String>) -> AppResult<NaiveDateTime> {
    match at {
        Some(s) => parse_timestamp(s),
        None => Ok(now_local()),
    }
}

pub fn now_local() -> NaiveDateTime {
    let now = Local::now().naive_local();
    now.with_nanosecond(0).unwrap_or(now)
}

pub fn format_timestamp(ts: &NaiveDateTime) -> String {
    ts.format(TIMESTAMP_FMT).to_string()
}
