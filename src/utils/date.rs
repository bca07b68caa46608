use crate::errors::{AppError, AppResult};
use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

pub fn parse_date_arg(s: &str) -> AppResult<NaiveDate> {
    parse_date(s).ok_or_else(|| AppError::InvalidDate(s.to_string()))
}

/// Half-open local calendar day `[00:00, next 00:00)` containing `ts`.
pub fn day_bounds(ts: NaiveDateTime) -> (NaiveDateTime, NaiveDateTime) {
    let start = ts.date().and_time(NaiveTime::default());
    (start, start + Duration::days(1))
}

pub fn month_last_day(year: i32, month: u32) -> Option<NaiveDate> {
    let (ny, nm) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(ny, nm, 1)?.pred_opt()
}

/// Inclusive date bounds of a period expression.
///
/// Supports:
/// - YYYY
/// - YYYY-MM
/// - YYYY-MM-DD
/// - any of the above as `start:end`, both sides with the same granularity
pub fn parse_period(p: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    let p = p.trim();

    if let Some((start_raw, end_raw)) = p.split_once(':') {
        let (start_raw, end_raw) = (start_raw.trim(), end_raw.trim());
        if start_raw.len() != end_raw.len() {
            return Err(AppError::InvalidPeriod(format!(
                "{p}: start and end must have the same format"
            )));
        }

        let (from, _) = single_period(start_raw)?;
        let (_, to) = single_period(end_raw)?;
        if to < from {
            return Err(AppError::InvalidPeriod(format!("{p}: end is before start")));
        }
        return Ok((from, to));
    }

    single_period(p)
}

fn single_period(p: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    let invalid = || AppError::InvalidPeriod(p.to_string());

    match p.len() {
        // YYYY
        4 => {
            let year: i32 = p.parse().map_err(|_| invalid())?;
            let from = NaiveDate::from_ymd_opt(year, 1, 1).ok_or_else(invalid)?;
            let to = NaiveDate::from_ymd_opt(year, 12, 31).ok_or_else(invalid)?;
            Ok((from, to))
        }
        // YYYY-MM
        7 => {
            let from = parse_date(&format!("{p}-01")).ok_or_else(invalid)?;
            let to = month_last_day(from.year(), from.month()).ok_or_else(invalid)?;
            Ok((from, to))
        }
        // YYYY-MM-DD
        10 => {
            let d = parse_date(p).ok_or_else(invalid)?;
            Ok((d, d))
        }
        _ => Err(invalid()),
    }
}

/// Inclusive bounds selected by `--period`: the current month when absent,
/// no bounds at all for `all`.
pub fn resolve_period(period: Option<&String>) -> AppResult<Option<(NaiveDate, NaiveDate)>> {
    match period {
        Some(p) if p.eq_ignore_ascii_case("all") => Ok(None),
        Some(p) => parse_period(p).map(Some),
        None => {
            let t = today();
            let from = NaiveDate::from_ymd_opt(t.year(), t.month(), 1).unwrap_or(t);
            let to = month_last_day(t.year(), t.month()).unwrap_or(t);
            Ok(Some((from, to)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        parse_date(s).unwrap()
    }

    #[test]
    fn day_bounds_are_half_open() {
        let ts = NaiveDateTime::parse_from_str("2025-11-10 17:03:00", "%Y-%m-%d %H:%M:%S").unwrap();
        let (start, end) = day_bounds(ts);
        assert_eq!(start.to_string(), "2025-11-10 00:00:00");
        assert_eq!(end.to_string(), "2025-11-11 00:00:00");
    }

    #[test]
    fn single_periods() {
        assert_eq!(parse_period("2025").unwrap(), (d("2025-01-01"), d("2025-12-31")));
        assert_eq!(parse_period("2024-02").unwrap(), (d("2024-02-01"), d("2024-02-29")));
        assert_eq!(parse_period("2025-11-10").unwrap(), (d("2025-11-10"), d("2025-11-10")));
    }

    #[test]
    fn ranges() {
        assert_eq!(
            parse_period("2025-09:2025-11").unwrap(),
            (d("2025-09-01"), d("2025-11-30"))
        );
        assert!(parse_period("2025:2025-11").is_err());
        assert!(parse_period("2025-12:2025-01").is_err());
    }

    #[test]
    fn all_means_unbounded() {
        assert_eq!(resolve_period(Some(&"all".to_string())).unwrap(), None);
        assert!(resolve_period(None).unwrap().is_some());
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(parse_period("last-week").is_err());
        assert!(parse_period("2025-13").is_err());
    }
}
