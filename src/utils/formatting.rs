//! Formatting utilities used for CLI and export outputs.

use crate::models::shift_status::ShiftStatus;
use crate::utils::colors::{GREEN, GREY, RESET, YELLOW};

/// `4.97` → `"4.97h"`
pub fn format_hours(hours: f64) -> String {
    format!("{:.2}h", hours)
}

/// `4.97` → `"04h 58m"`
pub fn hours2readable(hours: f64) -> String {
    let mins = (hours * 60.0).round() as i64;
    let sign = if mins < 0 { "-" } else { "" };
    let m = mins.abs();
    format!("{}{:02}h {:02}m", sign, m / 60, m % 60)
}

pub fn or_dash(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v.to_string(),
        _ => "--".to_string(),
    }
}

/// Status label with its terminal color.
pub fn describe_status(status: ShiftStatus) -> String {
    let color = match status {
        ShiftStatus::Scheduled => YELLOW,
        ShiftStatus::Confirmed => RESET,
        ShiftStatus::Completed => GREEN,
        ShiftStatus::Cancelled => GREY,
    };
    format!("{color}{status}{RESET}")
}

/// Separator line made of the configured character.
pub fn separator(ch: &str, width: usize) -> String {
    let ch = if ch.is_empty() { "-" } else { ch };
    format!("{GREY}{}{RESET}", ch.repeat(width))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn readable_hours() {
        assert_eq!(hours2readable(4.97), "04h 58m");
        assert_eq!(hours2readable(0.5), "00h 30m");
        assert_eq!(format_hours(5.0), "5.00h");
    }
}
