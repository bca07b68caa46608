use super::shift_status::ShiftStatus;
use crate::core::duration::planned_hours;
use crate::errors::{AppError, AppResult};
use chrono::{Local, NaiveDate, NaiveTime};
use serde::Serialize;

/// A planned block of work for one employee on one calendar day.
#[derive(Debug, Clone, Serialize)]
pub struct Shift {
    pub id: i64,
    pub employee_id: String,
    pub date: NaiveDate,
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub planned_hours: f64,
    pub status: ShiftStatus,
    pub notes: String,
    /// Exit record that auto-completed this shift, if any.
    pub time_record_id: Option<i64>,
    pub created_at: String,
}

impl Shift {
    pub fn new(
        employee_id: &str,
        date: NaiveDate,
        start: NaiveTime,
        end: NaiveTime,
        status: ShiftStatus,
        notes: &str,
    ) -> AppResult<Self> {
        validate_window(start, end)?;

        Ok(Self {
            id: 0,
            employee_id: employee_id.to_string(),
            date,
            start,
            end,
            planned_hours: planned_hours(start, end),
            status,
            notes: notes.to_string(),
            time_record_id: None,
            created_at: Local::now().to_rfc3339(),
        })
    }

    /// Change start/end and keep `planned_hours` in sync.
    pub fn reschedule(&mut self, start: NaiveTime, end: NaiveTime) -> AppResult<()> {
        validate_window(start, end)?;
        self.start = start;
        self.end = end;
        self.planned_hours = planned_hours(start, end);
        Ok(())
    }

    /// Notes are an append-only audit trail, one line per entry.
    pub fn append_note(&mut self, note: &str) {
        if !self.notes.is_empty() {
            self.notes.push('\n');
        }
        self.notes.push_str(note);
    }

    pub fn start_str(&self) -> String {
        self.start.format("%H:%M").to_string()
    }

    pub fn end_str(&self) -> String {
        self.end.format("%H:%M").to_string()
    }
}

/// Shifts never cross midnight: the end must be strictly later than the start.
pub fn validate_window(start: NaiveTime, end: NaiveTime) -> AppResult<()> {
    if end <= start {
        return Err(AppError::InvalidShift(format!(
            "end {} must be later than start {}",
            end.format("%H:%M"),
            start.format("%H:%M")
        )));
    }
    Ok(())
}
