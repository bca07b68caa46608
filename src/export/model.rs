// src/export/model.rs

use crate::models::shift::Shift;
use crate::models::time_record::TimeRecord;
use serde::Serialize;

/// Flat row for time record exports.
#[derive(Serialize, Clone, Debug)]
pub struct RecordExport {
    pub id: i64,
    pub employee_id: String,
    pub kind: String,
    pub timestamp: String,
    pub worked_hours: Option<f64>,
    pub entry_id: Option<i64>,
    pub location: String,
    pub note: String,
}

impl From<&TimeRecord> for RecordExport {
    fn from(r: &TimeRecord) -> Self {
        Self {
            id: r.id,
            employee_id: r.employee_id.clone(),
            kind: r.kind.to_db_str().to_string(),
            timestamp: r.timestamp_str(),
            worked_hours: r.worked_hours,
            entry_id: r.entry_id,
            location: r.location.clone().unwrap_or_default(),
            note: r.note.clone().unwrap_or_default(),
        }
    }
}

/// Flat row for shift exports.
#[derive(Serialize, Clone, Debug)]
pub struct ShiftExport {
    pub id: i64,
    pub employee_id: String,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub planned_hours: f64,
    pub status: String,
    pub time_record_id: Option<i64>,
    pub notes: String,
}

impl From<&Shift> for ShiftExport {
    fn from(s: &Shift) -> Self {
        Self {
            id: s.id,
            employee_id: s.employee_id.clone(),
            date: s.date.format("%Y-%m-%d").to_string(),
            start_time: s.start_str(),
            end_time: s.end_str(),
            planned_hours: s.planned_hours,
            status: s.status.to_db_str().to_string(),
            time_record_id: s.time_record_id,
            notes: s.notes.clone(),
        }
    }
}
