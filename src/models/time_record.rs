use super::record_kind::RecordKind;
use crate::core::duration::worked_hours;
use crate::utils::time::format_timestamp;
use chrono::{Local, NaiveDateTime};
use serde::Serialize;

/// A single clock-in or clock-out event.
#[derive(Debug, Clone, Serialize)]
pub struct TimeRecord {
    pub id: i64,                    // ⇔ time_records.id
    pub employee_id: String,        // ⇔ time_records.employee_id
    pub kind: RecordKind,           // ⇔ time_records.kind ('entry' | 'exit')
    pub timestamp: NaiveDateTime,   // ⇔ time_records.timestamp ("YYYY-MM-DD HH:MM:SS", local)
    pub note: Option<String>,       // ⇔ time_records.note
    pub location: Option<String>,   // ⇔ time_records.location
    pub worked_hours: Option<f64>,  // ⇔ time_records.worked_hours (exit only)
    pub entry_id: Option<i64>,      // ⇔ time_records.entry_id (exit only)
    pub created_at: String,         // ⇔ time_records.created_at (ISO8601)
}

impl TimeRecord {
    /// New, not yet persisted clock-in (`id = 0`).
    pub fn entry(
        employee_id: &str,
        timestamp: NaiveDateTime,
        note: Option<String>,
        location: Option<String>,
    ) -> Self {
        Self {
            id: 0,
            employee_id: employee_id.to_string(),
            kind: RecordKind::Entry,
            timestamp,
            note,
            location,
            worked_hours: None,
            entry_id: None,
            created_at: Local::now().to_rfc3339(),
        }
    }

    /// New clock-out closing `entry`; the worked duration is derived from the pair.
    pub fn exit(
        entry: &TimeRecord,
        timestamp: NaiveDateTime,
        note: Option<String>,
        location: Option<String>,
    ) -> Self {
        Self {
            id: 0,
            employee_id: entry.employee_id.clone(),
            kind: RecordKind::Exit,
            timestamp,
            note,
            location,
            worked_hours: worked_hours(Some(entry.timestamp), Some(timestamp)),
            entry_id: Some(entry.id),
            created_at: Local::now().to_rfc3339(),
        }
    }

    pub fn timestamp_str(&self) -> String {
        format_timestamp(&self.timestamp)
    }
}
