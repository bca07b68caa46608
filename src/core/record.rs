//! Administrative maintenance of time records.

use crate::core::duration::worked_hours;
use crate::db::log::ttlog;
use crate::db::queries::{
    delete_record, exit_for_entry, load_record, load_records, neighbours_of, update_record,
};
use crate::errors::{AppError, AppResult};
use crate::models::record_kind::RecordKind;
use crate::models::time_record::TimeRecord;
use crate::utils::time::format_timestamp;
use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::Connection;
use tracing::warn;

/// Fields an administrator may correct. `Some("")` clears note/location.
#[derive(Debug, Default)]
pub struct RecordEdit {
    pub at: Option<NaiveDateTime>,
    pub note: Option<String>,
    pub location: Option<String>,
}

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() { None } else { Some(s) }
}

fn passes(rec: &TimeRecord, at: NaiveDateTime, other: &TimeRecord) -> AppError {
    AppError::Sequence(format!(
        "{} #{} cannot move to {}: it would pass {} #{} at {}.",
        rec.kind,
        rec.id,
        format_timestamp(&at),
        other.kind,
        other.id,
        other.timestamp_str()
    ))
}

pub struct RecordLogic;

impl RecordLogic {
    pub fn list(
        conn: &Connection,
        employee_id: Option<&str>,
        bounds: Option<(NaiveDate, NaiveDate)>,
    ) -> AppResult<Vec<TimeRecord>> {
        load_records(conn, employee_id, bounds)
    }

    /// Apply a correction. Moving a timestamp recomputes the worked duration
    /// of the affected pair. A record never moves past its neighbours, so the
    /// entry/exit alternation of the employee is preserved.
    pub fn edit(conn: &Connection, id: i64, edit: RecordEdit) -> AppResult<TimeRecord> {
        let mut rec = load_record(conn, id)?.ok_or(AppError::RecordNotFound(id))?;

        if let Some(note) = edit.note {
            rec.note = non_empty(note);
        }
        if let Some(location) = edit.location {
            rec.location = non_empty(location);
        }

        let tx = conn.unchecked_transaction()?;

        if let Some(at) = edit.at {
            let (prev, next) = neighbours_of(&tx, &rec)?;
            if let Some(p) = &prev
                && (p.timestamp, p.id) >= (at, rec.id)
            {
                return Err(passes(&rec, at, p));
            }
            if let Some(n) = &next
                && (n.timestamp, n.id) <= (at, rec.id)
            {
                return Err(passes(&rec, at, n));
            }

            rec.timestamp = at;

            match rec.kind {
                RecordKind::Exit => {
                    if let Some(entry_id) = rec.entry_id {
                        let entry = load_record(&tx, entry_id)?
                            .ok_or(AppError::RecordNotFound(entry_id))?;
                        if at <= entry.timestamp {
                            return Err(AppError::Sequence(format!(
                                "exit at {} must be later than its entry at {}.",
                                format_timestamp(&at),
                                entry.timestamp_str()
                            )));
                        }
                        rec.worked_hours = worked_hours(Some(entry.timestamp), Some(at));
                    }
                }
                RecordKind::Entry => {
                    if let Some(mut exit) = exit_for_entry(&tx, rec.id)? {
                        if exit.timestamp <= at {
                            return Err(AppError::Sequence(format!(
                                "entry at {} must be earlier than its exit at {}.",
                                format_timestamp(&at),
                                exit.timestamp_str()
                            )));
                        }
                        exit.worked_hours = worked_hours(Some(at), Some(exit.timestamp));
                        update_record(&tx, &exit)?;
                    }
                }
            }
        }

        update_record(&tx, &rec)?;
        tx.commit()?;

        if let Err(e) = ttlog(
            conn,
            "edit",
            &format!("record #{}", rec.id),
            &format!("Corrected {} of {} to {}", rec.kind, rec.employee_id, rec.timestamp_str()),
        ) {
            warn!(error = %e, "failed to write internal log");
        }

        Ok(rec)
    }

    /// Delete a record. An entry can only go once its exit is gone, and an
    /// exit only while it is the employee's latest record, so no entry is
    /// left unmatched in the middle of the history.
    pub fn delete(conn: &Connection, id: i64) -> AppResult<TimeRecord> {
        let rec = load_record(conn, id)?.ok_or(AppError::RecordNotFound(id))?;

        match rec.kind {
            RecordKind::Entry => {
                if exit_for_entry(conn, id)?.is_some() {
                    return Err(AppError::RecordInUse(id));
                }
            }
            RecordKind::Exit => {
                if let (_, Some(later)) = neighbours_of(conn, &rec)? {
                    return Err(AppError::Sequence(format!(
                        "exit #{id} is followed by {} #{} of {}; only the latest exit can be deleted.",
                        later.kind, later.id, rec.employee_id
                    )));
                }
            }
        }

        delete_record(conn, id)?;

        if let Err(e) = ttlog(
            conn,
            "del",
            &format!("record #{id}"),
            &format!("Deleted {} of {} at {}", rec.kind, rec.employee_id, rec.timestamp_str()),
        ) {
            warn!(error = %e, "failed to write internal log");
        }

        Ok(rec)
    }
}
