//! Clock-in / clock-out workflow.
//!
//! Records of one employee alternate strictly entry/exit. Every exit carries
//! the worked duration of its pair and triggers a best-effort reconciliation
//! against the planned shifts.

use crate::core::employee::EmployeeLogic;
use crate::core::reconcile::{ReconcileOutcome, ReconcileRequest, Reconciler};
use crate::db::log::ttlog;
use crate::db::queries::{insert_record, last_record_for_employee, load_record};
use crate::db::shifts::SqliteShiftStore;
use crate::errors::{AppError, AppResult};
use crate::models::time_record::TimeRecord;
use crate::utils::formatting::format_hours;
use chrono::NaiveDateTime;
use rusqlite::Connection;
use tracing::warn;

/// Result of a clock-out.
#[derive(Debug)]
pub struct ClockOut {
    pub entry: TimeRecord,
    pub exit: TimeRecord,
    /// `None` when the exit has no computable duration.
    pub outcome: Option<ReconcileOutcome>,
}

pub struct ClockLogic;

fn audit(conn: &Connection, operation: &str, target: &str, message: &str) {
    if let Err(e) = ttlog(conn, operation, target, message) {
        warn!(operation, error = %e, "failed to write internal log");
    }
}

impl ClockLogic {
    pub fn clock_in(
        conn: &Connection,
        employee_id: &str,
        at: NaiveDateTime,
        note: Option<String>,
        location: Option<String>,
    ) -> AppResult<TimeRecord> {
        let emp = EmployeeLogic::require_active(conn, employee_id)?;

        if let Some(last) = last_record_for_employee(conn, employee_id)? {
            if last.kind.is_entry() {
                return Err(AppError::Sequence(format!(
                    "{} is already clocked in since {} (record #{}).",
                    emp.display_name(),
                    last.timestamp_str(),
                    last.id
                )));
            }
            if at < last.timestamp {
                return Err(AppError::Sequence(format!(
                    "entry at {} is earlier than the last exit at {}.",
                    crate::utils::time::format_timestamp(&at),
                    last.timestamp_str()
                )));
            }
        }

        let mut rec = TimeRecord::entry(employee_id, at, note, location);
        rec.id = insert_record(conn, &rec)?;

        audit(conn, "clock_in", employee_id, &format!("Entry #{} at {}", rec.id, rec.timestamp_str()));
        Ok(rec)
    }

    pub fn clock_out(
        conn: &Connection,
        tolerance_minutes: u32,
        employee_id: &str,
        at: NaiveDateTime,
        note: Option<String>,
        location: Option<String>,
    ) -> AppResult<ClockOut> {
        let emp = EmployeeLogic::require_active(conn, employee_id)?;

        let entry = match last_record_for_employee(conn, employee_id)? {
            Some(last) if last.kind.is_entry() => last,
            _ => {
                return Err(AppError::Sequence(format!(
                    "{} has no open entry; clock in first.",
                    emp.display_name()
                )));
            }
        };

        if at <= entry.timestamp {
            return Err(AppError::Sequence(format!(
                "exit at {} must be later than the entry at {}.",
                crate::utils::time::format_timestamp(&at),
                entry.timestamp_str()
            )));
        }

        let mut exit = TimeRecord::exit(&entry, at, note, location);
        exit.id = insert_record(conn, &exit)?;

        audit(
            conn,
            "clock_out",
            employee_id,
            &format!(
                "Exit #{} at {} (worked {})",
                exit.id,
                exit.timestamp_str(),
                exit.worked_hours.map(format_hours).unwrap_or_else(|| "--".into())
            ),
        );

        let outcome = Self::reconcile_pair(conn, tolerance_minutes, &entry, &exit);
        Ok(ClockOut {
            entry,
            exit,
            outcome,
        })
    }

    /// Best-effort reconciliation of a closed pair. Never fails.
    pub fn reconcile_pair(
        conn: &Connection,
        tolerance_minutes: u32,
        entry: &TimeRecord,
        exit: &TimeRecord,
    ) -> Option<ReconcileOutcome> {
        let worked_hours = exit.worked_hours?;

        let store = SqliteShiftStore::new(conn);
        let req = ReconcileRequest {
            employee_id: exit.employee_id.clone(),
            exit_record_id: Some(exit.id),
            entry_at: entry.timestamp,
            exit_at: exit.timestamp,
            worked_hours,
        };

        Some(Reconciler::new(&store, tolerance_minutes).reconcile(&req))
    }

    /// Re-run reconciliation for an exit already stored, e.g. after the
    /// matching shift was planned late.
    pub fn reconcile_record(
        conn: &Connection,
        tolerance_minutes: u32,
        record_id: i64,
    ) -> AppResult<Option<ReconcileOutcome>> {
        let exit = load_record(conn, record_id)?.ok_or(AppError::RecordNotFound(record_id))?;
        if !exit.kind.is_exit() {
            return Err(AppError::Sequence(format!(
                "record #{record_id} is an entry; only exits can be reconciled."
            )));
        }

        let Some(entry_id) = exit.entry_id else {
            return Ok(None);
        };
        let Some(entry) = load_record(conn, entry_id)? else {
            return Ok(None);
        };

        Ok(Self::reconcile_pair(conn, tolerance_minutes, &entry, &exit))
    }
}
