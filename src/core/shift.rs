//! Administrative management of planned shifts.

use crate::core::employee::EmployeeLogic;
use crate::db::log::ttlog;
use crate::db::shifts::{delete_shift, insert_shift, load_shift, load_shifts, update_shift};
use crate::errors::{AppError, AppResult};
use crate::models::shift::Shift;
use crate::models::shift_status::ShiftStatus;
use crate::utils::time::{format_timestamp, now_local};
use chrono::{NaiveDate, NaiveTime};
use rusqlite::Connection;
use tracing::warn;

#[derive(Debug, Default)]
pub struct ShiftEdit {
    pub date: Option<NaiveDate>,
    pub start: Option<NaiveTime>,
    pub end: Option<NaiveTime>,
    pub status: Option<ShiftStatus>,
    pub notes: Option<String>,
}

fn audit(conn: &Connection, operation: &str, shift_id: i64, message: &str) {
    if let Err(e) = ttlog(conn, operation, &format!("shift #{shift_id}"), message) {
        warn!(operation, error = %e, "failed to write internal log");
    }
}

pub struct ShiftLogic;

impl ShiftLogic {
    pub fn add(
        conn: &Connection,
        employee_id: &str,
        date: NaiveDate,
        start: NaiveTime,
        end: NaiveTime,
        status: ShiftStatus,
        notes: &str,
    ) -> AppResult<Shift> {
        EmployeeLogic::require_active(conn, employee_id)?;

        if !status.is_pending() {
            return Err(AppError::InvalidShift(format!(
                "a new shift must be scheduled or confirmed, not {status}"
            )));
        }

        let mut shift = Shift::new(employee_id, date, start, end, status, notes)?;
        shift.id = insert_shift(conn, &shift)?;

        audit(
            conn,
            "shift_add",
            shift.id,
            &format!("{} {} {}-{}", employee_id, date, shift.start_str(), shift.end_str()),
        );
        Ok(shift)
    }

    pub fn edit(conn: &Connection, id: i64, edit: ShiftEdit) -> AppResult<Shift> {
        let mut shift = load_shift(conn, id)?.ok_or(AppError::ShiftNotFound(id))?;

        if let Some(date) = edit.date {
            shift.date = date;
        }
        if edit.start.is_some() || edit.end.is_some() {
            let start = edit.start.unwrap_or(shift.start);
            let end = edit.end.unwrap_or(shift.end);
            shift.reschedule(start, end)?;
        }
        if let Some(status) = edit.status {
            shift.status = status;
            if status.is_pending() {
                // reopened: the completing exit no longer applies
                shift.time_record_id = None;
            }
        }
        if let Some(notes) = edit.notes {
            shift.notes = notes;
        }

        update_shift(conn, &shift)?;
        audit(conn, "shift_edit", id, &format!("Status {}", shift.status));
        Ok(shift)
    }

    /// Cancel a pending shift. Cancelling twice is a no-op; a completed shift
    /// cannot be cancelled.
    pub fn cancel(conn: &Connection, id: i64) -> AppResult<Shift> {
        let mut shift = load_shift(conn, id)?.ok_or(AppError::ShiftNotFound(id))?;

        match shift.status {
            ShiftStatus::Cancelled => return Ok(shift),
            ShiftStatus::Completed => {
                return Err(AppError::InvalidShift(format!(
                    "shift #{id} is already completed"
                )));
            }
            _ => {}
        }

        shift.status = ShiftStatus::Cancelled;
        shift.append_note(&format!("[admin] cancelled at {}", format_timestamp(&now_local())));
        update_shift(conn, &shift)?;

        audit(conn, "shift_cancel", id, "Shift cancelled");
        Ok(shift)
    }

    pub fn delete(conn: &Connection, id: i64) -> AppResult<()> {
        if !delete_shift(conn, id)? {
            return Err(AppError::ShiftNotFound(id));
        }
        audit(conn, "shift_del", id, "Shift deleted");
        Ok(())
    }

    pub fn list(
        conn: &Connection,
        employee_id: Option<&str>,
        bounds: Option<(NaiveDate, NaiveDate)>,
        pending_only: bool,
    ) -> AppResult<Vec<Shift>> {
        load_shifts(conn, employee_id, bounds, pending_only)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::pool::DbPool;
    use crate::utils::date::parse_date_arg;
    use crate::utils::time::parse_time_arg;

    fn setup() -> (DbPool, Shift) {
        let pool = DbPool::in_memory().unwrap();
        EmployeeLogic::add(&pool.conn, "E1", "Anna").unwrap();
        let shift = ShiftLogic::add(
            &pool.conn,
            "E1",
            parse_date_arg("2025-11-10").unwrap(),
            parse_time_arg("17:00").unwrap(),
            parse_time_arg("22:00").unwrap(),
            ShiftStatus::Scheduled,
            "bar",
        )
        .unwrap();
        (pool, shift)
    }

    #[test]
    fn edit_recomputes_planned_hours() {
        let (pool, shift) = setup();
        let edited = ShiftLogic::edit(
            &pool.conn,
            shift.id,
            ShiftEdit {
                end: Some(parse_time_arg("20:30").unwrap()),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(edited.planned_hours, 3.5);

        let crossing = ShiftEdit {
            start: Some(parse_time_arg("21:00").unwrap()),
            ..Default::default()
        };
        assert!(ShiftLogic::edit(&pool.conn, shift.id, crossing).is_err());
    }

    #[test]
    fn cancel_is_idempotent_but_not_for_completed() {
        let (pool, shift) = setup();
        let cancelled = ShiftLogic::cancel(&pool.conn, shift.id).unwrap();
        assert_eq!(cancelled.status, ShiftStatus::Cancelled);
        assert!(cancelled.notes.starts_with("bar\n[admin] cancelled"));

        let again = ShiftLogic::cancel(&pool.conn, shift.id).unwrap();
        assert_eq!(again.notes, cancelled.notes);

        ShiftLogic::edit(
            &pool.conn,
            shift.id,
            ShiftEdit {
                status: Some(ShiftStatus::Completed),
                ..Default::default()
            },
        )
        .unwrap();
        assert!(ShiftLogic::cancel(&pool.conn, shift.id).is_err());
    }

    #[test]
    fn new_shifts_start_pending() {
        let (pool, _) = setup();
        let res = ShiftLogic::add(
            &pool.conn,
            "E1",
            parse_date_arg("2025-11-11").unwrap(),
            parse_time_arg("17:00").unwrap(),
            parse_time_arg("22:00").unwrap(),
            ShiftStatus::Completed,
            "",
        );
        assert!(res.is_err());
    }

    #[test]
    fn delete_unknown_shift_fails() {
        let (pool, shift) = setup();
        ShiftLogic::delete(&pool.conn, shift.id).unwrap();
        assert!(matches!(
            ShiftLogic::delete(&pool.conn, shift.id),
            Err(AppError::ShiftNotFound(_))
        ));
    }
}
