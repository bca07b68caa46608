//! Queries on the `shifts` table and the SQLite implementation of
//! [`ShiftStore`] used by the reconciler.

use crate::core::reconcile::ShiftStore;
use crate::db::log::ttlog;
use crate::errors::{AppError, AppResult};
use crate::models::shift::Shift;
use crate::models::shift_status::ShiftStatus;
use crate::utils::time::format_timestamp;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rusqlite::{Connection, OptionalExtension, Result, Row, params, params_from_iter};

const SELECT_SHIFTS: &str = "SELECT id, employee_id, date, start_time, end_time, planned_hours,
        status, notes, time_record_id, created_at
     FROM shifts";

const PENDING_STATUSES: &str = "('scheduled','confirmed')";

fn conversion_error(col: usize, err: AppError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(col, rusqlite::types::Type::Text, Box::new(err))
}

fn parse_hhmm(col: usize, s: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(s, "%H:%M").map_err(|_| conversion_error(col, AppError::InvalidTime(s.into())))
}

pub fn map_shift(row: &Row) -> Result<Shift> {
    let date_str: String = row.get("date")?;
    let date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d")
        .map_err(|_| conversion_error(2, AppError::InvalidDate(date_str.clone())))?;

    let start_str: String = row.get("start_time")?;
    let end_str: String = row.get("end_time")?;

    let status_str: String = row.get("status")?;
    let status = ShiftStatus::from_db_str(&status_str)
        .ok_or_else(|| conversion_error(6, AppError::InvalidStatus(status_str.clone())))?;

    Ok(Shift {
        id: row.get("id")?,
        employee_id: row.get("employee_id")?,
        date,
        start: parse_hhmm(3, &start_str)?,
        end: parse_hhmm(4, &end_str)?,
        planned_hours: row.get("planned_hours")?,
        status,
        notes: row.get("notes")?,
        time_record_id: row.get("time_record_id")?,
        created_at: row.get("created_at")?,
    })
}

pub fn insert_shift(conn: &Connection, s: &Shift) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO shifts
            (employee_id, date, start_time, end_time, planned_hours, status, notes, time_record_id, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            s.employee_id,
            s.date.format("%Y-%m-%d").to_string(),
            s.start_str(),
            s.end_str(),
            s.planned_hours,
            s.status.to_db_str(),
            s.notes,
            s.time_record_id,
            s.created_at,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn update_shift(conn: &Connection, s: &Shift) -> AppResult<()> {
    conn.execute(
        "UPDATE shifts
         SET date = ?1, start_time = ?2, end_time = ?3, planned_hours = ?4,
             status = ?5, notes = ?6, time_record_id = ?7
         WHERE id = ?8",
        params![
            s.date.format("%Y-%m-%d").to_string(),
            s.start_str(),
            s.end_str(),
            s.planned_hours,
            s.status.to_db_str(),
            s.notes,
            s.time_record_id,
            s.id,
        ],
    )?;
    Ok(())
}

pub fn delete_shift(conn: &Connection, id: i64) -> AppResult<bool> {
    Ok(conn.execute("DELETE FROM shifts WHERE id = ?1", [id])? == 1)
}

pub fn load_shift(conn: &Connection, id: i64) -> AppResult<Option<Shift>> {
    let sql = format!("{SELECT_SHIFTS} WHERE id = ?1");
    Ok(conn.query_row(&sql, [id], map_shift).optional()?)
}

pub fn load_shifts(
    conn: &Connection,
    employee_id: Option<&str>,
    bounds: Option<(NaiveDate, NaiveDate)>,
    pending_only: bool,
) -> AppResult<Vec<Shift>> {
    let mut clauses: Vec<String> = Vec::new();
    let mut args: Vec<String> = Vec::new();

    if let Some(emp) = employee_id {
        clauses.push("employee_id = ?".into());
        args.push(emp.to_string());
    }

    if let Some((from, to)) = bounds {
        clauses.push("date BETWEEN ? AND ?".into());
        args.push(from.format("%Y-%m-%d").to_string());
        args.push(to.format("%Y-%m-%d").to_string());
    }

    if pending_only {
        clauses.push(format!("status IN {PENDING_STATUSES}"));
    }

    let filter = if clauses.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", clauses.join(" AND "))
    };

    let sql = format!("{SELECT_SHIFTS}{filter} ORDER BY date ASC, start_time ASC, id ASC");
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params_from_iter(args.iter()), map_shift)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// [`ShiftStore`] backed by the local SQLite database.
pub struct SqliteShiftStore<'c> {
    conn: &'c Connection,
}

impl<'c> SqliteShiftStore<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }
}

impl ShiftStore for SqliteShiftStore<'_> {
    fn find_pending_shift(
        &self,
        employee_id: &str,
        day_start: NaiveDateTime,
        day_end: NaiveDateTime,
    ) -> AppResult<Option<Shift>> {
        // A shift "happens" at local midnight of its date.
        let sql = format!(
            "{SELECT_SHIFTS}
             WHERE employee_id = ?1
               AND date || ' 00:00:00' >= ?2
               AND date || ' 00:00:00' < ?3
               AND status IN {PENDING_STATUSES}
             ORDER BY start_time ASC, id ASC
             LIMIT 1"
        );

        Ok(self
            .conn
            .query_row(
                &sql,
                params![
                    employee_id,
                    format_timestamp(&day_start),
                    format_timestamp(&day_end)
                ],
                map_shift,
            )
            .optional()?)
    }

    fn complete_shift(
        &self,
        shift_id: i64,
        note: &str,
        exit_record_id: Option<i64>,
    ) -> AppResult<bool> {
        // Single conditional update: concurrent clock-outs cannot both complete
        // the same shift or append the note twice.
        let sql = format!(
            "UPDATE shifts
             SET status = 'completed',
                 notes = CASE WHEN notes = '' THEN ?2 ELSE notes || char(10) || ?2 END,
                 time_record_id = ?3
             WHERE id = ?1 AND status IN {PENDING_STATUSES}"
        );

        let changed = self
            .conn
            .execute(&sql, params![shift_id, note, exit_record_id])?;
        Ok(changed == 1)
    }

    fn record_outcome(&self, outcome: &str, target: &str, message: &str) -> AppResult<()> {
        ttlog(self.conn, &format!("reconcile_{outcome}"), target, message)
    }
}
