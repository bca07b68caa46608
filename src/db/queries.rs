//! Queries on the `time_records` table.

use crate::errors::{AppError, AppResult};
use crate::models::record_kind::RecordKind;
use crate::models::time_record::TimeRecord;
use crate::utils::time::{TIMESTAMP_FMT, format_timestamp};
use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::{Connection, OptionalExtension, Result, Row, params, params_from_iter};

const SELECT_RECORDS: &str = "SELECT id, employee_id, kind, timestamp, note, location,
        worked_hours, entry_id, created_at
     FROM time_records";

fn conversion_error(col: usize, err: AppError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(col, rusqlite::types::Type::Text, Box::new(err))
}

pub fn map_record(row: &Row) -> Result<TimeRecord> {
    let kind_str: String = row.get("kind")?;
    let kind = RecordKind::from_db_str(&kind_str)
        .ok_or_else(|| conversion_error(2, AppError::InvalidRecordKind(kind_str.clone())))?;

    let ts_str: String = row.get("timestamp")?;
    let timestamp = NaiveDateTime::parse_from_str(&ts_str, TIMESTAMP_FMT)
        .map_err(|_| conversion_error(3, AppError::InvalidTimestamp(ts_str.clone())))?;

    Ok(TimeRecord {
        id: row.get("id")?,
        employee_id: row.get("employee_id")?,
        kind,
        timestamp,
        note: row.get("note")?,
        location: row.get("location")?,
        worked_hours: row.get("worked_hours")?,
        entry_id: row.get("entry_id")?,
        created_at: row.get("created_at")?,
    })
}

/// Insert a new record and return its id.
pub fn insert_record(conn: &Connection, rec: &TimeRecord) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO time_records
            (employee_id, kind, timestamp, note, location, worked_hours, entry_id, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            rec.employee_id,
            rec.kind.to_db_str(),
            format_timestamp(&rec.timestamp),
            rec.note,
            rec.location,
            rec.worked_hours,
            rec.entry_id,
            rec.created_at,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Update the mutable fields of a record (everything but id, employee, kind).
pub fn update_record(conn: &Connection, rec: &TimeRecord) -> AppResult<()> {
    conn.execute(
        "UPDATE time_records
         SET timestamp = ?1, note = ?2, location = ?3, worked_hours = ?4, entry_id = ?5
         WHERE id = ?6",
        params![
            format_timestamp(&rec.timestamp),
            rec.note,
            rec.location,
            rec.worked_hours,
            rec.entry_id,
            rec.id,
        ],
    )?;
    Ok(())
}

pub fn delete_record(conn: &Connection, id: i64) -> AppResult<()> {
    conn.execute("DELETE FROM time_records WHERE id = ?1", [id])?;
    Ok(())
}

pub fn load_record(conn: &Connection, id: i64) -> AppResult<Option<TimeRecord>> {
    let sql = format!("{SELECT_RECORDS} WHERE id = ?1");
    Ok(conn.query_row(&sql, [id], map_record).optional()?)
}

/// Most recent record of an employee, i.e. the one deciding whether the
/// next clock event must be an entry or an exit.
pub fn last_record_for_employee(conn: &Connection, employee_id: &str) -> AppResult<Option<TimeRecord>> {
    let sql = format!(
        "{SELECT_RECORDS} WHERE employee_id = ?1 ORDER BY timestamp DESC, id DESC LIMIT 1"
    );
    Ok(conn.query_row(&sql, [employee_id], map_record).optional()?)
}

/// Records of the same employee immediately before and after `rec` in the
/// `(timestamp, id)` ordering used by the clock workflow.
pub fn neighbours_of(
    conn: &Connection,
    rec: &TimeRecord,
) -> AppResult<(Option<TimeRecord>, Option<TimeRecord>)> {
    let ts = format_timestamp(&rec.timestamp);

    let prev_sql = format!(
        "{SELECT_RECORDS}
         WHERE employee_id = ?1 AND (timestamp < ?2 OR (timestamp = ?2 AND id < ?3))
         ORDER BY timestamp DESC, id DESC LIMIT 1"
    );
    let next_sql = format!(
        "{SELECT_RECORDS}
         WHERE employee_id = ?1 AND (timestamp > ?2 OR (timestamp = ?2 AND id > ?3))
         ORDER BY timestamp ASC, id ASC LIMIT 1"
    );

    let args = params![rec.employee_id, ts, rec.id];
    let prev = conn.query_row(&prev_sql, args, map_record).optional()?;
    let next = conn.query_row(&next_sql, args, map_record).optional()?;
    Ok((prev, next))
}

/// The exit that closed `entry_id`, if any.
pub fn exit_for_entry(conn: &Connection, entry_id: i64) -> AppResult<Option<TimeRecord>> {
    let sql = format!("{SELECT_RECORDS} WHERE kind = 'exit' AND entry_id = ?1 LIMIT 1");
    Ok(conn.query_row(&sql, [entry_id], map_record).optional()?)
}

/// Records ordered chronologically, optionally filtered by employee and by an
/// inclusive date range.
pub fn load_records(
    conn: &Connection,
    employee_id: Option<&str>,
    bounds: Option<(NaiveDate, NaiveDate)>,
) -> AppResult<Vec<TimeRecord>> {
    let mut clauses: Vec<&str> = Vec::new();
    let mut args: Vec<String> = Vec::new();

    if let Some(emp) = employee_id {
        clauses.push("employee_id = ?");
        args.push(emp.to_string());
    }

    if let Some((from, to)) = bounds {
        clauses.push("substr(timestamp, 1, 10) >= ?");
        args.push(from.format("%Y-%m-%d").to_string());
        clauses.push("substr(timestamp, 1, 10) <= ?");
        args.push(to.format("%Y-%m-%d").to_string());
    }

    let filter = if clauses.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", clauses.join(" AND "))
    };

    let sql = format!("{SELECT_RECORDS}{filter} ORDER BY timestamp ASC, id ASC");
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params_from_iter(args.iter()), map_record)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
