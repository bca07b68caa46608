//! Schema migrations.
//!
//! Each migration runs once; applied versions are recorded in the `log`
//! table as `operation = 'migration_applied'`, `target = <version>`.

use crate::errors::{AppError, AppResult};
use rusqlite::{Connection, OptionalExtension, params};
use tracing::info;

struct Migration {
    version: &'static str,
    description: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: "20251101_0001_create_employees",
        description: "Created employees table",
        sql: r#"
        CREATE TABLE IF NOT EXISTS employees (
            id          TEXT PRIMARY KEY,
            name        TEXT NOT NULL DEFAULT '',
            active      INTEGER NOT NULL DEFAULT 1,
            created_at  TEXT NOT NULL
        );
        "#,
    },
    Migration {
        version: "20251101_0002_create_time_records",
        description: "Created time_records table",
        sql: r#"
        CREATE TABLE IF NOT EXISTS time_records (
            id            INTEGER PRIMARY KEY AUTOINCREMENT,
            employee_id   TEXT NOT NULL REFERENCES employees(id),
            kind          TEXT NOT NULL CHECK(kind IN ('entry','exit')),
            timestamp     TEXT NOT NULL,
            note          TEXT,
            location      TEXT,
            worked_hours  REAL,
            entry_id      INTEGER REFERENCES time_records(id),
            created_at    TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_records_employee_ts ON time_records(employee_id, timestamp);
        CREATE INDEX IF NOT EXISTS idx_records_entry ON time_records(entry_id);
        "#,
    },
    Migration {
        version: "20251101_0003_create_shifts",
        description: "Created shifts table",
        sql: r#"
        CREATE TABLE IF NOT EXISTS shifts (
            id             INTEGER PRIMARY KEY AUTOINCREMENT,
            employee_id    TEXT NOT NULL REFERENCES employees(id),
            date           TEXT NOT NULL,
            start_time     TEXT NOT NULL,
            end_time       TEXT NOT NULL,
            planned_hours  REAL NOT NULL,
            status         TEXT NOT NULL DEFAULT 'scheduled'
                           CHECK(status IN ('scheduled','confirmed','completed','cancelled')),
            notes          TEXT NOT NULL DEFAULT '',
            created_at     TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_shifts_employee_date ON shifts(employee_id, date, status);
        "#,
    },
    Migration {
        version: "20251115_0004_link_shift_to_exit_record",
        description: "Added time_record_id to shifts",
        sql: r#"
        ALTER TABLE shifts
            ADD COLUMN time_record_id INTEGER REFERENCES time_records(id) ON DELETE SET NULL;
        "#,
    },
];

/// Ensure that the `log` table exists; migrations are tracked inside it.
fn ensure_log_table(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_log_operation ON log(operation);
        "#,
    )
}

fn is_applied(conn: &Connection, version: &str) -> rusqlite::Result<bool> {
    let mut chk = conn.prepare_cached(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn apply(conn: &Connection, m: &Migration) -> AppResult<()> {
    let tx = conn.unchecked_transaction()?;

    tx.execute_batch(m.sql)
        .map_err(|e| AppError::Migration(format!("{}: {}", m.version, e)))?;

    tx.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (?1, 'migration_applied', ?2, ?3)",
        params![chrono::Local::now().to_rfc3339(), m.version, m.description],
    )?;

    tx.commit()?;

    info!(version = m.version, "migration applied");
    Ok(())
}

/// Public entry point: run all pending migrations, in order.
pub fn run_pending_migrations(conn: &Connection) -> AppResult<usize> {
    ensure_log_table(conn)?;

    let mut applied = 0;
    for m in MIGRATIONS {
        if is_applied(conn, m.version)? {
            continue;
        }
        apply(conn, m)?;
        applied += 1;
    }

    Ok(applied)
}
