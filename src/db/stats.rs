use crate::db::log::count_operations;
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREEN, GREY, RED, RESET, YELLOW};
use rusqlite::{Connection, OptionalExtension};
use std::fs;

/// Reconciliation outcomes counted from the `log` table.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ReconcileCounters {
    pub completed: i64,
    pub mismatch: i64,
    pub none: i64,
    pub failed: i64,
}

#[derive(Debug, Default)]
pub struct DbStats {
    pub employees: i64,
    pub records: i64,
    pub open_entries: i64,
    pub shifts_by_status: Vec<(String, i64)>,
    pub first_record: Option<String>,
    pub last_record: Option<String>,
    pub reconcile: ReconcileCounters,
}

pub fn reconcile_counters(conn: &Connection) -> AppResult<ReconcileCounters> {
    let mut c = ReconcileCounters::default();
    for (op, n) in count_operations(conn, "reconcile_")? {
        match op.trim_start_matches("reconcile_") {
            "completed" => c.completed = n,
            "mismatch" => c.mismatch = n,
            "none" => c.none = n,
            "failed" => c.failed = n,
            _ => {}
        }
    }
    Ok(c)
}

pub fn collect_stats(conn: &Connection) -> AppResult<DbStats> {
    let count = |sql: &str| -> rusqlite::Result<i64> { conn.query_row(sql, [], |row| row.get(0)) };

    let employees = count("SELECT COUNT(*) FROM employees")?;
    let records = count("SELECT COUNT(*) FROM time_records")?;

    // entries that no exit points back to
    let open_entries = count(
        "SELECT COUNT(*) FROM time_records e
         WHERE e.kind = 'entry'
           AND NOT EXISTS (SELECT 1 FROM time_records x WHERE x.entry_id = e.id)",
    )?;

    let mut stmt =
        conn.prepare("SELECT status, COUNT(*) FROM shifts GROUP BY status ORDER BY status ASC")?;
    let rows = stmt.query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?;
    let mut shifts_by_status = Vec::new();
    for r in rows {
        shifts_by_status.push(r?);
    }

    let first_record: Option<String> = conn
        .query_row(
            "SELECT timestamp FROM time_records ORDER BY timestamp ASC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;
    let last_record: Option<String> = conn
        .query_row(
            "SELECT timestamp FROM time_records ORDER BY timestamp DESC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;

    Ok(DbStats {
        employees,
        records,
        open_entries,
        shifts_by_status,
        first_record,
        last_record,
        reconcile: reconcile_counters(conn)?,
    })
}

pub fn print_db_info(conn: &Connection, db_path: &str) -> AppResult<()> {
    let stats = collect_stats(conn)?;

    println!();

    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_mb = (file_size as f64) / (1024.0 * 1024.0);

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);
    println!("{}• Employees:{} {}{}{}", CYAN, RESET, GREEN, stats.employees, RESET);
    println!(
        "{}• Time records:{} {}{}{} ({} open)",
        CYAN, RESET, GREEN, stats.records, RESET, stats.open_entries
    );

    let dash = format!("{GREY}--{RESET}");
    println!("{}• Record range:{}", CYAN, RESET);
    println!("    from: {}", stats.first_record.as_deref().unwrap_or(&dash));
    println!("    to:   {}", stats.last_record.as_deref().unwrap_or(&dash));

    println!("{}• Shifts:{}", CYAN, RESET);
    if stats.shifts_by_status.is_empty() {
        println!("    {dash}");
    }
    for (status, n) in &stats.shifts_by_status {
        println!("    {:<10} {}", status, n);
    }

    let r = &stats.reconcile;
    println!("{}• Reconciliation:{}", CYAN, RESET);
    println!("    completed: {}{}{}", GREEN, r.completed, RESET);
    println!("    mismatch:  {}{}{}", YELLOW, r.mismatch, RESET);
    println!("    no shift:  {}", r.none);
    println!("    failed:    {}{}{}", RED, r.failed, RESET);

    println!();
    Ok(())
}
