use crate::errors::AppResult;
use crate::models::employee::Employee;
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

fn map_employee(row: &Row) -> Result<Employee> {
    Ok(Employee {
        id: row.get("id")?,
        name: row.get("name")?,
        active: row.get::<_, i32>("active")? == 1,
        created_at: row.get("created_at")?,
    })
}

pub fn insert_employee(conn: &Connection, emp: &Employee) -> AppResult<()> {
    conn.execute(
        "INSERT INTO employees (id, name, active, created_at) VALUES (?1, ?2, ?3, ?4)",
        params![emp.id, emp.name, if emp.active { 1 } else { 0 }, emp.created_at],
    )?;
    Ok(())
}

pub fn load_employee(conn: &Connection, id: &str) -> AppResult<Option<Employee>> {
    Ok(conn
        .query_row(
            "SELECT id, name, active, created_at FROM employees WHERE id = ?1",
            [id],
            map_employee,
        )
        .optional()?)
}

pub fn load_employees(conn: &Connection) -> AppResult<Vec<Employee>> {
    let mut stmt =
        conn.prepare("SELECT id, name, active, created_at FROM employees ORDER BY id ASC")?;
    let rows = stmt.query_map([], map_employee)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Returns `false` when no employee has that id.
pub fn set_active(conn: &Connection, id: &str, active: bool) -> AppResult<bool> {
    let changed = conn.execute(
        "UPDATE employees SET active = ?1 WHERE id = ?2",
        params![if active { 1 } else { 0 }, id],
    )?;
    Ok(changed == 1)
}
