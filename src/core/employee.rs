use crate::db::employees::{insert_employee, load_employee, load_employees, set_active};
use crate::db::log::ttlog;
use crate::errors::{AppError, AppResult};
use crate::models::employee::Employee;
use chrono::Local;
use rusqlite::Connection;
use tracing::warn;

pub struct EmployeeLogic;

impl EmployeeLogic {
    pub fn add(conn: &Connection, id: &str, name: &str) -> AppResult<Employee> {
        let id = id.trim();
        if id.is_empty() {
            return Err(AppError::UnknownEmployee("employee id cannot be empty".into()));
        }
        if load_employee(conn, id)?.is_some() {
            return Err(AppError::DuplicateEmployee(id.to_string()));
        }

        let emp = Employee {
            id: id.to_string(),
            name: name.trim().to_string(),
            active: true,
            created_at: Local::now().to_rfc3339(),
        };
        insert_employee(conn, &emp)?;

        if let Err(e) = ttlog(conn, "employee_add", id, &format!("Registered {}", emp.display_name())) {
            warn!(error = %e, "failed to write internal log");
        }
        Ok(emp)
    }

    pub fn list(conn: &Connection) -> AppResult<Vec<Employee>> {
        load_employees(conn)
    }

    pub fn deactivate(conn: &Connection, id: &str) -> AppResult<()> {
        if !set_active(conn, id, false)? {
            return Err(AppError::UnknownEmployee(id.to_string()));
        }
        if let Err(e) = ttlog(conn, "employee_deactivate", id, "Employee deactivated") {
            warn!(error = %e, "failed to write internal log");
        }
        Ok(())
    }

    /// Look up an employee who is allowed to clock or receive shifts.
    pub fn require_active(conn: &Connection, id: &str) -> AppResult<Employee> {
        let emp = load_employee(conn, id)?.ok_or_else(|| AppError::UnknownEmployee(id.to_string()))?;
        if !emp.active {
            return Err(AppError::InactiveEmployee(id.to_string()));
        }
        Ok(emp)
    }
}
