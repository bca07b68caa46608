use crate::cli::parser::EmployeeAction;
use crate::config::Config;
use crate::core::employee::EmployeeLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use crate::utils::table::Table;

pub fn handle(action: &EmployeeAction, cfg: &Config) -> AppResult<()> {
    let pool = DbPool::new(&cfg.database)?;

    match action {
        EmployeeAction::Add { id, name } => {
            let emp = EmployeeLogic::add(&pool.conn, id, name)?;
            success(format!("Employee {} ({}) registered.", emp.id, emp.display_name()));
        }
        EmployeeAction::List => {
            let employees = EmployeeLogic::list(&pool.conn)?;
            if employees.is_empty() {
                info("No employees registered.");
                return Ok(());
            }

            let mut table = Table::new(&["ID", "NAME", "ACTIVE", "SINCE"]);
            for e in employees {
                table.add_row(vec![
                    e.id.clone(),
                    e.name.clone(),
                    if e.active { "yes" } else { "no" }.to_string(),
                    e.created_at.chars().take(10).collect(),
                ]);
            }
            print!("{}", table.render());
        }
        EmployeeAction::Deactivate { id } => {
            EmployeeLogic::deactivate(&pool.conn, id)?;
            success(format!("Employee {} deactivated.", id));
        }
    }

    Ok(())
}
