use crate::cli::parser::RecordAction;
use crate::config::Config;
use crate::core::record::{RecordEdit, RecordLogic};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use crate::utils::date::resolve_period;
use crate::utils::formatting::{format_hours, hours2readable, or_dash};
use crate::utils::table::Table;
use crate::utils::time::parse_timestamp;

pub fn handle(action: &RecordAction, cfg: &Config) -> AppResult<()> {
    let pool = DbPool::new(&cfg.database)?;

    match action {
        RecordAction::List { employee, period } => {
            let bounds = resolve_period(period.as_ref())?;
            let records = RecordLogic::list(&pool.conn, employee.as_deref(), bounds)?;

            if records.is_empty() {
                info("No time records for the selected period.");
                return Ok(());
            }

            let mut table = Table::new(&[
                "ID", "EMPLOYEE", "KIND", "TIMESTAMP", "WORKED", "ENTRY", "LOCATION", "NOTE",
            ]);
            for r in &records {
                table.add_row(vec![
                    r.id.to_string(),
                    r.employee_id.clone(),
                    r.kind.to_string(),
                    r.timestamp_str(),
                    r.worked_hours.map(format_hours).unwrap_or_else(|| "--".into()),
                    r.entry_id.map(|id| format!("#{id}")).unwrap_or_else(|| "--".into()),
                    or_dash(r.location.as_deref()),
                    or_dash(r.note.as_deref()),
                ]);
            }
            print!("{}", table.render());

            let total: f64 = records.iter().filter_map(|r| r.worked_hours).sum();
            println!(
                "\nTotal worked: {} ({})",
                format_hours(total),
                hours2readable(total)
            );
        }
        RecordAction::Edit {
            id,
            at,
            note,
            location,
        } => {
            let edit = RecordEdit {
                at: at.as_deref().map(parse_timestamp).transpose()?,
                note: note.clone(),
                location: location.clone(),
            };
            let rec = RecordLogic::edit(&pool.conn, *id, edit)?;
            success(format!(
                "Record #{} updated: {} {}.",
                rec.id,
                rec.kind,
                rec.timestamp_str()
            ));
        }
        RecordAction::Del { id } => {
            let rec = RecordLogic::delete(&pool.conn, *id)?;
            success(format!(
                "Record #{} ({} {} at {}) deleted.",
                rec.id,
                rec.employee_id,
                rec.kind,
                rec.timestamp_str()
            ));
        }
    }

    Ok(())
}
