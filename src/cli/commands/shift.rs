use crate::cli::parser::ShiftAction;
use crate::config::Config;
use crate::core::shift::{ShiftEdit, ShiftLogic};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::shift_status::ShiftStatus;
use crate::ui::messages::{info, success};
use crate::utils::date::{parse_date_arg, resolve_period};
use crate::utils::formatting::{describe_status, format_hours, separator};
use crate::utils::table::Table;
use crate::utils::time::{parse_optional_time, parse_time_arg};

pub fn handle(action: &ShiftAction, cfg: &Config) -> AppResult<()> {
    let pool = DbPool::new(&cfg.database)?;

    match action {
        ShiftAction::Add {
            employee,
            date,
            start,
            end,
            confirmed,
            notes,
        } => {
            let status = if *confirmed {
                ShiftStatus::Confirmed
            } else {
                ShiftStatus::Scheduled
            };
            let shift = ShiftLogic::add(
                &pool.conn,
                employee,
                parse_date_arg(date)?,
                parse_time_arg(start)?,
                parse_time_arg(end)?,
                status,
                notes,
            )?;
            success(format!(
                "Shift #{} planned for {} on {} {}-{} ({}).",
                shift.id,
                shift.employee_id,
                shift.date,
                shift.start_str(),
                shift.end_str(),
                format_hours(shift.planned_hours)
            ));
        }
        ShiftAction::Edit {
            id,
            date,
            start,
            end,
            status,
            notes,
        } => {
            let edit = ShiftEdit {
                date: date.as_deref().map(parse_date_arg).transpose()?,
                start: parse_optional_time(start.as_ref())?,
                end: parse_optional_time(end.as_ref())?,
                status: status.as_deref().map(str::parse::<ShiftStatus>).transpose()?,
                notes: notes.clone(),
            };
            let shift = ShiftLogic::edit(&pool.conn, *id, edit)?;
            success(format!(
                "Shift #{} updated: {} {}-{} [{}].",
                shift.id,
                shift.date,
                shift.start_str(),
                shift.end_str(),
                shift.status
            ));
        }
        ShiftAction::Cancel { id } => {
            let shift = ShiftLogic::cancel(&pool.conn, *id)?;
            success(format!("Shift #{} is {}.", shift.id, shift.status));
        }
        ShiftAction::Del { id } => {
            ShiftLogic::delete(&pool.conn, *id)?;
            success(format!("Shift #{} deleted.", id));
        }
        ShiftAction::List {
            employee,
            period,
            pending,
        } => {
            let bounds = resolve_period(period.as_ref())?;
            let shifts = ShiftLogic::list(&pool.conn, employee.as_deref(), bounds, *pending)?;

            if shifts.is_empty() {
                info("No shifts for the selected period.");
                return Ok(());
            }

            let mut table = Table::new(&[
                "ID", "EMPLOYEE", "DATE", "START", "END", "PLANNED", "STATUS", "EXIT",
            ]);
            for s in &shifts {
                table.add_row(vec![
                    s.id.to_string(),
                    s.employee_id.clone(),
                    s.date.to_string(),
                    s.start_str(),
                    s.end_str(),
                    format_hours(s.planned_hours),
                    s.status.to_string(),
                    s.time_record_id
                        .map(|id| format!("#{id}"))
                        .unwrap_or_else(|| "--".into()),
                ]);
            }
            print!("{}", table.render());

            println!("{}", separator(&cfg.separator_char, 40));
            for status in [
                ShiftStatus::Scheduled,
                ShiftStatus::Confirmed,
                ShiftStatus::Completed,
                ShiftStatus::Cancelled,
            ] {
                let n = shifts.iter().filter(|s| s.status == status).count();
                if n > 0 {
                    println!("{}: {}", describe_status(status), n);
                }
            }
        }
    }

    Ok(())
}
