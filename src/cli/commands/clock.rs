use crate::cli::commands::print_outcome;
use crate::cli::parser::{ClockAction, ClockArgs};
use crate::config::Config;
use crate::core::clock::ClockLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::success;
use crate::utils::formatting::format_hours;
use crate::utils::time::timestamp_or_now;

fn location(args: &ClockArgs, cfg: &Config) -> Option<String> {
    args.location.clone().or_else(|| cfg.default_location.clone())
}

pub fn handle(action: &ClockAction, cfg: &Config) -> AppResult<()> {
    let pool = DbPool::new(&cfg.database)?;

    match action {
        ClockAction::In(args) => {
            let at = timestamp_or_now(args.at.as_ref())?;
            let entry = ClockLogic::clock_in(
                &pool.conn,
                &args.employee,
                at,
                args.note.clone(),
                location(args, cfg),
            )?;
            success(format!(
                "{} clocked in at {} (record #{}).",
                entry.employee_id,
                entry.timestamp_str(),
                entry.id
            ));
        }
        ClockAction::Out(args) => {
            let at = timestamp_or_now(args.at.as_ref())?;
            let out = ClockLogic::clock_out(
                &pool.conn,
                cfg.shift_tolerance_minutes,
                &args.employee,
                at,
                args.note.clone(),
                location(args, cfg),
            )?;

            let worked = out
                .exit
                .worked_hours
                .map(format_hours)
                .unwrap_or_else(|| "--".to_string());
            success(format!(
                "{} clocked out at {} (record #{}), worked {} since {}.",
                out.exit.employee_id,
                out.exit.timestamp_str(),
                out.exit.id,
                worked,
                out.entry.timestamp_str()
            ));

            if let Some(outcome) = &out.outcome {
                print_outcome(outcome);
            }
        }
    }

    Ok(())
}
