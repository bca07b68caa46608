use crate::cli::commands::print_outcome;
use crate::config::Config;
use crate::core::clock::ClockLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::warning;

pub fn handle(record_id: i64, cfg: &Config) -> AppResult<()> {
    let pool = DbPool::new(&cfg.database)?;

    match ClockLogic::reconcile_record(&pool.conn, cfg.shift_tolerance_minutes, record_id)? {
        Some(outcome) => print_outcome(&outcome),
        None => warning(format!(
            "Exit #{record_id} has no entry or duration to reconcile."
        )),
    }

    Ok(())
}
