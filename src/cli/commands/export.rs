use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::export::ExportLogic;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        range,
        shifts,
        force,
    } = cmd
    {
        let pool = DbPool::new(&cfg.database)?;
        ExportLogic::export(&pool.conn, *format, file, range.as_ref(), *shifts, *force)?;
    }
    Ok(())
}
