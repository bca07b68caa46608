use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::migrate::run_pending_migrations;
use crate::db::pool::DbPool;
use crate::db::stats;
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};
use rusqlite::Connection;

fn integrity_check(conn: &Connection) -> AppResult<()> {
    info("Running integrity check…");

    let mut stmt = conn.prepare("PRAGMA integrity_check;")?;
    let problems: Vec<String> = stmt
        .query_map([], |row| row.get::<_, String>(0))?
        .collect::<Result<_, _>>()?;

    match problems.as_slice() {
        [ok] if ok == "ok" => success("Integrity check passed."),
        _ => warning(format!("Integrity check failed: {}", problems.join("; "))),
    }

    Ok(())
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Db {
        migrate,
        check,
        vacuum,
        info: show_info,
    } = cmd
    else {
        return Ok(());
    };

    // opening the pool already brings the schema up to date
    let pool = DbPool::new(&cfg.database)?;

    if *migrate {
        let applied = run_pending_migrations(&pool.conn)?;
        if applied == 0 {
            success("Schema is up to date.");
        } else {
            success(format!("{applied} migration(s) applied."));
        }
    }

    if *show_info {
        stats::print_db_info(&pool.conn, &cfg.database)?;
    }

    if *check {
        integrity_check(&pool.conn)?;
    }

    if *vacuum {
        info("Running VACUUM…");
        pool.conn.execute_batch("VACUUM;")?;
        success("Vacuum completed.");
    }

    Ok(())
}
