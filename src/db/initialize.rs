use crate::db::migrate::run_pending_migrations;
use crate::errors::AppResult;
use rusqlite::Connection;

/// Initialize the database.
/// All schema creation / upgrades go through the migration engine.
/// Returns the number of migrations applied by this call.
pub fn init_db(conn: &Connection) -> AppResult<usize> {
    run_pending_migrations(conn)
}
