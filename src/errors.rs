//! Unified application error type.
//! Every layer (db, core, cli, export) returns AppError so that the binary
//! has a single place where failures are reported.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid time format: {0}")]
    InvalidTime(String),

    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("Invalid record kind: {0}")]
    InvalidRecordKind(String),

    #[error("Invalid shift status: {0}")]
    InvalidStatus(String),

    #[error("Invalid period: {0}")]
    InvalidPeriod(String),

    // ---------------------------
    // Domain rules
    // ---------------------------
    #[error("Unknown employee: {0}")]
    UnknownEmployee(String),

    #[error("Employee {0} is not active")]
    InactiveEmployee(String),

    #[error("Employee already exists: {0}")]
    DuplicateEmployee(String),

    #[error("Time record #{0} not found")]
    RecordNotFound(i64),

    #[error("Shift #{0} not found")]
    ShiftNotFound(i64),

    #[error("Invalid clock sequence: {0}")]
    Sequence(String),

    #[error("Invalid shift: {0}")]
    InvalidShift(String),

    #[error("Time record #{0} is still paired with an exit; delete the exit first")]
    RecordInUse(i64),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),
}

pub type AppResult<T> = Result<T, AppError>;
