// src/export/logic.rs

use crate::db::queries::load_records;
use crate::db::shifts::load_shifts;
use crate::errors::{AppError, AppResult};
use crate::export::ExportFormat;
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::{RecordExport, ShiftExport};
use crate::ui::messages::warning;
use crate::utils::date::parse_period;
use chrono::NaiveDate;
use rusqlite::Connection;
use serde::Serialize;
use std::path::Path;

pub struct ExportLogic;

impl ExportLogic {
    /// Export time records, or shifts with `shifts`.
    ///
    /// - `file`: absolute path of the output file
    /// - `range`: `None` or `"all"` for everything, otherwise a period such as
    ///   `YYYY`, `YYYY-MM`, `YYYY-MM-DD` or `A:B`
    pub fn export(
        conn: &Connection,
        format: ExportFormat,
        file: &str,
        range: Option<&String>,
        shifts: bool,
        force: bool,
    ) -> AppResult<()> {
        let path = Path::new(file);

        if !path.is_absolute() {
            return Err(AppError::Export(format!(
                "output file path must be absolute: {file}"
            )));
        }

        let bounds: Option<(NaiveDate, NaiveDate)> = match range {
            None => None,
            Some(r) if r.eq_ignore_ascii_case("all") => None,
            Some(r) => Some(parse_period(r)?),
        };

        if shifts {
            let rows: Vec<ShiftExport> = load_shifts(conn, None, bounds, false)?
                .iter()
                .map(ShiftExport::from)
                .collect();
            write_rows(&rows, format, path, force, "shifts")
        } else {
            let rows: Vec<RecordExport> = load_records(conn, None, bounds)?
                .iter()
                .map(RecordExport::from)
                .collect();
            write_rows(&rows, format, path, force, "time records")
        }
    }
}

fn write_rows<T: Serialize>(
    rows: &[T],
    format: ExportFormat,
    path: &Path,
    force: bool,
    what: &str,
) -> AppResult<()> {
    if rows.is_empty() {
        warning(format!("No {what} found for selected range."));
        return Ok(());
    }

    ensure_writable(path, force)?;

    match format {
        ExportFormat::Csv => export_csv(rows, path),
        ExportFormat::Json => export_json(rows, path),
    }
}
