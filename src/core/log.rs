use crate::db::log::{LogRow, load_log};
use crate::errors::AppResult;
use ansi_term::Colour;
use regex::Regex;
use rusqlite::Connection;
use std::sync::LazyLock;

const OP_WIDTH_MAX: usize = 48;

static ANSI_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x1B\[[0-9;]*[mK]").expect("valid ANSI pattern"));

fn strip_ansi(s: &str) -> String {
    ANSI_RE.replace_all(s, "").into_owned()
}

/// ANSI colour for each kind of logged operation.
fn color_for_operation(op: &str) -> Colour {
    match op {
        "clock_in" => Colour::Green,
        "clock_out" => Colour::Blue,
        "reconcile_completed" => Colour::Green,
        "reconcile_mismatch" => Colour::Yellow,
        "reconcile_failed" => Colour::Red,
        "edit" | "shift_edit" => Colour::Yellow,
        "del" | "shift_del" | "shift_cancel" => Colour::Red,
        "migration_applied" => Colour::Purple,
        "init" => Colour::RGB(255, 153, 51),
        other if other.starts_with("employee_") => Colour::Cyan,
        _ => Colour::White,
    }
}

/// `operation (target)`, truncated on visible characters.
fn op_label(row: &LogRow) -> String {
    let plain = if row.target.is_empty() {
        row.operation.clone()
    } else {
        format!("{} ({})", row.operation, row.target)
    };

    if plain.chars().count() > OP_WIDTH_MAX {
        let mut s: String = plain.chars().take(OP_WIDTH_MAX - 3).collect();
        s.push_str("...");
        s
    } else {
        plain
    }
}

pub struct LogLogic;

impl LogLogic {
    pub fn print_log(conn: &Connection) -> AppResult<()> {
        let entries = load_log(conn)?;

        if entries.is_empty() {
            println!("📜 Internal log is empty.");
            return Ok(());
        }

        let labels: Vec<String> = entries.iter().map(op_label).collect();
        let op_w = labels.iter().map(|l| l.chars().count()).max().unwrap_or(10);
        let id_w = entries
            .iter()
            .map(|e| e.id.to_string().len())
            .max()
            .unwrap_or(1);

        println!("📜 Internal log:\n");

        for (row, label) in entries.iter().zip(labels) {
            let date = chrono::DateTime::parse_from_rfc3339(&row.date)
                .map(|dt| dt.format("%FT%T%:z").to_string())
                .unwrap_or_else(|_| row.date.clone());

            let color = color_for_operation(&row.operation);

            // only the operation word is coloured, the target stays plain
            let colored = match label.split_once(' ') {
                Some((op, rest)) => format!("{} {}", color.paint(op), rest),
                None => color.paint(label.as_str()).to_string(),
            };
            let padding = " ".repeat(op_w.saturating_sub(strip_ansi(&colored).chars().count()));

            println!(
                "{:>id_w$}: {} | {}{} => {}",
                row.id,
                date,
                colored,
                padding,
                row.message,
                id_w = id_w
            );
        }

        Ok(())
    }
}
