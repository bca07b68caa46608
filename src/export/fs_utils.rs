// src/export/fs_utils.rs

use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, warning};
use std::io::{self, BufRead, Write};
use std::path::Path;

/// Whether `path` may be created or overwritten.
///
/// An existing file is only replaced with `force` or after the user answers
/// `y` on stdin.
pub(crate) fn ensure_writable(path: &Path, force: bool) -> AppResult<()> {
    if !path.exists() || force {
        return Ok(());
    }

    warning(format!("The file '{}' already exists.", path.display()));

    print!("Overwrite? [y/N]: ");
    io::stdout().flush().ok();

    confirm_overwrite(io::stdin().lock())
}

fn confirm_overwrite(mut input: impl BufRead) -> AppResult<()> {
    let mut answer = String::new();
    input.read_line(&mut answer)?;

    match answer.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" => {
            info("Existing file will be overwritten.");
            Ok(())
        }
        _ => Err(AppError::Export(
            "export cancelled: existing file not overwritten".into(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_yes_confirms() {
        assert!(confirm_overwrite("y\n".as_bytes()).is_ok());
        assert!(confirm_overwrite("YES\n".as_bytes()).is_ok());
        assert!(confirm_overwrite("\n".as_bytes()).is_err());
        assert!(confirm_overwrite("nope\n".as_bytes()).is_err());
    }
}
