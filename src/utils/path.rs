//! Path utilities: expand `~`, resolve relative paths against a base dir.

use std::path::{Path, PathBuf};

pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    PathBuf::from(path)
}

/// Absolute paths and `~/…` are kept; anything else lands inside `base`.
pub fn resolve_in(base: &Path, path: &str) -> PathBuf {
    let p = expand_tilde(path);
    if p.is_absolute() { p } else { base.join(p) }
}
