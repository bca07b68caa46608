use crate::errors::{AppError, AppResult};
use crate::utils::path::resolve_in;
use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Overrides the configuration directory (tests, portable installs).
pub const HOME_ENV: &str = "SHIFTKEEPER_HOME";

const CONFIG_FILE_NAME: &str = "shiftkeeper.conf";
const DB_FILE_NAME: &str = "shiftkeeper.sqlite";

/// Keys written by `init`; `config --check` reports the ones a file lacks.
pub const KNOWN_KEYS: [&str; 4] = [
    "database",
    "shift_tolerance_minutes",
    "default_location",
    "separator_char",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_database")]
    pub database: String,
    /// Max |worked - planned| for a clock-out to auto-complete a shift.
    #[serde(default = "default_tolerance")]
    pub shift_tolerance_minutes: u32,
    /// Location stored on clock events when `--location` is omitted.
    #[serde(default)]
    pub default_location: Option<String>,
    #[serde(default = "default_separator_char")]
    pub separator_char: String,
}

fn default_database() -> String {
    Config::database_file().to_string_lossy().to_string()
}
fn default_tolerance() -> u32 {
    crate::core::reconcile::DEFAULT_TOLERANCE_MINUTES
}
fn default_separator_char() -> String {
    "-".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: default_database(),
            shift_tolerance_minutes: default_tolerance(),
            default_location: None,
            separator_char: default_separator_char(),
        }
    }
}

impl Config {
    /// `$SHIFTKEEPER_HOME`, or `~/.shiftkeeper`.
    pub fn config_dir() -> PathBuf {
        if let Ok(dir) = env::var(HOME_ENV)
            && !dir.trim().is_empty()
        {
            return PathBuf::from(dir);
        }
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".shiftkeeper")
    }

    pub fn config_file() -> PathBuf {
        Self::config_dir().join(CONFIG_FILE_NAME)
    }

    pub fn database_file() -> PathBuf {
        Self::config_dir().join(DB_FILE_NAME)
    }

    /// Load configuration from file, or return defaults if there is none.
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        serde_yaml::from_str(&content)
            .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Known keys absent from a YAML document.
    pub fn missing_keys(content: &str) -> AppResult<Vec<&'static str>> {
        let yaml: Value =
            serde_yaml::from_str(content).map_err(|e| AppError::Config(e.to_string()))?;

        let Some(map) = yaml.as_mapping() else {
            return Ok(KNOWN_KEYS.to_vec());
        };

        Ok(KNOWN_KEYS
            .iter()
            .copied()
            .filter(|k| !map.contains_key(*k))
            .collect())
    }

    pub fn to_yaml(&self) -> AppResult<String> {
        serde_yaml::to_string(self).map_err(|e| AppError::Config(e.to_string()))
    }

    /// Create the config directory, the config file (unless `is_test`) and an
    /// empty database file. Returns the database path.
    pub fn init_all(custom_db: Option<&str>, is_test: bool) -> AppResult<PathBuf> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        let db_path = match custom_db {
            Some(name) => resolve_in(&dir, name),
            None => dir.join(DB_FILE_NAME),
        };

        if !is_test {
            let config = Config {
                database: db_path.to_string_lossy().to_string(),
                ..Config::default()
            };
            fs::write(Self::config_file(), config.to_yaml()?)?;
        }

        if let Some(parent) = db_path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        Ok(db_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_falls_back_to_defaults() {
        let cfg: Config = serde_yaml::from_str("database: /tmp/x.sqlite\n").unwrap();
        assert_eq!(cfg.database, "/tmp/x.sqlite");
        assert_eq!(cfg.shift_tolerance_minutes, 5);
        assert_eq!(cfg.separator_char, "-");
        assert!(cfg.default_location.is_none());
    }

    #[test]
    fn reports_missing_keys() {
        let missing =
            Config::missing_keys("database: /tmp/x.sqlite\nshift_tolerance_minutes: 10\n").unwrap();
        assert_eq!(missing, vec!["default_location", "separator_char"]);
    }

    #[test]
    fn yaml_round_trip_keeps_tolerance() {
        let cfg = Config {
            shift_tolerance_minutes: 12,
            ..Config::default()
        };
        let back: Config = serde_yaml::from_str(&cfg.to_yaml().unwrap()).unwrap();
        assert_eq!(back.shift_tolerance_minutes, 12);
    }
}
