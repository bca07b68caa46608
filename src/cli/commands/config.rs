use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::{success, warning};
use std::fs;

/// Handle the `config` subcommand
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Config {
        print_config,
        check,
    } = cmd
    {
        let path = Config::config_file();

        if *print_config {
            println!("📄 Current configuration ({}):\n", path.display());
            println!("{}", cfg.to_yaml()?);
        }

        if *check {
            if !path.exists() {
                warning(format!(
                    "No configuration file at {}; defaults are in use. Run `shiftkeeper init`.",
                    path.display()
                ));
                return Ok(());
            }

            let content = fs::read_to_string(&path)?;
            let missing = Config::missing_keys(&content)?;

            if missing.is_empty() {
                success("Configuration file is complete.");
            } else {
                warning(format!(
                    "Missing keys (defaults used): {}",
                    missing.join(", ")
                ));
            }
        }
    }

    Ok(())
}
