//! shiftkeeper library root.
//! Exposes the CLI parser, the high-level `run()` and the internal modules.

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod export;
pub mod logging;
pub mod models;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Init => cli::commands::init::handle(cli),
        Commands::Config { .. } => cli::commands::config::handle(&cli.command, cfg),
        Commands::Db { .. } => cli::commands::db::handle(&cli.command, cfg),
        Commands::Log { .. } => cli::commands::log::handle(&cli.command, cfg),
        Commands::Employee { action } => cli::commands::employee::handle(action, cfg),
        Commands::Clock { action } => cli::commands::clock::handle(action, cfg),
        Commands::Record { action } => cli::commands::record::handle(action, cfg),
        Commands::Shift { action } => cli::commands::shift::handle(action, cfg),
        Commands::Reconcile { record_id } => cli::commands::reconcile::handle(*record_id, cfg),
        Commands::Export { .. } => cli::commands::export::handle(&cli.command, cfg),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    logging::init();

    // with --test the config file is neither read nor written
    let mut cfg = if cli.test {
        Config::default()
    } else {
        Config::load()?
    };

    if let Some(custom_db) = &cli.db {
        cfg.database = utils::path::resolve_in(&Config::config_dir(), custom_db)
            .to_string_lossy()
            .to_string();
    }

    dispatch(&cli, &cfg)
}
