//! fuellog library root.
//! Exposes the CLI parser, the high-level run() function and the modules the
//! daemon is built from (config, storage, fetch pipeline, scheduler).

pub mod api;
pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod models;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: Config) -> AppResult<()> {
    match &cli.command {
        Commands::Init => cli::commands::init::handle(cli),
        Commands::Run => cli::commands::run::handle(cfg),
        Commands::Fetch => cli::commands::fetch::handle(cfg),
        Commands::Config { .. } => cli::commands::config::handle(&cli.command, &cfg),
        Commands::Db { .. } => cli::commands::db::handle(&cli.command, &cfg),
        Commands::Log { .. } => cli::commands::log::handle(&cli.command, &cfg),
        Commands::Backup { .. } => cli::commands::backup::handle(&cli.command, &cfg),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    // `init` creates the config file, so it must not require one.
    if matches!(cli.command, Commands::Init) {
        return cli::commands::init::handle(&cli);
    }

    let mut cfg = Config::load(cli.config.as_deref())?;

    if let Some(custom_db) = &cli.db {
        cfg.database_path = custom_db.clone();
    }

    dispatch(&cli, cfg)
}
