use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line interface definition for fuellog
/// Polls the Tankerkoenig API and stores fuel prices in SQLite
#[derive(Parser)]
#[command(
    name = "fuellog",
    version = env!("CARGO_PKG_VERSION"),
    about = "Poll the Tankerkoenig fuel price API and keep the results in SQLite",
    long_about = None
)]
pub struct Cli {
    /// Path of the configuration file (TOML, or YAML for .yml/.yaml)
    #[arg(global = true, long = "config")]
    pub config: Option<PathBuf>,

    /// Override database path
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a default configuration (if missing) and create the database schema
    Init,

    /// Poll the API at the configured interval until interrupted
    Run,

    /// Run a single fetch cycle now
    Fetch,

    /// Inspect the configuration
    Config {
        #[arg(long = "print", help = "Print the effective configuration")]
        print_config: bool,

        #[arg(long = "check", help = "Validate the configuration and the polling interval")]
        check: bool,
    },

    /// Manage the database (integrity checks, statistics, etc.)
    Db {
        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Create a backup copy of the database
    Backup {
        /// Destination file
        #[arg(long = "file")]
        file: String,

        /// Compress the backup as .zip
        #[arg(long = "compress")]
        compress: bool,

        /// Overwrite an existing destination
        #[arg(long = "force")]
        force: bool,
    },
}
