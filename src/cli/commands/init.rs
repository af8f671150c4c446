use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::initialize::init_db;
use crate::db::log;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};

/// Handle the `init` command
///
/// This initializes:
///  - the configuration file (only if it does not exist yet)
///  - the SQLite database and its tables
pub fn handle(cli: &Cli) -> AppResult<()> {
    let path = cli.config.clone().unwrap_or_else(Config::config_file);

    if Config::init_file(&path, cli.db.as_deref())? {
        success(format!("Config file written: {}", path.display()));
        warning("Set 'apikey' and your coordinates before running 'fuellog run'");
    } else {
        info(format!("Config file already present: {}", path.display()));
    }

    let mut cfg = Config::load(Some(path.as_path()))?;
    if let Some(db) = &cli.db {
        cfg.database_path = db.clone();
    }

    if let Some(parent) = std::path::Path::new(&cfg.database_path).parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }

    let pool = DbPool::new(&cfg.database_path)?;
    init_db(&pool.conn)?;
    success(format!("Database initialized at {}", cfg.database_path));

    log::ttlog_quiet(
        &pool.conn,
        "init",
        "",
        &format!("Database initialized at {}", cfg.database_path),
    );

    Ok(())
}
