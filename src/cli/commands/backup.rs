use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::backup::BackupLogic;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use std::path::Path;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Backup {
        file,
        compress,
        force,
    } = cmd
    {
        if !Path::new(&cfg.database_path).exists() {
            return Err(AppError::Other(format!(
                "Database not found: {}",
                cfg.database_path
            )));
        }

        let mut pool = DbPool::new(&cfg.database_path)?;
        BackupLogic::backup(&mut pool, file, *compress, *force)?;
    }

    Ok(())
}
