//! Unified application error type.
//! All modules (db, core, api, cli) return AppError so that a failure can be
//! logged the same way whether it happens at startup or inside a fetch cycle.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    // ---------------------------
    // Network / API
    // ---------------------------
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unable to fetch data after {0} tries")]
    FetchExhausted(u32),

    #[error("Invalid API response: {0}")]
    Decode(#[from] serde_json::Error),

    // ---------------------------
    // Scheduler
    // ---------------------------
    #[error("Scheduler error: {0}")]
    Scheduler(#[from] tokio_cron_scheduler::JobSchedulerError),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Unable to load config: {0}")]
    Config(String),

    #[error("Invalid configuration: {0}")]
    ConfigInvalid(String),

    #[error("Configuration file not found: {0}")]
    ConfigMissing(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

impl From<toml::de::Error> for AppError {
    fn from(e: toml::de::Error) -> Self {
        AppError::Config(e.to_string())
    }
}

impl From<serde_yaml::Error> for AppError {
    fn from(e: serde_yaml::Error) -> Self {
        AppError::Config(e.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;
