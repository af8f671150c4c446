use crate::errors::{AppError, AppResult};
use crate::utils::path::expand_tilde;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Tankerkoenig list endpoint.
pub const DEFAULT_URL: &str = "https://creativecommons.tankerkoenig.de/json/list.php";

/// "Home-Automation-, Smart-Mirror- und ähnliche Systeme sollten Abfragen nicht
/// öfter als einmal in 5 Minuten durchführen" (API terms of use).
pub const MIN_API_INTERVAL_SECS: u64 = 5 * 60;

/// Longest accepted polling interval (one day), in seconds.
pub const MAX_INTERVAL_SECS: u64 = 24 * 60 * 60;

/// Largest search radius accepted by the API, in km.
pub const MAX_RADIUS_KM: u32 = 25;

const FUEL_TYPES: [&str; 3] = ["e5", "e10", "diesel"];
const SORT_ORDERS: [&str; 2] = ["price", "dist"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub apikey: String,
    #[serde(rename = "type")]
    pub fuel_type: String,
    pub lat: f64,
    pub lng: f64,
    pub rad: u32,
    pub sort: String,

    /// Max attempts per fetch cycle.
    #[serde(default = "default_tries")]
    pub tries: u32,
    /// Seconds to wait between two attempts.
    #[serde(default = "default_retry_delay")]
    pub timeout: u64,
    /// Seconds between two fetch cycles.
    #[serde(default = "default_interval")]
    pub interval: u64,
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Per-request HTTP timeout, in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,
    #[serde(default = "default_url")]
    pub url: String,
    /// Store station data even when the API answered `ok: false`.
    #[serde(default)]
    pub process_on_api_error: bool,
}

fn default_tries() -> u32 {
    3
}
fn default_retry_delay() -> u64 {
    10
}
fn default_interval() -> u64 {
    360
}
fn default_request_timeout() -> u64 {
    5
}
fn default_url() -> String {
    DEFAULT_URL.to_string()
}
fn default_database_path() -> String {
    Config::database_file().to_string_lossy().to_string()
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("fuellog")
    }

    /// Return the full path of the default config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("fuellog.toml")
    }

    /// Return the full path of the default SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("fuellog.sqlite")
    }

    /// Configuration written by `init`; the API key still has to be filled in.
    pub fn template() -> Self {
        Self {
            apikey: "00000000-0000-0000-0000-000000000002".to_string(),
            fuel_type: "e5".to_string(),
            lat: 52.521,
            lng: 13.438,
            rad: 5,
            sort: "price".to_string(),
            tries: default_tries(),
            timeout: default_retry_delay(),
            interval: default_interval(),
            database_path: default_database_path(),
            request_timeout: default_request_timeout(),
            url: default_url(),
            process_on_api_error: false,
        }
    }

    /// Parse a configuration document. YAML is used for `.yml` / `.yaml`
    /// files, TOML for everything else.
    pub fn parse(content: &str, path: &Path) -> AppResult<Self> {
        let is_yaml = path
            .extension()
            .map(|e| e.eq_ignore_ascii_case("yml") || e.eq_ignore_ascii_case("yaml"))
            .unwrap_or(false);

        let mut cfg: Config = if is_yaml {
            serde_yaml::from_str(content)?
        } else {
            toml::from_str(content)?
        };

        cfg.database_path = expand_tilde(&cfg.database_path)
            .to_string_lossy()
            .to_string();
        Ok(cfg)
    }

    /// Load configuration from `path`, or from the default location.
    pub fn load(path: Option<&Path>) -> AppResult<Self> {
        let path = path.map(Path::to_path_buf).unwrap_or_else(Self::config_file);

        if !path.exists() {
            return Err(AppError::ConfigMissing(path.display().to_string()));
        }

        let content = fs::read_to_string(&path)
            .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))?;
        Self::parse(&content, &path)
    }

    /// Worst-case time spent waiting between attempts of one cycle.
    pub fn worst_case_retry_secs(&self) -> u64 {
        u64::from(self.tries).saturating_mul(self.timeout)
    }

    /// Check the business rules. The polling interval must stay above the
    /// API's five minute floor plus the worst-case retry time.
    pub fn validate(&self) -> AppResult<()> {
        if self.apikey.trim().is_empty() {
            return Err(AppError::ConfigInvalid("apikey must not be empty".into()));
        }

        if !FUEL_TYPES.contains(&self.fuel_type.as_str()) {
            return Err(AppError::ConfigInvalid(format!(
                "type must be one of {}, got '{}'",
                FUEL_TYPES.join(", "),
                self.fuel_type
            )));
        }

        if !SORT_ORDERS.contains(&self.sort.as_str()) {
            return Err(AppError::ConfigInvalid(format!(
                "sort must be one of {}, got '{}'",
                SORT_ORDERS.join(", "),
                self.sort
            )));
        }

        if !(-90.0..=90.0).contains(&self.lat) || !(-180.0..=180.0).contains(&self.lng) {
            return Err(AppError::ConfigInvalid(format!(
                "lat/lng out of range: {}, {}",
                self.lat, self.lng
            )));
        }

        if self.rad == 0 || self.rad > MAX_RADIUS_KM {
            return Err(AppError::ConfigInvalid(format!(
                "rad must be between 1 and {MAX_RADIUS_KM}, got {}",
                self.rad
            )));
        }

        if self.tries == 0 {
            return Err(AppError::ConfigInvalid("tries must be at least 1".into()));
        }

        if self.request_timeout == 0 {
            return Err(AppError::ConfigInvalid(
                "request_timeout must be at least 1 second".into(),
            ));
        }

        let floor = MIN_API_INTERVAL_SECS.saturating_add(self.worst_case_retry_secs());
        if self.interval <= floor {
            return Err(AppError::ConfigInvalid(format!(
                "interval ({}s) must exceed 5 minutes + tries * timeout ({}s)",
                self.interval, floor
            )));
        }

        if self.interval > MAX_INTERVAL_SECS {
            return Err(AppError::ConfigInvalid(format!(
                "interval ({}s) must not exceed {MAX_INTERVAL_SECS}s",
                self.interval
            )));
        }

        Ok(())
    }

    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval)
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }

    /// Query string of the list request.
    pub fn query_params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("apikey", self.apikey.clone()),
            ("type", self.fuel_type.clone()),
            ("lat", self.lat.to_string()),
            ("lng", self.lng.to_string()),
            ("rad", self.rad.to_string()),
            ("sort", self.sort.clone()),
        ]
    }

    /// Write the template configuration if no file exists yet.
    /// Returns true when a file was created.
    pub fn init_file(path: &Path, database_path: Option<&str>) -> AppResult<bool> {
        if path.exists() {
            return Ok(false);
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut cfg = Self::template();
        if let Some(db) = database_path {
            cfg.database_path = db.to_string();
        }

        let content = toml::to_string_pretty(&cfg)
            .map_err(|e| AppError::Config(format!("failed to serialize template: {e}")))?;
        fs::write(path, content)?;
        Ok(true)
    }
}
