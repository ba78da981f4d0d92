//! Server configuration from the environment.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::planner::TravelSearchSettings;

/// Default listen address.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

/// Default time allowed for one search, in seconds.
pub const DEFAULT_SEARCH_TIMEOUT_SECS: u64 = 10;

/// Error reading the server configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("invalid {name}: {value:?}")]
    Invalid { name: &'static str, value: String },

    #[error("failed to read settings {path}: {source}")]
    SettingsIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid settings file: {0}")]
    SettingsJson(#[from] serde_json::Error),
}

/// Server configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    /// JSON file of flight records
    pub flights_path: PathBuf,

    /// Optional JSON file of search settings
    pub settings_path: Option<PathBuf>,

    pub bind_addr: SocketAddr,
    pub search_timeout: Duration,
}

impl ServerConfig {
    /// Read `FLIGHTS_PATH`, `SETTINGS_PATH`, `BIND_ADDR` and
    /// `SEARCH_TIMEOUT_SECS` from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Read the configuration through `var`, which returns a variable's
    /// value if set.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let flights_path = var("FLIGHTS_PATH")
            .map(PathBuf::from)
            .ok_or(ConfigError::Missing("FLIGHTS_PATH"))?;
        let settings_path = var("SETTINGS_PATH").map(PathBuf::from);

        let bind_addr = var("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr: SocketAddr = bind_addr.parse().map_err(|_| ConfigError::Invalid {
            name: "BIND_ADDR",
            value: bind_addr.clone(),
        })?;

        let search_timeout: u64 = match var("SEARCH_TIMEOUT_SECS") {
            Some(value) => value.parse().map_err(|_| ConfigError::Invalid {
                name: "SEARCH_TIMEOUT_SECS",
                value: value.clone(),
            })?,
            None => DEFAULT_SEARCH_TIMEOUT_SECS,
        };

        Ok(Self {
            flights_path,
            settings_path,
            bind_addr,
            search_timeout: Duration::from_secs(search_timeout),
        })
    }

    /// Search settings from `settings_path`, or the defaults.
    pub fn search_settings(&self) -> Result<TravelSearchSettings, ConfigError> {
        match &self.settings_path {
            Some(path) => load_search_settings(path),
            None => Ok(TravelSearchSettings::default()),
        }
    }
}

/// Read search settings from a JSON file. Missing fields take defaults.
pub fn load_search_settings(path: &Path) -> Result<TravelSearchSettings, ConfigError> {
    let data = std::fs::read(path).map_err(|source| ConfigError::SettingsIo {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_slice(&data)?)
}
