//! Configuration management for the taskdir server.
//!
//! Settings come from three layers, applied in order:
//!
//! 1. Built-in defaults ([`Config::default`])
//! 2. `config.json` in the platform data directory, when present
//! 3. Environment variables (`TASKDIR_HOST`, `TASKDIR_PORT`, `TASKDIR_DB`),
//!    including those loaded from a `.env` file
//!
//! Command-line flags of the `serve` command are applied last by the caller.
//!
//! ## File Location
//!
//! - **Windows**: `%LOCALAPPDATA%\taskdir\taskdir\config.json`
//! - **macOS**: `~/Library/Application Support/taskdir/taskdir/config.json`
//! - **Linux**: `~/.local/share/taskdir/taskdir/config.json`
//!
//! ```rust,no_run
//! use taskdir::libs::config::Config;
//!
//! let config = Config::read()?;
//! println!("{}", config.server.address());
//! # Ok::<(), anyhow::Error>(())
//! ```

use super::data_storage::DataStorage;
use super::session::{DEFAULT_IDLE_TIMEOUT, DEFAULT_MAX_SESSIONS};
use crate::libs::messages::Message;
use crate::{msg_debug, msg_warning};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;

/// Configuration file name inside the data directory.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Default SQLite file name, resolved relative to the data directory.
pub const DEFAULT_DB_FILE: &str = "taskdir.db";

pub const ENV_HOST: &str = "TASKDIR_HOST";
pub const ENV_PORT: &str = "TASKDIR_PORT";
pub const ENV_DB: &str = "TASKDIR_DB";

/// HTTP listener settings.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    /// `host:port` string suitable for `TcpListener::bind`.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 5000,
        }
    }
}

/// Database location.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct DatabaseConfig {
    /// File name relative to the data directory, or an absolute path.
    pub file: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        DatabaseConfig {
            file: DEFAULT_DB_FILE.to_string(),
        }
    }
}

/// Session cookie settings.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct SessionConfig {
    pub cookie_name: String,
    /// Adds the `Secure` attribute; enable when served over HTTPS.
    pub cookie_secure: bool,
    /// Seconds a session may go unused before it is forgotten.
    pub idle_timeout_secs: u64,
    /// Most sessions kept in memory at once.
    pub max_sessions: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            cookie_name: "taskdir_session".to_string(),
            cookie_secure: false,
            idle_timeout_secs: DEFAULT_IDLE_TIMEOUT.as_secs(),
            max_sessions: DEFAULT_MAX_SESSIONS,
        }
    }
}

/// Root configuration object.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub session: SessionConfig,
}

impl Config {
    /// Reads `config.json` from the data directory and applies environment
    /// overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn read() -> Result<Config> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;

        let mut config = if config_file_path.exists() {
            let config_str = fs::read_to_string(&config_file_path)?;
            let config: Config = serde_json::from_str(&config_str)?;
            msg_debug!(Message::ConfigLoaded(config_file_path.display().to_string()));
            config
        } else {
            msg_debug!(Message::ConfigFileNotFound);
            Config::default()
        };

        config.apply_env();
        Ok(config)
    }

    /// Overrides fields from `TASKDIR_*` environment variables.
    pub fn apply_env(&mut self) {
        if let Ok(host) = env::var(ENV_HOST) {
            self.server.host = host;
        }
        if let Ok(port) = env::var(ENV_PORT) {
            match port.parse() {
                Ok(port) => self.server.port = port,
                Err(_) => msg_warning!(Message::InvalidPortOverride(port)),
            }
        }
        if let Ok(file) = env::var(ENV_DB) {
            self.database.file = file;
        }
    }

    /// Writes the configuration as pretty-printed JSON to the data directory.
    pub fn save(&self) -> Result<()> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        let config_file = fs::File::create(config_file_path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }
}
