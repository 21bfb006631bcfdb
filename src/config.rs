//! Application configuration loaded from environment variables.

use std::net::{SocketAddr, ToSocketAddrs};

use serde::Deserialize;
use strum::{Display, EnumString};

/// Deployment environment reported by `/api/status`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // === Server Configuration ===
    /// Bind address.
    #[serde(default = "default_host")]
    pub host: String,

    /// HTTP listen port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Runtime worker threads.
    #[serde(default = "default_workers")]
    pub workers: usize,

    // === Deployment Metadata ===
    /// Environment name (development, staging, production).
    #[serde(default)]
    pub app_env: Environment,

    /// Build label reported by `/api/version` (CI sets the commit SHA).
    #[serde(default = "default_build")]
    pub app_build: String,

    // === Logging ===
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub rust_log: String,

    /// Emit logs as JSON lines.
    #[serde(default)]
    pub log_json: bool,

    /// Enable verbose logging.
    #[serde(default)]
    pub verbose: bool,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_workers() -> usize {
    1
}

fn default_build() -> String {
    "initial".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: default_workers(),
            app_env: Environment::default(),
            app_build: default_build(),
            rust_log: default_log_level(),
            log_json: false,
            verbose: false,
        }
    }
}

impl Config {
    /// Load configuration from environment, reading .env file first.
    pub fn load() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        envy::from_env()
    }

    /// Check if the configuration is valid.
    pub fn validate(&self) -> Result<(), String> {
        if self.port == 0 {
            return Err("PORT must be greater than 0".to_string());
        }

        if self.workers == 0 {
            return Err("WORKERS must be at least 1".to_string());
        }

        if self.app_build.trim().is_empty() {
            return Err("APP_BUILD must not be empty".to_string());
        }

        Ok(())
    }

    /// Socket address the server binds to. Hostnames are resolved; the
    /// first address returned wins.
    pub fn socket_addr(&self) -> Result<SocketAddr, String> {
        (self.host.as_str(), self.port)
            .to_socket_addrs()
            .map_err(|e| format!("invalid bind address {}:{}: {}", self.host, self.port, e))?
            .next()
            .ok_or_else(|| format!("{} resolved to no addresses", self.host))
    }
}
