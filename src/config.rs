//! Configuration management for contact-sync.
//!
//! This module handles loading and validating configuration from environment
//! variables (optionally seeded from a `.env` file). The resulting [`Config`]
//! is built once per run and handed to the components that need it.

use crate::domain::DEFAULT_POSITION;
use crate::error::{ConfigError, ConfigResult};
use std::env;

/// Default backend base URL.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api";

/// Spreadsheet column names, matched exactly (case and whitespace included).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMapping {
    pub org_number: String,
    pub org_name: String,
    pub phone: String,
    pub contact_name: String,
    pub position: String,

    /// `None` when the export has no email column
    pub email: Option<String>,
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self {
            org_number: "Org. Nr Kontaktet".to_string(),
            org_name: "Bedriftsnavn".to_string(),
            phone: "Mobil BT".to_string(),
            contact_name: "Navn BT".to_string(),
            position: "Tittel BT".to_string(),
            // The export header really does start with a space
            email: Some(" Epost BT".to_string()),
        }
    }
}

/// Configuration for a sync run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Backend base URL; endpoints are appended to it
    pub api_base_url: String,

    /// HTTP request timeout in seconds (default: 10)
    pub request_timeout: u64,

    /// Emit a progress line every this many rows (default: 100)
    pub progress_interval: usize,

    /// Position used when a row has no job title
    pub default_position: String,

    /// Log level used when `RUST_LOG` is unset (default: "info")
    pub log_level: String,

    /// Spreadsheet column names
    pub columns: ColumnMapping,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// All variables are optional:
    /// - `SYNC_API_BASE_URL`: backend base URL (default: `http://localhost:8080/api`)
    /// - `REQUEST_TIMEOUT`: HTTP timeout in seconds (default: 10)
    /// - `PROGRESS_INTERVAL`: rows between progress lines (default: 100)
    /// - `DEFAULT_POSITION`: placeholder job title (default: "Unknown position")
    /// - `LOG_LEVEL`: logging level (default: "info")
    /// - `COLUMN_ORG_NUMBER`, `COLUMN_ORG_NAME`, `COLUMN_PHONE`,
    ///   `COLUMN_CONTACT_NAME`, `COLUMN_POSITION`, `COLUMN_EMAIL`: column names.
    ///   An empty `COLUMN_EMAIL` means the export has no email column.
    pub fn from_env() -> ConfigResult<Self> {
        // Try to load .env file if it exists (but don't fail if it doesn't)
        let _ = dotenvy::dotenv();

        let api_base_url =
            env::var("SYNC_API_BASE_URL").unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string());
        Self::validate_base_url(&api_base_url, "SYNC_API_BASE_URL")?;

        let request_timeout = Self::parse_env_u64("REQUEST_TIMEOUT", 10)?;
        if request_timeout == 0 {
            return Err(ConfigError::InvalidValue {
                var: "REQUEST_TIMEOUT".to_string(),
                reason: "Must be greater than zero".to_string(),
            });
        }

        let progress_interval = Self::parse_env_usize("PROGRESS_INTERVAL", 100)?;
        if progress_interval == 0 {
            return Err(ConfigError::InvalidValue {
                var: "PROGRESS_INTERVAL".to_string(),
                reason: "Must be greater than zero".to_string(),
            });
        }

        let default_position =
            env::var("DEFAULT_POSITION").unwrap_or_else(|_| DEFAULT_POSITION.to_string());
        if default_position.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                var: "DEFAULT_POSITION".to_string(),
                reason: "Cannot be empty".to_string(),
            });
        }

        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Config {
            api_base_url,
            request_timeout,
            progress_interval,
            default_position: default_position.trim().to_string(),
            log_level,
            columns: Self::columns_from_env(),
        })
    }

    /// Check that a base URL is absolute http(s). `source` names where the
    /// value came from (environment variable or command-line flag).
    pub fn validate_base_url(url: &str, source: &str) -> ConfigResult<()> {
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ConfigError::InvalidValue {
                var: source.to_string(),
                reason: "Must start with http:// or https://".to_string(),
            });
        }
        Ok(())
    }

    fn columns_from_env() -> ColumnMapping {
        let defaults = ColumnMapping::default();
        let column = |var: &str, default: String| env::var(var).unwrap_or(default);

        let email = match env::var("COLUMN_EMAIL") {
            Ok(name) if name.is_empty() => None,
            Ok(name) => Some(name),
            Err(_) => defaults.email,
        };

        ColumnMapping {
            org_number: column("COLUMN_ORG_NUMBER", defaults.org_number),
            org_name: column("COLUMN_ORG_NAME", defaults.org_name),
            phone: column("COLUMN_PHONE", defaults.phone),
            contact_name: column("COLUMN_CONTACT_NAME", defaults.contact_name),
            position: column("COLUMN_POSITION", defaults.position),
            email,
        }
    }

    /// Parse an environment variable as u64 with a default value.
    fn parse_env_u64(var_name: &str, default: u64) -> ConfigResult<u64> {
        match env::var(var_name) {
            Ok(val) => val.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }

    /// Parse an environment variable as usize with a default value.
    fn parse_env_usize(var_name: &str, default: usize) -> ConfigResult<usize> {
        match env::var(var_name) {
            Ok(val) => val.parse::<usize>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout: 10,
            progress_interval: 100,
            default_position: DEFAULT_POSITION.to_string(),
            log_level: "info".to_string(),
            columns: ColumnMapping::default(),
        }
    }
}
