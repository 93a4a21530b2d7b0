//! Configuration for the client and the `sfs-find-users` tool.
//!
//! Values come from a TOML file, from environment variables, or from
//! defaults:
//!
//! - `SFS_ZONE`        (default: "BasicExamples")
//! - `SFS_LOG_FILTER`  (default: "info")
//! - `SFS_MAX_LIMIT`   (default: "0", i.e. no cap)

use std::env;
use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::ConfigError;

/// Client configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Zone the session is logged into. Used for log context only.
    pub zone: String,

    /// `tracing` filter directive, e.g. "info" or "sfs_client=debug".
    pub log_filter: String,

    /// Upper bound applied to result limits requested by tools.
    /// `0` leaves limits untouched.
    pub max_limit: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            zone: "BasicExamples".to_string(),
            log_filter: "info".to_string(),
            max_limit: 0,
        }
    }
}

impl ClientConfig {
    /// Construct a `ClientConfig` from environment variables, falling back
    /// to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = ClientConfig::default();

        Ok(ClientConfig {
            zone: env::var("SFS_ZONE").unwrap_or(defaults.zone),
            log_filter: env::var("SFS_LOG_FILTER").unwrap_or(defaults.log_filter),
            max_limit: read_env_or_default("SFS_MAX_LIMIT", defaults.max_limit)?,
        })
    }

    /// Parse a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Apply `max_limit` to a requested limit.
    ///
    /// An unbounded request (`0`) becomes `max_limit` when a cap is set.
    pub fn cap_limit(&self, requested: u32) -> u32 {
        match (self.max_limit, requested) {
            (0, r) => r,
            (cap, 0) => cap,
            (cap, r) => r.min(cap),
        }
    }
}

fn read_env_or_default<T>(key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(val) => val.parse::<T>().map_err(|e| ConfigError::InvalidEnv {
            key,
            reason: e.to_string(),
        }),
        Err(_) => Ok(default),
    }
}
