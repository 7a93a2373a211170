//! Service configuration.
//!
//! Settings come from environment variables. Blank values count as unset.

use std::time::Duration;

use crate::job::DEFAULT_INTERVAL;

/// Default database the entries are written to.
pub const DEFAULT_DATABASE: &str = "tankstelle";

/// Errors found while reading configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A required variable is unset or blank
    #[error("{0} must be set")]
    Missing(&'static str),

    /// A variable is set but cannot be used
    #[error("{var} is invalid: {message}")]
    Invalid { var: &'static str, message: String },
}

/// Where and how to write entries to InfluxDB.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfluxSettings {
    pub url: String,
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Everything the service needs to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Tankerkönig API key (`TANKERKOENIG_API_KEY`)
    pub api_key: String,
    /// Override for the Tankerkönig base URL (`TANKERKOENIG_BASE_URL`)
    pub base_url: Option<String>,
    /// Raw location string, `<lat>;<lng>;<radius>|...` (`TANKPREISE_LOCATIONS`)
    pub locations: String,
    /// Target database (`TANKPREISE_DATABASE`)
    pub database: String,
    /// Time between runs (`TANKPREISE_INTERVAL_SECS`)
    pub interval: Duration,
    /// InfluxDB connection (`INFLUXDB_URL`, `INFLUXDB_USERNAME`,
    /// `INFLUXDB_PASSWORD`); entries are only logged without it
    pub influx: Option<InfluxSettings>,
}

impl Settings {
    /// Read settings from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let api_key =
            get("TANKERKOENIG_API_KEY").ok_or(ConfigError::Missing("TANKERKOENIG_API_KEY"))?;

        let interval = match get("TANKPREISE_INTERVAL_SECS") {
            Some(raw) => {
                let secs = raw.parse::<u64>().map_err(|e| ConfigError::Invalid {
                    var: "TANKPREISE_INTERVAL_SECS",
                    message: e.to_string(),
                })?;
                if secs == 0 {
                    return Err(ConfigError::Invalid {
                        var: "TANKPREISE_INTERVAL_SECS",
                        message: "must be greater than zero".to_string(),
                    });
                }
                Duration::from_secs(secs)
            }
            None => DEFAULT_INTERVAL,
        };

        let influx = get("INFLUXDB_URL").map(|url| InfluxSettings {
            url,
            username: get("INFLUXDB_USERNAME"),
            password: get("INFLUXDB_PASSWORD"),
        });

        Ok(Self {
            api_key,
            base_url: get("TANKERKOENIG_BASE_URL"),
            locations: get("TANKPREISE_LOCATIONS").unwrap_or_default(),
            database: get("TANKPREISE_DATABASE").unwrap_or_else(|| DEFAULT_DATABASE.to_string()),
            interval,
            influx,
        })
    }
}
