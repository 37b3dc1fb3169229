use std::time::Duration;
use thiserror::Error;

/// Configuration errors
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    /// An environment variable holds a value that cannot be used
    #[error("Invalid value for {name}: '{value}'")]
    InvalidValue { name: &'static str, value: String },
}

/// Runtime settings read from the environment
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Port the server listens on (PORT, default 3000)
    pub port: u16,

    /// Deployment environment name (APP_ENV, default "development")
    pub environment: String,

    /// Delay of the simulated barcode scanner (SCAN_DELAY_MS, default 2000)
    pub scan_delay: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            environment: "development".to_string(),
            scan_delay: Duration::from_millis(2000),
        }
    }
}

impl AppConfig {
    /// Read the configuration from process environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read the configuration through `lookup`, falling back to defaults for
    /// unset variables
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let port = match lookup("PORT") {
            Some(value) => value.trim().parse::<u16>().map_err(|_| ConfigError::InvalidValue {
                name: "PORT",
                value,
            })?,
            None => defaults.port,
        };

        let environment = lookup("APP_ENV")
            .filter(|value| !value.trim().is_empty())
            .unwrap_or(defaults.environment);

        let scan_delay = match lookup("SCAN_DELAY_MS") {
            Some(value) => value
                .trim()
                .parse::<u64>()
                .map(Duration::from_millis)
                .map_err(|_| ConfigError::InvalidValue {
                    name: "SCAN_DELAY_MS",
                    value,
                })?,
            None => defaults.scan_delay,
        };

        Ok(Self {
            port,
            environment,
            scan_delay,
        })
    }
}
