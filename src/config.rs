//! Process-wide configuration, built once in `main` and handed to each client.

use anyhow::{Context, Result};
use std::time::Duration;

use crate::estimator::OutOfRangePolicy;

pub const DEFAULT_DE_LIJN_BASE_URL: &str = "https://api.delijn.be/DLKernOpenData/api/v1";
pub const DEFAULT_WEATHER_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";
pub const DEFAULT_TOMTOM_BASE_URL: &str = "https://api.tomtom.com/routing/1";

/// Timeouts applied to every outbound request.
#[derive(Debug, Clone)]
pub struct HttpConfig {
    pub timeout: Duration,
    pub connect_timeout: Duration,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

/// Base URL and credential for one upstream collaborator.
#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    pub base_url: String,
    pub api_key: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub de_lijn: UpstreamConfig,
    pub weather: UpstreamConfig,
    pub tomtom: UpstreamConfig,
    pub http: HttpConfig,
    pub out_of_range: OutOfRangePolicy,
}

impl Config {
    /// Reads the configuration from the process environment.
    ///
    /// Call `dotenvy::dotenv()` first if a `.env` file should be honoured.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &str| -> Result<String> {
            lookup(name)
                .filter(|v| !v.trim().is_empty())
                .with_context(|| format!("{name} must be set"))
        };
        let or_default = |name: &str, default: &str| lookup(name).unwrap_or_else(|| default.to_string());
        let secs = |name: &str, default: Duration| -> Result<Duration> {
            match lookup(name) {
                Some(raw) => {
                    let secs: u64 = raw
                        .trim()
                        .parse()
                        .with_context(|| format!("{name} must be a whole number of seconds, got '{raw}'"))?;
                    Ok(Duration::from_secs(secs))
                }
                None => Ok(default),
            }
        };

        let defaults = HttpConfig::default();

        Ok(Self {
            de_lijn: UpstreamConfig {
                base_url: or_default("DE_LIJN_BASE_URL", DEFAULT_DE_LIJN_BASE_URL),
                api_key: required("DE_LIJN_API_KEY")?,
            },
            weather: UpstreamConfig {
                base_url: or_default("WEATHER_BASE_URL", DEFAULT_WEATHER_BASE_URL),
                api_key: required("WEATHER_API_KEY")?,
            },
            tomtom: UpstreamConfig {
                base_url: or_default("TOMTOM_BASE_URL", DEFAULT_TOMTOM_BASE_URL),
                api_key: required("TOMTOM_API_KEY")?,
            },
            http: HttpConfig {
                timeout: secs("HTTP_TIMEOUT_SECS", defaults.timeout)?,
                connect_timeout: secs("HTTP_CONNECT_TIMEOUT_SECS", defaults.connect_timeout)?,
            },
            out_of_range: OutOfRangePolicy::default(),
        })
    }
}
