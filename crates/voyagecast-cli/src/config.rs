//! Environment-driven configuration for the HTTP collaborators.

use std::path::PathBuf;
use std::time::Duration;

use voyagecast_lib::forecast::DEFAULT_FORECAST_API_BASE;
use voyagecast_lib::weather::DEFAULT_OPENWEATHER_BASE_URL;

pub const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";
pub const OPENWEATHER_BASE_ENV: &str = "OPENWEATHER_BASE_URL";
pub const FORECAST_BASE_ENV: &str = "FORECAST_API_BASE";
pub const TIMEOUT_ENV: &str = "VOYAGECAST_HTTP_TIMEOUT_SECS";
pub const ROUTES_ENV: &str = "VOYAGECAST_ROUTES";

const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Settings for the weather and forecast clients plus the routes file.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub openweather_api_key: Option<String>,
    pub openweather_base_url: String,
    pub forecast_base_url: String,
    pub http_timeout: Duration,
    pub routes_path: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            openweather_api_key: None,
            openweather_base_url: DEFAULT_OPENWEATHER_BASE_URL.to_string(),
            forecast_base_url: DEFAULT_FORECAST_API_BASE.to_string(),
            http_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            routes_path: None,
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable lookup. Blank
    /// values count as unset and an unparsable timeout keeps the default.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let http_timeout = get(TIMEOUT_ENV)
            .and_then(|v| v.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
            .unwrap_or(defaults.http_timeout);

        Self {
            openweather_api_key: get(API_KEY_ENV),
            openweather_base_url: get(OPENWEATHER_BASE_ENV)
                .unwrap_or(defaults.openweather_base_url),
            forecast_base_url: get(FORECAST_BASE_ENV).unwrap_or(defaults.forecast_base_url),
            http_timeout,
            routes_path: get(ROUTES_ENV).map(PathBuf::from),
        }
    }
}
