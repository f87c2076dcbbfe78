use anyhow::{Context, Result};
use std::time::Duration;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_VIACEP_BASE_URL: &str = "https://viacep.com.br";
pub const DEFAULT_WEATHERAPI_BASE_URL: &str = "https://api.weatherapi.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Process configuration, built once at startup and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Port the HTTP server listens on.
    pub port: u16,

    /// WeatherAPI.com key. Missing keys only fail the requests that need one.
    pub weather_api_key: Option<String>,

    pub viacep_base_url: String,
    pub weatherapi_base_url: String,

    /// Timeout applied to every outbound request.
    pub request_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            weather_api_key: None,
            viacep_base_url: DEFAULT_VIACEP_BASE_URL.to_string(),
            weatherapi_base_url: DEFAULT_WEATHERAPI_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl Config {
    /// Read configuration from the process environment.
    ///
    /// Recognised variables: `PORT`, `WEATHERAPI_KEY`, `VIACEP_BASE_URL`,
    /// `WEATHERAPI_BASE_URL` and `HTTP_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable lookup. Empty values
    /// count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = Self::default();

        let port = match get("PORT") {
            Some(raw) => raw.parse::<u16>().with_context(|| format!("Invalid PORT value: {raw}"))?,
            None => defaults.port,
        };

        let request_timeout = match get("HTTP_TIMEOUT_SECS") {
            Some(raw) => Duration::from_secs(
                raw.parse::<u64>()
                    .with_context(|| format!("Invalid HTTP_TIMEOUT_SECS value: {raw}"))?,
            ),
            None => defaults.request_timeout,
        };

        Ok(Self {
            port,
            weather_api_key: get("WEATHERAPI_KEY"),
            viacep_base_url: get("VIACEP_BASE_URL").unwrap_or(defaults.viacep_base_url),
            weatherapi_base_url: get("WEATHERAPI_BASE_URL").unwrap_or(defaults.weatherapi_base_url),
            request_timeout,
        })
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn has_weather_api_key(&self) -> bool {
        self.weather_api_key.is_some()
    }
}
