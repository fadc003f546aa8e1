//! Application configuration types.

use serde::{Deserialize, Serialize};

use crate::source::AUTO_IP;

/// Top-level application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// WeatherAPI key.
    #[serde(default)]
    pub api_key: String,

    /// WeatherAPI base URL, without a trailing slash.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Location query used when the permission signal fires.
    #[serde(default = "default_location")]
    pub default_location: String,

    /// Forecast request options.
    #[serde(default)]
    pub forecast: ForecastConfig,

    /// HTTP client settings.
    #[serde(default)]
    pub http: HttpConfig,
}

/// Options sent with every `forecast.json` request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastConfig {
    /// Number of forecast days (WeatherAPI allows 1..=14).
    #[serde(default = "default_forecast_days")]
    pub days: u32,

    /// Request air-quality metrics.
    #[serde(default = "default_true")]
    pub include_aqi: bool,

    /// Request weather alerts.
    #[serde(default = "default_true")]
    pub include_alerts: bool,

    /// Request tide tables.
    #[serde(default = "default_true")]
    pub include_tides: bool,
}

/// HTTP client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Whole-request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

// ── Defaults ──────────────────────────────────────────────────────────

fn default_true() -> bool {
    true
}

fn default_base_url() -> String {
    "https://api.weatherapi.com/v1".into()
}

fn default_location() -> String {
    AUTO_IP.into()
}

fn default_forecast_days() -> u32 {
    14
}

fn default_timeout() -> u64 {
    30
}

fn default_user_agent() -> String {
    "atmosphere/0.1".into()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_base_url(),
            default_location: default_location(),
            forecast: ForecastConfig::default(),
            http: HttpConfig::default(),
        }
    }
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            days: default_forecast_days(),
            include_aqi: true,
            include_alerts: true,
            include_tides: true,
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}
