//! Configuration loader: merges .env, config.toml, and environment variables.

use common::config::AppConfig;
use common::{Error, Result};
use std::path::Path;

fn parse_positive_u64(raw: &str, env_name: &str) -> Result<u64> {
    let parsed = raw
        .trim()
        .parse::<u64>()
        .map_err(|_| Error::Config(format!("{env_name} must be an integer > 0")))?;
    if parsed == 0 {
        return Err(Error::Config(format!("{env_name} must be an integer > 0")));
    }
    Ok(parsed)
}

fn parse_bool(raw: &str) -> bool {
    let lowered = raw.trim().to_ascii_lowercase();
    lowered != "0" && lowered != "false" && lowered != "no" && lowered != "off"
}

fn validate_config(config: &AppConfig) -> Result<()> {
    let mut issues: Vec<String> = Vec::new();

    if config.api_key.trim().is_empty() {
        issues.push("api_key must be set (WEATHERAPI_KEY)".into());
    }
    if config.base_url.trim().is_empty() {
        issues.push("base_url must not be empty".into());
    }
    if config.default_location.trim().is_empty() {
        issues.push("default_location must not be empty".into());
    }
    if !(1..=14).contains(&config.forecast.days) {
        issues.push("forecast.days must be between 1 and 14".into());
    }
    if config.http.request_timeout_secs == 0 {
        issues.push("http.request_timeout_secs must be > 0".into());
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(Error::Config(format!(
            "Invalid config:\n - {}",
            issues.join("\n - ")
        )))
    }
}

fn apply_env_overrides(config: &mut AppConfig) -> Result<()> {
    if let Ok(key) = std::env::var("WEATHERAPI_KEY") {
        config.api_key = key;
    }
    if let Ok(url) = std::env::var("WEATHERAPI_BASE_URL") {
        config.base_url = url;
    }
    if let Ok(location) = std::env::var("ATMOSPHERE_LOCATION") {
        config.default_location = location;
    }
    if let Ok(days) = std::env::var("WEATHER_FORECAST_DAYS") {
        let parsed = parse_positive_u64(&days, "WEATHER_FORECAST_DAYS")?;
        config.forecast.days = u32::try_from(parsed)
            .map_err(|_| Error::Config("WEATHER_FORECAST_DAYS is out of range".into()))?;
    }
    if let Ok(flag) = std::env::var("WEATHER_INCLUDE_AQI") {
        config.forecast.include_aqi = parse_bool(&flag);
    }
    if let Ok(flag) = std::env::var("WEATHER_INCLUDE_ALERTS") {
        config.forecast.include_alerts = parse_bool(&flag);
    }
    if let Ok(flag) = std::env::var("WEATHER_INCLUDE_TIDES") {
        config.forecast.include_tides = parse_bool(&flag);
    }
    if let Ok(timeout) = std::env::var("WEATHER_REQUEST_TIMEOUT_SECS") {
        config.http.request_timeout_secs =
            parse_positive_u64(&timeout, "WEATHER_REQUEST_TIMEOUT_SECS")?;
    }
    Ok(())
}

/// Load configuration from environment and optional config file.
pub fn load_config() -> Result<AppConfig> {
    // 1. Load .env file from project root or parent directories.
    if let Err(e) = dotenvy::dotenv() {
        tracing::debug!("No .env file loaded: {}", e);
    }

    // 2. Start with defaults.
    let mut config = AppConfig::default();

    // 3. Try loading config.toml if it exists.
    let config_path = Path::new("config.toml");
    if config_path.exists() {
        let contents = std::fs::read_to_string(config_path)
            .map_err(|e| Error::Config(format!("Failed to read config.toml: {}", e)))?;
        config = toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("Failed to parse config.toml: {}", e)))?;
    }

    // 4. Override with environment variables (highest priority).
    apply_env_overrides(&mut config)?;

    validate_config(&config)?;

    Ok(config)
}
