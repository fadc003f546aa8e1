//! WeatherAPI client.
//!
//! Fetches live forecasts (`forecast.json`) and archived days (`history.json`)
//! from api.weatherapi.com and decodes them into the shared `WeatherPayload`.

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use common::config::{AppConfig, ForecastConfig};
use common::{Error, Result, WeatherPayload, WeatherSource};
use serde::Deserialize;
use tracing::{debug, warn};

const MAX_ERROR_BODY: usize = 500;

/// WeatherAPI client with connection pooling and a request timeout.
#[derive(Debug, Clone)]
pub struct WeatherApiClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    forecast: ForecastConfig,
}

/// Error envelope returned with non-2xx responses.
#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    code: i64,
    message: String,
}

impl WeatherApiClient {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.http.user_agent.as_str())
            .pool_max_idle_per_host(4)
            .timeout(Duration::from_secs(config.http.request_timeout_secs))
            .build()
            .map_err(|e| Error::Config(format!("failed to build WeatherAPI HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            forecast: config.forecast.clone(),
        })
    }

    /// Fetch current conditions and the configured number of forecast days.
    pub async fn fetch_forecast(&self, location: &str) -> Result<WeatherPayload> {
        let url = format!("{}/forecast.json", self.base_url);
        let query = forecast_query(&self.api_key, location, &self.forecast);
        debug!("Fetching WeatherAPI forecast: {} q={}", url, location);
        self.get_payload(&url, &query, location).await
    }

    /// Fetch the archived weather for one day.
    pub async fn fetch_history(
        &self,
        location: &str,
        date: NaiveDate,
    ) -> Result<WeatherPayload> {
        let url = format!("{}/history.json", self.base_url);
        let query = history_query(&self.api_key, location, date);
        debug!("Fetching WeatherAPI history: {} q={} dt={}", url, location, date);
        self.get_payload(&url, &query, location).await
    }

    async fn get_payload(
        &self,
        url: &str,
        query: &[(&'static str, String)],
        location: &str,
    ) -> Result<WeatherPayload> {
        let resp = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| Error::Network(format!("HTTP error for {location}: {e}")))?;

        let status = resp.status().as_u16();
        let body = resp
            .text()
            .await
            .map_err(|e| Error::Network(format!("failed reading body for {location}: {e}")))?;

        if !(200..300).contains(&status) {
            let message = api_error_message(&body);
            warn!("WeatherAPI returned {} for {}: {}", status, location, message);
            return Err(Error::Api { status, message });
        }

        decode_payload(status, &body)
    }
}

#[async_trait]
impl WeatherSource for WeatherApiClient {
    async fn fetch_live_forecast(&self, location: &str) -> Result<WeatherPayload> {
        self.fetch_forecast(location).await
    }

    async fn fetch_historical(
        &self,
        location: &str,
        date: NaiveDate,
    ) -> Result<WeatherPayload> {
        self.fetch_history(location, date).await
    }
}

fn yes_no(flag: bool) -> String {
    let label = if flag { "yes" } else { "no" };
    label.to_string()
}

fn forecast_query(
    api_key: &str,
    location: &str,
    forecast: &ForecastConfig,
) -> Vec<(&'static str, String)> {
    vec![
        ("key", api_key.to_string()),
        ("q", location.to_string()),
        ("days", forecast.days.to_string()),
        ("aqi", yes_no(forecast.include_aqi)),
        ("alerts", yes_no(forecast.include_alerts)),
        ("tides", yes_no(forecast.include_tides)),
    ]
}

fn history_query(api_key: &str, location: &str, date: NaiveDate) -> Vec<(&'static str, String)> {
    vec![
        ("key", api_key.to_string()),
        ("q", location.to_string()),
        ("dt", date.format("%Y-%m-%d").to_string()),
        ("aqi", "yes".to_string()),
    ]
}

/// Pull the human-readable message out of an error body, falling back to a
/// truncated copy of the raw text.
fn api_error_message(body: &str) -> String {
    match serde_json::from_str::<ApiErrorEnvelope>(body) {
        Ok(envelope) => format!("{} (code {})", envelope.error.message, envelope.error.code),
        Err(_) => {
            let end = body
                .char_indices()
                .nth(MAX_ERROR_BODY)
                .map(|(i, _)| i)
                .unwrap_or(body.len());
            body[..end].to_string()
        }
    }
}

fn decode_payload(status: u16, body: &str) -> Result<WeatherPayload> {
    let payload: WeatherPayload = serde_json::from_str(body).map_err(|e| Error::Api {
        status,
        message: format!("malformed response: {e}"),
    })?;

    if payload.forecast.forecastday.is_empty() {
        warn!("WeatherAPI payload for {} has no forecast days", payload.location.name);
    }

    Ok(payload)
}
