//! The weather source contract consumed by the state controller.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::{Result, WeatherPayload};

/// Location sentinel: resolve the location from the caller's network origin.
pub const AUTO_IP: &str = "auto:ip";

/// Fetches weather payloads for a location query.
///
/// A location query is either a geocodable place name or [`AUTO_IP`].
/// Implementations hold no session state the caller needs to manage.
#[async_trait]
pub trait WeatherSource: Send + Sync {
    /// Current conditions plus the multi-day forecast.
    async fn fetch_live_forecast(&self, location: &str) -> Result<WeatherPayload>;

    /// Archived weather for a single calendar day.
    async fn fetch_historical(
        &self,
        location: &str,
        date: NaiveDate,
    ) -> Result<WeatherPayload>;
}
