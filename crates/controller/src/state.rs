//! The view snapshot published to renderers.

use std::sync::Arc;

use chrono::NaiveDate;
use common::{Hour, MarineSummary, WeatherPayload, AUTO_IP};
use serde::{Deserialize, Serialize};

/// How far back the timeline reaches, in days.
pub const TIMELINE_SPAN_DAYS: i64 = 365;

/// Hour selected after a historical load. Archived days have no "now".
pub const HISTORICAL_HOUR_INDEX: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppMode {
    Live,
    Historical,
    Marine,
}

/// Everything a renderer needs, as one immutable value.
///
/// The controller never edits a published snapshot; each command builds a
/// new one from the previous.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    /// A fetch is outstanding.
    pub is_loading: bool,
    /// Last successfully fetched payload, live or historical.
    pub weather_data: Option<Arc<WeatherPayload>>,
    /// Last fetch failure; cleared when a new load starts.
    pub error_message: Option<String>,
    /// Index into the first forecast day's hours. Not bounds-checked on write.
    pub selected_hour_index: usize,
    pub is_aqi_expanded: bool,
    pub app_mode: AppMode,
    pub marine_data: Option<MarineSummary>,
    pub historical_date: NaiveDate,
    /// Scrubber position in `[0, 1]`.
    pub timeline_progress: f32,
    pub is_timeline_dragging: bool,
}

impl ViewState {
    /// Initial snapshot: loading, live mode, timeline parked on today.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            is_loading: true,
            weather_data: None,
            error_message: None,
            selected_hour_index: 0,
            is_aqi_expanded: false,
            app_mode: AppMode::Live,
            marine_data: None,
            historical_date: today,
            timeline_progress: 0.0,
            is_timeline_dragging: false,
        }
    }

    /// Location for follow-up fetches: the loaded payload's name, else `auto:ip`.
    pub fn location_query(&self) -> String {
        self.weather_data
            .as_ref()
            .map(|data| data.location.name.clone())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| AUTO_IP.to_string())
    }

    /// Hours of the first forecast day, empty when nothing is loaded.
    pub fn hours(&self) -> &[Hour] {
        self.weather_data
            .as_deref()
            .and_then(WeatherPayload::first_day)
            .map(|day| day.hour.as_slice())
            .unwrap_or(&[])
    }

    /// The selected hour, falling back to the first hour when the index is
    /// out of range.
    pub fn selected_hour(&self) -> Option<&Hour> {
        let hours = self.hours();
        hours.get(self.selected_hour_index).or_else(|| hours.first())
    }
}
