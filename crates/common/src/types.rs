//! Domain types shared across Atmosphere.

use serde::{Deserialize, Serialize};

// ── WeatherAPI payload ────────────────────────────────────────────────

/// A forecast or history response from WeatherAPI (`forecast.json` / `history.json`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherPayload {
    pub location: Location,
    pub current: Current,
    pub forecast: Forecast,
    #[serde(default)]
    pub alerts: Option<Alerts>,
}

impl WeatherPayload {
    /// First forecast day, if the upstream honoured its non-empty contract.
    pub fn first_day(&self) -> Option<&ForecastDay> {
        self.forecast.forecastday.first()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub localtime: String,
}

/// Current conditions snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Current {
    #[serde(default)]
    pub temp_c: f64,
    #[serde(default)]
    pub feelslike_c: f64,
    /// 1 during daylight, 0 at night.
    #[serde(default)]
    pub is_day: i32,
    pub condition: Condition,
    #[serde(default)]
    pub wind_kph: f64,
    #[serde(default)]
    pub humidity: i32,
    #[serde(default)]
    pub uv: f64,
    #[serde(default)]
    pub air_quality: Option<AirQuality>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub text: String,
    #[serde(default)]
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirQuality {
    #[serde(default)]
    pub pm2_5: f64,
    #[serde(default)]
    pub o3: f64,
    #[serde(default)]
    pub co: f64,
    #[serde(default)]
    pub so2: f64,
    #[serde(default)]
    pub no2: f64,
    /// UK DEFRA band, 1 (low) to 10 (very high).
    #[serde(rename = "gb-defra-index", default)]
    pub gb_defra_index: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    #[serde(default)]
    pub forecastday: Vec<ForecastDay>,
}

/// One calendar day: summary, astronomy (with tides), and hourly rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    pub date: String,
    pub day: DaySummary,
    pub astro: Astro,
    #[serde(default)]
    pub hour: Vec<Hour>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DaySummary {
    #[serde(default)]
    pub maxtemp_c: f64,
    #[serde(default)]
    pub mintemp_c: f64,
    pub condition: Condition,
    #[serde(rename = "maxwave_m", default)]
    pub max_wave_m: Option<f64>,
    #[serde(default)]
    pub totalprecip_mm: Option<f64>,
    #[serde(default)]
    pub avgvis_km: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Astro {
    #[serde(default)]
    pub sunrise: String,
    #[serde(default)]
    pub sunset: String,
    #[serde(default)]
    pub moonrise: String,
    #[serde(default)]
    pub moonset: String,
    #[serde(default)]
    pub moon_phase: String,
    #[serde(default)]
    pub tide: Option<Vec<ApiTide>>,
}

/// One hourly row. `time` is local wall-clock time as `YYYY-MM-DD HH:MM`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hour {
    pub time: String,
    #[serde(default)]
    pub temp_c: f64,
    pub condition: Condition,
    #[serde(default)]
    pub chance_of_rain: i32,
    #[serde(default)]
    pub chance_of_snow: i32,
    #[serde(default)]
    pub wind_degree: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alerts {
    #[serde(default)]
    pub alert: Vec<AlertItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertItem {
    #[serde(default)]
    pub headline: String,
    #[serde(default)]
    pub event: String,
    #[serde(default)]
    pub desc: String,
}

/// Raw tide event. The height arrives as a string and may not be numeric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiTide {
    pub tide_time: String,
    pub tide_type: String,
    #[serde(default)]
    pub tide_height_mt: Option<String>,
}

// ── Derived marine data ───────────────────────────────────────────────

/// Nautical subset of a forecast day. Never fetched directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarineSummary {
    pub wave_height_m: f64,
    pub wind_dir_degree: i32,
    /// Non-empty, in upstream order.
    pub tides: Vec<Tide>,
    /// True when tide rows were dropped or wave/wind values were defaulted.
    pub partial: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tide {
    pub time: String,
    /// Upstream label, `HIGH` or `LOW`.
    pub kind: String,
    pub height_m: f64,
}
