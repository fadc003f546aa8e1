//! Renderer-facing derivations. Pure functions of a snapshot or payload.

use common::Tide;

use crate::state::ViewState;

/// Band of the UK DEFRA air-quality index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AqiLevel {
    Good,
    Moderate,
    High,
    VeryHigh,
    Unknown,
}

impl AqiLevel {
    pub fn from_defra_index(index: i32) -> Self {
        match index {
            1..=3 => AqiLevel::Good,
            4..=6 => AqiLevel::Moderate,
            7..=9 => AqiLevel::High,
            10 => AqiLevel::VeryHigh,
            _ => AqiLevel::Unknown,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AqiLevel::Good => "Good",
            AqiLevel::Moderate => "Moderate",
            AqiLevel::High => "High",
            AqiLevel::VeryHigh => "Very High",
            AqiLevel::Unknown => "Unknown",
        }
    }
}

/// Particle effect drawn behind the current conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeatherEffect {
    None,
    Rain,
    Snow,
}

impl WeatherEffect {
    pub fn from_condition(text: &str) -> Self {
        let text = text.to_lowercase();
        if text.contains("rain") {
            WeatherEffect::Rain
        } else if text.contains("snow") || text.contains("sleet") {
            WeatherEffect::Snow
        } else {
            WeatherEffect::None
        }
    }
}

/// Which top-level branch the home screen renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenPhase {
    Loading,
    Content,
    /// No data to fall back on; show the message.
    Error(String),
    /// Waiting for the location permission signal.
    Idle,
}

impl ScreenPhase {
    pub fn of(state: &ViewState) -> Self {
        if state.weather_data.is_some() {
            return ScreenPhase::Content;
        }
        if state.is_loading {
            return ScreenPhase::Loading;
        }
        match &state.error_message {
            Some(message) => ScreenPhase::Error(message.clone()),
            None => ScreenPhase::Idle,
        }
    }
}

/// Tide heights as points in the unit square, x by index, y = 0 at the
/// highest tide. The height range is at least 1 m so flat days stay flat.
pub fn tide_curve(tides: &[Tide]) -> Vec<(f64, f64)> {
    let Some(first) = tides.first() else {
        return Vec::new();
    };

    let (min, max) = tides.iter().fold((first.height_m, first.height_m), |(lo, hi), t| {
        (lo.min(t.height_m), hi.max(t.height_m))
    });
    let range = (max - min).max(1.0);
    let steps = (tides.len() - 1).max(1) as f64;

    tides
        .iter()
        .enumerate()
        .map(|(i, t)| (i as f64 / steps, 1.0 - (t.height_m - min) / range))
        .collect()
}
