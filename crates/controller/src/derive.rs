//! Pure derivations from fetched payloads.
//!
//! Parse failures here are absorbed: a bad timestamp never matches, and a
//! tide row without a numeric height is dropped.

use chrono::{Duration, NaiveDate, NaiveDateTime, Timelike};
use common::{Error, ForecastDay, Hour, MarineSummary, Tide};
use tracing::debug;

use crate::state::TIMELINE_SPAN_DAYS;

const HOUR_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Index of the first hour whose hour-of-day equals `now`'s, or 0.
pub fn find_current_hour_index(hours: &[Hour], now: NaiveDateTime) -> usize {
    hours
        .iter()
        .position(|hour| {
            NaiveDateTime::parse_from_str(&hour.time, HOUR_TIME_FORMAT)
                .map(|t| t.hour() == now.hour())
                .unwrap_or(false)
        })
        .unwrap_or(0)
}

fn parse_height(raw: Option<&str>) -> Result<f64, Error> {
    let raw = raw.ok_or_else(|| Error::Parse("missing tide height".into()))?;
    raw.parse::<f64>()
        .ok()
        .filter(|h| h.is_finite())
        .ok_or_else(|| Error::Parse(format!("tide height {raw:?} is not a finite number")))
}

/// Marine view of one forecast day, or `None` when it has no usable tides.
pub fn extract_marine_summary(day: &ForecastDay) -> Option<MarineSummary> {
    let raw_tides = day.astro.tide.as_deref().unwrap_or(&[]);

    let tides: Vec<Tide> = raw_tides
        .iter()
        .filter_map(|raw| match parse_height(raw.tide_height_mt.as_deref()) {
            Ok(height_m) => Some(Tide {
                time: raw.tide_time.clone(),
                kind: raw.tide_type.clone(),
                height_m,
            }),
            Err(e) => {
                debug!("Dropping tide at {}: {}", raw.tide_time, e);
                None
            }
        })
        .collect();

    if tides.is_empty() {
        return None;
    }

    let wave = day.day.max_wave_m;
    let wind = day.hour.first().and_then(|h| h.wind_degree);
    let partial = tides.len() < raw_tides.len() || wave.is_none() || wind.is_none();

    Some(MarineSummary {
        wave_height_m: wave.unwrap_or(0.0),
        wind_dir_degree: wind.unwrap_or(0),
        tides,
        partial,
    })
}

/// Clamp a scrubber position into `[0, 1]`. NaN parks at 0.
pub fn clamp_progress(progress: f32) -> f32 {
    if progress.is_nan() {
        0.0
    } else {
        progress.clamp(0.0, 1.0)
    }
}

/// Date selected by a scrubber position: `today - round(progress * 365)` days.
pub fn timeline_date(today: NaiveDate, progress: f32) -> NaiveDate {
    let days_ago = (f64::from(clamp_progress(progress)) * TIMELINE_SPAN_DAYS as f64).round() as i64;
    today - Duration::days(days_ago)
}
