//! Home-screen state controller.
//!
//! Owns the single `ViewState` snapshot, orchestrates fetches against a
//! `WeatherSource`, and derives hour selection and marine data.

pub mod clock;
pub mod controller;
pub mod derive;
pub mod presentation;
pub mod state;

#[cfg(test)]
mod testing;

pub use clock::{Clock, FixedClock, SystemClock};
pub use controller::StateController;
pub use derive::{clamp_progress, extract_marine_summary, find_current_hour_index, timeline_date};
pub use presentation::{tide_curve, AqiLevel, ScreenPhase, WeatherEffect};
pub use state::{AppMode, ViewState, HISTORICAL_HOUR_INDEX, TIMELINE_SPAN_DAYS};
