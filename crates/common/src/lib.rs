//! Shared types, config, and error definitions for Atmosphere.

pub mod config;
pub mod error;
pub mod source;
pub mod types;

pub use config::AppConfig;
pub use error::Error;
pub use source::{WeatherSource, AUTO_IP};
pub use types::*;

/// Convenience Result alias.
pub type Result<T> = std::result::Result<T, Error>;
