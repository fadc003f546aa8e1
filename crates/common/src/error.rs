//! Unified error type for Atmosphere.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Transport or connectivity failure, including timeouts.
    #[error("Network error: {0}")]
    Network(String),

    /// Non-2xx status or a body that could not be decoded.
    #[error("Weather API error (status={status}): {message}")]
    Api { status: u16, message: String },

    /// Malformed timestamp or numeric field inside a payload.
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Config error: {0}")]
    Config(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Result;

    fn reject(status: u16) -> Result<()> {
        Err(Error::Api {
            status,
            message: "No matching location found.".into(),
        })
    }

    #[test]
    fn test_display_is_user_facing() {
        let err = reject(400).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Weather API error (status=400): No matching location found."
        );
        assert_eq!(
            Error::Network("timed out".into()).to_string(),
            "Network error: timed out"
        );
    }
}
