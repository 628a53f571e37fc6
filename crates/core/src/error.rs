//! Core error types for examboard operations.
//!
//! All errors are explicit, typed, and recoverable - no panics allowed.

use thiserror::Error;

/// Core error type for examboard operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    // Configuration errors
    #[error("invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    #[error("configuration parse error: {reason}")]
    ConfigParse { reason: String },

    // Geometry errors
    #[error("container has degenerate size {width}x{height}")]
    DegenerateSize { width: f64, height: f64 },

    // Timing errors
    #[error("invalid exam duration: {reason}")]
    InvalidDuration { reason: String },
}

impl Error {
    /// Create an invalid configuration error.
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }

    /// Create a configuration parse error.
    pub fn config_parse(reason: impl Into<String>) -> Self {
        Self::ConfigParse {
            reason: reason.into(),
        }
    }

    /// Create an invalid duration error.
    pub fn invalid_duration(reason: impl Into<String>) -> Self {
        Self::InvalidDuration {
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::config_parse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::invalid_config("min_scale must be positive");
        assert_eq!(
            err.to_string(),
            "invalid configuration: min_scale must be positive"
        );

        let err = Error::DegenerateSize {
            width: 0.0,
            height: 100.0,
        };
        assert_eq!(err.to_string(), "container has degenerate size 0x100");
    }

    #[test]
    fn test_json_error_conversion() {
        let parsed: std::result::Result<serde_json::Value, _> = serde_json::from_str("{");
        let Err(json_err) = parsed else {
            return;
        };
        let err = Error::from(json_err);
        assert!(matches!(err, Error::ConfigParse { .. }));
        assert!(err.to_string().starts_with("configuration parse error"));
    }
}
