//! Error types for the overlay crates.

use thiserror::Error;

/// Result type alias using AtmoError.
pub type AtmoResult<T> = Result<T, AtmoError>;

/// Primary error type for configuration, time and tile handling.
///
/// Sampling gaps are not errors: a coordinate outside a field or a
/// missing measurement is reported as NoData by the field itself, and a
/// layer without data renders transparent.
#[derive(Debug, Error)]
pub enum AtmoError {
    // === Configuration Errors ===
    #[error("Invalid configuration for '{field}': {message}")]
    InvalidConfig { field: String, message: String },

    #[error("Unknown level: {0}")]
    UnknownLevel(String),

    #[error("Invalid time: {0}")]
    InvalidTime(String),

    // === Infrastructure Errors ===
    #[error("I/O error: {0}")]
    Io(String),
}

impl AtmoError {
    /// Shorthand for an [`AtmoError::InvalidConfig`].
    pub fn invalid_config(field: impl Into<String>, message: impl Into<String>) -> Self {
        AtmoError::InvalidConfig {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for AtmoError {
    fn from(err: std::io::Error) -> Self {
        AtmoError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for AtmoError {
    fn from(err: serde_json::Error) -> Self {
        AtmoError::invalid_config("json", err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_error_maps_to_config() {
        let err: AtmoError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(err, AtmoError::InvalidConfig { .. }));
    }
}
