//! Error types for the core crate.
//!
//! Only fatal conditions are represented here: a missing or mistyped
//! configuration value, or a violated precondition on a planning run.
//! Geometric skips (degenerate curves, unreachable poses) are expressed
//! as `Option` values by the components that encounter them.

use thiserror::Error;

/// Errors raised by core configuration and precondition checks.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A required configuration value is missing or has the wrong type.
    #[error("Configuration error at '{key}': {reason}")]
    Config { key: String, reason: String },

    /// A required collaborator or input is missing or uninitialized.
    #[error("Precondition failed: {0}")]
    Precondition(String),
}

impl Error {
    /// Shorthand for a configuration error at `key`.
    pub fn config(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Config {
            key: key.into(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::config("SafeLevel.AbsValue", "expected a number");
        assert_eq!(
            err.to_string(),
            "Configuration error at 'SafeLevel.AbsValue': expected a number"
        );

        let err = Error::Precondition("operation container is not initialized".to_string());
        assert_eq!(
            err.to_string(),
            "Precondition failed: operation container is not initialized"
        );
    }
}
