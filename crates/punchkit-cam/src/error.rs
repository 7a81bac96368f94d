//! Error types for the CAM pipeline.
//!
//! Fatal conditions only: configuration and precondition failures, and
//! explicit error statuses from the external route-search service or
//! machine evaluator. Per-curve recognition failures and unreachable
//! items are `Option`-shaped and never escalate to these variants.

use thiserror::Error;

use crate::rotation::MachineError;
use crate::route::RouteError;

/// Errors that abort an entire planning run.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration or precondition failure from the core layer.
    #[error(transparent)]
    Core(#[from] punchkit_core::Error),

    /// The external route-search service reported an error status.
    #[error("Route search failed: {description}")]
    RouteSearch { description: String },

    /// The machine evaluator could not be initialized.
    #[error("Machine evaluator initialization failed: {description}")]
    MachineInit { description: String },
}

impl From<RouteError> for Error {
    fn from(err: RouteError) -> Self {
        Self::RouteSearch {
            description: err.to_string(),
        }
    }
}

impl From<MachineError> for Error {
    fn from(err: MachineError) -> Self {
        Self::MachineInit {
            description: err.to_string(),
        }
    }
}

/// Result type alias for CAM pipeline operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::RouteSearch {
            description: "no points submitted".to_string(),
        };
        assert_eq!(err.to_string(), "Route search failed: no points submitted");

        let err: Error = punchkit_core::Error::config("Punching.Pattern", "expected an integer").into();
        assert_eq!(
            err.to_string(),
            "Configuration error at 'Punching.Pattern': expected an integer"
        );

        let err: Error = MachineError("axis limits unavailable".to_string()).into();
        assert_eq!(
            err.to_string(),
            "Machine evaluator initialization failed: axis limits unavailable"
        );
    }
}
