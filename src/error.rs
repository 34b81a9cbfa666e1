//! Error taxonomy for chain calls and form handling.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DashboardError {
    /// Malformed recipient or amount; shown next to the form.
    #[error("{0}")]
    Validation(String),

    /// Signing rejected or the send call failed.
    #[error("{0}")]
    Submission(String),

    /// Balance fetch or receipt poll failed.
    #[error("{0}")]
    Network(String),

    /// The JS chain client, or one of its methods, is missing.
    #[error("Chain client unavailable: {0}")]
    Unavailable(String),
}

pub type Result<T> = std::result::Result<T, DashboardError>;
