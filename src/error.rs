//! Error types for ruql compilation.

use thiserror::Error;

use crate::binder::BindError;

/// Result type alias using [`RuqlError`].
pub type Result<T> = std::result::Result<T, RuqlError>;

/// Error types for ruql compilation.
#[derive(Debug, Error)]
pub enum RuqlError {
    /// Binding error (semantic analysis).
    #[error("Bind error: {0}")]
    Bind(#[from] BindError),

    /// Catalog lookup failure (unknown function, unknown collation).
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// Value conversion failure.
    #[error("Conversion error: {0}")]
    Conversion(String),
}

impl RuqlError {
    /// Returns true if binding should be retried once all argument types
    /// are known, rather than reported to the user.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, RuqlError::Bind(e) if e.is_retryable())
    }

    /// Returns true for internal invariant violations that indicate a
    /// defect in function declarations or caller wiring, as opposed to an
    /// error in the statement being compiled.
    #[must_use]
    pub fn is_internal(&self) -> bool {
        matches!(self, RuqlError::Bind(e) if e.is_internal())
    }
}
