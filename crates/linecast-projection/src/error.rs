//! Error types for the projection crate.
//!
//! Problems confined to one node are not errors; they are reported as
//! [`Diagnostic`](crate::Diagnostic)s and projection carries on.

/// Errors that abort a whole projection.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ProjectionError {
    /// The tree marks more lines than the configured limit allows.
    #[error("change tree marks more than {limit} lines")]
    TooManyLines { limit: usize },
}

/// Convenience alias for projection results.
pub type ProjectionResult<T> = Result<T, ProjectionError>;
