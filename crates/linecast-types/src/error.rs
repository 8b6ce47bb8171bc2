use thiserror::Error;

/// Errors produced while reading or interpreting a change tree.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TreeError {
    #[error("invalid line range: end {end} precedes start {start}")]
    InvalidRange { start: usize, end: usize },

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Convenience alias for change tree results.
pub type TreeResult<T> = Result<T, TreeError>;
