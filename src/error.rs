//! Library error type.

use thiserror::Error;

/// Errors surfaced by the simulation and the catalog loader.
///
/// Invalid numeric input and unknown instance ids are not errors: the
/// former is coerced to zero and the latter is a silent no-op.
#[derive(Error, Debug)]
pub enum SimError {
    /// No catalog entry with this key.
    #[error("unknown object type: {0}")]
    UnknownCategory(String),

    /// Catalog document failed to parse.
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SimError>;
