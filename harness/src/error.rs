//! Harness error types.

use thiserror::Error;
use waypoint_search::error::SearchError;
use waypoint_search::report::CanonError;

/// Failure while building a world or running a scenario.
#[derive(Debug, Error)]
pub enum HarnessError {
    /// Grid text could not be parsed.
    #[error("grid parse error at line {line}: {detail}")]
    GridParse { line: usize, detail: String },

    /// A cell lies outside the grid it was applied to.
    #[error("cell ({row}, {col}) is outside a {height}x{width} grid")]
    OutOfBounds {
        row: i64,
        col: i64,
        height: usize,
        width: usize,
    },

    /// Grid dimensions overflow or exceed the cell cap.
    #[error("grid of {height}x{width} cells is too large")]
    GridTooLarge { height: usize, width: usize },

    /// Edge weight is negative, NaN or infinite.
    #[error("edge {from} -> {to} has invalid weight {weight}")]
    InvalidWeight { from: String, to: String, weight: f64 },

    /// Scenario document is structurally valid JSON but semantically unusable.
    #[error("invalid scenario: {0}")]
    Scenario(String),

    #[error("scenario I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("scenario JSON is malformed: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Search(#[from] SearchError),

    #[error(transparent)]
    Canon(#[from] CanonError),
}

pub type Result<T> = std::result::Result<T, HarnessError>;
