//! Typed search errors.
//!
//! `SearchError` represents pre-flight failures only. Runtime terminations
//! (no path, cancellation, budget exhaustion, contract violations) are
//! expressed via [`crate::search::TerminationReasonV1`] and always come back
//! inside a [`crate::search::SearchResult`] with the discovery table intact.

use thiserror::Error;

/// Which endpoint of a search request failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateRole {
    Start,
    Goal,
}

impl std::fmt::Display for StateRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Start => f.write_str("start"),
            Self::Goal => f.write_str("goal"),
        }
    }
}

/// Typed failure for pre-flight search validation.
///
/// These errors are returned before the first frontier pop. No discovery
/// table is produced because no search steps were taken.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// Start or goal is outside the domain (out of bounds, on an obstacle, unknown node).
    #[error("invalid {role} state: {detail}")]
    InvalidState { role: StateRole, detail: String },

    /// The search policy carries an unusable option.
    #[error("invalid search policy: {detail}")]
    InvalidPolicy { detail: String },
}
