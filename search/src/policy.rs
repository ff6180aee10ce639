//! Search policy types.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::SearchError;

/// Search budget and tie-breaking configuration.
///
/// Every field has a default, so a policy document only needs to name the
/// options it changes:
///
/// ```json
/// {"tie_break": "deepest_first", "max_expansions": 5000}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchPolicyV1 {
    /// Secondary ordering among frontier entries with equal `f`.
    pub tie_break: TieBreakV1,
    /// Hard cap on expansions (goal-tested pops that were not stale).
    /// `None` means unbounded.
    pub max_expansions: Option<u64>,
    /// Wall-clock budget in milliseconds, measured from the start of the call.
    pub deadline_ms: Option<u64>,
}

impl SearchPolicyV1 {
    /// Reject options the engine cannot honour.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidPolicy`] for a zero expansion budget or a
    /// zero deadline.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.max_expansions == Some(0) {
            return Err(SearchError::InvalidPolicy {
                detail: "max_expansions must be at least 1 (use None for unbounded)".into(),
            });
        }
        if self.deadline_ms == Some(0) {
            return Err(SearchError::InvalidPolicy {
                detail: "deadline_ms must be at least 1 (use None for unbounded)".into(),
            });
        }
        Ok(())
    }

    /// Parse and validate a policy from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidPolicy`] if the document is malformed,
    /// names an unknown field, or fails [`SearchPolicyV1::validate`].
    pub fn from_json_str(json: &str) -> Result<Self, SearchError> {
        let policy: Self = serde_json::from_str(json).map_err(|e| SearchError::InvalidPolicy {
            detail: e.to_string(),
        })?;
        policy.validate()?;
        Ok(policy)
    }

    /// The wall-clock budget as a [`Duration`].
    #[must_use]
    pub fn deadline(&self) -> Option<Duration> {
        self.deadline_ms.map(Duration::from_millis)
    }
}

impl Default for SearchPolicyV1 {
    fn default() -> Self {
        Self {
            tie_break: TieBreakV1::Fifo,
            max_expansions: None,
            deadline_ms: None,
        }
    }
}

/// Tie-breaking rule among frontier entries with equal `f = g + h`.
///
/// Every rule falls back to insertion order, so the frontier is always
/// totally ordered and runs are reproducible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreakV1 {
    /// Older entries first.
    #[default]
    Fifo,
    /// Newer entries first.
    Lifo,
    /// Larger `g` first (closer to the goal along the current estimate), then FIFO.
    DeepestFirst,
    /// Smaller state under the state's total order first, then FIFO.
    StateOrder,
}

impl TieBreakV1 {
    /// Stable identifier used in reports.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Fifo => "fifo",
            Self::Lifo => "lifo",
            Self::DeepestFirst => "deepest_first",
            Self::StateOrder => "state_order",
        }
    }
}
