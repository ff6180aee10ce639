//! `SearchReportV1`: canonical, hashable summary of one search run.
//!
//! The report is the diagnostic surface handed to renderers (cost heat maps,
//! path overlays) and the artifact compared across runs and processes.
//!
//! # Canonical form
//!
//! 1. Object keys sorted lexicographically (byte order), at every depth.
//! 2. Compact separators, no whitespace.
//! 3. Integers only. Costs are carried as fixed six-decimal strings so float
//!    formatting can never differ between platforms.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::contract::SearchState;
use crate::policy::SearchPolicyV1;
use crate::search::{SearchResult, SearchStats};

/// Domain prefix mixed into report digests.
pub const DOMAIN_SEARCH_REPORT: &[u8] = b"WAYPOINT::SEARCH_REPORT::V1\0";

/// Error type for canonical report serialization.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CanonError {
    /// A JSON number was not an integer (float, NaN, Infinity).
    #[error("non-integer number in canonical JSON: {raw}")]
    NonIntegerNumber { raw: String },
    /// The report could not be converted to a JSON value.
    #[error("report serialization failed: {detail}")]
    Serialize { detail: String },
}

/// One discovery-table row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveredStateV1 {
    pub state: String,
    pub cost: String,
    pub predecessor: Option<String>,
    /// Moves from start along the final predecessor chain.
    pub depth: Option<usize>,
}

/// Canonical summary of a [`SearchResult`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchReportV1 {
    pub termination: String,
    pub tie_break: String,
    pub max_expansions: Option<u64>,
    pub deadline_ms: Option<u64>,
    pub path: Option<Vec<String>>,
    pub path_cost: Option<String>,
    pub stats: SearchStats,
    /// Rows in state order.
    pub discovered: Vec<DiscoveredStateV1>,
}

/// Fixed-precision cost rendering used throughout the report.
#[must_use]
pub fn format_cost(cost: f64) -> String {
    format!("{cost:.6}")
}

impl SearchReportV1 {
    /// Build a report, rendering states with `label`.
    ///
    /// `label` must be injective over the states of one run, otherwise rows
    /// become ambiguous.
    pub fn from_result<S, L>(result: &SearchResult<S>, policy: &SearchPolicyV1, label: L) -> Self
    where
        S: SearchState,
        L: Fn(&S) -> String,
    {
        let path = result
            .path
            .as_ref()
            .map(|p| p.states.iter().map(&label).collect::<Vec<_>>());
        let discovered = result
            .table
            .iter()
            .map(|(state, rec)| DiscoveredStateV1 {
                state: label(state),
                cost: format_cost(rec.cost),
                predecessor: rec.predecessor.as_ref().map(&label),
                depth: result.table.depth_of(state),
            })
            .collect();

        Self {
            termination: result.termination.as_str().to_string(),
            tie_break: policy.tie_break.as_str().to_string(),
            max_expansions: policy.max_expansions,
            deadline_ms: policy.deadline_ms,
            path,
            path_cost: result.path.as_ref().map(|p| format_cost(p.cost)),
            stats: result.stats,
            discovered,
        }
    }

    /// Build a report labelling states with their `Debug` rendering.
    pub fn from_result_debug<S: SearchState>(
        result: &SearchResult<S>,
        policy: &SearchPolicyV1,
    ) -> Self {
        Self::from_result(result, policy, |s| format!("{s:?}"))
    }

    /// Serialize the report to canonical JSON bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CanonError`] if serialization fails or a float slipped into
    /// the document.
    pub fn to_canonical_json_bytes(&self) -> Result<Vec<u8>, CanonError> {
        let value = serde_json::to_value(self).map_err(|e| CanonError::Serialize {
            detail: e.to_string(),
        })?;
        canonical_json_bytes(&value)
    }

    /// Content digest of the canonical bytes: `"sha256:<hex>"`.
    ///
    /// # Errors
    ///
    /// Propagates [`SearchReportV1::to_canonical_json_bytes`] failures.
    pub fn digest(&self) -> Result<String, CanonError> {
        let bytes = self.to_canonical_json_bytes()?;
        let mut hasher = Sha256::new();
        hasher.update(DOMAIN_SEARCH_REPORT);
        hasher.update(&bytes);
        Ok(format!("sha256:{}", hex::encode(hasher.finalize())))
    }
}

/// Produce canonical JSON bytes from a `serde_json::Value`.
///
/// # Errors
///
/// Returns [`CanonError::NonIntegerNumber`] if any number is not
/// representable as `i64` or `u64`.
pub fn canonical_json_bytes(value: &serde_json::Value) -> Result<Vec<u8>, CanonError> {
    let mut out = String::new();
    write_value(&mut out, value)?;
    Ok(out.into_bytes())
}

fn write_value(out: &mut String, value: &serde_json::Value) -> Result<(), CanonError> {
    match value {
        serde_json::Value::Null => out.push_str("null"),
        serde_json::Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                let _ = write!(out, "{i}");
            } else if let Some(u) = n.as_u64() {
                let _ = write!(out, "{u}");
            } else {
                return Err(CanonError::NonIntegerNumber { raw: n.to_string() });
            }
        }
        serde_json::Value::String(s) => write_string(out, s),
        serde_json::Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_value(out, item)?;
            }
            out.push(']');
        }
        serde_json::Value::Object(map) => {
            let mut entries: Vec<(&String, &serde_json::Value)> = map.iter().collect();
            entries.sort_by(|a, b| a.0.as_bytes().cmp(b.0.as_bytes()));
            out.push('{');
            for (i, (key, item)) in entries.into_iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_string(out, key);
                out.push(':');
                write_value(out, item)?;
            }
            out.push('}');
        }
    }
    Ok(())
}

fn write_string(out: &mut String, s: &str) {
    out.push('"');
    for ch in s.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c < '\u{0020}' => {
                let _ = write!(out, "\\u{:04x}", u32::from(c));
            }
            c => out.push(c),
        }
    }
    out.push('"');
}
