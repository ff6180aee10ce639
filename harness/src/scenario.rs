//! Scenario documents: a grid, endpoints, heuristics and a search policy.
//!
//! ```json
//! {
//!   "name": "corridor",
//!   "grid": { "rows": ["....", ".##.", "...."] },
//!   "start": [0, 0],
//!   "goal": [2, 3],
//!   "connectivity": "four",
//!   "heuristics": ["manhattan", "euclidean"],
//!   "policy": { "tie_break": "fifo", "max_expansions": 1000 }
//! }
//! ```
//!
//! `grid` may also be `{"obstacles": {"height", "width", "cells"}}` or the
//! string `"reference_labyrinth"`.

use std::path::Path;

use serde::{Deserialize, Serialize};
use waypoint_search::heuristic::HeuristicKindV1;
use waypoint_search::policy::SearchPolicyV1;

use crate::error::{HarnessError, Result};
use crate::worlds::grid::{Cell, Connectivity, Grid};
use crate::worlds::labyrinth::reference_labyrinth;

/// Where a scenario's grid comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub enum GridSpecV1 {
    /// Text rows, `.` free and `#` blocked.
    Rows(Vec<String>),
    /// Dimensions plus an explicit obstacle list.
    Obstacles {
        height: usize,
        width: usize,
        cells: Vec<Cell>,
    },
    ReferenceLabyrinth,
}

impl GridSpecV1 {
    /// Materialize the grid.
    ///
    /// # Errors
    ///
    /// Grid parse or out-of-bounds obstacle errors.
    pub fn build(&self) -> Result<Grid> {
        match self {
            Self::Rows(rows) => Grid::from_ascii(&rows.join("\n")),
            Self::Obstacles {
                height,
                width,
                cells,
            } => Grid::with_obstacles(*height, *width, cells.iter().copied()),
            Self::ReferenceLabyrinth => reference_labyrinth(),
        }
    }
}

fn default_heuristics() -> Vec<HeuristicKindV1> {
    vec![HeuristicKindV1::Manhattan]
}

/// A runnable scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioV1 {
    #[serde(default)]
    pub name: Option<String>,
    pub grid: GridSpecV1,
    pub start: Cell,
    pub goal: Cell,
    #[serde(default)]
    pub connectivity: Connectivity,
    /// One search is run per entry, in order.
    #[serde(default = "default_heuristics")]
    pub heuristics: Vec<HeuristicKindV1>,
    /// Inflation factor for weighted A*. Must be finite and at least 1.
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub policy: SearchPolicyV1,
}

impl ScenarioV1 {
    /// Scenario with the default connectivity, heuristic and policy.
    #[must_use]
    pub fn new(grid: GridSpecV1, start: Cell, goal: Cell) -> Self {
        Self {
            name: None,
            grid,
            start,
            goal,
            connectivity: Connectivity::default(),
            heuristics: default_heuristics(),
            weight: None,
            policy: SearchPolicyV1::default(),
        }
    }

    /// The reference labyrinth, 4-connected, with the given heuristics.
    #[must_use]
    pub fn reference(heuristics: Vec<HeuristicKindV1>) -> Self {
        Self {
            name: Some("reference_labyrinth".into()),
            heuristics,
            ..Self::new(
                GridSpecV1::ReferenceLabyrinth,
                crate::worlds::LABYRINTH_START,
                crate::worlds::LABYRINTH_GOAL,
            )
        }
    }

    /// Parse and validate a scenario document.
    ///
    /// # Errors
    ///
    /// Malformed JSON or a failed [`ScenarioV1::validate`].
    pub fn from_json_str(json: &str) -> Result<Self> {
        let scenario: Self = serde_json::from_str(json)?;
        scenario.validate()?;
        Ok(scenario)
    }

    /// Read, parse and validate a scenario file.
    ///
    /// # Errors
    ///
    /// I/O failure or any [`ScenarioV1::from_json_str`] error.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&text)
    }

    /// Checks that don't need the grid.
    ///
    /// # Errors
    ///
    /// [`HarnessError::Scenario`] for an empty heuristic list or a bad
    /// weight; [`HarnessError::Search`] for an invalid policy.
    pub fn validate(&self) -> Result<()> {
        if self.heuristics.is_empty() {
            return Err(HarnessError::Scenario("heuristics list is empty".into()));
        }
        if let Some(w) = self.weight {
            if !w.is_finite() || w < 1.0 {
                return Err(HarnessError::Scenario(format!(
                    "weight must be finite and >= 1, got {w}"
                )));
            }
        }
        self.policy.validate()?;
        Ok(())
    }

    /// Label used in logs.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("unnamed")
    }
}
