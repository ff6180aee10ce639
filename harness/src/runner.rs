//! Scenario runner: builds the grid, runs one search per heuristic and
//! summarizes each run.
//!
//! # Pipeline
//!
//! ```text
//! validate() → grid.build() → GridWorld
//!   → [search() → SearchReportV1 → digest()] × heuristics
//! ```

use std::path::Path;

use serde::Serialize;
use waypoint_search::heuristic::{Heuristic, HeuristicKindV1, Weighted};
use waypoint_search::report::{format_cost, SearchReportV1};
use waypoint_search::search::{search, SearchResult, TerminationReasonV1};

use crate::error::Result;
use crate::scenario::ScenarioV1;
use crate::worlds::grid::{Cell, Grid, GridWorld};

/// Summary of one search inside a scenario.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioOutcome {
    pub heuristic: HeuristicKindV1,
    pub termination: TerminationReasonV1,
    pub path: Option<Vec<Cell>>,
    pub cost: Option<f64>,
    pub expansions: u64,
    /// Size of the discovery table.
    pub discovered: usize,
    /// Digest of the canonical [`SearchReportV1`].
    pub digest: String,
}

impl ScenarioOutcome {
    /// `key=value` lines in a fixed order, for fixtures and logs.
    #[must_use]
    pub fn summary_lines(&self) -> Vec<String> {
        let h = self.heuristic.as_str();
        vec![
            format!("{h}.termination={}", self.termination.as_str()),
            format!(
                "{h}.path_len={}",
                self.path
                    .as_ref()
                    .map_or_else(|| "none".to_string(), |p| p.len().saturating_sub(1).to_string())
            ),
            format!(
                "{h}.cost={}",
                self.cost.map_or_else(|| "none".to_string(), format_cost)
            ),
            format!("{h}.expansions={}", self.expansions),
            format!("{h}.discovered={}", self.discovered),
            format!("{h}.report_digest={}", self.digest),
        ]
    }
}

/// Run every heuristic of `scenario`.
///
/// # Errors
///
/// Scenario validation, grid construction, invalid endpoints
/// ([`crate::error::HarnessError::Search`]) or report canonicalization.
/// A search that finds no path is an outcome, not an error.
pub fn run_scenario(scenario: &ScenarioV1) -> Result<Vec<ScenarioOutcome>> {
    scenario.validate()?;
    let grid = scenario.grid.build()?;
    tracing::debug!(
        scenario = scenario.display_name(),
        height = grid.height(),
        width = grid.width(),
        start = %scenario.start,
        goal = %scenario.goal,
        "running scenario"
    );

    scenario
        .heuristics
        .iter()
        .map(|&kind| run_one(scenario, &grid, kind))
        .collect()
}

/// Load a scenario file and run it.
///
/// # Errors
///
/// See [`ScenarioV1::load`] and [`run_scenario`].
pub fn run_scenario_file(path: impl AsRef<Path>) -> Result<Vec<ScenarioOutcome>> {
    let scenario = ScenarioV1::load(path)?;
    run_scenario(&scenario)
}

fn run_one(scenario: &ScenarioV1, grid: &Grid, kind: HeuristicKindV1) -> Result<ScenarioOutcome> {
    let world = GridWorld::new(grid, scenario.connectivity);
    let weighted;
    let heuristic: &dyn Heuristic<Cell> = match scenario.weight {
        Some(w) => {
            weighted = Weighted::new(kind, w);
            &weighted
        }
        None => &kind,
    };

    let result = search(
        scenario.start,
        scenario.goal,
        &world,
        heuristic,
        &scenario.policy,
    )
    .inspect_err(|e| {
        tracing::warn!(scenario = scenario.display_name(), error = %e, "scenario rejected");
    })?;

    let digest = SearchReportV1::from_result(&result, &scenario.policy, Cell::to_string).digest()?;
    let outcome = outcome_from(kind, &result, digest);

    if outcome.path.is_none() {
        tracing::warn!(
            scenario = scenario.display_name(),
            heuristic = kind.as_str(),
            termination = outcome.termination.as_str(),
            "no path"
        );
    }
    Ok(outcome)
}

fn outcome_from(
    heuristic: HeuristicKindV1,
    result: &SearchResult<Cell>,
    digest: String,
) -> ScenarioOutcome {
    ScenarioOutcome {
        heuristic,
        termination: result.termination,
        path: result.path.as_ref().map(|p| p.states.clone()),
        cost: result.path.as_ref().map(|p| p.cost),
        expansions: result.stats.expansions,
        discovered: result.table.len(),
        digest,
    }
}
