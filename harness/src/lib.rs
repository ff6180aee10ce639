//! Waypoint Harness: concrete worlds and scenario orchestration for the
//! search engine.
//!
//! Worlds provide domain data only (successors, step costs, state
//! validation); the engine owns the search. The runner turns a JSON
//! scenario into one search per heuristic and summarizes each run with a
//! report digest.

#![forbid(unsafe_code)]

pub mod error;
pub mod runner;
pub mod scenario;
pub mod worlds;

pub use error::{HarnessError, Result};
pub use runner::{run_scenario, run_scenario_file, ScenarioOutcome};
pub use scenario::{GridSpecV1, ScenarioV1};
