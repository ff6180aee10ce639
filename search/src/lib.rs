//! Waypoint Search: deterministic A* over caller-supplied domains.
//!
//! The engine is generic over the state type and knows nothing about grids
//! or maps. A domain supplies successors and step costs, a heuristic supplies
//! lower-bound estimates, and the engine returns a path (or a reason why
//! there is none) together with the full discovery table.
//!
//! # Crate dependency graph
//!
//! ```text
//! waypoint_search  ←  waypoint_harness  ←  lock_tests
//! (engine, frontier)   (worlds, scenarios)   (fixture, lock tests)
//! ```
//!
//! # Key types
//!
//! - [`SearchDomain`]: successor function and state validation
//! - [`Heuristic`]: remaining-cost estimate ([`Manhattan`], [`Euclidean`], ...)
//! - [`SearchPolicyV1`]: tie-breaking and budgets
//! - [`SearchResult`]: termination reason, path, discovery table, stats
//! - [`SearchReportV1`]: canonical JSON summary with a content digest
//!
//! # Example
//!
//! ```
//! use waypoint_search::{search, Manhattan, SearchDomain, SearchPolicyV1};
//!
//! /// Unbounded 4-connected plane.
//! struct Plane;
//!
//! impl SearchDomain for Plane {
//!     type State = (i64, i64);
//!
//!     fn neighbors(&self, &(r, c): &(i64, i64)) -> Vec<((i64, i64), f64)> {
//!         vec![((r - 1, c), 1.0), ((r + 1, c), 1.0), ((r, c - 1), 1.0), ((r, c + 1), 1.0)]
//!     }
//! }
//!
//! let result = search((0, 0), (2, 3), &Plane, &Manhattan, &SearchPolicyV1::default()).unwrap();
//! assert_eq!(result.path.unwrap().steps(), 5);
//! ```

#![forbid(unsafe_code)]

pub mod contract;
pub mod discovery;
pub mod error;
pub mod frontier;
pub mod heuristic;
pub mod hooks;
pub mod node;
pub mod policy;
pub mod report;
pub mod search;

pub use contract::{ExactGoal, GoalTest, SearchDomain, SearchState};
pub use discovery::{DiscoveryRecord, DiscoveryTable};
pub use error::{SearchError, StateRole};
pub use heuristic::{
    Chebyshev, Euclidean, Heuristic, HeuristicKindV1, Manhattan, Octile, PlanarState, Weighted,
    ZeroHeuristic,
};
pub use hooks::{CancelToken, NoopObserver, SearchHooks, SearchObserver};
pub use node::Path;
pub use policy::{SearchPolicyV1, TieBreakV1};
pub use report::SearchReportV1;
pub use search::{
    reconstruct_path, search, search_with, SearchResult, SearchStats, TerminationReasonV1,
};
