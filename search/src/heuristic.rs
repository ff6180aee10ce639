//! Heuristic trait and the reference distance estimates.
//!
//! Optimality holds only for admissible heuristics (never overestimate the
//! remaining cost). The early goal exit additionally relies on consistency:
//! `h(a) <= cost(a, b) + h(b)` for every edge. Neither property is checked at
//! runtime; pick the estimate that matches the domain's movement model.
//!
//! | Heuristic | 4-connected, unit cost | 8-connected, diagonal √2 |
//! |---|---|---|
//! | [`Manhattan`] | consistent (exact without obstacles) | overestimates |
//! | [`Euclidean`] | consistent, weaker | consistent, weaker |
//! | [`Octile`] | consistent, weaker | consistent (exact without obstacles) |
//! | [`Chebyshev`] | consistent, weaker | consistent, weaker |
//! | [`ZeroHeuristic`] | consistent (Dijkstra) | consistent (Dijkstra) |

#![allow(clippy::cast_precision_loss)]

use serde::{Deserialize, Serialize};

/// Estimate of the remaining cost from `state` to `goal`.
///
/// Must return a finite, non-negative value. The engine terminates with
/// [`crate::search::TerminationReasonV1::HeuristicContractViolation`] otherwise.
pub trait Heuristic<S> {
    fn estimate(&self, state: &S, goal: &S) -> f64;
}

impl<S, F> Heuristic<S> for F
where
    F: Fn(&S, &S) -> f64,
{
    fn estimate(&self, state: &S, goal: &S) -> f64 {
        self(state, goal)
    }
}

/// States that sit on an integer plane, addressed as `(row, col)`.
pub trait PlanarState {
    fn coords(&self) -> (i64, i64);
}

impl PlanarState for (i64, i64) {
    fn coords(&self) -> (i64, i64) {
        *self
    }
}

impl PlanarState for (i32, i32) {
    fn coords(&self) -> (i64, i64) {
        (i64::from(self.0), i64::from(self.1))
    }
}

fn deltas<S: PlanarState>(state: &S, goal: &S) -> (f64, f64) {
    let (r0, c0) = state.coords();
    let (r1, c1) = goal.coords();
    (r0.abs_diff(r1) as f64, c0.abs_diff(c1) as f64)
}

/// `|Δr| + |Δc|`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Manhattan;

impl<S: PlanarState> Heuristic<S> for Manhattan {
    fn estimate(&self, state: &S, goal: &S) -> f64 {
        let (dr, dc) = deltas(state, goal);
        dr + dc
    }
}

/// `sqrt(Δr² + Δc²)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Euclidean;

impl<S: PlanarState> Heuristic<S> for Euclidean {
    fn estimate(&self, state: &S, goal: &S) -> f64 {
        let (dr, dc) = deltas(state, goal);
        dr.hypot(dc)
    }
}

/// Straight moves plus `√2` diagonals: `max + (√2 - 1) · min`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Octile;

impl<S: PlanarState> Heuristic<S> for Octile {
    fn estimate(&self, state: &S, goal: &S) -> f64 {
        let (dr, dc) = deltas(state, goal);
        dr.max(dc) + (std::f64::consts::SQRT_2 - 1.0) * dr.min(dc)
    }
}

/// `max(|Δr|, |Δc|)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Chebyshev;

impl<S: PlanarState> Heuristic<S> for Chebyshev {
    fn estimate(&self, state: &S, goal: &S) -> f64 {
        let (dr, dc) = deltas(state, goal);
        dr.max(dc)
    }
}

/// Always zero. Turns the engine into uniform-cost search (Dijkstra).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ZeroHeuristic;

impl<S> Heuristic<S> for ZeroHeuristic {
    fn estimate(&self, _state: &S, _goal: &S) -> f64 {
        0.0
    }
}

/// Inflates an inner heuristic by `weight` (weighted A*).
///
/// With `weight > 1` the estimate is no longer admissible: paths are found
/// faster but may cost up to `weight` times the optimum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Weighted<H> {
    pub inner: H,
    pub weight: f64,
}

impl<H> Weighted<H> {
    #[must_use]
    pub fn new(inner: H, weight: f64) -> Self {
        Self { inner, weight }
    }
}

impl<S, H: Heuristic<S>> Heuristic<S> for Weighted<H> {
    fn estimate(&self, state: &S, goal: &S) -> f64 {
        self.weight * self.inner.estimate(state, goal)
    }
}

/// Configuration-selectable heuristic for planar states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeuristicKindV1 {
    Manhattan,
    Euclidean,
    Octile,
    Chebyshev,
    Zero,
}

impl HeuristicKindV1 {
    /// Stable identifier used in reports and scenario files.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Manhattan => "manhattan",
            Self::Euclidean => "euclidean",
            Self::Octile => "octile",
            Self::Chebyshev => "chebyshev",
            Self::Zero => "zero",
        }
    }
}

impl<S: PlanarState> Heuristic<S> for HeuristicKindV1 {
    fn estimate(&self, state: &S, goal: &S) -> f64 {
        match self {
            Self::Manhattan => Manhattan.estimate(state, goal),
            Self::Euclidean => Euclidean.estimate(state, goal),
            Self::Octile => Octile.estimate(state, goal),
            Self::Chebyshev => Chebyshev.estimate(state, goal),
            Self::Zero => 0.0,
        }
    }
}
