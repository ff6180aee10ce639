//! Core search node and path types.

/// A frontier entry: one push of a state with the costs known at push time.
///
/// The same state may be pushed several times as cheaper paths are found.
/// Older pushes become stale and are skipped on pop (lazy deletion), so a
/// node is never updated in place.
#[derive(Debug, Clone)]
pub struct SearchNode<S> {
    /// The state this entry refers to.
    pub state: S,
    /// Cost from start recorded when this entry was pushed.
    pub g_cost: f64,
    /// Heuristic estimate to the goal.
    pub h_cost: f64,
    /// Global push counter for deterministic tie-breaking.
    pub creation_order: u64,
}

impl<S> SearchNode<S> {
    /// Compute `f_cost = g_cost + h_cost` (the frontier ordering key).
    #[must_use]
    pub fn f_cost(&self) -> f64 {
        self.g_cost + self.h_cost
    }
}

/// A reconstructed path from start to goal, both inclusive.
#[derive(Debug, Clone, PartialEq)]
pub struct Path<S> {
    /// States in start → goal order. Never empty.
    pub states: Vec<S>,
    /// Sum of step costs along the path (the goal's recorded cost).
    pub cost: f64,
}

impl<S> Path<S> {
    /// Number of moves (states minus one).
    #[must_use]
    pub fn steps(&self) -> usize {
        self.states.len().saturating_sub(1)
    }

    #[must_use]
    pub fn start(&self) -> Option<&S> {
        self.states.first()
    }

    #[must_use]
    pub fn goal(&self) -> Option<&S> {
        self.states.last()
    }
}
