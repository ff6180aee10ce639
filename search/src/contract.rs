//! Search domain contract traits.

use std::fmt::Debug;

/// A state in the search space.
///
/// States are opaque to the engine apart from equality and a total order.
/// The order keys the discovery table (deterministic iteration at report
/// boundaries) and backs [`crate::policy::TieBreakV1::StateOrder`].
pub trait SearchState: Clone + Ord + Debug {}

impl<T: Clone + Ord + Debug> SearchState for T {}

/// Trait for domains the engine can search.
///
/// # Contract
///
/// - `neighbors` must be a pure function of its input: same state, same
///   successors in the same order.
/// - Step costs must be finite and non-negative. The engine terminates with
///   [`crate::search::TerminationReasonV1::AdapterContractViolation`] otherwise.
/// - A state with no successors yields an empty vector, not an error.
pub trait SearchDomain {
    type State: SearchState;

    /// Enumerate `(successor, step_cost)` pairs reachable from `state`.
    fn neighbors(&self, state: &Self::State) -> Vec<(Self::State, f64)>;

    /// Check that `state` belongs to the domain.
    ///
    /// Called on the start and goal before search begins. The default
    /// accepts every state.
    ///
    /// # Errors
    ///
    /// Returns a human-readable reason when the state is outside the domain.
    fn validate_state(&self, state: &Self::State) -> Result<(), String> {
        let _ = state;
        Ok(())
    }
}

impl<D: SearchDomain + ?Sized> SearchDomain for &D {
    type State = D::State;

    fn neighbors(&self, state: &Self::State) -> Vec<(Self::State, f64)> {
        (**self).neighbors(state)
    }

    fn validate_state(&self, state: &Self::State) -> Result<(), String> {
        (**self).validate_state(state)
    }
}

/// Goal predicate evaluated on every popped state.
pub trait GoalTest<S> {
    fn is_goal(&self, state: &S) -> bool;
}

impl<S, F> GoalTest<S> for F
where
    F: Fn(&S) -> bool,
{
    fn is_goal(&self, state: &S) -> bool {
        self(state)
    }
}

/// Default goal test: equality with a single target state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExactGoal<S>(pub S);

impl<S: PartialEq> GoalTest<S> for ExactGoal<S> {
    fn is_goal(&self, state: &S) -> bool {
        *state == self.0
    }
}
