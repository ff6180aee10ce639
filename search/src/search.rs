//! Search entry point and expansion loop.

use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::contract::{ExactGoal, GoalTest, SearchDomain, SearchState};
use crate::discovery::DiscoveryTable;
use crate::error::{SearchError, StateRole};
use crate::frontier::LazyFrontier;
use crate::heuristic::Heuristic;
use crate::hooks::{NoopObserver, SearchHooks, SearchObserver};
use crate::node::Path;
use crate::policy::SearchPolicyV1;

/// Why the search stopped.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum TerminationReasonV1 {
    /// A popped state satisfied the goal test.
    GoalReached,
    /// Frontier emptied without reaching a goal: there is no path.
    FrontierExhausted,
    /// `max_expansions` was hit before a goal was popped.
    ExpansionBudgetExceeded,
    /// The cancel token was set.
    Cancelled,
    /// The policy deadline elapsed.
    DeadlineExceeded,
    /// The heuristic returned a negative or non-finite estimate.
    HeuristicContractViolation { value: f64 },
    /// The domain returned a negative or non-finite step cost.
    AdapterContractViolation { cost: f64 },
}

impl TerminationReasonV1 {
    /// Stable identifier used in reports.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GoalReached => "goal_reached",
            Self::FrontierExhausted => "frontier_exhausted",
            Self::ExpansionBudgetExceeded => "expansion_budget_exceeded",
            Self::Cancelled => "cancelled",
            Self::DeadlineExceeded => "deadline_exceeded",
            Self::HeuristicContractViolation { .. } => "heuristic_contract_violation",
            Self::AdapterContractViolation { .. } => "adapter_contract_violation",
        }
    }

    /// Whether the run was cut short by a budget or the caller, so the
    /// absence of a path says nothing about reachability.
    #[must_use]
    pub fn is_aborted(&self) -> bool {
        matches!(
            self,
            Self::ExpansionBudgetExceeded | Self::Cancelled | Self::DeadlineExceeded
        )
    }

    /// Whether a callback broke its contract.
    #[must_use]
    pub fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            Self::HeuristicContractViolation { .. } | Self::AdapterContractViolation { .. }
        )
    }
}

/// Counters collected over one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Non-stale pops that generated successors (the goal pop is not counted).
    pub expansions: u64,
    /// Frontier pushes, the start included.
    pub pushes: u64,
    /// Stale frontier entries discarded on pop.
    pub stale_skipped: u64,
    /// Strict cost improvements of already discovered states.
    pub improvements: u64,
    /// Largest frontier size seen, stale entries included.
    pub frontier_high_water: u64,
}

/// Result of a search execution.
///
/// Always carries the discovery table, whatever the outcome. `path` is set
/// only when [`TerminationReasonV1::GoalReached`]; aborted runs never expose
/// a partial path.
#[derive(Debug, Clone)]
pub struct SearchResult<S> {
    pub termination: TerminationReasonV1,
    pub path: Option<Path<S>>,
    pub table: DiscoveryTable<S>,
    pub stats: SearchStats,
}

impl<S> SearchResult<S> {
    /// Returns `true` if the search terminated because a goal was reached.
    #[must_use]
    pub fn is_goal_reached(&self) -> bool {
        matches!(self.termination, TerminationReasonV1::GoalReached)
    }

    /// Returns `true` if the search proved the goal unreachable.
    #[must_use]
    pub fn is_no_path(&self) -> bool {
        matches!(self.termination, TerminationReasonV1::FrontierExhausted)
    }

    #[must_use]
    pub fn is_aborted(&self) -> bool {
        self.termination.is_aborted()
    }

    /// Consume the result, keeping only the path.
    #[must_use]
    pub fn into_path(self) -> Option<Path<S>> {
        self.path
    }
}

/// Run A* from `start` to `goal`, with equality as the goal test.
///
/// # Errors
///
/// See [`search_with`].
pub fn search<D, H>(
    start: D::State,
    goal: D::State,
    domain: &D,
    heuristic: &H,
    policy: &SearchPolicyV1,
) -> Result<SearchResult<D::State>, SearchError>
where
    D: SearchDomain + ?Sized,
    H: Heuristic<D::State> + ?Sized,
{
    let goal_test = ExactGoal(goal.clone());
    search_with(
        start,
        goal,
        domain,
        heuristic,
        &goal_test,
        policy,
        SearchHooks::none(),
    )
}

/// Run A* with an explicit goal test and optional hooks.
///
/// `goal` feeds the heuristic; `goal_test` decides termination. The path
/// ends at the first popped state that passes `goal_test`.
///
/// All runtime terminations (no path, aborts, contract violations) return
/// `Ok(SearchResult)` with the discovery table preserved. The result is
/// optimal when the heuristic is consistent; with a merely admissible or an
/// inadmissible heuristic the loop still terminates (re-push only on strict
/// improvement) but the path may cost more than the optimum.
///
/// # Errors
///
/// Returns [`SearchError::InvalidPolicy`] if the policy fails validation and
/// [`SearchError::InvalidState`] if the domain rejects `start` or `goal`. No
/// search step is taken in either case.
#[allow(clippy::too_many_lines)]
pub fn search_with<D, H, G>(
    start: D::State,
    goal: D::State,
    domain: &D,
    heuristic: &H,
    goal_test: &G,
    policy: &SearchPolicyV1,
    hooks: SearchHooks<'_, D::State>,
) -> Result<SearchResult<D::State>, SearchError>
where
    D: SearchDomain + ?Sized,
    H: Heuristic<D::State> + ?Sized,
    G: GoalTest<D::State> + ?Sized,
{
    policy.validate()?;
    domain
        .validate_state(&start)
        .map_err(|detail| SearchError::InvalidState {
            role: StateRole::Start,
            detail,
        })?;
    domain
        .validate_state(&goal)
        .map_err(|detail| SearchError::InvalidState {
            role: StateRole::Goal,
            detail,
        })?;

    let started = Instant::now();
    let deadline = policy.deadline();
    let mut noop = NoopObserver;
    let observer: &mut dyn SearchObserver<D::State> = match hooks.observer {
        Some(observer) => observer,
        None => &mut noop,
    };

    let mut table = DiscoveryTable::new(start.clone());
    let mut frontier = LazyFrontier::new(policy.tie_break);
    let mut stats = SearchStats::default();
    let mut reached: Option<D::State> = None;

    tracing::debug!(?start, ?goal, tie_break = policy.tie_break.as_str(), "search started");

    let termination = match checked_estimate(heuristic.estimate(&start, &goal)) {
        Err(reason) => reason,
        Ok(h_start) => {
            frontier.push(start, 0.0, h_start);

            'search: loop {
                if hooks.cancel.is_some_and(|token| token.is_cancelled()) {
                    break TerminationReasonV1::Cancelled;
                }
                if deadline.is_some_and(|limit| started.elapsed() >= limit) {
                    break TerminationReasonV1::DeadlineExceeded;
                }

                let Some(current) = frontier.pop() else {
                    break TerminationReasonV1::FrontierExhausted;
                };

                // Lazy deletion: a cheaper path was recorded after this push.
                if table
                    .cost_of(&current.state)
                    .is_some_and(|best| current.g_cost > best)
                {
                    stats.stale_skipped += 1;
                    observer.on_stale(&current.state, current.g_cost);
                    continue;
                }

                observer.on_expand(&current.state, current.g_cost);
                if goal_test.is_goal(&current.state) {
                    reached = Some(current.state);
                    break TerminationReasonV1::GoalReached;
                }

                if policy
                    .max_expansions
                    .is_some_and(|limit| stats.expansions >= limit)
                {
                    break TerminationReasonV1::ExpansionBudgetExceeded;
                }
                stats.expansions += 1;

                tracing::trace!(
                    state = ?current.state,
                    g = current.g_cost,
                    f = current.f_cost(),
                    "expanding"
                );

                for (neighbor, step) in domain.neighbors(&current.state) {
                    if !(step.is_finite() && step >= 0.0) {
                        tracing::warn!(state = ?current.state, ?neighbor, step, "invalid step cost");
                        break 'search TerminationReasonV1::AdapterContractViolation { cost: step };
                    }

                    let tentative = current.g_cost + step;
                    let known = table.contains(&neighbor);
                    if !table.offer(&neighbor, tentative, &current.state) {
                        continue;
                    }
                    if known {
                        stats.improvements += 1;
                    }
                    observer.on_discover(&neighbor, tentative, &current.state);

                    match checked_estimate(heuristic.estimate(&neighbor, &goal)) {
                        Ok(h) => {
                            frontier.push(neighbor, tentative, h);
                        }
                        Err(reason) => {
                            tracing::warn!(state = ?neighbor, "invalid heuristic estimate");
                            break 'search reason;
                        }
                    }
                }
            }
        }
    };

    stats.pushes = frontier.pushes();
    stats.frontier_high_water = frontier.high_water();

    let path = match (&termination, reached) {
        (TerminationReasonV1::GoalReached, Some(state)) => table.path_to(&state),
        _ => None,
    };

    tracing::debug!(
        termination = termination.as_str(),
        expansions = stats.expansions,
        discovered = table.len(),
        path_len = ?path.as_ref().map(Path::steps),
        "search finished"
    );

    Ok(SearchResult {
        termination,
        path,
        table,
        stats,
    })
}

/// Reconstruct the path from the table's start to `target`.
///
/// Returns `None` if `target` was never discovered.
#[must_use]
pub fn reconstruct_path<S: SearchState>(table: &DiscoveryTable<S>, target: &S) -> Option<Path<S>> {
    table.path_to(target)
}

fn checked_estimate(value: f64) -> Result<f64, TerminationReasonV1> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(TerminationReasonV1::HeuristicContractViolation { value })
    }
}
