//! Discovery table: best known cost and predecessor per discovered state.
//!
//! Uses a `BTreeMap` (not `HashMap`) for deterministic iteration order at
//! report boundaries.

use std::collections::btree_map;
use std::collections::BTreeMap;

use crate::contract::SearchState;
use crate::node::Path;

/// Best known way to reach one discovered state.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscoveryRecord<S> {
    /// Cost from start along the best path found so far (the g-value).
    pub cost: f64,
    /// Previous state on that path. `None` only for the start.
    pub predecessor: Option<S>,
}

/// Per-invocation record of every discovered state.
///
/// Invariants:
/// - the start maps to `(0, None)`;
/// - a record is only ever replaced by one with a strictly lower cost.
#[derive(Debug, Clone)]
pub struct DiscoveryTable<S> {
    start: S,
    records: BTreeMap<S, DiscoveryRecord<S>>,
}

impl<S: SearchState> DiscoveryTable<S> {
    /// Create a table holding only the start state.
    #[must_use]
    pub fn new(start: S) -> Self {
        let mut records = BTreeMap::new();
        records.insert(
            start.clone(),
            DiscoveryRecord {
                cost: 0.0,
                predecessor: None,
            },
        );
        Self { start, records }
    }

    /// Record `state` as reached at `cost` via `predecessor` if that is a
    /// strict improvement (or the state is new).
    ///
    /// Returns `true` when the table changed.
    pub fn offer(&mut self, state: &S, cost: f64, predecessor: &S) -> bool {
        match self.records.get_mut(state) {
            Some(existing) if cost < existing.cost => {
                existing.cost = cost;
                existing.predecessor = Some(predecessor.clone());
                true
            }
            Some(_) => false,
            None => {
                self.records.insert(
                    state.clone(),
                    DiscoveryRecord {
                        cost,
                        predecessor: Some(predecessor.clone()),
                    },
                );
                true
            }
        }
    }

    /// The state the table was created for.
    #[must_use]
    pub fn start(&self) -> &S {
        &self.start
    }

    #[must_use]
    pub fn get(&self, state: &S) -> Option<&DiscoveryRecord<S>> {
        self.records.get(state)
    }

    /// Best known cost from start, or `None` if undiscovered.
    #[must_use]
    pub fn cost_of(&self, state: &S) -> Option<f64> {
        self.records.get(state).map(|r| r.cost)
    }

    #[must_use]
    pub fn contains(&self, state: &S) -> bool {
        self.records.contains_key(state)
    }

    /// Number of discovered states, start included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate records in state order.
    pub fn iter(&self) -> btree_map::Iter<'_, S, DiscoveryRecord<S>> {
        self.records.iter()
    }

    /// Iterate discovered states in state order.
    pub fn states(&self) -> btree_map::Keys<'_, S, DiscoveryRecord<S>> {
        self.records.keys()
    }

    /// Number of moves from start to `state` along the current predecessor
    /// chain.
    ///
    /// Follows the chain as it stands now, so it reflects predecessors that
    /// improved after `state` was written.
    #[must_use]
    pub fn depth_of(&self, state: &S) -> Option<usize> {
        self.chain(state).map(|states| states.len() - 1)
    }

    /// Reconstruct the path from start to `target` by following predecessors.
    ///
    /// Returns `None` if `target` was never discovered. A partial chain is
    /// never returned: the walk must end at the start.
    #[must_use]
    pub fn path_to(&self, target: &S) -> Option<Path<S>> {
        let cost = self.cost_of(target)?;
        let mut states: Vec<S> = self.chain(target)?.into_iter().cloned().collect();
        states.reverse();
        Some(Path { states, cost })
    }

    /// States from `target` back to the start, inclusive.
    fn chain<'a>(&'a self, target: &'a S) -> Option<Vec<&'a S>> {
        let mut states = vec![target];
        let mut current = target;

        while let Some(pred) = self.records.get(current)?.predecessor.as_ref() {
            // Predecessor links form a tree under strict improvement; a
            // longer walk means the table was corrupted.
            if states.len() > self.records.len() {
                tracing::warn!(?target, "predecessor chain does not reach start");
                return None;
            }
            states.push(pred);
            current = pred;
        }

        (*current == self.start).then_some(states)
    }
}

impl<'a, S> IntoIterator for &'a DiscoveryTable<S> {
    type Item = (&'a S, &'a DiscoveryRecord<S>);
    type IntoIter = btree_map::Iter<'a, S, DiscoveryRecord<S>>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
