//! Best-first frontier with lazy deletion.
//!
//! The frontier never removes or re-keys an entry. When a cheaper path to a
//! state is found the engine pushes a fresh entry and leaves the old one in
//! the heap; the engine recognises it as stale when it is popped.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use crate::node::SearchNode;
use crate::policy::TieBreakV1;

/// A frontier entry wrapping a node with the tie-break rule of its frontier.
///
/// `BinaryHeap` is a max-heap, so entries are stored as `Reverse<FrontierEntry>`
/// to get min-heap behavior (lowest `f_cost` first).
#[derive(Debug)]
struct FrontierEntry<S> {
    rule: TieBreakV1,
    node: SearchNode<S>,
}

impl<S: Ord> PartialEq for FrontierEntry<S> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<S: Ord> Eq for FrontierEntry<S> {}

impl<S: Ord> PartialOrd for FrontierEntry<S> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<S: Ord> Ord for FrontierEntry<S> {
    fn cmp(&self, other: &Self) -> Ordering {
        let (a, b) = (&self.node, &other.node);
        let fifo = a.creation_order.cmp(&b.creation_order);
        a.f_cost().total_cmp(&b.f_cost()).then_with(|| match self.rule {
            TieBreakV1::Fifo => fifo,
            TieBreakV1::Lifo => fifo.reverse(),
            TieBreakV1::DeepestFirst => b.g_cost.total_cmp(&a.g_cost).then(fifo),
            TieBreakV1::StateOrder => a.state.cmp(&b.state).then(fifo),
        })
    }
}

/// Min-priority frontier keyed on `(f_cost, tie-break)`.
///
/// Maintains:
/// - A `BinaryHeap` for O(log n) pop of the best entry
/// - A monotonic creation counter, so every rule is a total order
/// - Push and high-water counters for search statistics
pub struct LazyFrontier<S> {
    heap: BinaryHeap<Reverse<FrontierEntry<S>>>,
    rule: TieBreakV1,
    next_creation_order: u64,
    high_water: u64,
}

impl<S: Ord> LazyFrontier<S> {
    /// Create a new empty frontier.
    #[must_use]
    pub fn new(rule: TieBreakV1) -> Self {
        Self {
            heap: BinaryHeap::new(),
            rule,
            next_creation_order: 0,
            high_water: 0,
        }
    }

    /// Push a state with its cost from start and heuristic estimate.
    ///
    /// Entries for the same state are never merged. Returns the creation
    /// order assigned to the entry.
    pub fn push(&mut self, state: S, g_cost: f64, h_cost: f64) -> u64 {
        let creation_order = self.next_creation_order;
        self.next_creation_order += 1;
        self.heap.push(Reverse(FrontierEntry {
            rule: self.rule,
            node: SearchNode {
                state,
                g_cost,
                h_cost,
                creation_order,
            },
        }));
        let size = self.heap.len() as u64;
        if size > self.high_water {
            self.high_water = size;
        }
        creation_order
    }

    /// Pop the best (lowest `f_cost`, then tie-break) entry.
    #[must_use]
    pub fn pop(&mut self) -> Option<SearchNode<S>> {
        self.heap.pop().map(|Reverse(e)| e.node)
    }

    /// Current frontier size, stale entries included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Whether the frontier is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// High-water mark of frontier size.
    #[must_use]
    pub fn high_water(&self) -> u64 {
        self.high_water
    }

    /// Total number of pushes so far.
    #[must_use]
    pub fn pushes(&self) -> u64 {
        self.next_creation_order
    }
}
