//! Explicit weighted graph over named nodes.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use waypoint_search::contract::SearchDomain;

use crate::error::{HarnessError, Result};

/// One directed edge in a JSON edge list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EdgeV1 {
    pub from: String,
    pub to: String,
    pub weight: f64,
    /// Also add `to -> from` with the same weight.
    #[serde(default)]
    pub undirected: bool,
}

/// Directed graph with non-negative edge weights. Successors are returned
/// in insertion order.
#[derive(Debug, Clone, Default)]
pub struct WeightedGraph {
    adjacency: BTreeMap<String, Vec<(String, f64)>>,
}

impl WeightedGraph {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a node with no edges.
    pub fn add_node(&mut self, node: impl Into<String>) {
        self.adjacency.entry(node.into()).or_default();
    }

    /// Add a directed edge, registering both endpoints.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::InvalidWeight`] if `weight` is negative, NaN or infinite.
    pub fn add_edge(&mut self, from: &str, to: &str, weight: f64) -> Result<()> {
        if !weight.is_finite() || weight < 0.0 {
            return Err(HarnessError::InvalidWeight {
                from: from.to_owned(),
                to: to.to_owned(),
                weight,
            });
        }
        self.add_node(to);
        self.adjacency
            .entry(from.to_owned())
            .or_default()
            .push((to.to_owned(), weight));
        Ok(())
    }

    /// Add edges in both directions.
    ///
    /// # Errors
    ///
    /// See [`WeightedGraph::add_edge`].
    pub fn add_undirected_edge(&mut self, a: &str, b: &str, weight: f64) -> Result<()> {
        self.add_edge(a, b, weight)?;
        self.add_edge(b, a, weight)
    }

    /// Build from an edge list.
    ///
    /// # Errors
    ///
    /// Returns the first invalid weight.
    pub fn from_edges<'e, I>(edges: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'e EdgeV1>,
    {
        let mut graph = Self::new();
        for edge in edges {
            if edge.undirected {
                graph.add_undirected_edge(&edge.from, &edge.to, edge.weight)?;
            } else {
                graph.add_edge(&edge.from, &edge.to, edge.weight)?;
            }
        }
        Ok(graph)
    }

    /// Parse a JSON array of [`EdgeV1`].
    ///
    /// # Errors
    ///
    /// Malformed JSON or an invalid weight.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let edges: Vec<EdgeV1> = serde_json::from_str(json)?;
        Self::from_edges(&edges)
    }

    #[must_use]
    pub fn contains(&self, node: &str) -> bool {
        self.adjacency.contains_key(node)
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(Vec::len).sum()
    }

    /// Node names in sorted order.
    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.adjacency.keys().map(String::as_str)
    }
}

impl SearchDomain for WeightedGraph {
    type State = String;

    fn neighbors(&self, state: &String) -> Vec<(String, f64)> {
        self.adjacency.get(state).cloned().unwrap_or_default()
    }

    fn validate_state(&self, state: &String) -> std::result::Result<(), String> {
        if self.contains(state) {
            Ok(())
        } else {
            Err(format!("node {state:?} is not in the graph"))
        }
    }
}
