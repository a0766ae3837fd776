//! A directed graph of nodes connected by two-delay edges, keyed by caller-supplied [`NodeId`]s.
//!
//! Node identity is opaque to this module (unlike `petgraph`'s index-based graphs, which require
//! `Copy` keys), so the graph is backed by adjacency maps keyed directly on `N` rather than on a
//! dense integer index.

use crate::error::CoreError;
use crate::types::{Delay, NodeId};
use std::collections::BTreeMap;

/// A directed arc `u -> v` carrying an expected delay and a worst-case delay, `c_t <= c_w`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Edge<N: NodeId> {
    /// Upstream endpoint.
    pub from: N,
    /// Downstream endpoint.
    pub to: N,
    /// Expected (typical) delay, `c_t`.
    pub expected_delay: Delay,
    /// Worst-case delay, `c_w`.
    pub worst_case_delay: Delay,
}

impl<N: NodeId> Edge<N> {
    /// Build an edge, rejecting `c_t > c_w`.
    pub fn new(from: N, to: N, expected_delay: Delay, worst_case_delay: Delay) -> Result<Self, CoreError> {
        if expected_delay > worst_case_delay {
            return Err(CoreError::MalformedGraph(format!(
                "edge {:?} -> {:?}: expected delay {} exceeds worst-case delay {}",
                from, to, expected_delay, worst_case_delay
            )));
        }
        Ok(Self { from, to, expected_delay, worst_case_delay })
    }
}

/// Adjacency: `node -> { neighbour -> (c_t, c_w) }`. Directed; a reverse edge must be listed
/// explicitly.
#[derive(Debug, Clone, Default)]
pub struct Graph<N: NodeId> {
    out_edges: BTreeMap<N, BTreeMap<N, Edge<N>>>,
    in_edges: BTreeMap<N, BTreeMap<N, Edge<N>>>,
}

impl<N: NodeId> Graph<N> {
    /// An empty graph.
    pub fn new() -> Self {
        Self { out_edges: BTreeMap::new(), in_edges: BTreeMap::new() }
    }

    /// Register a node with no edges, if not already present.
    pub fn add_node(&mut self, node: N) {
        self.out_edges.entry(node.clone()).or_default();
        self.in_edges.entry(node).or_default();
    }

    /// Insert a directed edge, overwriting any existing edge between the same pair of nodes.
    /// Adds `from` and `to` as nodes if not already present.
    pub fn add_edge(&mut self, edge: Edge<N>) {
        self.add_node(edge.from.clone());
        self.add_node(edge.to.clone());
        self.out_edges.get_mut(&edge.from).unwrap().insert(edge.to.clone(), edge.clone());
        self.in_edges.get_mut(&edge.to).unwrap().insert(edge.from.clone(), edge);
    }

    /// All node identifiers, in canonical (sorted) order.
    pub fn nodes(&self) -> impl Iterator<Item = &N> {
        self.out_edges.keys()
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.out_edges.len()
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.out_edges.values().map(|m| m.len()).sum()
    }

    /// Whether `node` is known to the graph.
    pub fn contains_node(&self, node: &N) -> bool {
        self.out_edges.contains_key(node)
    }

    /// Edges leaving `node`, in canonical order by neighbour. Empty iterator for an unknown node.
    pub fn out_edges(&self, node: &N) -> impl Iterator<Item = &Edge<N>> {
        self.out_edges.get(node).into_iter().flat_map(|m| m.values())
    }

    /// Edges entering `node`, in canonical order by neighbour. Empty iterator for an unknown
    /// node.
    pub fn in_edges(&self, node: &N) -> impl Iterator<Item = &Edge<N>> {
        self.in_edges.get(node).into_iter().flat_map(|m| m.values())
    }

    /// Every edge in the graph, grouped by source node in canonical order.
    pub fn edges(&self) -> impl Iterator<Item = &Edge<N>> {
        self.out_edges.values().flat_map(|m| m.values())
    }

    /// Nodes with an edge into `node`, in canonical order. Empty iterator for an unknown node.
    pub fn predecessors(&self, node: &N) -> impl Iterator<Item = &N> {
        self.in_edges(node).map(|e| &e.from)
    }

    /// Nodes with an edge from `node`, in canonical order. Empty iterator for an unknown node.
    pub fn successors(&self, node: &N) -> impl Iterator<Item = &N> {
        self.out_edges(node).map(|e| &e.to)
    }

    /// The edge `from -> to`, if one exists.
    pub fn edge(&self, from: &N, to: &N) -> Option<&Edge<N>> {
        self.out_edges.get(from).and_then(|m| m.get(to))
    }

    /// Replace the expected delay of the edge `from -> to`. Rejects a value exceeding the edge's
    /// worst-case delay, and an unknown edge.
    pub fn set_expected_delay(&mut self, from: &N, to: &N, expected_delay: Delay) -> Result<(), CoreError> {
        let worst_case_delay = self
            .edge(from, to)
            .ok_or_else(|| CoreError::UnknownEdge(format!("{:?} -> {:?}", from, to)))?
            .worst_case_delay;
        if expected_delay > worst_case_delay {
            return Err(CoreError::MalformedGraph(format!(
                "edge {:?} -> {:?}: expected delay {} exceeds worst-case delay {}",
                from, to, expected_delay, worst_case_delay
            )));
        }
        let updated = Edge { from: from.clone(), to: to.clone(), expected_delay, worst_case_delay };
        self.out_edges.get_mut(from).unwrap().insert(to.clone(), updated.clone());
        self.in_edges.get_mut(to).unwrap().insert(from.clone(), updated);
        Ok(())
    }
}
