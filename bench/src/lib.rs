//! # ddroute-bench
//!
//! Randomized regression bencher for `ddroute-core`: generates random small directed graphs,
//! drives one simulated edge change through each, and records the `messages_sent / |E|` ratio
//! the core's design notes flag as a regression signal for a propagation bug.
#![deny(missing_docs)]

use ddroute_core::graph::{Edge, Graph};
use ddroute_core::system::System;
use log::warn;
use rand::Rng;
use serde::Serialize;
use std::collections::HashSet;

/// One sample of the regression corpus: the graph's size, the edge changed, and the resulting
/// message count.
#[derive(Debug, Clone, Serialize)]
pub struct RegressionRecord {
    /// Number of nodes in the sampled graph.
    pub nodes: usize,
    /// Number of edges in the sampled graph.
    pub edges: usize,
    /// Messages dispatched by the one simulated edge change.
    pub messages_sent: u64,
    /// `messages_sent / edges`, the ratio the design notes name as the regression signal.
    pub ratio: f64,
}

/// Build a random directed graph over `n` nodes `0..n`, with each ordered pair connected
/// independently with probability `edge_prob`, delays drawn uniformly from `0..=max_delay` with
/// the smaller of the two draws assigned as the expected delay.
pub fn random_graph(rng: &mut impl Rng, n: usize, edge_prob: f64, max_delay: u64) -> Graph<u32> {
    let mut graph = Graph::new();
    for i in 0..n as u32 {
        graph.add_node(i);
    }
    for i in 0..n as u32 {
        for j in 0..n as u32 {
            if i == j || !rng.gen_bool(edge_prob) {
                continue;
            }
            let a = rng.gen_range(0..=max_delay);
            let b = rng.gen_range(0..=max_delay);
            let (expected_delay, worst_case_delay) = if a <= b { (a, b) } else { (b, a) };
            graph.add_edge(Edge::new(i, j, expected_delay, worst_case_delay).expect("a <= b by construction"));
        }
    }
    graph
}

/// Every node that has a directed path to `destination`, found by walking the graph backwards
/// from it. A sample whose set is smaller than the node count is excluded from the corpus: some
/// node can never obtain a route, which is a property of the sampled topology, not a bug.
pub fn nodes_reaching(graph: &Graph<u32>, destination: u32) -> HashSet<u32> {
    let mut visited = HashSet::new();
    visited.insert(destination);
    let mut frontier = vec![destination];
    while let Some(v) = frontier.pop() {
        for predecessor in graph.predecessors(&v) {
            if visited.insert(*predecessor) {
                frontier.push(*predecessor);
            }
        }
    }
    visited
}

/// Generate `iterations` random samples (graph sizes `3..=max_nodes`), simulate one random edge
/// change per sample, and return the resulting records. Samples excluded for not having every
/// node able to reach the destination are logged at `warn!`, never silently dropped.
pub fn run_regression(rng: &mut impl Rng, iterations: usize, max_nodes: usize) -> Vec<RegressionRecord> {
    let mut records = Vec::with_capacity(iterations);
    let mut excluded = 0usize;

    for i in 0..iterations {
        let n = rng.gen_range(3..=max_nodes.max(3));
        let graph = random_graph(rng, n, 0.4, 8);
        let destination = rng.gen_range(0..n) as u32;

        let reaching = nodes_reaching(&graph, destination);
        if reaching.len() < n {
            warn!(
                "sample {}: {} of {} nodes cannot reach destination {}, excluding from corpus",
                i,
                n - reaching.len(),
                n,
                destination
            );
            excluded += 1;
            continue;
        }

        let edge_count = graph.edge_count();
        let mut system = match System::build_system(graph, destination) {
            Ok(system) => system,
            Err(e) => {
                warn!("sample {}: failed to build system: {}", i, e);
                excluded += 1;
                continue;
            }
        };

        let edges: Vec<_> =
            system.graph().edges().cloned().collect();
        if edges.is_empty() {
            excluded += 1;
            continue;
        }
        let edge = &edges[rng.gen_range(0..edges.len())];
        let new_expected = rng.gen_range(0..=edge.worst_case_delay);
        if let Err(e) = system.simulate_edge_change(&edge.from, &edge.to, new_expected) {
            warn!("sample {}: edge change rejected: {}", i, e);
            excluded += 1;
            continue;
        }

        records.push(RegressionRecord {
            nodes: n,
            edges: edge_count,
            messages_sent: system.messages_sent(),
            ratio: system.messages_sent() as f64 / edge_count.max(1) as f64,
        });
    }

    log::info!("{} samples recorded, {} excluded", records.len(), excluded);
    records
}
