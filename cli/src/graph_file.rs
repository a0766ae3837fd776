//! Reads the core's adjacency-dictionary graph construction format from a JSON file, purely as a
//! front-end convenience. None of this parsing is part of the library's invariants — it builds a
//! [`Graph`] and hands it straight to [`System::build_system`](ddroute_core::system::System).

use ddroute_core::graph::{Edge, Graph};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// `{ node -> { neighbour -> [expected_delay, worst_case_delay] } }`, directly per §6 of the
/// library's data model.
#[derive(Debug, Deserialize)]
struct Adjacency(HashMap<String, HashMap<String, (u64, u64)>>);

/// Load a graph from a JSON adjacency file.
pub fn load_graph(path: &Path) -> Result<Graph<String>, Box<dyn std::error::Error>> {
    let contents = std::fs::read_to_string(path)?;
    let adjacency: Adjacency = serde_json::from_str(&contents)?;

    let mut graph = Graph::new();
    for node in adjacency.0.keys() {
        graph.add_node(node.clone());
    }
    for (from, neighbours) in adjacency.0 {
        for (to, (expected_delay, worst_case_delay)) in neighbours {
            graph.add_edge(Edge::new(from.clone(), to, expected_delay, worst_case_delay)?);
        }
    }
    Ok(graph)
}
