#![deny(missing_docs)]

//! # ddroute-core
//!
//! A distributed routing core for networks whose edges carry two delay attributes: an *expected*
//! (typical) delay and a *worst-case* delay. Every node maintains a routing table of
//! Pareto-optimal `(worst-case-bound, next-hop, expected-delay)` triples towards one fixed
//! destination, following Baruah's model for rapid routing with guaranteed delay bounds. Given a
//! single edge's expected delay changing, the incremental protocol propagates the minimum set of
//! table updates through the network so that every node converges to what a from-scratch
//! recomputation would produce, without any node ever holding the whole graph.
//!
//! ## Structure
//!
//! - **[`entry`] / [`table`]**: the value types — a routing table entry and the set of entries
//!   a node keeps, maintained under one of three domination disciplines
//!   ([`DominationPolicy`](entry::DominationPolicy)).
//! - **[`batch`]**: the Baruah batch solver, [`solve`](batch::solve) — a Bellman-Ford-style
//!   relaxation used both to seed a network and as the correctness oracle for the incremental
//!   protocol.
//! - **[`router`]**: [`Router`](router::Router), the per-node state machine reacting to a local
//!   edge-delay change ([`update_incoming_edges`](router::Router::update_incoming_edges)) and to
//!   an incoming diff from a downstream neighbour ([`receive`](router::Router::receive)).
//! - **[`system`]**: [`System`](system::System), the single-writer message bus that wires routers
//!   together and drives them to a fixpoint after every graph mutation.
//! - **[`graph`]**: the directed, two-delay-per-edge graph the system runs over.
//! - **[`error`]**: [`RouterError`](error::RouterError) and [`CoreError`](error::CoreError).
//!
//! ## Usage
//!
//! ```
//! use ddroute_core::graph::{Edge, Graph};
//! use ddroute_core::system::System;
//!
//! let mut graph = Graph::new();
//! graph.add_edge(Edge::new(1, 2, 4, 10).unwrap());
//! graph.add_edge(Edge::new(2, 3, 4, 10).unwrap());
//! graph.add_edge(Edge::new(3, 4, 4, 10).unwrap());
//!
//! let mut system = System::build_system(graph, 4).unwrap();
//! system.simulate_edge_change(&2, &3, 5).unwrap();
//! println!("messages sent: {}", system.messages_sent());
//! ```

pub mod batch;
pub mod entry;
pub mod error;
pub mod graph;
pub mod message;
pub mod router;
pub mod system;
pub mod table;
pub mod types;

#[cfg(test)]
mod test;
