//! The message bus: a single-writer FIFO dispatch loop coordinating every router in the network.

use crate::batch::{solve, RelaxVariant};
use crate::error::CoreError;
use crate::graph::Graph;
use crate::message::Message;
use crate::router::Router;
use crate::table::Table;
use crate::types::{Delay, NodeId};
use log::debug;
use std::collections::{HashMap, VecDeque};

/// A fully wired network: the graph, a router per node, and the message queue that drives them
/// towards a fixpoint after every graph mutation.
#[derive(Debug)]
pub struct System<N: NodeId> {
    graph: Graph<N>,
    destination: N,
    routers: HashMap<N, Router<N>>,
    queue: VecDeque<Message<N>>,
    processing: bool,
    messages_sent: u64,
    log_buffer: Vec<String>,
}

impl<N: NodeId> System<N> {
    /// Build a system for `graph` and `destination`, with every router's table at its
    /// from-scratch Baruah value. Equivalent to constructing empty routers and draining the
    /// origin message, except it seeds the destination's table directly rather than deriving it
    /// through one degenerate message.
    pub fn build_system(graph: Graph<N>, destination: N) -> Result<Self, CoreError> {
        if !graph.contains_node(&destination) {
            return Err(CoreError::UnknownNode(format!("{:?}", destination)));
        }
        let node_count = graph.node_count();
        let mut routers = HashMap::new();
        for node in graph.nodes() {
            let incoming: Vec<_> = graph.in_edges(node).cloned().collect();
            routers.insert(node.clone(), Router::new(node.clone(), incoming, node_count));
        }

        let mut system = Self {
            graph,
            destination: destination.clone(),
            routers,
            queue: VecDeque::new(),
            processing: false,
            messages_sent: 0,
            log_buffer: Vec::new(),
        };
        system.send(Message::origin(destination));
        system.drain()?;
        Ok(system)
    }

    /// Mutate one edge's expected delay and drive the network to a new fixpoint. Resets
    /// `messages_sent` before dispatching.
    pub fn simulate_edge_change(&mut self, from: &N, to: &N, new_expected_delay: Delay) -> Result<(), CoreError> {
        self.messages_sent = 0;
        self.graph.set_expected_delay(from, to, new_expected_delay)?;

        let incoming: Vec<_> = self.graph.in_edges(to).cloned().collect();
        let router = self
            .routers
            .get_mut(to)
            .ok_or_else(|| CoreError::UnknownNode(format!("{:?}", to)))?;
        let messages = router.update_incoming_edges(incoming)?;
        for message in messages {
            self.send(message);
        }
        self.drain()?;
        Ok(())
    }

    /// Snapshot of every router's current table.
    pub fn tables(&self) -> HashMap<N, Table<N>> {
        self.routers.iter().map(|(n, r)| (n.clone(), r.table().clone())).collect()
    }

    /// Bypass the incremental protocol entirely: recompute every table with the batch solver and
    /// overwrite the routers. Used by tests as a correctness oracle.
    pub fn recalculate_tables(&mut self) -> Result<(), CoreError> {
        let solved = solve(&self.graph, &self.destination, RelaxVariant::PerParentNoCyclicEntries)?;
        let node_count = self.graph.node_count();
        for (node, table) in solved {
            let incoming: Vec<_> = self.graph.in_edges(&node).cloned().collect();
            let mut router = Router::new(node.clone(), incoming, node_count);
            router.install_table(table);
            self.routers.insert(node, router);
        }
        Ok(())
    }

    /// Number of messages dispatched since the last call to `simulate_edge_change` (or since
    /// construction, if none has run yet).
    pub fn messages_sent(&self) -> u64 {
        self.messages_sent
    }

    /// The retained prose log of protocol steps, oldest first.
    pub fn logs(&self) -> &[String] {
        &self.log_buffer
    }

    /// Underlying graph, for callers that need to inspect edges directly (e.g. the CLI front-end
    /// printing the current topology).
    pub fn graph(&self) -> &Graph<N> {
        &self.graph
    }

    fn send(&mut self, message: Message<N>) {
        self.queue.push_back(message);
    }

    /// Drain the queue to a fixpoint. `processing` guards against re-entrant drains: a router's
    /// handler only ever enqueues messages via `send`, it never calls `drain` itself, but this
    /// flag keeps that invariant even if a future caller's code path tries to. A message
    /// addressed to a node the graph doesn't know is fatal; the queue is abandoned and
    /// `processing` is still cleared before the error is returned.
    fn drain(&mut self) -> Result<(), CoreError> {
        if self.processing {
            return Ok(());
        }
        self.processing = true;

        let mut dispatched = 0u64;
        let mut touched = std::collections::HashSet::new();
        let mut result = Ok(());
        while let Some(message) = self.queue.pop_front() {
            self.messages_sent += 1;
            dispatched += 1;
            let to = message.to.clone();
            let from = message.from.clone();
            let added = message.diff.added.len();
            let removed = message.diff.removed.len();
            let line = format!(
                "dispatch #{}: {:?} -> {:?}, {} added / {} removed",
                self.messages_sent, from, to, added, removed
            );
            debug!("{}", line);
            self.log_buffer.push(line);

            match self.routers.get_mut(&to) {
                Some(router) => match router.receive(message) {
                    Ok(outgoing) => {
                        touched.insert(to);
                        for out in outgoing {
                            self.queue.push_back(out);
                        }
                    }
                    Err(e) => {
                        result = Err(e.into());
                        break;
                    }
                },
                None => {
                    result = Err(CoreError::UnknownNode(format!("{:?}", to)));
                    break;
                }
            }
        }

        let summary = format!("drain complete: {} messages processed, {} tables changed", dispatched, touched.len());
        debug!("{}", summary);
        self.log_buffer.push(summary);
        self.processing = false;
        result
    }
}
