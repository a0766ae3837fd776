//! A single node's routing state and its two event handlers.

use crate::batch::{relax, RelaxVariant};
use crate::error::RouterError;
use crate::graph::Edge;
use crate::message::Message;
use crate::table::Table;
use crate::types::NodeId;
use log::{debug, trace};
use std::collections::{HashMap, HashSet};

/// Owns one table and one list of incoming edges. Never reads another router's state; the system
/// is the only thing that ever hands it an edge list or a message.
#[derive(Debug, Clone)]
pub struct Router<N: NodeId> {
    node_id: N,
    incoming_edges: Vec<Edge<N>>,
    table: Table<N>,
    node_count: usize,
}

impl<N: NodeId> Router<N> {
    /// A freshly built router with an empty table. `node_count` is `|V|` of the network it
    /// belongs to, needed for the stale-chain-length guard; the router otherwise never sees the
    /// graph.
    pub fn new(node_id: N, incoming_edges: Vec<Edge<N>>, node_count: usize) -> Self {
        Self { node_id, incoming_edges, table: Table::new(), node_count }
    }

    /// This router's node identifier.
    pub fn node_id(&self) -> &N {
        &self.node_id
    }

    /// The router's current table.
    pub fn table(&self) -> &Table<N> {
        &self.table
    }

    /// The router's current incoming-edge list.
    pub fn incoming_edges(&self) -> &[Edge<N>] {
        &self.incoming_edges
    }

    /// Overwrite the router's table directly, bypassing the event protocol. Used by the system's
    /// oracle recomputation.
    pub fn install_table(&mut self, table: Table<N>) {
        self.table = table;
    }

    fn considered(&self) -> Table<N> {
        self.table.considered(self.node_count)
    }

    fn contribution(&self, edge: &Edge<N>, from_table: &Table<N>) -> Result<Table<N>, RouterError> {
        let mut contrib = Table::new();
        relax(
            &self.node_id,
            edge.expected_delay,
            edge.worst_case_delay,
            from_table,
            &mut contrib,
            RelaxVariant::PerParentNoCyclicEntries,
        )?;
        Ok(contrib)
    }

    /// Event A: the system has detected that one or more of this router's incoming edges changed
    /// expected delay. `new_edges` must have the same endpoints and worst-case delays as the
    /// router's current incoming edges; only expected delays may differ.
    pub fn update_incoming_edges(&mut self, new_edges: Vec<Edge<N>>) -> Result<Vec<Message<N>>, RouterError> {
        let old_by_from: HashMap<&N, &Edge<N>> =
            self.incoming_edges.iter().map(|e| (&e.from, e)).collect();
        let new_by_from: HashMap<&N, &Edge<N>> = new_edges.iter().map(|e| (&e.from, e)).collect();

        let old_keys: HashSet<N> = old_by_from.keys().map(|n| (*n).clone()).collect();
        let new_keys: HashSet<N> = new_by_from.keys().map(|n| (*n).clone()).collect();
        if old_keys != new_keys {
            return Err(RouterError::MismatchedIncomingEdges);
        }

        let t_hat = self.considered();
        let mut messages = Vec::new();
        for (upstream, old_edge) in &old_by_from {
            let new_edge = new_by_from[upstream];
            if old_edge.worst_case_delay != new_edge.worst_case_delay {
                return Err(RouterError::WorstCaseDelayChanged);
            }
            if new_edge.expected_delay > new_edge.worst_case_delay {
                return Err(RouterError::ExpectedExceedsWorstCase(
                    new_edge.expected_delay,
                    new_edge.worst_case_delay,
                ));
            }

            let old_contrib = self.contribution(old_edge, &t_hat)?;
            let new_contrib = self.contribution(new_edge, &t_hat)?;
            let diff = Table::diff(&old_contrib, &new_contrib);
            debug!(
                "update_incoming_edges at {:?}: edge {:?} -> {:?} expected delay {} -> {}, diff size {}",
                self.node_id, upstream, self.node_id, old_edge.expected_delay, new_edge.expected_delay, diff.len()
            );
            if !diff.is_empty() {
                messages.push(Message { from: Some(self.node_id.clone()), to: (*upstream).clone(), diff });
            }
        }

        self.incoming_edges = new_edges;
        Ok(messages)
    }

    /// Event B: a diff message arrived from a downstream neighbour. Applies it to the table, then
    /// re-evaluates every incoming edge's upstream-facing contribution against the table before
    /// and after the change, emitting a message for each upstream neighbour whose contribution
    /// moved. The table is only replaced once every incoming edge has been evaluated against the
    /// pre-change table.
    pub fn receive(&mut self, message: Message<N>) -> Result<Vec<Message<N>>, RouterError> {
        let t_hat_old = self.considered();
        let mut table_new = self.table.clone();
        table_new.apply(&message.diff);
        let t_hat_new = table_new.considered(self.node_count);

        let mut messages = Vec::new();
        debug!(
            "receive at {:?}: message from {:?}, {} incoming edges to re-evaluate",
            self.node_id,
            message.from,
            self.incoming_edges.len()
        );
        for edge in &self.incoming_edges {
            let old_contrib = self.contribution(edge, &t_hat_old)?;
            let new_contrib = self.contribution(edge, &t_hat_new)?;
            let diff = Table::diff(&old_contrib, &new_contrib);
            trace!(
                "receive at {:?}: contribution towards {:?} diff size {}",
                self.node_id,
                edge.from,
                diff.len()
            );
            if !diff.is_empty() {
                messages.push(Message { from: Some(self.node_id.clone()), to: edge.from.clone(), diff });
            }
        }

        self.table = table_new;
        Ok(messages)
    }
}
