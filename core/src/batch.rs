//! Baruah's batch routing algorithm: a Bellman-Ford-style relaxation over every edge of the
//! graph, run to a fixed number of passes. Used both to build a network's initial tables and as
//! the oracle the incremental protocol is checked against.

use crate::entry::{DominationPolicy, Entry};
use crate::error::RouterError;
use crate::graph::Graph;
use crate::table::Table;
use crate::types::{Delay, NodeId};
use std::collections::HashMap;

/// Which of the two relaxation disciplines to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelaxVariant {
    /// Plain domination, `insert_sd`, no restriction on which entries may be relaxed.
    Original,
    /// Per-parent retention with the no-cyclic-entries restriction: an entry whose ancestor trail
    /// already contains the relaxing node is never relayed across it again.
    PerParentNoCyclicEntries,
}

impl RelaxVariant {
    /// Number of global passes over all edges this variant needs to converge.
    fn passes(self, node_count: usize) -> usize {
        let base = node_count.saturating_sub(1);
        match self {
            RelaxVariant::Original => base,
            RelaxVariant::PerParentNoCyclicEntries => 2 * base,
        }
    }

    fn insertion_policy(self) -> DominationPolicy {
        match self {
            RelaxVariant::Original => DominationPolicy::StrictDomination,
            RelaxVariant::PerParentNoCyclicEntries => DominationPolicy::PerParent,
        }
    }
}

/// Relax one edge `u -> v`, folding `source`'s table into `dest`'s, under `variant`.
///
/// `source` is `v`'s table, the node downstream of the edge being relaxed; `dest` is `u`'s table,
/// the one being extended. `next_hop` is `v`'s own identity — it becomes the parent of every
/// entry this call produces, since from `u`'s perspective the next hop towards the destination
/// along this edge is `v`. Information flows opposite the edge's own direction: from `v`'s table
/// into `u`'s.
///
/// Used both by the batch solver (where `dest` is a live per-node table mutated in place across
/// passes) and by a router computing an upstream contribution from scratch (where `dest` starts
/// empty, `source` is the router's own table, and `next_hop` is the router's own id — the whole
/// call produces exactly the contribution an upstream neighbour should see through this edge).
pub fn relax<N: NodeId>(
    next_hop: &N,
    expected_delay: Delay,
    worst_case_delay: Delay,
    source: &Table<N>,
    dest: &mut Table<N>,
    variant: RelaxVariant,
) -> Result<(), RouterError> {
    if source.is_empty() {
        return Ok(());
    }
    let d_min = worst_case_delay + source.iter().map(|e| e.worst_case_bound).min().unwrap();
    let policy = variant.insertion_policy();

    match variant {
        RelaxVariant::Original => {
            for e_v in source.iter() {
                let d = d_min.max(expected_delay + e_v.worst_case_bound);
                let de = e_v.expected_delay + expected_delay;
                let new_entry = Entry::relayed(d, next_hop.clone(), de, e_v);
                dest.insert(new_entry, policy)?;
            }
        }
        RelaxVariant::PerParentNoCyclicEntries => {
            dest.remove_all_entries_with_parent(next_hop);
            for e_v in source.iter().filter(|e_v| !e_v.trail_contains(next_hop)) {
                let d = d_min.max(expected_delay + e_v.worst_case_bound);
                let de = e_v.expected_delay + expected_delay;
                let new_entry = Entry::relayed(d, next_hop.clone(), de, e_v);
                dest.insert(new_entry, policy)?;
            }
        }
    }
    Ok(())
}

/// Run the batch solver over the whole graph for a fixed `destination`, producing every node's
/// table. Used both to seed a freshly built system and as the correctness oracle the incremental
/// protocol is checked against.
pub fn solve<N: NodeId>(
    graph: &Graph<N>,
    destination: &N,
    variant: RelaxVariant,
) -> Result<HashMap<N, Table<N>>, RouterError> {
    let mut tables: HashMap<N, Table<N>> = graph.nodes().map(|n| (n.clone(), Table::new())).collect();
    tables.insert(destination.clone(), Table::destination());

    let passes = variant.passes(graph.node_count());
    for _ in 0..passes {
        for v in graph.nodes() {
            for edge in graph.in_edges(v) {
                let source = tables.get(v).cloned().unwrap_or_default();
                let mut dest = tables.remove(&edge.from).unwrap_or_default();
                relax(v, edge.expected_delay, edge.worst_case_delay, &source, &mut dest, variant)?;
                tables.insert(edge.from.clone(), dest);
            }
        }
    }
    Ok(tables)
}
