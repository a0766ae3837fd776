//! Module defining a single routing table entry and the domination relation between entries.

use crate::types::{Delay, NodeId};
use std::cmp::Ordering;
use std::collections::HashSet;
use std::hash::{Hash, Hasher};

/// One row of a routing table: a worst-case delay bound, the next-hop that realises it, and the
/// expected (typical) delay along the implied path.
///
/// Equality, hashing and ordering only ever consider `(worst_case_bound, parent, expected_delay)`.
/// The ancestor trail is carried alongside purely as private bookkeeping — the set of nodes this
/// entry's derivation has already passed through, used to forbid relaying it back through one of
/// them, and to discard entries whose chain has grown implausibly long (see [`Entry::depth`]). It
/// never escapes into the entry's identity, so two entries derived along different paths but
/// landing on the same triple are, correctly, the same entry.
#[derive(Debug, Clone)]
pub struct Entry<N: NodeId> {
    /// Guaranteed worst-case delay from this node to the destination along this entry's path.
    pub worst_case_bound: Delay,
    /// The next hop from this node. `None` only for the destination's own sentinel entry.
    pub parent: Option<N>,
    /// Expected (typical) delay along the implied path.
    pub expected_delay: Delay,
    trail: HashSet<N>,
}

impl<N: NodeId> Entry<N> {
    /// The destination's sentinel entry `(0, None, 0)`.
    pub fn destination() -> Self {
        Self { worst_case_bound: 0, parent: None, expected_delay: 0, trail: HashSet::new() }
    }

    /// Build a new entry derived by relaxing an edge whose downstream side holds `source`.
    /// `via` is the entry of the downstream node that this entry extends by one hop; the new
    /// entry's ancestor trail is `via`'s trail with the downstream node itself added.
    pub fn relayed(worst_case_bound: Delay, source: N, expected_delay: Delay, via: &Self) -> Self {
        let mut trail = via.trail.clone();
        trail.insert(source.clone());
        Self { worst_case_bound, parent: Some(source), expected_delay, trail }
    }

    /// Number of hops this entry has been relayed across since originating at the destination.
    /// Used to discard entries whose derivation chain has grown as long as the network itself,
    /// which cannot have arisen from a genuine local derivation.
    pub fn depth(&self) -> usize {
        self.trail.len()
    }

    /// Whether `node` appears anywhere along this entry's ancestor trail. Used to forbid relaying
    /// an entry back through a node it has already passed through.
    pub fn trail_contains(&self, node: &N) -> bool {
        self.trail.contains(node)
    }

    /// Whether `self` dominates `other`: both coordinates are no worse.
    pub fn dominates(&self, other: &Self) -> bool {
        self.worst_case_bound <= other.worst_case_bound && self.expected_delay <= other.expected_delay
    }

    /// Whether `self` strictly dominates `other`: dominates, with at least one coordinate
    /// strictly better.
    pub fn strictly_dominates(&self, other: &Self) -> bool {
        self.dominates(other)
            && (self.worst_case_bound < other.worst_case_bound
                || self.expected_delay < other.expected_delay)
    }

    fn identity(&self) -> (Delay, &Option<N>, Delay) {
        (self.worst_case_bound, &self.parent, self.expected_delay)
    }
}

impl<N: NodeId> PartialEq for Entry<N> {
    fn eq(&self, other: &Self) -> bool {
        self.identity() == other.identity()
    }
}

impl<N: NodeId> Eq for Entry<N> {}

impl<N: NodeId> Hash for Entry<N> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.worst_case_bound.hash(state);
        self.parent.hash(state);
        self.expected_delay.hash(state);
    }
}

impl<N: NodeId> PartialOrd for Entry<N> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<N: NodeId> Ord for Entry<N> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.identity().cmp(&other.identity())
    }
}

/// The three insertion disciplines a [`Table`](crate::table::Table) can be maintained under.
///
/// Modeled as a single enum rather than three separate methods so that the policy is always an
/// explicit, visible parameter at the call site — tests exercise the same entry sequence under
/// more than one policy to check that the three disciplines agree wherever their preconditions
/// overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DominationPolicy {
    /// Drop any existing entry dominated by the new one; skip the insert if any existing entry
    /// dominates the new one.
    Domination,
    /// Same as [`Domination`](Self::Domination), but using strict domination. Equivalent entries
    /// coexist.
    StrictDomination,
    /// Domination is only compared among entries that share the new entry's parent. Entries with
    /// distinct parents never eliminate each other, guaranteeing at least one retained entry per
    /// downstream neighbour.
    PerParent,
}
