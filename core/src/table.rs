//! Module defining a routing table: a set of entries maintained under one domination discipline,
//! and the diff type used to describe how one table evolves into another.

use crate::entry::{DominationPolicy, Entry};
use crate::error::RouterError;
use crate::types::NodeId;
use std::collections::HashSet;
use std::ops::BitOrAssign;

/// A set of Pareto-relevant entries at one node, for one fixed destination.
///
/// No two entries in a table are ever equal (identity is the `(d, π, δ)` triple, see
/// [`Entry`]); beyond that, which entries survive an insertion depends on the
/// [`DominationPolicy`] the caller inserts under.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table<N: NodeId> {
    entries: HashSet<Entry<N>>,
}

impl<N: NodeId> Table<N> {
    /// An empty table.
    pub fn new() -> Self {
        Self { entries: HashSet::new() }
    }

    /// The destination's table, containing only its sentinel entry.
    pub fn destination() -> Self {
        let mut entries = HashSet::new();
        entries.insert(Entry::destination());
        Self { entries }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over the entries, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &Entry<N>> {
        self.entries.iter()
    }

    /// Entries sorted by `(d, π, δ)`, for deterministic display or comparison.
    pub fn sorted(&self) -> Vec<&Entry<N>> {
        let mut v: Vec<&Entry<N>> = self.entries.iter().collect();
        v.sort();
        v
    }

    /// The single entry with the smallest worst-case bound, if any.
    pub fn min_by_bound(&self) -> Option<&Entry<N>> {
        self.entries.iter().min_by_key(|e| e.worst_case_bound)
    }

    /// Insert `entry` under `policy`. Returns `true` if the table changed (the entry was added,
    /// possibly with other entries removed as a consequence).
    ///
    /// Errors with [`RouterError::InvariantBroken`] if, after the insertion, any remaining entry
    /// in scope of `entry` still stands in a domination relationship with it — the retain pass
    /// below is supposed to make that impossible, so this only ever fires on a defect in the
    /// insertion logic itself.
    pub fn insert(&mut self, entry: Entry<N>, policy: DominationPolicy) -> Result<bool, RouterError> {
        match policy {
            DominationPolicy::Domination => self.insert_with(entry, Entry::dominates, |_, _| true),
            DominationPolicy::StrictDomination => {
                self.insert_with(entry, Entry::strictly_dominates, |_, _| true)
            }
            DominationPolicy::PerParent => {
                self.insert_with(entry, Entry::dominates, |a, b| a.parent == b.parent)
            }
        }
    }

    fn insert_with(
        &mut self,
        entry: Entry<N>,
        dominates: impl Fn(&Entry<N>, &Entry<N>) -> bool,
        in_scope: impl Fn(&Entry<N>, &Entry<N>) -> bool,
    ) -> Result<bool, RouterError> {
        let dominated_by_existing = self
            .entries
            .iter()
            .any(|existing| in_scope(existing, &entry) && dominates(existing, &entry));
        if dominated_by_existing {
            return Ok(false);
        }
        self.entries
            .retain(|existing| !(in_scope(existing, &entry) && dominates(&entry, existing)));

        if let Some(survivor) = self
            .entries
            .iter()
            .find(|existing| in_scope(existing, &entry) && dominates(&entry, existing))
        {
            return Err(RouterError::InvariantBroken(format!(
                "entry ({}, {:?}, {}) dominates ({}, {:?}, {}) but survived the retain pass",
                entry.worst_case_bound,
                entry.parent,
                entry.expected_delay,
                survivor.worst_case_bound,
                survivor.parent,
                survivor.expected_delay,
            )));
        }
        Ok(self.entries.insert(entry))
    }

    /// Remove every entry whose parent is `parent`. Used by the batch solver to re-derive a
    /// next-hop's contribution from scratch on each pass.
    pub fn remove_all_entries_with_parent(&mut self, parent: &N) {
        self.entries.retain(|e| e.parent.as_ref() != Some(parent));
    }

    /// A copy of this table with every entry whose derivation chain has reached `node_count - 1`
    /// hops removed — a guard against stale long-chain entries that cannot have arisen from a
    /// genuine local derivation. Used to build the "considered table" a router relaxes from when
    /// computing its upstream-facing contributions.
    pub fn considered(&self, node_count: usize) -> Self {
        let max_depth = node_count.saturating_sub(1);
        Self { entries: self.entries.iter().filter(|e| e.depth() < max_depth).cloned().collect() }
    }

    /// Apply a diff to this table: remove its `removed` entries, then add its `added` entries
    /// directly (no domination check — the diff already encodes the finished result of whatever
    /// policy produced it). Returns `true` if the table changed.
    pub fn apply(&mut self, diff: &TableDiff<N>) -> bool {
        let mut changed = false;
        for e in &diff.removed {
            changed |= self.entries.remove(e);
        }
        for e in &diff.added {
            changed |= self.entries.insert(e.clone());
        }
        changed
    }

    /// The diff that turns `old` into `new`.
    pub fn diff(old: &Self, new: &Self) -> TableDiff<N> {
        TableDiff {
            removed: old.entries.difference(&new.entries).cloned().collect(),
            added: new.entries.difference(&old.entries).cloned().collect(),
        }
    }
}

/// A `(removed, added)` pair of entry sets describing how one table evolves into another.
///
/// Diffs compose by set-union: applying `a` then `b` to a table has the same aggregate effect on
/// set membership as applying `a | b` in one step (the empty diff is the identity element).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableDiff<N: NodeId> {
    /// Entries present before, absent after.
    pub removed: HashSet<Entry<N>>,
    /// Entries absent before, present after.
    pub added: HashSet<Entry<N>>,
}

impl<N: NodeId> TableDiff<N> {
    /// An empty diff.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries touched by this diff.
    pub fn len(&self) -> usize {
        self.removed.len() + self.added.len()
    }

    /// Whether this diff touches no entries.
    pub fn is_empty(&self) -> bool {
        self.removed.is_empty() && self.added.is_empty()
    }

    /// The diff that undoes this one: swap `removed` and `added`.
    pub fn inverse(&self) -> Self {
        Self { removed: self.added.clone(), added: self.removed.clone() }
    }
}

impl<N: NodeId> BitOrAssign for TableDiff<N> {
    fn bitor_assign(&mut self, rhs: Self) {
        for e in rhs.removed {
            self.added.remove(&e);
            self.removed.insert(e);
        }
        for e in rhs.added {
            self.removed.remove(&e);
            self.added.insert(e);
        }
    }
}
