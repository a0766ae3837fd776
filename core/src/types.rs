//! Module containing all shared type definitions

use std::fmt::Debug;
use std::hash::Hash;

/// A delay value, in whatever time unit the caller's graph is expressed in. Both the expected
/// and the worst-case delay of an edge, and the worst-case bound and expected delay of a table
/// entry, are `Delay` values.
pub type Delay = u64;

/// Blanket bound for node identifiers. A node is an opaque, hashable key (an integer or a
/// string, per the caller's choice); the core never interprets it beyond equality, ordering (for
/// canonical iteration) and hashing (for table storage).
pub trait NodeId: Clone + Eq + Ord + Hash + Debug {}
impl<T: Clone + Eq + Ord + Hash + Debug> NodeId for T {}
