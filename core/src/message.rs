//! The unit of communication the message bus ferries between routers.

use crate::table::TableDiff;
use crate::types::NodeId;

/// A table diff travelling from one router to an upstream neighbour (or, for the very first
/// message of a system, from the synthetic origin to the destination router).
#[derive(Debug, Clone)]
pub struct Message<N: NodeId> {
    /// Sender of this message. `None` only for the origin message that seeds the destination's
    /// identity entry.
    pub from: Option<N>,
    /// Recipient router.
    pub to: N,
    /// The diff the recipient should fold into its table.
    pub diff: TableDiff<N>,
}

impl<N: NodeId> Message<N> {
    /// The synthetic message that seeds a freshly built system: from nobody, to `destination`,
    /// carrying the destination's sentinel identity entry as its only addition.
    pub fn origin(destination: N) -> Self {
        let mut diff = TableDiff::new();
        diff.added.insert(crate::entry::Entry::destination());
        Self { from: None, to: destination, diff }
    }
}
