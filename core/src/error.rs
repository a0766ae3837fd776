//! Module containing all error types

use thiserror::Error;

/// Errors scoped to a single router's local contract.
#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum RouterError {
    /// `update_incoming_edges` was called with an edge set that does not match the router's
    /// registered incoming edges (different node set, or a different edge between two nodes
    /// already known to the router).
    #[error("incoming edge set does not match the router's registered edges")]
    MismatchedIncomingEdges,
    /// An edge's worst-case delay changed; only expected-delay changes are supported.
    #[error("worst-case delay of an edge cannot change")]
    WorstCaseDelayChanged,
    /// A proposed expected delay exceeds the edge's worst-case delay.
    #[error("expected delay {0} exceeds worst-case delay {1}")]
    ExpectedExceedsWorstCase(u64, u64),
    /// Internal: a table reached a state inconsistent with its domination discipline.
    #[error("table invariant broken: {0}")]
    InvariantBroken(String),
}

/// Top-level error type for the core.
#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum CoreError {
    /// Error propagated from a single router.
    #[error("Router Error: {0}")]
    RouterError(#[from] RouterError),
    /// Referenced node is not known to the system.
    #[error("unknown node: {0}")]
    UnknownNode(String),
    /// Referenced edge is not known to the graph.
    #[error("unknown edge: {0}")]
    UnknownEdge(String),
    /// The graph as constructed violates a data-model invariant (e.g. `c_t > c_w`).
    #[error("malformed graph: {0}")]
    MalformedGraph(String),
    /// Test-only: the incrementally maintained tables differ from the batch oracle after
    /// projection onto a shared domination discipline.
    #[cfg(test)]
    #[error("oracle disagreement: {0}")]
    OracleDisagreement(String),
}
