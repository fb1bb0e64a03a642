//! Error types for graphwalk operations.
//!
//! Only malformed input is an error. Outcomes such as "contains a cycle" or
//! "not bipartite" are ordinary return values of the algorithms.

use thiserror::Error;

/// The error type for graph and grid construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// An edge or start position references a node outside `[0, node_count)`.
    ///
    /// For 1-indexed input `node` is the id as the caller wrote it.
    #[error("invalid node id {node}: graph has {node_count} nodes")]
    InvalidNodeId {
        /// The offending id.
        node: usize,
        /// Number of nodes in the graph (or cells in the grid).
        node_count: usize,
    },

    /// The requested number of nodes cannot be allocated.
    #[error("cannot allocate a graph with {node_count} nodes")]
    CapacityExceeded {
        /// The requested node count.
        node_count: usize,
    },

    /// A grid or matrix with zero rows or zero columns.
    #[error("empty input: at least one row and one column are required")]
    EmptyInput,

    /// Rows of unequal length, or a non-square adjacency matrix.
    #[error("dimension mismatch: expected {expected} columns, got {actual}")]
    DimensionMismatch {
        /// Width implied by the first row (or the row count, for square matrices).
        expected: usize,
        /// Width of the offending row.
        actual: usize,
    },
}

/// A specialized Result type for graphwalk operations.
pub type Result<T> = std::result::Result<T, GraphError>;
