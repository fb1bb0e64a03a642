//! Graph data models.
//!
//! This module provides the two graph representations used by the algorithms:
//! - [`Graph`]: adjacency list, the input to every traversal
//! - [`AdjacencyMatrix`]: dense N×N table, convertible to and from [`Graph`]
//!
//! Both validate node ids at construction time, so the algorithms never see an
//! out-of-range neighbor.

pub mod list;
pub mod matrix;

pub use list::{Graph, GraphBuilder};
pub use matrix::AdjacencyMatrix;

use crate::types::NodeId;
use serde::{Deserialize, Serialize};

/// Whether an edge `u -> v` also implies `v -> u`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Edges are one-way.
    Directed,
    /// Edges are stored symmetrically in both endpoints' lists.
    #[default]
    Undirected,
}

impl Direction {
    /// Returns `true` for [`Direction::Directed`].
    #[must_use]
    pub const fn is_directed(self) -> bool {
        matches!(self, Direction::Directed)
    }
}

/// Numbering convention of node ids at the input boundary.
///
/// Internally nodes are always `0..n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexBase {
    /// Ids are `0..n`.
    #[default]
    Zero,
    /// Ids are `1..=n`.
    One,
}

impl IndexBase {
    /// Translate an external id into a dense internal id.
    ///
    /// Returns `None` if the id is outside the valid range for `node_count`.
    #[must_use]
    pub fn to_internal(self, id: usize, node_count: usize) -> Option<NodeId> {
        let internal = match self {
            IndexBase::Zero => id,
            IndexBase::One => id.checked_sub(1)?,
        };
        (internal < node_count).then_some(internal)
    }

    /// Translate a dense internal id back into the external numbering.
    #[must_use]
    pub const fn to_external(self, id: NodeId) -> usize {
        match self {
            IndexBase::Zero => id,
            IndexBase::One => id + 1,
        }
    }
}

/// One adjacency-list entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    /// Neighbor at the far end of the edge.
    pub to: NodeId,
    /// Edge weight; `1` for unweighted graphs.
    pub weight: i64,
}

/// Weight given to edges added without one.
pub const DEFAULT_WEIGHT: i64 = 1;
