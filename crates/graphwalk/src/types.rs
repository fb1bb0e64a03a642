//! Small value types shared by the algorithms.
//!
//! - [`Distance`]: BFS hop count with an explicit "unreachable" value
//! - [`Color`]: one side of a 2-coloring
//! - [`Orange`]: cell state for the rotting-oranges simulation
//! - [`Traversal`]: BFS or DFS, where either strategy is acceptable

use serde::{Deserialize, Serialize};
use std::fmt;

/// Dense node identifier. Nodes of a graph with `n` nodes are `0..n`.
pub type NodeId = usize;

/// Distance from the nearest source in a BFS.
///
/// Also known as "level" or "hop count".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Distance(pub u32);

impl Distance {
    /// Unreachable from every source.
    pub const INFINITY: Distance = Distance(u32::MAX);

    /// A source cell or node.
    pub const ZERO: Distance = Distance(0);

    /// Create a new distance.
    #[must_use]
    pub const fn new(d: u32) -> Self {
        Distance(d)
    }

    /// Check whether a source reached this node.
    #[must_use]
    pub const fn is_reachable(&self) -> bool {
        self.0 != u32::MAX
    }

    /// Get the inner value.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Increment distance by 1, saturating at infinity.
    #[must_use]
    pub const fn increment(&self) -> Self {
        if self.0 == u32::MAX {
            Distance::INFINITY
        } else {
            Distance(self.0.saturating_add(1))
        }
    }
}

impl Default for Distance {
    fn default() -> Self {
        Distance::INFINITY
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_reachable() {
            write!(f, "{}", self.0)
        } else {
            write!(f, "inf")
        }
    }
}

/// One of the two sides of a bipartition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    /// Assigned to the first node of every component.
    Red,
    /// The opposite side.
    Blue,
}

impl Color {
    /// The other color.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Color::Red => Color::Blue,
            Color::Blue => Color::Red,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Red => write!(f, "red"),
            Color::Blue => write!(f, "blue"),
        }
    }
}

/// Cell state in the rotting-oranges grid.
///
/// Encoded as `0` (empty), `1` (fresh) and `2` (rotten) in numeric input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orange {
    /// No orange in this cell.
    Empty,
    /// A fresh orange; rots one minute after a 4-adjacent neighbor does.
    Fresh,
    /// A rotten orange.
    Rotten,
}

impl TryFrom<i64> for Orange {
    type Error = i64;

    fn try_from(value: i64) -> std::result::Result<Self, Self::Error> {
        match value {
            0 => Ok(Orange::Empty),
            1 => Ok(Orange::Fresh),
            2 => Ok(Orange::Rotten),
            other => Err(other),
        }
    }
}

/// Flooding strategy for algorithms where BFS and DFS give the same answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Traversal {
    /// Breadth-first, FIFO work queue.
    #[default]
    Bfs,
    /// Depth-first, explicit LIFO stack.
    Dfs,
}
