//! Dense adjacency-matrix graph.

use super::{Direction, Graph};
use crate::error::{GraphError, Result};
use crate::types::NodeId;

/// N×N table where cell `(i, j)` holds the weight of edge `i -> j`, if any.
///
/// O(V²) space; suited to dense graphs and constant-time edge lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdjacencyMatrix {
    node_count: usize,
    direction: Direction,
    cells: Vec<Option<i64>>,
}

impl AdjacencyMatrix {
    /// Create a matrix with no edges.
    #[must_use]
    pub fn new(node_count: usize, direction: Direction) -> Self {
        Self {
            node_count,
            direction,
            cells: vec![None; node_count * node_count],
        }
    }

    /// Build a matrix from 0-indexed `(from, to, weight)` edges.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::InvalidNodeId`] for an endpoint outside `[0, node_count)`.
    pub fn from_edges(
        node_count: usize,
        direction: Direction,
        edges: &[(NodeId, NodeId, i64)],
    ) -> Result<Self> {
        let mut matrix = Self::new(node_count, direction);
        for &(u, v, w) in edges {
            for node in [u, v] {
                if node >= node_count {
                    return Err(GraphError::InvalidNodeId { node, node_count });
                }
            }
            matrix.set(u, v, w);
        }
        Ok(matrix)
    }

    /// Build a matrix from square rows, where `0` means "no edge" and any other
    /// value is the edge weight.
    ///
    /// The result is undirected if the rows are symmetric, directed otherwise.
    ///
    /// # Errors
    ///
    /// - [`GraphError::EmptyInput`] if there are no rows
    /// - [`GraphError::DimensionMismatch`] if any row length differs from the row count
    pub fn from_rows(rows: &[Vec<i64>]) -> Result<Self> {
        let n = rows.len();
        if n == 0 {
            return Err(GraphError::EmptyInput);
        }
        if let Some(row) = rows.iter().find(|row| row.len() != n) {
            return Err(GraphError::DimensionMismatch {
                expected: n,
                actual: row.len(),
            });
        }

        let cells: Vec<Option<i64>> = rows
            .iter()
            .flatten()
            .map(|&value| (value != 0).then_some(value))
            .collect();

        let mut matrix = Self {
            node_count: n,
            direction: Direction::Directed,
            cells,
        };
        if matrix.is_symmetric() {
            matrix.direction = Direction::Undirected;
        }
        Ok(matrix)
    }

    /// Number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Whether edges are one-way.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Returns `true` if there is an edge `from -> to`.
    ///
    /// Out-of-range ids have no edges.
    #[must_use]
    pub fn has_edge(&self, from: NodeId, to: NodeId) -> bool {
        self.weight(from, to).is_some()
    }

    /// Weight of edge `from -> to`, if present.
    #[must_use]
    pub fn weight(&self, from: NodeId, to: NodeId) -> Option<i64> {
        if from >= self.node_count || to >= self.node_count {
            return None;
        }
        self.cells[from * self.node_count + to]
    }

    /// Set edge `from -> to` (and `to -> from` when undirected).
    ///
    /// # Panics
    ///
    /// Panics if either id is out of range.
    pub fn set(&mut self, from: NodeId, to: NodeId, weight: i64) {
        let n = self.node_count;
        self.cells[from * n + to] = Some(weight);
        if !self.direction.is_directed() {
            self.cells[to * n + from] = Some(weight);
        }
    }

    /// Rows of the matrix with `0` for missing edges.
    #[must_use]
    pub fn to_rows(&self) -> Vec<Vec<i64>> {
        self.cells
            .chunks(self.node_count.max(1))
            .take(self.node_count)
            .map(|row| row.iter().map(|cell| cell.unwrap_or(0)).collect())
            .collect()
    }

    /// Convert to an adjacency list, skipping the diagonal.
    ///
    /// Diagonal entries encode "a node is connected to itself" in matrix
    /// inputs such as city connectivity tables, not self-loops.
    #[must_use]
    pub fn to_graph(&self) -> Graph {
        let n = self.node_count;
        let directed = self.direction.is_directed();
        let mut graph = Graph::empty(n, self.direction);

        for i in 0..n {
            // For undirected matrices only the upper triangle is read
            let first = if directed { 0 } else { i + 1 };
            for j in first..n {
                if i == j {
                    continue;
                }
                if let Some(w) = self.cells[i * n + j] {
                    graph.insert(i, j, w);
                }
            }
        }

        graph
    }

    fn is_symmetric(&self) -> bool {
        let n = self.node_count;
        (0..n).all(|i| (i + 1..n).all(|j| self.cells[i * n + j] == self.cells[j * n + i]))
    }
}
