//! Adjacency-list graph.

use super::{AdjacencyMatrix, DEFAULT_WEIGHT, Direction, Edge, IndexBase};
use crate::error::{GraphError, Result};
use crate::types::NodeId;

/// Graph stored as one neighbor list per node.
///
/// Neighbor lists keep edge insertion order, so every traversal over a given
/// graph is deterministic. Parallel edges and self-loops are kept as given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Graph {
    direction: Direction,
    adj: Vec<Vec<Edge>>,
    /// Logical edges as inserted (one entry per undirected edge).
    edges: Vec<(NodeId, NodeId, i64)>,
}

impl Graph {
    /// Create a graph with `node_count` nodes and no edges.
    #[must_use]
    pub fn empty(node_count: usize, direction: Direction) -> Self {
        Self {
            direction,
            adj: vec![Vec::new(); node_count],
            edges: Vec::new(),
        }
    }

    /// Like [`empty`](Self::empty), but reports a node count that cannot be
    /// allocated instead of aborting.
    fn try_empty(node_count: usize, direction: Direction) -> Result<Self> {
        let mut adj = Vec::new();
        adj.try_reserve_exact(node_count)
            .map_err(|_| GraphError::CapacityExceeded { node_count })?;
        adj.resize_with(node_count, Vec::new);

        Ok(Self {
            direction,
            adj,
            edges: Vec::new(),
        })
    }

    /// Build an undirected, unweighted graph from 0-indexed edge pairs.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::InvalidNodeId`] if an endpoint is out of range.
    pub fn undirected(node_count: usize, edges: &[(NodeId, NodeId)]) -> Result<Self> {
        GraphBuilder::new(node_count, Direction::Undirected)
            .edges(edges.iter().copied())
            .build()
    }

    /// Build a directed, unweighted graph from 0-indexed edge pairs.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::InvalidNodeId`] if an endpoint is out of range.
    pub fn directed(node_count: usize, edges: &[(NodeId, NodeId)]) -> Result<Self> {
        GraphBuilder::new(node_count, Direction::Directed)
            .edges(edges.iter().copied())
            .build()
    }

    /// Number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.adj.len()
    }

    /// Number of logical edges (an undirected edge counts once).
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Whether the graph is directed.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Returns `true` if the graph has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.adj.is_empty()
    }

    /// Adjacency entries of `node`.
    ///
    /// # Panics
    ///
    /// Panics if `node >= node_count()`.
    #[must_use]
    pub fn neighbors(&self, node: NodeId) -> &[Edge] {
        &self.adj[node]
    }

    /// Neighbor ids of `node`, in insertion order.
    pub fn neighbor_ids(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.adj[node].iter().map(|e| e.to)
    }

    /// Iterate over logical edges as `(from, to, weight)`.
    pub fn edges(&self) -> impl Iterator<Item = (NodeId, NodeId, i64)> + '_ {
        self.edges.iter().copied()
    }

    /// Check that `node` is a valid id for this graph.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::InvalidNodeId`] if `node >= node_count()`.
    pub fn check_node(&self, node: NodeId) -> Result<()> {
        if node < self.node_count() {
            Ok(())
        } else {
            Err(GraphError::InvalidNodeId {
                node,
                node_count: self.node_count(),
            })
        }
    }

    /// Count of adjacency entries pointing at each node.
    ///
    /// For directed graphs this is the in-degree; for undirected graphs it is
    /// the degree (a self-loop contributes two).
    #[must_use]
    pub fn in_degrees(&self) -> Vec<usize> {
        let mut degrees = vec![0; self.node_count()];
        for list in &self.adj {
            for edge in list {
                degrees[edge.to] += 1;
            }
        }
        degrees
    }

    /// Graph with every directed edge reversed. Undirected graphs are returned unchanged.
    #[must_use]
    pub fn reversed(&self) -> Self {
        if !self.direction.is_directed() {
            return self.clone();
        }

        let mut reversed = Graph::empty(self.node_count(), Direction::Directed);
        for (u, v, w) in self.edges() {
            reversed.insert(v, u, w);
        }
        reversed
    }

    /// Graph with every edge made two-way. Undirected graphs are returned unchanged.
    #[must_use]
    pub fn to_undirected(&self) -> Self {
        if !self.direction.is_directed() {
            return self.clone();
        }

        let mut undirected = Graph::empty(self.node_count(), Direction::Undirected);
        for (u, v, w) in self.edges() {
            undirected.insert(u, v, w);
        }
        undirected
    }

    /// Dense matrix view of this graph. With parallel edges the last weight wins.
    #[must_use]
    pub fn to_matrix(&self) -> AdjacencyMatrix {
        let mut matrix = AdjacencyMatrix::new(self.node_count(), self.direction);
        for (u, v, w) in self.edges() {
            matrix.set(u, v, w);
        }
        matrix
    }

    /// Insert an edge whose endpoints are already validated.
    pub(super) fn insert(&mut self, from: NodeId, to: NodeId, weight: i64) {
        self.adj[from].push(Edge { to, weight });
        if !self.direction.is_directed() {
            self.adj[to].push(Edge { to: from, weight });
        }
        self.edges.push((from, to, weight));
    }
}

/// Builder for [`Graph`] that validates endpoints and translates index bases.
///
/// ```
/// use graphwalk::graph::{Direction, GraphBuilder, IndexBase};
///
/// let graph = GraphBuilder::new(3, Direction::Undirected)
///     .index_base(IndexBase::One)
///     .edge(1, 2)
///     .weighted_edge(2, 3, 7)
///     .build()
///     .unwrap();
///
/// assert_eq!(graph.edge_count(), 2);
/// assert_eq!(graph.neighbors(2)[0].weight, 7);
/// ```
#[derive(Debug, Clone)]
pub struct GraphBuilder {
    node_count: usize,
    direction: Direction,
    index_base: IndexBase,
    edges: Vec<(usize, usize, i64)>,
}

impl GraphBuilder {
    /// Start a graph with `node_count` nodes.
    #[must_use]
    pub fn new(node_count: usize, direction: Direction) -> Self {
        Self {
            node_count,
            direction,
            index_base: IndexBase::Zero,
            edges: Vec::new(),
        }
    }

    /// Set the numbering convention of the ids passed to [`edge`](Self::edge).
    #[must_use]
    pub fn index_base(mut self, base: IndexBase) -> Self {
        self.index_base = base;
        self
    }

    /// Add an unweighted edge.
    #[must_use]
    pub fn edge(self, from: usize, to: usize) -> Self {
        self.weighted_edge(from, to, DEFAULT_WEIGHT)
    }

    /// Add a weighted edge.
    #[must_use]
    pub fn weighted_edge(mut self, from: usize, to: usize, weight: i64) -> Self {
        self.edges.push((from, to, weight));
        self
    }

    /// Add several unweighted edges.
    #[must_use]
    pub fn edges(mut self, edges: impl IntoIterator<Item = (usize, usize)>) -> Self {
        self.edges
            .extend(edges.into_iter().map(|(u, v)| (u, v, DEFAULT_WEIGHT)));
        self
    }

    /// Add several weighted edges.
    #[must_use]
    pub fn weighted_edges(mut self, edges: impl IntoIterator<Item = (usize, usize, i64)>) -> Self {
        self.edges.extend(edges);
        self
    }

    /// Validate all endpoints and build the graph.
    ///
    /// # Errors
    ///
    /// - [`GraphError::InvalidNodeId`] with the id as written by the caller if
    ///   any endpoint is out of range
    /// - [`GraphError::CapacityExceeded`] if `node_count` cannot be allocated
    pub fn build(self) -> Result<Graph> {
        let mut graph = Graph::try_empty(self.node_count, self.direction)?;

        for &(from, to, weight) in &self.edges {
            let u = self.resolve(from)?;
            let v = self.resolve(to)?;
            graph.insert(u, v, weight);
        }

        tracing::debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            directed = graph.direction.is_directed(),
            "Built adjacency list"
        );

        Ok(graph)
    }

    fn resolve(&self, id: usize) -> Result<NodeId> {
        self.index_base
            .to_internal(id, self.node_count)
            .ok_or(GraphError::InvalidNodeId {
                node: id,
                node_count: self.node_count,
            })
    }
}
