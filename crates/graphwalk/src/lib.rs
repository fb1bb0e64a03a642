//! Graphwalk - classical graph and grid traversal algorithms.
//!
//! Every algorithm is a pure function over an immutable [`Graph`],
//! [`AdjacencyMatrix`] or [`Grid`]. Graphs are built through
//! [`GraphBuilder`], which validates node ids once so the algorithms never
//! see an out-of-range neighbor.
//!
//! ```
//! use graphwalk::{Graph, traversal, topo};
//!
//! let graph = Graph::directed(4, &[(0, 1), (0, 2), (1, 3), (2, 3)]).unwrap();
//!
//! assert_eq!(traversal::bfs(&graph, 0).unwrap(), vec![0, 1, 2, 3]);
//! assert_eq!(topo::toposort_kahn(&graph), Some(vec![0, 1, 2, 3]));
//! ```

#![forbid(unsafe_code)]

pub mod bipartite;
pub mod components;
pub mod cycle;
pub mod distance;
pub mod error;
pub mod graph;
pub mod grid;
pub mod topo;
pub mod traversal;
pub mod types;

pub use error::{GraphError, Result};
pub use graph::{AdjacencyMatrix, Direction, Edge, Graph, GraphBuilder, IndexBase};
pub use grid::{Cell, Connectivity, Grid};
pub use types::{Color, Distance, NodeId, Orange, Traversal};
