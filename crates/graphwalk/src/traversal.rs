//! Breadth-first and depth-first traversal.
//!
//! Both traversals mark a node visited when it is first scheduled, so each
//! node is scheduled at most once. DFS keeps an explicit stack of
//! `(node, next neighbor index)` frames instead of recursing, which yields the
//! same pre-order as the recursive formulation without depending on the host
//! call-stack depth.

use crate::error::Result;
use crate::graph::Graph;
use crate::types::{Distance, NodeId};
use std::collections::VecDeque;

/// Visit order of a BFS from `start`.
///
/// Nodes appear in non-decreasing hop distance from `start`; ties are broken
/// by neighbor-list order.
///
/// # Errors
///
/// Returns [`GraphError::InvalidNodeId`](crate::GraphError::InvalidNodeId) if
/// `start` is out of range.
pub fn bfs(graph: &Graph, start: NodeId) -> Result<Vec<NodeId>> {
    graph.check_node(start)?;
    let mut visited = vec![false; graph.node_count()];
    let mut order = Vec::new();
    bfs_from(graph, start, &mut visited, &mut order);
    Ok(order)
}

/// Pre-order of a DFS from `start`.
///
/// # Errors
///
/// Returns [`GraphError::InvalidNodeId`](crate::GraphError::InvalidNodeId) if
/// `start` is out of range.
pub fn dfs(graph: &Graph, start: NodeId) -> Result<Vec<NodeId>> {
    graph.check_node(start)?;
    let mut visited = vec![false; graph.node_count()];
    let mut order = Vec::new();
    dfs_from(graph, start, &mut visited, &mut order);
    Ok(order)
}

/// BFS order over every component, restarting at the lowest unvisited node.
#[must_use]
pub fn bfs_all(graph: &Graph) -> Vec<NodeId> {
    let mut visited = vec![false; graph.node_count()];
    let mut order = Vec::with_capacity(graph.node_count());
    for node in 0..graph.node_count() {
        if !visited[node] {
            bfs_from(graph, node, &mut visited, &mut order);
        }
    }
    order
}

/// DFS pre-order over every component, restarting at the lowest unvisited node.
#[must_use]
pub fn dfs_all(graph: &Graph) -> Vec<NodeId> {
    let mut visited = vec![false; graph.node_count()];
    let mut order = Vec::with_capacity(graph.node_count());
    for node in 0..graph.node_count() {
        if !visited[node] {
            dfs_from(graph, node, &mut visited, &mut order);
        }
    }
    order
}

/// Hop distances from the nearest of `sources`.
///
/// Every source is seeded at distance zero before expansion starts, so each
/// node's first assignment is its minimum distance. Duplicate sources are
/// ignored; unreachable nodes stay at [`Distance::INFINITY`].
///
/// # Errors
///
/// Returns [`GraphError::InvalidNodeId`](crate::GraphError::InvalidNodeId) if
/// any source is out of range.
pub fn bfs_distances(graph: &Graph, sources: &[NodeId]) -> Result<Vec<Distance>> {
    let mut distances = vec![Distance::INFINITY; graph.node_count()];
    let mut queue = VecDeque::new();

    for &src in sources {
        graph.check_node(src)?;
        if distances[src] == Distance::INFINITY {
            distances[src] = Distance::ZERO;
            queue.push_back(src);
        }
    }

    while let Some(node) = queue.pop_front() {
        let next = distances[node].increment();
        for neighbor in graph.neighbor_ids(node) {
            if distances[neighbor] == Distance::INFINITY {
                distances[neighbor] = next;
                queue.push_back(neighbor);
            }
        }
    }

    Ok(distances)
}

/// Connected components, each listed in BFS order from its lowest id.
///
/// Components follow edges as stored, so for directed graphs this groups
/// nodes by forward reachability from each unvisited root.
#[must_use]
pub fn connected_components(graph: &Graph) -> Vec<Vec<NodeId>> {
    let mut visited = vec![false; graph.node_count()];
    let mut components = Vec::new();
    for node in 0..graph.node_count() {
        if !visited[node] {
            let mut component = Vec::new();
            bfs_from(graph, node, &mut visited, &mut component);
            components.push(component);
        }
    }
    tracing::debug!(components = components.len(), "Counted connected components");
    components
}

/// Number of connected components.
#[must_use]
pub fn count_components(graph: &Graph) -> usize {
    let mut visited = vec![false; graph.node_count()];
    let mut scratch = Vec::new();
    let mut count = 0;
    for node in 0..graph.node_count() {
        if !visited[node] {
            count += 1;
            scratch.clear();
            dfs_from(graph, node, &mut visited, &mut scratch);
        }
    }
    count
}

pub(crate) fn bfs_from(
    graph: &Graph,
    start: NodeId,
    visited: &mut [bool],
    order: &mut Vec<NodeId>,
) {
    let mut queue = VecDeque::from([start]);
    visited[start] = true;

    while let Some(node) = queue.pop_front() {
        order.push(node);
        for neighbor in graph.neighbor_ids(node) {
            if !visited[neighbor] {
                visited[neighbor] = true;
                queue.push_back(neighbor);
            }
        }
    }
}

pub(crate) fn dfs_from(
    graph: &Graph,
    start: NodeId,
    visited: &mut [bool],
    order: &mut Vec<NodeId>,
) {
    visited[start] = true;
    order.push(start);
    let mut stack: Vec<(NodeId, usize)> = vec![(start, 0)];

    while let Some(frame) = stack.last_mut() {
        let (node, next) = *frame;
        let neighbors = graph.neighbors(node);

        if next < neighbors.len() {
            frame.1 += 1;
            let neighbor = neighbors[next].to;
            if !visited[neighbor] {
                visited[neighbor] = true;
                order.push(neighbor);
                stack.push((neighbor, 0));
            }
        } else {
            stack.pop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GraphError;
    use crate::graph::Direction;

    /// The 9-node example graph used by the traversal demonstrations.
    fn sample_graph() -> Graph {
        Graph::undirected(
            9,
            &[(0, 1), (0, 2), (1, 3), (1, 4), (2, 5), (2, 6), (4, 7), (6, 8)],
        )
        .unwrap()
    }

    #[test]
    fn test_bfs_order() {
        let order = bfs(&sample_graph(), 0).unwrap();
        assert_eq!(order, vec![0, 1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn test_dfs_preorder_matches_recursive_order() {
        let order = dfs(&sample_graph(), 0).unwrap();
        assert_eq!(order, vec![0, 1, 3, 4, 7, 2, 5, 6, 8]);
    }

    #[test]
    fn test_traversal_stays_in_component() {
        let graph = Graph::undirected(5, &[(0, 1), (2, 3)]).unwrap();
        assert_eq!(bfs(&graph, 2).unwrap(), vec![2, 3]);
        assert_eq!(dfs(&graph, 4).unwrap(), vec![4]);
    }

    #[test]
    fn test_all_components_order() {
        let graph = Graph::undirected(5, &[(0, 1), (3, 2)]).unwrap();
        assert_eq!(bfs_all(&graph), vec![0, 1, 2, 3, 4]);
        assert_eq!(dfs_all(&graph), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_invalid_start() {
        let graph = sample_graph();
        assert_eq!(
            bfs(&graph, 9),
            Err(GraphError::InvalidNodeId {
                node: 9,
                node_count: 9
            })
        );
        assert!(dfs(&graph, 42).is_err());
    }

    #[test]
    fn test_bfs_distances_multi_source() {
        let graph = Graph::undirected(5, &[(0, 1), (1, 2), (2, 3), (3, 4)]).unwrap();
        let distances = bfs_distances(&graph, &[0, 4]).unwrap();
        assert_eq!(
            distances,
            vec![
                Distance::new(0),
                Distance::new(1),
                Distance::new(2),
                Distance::new(1),
                Distance::new(0)
            ]
        );
    }

    #[test]
    fn test_bfs_distances_unreachable() {
        let graph = Graph::directed(3, &[(0, 1)]).unwrap();
        let distances = bfs_distances(&graph, &[0]).unwrap();
        assert_eq!(distances[2], Distance::INFINITY);
    }

    #[test]
    fn test_components() {
        let graph = Graph::undirected(6, &[(0, 1), (1, 2), (3, 4)]).unwrap();
        assert_eq!(
            connected_components(&graph),
            vec![vec![0, 1, 2], vec![3, 4], vec![5]]
        );
        assert_eq!(count_components(&graph), 3);
    }

    #[test]
    fn test_empty_graph_has_no_components() {
        let graph = Graph::empty(0, Direction::Undirected);
        assert_eq!(count_components(&graph), 0);
        assert!(bfs_all(&graph).is_empty());
    }

    #[test]
    fn test_deep_path_does_not_overflow() {
        let n = 200_000;
        let edges: Vec<_> = (0..n - 1).map(|i| (i, i + 1)).collect();
        let graph = Graph::directed(n, &edges).unwrap();
        let order = dfs(&graph, 0).unwrap();
        assert_eq!(order.len(), n);
        assert_eq!(order[n - 1], n - 1);
    }
}
