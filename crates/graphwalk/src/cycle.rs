//! Cycle detection for undirected and directed graphs.
//!
//! # Undirected graphs
//!
//! Each component is traversed while tracking every node's parent in the
//! traversal tree. The parent edge is always seen again from the child's side
//! and must not be mistaken for a back-edge, so exactly one adjacency entry
//! back to the parent is excused per node. Any further entry to the parent is
//! a parallel edge, which forms a cycle of length two. A self-loop is a cycle.
//!
//! # Directed graphs
//!
//! - Three-state DFS: `Unvisited -> InProgress -> Done`. An edge to an
//!   `InProgress` node is a back-edge. A node becomes `Done` only after all of
//!   its descendants, so reaching it again through another path is safe.
//! - Kahn's algorithm: peel zero in-degree nodes; if fewer than `n` nodes are
//!   removed, the rest sit on or behind a cycle.
//!
//! The two directed checks agree on every input.

use crate::graph::Graph;
use crate::types::NodeId;
use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VisitState {
    Unvisited,
    InProgress,
    Done,
}

/// BFS cycle check for an undirected graph.
#[must_use]
pub fn has_cycle_undirected_bfs(graph: &Graph) -> bool {
    let mut visited = vec![false; graph.node_count()];

    for start in 0..graph.node_count() {
        if visited[start] {
            continue;
        }
        visited[start] = true;
        let mut queue: VecDeque<(NodeId, Option<NodeId>)> = VecDeque::from([(start, None)]);

        while let Some((node, parent)) = queue.pop_front() {
            let mut parent_excused = false;
            for neighbor in graph.neighbor_ids(node) {
                if Some(neighbor) == parent && !parent_excused {
                    parent_excused = true;
                    continue;
                }
                if visited[neighbor] {
                    tracing::trace!(node, neighbor, "Non-tree edge closes a cycle");
                    return true;
                }
                visited[neighbor] = true;
                queue.push_back((neighbor, Some(node)));
            }
        }
    }

    false
}

/// DFS cycle check for an undirected graph.
#[must_use]
pub fn has_cycle_undirected_dfs(graph: &Graph) -> bool {
    struct Frame {
        node: NodeId,
        parent: Option<NodeId>,
        next: usize,
        parent_excused: bool,
    }

    let mut visited = vec![false; graph.node_count()];

    for start in 0..graph.node_count() {
        if visited[start] {
            continue;
        }
        visited[start] = true;
        let mut stack = vec![Frame {
            node: start,
            parent: None,
            next: 0,
            parent_excused: false,
        }];

        while let Some(frame) = stack.last_mut() {
            let neighbors = graph.neighbors(frame.node);
            if frame.next >= neighbors.len() {
                stack.pop();
                continue;
            }
            let neighbor = neighbors[frame.next].to;
            frame.next += 1;

            if Some(neighbor) == frame.parent && !frame.parent_excused {
                frame.parent_excused = true;
                continue;
            }
            if visited[neighbor] {
                tracing::trace!(node = frame.node, neighbor, "Back-edge closes a cycle");
                return true;
            }
            visited[neighbor] = true;
            let node = frame.node;
            stack.push(Frame {
                node: neighbor,
                parent: Some(node),
                next: 0,
                parent_excused: false,
            });
        }
    }

    false
}

/// Three-state DFS cycle check for a directed graph.
#[must_use]
pub fn has_cycle_directed_dfs(graph: &Graph) -> bool {
    let mut state = vec![VisitState::Unvisited; graph.node_count()];

    for start in 0..graph.node_count() {
        if state[start] == VisitState::Unvisited && dfs_finds_back_edge(graph, start, &mut state) {
            return true;
        }
    }

    false
}

/// Kahn's-algorithm cycle check for a directed graph.
#[must_use]
pub fn has_cycle_directed_kahn(graph: &Graph) -> bool {
    let removed = kahn_order(graph).len();
    tracing::trace!(removed, nodes = graph.node_count(), "Kahn peeling finished");
    removed < graph.node_count()
}

/// Nodes from which every path ends at a terminal node, in ascending order.
///
/// A terminal node has no outgoing edges. Nodes on a cycle, or with any path
/// into one, are unsafe.
#[must_use]
pub fn eventual_safe_nodes(graph: &Graph) -> Vec<NodeId> {
    let mut state = vec![VisitState::Unvisited; graph.node_count()];

    for start in 0..graph.node_count() {
        if state[start] == VisitState::Unvisited {
            // Nodes left InProgress by an abandoned walk reach a cycle
            dfs_finds_back_edge(graph, start, &mut state);
        }
    }

    (0..graph.node_count())
        .filter(|&node| state[node] == VisitState::Done)
        .collect()
}

/// Nodes removed by Kahn's algorithm, in removal order.
///
/// The initial queue holds zero in-degree nodes in ascending id order. The
/// result covers every node exactly when the graph is acyclic.
pub(crate) fn kahn_order(graph: &Graph) -> Vec<NodeId> {
    let mut in_degree = graph.in_degrees();
    let mut queue: VecDeque<NodeId> = (0..graph.node_count())
        .filter(|&node| in_degree[node] == 0)
        .collect();
    let mut order = Vec::with_capacity(graph.node_count());

    while let Some(node) = queue.pop_front() {
        order.push(node);
        for neighbor in graph.neighbor_ids(node) {
            in_degree[neighbor] -= 1;
            if in_degree[neighbor] == 0 {
                queue.push_back(neighbor);
            }
        }
    }

    order
}

/// Walk from `start`; on a back-edge, stop and leave the current path `InProgress`.
fn dfs_finds_back_edge(graph: &Graph, start: NodeId, state: &mut [VisitState]) -> bool {
    state[start] = VisitState::InProgress;
    let mut stack: Vec<(NodeId, usize)> = vec![(start, 0)];

    while let Some(frame) = stack.last_mut() {
        let (node, next) = *frame;
        let neighbors = graph.neighbors(node);

        if next < neighbors.len() {
            frame.1 += 1;
            let neighbor = neighbors[next].to;
            match state[neighbor] {
                VisitState::Unvisited => {
                    state[neighbor] = VisitState::InProgress;
                    stack.push((neighbor, 0));
                }
                VisitState::InProgress => return true,
                VisitState::Done => {}
            }
        } else {
            state[node] = VisitState::Done;
            stack.pop();
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_undirected_tree_has_no_cycle() {
        let graph = Graph::undirected(5, &[(0, 1), (0, 2), (2, 3), (2, 4)]).unwrap();
        assert!(!has_cycle_undirected_bfs(&graph));
        assert!(!has_cycle_undirected_dfs(&graph));
    }

    #[test]
    fn test_undirected_cycle() {
        let graph = Graph::undirected(5, &[(0, 1), (1, 2), (2, 3), (3, 1), (3, 4)]).unwrap();
        assert!(has_cycle_undirected_bfs(&graph));
        assert!(has_cycle_undirected_dfs(&graph));
    }

    #[test]
    fn test_undirected_cycle_in_later_component() {
        let graph = Graph::undirected(6, &[(0, 1), (2, 3), (3, 4), (4, 5), (5, 2)]).unwrap();
        assert!(has_cycle_undirected_bfs(&graph));
        assert!(has_cycle_undirected_dfs(&graph));
    }

    #[test]
    fn test_parallel_edges_form_a_cycle() {
        let graph = Graph::undirected(2, &[(0, 1), (0, 1)]).unwrap();
        assert!(has_cycle_undirected_bfs(&graph));
        assert!(has_cycle_undirected_dfs(&graph));
    }

    #[test]
    fn test_undirected_self_loop() {
        let graph = Graph::undirected(2, &[(0, 1), (1, 1)]).unwrap();
        assert!(has_cycle_undirected_bfs(&graph));
        assert!(has_cycle_undirected_dfs(&graph));
    }

    #[test]
    fn test_directed_dag() {
        let graph = Graph::directed(4, &[(0, 1), (0, 2), (1, 3), (2, 3)]).unwrap();
        assert!(!has_cycle_directed_dfs(&graph));
        assert!(!has_cycle_directed_kahn(&graph));
    }

    #[test]
    fn test_directed_cycle() {
        let graph = Graph::directed(4, &[(0, 1), (1, 2), (2, 3), (3, 1)]).unwrap();
        assert!(has_cycle_directed_dfs(&graph));
        assert!(has_cycle_directed_kahn(&graph));
    }

    #[test]
    fn test_directed_cross_edge_is_not_a_cycle() {
        // 2 is reached again from 0 after finishing via 1
        let graph = Graph::directed(3, &[(0, 1), (1, 2), (0, 2)]).unwrap();
        assert!(!has_cycle_directed_dfs(&graph));
    }

    #[test]
    fn test_directed_self_loop() {
        let graph = Graph::directed(1, &[(0, 0)]).unwrap();
        assert!(has_cycle_directed_dfs(&graph));
        assert!(has_cycle_directed_kahn(&graph));
    }

    #[test]
    fn test_eventual_safe_nodes() {
        let graph = Graph::directed(
            7,
            &[(0, 1), (0, 2), (1, 2), (1, 3), (2, 5), (3, 0), (4, 5)],
        )
        .unwrap();
        assert_eq!(eventual_safe_nodes(&graph), vec![2, 4, 5, 6]);
    }

    #[test]
    fn test_node_leading_into_cycle_is_unsafe() {
        // 3 -> 0 <-> 1, and 2 is terminal
        let graph = Graph::directed(4, &[(0, 1), (1, 0), (3, 0), (3, 2)]).unwrap();
        assert_eq!(eventual_safe_nodes(&graph), vec![2]);
    }

    #[test]
    fn test_kahn_order_partial_on_cycle() {
        let graph = Graph::directed(4, &[(0, 1), (1, 2), (2, 1), (0, 3)]).unwrap();
        assert_eq!(kahn_order(&graph), vec![0, 3]);
    }
}
