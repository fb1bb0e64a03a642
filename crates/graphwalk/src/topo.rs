//! Topological sort and course scheduling.
//!
//! Both sorts return *a* valid order; when several orders exist the one
//! produced depends on node and neighbor-list order. `None` means the graph
//! has a cycle and no order exists.

use crate::cycle::kahn_order;
use crate::error::Result;
use crate::graph::{Direction, Graph, GraphBuilder};
use crate::types::NodeId;

/// Kahn's algorithm: the removal order of zero in-degree nodes.
#[must_use]
pub fn toposort_kahn(graph: &Graph) -> Option<Vec<NodeId>> {
    let order = kahn_order(graph);
    (order.len() == graph.node_count()).then_some(order)
}

/// DFS post-order, reversed.
///
/// A node is finished only after every node reachable from it, so reversing
/// the finishing order places each node before all of its successors. DFS
/// roots are tried in ascending id order.
#[must_use]
pub fn toposort_dfs(graph: &Graph) -> Option<Vec<NodeId>> {
    #[derive(Clone, Copy, PartialEq, Eq)]
    enum Mark {
        New,
        Open,
        Closed,
    }

    let n = graph.node_count();
    let mut mark = vec![Mark::New; n];
    let mut finished = Vec::with_capacity(n);

    for root in 0..n {
        if mark[root] != Mark::New {
            continue;
        }
        mark[root] = Mark::Open;
        let mut stack: Vec<(NodeId, usize)> = vec![(root, 0)];

        while let Some(frame) = stack.last_mut() {
            let (node, next) = *frame;
            let neighbors = graph.neighbors(node);

            if next < neighbors.len() {
                frame.1 += 1;
                let neighbor = neighbors[next].to;
                match mark[neighbor] {
                    Mark::New => {
                        mark[neighbor] = Mark::Open;
                        stack.push((neighbor, 0));
                    }
                    Mark::Open => {
                        tracing::debug!(node, neighbor, "Back-edge, no topological order");
                        return None;
                    }
                    Mark::Closed => {}
                }
            } else {
                mark[node] = Mark::Closed;
                finished.push(node);
                stack.pop();
            }
        }
    }

    finished.reverse();
    Some(finished)
}

/// Returns `true` if `order` is a permutation of the graph's nodes that puts
/// `u` before `v` for every edge `u -> v`.
#[must_use]
pub fn is_topological_order(graph: &Graph, order: &[NodeId]) -> bool {
    let n = graph.node_count();
    if order.len() != n {
        return false;
    }

    let mut position = vec![usize::MAX; n];
    for (pos, &node) in order.iter().enumerate() {
        if node >= n || position[node] != usize::MAX {
            return false;
        }
        position[node] = pos;
    }

    graph.edges().all(|(u, v, _)| position[u] < position[v])
}

/// Whether every course can be completed.
///
/// `(a, b)` in `prerequisites` means course `b` must be taken before course
/// `a`, i.e. the edge `b -> a`.
///
/// # Errors
///
/// Returns [`GraphError::InvalidNodeId`] if a course id is `>= course_count`.
pub fn can_finish(course_count: usize, prerequisites: &[(NodeId, NodeId)]) -> Result<bool> {
    Ok(find_order(course_count, prerequisites)?.is_some())
}

/// An order in which all courses can be taken, or `None` if the
/// prerequisites are circular.
///
/// # Errors
///
/// Returns [`GraphError::InvalidNodeId`] if a course id is `>= course_count`.
pub fn find_order(
    course_count: usize,
    prerequisites: &[(NodeId, NodeId)],
) -> Result<Option<Vec<NodeId>>> {
    let graph = prerequisite_graph(course_count, prerequisites)?;
    Ok(toposort_kahn(&graph))
}

fn prerequisite_graph(course_count: usize, prerequisites: &[(NodeId, NodeId)]) -> Result<Graph> {
    GraphBuilder::new(course_count, Direction::Directed)
        .edges(prerequisites.iter().map(|&(course, required)| (required, course)))
        .build()
        .inspect_err(|err| tracing::debug!(%err, "Invalid prerequisite list"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GraphError;

    fn sample_dag() -> Graph {
        Graph::directed(6, &[(5, 0), (5, 2), (4, 0), (4, 1), (2, 3), (3, 1)]).unwrap()
    }

    #[test]
    fn test_kahn_sample_dag() {
        let graph = sample_dag();
        let order = toposort_kahn(&graph).unwrap();
        assert_eq!(order, vec![4, 5, 0, 2, 3, 1]);
        assert!(is_topological_order(&graph, &order));
    }

    #[test]
    fn test_dfs_sample_dag() {
        let graph = sample_dag();
        let order = toposort_dfs(&graph).unwrap();
        assert_eq!(order, vec![5, 4, 2, 3, 1, 0]);
        assert!(is_topological_order(&graph, &order));
    }

    #[test]
    fn test_unique_order_on_chain() {
        let graph = Graph::directed(4, &[(2, 3), (0, 1), (1, 2)]).unwrap();
        assert_eq!(toposort_kahn(&graph), Some(vec![0, 1, 2, 3]));
        assert_eq!(toposort_dfs(&graph), Some(vec![0, 1, 2, 3]));
    }

    #[test]
    fn test_cycle_has_no_order() {
        let graph = Graph::directed(3, &[(0, 1), (1, 2), (2, 0)]).unwrap();
        assert_eq!(toposort_kahn(&graph), None);
        assert_eq!(toposort_dfs(&graph), None);
    }

    #[test]
    fn test_is_topological_order_rejects_bad_orders() {
        let graph = sample_dag();
        assert!(!is_topological_order(&graph, &[0, 1, 2, 3, 4, 5]));
        assert!(!is_topological_order(&graph, &[5, 4, 2, 3, 1]));
        assert!(!is_topological_order(&graph, &[5, 4, 2, 3, 1, 1]));
    }

    #[test]
    fn test_courses_linear_chain() {
        assert_eq!(can_finish(4, &[(1, 0), (2, 1), (3, 2)]), Ok(true));
        assert_eq!(
            find_order(4, &[(1, 0), (2, 1), (3, 2)]),
            Ok(Some(vec![0, 1, 2, 3]))
        );
    }

    #[test]
    fn test_courses_circular() {
        assert_eq!(can_finish(2, &[(1, 0), (0, 1)]), Ok(false));
        assert_eq!(find_order(2, &[(1, 0), (0, 1)]), Ok(None));
    }

    #[test]
    fn test_courses_without_prerequisites() {
        assert_eq!(find_order(3, &[]), Ok(Some(vec![0, 1, 2])));
    }

    #[test]
    fn test_courses_unknown_course() {
        assert_eq!(
            can_finish(2, &[(2, 0)]),
            Err(GraphError::InvalidNodeId {
                node: 2,
                node_count: 2
            })
        );
    }
}
