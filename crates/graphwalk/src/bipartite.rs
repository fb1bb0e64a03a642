//! Bipartiteness check by 2-coloring.
//!
//! Each uncolored component is seeded at its lowest id with [`Color::Red`].
//! Every traversed edge gives an uncolored neighbor the opposite color; an
//! edge between two nodes of the same color ends the check immediately.
//! The verdict does not depend on traversal order or on which color is
//! assigned first. Directed graphs are colored by their underlying undirected
//! graph, so edge orientation never changes the verdict.

use crate::Traversal;
use crate::graph::Graph;
use crate::types::{Color, NodeId};
use std::collections::VecDeque;

/// BFS-driven bipartiteness check.
#[must_use]
pub fn is_bipartite_bfs(graph: &Graph) -> bool {
    color_graph(graph, Traversal::Bfs).is_some()
}

/// DFS-driven bipartiteness check.
#[must_use]
pub fn is_bipartite_dfs(graph: &Graph) -> bool {
    color_graph(graph, Traversal::Dfs).is_some()
}

/// A valid 2-coloring, or `None` if the graph is not bipartite.
#[must_use]
pub fn two_coloring(graph: &Graph) -> Option<Vec<Color>> {
    color_graph(graph, Traversal::Bfs)
}

fn color_graph(graph: &Graph, traversal: Traversal) -> Option<Vec<Color>> {
    let undirected;
    let graph = if graph.direction().is_directed() {
        undirected = graph.to_undirected();
        &undirected
    } else {
        graph
    };

    let mut colors: Vec<Option<Color>> = vec![None; graph.node_count()];

    for start in 0..graph.node_count() {
        if colors[start].is_some() {
            continue;
        }
        let ok = match traversal {
            Traversal::Bfs => color_component_bfs(graph, start, &mut colors),
            Traversal::Dfs => color_component_dfs(graph, start, &mut colors),
        };
        if !ok {
            tracing::debug!(component_root = start, "Odd cycle found, graph is not bipartite");
            return None;
        }
    }

    colors.into_iter().collect()
}

fn color_component_bfs(graph: &Graph, start: NodeId, colors: &mut [Option<Color>]) -> bool {
    colors[start] = Some(Color::Red);
    let mut queue = VecDeque::from([start]);

    while let Some(node) = queue.pop_front() {
        let Some(color) = colors[node] else {
            continue;
        };
        for neighbor in graph.neighbor_ids(node) {
            match colors[neighbor] {
                None => {
                    colors[neighbor] = Some(color.opposite());
                    queue.push_back(neighbor);
                }
                Some(c) if c == color => return false,
                Some(_) => {}
            }
        }
    }

    true
}

fn color_component_dfs(graph: &Graph, start: NodeId, colors: &mut [Option<Color>]) -> bool {
    colors[start] = Some(Color::Red);
    let mut stack: Vec<(NodeId, usize)> = vec![(start, 0)];

    while let Some(frame) = stack.last_mut() {
        let (node, next) = *frame;
        let neighbors = graph.neighbors(node);
        if next >= neighbors.len() {
            stack.pop();
            continue;
        }
        frame.1 += 1;

        let Some(color) = colors[node] else {
            continue;
        };
        let neighbor = neighbors[next].to;
        match colors[neighbor] {
            None => {
                colors[neighbor] = Some(color.opposite());
                stack.push((neighbor, 0));
            }
            Some(c) if c == color => return false,
            Some(_) => {}
        }
    }

    true
}
