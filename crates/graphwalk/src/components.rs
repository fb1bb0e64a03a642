//! Connected regions of grids and adjacency matrices.
//!
//! A grid is an implicit graph: every cell is a node and edges join
//! neighboring cells (per [`Connectivity`]) that satisfy a membership
//! predicate, e.g. "is land" or "has the start color".

use crate::Traversal;
use crate::distance::flood_levels;
use crate::error::Result;
use crate::graph::AdjacencyMatrix;
use crate::grid::{Cell, Connectivity, Grid};
use crate::types::NodeId;
use std::collections::{HashSet, VecDeque};

/// Number of islands (connected land regions) using BFS.
#[must_use]
pub fn count_islands(grid: &Grid<bool>, connectivity: Connectivity) -> usize {
    count_islands_with(grid, connectivity, Traversal::Bfs)
}

/// Number of islands using the given flooding strategy.
///
/// BFS and DFS produce the same grouping and therefore the same count.
#[must_use]
pub fn count_islands_with(
    grid: &Grid<bool>,
    connectivity: Connectivity,
    traversal: Traversal,
) -> usize {
    let mut seen = grid.filled(false);
    let mut count = 0;

    for cell in grid.cells() {
        if grid[cell] && !seen[cell] {
            flood_region(grid, cell, connectivity, traversal, |&land| land, &mut seen);
            count += 1;
        }
    }

    tracing::debug!(islands = count, ?connectivity, ?traversal, "Counted islands");
    count
}

/// Island id of every land cell, numbered from zero in row-major order of
/// each island's first cell. Water cells are `None`.
#[must_use]
pub fn island_labels(grid: &Grid<bool>, connectivity: Connectivity) -> Grid<Option<usize>> {
    let mut seen = grid.filled(false);
    let mut labels = grid.filled(None);
    let mut next_label = 0;

    for cell in grid.cells() {
        if grid[cell] && !seen[cell] {
            let region = flood_region(
                grid,
                cell,
                connectivity,
                Traversal::Bfs,
                |&land| land,
                &mut seen,
            );
            for member in region {
                labels[member] = Some(next_label);
            }
            next_label += 1;
        }
    }

    labels
}

/// Recolor the 4-connected region that shares the start cell's color.
///
/// Filling with the color already at `start` returns an unchanged copy.
///
/// ```
/// use graphwalk::{components::flood_fill, Cell, Grid};
///
/// let image = Grid::from_rows(vec![vec![1, 1, 1], vec![1, 1, 0], vec![1, 0, 1]]).unwrap();
/// let filled = flood_fill(&image, Cell::new(1, 1), 2).unwrap();
///
/// assert_eq!(filled.to_rows(), vec![vec![2, 2, 2], vec![2, 2, 0], vec![2, 0, 1]]);
/// ```
///
/// # Errors
///
/// Returns [`GraphError::InvalidNodeId`](crate::GraphError::InvalidNodeId) if
/// `start` is outside the image.
pub fn flood_fill(image: &Grid<i64>, start: Cell, new_color: i64) -> Result<Grid<i64>> {
    image.check_cell(start)?;
    let original = image[start];
    let mut filled = image.clone();
    if original == new_color {
        return Ok(filled);
    }

    let mut seen = image.filled(false);
    let region = flood_region(
        image,
        start,
        Connectivity::Four,
        Traversal::Dfs,
        |&color| color == original,
        &mut seen,
    );
    tracing::trace!(cells = region.len(), "Flood fill region");
    for cell in region {
        filled[cell] = new_color;
    }

    Ok(filled)
}

/// Number of provinces: connected groups of cities in an adjacency matrix.
///
/// A non-zero entry in either direction connects two cities.
#[must_use]
pub fn count_provinces(matrix: &AdjacencyMatrix) -> usize {
    let n = matrix.node_count();
    let mut visited = vec![false; n];
    let mut provinces = 0;

    for city in 0..n {
        if visited[city] {
            continue;
        }
        provinces += 1;
        visited[city] = true;
        let mut stack: Vec<NodeId> = vec![city];

        while let Some(current) = stack.pop() {
            for other in 0..n {
                let connected = matrix.has_edge(current, other) || matrix.has_edge(other, current);
                if connected && !visited[other] {
                    visited[other] = true;
                    stack.push(other);
                }
            }
        }
    }

    provinces
}

/// Turn every `'O'` region that does not touch the boundary into `'X'`.
///
/// Only `'O'` cells are open; any other character is a wall and is copied
/// unchanged.
#[must_use]
pub fn capture_surrounded(board: &Grid<char>) -> Grid<char> {
    let open = |c: &char| *c == 'O';
    let escapes = flood_levels(
        board,
        board.boundary_cells().filter(|&cell| open(&board[cell])),
        open,
    );

    let mut captured = board.clone();
    for cell in board.cells() {
        if open(&board[cell]) && !escapes[cell].is_reachable() {
            captured[cell] = 'X';
        }
    }
    captured
}

/// Number of land cells from which the boundary cannot be reached.
#[must_use]
pub fn count_enclaves(grid: &Grid<bool>) -> usize {
    let escapes = flood_levels(
        grid,
        grid.boundary_cells().filter(|&cell| grid[cell]),
        |&land| land,
    );

    grid.cells()
        .filter(|&cell| grid[cell] && !escapes[cell].is_reachable())
        .count()
}

/// Number of distinct island shapes under translation.
///
/// Each 4-connected island is recorded as the sorted offsets of its cells
/// from its first row-major cell. Rotated or reflected copies count as
/// different shapes.
#[must_use]
pub fn count_distinct_islands(grid: &Grid<bool>) -> usize {
    let mut seen = grid.filled(false);
    let mut shapes: HashSet<Vec<(isize, isize)>> = HashSet::new();

    for origin in grid.cells() {
        if !grid[origin] || seen[origin] {
            continue;
        }
        let region = flood_region(
            grid,
            origin,
            Connectivity::Four,
            Traversal::Bfs,
            |&land| land,
            &mut seen,
        );
        let mut shape: Vec<(isize, isize)> = region
            .iter()
            .map(|cell| (offset(cell.row, origin.row), offset(cell.col, origin.col)))
            .collect();
        shape.sort_unstable();
        shapes.insert(shape);
    }

    shapes.len()
}

#[allow(clippy::cast_possible_wrap)]
fn offset(value: usize, origin: usize) -> isize {
    value as isize - origin as isize
}

/// Collect the region containing `start`, marking its cells in `seen`.
///
/// BFS takes from the front of the work list and DFS from the back; a cell
/// is marked when it is added, so each cell is processed once either way.
fn flood_region<T>(
    grid: &Grid<T>,
    start: Cell,
    connectivity: Connectivity,
    traversal: Traversal,
    member: impl Fn(&T) -> bool,
    seen: &mut Grid<bool>,
) -> Vec<Cell> {
    let mut region = Vec::new();
    let mut work = VecDeque::from([start]);
    seen[start] = true;

    loop {
        let next = match traversal {
            Traversal::Bfs => work.pop_front(),
            Traversal::Dfs => work.pop_back(),
        };
        let Some(cell) = next else {
            break;
        };
        region.push(cell);

        for neighbor in grid.neighbors(cell, connectivity) {
            if !seen[neighbor] && member(&grid[neighbor]) {
                seen[neighbor] = true;
                work.push_back(neighbor);
            }
        }
    }

    region
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GraphError;

    fn land(rows: &[&str]) -> Grid<bool> {
        Grid::from_rows(
            rows.iter()
                .map(|row| row.chars().map(|c| c == '1').collect())
                .collect(),
        )
        .unwrap()
    }

    fn board(rows: &[&str]) -> Grid<char> {
        Grid::from_rows(rows.iter().map(|row| row.chars().collect()).collect()).unwrap()
    }

    #[test]
    fn test_islands_four_vs_eight() {
        let grid = land(&["1100", "1100", "0010", "0001"]);
        assert_eq!(count_islands(&grid, Connectivity::Four), 3);
        assert_eq!(count_islands(&grid, Connectivity::Eight), 1);
    }

    #[test]
    fn test_islands_bfs_and_dfs_agree() {
        let grid = land(&["11011", "10001", "00100", "11011"]);
        for connectivity in [Connectivity::Four, Connectivity::Eight] {
            assert_eq!(
                count_islands_with(&grid, connectivity, Traversal::Bfs),
                count_islands_with(&grid, connectivity, Traversal::Dfs)
            );
        }
        assert_eq!(count_islands(&grid, Connectivity::Four), 5);
    }

    #[test]
    fn test_all_water() {
        assert_eq!(count_islands(&land(&["000", "000"]), Connectivity::Eight), 0);
    }

    #[test]
    fn test_island_labels() {
        let labels = island_labels(&land(&["101", "001"]), Connectivity::Four);
        assert_eq!(
            labels.to_rows(),
            vec![vec![Some(0), None, Some(1)], vec![None, None, Some(1)]]
        );
    }

    #[test]
    fn test_flood_fill_same_color_is_noop() {
        let image = Grid::from_rows(vec![vec![0, 0], vec![0, 1]]).unwrap();
        assert_eq!(flood_fill(&image, Cell::new(0, 0), 0).unwrap(), image);
    }

    #[test]
    fn test_flood_fill_out_of_bounds() {
        let image = Grid::from_rows(vec![vec![0, 0], vec![0, 1]]).unwrap();
        assert_eq!(
            flood_fill(&image, Cell::new(2, 0), 5),
            Err(GraphError::InvalidNodeId {
                node: 4,
                node_count: 4
            })
        );
    }

    #[test]
    fn test_flood_fill_ignores_diagonals() {
        let image = Grid::from_rows(vec![vec![1, 0], vec![0, 1]]).unwrap();
        let filled = flood_fill(&image, Cell::new(0, 0), 7).unwrap();
        assert_eq!(filled.to_rows(), vec![vec![7, 0], vec![0, 1]]);
    }

    #[test]
    fn test_provinces() {
        let matrix =
            AdjacencyMatrix::from_rows(&[vec![1, 1, 0], vec![1, 1, 0], vec![0, 0, 1]]).unwrap();
        assert_eq!(count_provinces(&matrix), 2);

        let isolated =
            AdjacencyMatrix::from_rows(&[vec![1, 0, 0], vec![0, 1, 0], vec![0, 0, 1]]).unwrap();
        assert_eq!(count_provinces(&isolated), 3);
    }

    #[test]
    fn test_provinces_one_way_entry_connects() {
        let matrix = AdjacencyMatrix::from_rows(&[vec![0, 1], vec![0, 0]]).unwrap();
        assert_eq!(count_provinces(&matrix), 1);
    }

    #[test]
    fn test_capture_surrounded() {
        let result = capture_surrounded(&board(&["XXXX", "XOOX", "XXOX", "XOXX"]));
        assert_eq!(result, board(&["XXXX", "XXXX", "XXXX", "XOXX"]));
    }

    #[test]
    fn test_capture_keeps_other_walls() {
        let result = capture_surrounded(&board(&["####.", "#O#O.", "####."]));
        assert_eq!(result, board(&["####.", "#X#X.", "####."]));
        let edge = capture_surrounded(&board(&["####", "#O#O", "####"]));
        assert_eq!(edge, board(&["####", "#X#O", "####"]));
    }

    #[test]
    fn test_enclaves() {
        assert_eq!(count_enclaves(&land(&["0000", "1010", "0110", "0000"])), 3);
        assert_eq!(count_enclaves(&land(&["0110", "0010", "0010", "0000"])), 0);
    }

    #[test]
    fn test_distinct_islands() {
        assert_eq!(
            count_distinct_islands(&land(&["11000", "10000", "00011", "00010"])),
            1
        );
        assert_eq!(
            count_distinct_islands(&land(&["11011", "10000", "00001", "11011"])),
            3
        );
    }

    #[test]
    fn test_reflected_island_is_distinct() {
        assert_eq!(count_distinct_islands(&land(&["110", "000", "011"])), 1);
        assert_eq!(count_distinct_islands(&land(&["10", "11", "00", "01", "11"])), 2);
    }
}
