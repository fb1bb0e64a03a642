//! Multi-source BFS on grids.
//!
//! All sources are enqueued at distance zero before any expansion, so the
//! queue always holds cells in non-decreasing distance order and the first
//! distance written to a cell is its minimum over every source.

use crate::grid::{Cell, Connectivity, Grid};
use crate::types::{Distance, Orange};
use std::collections::VecDeque;

/// Distance from every cell to the nearest source cell, 4-directional.
///
/// Unreachable cells (every cell, when there are no sources) are
/// [`Distance::INFINITY`].
#[must_use]
pub fn multi_source_distances<T>(grid: &Grid<T>, is_source: impl Fn(&T) -> bool) -> Grid<Distance> {
    let sources = grid.cells().filter(|&cell| is_source(&grid[cell]));
    flood_levels(grid, sources, |_| true)
}

/// Distance from every cell to the nearest `1`.
///
/// ```
/// use graphwalk::{distance::nearest_one_distances, Distance, Grid};
///
/// let grid = Grid::from_rows(vec![vec![1, 0, 0]]).unwrap();
/// let distances = nearest_one_distances(&grid);
///
/// assert_eq!(distances.to_rows(), vec![vec![Distance(0), Distance(1), Distance(2)]]);
/// ```
#[must_use]
pub fn nearest_one_distances(grid: &Grid<u8>) -> Grid<Distance> {
    multi_source_distances(grid, |&value| value == 1)
}

/// Minutes until no fresh orange remains.
///
/// Each minute every fresh orange 4-adjacent to a rotten one rots. Returns
/// `Some(0)` when there is nothing to rot, and `None` when some fresh orange
/// is cut off from every rotten one.
#[must_use]
pub fn rotting_time(grid: &Grid<Orange>) -> Option<u32> {
    let rotten = grid.cells().filter(|&cell| grid[cell] == Orange::Rotten);
    let levels = flood_levels(grid, rotten, |orange| *orange == Orange::Fresh);

    let mut minutes = 0;
    for cell in grid.cells().filter(|&cell| grid[cell] == Orange::Fresh) {
        let level = levels[cell];
        if !level.is_reachable() {
            tracing::debug!(row = cell.row, col = cell.col, "Fresh orange never rots");
            return None;
        }
        minutes = minutes.max(level.get());
    }

    Some(minutes)
}

/// Level-by-level flood from `sources`, expanding only into `passable` cells.
pub(crate) fn flood_levels<T>(
    grid: &Grid<T>,
    sources: impl IntoIterator<Item = Cell>,
    passable: impl Fn(&T) -> bool,
) -> Grid<Distance> {
    let mut levels = grid.filled(Distance::INFINITY);
    let mut queue = VecDeque::new();

    for source in sources {
        if !levels[source].is_reachable() {
            levels[source] = Distance::ZERO;
            queue.push_back(source);
        }
    }
    tracing::trace!(sources = queue.len(), "Seeded multi-source flood");

    while let Some(cell) = queue.pop_front() {
        let next = levels[cell].increment();
        for neighbor in grid.neighbors(cell, Connectivity::Four) {
            if !levels[neighbor].is_reachable() && passable(&grid[neighbor]) {
                levels[neighbor] = next;
                queue.push_back(neighbor);
            }
        }
    }

    levels
}
