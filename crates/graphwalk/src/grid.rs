//! Fixed-size 2-D grids with implicit neighbor adjacency.

use crate::error::{GraphError, Result};
use serde::{Deserialize, Serialize};

/// Row/column address of a grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    /// Zero-based row.
    pub row: usize,
    /// Zero-based column.
    pub col: usize,
}

impl Cell {
    /// Create a cell address.
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Which cells count as neighbors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Connectivity {
    /// Up, right, down, left.
    #[default]
    Four,
    /// The four orthogonal neighbors plus the four diagonals.
    Eight,
}

/// Orthogonal offsets in up, right, down, left order.
const FOUR: [(isize, isize); 4] = [(-1, 0), (0, 1), (1, 0), (0, -1)];

/// 3×3 neighborhood minus the center, row-major.
const EIGHT: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

impl Connectivity {
    /// Neighbor offsets as `(row_delta, col_delta)`.
    #[must_use]
    pub fn offsets(self) -> &'static [(isize, isize)] {
        match self {
            Connectivity::Four => &FOUR,
            Connectivity::Eight => &EIGHT,
        }
    }
}

/// Row-major rectangular grid of cell labels.
///
/// A grid always has at least one row and one column.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid<T> {
    rows: usize,
    cols: usize,
    cells: Vec<T>,
}

impl<T> Grid<T> {
    /// Build a grid from rows.
    ///
    /// # Errors
    ///
    /// - [`GraphError::EmptyInput`] for zero rows or a zero-width first row
    /// - [`GraphError::DimensionMismatch`] if rows differ in length
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self> {
        let row_count = rows.len();
        let cols = rows.first().map_or(0, Vec::len);
        if row_count == 0 || cols == 0 {
            return Err(GraphError::EmptyInput);
        }

        let mut cells = Vec::with_capacity(row_count * cols);
        for row in rows {
            if row.len() != cols {
                return Err(GraphError::DimensionMismatch {
                    expected: cols,
                    actual: row.len(),
                });
            }
            cells.extend(row);
        }

        Ok(Self {
            rows: row_count,
            cols,
            cells,
        })
    }

    /// Number of rows.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Total number of cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always `false`; kept for API symmetry with collections.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Returns `true` if `cell` lies inside the grid.
    #[must_use]
    pub fn contains(&self, cell: Cell) -> bool {
        cell.row < self.rows && cell.col < self.cols
    }

    /// Returns `true` if `cell` is in the first or last row or column.
    #[must_use]
    pub fn is_boundary(&self, cell: Cell) -> bool {
        cell.row == 0 || cell.col == 0 || cell.row + 1 == self.rows || cell.col + 1 == self.cols
    }

    /// Label at `cell`, or `None` when out of bounds.
    #[must_use]
    pub fn get(&self, cell: Cell) -> Option<&T> {
        self.contains(cell).then(|| &self.cells[self.flat_index(cell)])
    }

    /// Overwrite the label at `cell`.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::InvalidNodeId`] if `cell` is out of bounds.
    pub fn set(&mut self, cell: Cell, value: T) -> Result<()> {
        self.check_cell(cell)?;
        let idx = self.flat_index(cell);
        self.cells[idx] = value;
        Ok(())
    }

    /// Check that `cell` lies inside the grid.
    ///
    /// A cell is a node of the implicit grid graph, so an out-of-bounds cell is
    /// reported as an invalid node with its row-major index.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::InvalidNodeId`] if `cell` is out of bounds.
    pub fn check_cell(&self, cell: Cell) -> Result<()> {
        if self.contains(cell) {
            Ok(())
        } else {
            Err(GraphError::InvalidNodeId {
                node: cell.row.saturating_mul(self.cols).saturating_add(cell.col),
                node_count: self.len(),
            })
        }
    }

    /// Row-major index of an in-bounds cell.
    #[must_use]
    pub fn flat_index(&self, cell: Cell) -> usize {
        cell.row * self.cols + cell.col
    }

    /// Cell at a row-major index.
    #[must_use]
    pub fn cell_at(&self, index: usize) -> Cell {
        Cell::new(index / self.cols, index % self.cols)
    }

    /// Every cell address in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.len()).map(|i| self.cell_at(i))
    }

    /// Cells on the boundary, each once, in row-major order.
    pub fn boundary_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells().filter(|&cell| self.is_boundary(cell))
    }

    /// In-bounds neighbors of `cell`, in the order given by [`Connectivity::offsets`].
    pub fn neighbors(
        &self,
        cell: Cell,
        connectivity: Connectivity,
    ) -> impl Iterator<Item = Cell> + '_ {
        connectivity.offsets().iter().filter_map(move |&(dr, dc)| {
            let row = cell.row.checked_add_signed(dr)?;
            let col = cell.col.checked_add_signed(dc)?;
            let next = Cell::new(row, col);
            self.contains(next).then_some(next)
        })
    }

    /// Apply `f` to every label, keeping the shape.
    #[must_use]
    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> Grid<U> {
        Grid {
            rows: self.rows,
            cols: self.cols,
            cells: self.cells.iter().map(f).collect(),
        }
    }

    /// Grid with the same shape, every cell set to `value`.
    #[must_use]
    pub fn filled<U: Clone>(&self, value: U) -> Grid<U> {
        Grid {
            rows: self.rows,
            cols: self.cols,
            cells: vec![value; self.len()],
        }
    }
}

impl<T: Clone> Grid<T> {
    /// Copy the labels back out as rows.
    #[must_use]
    pub fn to_rows(&self) -> Vec<Vec<T>> {
        self.cells.chunks(self.cols).map(<[T]>::to_vec).collect()
    }
}

impl<T> std::ops::Index<Cell> for Grid<T> {
    type Output = T;

    fn index(&self, cell: Cell) -> &T {
        &self.cells[self.flat_index(cell)]
    }
}

impl<T> std::ops::IndexMut<Cell> for Grid<T> {
    fn index_mut(&mut self, cell: Cell) -> &mut T {
        let idx = self.flat_index(cell);
        &mut self.cells[idx]
    }
}
