//! grid representation - row-major rank cells, row 0 is the top row
//! dimensions are fixed at construction

use serde::{Deserialize, Serialize};

/// Ball rank. 0 is an empty cell.
pub type Rank = u8;

pub const EMPTY: Rank = 0;

/// A grid coordinate. Larger `row` is physically lower.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub row: usize,
    pub column: usize,
}

impl Cell {
    pub const fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    #[error("grid must have at least one row and one column")]
    Empty,

    #[error("row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
}

/// Fixed-size grid of ball ranks.
#[derive(Clone, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<Rank>>", into = "Vec<Vec<Rank>>")]
pub struct Grid {
    rows: usize,
    columns: usize,
    cells: Vec<Rank>,
}

impl Grid {
    pub const DEFAULT_ROWS: usize = 6;
    pub const DEFAULT_COLUMNS: usize = 5;

    /// Empty grid. Zero dimensions are bumped to 1.
    pub fn new(rows: usize, columns: usize) -> Self {
        let rows = rows.max(1);
        let columns = columns.max(1);
        Self {
            rows,
            columns,
            cells: vec![EMPTY; rows * columns],
        }
    }

    /// Build a grid from top-to-bottom rows.
    pub fn from_rows<R: AsRef<[Rank]>>(rows: &[R]) -> Result<Self, GridError> {
        let columns = rows.first().map(|r| r.as_ref().len()).unwrap_or(0);
        if rows.is_empty() || columns == 0 {
            return Err(GridError::Empty);
        }

        let mut cells = Vec::with_capacity(rows.len() * columns);
        for (row, values) in rows.iter().enumerate() {
            let values = values.as_ref();
            if values.len() != columns {
                return Err(GridError::Ragged {
                    row,
                    expected: columns,
                    found: values.len(),
                });
            }
            cells.extend_from_slice(values);
        }

        Ok(Self {
            rows: rows.len(),
            columns,
            cells,
        })
    }

    pub fn to_rows(&self) -> Vec<Vec<Rank>> {
        self.cells
            .chunks(self.columns)
            .map(|row| row.to_vec())
            .collect()
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn columns(&self) -> usize {
        self.columns
    }

    #[inline]
    pub fn bottom_row(&self) -> usize {
        self.rows - 1
    }

    #[inline]
    pub fn get(&self, row: usize, column: usize) -> Rank {
        self.cells[self.index(row, column)]
    }

    #[inline]
    pub fn set(&mut self, row: usize, column: usize, rank: Rank) {
        let idx = self.index(row, column);
        self.cells[idx] = rank;
    }

    #[inline]
    pub fn at(&self, cell: Cell) -> Rank {
        self.get(cell.row, cell.column)
    }

    #[inline]
    pub fn put(&mut self, cell: Cell, rank: Rank) {
        self.set(cell.row, cell.column, rank);
    }

    /// Cell offset by `(d_row, d_column)`, or `None` when it falls off the grid.
    pub fn offset(&self, cell: Cell, d_row: isize, d_column: isize) -> Option<Cell> {
        let row = cell.row.checked_add_signed(d_row)?;
        let column = cell.column.checked_add_signed(d_column)?;
        (row < self.rows && column < self.columns).then_some(Cell::new(row, column))
    }

    /// Lowest empty row in `column`, scanning bottom-up.
    pub fn lowest_empty(&self, column: usize) -> Option<usize> {
        (0..self.rows).rev().find(|&row| self.get(row, column) == EMPTY)
    }

    pub fn is_column_full(&self, column: usize) -> bool {
        self.lowest_empty(column).is_none()
    }

    /// Number of filled cells in `column`.
    pub fn column_height(&self, column: usize) -> usize {
        (0..self.rows)
            .filter(|&row| self.get(row, column) != EMPTY)
            .count()
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|&rank| rank != EMPTY)
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|&rank| rank == EMPTY)
    }

    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|&&rank| rank != EMPTY).count()
    }

    pub fn max_rank(&self) -> Rank {
        self.cells.iter().copied().max().unwrap_or(EMPTY)
    }

    pub fn clear(&mut self) {
        self.cells.fill(EMPTY);
    }

    /// Raw row-major cells.
    #[inline]
    pub fn cells(&self) -> &[Rank] {
        &self.cells
    }

    /// Iterate `(cell, rank)` pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Cell, Rank)> + '_ {
        let columns = self.columns;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &rank)| (Cell::new(i / columns, i % columns), rank))
    }

    #[inline]
    fn index(&self, row: usize, column: usize) -> usize {
        debug_assert!(row < self.rows && column < self.columns);
        row * self.columns + column
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new(Self::DEFAULT_ROWS, Self::DEFAULT_COLUMNS)
    }
}

impl TryFrom<Vec<Vec<Rank>>> for Grid {
    type Error = GridError;

    fn try_from(rows: Vec<Vec<Rank>>) -> Result<Self, Self::Error> {
        Self::from_rows(&rows)
    }
}

impl From<Grid> for Vec<Vec<Rank>> {
    fn from(grid: Grid) -> Self {
        grid.to_rows()
    }
}

impl std::fmt::Display for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in self.cells.chunks(self.columns) {
            for &rank in row {
                if rank == EMPTY {
                    write!(f, "  .")?;
                } else {
                    write!(f, "{:>3}", rank)?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
