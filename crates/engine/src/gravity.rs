//! Column gravity: compact every column's balls to the bottom, order preserved.

use orbdrop_core::{Grid, EMPTY};

/// Settle one column with a write pointer walking up from the bottom row.
/// Returns true if any ball moved.
pub fn settle_column(grid: &mut Grid, column: usize) -> bool {
    let mut moved = false;
    let mut write = grid.bottom_row() as isize;

    for row in (0..grid.rows()).rev() {
        let rank = grid.get(row, column);
        if rank == EMPTY {
            continue;
        }
        let target = write as usize;
        if target != row {
            grid.set(target, column, rank);
            grid.set(row, column, EMPTY);
            moved = true;
        }
        write -= 1;
    }

    moved
}

/// Apply gravity to every column. Returns true if any ball moved.
pub fn apply_gravity(grid: &mut Grid) -> bool {
    let mut moved = false;
    for column in 0..grid.columns() {
        moved |= settle_column(grid, column);
    }
    moved
}

/// True when no column has an empty cell beneath a ball.
pub fn is_settled(grid: &Grid) -> bool {
    unsettled_column(grid).is_none()
}

/// First column with a ball above an empty cell.
pub fn unsettled_column(grid: &Grid) -> Option<usize> {
    (0..grid.columns()).find(|&column| {
        let mut seen_empty = false;
        for row in (0..grid.rows()).rev() {
            if grid.get(row, column) == EMPTY {
                seen_empty = true;
            } else if seen_empty {
                return true;
            }
        }
        false
    })
}
