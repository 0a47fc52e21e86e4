use orbdrop_core::{Cell, Grid, Rank};
use serde::{Deserialize, Serialize};

use crate::fusion::{resolve_chain, FusionChain};
use crate::gravity::apply_gravity;

/// Where a ball landed and what the landing set off.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct Placement {
    pub cell: Cell,
    pub rank: Rank,
    pub chain: FusionChain,
}

/// Drop `rank` into `column`: place it on the lowest empty cell, run the
/// fusion chain from there, then settle the grid.
///
/// Returns `None` and leaves `grid` untouched if the column is full.
pub fn apply_drop(
    grid: &mut Grid,
    column: usize,
    rank: Rank,
    max_rank: Rank,
) -> Option<Placement> {
    let row = grid.lowest_empty(column)?;
    let cell = Cell::new(row, column);
    grid.put(cell, rank);

    let chain = resolve_chain(grid, cell, max_rank);
    apply_gravity(grid);

    Some(Placement { cell, rank, chain })
}

/// Non-mutating variant for search.
pub fn simulate_drop(
    grid: &Grid,
    column: usize,
    rank: Rank,
    max_rank: Rank,
) -> Option<(Grid, Placement)> {
    let mut next = grid.clone();
    let placement = apply_drop(&mut next, column, rank, max_rank)?;
    Some((next, placement))
}

#[cfg(test)]
mod tests {
    use super::*;
    use orbdrop_core::EMPTY;

    #[test]
    fn test_drop_lands_on_bottom() {
        let mut g = Grid::default();
        let p = apply_drop(&mut g, 3, 2, 10).expect("column has room");
        assert_eq!(p.cell, Cell::new(5, 3));
        assert!(p.chain.is_empty());
        assert_eq!(g.get(5, 3), 2);
    }

    #[test]
    fn test_drop_stacks() {
        let mut g = Grid::default();
        apply_drop(&mut g, 0, 1, 10);
        let p = apply_drop(&mut g, 0, 2, 10).unwrap();
        assert_eq!(p.cell, Cell::new(4, 0));
    }

    #[test]
    fn test_full_column_untouched() {
        let mut g = Grid::new(2, 2);
        g.set(0, 0, 1);
        g.set(1, 0, 2);
        let before = g.clone();
        assert!(apply_drop(&mut g, 0, 3, 10).is_none());
        assert_eq!(g, before);
    }

    #[test]
    fn test_drop_merges_with_bottom_pair() {
        let mut g = Grid::default();
        g.set(5, 0, 1);
        g.set(5, 1, 1);
        let p = apply_drop(&mut g, 0, 1, 10).unwrap();
        assert_eq!(p.cell, Cell::new(4, 0));
        assert_eq!(p.chain.points, 2);
        assert_eq!(g.get(5, 0), 2);
        assert_eq!(g.get(4, 0), EMPTY);
        assert_eq!(g.get(5, 1), 1);
    }

    #[test]
    fn test_simulate_leaves_source() {
        let g = Grid::default();
        let (next, p) = simulate_drop(&g, 2, 1, 10).unwrap();
        assert!(g.is_empty());
        assert_eq!(next.at(p.cell), 1);
    }
}
