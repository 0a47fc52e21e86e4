//! Fusion chain resolution.
//!
//! One merge per iteration, gravity after every merge, focus follows the
//! merged ball. Neighbour priority decides which equal neighbour wins.

use orbdrop_core::{Cell, Grid, Rank, EMPTY};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::gravity::apply_gravity;

/// Neighbour scan order as `(d_row, d_column)`: down, up, left, right.
pub const NEIGHBOR_ORDER: [(isize, isize); 4] = [(1, 0), (-1, 0), (0, -1), (0, 1)];

/// A single merge step.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Merge {
    /// Cell that receives the merged ball (the lower of the pair).
    pub target: Cell,
    /// Cell emptied by the merge.
    pub cleared: Cell,
    /// Rank produced, `max_rank + 1` on annihilation.
    pub rank: Rank,
    /// Both balls vanished instead of producing `rank`.
    pub annihilated: bool,
}

impl Merge {
    /// Points awarded for this merge.
    pub fn points(&self) -> u32 {
        self.rank as u32
    }
}

pub type MergeList = SmallVec<[Merge; 8]>;

/// Outcome of one chain.
#[derive(Clone, PartialEq, Debug, Default, Serialize, Deserialize)]
pub struct FusionChain {
    pub merges: MergeList,
    pub points: u32,
}

impl FusionChain {
    pub fn is_empty(&self) -> bool {
        self.merges.is_empty()
    }

    /// Targets in merge order, duplicates kept.
    pub fn targets(&self) -> impl Iterator<Item = Cell> + '_ {
        self.merges.iter().map(|m| m.target)
    }
}

/// First neighbour of `cell` (in [`NEIGHBOR_ORDER`]) holding `rank`.
pub fn matching_neighbor(grid: &Grid, cell: Cell, rank: Rank) -> Option<Cell> {
    if rank == EMPTY {
        return None;
    }
    NEIGHBOR_ORDER
        .iter()
        .filter_map(|&(dr, dc)| grid.offset(cell, dr, dc))
        .find(|&n| grid.at(n) == rank)
}

/// Run the chain starting at `seed` until the focus cell has no equal neighbour.
///
/// Ranks reaching `max_rank + 1` annihilate. An empty focus cell ends the chain.
pub fn resolve_chain(grid: &mut Grid, seed: Cell, max_rank: Rank) -> FusionChain {
    let mut chain = FusionChain::default();
    let mut focus = seed;

    loop {
        let rank = grid.at(focus);
        let Some(neighbor) = matching_neighbor(grid, focus, rank) else {
            break;
        };

        let (target, cleared) = if neighbor.row > focus.row {
            (neighbor, focus)
        } else {
            (focus, neighbor)
        };

        let merged = rank + 1;
        let annihilated = merged > max_rank;
        grid.put(target, if annihilated { EMPTY } else { merged });
        grid.put(cleared, EMPTY);

        let step = Merge {
            target,
            cleared,
            rank: merged,
            annihilated,
        };
        chain.points += step.points();
        chain.merges.push(step);

        apply_gravity(grid);
        focus = target;
    }

    chain
}
