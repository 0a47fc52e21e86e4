//! orbdrop-eval - heuristics for grid evaluation.

use orbdrop_core::{Grid, EMPTY};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvalWeights {
    pub empty_cells: f32,
    pub adjacent_pairs: f32,
    pub max_height: f32,
    pub bumpiness: f32,
}

impl Default for EvalWeights {
    fn default() -> Self {
        Self {
            empty_cells: 1.0,
            adjacent_pairs: 0.5,
            max_height: -0.75,
            bumpiness: -0.25,
        }
    }
}

pub fn evaluate(grid: &Grid, weights: &EvalWeights) -> f32 {
    let empty = grid.rows() * grid.columns() - grid.filled_count();
    let mut score = empty as f32 * weights.empty_cells;

    score += count_adjacent_pairs(grid) as f32 * weights.adjacent_pairs;

    let heights = column_heights(grid);
    let max_height = heights.iter().max().cloned().unwrap_or(0);
    score += max_height as f32 * weights.max_height;

    // Bumpiness penalty
    let bumpiness: usize = heights.windows(2).map(|w| w[0].abs_diff(w[1])).sum();
    score += bumpiness as f32 * weights.bumpiness;

    score
}

/// Equal non-empty neighbours, each pair counted once.
pub fn count_adjacent_pairs(grid: &Grid) -> u32 {
    let mut pairs = 0u32;
    for (cell, rank) in grid.iter() {
        if rank == EMPTY {
            continue;
        }
        // look right and down only
        for (d_row, d_column) in [(0, 1), (1, 0)] {
            if let Some(other) = grid.offset(cell, d_row, d_column) {
                if grid.at(other) == rank {
                    pairs += 1;
                }
            }
        }
    }
    pairs
}

/// Occupied cells per column, left to right.
pub fn column_heights(grid: &Grid) -> Vec<usize> {
    (0..grid.columns()).map(|c| grid.column_height(c)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_grid() {
        let grid = Grid::default();
        let weights = EvalWeights::default();
        assert_eq!(count_adjacent_pairs(&grid), 0);
        assert_eq!(column_heights(&grid), vec![0; 5]);
        assert!((evaluate(&grid, &weights) - 30.0).abs() < 1e-6);
    }

    #[test]
    fn test_adjacent_pairs_counted_once() {
        let grid = Grid::from_rows(&[
            [0u8, 0, 0],
            [2, 0, 0],
            [2, 2, 1],
        ])
        .unwrap();
        // (1,0)-(2,0) and (2,0)-(2,1)
        assert_eq!(count_adjacent_pairs(&grid), 2);
    }

    #[test]
    fn test_column_heights() {
        let grid = Grid::from_rows(&[
            [0u8, 0, 0],
            [3, 0, 0],
            [1, 2, 0],
        ])
        .unwrap();
        assert_eq!(column_heights(&grid), vec![2, 1, 0]);
    }

    #[test]
    fn test_flat_beats_tower() {
        let weights = EvalWeights::default();
        let flat = Grid::from_rows(&[
            [0u8, 0, 0, 0, 0],
            [0, 0, 0, 0, 0],
            [0, 0, 0, 0, 0],
            [0, 0, 0, 0, 0],
            [0, 0, 0, 0, 0],
            [1, 2, 1, 2, 0],
        ])
        .unwrap();
        let tower = Grid::from_rows(&[
            [0u8, 0, 0, 0, 0],
            [0, 0, 0, 0, 0],
            [1, 0, 0, 0, 0],
            [2, 0, 0, 0, 0],
            [1, 0, 0, 0, 0],
            [2, 0, 0, 0, 0],
        ])
        .unwrap();
        assert!(evaluate(&flat, &weights) > evaluate(&tower, &weights));
    }

    #[test]
    fn test_weights_from_partial_json() {
        let weights: EvalWeights = serde_json::from_str(r#"{"bumpiness": -2.0}"#).unwrap();
        assert_eq!(weights.bumpiness, -2.0);
        assert_eq!(weights.empty_cells, EvalWeights::default().empty_cells);
    }
}
