use std::cmp::Ordering;

use orbdrop_core::{Grid, Rank};
use orbdrop_engine::{simulate_drop, EngineConfig, Spawner};
use orbdrop_eval::{evaluate, EvalWeights};

/// Value of a position with no room left.
const GAME_OVER_SCORE: f32 = -1_000.0;

/// Picks a column for the pending ball.
///
/// Depth 1 scores each landing directly. Deeper searches average the best
/// follow-up over every spawnable rank, weighted by its spawn odds.
#[derive(Clone, Debug)]
pub struct ColumnSearch {
    pub depth: usize,
    pub weights: EvalWeights,
    /// Multiplier on merge points earned by a drop.
    pub points_weight: f32,
}

impl ColumnSearch {
    pub fn new(depth: usize) -> Self {
        Self {
            depth: depth.clamp(1, 3),
            ..Self::default()
        }
    }

    pub fn find_best_column(
        &self,
        grid: &Grid,
        rank: Rank,
        config: &EngineConfig,
    ) -> Option<(usize, f32)> {
        self.find_top_columns(grid, rank, config, 1)
            .into_iter()
            .next()
    }

    /// Up to `n` playable columns, best first. Ties keep the lower column.
    pub fn find_top_columns(
        &self,
        grid: &Grid,
        rank: Rank,
        config: &EngineConfig,
        n: usize,
    ) -> Vec<(usize, f32)> {
        if n == 0 {
            return Vec::new();
        }

        let odds = spawn_odds(config);
        let mut scored: Vec<(usize, f32)> = (0..grid.columns())
            .filter_map(|column| {
                let score = self.drop_value(grid, column, rank, config, &odds, self.depth)?;
                Some((column, score))
            })
            .collect();

        scored.sort_by(|a, b| score_cmp(a.1, b.1));
        scored.truncate(n);
        scored
    }

    fn drop_value(
        &self,
        grid: &Grid,
        column: usize,
        rank: Rank,
        config: &EngineConfig,
        odds: &[(Rank, f64)],
        depth: usize,
    ) -> Option<f32> {
        let (next, placement) = simulate_drop(grid, column, rank, config.max_rank)?;
        let earned = placement.chain.points as f32 * self.points_weight;
        Some(earned + self.expected_value(&next, config, odds, depth.saturating_sub(1)))
    }

    fn expected_value(
        &self,
        grid: &Grid,
        config: &EngineConfig,
        odds: &[(Rank, f64)],
        depth: usize,
    ) -> f32 {
        if grid.is_full() {
            return GAME_OVER_SCORE;
        }
        if depth == 0 {
            return evaluate(grid, &self.weights);
        }

        let mut total = 0.0;
        for &(rank, p) in odds {
            let best = (0..grid.columns())
                .filter_map(|column| self.drop_value(grid, column, rank, config, odds, depth))
                .fold(f32::NEG_INFINITY, f32::max);
            total += best * p as f32;
        }
        total
    }
}

impl Default for ColumnSearch {
    fn default() -> Self {
        Self {
            depth: 1,
            weights: EvalWeights::default(),
            points_weight: 0.5,
        }
    }
}

/// `(rank, probability)` for every rank the config can spawn.
fn spawn_odds(config: &EngineConfig) -> Vec<(Rank, f64)> {
    Spawner::new(&config.spawn_weights)
        .probabilities()
        .into_iter()
        .enumerate()
        .filter(|&(_, p)| p > 0.0)
        .map(|(i, p)| ((i + 1) as Rank, p))
        .collect()
}

fn score_cmp(a: f32, b: f32) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classic() -> EngineConfig {
        EngineConfig::classic()
    }

    fn merge_on_left() -> Grid {
        Grid::from_rows(&[
            [0u8, 0, 0, 0, 0],
            [0, 0, 0, 0, 0],
            [0, 0, 0, 0, 0],
            [0, 0, 0, 0, 0],
            [0, 0, 0, 0, 0],
            [1, 3, 2, 3, 2],
        ])
        .unwrap()
    }

    #[test]
    fn test_empty_grid_returns_column() {
        let search = ColumnSearch::default();
        let (column, _) = search
            .find_best_column(&Grid::default(), 1, &classic())
            .expect("expected a column");
        assert!(column < 5);
    }

    #[test]
    fn test_best_column_matches_max_score() {
        let search = ColumnSearch::default();
        let grid = merge_on_left();
        let config = classic();

        let mut best_score = f32::NEG_INFINITY;
        for column in 0..5 {
            let (next, placement) = simulate_drop(&grid, column, 1, 10).unwrap();
            let score = placement.chain.points as f32 * search.points_weight
                + evaluate(&next, &search.weights);
            best_score = best_score.max(score);
        }

        let (_, score) = search.find_best_column(&grid, 1, &config).unwrap();
        assert!((score - best_score).abs() < 0.0001);
    }

    #[test]
    fn test_prefers_merge() {
        let search = ColumnSearch::default();
        let (column, _) = search
            .find_best_column(&merge_on_left(), 1, &classic())
            .unwrap();
        assert_eq!(column, 0);
    }

    #[test]
    fn test_full_column_skipped() {
        let search = ColumnSearch::default();
        let mut grid = Grid::default();
        for row in 0..6 {
            grid.set(row, 0, if row % 2 == 0 { 2 } else { 3 });
        }
        let top = search.find_top_columns(&grid, 1, &classic(), 10);
        assert_eq!(top.len(), 4);
        assert!(top.iter().all(|&(column, _)| column != 0));
    }

    #[test]
    fn test_full_grid_has_no_column() {
        let search = ColumnSearch::new(2);
        let mut grid = Grid::default();
        for row in 0..6 {
            for column in 0..5 {
                grid.set(row, column, if (row + column) % 2 == 0 { 1 } else { 2 });
            }
        }
        assert!(search.find_best_column(&grid, 3, &classic()).is_none());
        assert!(search.find_top_columns(&grid, 3, &classic(), 0).is_empty());
    }

    #[test]
    fn test_depth_two_averages_spawn_odds() {
        let search = ColumnSearch::new(2);
        let grid = merge_on_left();
        let config = classic();
        let odds = spawn_odds(&config);

        let (column, score) = search.find_best_column(&grid, 1, &config).unwrap();
        let (next, placement) = simulate_drop(&grid, column, 1, 10).unwrap();
        let expected = placement.chain.points as f32 * search.points_weight
            + search.expected_value(&next, &config, &odds, 1);
        assert!((score - expected).abs() < 0.0001);
    }

    #[test]
    fn test_spawn_odds_skip_zero_weights() {
        let config = EngineConfig {
            spawn_weights: vec![1.0, 0.0, 1.0],
            ..EngineConfig::classic()
        };
        let odds = spawn_odds(&config);
        assert_eq!(odds.len(), 2);
        assert_eq!(odds[0].0, 1);
        assert_eq!(odds[1].0, 3);
        assert!((odds[0].1 - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_new_clamps_depth() {
        assert_eq!(ColumnSearch::new(0).depth, 1);
        assert_eq!(ColumnSearch::new(9).depth, 3);
    }
}
