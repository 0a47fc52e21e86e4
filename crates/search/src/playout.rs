//! Seeded self-play with [`ColumnSearch`], one engine per seed.

use orbdrop_core::{Grid, Rank, Score};
use orbdrop_engine::{ConfigError, DropReport, EngineConfig, GridEngine, MemoryStore, SeededSource};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{steer_to, ColumnSearch};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayoutResult {
    pub seed: u64,
    pub score: Score,
    pub drops: usize,
    /// Highest rank that sat on the grid, including ranks made and merged
    /// away within one chain.
    pub highest_rank: Rank,
    pub game_over: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayoutSummary {
    pub results: Vec<PlayoutResult>,
    pub mean_score: f64,
    pub best_score: Score,
    pub game_overs: usize,
}

impl PlayoutSummary {
    fn from_results(results: Vec<PlayoutResult>) -> Self {
        let total: f64 = results.iter().map(|r| r.score as f64).sum();
        let mean_score = if results.is_empty() {
            0.0
        } else {
            total / results.len() as f64
        };
        Self {
            mean_score,
            best_score: results.iter().map(|r| r.score).max().unwrap_or(0),
            game_overs: results.iter().filter(|r| r.game_over).count(),
            results,
        }
    }
}

/// Play one game per seed, each capped at `max_drops` drops.
///
/// Results come back in seed order.
pub fn run_playouts(
    config: &EngineConfig,
    seeds: &[u64],
    search: &ColumnSearch,
    max_drops: usize,
) -> Result<PlayoutSummary, ConfigError> {
    config.validate()?;

    let results = seeds
        .par_iter()
        .map(|&seed| play_one(config, seed, search, max_drops))
        .collect::<Result<Vec<_>, _>>()?;

    let summary = PlayoutSummary::from_results(results);
    log::info!(
        "{} playouts: mean score {:.1}, best {}, {} ended in game over",
        summary.results.len(),
        summary.mean_score,
        summary.best_score,
        summary.game_overs
    );
    Ok(summary)
}

fn play_one(
    config: &EngineConfig,
    seed: u64,
    search: &ColumnSearch,
    max_drops: usize,
) -> Result<PlayoutResult, ConfigError> {
    let mut engine = GridEngine::new(
        config.clone(),
        SeededSource::seeded(seed),
        MemoryStore::new(),
    )?;
    let mut drops = 0;
    let mut highest_rank = 0;

    while drops < max_drops && !engine.is_game_over() {
        let pending = engine.pending_ball();
        let Some((column, _)) = search.find_best_column(engine.board(), pending.value, config)
        else {
            break;
        };
        steer_to(&mut engine, column);
        let result = engine.drop_ball();
        let Some(report) = result.report() else {
            break;
        };
        drops += 1;
        highest_rank = highest_rank.max(highest_rank_in(report, engine.board()));
    }

    log::debug!(
        "seed {seed}: score {} after {drops} drops, highest rank {highest_rank}",
        engine.score()
    );

    Ok(PlayoutResult {
        seed,
        score: engine.score(),
        drops,
        highest_rank,
        game_over: engine.is_game_over(),
    })
}

/// Highest rank left on `board` or created by a merge that was not annihilated.
fn highest_rank_in(report: &DropReport, board: &Grid) -> Rank {
    report
        .merges
        .iter()
        .filter(|m| !m.annihilated)
        .map(|m| m.rank)
        .fold(board.max_rank().max(report.rank), Rank::max)
}
