//! The grid state machine: pending ball, drops, score and game over.

use orbdrop_core::{Ball, Cell, Direction, GameSnapshot, Grid, Rank, Score};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::apply::apply_drop;
use crate::config::EngineConfig;
use crate::error::{ConfigError, EngineError};
use crate::fusion::MergeList;
use crate::gravity::unsettled_column;
use crate::spawn::{RandomSource, SeededSource, Spawner};
use crate::store::{HighScoreStore, MemoryStore};

/// What a successful drop did.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct DropReport {
    pub placed: Cell,
    pub rank: Rank,
    pub merges: MergeList,
    pub points: Score,
    /// Set when this drop pushed the score past the previous high score.
    pub new_high_score: Option<Score>,
    pub game_over: bool,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(tag = "result")]
pub enum DropResult {
    Placed(DropReport),
    /// The pending ball's column has no room. Nothing changed.
    ColumnFull,
}

impl DropResult {
    pub fn is_placed(&self) -> bool {
        matches!(self, DropResult::Placed(_))
    }

    pub fn report(&self) -> Option<&DropReport> {
        match self {
            DropResult::Placed(report) => Some(report),
            DropResult::ColumnFull => None,
        }
    }
}

/// Owns one game. Randomness and high-score persistence are injected.
pub struct GridEngine {
    config: EngineConfig,
    spawner: Spawner,
    grid: Grid,
    pending: Ball,
    score: Score,
    high_score: Score,
    game_over: bool,
    fused: SmallVec<[Cell; 8]>,
    rng: Box<dyn RandomSource>,
    store: Box<dyn HighScoreStore>,
}

impl GridEngine {
    /// Validate `config`, read the stored high score and start a fresh game.
    pub fn new(
        config: EngineConfig,
        rng: impl RandomSource + 'static,
        store: impl HighScoreStore + 'static,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let high_score = match store.load() {
            Ok(score) => score,
            Err(e) => {
                log::warn!("could not load high score, starting from 0: {e}");
                0
            }
        };

        Ok(Self::assemble(config, Box::new(rng), Box::new(store), high_score))
    }

    /// Classic rules, seeded generator, in-memory high score.
    pub fn classic(seed: u64) -> Self {
        Self::assemble(
            EngineConfig::classic(),
            Box::new(SeededSource::seeded(seed)),
            Box::new(MemoryStore::new()),
            0,
        )
    }

    fn assemble(
        config: EngineConfig,
        rng: Box<dyn RandomSource>,
        store: Box<dyn HighScoreStore>,
        high_score: Score,
    ) -> Self {
        let mut engine = Self {
            spawner: Spawner::new(&config.spawn_weights),
            grid: config.empty_grid(),
            pending: Ball::spawn(1, config.columns),
            config,
            score: 0,
            high_score,
            game_over: false,
            fused: SmallVec::new(),
            rng,
            store,
        };
        engine.init_board();
        engine
    }

    /// Start a new game. The high score survives.
    pub fn init_board(&mut self) {
        self.grid.clear();
        self.score = 0;
        self.game_over = false;
        self.fused.clear();
        self.generate_ball();
    }

    /// Shift the pending ball one column, clamped at the edges.
    pub fn move_ball(&mut self, direction: Direction) {
        if self.game_over {
            return;
        }
        self.pending = self.pending.shifted(direction, self.config.columns);
    }

    /// Drop the pending ball and resolve everything it sets off.
    ///
    /// After game over this reports `ColumnFull` and does nothing.
    pub fn drop_ball(&mut self) -> DropResult {
        if self.game_over {
            return DropResult::ColumnFull;
        }

        let Ball { value, column } = self.pending;
        let max_rank = self.config.max_rank;
        let Some(placement) = apply_drop(&mut self.grid, column, value, max_rank) else {
            log::warn!("column {column} is full, drop rejected");
            return DropResult::ColumnFull;
        };

        self.fused.clear();
        self.fused.extend(placement.chain.targets());

        let previous_high = self.high_score;
        for merge in &placement.chain.merges {
            self.score = self.score.saturating_add(merge.points());
            if self.score > self.high_score {
                self.high_score = self.score;
                self.persist_high_score();
            }
        }
        let new_high_score = (self.high_score > previous_high).then_some(self.high_score);
        if let Some(score) = new_high_score {
            log::info!("new high score {score}");
        }

        log::debug!(
            "dropped {} into ({}, {}): {} merges, {} points",
            value,
            placement.cell.row,
            placement.cell.column,
            placement.chain.merges.len(),
            placement.chain.points
        );

        self.generate_ball();
        self.check_game_over();

        DropResult::Placed(DropReport {
            placed: placement.cell,
            rank: value,
            points: placement.chain.points,
            merges: placement.chain.merges,
            new_high_score,
            game_over: self.game_over,
        })
    }

    /// Draw the next pending ball at the spawn column.
    pub fn generate_ball(&mut self) {
        let value = self.spawner.draw(self.rng.as_mut());
        self.pending = Ball::spawn(value, self.config.columns);
    }

    /// Set game over when no empty cell is left. Returns the flag.
    pub fn check_game_over(&mut self) -> bool {
        if !self.game_over && self.grid.is_full() {
            self.game_over = true;
            log::info!("game over with score {}", self.score);
        }
        self.game_over
    }

    /// Replace the board, e.g. to resume a position. Score and pending ball
    /// are kept; fused cells are cleared and game over is recomputed.
    ///
    /// The board must already be settled.
    pub fn load_board(&mut self, grid: Grid) -> Result<(), EngineError> {
        if grid.rows() != self.config.rows || grid.columns() != self.config.columns {
            return Err(EngineError::ShapeMismatch {
                rows: self.config.rows,
                columns: self.config.columns,
                found_rows: grid.rows(),
                found_columns: grid.columns(),
            });
        }
        if let Some((cell, rank)) = grid.iter().find(|&(_, r)| r > self.config.max_rank) {
            return Err(EngineError::RankOutOfRange {
                row: cell.row,
                column: cell.column,
                rank,
                max_rank: self.config.max_rank,
            });
        }
        if let Some(column) = unsettled_column(&grid) {
            return Err(EngineError::Unsettled { column });
        }
        self.grid = grid;
        self.fused.clear();
        self.game_over = false;
        self.check_game_over();
        Ok(())
    }

    /// Drop the fused-cell highlight. Purely cosmetic.
    pub fn clear_fused_cells(&mut self) {
        self.fused.clear();
    }

    pub fn board(&self) -> &Grid {
        &self.grid
    }

    pub fn pending_ball(&self) -> Ball {
        self.pending
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn high_score(&self) -> Score {
        self.high_score
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn fused_cells(&self) -> &[Cell] {
        &self.fused
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            board: self.grid.clone(),
            pending: self.pending,
            score: self.score,
            high_score: self.high_score,
            game_over: self.game_over,
            fused_cells: self.fused.to_vec(),
        }
    }

    fn persist_high_score(&mut self) {
        if let Err(e) = self.store.save(self.high_score) {
            log::warn!("could not save high score {}: {e}", self.high_score);
        }
    }
}
