//! Observable game state.

use crate::{Ball, Cell, Grid};
use serde::{Deserialize, Serialize};

/// Score and high score counter type.
pub type Score = u32;

/// Value copy of everything a front-end renders after an operation.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub board: Grid,
    pub pending: Ball,
    pub score: Score,
    pub high_score: Score,
    pub game_over: bool,
    pub fused_cells: Vec<Cell>,
}

impl Default for GameSnapshot {
    fn default() -> Self {
        let board = Grid::default();
        let pending = Ball::spawn(1, board.columns());
        Self {
            board,
            pending,
            score: 0,
            high_score: 0,
            game_over: false,
            fused_cells: Vec::new(),
        }
    }
}
