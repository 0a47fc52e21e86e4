//! Pending ball and lateral movement.

use crate::Rank;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
}

/// The ball waiting above the grid for a drop command.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub struct Ball {
    pub value: Rank,
    pub column: usize,
}

impl Ball {
    pub fn new(value: Rank, column: usize) -> Self {
        Self { value, column }
    }

    /// Spawn column for a grid `columns` wide (center, rounded down).
    pub fn spawn_column(columns: usize) -> usize {
        columns / 2
    }

    /// Ball of `value` at the spawn column.
    pub fn spawn(value: Rank, columns: usize) -> Self {
        Self::new(value, Self::spawn_column(columns))
    }

    /// Move one column, clamped to `[0, columns - 1]`.
    pub fn shifted(self, direction: Direction, columns: usize) -> Self {
        let column = match direction {
            Direction::Left => self.column.saturating_sub(1),
            Direction::Right => (self.column + 1).min(columns.saturating_sub(1)),
        };
        Self { column, ..self }
    }
}
