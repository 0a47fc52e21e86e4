//! Engine configuration and presets.

use orbdrop_core::{Ball, Grid, Rank};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Grid shape, rank ceiling and spawn distribution.
///
/// `spawn_weights[i]` is the relative weight of spawning rank `i + 1`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub rows: usize,
    pub columns: usize,
    /// Highest rank that can sit on the grid. Merging two of these annihilates both.
    pub max_rank: Rank,
    pub spawn_weights: Vec<f64>,
    /// How long a front-end should highlight fused cells. Engine logic ignores it.
    pub fused_display_ms: u32,
}

impl EngineConfig {
    /// 6x5 board, ranks up to 10, spawn odds 70/25/5.
    pub fn classic() -> Self {
        Self {
            rows: Grid::DEFAULT_ROWS,
            columns: Grid::DEFAULT_COLUMNS,
            max_rank: 10,
            spawn_weights: vec![0.70, 0.25, 0.05],
            fused_display_ms: 200,
        }
    }

    /// Parse and validate a JSON config. Missing fields take classic values.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows == 0 || self.columns == 0 {
            return Err(ConfigError::InvalidDimensions {
                rows: self.rows,
                columns: self.columns,
            });
        }
        // max_rank + 1 must still fit in a Rank
        if self.max_rank == 0 || self.max_rank == Rank::MAX {
            return Err(ConfigError::InvalidMaxRank(self.max_rank));
        }
        if self.spawn_weights.is_empty() {
            return Err(ConfigError::EmptySpawnWeights);
        }
        for (index, &weight) in self.spawn_weights.iter().enumerate() {
            if !weight.is_finite() || weight < 0.0 {
                return Err(ConfigError::InvalidSpawnWeight { index, weight });
            }
        }
        if self.spawn_weights.iter().sum::<f64>() <= 0.0 {
            return Err(ConfigError::ZeroSpawnWeights);
        }
        if self.spawn_weights.len() > self.max_rank as usize {
            return Err(ConfigError::SpawnRankOutOfRange {
                ranks: self.spawn_weights.len(),
                max_rank: self.max_rank,
            });
        }
        Ok(())
    }

    pub fn spawn_column(&self) -> usize {
        Ball::spawn_column(self.columns)
    }

    /// Rank a merge of two `max_rank` cells would produce.
    pub fn annihilation_rank(&self) -> Rank {
        self.max_rank + 1
    }

    pub fn empty_grid(&self) -> Grid {
        Grid::new(self.rows, self.columns)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::classic()
    }
}
