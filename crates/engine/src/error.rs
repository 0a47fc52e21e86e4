use std::path::PathBuf;

use orbdrop_core::{GridError, Rank};

/// Errors raised while validating or parsing an [`EngineConfig`](crate::EngineConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("grid dimensions must be non-zero (got {rows}x{columns})")]
    InvalidDimensions { rows: usize, columns: usize },

    #[error("max_rank must be between 1 and 254 (got {0})")]
    InvalidMaxRank(Rank),

    #[error("spawn_weights must not be empty")]
    EmptySpawnWeights,

    #[error("spawn weight {index} must be finite and >= 0 (got {weight})")]
    InvalidSpawnWeight { index: usize, weight: f64 },

    #[error("spawn weights must sum to a positive value")]
    ZeroSpawnWeights,

    #[error("{ranks} spawn ranks exceed max_rank {max_rank}")]
    SpawnRankOutOfRange { ranks: usize, max_rank: Rank },

    #[error("failed to parse config JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised when building or loading an engine.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("grid error: {0}")]
    Grid(#[from] GridError),

    #[error("board is {found_rows}x{found_columns}, engine expects {rows}x{columns}")]
    ShapeMismatch {
        rows: usize,
        columns: usize,
        found_rows: usize,
        found_columns: usize,
    },

    #[error("cell ({row}, {column}) holds rank {rank}, max is {max_rank}")]
    RankOutOfRange {
        row: usize,
        column: usize,
        rank: Rank,
        max_rank: Rank,
    },

    #[error("column {column} has a ball floating above an empty cell")]
    Unsettled { column: usize },
}

/// High-score store failures. The engine logs these and carries on.
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("stored high score in {path} is not a number: {value:?}")]
    Parse { path: PathBuf, value: String },

    #[error("high score store unavailable: {0}")]
    Unavailable(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::InvalidDimensions { rows: 0, columns: 5 };
        assert_eq!(
            err.to_string(),
            "grid dimensions must be non-zero (got 0x5)"
        );
    }

    #[test]
    fn test_engine_error_wraps_config() {
        let err = EngineError::from(ConfigError::EmptySpawnWeights);
        assert_eq!(err.to_string(), "config error: spawn_weights must not be empty");
    }

    #[test]
    fn test_rank_out_of_range_display() {
        let err = EngineError::RankOutOfRange {
            row: 5,
            column: 1,
            rank: 11,
            max_rank: 10,
        };
        assert_eq!(err.to_string(), "cell (5, 1) holds rank 11, max is 10");
    }

    #[test]
    fn test_persistence_parse_display() {
        let err = PersistenceError::Parse {
            path: PathBuf::from("highscore.txt"),
            value: "abc".into(),
        };
        assert_eq!(
            err.to_string(),
            "stored high score in highscore.txt is not a number: \"abc\""
        );
    }
}
