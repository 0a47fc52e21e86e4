//! orbdrop-engine - grid state machine for the merge-drop puzzle.
//!
//! Placement, fusion chains, gravity, weighted spawning and high-score
//! bookkeeping. Rendering, input and storage backends live outside.

pub mod apply;
pub mod config;
pub mod engine;
pub mod error;
pub mod fusion;
pub mod gravity;
pub mod spawn;
pub mod store;

pub use apply::{apply_drop, simulate_drop, Placement};
pub use config::EngineConfig;
pub use engine::{DropReport, DropResult, GridEngine};
pub use error::{ConfigError, EngineError, PersistenceError};
pub use fusion::{resolve_chain, FusionChain, Merge, MergeList, NEIGHBOR_ORDER};
pub use gravity::{apply_gravity, is_settled, unsettled_column};
pub use spawn::{RandomSource, RngSource, ScriptedSource, SeededSource, Spawner};
pub use store::{FileStore, HighScoreStore, MemoryStore};

pub use orbdrop_core::{Ball, Cell, Direction, GameSnapshot, Grid, Rank, Score, EMPTY};
