//! orbdrop core crate - plain data types for the merge-drop puzzle.

mod ball;
mod grid;
mod state;

pub use ball::{Ball, Direction};
pub use grid::{Cell, Grid, GridError, Rank, EMPTY};
pub use state::{GameSnapshot, Score};
