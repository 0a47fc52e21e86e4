//! orbdrop-search - column choice and seeded playouts for autoplay.

mod column;
mod playout;

pub use column::ColumnSearch;
pub use playout::{run_playouts, PlayoutResult, PlayoutSummary};

use orbdrop_core::Direction;
use orbdrop_engine::GridEngine;

/// Walk the pending ball to `column`, clamped to the grid. Does nothing
/// once the game is over.
pub fn steer_to(engine: &mut GridEngine, column: usize) {
    if engine.is_game_over() {
        return;
    }
    let target = column.min(engine.config().columns.saturating_sub(1));
    while engine.pending_ball().column > target {
        engine.move_ball(Direction::Left);
    }
    while engine.pending_ball().column < target {
        engine.move_ball(Direction::Right);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_steer_to_reaches_column() {
        let mut engine = GridEngine::classic(3);
        steer_to(&mut engine, 0);
        assert_eq!(engine.pending_ball().column, 0);
        steer_to(&mut engine, 4);
        assert_eq!(engine.pending_ball().column, 4);
    }

    #[test]
    fn test_steer_to_clamps() {
        let mut engine = GridEngine::classic(3);
        steer_to(&mut engine, 99);
        assert_eq!(engine.pending_ball().column, 4);
    }
}
