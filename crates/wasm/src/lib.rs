//! orbdrop-wasm - WebAssembly entry points and bindings for browser execution.

use js_sys::Function;
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

use orbdrop_core::{Direction, Grid, Rank, Score};
use orbdrop_engine::{EngineConfig, GridEngine, HighScoreStore, PersistenceError, SeededSource};
use orbdrop_eval::{evaluate, EvalWeights};
use orbdrop_search::ColumnSearch;

#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// High score handed in by the page; saves go back through a JS callback
/// (typically writing `localStorage`).
struct CallbackStore {
    initial: Score,
    on_save: Option<Function>,
}

impl HighScoreStore for CallbackStore {
    fn load(&self) -> Result<Score, PersistenceError> {
        Ok(self.initial)
    }

    fn save(&mut self, score: Score) -> Result<(), PersistenceError> {
        let Some(callback) = &self.on_save else {
            return Ok(());
        };
        callback
            .call1(&JsValue::NULL, &JsValue::from(score))
            .map(|_| ())
            .map_err(|e| PersistenceError::Unavailable(format!("{e:?}")))
    }
}

#[wasm_bindgen]
pub struct JsGame {
    inner: GridEngine,
}

#[wasm_bindgen]
impl JsGame {
    /// Classic rules. Without a seed the game draws one from `Math.random`.
    #[wasm_bindgen(constructor)]
    pub fn new(
        seed: Option<u32>,
        high_score: u32,
        on_save: Option<Function>,
    ) -> Result<JsGame, JsError> {
        Self::build(EngineConfig::classic(), seed, high_score, on_save)
    }

    /// Custom rules from a JSON `EngineConfig`; missing fields take classic values.
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(
        config_json: &str,
        seed: Option<u32>,
        high_score: u32,
        on_save: Option<Function>,
    ) -> Result<JsGame, JsError> {
        let config = EngineConfig::from_json(config_json)?;
        Self::build(config, seed, high_score, on_save)
    }

    fn build(
        config: EngineConfig,
        seed: Option<u32>,
        high_score: u32,
        on_save: Option<Function>,
    ) -> Result<JsGame, JsError> {
        let seed = match seed {
            Some(seed) => seed as u64,
            None => (js_sys::Math::random() * 9_007_199_254_740_992.0) as u64,
        };
        let store = CallbackStore {
            initial: high_score,
            on_save,
        };
        let inner = GridEngine::new(config, SeededSource::seeded(seed), store)?;
        Ok(JsGame { inner })
    }

    #[wasm_bindgen(js_name = initBoard)]
    pub fn init_board(&mut self) {
        self.inner.init_board();
    }

    #[wasm_bindgen(js_name = moveLeft)]
    pub fn move_left(&mut self) {
        self.inner.move_ball(Direction::Left);
    }

    #[wasm_bindgen(js_name = moveRight)]
    pub fn move_right(&mut self) {
        self.inner.move_ball(Direction::Right);
    }

    /// `{ result: "Placed", placed, rank, merges, points, new_high_score, game_over }`
    /// or `{ result: "ColumnFull" }`.
    #[wasm_bindgen(js_name = dropBall)]
    pub fn drop_ball(&mut self) -> JsValue {
        let result = self.inner.drop_ball();
        serde_wasm_bindgen::to_value(&result).unwrap_or_else(|_| JsValue::NULL)
    }

    #[wasm_bindgen(js_name = clearFusedCells)]
    pub fn clear_fused_cells(&mut self) {
        self.inner.clear_fused_cells();
    }

    /// Replace the board with rows of ranks, top row first.
    #[wasm_bindgen(js_name = loadBoard)]
    pub fn load_board(&mut self, rows: JsValue) -> Result<(), JsError> {
        let grid: Grid =
            serde_wasm_bindgen::from_value(rows).map_err(|e| JsError::new(&e.to_string()))?;
        self.inner.load_board(grid)?;
        Ok(())
    }

    pub fn snapshot(&self) -> JsValue {
        serde_wasm_bindgen::to_value(&self.inner.snapshot()).unwrap_or_else(|_| JsValue::NULL)
    }

    #[wasm_bindgen(getter)]
    pub fn score(&self) -> u32 {
        self.inner.score()
    }

    #[wasm_bindgen(getter, js_name = highScore)]
    pub fn high_score(&self) -> u32 {
        self.inner.high_score()
    }

    #[wasm_bindgen(getter, js_name = gameOver)]
    pub fn game_over(&self) -> bool {
        self.inner.is_game_over()
    }

    #[wasm_bindgen(getter, js_name = pendingValue)]
    pub fn pending_value(&self) -> u8 {
        self.inner.pending_ball().value
    }

    #[wasm_bindgen(getter, js_name = pendingColumn)]
    pub fn pending_column(&self) -> usize {
        self.inner.pending_ball().column
    }

    /// How long the page should keep fused cells highlighted.
    #[wasm_bindgen(getter, js_name = fusedDisplayMs)]
    pub fn fused_display_ms(&self) -> u32 {
        self.inner.config().fused_display_ms
    }

    /// Column the autoplayer would pick for the pending ball.
    #[wasm_bindgen(js_name = suggestColumn)]
    pub fn suggest_column(&self, depth: usize) -> Option<usize> {
        let search = ColumnSearch::new(depth);
        let ball = self.inner.pending_ball();
        search
            .find_best_column(self.inner.board(), ball.value, self.inner.config())
            .map(|(column, _)| column)
    }
}

#[derive(Serialize, Deserialize)]
pub struct JsColumnResult {
    pub column: usize,
    pub score: f32,
}

/// Ranked column choices for dropping `rank` onto `rows` under classic rules.
#[wasm_bindgen(js_name = findTopColumns)]
pub fn find_top_columns(rows: JsValue, rank: Rank, depth: usize, n: usize) -> JsValue {
    let grid: Grid = match serde_wasm_bindgen::from_value(rows) {
        Ok(grid) => grid,
        Err(_) => return JsValue::NULL,
    };
    let search = ColumnSearch::new(depth);
    let results: Vec<JsColumnResult> = search
        .find_top_columns(&grid, rank, &EngineConfig::classic(), n)
        .into_iter()
        .map(|(column, score)| JsColumnResult { column, score })
        .collect();
    serde_wasm_bindgen::to_value(&results).unwrap_or_else(|_| JsValue::NULL)
}

/// Heuristic value of a grid given as rows of ranks. `NaN` for malformed input.
#[wasm_bindgen(js_name = evaluateGrid)]
pub fn evaluate_grid(rows: JsValue) -> f32 {
    match serde_wasm_bindgen::from_value::<Grid>(rows) {
        Ok(grid) => evaluate(&grid, &EvalWeights::default()),
        Err(_) => f32::NAN,
    }
}
