//! Setup errors.
//!
//! The simulation itself cannot fail: a missed paddle is an outcome, not an
//! error. Everything here is raised while building a game (init, restart,
//! resize) or while loading tuning, so bad setup fails before the first tick.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// Board must have a positive width and height
    #[error("invalid board size {width}x{height}")]
    InvalidBoard { width: u32, height: u32 },

    /// Board too short to hold the paddle and the ball above it
    #[error("board height {height} cannot fit the paddle and ball")]
    BoardTooShort { height: u32 },

    #[error("ball radius must be positive, got {0}")]
    NonPositiveRadius(f32),

    #[error("ball speed must be nonzero on both axes, got ({x}, {y})")]
    ZeroSpeed { x: f32, y: f32 },

    #[error("paddle must have a positive size, got {width}x{height}")]
    DegeneratePad { width: f32, height: f32 },

    #[error("cell grid needs at least one row and one column, got {rows}x{cols}")]
    EmptyGrid { rows: usize, cols: usize },

    #[error("cell grid expects {expected} slots, got {got}")]
    SlotCount { expected: usize, got: usize },

    #[error("cells must have a positive size, got {width}x{height}")]
    DegenerateCell { width: f32, height: f32 },

    /// A tuning value is outside the range the game can work with
    #[error("tuning value `{name}` out of range: {value} (expected {expected})")]
    Tuning {
        name: &'static str,
        value: f32,
        expected: &'static str,
    },

    #[error("failed to read tuning file {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse tuning")]
    Parse(#[from] serde_json::Error),
}
