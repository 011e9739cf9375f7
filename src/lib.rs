//! Breakout - a single-screen brick breaker
//!
//! Core modules:
//! - `sim`: Deterministic simulation (ball motion, collisions, game state)
//! - `tuning`: Data-driven game balance
//! - `error`: Setup/configuration failures
//!
//! Rendering, input capture and frame scheduling belong to the driver.
//! The driver calls [`sim::tick`] (or the lower level [`sim::step`]) once
//! per frame and reacts to what it returns.

pub mod error;
pub mod sim;
pub mod tuning;

pub use error::ConfigError;
pub use tuning::{LayoutClass, Tuning};

/// Game configuration defaults (overridable through [`Tuning`])
pub mod consts {
    /// Boards at most this wide use the small layout
    pub const SMALL_SCREEN_MAX_WIDTH: f32 = 720.0;

    /// Paddle travel per directional move
    pub const PAD_STEP: f32 = 15.0;
    /// Gap between the paddle and the bottom of the board
    pub const PAD_BOTTOM_MARGIN: f32 = 5.0;

    /// Ball speed per axis (pixels per tick)
    pub const BALL_SPEED: f32 = 6.0;

    /// Lives per game
    pub const START_LIVES: u8 = 3;

    /// Cell container spans this fraction of the board width, centered
    pub const GRID_WIDTH_FRACTION: f32 = 0.8;
    /// Each cell gives up this fraction of its slot as padding
    pub const CELL_PADDING: f32 = 0.1;
    /// Empty rows (in cell heights) above the first row of cells
    pub const GRID_TOP_OFFSET_ROWS: u32 = 2;
}
