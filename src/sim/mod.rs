//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One call per frame, no timers or threads
//! - Row-major cell iteration
//! - No rendering, input or platform dependencies

pub mod collision;
pub mod geometry;
pub mod grid;
pub mod state;
pub mod tick;

pub use collision::{Axis, Edge, rect_hit, reflect};
pub use geometry::{Ball, Cell, PadCommand, Paddle, Rect};
pub use grid::{CellGrid, CellHit};
pub use state::{Board, GameEvent, GamePhase, GameState, SizeClass, init_game, reset_ball_and_pad};
pub use tick::{StepOutcome, TickInput, step, tick};
