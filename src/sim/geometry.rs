//! Shapes the simulation moves around
//!
//! Screen coordinates: origin at the top-left, y grows downward.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle (top-left corner + size)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

/// The ball
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    /// Center
    pub pos: Vec2,
    /// Displacement per tick
    pub vel: Vec2,
    pub radius: f32,
}

impl Ball {
    pub fn new(pos: Vec2, vel: Vec2, radius: f32) -> Self {
        Self { pos, vel, radius }
    }

    /// Half of the radius: every edge test measures the ball this far out
    /// from its center, not the full radius.
    #[inline]
    pub fn band(&self) -> f32 {
        self.radius / 2.0
    }

    /// Move one tick along the current velocity
    #[inline]
    pub fn advance(&mut self) {
        self.pos += self.vel;
    }
}

/// A paddle movement request from the driver
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PadCommand {
    Left,
    Right,
    /// Center the paddle under this x
    ToX(f32),
}

/// The player's paddle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    pub rect: Rect,
}

impl Paddle {
    pub fn new(rect: Rect) -> Self {
        Self { rect }
    }

    /// Largest x that keeps the paddle on the board
    #[inline]
    fn max_x(&self, board_width: f32) -> f32 {
        (board_width - self.rect.width).max(0.0)
    }

    /// Apply a movement command. `step` is the distance covered by
    /// `Left`/`Right`; the result always stays within
    /// `[0, board_width - width]`.
    pub fn apply(&mut self, command: PadCommand, board_width: f32, step: f32) {
        let max_x = self.max_x(board_width);
        let x = match command {
            PadCommand::Left => self.rect.x - step,
            PadCommand::Right => self.rect.x + step,
            // Whole pixels, like the rest of the layout
            PadCommand::ToX(target) => (target - self.rect.width / 2.0).trunc(),
        };
        self.rect.x = x.clamp(0.0, max_x);
    }

    /// Copying variant of [`Paddle::apply`]
    pub fn moved(&self, command: PadCommand, board_width: f32, step: f32) -> Self {
        let mut pad = self.clone();
        pad.apply(command, board_width, step);
        pad
    }
}

/// A breakable cell. Destroyed cells are absent from the grid, so a `Cell`
/// that exists is always alive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    pub rect: Rect,
}

impl Cell {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            rect: Rect::new(x, y, width, height),
        }
    }
}
