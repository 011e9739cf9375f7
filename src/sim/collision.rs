//! Swept edge tests between the ball and axis-aligned rectangles
//!
//! Every test compares where the ball's edge is now with where it will be
//! after this tick's velocity, so a crossing is caught even when the ball
//! never overlaps the target at a tick boundary. The ball's edge is taken
//! at half its radius ([`Ball::band`]) in every direction. No penetration
//! correction is done: a hit only ever flips a velocity component.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::{Ball, Rect};

/// Which velocity component a collision inverts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    /// Horizontal motion (`vel.x`)
    X,
    /// Vertical motion (`vel.y`)
    Y,
}

/// Side of a rectangle the ball struck
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Edge {
    Top,
    Bottom,
    Left,
    Right,
}

impl Edge {
    /// Velocity component to invert after hitting this edge
    pub fn axis(self) -> Axis {
        match self {
            Edge::Top | Edge::Bottom => Axis::Y,
            Edge::Left | Edge::Right => Axis::X,
        }
    }
}

/// Flip one velocity component, keeping its magnitude
#[inline]
pub fn reflect(vel: Vec2, axis: Axis) -> Vec2 {
    match axis {
        Axis::X => Vec2::new(-vel.x, vel.y),
        Axis::Y => Vec2::new(vel.x, -vel.y),
    }
}

/// Ball's horizontal band overlaps `[left, left + width]`
#[inline]
pub fn overlaps_x(ball: &Ball, left: f32, width: f32) -> bool {
    let b = ball.band();
    ball.pos.x + b >= left && ball.pos.x - b <= left + width
}

/// Ball's vertical band overlaps `[top, top + height]`
#[inline]
pub fn overlaps_y(ball: &Ball, top: f32, height: f32) -> bool {
    let b = ball.band();
    ball.pos.y + b >= top && ball.pos.y - b <= top + height
}

/// Ball coming down onto the rectangle's top edge
pub fn hits_top(ball: &Ball, rect: &Rect) -> bool {
    let lead = ball.pos.y + ball.band();
    overlaps_x(ball, rect.x, rect.width) && lead < rect.y && lead + ball.vel.y >= rect.y
}

/// Ball coming up onto the rectangle's bottom edge
pub fn hits_bottom(ball: &Ball, rect: &Rect) -> bool {
    let lead = ball.pos.y - ball.band();
    overlaps_x(ball, rect.x, rect.width) && lead > rect.bottom() && lead + ball.vel.y <= rect.bottom()
}

/// Ball moving right onto the rectangle's left edge
pub fn hits_left(ball: &Ball, rect: &Rect) -> bool {
    let lead = ball.pos.x + ball.band();
    overlaps_y(ball, rect.y, rect.height) && lead < rect.x && lead + ball.vel.x >= rect.x
}

/// Ball moving left onto the rectangle's right edge
pub fn hits_right(ball: &Ball, rect: &Rect) -> bool {
    let lead = ball.pos.x - ball.band();
    overlaps_y(ball, rect.y, rect.height) && lead > rect.right() && lead + ball.vel.x <= rect.right()
}

/// First edge of `rect` the ball strikes this tick. Top/bottom are tested
/// before left/right.
pub fn rect_hit(ball: &Ball, rect: &Rect) -> Option<Edge> {
    if hits_top(ball, rect) {
        Some(Edge::Top)
    } else if hits_bottom(ball, rect) {
        Some(Edge::Bottom)
    } else if hits_left(ball, rect) {
        Some(Edge::Left)
    } else if hits_right(ball, rect) {
        Some(Edge::Right)
    } else {
        None
    }
}

/// Ball's leading edge crosses x = 0 or x = `board_width` this tick
pub fn crosses_side_wall(ball: &Ball, board_width: f32) -> bool {
    let b = ball.band();
    let right = ball.pos.x + b;
    let left = ball.pos.x - b;
    (right <= board_width && right + ball.vel.x > board_width) || (left >= 0.0 && left + ball.vel.x < 0.0)
}

/// Ball's leading edge crosses y = 0 this tick
pub fn crosses_top_wall(ball: &Ball) -> bool {
    let lead = ball.pos.y - ball.band();
    lead >= 0.0 && lead + ball.vel.y < 0.0
}

/// Ball's lower edge passes below the line `y` this tick (the paddle's
/// surface). Touching the line exactly is not yet a crossing.
pub fn crosses_down_through(ball: &Ball, y: f32) -> bool {
    let lead = ball.pos.y + ball.band();
    lead <= y && lead + ball.vel.y > y
}
