//! Per-tick simulation
//!
//! [`step`] advances the ball one tick against walls, paddle and cells.
//! [`tick`] wraps it with paddle input and life handling for drivers that
//! just want to call one function per frame.

use serde::{Deserialize, Serialize};

use super::collision::{Axis, crosses_down_through, crosses_side_wall, crosses_top_wall, overlaps_x, reflect};
use super::geometry::{Ball, PadCommand, Paddle};
use super::grid::CellGrid;
use super::state::{Board, GameEvent, GamePhase, GameState};
use crate::error::ConfigError;
use crate::tuning::Tuning;

/// Result of one [`step`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepOutcome {
    Continue,
    /// Ball passed the paddle line outside the paddle; it did not move
    MissedPaddle,
    /// No cells left
    GridCleared,
}

/// Advance the ball by one tick.
///
/// Order of checks:
/// 1. side walls (independent of everything below)
/// 2. paddle line: bounce if over the paddle, otherwise `MissedPaddle`
/// 3. top wall
/// 4. cells, at most one removed
///
/// Velocity flips happen before the ball moves, so a bounce takes effect
/// in the same tick.
pub fn step(ball: &mut Ball, pad: &Paddle, grid: &mut CellGrid, board: &Board) -> StepOutcome {
    if crosses_side_wall(ball, board.w()) {
        ball.vel = reflect(ball.vel, Axis::X);
    }

    if crosses_down_through(ball, pad.rect.y) {
        if !overlaps_x(ball, pad.rect.x, pad.rect.width) {
            return StepOutcome::MissedPaddle;
        }
        ball.vel = reflect(ball.vel, Axis::Y);
    } else if crosses_top_wall(ball) {
        ball.vel = reflect(ball.vel, Axis::Y);
    } else if let Some(hit) = grid.check_hit(ball) {
        ball.vel = reflect(ball.vel, hit.edge.axis());
    }

    ball.advance();

    if grid.is_empty() {
        StepOutcome::GridCleared
    } else {
        StepOutcome::Continue
    }
}

/// Input commands for a single tick. Held keys are level-triggered:
/// the driver keeps them set for as long as the key is down.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    /// Pointer/touch x the paddle should center under
    pub target_x: Option<f32>,
    /// Steer the paddle under the ball (demo/headless play)
    pub autopilot: bool,
}

impl TickInput {
    /// Paddle command for this tick: left, then right, then pointer
    pub fn pad_command(&self, ball: &Ball) -> Option<PadCommand> {
        if self.autopilot {
            Some(PadCommand::ToX(ball.pos.x))
        } else if self.left {
            Some(PadCommand::Left)
        } else if self.right {
            Some(PadCommand::Right)
        } else {
            self.target_x.map(PadCommand::ToX)
        }
    }
}

/// Advance the whole game by one tick.
///
/// The ball moves first, then the paddle follows the input. A miss costs a
/// life and resets ball and paddle; running out of lives or clearing the
/// grid ends the game, after which ticks do nothing until `restart`.
///
/// Fails only if `tuning` no longer fits the board when ball and paddle are
/// reset after a miss; the life is not taken and the phase is unchanged.
pub fn tick(state: &mut GameState, input: &TickInput, tuning: &Tuning) -> Result<Option<GameEvent>, ConfigError> {
    if state.phase != GamePhase::Playing {
        return Ok(None);
    }
    state.time_ticks += 1;

    let outcome = step(&mut state.ball, &state.paddle, &mut state.grid, &state.board);

    if let Some(command) = input.pad_command(&state.ball) {
        state.paddle.apply(command, state.board.w(), tuning.pad_step);
    }

    let event = match outcome {
        StepOutcome::Continue => None,
        StepOutcome::MissedPaddle => {
            let lives = state.lives.saturating_sub(1);
            if lives == 0 {
                state.lives = 0;
                state.phase = GamePhase::Lost;
                log::info!("Game over after {} ticks", state.time_ticks);
                Some(GameEvent::GameOver)
            } else {
                state.reset_ball_and_pad(tuning)?;
                state.lives = lives;
                log::debug!("Missed paddle, {} lives left", lives);
                Some(GameEvent::LifeLost { lives_left: lives })
            }
        }
        StepOutcome::GridCleared => {
            state.phase = GamePhase::Won;
            log::info!("Grid cleared after {} ticks", state.time_ticks);
            Some(GameEvent::Won)
        }
    };
    Ok(event)
}
