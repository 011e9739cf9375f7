//! Game state and setup
//!
//! Everything a driver needs between ticks lives in [`GameState`]. Setup is
//! the only place that can fail; a state that was built is always playable.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::{Ball, Paddle, Rect};
use super::grid::CellGrid;
use crate::error::ConfigError;
use crate::tuning::{LayoutClass, Tuning};

/// Playing field bounds in pixels. The top, left and right edges are walls;
/// the bottom is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BoardSize")]
pub struct Board {
    pub width: u32,
    pub height: u32,
}

#[derive(Deserialize)]
struct BoardSize {
    width: u32,
    height: u32,
}

impl TryFrom<BoardSize> for Board {
    type Error = ConfigError;

    fn try_from(size: BoardSize) -> Result<Self, Self::Error> {
        Board::new(size.width, size.height)
    }
}

impl Board {
    pub fn new(width: u32, height: u32) -> Result<Self, ConfigError> {
        if width == 0 || height == 0 {
            return Err(ConfigError::InvalidBoard { width, height });
        }
        Ok(Self { width, height })
    }

    #[inline]
    pub fn w(&self) -> f32 {
        self.width as f32
    }

    #[inline]
    pub fn h(&self) -> f32 {
        self.height as f32
    }
}

/// Screen-size classification chosen once per game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SizeClass {
    Small,
    Large,
}

impl SizeClass {
    pub fn classify(board: &Board, tuning: &Tuning) -> Self {
        if board.w() <= tuning.small_screen_max_width {
            SizeClass::Small
        } else {
            SizeClass::Large
        }
    }

    pub fn layout<'a>(&self, tuning: &'a Tuning) -> &'a LayoutClass {
        match self {
            SizeClass::Small => &tuning.small,
            SizeClass::Large => &tuning.large,
        }
    }
}

/// Current phase of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Ball in play
    Playing,
    /// Every cell destroyed
    Won,
    /// Out of lives
    Lost,
}

/// Something the driver should react to (alerts, sounds, restart prompts)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Paddle missed; ball and paddle were reset
    LifeLost { lives_left: u8 },
    /// Paddle missed on the last life
    GameOver,
    /// Grid cleared
    Won,
}

/// Paddle centered at the bottom of the board
fn spawn_paddle(board: &Board, class: &LayoutClass, tuning: &Tuning) -> Result<Paddle, ConfigError> {
    let width = (board.w() / class.pad_width_divisor).trunc();
    let height = class.pad_height;
    if width <= 0.0 || height <= 0.0 {
        return Err(ConfigError::DegeneratePad { width, height });
    }

    let x = (board.w() / 2.0 - width / 2.0).trunc();
    let y = (board.h() - height - tuning.pad_bottom_margin).trunc();
    if y <= 0.0 {
        return Err(ConfigError::BoardTooShort { height: board.height });
    }
    Ok(Paddle::new(Rect::new(x, y, width, height)))
}

/// Ball centered horizontally, resting on the paddle, heading up and right
fn spawn_ball(board: &Board, class: &LayoutClass, tuning: &Tuning, pad: &Paddle) -> Result<Ball, ConfigError> {
    let radius = (board.w() / class.ball_radius_divisor).trunc();
    if radius <= 0.0 {
        return Err(ConfigError::NonPositiveRadius(radius));
    }
    let speed = tuning.ball_speed;
    if speed == 0.0 {
        return Err(ConfigError::ZeroSpeed { x: speed, y: -speed });
    }

    let pos = Vec2::new((board.w() / 2.0).trunc(), (pad.rect.y - radius).trunc());
    if pos.y - radius < 0.0 {
        return Err(ConfigError::BoardTooShort { height: board.height });
    }
    Ok(Ball::new(pos, Vec2::new(speed, -speed), radius))
}

/// Fresh paddle and ball for a new life. The grid is untouched.
pub fn reset_ball_and_pad(board: &Board, tuning: &Tuning) -> Result<(Ball, Paddle), ConfigError> {
    let class = SizeClass::classify(board, tuning).layout(tuning);
    let pad = spawn_paddle(board, class, tuning)?;
    let ball = spawn_ball(board, class, tuning, &pad)?;
    Ok((ball, pad))
}

/// Build everything a new game needs, sized for the board
pub fn init_game(board: &Board, tuning: &Tuning) -> Result<(Ball, Paddle, CellGrid), ConfigError> {
    tuning.validate()?;
    let (ball, pad) = reset_ball_and_pad(board, tuning)?;
    let class = SizeClass::classify(board, tuning).layout(tuning);
    let grid = CellGrid::layout(board.w(), class, tuning)?;
    Ok((ball, pad, grid))
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub board: Board,
    pub size_class: SizeClass,
    pub ball: Ball,
    pub paddle: Paddle,
    pub grid: CellGrid,
    pub lives: u8,
    pub phase: GamePhase,
    /// Ticks advanced this game
    pub time_ticks: u64,
}

impl GameState {
    /// Start a new game on a `width` × `height` board
    pub fn new(width: u32, height: u32, tuning: &Tuning) -> Result<Self, ConfigError> {
        let board = Board::new(width, height)?;
        let (ball, paddle, grid) = init_game(&board, tuning)?;
        let size_class = SizeClass::classify(&board, tuning);
        log::info!(
            "New game on {}x{} board ({:?} layout, {} cells)",
            width,
            height,
            size_class,
            grid.remaining()
        );
        Ok(Self {
            board,
            size_class,
            ball,
            paddle,
            grid,
            lives: tuning.start_lives,
            phase: GamePhase::Playing,
            time_ticks: 0,
        })
    }

    /// Start over on the same board (after a win or a loss)
    pub fn restart(&mut self, tuning: &Tuning) -> Result<(), ConfigError> {
        *self = Self::new(self.board.width, self.board.height, tuning)?;
        Ok(())
    }

    /// The board changed size: throw everything away and start over
    pub fn resize(&mut self, width: u32, height: u32, tuning: &Tuning) -> Result<(), ConfigError> {
        log::info!(
            "Board resized {}x{} -> {}x{}",
            self.board.width,
            self.board.height,
            width,
            height
        );
        *self = Self::new(width, height, tuning)?;
        Ok(())
    }

    /// Replace ball and paddle after a miss, keeping the grid
    pub fn reset_ball_and_pad(&mut self, tuning: &Tuning) -> Result<(), ConfigError> {
        let (ball, paddle) = reset_ball_and_pad(&self.board, tuning)?;
        self.ball = ball;
        self.paddle = paddle;
        Ok(())
    }

    pub fn is_over(&self) -> bool {
        self.phase != GamePhase::Playing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_class_threshold() {
        let tuning = Tuning::default();
        let small = Board::new(720, 600).unwrap();
        let large = Board::new(721, 600).unwrap();
        assert_eq!(SizeClass::classify(&small, &tuning), SizeClass::Small);
        assert_eq!(SizeClass::classify(&large, &tuning), SizeClass::Large);
    }

    #[test]
    fn test_init_small_board() {
        let tuning = Tuning::default();
        let board = Board::new(400, 700).unwrap();
        let (ball, pad, grid) = init_game(&board, &tuning).unwrap();

        assert_eq!(pad.rect, Rect::new(150.0, 685.0, 100.0, 10.0));
        assert_eq!(ball.radius, 16.0);
        assert_eq!(ball.pos, Vec2::new(200.0, 669.0));
        assert_eq!(ball.vel, Vec2::new(6.0, -6.0));
        assert_eq!((grid.rows(), grid.cols(), grid.remaining()), (4, 8, 32));
    }

    #[test]
    fn test_init_large_board() {
        let tuning = Tuning::default();
        let board = Board::new(800, 600).unwrap();
        let (ball, pad, grid) = init_game(&board, &tuning).unwrap();

        // 800/6 = 133.33 -> 133; x = 400 - 66.5 = 333.5 -> 333
        assert_eq!(pad.rect, Rect::new(333.0, 575.0, 133.0, 20.0));
        assert_eq!(ball.radius, 16.0);
        assert_eq!(ball.pos, Vec2::new(400.0, 559.0));
        assert_eq!((grid.rows(), grid.cols(), grid.remaining()), (6, 15, 90));
    }

    #[test]
    fn test_setup_errors() {
        let tuning = Tuning::default();
        assert!(matches!(
            Board::new(0, 600),
            Err(ConfigError::InvalidBoard { width: 0, height: 600 })
        ));
        // 20/25 truncates to a zero radius
        let tiny = Board::new(20, 600).unwrap();
        assert!(matches!(
            init_game(&tiny, &tuning),
            Err(ConfigError::NonPositiveRadius(_))
        ));
        let flat = Board::new(800, 20).unwrap();
        assert!(matches!(
            GameState::new(flat.width, flat.height, &tuning),
            Err(ConfigError::BoardTooShort { height: 20 })
        ));
    }

    #[test]
    fn test_new_game_state() {
        let tuning = Tuning::default();
        let state = GameState::new(800, 600, &tuning).unwrap();
        assert_eq!(state.lives, 3);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.size_class, SizeClass::Large);
        assert!(!state.is_over());
    }

    #[test]
    fn test_resize_replaces_everything() {
        let tuning = Tuning::default();
        let mut state = GameState::new(800, 600, &tuning).unwrap();
        state.grid.remove(0, 0);
        state.lives = 1;

        state.resize(400, 700, &tuning).unwrap();
        assert_eq!(state.board, Board::new(400, 700).unwrap());
        assert_eq!(state.size_class, SizeClass::Small);
        assert_eq!(state.grid.remaining(), 32);
        assert_eq!(state.lives, 3);
    }

    #[test]
    fn test_reset_ball_and_pad_keeps_grid() {
        let tuning = Tuning::default();
        let mut state = GameState::new(800, 600, &tuning).unwrap();
        state.grid.remove(2, 3);
        state.ball.pos = Vec2::new(10.0, 10.0);
        state.paddle.rect.x = 0.0;

        state.reset_ball_and_pad(&tuning).unwrap();
        assert_eq!(state.ball.pos, Vec2::new(400.0, 559.0));
        assert_eq!(state.paddle.rect.x, 333.0);
        assert_eq!(state.grid.remaining(), 89);
    }

    #[test]
    fn test_state_serializes() {
        let tuning = Tuning::default();
        let state = GameState::new(640, 480, &tuning).unwrap();
        let json = serde_json::to_string(&state).unwrap();
        let back: GameState = serde_json::from_str(&json).unwrap();
        assert_eq!(back.grid, state.grid);
        assert_eq!(back.ball, state.ball);
    }

    #[test]
    fn test_loading_edited_state_revalidates() {
        let tuning = Tuning::default();
        let state = GameState::new(800, 600, &tuning).unwrap();
        let json = serde_json::to_value(&state).unwrap();

        // A stale live count is recomputed from the slots
        let mut stale = json.clone();
        stale["grid"]["remaining"] = 0.into();
        let back: GameState = serde_json::from_value(stale).unwrap();
        assert_eq!(back.grid.remaining(), 90);
        assert_eq!(back.grid.iter().count(), 90);
        assert!(!back.grid.is_empty());

        let mut no_cols = json.clone();
        no_cols["grid"]["cols"] = 0.into();
        assert!(serde_json::from_value::<GameState>(no_cols).is_err());

        let mut short = json.clone();
        short["grid"]["slots"].as_array_mut().unwrap().truncate(3);
        assert!(serde_json::from_value::<GameState>(short).is_err());

        let mut flat = json;
        flat["board"]["width"] = 0.into();
        assert!(serde_json::from_value::<GameState>(flat).is_err());
    }
}
