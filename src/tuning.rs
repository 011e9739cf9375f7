//! Data-driven game balance
//!
//! Every gameplay constant lives in [`Tuning`]. Defaults come from
//! [`crate::consts`]; a JSON file can override any subset of keys.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Sizing recipe for one screen-size class
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutClass {
    /// Paddle width = board width / this
    pub pad_width_divisor: f32,
    /// Paddle height in pixels
    pub pad_height: f32,
    /// Ball radius = board width / this
    pub ball_radius_divisor: f32,
    /// Cells per row
    pub cols: usize,
    /// Rows of cells
    pub rows: usize,
}

impl LayoutClass {
    /// Fewer, larger cells and a chunkier ball for narrow boards
    pub fn small() -> Self {
        Self {
            pad_width_divisor: 4.0,
            pad_height: 10.0,
            ball_radius_divisor: 25.0,
            cols: 8,
            rows: 4,
        }
    }

    pub fn large() -> Self {
        Self {
            pad_width_divisor: 6.0,
            pad_height: 20.0,
            ball_radius_divisor: 50.0,
            cols: 15,
            rows: 6,
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.rows == 0 || self.cols == 0 {
            return Err(ConfigError::EmptyGrid {
                rows: self.rows,
                cols: self.cols,
            });
        }
        positive("pad_width_divisor", self.pad_width_divisor)?;
        positive("pad_height", self.pad_height)?;
        positive("ball_radius_divisor", self.ball_radius_divisor)?;
        Ok(())
    }
}

/// Game balance knobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Boards at most this wide use the small layout
    pub small_screen_max_width: f32,
    /// Paddle travel per left/right command
    pub pad_step: f32,
    /// Gap between paddle and board bottom
    pub pad_bottom_margin: f32,
    /// Initial ball speed per axis
    pub ball_speed: f32,
    pub start_lives: u8,
    /// Fraction of board width used by the cell container
    pub grid_width_fraction: f32,
    /// Fraction of each cell slot given up as padding
    pub cell_padding: f32,
    /// Empty rows above the grid, in cell heights
    pub grid_top_offset_rows: u32,
    pub small: LayoutClass,
    pub large: LayoutClass,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            small_screen_max_width: SMALL_SCREEN_MAX_WIDTH,
            pad_step: PAD_STEP,
            pad_bottom_margin: PAD_BOTTOM_MARGIN,
            ball_speed: BALL_SPEED,
            start_lives: START_LIVES,
            grid_width_fraction: GRID_WIDTH_FRACTION,
            cell_padding: CELL_PADDING,
            grid_top_offset_rows: GRID_TOP_OFFSET_ROWS,
            small: LayoutClass::small(),
            large: LayoutClass::large(),
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON; missing keys keep their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load and validate a tuning file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("small_screen_max_width", self.small_screen_max_width)?;
        positive("pad_step", self.pad_step)?;
        if !(self.pad_bottom_margin >= 0.0) {
            return Err(ConfigError::Tuning {
                name: "pad_bottom_margin",
                value: self.pad_bottom_margin,
                expected: ">= 0",
            });
        }
        if !(self.ball_speed.is_finite() && self.ball_speed != 0.0) {
            return Err(ConfigError::ZeroSpeed {
                x: self.ball_speed,
                y: self.ball_speed,
            });
        }
        if self.start_lives == 0 {
            return Err(ConfigError::Tuning {
                name: "start_lives",
                value: 0.0,
                expected: ">= 1",
            });
        }
        if !(self.grid_width_fraction > 0.0 && self.grid_width_fraction <= 1.0) {
            return Err(ConfigError::Tuning {
                name: "grid_width_fraction",
                value: self.grid_width_fraction,
                expected: "(0, 1]",
            });
        }
        if !(self.cell_padding >= 0.0 && self.cell_padding < 1.0) {
            return Err(ConfigError::Tuning {
                name: "cell_padding",
                value: self.cell_padding,
                expected: "[0, 1)",
            });
        }
        self.small.validate()?;
        self.large.validate()?;
        Ok(())
    }
}

fn positive(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Tuning {
            name,
            value,
            expected: "> 0",
        })
    }
}
