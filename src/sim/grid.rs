//! The grid of breakable cells
//!
//! Fixed rows × columns of slots, each holding a live [`Cell`] or nothing.
//! Cells are only ever removed; the grid is rebuilt for a new game.

use serde::{Deserialize, Serialize};

use super::collision::{Edge, rect_hit};
use super::geometry::{Ball, Cell};
use crate::error::ConfigError;
use crate::tuning::{LayoutClass, Tuning};

/// A cell struck (and removed) by the ball
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellHit {
    pub row: usize,
    pub col: usize,
    pub edge: Edge,
    /// The cell as it was before removal
    pub cell: Cell,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GridSnapshot")]
pub struct CellGrid {
    rows: usize,
    cols: usize,
    /// Row-major, `None` once destroyed
    slots: Vec<Option<Cell>>,
    remaining: usize,
}

/// Serialized form of a grid. The live count is recomputed on load.
#[derive(Deserialize)]
struct GridSnapshot {
    rows: usize,
    cols: usize,
    slots: Vec<Option<Cell>>,
}

impl TryFrom<GridSnapshot> for CellGrid {
    type Error = ConfigError;

    fn try_from(snapshot: GridSnapshot) -> Result<Self, Self::Error> {
        Self::from_slots(snapshot.rows, snapshot.cols, snapshot.slots)
    }
}

/// Tuning fractions are stored as f32; widen them to the decimal they were
/// written as so layout truncation lands on the intended pixel.
fn decimal(v: f32) -> f64 {
    (f64::from(v) * 1e6).round() / 1e6
}

impl CellGrid {
    /// Lay out a full grid for a board of the given width.
    ///
    /// The container spans `grid_width_fraction` of the board, centered.
    /// Each slot is `container / cols` wide and half as tall; cells sit
    /// `grid_top_offset_rows` slot heights below the top and give up
    /// `cell_padding` of their slot, split evenly on the left and right.
    /// All sizes are truncated to whole pixels.
    pub fn layout(board_width: f32, class: &LayoutClass, tuning: &Tuning) -> Result<Self, ConfigError> {
        if class.rows == 0 || class.cols == 0 {
            return Err(ConfigError::EmptyGrid {
                rows: class.rows,
                cols: class.cols,
            });
        }

        let width = f64::from(board_width);
        let padding = decimal(tuning.cell_padding);
        let container_w = (decimal(tuning.grid_width_fraction) * width).trunc();
        let container_x = ((width - container_w) / 2.0).trunc();

        let slot_w = (container_w / class.cols as f64).trunc();
        let slot_h = (slot_w / 2.0).trunc();
        let cell_w = (slot_w * (1.0 - padding)).trunc();
        let cell_h = (slot_h * (1.0 - padding)).trunc();
        if cell_w <= 0.0 || cell_h <= 0.0 {
            return Err(ConfigError::DegenerateCell {
                width: cell_w as f32,
                height: cell_h as f32,
            });
        }

        let top = f64::from(tuning.grid_top_offset_rows);
        let mut slots = Vec::with_capacity(class.rows * class.cols);
        for row in 0..class.rows {
            for col in 0..class.cols {
                let x = (container_x + col as f64 * slot_w + slot_w * padding / 2.0).trunc();
                let y = ((row as f64 + top) * slot_h).trunc();
                slots.push(Some(Cell::new(x as f32, y as f32, cell_w as f32, cell_h as f32)));
            }
        }

        Self::from_slots(class.rows, class.cols, slots)
    }

    /// Build a grid from explicit row-major slots (custom layouts, tests)
    pub fn from_slots(rows: usize, cols: usize, slots: Vec<Option<Cell>>) -> Result<Self, ConfigError> {
        if rows == 0 || cols == 0 {
            return Err(ConfigError::EmptyGrid { rows, cols });
        }
        if slots.len() != rows * cols {
            return Err(ConfigError::SlotCount {
                expected: rows * cols,
                got: slots.len(),
            });
        }
        if let Some(cell) = slots
            .iter()
            .flatten()
            .find(|c| !(c.rect.width > 0.0 && c.rect.height > 0.0))
        {
            return Err(ConfigError::DegenerateCell {
                width: cell.rect.width,
                height: cell.rect.height,
            });
        }
        let remaining = slots.iter().flatten().count();
        Ok(Self {
            rows,
            cols,
            slots,
            remaining,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Live cells left
    pub fn remaining(&self) -> usize {
        self.remaining
    }

    /// True once every cell has been destroyed
    pub fn is_empty(&self) -> bool {
        self.remaining == 0
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&Cell> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.slots[row * self.cols + col].as_ref()
    }

    /// Destroy the cell at (row, col), returning it if it was alive
    pub fn remove(&mut self, row: usize, col: usize) -> Option<Cell> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        let removed = self.slots[row * self.cols + col].take();
        if removed.is_some() {
            self.remaining -= 1;
        }
        removed
    }

    /// Live cells with their (row, col), in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &Cell)> {
        let cols = self.cols;
        self.slots
            .iter()
            .enumerate()
            .filter_map(move |(i, slot)| slot.as_ref().map(|cell| (i / cols, i % cols, cell)))
    }

    /// Find the first live cell (row-major) the ball strikes this tick and
    /// remove it. At most one cell is removed per call; the caller flips
    /// the velocity along `hit.edge.axis()`.
    pub fn check_hit(&mut self, ball: &Ball) -> Option<CellHit> {
        let (index, edge) = self
            .slots
            .iter()
            .enumerate()
            .find_map(|(i, slot)| slot.as_ref().and_then(|cell| rect_hit(ball, &cell.rect)).map(|edge| (i, edge)))?;

        let (row, col) = (index / self.cols, index % self.cols);
        let cell = self.remove(row, col)?;
        Some(CellHit { row, col, edge, cell })
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;

    fn ball(x: f32, y: f32, vx: f32, vy: f32) -> Ball {
        Ball::new(Vec2::new(x, y), Vec2::new(vx, vy), 10.0)
    }

    #[test]
    fn test_small_layout() {
        let tuning = Tuning::default();
        let grid = CellGrid::layout(400.0, &tuning.small, &tuning).unwrap();
        assert_eq!((grid.rows(), grid.cols()), (4, 8));
        assert_eq!(grid.remaining(), 32);
        assert!(!grid.is_empty());

        // container 320 at x=40, slots 40x20, cells 36x18
        assert_eq!(grid.get(0, 0), Some(&Cell::new(42.0, 40.0, 36.0, 18.0)));
        assert_eq!(grid.get(3, 7), Some(&Cell::new(322.0, 100.0, 36.0, 18.0)));
        assert_eq!(grid.get(4, 0), None);
    }

    #[test]
    fn test_large_layout() {
        let tuning = Tuning::default();
        let grid = CellGrid::layout(800.0, &tuning.large, &tuning).unwrap();
        assert_eq!((grid.rows(), grid.cols()), (6, 15));
        assert_eq!(grid.iter().count(), 90);

        // container 640 at x=80, slots 42x21, cells 37x18
        assert_eq!(grid.get(0, 0), Some(&Cell::new(82.0, 42.0, 37.0, 18.0)));
        assert_eq!(grid.get(5, 14), Some(&Cell::new(670.0, 147.0, 37.0, 18.0)));
    }

    #[test]
    fn test_padding_truncates_like_decimal() {
        // 50px slots: 50 * 0.9 must be 45, not 44
        let tuning = Tuning::default();
        let class = LayoutClass { cols: 8, ..LayoutClass::small() };
        let grid = CellGrid::layout(500.0, &class, &tuning).unwrap();
        assert_eq!(grid.get(0, 0).map(|c| c.rect.width), Some(45.0));
    }

    #[test]
    fn test_degenerate_layout() {
        let tuning = Tuning::default();
        assert!(matches!(
            CellGrid::layout(10.0, &tuning.large, &tuning),
            Err(ConfigError::DegenerateCell { .. })
        ));
        let class = LayoutClass { rows: 0, ..LayoutClass::small() };
        assert!(matches!(
            CellGrid::layout(400.0, &class, &tuning),
            Err(ConfigError::EmptyGrid { .. })
        ));
        assert!(matches!(
            CellGrid::from_slots(2, 2, vec![None; 3]),
            Err(ConfigError::SlotCount { expected: 4, got: 3 })
        ));
    }

    #[test]
    fn test_check_hit_removes_one_cell() {
        let cell = Cell::new(200.0, 100.0, 100.0, 50.0);
        let mut grid = CellGrid::from_slots(1, 1, vec![Some(cell)]).unwrap();
        let b = ball(250.0, 92.0, 0.0, 6.0);

        let hit = grid.check_hit(&b).unwrap();
        assert_eq!((hit.row, hit.col, hit.edge), (0, 0, Edge::Top));
        assert_eq!(hit.cell, cell);
        assert!(grid.is_empty());

        // Same ball again: the cell is gone
        assert_eq!(grid.check_hit(&b), None);
    }

    #[test]
    fn test_check_hit_stacked_cells() {
        let upper = Cell::new(200.0, 100.0, 100.0, 10.0);
        let lower = Cell::new(200.0, 125.0, 100.0, 10.0);
        let mut grid = CellGrid::from_slots(2, 1, vec![Some(upper), Some(lower)]).unwrap();

        // Moving up from below the lower cell only reaches the lower cell
        let b = ball(250.0, 141.0, 0.0, -6.0);
        let hit = grid.check_hit(&b).unwrap();
        assert_eq!((hit.row, hit.edge), (1, Edge::Bottom));
        assert_eq!(grid.remaining(), 1);

        // Between the two, moving up: upper cell's bottom edge
        let b = ball(250.0, 118.0, 0.0, -6.0);
        let hit = grid.check_hit(&b).unwrap();
        assert_eq!((hit.row, hit.edge), (0, Edge::Bottom));
        assert!(grid.is_empty());
    }

    #[test]
    fn test_scan_stops_at_first_cell_with_any_hit() {
        // The ball reaches the left side of cell A and the top of cell B in
        // the same tick. A comes first in row-major order, so it wins even
        // though its hit is horizontal.
        let a = Cell::new(200.0, 100.0, 50.0, 50.0);
        let b = Cell::new(150.0, 160.0, 40.0, 40.0);
        let mut grid = CellGrid::from_slots(2, 1, vec![Some(a), Some(b)]).unwrap();

        let hit = grid.check_hit(&ball(191.0, 150.0, 6.0, 6.0)).unwrap();
        assert_eq!((hit.row, hit.edge), (0, Edge::Left));
        assert_eq!(grid.get(1, 0), Some(&b));
        assert_eq!(grid.remaining(), 1);
    }

    #[test]
    fn test_iter_skips_removed() {
        let tuning = Tuning::default();
        let mut grid = CellGrid::layout(400.0, &tuning.small, &tuning).unwrap();
        assert!(grid.remove(0, 1).is_some());
        assert!(grid.remove(0, 1).is_none());
        assert_eq!(grid.remaining(), 31);
        let positions: Vec<_> = grid.iter().take(2).map(|(r, c, _)| (r, c)).collect();
        assert_eq!(positions, vec![(0, 0), (0, 2)]);
    }

    #[test]
    fn test_empty_after_clearing_everything() {
        let tuning = Tuning::default();
        let mut grid = CellGrid::layout(400.0, &tuning.small, &tuning).unwrap();
        for row in 0..grid.rows() {
            for col in 0..grid.cols() {
                grid.remove(row, col);
            }
        }
        assert!(grid.is_empty());
        assert_eq!(grid.iter().count(), 0);
    }
}
