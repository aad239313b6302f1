//! Mapping from game pixels to terminal cells

use glam::Vec2;

use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::sim::Rect;

/// Inclusive range of cells covered by a rectangle, possibly off screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRect {
    pub col0: i32,
    pub row0: i32,
    pub col1: i32,
    pub row1: i32,
}

/// The game screen stretched over the terminal grid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub cols: u16,
    pub rows: u16,
}

impl Viewport {
    pub fn new(cols: u16, rows: u16) -> Self {
        Self {
            cols: cols.max(1),
            rows: rows.max(1),
        }
    }

    pub fn resize(&mut self, cols: u16, rows: u16) {
        *self = Self::new(cols, rows);
    }

    /// Pixels per cell on each axis
    pub fn cell_size(&self) -> Vec2 {
        Vec2::new(
            SCREEN_WIDTH / self.cols as f32,
            SCREEN_HEIGHT / self.rows as f32,
        )
    }

    /// Cell containing a game point; may lie outside the grid
    pub fn to_cell(&self, point: Vec2) -> (i32, i32) {
        let cell = self.cell_size();
        (
            (point.x / cell.x).floor() as i32,
            (point.y / cell.y).floor() as i32,
        )
    }

    pub fn contains_cell(&self, col: i32, row: i32) -> bool {
        col >= 0 && row >= 0 && col < self.cols as i32 && row < self.rows as i32
    }

    /// Cells a rectangle touches. Every non-empty rectangle covers at least
    /// one cell so small sprites never vanish.
    pub fn rect_cells(&self, rect: &Rect) -> CellRect {
        let (col0, row0) = self.to_cell(rect.pos);
        let cell = self.cell_size();
        let far = rect.pos + rect.size;
        let col1 = ((far.x / cell.x).ceil() as i32 - 1).max(col0);
        let row1 = ((far.y / cell.y).ceil() as i32 - 1).max(row0);
        CellRect {
            col0,
            row0,
            col1,
            row1,
        }
    }

    /// Column where text of `len` cells starts when centered on the screen
    pub fn centered_col(&self, len: usize) -> u16 {
        (self.cols as usize).saturating_sub(len) as u16 / 2
    }

    /// Row for a game y coordinate, clamped onto the grid
    pub fn row_at(&self, y: f32) -> u16 {
        let (_, row) = self.to_cell(Vec2::new(0.0, y));
        row.clamp(0, self.rows as i32 - 1) as u16
    }
}
