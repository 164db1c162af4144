//! Geometry of a tab's panels
//!
//! Panels tile the canvas below the title bar. Neighbours share their border
//! row or column: a panel's last column is `x + w - 1`, and the panel to its
//! right starts exactly there. Every function in this module works on the
//! [`Tiling`] abstraction so the same code drives the live panel arena and
//! plain `Vec<Pos>` values in tests.
//!
//! - [`split`]: default layout, splitting, side-column insertion, maximize
//! - [`resize`]: moving shared borders
//! - [`dismantle`]: handing a removed panel's area to its neighbours
//! - [`edges`]: edge flags, canvas fitting, pruning, directional focus

pub mod dismantle;
pub mod edges;
pub mod resize;
pub mod split;

pub use dismantle::dismantle;
pub use edges::{check_edges, fit_to_canvas, invalid_tiles, move_to_direction};
pub use resize::resize;
pub use split::{default_layout, maximized, side_column, split};

/// Smallest width or height a panel may have and stay on screen
pub const MIN_SIZE: i32 = 2;

/// A panel rectangle in canvas cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Pos {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Pos {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Pos { x, y, w, h }
    }

    /// Last column, shared with the right-hand neighbour
    pub fn right(&self) -> i32 {
        self.x + self.w - 1
    }

    /// Last row, shared with the neighbour below
    pub fn bottom(&self) -> i32 {
        self.y + self.h - 1
    }

    pub fn is_valid(&self) -> bool {
        self.w >= MIN_SIZE && self.h >= MIN_SIZE
    }
}

/// Canvas dimensions, row 0 being the title bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Canvas {
    pub w: i32,
    pub h: i32,
}

impl Canvas {
    pub const fn new(w: i32, h: i32) -> Self {
        Canvas { w, h }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

/// Split orientation. `Vertical` puts the new panel to the right,
/// `Horizontal` puts it below.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Vertical,
    Horizontal,
}

/// Which canvas edges a panel touches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EdgeFlags {
    pub right: bool,
    pub bottom: bool,
}

/// An ordered set of rectangles that can be read and rewritten in place
pub trait Tiling {
    fn tile_count(&self) -> usize;
    fn tile(&self, index: usize) -> Pos;
    fn set_tile(&mut self, index: usize, pos: Pos);

    fn tiles(&self) -> Vec<Pos> {
        (0..self.tile_count()).map(|i| self.tile(i)).collect()
    }
}

impl Tiling for Vec<Pos> {
    fn tile_count(&self) -> usize {
        self.len()
    }

    fn tile(&self, index: usize) -> Pos {
        self[index]
    }

    fn set_tile(&mut self, index: usize, pos: Pos) {
        self[index] = pos;
    }
}

/// True when the rectangles partition their bounding box.
///
/// Each panel owns the half-open block `[x, x + w - 1) × [y, y + h - 1)`;
/// the shared border belongs to the panel on its right/below. The blocks must
/// be pairwise disjoint and together cover the bounding box.
pub fn is_tiled(tiles: &[Pos]) -> bool {
    if tiles.is_empty() {
        return true;
    }
    let owned: Vec<(i32, i32, i32, i32)> =
        tiles.iter().map(|p| (p.x, p.y, p.right(), p.bottom())).collect();
    if owned.iter().any(|&(x0, y0, x1, y1)| x1 <= x0 || y1 <= y0) {
        return false;
    }
    for (i, a) in owned.iter().enumerate() {
        for b in &owned[i + 1..] {
            if a.0 < b.2 && b.0 < a.2 && a.1 < b.3 && b.1 < a.3 {
                return false;
            }
        }
    }
    let min_x = owned.iter().map(|o| o.0).min().unwrap_or(0);
    let min_y = owned.iter().map(|o| o.1).min().unwrap_or(0);
    let max_x = owned.iter().map(|o| o.2).max().unwrap_or(0);
    let max_y = owned.iter().map(|o| o.3).max().unwrap_or(0);
    let area: i64 = owned
        .iter()
        .map(|&(x0, y0, x1, y1)| i64::from(x1 - x0) * i64::from(y1 - y0))
        .sum();
    area == i64::from(max_x - min_x) * i64::from(max_y - min_y)
}

/// True when the rectangles exactly tile the canvas area below the title bar
pub fn covers_canvas(tiles: &[Pos], canvas: Canvas) -> bool {
    if !is_tiled(tiles) {
        return false;
    }
    let min_x = tiles.iter().map(|p| p.x).min();
    let min_y = tiles.iter().map(|p| p.y).min();
    let max_x = tiles.iter().map(|p| p.x + p.w).max();
    let max_y = tiles.iter().map(|p| p.y + p.h).max();
    min_x == Some(0) && min_y == Some(1) && max_x == Some(canvas.w) && max_y == Some(canvas.h)
}
