//! Edge tracking, canvas fitting, pruning and directional focus

use super::{Canvas, Direction, EdgeFlags, Tiling};

/// Flag the panels that reach the right-most column and the bottom row
pub fn check_edges<T: Tiling + ?Sized>(tiling: &T) -> Vec<EdgeFlags> {
    let tiles = tiling.tiles();
    let max_right = tiles.iter().map(|p| p.x + p.w).max().unwrap_or(0);
    let max_bottom = tiles.iter().map(|p| p.y + p.h).max().unwrap_or(0);
    tiles
        .iter()
        .map(|p| EdgeFlags {
            right: p.x + p.w == max_right,
            bottom: p.y + p.h == max_bottom,
        })
        .collect()
}

/// Stretch edge panels so the layout follows a resized canvas
pub fn fit_to_canvas<T: Tiling + ?Sized>(tiling: &mut T, edges: &[EdgeFlags], canvas: Canvas) {
    for (i, edge) in edges.iter().enumerate().take(tiling.tile_count()) {
        let mut pos = tiling.tile(i);
        if edge.right && pos.x < canvas.w {
            pos.w = canvas.w - pos.x;
        }
        if edge.bottom && pos.y < canvas.h {
            pos.h = canvas.h - pos.y;
        }
        if pos != tiling.tile(i) {
            tiling.set_tile(i, pos);
        }
    }
}

/// Indices of panels too small to display, highest first.
///
/// Panel 0 is never reported.
pub fn invalid_tiles<T: Tiling + ?Sized>(tiling: &T) -> Vec<usize> {
    (1..tiling.tile_count())
        .rev()
        .filter(|&i| !tiling.tile(i).is_valid())
        .collect()
}

/// First panel sharing the requested edge of `cur` with an overlapping span
pub fn move_to_direction<T: Tiling + ?Sized>(tiling: &T, cur: usize, dir: Direction) -> Option<usize> {
    if cur >= tiling.tile_count() {
        return None;
    }
    let c = tiling.tile(cur);
    (0..tiling.tile_count()).filter(|&i| i != cur).find(|&i| {
        let t = tiling.tile(i);
        match dir {
            Direction::Left => t.right() == c.x && t.y < c.bottom() && c.y < t.bottom(),
            Direction::Right => t.x == c.right() && t.y < c.bottom() && c.y < t.bottom(),
            Direction::Up => t.bottom() == c.y && t.x < c.right() && c.x < t.right(),
            Direction::Down => t.y == c.bottom() && t.x < c.right() && c.x < t.right(),
        }
    })
}
