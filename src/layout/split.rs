//! Creating geometry: the default arrangement, splits and side columns

use super::{Canvas, Orientation, Pos, Tiling};

/// Width of the right-hand stack in the default arrangement
pub fn column_width(canvas: Canvas, configured: Option<i32>) -> i32 {
    let width = configured.unwrap_or(if canvas.w < 140 { canvas.w / 3 } else { 80 });
    width.clamp(1, canvas.w.max(1))
}

/// Default arrangement for `count` panels.
///
/// Panel 0 fills the left part of the canvas; the others are stacked on the
/// right in a column `column_width` wide, the last one reaching the bottom.
pub fn default_layout(count: usize, canvas: Canvas, column_width: i32) -> Vec<Pos> {
    match count {
        0 => Vec::new(),
        1 => vec![Pos::new(0, 1, canvas.w, canvas.h - 1)],
        _ => {
            let stacked = (count - 1) as i32;
            let colpos = canvas.w - column_width;
            let ph = (canvas.h - 1) / stacked;
            let mut tiles = Vec::with_capacity(count);
            tiles.push(Pos::new(0, 1, colpos + 1, canvas.h - 1));
            for i in 1..count as i32 {
                let y = 1 + ph * (i - 1);
                let h = if i == stacked { canvas.h - y } else { ph + 1 };
                tiles.push(Pos::new(colpos, y, (canvas.w - colpos).max(0), h));
            }
            tiles
        }
    }
}

/// Split `pos` in two. The first rectangle replaces `pos`, the second
/// is the new panel (right of it or below it) sharing one border.
pub fn split(pos: Pos, orientation: Orientation) -> (Pos, Pos) {
    match orientation {
        Orientation::Vertical => {
            let left = Pos { w: pos.w / 2 + 1, ..pos };
            let right = Pos::new(left.x + left.w - 1, pos.y, pos.w - left.w + 1, pos.h);
            (left, right)
        }
        Orientation::Horizontal => {
            let top = Pos { h: pos.h / 2 + 1, ..pos };
            let bottom = Pos::new(pos.x, top.y + top.h - 1, pos.w, pos.h - top.h + 1);
            (top, bottom)
        }
    }
}

/// Whole canvas below the title bar
pub fn maximized(canvas: Canvas) -> Pos {
    Pos::new(0, 1, canvas.w, canvas.h - 1)
}

/// Make room for a full-height column on the left edge.
///
/// Every panel touching the left edge is narrowed and shifted right. The
/// column is `side_w` wide, or narrower when a left panel could not give up
/// that much. Returns the column's rectangle, or `None` if nothing fits.
pub fn side_column<T: Tiling + ?Sized>(tiling: &mut T, canvas: Canvas, side_w: i32) -> Option<Pos> {
    let lefts: Vec<usize> = (0..tiling.tile_count())
        .filter(|&i| tiling.tile(i).x == 0)
        .collect();
    let room = lefts
        .iter()
        .map(|&i| tiling.tile(i).w - 1)
        .min()
        .unwrap_or(side_w);
    let width = side_w.min(room).min(canvas.w);
    if width < 3 {
        return None;
    }
    for i in lefts {
        let mut pos = tiling.tile(i);
        pos.x += width - 1;
        pos.w -= width - 1;
        tiling.set_tile(i, pos);
    }
    Some(Pos::new(0, 1, width, canvas.h - 1))
}
