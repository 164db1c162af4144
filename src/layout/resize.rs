//! Moving shared borders
//!
//! A resize moves one border of the current panel by `step` cells. When a
//! neighbour spans exactly the same rows (or columns) only that pair changes.
//! Otherwise the whole seam moves: every panel whose edge lies on the border
//! line within the connected stretch around the current panel. The near
//! border is preferred; when it cannot move the far border moves instead.

use super::{Direction, Pos, Tiling, MIN_SIZE};
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    X,
    Y,
}

impl Axis {
    fn start(self, p: &Pos) -> i32 {
        match self {
            Axis::X => p.x,
            Axis::Y => p.y,
        }
    }

    fn end(self, p: &Pos) -> i32 {
        match self {
            Axis::X => p.right(),
            Axis::Y => p.bottom(),
        }
    }

    /// Inclusive span on the other axis
    fn across(self, p: &Pos) -> (i32, i32) {
        match self {
            Axis::X => (p.y, p.bottom()),
            Axis::Y => (p.x, p.right()),
        }
    }

    fn grow(self, p: &mut Pos, delta: i32) {
        match self {
            Axis::X => p.w += delta,
            Axis::Y => p.h += delta,
        }
    }

    fn shift(self, p: &mut Pos, delta: i32) {
        match self {
            Axis::X => {
                p.x += delta;
                p.w -= delta;
            }
            Axis::Y => {
                p.y += delta;
                p.h -= delta;
            }
        }
    }
}

/// Move the current panel's border in `dir` by `step` cells.
///
/// Returns `false` (and leaves everything untouched) when no border can move
/// without shrinking some panel below the minimum size.
pub fn resize<T: Tiling + ?Sized>(tiling: &mut T, cur: usize, dir: Direction, step: i32) -> bool {
    if cur >= tiling.tile_count() || step <= 0 {
        return false;
    }
    let before = tiling.tiles();
    let mut tiles = before.clone();
    let moved = match dir {
        Direction::Left => toward_start(&mut tiles, cur, Axis::X, step),
        Direction::Up => toward_start(&mut tiles, cur, Axis::Y, step),
        Direction::Right => toward_end(&mut tiles, cur, Axis::X, step),
        Direction::Down => toward_end(&mut tiles, cur, Axis::Y, step),
    };
    if !moved {
        trace!(?dir, cur, "resize blocked");
        return false;
    }
    for (i, (old, new)) in before.iter().zip(&tiles).enumerate() {
        if old != new {
            tiling.set_tile(i, *new);
        }
    }
    true
}

fn toward_start(tiles: &mut [Pos], cur: usize, axis: Axis, step: i32) -> bool {
    let c = tiles[cur];
    let near = axis.start(&c);
    if let Some(i) = exact_neighbour(tiles, cur, axis, near, Side::Before) {
        let t = tiles[i];
        if axis.end(&t) - step > axis.start(&t) {
            axis.grow(&mut tiles[i], -step);
            axis.shift(&mut tiles[cur], -step);
            return true;
        }
    }
    move_seam(tiles, cur, axis, near, -step) || move_seam(tiles, cur, axis, axis.end(&c), -step)
}

fn toward_end(tiles: &mut [Pos], cur: usize, axis: Axis, step: i32) -> bool {
    let c = tiles[cur];
    let far = axis.end(&c);
    if let Some(i) = exact_neighbour(tiles, cur, axis, far, Side::After) {
        let t = tiles[i];
        if axis.start(&t) + step < axis.end(&t) {
            axis.shift(&mut tiles[i], step);
            axis.grow(&mut tiles[cur], step);
            return true;
        }
    }
    move_seam(tiles, cur, axis, far, step) || move_seam(tiles, cur, axis, axis.start(&c), step)
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Side {
    Before,
    After,
}

fn exact_neighbour(tiles: &[Pos], cur: usize, axis: Axis, line: i32, side: Side) -> Option<usize> {
    let span = axis.across(&tiles[cur]);
    tiles.iter().enumerate().position(|(i, t)| {
        i != cur
            && axis.across(t) == span
            && match side {
                Side::Before => axis.end(t) == line,
                Side::After => axis.start(t) == line,
            }
    })
}

/// Shift the border line `line` by `delta`, carrying every panel that lies on
/// the connected stretch of that line through the current panel's span.
fn move_seam(tiles: &mut [Pos], cur: usize, axis: Axis, line: i32, delta: i32) -> bool {
    let (mut lo, mut hi) = axis.across(&tiles[cur]);
    let mut before: Vec<usize> = Vec::new();
    let mut after: Vec<usize> = Vec::new();
    loop {
        let mut grown = false;
        for (i, t) in tiles.iter().enumerate() {
            if before.contains(&i) || after.contains(&i) {
                continue;
            }
            let (t0, t1) = axis.across(t);
            if t0 > hi || t1 < lo {
                continue;
            }
            let group = if axis.end(t) == line {
                &mut before
            } else if axis.start(t) == line {
                &mut after
            } else {
                continue;
            };
            group.push(i);
            lo = lo.min(t0);
            hi = hi.max(t1);
            grown = true;
        }
        if !grown {
            break;
        }
    }
    if before.is_empty() || after.is_empty() {
        return false;
    }
    let fits = if delta < 0 {
        before
            .iter()
            .all(|&i| axis.end(&tiles[i]) + delta - axis.start(&tiles[i]) + 1 >= MIN_SIZE)
    } else {
        after
            .iter()
            .all(|&i| axis.end(&tiles[i]) - axis.start(&tiles[i]) - delta + 1 >= MIN_SIZE)
    };
    if !fits {
        return false;
    }
    for i in before {
        axis.grow(&mut tiles[i], delta);
    }
    for i in after {
        axis.shift(&mut tiles[i], delta);
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{covers_canvas, Canvas};

    fn halves() -> Vec<Pos> {
        vec![Pos::new(0, 1, 41, 23), Pos::new(40, 1, 40, 23)]
    }

    #[test]
    fn test_exact_neighbour_left() {
        let mut tiles = halves();
        assert!(resize(&mut tiles, 1, Direction::Left, 4));
        assert_eq!(tiles[0], Pos::new(0, 1, 37, 23));
        assert_eq!(tiles[1], Pos::new(36, 1, 44, 23));
    }

    #[test]
    fn test_exact_neighbour_right() {
        let mut tiles = halves();
        assert!(resize(&mut tiles, 0, Direction::Right, 4));
        assert_eq!(tiles[0], Pos::new(0, 1, 45, 23));
        assert_eq!(tiles[1], Pos::new(44, 1, 36, 23));
    }

    #[test]
    fn test_left_edge_panel_moves_far_border() {
        let mut tiles = halves();
        assert!(resize(&mut tiles, 0, Direction::Left, 4));
        assert_eq!(tiles[0], Pos::new(0, 1, 37, 23));
        assert_eq!(tiles[1], Pos::new(36, 1, 44, 23));
    }

    #[test]
    fn test_seam_carries_stacked_panels() {
        // left column, right column split in two
        let mut tiles = vec![
            Pos::new(0, 1, 41, 23),
            Pos::new(40, 1, 40, 12),
            Pos::new(40, 12, 40, 12),
        ];
        assert!(resize(&mut tiles, 1, Direction::Left, 4));
        assert_eq!(tiles[0].w, 37);
        assert_eq!(tiles[1].x, 36);
        assert_eq!(tiles[2].x, 36);
        assert!(covers_canvas(&tiles, Canvas::new(80, 24)));
    }

    #[test]
    fn test_guard_blocks_degenerate_panel() {
        let mut tiles = vec![Pos::new(0, 1, 5, 23), Pos::new(4, 1, 76, 23)];
        let before = tiles.clone();
        assert!(!resize(&mut tiles, 1, Direction::Left, 4));
        assert_eq!(tiles, before);
    }

    #[test]
    fn test_vertical_resize() {
        let mut tiles = vec![Pos::new(0, 1, 80, 12), Pos::new(0, 12, 80, 12)];
        assert!(resize(&mut tiles, 1, Direction::Up, 4));
        assert_eq!(tiles[0], Pos::new(0, 1, 80, 8));
        assert_eq!(tiles[1], Pos::new(0, 8, 80, 16));
        assert!(resize(&mut tiles, 0, Direction::Down, 4));
        assert_eq!(tiles[0], Pos::new(0, 1, 80, 12));
    }

    #[test]
    fn test_crossing_panel_bounds_the_seam() {
        // top: A | B1/B2, middle: C spans the whole width, bottom: D | E
        let mut tiles = vec![
            Pos::new(0, 1, 41, 8),
            Pos::new(40, 1, 40, 5),
            Pos::new(40, 5, 40, 4),
            Pos::new(0, 8, 80, 9),
            Pos::new(0, 16, 41, 8),
            Pos::new(40, 16, 40, 8),
        ];
        assert!(resize(&mut tiles, 1, Direction::Left, 4));
        assert_eq!(tiles[0].w, 37);
        assert_eq!(tiles[1].x, 36);
        assert_eq!(tiles[2].x, 36);
        assert_eq!(tiles[4].w, 41);
        assert_eq!(tiles[5].x, 40);
        assert!(covers_canvas(&tiles, Canvas::new(80, 24)));
    }
}
