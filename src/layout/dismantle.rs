//! Giving a removed panel's area to its neighbours

use super::{Pos, Tiling};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Left,
    Right,
    Up,
    Down,
}

const SIDES: [Side; 4] = [Side::Left, Side::Right, Side::Up, Side::Down];

/// Panels touching `gone` on `side` whose spans overlap it.
fn neighbours<T: Tiling + ?Sized>(tiling: &T, skip: usize, gone: Pos, side: Side) -> Vec<usize> {
    (0..tiling.tile_count())
        .filter(|&i| i != skip)
        .filter(|&i| {
            let t = tiling.tile(i);
            match side {
                Side::Left => t.right() == gone.x && t.y < gone.bottom() && gone.y < t.bottom(),
                Side::Right => t.x == gone.right() && t.y < gone.bottom() && gone.y < t.bottom(),
                Side::Up => t.bottom() == gone.y && t.x < gone.right() && gone.x < t.right(),
                Side::Down => t.y == gone.bottom() && t.x < gone.right() && gone.x < t.right(),
            }
        })
        .collect()
}

/// Whether a side's neighbours fit exactly within the removed panel's span
fn flush(tiles: &[Pos], gone: Pos, side: Side) -> bool {
    match side {
        Side::Left | Side::Right => {
            tiles.iter().all(|t| t.y >= gone.y && t.bottom() <= gone.bottom())
                && tiles.iter().any(|t| t.y == gone.y)
                && tiles.iter().any(|t| t.bottom() == gone.bottom())
        }
        Side::Up | Side::Down => {
            tiles.iter().all(|t| t.x >= gone.x && t.right() <= gone.right())
                && tiles.iter().any(|t| t.x == gone.x)
                && tiles.iter().any(|t| t.right() == gone.right())
        }
    }
}

fn extend(t: Pos, gone: Pos, side: Side) -> Pos {
    match side {
        Side::Left => Pos { w: gone.right() - t.x + 1, ..t },
        Side::Right => Pos { x: gone.x, w: t.right() - gone.x + 1, ..t },
        Side::Up => Pos { h: gone.bottom() - t.y + 1, ..t },
        Side::Down => Pos { y: gone.y, h: t.bottom() - gone.y + 1, ..t },
    }
}

/// Hand the area of panel `index` to its neighbours.
///
/// A single neighbour with exactly the same span on one side wins first
/// (left, right, up, down). Failing that, the first side whose neighbours
/// together cover exactly the removed span is extended as a group. The
/// caller removes the panel afterwards; when `false` is returned nothing
/// qualified and the geometry is unchanged.
pub fn dismantle<T: Tiling + ?Sized>(tiling: &mut T, index: usize) -> bool {
    if tiling.tile_count() <= 1 || index >= tiling.tile_count() {
        return false;
    }
    let gone = tiling.tile(index);
    let sides: Vec<(Side, Vec<usize>)> = SIDES
        .iter()
        .map(|&side| (side, neighbours(tiling, index, gone, side)))
        .collect();

    let single = sides.iter().find_map(|(side, ids)| {
        ids.iter()
            .copied()
            .find(|&i| {
                let t = tiling.tile(i);
                match side {
                    Side::Left | Side::Right => t.y == gone.y && t.h == gone.h,
                    Side::Up | Side::Down => t.x == gone.x && t.w == gone.w,
                }
            })
            .map(|i| (*side, vec![i]))
    });
    let chosen = single.or_else(|| {
        sides.into_iter().find(|(side, ids)| {
            let tiles: Vec<Pos> = ids.iter().map(|&i| tiling.tile(i)).collect();
            !tiles.is_empty() && flush(&tiles, gone, *side)
        })
    });

    match chosen {
        Some((side, ids)) => {
            debug!(index, ?side, count = ids.len(), "dismantle");
            for i in ids {
                let t = tiling.tile(i);
                tiling.set_tile(i, extend(t, gone, side));
            }
            true
        }
        None => {
            debug!(index, "dismantle found no neighbour to absorb the panel");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{covers_canvas, Canvas};

    #[test]
    fn test_restores_split_geometry() {
        let mut tiles = vec![
            Pos::new(0, 1, 41, 23),
            Pos::new(40, 1, 40, 12),
            Pos::new(40, 12, 40, 12),
        ];
        assert!(dismantle(&mut tiles, 2));
        tiles.remove(2);
        assert_eq!(tiles[1], Pos::new(40, 1, 40, 23));
        assert!(covers_canvas(&tiles, Canvas::new(80, 24)));
    }

    #[test]
    fn test_left_neighbour_wins_first() {
        let mut tiles = vec![Pos::new(0, 1, 41, 23), Pos::new(40, 1, 40, 23)];
        assert!(dismantle(&mut tiles, 1));
        assert_eq!(tiles[0], Pos::new(0, 1, 80, 23));
    }

    #[test]
    fn test_right_neighbour_takes_left_edge() {
        let mut tiles = vec![Pos::new(0, 1, 41, 23), Pos::new(40, 1, 40, 23)];
        assert!(dismantle(&mut tiles, 0));
        assert_eq!(tiles[1], Pos::new(0, 1, 80, 23));
    }

    #[test]
    fn test_group_extension() {
        // the removed left column is bordered by two stacked panels
        let mut tiles = vec![
            Pos::new(0, 1, 41, 23),
            Pos::new(40, 1, 40, 12),
            Pos::new(40, 12, 40, 12),
        ];
        assert!(dismantle(&mut tiles, 0));
        tiles.remove(0);
        assert_eq!(tiles[0], Pos::new(0, 1, 80, 12));
        assert_eq!(tiles[1], Pos::new(0, 12, 80, 12));
        assert!(covers_canvas(&tiles, Canvas::new(80, 24)));
    }

    #[test]
    fn test_single_panel_is_never_dismantled() {
        let mut tiles = vec![Pos::new(0, 1, 80, 23)];
        assert!(!dismantle(&mut tiles, 0));
    }
}
