// Random split/resize/remove sequences never break the tiling

use panedeck::layout::{
    covers_canvas, dismantle, is_tiled, maximized, resize, split, Canvas, Direction, Orientation, Pos, MIN_SIZE,
};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Split(usize, Orientation),
    Resize(usize, Direction, i32),
    Remove(usize),
}

fn op() -> impl Strategy<Value = Op> {
    let orientation = prop_oneof![Just(Orientation::Vertical), Just(Orientation::Horizontal)];
    let direction = prop_oneof![
        Just(Direction::Left),
        Just(Direction::Right),
        Just(Direction::Up),
        Just(Direction::Down),
    ];
    prop_oneof![
        (any::<usize>(), orientation).prop_map(|(i, o)| Op::Split(i, o)),
        (any::<usize>(), direction, 1..8i32).prop_map(|(i, d, s)| Op::Resize(i, d, s)),
        any::<usize>().prop_map(Op::Remove),
    ]
}

fn apply(tiles: &mut Vec<Pos>, op: &Op) {
    match *op {
        Op::Split(i, orientation) => {
            let i = i % tiles.len();
            let (kept, carved) = split(tiles[i], orientation);
            if kept.is_valid() && carved.is_valid() {
                tiles[i] = kept;
                tiles.insert(i + 1, carved);
            }
        }
        Op::Resize(i, dir, step) => {
            let i = i % tiles.len();
            resize(tiles, i, dir, step);
        }
        Op::Remove(i) => {
            let i = i % tiles.len();
            if dismantle(tiles, i) {
                tiles.remove(i);
            }
        }
    }
}

proptest! {
    #[test]
    fn prop_tiles_always_cover_canvas(
        (w, h) in (20..200i32, 8..80i32),
        ops in prop::collection::vec(op(), 0..60),
    ) {
        let canvas = Canvas::new(w, h);
        let mut tiles = vec![maximized(canvas)];
        for op in &ops {
            apply(&mut tiles, op);
            prop_assert!(!tiles.is_empty());
            prop_assert!(is_tiled(&tiles), "{:?} broke {:?}", op, tiles);
            prop_assert!(covers_canvas(&tiles, canvas), "{:?} left a gap in {:?}", op, tiles);
            prop_assert!(tiles.iter().all(|p| p.w >= MIN_SIZE && p.h >= MIN_SIZE));
        }
    }

    #[test]
    fn prop_split_then_remove_is_identity(
        (w, h) in (20..200i32, 8..80i32),
        vertical in any::<bool>(),
    ) {
        let canvas = Canvas::new(w, h);
        let whole = maximized(canvas);
        let orientation = if vertical { Orientation::Vertical } else { Orientation::Horizontal };
        let (kept, carved) = split(whole, orientation);
        let mut tiles = vec![kept, carved];
        prop_assert!(dismantle(&mut tiles, 1));
        tiles.remove(1);
        prop_assert_eq!(tiles, vec![whole]);
    }
}
