//! Arrow-key handling per content kind
//!
//! Each handler touches only the panel it was called for, the shared cursor
//! and the shared offset. The return value says whether the panel address
//! moved, so the caller can decide how much to redraw.

use super::kind::Scroller;
use super::Panel;
use crate::layout::Direction;
use crate::session::Session;

/// Apply one arrow key to `panel`. Returns `true` when its address moved.
pub fn scroll(panel: &mut Panel, session: &mut Session, dir: Direction, zoomed: bool) -> bool {
    let Some(scroller) = panel.scroller() else {
        return false;
    };
    panel.view.refresh = true;
    match scroller {
        Scroller::Default => {
            pan(panel, dir, 1);
            false
        }
        Scroller::Graph => {
            pan(panel, dir, session.config.graph_scroll.max(1) * 2);
            false
        }
        Scroller::Registers => registers(panel, session, dir),
        Scroller::Stack => stack(panel, session, dir),
        Scroller::Disassembly => disassembly(panel, session, dir, zoomed),
        Scroller::Hexdump => hexdump(panel, session, dir),
        Scroller::Listing => listing(panel, session, dir),
    }
}

fn pan(panel: &mut Panel, dir: Direction, speed: i32) {
    let view = &mut panel.view;
    match dir {
        Direction::Left => view.sx = (view.sx - speed).max(0),
        Direction::Right => view.sx += speed,
        Direction::Up => view.sy = (view.sy - speed).max(0),
        Direction::Down => view.sy += speed,
    }
}

fn shift(addr: u64, delta: i64) -> u64 {
    addr.saturating_add_signed(delta)
}

/// Byte cursor step shared by register and stack panels
fn byte_cursor(panel: &mut Panel, session: &mut Session, dir: Direction) {
    let cursor = &mut session.cursor;
    match dir {
        Direction::Left => {
            if cursor.cur > 0 {
                cursor.cur -= 1;
                panel.model.addr = shift(panel.model.addr, -1);
            }
        }
        Direction::Right => {
            if panel.model.kind == super::ContentKind::Stack && cursor.cur >= 15 {
                return;
            }
            cursor.cur += 1;
            panel.model.addr = shift(panel.model.addr, 1);
        }
        Direction::Up | Direction::Down => {}
    }
}

fn registers(panel: &mut Panel, session: &mut Session, dir: Direction) -> bool {
    let cols = if session.config.register_cols > 0 {
        session.config.register_cols
    } else {
        3
    };
    match dir {
        Direction::Left | Direction::Right => {
            if session.cursor.enabled {
                byte_cursor(panel, session, dir);
            } else {
                pan(panel, dir, 1);
            }
        }
        Direction::Up => {
            if session.cursor.enabled && session.cursor.cur - cols >= 0 {
                session.cursor.cur -= cols;
            }
        }
        Direction::Down => {
            if session.cursor.enabled {
                session.cursor.cur += cols;
            }
        }
    }
    false
}

fn hex_cols(session: &Session) -> i64 {
    if session.hex_cols < 1 {
        16
    } else {
        session.hex_cols
    }
}

fn stack(panel: &mut Panel, session: &mut Session, dir: Direction) -> bool {
    let cols = hex_cols(session);
    match dir {
        Direction::Left | Direction::Right => {
            if session.cursor.enabled {
                byte_cursor(panel, session, dir);
            } else {
                pan(panel, dir, 1);
            }
        }
        Direction::Up => {
            session.stack_delta += cols;
            panel.model.addr = shift(panel.model.addr, -cols);
        }
        Direction::Down => {
            session.stack_delta -= cols;
            panel.model.addr = shift(panel.model.addr, cols);
        }
    }
    false
}

/// Pull the cursor back into view by moving the offset up one instruction
/// at a time.
fn fix_cursor_up(session: &mut Session) {
    while session.cursor.cur < 0 {
        let offset = session.executor.offset();
        let at = shift(offset, session.cursor.cur);
        let size = session.executor.prev_op_size(at).unwrap_or(1).max(1);
        session.executor.seek(offset.saturating_sub(size));
        session.cursor.cur += size as i64;
        if offset == 0 {
            session.cursor.cur = 0;
        }
    }
}

fn disassembly(panel: &mut Panel, session: &mut Session, dir: Direction, zoomed: bool) -> bool {
    let cursor = session.cursor.enabled;
    match dir {
        Direction::Left | Direction::Right if cursor => {
            session.cursor.cur += if dir == Direction::Left { -1 } else { 1 };
            fix_cursor_up(session);
            panel.model.addr = session.executor.offset();
            true
        }
        Direction::Left | Direction::Right if zoomed => {
            let delta = if dir == Direction::Left { -1 } else { 1 };
            panel.model.addr = shift(panel.model.addr, delta);
            false
        }
        Direction::Left | Direction::Right => {
            pan(panel, dir, 1);
            false
        }
        Direction::Up => {
            session.executor.seek(panel.model.addr);
            if cursor {
                let at = shift(panel.model.addr, session.cursor.cur);
                let delta = session.executor.prev_op_size(at).unwrap_or(4);
                session.cursor.cur -= delta as i64;
                fix_cursor_up(session);
            } else {
                let size = session.executor.prev_op_size(panel.model.addr).unwrap_or(4);
                session.executor.seek(panel.model.addr.saturating_sub(size));
            }
            panel.model.addr = session.executor.offset();
            true
        }
        Direction::Down => {
            session.executor.seek(panel.model.addr);
            if cursor {
                let at = shift(panel.model.addr, session.cursor.cur);
                let size = session.executor.op_size(at).unwrap_or(4);
                session.cursor.cur += size as i64;
            } else {
                let size = session.executor.op_size(panel.model.addr).unwrap_or(4);
                session.executor.seek(panel.model.addr.saturating_add(size));
            }
            panel.model.addr = session.executor.offset();
            true
        }
    }
}

fn hexdump(panel: &mut Panel, session: &mut Session, dir: Direction) -> bool {
    let cols = hex_cols(session);
    let rows = i64::from(panel.view.pos.h) - 5;
    let cursor = session.cursor.enabled;
    let cur = session.cursor.cur;
    match dir {
        Direction::Left => {
            if cursor && cur == 0 {
                panel.model.addr = shift(panel.model.addr, -cols);
                session.cursor.cur += cols - 1;
            } else if cursor {
                session.cursor.cur -= 1;
            } else {
                panel.model.addr = shift(panel.model.addr, -1);
            }
        }
        Direction::Right => {
            if cursor && cur / cols + 1 > rows && cur % cols == cols - 1 {
                panel.model.addr = shift(panel.model.addr, cols);
                session.cursor.cur -= cols - 1;
            } else if cursor {
                session.cursor.cur += 1;
            } else {
                panel.model.addr = shift(panel.model.addr, 1);
            }
        }
        Direction::Up => {
            if panel.model.cache {
                pan(panel, dir, 1);
            } else if cursor {
                if cur / cols == 0 {
                    panel.model.addr = shift(panel.model.addr, -cols);
                } else {
                    session.cursor.cur -= cols;
                }
            } else if panel.model.addr <= cols as u64 {
                panel.model.addr = 0;
                return true;
            } else {
                panel.model.addr = shift(panel.model.addr, -cols);
            }
        }
        Direction::Down => {
            if panel.model.cache {
                pan(panel, dir, 1);
            } else if cursor {
                if cur / cols + 1 > rows {
                    panel.model.addr = shift(panel.model.addr, cols);
                } else {
                    session.cursor.cur += cols;
                }
            } else {
                panel.model.addr = shift(panel.model.addr, cols);
            }
        }
    }
    false
}

fn listing(panel: &mut Panel, session: &mut Session, dir: Direction) -> bool {
    let threshold = panel.view.pos.h / 3;
    let cursor = session.cursor.enabled;
    if matches!(dir, Direction::Left | Direction::Right) {
        if !cursor {
            pan(panel, dir, session.config.graph_scroll.max(1));
        }
        return false;
    }
    if dir == Direction::Down {
        session.executor.seek(panel.model.addr);
    }
    let view = &mut panel.view;
    match (dir, cursor) {
        (Direction::Up, true) => {
            if view.curpos > 0 {
                view.curpos -= 1;
            }
            if view.sy > 0 && view.curpos < view.sy {
                view.sy -= 1;
            }
        }
        (Direction::Up, false) => {
            if view.sy > 0 {
                view.curpos -= 1;
                view.sy -= 1;
            }
        }
        (_, true) => {
            view.curpos += 1;
            if view.curpos - view.sy > threshold {
                view.sy += 1;
            }
        }
        (_, false) => {
            view.curpos += 1;
            view.sy += 1;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::executor::Executor;
    use crate::layout::Pos;

    /// Fixed-width instructions of two bytes
    struct TwoByteOps {
        offset: u64,
    }

    impl Executor for TwoByteOps {
        fn execute(&mut self, _cmd: &str) -> String {
            String::new()
        }

        fn offset(&self) -> u64 {
            self.offset
        }

        fn seek(&mut self, addr: u64) {
            self.offset = addr;
        }

        fn prev_op_size(&mut self, _addr: u64) -> Option<u64> {
            Some(2)
        }

        fn op_size(&mut self, _addr: u64) -> Option<u64> {
            Some(2)
        }
    }

    fn session() -> Session {
        Session::new(Box::new(TwoByteOps { offset: 0x100 }), Config::default())
    }

    fn panel(cmd: &str, h: i32) -> Panel {
        let mut panel = Panel::new(cmd, cmd, false);
        panel.view.pos = Pos::new(0, 1, 40, h);
        panel
    }

    #[test]
    fn test_default_scroll_stops_at_zero() {
        let mut session = session();
        let mut p = panel("iS", 10);
        scroll(&mut p, &mut session, Direction::Up, false);
        assert_eq!(p.view.sy, 0);
        scroll(&mut p, &mut session, Direction::Down, false);
        scroll(&mut p, &mut session, Direction::Right, false);
        assert_eq!((p.view.sx, p.view.sy), (1, 1));
    }

    #[test]
    fn test_graph_pans_faster() {
        let mut session = session();
        let mut p = panel("agf", 10);
        scroll(&mut p, &mut session, Direction::Right, false);
        assert_eq!(p.view.sx, session.config.graph_scroll * 2);
    }

    #[test]
    fn test_disassembly_steps_by_instruction() {
        let mut session = session();
        let mut p = panel("pd", 10);
        p.model.addr = 0x100;
        assert!(scroll(&mut p, &mut session, Direction::Down, false));
        assert_eq!(p.model.addr, 0x102);
        assert!(scroll(&mut p, &mut session, Direction::Up, false));
        assert!(scroll(&mut p, &mut session, Direction::Up, false));
        assert_eq!(p.model.addr, 0xfe);
    }

    #[test]
    fn test_disassembly_cursor_pulls_offset_up() {
        let mut session = session();
        session.cursor.enabled = true;
        let mut p = panel("pd", 10);
        p.model.addr = 0x100;
        scroll(&mut p, &mut session, Direction::Left, false);
        assert_eq!(session.cursor.cur, 1);
        assert_eq!(p.model.addr, 0xfe);
    }

    #[test]
    fn test_stack_moves_delta() {
        let mut session = session();
        let mut p = panel("px 256@r:SP", 10);
        p.model.addr = 0x1000;
        scroll(&mut p, &mut session, Direction::Up, false);
        assert_eq!(session.stack_delta, 16);
        assert_eq!(p.model.addr, 0x1000 - 16);
    }

    #[test]
    fn test_hexdump_up_clamps_at_zero() {
        let mut session = session();
        let mut p = panel("xc", 10);
        p.model.addr = 8;
        assert!(scroll(&mut p, &mut session, Direction::Up, false));
        assert_eq!(p.model.addr, 0);
    }

    #[test]
    fn test_hexdump_cursor_wraps_rows() {
        let mut session = session();
        session.cursor.enabled = true;
        let mut p = panel("xc", 10);
        p.model.addr = 0x40;
        scroll(&mut p, &mut session, Direction::Left, false);
        assert_eq!(p.model.addr, 0x30);
        assert_eq!(session.cursor.cur, 15);
    }

    #[test]
    fn test_listing_cursor_scrolls_past_threshold() {
        let mut session = session();
        session.cursor.enabled = true;
        let mut p = panel("afl", 9);
        for _ in 0..4 {
            scroll(&mut p, &mut session, Direction::Down, false);
        }
        assert_eq!(p.view.curpos, 4);
        assert_eq!(p.view.sy, 1);
        for _ in 0..4 {
            scroll(&mut p, &mut session, Direction::Up, false);
        }
        assert_eq!((p.view.curpos, p.view.sy), (0, 0));
    }
}
