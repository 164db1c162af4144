//! Drawing surface used by the pane renderers
//!
//! Renderers only know how to put a symbol in a cell; filling, writing
//! clipped text and drawing boxes are built on top of that. The tab canvas
//! is a plain ratatui [`Buffer`].

use crate::layout::Pos;
use ratatui::buffer::Buffer;
use ratatui::style::Style;
use ratatui::symbols::border;
use unicode_width::UnicodeWidthChar;

pub trait Surface {
    /// Width and height in cells
    fn bounds(&self) -> (i32, i32);

    /// Set one cell. Out-of-bounds writes are ignored.
    fn put(&mut self, x: i32, y: i32, symbol: &str, style: Style);

    /// Blank a rectangle
    fn fill(&mut self, pos: Pos, style: Style) {
        for y in pos.y..pos.y + pos.h {
            for x in pos.x..pos.x + pos.w {
                self.put(x, y, " ", style);
            }
        }
    }

    /// Write `text` at `(x, y)` using at most `max_w` columns. Returns the
    /// number of columns used.
    fn write(&mut self, x: i32, y: i32, text: &str, max_w: i32, style: Style) -> i32 {
        let (width, height) = self.bounds();
        if y < 0 || y >= height || max_w <= 0 {
            return 0;
        }
        let mut col = 0;
        let mut buf = [0u8; 4];
        for c in text.chars() {
            let w = c.width().unwrap_or(0) as i32;
            if w == 0 {
                continue;
            }
            if col + w > max_w || x + col >= width {
                break;
            }
            if x + col >= 0 {
                self.put(x + col, y, c.encode_utf8(&mut buf), style);
                if w == 2 {
                    self.put(x + col + 1, y, " ", style);
                }
            }
            col += w;
        }
        col
    }

    /// Single-line box along the rectangle's outer cells
    fn draw_box(&mut self, pos: Pos, style: Style) {
        if pos.w < 2 || pos.h < 2 {
            return;
        }
        let set = border::PLAIN;
        let (right, bottom) = (pos.right(), pos.bottom());
        for x in pos.x + 1..right {
            self.put(x, pos.y, set.horizontal_top, style);
            self.put(x, bottom, set.horizontal_bottom, style);
        }
        for y in pos.y + 1..bottom {
            self.put(pos.x, y, set.vertical_left, style);
            self.put(right, y, set.vertical_right, style);
        }
        self.put(pos.x, pos.y, set.top_left, style);
        self.put(right, pos.y, set.top_right, style);
        self.put(pos.x, bottom, set.bottom_left, style);
        self.put(right, bottom, set.bottom_right, style);
    }
}

impl Surface for Buffer {
    fn bounds(&self) -> (i32, i32) {
        (i32::from(self.area.width), i32::from(self.area.height))
    }

    fn put(&mut self, x: i32, y: i32, symbol: &str, style: Style) {
        let (Ok(x), Ok(y)) = (u16::try_from(x), u16::try_from(y)) else {
            return;
        };
        let (x, y) = (x.saturating_add(self.area.x), y.saturating_add(self.area.y));
        if let Some(cell) = self.cell_mut((x, y)) {
            cell.set_symbol(symbol).set_style(style);
        }
    }
}

/// Copy `src` into `dst` over the area both cover
pub fn blit(src: &Buffer, dst: &mut Buffer) {
    let area = src.area.intersection(dst.area);
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            if let (Some(from), Some(to)) = (src.cell((x, y)), dst.cell_mut((x, y))) {
                *to = from.clone();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::layout::Rect;

    fn row(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .filter_map(|x| buf.cell((x, y)).map(|c| c.symbol().to_string()))
            .collect()
    }

    #[test]
    fn test_write_is_clipped() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 8, 2));
        let used = buf.write(5, 0, "abcdef", 10, Style::default());
        assert_eq!(used, 3);
        assert_eq!(row(&buf, 0), "     abc");
        assert_eq!(buf.write(-2, 1, "abcdef", 4, Style::default()), 4);
        assert_eq!(row(&buf, 1), "cd      ");
    }

    #[test]
    fn test_out_of_bounds_is_ignored() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 4, 2));
        buf.put(10, 10, "x", Style::default());
        buf.fill(Pos::new(2, 1, 10, 10), Style::default());
        assert_eq!(buf.write(0, 5, "abc", 3, Style::default()), 0);
    }

    #[test]
    fn test_box() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 4, 3));
        buf.draw_box(Pos::new(0, 0, 4, 3), Style::default());
        assert_eq!(row(&buf, 0), "┌──┐");
        assert_eq!(row(&buf, 1), "│  │");
        assert_eq!(row(&buf, 2), "└──┘");
    }

    #[test]
    fn test_blit_copies_overlap() {
        let mut src = Buffer::empty(Rect::new(0, 0, 3, 1));
        src.write(0, 0, "xyz", 3, Style::default());
        let mut dst = Buffer::empty(Rect::new(0, 0, 2, 1));
        blit(&src, &mut dst);
        assert_eq!(row(&dst, 0), "xy");
    }
}
