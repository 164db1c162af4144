//! Title bar: menu labels or mode banner on the left, offset and tabs on
//! the right

use crate::panels::menu::Menu;
use crate::panels::Mode;
use crate::ui::surface::Surface;
use crate::ui::theme::Theme;
use unicode_width::UnicodeWidthStr;

/// Tab labels for the title bar
#[derive(Debug, Clone, Default)]
pub struct TabStrip {
    pub labels: Vec<String>,
    pub current: usize,
}

impl TabStrip {
    pub fn text(&self) -> String {
        let mut text = String::from("Tab ");
        for (i, label) in self.labels.iter().enumerate() {
            if i == self.current {
                text.push_str(&format!("[{}] ", label));
            } else {
                text.push_str(&format!(" {}  ", label));
            }
        }
        text
    }
}

pub struct BarInfo<'a> {
    pub mode: Mode,
    pub menu: &'a Menu,
    pub offset: u64,
    pub tabs: &'a TabStrip,
    pub theme: &'a Theme,
    pub color: u8,
}

/// Left part of the bar as `(text, highlighted)` pieces
pub fn left_pieces(info: &BarInfo) -> Vec<(String, bool)> {
    match info.mode {
        Mode::Zoom => vec![("Zoom Mode: Press Enter or q to quit".to_string(), false)],
        Mode::Window => vec![(
            "Window Mode: hjkl move, HJKL resize, q or w to quit".to_string(),
            false,
        )],
        Mode::Default | Mode::Menu => {
            let in_menu = info.mode == Mode::Menu;
            let mut pieces = vec![(if in_menu { "> " } else { "  " }.to_string(), false)];
            for (i, item) in info.menu.root.children.iter().enumerate() {
                let selected = in_menu && i == info.menu.root.selected;
                let label = if selected {
                    format!("[{}]", item.name)
                } else {
                    format!(" {} ", item.name)
                };
                pieces.push((label, selected));
            }
            pieces
        }
    }
}

pub fn render_title_bar(surface: &mut dyn Surface, info: &BarInfo) {
    let (w, _) = surface.bounds();
    let theme = info.theme;
    let style = theme.bar(info.color);
    surface.fill(crate::layout::Pos::new(0, 0, w, 1), style);

    let right = format!("[0x{:08x}] {}", info.offset, info.tabs.text());
    let right_w = right.width() as i32;
    let limit = (w - right_w - 1).max(0);
    let mut x = 0;
    for (text, highlighted) in left_pieces(info) {
        let piece = if highlighted { theme.selected(info.color) } else { style };
        x += surface.write(x, 0, &text, limit - x, piece);
        if x >= limit {
            break;
        }
    }
    if right_w < w {
        surface.write(w - right_w, 0, &right, right_w, theme.fg_style(info.color, theme.address));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::theme::DEFAULT_THEME;
    use ratatui::buffer::Buffer;
    use ratatui::layout::Rect;

    fn row(buf: &Buffer) -> String {
        (0..buf.area.width)
            .filter_map(|x| buf.cell((x, 0)).map(|c| c.symbol().to_string()))
            .collect()
    }

    #[test]
    fn test_tab_strip() {
        let tabs = TabStrip {
            labels: vec!["1".into(), "work".into()],
            current: 1,
        };
        assert_eq!(tabs.text(), "Tab  1  [work] ");
    }

    #[test]
    fn test_menu_labels_line_up_with_popups() {
        let mut menu = Menu::new(&[]);
        menu.root.selected = 2;
        let tabs = TabStrip::default();
        let info = BarInfo {
            mode: Mode::Menu,
            menu: &menu,
            offset: 0,
            tabs: &tabs,
            theme: &DEFAULT_THEME,
            color: 0,
        };
        let pieces = left_pieces(&info);
        let before: usize = pieces.iter().take(3).map(|p| p.0.len()).sum();
        assert_eq!(before as i32, menu.label_x(2));
        assert_eq!(pieces[3], ("[View]".to_string(), true));
    }

    #[test]
    fn test_render_offset_on_the_right() {
        let menu = Menu::new(&[]);
        let tabs = TabStrip {
            labels: vec!["1".into()],
            current: 0,
        };
        let info = BarInfo {
            mode: Mode::Default,
            menu: &menu,
            offset: 0x401000,
            tabs: &tabs,
            theme: &DEFAULT_THEME,
            color: 1,
        };
        let mut buf = Buffer::empty(Rect::new(0, 0, 120, 1));
        render_title_bar(&mut buf, &info);
        let text = row(&buf);
        assert!(text.trim_end().ends_with("[0x00401000] Tab [1]"));
        assert!(text.starts_with("   File  Edit "));
    }
}
