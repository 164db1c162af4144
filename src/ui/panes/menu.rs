//! Menu popups

use crate::layout::Pos;
use crate::panels::menu::MenuNode;
use crate::ui::surface::Surface;
use crate::ui::theme::Theme;

/// Draw the popup listing `node`'s children
pub fn render_popup(surface: &mut dyn Surface, pos: Pos, node: &MenuNode, theme: &Theme, color: u8) {
    surface.fill(pos, theme.text(color));
    surface.draw_box(pos, theme.border(color, true));
    for (i, child) in node.children.iter().enumerate() {
        let selected = i == node.selected;
        let (line, style) = if selected {
            (format!("> {}", child.name), theme.selected(color))
        } else {
            (format!("  {}", child.name), theme.text(color))
        };
        surface.write(pos.x + 1, pos.y + 1 + i as i32, &line, pos.w - 2, style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panels::menu::Menu;
    use crate::ui::theme::DEFAULT_THEME;
    use ratatui::buffer::Buffer;
    use ratatui::layout::Rect;

    #[test]
    fn test_selected_line_is_marked() {
        let mut menu = Menu::new(&[]);
        menu.handle('j');
        menu.handle('j');
        let (_, pos, node) = menu.popups().next().expect("file popup");
        let mut buf = Buffer::empty(Rect::new(0, 0, 40, 20));
        render_popup(&mut buf, pos, node, &DEFAULT_THEME, 0);
        let line: String = (pos.x..pos.x + pos.w)
            .filter_map(|x| buf.cell((x as u16, (pos.y + 2) as u16)).map(|c| c.symbol().to_string()))
            .collect();
        assert!(line.starts_with("│> Open"));
    }
}
