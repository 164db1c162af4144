//! Panel frame, title line and text body

use crate::panel::kind::Printer;
use crate::panel::Panel;
use crate::panels::fun::Flake;
use crate::ui::surface::Surface;
use crate::ui::theme::Theme;
use unicode_width::UnicodeWidthChar;

/// How a panel is to be drawn this frame
pub struct PanelLook<'a> {
    pub theme: &'a Theme,
    pub color: u8,
    pub focused: bool,
    /// Row cursor to mark, as an index into the text lines
    pub row_cursor: Option<i32>,
}

/// Drop terminal escape sequences and expand tabs
pub fn sanitize(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut chars = line.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\x1b' => {
                if chars.peek() == Some(&'[') {
                    chars.next();
                    for c in chars.by_ref() {
                        if c.is_ascii_alphabetic() {
                            break;
                        }
                    }
                }
            }
            '\t' => out.push_str("    "),
            c if c.is_control() => {}
            c => out.push(c),
        }
    }
    out
}

/// `line` with its first `cols` display columns removed
pub fn skip_columns(line: &str, cols: i32) -> &str {
    let mut used = 0;
    for (i, c) in line.char_indices() {
        if used >= cols {
            return &line[i..];
        }
        used += c.width().unwrap_or(0) as i32;
    }
    ""
}

/// Title line text: focus marker, title and the command when it differs
pub fn title_text(panel: &Panel, focused: bool) -> String {
    let model = &panel.model;
    let cmd = model.filtered_cmd();
    let mut title = if focused {
        format!("[X] {}", model.title)
    } else {
        format!("   {}   ", model.title)
    };
    if !cmd.is_empty() && cmd != model.title {
        title.push_str(&format!(" ({})", cmd));
    }
    title
}

fn cache_marker(panel: &Panel) -> &'static str {
    if panel.model.read_only.is_some() || panel.model.kind.printer() == Printer::Fixed {
        "[Cache] N/A"
    } else if panel.model.cache {
        "[Cache] On"
    } else {
        "[Cache] Off"
    }
}

pub fn render_panel(surface: &mut dyn Surface, panel: &Panel, text: &str, look: &PanelLook) {
    let pos = panel.view.pos;
    if pos.w < 2 || pos.h < 2 {
        return;
    }
    let theme = look.theme;
    surface.fill(pos, theme.text(look.color));
    surface.draw_box(pos, theme.border(look.color, look.focused));

    let inner = pos.w - 2;
    if pos.h > 2 && inner > 0 {
        let marker = cache_marker(panel);
        let marker_w = marker.len() as i32;
        let title = title_text(panel, look.focused);
        let title_w = if inner > marker_w + 1 { inner - marker_w - 1 } else { inner };
        surface.write(pos.x + 1, pos.y + 1, &title, title_w, theme.title_style(look.color, look.focused));
        if inner > marker_w + 1 {
            let style = theme.fg_style(look.color, theme.comment);
            surface.write(pos.right() - marker_w, pos.y + 1, marker, marker_w, style);
        }
    }

    let rows = pos.h - 3;
    let cols = pos.w - 3;
    if rows <= 0 || cols <= 0 {
        return;
    }
    let (sx, sy) = (panel.view.sx.max(0), panel.view.sy.max(0));
    let indent = if look.row_cursor.is_some() { 2 } else { 0 };
    for (row, line) in text.lines().skip(sy as usize).take(rows as usize).enumerate() {
        let y = pos.y + 2 + row as i32;
        let clean = sanitize(line);
        let visible = skip_columns(&clean, sx);
        surface.write(pos.x + 2 + indent, y, visible, cols - indent, theme.text(look.color));
        if look.row_cursor == Some(sy + row as i32) {
            surface.write(pos.x + 2, y, "*", 1, theme.selected(look.color));
        }
    }
}

pub fn render_flakes(surface: &mut dyn Surface, flakes: &[Flake], glyph: &str, theme: &Theme, color: u8) {
    let style = theme.fg_style(color, theme.fg);
    for flake in flakes {
        surface.put(flake.x, flake.y, glyph, style);
    }
}
