//! Color palettes
//!
//! Panels are drawn with one of a few fixed palettes. The session's color
//! level decides how much of it is used: level 0 draws everything in the
//! terminal's default colors, level 2 adds bold emphasis to borders and
//! titles.

use ratatui::style::{Color, Modifier, Style};

pub struct Theme {
    pub name: &'static str,
    pub bg: Color,
    pub fg: Color,
    pub primary: Color,   // title bar, menu
    pub secondary: Color, // selections, cursor
    pub comment: Color,   // cache marker, hints
    pub success: Color,
    pub error: Color,
    pub border_focused: Color,
    pub border_normal: Color,
    pub current_line_bg: Color,
    pub title: Color,
    pub address: Color,
}

pub const DEFAULT_THEME: Theme = Theme {
    name: "default",
    bg: Color::Rgb(30, 30, 46),
    fg: Color::Rgb(205, 214, 244),
    primary: Color::Rgb(137, 180, 250),
    secondary: Color::Rgb(250, 179, 135),
    comment: Color::Rgb(108, 112, 134),
    success: Color::Rgb(166, 227, 161),
    error: Color::Rgb(243, 139, 168),
    border_focused: Color::Rgb(249, 226, 175),
    border_normal: Color::Rgb(108, 112, 134),
    current_line_bg: Color::Rgb(50, 50, 70),
    title: Color::Rgb(148, 226, 213),
    address: Color::Rgb(245, 194, 231),
};

pub const GRUVBOX_THEME: Theme = Theme {
    name: "gruvbox",
    bg: Color::Rgb(40, 40, 40),
    fg: Color::Rgb(235, 219, 178),
    primary: Color::Rgb(131, 165, 152),
    secondary: Color::Rgb(254, 128, 25),
    comment: Color::Rgb(146, 131, 116),
    success: Color::Rgb(184, 187, 38),
    error: Color::Rgb(251, 73, 52),
    border_focused: Color::Rgb(250, 189, 47),
    border_normal: Color::Rgb(102, 92, 84),
    current_line_bg: Color::Rgb(60, 56, 54),
    title: Color::Rgb(142, 192, 124),
    address: Color::Rgb(211, 134, 155),
};

pub const NORD_THEME: Theme = Theme {
    name: "nord",
    bg: Color::Rgb(46, 52, 64),
    fg: Color::Rgb(216, 222, 233),
    primary: Color::Rgb(129, 161, 193),
    secondary: Color::Rgb(208, 135, 112),
    comment: Color::Rgb(97, 110, 136),
    success: Color::Rgb(163, 190, 140),
    error: Color::Rgb(191, 97, 106),
    border_focused: Color::Rgb(235, 203, 139),
    border_normal: Color::Rgb(76, 86, 106),
    current_line_bg: Color::Rgb(59, 66, 82),
    title: Color::Rgb(136, 192, 208),
    address: Color::Rgb(180, 142, 173),
};

pub const THEMES: &[&Theme] = &[&DEFAULT_THEME, &GRUVBOX_THEME, &NORD_THEME];

impl Theme {
    /// Palette called `name`, falling back to the default one
    pub fn by_name(name: &str) -> &'static Theme {
        THEMES
            .iter()
            .find(|t| t.name == name)
            .copied()
            .unwrap_or(&DEFAULT_THEME)
    }

    pub fn names() -> Vec<String> {
        THEMES.iter().map(|t| t.name.to_string()).collect()
    }

    /// Foreground style honoring the color level
    pub fn fg_style(&self, color: u8, fg: Color) -> Style {
        if color == 0 {
            Style::default()
        } else {
            Style::default().fg(fg).bg(self.bg)
        }
    }

    pub fn text(&self, color: u8) -> Style {
        self.fg_style(color, self.fg)
    }

    pub fn border(&self, color: u8, focused: bool) -> Style {
        let fg = if focused { self.border_focused } else { self.border_normal };
        let style = self.fg_style(color, fg);
        if color >= 2 && focused {
            style.add_modifier(Modifier::BOLD)
        } else {
            style
        }
    }

    pub fn title_style(&self, color: u8, focused: bool) -> Style {
        let style = self.fg_style(color, self.title);
        if color >= 2 || (color == 0 && focused) {
            style.add_modifier(Modifier::BOLD)
        } else {
            style
        }
    }

    /// Highlighted row: reversed in monochrome
    pub fn selected(&self, color: u8) -> Style {
        if color == 0 {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default().fg(self.secondary).bg(self.current_line_bg)
        }
    }

    pub fn bar(&self, color: u8) -> Style {
        if color == 0 {
            Style::default()
        } else {
            Style::default().fg(self.primary).bg(self.current_line_bg)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_theme_falls_back() {
        assert_eq!(Theme::by_name("nord").name, "nord");
        assert_eq!(Theme::by_name("nope").name, "default");
    }

    #[test]
    fn test_monochrome_has_no_colors() {
        let style = DEFAULT_THEME.border(0, true);
        assert_eq!(style.fg, None);
        assert_eq!(DEFAULT_THEME.border(1, true).fg, Some(DEFAULT_THEME.border_focused));
    }
}
