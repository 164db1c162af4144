//! The almighty list popup

use crate::panels::modal::{Modal, Registry};
use crate::ui::surface::Surface;
use crate::ui::theme::Theme;

pub fn render_modal(surface: &mut dyn Surface, modal: &Modal, registry: &Registry, theme: &Theme, color: u8) {
    let pos = modal.pos;
    surface.fill(pos, theme.text(color));
    surface.draw_box(pos, theme.border(color, true));
    for (row, (name, selected)) in modal.visible(registry).into_iter().enumerate() {
        let (line, style) = if selected {
            (format!("> {}", name), theme.selected(color))
        } else {
            (format!("  {}", name), theme.text(color))
        };
        surface.write(pos.x + 1, pos.y + 1 + row as i32, &line, pos.w - 2, style);
    }
}
