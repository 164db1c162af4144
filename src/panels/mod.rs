//! One tab: its panels, interaction mode, menu, almighty list and canvas
//!
//! A [`PanelSet`] owns everything a tab shows. Operations that change the
//! layout only touch geometry and dirty flags; [`PanelSet::refresh`] is the
//! single place that produces text and paints into the persistent canvas.
//!
//! - [`menu`]: the menu bar tree and its popups
//! - [`modal`]: the almighty panel picker
//! - [`modes`]: key handling per mode
//! - [`persist`]: saved layouts
//! - [`help`]: help panel texts
//! - [`fun`]: the snow animation

pub mod fun;
pub mod help;
pub mod menu;
pub mod modal;
pub mod modes;
pub mod persist;

use crate::config::LayoutKind;
use crate::error::{PanelsError, Result};
use crate::layout::{
    check_edges, default_layout, dismantle, fit_to_canvas, invalid_tiles, maximized, side_column,
    split, split::column_width, Canvas, Orientation, Tiling,
};
use crate::panel::kind::{Rotation, DISASM_MODES};
use crate::panel::{content, CommandTable, ContentKind, Panel, PanelArena};
use crate::session::Session;
use crate::ui::panes::bar::{render_title_bar, BarInfo, TabStrip};
use crate::ui::panes::menu::render_popup;
use crate::ui::panes::modal::render_modal;
use crate::ui::panes::panel::{render_flakes, render_panel, PanelLook};
use crate::ui::theme::Theme;
use fun::Fun;
use menu::Menu;
use modal::{Modal, Registry};
use rand::Rng;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use std::path::Path;
use tracing::{debug, info, warn};

/// Interaction mode of a tab
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Default,
    /// Move focus and resize panels
    Window,
    /// The menu bar has the keyboard
    Menu,
    /// The current panel fills the canvas
    Zoom,
}

pub struct PanelSet {
    pub arena: PanelArena,
    pub curnode: usize,
    pub mode: Mode,
    /// Mode to return to when leaving Zoom or Window
    pub prev_mode: Mode,
    pub canvas: Buffer,
    pub commands: CommandTable,
    pub almighty: Registry,
    pub menu: Menu,
    pub modal: Option<Modal>,
    pub fun: Fun,
    pub auto_update: bool,
    pub name: Option<String>,
    initialized: bool,
    fun_repaint: bool,
    panel_limit: usize,
    side_w: i32,
    column_width: Option<i32>,
}

impl PanelSet {
    /// An empty tab; panels are created on first use
    pub fn new(session: &mut Session, w: u16, h: u16) -> Self {
        let commands = CommandTable::with_overrides(&session.config.commands);
        let almighty = modal::registry(&commands, session.config.debug);
        let mut themes = session.executor.themes();
        if themes.is_empty() {
            themes = Theme::names();
        }
        PanelSet {
            arena: PanelArena::new(),
            curnode: 0,
            mode: Mode::Default,
            prev_mode: Mode::Default,
            canvas: Buffer::empty(Rect::new(0, 0, w, h)),
            commands,
            almighty,
            menu: Menu::new(&themes),
            modal: None,
            fun: Fun::default(),
            auto_update: session.config.auto_update,
            name: None,
            initialized: false,
            fun_repaint: false,
            panel_limit: session.config.panel_limit,
            side_w: session.config.side_panel_width,
            column_width: session.config.column_width,
        }
    }

    pub fn canvas_size(&self) -> Canvas {
        Canvas::new(self.canvas.area.width as i32, self.canvas.area.height as i32)
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn ensure_initialized(&mut self, session: &mut Session) {
        if !self.initialized {
            self.init_default(session);
        }
    }

    /// Replace every panel with the configured default set
    pub fn init_default(&mut self, session: &mut Session) {
        let titles = match session.config.layout {
            LayoutKind::Static => ["Disassembly", "Functions", "Symbols"],
            LayoutKind::Dynamic => ["Disassembly", "Stack", "Registers"],
        };
        self.arena.clear();
        for title in titles {
            let cmd = self.commands.get(title).unwrap_or(title).to_string();
            let panel = self.new_panel(session, title, &cmd, false);
            self.arena.push(panel);
        }
        self.apply_default_layout();
        self.curnode = 0;
        self.mode = Mode::Default;
        self.prev_mode = Mode::Default;
        self.initialized = true;
        self.mark_all_dirty(false);
        info!(layout = ?session.config.layout, "default layout");
    }

    fn apply_default_layout(&mut self) {
        let canvas = self.canvas_size();
        let col_w = column_width(canvas, self.column_width);
        for (i, pos) in default_layout(self.arena.len(), canvas, col_w).into_iter().enumerate() {
            self.arena.set_tile(i, pos);
        }
    }

    /// Make `panel` the only panel, filling the canvas
    pub fn adopt(&mut self, mut panel: Panel) {
        panel.view.pos = maximized(self.canvas_size());
        panel.view.refresh = true;
        self.arena.clear();
        self.arena.push(panel);
        self.curnode = 0;
        self.mode = Mode::Default;
        self.prev_mode = Mode::Default;
        self.initialized = true;
        self.mark_all_dirty(false);
    }

    /// A panel anchored at the shared offset, or at the stack for stack dumps
    pub fn new_panel(&self, session: &mut Session, title: &str, cmd: &str, cache: bool) -> Panel {
        let mut panel = Panel::new(title, cmd, cache);
        if panel.model.kind == ContentKind::Stack {
            let base = session.executor.stack_base();
            panel.model.base_addr = base;
            panel.model.addr = base.saturating_add_signed(-session.stack_delta);
        } else {
            panel.model.addr = session.offset();
        }
        panel
    }

    pub fn current(&self) -> Option<&Panel> {
        self.arena.get(self.curnode)
    }

    pub fn current_mut(&mut self) -> Option<&mut Panel> {
        self.arena.get_mut(self.curnode)
    }

    /// Focus another panel; both old and new one repaint their frame
    pub fn set_curnode(&mut self, index: usize) {
        if self.arena.is_empty() {
            self.curnode = 0;
            return;
        }
        let index = index.min(self.arena.len() - 1);
        if index == self.curnode {
            return;
        }
        for i in [self.curnode, index] {
            if let Some(panel) = self.arena.get_mut(i) {
                panel.view.refresh = true;
            }
        }
        self.curnode = index;
    }

    pub fn next_panel(&mut self, forward: bool) {
        let n = self.arena.len();
        if n == 0 {
            return;
        }
        let next = if forward {
            (self.curnode + 1) % n
        } else {
            (self.curnode + n - 1) % n
        };
        self.set_curnode(next);
    }

    /// Everything repaints; with `clear_cache` every panel recomputes too
    pub fn mark_all_dirty(&mut self, clear_cache: bool) {
        for panel in self.arena.panels_mut() {
            panel.view.refresh = true;
            if clear_cache {
                panel.model.cached = None;
            }
        }
        self.menu.mark_all_dirty();
        if let Some(modal) = &mut self.modal {
            modal.dirty = true;
        }
    }

    pub fn mark_dirty_by_kind(&mut self, kind: ContentKind, clear_cache: bool) {
        for panel in self.arena.panels_mut().filter(|p| p.model.kind == kind) {
            panel.view.refresh = true;
            if clear_cache {
                panel.model.cached = None;
            }
        }
    }

    /// Point a panel at `addr`. With auto-update everything follows.
    pub fn set_addr(&mut self, index: usize, addr: u64) {
        if let Some(panel) = self.arena.get_mut(index) {
            panel.model.addr = addr;
            panel.view.refresh = true;
        }
        if self.auto_update {
            self.mark_all_dirty(false);
        }
    }

    /// Re-anchor stack panels when the stack base moved
    pub fn check_stack_base(&mut self, session: &mut Session) {
        if !self.arena.iter().any(|p| p.model.kind == ContentKind::Stack) {
            return;
        }
        let base = session.executor.stack_base();
        let cur = if session.cursor.enabled { session.cursor.cur } else { 0 };
        let delta = session.stack_delta;
        for panel in self.arena.panels_mut() {
            if panel.model.kind == ContentKind::Stack && panel.model.base_addr != base {
                panel.model.base_addr = base;
                panel.model.addr = base.saturating_add_signed(cur - delta);
                panel.view.refresh = true;
            }
        }
    }

    fn check_limit(&self) -> Result<()> {
        if self.arena.len() >= self.panel_limit {
            return Err(PanelsError::PanelLimit { limit: self.panel_limit });
        }
        Ok(())
    }

    /// Split the current panel; the new one goes right after it and takes focus
    pub fn split_current(
        &mut self,
        session: &mut Session,
        orientation: Orientation,
        title: &str,
        cmd: &str,
        cache: bool,
    ) -> Result<()> {
        self.check_limit()?;
        self.leave_zoom();
        let cur = self.curnode;
        let Some(pos) = self.current().map(|p| p.view.pos) else {
            return Err(PanelsError::NoRoom);
        };
        let (kept, carved) = split(pos, orientation);
        if !kept.is_valid() || !carved.is_valid() {
            return Err(PanelsError::NoRoom);
        }
        self.arena.set_tile(cur, kept);
        let mut panel = self.new_panel(session, title, cmd, cache);
        panel.view.pos = carved;
        self.arena.insert(cur + 1, panel);
        self.set_curnode(cur + 1);
        debug!(?orientation, title, cmd, "split");
        Ok(())
    }

    /// Split the current panel into two showing the same thing
    pub fn duplicate_current(&mut self, session: &mut Session, orientation: Orientation) -> Result<()> {
        let Some(panel) = self.current() else {
            return Ok(());
        };
        let (title, cmd, cache) = (panel.model.title.clone(), panel.model.cmd.clone(), panel.model.cache);
        self.split_current(session, orientation, &title, &cmd, cache)
    }

    /// Insert `panel` as a full-height column on the left edge, focused
    pub fn insert_side(&mut self, mut panel: Panel) -> Result<()> {
        self.check_limit()?;
        self.leave_zoom();
        let canvas = self.canvas_size();
        let pos = side_column(&mut self.arena, canvas, self.side_w).ok_or(PanelsError::NoRoom)?;
        panel.view.pos = pos;
        panel.view.refresh = true;
        debug!(title = %panel.model.title, "side panel");
        self.arena.insert(0, panel);
        self.curnode = 0;
        self.mark_all_dirty(false);
        Ok(())
    }

    pub fn insert_side_panel(&mut self, session: &mut Session, title: &str, cmd: &str, cache: bool) -> Result<()> {
        let panel = self.new_panel(session, title, cmd, cache);
        self.insert_side(panel)
    }

    /// Show something else in the current panel's slot
    pub fn replace_current(&mut self, session: &mut Session, title: &str, cmd: &str, cache: bool) {
        let fresh = self.new_panel(session, title, cmd, cache);
        if let Some(panel) = self.current_mut() {
            panel.model = fresh.model;
            panel.view.sx = 0;
            panel.view.sy = 0;
            panel.view.curpos = 0;
            panel.view.refresh = true;
        }
    }

    /// Replace the current panel with a command-table entry
    pub fn replace_with_title(&mut self, session: &mut Session, title: &str) {
        let cmd = self.commands.get(title).unwrap_or(title).to_string();
        self.replace_current(session, title, &cmd, false);
    }

    /// Remove a panel, giving its area to its neighbours. The last panel and
    /// panels nobody can absorb are kept.
    pub fn delete_panel(&mut self, index: usize) -> bool {
        if self.arena.len() <= 1 || index >= self.arena.len() {
            return false;
        }
        if !dismantle(&mut self.arena, index) {
            debug!(index, "nothing can absorb the panel");
            return false;
        }
        self.arena.remove(index);
        if index < self.curnode || self.curnode >= self.arena.len() {
            self.curnode = self.curnode.saturating_sub(1);
        }
        if let Some(panel) = self.current_mut() {
            panel.view.refresh = true;
        }
        true
    }

    pub fn delete_current(&mut self) -> bool {
        self.delete_panel(self.curnode)
    }

    /// Store the edge flags of the current tiling in each view
    fn update_edges(&mut self) {
        let edges = check_edges(&self.arena);
        for (i, edge) in edges.into_iter().enumerate() {
            if let Some(panel) = self.arena.get_mut(i) {
                panel.view.edges = edge;
            }
        }
    }

    /// Drop panels too small to show, clamp the focus, refresh edge flags
    pub fn layout_refresh(&mut self) {
        loop {
            let invalid = invalid_tiles(&self.arena);
            if invalid.is_empty() {
                break;
            }
            for index in invalid {
                warn!(index, "pruning a panel that became too small");
                dismantle(&mut self.arena, index);
                self.arena.remove(index);
            }
        }
        if self.curnode >= self.arena.len() {
            self.curnode = self.arena.len().saturating_sub(1);
        }
        if self.mode != Mode::Zoom {
            self.update_edges();
        }
    }

    /// Follow a new terminal size
    pub fn on_resize(&mut self, w: u16, h: u16) {
        if self.canvas.area.width == w && self.canvas.area.height == h {
            return;
        }
        let zoomed = self.mode == Mode::Zoom;
        if zoomed {
            self.zoom_out();
        } else {
            self.update_edges();
        }
        self.canvas.resize(Rect::new(0, 0, w, h));
        self.canvas.reset();
        let canvas = self.canvas_size();
        let edges: Vec<_> = self.arena.iter().map(|p| p.view.edges).collect();
        fit_to_canvas(&mut self.arena, &edges, canvas);
        if zoomed {
            self.zoom_in();
        }
        if self.modal.is_some() {
            let mut modal = Modal::new(canvas);
            if let Some(old) = &self.modal {
                modal.idx = old.idx;
            }
            self.modal = Some(modal);
        }
        self.mark_all_dirty(false);
        info!(w, h, "canvas resized");
    }

    fn zoom_in(&mut self) {
        let canvas = self.canvas_size();
        if let Some(panel) = self.current_mut() {
            panel.view.prev_pos = panel.view.pos;
            panel.view.pos = maximized(canvas);
        }
        self.mark_all_dirty(false);
    }

    fn zoom_out(&mut self) {
        if let Some(panel) = self.current_mut() {
            panel.view.pos = panel.view.prev_pos;
        }
        self.mark_all_dirty(false);
    }

    /// Enter Zoom, or leave it for the mode it was entered from
    pub fn toggle_zoom(&mut self) {
        if self.mode == Mode::Zoom {
            self.zoom_out();
            self.mode = match self.prev_mode {
                Mode::Window => Mode::Window,
                _ => Mode::Default,
            };
            self.prev_mode = Mode::Default;
        } else {
            self.prev_mode = self.mode;
            self.mode = Mode::Zoom;
            self.zoom_in();
        }
    }

    /// Layout changes work on the real geometry, never the maximized one
    fn leave_zoom(&mut self) {
        if self.mode == Mode::Zoom {
            self.toggle_zoom();
        }
    }

    /// Move the zoom to the next or previous panel
    pub fn zoom_step(&mut self, forward: bool) {
        if self.mode != Mode::Zoom {
            return;
        }
        self.zoom_out();
        self.next_panel(forward);
        self.zoom_in();
    }

    pub fn enter_window(&mut self) {
        if self.mode == Mode::Zoom {
            self.zoom_out();
            self.prev_mode = Mode::Zoom;
        } else if self.mode != Mode::Window {
            self.prev_mode = self.mode;
        }
        self.mode = Mode::Window;
        self.mark_all_dirty(false);
    }

    pub fn leave_window(&mut self) {
        if self.prev_mode == Mode::Zoom {
            self.mode = Mode::Default;
            self.prev_mode = Mode::Default;
            self.toggle_zoom();
        } else {
            self.mode = Mode::Default;
            self.prev_mode = Mode::Default;
            self.mark_all_dirty(false);
        }
    }

    /// Add the help panel for the current mode, or remove every help panel
    pub fn toggle_help(&mut self) -> Result<()> {
        let zoomed = self.mode == Mode::Zoom;
        let modes = (self.mode, self.prev_mode);
        if zoomed {
            self.zoom_out();
            self.mode = Mode::Default;
        }
        let helps: Vec<usize> = (0..self.arena.len())
            .rev()
            .filter(|&i| self.arena.get(i).is_some_and(|p| p.model.is_help()))
            .collect();
        let result = if helps.is_empty() {
            let (title, text) = help::help_for(modes.0);
            self.insert_side(Panel::help(title, text.to_string()))
        } else {
            for index in helps {
                self.delete_panel(index);
            }
            Ok(())
        };
        if zoomed {
            (self.mode, self.prev_mode) = modes;
            self.zoom_in();
        }
        self.mark_all_dirty(false);
        result
    }

    /// Swap the current panel's content with the first panel's
    pub fn swap_with_first(&mut self) {
        if self.curnode == 0 {
            return;
        }
        self.arena.swap_models(0, self.curnode);
        self.set_curnode(0);
    }

    /// Rotate contents through the panel slots
    pub fn rotate_panels(&mut self, rev: bool) {
        self.arena.rotate_models(rev);
        self.mark_all_dirty(false);
    }

    /// Cycle the current panel through its alternate commands
    pub fn rotate_sub(&mut self, session: &mut Session, rev: bool) {
        let Some(panel) = self.arena.get_mut(self.curnode) else {
            return;
        };
        let Some(rotation) = panel.model.rotation else {
            return;
        };
        let step = |rotate: usize, n: usize| if rev { (rotate + n - 1) % n } else { (rotate + 1) % n };
        match rotation {
            Rotation::DisasmMode => {
                panel.model.rotate = step(panel.model.rotate, DISASM_MODES);
                session.executor.disasm_mode(panel.model.rotate);
            }
            Rotation::Suffixes { prefix, suffixes } => {
                panel.model.rotate = step(panel.model.rotate, suffixes.len());
                let cmd = crate::panel::kind::rotate_command(&panel.model.cmd, prefix, suffixes[panel.model.rotate]);
                panel.model.set_cmd(cmd);
            }
        }
        panel.model.filters.clear();
        panel.model.cached = None;
        panel.reset_scroll();
        panel.view.refresh = true;
    }

    pub fn toggle_cache(&mut self) {
        if let Some(panel) = self.current_mut() {
            panel.model.cache = !panel.model.cache;
            panel.model.cached = None;
            panel.view.refresh = true;
        }
    }

    pub fn add_filter(&mut self, keyword: &str) {
        if let Some(panel) = self.current_mut() {
            panel.model.filters.push(keyword.to_string());
            panel.model.cached = None;
            panel.reset_scroll();
            panel.view.refresh = true;
        }
    }

    pub fn clear_filters(&mut self) {
        if let Some(panel) = self.current_mut() {
            panel.model.filters.clear();
            panel.model.cached = None;
            panel.reset_scroll();
            panel.view.refresh = true;
        }
    }

    /// Point every disassembly panel at the shared offset, opening one
    /// when there is none
    pub fn update_disassembly_or_open(&mut self, session: &mut Session) -> Result<()> {
        let offset = session.offset();
        let mut found = false;
        for panel in self.arena.panels_mut().filter(|p| p.model.kind == ContentKind::Disassembly) {
            panel.model.addr = offset;
            panel.model.cached = None;
            panel.view.refresh = true;
            found = true;
        }
        if !found {
            let cmd = self.commands.get("Disassembly").unwrap_or("pd").to_string();
            self.insert_side_panel(session, "Disassembly", &cmd, false)?;
        }
        self.mark_all_dirty(false);
        Ok(())
    }

    /// Seek the shared offset; the current panel and disassembly panels follow
    pub fn seek_to(&mut self, session: &mut Session, addr: u64) {
        session.seek(addr);
        for panel in self.arena.panels_mut().filter(|p| p.model.kind == ContentKind::Disassembly) {
            panel.model.addr = addr;
            panel.model.cached = None;
        }
        self.set_addr(self.curnode, addr);
        self.mark_all_dirty(false);
    }

    pub fn save_layout(&self, path: &Path) -> Result<()> {
        let json = persist::to_json(self.arena.iter())?;
        persist::save(path, &json)
    }

    /// Replace every panel with a saved layout fitted to the canvas
    pub fn load_layout(&mut self, session: &mut Session, path: &Path) -> Result<()> {
        let saved = persist::load(path)?;
        if saved.len() > self.panel_limit {
            return Err(PanelsError::PanelLimit { limit: self.panel_limit });
        }
        let mut panels = Vec::with_capacity(saved.len());
        for record in &saved {
            let mut panel = if ContentKind::classify(&record.cmd).is_help() {
                Panel::help(&record.title, help::help_for(Mode::Default).1.to_string())
            } else {
                self.new_panel(session, &record.title, &record.cmd, record.cache)
            };
            panel.view.pos = record.pos();
            panels.push(panel);
        }
        self.arena.clear();
        for panel in panels {
            self.arena.push(panel);
        }
        let edges = check_edges(&self.arena);
        let canvas = self.canvas_size();
        fit_to_canvas(&mut self.arena, &edges, canvas);
        self.curnode = 0;
        self.mode = Mode::Default;
        self.prev_mode = Mode::Default;
        self.initialized = true;
        self.layout_refresh();
        self.mark_all_dirty(false);
        info!(path = %path.display(), panels = self.arena.len(), "layout loaded");
        Ok(())
    }

    /// Load a saved layout, falling back to the default set on any failure.
    /// The failure is still returned so it can be reported.
    pub fn load_layout_or_default(&mut self, session: &mut Session, path: Option<&Path>) -> Result<()> {
        let result = match path {
            Some(path) => self.load_layout(session, path),
            None => Err(PanelsError::Config("no layout path configured".into())),
        };
        if let Err(err) = &result {
            warn!(error = %err, "falling back to the default layout");
            self.init_default(session);
        }
        result
    }

    /// Advance the animation one frame
    pub fn tick_fun<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        if !self.fun.is_on() {
            return;
        }
        let Some(area) = self.current().map(|p| p.view.pos) else {
            return;
        };
        self.fun.tick(area, rng);
        self.fun_repaint = true;
    }

    /// Cycle the animation; the current panel repaints to wipe old flakes
    pub fn cycle_fun(&mut self) {
        self.fun.cycle();
        self.fun_repaint = true;
    }

    fn paint(&mut self, index: usize, text: &str, session: &Session) {
        let theme = Theme::by_name(&session.theme);
        let focused = index == self.curnode;
        let Some(panel) = self.arena.get(index) else {
            return;
        };
        let row_cursor = (focused && session.cursor.enabled && panel.model.kind.has_row_cursor())
            .then_some(panel.view.curpos);
        let look = PanelLook {
            theme,
            color: session.color,
            focused,
            row_cursor,
        };
        render_panel(&mut self.canvas, panel, text, &look);
    }

    /// Bring the canvas up to date: repaint dirty panels, then whatever
    /// floats above them, then the title bar
    pub fn refresh(&mut self, session: &mut Session, tabs: &TabStrip) {
        self.layout_refresh();
        self.check_stack_base(session);
        let zoomed = self.mode == Mode::Zoom;
        let mut repainted = false;
        let mut current_painted = false;
        for i in 0..self.arena.len() {
            if zoomed && i != self.curnode {
                continue;
            }
            let text = match self.arena.get_mut(i) {
                Some(panel) if panel.view.refresh => content::print(panel, session),
                _ => continue,
            };
            self.paint(i, &text, session);
            if let Some(panel) = self.arena.get_mut(i) {
                panel.view.text = text;
                panel.view.refresh = false;
            }
            repainted = true;
            current_painted |= i == self.curnode;
        }

        if self.fun_repaint && !current_painted {
            let cur = self.curnode;
            if let Some(text) = self.arena.get_mut(cur).map(|p| std::mem::take(&mut p.view.text)) {
                self.paint(cur, &text, session);
                if let Some(panel) = self.arena.get_mut(cur) {
                    panel.view.text = text;
                }
            }
        }
        self.fun_repaint = false;

        let theme = Theme::by_name(&session.theme);
        let color = session.color;
        if self.fun.is_on() && self.mode != Mode::Menu {
            render_flakes(&mut self.canvas, &self.fun.flakes, self.fun.effect.glyph(), theme, color);
        }

        if self.mode == Mode::Menu {
            if repainted {
                self.menu.mark_all_dirty();
            }
            let dirty = self.menu.take_dirty();
            for (level, pos, node) in self.menu.popups() {
                if dirty.contains(&level) {
                    render_popup(&mut self.canvas, pos, node, theme, color);
                }
            }
        }

        if let Some(modal) = &mut self.modal {
            if repainted || modal.dirty {
                render_modal(&mut self.canvas, modal, &self.almighty, theme, color);
                modal.dirty = false;
            }
        }

        let info = BarInfo {
            mode: self.mode,
            menu: &self.menu,
            offset: session.offset(),
            tabs,
            theme,
            color,
        };
        render_title_bar(&mut self.canvas, &info);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::executor::Executor;
    use crate::layout::Pos;

    struct Quiet {
        offset: u64,
    }

    impl Executor for Quiet {
        fn execute(&mut self, cmd: &str) -> String {
            format!("out of {}", cmd)
        }

        fn offset(&self) -> u64 {
            self.offset
        }

        fn seek(&mut self, addr: u64) {
            self.offset = addr;
        }
    }

    fn session() -> Session {
        Session::new(Box::new(Quiet { offset: 0x1000 }), Config::default())
    }

    fn one_panel(session: &mut Session) -> PanelSet {
        let mut set = PanelSet::new(session, 80, 24);
        let mut panel = set.new_panel(session, "Disassembly", "pd", false);
        panel.view.pos = Pos::new(0, 1, 80, 23);
        set.arena.push(panel);
        set
    }

    fn tiles(set: &PanelSet) -> Vec<Pos> {
        set.arena.tiles()
    }

    #[test]
    fn test_default_layout_static() {
        let mut session = session();
        let mut set = PanelSet::new(&mut session, 80, 24);
        set.ensure_initialized(&mut session);
        let titles: Vec<_> = set.arena.iter().map(|p| p.model.title.clone()).collect();
        assert_eq!(titles, vec!["Disassembly", "Functions", "Symbols"]);
        assert!(crate::layout::covers_canvas(&tiles(&set), Canvas::new(80, 24)));
        assert_eq!(set.current().map(|p| p.model.addr), Some(0x1000));
    }

    #[test]
    fn test_split_and_dismantle_scenario() {
        let mut session = session();
        let mut set = one_panel(&mut session);
        set.split_current(&mut session, Orientation::Vertical, "b", "b", false)
            .expect("room for a split");
        assert_eq!(tiles(&set), vec![Pos::new(0, 1, 41, 23), Pos::new(40, 1, 40, 23)]);
        assert_eq!(set.curnode, 1);
        set.split_current(&mut session, Orientation::Horizontal, "c", "c", false)
            .expect("room for a split");
        assert_eq!(set.arena.tile(1), Pos::new(40, 1, 40, 12));
        assert_eq!(set.arena.tile(2), Pos::new(40, 12, 40, 12));
        assert!(set.delete_panel(2));
        assert_eq!(set.arena.tile(1), Pos::new(40, 1, 40, 23));
        assert!(set.curnode < set.len());
    }

    #[test]
    fn test_panel_limit() {
        let mut session = session();
        session.config.panel_limit = 1;
        let mut set = one_panel(&mut session);
        let err = set.split_current(&mut session, Orientation::Vertical, "b", "b", false);
        assert!(matches!(err, Err(PanelsError::PanelLimit { limit: 1 })));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_last_panel_is_kept() {
        let mut session = session();
        let mut set = one_panel(&mut session);
        assert!(!set.delete_current());
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_zoom_round_trip() {
        let mut session = session();
        let mut set = one_panel(&mut session);
        set.split_current(&mut session, Orientation::Vertical, "b", "b", false)
            .expect("split");
        let before = tiles(&set);
        set.toggle_zoom();
        assert_eq!(set.mode, Mode::Zoom);
        assert_eq!(set.arena.tile(1), Pos::new(0, 1, 80, 23));
        set.toggle_zoom();
        assert_eq!(set.mode, Mode::Default);
        assert_eq!(tiles(&set), before);
    }

    #[test]
    fn test_window_from_zoom_returns_to_zoom() {
        let mut session = session();
        let mut set = one_panel(&mut session);
        set.toggle_zoom();
        set.enter_window();
        assert_eq!(set.mode, Mode::Window);
        assert_eq!(set.arena.tile(0), Pos::new(0, 1, 80, 23));
        set.leave_window();
        assert_eq!(set.mode, Mode::Zoom);
    }

    #[test]
    fn test_help_toggles_side_panel() {
        let mut session = session();
        let mut set = one_panel(&mut session);
        set.toggle_help().expect("room for help");
        assert_eq!(set.len(), 2);
        assert!(set.arena.get(0).is_some_and(|p| p.model.is_help()));
        assert_eq!(set.arena.tile(0).x, 0);
        set.toggle_help().expect("help removed");
        assert_eq!(set.len(), 1);
        assert_eq!(set.arena.tile(0), Pos::new(0, 1, 80, 23));
    }

    #[test]
    fn test_resize_stretches_edge_panels() {
        let mut session = session();
        let mut set = one_panel(&mut session);
        set.split_current(&mut session, Orientation::Vertical, "b", "b", false)
            .expect("split");
        set.on_resize(100, 30);
        assert_eq!(tiles(&set), vec![Pos::new(0, 1, 41, 29), Pos::new(40, 1, 60, 29)]);
    }

    #[test]
    fn test_rotate_sub_cycles_suffixes() {
        let mut session = session();
        let mut set = PanelSet::new(&mut session, 80, 24);
        let mut panel = set.new_panel(&mut session, "Registers", "dr", false);
        panel.view.pos = Pos::new(0, 1, 80, 23);
        panel.model.filters.push("rip".into());
        set.arena.push(panel);
        set.rotate_sub(&mut session, false);
        let model = &set.arena.get(0).expect("panel").model;
        assert_eq!(model.cmd, "dr=");
        assert!(model.filters.is_empty());
        set.rotate_sub(&mut session, true);
        assert_eq!(set.arena.get(0).map(|p| p.model.cmd.as_str()), Some("dr"));
    }

    #[test]
    fn test_refresh_paints_once() {
        let mut session = session();
        let mut set = PanelSet::new(&mut session, 80, 24);
        set.ensure_initialized(&mut session);
        set.refresh(&mut session, &TabStrip::default());
        assert!(set.arena.iter().all(|p| !p.view.refresh));
        assert_eq!(set.arena.get(1).map(|p| p.view.text.as_str()), Some("out of afl"));
    }

    #[test]
    fn test_prune_keeps_first_panel() {
        let mut session = session();
        let mut set = one_panel(&mut session);
        set.split_current(&mut session, Orientation::Vertical, "b", "b", false)
            .expect("split");
        set.arena.set_tile(0, Pos::new(0, 1, 79, 23));
        set.arena.set_tile(1, Pos::new(78, 1, 1, 23));
        set.layout_refresh();
        assert_eq!(set.len(), 1);
        assert_eq!(set.curnode, 0);
    }
}
