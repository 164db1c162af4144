//! Key handling
//!
//! A key is offered, in order, to the almighty modal, the menu, cursor mode,
//! the Zoom or Window handler, a console panel and finally the default keys.
//! Handlers return `None` to let a key fall through to the next one. Anything
//! that fails ends up on the status line; only a dead console is fatal.

use super::menu::{MenuAction, MenuStep};
use super::modal::{Almighty, Modal, ModalStep, Placement};
use super::{Mode, PanelSet};
use crate::config::ActionCommands;
use crate::error::{PanelsError, Result};
use crate::layout::{move_to_direction, resize, Direction, Orientation};
use crate::panel::kind::{ContentKind, CMD_BREAKPOINTS};
use crate::panel::scroll::scroll;
use crate::session::{addr_in_line, parse_addr, Cursor, Session};
use crate::ui::console::Console;
use crate::ui::input::Key;
use std::io;
use tracing::{debug, warn};

/// Something the tab root has to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TabRequest {
    /// Switch to the tab with this index
    Select(usize),
    Next,
    Prev,
    Delete,
    Name(String),
    New,
    /// Move the current panel into a new tab
    NewWithCurrent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Tab(TabRequest),
    Quit,
}

/// Keys that Zoom mode hands on to the default handler
const ZOOM_PASS: &str = "cC;\"ghjklpPsStT:[]iIfF";

const TAB_PROMPT: &str = "[Tab] 1-9:select n:next p:prev -:delete =:name t:new T:new with current panel";

fn direction(c: char) -> Option<Direction> {
    match c {
        'h' => Some(Direction::Left),
        'j' => Some(Direction::Down),
        'k' => Some(Direction::Up),
        'l' => Some(Direction::Right),
        _ => None,
    }
}

/// Read a non-empty answer
fn prompt_arg(console: &mut dyn Console, prompt: &str) -> io::Result<Option<String>> {
    Ok(console.input(prompt)?.filter(|s| !s.trim().is_empty()))
}

/// Command output squeezed onto the status line
fn one_line(text: &str) -> String {
    text.lines().map(str::trim).filter(|l| !l.is_empty()).collect::<Vec<_>>().join(" ")
}

impl PanelSet {
    /// Handle one key
    pub fn handle_key(&mut self, key: Key, session: &mut Session, console: &mut dyn Console) -> io::Result<Flow> {
        match self.dispatch(key, session, console) {
            Ok(flow) => Ok(flow),
            Err(err) => {
                warn!(error = %err, ?key, "key failed");
                self.mark_all_dirty(false);
                console.status(&err.to_string())?;
                Ok(Flow::Continue)
            }
        }
    }

    fn dispatch(&mut self, key: Key, session: &mut Session, console: &mut dyn Console) -> Result<Flow> {
        let key = key.to_hjkl();
        if self.modal.is_some() {
            return self.modal_key(key, session, console);
        }
        if self.mode == Mode::Menu {
            if let Some(flow) = self.menu_key(key, session, console)? {
                return Ok(flow);
            }
        }
        if session.cursor.enabled {
            return self.cursor_key(key, session);
        }
        let claimed = match self.mode {
            Mode::Zoom => self.zoom_key(key)?,
            Mode::Window => self.window_key(key, session, console)?,
            Mode::Default | Mode::Menu => None,
        };
        if let Some(flow) = claimed {
            return Ok(flow);
        }
        if let Some(flow) = self.console_panel_key(key, session, console)? {
            return Ok(flow);
        }
        self.default_key(key, session, console)
    }

    fn modal_key(&mut self, key: Key, session: &mut Session, console: &mut dyn Console) -> Result<Flow> {
        let c = match key {
            Key::Char(c) => c,
            Key::Enter => '\n',
            Key::Esc => 'q',
            _ => return Ok(Flow::Continue),
        };
        let Some(modal) = &mut self.modal else {
            return Ok(Flow::Continue);
        };
        match modal.handle(c, &self.almighty) {
            ModalStep::Stay => {}
            ModalStep::Remove(name) => {
                self.almighty.remove(&name);
            }
            ModalStep::Close => {
                self.modal = None;
                self.mark_all_dirty(false);
            }
            ModalStep::Pick(name, placement) => {
                self.modal = None;
                self.mark_all_dirty(false);
                return self.pick_almighty(&name, placement, session, console);
            }
        }
        Ok(Flow::Continue)
    }

    fn place(&mut self, session: &mut Session, placement: Placement, title: &str, cmd: &str) -> Result<()> {
        match placement {
            Placement::Vertical => self.split_current(session, Orientation::Vertical, title, cmd, false),
            Placement::Horizontal => self.split_current(session, Orientation::Horizontal, title, cmd, false),
            Placement::Replace => {
                self.replace_current(session, title, cmd, false);
                Ok(())
            }
        }
    }

    fn pick_almighty(
        &mut self,
        name: &str,
        placement: Placement,
        session: &mut Session,
        console: &mut dyn Console,
    ) -> Result<Flow> {
        let Some(entry) = self.almighty.get(name).cloned() else {
            return Ok(Flow::Continue);
        };
        debug!(name, ?placement, "almighty pick");
        match entry {
            Almighty::Panel(title) => {
                let cmd = self.commands.get(&title).unwrap_or(title.as_str()).to_string();
                self.place(session, placement, &title, &cmd)?;
            }
            Almighty::SearchStrings { prompt, template } => {
                if let Some(keyword) = prompt_arg(console, prompt)? {
                    let cmd = ActionCommands::fill(template, &keyword);
                    self.place(session, placement, &cmd, &cmd)?;
                }
            }
            Almighty::CreateNew => {
                let Some(title) = prompt_arg(console, "Name: ")? else {
                    return Ok(Flow::Continue);
                };
                let Some(cmd) = prompt_arg(console, "Command: ")? else {
                    return Ok(Flow::Continue);
                };
                self.place(session, placement, &title, &cmd)?;
            }
            Almighty::PutBreakpoints => self.put_breakpoint(session, console)?,
            Almighty::Continue => self.cont(session)?,
            Almighty::Step => self.step(session, false)?,
            Almighty::StepOver => self.step(session, true)?,
        }
        Ok(Flow::Continue)
    }

    fn menu_key(&mut self, key: Key, session: &mut Session, console: &mut dyn Console) -> Result<Option<Flow>> {
        let step = match key {
            Key::Char(c) => self.menu.handle(c),
            Key::Enter => self.menu.enter(),
            Key::Esc => self.menu.back(),
            _ => MenuStep::Unhandled,
        };
        match step {
            MenuStep::Stay => Ok(Some(Flow::Continue)),
            MenuStep::Redraw => {
                self.mark_all_dirty(false);
                Ok(Some(Flow::Continue))
            }
            MenuStep::Leave => {
                self.menu.reset();
                self.mode = Mode::Default;
                self.mark_all_dirty(false);
                Ok(Some(Flow::Continue))
            }
            MenuStep::Invoke(action) => {
                self.mode = Mode::Default;
                self.mark_all_dirty(false);
                self.run_menu_action(action, session, console).map(Some)
            }
            MenuStep::Unhandled => Ok(None),
        }
    }

    fn run_menu_action(&mut self, action: MenuAction, session: &mut Session, console: &mut dyn Console) -> Result<Flow> {
        debug!(?action, "menu action");
        match action {
            MenuAction::AddPanel(title) => {
                let cmd = self.commands.get(title).unwrap_or(title).to_string();
                let cache = console.confirm("Cache the result?", false)?;
                self.insert_side_panel(session, title, &cmd, cache)?;
            }
            MenuAction::PromptPanel { prompt, template } => {
                if let Some(arg) = prompt_arg(console, prompt)? {
                    let cmd = ActionCommands::fill(template, &arg);
                    self.insert_side_panel(session, &cmd, &cmd, false)?;
                }
            }
            MenuAction::PromptRun { prompt, template } => {
                if let Some(arg) = prompt_arg(console, prompt)? {
                    session.run(&ActionCommands::fill(template, &arg));
                    self.mark_all_dirty(true);
                }
            }
            MenuAction::Run(cmd) => {
                session.run(cmd);
                self.mark_all_dirty(true);
            }
            MenuAction::ShowOutput(cmd) => {
                let out = session.run(cmd);
                console.status(&one_line(&out))?;
            }
            MenuAction::Message(msg) => console.status(msg)?,
            MenuAction::Version => console.status(&format!("panedeck {}", env!("CARGO_PKG_VERSION")))?,
            MenuAction::SaveLayout => {
                let path = session
                    .config
                    .layout_path()
                    .ok_or_else(|| PanelsError::Config("no layout path configured".into()))?;
                self.save_layout(&path)?;
                console.status("Panels layout saved!")?;
            }
            MenuAction::LoadSavedLayout => {
                let path = session.config.layout_path();
                self.load_layout_or_default(session, path.as_deref())?;
            }
            MenuAction::LoadDefaultLayout => self.init_default(session),
            MenuAction::Quit => return Ok(Flow::Quit),
            MenuAction::IoCache(on) => {
                session.io_cache = on;
                session.run(&format!("e io.cache={}", on));
                self.mark_all_dirty(true);
            }
            MenuAction::Theme(name) => {
                session.executor.apply_theme(&name);
                session.theme = name;
                self.mark_all_dirty(false);
            }
            MenuAction::Calculator => {
                if let Some(expr) = prompt_arg(console, "> ")? {
                    let out = session.run(&format!("? {}", expr));
                    console.status(&one_line(&out))?;
                }
            }
            MenuAction::CommandPrompt => self.command_prompt(session, console)?,
            MenuAction::Breakpoint => self.put_breakpoint(session, console)?,
            MenuAction::Continue => self.cont(session)?,
            MenuAction::Step => self.step(session, false)?,
            MenuAction::StepOver => self.step(session, true)?,
            MenuAction::ToggleHelp => self.toggle_help()?,
        }
        Ok(Flow::Continue)
    }

    /// Arrow keys on the current panel
    fn scroll_current(&mut self, session: &mut Session, dir: Direction) {
        let zoomed = self.mode == Mode::Zoom;
        let Some(panel) = self.arena.get_mut(self.curnode) else {
            return;
        };
        let moved = scroll(panel, session, dir, zoomed);
        panel.view.refresh = true;
        let kind = panel.model.kind;
        if moved {
            if self.auto_update {
                self.mark_all_dirty(false);
            } else {
                self.mark_dirty_by_kind(kind, false);
            }
        }
    }

    fn enter_cursor(&mut self, session: &mut Session, console: &mut dyn Console) -> Result<()> {
        let Some(panel) = self.current() else {
            return Ok(());
        };
        let kind = panel.model.kind;
        if !kind.has_byte_cursor() && !kind.has_row_cursor() {
            return Ok(());
        }
        if panel.model.cache {
            if !console.confirm("You need to turn off cache to use cursor. Turn off now?", true)? {
                return Ok(());
            }
            self.toggle_cache();
        }
        session.cursor = Cursor { enabled: true, cur: 0 };
        if let Some(panel) = self.current_mut() {
            panel.view.curpos = 0;
            panel.view.refresh = true;
        }
        Ok(())
    }

    fn leave_cursor(&mut self, session: &mut Session) {
        session.cursor = Cursor::default();
        if let Some(panel) = self.current_mut() {
            panel.view.refresh = true;
        }
    }

    /// Address under the cursor: parsed from the cursor row of listings,
    /// panel address plus cursor for byte panels
    fn cursor_addr(&self, session: &Session) -> Option<u64> {
        let panel = self.current()?;
        if panel.model.kind.has_row_cursor() {
            let row = usize::try_from(panel.view.curpos).ok()?;
            panel.view.text.lines().nth(row).and_then(addr_in_line)
        } else {
            Some(panel.model.addr.saturating_add_signed(session.cursor.cur))
        }
    }

    fn cursor_key(&mut self, key: Key, session: &mut Session) -> Result<Flow> {
        match key {
            Key::Char(c) if direction(c).is_some() => {
                if let Some(dir) = direction(c) {
                    self.scroll_current(session, dir);
                }
            }
            Key::Enter => {
                if let Some(addr) = self.cursor_addr(session) {
                    self.leave_cursor(session);
                    self.seek_to(session, addr);
                    self.update_disassembly_or_open(session)?;
                }
            }
            Key::Char('-') => {
                let on_breakpoints = self
                    .current()
                    .is_some_and(|p| p.model.kind.has_row_cursor() && p.model.cmd.starts_with(CMD_BREAKPOINTS));
                if let (true, Some(addr)) = (on_breakpoints, self.cursor_addr(session)) {
                    let cmd = ActionCommands::fill(&session.config.actions.delete_breakpoint, &format!("0x{:x}", addr));
                    session.run(&cmd);
                    self.mark_dirty_by_kind(ContentKind::Listing, true);
                    self.mark_dirty_by_kind(ContentKind::Disassembly, true);
                }
            }
            Key::Char('q' | 'c') | Key::Esc => self.leave_cursor(session),
            Key::Char('w') => {
                self.leave_cursor(session);
                self.enter_window();
            }
            _ => {}
        }
        Ok(Flow::Continue)
    }

    fn zoom_key(&mut self, key: Key) -> Result<Option<Flow>> {
        match key {
            Key::Tab => self.zoom_step(true),
            Key::BackTab => self.zoom_step(false),
            Key::Char('?') => self.toggle_help()?,
            Key::Char('q' | 'Q') | Key::Enter => self.toggle_zoom(),
            Key::Char('w') => self.enter_window(),
            Key::Char(c) if ZOOM_PASS.contains(c) => return Ok(None),
            _ => {}
        }
        Ok(Some(Flow::Continue))
    }

    fn window_key(&mut self, key: Key, session: &mut Session, console: &mut dyn Console) -> Result<Option<Flow>> {
        match key {
            Key::Char(c @ ('h' | 'j' | 'k' | 'l')) => {
                let next = direction(c).and_then(|dir| move_to_direction(&self.arena, self.curnode, dir));
                if let Some(next) = next {
                    self.set_curnode(next);
                }
            }
            Key::Char(c @ ('H' | 'J' | 'K' | 'L')) => {
                if let Some(dir) = direction(c.to_ascii_lowercase()) {
                    let step = match dir {
                        Direction::Left | Direction::Right => session.config.resize_step_w,
                        Direction::Up | Direction::Down => session.config.resize_step_h,
                    };
                    if resize(&mut self.arena, self.curnode, dir, step) {
                        self.mark_all_dirty(false);
                    }
                }
            }
            Key::Char('n') => self.prompt_split(session, console, Orientation::Vertical)?,
            Key::Char('N') => self.prompt_split(session, console, Orientation::Horizontal)?,
            Key::Char('X') => {
                self.delete_current();
            }
            Key::Enter => self.toggle_zoom(),
            Key::Tab => self.next_panel(true),
            Key::BackTab => self.next_panel(false),
            Key::Char('q' | 'w') | Key::Esc => self.leave_window(),
            _ => return Ok(None),
        }
        Ok(Some(Flow::Continue))
    }

    fn prompt_split(&mut self, session: &mut Session, console: &mut dyn Console, orientation: Orientation) -> Result<()> {
        let Some(title) = prompt_arg(console, "Name: ")? else {
            return Ok(());
        };
        let Some(cmd) = prompt_arg(console, "Command: ")? else {
            return Ok(());
        };
        self.split_current(session, orientation, &title, &cmd, false)
    }

    /// `i` runs a command into the console log, `l` clears it
    fn console_panel_key(&mut self, key: Key, session: &mut Session, console: &mut dyn Console) -> Result<Option<Flow>> {
        if !self.current().is_some_and(|p| p.model.kind == ContentKind::Console) {
            return Ok(None);
        }
        match key {
            Key::Char('i') => {
                if let Some(cmd) = prompt_arg(console, "> ")? {
                    session.run_logged(&cmd);
                    self.mark_all_dirty(false);
                }
            }
            Key::Char('l') => {
                session.console_log.clear();
                self.mark_dirty_by_kind(ContentKind::Console, false);
            }
            _ => return Ok(None),
        }
        Ok(Some(Flow::Continue))
    }

    fn command_prompt(&mut self, session: &mut Session, console: &mut dyn Console) -> Result<()> {
        let Some(cmd) = prompt_arg(console, ":")? else {
            return Ok(());
        };
        session.run_logged(&cmd);
        if !self.arena.iter().any(|p| p.model.kind == ContentKind::Console) {
            let console_cmd = self.commands.get("Console").unwrap_or("$console").to_string();
            self.insert_side_panel(session, "Console", &console_cmd, false)?;
        }
        self.mark_all_dirty(false);
        Ok(())
    }

    fn put_breakpoint(&mut self, session: &mut Session, console: &mut dyn Console) -> Result<()> {
        if let Some(addr) = prompt_arg(console, "addr: ")? {
            session.run(&ActionCommands::fill(&session.config.actions.breakpoint.clone(), &addr));
            self.mark_dirty_by_kind(ContentKind::Disassembly, true);
            self.mark_dirty_by_kind(ContentKind::Listing, true);
        }
        Ok(())
    }

    /// Follow the program counter after execution moved it
    fn after_step(&mut self, session: &mut Session) -> Result<()> {
        if let Some(pc) = session.executor.program_counter() {
            session.executor.seek(pc);
        }
        self.update_disassembly_or_open(session)
    }

    fn step(&mut self, session: &mut Session, over: bool) -> Result<()> {
        let actions = &session.config.actions;
        let cmd = match (session.config.debug, over) {
            (true, false) => actions.step_in.clone(),
            (true, true) => actions.step_over.clone(),
            (false, false) => actions.emu_step_in.clone(),
            (false, true) => actions.emu_step_over.clone(),
        };
        session.run(&cmd);
        self.after_step(session)
    }

    fn cont(&mut self, session: &mut Session) -> Result<()> {
        let cmd = session.config.actions.cont.clone();
        session.run(&cmd);
        self.after_step(session)
    }

    fn edit_current(&mut self, console: &mut dyn Console) -> Result<()> {
        let Some(panel) = self.current() else {
            return Ok(());
        };
        let (title, cmd, cache) = (panel.model.title.clone(), panel.model.cmd.clone(), panel.model.cache);
        let Some(new_title) = console.input(&format!("New title ({}): ", title))? else {
            return Ok(());
        };
        let Some(new_cmd) = console.input(&format!("New command ({}): ", cmd))? else {
            return Ok(());
        };
        let cache = console.confirm("Cache the result?", cache)?;
        if let Some(panel) = self.current_mut() {
            let model = &mut panel.model;
            if !new_title.trim().is_empty() {
                model.title = new_title.trim().to_string();
            }
            if !new_cmd.trim().is_empty() && new_cmd.trim() != cmd {
                model.set_cmd(new_cmd.trim().to_string());
                model.rotate = 0;
                model.filters.clear();
            }
            model.cache = cache;
            model.cached = None;
            panel.reset_scroll();
            panel.view.refresh = true;
        }
        Ok(())
    }

    fn seek_prompt(&mut self, session: &mut Session, console: &mut dyn Console) -> Result<()> {
        let Some(text) = prompt_arg(console, "seek: ")? else {
            return Ok(());
        };
        match parse_addr(&text) {
            Some(addr) => self.seek_to(session, addr),
            None => console.status(&format!("invalid address: {}", text.trim()))?,
        }
        Ok(())
    }

    /// Current panels follow the offset after an undo or redo
    fn follow_offset(&mut self, session: &mut Session) {
        let offset = session.offset();
        self.seek_to(session, offset);
    }

    fn tab_prompt(&mut self, console: &mut dyn Console) -> Result<Flow> {
        console.show_line(TAB_PROMPT)?;
        let key = loop {
            if let Some(key) = console.read_key(None)? {
                break key;
            }
        };
        let request = match key {
            Key::Char(c @ '1'..='9') => c.to_digit(10).map(|d| TabRequest::Select(d as usize - 1)),
            Key::Char('n') => Some(TabRequest::Next),
            Key::Char('p') => Some(TabRequest::Prev),
            Key::Char('-') => Some(TabRequest::Delete),
            Key::Char('=') => prompt_arg(console, "tab name: ")?.map(TabRequest::Name),
            Key::Char('t') => Some(TabRequest::New),
            Key::Char('T') => Some(TabRequest::NewWithCurrent),
            _ => None,
        };
        self.mark_all_dirty(false);
        Ok(request.map_or(Flow::Continue, Flow::Tab))
    }

    fn function_key(&mut self, n: u8, session: &mut Session) -> Result<()> {
        let Some((_, cmd)) = session.config.function_keys().into_iter().find(|&(k, _)| k == n) else {
            return Ok(());
        };
        session.run(&cmd);
        self.after_step(session)
    }

    fn default_key(&mut self, key: Key, session: &mut Session, console: &mut dyn Console) -> Result<Flow> {
        let c = match key {
            Key::Tab => {
                self.next_panel(true);
                return Ok(Flow::Continue);
            }
            Key::BackTab => {
                self.next_panel(false);
                return Ok(Flow::Continue);
            }
            Key::Enter => {
                self.toggle_zoom();
                return Ok(Flow::Continue);
            }
            Key::F(n) => {
                self.function_key(n, session)?;
                return Ok(Flow::Continue);
            }
            Key::Char(c) => c,
            _ => return Ok(Flow::Continue),
        };
        if let Some(dir) = direction(c) {
            self.scroll_current(session, dir);
            return Ok(Flow::Continue);
        }
        match c {
            '|' => self.duplicate_current(session, Orientation::Vertical)?,
            '-' => self.duplicate_current(session, Orientation::Horizontal)?,
            'X' => {
                self.delete_current();
            }
            'z' => self.swap_with_first(),
            'p' => self.rotate_panels(false),
            'P' => self.rotate_panels(true),
            'i' => self.rotate_sub(session, false),
            'I' => self.rotate_sub(session, true),
            'e' => self.edit_current(console)?,
            '"' => {
                self.modal = Some(Modal::new(self.canvas_size()));
            }
            '?' => self.toggle_help()?,
            'm' => {
                self.menu.reset();
                self.mode = Mode::Menu;
            }
            'w' => self.enter_window(),
            '&' => self.toggle_cache(),
            'a' => {
                let on = console.confirm("Auto update On?", self.auto_update)?;
                self.auto_update = on;
                session.config.auto_update = on;
                self.mark_all_dirty(false);
            }
            ':' => self.command_prompt(session, console)?,
            ';' => {
                if let Some(text) = prompt_arg(console, "comment: ")? {
                    session.run(&ActionCommands::fill(&session.config.actions.comment.clone(), &text));
                    self.mark_dirty_by_kind(ContentKind::Disassembly, true);
                }
            }
            'g' => self.seek_prompt(session, console)?,
            '.' => {
                if let Some(pc) = session.executor.program_counter() {
                    self.seek_to(session, pc);
                }
            }
            'u' => {
                if session.undo_seek() {
                    self.follow_offset(session);
                }
            }
            'U' => {
                if session.redo_seek() {
                    self.follow_offset(session);
                }
            }
            's' => self.step(session, false)?,
            'S' => self.step(session, true)?,
            'D' => self.replace_with_title(session, "Disassembly"),
            'G' => self.replace_with_title(session, "Graph"),
            '*' => self.replace_with_title(session, "Decompiler"),
            '[' => {
                session.hex_cols = (session.hex_cols - 1).max(1);
                self.mark_dirty_by_kind(ContentKind::Hexdump, true);
            }
            ']' => {
                session.hex_cols += 1;
                self.mark_dirty_by_kind(ContentKind::Hexdump, true);
            }
            'c' => self.enter_cursor(session, console)?,
            'C' => {
                session.color = (session.color + 1) % 3;
                self.mark_all_dirty(false);
            }
            '(' => self.cycle_fun(),
            'f' => {
                if let Some(keyword) = prompt_arg(console, "filter word: ")? {
                    self.add_filter(keyword.trim());
                }
            }
            'F' => self.clear_filters(),
            't' => return self.tab_prompt(console),
            'T' | 'q' => return Ok(Flow::Tab(TabRequest::Delete)),
            'Q' => return Ok(Flow::Quit),
            _ => {}
        }
        Ok(Flow::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::executor::Executor;
    use crate::layout::{Pos, Tiling};
    use ratatui::buffer::Buffer;
    use std::collections::VecDeque;
    use std::time::Duration;

    struct Quiet {
        offset: u64,
    }

    impl Executor for Quiet {
        fn execute(&mut self, cmd: &str) -> String {
            format!("0x{:08x} {}", self.offset, cmd)
        }

        fn offset(&self) -> u64 {
            self.offset
        }

        fn seek(&mut self, addr: u64) {
            self.offset = addr;
        }
    }

    #[derive(Default)]
    struct Script {
        keys: VecDeque<Key>,
        lines: Vec<String>,
    }

    impl Script {
        fn typed(text: &str) -> Self {
            let mut script = Script::default();
            script.push_text(text);
            script
        }

        fn push_text(&mut self, text: &str) {
            for c in text.chars() {
                self.keys.push_back(if c == '\n' { Key::Enter } else { Key::Char(c) });
            }
        }
    }

    impl Console for Script {
        fn size(&self) -> (u16, u16) {
            (80, 24)
        }

        fn present(&mut self, _canvas: &Buffer) -> io::Result<()> {
            Ok(())
        }

        fn read_key(&mut self, _timeout: Option<Duration>) -> io::Result<Option<Key>> {
            self.keys
                .pop_front()
                .map(Some)
                .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "script exhausted"))
        }

        fn show_line(&mut self, text: &str) -> io::Result<()> {
            self.lines.push(text.to_string());
            Ok(())
        }
    }

    fn setup() -> (PanelSet, Session) {
        let mut session = Session::new(Box::new(Quiet { offset: 0x1000 }), Config::default());
        let mut set = PanelSet::new(&mut session, 80, 24);
        let mut panel = set.new_panel(&mut session, "Functions", "afl", false);
        panel.view.pos = Pos::new(0, 1, 80, 23);
        set.arena.push(panel);
        (set, session)
    }

    fn press(set: &mut PanelSet, session: &mut Session, console: &mut Script, key: Key) -> Flow {
        set.handle_key(key, session, console).expect("console alive")
    }

    #[test]
    fn test_split_keys_duplicate_current() {
        let (mut set, mut session) = setup();
        let mut console = Script::default();
        press(&mut set, &mut session, &mut console, Key::Char('|'));
        assert_eq!(set.len(), 2);
        assert_eq!(set.arena.get(1).map(|p| p.model.cmd.as_str()), Some("afl"));
        press(&mut set, &mut session, &mut console, Key::Char('X'));
        assert_eq!(set.len(), 1);
        assert_eq!(set.arena.tile(0), Pos::new(0, 1, 80, 23));
    }

    #[test]
    fn test_enter_toggles_zoom() {
        let (mut set, mut session) = setup();
        let mut console = Script::default();
        press(&mut set, &mut session, &mut console, Key::Enter);
        assert_eq!(set.mode, Mode::Zoom);
        press(&mut set, &mut session, &mut console, Key::Char('x'));
        assert_eq!(set.mode, Mode::Zoom);
        press(&mut set, &mut session, &mut console, Key::Char('q'));
        assert_eq!(set.mode, Mode::Default);
    }

    #[test]
    fn test_menu_add_panel_asks_about_cache() {
        let (mut set, mut session) = setup();
        let mut console = Script::typed("y");
        press(&mut set, &mut session, &mut console, Key::Char('m'));
        assert_eq!(set.mode, Mode::Menu);
        press(&mut set, &mut session, &mut console, Key::Char('j'));
        press(&mut set, &mut session, &mut console, Key::Enter);
        assert_eq!(set.mode, Mode::Default);
        let first = set.arena.get(0).expect("side panel");
        assert_eq!(first.model.title, "New");
        assert!(first.model.cache);
        assert_eq!(console.lines, vec!["Cache the result? (y/N)"]);
    }

    #[test]
    fn test_modal_pick_splits() {
        let (mut set, mut session) = setup();
        let mut console = Script::default();
        press(&mut set, &mut session, &mut console, Key::Char('"'));
        assert!(set.modal.is_some());
        let first = set.almighty.keys().next().cloned().expect("entries");
        press(&mut set, &mut session, &mut console, Key::Char('v'));
        assert!(set.modal.is_none());
        assert_eq!(set.len(), 2);
        assert_eq!(set.current().map(|p| p.model.title.clone()), Some(first));
    }

    #[test]
    fn test_modal_remove_entry() {
        let (mut set, mut session) = setup();
        let mut console = Script::default();
        let before = set.almighty.len();
        press(&mut set, &mut session, &mut console, Key::Char('"'));
        press(&mut set, &mut session, &mut console, Key::Char('-'));
        assert_eq!(set.almighty.len(), before - 1);
        press(&mut set, &mut session, &mut console, Key::Esc);
        assert!(set.modal.is_none());
    }

    #[test]
    fn test_cursor_mode_swallows_keys() {
        let (mut set, mut session) = setup();
        let mut console = Script::default();
        press(&mut set, &mut session, &mut console, Key::Char('c'));
        assert!(session.cursor.enabled);
        press(&mut set, &mut session, &mut console, Key::Char('|'));
        assert_eq!(set.len(), 1);
        press(&mut set, &mut session, &mut console, Key::Char('q'));
        assert!(!session.cursor.enabled);
    }

    #[test]
    fn test_cursor_jump_parses_row() {
        let (mut set, mut session) = setup();
        let mut console = Script::default();
        if let Some(panel) = set.current_mut() {
            panel.view.text = "0x00001000 main\n0x00002000 helper".into();
        }
        press(&mut set, &mut session, &mut console, Key::Char('c'));
        if let Some(panel) = set.current_mut() {
            panel.view.curpos = 1;
        }
        press(&mut set, &mut session, &mut console, Key::Enter);
        assert_eq!(session.offset(), 0x2000);
        assert!(!session.cursor.enabled);
        assert!(set.arena.iter().any(|p| p.model.kind == ContentKind::Disassembly));
    }

    #[test]
    fn test_tab_prompt() {
        let (mut set, mut session) = setup();
        let mut console = Script::typed("T");
        let flow = press(&mut set, &mut session, &mut console, Key::Char('t'));
        assert_eq!(flow, Flow::Tab(TabRequest::NewWithCurrent));
        assert_eq!(console.lines, vec![TAB_PROMPT]);
        assert_eq!(
            press(&mut set, &mut session, &mut console, Key::Char('Q')),
            Flow::Quit
        );
    }

    #[test]
    fn test_failure_goes_to_status_line() {
        let (mut set, mut session) = setup();
        session.config.panel_limit = 1;
        set.panel_limit = 1;
        let mut console = Script::typed(" ");
        let flow = press(&mut set, &mut session, &mut console, Key::Char('|'));
        assert_eq!(flow, Flow::Continue);
        assert_eq!(console.lines, vec!["panel limit reached (1)"]);
    }

    #[test]
    fn test_window_mode_moves_focus() {
        let (mut set, mut session) = setup();
        let mut console = Script::default();
        press(&mut set, &mut session, &mut console, Key::Char('|'));
        assert_eq!(set.curnode, 1);
        press(&mut set, &mut session, &mut console, Key::Char('w'));
        press(&mut set, &mut session, &mut console, Key::Left);
        assert_eq!(set.curnode, 0);
        press(&mut set, &mut session, &mut console, Key::Char('L'));
        assert_eq!(set.arena.tile(0).w, 45);
        press(&mut set, &mut session, &mut console, Key::Char('q'));
        assert_eq!(set.mode, Mode::Default);
    }

    #[test]
    fn test_filters() {
        let (mut set, mut session) = setup();
        let mut console = Script::typed("main\n");
        press(&mut set, &mut session, &mut console, Key::Char('f'));
        assert_eq!(set.current().map(|p| p.model.filtered_cmd()), Some("afl~main".to_string()));
        press(&mut set, &mut session, &mut console, Key::Char('F'));
        assert_eq!(set.current().map(|p| p.model.filtered_cmd()), Some("afl".to_string()));
    }
}
