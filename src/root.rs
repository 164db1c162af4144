//! The tab root: every tab of a session and which one is shown

use crate::error::{PanelsError, Result};
use crate::panels::modes::TabRequest;
use crate::panels::PanelSet;
use crate::session::Session;
use crate::ui::panes::bar::TabStrip;
use tracing::{debug, info};

/// Lifecycle of the tab root
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RootState {
    #[default]
    Default,
    /// Switching to another tab
    Rotate,
    /// Dropping the current tab
    Delete,
    Quit,
}

pub struct PanelsRoot {
    pub tabs: Vec<PanelSet>,
    pub cur: usize,
    pub state: RootState,
    limit: usize,
}

impl PanelsRoot {
    /// One tab, initialized lazily on first draw
    pub fn new(session: &mut Session, w: u16, h: u16) -> Self {
        PanelsRoot {
            tabs: vec![PanelSet::new(session, w, h)],
            cur: 0,
            state: RootState::Default,
            limit: session.config.tab_limit,
        }
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    pub fn current(&self) -> &PanelSet {
        &self.tabs[self.cur]
    }

    pub fn current_mut(&mut self) -> &mut PanelSet {
        &mut self.tabs[self.cur]
    }

    pub fn is_quit(&self) -> bool {
        self.state == RootState::Quit
    }

    /// Labels for the title bar: the tab name, or its number
    pub fn tab_strip(&self) -> TabStrip {
        TabStrip {
            labels: self
                .tabs
                .iter()
                .enumerate()
                .map(|(i, tab)| tab.name.clone().unwrap_or_else(|| (i + 1).to_string()))
                .collect(),
            current: self.cur,
        }
    }

    fn check_limit(&self) -> Result<()> {
        if self.tabs.len() >= self.limit {
            return Err(PanelsError::TabLimit { limit: self.limit });
        }
        Ok(())
    }

    /// Show another tab, fitted to the current canvas `size`
    fn switch(&mut self, index: usize, size: (u16, u16)) {
        if index >= self.tabs.len() {
            return;
        }
        self.state = RootState::Rotate;
        debug!(from = self.cur, to = index, "switch tab");
        self.cur = index;
        let tab = &mut self.tabs[self.cur];
        tab.on_resize(size.0, size.1);
        tab.mark_all_dirty(false);
        self.state = RootState::Default;
    }

    fn delete_current(&mut self, size: (u16, u16)) {
        self.state = RootState::Delete;
        if self.tabs.len() <= 1 {
            info!("last tab closed");
            self.state = RootState::Quit;
            return;
        }
        self.tabs.remove(self.cur);
        if self.cur >= self.tabs.len() {
            self.cur = self.tabs.len() - 1;
        }
        let tab = &mut self.tabs[self.cur];
        tab.on_resize(size.0, size.1);
        tab.mark_all_dirty(false);
        self.state = RootState::Default;
    }

    /// Carry out a request from the current tab. `size` is the canvas size
    /// for tabs created here.
    pub fn apply(&mut self, request: TabRequest, session: &mut Session, size: (u16, u16)) -> Result<()> {
        let n = self.tabs.len();
        match request {
            TabRequest::Select(index) => self.switch(index, size),
            TabRequest::Next => self.switch((self.cur + 1) % n, size),
            TabRequest::Prev => self.switch((self.cur + n - 1) % n, size),
            TabRequest::Delete => self.delete_current(size),
            TabRequest::Name(name) => {
                self.tabs[self.cur].name = Some(name);
            }
            TabRequest::New => {
                self.check_limit()?;
                let tab = PanelSet::new(session, size.0, size.1);
                self.tabs.insert(self.cur + 1, tab);
                info!(tabs = self.tabs.len(), "new tab");
            }
            TabRequest::NewWithCurrent => {
                self.check_limit()?;
                let from = &mut self.tabs[self.cur];
                let Some(panel) = from.current().cloned() else {
                    return Ok(());
                };
                if from.len() > 1 {
                    from.delete_current();
                }
                let mut tab = PanelSet::new(session, size.0, size.1);
                tab.adopt(panel);
                self.tabs.insert(self.cur + 1, tab);
                info!(tabs = self.tabs.len(), "panel moved to a new tab");
                self.switch(self.cur + 1, size);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::executor::Executor;
    use crate::layout::{covers_canvas, Canvas, Pos, Tiling};

    struct Quiet;

    impl Executor for Quiet {
        fn execute(&mut self, _cmd: &str) -> String {
            String::new()
        }

        fn offset(&self) -> u64 {
            0
        }

        fn seek(&mut self, _addr: u64) {}
    }

    fn setup() -> (PanelsRoot, Session) {
        let mut session = Session::new(Box::new(Quiet), Config::default());
        let mut root = PanelsRoot::new(&mut session, 80, 24);
        root.current_mut().ensure_initialized(&mut session);
        (root, session)
    }

    #[test]
    fn test_new_tab_is_lazy_and_not_focused() {
        let (mut root, mut session) = setup();
        root.apply(TabRequest::New, &mut session, (80, 24)).expect("under the limit");
        assert_eq!(root.len(), 2);
        assert_eq!(root.cur, 0);
        assert!(!root.tabs[1].is_initialized());
        root.apply(TabRequest::Next, &mut session, (80, 24)).expect("switch");
        assert_eq!(root.cur, 1);
        root.apply(TabRequest::Next, &mut session, (80, 24)).expect("switch");
        assert_eq!(root.cur, 0);
        root.apply(TabRequest::Prev, &mut session, (80, 24)).expect("switch");
        assert_eq!(root.cur, 1);
    }

    #[test]
    fn test_new_tab_with_current_panel() {
        let (mut root, mut session) = setup();
        root.current_mut().set_curnode(1);
        root.apply(TabRequest::NewWithCurrent, &mut session, (80, 24))
            .expect("under the limit");
        assert_eq!(root.cur, 1);
        let moved = root.current();
        assert_eq!(moved.len(), 1);
        assert_eq!(moved.current().map(|p| p.model.title.as_str()), Some("Functions"));
        assert_eq!(moved.arena.tile(0), Pos::new(0, 1, 80, 23));
        assert_eq!(root.tabs[0].len(), 2);
        assert!(root.tabs[0].arena.iter().all(|p| p.model.title != "Functions"));
    }

    #[test]
    fn test_single_panel_is_copied() {
        let (mut root, mut session) = setup();
        let tab = root.current_mut();
        tab.delete_panel(2);
        tab.delete_panel(1);
        assert_eq!(tab.len(), 1);
        root.apply(TabRequest::NewWithCurrent, &mut session, (80, 24))
            .expect("under the limit");
        assert_eq!(root.tabs[0].len(), 1);
        assert_eq!(root.tabs[1].len(), 1);
    }

    #[test]
    fn test_deleting_last_tab_quits() {
        let (mut root, mut session) = setup();
        root.apply(TabRequest::New, &mut session, (80, 24)).expect("new tab");
        root.apply(TabRequest::Select(1), &mut session, (80, 24)).expect("select");
        root.apply(TabRequest::Delete, &mut session, (80, 24)).expect("delete");
        assert_eq!(root.len(), 1);
        assert_eq!(root.cur, 0);
        assert_eq!(root.state, RootState::Default);
        root.apply(TabRequest::Delete, &mut session, (80, 24)).expect("delete");
        assert!(root.is_quit());
    }

    #[test]
    fn test_switch_fits_tab_to_canvas() {
        let (mut root, mut session) = setup();
        root.apply(TabRequest::New, &mut session, (80, 24)).expect("new tab");
        root.apply(TabRequest::Next, &mut session, (100, 30)).expect("switch");
        assert_eq!(root.current().canvas_size(), Canvas::new(100, 30));
        root.apply(TabRequest::Prev, &mut session, (100, 30)).expect("switch");
        let tab = root.current();
        assert_eq!(tab.canvas_size(), Canvas::new(100, 30));
        assert!(covers_canvas(&tab.arena.tiles(), Canvas::new(100, 30)));
    }

    #[test]
    fn test_tab_limit() {
        let (mut root, mut session) = setup();
        root.limit = 1;
        let err = root.apply(TabRequest::New, &mut session, (80, 24));
        assert!(matches!(err, Err(PanelsError::TabLimit { limit: 1 })));
    }

    #[test]
    fn test_tab_strip_labels() {
        let (mut root, mut session) = setup();
        root.apply(TabRequest::Name("main".into()), &mut session, (80, 24))
            .expect("rename");
        root.apply(TabRequest::New, &mut session, (80, 24)).expect("new tab");
        assert_eq!(root.tab_strip().text(), "Tab [main]  2  ");
    }
}
