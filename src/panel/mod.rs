//! A single panel: what it shows ([`Model`]) and where ([`View`])
//!
//! The model travels when panels are swapped or rotated; the view stays with
//! its screen slot.
//!
//! - [`kind`]: content classification, rotations, command table
//! - [`arena`]: panel storage with stable handles
//! - [`scroll`]: arrow-key handlers per kind
//! - [`content`]: text production and cache resolution

pub mod arena;
pub mod content;
pub mod kind;
pub mod scroll;

pub use arena::{PanelArena, PanelId};
pub use kind::{CommandTable, ContentKind, Rotation};

use crate::layout::{EdgeFlags, Pos};

/// Content side of a panel
#[derive(Debug, Clone, Default)]
pub struct Model {
    pub title: String,
    pub cmd: String,
    pub kind: ContentKind,
    /// Whether cached text may be reused instead of re-running the command
    pub cache: bool,
    /// Last produced text
    pub cached: Option<String>,
    /// Fixed text that replaces command output entirely
    pub read_only: Option<String>,
    /// Keywords appended as `~kw` to the command
    pub filters: Vec<String>,
    pub addr: u64,
    /// Stack base the address was anchored to
    pub base_addr: u64,
    /// Function containing the shared offset when last printed
    pub func_name: Option<String>,
    pub rotate: usize,
    pub rotation: Option<Rotation>,
}

impl Model {
    /// Build a model, filling whichever of title/command is missing.
    pub fn new(title: &str, cmd: &str, cache: bool) -> Self {
        let title = if title.is_empty() { cmd } else { title };
        Model {
            title: title.to_string(),
            cmd: cmd.to_string(),
            kind: ContentKind::classify(cmd),
            cache,
            rotation: kind::rotation_for(cmd),
            ..Model::default()
        }
    }

    /// Change the command and everything derived from it
    pub fn set_cmd(&mut self, cmd: String) {
        self.kind = ContentKind::classify(&cmd);
        self.rotation = kind::rotation_for(&cmd);
        self.cmd = cmd;
        self.cached = None;
    }

    /// Command with filters applied
    pub fn filtered_cmd(&self) -> String {
        let mut cmd = self.cmd.clone();
        for filter in &self.filters {
            cmd.push('~');
            cmd.push_str(filter);
        }
        cmd
    }

    /// Cached text, when caching is on and something was produced
    pub fn usable_cache(&self) -> Option<&str> {
        if self.cache {
            self.cached.as_deref()
        } else {
            None
        }
    }

    pub fn is_help(&self) -> bool {
        self.kind.is_help()
    }
}

/// Screen side of a panel
#[derive(Debug, Clone, Default)]
pub struct View {
    pub pos: Pos,
    /// Geometry saved while zoomed
    pub prev_pos: Pos,
    pub sx: i32,
    pub sy: i32,
    /// Row cursor for listing panels, saved cursor for byte panels
    pub curpos: i32,
    /// Needs repainting
    pub refresh: bool,
    pub edges: EdgeFlags,
    /// Text painted last, reused when only decorations change
    pub text: String,
}

#[derive(Debug, Clone, Default)]
pub struct Panel {
    pub model: Model,
    pub view: View,
}

impl Panel {
    pub fn new(title: &str, cmd: &str, cache: bool) -> Self {
        Panel {
            model: Model::new(title, cmd, cache),
            view: View {
                refresh: true,
                ..View::default()
            },
        }
    }

    /// Read-only help panel
    pub fn help(title: &str, text: String) -> Self {
        let mut panel = Panel::new(title, title, false);
        panel.model.read_only = Some(text);
        panel
    }

    pub fn reset_scroll(&mut self) {
        self.view.sx = 0;
        self.view.sy = 0;
    }

    /// Effective arrow-key behaviour. Graphs always pan; cached or
    /// read-only text scrolls plainly.
    pub fn scroller(&self) -> Option<kind::Scroller> {
        let scroller = self.model.kind.scroller()?;
        if scroller == kind::Scroller::Graph {
            return Some(scroller);
        }
        if self.model.usable_cache().is_some() || self.model.read_only.is_some() {
            return Some(kind::Scroller::Default);
        }
        Some(scroller)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panel::kind::Scroller;

    #[test]
    fn test_title_falls_back_to_command() {
        let model = Model::new("", "afl", false);
        assert_eq!(model.title, "afl");
        assert_eq!(model.kind, ContentKind::Listing);
    }

    #[test]
    fn test_filtered_cmd() {
        let mut model = Model::new("Functions", "afl", false);
        model.filters.push("main".into());
        model.filters.push("sym".into());
        assert_eq!(model.filtered_cmd(), "afl~main~sym");
    }

    #[test]
    fn test_cached_panel_scrolls_plainly() {
        let mut panel = Panel::new("Disassembly", "pd", true);
        assert_eq!(panel.scroller(), Some(Scroller::Disassembly));
        panel.model.cached = Some("text".into());
        assert_eq!(panel.scroller(), Some(Scroller::Default));
        panel.model.cache = false;
        assert_eq!(panel.scroller(), Some(Scroller::Disassembly));
    }

    #[test]
    fn test_empty_panel_has_no_scroller() {
        assert_eq!(Panel::new("", "", false).scroller(), None);
    }
}
