//! The "almighty" list of everything a panel can become
//!
//! The list is a sorted registry owned by the tab. The modal only keeps its
//! own geometry, the selected row and the first visible row.

use crate::layout::{Canvas, Pos};
use crate::panel::CommandTable;
use std::collections::BTreeMap;

pub const MODAL_W: i32 = 40;
pub const MODAL_H: i32 = 20;

pub const SEARCH_STRINGS_DATA: &str = "Search strings in data sections";
pub const SEARCH_STRINGS_BIN: &str = "Search strings in the whole bin";
pub const CREATE_NEW: &str = "Create New";
pub const PUT_BREAKPOINTS: &str = "Put Breakpoints";
pub const CONTINUE: &str = "Continue";
pub const STEP: &str = "Step";
pub const STEP_OVER: &str = "Step Over";

/// What picking an entry does
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Almighty {
    /// Panel running the command-table entry of this title
    Panel(String),
    /// Prompt for a keyword and grep strings with `template`
    SearchStrings {
        prompt: &'static str,
        template: &'static str,
    },
    /// Prompt for a title and a command
    CreateNew,
    PutBreakpoints,
    Continue,
    Step,
    StepOver,
}

pub type Registry = BTreeMap<String, Almighty>;

/// Every title of `commands` plus the fixed entries
pub fn registry(commands: &CommandTable, debug: bool) -> Registry {
    let mut reg: Registry = commands
        .titles()
        .into_iter()
        .map(|t| (t.to_string(), Almighty::Panel(t.to_string())))
        .collect();
    reg.insert(
        SEARCH_STRINGS_DATA.to_string(),
        Almighty::SearchStrings {
            prompt: "search strings in data sections: ",
            template: "izq~{}",
        },
    );
    reg.insert(
        SEARCH_STRINGS_BIN.to_string(),
        Almighty::SearchStrings {
            prompt: "search strings in the whole binary: ",
            template: "izzq~{}",
        },
    );
    reg.insert(CREATE_NEW.to_string(), Almighty::CreateNew);
    if debug {
        reg.insert(PUT_BREAKPOINTS.to_string(), Almighty::PutBreakpoints);
        reg.insert(CONTINUE.to_string(), Almighty::Continue);
        reg.insert(STEP.to_string(), Almighty::Step);
        reg.insert(STEP_OVER.to_string(), Almighty::StepOver);
    }
    reg
}

/// How the chosen entry is placed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Vertical,
    Horizontal,
    Replace,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalStep {
    Stay,
    Pick(String, Placement),
    /// Remove this entry from the registry
    Remove(String),
    Close,
}

#[derive(Debug, Clone)]
pub struct Modal {
    pub pos: Pos,
    pub idx: usize,
    pub offset: usize,
    pub dirty: bool,
}

impl Modal {
    /// Centered on the canvas, shrunk to fit
    pub fn new(canvas: Canvas) -> Self {
        let w = MODAL_W.min(canvas.w);
        let h = MODAL_H.min(canvas.h);
        Modal {
            pos: Pos::new((canvas.w - w) / 2, (canvas.h - h) / 2, w, h),
            idx: 0,
            offset: 0,
            dirty: true,
        }
    }

    /// Rows available for entries
    pub fn rows(&self) -> usize {
        (self.pos.h - 2).max(1) as usize
    }

    /// Keep the selected row inside the visible window
    fn update(&mut self, len: usize) {
        if len == 0 {
            self.idx = 0;
            self.offset = 0;
            return;
        }
        self.idx = self.idx.min(len - 1);
        let rows = self.rows();
        if self.idx >= self.offset + rows {
            self.offset = self.idx + 1 - rows;
        }
        if self.idx < self.offset {
            self.offset = self.idx;
        }
        self.dirty = true;
    }

    pub fn handle(&mut self, key: char, registry: &Registry) -> ModalStep {
        let len = registry.len();
        let selected = registry.keys().nth(self.idx).cloned();
        match key {
            'j' => {
                if len > 0 {
                    self.idx = (self.idx + 1) % len;
                    self.update(len);
                }
                ModalStep::Stay
            }
            'k' => {
                if len > 0 {
                    self.idx = if self.idx == 0 { len - 1 } else { self.idx - 1 };
                    self.update(len);
                }
                ModalStep::Stay
            }
            'v' => selected.map_or(ModalStep::Stay, |n| ModalStep::Pick(n, Placement::Vertical)),
            'h' => selected.map_or(ModalStep::Stay, |n| ModalStep::Pick(n, Placement::Horizontal)),
            '\n' => selected.map_or(ModalStep::Stay, |n| ModalStep::Pick(n, Placement::Replace)),
            '-' => match selected {
                Some(name) => {
                    self.update(len.saturating_sub(1));
                    ModalStep::Remove(name)
                }
                None => ModalStep::Stay,
            },
            'q' | '"' => ModalStep::Close,
            _ => ModalStep::Stay,
        }
    }

    /// Entries in the visible window, with whether each is selected
    pub fn visible<'a>(&self, registry: &'a Registry) -> Vec<(&'a str, bool)> {
        registry
            .keys()
            .enumerate()
            .skip(self.offset)
            .take(self.rows())
            .map(|(i, name)| (name.as_str(), i == self.idx))
            .collect()
    }
}
