//! The top menu bar and its popups
//!
//! The tree is owned: every node owns its children and remembers which one
//! is selected. Open popups are described by a depth: level 0 is the bar,
//! level `n` is the child selected at level `n - 1`. Popup geometry lives
//! beside the tree, indexed by level, together with the levels that need
//! repainting since the last full redraw.

use crate::layout::Pos;
use unicode_width::UnicodeWidthStr;

/// What a leaf does when invoked
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuAction {
    /// Side panel with the command-table entry of this title
    AddPanel(&'static str),
    /// Ask for an argument and add a side panel running the formatted command
    PromptPanel {
        prompt: &'static str,
        template: &'static str,
    },
    /// Ask for an argument and run the formatted command
    PromptRun {
        prompt: &'static str,
        template: &'static str,
    },
    /// Run a command and refresh everything
    Run(&'static str),
    /// Run a command and show its output on the status line
    ShowOutput(&'static str),
    Message(&'static str),
    Version,
    SaveLayout,
    LoadSavedLayout,
    LoadDefaultLayout,
    Quit,
    IoCache(bool),
    Theme(String),
    Calculator,
    CommandPrompt,
    Breakpoint,
    Continue,
    Step,
    StepOver,
    ToggleHelp,
}

#[derive(Debug, Clone, Default)]
pub struct MenuNode {
    pub name: String,
    pub children: Vec<MenuNode>,
    pub selected: usize,
    pub action: Option<MenuAction>,
}

impl MenuNode {
    fn leaf(name: &str, action: MenuAction) -> Self {
        MenuNode {
            name: name.to_string(),
            action: Some(action),
            ..MenuNode::default()
        }
    }

    fn sub(name: &str, children: Vec<MenuNode>) -> Self {
        MenuNode {
            name: name.to_string(),
            children,
            ..MenuNode::default()
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn selected_child(&self) -> Option<&MenuNode> {
        self.children.get(self.selected)
    }
}

/// Outcome of a key in menu mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuStep {
    /// Only popups changed
    Stay,
    /// A popup closed or moved: panels under it need repainting
    Redraw,
    Invoke(MenuAction),
    /// Leave menu mode
    Leave,
    /// Not a menu key
    Unhandled,
}

#[derive(Debug, Clone)]
pub struct Menu {
    pub root: MenuNode,
    /// Number of levels shown, the bar included
    pub depth: usize,
    popups: Vec<Pos>,
    dirty: Vec<usize>,
}

const STRINGS_DATA: &str = "Strings in data sections";
const STRINGS_BIN: &str = "Strings in the whole bin";

fn file_menu() -> MenuNode {
    use MenuAction::*;
    MenuNode::sub(
        "File",
        vec![
            MenuNode::leaf("New", AddPanel("New")),
            MenuNode::leaf(
                "Open",
                PromptPanel {
                    prompt: "open file: ",
                    template: "o {}",
                },
            ),
            MenuNode::sub(
                "ReOpen",
                vec![
                    MenuNode::leaf("In RW", Run("oo+")),
                    MenuNode::leaf("In Debugger", Run("ood")),
                ],
            ),
            MenuNode::leaf("Close", Run("o-*")),
            MenuNode::leaf("Sections", AddPanel("Sections")),
            MenuNode::leaf(STRINGS_DATA, AddPanel(STRINGS_DATA)),
            MenuNode::leaf(STRINGS_BIN, AddPanel(STRINGS_BIN)),
            MenuNode::leaf("Symbols", AddPanel("Symbols")),
            MenuNode::leaf("Imports", AddPanel("Imports")),
            MenuNode::leaf("Info", AddPanel("Info")),
            MenuNode::leaf("Database", AddPanel("Database")),
            MenuNode::leaf("Save Layout", SaveLayout),
            MenuNode::sub(
                "Load Layout",
                vec![
                    MenuNode::leaf("Saved", LoadSavedLayout),
                    MenuNode::leaf("Default", LoadDefaultLayout),
                ],
            ),
            MenuNode::leaf("Quit", Quit),
        ],
    )
}

fn edit_menu(themes: &[String]) -> MenuNode {
    use MenuAction::*;
    let colors = themes
        .iter()
        .map(|t| MenuNode::leaf(t, Theme(t.clone())))
        .collect();
    MenuNode::sub(
        "Edit",
        vec![
            MenuNode::leaf(
                "Copy",
                PromptPanel {
                    prompt: "How many bytes? ",
                    template: "\"y {}\"",
                },
            ),
            MenuNode::leaf("Paste", Run("yy")),
            MenuNode::leaf("Clipboard", AddPanel("Clipboard")),
            MenuNode::leaf(
                "Write String",
                PromptPanel {
                    prompt: "insert string: ",
                    template: "\"w {}\"",
                },
            ),
            MenuNode::leaf(
                "Write Hex",
                PromptPanel {
                    prompt: "insert hexpairs: ",
                    template: "\"wx {}\"",
                },
            ),
            MenuNode::leaf(
                "Write Value",
                PromptRun {
                    prompt: "insert number: ",
                    template: "\"wv {}\"",
                },
            ),
            MenuNode::leaf(
                "Assemble",
                PromptRun {
                    prompt: "assemble: ",
                    template: "\"wa {}\"",
                },
            ),
            MenuNode::leaf(
                "Fill",
                PromptPanel {
                    prompt: "Fill with: ",
                    template: "wow {}",
                },
            ),
            MenuNode::sub(
                "io.cache",
                vec![
                    MenuNode::leaf("On", IoCache(true)),
                    MenuNode::leaf("Off", IoCache(false)),
                ],
            ),
            MenuNode::sub("Colors", colors),
        ],
    )
}

fn view_menu() -> MenuNode {
    let titles = [
        "Console",
        "Hexdump",
        "Disassembly",
        "Decompiler",
        "Graph",
        "Functions",
        "Breakpoints",
        "Comments",
        "Entropy",
        "Entropy Fire",
        "Stack",
        "Var READ address",
        "Var WRITE address",
        "Summary",
    ];
    MenuNode::sub(
        "View",
        titles
            .iter()
            .map(|&t| MenuNode::leaf(t, MenuAction::AddPanel(t)))
            .collect(),
    )
}

fn search_menu() -> MenuNode {
    let prompt = |name: &str, prompt: &'static str, template: &'static str| {
        MenuNode::leaf(name, MenuAction::PromptPanel { prompt, template })
    };
    MenuNode::sub(
        "Search",
        vec![
            prompt(
                "String (Whole Bin)",
                "search strings in the whole binary: ",
                "izzq~{}",
            ),
            prompt(
                "String (Data Sections)",
                "search string in data sections: ",
                "izq~{}",
            ),
            prompt("ROP", "rop grep: ", "\"/R {}\""),
            prompt("Code", "search code: ", "\"/c {}\""),
            prompt("Hexpairs", "search hexpairs: ", "\"/x {}\""),
        ],
    )
}

fn debug_menu() -> MenuNode {
    use MenuAction::*;
    MenuNode::sub(
        "Debug",
        vec![
            MenuNode::leaf("Registers", AddPanel("Registers")),
            MenuNode::leaf("RegisterRefs", AddPanel("RegisterRefs")),
            MenuNode::leaf("DRX", AddPanel("DRX")),
            MenuNode::leaf("Breakpoints", Breakpoint),
            MenuNode::leaf(
                "Watchpoints",
                PromptRun {
                    prompt: "addr <r/w/rw>: ",
                    template: "dbw {}",
                },
            ),
            MenuNode::leaf("Maps", AddPanel("Maps")),
            MenuNode::leaf("Modules", AddPanel("Modules")),
            MenuNode::leaf("Backtrace", AddPanel("Backtrace")),
            MenuNode::leaf("Locals", AddPanel("Locals")),
            MenuNode::leaf("Continue", Continue),
            MenuNode::leaf("Step", Step),
            MenuNode::leaf("Step Over", StepOver),
            MenuNode::leaf("Reload", Run("ood")),
        ],
    )
}

fn analyze_menu() -> MenuNode {
    let entries = [
        ("Function", "af"),
        ("Symbols", "aa"),
        ("Program", "aaa"),
        ("BasicBlocks", "aab"),
        ("Calls", "aac"),
        ("References", "aar"),
    ];
    MenuNode::sub(
        "Analyze",
        entries
            .iter()
            .map(|&(name, cmd)| MenuNode::leaf(name, MenuAction::Run(cmd)))
            .collect(),
    )
}

const LICENSE: &str = "panedeck is distributed under the MIT license";

impl Menu {
    /// Build the menu. `themes` fills the Colors submenu.
    pub fn new(themes: &[String]) -> Self {
        use MenuAction::*;
        let root = MenuNode::sub(
            "",
            vec![
                file_menu(),
                edit_menu(themes),
                view_menu(),
                MenuNode::sub(
                    "Tools",
                    vec![
                        MenuNode::leaf("Calculator", Calculator),
                        MenuNode::leaf("Command Prompt", CommandPrompt),
                    ],
                ),
                search_menu(),
                debug_menu(),
                analyze_menu(),
                MenuNode::sub("Fun", vec![MenuNode::leaf("Fortune", ShowOutput("fo"))]),
                MenuNode::sub(
                    "About",
                    vec![
                        MenuNode::leaf("License", Message(LICENSE)),
                        MenuNode::leaf("Version", Version),
                    ],
                ),
                MenuNode::sub("Help", vec![MenuNode::leaf("Toggle Help", ToggleHelp)]),
            ],
        );
        Menu {
            root,
            depth: 1,
            popups: Vec::new(),
            dirty: Vec::new(),
        }
    }

    /// Node shown at `level`; level 0 is the bar
    pub fn node(&self, level: usize) -> &MenuNode {
        let mut node = &self.root;
        for _ in 0..level {
            match node.selected_child() {
                Some(child) => node = child,
                None => break,
            }
        }
        node
    }

    fn node_mut(&mut self, level: usize) -> &mut MenuNode {
        let mut node = &mut self.root;
        for _ in 0..level {
            if node.selected >= node.children.len() {
                break;
            }
            let selected = node.selected;
            node = &mut node.children[selected];
        }
        node
    }

    /// Node whose children are currently navigated
    pub fn current(&self) -> &MenuNode {
        self.node(self.depth - 1)
    }

    /// Back to the bar with nothing open
    pub fn reset(&mut self) {
        self.depth = 1;
        self.popups.clear();
        self.dirty.clear();
    }

    /// Column where a top-level label starts in the title bar
    pub fn label_x(&self, index: usize) -> i32 {
        2 + self
            .root
            .children
            .iter()
            .take(index)
            .map(|c| c.name.width() as i32 + 2)
            .sum::<i32>()
    }

    /// Open the selected child of the current node as a new popup
    fn open(&mut self) {
        let level = self.depth;
        let parent = self.node(level - 1);
        let Some(child) = parent.selected_child() else {
            return;
        };
        if child.is_leaf() {
            return;
        }
        let maxw = child
            .children
            .iter()
            .map(|c| c.name.width() as i32)
            .max()
            .unwrap_or(0);
        let (w, h) = (maxw + 4, child.children.len() as i32 + 2);
        let pos = if level == 1 {
            Pos::new(self.label_x(self.root.selected), 1, w, h)
        } else {
            let above = self.popups[level - 2];
            Pos::new(above.x + above.w - 1, above.y + parent.selected as i32, w, h)
        };
        self.popups.push(pos);
        self.depth += 1;
        self.dirty.push(level);
    }

    fn close(&mut self) {
        if self.depth > 1 {
            self.depth -= 1;
            self.popups.truncate(self.depth - 1);
        }
    }

    fn step_root(&mut self, forward: bool) -> bool {
        let n = self.root.children.len();
        if n == 0 {
            return false;
        }
        let sel = self.root.selected;
        let (next, wrapped) = if forward {
            ((sel + 1) % n, sel + 1 == n)
        } else if sel == 0 {
            (n - 1, true)
        } else {
            (sel - 1, false)
        };
        self.root.selected = next;
        wrapped
    }

    /// Move to another top-level entry and open it
    fn reopen_root(&mut self, forward: bool) {
        self.step_root(forward);
        self.reset();
        self.open();
    }

    /// Handle one key (arrows already folded into `hjkl`)
    pub fn handle(&mut self, key: char) -> MenuStep {
        match key {
            'h' => {
                if self.depth > 2 {
                    self.close();
                } else if self.depth == 2 {
                    self.reopen_root(false);
                } else if self.step_root(false) {
                    self.open();
                }
                MenuStep::Redraw
            }
            'l' => {
                if self.depth == 1 {
                    if self.step_root(true) {
                        self.open();
                    }
                    return MenuStep::Redraw;
                }
                let opens = self.current().selected_child().is_some_and(|c| !c.is_leaf());
                if opens {
                    self.open();
                    MenuStep::Stay
                } else {
                    self.reopen_root(true);
                    MenuStep::Redraw
                }
            }
            'j' => {
                if self.depth == 1 {
                    self.open();
                    return MenuStep::Stay;
                }
                let level = self.depth - 1;
                let node = self.node_mut(level);
                if node.selected + 1 < node.children.len() {
                    node.selected += 1;
                    self.dirty.push(level);
                }
                MenuStep::Stay
            }
            'k' => {
                if self.depth < 2 {
                    return MenuStep::Stay;
                }
                let level = self.depth - 1;
                let node = self.node_mut(level);
                if node.selected > 0 {
                    node.selected -= 1;
                    self.dirty.push(level);
                    MenuStep::Stay
                } else if self.depth == 2 {
                    self.close();
                    MenuStep::Redraw
                } else {
                    MenuStep::Stay
                }
            }
            ' ' | '\n' => self.enter(),
            'q' | 'Q' | 'm' => self.back(),
            _ => MenuStep::Unhandled,
        }
    }

    /// Enter: open a submenu or invoke a leaf
    pub fn enter(&mut self) -> MenuStep {
        match self.current().selected_child() {
            Some(child) if !child.is_leaf() => {
                self.open();
                MenuStep::Stay
            }
            Some(child) => match child.action.clone() {
                Some(action) => {
                    self.reset();
                    MenuStep::Invoke(action)
                }
                None => MenuStep::Stay,
            },
            None => MenuStep::Stay,
        }
    }

    /// Escape: close one popup or leave the menu
    pub fn back(&mut self) -> MenuStep {
        if self.depth > 1 {
            self.close();
            MenuStep::Redraw
        } else {
            MenuStep::Leave
        }
    }

    /// Open popups with the node each one lists, outermost first
    pub fn popups(&self) -> impl Iterator<Item = (usize, Pos, &MenuNode)> + '_ {
        self.popups
            .iter()
            .enumerate()
            .map(move |(i, &pos)| (i + 1, pos, self.node(i + 1)))
    }

    /// Levels changed since the last call
    pub fn take_dirty(&mut self) -> Vec<usize> {
        let mut dirty = std::mem::take(&mut self.dirty);
        dirty.sort_unstable();
        dirty.dedup();
        dirty.retain(|&level| level < self.depth);
        dirty
    }

    pub fn mark_all_dirty(&mut self) {
        self.dirty = (1..self.depth).collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn menu() -> Menu {
        Menu::new(&["default".to_string(), "nord".to_string()])
    }

    #[test]
    fn test_right_on_last_item_wraps_and_opens() {
        let mut menu = menu();
        let last = menu.root.children.len() - 1;
        menu.root.selected = last;
        assert_eq!(menu.handle('l'), MenuStep::Redraw);
        assert_eq!(menu.root.selected, 0);
        assert_eq!(menu.depth, 2);
        assert_eq!(menu.current().name, "File");
    }

    #[test]
    fn test_left_on_first_item_wraps_and_opens() {
        let mut menu = menu();
        menu.handle('h');
        assert_eq!(menu.current().name, "Help");
        assert_eq!(menu.depth, 2);
    }

    #[test]
    fn test_plain_move_at_bar_does_not_open() {
        let mut menu = menu();
        menu.handle('l');
        assert_eq!(menu.root.selected, 1);
        assert_eq!(menu.depth, 1);
    }

    #[test]
    fn test_descend_and_invoke() {
        let mut menu = menu();
        menu.handle('j');
        assert_eq!(menu.depth, 2);
        for _ in 0..12 {
            menu.handle('j');
        }
        assert_eq!(menu.current().selected_child().map(|c| c.name.as_str()), Some("Load Layout"));
        assert_eq!(menu.handle('l'), MenuStep::Stay);
        assert_eq!(menu.depth, 3);
        menu.handle('j');
        assert_eq!(menu.enter(), MenuStep::Invoke(MenuAction::LoadDefaultLayout));
        assert_eq!(menu.depth, 1);
    }

    #[test]
    fn test_right_on_leaf_opens_next_top_level() {
        let mut menu = menu();
        menu.handle('j');
        assert_eq!(menu.handle('l'), MenuStep::Redraw);
        assert_eq!(menu.current().name, "Edit");
    }

    #[test]
    fn test_popup_geometry() {
        let mut menu = menu();
        menu.root.selected = 1;
        menu.handle('j');
        let (_, edit, _) = menu.popups().next().expect("edit popup");
        assert_eq!(edit.x, 2 + 4 + 2);
        assert_eq!(edit.y, 1);
        for _ in 0..9 {
            menu.handle('j');
        }
        menu.handle('l');
        let colors: Vec<_> = menu.popups().collect();
        assert_eq!(colors.len(), 2);
        assert_eq!(colors[1].1.x, edit.x + edit.w - 1);
        assert_eq!(colors[1].1.y, edit.y + 9);
        assert_eq!(colors[1].2.children.len(), 2);
    }

    #[test]
    fn test_edit_menu_assembles() {
        let mut menu = menu();
        let edit = &menu.root.children[1];
        let names: Vec<_> = edit.children.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(&names[5..8], ["Write Value", "Assemble", "Fill"]);
        menu.root.selected = 1;
        menu.handle('j');
        for _ in 0..6 {
            menu.handle('j');
        }
        assert_eq!(
            menu.enter(),
            MenuStep::Invoke(MenuAction::PromptRun {
                prompt: "assemble: ",
                template: "\"wa {}\"",
            })
        );
    }

    #[test]
    fn test_back_closes_then_leaves() {
        let mut menu = menu();
        menu.handle('j');
        assert_eq!(menu.back(), MenuStep::Redraw);
        assert_eq!(menu.back(), MenuStep::Leave);
    }

    #[test]
    fn test_dirty_levels() {
        let mut menu = menu();
        menu.handle('j');
        menu.handle('j');
        menu.handle('j');
        assert_eq!(menu.take_dirty(), vec![1]);
        assert!(menu.take_dirty().is_empty());
    }
}
