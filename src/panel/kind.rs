//! Content kinds and the title → command table
//!
//! A panel's kind is derived from its command once, when the panel is created
//! or its command changes, and decides how it scrolls, prints and rotates.

use rustc_hash::FxHashMap;

pub const CMD_SYMBOLS: &str = "isq";
pub const CMD_STACK: &str = "px";
pub const CMD_REGISTERS: &str = "dr";
pub const CMD_DISASSEMBLY: &str = "pd";
pub const CMD_DECOMPILER: &str = "pdc";
pub const CMD_GRAPH: &str = "agf";
pub const CMD_HEXDUMP: &str = "xc";
pub const CMD_FUNCTIONS: &str = "afl";
pub const CMD_BREAKPOINTS: &str = "db";
pub const CMD_CONSOLE: &str = "$console";

pub const TITLE_STRINGS_DATA: &str = "Strings in data sections";
pub const TITLE_STRINGS_BIN: &str = "Strings in the whole bin";

/// Suffix marking a read-only help panel's command
pub const HELP_SUFFIX: &str = "Help";

/// What a panel shows, as far as the engine cares
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ContentKind {
    /// No command at all
    #[default]
    Empty,
    /// Any command without special handling
    Plain,
    Stack,
    Registers,
    Disassembly,
    Decompiler,
    Hexdump,
    Graph,
    /// Line-oriented listings with a row cursor (symbols, functions, strings,
    /// breakpoints)
    Listing,
    Console,
    Help,
}

/// How arrow keys act on a panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scroller {
    Default,
    Graph,
    Stack,
    Registers,
    Disassembly,
    Hexdump,
    Listing,
}

/// How a panel's text is produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Printer {
    /// Cached text when allowed, otherwise the filtered command
    Default,
    /// Like `Default` but always caches the result
    Cached,
    /// Command plus visible line count, at the panel address
    Disassembly,
    /// Command plus signed stack delta
    Stack,
    /// Command at the panel address
    Hexdump,
    /// Text owned by the engine (help, console log)
    Fixed,
}

impl ContentKind {
    pub fn classify(cmd: &str) -> ContentKind {
        if cmd.is_empty() {
            return ContentKind::Empty;
        }
        if cmd.ends_with(HELP_SUFFIX) {
            return ContentKind::Help;
        }
        if cmd.starts_with(CMD_CONSOLE) {
            return ContentKind::Console;
        }
        if cmd.starts_with(CMD_GRAPH) {
            return ContentKind::Graph;
        }
        if cmd.starts_with(CMD_DECOMPILER) {
            return ContentKind::Decompiler;
        }
        if cmd.starts_with(CMD_DISASSEMBLY) {
            return ContentKind::Disassembly;
        }
        if cmd.starts_with(CMD_STACK) {
            return ContentKind::Stack;
        }
        if cmd.starts_with(CMD_REGISTERS) {
            return ContentKind::Registers;
        }
        if cmd.starts_with(CMD_HEXDUMP) {
            return ContentKind::Hexdump;
        }
        let listings = [CMD_SYMBOLS, CMD_FUNCTIONS, "izq", "izzq", CMD_BREAKPOINTS];
        if listings.iter().any(|p| cmd.starts_with(p)) {
            return ContentKind::Listing;
        }
        ContentKind::Plain
    }

    /// Scrolling behaviour; `None` means arrow keys do nothing
    pub fn scroller(self) -> Option<Scroller> {
        match self {
            ContentKind::Empty => None,
            ContentKind::Graph => Some(Scroller::Graph),
            ContentKind::Stack => Some(Scroller::Stack),
            ContentKind::Registers => Some(Scroller::Registers),
            ContentKind::Disassembly => Some(Scroller::Disassembly),
            ContentKind::Hexdump => Some(Scroller::Hexdump),
            ContentKind::Listing => Some(Scroller::Listing),
            ContentKind::Plain | ContentKind::Decompiler | ContentKind::Console | ContentKind::Help => {
                Some(Scroller::Default)
            }
        }
    }

    pub fn printer(self) -> Printer {
        match self {
            ContentKind::Disassembly => Printer::Disassembly,
            ContentKind::Stack => Printer::Stack,
            ContentKind::Hexdump => Printer::Hexdump,
            ContentKind::Decompiler | ContentKind::Graph => Printer::Cached,
            ContentKind::Console | ContentKind::Help => Printer::Fixed,
            _ => Printer::Default,
        }
    }

    /// Kinds whose cursor moves through bytes
    pub fn has_byte_cursor(self) -> bool {
        matches!(
            self,
            ContentKind::Stack | ContentKind::Registers | ContentKind::Disassembly | ContentKind::Hexdump
        )
    }

    /// Kinds whose cursor moves through rows
    pub fn has_row_cursor(self) -> bool {
        self == ContentKind::Listing
    }

    pub fn is_help(self) -> bool {
        self == ContentKind::Help
    }
}

/// Alternate-command cycle attached to a panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rotation {
    /// Disassembly display modes, handled by the executor
    DisasmMode,
    /// Replace the suffix following `prefix`
    Suffixes {
        prefix: &'static str,
        suffixes: &'static [&'static str],
    },
}

pub const DISASM_MODES: usize = 5;

const ENTROPY_ROTATE: &[&str] = &["", "2", "b", "c", "d", "e", "F", "i", "j", "m", "p", "s", "z", "0"];
const HEXDUMP_ROTATE: &[&str] = &["", "a", "r", "b", "h", "w", "q", "d", "r"];
const REGISTER_ROTATE: &[&str] = &["", "=", "r", "??", "C", "i", "o"];
const FUNCTION_ROTATE: &[&str] = &["l", "i", "x"];

/// First rotation whose key prefixes `cmd`
pub fn rotation_for(cmd: &str) -> Option<Rotation> {
    if cmd.starts_with(CMD_DISASSEMBLY) && cmd != CMD_DECOMPILER {
        return Some(Rotation::DisasmMode);
    }
    let table: [(&'static str, &'static [&'static str]); 5] = [
        ("p==", ENTROPY_ROTATE),
        ("p=", ENTROPY_ROTATE),
        ("px", HEXDUMP_ROTATE),
        ("dr", REGISTER_ROTATE),
        ("af", FUNCTION_ROTATE),
    ];
    table
        .iter()
        .find(|(prefix, _)| cmd.starts_with(prefix))
        .map(|&(prefix, suffixes)| Rotation::Suffixes { prefix, suffixes })
}

/// Swap the suffix between `prefix` and the next space for `suffix`.
///
/// `"px 256@r:SP"` with `"px"`/`"a"` becomes `"pxa 256@r:SP"`; a command
/// with no space after the prefix is replaced outright.
pub fn rotate_command(cmd: &str, prefix: &str, suffix: &str) -> String {
    let replacement = format!("{}{}", prefix, suffix);
    if let Some(start) = cmd.find(prefix) {
        let rest = &cmd[start + prefix.len()..];
        if let Some(space) = rest.find(' ') {
            let old = format!("{}{}", prefix, &rest[..space]);
            return cmd.replacen(&old, &replacement, 1);
        }
    }
    replacement
}

/// Title → command registry shared by menus, the almighty list and layouts
#[derive(Debug, Clone)]
pub struct CommandTable {
    entries: FxHashMap<String, String>,
}

const DEFAULT_COMMANDS: &[(&str, &str)] = &[
    ("Symbols", CMD_SYMBOLS),
    ("Stack", "px 256@r:SP"),
    ("Locals", "afvd"),
    ("Registers", CMD_REGISTERS),
    ("RegisterRefs", "drr"),
    ("Disassembly", CMD_DISASSEMBLY),
    ("Decompiler", CMD_DECOMPILER),
    ("Graph", CMD_GRAPH),
    ("Info", "i"),
    ("Database", "k ***"),
    ("Console", CMD_CONSOLE),
    ("Hexdump", CMD_HEXDUMP),
    ("Functions", CMD_FUNCTIONS),
    ("Comments", "CC"),
    ("Entropy", "p=e"),
    ("Entropy Fire", "p==e"),
    ("DRX", "drx"),
    ("Sections", "iSq"),
    (TITLE_STRINGS_DATA, "izq"),
    (TITLE_STRINGS_BIN, "izzq"),
    ("Maps", "dm"),
    ("Modules", "dmm"),
    ("Backtrace", "dbt"),
    ("Breakpoints", CMD_BREAKPOINTS),
    ("Imports", "iiq"),
    ("Clipboard", "yx"),
    ("New", "o"),
    ("Var READ address", "afvR"),
    ("Var WRITE address", "afvW"),
    ("Summary", "pdsf"),
];

impl Default for CommandTable {
    fn default() -> Self {
        let entries = DEFAULT_COMMANDS
            .iter()
            .map(|&(title, cmd)| (title.to_string(), cmd.to_string()))
            .collect();
        CommandTable { entries }
    }
}

impl CommandTable {
    /// Defaults with user entries layered on top
    pub fn with_overrides<'a>(overrides: impl IntoIterator<Item = (&'a String, &'a String)>) -> Self {
        let mut table = CommandTable::default();
        for (title, cmd) in overrides {
            table.entries.insert(title.clone(), cmd.clone());
        }
        table
    }

    pub fn get(&self, title: &str) -> Option<&str> {
        self.entries.get(title).map(String::as_str)
    }

    /// Titles in sorted order
    pub fn titles(&self) -> Vec<&str> {
        let mut titles: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        titles.sort_unstable();
        titles
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(ContentKind::classify(""), ContentKind::Empty);
        assert_eq!(ContentKind::classify("pd"), ContentKind::Disassembly);
        assert_eq!(ContentKind::classify("pdsf"), ContentKind::Disassembly);
        assert_eq!(ContentKind::classify("pdc"), ContentKind::Decompiler);
        assert_eq!(ContentKind::classify("px 256@r:SP"), ContentKind::Stack);
        assert_eq!(ContentKind::classify("dr="), ContentKind::Registers);
        assert_eq!(ContentKind::classify("afl"), ContentKind::Listing);
        assert_eq!(ContentKind::classify("Window Mode Help"), ContentKind::Help);
        assert_eq!(ContentKind::classify("iSq"), ContentKind::Plain);
    }

    #[test]
    fn test_rotation_lookup_prefers_longer_entropy_key() {
        match rotation_for("p==e") {
            Some(Rotation::Suffixes { prefix, .. }) => assert_eq!(prefix, "p=="),
            other => panic!("unexpected rotation {:?}", other),
        }
        assert_eq!(rotation_for("pd"), Some(Rotation::DisasmMode));
        assert_eq!(rotation_for("pdc"), None);
        assert_eq!(rotation_for("isq"), None);
    }

    #[test]
    fn test_rotate_command() {
        assert_eq!(rotate_command("px 256@r:SP", "px", "a"), "pxa 256@r:SP");
        assert_eq!(rotate_command("pxa 256@r:SP", "px", "r"), "pxr 256@r:SP");
        assert_eq!(rotate_command("dr", "dr", "="), "dr=");
        assert_eq!(rotate_command("afl", "af", "i"), "afi");
    }

    #[test]
    fn test_command_table_overrides() {
        let mut extra = std::collections::BTreeMap::new();
        extra.insert("Stack".to_string(), "px 512@r:SP".to_string());
        extra.insert("Notes".to_string(), "cat notes".to_string());
        let table = CommandTable::with_overrides(&extra);
        assert_eq!(table.get("Stack"), Some("px 512@r:SP"));
        assert_eq!(table.get("Notes"), Some("cat notes"));
        assert_eq!(table.get("Disassembly"), Some("pd"));
        let titles = table.titles();
        assert!(titles.windows(2).all(|w| w[0] <= w[1]));
    }
}
