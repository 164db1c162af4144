//! State shared by every tab: the executor, cursor, seek history and the
//! handful of display settings that are global rather than per panel.

use crate::config::Config;
use crate::executor::Executor;
use tracing::debug;

const SEEK_HISTORY_LIMIT: usize = 64;

/// Byte or row cursor shared by all panels
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor {
    pub enabled: bool,
    pub cur: i64,
}

/// Undo/redo stacks for the shared offset
#[derive(Debug, Default)]
pub struct SeekHistory {
    undo: Vec<u64>,
    redo: Vec<u64>,
}

impl SeekHistory {
    pub fn record(&mut self, from: u64) {
        if self.undo.last() != Some(&from) {
            self.undo.push(from);
            if self.undo.len() > SEEK_HISTORY_LIMIT {
                self.undo.remove(0);
            }
        }
        self.redo.clear();
    }

    pub fn undo(&mut self, current: u64) -> Option<u64> {
        let addr = self.undo.pop()?;
        self.redo.push(current);
        Some(addr)
    }

    pub fn redo(&mut self, current: u64) -> Option<u64> {
        let addr = self.redo.pop()?;
        self.undo.push(current);
        Some(addr)
    }
}

pub struct Session {
    pub executor: Box<dyn Executor>,
    pub config: Config,
    pub cursor: Cursor,
    /// Offset of stack panels below the stack base
    pub stack_delta: i64,
    pub hex_cols: i64,
    /// 0 monochrome, 1 theme colors, 2 theme colors with emphasis
    pub color: u8,
    pub theme: String,
    pub io_cache: bool,
    pub history: SeekHistory,
    /// Text of `$console` panels
    pub console_log: String,
}

impl Session {
    pub fn new(executor: Box<dyn Executor>, config: Config) -> Self {
        Session {
            cursor: Cursor::default(),
            stack_delta: 0,
            hex_cols: config.hex_cols,
            color: config.color,
            theme: config.theme.clone(),
            io_cache: false,
            history: SeekHistory::default(),
            console_log: String::new(),
            executor,
            config,
        }
    }

    pub fn offset(&self) -> u64 {
        self.executor.offset()
    }

    /// Move the shared offset, remembering where it was
    pub fn seek(&mut self, addr: u64) {
        let from = self.executor.offset();
        if from != addr {
            self.history.record(from);
        }
        self.executor.seek(addr);
    }

    pub fn undo_seek(&mut self) -> bool {
        let current = self.executor.offset();
        match self.history.undo(current) {
            Some(addr) => {
                self.executor.seek(addr);
                true
            }
            None => false,
        }
    }

    pub fn redo_seek(&mut self) -> bool {
        let current = self.executor.offset();
        match self.history.redo(current) {
            Some(addr) => {
                self.executor.seek(addr);
                true
            }
            None => false,
        }
    }

    pub fn run(&mut self, cmd: &str) -> String {
        debug!(cmd, "run");
        self.executor.execute(cmd)
    }

    /// Run `cmd` and append it with its output to the console log
    pub fn run_logged(&mut self, cmd: &str) {
        let out = self.run(cmd);
        self.console_log.push_str("> ");
        self.console_log.push_str(cmd);
        self.console_log.push('\n');
        self.console_log.push_str(&out);
        if !out.is_empty() && !out.ends_with('\n') {
            self.console_log.push('\n');
        }
    }
}

/// Parse an address typed by the user: `0x` hex or decimal
pub fn parse_addr(text: &str) -> Option<u64> {
    let text = text.trim();
    match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16).ok(),
        None => text.parse().ok(),
    }
}

/// First `0x…` token on a line
pub fn addr_in_line(line: &str) -> Option<u64> {
    let start = line.find("0x")?;
    let hex: String = line[start + 2..]
        .chars()
        .take_while(|c| c.is_ascii_hexdigit())
        .collect();
    u64::from_str_radix(&hex, 16).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seek_history() {
        let mut history = SeekHistory::default();
        history.record(0x10);
        history.record(0x20);
        assert_eq!(history.undo(0x30), Some(0x20));
        assert_eq!(history.undo(0x20), Some(0x10));
        assert_eq!(history.undo(0x10), None);
        assert_eq!(history.redo(0x10), Some(0x20));
    }

    #[test]
    fn test_parse_addr() {
        assert_eq!(parse_addr("0x400000"), Some(0x400000));
        assert_eq!(parse_addr(" 42 "), Some(42));
        assert_eq!(parse_addr("main"), None);
    }

    #[test]
    fn test_addr_in_line() {
        assert_eq!(addr_in_line("  0x00401000    42 main"), Some(0x401000));
        assert_eq!(addr_in_line("no address here"), None);
    }
}
