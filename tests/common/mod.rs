// Shared fakes for the integration tests
#![allow(dead_code)]

use panedeck::config::Config;
use panedeck::executor::Executor;
use panedeck::session::Session;
use panedeck::ui::console::Console;
use panedeck::ui::input::Key;
use ratatui::buffer::Buffer;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::io;
use std::rc::Rc;
use std::time::Duration;

/// Every command the executor ran, in order
pub type CommandLog = Rc<RefCell<Vec<String>>>;

/// Answers each command with `out of <cmd>` and records it
pub struct RecordingExecutor {
    pub offset: u64,
    pub log: CommandLog,
}

impl Executor for RecordingExecutor {
    fn execute(&mut self, cmd: &str) -> String {
        self.log.borrow_mut().push(cmd.to_string());
        format!("out of {}", cmd)
    }

    fn offset(&self) -> u64 {
        self.offset
    }

    fn seek(&mut self, addr: u64) {
        self.offset = addr;
    }
}

pub fn session() -> (Session, CommandLog) {
    let log = CommandLog::default();
    let executor = RecordingExecutor {
        offset: 0x1000,
        log: Rc::clone(&log),
    };
    (Session::new(Box::new(executor), Config::default()), log)
}

/// Plays back keys; reading past the end is an error so a test cannot hang
pub struct ScriptedConsole {
    pub size: (u16, u16),
    pub keys: VecDeque<Key>,
    pub lines: Vec<String>,
    pub frames: usize,
}

impl ScriptedConsole {
    pub fn new(size: (u16, u16)) -> Self {
        ScriptedConsole {
            size,
            keys: VecDeque::new(),
            lines: Vec::new(),
            frames: 0,
        }
    }

    /// Queue `text` as keys; `\n` is Enter
    pub fn typed(mut self, text: &str) -> Self {
        for c in text.chars() {
            self.keys.push_back(if c == '\n' { Key::Enter } else { Key::Char(c) });
        }
        self
    }
}

impl Console for ScriptedConsole {
    fn size(&self) -> (u16, u16) {
        self.size
    }

    fn present(&mut self, _canvas: &Buffer) -> io::Result<()> {
        self.frames += 1;
        Ok(())
    }

    fn read_key(&mut self, _timeout: Option<Duration>) -> io::Result<Option<Key>> {
        self.keys
            .pop_front()
            .map(Some)
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "no more scripted keys"))
    }

    fn show_line(&mut self, text: &str) -> io::Result<()> {
        self.lines.push(text.to_string());
        Ok(())
    }
}
