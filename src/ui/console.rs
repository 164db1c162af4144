//! Terminal ownership and blocking prompts
//!
//! The engine never talks to the terminal directly. It shows finished frames,
//! reads logical keys and asks questions on the bottom line through a
//! [`Console`]. [`TerminalConsole`] is the real one; tests script their own.

use super::input::Key;
use super::surface::{blit, Surface};
use crate::scheduler::{RedrawNotifier, RedrawRequest};
use crossterm::{
    cursor::{Hide, Show},
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, MouseEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    Terminal,
};
use std::io::{self, Stdout};
use std::time::Duration;
use tracing::warn;

pub trait Console {
    /// Terminal size as `(width, height)`
    fn size(&self) -> (u16, u16);

    /// Show a finished frame
    fn present(&mut self, canvas: &Buffer) -> io::Result<()>;

    /// Wait for a key. `None` means the timeout expired or something other
    /// than a key (a resize) woke the reader up.
    fn read_key(&mut self, timeout: Option<Duration>) -> io::Result<Option<Key>>;

    /// Draw `text` on the bottom line over the last frame
    fn show_line(&mut self, text: &str) -> io::Result<()>;

    /// Show a message and wait for any key
    fn status(&mut self, msg: &str) -> io::Result<()> {
        self.show_line(msg)?;
        while self.read_key(None)?.is_none() {}
        Ok(())
    }

    /// Yes/no question; Enter picks `default`
    fn confirm(&mut self, msg: &str, default: bool) -> io::Result<bool> {
        let hint = if default { "(Y/n)" } else { "(y/N)" };
        self.show_line(&format!("{} {}", msg, hint))?;
        loop {
            match self.read_key(None)? {
                Some(Key::Char('y' | 'Y')) => return Ok(true),
                Some(Key::Char('n' | 'N')) | Some(Key::Esc) => return Ok(false),
                Some(_) => return Ok(default),
                None => {}
            }
        }
    }

    /// Read a line of text; Esc cancels
    fn input(&mut self, prompt: &str) -> io::Result<Option<String>> {
        let mut line = String::new();
        loop {
            self.show_line(&format!("{}{}", prompt, line))?;
            match self.read_key(None)? {
                Some(Key::Enter) => return Ok(Some(line)),
                Some(Key::Esc) => return Ok(None),
                Some(Key::Backspace) => {
                    line.pop();
                }
                Some(Key::Char(c)) => line.push(c),
                _ => {}
            }
        }
    }
}

/// Console over the real terminal.
///
/// Raw mode, the alternate screen, mouse capture and the hidden cursor are
/// set up on creation and undone on drop.
pub struct TerminalConsole {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    last: Buffer,
    notifier: RedrawNotifier,
}

impl TerminalConsole {
    pub fn new(notifier: RedrawNotifier) -> io::Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture, Hide)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(TerminalConsole {
            terminal,
            last: Buffer::empty(Rect::default()),
            notifier,
        })
    }

    fn draw_last(&mut self) -> io::Result<()> {
        let last = &self.last;
        self.terminal.draw(|frame| blit(last, frame.buffer_mut()))?;
        Ok(())
    }
}

impl Console for TerminalConsole {
    fn size(&self) -> (u16, u16) {
        crossterm::terminal::size().unwrap_or((80, 24))
    }

    fn present(&mut self, canvas: &Buffer) -> io::Result<()> {
        self.last = canvas.clone();
        self.draw_last()
    }

    fn read_key(&mut self, timeout: Option<Duration>) -> io::Result<Option<Key>> {
        if let Some(timeout) = timeout {
            if !event::poll(timeout)? {
                return Ok(None);
            }
        }
        match event::read()? {
            Event::Key(key) => Ok(Key::from_event(key)),
            Event::Mouse(mouse) => Ok(match mouse.kind {
                MouseEventKind::ScrollUp => Some(Key::Char('k')),
                MouseEventKind::ScrollDown => Some(Key::Char('j')),
                _ => None,
            }),
            Event::Resize(_, _) => {
                self.notifier.notify(RedrawRequest::Resize);
                Ok(None)
            }
            _ => Ok(None),
        }
    }

    fn show_line(&mut self, text: &str) -> io::Result<()> {
        let last = &self.last;
        self.terminal.draw(|frame| {
            let buf = frame.buffer_mut();
            blit(last, buf);
            let (w, h) = buf.bounds();
            let style = Style::default().add_modifier(Modifier::REVERSED);
            let line = crate::layout::Pos::new(0, h - 1, w, 1);
            buf.fill(line, style);
            buf.write(0, h - 1, text, w, style);
        })?;
        Ok(())
    }
}

impl Drop for TerminalConsole {
    fn drop(&mut self) {
        let restored = disable_raw_mode().and_then(|_| {
            execute!(
                self.terminal.backend_mut(),
                LeaveAlternateScreen,
                DisableMouseCapture,
                Show
            )
        });
        if let Err(e) = restored {
            warn!(error = %e, "failed to restore the terminal");
        }
    }
}
