//! Main loop: drain redraw requests, refresh the current tab, present it,
//! then wait for a key

use super::console::Console;
use crate::panels::modes::Flow;
use crate::panels::Mode;
use crate::root::PanelsRoot;
use crate::scheduler::{RedrawNotifier, RedrawQueue, RedrawRequest};
use crate::session::Session;
use std::io;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, warn};

pub struct App {
    pub root: PanelsRoot,
    pub session: Session,
    queue: RedrawQueue,
}

impl App {
    /// Create the app for a canvas of `size` (columns, rows)
    pub fn new(mut session: Session, queue: RedrawQueue, size: (u16, u16)) -> Self {
        let root = PanelsRoot::new(&mut session, size.0, size.1);
        App { root, session, queue }
    }

    pub fn notifier(&self) -> RedrawNotifier {
        self.queue.notifier()
    }

    /// Start the first tab from a saved layout instead of the defaults
    pub fn load_layout(&mut self, path: Option<&Path>) {
        let tab = self.root.current_mut();
        if let Err(err) = tab.load_layout_or_default(&mut self.session, path) {
            warn!(error = %err, "saved layout not used");
        }
    }

    /// Run until the last tab closes or the user quits
    pub fn run(&mut self, console: &mut dyn Console) -> io::Result<()> {
        loop {
            let (w, h) = console.size();
            let strip = self.root.tab_strip();
            let tab = self.root.current_mut();
            if let Some(RedrawRequest::Resize) = self.queue.drain() {
                debug!(w, h, "resize");
                tab.on_resize(w, h);
            }
            tab.ensure_initialized(&mut self.session);
            tab.refresh(&mut self.session, &strip);
            console.present(&tab.canvas)?;

            let timeout = (tab.fun.is_on() && tab.mode != Mode::Menu)
                .then(|| Duration::from_millis(self.session.config.animation_ms));
            let Some(key) = console.read_key(timeout)? else {
                if timeout.is_some() {
                    tab.tick_fun(&mut rand::rng());
                }
                continue;
            };
            debug!(?key, "key");
            match tab.handle_key(key, &mut self.session, console)? {
                Flow::Continue => {}
                Flow::Quit => break,
                Flow::Tab(request) => {
                    if let Err(err) = self.root.apply(request, &mut self.session, (w, h)) {
                        warn!(error = %err, "tab request failed");
                        console.status(&err.to_string())?;
                    }
                    if self.root.is_quit() {
                        break;
                    }
                }
            }
        }
        info!("leaving");
        Ok(())
    }
}
