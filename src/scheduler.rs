//! Deferred redraw requests
//!
//! Terminal resizes and other out-of-band events never draw. They push a
//! request through a [`RedrawNotifier`]; the main loop drains the
//! [`RedrawQueue`] once per iteration and performs a single full redraw for
//! however many requests arrived.

use tracing::trace;

/// Why a redraw was asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RedrawRequest {
    /// The canvas changed size: refit panels, then repaint everything
    Resize,
}

/// Sending half, cheap to clone and safe to hand to other threads
#[derive(Debug, Clone)]
pub struct RedrawNotifier {
    tx: flume::Sender<RedrawRequest>,
}

impl RedrawNotifier {
    pub fn notify(&self, request: RedrawRequest) {
        trace!(?request, "redraw requested");
        // A closed queue means the loop is gone; nothing left to redraw.
        let _ = self.tx.send(request);
    }
}

#[derive(Debug)]
pub struct RedrawQueue {
    rx: flume::Receiver<RedrawRequest>,
    tx: flume::Sender<RedrawRequest>,
}

impl Default for RedrawQueue {
    fn default() -> Self {
        RedrawQueue::new()
    }
}

impl RedrawQueue {
    pub fn new() -> Self {
        let (tx, rx) = flume::unbounded();
        RedrawQueue { rx, tx }
    }

    pub fn notifier(&self) -> RedrawNotifier {
        RedrawNotifier { tx: self.tx.clone() }
    }

    /// Take every pending request, collapsed into the strongest one
    pub fn drain(&self) -> Option<RedrawRequest> {
        self.rx.try_iter().max()
    }

    pub fn is_empty(&self) -> bool {
        self.rx.is_empty()
    }
}
