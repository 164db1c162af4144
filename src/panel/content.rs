//! Producing a panel's text
//!
//! Text comes from one of three places: fixed text the engine owns, the
//! panel's cache, or a fresh run of its command through the executor.

use super::kind::{ContentKind, Printer};
use super::Panel;
use crate::session::Session;

/// Text for `panel`, running its command when the cache cannot be used.
pub fn print(panel: &mut Panel, session: &mut Session) -> String {
    if let Some(text) = &panel.model.read_only {
        return text.clone();
    }
    match panel.model.kind.printer() {
        Printer::Fixed => fixed(panel, session),
        Printer::Default => cache_or_run(panel, session),
        Printer::Cached => {
            panel.model.cache = true;
            cache_or_run(panel, session)
        }
        Printer::Disassembly => disassembly(panel, session),
        Printer::Stack => stack(panel, session),
        Printer::Hexdump => {
            if !panel.model.cache {
                session.executor.seek(panel.model.addr);
            }
            cache_or_run(panel, session)
        }
    }
}

fn fixed(panel: &Panel, session: &Session) -> String {
    if panel.model.kind == ContentKind::Console {
        session.console_log.clone()
    } else {
        String::new()
    }
}

/// Record the function under the shared offset. Returns `true` when it
/// differs from what the panel last showed.
pub fn check_func_diff(panel: &mut Panel, session: &mut Session) -> bool {
    let offset = session.executor.offset();
    let func = session.executor.function_at(offset);
    if func == panel.model.func_name {
        return false;
    }
    panel.model.func_name = func;
    true
}

fn store(panel: &mut Panel, text: &str) {
    if panel.model.cache && !text.is_empty() {
        panel.model.cached = Some(text.to_string());
    }
}

fn cache_or_run(panel: &mut Panel, session: &mut Session) -> String {
    let update = session.config.auto_update && check_func_diff(panel, session);
    if !update {
        if let Some(text) = panel.model.usable_cache() {
            return text.to_string();
        }
    }
    let text = session.run(&panel.model.filtered_cmd());
    store(panel, &text);
    if update && panel.model.cache {
        panel.reset_scroll();
    }
    text
}

fn disassembly(panel: &mut Panel, session: &mut Session) -> String {
    if let Some(text) = panel.model.usable_cache() {
        return text.to_string();
    }
    let lines = (panel.view.pos.h - 3).max(1);
    let cmd = format!("{} {}", panel.model.filtered_cmd(), lines);
    let saved = session.executor.offset();
    session.executor.seek(panel.model.addr);
    let text = session.run(&cmd);
    session.executor.seek(saved);
    store(panel, &text);
    text
}

fn stack(panel: &mut Panel, session: &mut Session) -> String {
    let delta = session.stack_delta;
    let sign = if delta < 0 { '+' } else { '-' };
    let mut cmd = format!("{}{}{}", panel.model.cmd, sign, delta.unsigned_abs());
    for filter in &panel.model.filters {
        cmd.push('~');
        cmd.push_str(filter);
    }
    let text = session.run(&cmd);
    store(panel, &text);
    text
}
