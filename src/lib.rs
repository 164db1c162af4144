//! # Introduction
//!
//! panedeck is a tiling panel manager for a terminal front end to a
//! reverse-engineering engine. Each panel shows the output of an engine
//! command; panels tile the terminal, can be split, resized, zoomed,
//! rotated and dismantled, and are grouped into tabs.
//!
//! ## Pipeline
//!
//! ```text
//! Key → PanelSet::handle_key → layout / dirty flags → PanelSet::refresh → canvas → Console
//! ```
//!
//! 1. [`layout`]: pure tiling geometry (split, resize, dismantle, fit).
//! 2. [`panel`]: panel model, view state and the command table.
//! 3. [`panels`]: one tab with its modes, menu and picker.
//! 4. [`root`]: the tabs.
//! 5. [`executor`] and [`session`]: the engine the panels query.
//! 6. [`ui`]: terminal I/O; not part of the stable library API.

pub mod config;
pub mod error;
pub mod executor;
pub mod layout;
pub mod panel;
pub mod panels;
pub mod root;
pub mod scheduler;
pub mod session;
pub mod ui;
