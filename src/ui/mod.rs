//! Terminal side of panedeck, built on [ratatui](https://github.com/ratatui-org/ratatui)
//! and crossterm.
//!
//! - **[`app`]**: the main loop tying a [`Console`](console::Console) to the tab root
//! - **[`console`]**: terminal ownership, key reading and bottom-line prompts
//! - **[`input`]**: crossterm events mapped to logical keys
//! - **[`panes`]**: render functions painting into the canvas
//! - **[`surface`]**: the drawing primitives panes use
//! - **[`theme`]**: named color palettes

pub mod app;
pub mod console;
pub mod input;
pub mod panes;
pub mod surface;
pub mod theme;

pub use app::App;
