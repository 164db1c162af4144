//! Render functions for everything drawn on the canvas
//!
//! - [`panel`]: panel frame, title line and body text
//! - [`bar`]: the title bar with menu labels and tabs
//! - [`menu`]: menu popups
//! - [`modal`]: the almighty picker
//!
//! Panes hold no state. They take what to draw and a [`Surface`](crate::ui::surface::Surface).

pub mod bar;
pub mod menu;
pub mod modal;
pub mod panel;
