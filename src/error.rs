//! Error types for the panel engine
//!
//! Most failures inside the engine are absorbed (the triggering step is
//! skipped and a status message is shown). [`PanelsError`] covers the cases
//! that have to travel: exhausted limits, unusable persisted state, terminal
//! I/O and configuration problems.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the panel engine and its collaborators
#[derive(Debug, Error)]
pub enum PanelsError {
    /// The per-tab panel limit has been reached
    #[error("panel limit reached ({limit})")]
    PanelLimit { limit: usize },

    /// The tab limit has been reached
    #[error("tab limit reached ({limit})")]
    TabLimit { limit: usize },

    /// No room left to carve a new panel out of the current geometry
    #[error("not enough room for a new panel")]
    NoRoom,

    /// A saved layout could not be used
    #[error("invalid layout: {0}")]
    InvalidLayout(String),

    /// The layout file does not exist
    #[error("no saved layout at {}", .0.display())]
    MissingLayout(PathBuf),

    /// The configuration file could not be understood
    #[error("config error: {0}")]
    Config(String),

    /// Terminal or filesystem failure
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Layout (de)serialization failure
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parse failure
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, PanelsError>;
