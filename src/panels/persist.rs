//! Saved layouts
//!
//! A layout is a JSON array with one record per panel, in display order:
//! `{"Title": .., "Cmd": .., "x": .., "y": .., "w": .., "h": .., "cache": ..}`.

use crate::error::{PanelsError, Result};
use crate::layout::Pos;
use crate::panel::Panel;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedPanel {
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Cmd")]
    pub cmd: String,
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
    #[serde(default)]
    pub cache: bool,
}

impl SavedPanel {
    pub fn from_panel(panel: &Panel) -> Self {
        let pos = panel.view.pos;
        SavedPanel {
            title: panel.model.title.clone(),
            cmd: panel.model.cmd.clone(),
            x: pos.x,
            y: pos.y,
            w: pos.w,
            h: pos.h,
            cache: panel.model.cache,
        }
    }

    pub fn pos(&self) -> Pos {
        Pos::new(self.x, self.y, self.w, self.h)
    }
}

pub fn to_json<'a>(panels: impl IntoIterator<Item = &'a Panel>) -> Result<String> {
    let saved: Vec<SavedPanel> = panels.into_iter().map(SavedPanel::from_panel).collect();
    Ok(serde_json::to_string(&saved)?)
}

/// Parse and validate a saved layout
pub fn parse(text: &str) -> Result<Vec<SavedPanel>> {
    let text = text.trim_start();
    if !text.starts_with('[') {
        return Err(PanelsError::InvalidLayout("expected a JSON array".into()));
    }
    let saved: Vec<SavedPanel> = serde_json::from_str(text)?;
    if saved.is_empty() {
        return Err(PanelsError::InvalidLayout("no panels".into()));
    }
    if let Some(bad) = saved
        .iter()
        .find(|p| p.x < 0 || p.y < 0 || !p.pos().is_valid())
    {
        return Err(PanelsError::InvalidLayout(format!(
            "panel {:?} has invalid geometry",
            bad.title
        )));
    }
    Ok(saved)
}

pub fn save(path: &Path, json: &str) -> Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    fs::write(path, json)?;
    info!(path = %path.display(), "layout saved");
    Ok(())
}

pub fn load(path: &Path) -> Result<Vec<SavedPanel>> {
    if !path.exists() {
        return Err(PanelsError::MissingLayout(path.to_path_buf()));
    }
    let text = fs::read_to_string(path)?;
    parse(&text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_field_names() {
        let mut panel = Panel::new("Disassembly", "pd", true);
        panel.view.pos = Pos::new(0, 1, 41, 23);
        let json = to_json([&panel]).expect("serializes");
        assert_eq!(
            json,
            r#"[{"Title":"Disassembly","Cmd":"pd","x":0,"y":1,"w":41,"h":23,"cache":true}]"#
        );
    }

    #[test]
    fn test_escaped_command() {
        let panel = Panel::new("Search", "\"/x 90\"", false);
        let json = to_json([&panel]).expect("serializes");
        assert!(json.contains(r#""Cmd":"\"/x 90\"""#));
    }

    #[test]
    fn test_rejects_malformed() {
        assert!(matches!(parse("{}"), Err(PanelsError::InvalidLayout(_))));
        assert!(matches!(parse("[]"), Err(PanelsError::InvalidLayout(_))));
        assert!(matches!(parse("[{\"Title\":"), Err(PanelsError::Json(_))));
        let tiny = r#"[{"Title":"a","Cmd":"a","x":0,"y":1,"w":1,"h":5,"cache":false}]"#;
        assert!(matches!(parse(tiny), Err(PanelsError::InvalidLayout(_))));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nope.json");
        assert!(matches!(load(&path), Err(PanelsError::MissingLayout(_))));
    }
}
