//! User configuration loaded from `config.toml`
//!
//! Every field has a default, so an empty or missing file yields the stock
//! behaviour. An explicitly requested file that cannot be read is an error.

use crate::error::{PanelsError, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Which panels a fresh tab starts with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LayoutKind {
    /// Disassembly, Functions, Symbols
    #[default]
    Static,
    /// Disassembly, Stack, Registers
    Dynamic,
}

/// External program that answers panel commands
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExecutorConfig {
    pub program: String,
    pub args: Vec<String>,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        ExecutorConfig {
            program: "sh".to_string(),
            args: vec!["-c".to_string()],
        }
    }
}

/// Commands issued for debugger-style actions. `{}` is replaced by the
/// user-supplied argument where one is prompted for.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ActionCommands {
    pub step_in: String,
    pub step_over: String,
    pub emu_step_in: String,
    pub emu_step_over: String,
    pub cont: String,
    pub comment: String,
    pub uncomment: String,
    pub breakpoint: String,
    pub delete_breakpoint: String,
}

impl Default for ActionCommands {
    fn default() -> Self {
        ActionCommands {
            step_in: "ds".to_string(),
            step_over: "dso".to_string(),
            emu_step_in: "aes".to_string(),
            emu_step_over: "aeso".to_string(),
            cont: "dc".to_string(),
            comment: "CC {}".to_string(),
            uncomment: "CC-".to_string(),
            breakpoint: "dbs {}".to_string(),
            delete_breakpoint: "db-{}".to_string(),
        }
    }
}

impl ActionCommands {
    /// Substitute `arg` into a template
    pub fn fill(template: &str, arg: &str) -> String {
        if template.contains("{}") {
            template.replacen("{}", arg, 1)
        } else if arg.is_empty() {
            template.to_string()
        } else {
            format!("{} {}", template, arg)
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default panel set for new tabs
    pub layout: LayoutKind,
    /// Maximum panels per tab
    pub panel_limit: usize,
    /// Maximum tabs
    pub tab_limit: usize,
    /// Columns moved by one horizontal resize step
    pub resize_step_w: i32,
    /// Rows moved by one vertical resize step
    pub resize_step_h: i32,
    /// Width of panels inserted as a left side column
    pub side_panel_width: i32,
    /// Width of the right-hand column of the default layout
    pub column_width: Option<i32>,
    /// Recompute every panel whenever the address changes
    pub auto_update: bool,
    /// Key read timeout while an animation is running
    pub animation_ms: u64,
    /// Color level, 0 (monochrome) to 2
    pub color: u8,
    pub theme: String,
    pub hex_cols: i64,
    pub graph_scroll: i32,
    pub register_cols: i64,
    /// Enables debugger-only menu entries and actions
    pub debug: bool,
    /// Where `Save Layout` writes; defaults to the user data directory
    pub layout_file: Option<PathBuf>,
    pub executor: ExecutorConfig,
    pub actions: ActionCommands,
    /// Extra or overriding entries of the title → command table
    pub commands: BTreeMap<String, String>,
    /// Function keys: `f1`..`f12` → command
    pub fkeys: BTreeMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        let mut fkeys = BTreeMap::new();
        fkeys.insert("f2".to_string(), "dbs $$".to_string());
        fkeys.insert("f7".to_string(), "ds".to_string());
        fkeys.insert("f8".to_string(), "dso".to_string());
        fkeys.insert("f9".to_string(), "dc".to_string());
        Config {
            layout: LayoutKind::Static,
            panel_limit: 64,
            tab_limit: 64,
            resize_step_w: 4,
            resize_step_h: 4,
            side_panel_width: 60,
            column_width: None,
            auto_update: false,
            animation_ms: 300,
            color: 1,
            theme: "default".to_string(),
            hex_cols: 16,
            graph_scroll: 5,
            register_cols: 3,
            debug: false,
            layout_file: None,
            executor: ExecutorConfig::default(),
            actions: ActionCommands::default(),
            commands: BTreeMap::new(),
            fkeys,
        }
    }
}

impl Config {
    /// Parse configuration from TOML text
    pub fn from_toml(text: &str) -> Result<Config> {
        let config: Config = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration.
    ///
    /// With an explicit `path` the file must exist. Without one the default
    /// location is tried and silently skipped when absent.
    pub fn load(path: Option<&Path>) -> Result<Config> {
        match path {
            Some(path) => {
                let text = fs::read_to_string(path)?;
                Config::from_toml(&text)
            }
            None => match default_config_path() {
                Some(path) if path.exists() => {
                    let text = fs::read_to_string(&path)?;
                    Config::from_toml(&text)
                }
                _ => Ok(Config::default()),
            },
        }
    }

    fn validate(&self) -> Result<()> {
        if self.panel_limit == 0 || self.tab_limit == 0 {
            return Err(PanelsError::Config("limits must be positive".into()));
        }
        if self.resize_step_w < 1 || self.resize_step_h < 1 {
            return Err(PanelsError::Config("resize steps must be positive".into()));
        }
        if self.side_panel_width < 3 {
            return Err(PanelsError::Config("side_panel_width is too small".into()));
        }
        if self.color > 2 {
            return Err(PanelsError::Config("color must be 0, 1 or 2".into()));
        }
        Ok(())
    }

    /// Function key number → command
    pub fn function_keys(&self) -> Vec<(u8, String)> {
        self.fkeys
            .iter()
            .filter_map(|(name, cmd)| {
                let n = name.trim_start_matches(['f', 'F']).parse::<u8>().ok()?;
                (1..=12).contains(&n).then(|| (n, cmd.clone()))
            })
            .collect()
    }

    /// Where layouts are saved and loaded from
    pub fn layout_path(&self) -> Option<PathBuf> {
        self.layout_file
            .clone()
            .or_else(|| dirs::data_dir().map(|d| d.join("panedeck").join("layout.json")))
    }
}

/// `$XDG_CONFIG_HOME/panedeck/config.toml` or the platform equivalent
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("panedeck").join("config.toml"))
}
