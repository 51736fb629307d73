use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Configuration from board.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardConfig {
    pub board: BoardInfo,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardInfo {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UiConfig {
    #[serde(default)]
    pub show_key_hints: bool,
    /// Base palette overrides, e.g. `background = "#0C001B"`
    #[serde(default)]
    pub colors: HashMap<String, String>,
    /// Per-status tag colors, keyed by status identifier (`in-progress`)
    #[serde(default)]
    pub status_colors: HashMap<String, String>,
    /// Per-priority tag colors, keyed by priority identifier (`high`)
    #[serde(default)]
    pub priority_colors: HashMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// One of `off`, `error`, `warn`, `info`, `debug`, `trace`
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log file, relative to the board/ directory
    #[serde(default = "default_log_file")]
    pub file: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            level: default_log_level(),
            file: default_log_file(),
        }
    }
}

/// Default: see src/templates/board.toml
fn default_log_level() -> String {
    "info".to_string()
}

/// Default: see src/templates/board.toml
fn default_log_file() -> String {
    "tackboard.log".to_string()
}
