use std::fs::OpenOptions;
use std::path::Path;

use log::LevelFilter;
use simplelog::{Config, WriteLogger};

use crate::model::config::LogConfig;

/// Parse a configured level name; unknown names fall back to `Info`.
pub fn level_filter(level: &str) -> LevelFilter {
    level.parse().unwrap_or(LevelFilter::Info)
}

/// Route `log` output to the configured file inside the board directory.
/// The terminal belongs to the TUI, so nothing is ever logged to stderr.
/// Failure to open the file leaves logging disabled.
pub fn init_file_logger(board_dir: &Path, config: &LogConfig) {
    let level = level_filter(&config.level);
    if level == LevelFilter::Off {
        return;
    }
    let path = board_dir.join(&config.file);
    let file = match OpenOptions::new().create(true).append(true).open(&path) {
        Ok(f) => f,
        Err(_) => return,
    };
    // A logger may already be installed (tests, repeated init)
    let _ = WriteLogger::init(level, Config::default(), file);
}
