use std::path::PathBuf;

use super::board::Board;
use super::config::BoardConfig;

/// A fully loaded board directory
#[derive(Debug)]
pub struct Workspace {
    /// Root directory (parent of `board/`)
    pub root: PathBuf,
    /// Path to the `board/` directory
    pub board_dir: PathBuf,
    /// Parsed board.toml
    pub config: BoardConfig,
    /// Cards loaded from todos.json
    pub board: Board,
}
