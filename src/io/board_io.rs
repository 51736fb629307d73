use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use log::{info, warn};
use tempfile::NamedTempFile;

use crate::io::{config_io, logging};
use crate::model::board::Board;
use crate::model::config::BoardConfig;
use crate::model::todo::Todo;
use crate::model::workspace::Workspace;

/// Name of the directory holding a board
pub const BOARD_DIR: &str = "board";
/// Persisted cards, inside the board directory
pub const TODOS_FILE: &str = "todos.json";

const TEMPLATE_TODOS: &str = include_str!("../templates/todos.json");

/// Error type for board I/O operations
#[derive(Debug, thiserror::Error)]
pub enum BoardError {
    #[error("not a tackboard board: no board/ directory found")]
    NotABoard,
    #[error("a board already exists at {0}")]
    AlreadyExists(PathBuf),
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not write {path}: {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse board.toml: {0}")]
    ConfigParseError(#[from] toml::de::Error),
    #[error("could not parse todos.json: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Discover the board by walking up from the given directory, looking for
/// a `board/` subdirectory with a board.toml.
pub fn discover_board(start: &Path) -> Result<PathBuf, BoardError> {
    let mut current = start.to_path_buf();
    loop {
        let board_dir = current.join(BOARD_DIR);
        if board_dir.is_dir() && board_dir.join(config_io::CONFIG_FILE).exists() {
            return Ok(current);
        }
        if !current.pop() {
            return Err(BoardError::NotABoard);
        }
    }
}

/// Load config and cards for the board rooted at `root`.
pub fn load_workspace(root: &Path) -> Result<Workspace, BoardError> {
    load_workspace_with(root, |_, _| {})
}

/// Load the board for a CLI or TUI session. The file logger is started from
/// board.toml before the cards are read, so the load itself is logged.
pub fn open_workspace(root: &Path) -> Result<Workspace, BoardError> {
    load_workspace_with(root, |board_dir, config| {
        logging::init_file_logger(board_dir, &config.log)
    })
}

fn load_workspace_with(
    root: &Path,
    on_config: impl FnOnce(&Path, &BoardConfig),
) -> Result<Workspace, BoardError> {
    let board_dir = root.join(BOARD_DIR);
    if !board_dir.is_dir() {
        return Err(BoardError::NotABoard);
    }
    let config = config_io::read_config(&board_dir)?;
    on_config(&board_dir, &config);
    let board = load_board(&board_dir)?;
    Ok(Workspace {
        root: root.to_path_buf(),
        board_dir,
        config,
        board,
    })
}

/// Read todos.json. A board that has never been saved is seeded with the
/// bundled template cards, which are written out immediately.
pub fn load_board(board_dir: &Path) -> Result<Board, BoardError> {
    let path = board_dir.join(TODOS_FILE);
    if !path.exists() {
        let board = template_board()?;
        save_board(board_dir, &board)?;
        info!("[To-Do] Seeded {} To-Dos from template.", board.len());
        return Ok(board);
    }

    let text = fs::read_to_string(&path).map_err(|e| BoardError::ReadError {
        path: path.clone(),
        source: e,
    })?;
    let todos: Vec<Todo> = serde_json::from_str(&text)?;
    let board = Board::new(todos);
    info!("[To-Do] Loaded {} To-Dos from storage.", board.len());
    Ok(board)
}

/// Write the whole board to todos.json.
pub fn save_board(board_dir: &Path, board: &Board) -> Result<(), BoardError> {
    let path = board_dir.join(TODOS_FILE);
    let content = serde_json::to_string_pretty(board)?;
    atomic_write(&path, content.as_bytes())
        .map_err(|e| BoardError::WriteError { path, source: e })?;
    Ok(())
}

/// The bundled starter cards
pub fn template_board() -> Result<Board, BoardError> {
    let todos: Vec<Todo> = serde_json::from_str(TEMPLATE_TODOS)?;
    Ok(Board::new(todos))
}

/// Create `board/` under `root` with a config and the template cards.
/// Refuses to overwrite an existing board unless `force` is set.
pub fn init_board(root: &Path, name: &str, force: bool) -> Result<PathBuf, BoardError> {
    let board_dir = root.join(BOARD_DIR);
    if board_dir.join(config_io::CONFIG_FILE).exists() && !force {
        return Err(BoardError::AlreadyExists(board_dir));
    }
    fs::create_dir_all(&board_dir)?;
    config_io::write_default_config(&board_dir, name)?;

    let todos_path = board_dir.join(TODOS_FILE);
    if todos_path.exists() && force {
        warn!("replacing {} with template cards", todos_path.display());
    }
    save_board(&board_dir, &template_board()?)?;
    Ok(board_dir)
}

/// Write `content` to `path` atomically using a temp file + rename.
pub fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = path.parent().unwrap_or(Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::todo::{Priority, Status};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn sample_todo(key: u64) -> Todo {
        Todo {
            key,
            title: format!("Card {}", key),
            content: String::new(),
            status: Status::Todo,
            priority: Priority::Low,
            created_at: NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(),
            deadline: None,
        }
    }

    #[test]
    fn discover_walks_up() {
        let tmp = TempDir::new().unwrap();
        init_board(tmp.path(), "Test", false).unwrap();
        let nested = tmp.path().join("a/b/c");
        fs::create_dir_all(&nested).unwrap();

        let root = discover_board(&nested).unwrap();
        assert_eq!(root, tmp.path());
    }

    #[test]
    fn discover_without_board_fails() {
        let tmp = TempDir::new().unwrap();
        assert!(matches!(
            discover_board(tmp.path()),
            Err(BoardError::NotABoard)
        ));
    }

    #[test]
    fn missing_todos_are_seeded_from_template() {
        let tmp = TempDir::new().unwrap();
        let board = load_board(tmp.path()).unwrap();
        assert_eq!(board, template_board().unwrap());
        assert!(tmp.path().join(TODOS_FILE).exists());
    }

    #[test]
    fn save_and_load_round_trip() {
        let tmp = TempDir::new().unwrap();
        let board = Board::new(vec![sample_todo(4), sample_todo(9)]);
        save_board(tmp.path(), &board).unwrap();
        let loaded = load_board(tmp.path()).unwrap();
        assert_eq!(loaded, board);
        assert_eq!(loaded.next_key(), 10);
    }

    #[test]
    fn malformed_json_is_an_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(TODOS_FILE), "[{oops").unwrap();
        assert!(matches!(
            load_board(tmp.path()),
            Err(BoardError::JsonError(_))
        ));
    }

    #[test]
    fn init_refuses_existing_board() {
        let tmp = TempDir::new().unwrap();
        init_board(tmp.path(), "Test", false).unwrap();
        assert!(matches!(
            init_board(tmp.path(), "Test", false),
            Err(BoardError::AlreadyExists(_))
        ));
        assert!(init_board(tmp.path(), "Again", true).is_ok());

        let ws = load_workspace(tmp.path()).unwrap();
        assert_eq!(ws.config.board.name, "Again");
        assert_eq!(ws.board.len(), 3);
    }
}
