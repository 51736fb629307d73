use std::path::PathBuf;

use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;
use tempfile::TempDir;

use crate::io::board_io;
use crate::model::{Board, BoardConfig, BoardInfo, Workspace};
use crate::tui::app::App;

pub const TERM_W: u16 = 100;
pub const TERM_H: u16 = 30;

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();

    let buf = terminal.backend().buffer().clone();
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

/// Render the whole app at the standard test size
pub fn render_app(app: &mut App) -> String {
    render_to_string(TERM_W, TERM_H, |frame, _| super::render(frame, app))
}

/// An in-memory app over the template cards. Nothing is written to disk
/// unless a test persists.
pub fn sample_app() -> App {
    let workspace = Workspace {
        root: PathBuf::from("/tmp/test-tackboard"),
        board_dir: PathBuf::from("/tmp/test-tackboard/board"),
        config: BoardConfig {
            board: BoardInfo {
                name: "Test".into(),
            },
            ui: Default::default(),
            log: Default::default(),
        },
        board: board_io::template_board().unwrap(),
    };
    App::new(workspace)
}

/// An app over a freshly initialized board in a temp directory
pub fn app_in_tempdir() -> (TempDir, App) {
    let dir = TempDir::new().unwrap();
    board_io::init_board(dir.path(), "Test", false).unwrap();
    let workspace = board_io::load_workspace(dir.path()).unwrap();
    (dir, App::new(workspace))
}

/// An in-memory app with no cards
pub fn empty_app() -> App {
    let mut app = sample_app();
    app.workspace.board = Board::default();
    app
}
