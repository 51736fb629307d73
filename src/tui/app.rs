use std::io;
use std::path::Path;
use std::time::Duration;

use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use log::{info, warn};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;

use crate::io::board_io::{self, load_board, save_board};
use crate::io::watcher::BoardWatcher;
use crate::model::{Status, Todo, Workspace};
use crate::ops::todo_ops;
use crate::select::SelectRegistry;

use super::input;
use super::popup::{PopupMode, TodoPopup};
use super::render;
use super::select_surface::TerminalSurface;
use super::theme::Theme;

/// Main application state
pub struct App {
    pub workspace: Workspace,
    pub theme: Theme,
    /// Every live select widget; the open popup's status and priority
    pub registry: SelectRegistry<TerminalSurface>,
    /// Focused column, index into `Status::ALL`
    pub column: usize,
    /// Card cursor per column
    pub cursors: [usize; 4],
    pub popup: Option<TodoPopup>,
    /// Card awaiting y/n confirmation
    pub confirm_delete: Option<u64>,
    pub status_message: Option<String>,
    /// Card screen areas from the last frame, for mouse hits
    pub card_areas: Vec<(u64, Rect)>,
    pub should_quit: bool,
}

impl App {
    pub fn new(workspace: Workspace) -> Self {
        let theme = Theme::from_config(&workspace.config.ui);
        App {
            workspace,
            theme,
            registry: SelectRegistry::new(),
            column: 0,
            cursors: [0; 4],
            popup: None,
            confirm_delete: None,
            status_message: None,
            card_areas: Vec::new(),
            should_quit: false,
        }
    }

    pub fn current_status(&self) -> Status {
        Status::ALL[self.column]
    }

    /// Cards of the focused column
    pub fn current_todos(&self) -> Vec<&Todo> {
        self.workspace.board.in_status(self.current_status())
    }

    /// Key of the card under the cursor
    pub fn selected_key(&self) -> Option<u64> {
        self.current_todos()
            .get(self.cursors[self.column])
            .map(|t| t.key)
    }

    /// Keep every cursor within its column
    pub fn clamp_cursors(&mut self) {
        for status in Status::ALL {
            let len = self.workspace.board.in_status(status).len();
            let cursor = &mut self.cursors[status.column()];
            *cursor = (*cursor).min(len.saturating_sub(1));
        }
    }

    pub fn move_column(&mut self, delta: isize) {
        let last = Status::ALL.len() as isize - 1;
        self.column = (self.column as isize + delta).clamp(0, last) as usize;
    }

    pub fn move_cursor(&mut self, delta: isize) {
        let len = self.current_todos().len();
        if len == 0 {
            return;
        }
        let cursor = &mut self.cursors[self.column];
        *cursor = (*cursor as isize + delta).clamp(0, len as isize - 1) as usize;
    }

    /// Put the cursor on card `key`, switching columns as needed
    pub fn focus_card(&mut self, key: u64) {
        let Some(status) = self.workspace.board.get(key).map(|t| t.status) else {
            return;
        };
        self.column = status.column();
        if let Some(index) = self
            .workspace
            .board
            .in_status(status)
            .iter()
            .position(|t| t.key == key)
        {
            self.cursors[self.column] = index;
        }
    }

    /// Open the create/edit popup. Any popup already open is closed first.
    pub fn open_popup(&mut self, mode: PopupMode) {
        self.close_popup();
        let todo = match mode {
            PopupMode::Create => None,
            PopupMode::Edit(key) => match self.workspace.board.get(key) {
                Some(todo) => Some(todo),
                None => {
                    self.status_message = Some(format!("To-Do not found with key: {}", key));
                    return;
                }
            },
        };
        let popup = TodoPopup::open(&mut self.registry, &self.theme, mode, todo);
        if mode == PopupMode::Create {
            // New cards start in the focused column
            let status = self.current_status();
            if let Some(id) = popup.status_widget
                && let Some(widget) = self.registry.get_mut(id)
            {
                widget.select(status.as_str());
            }
        }
        self.popup = Some(popup);
    }

    /// Close the popup and release its widgets
    pub fn close_popup(&mut self) {
        if let Some(popup) = self.popup.take() {
            popup.dispose(&mut self.registry);
        }
    }

    /// Submit the popup. On a validation error the popup stays open with the
    /// message in its footer.
    pub fn save_popup(&mut self) {
        let Some(popup) = self.popup.as_mut() else {
            return;
        };
        let key = match popup.mode {
            PopupMode::Create => popup
                .values()
                .map(|new| todo_ops::create(&mut self.workspace.board, new)),
            PopupMode::Edit(key) => popup.update().and_then(|update| {
                todo_ops::edit(&mut self.workspace.board, key, update).map(|t| t.key)
            }),
        };
        match key {
            Ok(key) => {
                self.close_popup();
                self.persist();
                self.focus_card(key);
            }
            Err(e) => popup.error = Some(e.to_string()),
        }
    }

    /// Delete the card being edited in the popup
    pub fn delete_from_popup(&mut self) {
        let Some(PopupMode::Edit(key)) = self.popup.as_ref().map(|p| p.mode) else {
            return;
        };
        self.close_popup();
        self.delete_card(key);
    }

    pub fn delete_card(&mut self, key: u64) {
        match todo_ops::delete(&mut self.workspace.board, key) {
            Ok(todo) => {
                self.status_message = Some(format!("deleted #{} {}", todo.key, todo.title));
                self.persist();
                self.clamp_cursors();
            }
            Err(e) => self.status_message = Some(e.to_string()),
        }
    }

    /// Move the selected card one column left or right; the cursor follows it
    pub fn shift_selected(&mut self, delta: isize) {
        let Some(key) = self.selected_key() else {
            return;
        };
        match todo_ops::shift(&mut self.workspace.board, key, delta) {
            Ok(_) => {
                self.persist();
                self.focus_card(key);
                self.clamp_cursors();
            }
            Err(e) => self.status_message = Some(e.to_string()),
        }
    }

    /// Write the board to disk, reporting failures in the status row
    pub fn persist(&mut self) {
        if let Err(e) = save_board(&self.workspace.board_dir, &self.workspace.board) {
            warn!("save failed: {}", e);
            self.status_message = Some(format!("save failed: {}", e));
        }
    }

    /// Re-read todos.json after an external change
    pub fn reload_board(&mut self) {
        match load_board(&self.workspace.board_dir) {
            Ok(board) => {
                self.workspace.board = board;
                self.clamp_cursors();
            }
            Err(e) => {
                warn!("reload failed: {}", e);
                self.status_message = Some(format!("reload failed: {}", e));
            }
        }
    }
}

/// Restore UI state from .state.json
pub fn restore_ui_state(app: &mut App) {
    use crate::io::state::read_ui_state;

    let Some(ui_state) = read_ui_state(&app.workspace.board_dir) else {
        return;
    };
    if let Some(status) = Status::parse(&ui_state.column) {
        app.column = status.column();
    }
    for (column, cursor) in &ui_state.cursors {
        if let Some(status) = Status::parse(column) {
            app.cursors[status.column()] = *cursor;
        }
    }
    app.clamp_cursors();
}

/// Save UI state to .state.json
pub fn save_ui_state(app: &App) {
    use crate::io::state::{UiState, write_ui_state};

    let ui_state = UiState {
        column: app.current_status().as_str().to_string(),
        cursors: Status::ALL
            .iter()
            .map(|s| (s.as_str().to_string(), app.cursors[s.column()]))
            .collect(),
    };
    let _ = write_ui_state(&app.workspace.board_dir, &ui_state);
}

fn open_workspace(board_dir: Option<&str>) -> Result<Workspace, Box<dyn std::error::Error>> {
    let start = match board_dir {
        Some(dir) => std::fs::canonicalize(dir)
            .map_err(|e| format!("cannot resolve -C path '{}': {}", dir, e))?,
        None => std::env::current_dir()?,
    };
    let root = board_io::discover_board(&start)?;
    Ok(board_io::open_workspace(&root)?)
}

/// Run the TUI application
pub fn run(board_dir: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let workspace = open_workspace(board_dir)?;
    info!("opening board {:?}", workspace.config.board.name);

    let watcher = start_watcher(&workspace.board_dir);
    let mut app = App::new(workspace);
    restore_ui_state(&mut app);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), DisableMouseCapture, LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app, watcher.as_ref());

    save_ui_state(&app);
    app.close_popup();

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    result
}

fn start_watcher(board_dir: &Path) -> Option<BoardWatcher> {
    match BoardWatcher::start(board_dir) {
        Ok(w) => Some(w),
        Err(e) => {
            warn!("file watcher unavailable: {}", e);
            None
        }
    }
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    watcher: Option<&BoardWatcher>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut save_counter = 0u32;
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(250))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    input::handle_key(app, key);
                    // Debounced state save: every ~5 key presses
                    save_counter += 1;
                    if save_counter >= 5 {
                        save_ui_state(app);
                        save_counter = 0;
                    }
                }
                Event::Mouse(mouse) => input::handle_mouse(app, mouse),
                _ => {}
            }
        }

        // Our own saves also show up here; reloading them is harmless
        if let Some(w) = watcher
            && !w.poll().is_empty()
        {
            app.reload_board();
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
