use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::App;

/// y deletes the pending card; any other key cancels
pub(super) fn handle_confirm(app: &mut App, key: KeyEvent) {
    let Some(pending) = app.confirm_delete.take() else {
        return;
    };
    if matches!(key.code, KeyCode::Char('y') | KeyCode::Char('Y')) {
        app.delete_card(pending);
    }
}
