mod confirm;
mod mouse;
mod navigate;
mod popup;

use crossterm::event::{KeyCode, KeyEvent};

use super::app::App;

use confirm::handle_confirm;
use navigate::handle_navigate;
use popup::handle_popup;

pub use mouse::handle_mouse;

/// Handle a key event: the popup and the delete prompt take all input
/// while they are up.
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }

    if app.confirm_delete.is_some() {
        handle_confirm(app, key);
    } else if app.popup.is_some() {
        handle_popup(app, key);
    } else {
        handle_navigate(app, key);
    }
}
