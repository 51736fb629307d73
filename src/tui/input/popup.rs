use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::App;
use crate::tui::popup::Focus;

/// Keys while the create/edit popup is open
pub(super) fn handle_popup(app: &mut App, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('s') => app.save_popup(),
            KeyCode::Char('d') => app.delete_from_popup(),
            _ => {}
        }
        return;
    }

    match key.code {
        KeyCode::Esc => {
            // An open dropdown swallows the first Esc
            if !close_dropdowns(app) {
                app.close_popup();
            }
        }
        KeyCode::Tab => move_focus(app, Focus::next),
        KeyCode::BackTab => move_focus(app, Focus::prev),
        _ => {
            let Some(popup) = app.popup.as_ref() else {
                return;
            };
            if popup.focus.is_select() {
                handle_select_key(app, key);
            } else {
                handle_text_key(app, key);
            }
        }
    }
}

/// Close every open dropdown of the popup. Returns whether any was open.
fn close_dropdowns(app: &mut App) -> bool {
    let Some(popup) = app.popup.as_ref() else {
        return false;
    };
    let mut closed = false;
    for id in popup.widgets() {
        if let Some(widget) = app.registry.get_mut(id)
            && widget.is_open()
        {
            widget.close();
            closed = true;
        }
    }
    closed
}

fn move_focus(app: &mut App, step: fn(Focus) -> Focus) {
    let Some(popup) = app.popup.as_mut() else {
        return;
    };
    if let Some(id) = popup.focused_widget()
        && let Some(widget) = app.registry.get_mut(id)
    {
        widget.close();
    }
    popup.focus = step(popup.focus);
}

/// Space toggles, Enter opens or picks, j/k move the highlight
fn handle_select_key(app: &mut App, key: KeyEvent) {
    let Some(popup) = app.popup.as_mut() else {
        return;
    };
    let Some(widget) = popup.focused_widget().and_then(|id| app.registry.get_mut(id)) else {
        return;
    };
    let count = widget.surface().nodes.len();
    let current = widget.surface().selected_index().unwrap_or(0);

    match key.code {
        KeyCode::Char(' ') => {
            widget.toggle();
            popup.dropdown_cursor = current;
        }
        KeyCode::Enter => {
            if widget.is_open() {
                let value = widget
                    .surface()
                    .nodes
                    .get(popup.dropdown_cursor)
                    .map(|n| n.value.clone());
                if let Some(value) = value {
                    widget.select(&value);
                }
            } else {
                widget.open();
                popup.dropdown_cursor = current;
            }
        }
        KeyCode::Char('j') | KeyCode::Down if widget.is_open() && count > 0 => {
            popup.dropdown_cursor = (popup.dropdown_cursor + 1).min(count - 1);
        }
        KeyCode::Char('k') | KeyCode::Up if widget.is_open() => {
            popup.dropdown_cursor = popup.dropdown_cursor.saturating_sub(1);
        }
        _ => {}
    }
}

fn handle_text_key(app: &mut App, key: KeyEvent) {
    let Some(popup) = app.popup.as_mut() else {
        return;
    };
    match key.code {
        KeyCode::Char(c) => {
            if let Some(text) = popup.focused_text_mut() {
                text.push(c);
            }
        }
        KeyCode::Backspace => popup.backspace(),
        KeyCode::Enter => {
            if popup.focus == Focus::Content {
                if let Some(text) = popup.focused_text_mut() {
                    text.push('\n');
                }
            } else {
                popup.focus = popup.focus.next();
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyCode;
    use pretty_assertions::assert_eq;

    use crate::io::board_io::load_board;
    use crate::model::{Priority, Status};
    use crate::tui::input::tests::{ctrl, press, type_str};
    use crate::tui::popup::{Focus, PopupMode};
    use crate::tui::render::test_helpers::*;

    #[test]
    fn create_card_with_keyboard() {
        let (dir, mut app) = app_in_tempdir();
        press(&mut app, KeyCode::Char('n'));
        type_str(&mut app, "Buy milk");
        press(&mut app, KeyCode::Tab);
        type_str(&mut app, "two litres");
        press(&mut app, KeyCode::Tab);

        // Status: open, move down one, pick
        press(&mut app, KeyCode::Char(' '));
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Tab);

        // Priority: Enter opens, k at the top stays, j j picks High
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Char('k'));
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Tab);
        type_str(&mut app, "2025-03-05");
        ctrl(&mut app, 's');

        assert!(app.popup.is_none());
        assert!(app.registry.is_empty());
        let todo = app.workspace.board.get(4).unwrap();
        assert_eq!(todo.title, "Buy milk");
        assert_eq!(todo.content, "two litres");
        assert_eq!(todo.status, Status::InProgress);
        assert_eq!(todo.priority, Priority::High);
        assert_eq!(todo.deadline_display().as_deref(), Some("5 Mar 2025"));
        assert_eq!(app.selected_key(), Some(4));

        let on_disk = load_board(&dir.path().join("board")).unwrap();
        assert_eq!(on_disk.get(4).unwrap().status, Status::InProgress);
    }

    #[test]
    fn space_toggles_focused_select() {
        let mut app = sample_app();
        app.open_popup(PopupMode::Edit(2));
        app.popup.as_mut().unwrap().focus = Focus::Priority;
        let id = app.popup.as_ref().unwrap().priority_widget.unwrap();

        press(&mut app, KeyCode::Char(' '));
        assert!(app.registry.get(id).unwrap().is_open());
        // Highlight starts on the current choice (medium)
        assert_eq!(app.popup.as_ref().unwrap().dropdown_cursor, 1);
        press(&mut app, KeyCode::Char(' '));
        assert!(!app.registry.get(id).unwrap().is_open());
    }

    #[test]
    fn j_on_closed_select_is_ignored() {
        let mut app = sample_app();
        app.open_popup(PopupMode::Edit(2));
        app.popup.as_mut().unwrap().focus = Focus::Status;
        press(&mut app, KeyCode::Char('j'));
        let popup = app.popup.as_ref().unwrap();
        assert_eq!(popup.dropdown_cursor, 0);
        assert_eq!(popup.values().unwrap().status, Some(Status::InProgress));
    }

    #[test]
    fn tab_closes_dropdown_it_leaves() {
        let mut app = sample_app();
        app.open_popup(PopupMode::Edit(2));
        app.popup.as_mut().unwrap().focus = Focus::Status;
        let id = app.popup.as_ref().unwrap().status_widget.unwrap();
        press(&mut app, KeyCode::Char(' '));
        press(&mut app, KeyCode::Tab);
        assert!(!app.registry.get(id).unwrap().is_open());
        assert_eq!(app.popup.as_ref().unwrap().focus, Focus::Priority);
        press(&mut app, KeyCode::BackTab);
        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.popup.as_ref().unwrap().focus, Focus::Content);
    }

    #[test]
    fn esc_closes_dropdown_then_popup() {
        let mut app = sample_app();
        app.open_popup(PopupMode::Edit(2));
        app.popup.as_mut().unwrap().focus = Focus::Status;
        press(&mut app, KeyCode::Char(' '));

        press(&mut app, KeyCode::Esc);
        assert!(app.popup.is_some());
        assert!(app.registry.open_widgets().is_empty());

        press(&mut app, KeyCode::Esc);
        assert!(app.popup.is_none());
        assert!(app.registry.is_empty());
        // Nothing saved
        assert_eq!(app.workspace.board.get(2).unwrap().status, Status::InProgress);
    }

    #[test]
    fn enter_in_content_adds_newline() {
        let mut app = sample_app();
        app.open_popup(PopupMode::Create);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.popup.as_ref().unwrap().focus, Focus::Content);
        type_str(&mut app, "a");
        press(&mut app, KeyCode::Enter);
        type_str(&mut app, "b");
        press(&mut app, KeyCode::Backspace);
        let popup = app.popup.as_ref().unwrap();
        assert_eq!(popup.form.text("content").unwrap().value, "a\n");
    }

    #[test]
    fn ctrl_d_deletes_edited_card() {
        let (_dir, mut app) = app_in_tempdir();
        app.open_popup(PopupMode::Edit(3));
        ctrl(&mut app, 'd');
        assert!(app.popup.is_none());
        assert!(app.workspace.board.get(3).is_none());
    }

    #[test]
    fn ctrl_d_in_create_mode_does_nothing() {
        let mut app = sample_app();
        app.open_popup(PopupMode::Create);
        ctrl(&mut app, 'd');
        assert!(app.popup.is_some());
        assert_eq!(app.workspace.board.len(), 3);
    }

    #[test]
    fn invalid_deadline_keeps_popup_open() {
        let mut app = sample_app();
        app.open_popup(PopupMode::Create);
        app.popup.as_mut().unwrap().focus = Focus::Deadline;
        type_str(&mut app, "next week");
        ctrl(&mut app, 's');
        let popup = app.popup.as_ref().unwrap();
        assert_eq!(
            popup.error.as_deref(),
            Some("invalid date: next week (expected YYYY-MM-DD)")
        );
        assert_eq!(app.workspace.board.len(), 3);
    }
}
