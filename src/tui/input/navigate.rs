use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::App;
use crate::tui::popup::PopupMode;

/// Keys on the board itself
pub(super) fn handle_navigate(app: &mut App, key: KeyEvent) {
    app.status_message = None;

    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('h') | KeyCode::Left => app.move_column(-1),
        KeyCode::Char('l') | KeyCode::Right => app.move_column(1),
        KeyCode::Char('j') | KeyCode::Down => app.move_cursor(1),
        KeyCode::Char('k') | KeyCode::Up => app.move_cursor(-1),
        KeyCode::Char('n') => app.open_popup(PopupMode::Create),
        KeyCode::Enter | KeyCode::Char('e') => {
            if let Some(key) = app.selected_key() {
                app.open_popup(PopupMode::Edit(key));
            }
        }
        KeyCode::Char('<') => app.shift_selected(-1),
        KeyCode::Char('>') => app.shift_selected(1),
        KeyCode::Char('d') => app.confirm_delete = app.selected_key(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyCode;
    use pretty_assertions::assert_eq;

    use crate::model::Status;
    use crate::tui::input::tests::press;
    use crate::tui::popup::PopupMode;
    use crate::tui::render::test_helpers::*;

    #[test]
    fn hjkl_moves_between_columns_and_cards() {
        let mut app = sample_app();
        press(&mut app, KeyCode::Char('l'));
        assert_eq!(app.current_status(), Status::InProgress);
        press(&mut app, KeyCode::Char('l'));
        press(&mut app, KeyCode::Char('l'));
        press(&mut app, KeyCode::Char('l'));
        assert_eq!(app.current_status(), Status::Archived);
        press(&mut app, KeyCode::Char('h'));
        assert_eq!(app.current_status(), Status::Done);
        // Single card: j stays put
        press(&mut app, KeyCode::Char('j'));
        assert_eq!(app.selected_key(), Some(3));
    }

    #[test]
    fn enter_opens_selected_card() {
        let mut app = sample_app();
        press(&mut app, KeyCode::Char('l'));
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.popup.as_ref().unwrap().mode, PopupMode::Edit(2));
    }

    #[test]
    fn enter_on_empty_column_does_nothing() {
        let mut app = sample_app();
        app.column = Status::Archived.column();
        press(&mut app, KeyCode::Char('e'));
        assert!(app.popup.is_none());
    }

    #[test]
    fn n_opens_create_popup() {
        let mut app = sample_app();
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.popup.as_ref().unwrap().mode, PopupMode::Create);
        assert_eq!(app.registry.len(), 2);
    }

    #[test]
    fn d_asks_before_deleting() {
        let (_dir, mut app) = app_in_tempdir();
        press(&mut app, KeyCode::Char('d'));
        assert_eq!(app.confirm_delete, Some(1));
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.confirm_delete, None);
        assert!(app.workspace.board.get(1).is_some());

        press(&mut app, KeyCode::Char('d'));
        press(&mut app, KeyCode::Char('y'));
        assert!(app.workspace.board.get(1).is_none());
        assert!(app.popup.is_none());
    }

    #[test]
    fn angle_brackets_move_card() {
        let (_dir, mut app) = app_in_tempdir();
        press(&mut app, KeyCode::Char('>'));
        press(&mut app, KeyCode::Char('>'));
        assert_eq!(app.workspace.board.get(1).unwrap().status, Status::Done);
        press(&mut app, KeyCode::Char('<'));
        assert_eq!(
            app.workspace.board.get(1).unwrap().status,
            Status::InProgress
        );
        assert_eq!(app.selected_key(), Some(1));
    }

    #[test]
    fn q_quits() {
        let mut app = sample_app();
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }
}
