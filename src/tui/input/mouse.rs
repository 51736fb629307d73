use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Position;

use crate::select::{ClickOutcome, Target};
use crate::tui::app::App;
use crate::tui::popup::PopupMode;

/// Left clicks only. With the popup up, clicks go through the select
/// registry and a click outside the popup closes it; on the board, clicking
/// a card opens it.
pub fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
        return;
    }
    let pos = Position::new(mouse.column, mouse.row);

    if app.popup.is_some() {
        click_in_popup(app, pos);
        return;
    }
    if app.confirm_delete.is_some() {
        return;
    }

    let hit = app
        .card_areas
        .iter()
        .find(|(_, area)| area.contains(pos))
        .map(|(key, _)| *key);
    if let Some(key) = hit {
        app.status_message = None;
        app.focus_card(key);
        app.open_popup(PopupMode::Edit(key));
    }
}

fn click_in_popup(app: &mut App, pos: Position) {
    let outcome = app.registry.dispatch_click(Target::Cell {
        x: pos.x,
        y: pos.y,
    });
    let Some(popup) = app.popup.as_mut() else {
        return;
    };

    match outcome {
        ClickOutcome::Handled(id) => {
            if let Some(focus) = popup.focus_for_widget(id) {
                popup.focus = focus;
            }
            if let Some(widget) = app.registry.get(id)
                && widget.is_open()
            {
                popup.dropdown_cursor = widget.surface().selected_index().unwrap_or(0);
            }
        }
        ClickOutcome::Outside { .. } => {
            // The board behind the popup acts as its overlay: a click there
            // dismisses the popup without saving
            if !popup.area.contains(pos) {
                app.close_popup();
                return;
            }
            // Clicking a text entry focuses it
            if let Some(focus) = popup
                .field_areas
                .iter()
                .find(|(_, area)| area.contains(pos))
                .map(|(focus, _)| *focus)
            {
                popup.focus = focus;
            }
        }
    }
}
