pub mod board_view;
pub mod helpers;
pub mod popup;
pub mod status_row;

#[cfg(test)]
pub mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::widgets::Block;

use super::app::App;

/// Main render function: board, popup on top, status row at the bottom
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    // Layout: board | status row (1 row)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(area);

    board_view::render_board(frame, app, chunks[0]);

    if app.popup.is_some() {
        popup::render_popup(frame, app, chunks[0]);
    }

    status_row::render_status_row(frame, app, chunks[1]);
}
