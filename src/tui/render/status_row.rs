use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::App;
use crate::util::unicode;

use super::helpers::spans_width;

const KEY_HINTS: &str = "h/l column  j/k card  n new  e edit  </> move  d delete  q quit";

/// Render the status row (bottom of screen)
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let mut spans = if let Some(key) = app.confirm_delete {
        let title = app
            .workspace
            .board
            .get(key)
            .map_or(String::new(), |t| t.title.clone());
        vec![
            Span::styled(
                format!("Delete #{} {}? ", key, title),
                Style::default().fg(app.theme.red).bg(bg),
            ),
            Span::styled("y/n", Style::default().fg(app.theme.text_bright).bg(bg)),
        ]
    } else if let Some(message) = &app.status_message {
        vec![Span::styled(
            message.clone(),
            Style::default().fg(app.theme.yellow).bg(bg),
        )]
    } else if app.workspace.config.ui.show_key_hints && app.popup.is_none() {
        vec![Span::styled(
            KEY_HINTS,
            Style::default().fg(app.theme.dim).bg(bg),
        )]
    } else {
        Vec::new()
    };

    // Board name on the right, when it fits
    let name = unicode::truncate_to_width(&app.workspace.config.board.name, width / 3);
    let content_width = spans_width(&spans);
    let name_width = unicode::display_width(&name);
    if content_width + name_width + 1 < width {
        let padding = width - content_width - name_width;
        spans.push(Span::styled(" ".repeat(padding), Style::default().bg(bg)));
        spans.push(Span::styled(
            name,
            Style::default().fg(app.theme.dim).bg(bg),
        ));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}
