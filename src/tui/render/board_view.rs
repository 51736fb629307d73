use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::model::Todo;
use crate::ops::todo_ops;
use crate::tui::app::App;
use crate::tui::theme::Theme;
use crate::util::unicode;

use super::helpers::{priority_tag, spans_width};

/// Rows per card: three lines of text plus a gap
const CARD_H: u16 = 4;

/// Render the four columns
pub fn render_board(frame: &mut Frame, app: &mut App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(area);

    let mut card_areas = Vec::new();
    let columns = todo_ops::columns(&app.workspace.board);
    for (index, column) in columns.iter().enumerate() {
        let focused = index == app.column;
        let theme = &app.theme;
        let bg = theme.background;

        let border = if focused { theme.highlight } else { theme.dim };
        let title = Line::from(vec![
            Span::styled(
                format!(" {} ", column.status.label()),
                Style::default()
                    .fg(theme.status_color(column.status))
                    .bg(bg)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("({}) ", column.count()),
                Style::default().fg(theme.dim).bg(bg),
            ),
        ]);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border).bg(bg))
            .title(title)
            .style(Style::default().bg(bg));
        let inner = block.inner(chunks[index]);
        frame.render_widget(block, chunks[index]);

        if column.todos.is_empty() {
            let empty = Paragraph::new(Span::styled(
                " No To-Dos",
                Style::default().fg(theme.dim).bg(bg),
            ));
            frame.render_widget(empty, inner);
            continue;
        }

        let cursor = app.cursors[index];
        let visible = (inner.height / CARD_H).max(1) as usize;
        let offset = (cursor + 1).saturating_sub(visible);

        for (slot, todo) in column.todos.iter().skip(offset).take(visible).enumerate() {
            let y = inner.y + slot as u16 * CARD_H;
            let height = (CARD_H - 1).min(inner.y + inner.height - y);
            let card_area = Rect::new(inner.x, y, inner.width, height);
            let selected = focused && offset + slot == cursor;
            let card = Paragraph::new(card_lines(theme, todo, inner.width as usize, selected));
            frame.render_widget(card, card_area);
            card_areas.push((todo.key, card_area));
        }
    }
    app.card_areas = card_areas;
}

/// The three lines of one card: priority tag and title, content, deadline
fn card_lines(theme: &Theme, todo: &Todo, width: usize, selected: bool) -> Vec<Line<'static>> {
    let bg = if selected {
        theme.selection_bg
    } else {
        theme.background
    };
    let usable = width.saturating_sub(2);

    let marker = if selected {
        Span::styled("\u{258C}", Style::default().fg(theme.selection_border).bg(bg))
    } else {
        Span::styled(" ", Style::default().bg(bg))
    };

    let mut head = vec![marker.clone(), priority_tag(theme, todo.priority)];
    head.push(Span::styled(" ", Style::default().bg(bg)));
    let title_w = usable.saturating_sub(spans_width(&head[1..]));
    head.push(Span::styled(
        unicode::truncate_to_width(&todo.title, title_w),
        Style::default()
            .fg(theme.text_bright)
            .bg(bg)
            .add_modifier(Modifier::BOLD),
    ));

    let first_line = todo.content.lines().find(|l| !l.trim().is_empty());
    let body = match first_line {
        Some(text) => Span::styled(
            unicode::truncate_to_width(text.trim(), usable),
            Style::default().fg(theme.text).bg(bg),
        ),
        None => Span::styled(
            "No content...",
            Style::default()
                .fg(theme.dim)
                .bg(bg)
                .add_modifier(Modifier::ITALIC),
        ),
    };

    let mut foot = vec![
        marker.clone(),
        Span::styled(format!("#{}", todo.key), Style::default().fg(theme.dim).bg(bg)),
    ];
    if let Some(deadline) = todo.deadline_display() {
        foot.push(Span::styled(
            format!("  due {}", deadline),
            Style::default().fg(theme.yellow).bg(bg),
        ));
    }

    vec![
        Line::from(head).style(Style::default().bg(bg)),
        Line::from(vec![marker, body]).style(Style::default().bg(bg)),
        Line::from(foot).style(Style::default().bg(bg)),
    ]
}
