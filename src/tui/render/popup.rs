use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::select::{Field, WidgetId};
use crate::tui::app::App;
use crate::tui::popup::{Focus, PopupMode};
use crate::util::unicode;

use super::helpers::{centered_rect, spans_width};

const POPUP_W: u16 = 60;
/// Width of the label gutter, values start after it
const LABEL_W: u16 = 11;
/// Rows shown for the multi-line content field
const CONTENT_ROWS: usize = 3;

/// Render the create/edit popup over the board, then any open dropdown on
/// top of it. Records where each select proxy was drawn so clicks can be
/// hit-tested against it.
pub fn render_popup(frame: &mut Frame, app: &mut App, area: Rect) {
    let App {
        popup,
        registry,
        theme,
        ..
    } = app;
    let Some(popup) = popup.as_mut() else {
        return;
    };

    let bg = theme.background;
    let inner_w = POPUP_W.min(area.width).saturating_sub(2);
    let value_w = inner_w.saturating_sub(LABEL_W + 1) as usize;

    let label_style = |focused: bool| {
        if focused {
            Style::default()
                .fg(theme.highlight)
                .bg(bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.dim).bg(bg)
        }
    };
    let gutter = |name: &str, focused: bool| {
        Span::styled(
            format!(" {:<width$}", name, width = LABEL_W as usize - 1),
            label_style(focused),
        )
    };
    let cursor = Span::styled("\u{258C}", Style::default().fg(theme.highlight).bg(bg));

    let mut lines: Vec<Line> = vec![Line::from("")];
    // (entry, first row, row count)
    let mut rows: Vec<(Focus, usize, usize)> = Vec::new();
    // (widget, row)
    let mut proxies: Vec<(WidgetId, usize)> = Vec::new();

    for field in popup.form.fields() {
        match field {
            Field::Text(text) => {
                let focus = focus_for(&text.name);
                let focused = focus == Some(popup.focus);
                let start = lines.len();
                let value_style = Style::default().fg(theme.text_bright).bg(bg);

                let mut values: Vec<String> = if text.multiline {
                    unicode::wrap_words(&text.value, value_w.saturating_sub(1))
                } else {
                    vec![unicode::truncate_to_width(&text.value, value_w.saturating_sub(1))]
                };
                if text.multiline {
                    if values.len() > CONTENT_ROWS {
                        values.drain(..values.len() - CONTENT_ROWS);
                    }
                    values.resize(values.len().max(1), String::new());
                }

                let last = values.len() - 1;
                for (i, value) in values.into_iter().enumerate() {
                    let mut spans = vec![if i == 0 {
                        gutter(&text.label, focused)
                    } else {
                        gutter("", false)
                    }];
                    if value.is_empty() && !focused && text.name == "deadline" {
                        spans.push(Span::styled(
                            "YYYY-MM-DD",
                            Style::default().fg(theme.dim).bg(bg),
                        ));
                    } else {
                        spans.push(Span::styled(value, value_style));
                    }
                    if focused && i == last {
                        spans.push(cursor.clone());
                    }
                    lines.push(Line::from(spans));
                }
                if let Some(focus) = focus {
                    rows.push((focus, start, lines.len() - start));
                }
            }
            Field::Select(control) => {
                // Bound controls are hidden; their proxy is drawn instead
                let control = control.borrow();
                if control.hidden {
                    continue;
                }
                lines.push(Line::from(vec![
                    gutter(&capitalize(&control.name), false),
                    Span::styled(
                        control.value().to_string(),
                        Style::default().fg(theme.text).bg(bg),
                    ),
                ]));
            }
            Field::Proxy(id) => {
                let Some(widget) = registry.get(*id) else {
                    continue;
                };
                let focus = popup.focus_for_widget(*id);
                let focused = focus.is_some() && focus == Some(popup.focus);
                let surface = widget.surface();

                let mut spans = vec![gutter(&capitalize(&widget.name()), focused)];
                match surface.selected_index().map(|i| &surface.nodes[i]) {
                    Some(node) => spans.extend(node.line.spans.iter().cloned()),
                    None => spans.push(Span::styled(
                        surface.label.clone(),
                        Style::default().fg(theme.text_bright).bg(bg),
                    )),
                }
                let arrow = if widget.is_open() { " \u{25B4}" } else { " \u{25BE}" };
                spans.push(Span::styled(arrow, label_style(focused)));

                if let Some(focus) = focus {
                    rows.push((focus, lines.len(), 1));
                }
                proxies.push((*id, lines.len()));
                lines.push(Line::from(spans));
            }
        }
    }

    lines.push(Line::from(""));
    if let Some(error) = &popup.error {
        lines.push(Line::from(Span::styled(
            format!(" {}", error),
            Style::default().fg(theme.red).bg(bg),
        )));
    }
    let mut hints = String::from(" Tab next  Space open  Ctrl-S save  Esc close");
    if matches!(popup.mode, PopupMode::Edit(_)) {
        hints.push_str("  Ctrl-D delete");
    }
    lines.push(Line::from(Span::styled(
        hints,
        Style::default().fg(theme.dim).bg(bg),
    )));

    let popup_area = centered_rect(inner_w + 2, lines.len() as u16 + 2, area);
    let inner = Rect::new(
        popup_area.x + 1,
        popup_area.y + 1,
        popup_area.width.saturating_sub(2),
        popup_area.height.saturating_sub(2),
    );

    frame.render_widget(Clear, popup_area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.selection_border).bg(bg))
        .title(Span::styled(
            popup.title(),
            Style::default()
                .fg(theme.text_bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ))
        .style(Style::default().bg(bg));
    frame.render_widget(Paragraph::new(lines).block(block), popup_area);

    popup.area = popup_area;
    popup.field_areas = rows
        .iter()
        .map(|&(focus, row, n)| {
            (
                focus,
                Rect::new(inner.x, inner.y + row as u16, inner.width, n as u16),
            )
        })
        .collect();

    // Lay out every proxy before drawing any dropdown
    let screen = frame.area();
    for &(id, row) in &proxies {
        let Some(widget) = registry.get_mut(id) else {
            continue;
        };
        let label_area = Rect::new(
            inner.x + LABEL_W,
            inner.y + row as u16,
            value_w as u16,
            1,
        );
        let surface = widget.surface();
        let widest = surface
            .nodes
            .iter()
            .map(|n| spans_width(&n.line.spans))
            .max()
            .unwrap_or(0);
        let dropdown_area = Rect::new(
            label_area.x,
            label_area.y + 1,
            widest as u16 + 5, // marker + borders
            surface.nodes.len() as u16 + 2,
        )
        .intersection(screen);
        widget.surface_mut().set_layout(label_area, dropdown_area);
    }

    let focused_widget = popup.focused_widget();
    for &(id, _) in &proxies {
        let Some(widget) = registry.get(id) else {
            continue;
        };
        if !widget.is_open() {
            continue;
        }
        let surface = widget.surface();
        let dd_lines: Vec<Line> = surface
            .nodes
            .iter()
            .enumerate()
            .map(|(i, node)| {
                let row_bg = if Some(id) == focused_widget && i == popup.dropdown_cursor {
                    theme.selection_bg
                } else {
                    bg
                };
                let marker = if node.selected { " \u{2713} " } else { "   " };
                let mut spans = vec![Span::styled(
                    marker,
                    Style::default().fg(theme.green).bg(row_bg),
                )];
                spans.extend(node.line.spans.iter().cloned());
                Line::from(spans).style(Style::default().bg(row_bg))
            })
            .collect();

        frame.render_widget(Clear, surface.dropdown_area);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.dim).bg(bg))
            .style(Style::default().bg(bg));
        frame.render_widget(Paragraph::new(dd_lines).block(block), surface.dropdown_area);
    }
}

fn focus_for(field: &str) -> Option<Focus> {
    Focus::ORDER.into_iter().find(|f| f.field() == field)
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
