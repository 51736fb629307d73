use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::Span;

use crate::model::Priority;
use crate::tui::theme::Theme;
use crate::util::unicode;

/// Priority as a colored tag, e.g. ` high `
pub(super) fn priority_tag(theme: &Theme, priority: Priority) -> Span<'static> {
    Span::styled(
        format!(" {} ", priority.as_str()),
        Style::default()
            .fg(theme.background)
            .bg(theme.priority_color(priority))
            .add_modifier(Modifier::BOLD),
    )
}

/// Compute total display width of a slice of spans
pub(super) fn spans_width(spans: &[Span]) -> usize {
    spans
        .iter()
        .map(|s| unicode::display_width(&s.content))
        .sum()
}

/// A `w` x `h` rect centered in `area`, shrunk to fit
pub(super) fn centered_rect(w: u16, h: u16, area: Rect) -> Rect {
    let w = w.min(area.width);
    let h = h.min(area.height);
    Rect::new(
        area.x + (area.width - w) / 2,
        area.y + (area.height - h) / 2,
        w,
        h,
    )
}
