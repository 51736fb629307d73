use std::collections::HashMap;

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::model::{Priority, Status, Todo};
use crate::ops::todo_ops::{self, NewTodo, TodoError, TodoUpdate};
use crate::select::{
    ControlRef, Form, OptionNode, SelectConfig, SelectOption, SelectRegistry, WidgetId,
};
use crate::util::unicode;

use super::select_surface::TerminalSurface;
use super::theme::Theme;

/// What the popup submits to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupMode {
    Create,
    Edit(u64),
}

/// Focusable entries of the popup, in Tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Title,
    Content,
    Status,
    Priority,
    Deadline,
}

impl Focus {
    pub const ORDER: [Focus; 5] = [
        Focus::Title,
        Focus::Content,
        Focus::Status,
        Focus::Priority,
        Focus::Deadline,
    ];

    /// Form field name backing this entry
    pub fn field(self) -> &'static str {
        match self {
            Focus::Title => "title",
            Focus::Content => "content",
            Focus::Status => "status",
            Focus::Priority => "priority",
            Focus::Deadline => "deadline",
        }
    }

    pub fn next(self) -> Focus {
        let i = Focus::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Focus::ORDER[(i + 1) % Focus::ORDER.len()]
    }

    pub fn prev(self) -> Focus {
        let i = Focus::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Focus::ORDER[(i + Focus::ORDER.len() - 1) % Focus::ORDER.len()]
    }

    pub fn is_select(self) -> bool {
        matches!(self, Focus::Status | Focus::Priority)
    }
}

/// The create/edit form shown over the board.
///
/// Owns a `Form` whose status and priority selects are shadowed by widgets
/// in the app's registry. The popup must be handed back through `dispose`
/// so those widgets are released.
#[derive(Debug)]
pub struct TodoPopup {
    pub mode: PopupMode,
    pub form: Form,
    pub focus: Focus,
    pub status_widget: Option<WidgetId>,
    pub priority_widget: Option<WidgetId>,
    /// Highlighted row inside the focused open dropdown
    pub dropdown_cursor: usize,
    /// Validation or save error shown in the footer
    pub error: Option<String>,
    /// Screen area of the popup box, set each frame
    pub area: Rect,
    /// Where each entry was drawn, for click-to-focus
    pub field_areas: Vec<(Focus, Rect)>,
}

impl TodoPopup {
    /// Build the form for `todo` (or a blank card) and bind its selects.
    pub fn open(
        registry: &mut SelectRegistry<TerminalSurface>,
        theme: &Theme,
        mode: PopupMode,
        todo: Option<&Todo>,
    ) -> Self {
        let mut form = Form::new();
        form.push_text("title", "Title", todo.map_or("", |t| t.title.as_str()), false);
        form.push_text(
            "content",
            "Content",
            todo.map_or("", |t| t.content.as_str()),
            true,
        );

        let status = todo.map_or(Status::Todo, |t| t.status);
        let status_control = form.push_select(
            "status",
            Status::ALL
                .iter()
                .map(|s| SelectOption::new(s.as_str(), s.label()).with_selected(*s == status))
                .collect(),
        );

        let priority = todo.map_or(Priority::Low, |t| t.priority);
        let priority_control = form.push_select(
            "priority",
            Priority::ALL
                .iter()
                .map(|p| SelectOption::new(p.as_str(), p.label()).with_selected(*p == priority))
                .collect(),
        );

        let deadline = todo
            .and_then(|t| t.deadline)
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default();
        form.push_text("deadline", "Deadline", &deadline, false);

        let status_colors: HashMap<String, Color> = Status::ALL
            .iter()
            .map(|s| (s.as_str().to_string(), theme.status_color(*s)))
            .collect();
        let priority_colors: HashMap<String, Color> = Priority::ALL
            .iter()
            .map(|p| (p.as_str().to_string(), theme.priority_color(*p)))
            .collect();

        let status_surface = TerminalSurface::new(&status_control.borrow().name);
        let status_widget = registry.init(
            &mut form,
            &status_control,
            tag_config(status_colors, theme.background),
            status_surface,
        );
        let priority_surface = TerminalSurface::new(&priority_control.borrow().name);
        let priority_widget = registry.init(
            &mut form,
            &priority_control,
            tag_config(priority_colors, theme.background),
            priority_surface,
        );
        // Any other select in the form gets a plain widget
        registry.init_all(&mut form, |control| TerminalSurface::new(&control.name));

        TodoPopup {
            mode,
            form,
            focus: Focus::Title,
            status_widget,
            priority_widget,
            dropdown_cursor: 0,
            error: None,
            area: Rect::default(),
            field_areas: Vec::new(),
        }
    }

    /// Release every widget bound to this popup's form and hand the source
    /// controls back
    pub fn dispose(mut self, registry: &mut SelectRegistry<TerminalSurface>) {
        for control in self.form.selects() {
            let bound = registry.widget_for_control(control.borrow().id());
            if let Some(id) = bound {
                registry.dispose(&mut self.form, id);
            }
        }
    }

    /// IDs of the widgets bound by this popup
    pub fn widgets(&self) -> Vec<WidgetId> {
        [self.status_widget, self.priority_widget]
            .into_iter()
            .flatten()
            .collect()
    }

    /// Widget shadowing the focused select, if a select is focused
    pub fn focused_widget(&self) -> Option<WidgetId> {
        match self.focus {
            Focus::Status => self.status_widget,
            Focus::Priority => self.priority_widget,
            _ => None,
        }
    }

    /// Entry backed by a given widget
    pub fn focus_for_widget(&self, id: WidgetId) -> Option<Focus> {
        if self.status_widget == Some(id) {
            Some(Focus::Status)
        } else if self.priority_widget == Some(id) {
            Some(Focus::Priority)
        } else {
            None
        }
    }

    /// Text buffer of the focused entry, if it is a text input
    pub fn focused_text_mut(&mut self) -> Option<&mut String> {
        if self.focus.is_select() {
            return None;
        }
        self.form
            .text_mut(self.focus.field())
            .map(|field| &mut field.value)
    }

    /// Remove the last grapheme of the focused text input
    pub fn backspace(&mut self) {
        let Some(text) = self.focused_text_mut() else {
            return;
        };
        let end = text.len();
        if let Some(start) = unicode::prev_grapheme_boundary(text.as_str(), end) {
            text.truncate(start);
        }
    }

    fn text_value(&self, name: &str) -> String {
        self.form
            .text(name)
            .map(|f| f.value.clone())
            .unwrap_or_default()
    }

    fn select_value(&self, name: &str) -> String {
        self.form
            .select(name)
            .map(|c: ControlRef| c.borrow().value().to_string())
            .unwrap_or_default()
    }

    /// Read the form back into card fields. Select values are read from the
    /// source controls, which the widgets keep in sync.
    pub fn values(&self) -> Result<NewTodo, TodoError> {
        Ok(NewTodo {
            title: self.text_value("title").trim().to_string(),
            content: self.text_value("content"),
            status: Some(todo_ops::parse_status(&self.select_value("status"))?),
            priority: Some(todo_ops::parse_priority(&self.select_value("priority"))?),
            deadline: todo_ops::parse_deadline(&self.text_value("deadline"))?,
        })
    }

    /// Form values as a full update of an existing card
    pub fn update(&self) -> Result<TodoUpdate, TodoError> {
        let new = self.values()?;
        let title = if new.title.is_empty() {
            todo_ops::DEFAULT_TITLE.to_string()
        } else {
            new.title
        };
        Ok(TodoUpdate {
            title: Some(title),
            content: Some(new.content),
            status: new.status,
            priority: new.priority,
            deadline: Some(new.deadline),
        })
    }

    pub fn title(&self) -> String {
        match self.mode {
            PopupMode::Create => " New To-Do ".to_string(),
            PopupMode::Edit(key) => format!(" Edit #{} ", key),
        }
    }
}

/// Renderer drawing each option as a colored tag, keyed by option value
fn tag_config(colors: HashMap<String, Color>, fg: Color) -> SelectConfig {
    SelectConfig::with_renderer(move |option: &SelectOption| {
        let bg = colors.get(&option.value).copied().unwrap_or(Color::Reset);
        OptionNode {
            value: option.value.clone(),
            line: Line::from(Span::styled(
                format!(" {} ", option.label),
                Style::default()
                    .fg(fg)
                    .bg(bg)
                    .add_modifier(Modifier::BOLD),
            )),
            selected: option.selected,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::select::Field;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn sample_todo() -> Todo {
        Todo {
            key: 4,
            title: "Ship it".into(),
            content: "Release notes".into(),
            status: Status::InProgress,
            priority: Priority::High,
            created_at: NaiveDate::from_ymd_opt(2025, 1, 2).unwrap(),
            deadline: NaiveDate::from_ymd_opt(2025, 3, 5),
        }
    }

    #[test]
    fn open_binds_both_selects_after_their_controls() {
        let mut registry = SelectRegistry::new();
        let todo = sample_todo();
        let popup = TodoPopup::open(
            &mut registry,
            &Theme::default(),
            PopupMode::Edit(4),
            Some(&todo),
        );

        assert_eq!(registry.len(), 2);
        let names: Vec<String> = popup
            .form
            .fields()
            .iter()
            .map(|f| match f {
                Field::Text(t) => t.name.clone(),
                Field::Select(c) => c.borrow().name.clone(),
                Field::Proxy(_) => "proxy".into(),
            })
            .collect();
        assert_eq!(
            names,
            vec!["title", "content", "status", "proxy", "priority", "proxy", "deadline"]
        );

        let status = registry.get(popup.status_widget.unwrap()).unwrap();
        assert_eq!(status.label(), "In Progress");
        assert_eq!(status.surface().label, "In Progress");
        let priority = registry.get(popup.priority_widget.unwrap()).unwrap();
        assert_eq!(priority.label(), "High");
    }

    #[test]
    fn open_leaves_no_select_unbound() {
        let mut registry = SelectRegistry::new();
        let popup = TodoPopup::open(&mut registry, &Theme::default(), PopupMode::Create, None);

        assert_eq!(registry.len(), 2);
        assert!(popup.form.selects().iter().all(|c| c.borrow().is_bound()));
        for id in popup.widgets() {
            let widget = registry.get(id).unwrap();
            assert_eq!(widget.surface().name, widget.name());
        }
        let names: Vec<String> = popup
            .widgets()
            .into_iter()
            .map(|id| registry.get(id).unwrap().name())
            .collect();
        assert_eq!(names, vec!["status", "priority"]);
    }

    #[test]
    fn options_render_as_tags() {
        let mut registry = SelectRegistry::new();
        let popup = TodoPopup::open(&mut registry, &Theme::default(), PopupMode::Create, None);
        let status = registry.get(popup.status_widget.unwrap()).unwrap();
        let texts: Vec<String> = status
            .surface()
            .nodes
            .iter()
            .map(|n| n.line.to_string())
            .collect();
        assert_eq!(texts, vec![" To-Do ", " In Progress ", " Done ", " Archived "]);
        let bg = status.surface().nodes[1].line.spans[0].style.bg;
        assert_eq!(bg, Some(Theme::default().status_color(Status::InProgress)));
    }

    #[test]
    fn values_follow_widget_selection() {
        let mut registry = SelectRegistry::new();
        let mut popup = TodoPopup::open(&mut registry, &Theme::default(), PopupMode::Create, None);
        popup.form.text_mut("title").unwrap().value = "  Buy milk ".into();
        popup.form.text_mut("deadline").unwrap().value = "2025-03-05".into();
        registry
            .get_mut(popup.priority_widget.unwrap())
            .unwrap()
            .select("medium");

        let values = popup.values().unwrap();
        assert_eq!(values.title, "Buy milk");
        assert_eq!(values.status, Some(Status::Todo));
        assert_eq!(values.priority, Some(Priority::Medium));
        assert_eq!(values.deadline, NaiveDate::from_ymd_opt(2025, 3, 5));
    }

    #[test]
    fn bad_deadline_is_rejected() {
        let mut registry = SelectRegistry::new();
        let mut popup = TodoPopup::open(&mut registry, &Theme::default(), PopupMode::Create, None);
        popup.form.text_mut("deadline").unwrap().value = "5 March".into();
        assert!(matches!(popup.values(), Err(TodoError::InvalidDate(_))));
    }

    #[test]
    fn update_replaces_blank_title_and_clears_deadline() {
        let mut registry = SelectRegistry::new();
        let todo = sample_todo();
        let mut popup = TodoPopup::open(
            &mut registry,
            &Theme::default(),
            PopupMode::Edit(4),
            Some(&todo),
        );
        popup.form.text_mut("title").unwrap().value = "   ".into();
        popup.form.text_mut("deadline").unwrap().value.clear();

        let update = popup.update().unwrap();
        assert_eq!(update.title.as_deref(), Some(todo_ops::DEFAULT_TITLE));
        assert_eq!(update.deadline, Some(None));
        assert_eq!(update.status, Some(Status::InProgress));
    }

    #[test]
    fn dispose_releases_widgets() {
        let mut registry = SelectRegistry::new();
        let popup = TodoPopup::open(&mut registry, &Theme::default(), PopupMode::Create, None);
        let status = popup.form.select("status").unwrap();
        popup.dispose(&mut registry);

        assert!(registry.is_empty());
        assert!(!status.borrow().is_bound());
        assert!(!status.borrow().hidden);
    }

    #[test]
    fn focus_cycles_in_tab_order() {
        assert_eq!(Focus::Title.next(), Focus::Content);
        assert_eq!(Focus::Deadline.next(), Focus::Title);
        assert_eq!(Focus::Title.prev(), Focus::Deadline);
        assert!(Focus::Priority.is_select());
        assert!(!Focus::Content.is_select());
    }

    #[test]
    fn backspace_removes_one_grapheme() {
        let mut registry = SelectRegistry::new();
        let mut popup = TodoPopup::open(&mut registry, &Theme::default(), PopupMode::Create, None);
        popup.form.text_mut("title").unwrap().value = "cafe\u{301}".into();
        popup.backspace();
        assert_eq!(popup.form.text("title").unwrap().value, "caf");

        popup.focus = Focus::Status;
        popup.backspace();
        assert_eq!(popup.form.text("title").unwrap().value, "caf");
    }
}
