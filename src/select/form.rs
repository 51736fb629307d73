use std::cell::RefCell;
use std::rc::Rc;

use super::option::{SelectOption, initial_selection};
use super::widget::WidgetId;

/// Identifies a select control within its form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ControlId(u32);

/// Shared handle to a source control. The form and any widget bound to the
/// control both hold one; the control outlives neither.
pub type ControlRef = Rc<RefCell<FormSelect>>;

/// A plain select control: an ordered option list plus a current value.
///
/// This is the "source" a `SelectWidget` shadows. External code reads the
/// current choice through `value()`, whether or not a widget is bound.
#[derive(Debug)]
pub struct FormSelect {
    id: ControlId,
    /// Field name, also used as the styling hook for the proxy
    pub name: String,
    options: Vec<SelectOption>,
    value: String,
    /// Hidden controls are not drawn; a bound widget draws in their place
    pub hidden: bool,
    /// Opt-out marker honoured by `SelectRegistry::init_all`
    pub ignore: bool,
    bound: bool,
}

impl FormSelect {
    fn new(id: ControlId, name: String, mut options: Vec<SelectOption>) -> Self {
        let selected = initial_selection(&options);
        for (i, option) in options.iter_mut().enumerate() {
            option.selected = Some(i) == selected;
        }
        let value = selected
            .map(|i| options[i].value.clone())
            .unwrap_or_default();
        FormSelect {
            id,
            name,
            options,
            value,
            hidden: false,
            ignore: false,
            bound: false,
        }
    }

    pub fn id(&self) -> ControlId {
        self.id
    }

    pub fn options(&self) -> &[SelectOption] {
        &self.options
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Set the current value. Like a native select, a value that matches no
    /// option leaves the control with an empty value and nothing selected.
    pub fn set_value(&mut self, value: &str) {
        let mut matched = false;
        for option in &mut self.options {
            option.selected = !matched && option.value == value;
            matched |= option.selected;
        }
        self.value = if matched {
            value.to_string()
        } else {
            String::new()
        };
    }

    /// Whether a widget has been bound to this control
    pub fn is_bound(&self) -> bool {
        self.bound
    }

    pub(crate) fn set_bound(&mut self, bound: bool) {
        self.bound = bound;
    }
}

/// A single-line or multi-line text input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextField {
    pub name: String,
    pub label: String,
    pub value: String,
    pub multiline: bool,
}

/// One entry of a form, in display order
#[derive(Debug, Clone)]
pub enum Field {
    Text(TextField),
    Select(ControlRef),
    /// The visual proxy of a bound select widget
    Proxy(WidgetId),
}

/// An ordered list of fields: the tree a select widget inserts its proxy into.
#[derive(Debug, Default)]
pub struct Form {
    fields: Vec<Field>,
    next_control: u32,
}

impl Form {
    pub fn new() -> Self {
        Form::default()
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Append a text input
    pub fn push_text(&mut self, name: &str, label: &str, value: &str, multiline: bool) {
        self.fields.push(Field::Text(TextField {
            name: name.to_string(),
            label: label.to_string(),
            value: value.to_string(),
            multiline,
        }));
    }

    /// Append a select control and return a handle to it
    pub fn push_select(&mut self, name: &str, options: Vec<SelectOption>) -> ControlRef {
        let id = ControlId(self.next_control);
        self.next_control += 1;
        let control = Rc::new(RefCell::new(FormSelect::new(id, name.to_string(), options)));
        self.fields.push(Field::Select(Rc::clone(&control)));
        control
    }

    /// Look up a select control by field name
    pub fn select(&self, name: &str) -> Option<ControlRef> {
        self.fields.iter().find_map(|f| match f {
            Field::Select(c) if c.borrow().name == name => Some(Rc::clone(c)),
            _ => None,
        })
    }

    /// All select controls, in document order
    pub fn selects(&self) -> Vec<ControlRef> {
        self.fields
            .iter()
            .filter_map(|f| match f {
                Field::Select(c) => Some(Rc::clone(c)),
                _ => None,
            })
            .collect()
    }

    pub fn text(&self, name: &str) -> Option<&TextField> {
        self.fields.iter().find_map(|f| match f {
            Field::Text(t) if t.name == name => Some(t),
            _ => None,
        })
    }

    pub fn text_mut(&mut self, name: &str) -> Option<&mut TextField> {
        self.fields.iter_mut().find_map(|f| match f {
            Field::Text(t) if t.name == name => Some(t),
            _ => None,
        })
    }

    /// Insert `field` directly after the select control `control`.
    /// Returns false if the control is not part of this form.
    pub fn insert_after_control(&mut self, control: ControlId, field: Field) -> bool {
        let pos = self
            .fields
            .iter()
            .position(|f| matches!(f, Field::Select(c) if c.borrow().id() == control));
        match pos {
            Some(i) => {
                self.fields.insert(i + 1, field);
                true
            }
            None => false,
        }
    }

    /// Remove the proxy field of a widget, if present
    pub fn remove_proxy(&mut self, widget: WidgetId) {
        self.fields
            .retain(|f| !matches!(f, Field::Proxy(id) if *id == widget));
    }
}
