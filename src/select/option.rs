use serde::Serialize;

/// One entry of a select control: the stored value, the text shown for it,
/// and whether it is the current choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    /// Unique within one option set
    pub value: String,
    pub label: String,
    pub selected: bool,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        SelectOption {
            value: value.into(),
            label: label.into(),
            selected: false,
        }
    }

    /// Builder-style flag for the initially chosen option
    pub fn with_selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }
}

/// Index of the option that counts as selected: the first flagged one,
/// falling back to the first option. `None` only for an empty set.
pub fn initial_selection(options: &[SelectOption]) -> Option<usize> {
    options
        .iter()
        .position(|o| o.selected)
        .or(if options.is_empty() { None } else { Some(0) })
}
