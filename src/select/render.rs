use std::rc::Rc;

use ratatui::text::{Line, Span};

use super::option::SelectOption;
use super::surface::OptionNode;

/// Per-option rendering strategy
pub type RenderOption = Rc<dyn Fn(&SelectOption) -> OptionNode>;

/// Configuration accepted when binding a widget
#[derive(Clone, Default)]
pub struct SelectConfig {
    /// Used per option instead of `default_render` when present
    pub render_option: Option<RenderOption>,
}

impl SelectConfig {
    pub fn with_renderer(render: impl Fn(&SelectOption) -> OptionNode + 'static) -> Self {
        SelectConfig {
            render_option: Some(Rc::new(render)),
        }
    }
}

impl std::fmt::Debug for SelectConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectConfig")
            .field("render_option", &self.render_option.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

/// Built-in renderer: the plain label
pub fn default_render(option: &SelectOption) -> OptionNode {
    OptionNode {
        value: option.value.clone(),
        line: Line::from(Span::raw(option.label.clone())),
        selected: option.selected,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_render_carries_value_and_marker() {
        let node = default_render(&SelectOption::new("b", "Beta").with_selected(true));
        assert_eq!(node.value, "b");
        assert!(node.selected);
        assert_eq!(node.line.to_string(), "Beta");
    }

    #[test]
    fn config_with_renderer_is_used() {
        let config = SelectConfig::with_renderer(|o| OptionNode {
            value: o.value.clone(),
            line: Line::from(format!("* {}", o.label)),
            selected: o.selected,
        });
        let render = config.render_option.unwrap();
        assert_eq!(render(&SelectOption::new("a", "Alpha")).line.to_string(), "* Alpha");
    }
}
