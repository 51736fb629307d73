use std::rc::Rc;

use log::debug;

use super::form::ControlRef;
use super::option::{SelectOption, initial_selection};
use super::render::{RenderOption, SelectConfig, default_render};
use super::surface::Surface;

/// Identifies a widget within its registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WidgetId(usize);

impl WidgetId {
    pub(crate) fn from_raw(raw: usize) -> Self {
        WidgetId(raw)
    }
}

impl std::fmt::Display for WidgetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "select#{}", self.0)
    }
}

/// A dropdown that shadows a source select control.
///
/// The widget reads the control's options once, hides the control, and
/// keeps the control's value in sync with its own selection. All drawing
/// goes through the `Surface` it owns.
pub struct SelectWidget<S> {
    id: WidgetId,
    control: ControlRef,
    options: Vec<SelectOption>,
    is_open: bool,
    surface: S,
}

impl<S: Surface> SelectWidget<S> {
    /// Build the widget over `control`. Registration and insertion into the
    /// form are done by `SelectRegistry::init`.
    pub fn new(id: WidgetId, control: ControlRef, config: SelectConfig, mut surface: S) -> Self {
        let mut options = control.borrow().options().to_vec();
        let selected = initial_selection(&options);
        for (i, option) in options.iter_mut().enumerate() {
            option.selected = Some(i) == selected;
        }

        control.borrow_mut().hidden = true;

        let render_option: RenderOption = config
            .render_option
            .unwrap_or_else(|| Rc::new(default_render));
        surface.render(options.iter().map(|o| render_option(o)).collect());
        // An empty option set leaves the label blank
        let label = selected.map_or("", |i| options[i].label.as_str());
        surface.set_label(label);
        surface.set_open(false);

        SelectWidget {
            id,
            control,
            options,
            is_open: false,
            surface,
        }
    }

    pub fn id(&self) -> WidgetId {
        self.id
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn options(&self) -> &[SelectOption] {
        &self.options
    }

    /// The currently selected option (`None` only for an empty option set)
    pub fn selected(&self) -> Option<&SelectOption> {
        self.options.iter().find(|o| o.selected)
    }

    /// Label text currently shown
    pub fn label(&self) -> &str {
        self.selected().map_or("", |o| o.label.as_str())
    }

    /// The bound source control
    pub fn control(&self) -> &ControlRef {
        &self.control
    }

    /// The source control's name (styling hook)
    pub fn name(&self) -> String {
        self.control.borrow().name.clone()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn toggle(&mut self) {
        if self.is_open {
            self.close();
        } else {
            self.open();
        }
    }

    /// Show the dropdown. Other widgets are left as they are.
    pub fn open(&mut self) {
        self.surface.set_open(true);
        self.is_open = true;
        debug!("{} opened", self.id);
    }

    /// Hide the dropdown; does nothing when already closed.
    pub fn close(&mut self) {
        if !self.is_open {
            return;
        }
        self.surface.set_open(false);
        self.is_open = false;
        debug!("{} closed", self.id);
    }

    /// Make `value` the single selected option, mirror it onto the source
    /// control, and close. Values matching no option are ignored.
    pub fn select(&mut self, value: &str) {
        let Some(index) = self.options.iter().position(|o| o.value == value) else {
            return;
        };

        for (i, option) in self.options.iter_mut().enumerate() {
            option.selected = i == index;
        }

        let option = &self.options[index];
        self.surface.mark_selected(&option.value);
        self.surface.set_label(&option.label);
        self.control.borrow_mut().set_value(value);
        debug!("{} selected {:?}", self.id, value);

        self.close();
    }
}

impl<S: std::fmt::Debug> std::fmt::Debug for SelectWidget<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectWidget")
            .field("id", &self.id)
            .field("options", &self.options)
            .field("is_open", &self.is_open)
            .field("surface", &self.surface)
            .finish()
    }
}
