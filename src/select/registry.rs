use std::rc::Rc;

use indexmap::IndexMap;
use log::{debug, info};

use super::form::{ControlId, ControlRef, Field, Form, FormSelect};
use super::render::SelectConfig;
use super::surface::{Region, Surface, Target};
use super::widget::{SelectWidget, WidgetId};

/// Result of routing a click through the registry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    /// A widget's label or dropdown consumed the click; it did not reach
    /// the outside-click pass.
    Handled(WidgetId),
    /// The click reached the outside-click pass and closed these widgets.
    Outside { closed: Vec<WidgetId> },
}

/// Owns every live select widget and coordinates closing them when the
/// user interacts somewhere else.
pub struct SelectRegistry<S> {
    instances: IndexMap<WidgetId, SelectWidget<S>>,
    next_id: usize,
    /// Latch: the shared outside-click listener is installed at most once
    outside_listener: bool,
}

impl<S> Default for SelectRegistry<S> {
    fn default() -> Self {
        SelectRegistry {
            instances: IndexMap::new(),
            next_id: 0,
            outside_listener: false,
        }
    }
}

impl<S: Surface> SelectRegistry<S> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a widget to `control`. Returns `None` without side effects when
    /// the control is already bound or is not part of `form`.
    pub fn init(
        &mut self,
        form: &mut Form,
        control: &ControlRef,
        config: SelectConfig,
        surface: S,
    ) -> Option<WidgetId> {
        if control.borrow().is_bound() {
            return None;
        }

        // A control outside `form` would get a proxy nobody draws
        let id = WidgetId::from_raw(self.next_id);
        let control_id = control.borrow().id();
        if !form.insert_after_control(control_id, Field::Proxy(id)) {
            debug!("{:?} is not part of the form, not binding", control.borrow().name);
            return None;
        }
        self.next_id += 1;
        control.borrow_mut().set_bound(true);

        let widget = SelectWidget::new(id, Rc::clone(control), config, surface);
        self.instances.insert(id, widget);
        debug!("bound {} to {:?}", id, control.borrow().name);

        self.install_outside_listener();
        Some(id)
    }

    /// Bind every select in `form` that is neither bound nor opted out.
    /// Returns the number of widgets created.
    pub fn init_all(
        &mut self,
        form: &mut Form,
        mut surface_for: impl FnMut(&FormSelect) -> S,
    ) -> usize {
        let mut count = 0;
        for control in form.selects() {
            let eligible = {
                let c = control.borrow();
                !c.is_bound() && !c.ignore
            };
            if !eligible {
                continue;
            }
            let surface = surface_for(&control.borrow());
            if self
                .init(form, &control, SelectConfig::default(), surface)
                .is_some()
            {
                count += 1;
            }
        }
        self.install_outside_listener();
        info!("[Select] Initialized {} custom select components.", count);
        count
    }

    /// Remove a widget: drops it from the registry, takes its proxy out of
    /// the form, and hands the source control back (visible and unbound).
    pub fn dispose(&mut self, form: &mut Form, id: WidgetId) -> bool {
        let Some(widget) = self.instances.shift_remove(&id) else {
            return false;
        };
        {
            let mut control = widget.control().borrow_mut();
            control.set_bound(false);
            control.hidden = false;
        }
        form.remove_proxy(id);
        debug!("disposed {}", id);
        true
    }

    /// Route a click. Open dropdowns are checked first since they are drawn
    /// above other widgets' labels; then labels; anything else is an
    /// outside interaction.
    pub fn dispatch_click(&mut self, target: Target) -> ClickOutcome {
        let hit = self
            .instances
            .iter()
            .find_map(|(id, w)| match w.surface().hit(&target) {
                Some(region @ Region::Dropdown { .. }) => Some((*id, region)),
                _ => None,
            })
            .or_else(|| {
                self.instances
                    .iter()
                    .find_map(|(id, w)| match w.surface().hit(&target) {
                        Some(Region::Label) => Some((*id, Region::Label)),
                        _ => None,
                    })
            });

        match hit {
            Some((id, region)) => {
                if let Some(widget) = self.instances.get_mut(&id) {
                    match region {
                        Region::Label => widget.toggle(),
                        Region::Dropdown { value: Some(value) } => widget.select(&value),
                        Region::Dropdown { value: None } => {}
                    }
                }
                ClickOutcome::Handled(id)
            }
            None => ClickOutcome::Outside {
                closed: self.close_outside(&target),
            },
        }
    }

    /// The shared outside-click pass: close every open widget whose proxy
    /// does not contain `target` and whose source control is not `target`.
    /// Does nothing until a widget has been bound.
    pub fn close_outside(&mut self, target: &Target) -> Vec<WidgetId> {
        if !self.outside_listener {
            return Vec::new();
        }
        let mut closed = Vec::new();
        for (id, widget) in self.instances.iter_mut() {
            if !widget.is_open() {
                continue;
            }
            if widget.surface().contains(target) {
                continue;
            }
            if *target == Target::Control(widget.control().borrow().id()) {
                continue;
            }
            widget.close();
            closed.push(*id);
        }
        closed
    }

    fn install_outside_listener(&mut self) {
        if self.outside_listener {
            return;
        }
        self.outside_listener = true;
        debug!("outside-click listener installed");
    }

    pub fn has_outside_listener(&self) -> bool {
        self.outside_listener
    }

    pub fn get(&self, id: WidgetId) -> Option<&SelectWidget<S>> {
        self.instances.get(&id)
    }

    pub fn get_mut(&mut self, id: WidgetId) -> Option<&mut SelectWidget<S>> {
        self.instances.get_mut(&id)
    }

    /// The widget bound to a given source control
    pub fn widget_for_control(&self, control: ControlId) -> Option<WidgetId> {
        self.instances
            .iter()
            .find(|(_, w)| w.control().borrow().id() == control)
            .map(|(id, _)| *id)
    }

    /// IDs of all widgets whose dropdown is open
    pub fn open_widgets(&self) -> Vec<WidgetId> {
        self.instances
            .iter()
            .filter(|(_, w)| w.is_open())
            .map(|(id, _)| *id)
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SelectWidget<S>> {
        self.instances.values()
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}
