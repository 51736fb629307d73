//! Custom dropdown widgets bound to plain select controls.
//!
//! A `SelectWidget` shadows one `FormSelect`: it hides the control, draws a
//! label plus dropdown through its `Surface`, and writes every selection back
//! onto the control. A `SelectRegistry` owns all widgets and closes open
//! ones when a click lands outside them.

pub mod form;
pub mod option;
pub mod registry;
pub mod render;
pub mod surface;
pub mod widget;

#[cfg(test)]
pub(crate) mod testing;

pub use form::{ControlId, ControlRef, Field, Form, FormSelect, TextField};
pub use option::SelectOption;
pub use registry::{ClickOutcome, SelectRegistry};
pub use render::{RenderOption, SelectConfig, default_render};
pub use surface::{OptionNode, Region, Surface, Target};
pub use widget::{SelectWidget, WidgetId};
