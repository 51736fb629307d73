use ratatui::text::Line;

use super::form::ControlId;

/// A rendered option: the drawable line plus the value it stands for.
#[derive(Debug, Clone, PartialEq)]
pub struct OptionNode {
    pub value: String,
    pub line: Line<'static>,
    /// Carries the "selected" marker
    pub selected: bool,
}

/// What a pointer interaction landed on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// A terminal cell
    Cell { x: u16, y: u16 },
    /// A source control, addressed directly (it is hidden while bound, but
    /// can still be the target of programmatic interaction)
    Control(ControlId),
}

/// Part of a widget's proxy hit by a target
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Region {
    Label,
    /// Inside the open dropdown; `value` is the option node under the
    /// pointer, if any
    Dropdown { value: Option<String> },
}

/// The visual proxy of a select widget.
///
/// The widget's state machine only talks to its proxy through this trait,
/// so it can run against a terminal surface or a recording double.
pub trait Surface {
    /// Replace the dropdown content with one node per option
    fn render(&mut self, nodes: Vec<OptionNode>);

    fn set_label(&mut self, text: &str);

    /// Move the "selected" marker to the node carrying `value`
    fn mark_selected(&mut self, value: &str);

    fn set_open(&mut self, open: bool);

    /// Hit-test a target against the label and the (open) dropdown
    fn hit(&self, target: &Target) -> Option<Region>;

    /// Whether the target lies inside the proxy's container
    fn contains(&self, target: &Target) -> bool {
        self.hit(target).is_some()
    }
}
