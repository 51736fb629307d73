use ratatui::layout::{Position, Rect};

use crate::select::{OptionNode, Region, Surface, Target};

/// Terminal proxy of a select widget.
///
/// Holds what the popup renderer draws (label, nodes, open flag) and the
/// screen areas it was last drawn into, which is what clicks are
/// hit-tested against.
#[derive(Debug, Clone, Default)]
pub struct TerminalSurface {
    /// Styling hook: the source control's name
    pub name: String,
    pub label: String,
    pub nodes: Vec<OptionNode>,
    pub open: bool,
    /// Row holding the label; empty until first drawn
    pub label_area: Rect,
    /// Bordered dropdown box, one node per inner row
    pub dropdown_area: Rect,
}

impl TerminalSurface {
    pub fn new(name: &str) -> Self {
        TerminalSurface {
            name: name.to_string(),
            ..Default::default()
        }
    }

    /// Record where the proxy was drawn this frame
    pub fn set_layout(&mut self, label_area: Rect, dropdown_area: Rect) {
        self.label_area = label_area;
        self.dropdown_area = dropdown_area;
    }

    /// Index of the node carrying the "selected" marker
    pub fn selected_index(&self) -> Option<usize> {
        self.nodes.iter().position(|n| n.selected)
    }

    /// Node drawn at terminal row `y`, if the dropdown is open there
    fn node_at(&self, y: u16) -> Option<&OptionNode> {
        // First inner row sits below the top border
        let row = y.checked_sub(self.dropdown_area.y + 1)? as usize;
        self.nodes.get(row)
    }
}

impl Surface for TerminalSurface {
    fn render(&mut self, nodes: Vec<OptionNode>) {
        self.nodes = nodes;
    }

    fn set_label(&mut self, text: &str) {
        self.label = text.to_string();
    }

    fn mark_selected(&mut self, value: &str) {
        for node in &mut self.nodes {
            node.selected = node.value == value;
        }
    }

    fn set_open(&mut self, open: bool) {
        self.open = open;
    }

    fn hit(&self, target: &Target) -> Option<Region> {
        let Target::Cell { x, y } = *target else {
            return None;
        };
        let pos = Position::new(x, y);
        if self.open && self.dropdown_area.contains(pos) {
            return Some(Region::Dropdown {
                value: self.node_at(y).map(|n| n.value.clone()),
            });
        }
        if self.label_area.contains(pos) {
            return Some(Region::Label);
        }
        None
    }
}
