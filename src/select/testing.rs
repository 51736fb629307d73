use super::surface::{OptionNode, Region, Surface, Target};

/// In-memory surface for state-machine tests.
///
/// The label occupies row `row`; when open, option `i` occupies row
/// `row + 1 + i`. Columns are ignored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordingSurface {
    pub row: u16,
    pub nodes: Vec<OptionNode>,
    pub label: String,
    pub open: bool,
}

impl RecordingSurface {
    pub fn at_row(row: u16) -> Self {
        RecordingSurface {
            row,
            ..Default::default()
        }
    }

    /// Values of the nodes carrying the "selected" marker
    pub fn selected_values(&self) -> Vec<&str> {
        self.nodes
            .iter()
            .filter(|n| n.selected)
            .map(|n| n.value.as_str())
            .collect()
    }
}

impl Surface for RecordingSurface {
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
        let Target::Cell { y, .. } = *target else {
            return None;
        };
        if y == self.row {
            return Some(Region::Label);
        }
        if self.open && y > self.row {
            let index = (y - self.row - 1) as usize;
            if index < self.nodes.len() {
                return Some(Region::Dropdown {
                    value: Some(self.nodes[index].value.clone()),
                });
            }
        }
        None
    }
}
