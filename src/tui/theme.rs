use std::collections::HashMap;

use ratatui::style::Color;

use crate::model::{Priority, Status, UiConfig};

/// Parsed color theme for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    pub text: Color,
    pub text_bright: Color,
    pub highlight: Color,
    pub dim: Color,
    pub red: Color,
    pub yellow: Color,
    pub green: Color,
    pub selection_bg: Color,
    pub selection_border: Color,
    /// Tag color per column
    pub status_colors: HashMap<Status, Color>,
    /// Tag color per priority
    pub priority_colors: HashMap<Priority, Color>,
}

impl Default for Theme {
    fn default() -> Self {
        let mut status_colors = HashMap::new();
        status_colors.insert(Status::Todo, Color::Rgb(0x44, 0xDD, 0xFF));
        status_colors.insert(Status::InProgress, Color::Rgb(0xFF, 0xD7, 0x00));
        status_colors.insert(Status::Done, Color::Rgb(0x44, 0xFF, 0x88));
        status_colors.insert(Status::Archived, Color::Rgb(0x7D, 0x78, 0xBF));

        let mut priority_colors = HashMap::new();
        priority_colors.insert(Priority::Low, Color::Rgb(0x44, 0xFF, 0x88));
        priority_colors.insert(Priority::Medium, Color::Rgb(0xFF, 0xD7, 0x00));
        priority_colors.insert(Priority::High, Color::Rgb(0xFF, 0x44, 0x44));

        Theme {
            background: Color::Rgb(0x0C, 0x00, 0x1B),
            text: Color::Rgb(0xB0, 0xAA, 0xFF),
            text_bright: Color::Rgb(0xFF, 0xFF, 0xFF),
            highlight: Color::Rgb(0xFB, 0x41, 0x96),
            dim: Color::Rgb(0x7D, 0x78, 0xBF),
            red: Color::Rgb(0xFF, 0x44, 0x44),
            yellow: Color::Rgb(0xFF, 0xD7, 0x00),
            green: Color::Rgb(0x44, 0xFF, 0x88),
            selection_bg: Color::Rgb(0x3D, 0x14, 0x38),
            selection_border: Color::Rgb(0xFB, 0x41, 0x96),
            status_colors,
            priority_colors,
        }
    }
}

/// Parse a hex color string like "#FF4444" into an RGB Color
fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

impl Theme {
    /// Create a theme from board UI config, falling back to defaults
    pub fn from_config(ui: &UiConfig) -> Self {
        let mut theme = Theme::default();

        // Apply color overrides from [ui.colors]
        for (key, value) in &ui.colors {
            if let Some(color) = parse_hex_color(value) {
                match key.as_str() {
                    "background" => theme.background = color,
                    "text" => theme.text = color,
                    "text_bright" => theme.text_bright = color,
                    "highlight" => theme.highlight = color,
                    "dim" => theme.dim = color,
                    "red" => theme.red = color,
                    "yellow" => theme.yellow = color,
                    "green" => theme.green = color,
                    "selection_bg" => theme.selection_bg = color,
                    "selection_border" => theme.selection_border = color,
                    _ => {}
                }
            }
        }

        for (key, value) in &ui.status_colors {
            if let (Some(status), Some(color)) = (Status::parse(key), parse_hex_color(value)) {
                theme.status_colors.insert(status, color);
            }
        }

        for (key, value) in &ui.priority_colors {
            if let (Some(priority), Some(color)) = (Priority::parse(key), parse_hex_color(value))
            {
                theme.priority_colors.insert(priority, color);
            }
        }

        theme
    }

    pub fn status_color(&self, status: Status) -> Color {
        self.status_colors.get(&status).copied().unwrap_or(self.text)
    }

    pub fn priority_color(&self, priority: Priority) -> Color {
        self.priority_colors
            .get(&priority)
            .copied()
            .unwrap_or(self.text)
    }
}
