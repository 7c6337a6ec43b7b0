//! Visual theme and color palette

use ratatui::style::{Color, Modifier, Style};

/// Telly color palette
pub struct Theme {
    // Primary branding colors
    pub accent: Color,
    pub background: Color,

    // Status colors
    pub success: Color,
    pub danger: Color,

    // UI element colors
    pub border: Color,
    pub border_focused: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
    pub text_muted: Color,
    pub selection: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            accent: Color::Rgb(35, 134, 54),      // #238636
            background: Color::Rgb(13, 17, 23),   // #0D1117

            success: Color::Rgb(63, 185, 80),     // #3FB950
            danger: Color::Rgb(248, 81, 73),      // #F85149

            border: Color::Rgb(48, 54, 61),          // #30363D
            border_focused: Color::Rgb(35, 134, 54), // #238636
            text_primary: Color::Rgb(201, 209, 217), // #C9D1D9
            text_secondary: Color::Rgb(139, 148, 158), // #8B949E
            text_muted: Color::Rgb(110, 118, 129),   // #6E7681
            selection: Color::Rgb(33, 38, 45),       // #21262D
        }
    }
}

impl Theme {
    /// Get default text style
    pub fn text(&self) -> Style {
        Style::default().fg(self.text_primary)
    }

    /// Get secondary text style
    pub fn text_secondary(&self) -> Style {
        Style::default().fg(self.text_secondary)
    }

    /// Get muted text style
    pub fn text_muted(&self) -> Style {
        Style::default().fg(self.text_muted)
    }

    /// Get title style
    pub fn title(&self) -> Style {
        Style::default()
            .fg(self.text_primary)
            .add_modifier(Modifier::BOLD)
    }

    /// Get border style
    pub fn border(&self) -> Style {
        Style::default().fg(self.border)
    }

    /// Get focused border style
    pub fn border_focused(&self) -> Style {
        Style::default().fg(self.border_focused)
    }

    /// Get success style
    pub fn success(&self) -> Style {
        Style::default().fg(self.success)
    }

    /// Get danger style
    pub fn danger(&self) -> Style {
        Style::default()
            .fg(self.danger)
            .add_modifier(Modifier::BOLD)
    }

    /// Get selection/highlight style
    pub fn selected(&self) -> Style {
        Style::default()
            .bg(self.selection)
            .fg(self.accent)
            .add_modifier(Modifier::BOLD)
    }
}
