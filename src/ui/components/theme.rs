//! Dark palette for the search client, low-saturation base with refined
//! accents for highlights.

use ratatui::style::{Color, Modifier, Style};

#[derive(Clone, Copy, Debug)]
pub struct ThemePalette {
    pub bg: Color,
    pub surface: Color,
    pub fg: Color,
    pub hint: Color,
    pub accent: Color,
    pub accent_alt: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
}

impl ThemePalette {
    pub fn dark() -> Self {
        Self {
            bg: Color::Rgb(26, 27, 38),        // #1a1b26
            surface: Color::Rgb(36, 40, 59),   // #24283b
            fg: Color::Rgb(192, 202, 245),     // #c0caf5
            hint: Color::Rgb(105, 114, 158),   // #69729e
            accent: Color::Rgb(122, 162, 247), // #7aa2f7
            accent_alt: Color::Rgb(187, 154, 247), // #bb9af7
            success: Color::Rgb(115, 218, 202), // #73daca
            warning: Color::Rgb(224, 175, 104), // #e0af68
            error: Color::Rgb(247, 118, 142),  // #f7768e
        }
    }

    pub fn title(self) -> Style {
        Style::default().fg(self.accent).add_modifier(Modifier::BOLD)
    }

    pub fn hint_style(self) -> Style {
        Style::default().fg(self.hint)
    }
}
