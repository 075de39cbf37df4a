//! Theme definitions for codemate
//!
//! Five built-in themes: Gruvbox, Nord, Catppuccin, Tokyo Night and
//! Transparent. One theme instance – applied globally to every screen.

use crate::config::ThemeName;
use ratatui::style::{Color, Modifier, Style};

/// Complete theme with all required colors
#[derive(Debug, Clone)]
pub struct Theme {
    // Base colors
    pub bg: Color,
    pub fg: Color,
    pub fg_dim: Color,

    // Accent color
    pub accent: Color,

    // Status colors
    pub success: Color,
    pub error: Color,

    // UI element colors
    pub border: Color,
    pub border_focused: Color,
    pub selection_bg: Color,
    pub selection_fg: Color,

    // Internal flag for transparent mode
    is_transparent: bool,
}

impl Theme {
    /// Create a theme from a theme name
    pub fn from_name(name: ThemeName) -> Self {
        match name {
            ThemeName::Gruvbox => Self::gruvbox(),
            ThemeName::Nord => Self::nord(),
            ThemeName::Catppuccin => Self::catppuccin(),
            ThemeName::TokyoNight => Self::tokyo_night(),
            ThemeName::Transparent => Self::transparent(),
        }
    }

    /// Gruvbox dark theme (default)
    pub fn gruvbox() -> Self {
        Self {
            bg: Color::Rgb(40, 40, 40),
            fg: Color::Rgb(235, 219, 178),
            fg_dim: Color::Rgb(146, 131, 116),
            accent: Color::Rgb(254, 128, 25),
            success: Color::Rgb(184, 187, 38),
            error: Color::Rgb(251, 73, 52),
            border: Color::Rgb(80, 73, 69),
            border_focused: Color::Rgb(168, 153, 132),
            selection_bg: Color::Rgb(80, 73, 69),
            selection_fg: Color::Rgb(235, 219, 178),
            is_transparent: false,
        }
    }

    /// Nord theme
    pub fn nord() -> Self {
        Self {
            bg: Color::Rgb(46, 52, 64),
            fg: Color::Rgb(236, 239, 244),
            fg_dim: Color::Rgb(76, 86, 106),
            accent: Color::Rgb(136, 192, 208),
            success: Color::Rgb(163, 190, 140),
            error: Color::Rgb(191, 97, 106),
            border: Color::Rgb(59, 66, 82),
            border_focused: Color::Rgb(136, 192, 208),
            selection_bg: Color::Rgb(76, 86, 106),
            selection_fg: Color::Rgb(236, 239, 244),
            is_transparent: false,
        }
    }

    /// Catppuccin Mocha theme
    pub fn catppuccin() -> Self {
        Self {
            bg: Color::Rgb(30, 30, 46),
            fg: Color::Rgb(205, 214, 244),
            fg_dim: Color::Rgb(108, 112, 134),
            accent: Color::Rgb(137, 180, 250),  // blue
            success: Color::Rgb(166, 227, 161), // green
            error: Color::Rgb(243, 139, 168),   // red
            border: Color::Rgb(69, 71, 90),     // surface1
            border_focused: Color::Rgb(137, 180, 250),
            selection_bg: Color::Rgb(69, 71, 90),
            selection_fg: Color::Rgb(205, 214, 244),
            is_transparent: false,
        }
    }

    /// Tokyo Night theme
    pub fn tokyo_night() -> Self {
        Self {
            bg: Color::Rgb(26, 27, 38),
            fg: Color::Rgb(192, 202, 245),
            fg_dim: Color::Rgb(86, 95, 137),
            accent: Color::Rgb(122, 162, 247),  // blue
            success: Color::Rgb(158, 206, 106), // green
            error: Color::Rgb(247, 118, 142),   // red
            border: Color::Rgb(41, 46, 66),     // bg_highlight
            border_focused: Color::Rgb(122, 162, 247),
            selection_bg: Color::Rgb(41, 46, 66),
            selection_fg: Color::Rgb(192, 202, 245),
            is_transparent: false,
        }
    }

    /// Transparent theme (uses terminal colors)
    pub fn transparent() -> Self {
        Self {
            bg: Color::Reset,
            fg: Color::White,
            fg_dim: Color::Gray,
            accent: Color::Cyan,
            success: Color::Green,
            error: Color::Red,
            border: Color::DarkGray,
            border_focused: Color::Cyan,
            selection_bg: Color::Reset,
            selection_fg: Color::White,
            is_transparent: true,
        }
    }

    // === STYLE HELPERS ===

    pub fn text(&self) -> Style {
        if self.is_transparent {
            Style::default().fg(self.fg)
        } else {
            Style::default().fg(self.fg).bg(self.bg)
        }
    }

    pub fn text_dim(&self) -> Style {
        if self.is_transparent {
            Style::default().fg(self.fg_dim)
        } else {
            Style::default().fg(self.fg_dim).bg(self.bg)
        }
    }

    pub fn title(&self) -> Style {
        if self.is_transparent {
            Style::default()
                .fg(self.accent)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
                .fg(self.accent)
                .bg(self.bg)
                .add_modifier(Modifier::BOLD)
        }
    }

    pub fn selected(&self) -> Style {
        if self.is_transparent {
            Style::default()
                .fg(self.selection_fg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
                .fg(self.selection_fg)
                .bg(self.selection_bg)
                .add_modifier(Modifier::BOLD)
        }
    }

    pub fn border(&self) -> Style {
        if self.is_transparent {
            Style::default().fg(self.border)
        } else {
            Style::default().fg(self.border).bg(self.bg)
        }
    }

    pub fn border_focused(&self) -> Style {
        if self.is_transparent {
            Style::default().fg(self.border_focused)
        } else {
            Style::default().fg(self.border_focused).bg(self.bg)
        }
    }

    pub fn tab_inactive(&self) -> Style {
        if self.is_transparent {
            Style::default().fg(self.fg_dim)
        } else {
            Style::default().fg(self.fg_dim).bg(self.bg)
        }
    }

    pub fn tab_active(&self) -> Style {
        if self.is_transparent {
            Style::default()
                .fg(self.accent)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
                .fg(self.accent)
                .bg(self.bg)
                .add_modifier(Modifier::BOLD)
        }
    }

    pub fn success(&self) -> Style {
        if self.is_transparent {
            Style::default().fg(self.success)
        } else {
            Style::default().fg(self.success).bg(self.bg)
        }
    }

    pub fn error(&self) -> Style {
        if self.is_transparent {
            Style::default().fg(self.error)
        } else {
            Style::default().fg(self.error).bg(self.bg)
        }
    }

    pub fn block_style(&self) -> Style {
        if self.is_transparent {
            Style::default()
        } else {
            Style::default().bg(self.bg)
        }
    }
}
