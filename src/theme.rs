use catppuccin::PALETTE;
use ratatui::style::Color;
use ratatui::widgets::BorderType;

/// Convert a catppuccin color to a ratatui color.
const fn catppuccin_to_color(c: &catppuccin::Color) -> Color {
    Color::Rgb(c.rgb.r, c.rgb.g, c.rgb.b)
}

/// Application theme.
///
/// Holds the handful of colors the UI actually uses, so the rest of the
/// code is independent of any specific palette. Use the factory functions
/// like [`Theme::catppuccin_mocha`] for pre-configured themes.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    /// Terminal background
    pub base: Color,
    /// Bars and panels
    pub surface: Color,
    /// Muted chrome (inactive borders, separators)
    pub overlay: Color,
    /// Primary text
    pub text: Color,
    /// Secondary text (placeholders, hints)
    pub subtext: Color,
    /// Focus and branding accent
    pub accent: Color,
    /// Cursor row background
    pub highlight: Color,
    /// Success, confirm-ready
    pub green: Color,
    /// Errors
    pub red: Color,

    pub border_type: BorderType,
}

impl Theme {
    const fn from_catppuccin(flavor: &catppuccin::Flavor) -> Self {
        let c = &flavor.colors;
        Self {
            base: catppuccin_to_color(&c.base),
            surface: catppuccin_to_color(&c.surface0),
            overlay: catppuccin_to_color(&c.overlay0),
            text: catppuccin_to_color(&c.text),
            subtext: catppuccin_to_color(&c.subtext0),
            accent: catppuccin_to_color(&c.lavender),
            highlight: catppuccin_to_color(&c.surface1),
            green: catppuccin_to_color(&c.green),
            red: catppuccin_to_color(&c.red),
            border_type: BorderType::Rounded,
        }
    }

    /// Catppuccin Mocha theme (dark).
    #[must_use]
    pub const fn catppuccin_mocha() -> Self {
        Self::from_catppuccin(&PALETTE.mocha)
    }

    /// Catppuccin Latte theme (light).
    #[must_use]
    pub const fn catppuccin_latte() -> Self {
        Self::from_catppuccin(&PALETTE.latte)
    }

    /// Catppuccin Frappé theme (dark).
    #[must_use]
    pub const fn catppuccin_frappe() -> Self {
        Self::from_catppuccin(&PALETTE.frappe)
    }

    /// Catppuccin Macchiato theme (dark).
    #[must_use]
    pub const fn catppuccin_macchiato() -> Self {
        Self::from_catppuccin(&PALETTE.macchiato)
    }
}

/// Resolve a theme by its configured name. Unknown names fall back to
/// Mocha.
#[must_use]
pub fn theme_from_name(name: &str) -> Theme {
    match name.to_lowercase().as_str() {
        "catppuccin latte" | "latte" => Theme::catppuccin_latte(),
        "catppuccin frappe" | "catppuccin frappé" | "frappe" => Theme::catppuccin_frappe(),
        "catppuccin macchiato" | "macchiato" => Theme::catppuccin_macchiato(),
        _ => Theme::catppuccin_mocha(),
    }
}
