//! Color settings and their resolved terminal theme.
//!
//! The persisted record stores `#rrggbb` strings per field. Container-level
//! serde defaults give shallow-merge semantics on load: saved fields win,
//! missing fields keep their documented defaults.

use crossterm::style::Color;
use serde::{Deserialize, Serialize};

/// The persisted `settings` record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeSettings {
    pub bg_color: String,
    pub text_color: String,
    pub accent_color: String,
    pub cell_bg_color: String,
    pub cell_border_color: String,
    pub number_color: String,
    pub selected_cell_color: String,
}

impl Default for ThemeSettings {
    fn default() -> Self {
        Self {
            bg_color: "#f8f8f8".to_string(),
            text_color: "#333333".to_string(),
            accent_color: "#0080ff".to_string(),
            cell_bg_color: "#f0f0f0".to_string(),
            cell_border_color: "#cccccc".to_string(),
            number_color: "#333333".to_string(),
            selected_cell_color: "#b3e0ff".to_string(),
        }
    }
}

impl ThemeSettings {
    /// Dark preset for the `--theme dark` flag.
    pub fn dark() -> Self {
        Self {
            bg_color: "#14161e".to_string(),
            text_color: "#e6e6f0".to_string(),
            accent_color: "#50b4ff".to_string(),
            cell_bg_color: "#20202c".to_string(),
            cell_border_color: "#464b5a".to_string(),
            number_color: "#ffffff".to_string(),
            selected_cell_color: "#465a8c".to_string(),
        }
    }

    /// Field labels and values in settings-screen order.
    pub fn fields(&self) -> [(&'static str, &str); 7] {
        [
            ("Background", &self.bg_color),
            ("Text", &self.text_color),
            ("Accent", &self.accent_color),
            ("Cell Background", &self.cell_bg_color),
            ("Cell Border", &self.cell_border_color),
            ("Number", &self.number_color),
            ("Selected Cell", &self.selected_cell_color),
        ]
    }

    /// Mutable access to a field by settings-screen index.
    pub fn field_mut(&mut self, index: usize) -> &mut String {
        match index {
            0 => &mut self.bg_color,
            1 => &mut self.text_color,
            2 => &mut self.accent_color,
            3 => &mut self.cell_bg_color,
            4 => &mut self.cell_border_color,
            5 => &mut self.number_color,
            _ => &mut self.selected_cell_color,
        }
    }
}

/// Parse a `#rrggbb` string. Malformed input yields `None` and the caller
/// falls back to the field's default.
pub fn parse_hex(hex: &str) -> Option<Color> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&digits[0..2], 16).ok()?;
    let g = u8::from_str_radix(&digits[2..4], 16).ok()?;
    let b = u8::from_str_radix(&digits[4..6], 16).ok()?;
    Some(Color::Rgb { r, g, b })
}

/// Lighten (positive delta) or darken (negative) each channel, clamped.
/// Used for the derived hover shades.
pub fn adjust_hex(hex: &str, delta: i16) -> String {
    let Some(Color::Rgb { r, g, b }) = parse_hex(hex) else {
        return hex.to_string();
    };
    let shift = |c: u8| (c as i16 + delta).clamp(0, 255) as u8;
    format!("#{:02x}{:02x}{:02x}", shift(r), shift(g), shift(b))
}

/// Resolved terminal colors, derived from a [`ThemeSettings`] record.
#[derive(Debug, Clone)]
pub struct Theme {
    pub bg: Color,
    pub text: Color,
    pub accent: Color,
    pub accent_hover: Color,
    pub cell_bg: Color,
    pub cell_border: Color,
    pub number: Color,
    pub selected: Color,
}

impl Theme {
    pub fn from_settings(settings: &ThemeSettings) -> Self {
        let defaults = ThemeSettings::default();
        let resolve = |hex: &str, fallback: &str| {
            parse_hex(hex).unwrap_or_else(|| parse_hex(fallback).expect("default hex is valid"))
        };
        Self {
            bg: resolve(&settings.bg_color, &defaults.bg_color),
            text: resolve(&settings.text_color, &defaults.text_color),
            accent: resolve(&settings.accent_color, &defaults.accent_color),
            accent_hover: resolve(
                &adjust_hex(&settings.accent_color, -20),
                &defaults.accent_color,
            ),
            cell_bg: resolve(&settings.cell_bg_color, &defaults.cell_bg_color),
            cell_border: resolve(&settings.cell_border_color, &defaults.cell_border_color),
            number: resolve(&settings.number_color, &defaults.number_color),
            selected: resolve(
                &settings.selected_cell_color,
                &defaults.selected_cell_color,
            ),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_settings(&ThemeSettings::default())
    }
}
