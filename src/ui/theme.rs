//! Color Scheme
//!
//! Dashboard palette, optionally overridden from a JSON theme file.

use ratatui::style::Color;
use serde::Deserialize;

use crate::app::{ConfigError, ConfigResult};
use crate::ui::renderer::Renderer;

/// Colors used by the login form and dashboard chrome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorScheme {
    pub background: Color,
    pub field_border_focused: Color,
    pub field_border_unfocused: Color,
    pub confirm_light: Color,
    pub confirm_dark: Color,
    pub cancel_light: Color,
    pub cancel_dark: Color,
    pub error: Color,
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self {
            background: Renderer::hex_color(0x1a1b26),
            field_border_focused: Renderer::hex_color(0x7aa2f7),
            field_border_unfocused: Renderer::hex_color(0x565f89),
            confirm_light: Renderer::hex_color(0x9ece6a),
            confirm_dark: Renderer::hex_color(0x73a942),
            cancel_light: Renderer::hex_color(0xf7768e),
            cancel_dark: Renderer::hex_color(0xdb4b5b),
            error: Color::Red,
        }
    }
}

/// Theme file layout. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeFile {
    pub background: Option<String>,
    pub text_field_border_focused: Option<String>,
    pub text_field_border_unfocused: Option<String>,
    pub confirm_light: Option<String>,
    pub confirm_dark: Option<String>,
    pub cancel_light: Option<String>,
    pub cancel_dark: Option<String>,
    pub error: Option<String>,
}

impl ColorScheme {
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let file: ThemeFile = serde_json::from_str(json)?;
        Self::default().merge(&file)
    }

    /// Overlay the colors present in `file`
    pub fn merge(mut self, file: &ThemeFile) -> ConfigResult<Self> {
        let slots: [(&'static str, &Option<String>, &mut Color); 8] = [
            ("background", &file.background, &mut self.background),
            ("textFieldBorderFocused", &file.text_field_border_focused, &mut self.field_border_focused),
            ("textFieldBorderUnfocused", &file.text_field_border_unfocused, &mut self.field_border_unfocused),
            ("confirmLight", &file.confirm_light, &mut self.confirm_light),
            ("confirmDark", &file.confirm_dark, &mut self.confirm_dark),
            ("cancelLight", &file.cancel_light, &mut self.cancel_light),
            ("cancelDark", &file.cancel_dark, &mut self.cancel_dark),
            ("error", &file.error, &mut self.error),
        ];

        for (key, value, slot) in slots {
            if let Some(value) = value {
                *slot = parse_hex(key, value)?;
            }
        }
        Ok(self)
    }
}

/// Parse a `#rrggbb` color
pub fn parse_hex(key: &str, value: &str) -> ConfigResult<Color> {
    let invalid = || ConfigError::InvalidColor {
        key: key.to_string(),
        value: value.to_string(),
    };

    let digits = value.strip_prefix('#').ok_or_else(invalid)?;
    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(invalid());
    }
    let rgb = u32::from_str_radix(digits, 16).map_err(|_| invalid())?;
    Ok(Renderer::hex_color(rgb))
}
