// SPDX-License-Identifier: MPL-2.0
//! Light, dark and system-following themes.

use crate::ui::design_tokens::{opacity, palette};
use iced::{Color, Theme};
use serde::{Deserialize, Serialize};

/// Colors the review screen uses on top of the iced theme.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorScheme {
    pub surface_secondary: Color,
    pub text_secondary: Color,
    /// Outline of the selected thumbnail.
    pub selection: Color,
    /// Backdrop of the busy banner shown while a batch is written.
    pub overlay_background: Color,
    pub overlay_text: Color,
}

impl ColorScheme {
    #[must_use]
    pub fn light() -> Self {
        Self {
            surface_secondary: palette::GRAY_100,
            text_secondary: palette::GRAY_700,
            selection: palette::PRIMARY_600,
            overlay_background: Color {
                a: opacity::OVERLAY_STRONG,
                ..palette::BLACK
            },
            overlay_text: palette::WHITE,
        }
    }

    #[must_use]
    pub fn dark() -> Self {
        Self {
            surface_secondary: Color::from_rgb(0.15, 0.15, 0.15),
            text_secondary: palette::GRAY_200,
            selection: palette::PRIMARY_400,
            overlay_background: Color {
                a: opacity::OVERLAY_HOVER,
                ..palette::BLACK
            },
            overlay_text: palette::WHITE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    Dark,
    #[default]
    System,
}

impl ThemeMode {
    /// Returns true if the effective theme is dark.
    /// System mode asks the OS and defaults to dark when detection fails.
    #[must_use]
    pub fn is_dark(self) -> bool {
        match self {
            ThemeMode::Light => false,
            ThemeMode::Dark => true,
            ThemeMode::System => !matches!(dark_light::detect(), Ok(dark_light::Mode::Light)),
        }
    }
}

/// Resolved theme for the current session.
#[derive(Debug, Clone)]
pub struct AppTheme {
    pub colors: ColorScheme,
    pub mode: ThemeMode,
    dark: bool,
}

impl AppTheme {
    #[must_use]
    pub fn new(mode: ThemeMode) -> Self {
        let dark = mode.is_dark();
        let colors = if dark {
            ColorScheme::dark()
        } else {
            ColorScheme::light()
        };
        Self { colors, mode, dark }
    }

    /// The iced theme matching this mode.
    #[must_use]
    pub fn iced_theme(&self) -> Theme {
        if self.dark {
            Theme::Dark
        } else {
            Theme::Light
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_mode_is_dark_returns_correct_values() {
        assert!(!ThemeMode::Light.is_dark());
        assert!(ThemeMode::Dark.is_dark());
        // Depends on the desktop; only check it does not panic
        let _ = ThemeMode::System.is_dark();
    }

    #[test]
    fn explicit_modes_pick_matching_iced_theme() {
        assert_eq!(AppTheme::new(ThemeMode::Light).iced_theme(), Theme::Light);
        assert_eq!(AppTheme::new(ThemeMode::Dark).iced_theme(), Theme::Dark);
    }

    #[test]
    fn selection_stands_out_from_surface() {
        for scheme in [ColorScheme::light(), ColorScheme::dark()] {
            assert_ne!(scheme.selection, scheme.surface_secondary);
        }
    }
}
