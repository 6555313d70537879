//! Built-in theme definitions.

use std::fmt::{Display, Formatter};

use crate::definition::ThemeDefinition;
use crate::error::ThemeParseError;

/// Source of the base theme every override is layered on
pub const BASE_THEME: &str = include_str!("../../themes/base.theme");

const HIGH_CONTRAST_THEME: &str = include_str!("../../themes/high_contrast.theme");

/// Built-in theme preset catalog.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ThemePreset {
    /// Catppuccin-derived base theme.
    #[default]
    Catppuccin,
    /// Black/white theme with a single highlight color.
    HighContrast,
}

impl ThemePreset {
    /// Stable preset id for config/serialization.
    pub fn id(self) -> &'static str {
        match self {
            Self::Catppuccin => "catppuccin",
            Self::HighContrast => "high-contrast",
        }
    }

    /// User-facing display name.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Catppuccin => "Catppuccin",
            Self::HighContrast => "High Contrast",
        }
    }

    /// Full preset list.
    pub fn all() -> &'static [ThemePreset] {
        const PRESETS: [ThemePreset; 2] = [ThemePreset::Catppuccin, ThemePreset::HighContrast];
        &PRESETS
    }

    /// Look up a preset by [`id`](Self::id), ignoring ASCII case.
    pub fn from_id(id: &str) -> Option<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|p| p.id().eq_ignore_ascii_case(id.trim()))
    }

    /// Theme-file text of this preset.
    pub fn source(self) -> &'static str {
        match self {
            Self::Catppuccin => BASE_THEME,
            Self::HighContrast => HIGH_CONTRAST_THEME,
        }
    }

    /// Parse this preset into a definition.
    pub fn definition(self) -> Result<ThemeDefinition, ThemeParseError> {
        ThemeDefinition::parse(self.source())
    }
}

impl Display for ThemePreset {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_round_trip() {
        for &preset in ThemePreset::all() {
            assert_eq!(ThemePreset::from_id(preset.id()), Some(preset));
        }
        assert_eq!(ThemePreset::from_id("High-Contrast"), Some(ThemePreset::HighContrast));
        assert_eq!(ThemePreset::from_id("solarized"), None);
    }

    #[test]
    fn base_theme_is_the_default_source() {
        assert_eq!(ThemePreset::default().source(), BASE_THEME);
    }
}
