//! Presentation mode tokens

use serde::{Deserialize, Serialize};
use std::fmt;

/// Presentation mode a theme is baked for.
///
/// Entries declared under [`ThemeMode::All`] apply to every mode unless a
/// mode-specific entry for the same key and state exists.
#[derive(Clone, Copy, Debug, Default, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    All,
    Dark,
    Light,
    Debug,
}

impl ThemeMode {
    pub const ALL: [ThemeMode; 4] = [
        ThemeMode::All,
        ThemeMode::Dark,
        ThemeMode::Light,
        ThemeMode::Debug,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ThemeMode::All => "All",
            ThemeMode::Dark => "Dark",
            ThemeMode::Light => "Light",
            ThemeMode::Debug => "Debug",
        }
    }

    /// Parse a directive or config value (case-insensitive)
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.name().eq_ignore_ascii_case(name.trim()))
    }

    /// Whether an entry scoped to `self` takes part in a bake for `target`
    pub fn applies_to(self, target: ThemeMode) -> bool {
        self == target || self == ThemeMode::All
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
