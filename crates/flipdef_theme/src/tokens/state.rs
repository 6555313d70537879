//! Interaction state tokens

use serde::{Deserialize, Serialize};
use std::fmt;

/// Interaction state a slot's color may vary by.
///
/// `Any` is the wildcard: an entry stored under `Any` matches every state a
/// slot supports unless a more specific entry exists.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ThemeState {
    Any,
    Default,
    Hovered,
    Pressed,
    Open,
    Disabled,
}

impl ThemeState {
    pub const COUNT: usize = 6;

    pub const ALL: [ThemeState; Self::COUNT] = [
        ThemeState::Any,
        ThemeState::Default,
        ThemeState::Hovered,
        ThemeState::Pressed,
        ThemeState::Open,
        ThemeState::Disabled,
    ];

    /// Dense table index
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Canonical name, also the `_<State>` key suffix
    pub const fn name(self) -> &'static str {
        match self {
            ThemeState::Any => "Any",
            ThemeState::Default => "Default",
            ThemeState::Hovered => "Hovered",
            ThemeState::Pressed => "Pressed",
            ThemeState::Open => "Open",
            ThemeState::Disabled => "Disabled",
        }
    }

    /// Resolve a key suffix (exact case). `Any` is never a suffix.
    pub fn from_suffix(suffix: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .skip(1)
            .find(|state| state.name() == suffix)
    }
}

impl fmt::Display for ThemeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
