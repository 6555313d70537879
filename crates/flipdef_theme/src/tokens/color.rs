//! Color slot tokens

use crate::tokens::ThemeState;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Semantic color slot keys for dynamic access.
///
/// Index 0 is the `None` sentinel; it is never baked and never matched by
/// name.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ThemeColor {
    None,

    // Surfaces and text
    Background,
    Text,
    TextDim,
    Border,
    Accent,
    Selected,

    // Controls
    ButtonBackground,
    ButtonText,
    ToggleOn,
    ToggleOff,
    InputBackground,
    DropdownBackground,
    Scrollbar,
    Tooltip,

    // Semantic colors
    Success,
    Warning,
    Error,
}

const ANY: &[ThemeState] = &[ThemeState::Any];
const HOVERABLE: &[ThemeState] = &[ThemeState::Default, ThemeState::Hovered];
const PRESSABLE: &[ThemeState] = &[
    ThemeState::Default,
    ThemeState::Hovered,
    ThemeState::Pressed,
    ThemeState::Disabled,
];
const LABEL: &[ThemeState] = &[ThemeState::Default, ThemeState::Disabled];
const INPUT: &[ThemeState] = &[
    ThemeState::Default,
    ThemeState::Hovered,
    ThemeState::Disabled,
];
const DROPDOWN: &[ThemeState] = &[ThemeState::Default, ThemeState::Hovered, ThemeState::Open];
const DRAGGABLE: &[ThemeState] = &[
    ThemeState::Default,
    ThemeState::Hovered,
    ThemeState::Pressed,
];

impl ThemeColor {
    pub const COUNT: usize = 18;

    pub const ALL: [ThemeColor; Self::COUNT] = [
        ThemeColor::None,
        ThemeColor::Background,
        ThemeColor::Text,
        ThemeColor::TextDim,
        ThemeColor::Border,
        ThemeColor::Accent,
        ThemeColor::Selected,
        ThemeColor::ButtonBackground,
        ThemeColor::ButtonText,
        ThemeColor::ToggleOn,
        ThemeColor::ToggleOff,
        ThemeColor::InputBackground,
        ThemeColor::DropdownBackground,
        ThemeColor::Scrollbar,
        ThemeColor::Tooltip,
        ThemeColor::Success,
        ThemeColor::Warning,
        ThemeColor::Error,
    ];

    /// Every bakeable slot (the sentinel excluded)
    pub fn slots() -> impl Iterator<Item = ThemeColor> {
        Self::ALL.into_iter().skip(1)
    }

    /// Dense table index
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Canonical name used as the entry key in theme files
    pub const fn name(self) -> &'static str {
        match self {
            ThemeColor::None => "None",
            ThemeColor::Background => "Background",
            ThemeColor::Text => "Text",
            ThemeColor::TextDim => "TextDim",
            ThemeColor::Border => "Border",
            ThemeColor::Accent => "Accent",
            ThemeColor::Selected => "Selected",
            ThemeColor::ButtonBackground => "ButtonBackground",
            ThemeColor::ButtonText => "ButtonText",
            ThemeColor::ToggleOn => "ToggleOn",
            ThemeColor::ToggleOff => "ToggleOff",
            ThemeColor::InputBackground => "InputBackground",
            ThemeColor::DropdownBackground => "DropdownBackground",
            ThemeColor::Scrollbar => "Scrollbar",
            ThemeColor::Tooltip => "Tooltip",
            ThemeColor::Success => "Success",
            ThemeColor::Warning => "Warning",
            ThemeColor::Error => "Error",
        }
    }

    /// Look up a slot by canonical name (exact match, sentinel excluded)
    pub fn from_name(name: &str) -> Option<Self> {
        Self::slots().find(|slot| slot.name() == name)
    }

    /// States this slot must be baked for
    pub fn states(self) -> &'static [ThemeState] {
        match self {
            ThemeColor::None => &[],
            ThemeColor::Background
            | ThemeColor::Text
            | ThemeColor::TextDim
            | ThemeColor::Border
            | ThemeColor::Accent
            | ThemeColor::Tooltip
            | ThemeColor::Success
            | ThemeColor::Warning
            | ThemeColor::Error => ANY,
            ThemeColor::Selected => HOVERABLE,
            ThemeColor::ButtonBackground | ThemeColor::ToggleOn | ThemeColor::ToggleOff => {
                PRESSABLE
            }
            ThemeColor::ButtonText => LABEL,
            ThemeColor::InputBackground => INPUT,
            ThemeColor::DropdownBackground => DROPDOWN,
            ThemeColor::Scrollbar => DRAGGABLE,
        }
    }

    pub fn supports(self, state: ThemeState) -> bool {
        self.states().contains(&state)
    }
}

impl fmt::Display for ThemeColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_order_matches_discriminants() {
        for (i, slot) in ThemeColor::ALL.iter().enumerate() {
            assert_eq!(slot.index(), i, "{slot}");
        }
        for (i, state) in ThemeState::ALL.iter().enumerate() {
            assert_eq!(state.index(), i, "{state}");
        }
    }

    #[test]
    fn names_round_trip() {
        for slot in ThemeColor::slots() {
            assert_eq!(ThemeColor::from_name(slot.name()), Some(slot));
        }
        assert_eq!(ThemeColor::from_name("None"), None);
        assert_eq!(ThemeColor::from_name("background"), None);
    }

    #[test]
    fn every_slot_supports_at_least_one_state() {
        for slot in ThemeColor::slots() {
            assert!(!slot.states().is_empty(), "{slot} has no states");
        }
        assert!(ThemeColor::Background.supports(ThemeState::Any));
        assert!(!ThemeColor::Selected.supports(ThemeState::Any));
    }
}
