//! flipdef Theme Definitions
//!
//! A small language for describing UI color themes, and the engine that
//! resolves it into a dense color table.
//!
//! # Overview
//!
//! - **Theme files**: `Key: Value` lines grouped under `[Dark]`, `[Light]`,
//!   `[Debug]` or `[All]` mode directives
//! - **Values**: color literals, references to other entries, or calls to
//!   built-in color functions such as `Mix` and `Opacity`
//! - **Baking**: fixed-point resolution of every entry for one mode into a
//!   [`BakedTheme`] indexed by [`ThemeColor`] and [`ThemeState`]
//!
//! # Quick Start
//!
//! ```rust
//! use flipdef_theme::{bake, ThemeColor, ThemeDefinition, ThemeMode, ThemeState, BASE_THEME};
//!
//! let base = ThemeDefinition::parse(BASE_THEME).unwrap();
//! let overrides = ThemeDefinition::parse("Accent: #FF0000FF").unwrap();
//! let combined = ThemeDefinition::combine(&base, &overrides);
//!
//! let theme = bake(&combined, ThemeMode::Dark).unwrap();
//! assert_eq!(theme.get(ThemeColor::Accent, ThemeState::Any).to_string(), "#FF0000FF");
//! ```
//!
//! # Keys and states
//!
//! A key may end in up to three `_<State>` suffixes. `ToggleOn_Hovered_Pressed`
//! defines `ToggleOn` for both `Hovered` and `Pressed`; a key without a suffix
//! is stored under [`ThemeState::Any`] and answers every state that has no
//! entry of its own.
//!
//! # Lookup
//!
//! When several entries match a key, an exact state beats `Any`, an exact
//! mode beats `[All]`, and among equals the later entry wins. That last rule
//! is what lets [`ThemeDefinition::combine`] put an override on top of a base.

pub mod active;
pub mod bake;
pub mod definition;
pub mod error;
pub mod function;
pub mod parse;
pub mod presets;
pub mod tokens;

// Re-export commonly used types
pub use active::ActiveTheme;
pub use bake::{bake, bake_with_report, BakeReport, BakedTheme, UnusedEntry};
pub use definition::{EntryRef, EntryValue, FuncArgs, ThemeDefEntry, ThemeDefinition};
pub use error::{BakeError, ThemeError, ThemeParseError};
pub use function::{ArgType, FuncArg, ThemeFunction};
pub use parse::{parse_color, parse_into, DuplicateEntry, ParseOutcome};
pub use presets::{ThemePreset, BASE_THEME};
pub use tokens::*;

pub use flipdef_core::Color;
