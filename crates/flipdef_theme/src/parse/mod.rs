//! Theme file parsing
//!
//! Parsing is a two-stage pipeline: [`token`] splits text into classified
//! lines, [`value`] turns each assignment into typed entries. Mode
//! directives apply to every following assignment until the next directive.

pub mod literal;
pub mod token;
pub mod value;

pub use literal::parse_color;
pub use token::{tokenize, ParsingToken, TokenKind, Tokens};
pub use value::{expand_key, parse_reference, parse_value, split_state_suffix, MAX_KEY_STATES};

use tracing::{debug, warn};

use crate::definition::ThemeDefinition;
use crate::error::ThemeParseError;
use crate::tokens::{ThemeMode, ThemeState};

/// An assignment that was skipped because its `(mode, state, key)` already existed
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DuplicateEntry {
    pub mode: ThemeMode,
    pub state: ThemeState,
    pub key: String,
    pub line: usize,
}

/// Summary of a successful parse
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParseOutcome {
    /// Entries added to the definition
    pub added: usize,
    /// Skipped assignments, in file order
    pub duplicates: Vec<DuplicateEntry>,
}

impl ParseOutcome {
    /// No entries added and nothing skipped
    pub fn is_empty(&self) -> bool {
        self.added == 0 && self.duplicates.is_empty()
    }
}

/// Parse `src` into `def`, tracking mode directives.
///
/// Stops at the first error; entries from earlier lines stay in `def`.
pub fn parse_into(def: &mut ThemeDefinition, src: &str) -> Result<ParseOutcome, ThemeParseError> {
    let mut outcome = ParseOutcome::default();
    let mut mode = ThemeMode::All;

    for token in tokenize(src) {
        let token = token?;
        let (key, value) = match token.kind {
            TokenKind::Comment => continue,
            TokenKind::Mode(m) => {
                mode = m;
                continue;
            }
            TokenKind::KeyValue { key, value } => (key, value),
        };

        let parsed = parse_value(token.line, key, value)?;
        let (base, states) = expand_key(key);
        for state in states {
            if def.insert(mode, state, base, parsed.clone()) {
                outcome.added += 1;
            } else {
                warn!(
                    line = token.line,
                    key = base,
                    %mode,
                    %state,
                    "Duplicate theme entry ignored"
                );
                outcome.duplicates.push(DuplicateEntry {
                    mode,
                    state,
                    key: base.to_string(),
                    line: token.line,
                });
            }
        }
    }

    debug!(
        added = outcome.added,
        duplicates = outcome.duplicates.len(),
        "Parsed theme definition"
    );
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::{EntryRef, EntryValue};
    use flipdef_core::Color;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_and_comment_only_input() {
        let mut def = ThemeDefinition::new();
        let outcome = parse_into(&mut def, "").unwrap();
        assert!(outcome.is_empty());
        let outcome = parse_into(&mut def, "// nothing\n# here\n\n").unwrap();
        assert!(outcome.is_empty());
        assert!(def.is_empty());
    }

    #[test]
    fn mode_directives_scope_following_lines() {
        let src = "\
Text: #FFFFFFFF
[Dark]
Background: #000000FF
[Light]
Background: #FFFFFFFF
";
        let def = ThemeDefinition::parse(src).unwrap();
        let modes: Vec<_> = def.iter().map(|e| (e.key.as_str(), e.mode)).collect();
        assert_eq!(
            modes,
            vec![
                ("Text", ThemeMode::All),
                ("Background", ThemeMode::Dark),
                ("Background", ThemeMode::Light),
            ]
        );
    }

    #[test]
    fn multi_state_keys_expand_in_file_order() {
        let def = ThemeDefinition::parse("ToggleOn_Hovered_Pressed: Accent").unwrap();
        let states: Vec<_> = def.iter().map(|e| (e.key.as_str(), e.state)).collect();
        assert_eq!(
            states,
            vec![("ToggleOn", ThemeState::Hovered), ("ToggleOn", ThemeState::Pressed)]
        );
        assert_eq!(
            def.entries()[1].value,
            EntryValue::Reference(EntryRef::new("Accent", ThemeState::Any))
        );
    }

    #[test]
    fn duplicates_are_reported_not_fatal() {
        let src = "Text: #FFFFFFFF\nText: #000000FF\n";
        let mut def = ThemeDefinition::new();
        let outcome = parse_into(&mut def, src).unwrap();
        assert_eq!(outcome.added, 1);
        assert_eq!(
            outcome.duplicates,
            vec![DuplicateEntry {
                mode: ThemeMode::All,
                state: ThemeState::Any,
                key: "Text".to_string(),
                line: 2,
            }]
        );
        assert_eq!(def.entries()[0].value, EntryValue::Color(Color::WHITE));
    }

    #[test]
    fn failure_keeps_earlier_entries() {
        let mut def = ThemeDefinition::new();
        let err = parse_into(&mut def, "Text: #FFFFFFFF\nBorder: Mix(#000)\nAccent: #FF0000FF").unwrap_err();
        assert_eq!(err.line(), 2);
        assert_eq!(def.len(), 1);
    }

    #[test]
    fn additive_parse_layers_files() {
        let mut def = ThemeDefinition::parse("Text: #FFFFFFFF").unwrap();
        let outcome = def.parse_additive("[Dark]\nText: #000000FF").unwrap();
        assert_eq!(outcome.added, 1);
        assert_eq!(def.len(), 2);
    }
}
