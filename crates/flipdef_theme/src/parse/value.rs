//! Value classification and key expansion
//!
//! A value is, in priority order: a color literal, a function call, or a
//! reference to another entry. Keys and references may carry `_<State>`
//! suffixes that select interaction states.

use smallvec::{smallvec, SmallVec};

use crate::definition::{EntryRef, EntryValue, FuncArgs};
use crate::error::ThemeParseError;
use crate::function::{ArgType, FuncArg, ThemeFunction};
use crate::parse::literal::parse_color;
use crate::parse::token::is_identifier;
use crate::tokens::ThemeState;

/// Maximum number of state suffixes stripped from one key
pub const MAX_KEY_STATES: usize = 3;

/// Split one trailing `_<State>` suffix off `ident`.
///
/// Returns `(ident, ThemeState::Any)` when there is no known suffix or the
/// remaining name would be empty.
pub fn split_state_suffix(ident: &str) -> (&str, ThemeState) {
    if let Some((head, tail)) = ident.rsplit_once('_') {
        if !head.is_empty() {
            if let Some(state) = ThemeState::from_suffix(tail) {
                return (head, state);
            }
        }
    }
    (ident, ThemeState::Any)
}

/// Expand a key into its base name and the states it is declared for.
///
/// `ToggleOn_Hovered_Pressed` yields `("ToggleOn", [Hovered, Pressed])`.
/// At most [`MAX_KEY_STATES`] suffixes are stripped; a key without suffixes
/// yields `[Any]`.
pub fn expand_key(key: &str) -> (&str, SmallVec<[ThemeState; MAX_KEY_STATES]>) {
    let mut base = key;
    let mut states: SmallVec<[ThemeState; MAX_KEY_STATES]> = SmallVec::new();
    while states.len() < MAX_KEY_STATES {
        let (head, state) = split_state_suffix(base);
        if state == ThemeState::Any {
            break;
        }
        states.push(state);
        base = head;
    }
    if states.is_empty() {
        return (key, smallvec![ThemeState::Any]);
    }
    // Stripped right to left; keep file order.
    states.reverse();
    (base, states)
}

/// Parse a reference such as `Selected` or `Selected_Hovered`
pub fn parse_reference(text: &str) -> Option<EntryRef> {
    let text = text.trim();
    if !is_identifier(text) {
        return None;
    }
    let (key, state) = split_state_suffix(text);
    Some(EntryRef::new(key, state))
}

/// Classify and parse the value of `key` at `line`
pub fn parse_value(line: usize, key: &str, value: &str) -> Result<EntryValue, ThemeParseError> {
    let value = value.trim();

    if let Some(color) = parse_color(value) {
        return Ok(EntryValue::Color(color));
    }

    if let Some((function, args)) = split_call(value) {
        let args = parse_args(line, function, args)?;
        return Ok(EntryValue::Function { function, args });
    }

    if let Some(reference) = parse_reference(value) {
        return Ok(EntryValue::Reference(reference));
    }

    // `Name(...)` that is neither a catalog function nor a malformed literal
    if let Some((name, _)) = value.split_once('(') {
        let name = name.trim_end();
        let literal = name.eq_ignore_ascii_case("rgb") || name.eq_ignore_ascii_case("rgba");
        if value.ends_with(')') && is_identifier(name) && !literal {
            return Err(ThemeParseError::UnknownFunction {
                line,
                name: name.to_string(),
            });
        }
    }

    Err(ThemeParseError::InvalidValue {
        line,
        key: key.to_string(),
        value: value.to_string(),
    })
}

/// Match `Name` or `Name(args)` against the function catalog
fn split_call(value: &str) -> Option<(ThemeFunction, &str)> {
    ThemeFunction::ALL.into_iter().find_map(|function| {
        let rest = value.strip_prefix(function.name())?.trim_start();
        if rest.is_empty() {
            return Some((function, ""));
        }
        let inner = rest.strip_prefix('(')?.strip_suffix(')')?;
        Some((function, inner))
    })
}

/// Split arguments by commas, respecting parentheses for rgb()/rgba()
fn split_args(input: &str) -> Vec<&str> {
    if input.trim().is_empty() {
        return Vec::new();
    }
    let mut parts = Vec::new();
    let mut depth: i32 = 0;
    let mut start = 0;
    for (i, c) in input.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = (depth - 1).max(0),
            ',' if depth == 0 => {
                parts.push(input[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(input[start..].trim());
    parts
}

fn parse_args(line: usize, function: ThemeFunction, input: &str) -> Result<FuncArgs, ThemeParseError> {
    let parts = split_args(input);
    let params = function.params();
    if parts.len() != params.len() {
        return Err(ThemeParseError::ArgumentCount {
            line,
            function: function.name(),
            expected: params.len(),
            found: parts.len(),
        });
    }

    parts
        .iter()
        .zip(params)
        .enumerate()
        .map(|(i, (text, &ty))| {
            parse_arg(ty, text).ok_or_else(|| ThemeParseError::ArgumentType {
                line,
                function: function.name(),
                position: i + 1,
                expected: ty,
                text: text.to_string(),
            })
        })
        .collect()
}

fn parse_arg(ty: ArgType, text: &str) -> Option<FuncArg> {
    match ty {
        ArgType::U8 => text.parse().ok().map(FuncArg::U8),
        ArgType::I32 => text.parse().ok().map(FuncArg::I32),
        ArgType::R32 => text
            .parse::<f32>()
            .ok()
            .filter(|v| v.is_finite())
            .map(FuncArg::R32),
        ArgType::Color => parse_color(text)
            .map(FuncArg::Color)
            .or_else(|| parse_reference(text).map(FuncArg::Identifier)),
        ArgType::Identifier => parse_reference(text).map(FuncArg::Identifier),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flipdef_core::Color;
    use pretty_assertions::assert_eq;

    #[test]
    fn suffix_split() {
        assert_eq!(split_state_suffix("Selected_Hovered"), ("Selected", ThemeState::Hovered));
        assert_eq!(split_state_suffix("Selected"), ("Selected", ThemeState::Any));
        assert_eq!(split_state_suffix("Text_Dim"), ("Text_Dim", ThemeState::Any));
        assert_eq!(split_state_suffix("_Hovered"), ("_Hovered", ThemeState::Any));
        assert_eq!(split_state_suffix("Selected_Any"), ("Selected_Any", ThemeState::Any));
        assert_eq!(split_state_suffix("Selected_hovered"), ("Selected_hovered", ThemeState::Any));
    }

    #[test]
    fn key_expansion() {
        let (base, states) = expand_key("ToggleOn_Hovered_Pressed");
        assert_eq!(base, "ToggleOn");
        assert_eq!(states.as_slice(), &[ThemeState::Hovered, ThemeState::Pressed]);

        let (base, states) = expand_key("Background");
        assert_eq!(base, "Background");
        assert_eq!(states.as_slice(), &[ThemeState::Any]);
    }

    #[test]
    fn key_expansion_is_capped() {
        let (base, states) = expand_key("Btn_Open_Default_Hovered_Pressed");
        assert_eq!(base, "Btn_Open");
        assert_eq!(
            states.as_slice(),
            &[ThemeState::Default, ThemeState::Hovered, ThemeState::Pressed]
        );
    }

    #[test]
    fn literal_wins_over_everything() {
        assert_eq!(
            parse_value(1, "Text", "#FF0000FF"),
            Ok(EntryValue::Color(Color::RED))
        );
        // Named colors shadow references of the same name.
        assert_eq!(parse_value(1, "Text", "white"), Ok(EntryValue::Color(Color::WHITE)));
    }

    #[test]
    fn function_calls_are_typed() {
        let value = parse_value(1, "Selected", "Mix(Base, #FFFFFFFF, 0.25)").unwrap();
        assert_eq!(
            value,
            EntryValue::Function {
                function: ThemeFunction::Mix,
                args: smallvec![
                    FuncArg::Identifier(EntryRef::new("Base", ThemeState::Any)),
                    FuncArg::Color(Color::WHITE),
                    FuncArg::R32(0.25),
                ],
            }
        );

        let value = parse_value(1, "X", "Opacity( rgb(255, 0, 0) , 0.5 )").unwrap();
        assert_eq!(
            value,
            EntryValue::Function {
                function: ThemeFunction::Opacity,
                args: smallvec![FuncArg::Color(Color::RED), FuncArg::R32(0.5)],
            }
        );
    }

    #[test]
    fn color_arguments_accept_state_qualified_names() {
        let value = parse_value(1, "X", "Alpha(Selected_Hovered, 128)").unwrap();
        let EntryValue::Function { args, .. } = value else {
            panic!("expected function");
        };
        assert_eq!(
            args[0],
            FuncArg::Identifier(EntryRef::new("Selected", ThemeState::Hovered))
        );
        assert_eq!(args[1], FuncArg::U8(128));
    }

    #[test]
    fn references() {
        assert_eq!(
            parse_value(1, "Text", "Foreground"),
            Ok(EntryValue::Reference(EntryRef::new("Foreground", ThemeState::Any)))
        );
        // A function name prefix does not make a call.
        assert_eq!(
            parse_value(1, "Text", "Mixed_Pressed"),
            Ok(EntryValue::Reference(EntryRef::new("Mixed", ThemeState::Pressed)))
        );
    }

    #[test]
    fn distinct_errors() {
        assert!(matches!(
            parse_value(4, "X", "Mix(#000, #FFF)"),
            Err(ThemeParseError::ArgumentCount { line: 4, expected: 3, found: 2, .. })
        ));
        assert!(matches!(
            parse_value(4, "X", "Mix"),
            Err(ThemeParseError::ArgumentCount { found: 0, .. })
        ));
        assert!(matches!(
            parse_value(4, "X", "Alpha(#000, 300)"),
            Err(ThemeParseError::ArgumentType { position: 2, expected: ArgType::U8, .. })
        ));
        assert!(matches!(
            parse_value(4, "X", "Mix(#000, #FFF, half)"),
            Err(ThemeParseError::ArgumentType { position: 3, .. })
        ));
        assert!(matches!(
            parse_value(4, "X", "Contrast(#000, #FFF, #000)"),
            Err(ThemeParseError::ArgumentType { position: 1, expected: ArgType::Identifier, .. })
        ));
        assert!(matches!(
            parse_value(4, "X", "Blend(#000, #FFF)"),
            Err(ThemeParseError::UnknownFunction { ref name, .. }) if name == "Blend"
        ));
        assert!(matches!(
            parse_value(4, "X", "rgb(1, 2)"),
            Err(ThemeParseError::InvalidValue { .. })
        ));
        assert!(matches!(
            parse_value(4, "X", "RGBA(0, 0, 0, nan)"),
            Err(ThemeParseError::InvalidValue { .. })
        ));
        assert!(matches!(
            parse_value(4, "X", "#GGG"),
            Err(ThemeParseError::InvalidValue { .. })
        ));
    }
}
