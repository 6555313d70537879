//! Line scanner for theme files
//!
//! Splits theme text into one [`ParsingToken`] per meaningful line:
//!
//! - Comments: `// ...` or `# ...`
//! - Mode directives: `[Dark]`, `[Light]`, `[Debug]`, `[All]`
//! - Assignments: `Key: Value` (a trailing ` // comment` is stripped)
//!
//! Blank lines produce no token.

use std::iter::Enumerate;
use std::str::Lines;

use crate::error::ThemeParseError;
use crate::tokens::ThemeMode;

const MAX_KEY_BYTES: usize = 128;
const MAX_VALUE_BYTES: usize = 1024;

/// One classified line
#[derive(Clone, Debug, PartialEq)]
pub struct ParsingToken<'a> {
    /// Line number (1-indexed)
    pub line: usize,
    pub kind: TokenKind<'a>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum TokenKind<'a> {
    Comment,
    Mode(ThemeMode),
    KeyValue { key: &'a str, value: &'a str },
}

/// Iterator over the tokens of a theme file
pub struct Tokens<'a> {
    lines: Enumerate<Lines<'a>>,
}

/// Start scanning `src`
pub fn tokenize(src: &str) -> Tokens<'_> {
    Tokens {
        lines: src.lines().enumerate(),
    }
}

/// `[A-Za-z_][A-Za-z0-9_]*`
pub(crate) fn is_identifier(s: &str) -> bool {
    let mut it = s.chars();
    match it.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    it.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Cut a `//` comment that starts the value or follows whitespace
fn strip_inline_comment(value: &str) -> &str {
    if value.starts_with("//") {
        return "";
    }
    value
        .match_indices("//")
        .find(|&(i, _)| value[..i].ends_with(char::is_whitespace))
        .map_or(value, |(i, _)| value[..i].trim_end())
}

fn classify(line_no: usize, line: &str) -> Result<TokenKind<'_>, ThemeParseError> {
    if line.starts_with("//") || line.starts_with('#') {
        return Ok(TokenKind::Comment);
    }

    if let Some(rest) = line.strip_prefix('[') {
        let Some(name) = rest.strip_suffix(']') else {
            return Err(ThemeParseError::Syntax {
                line: line_no,
                msg: "unterminated mode directive, expected `[Mode]`".to_string(),
            });
        };
        return ThemeMode::from_name(name)
            .map(TokenKind::Mode)
            .ok_or_else(|| ThemeParseError::Syntax {
                line: line_no,
                msg: format!("unknown mode `{}` (expected All, Dark, Light or Debug)", name.trim()),
            });
    }

    let Some(colon) = line.find(':') else {
        return Err(ThemeParseError::Syntax {
            line: line_no,
            msg: "expected `Key: Value`".to_string(),
        });
    };

    let key = line[..colon].trim();
    let mut value = line[colon + 1..].trim();
    if key.is_empty() {
        return Err(ThemeParseError::Syntax {
            line: line_no,
            msg: "empty key".to_string(),
        });
    }
    if !is_identifier(key) || key.len() > MAX_KEY_BYTES {
        return Err(ThemeParseError::InvalidKey {
            line: line_no,
            key: key.to_string(),
        });
    }

    value = strip_inline_comment(value);
    if value.is_empty() {
        return Err(ThemeParseError::Syntax {
            line: line_no,
            msg: format!("missing value for `{key}`"),
        });
    }
    if value.len() > MAX_VALUE_BYTES {
        return Err(ThemeParseError::Syntax {
            line: line_no,
            msg: format!("value for `{key}` is too long (max {MAX_VALUE_BYTES} bytes)"),
        });
    }

    Ok(TokenKind::KeyValue { key, value })
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Result<ParsingToken<'a>, ThemeParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        for (idx, raw_line) in self.lines.by_ref() {
            let line = raw_line.trim();
            if line.is_empty() {
                continue;
            }
            let line_no = idx + 1;
            return Some(classify(line_no, line).map(|kind| ParsingToken {
                line: line_no,
                kind,
            }));
        }
        None
    }
}
