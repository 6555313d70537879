use thiserror::Error;

use crate::function::ArgType;
use crate::tokens::{ThemeColor, ThemeState};

/// Errors that abort parsing of a theme file.
///
/// Entries parsed before the failing line stay in the definition.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ThemeParseError {
    #[error("theme syntax error at line {line}: {msg}")]
    Syntax { line: usize, msg: String },

    #[error("invalid key `{key}` at line {line} (allowed: [A-Za-z_][A-Za-z0-9_]*)")]
    InvalidKey { line: usize, key: String },

    #[error("invalid value `{value}` for `{key}` at line {line}")]
    InvalidValue {
        line: usize,
        key: String,
        value: String,
    },

    #[error("unknown function `{name}` at line {line}")]
    UnknownFunction { line: usize, name: String },

    #[error("`{function}` takes {expected} argument(s) but {found} were given at line {line}")]
    ArgumentCount {
        line: usize,
        function: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("argument {position} of `{function}` must be {expected}, got `{text}` at line {line}")]
    ArgumentType {
        line: usize,
        function: &'static str,
        position: usize,
        expected: ArgType,
        text: String,
    },
}

impl ThemeParseError {
    /// Line the error was reported at (1-indexed)
    pub fn line(&self) -> usize {
        match self {
            Self::Syntax { line, .. }
            | Self::InvalidKey { line, .. }
            | Self::InvalidValue { line, .. }
            | Self::UnknownFunction { line, .. }
            | Self::ArgumentCount { line, .. }
            | Self::ArgumentType { line, .. } => *line,
        }
    }
}

/// Errors that abort a bake. None of them modify the definition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BakeError {
    #[error("`{key}` refers to unknown entry `{reference}`")]
    UnknownString { key: String, reference: String },

    #[error("`{key}` cannot be resolved (circular or unresolvable dependency); {remaining} other entries also unresolved")]
    Unresolved { key: String, remaining: usize },

    #[error("no entry provides `{slot}` for state `{state}`")]
    MissingItems { slot: ThemeColor, state: ThemeState },
}

#[derive(Debug, Error)]
pub enum ThemeError {
    #[error(transparent)]
    Parse(#[from] ThemeParseError),

    #[error(transparent)]
    Bake(#[from] BakeError),
}
