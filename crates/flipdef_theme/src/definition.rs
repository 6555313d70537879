//! Theme definition store
//!
//! A [`ThemeDefinition`] owns every entry parsed from one or more theme
//! files, in insertion order. Within one store the triple
//! `(mode, state, key)` is unique; [`ThemeDefinition::combine`] is the only
//! way to get duplicates, and the later (override) entry then wins lookups.

use flipdef_core::Color;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use std::fmt;
use tracing::warn;

use crate::error::ThemeParseError;
use crate::function::{FuncArg, ThemeFunction};
use crate::parse::{self, ParseOutcome};
use crate::tokens::{ThemeMode, ThemeState};

/// Arguments of one function entry, sized to the function's arity
pub type FuncArgs = SmallVec<[FuncArg; 4]>;

/// A by-name reference to another entry, with an optional state qualifier
#[derive(Clone, Debug, Hash, Eq, PartialEq)]
pub struct EntryRef {
    pub key: String,
    pub state: ThemeState,
}

impl EntryRef {
    pub fn new(key: impl Into<String>, state: ThemeState) -> Self {
        Self {
            key: key.into(),
            state,
        }
    }
}

impl fmt::Display for EntryRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.state {
            ThemeState::Any => f.write_str(&self.key),
            state => write!(f, "{}_{}", self.key, state),
        }
    }
}

/// What an entry evaluates to
#[derive(Clone, Debug, PartialEq)]
pub enum EntryValue {
    Color(Color),
    Reference(EntryRef),
    Function {
        function: ThemeFunction,
        args: FuncArgs,
    },
}

/// One parsed assignment
#[derive(Clone, Debug, PartialEq)]
pub struct ThemeDefEntry {
    pub key: String,
    pub mode: ThemeMode,
    pub state: ThemeState,
    pub value: EntryValue,
}

impl ThemeDefEntry {
    /// `key` or `key_State`, as written in a theme file
    pub fn qualified_key(&self) -> String {
        EntryRef::new(self.key.as_str(), self.state).to_string()
    }
}

/// Insertion-ordered entry store with a per-key index
#[derive(Clone, Debug, Default)]
pub struct ThemeDefinition {
    entries: Vec<ThemeDefEntry>,
    /// Entry positions per key, ascending
    by_key: FxHashMap<String, SmallVec<[usize; 4]>>,
}

impl ThemeDefinition {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty definition sized for roughly `capacity` entries
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            by_key: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    /// Parse theme-file text into a fresh definition
    pub fn parse(src: &str) -> Result<Self, ThemeParseError> {
        Self::parse_with_outcome(src).map(|(def, _)| def)
    }

    /// Parse theme-file text into a fresh definition, keeping the
    /// duplicate report
    pub fn parse_with_outcome(src: &str) -> Result<(Self, ParseOutcome), ThemeParseError> {
        let mut def = Self::with_capacity(src.lines().count());
        let outcome = def.parse_additive(src)?;
        Ok((def, outcome))
    }

    /// Parse theme-file text into this definition.
    ///
    /// On error the entries parsed before the failing line are kept.
    pub fn parse_additive(&mut self, src: &str) -> Result<ParseOutcome, ThemeParseError> {
        parse::parse_into(self, src)
    }

    /// Combine a base and an override definition.
    ///
    /// Every base entry is copied first, then every override entry, so that
    /// override entries win lookups of equal specificity.
    pub fn combine(base: &Self, overrides: &Self) -> Self {
        let mut out = Self::with_capacity(base.len() + overrides.len());
        for entry in base.entries.iter().chain(&overrides.entries) {
            out.push(entry.clone());
        }
        out
    }

    pub fn add_color(&mut self, mode: ThemeMode, state: ThemeState, key: &str, color: Color) -> bool {
        self.insert(mode, state, key, EntryValue::Color(color))
    }

    pub fn add_reference(
        &mut self,
        mode: ThemeMode,
        state: ThemeState,
        key: &str,
        target: EntryRef,
    ) -> bool {
        self.insert(mode, state, key, EntryValue::Reference(target))
    }

    pub fn add_function(
        &mut self,
        mode: ThemeMode,
        state: ThemeState,
        key: &str,
        function: ThemeFunction,
        args: FuncArgs,
    ) -> bool {
        self.insert(mode, state, key, EntryValue::Function { function, args })
    }

    /// Insert unless `(mode, state, key)` already exists. First write wins.
    ///
    /// Function entries whose arguments do not match the function's
    /// signature are rejected.
    pub fn insert(&mut self, mode: ThemeMode, state: ThemeState, key: &str, value: EntryValue) -> bool {
        if let EntryValue::Function { function, args } = &value {
            if args.len() != function.arity() {
                warn!(
                    key,
                    function = function.name(),
                    expected = function.arity(),
                    found = args.len(),
                    "Rejected theme function entry with wrong argument count"
                );
                return false;
            }
            if let Some(position) = function.mismatch(args) {
                warn!(
                    key,
                    function = function.name(),
                    position,
                    "Rejected theme function entry with mistyped argument"
                );
                return false;
            }
        }
        if self.find(mode, state, key, true).is_some() {
            return false;
        }
        self.push(ThemeDefEntry {
            key: key.to_string(),
            mode,
            state,
            value,
        });
        true
    }

    fn push(&mut self, entry: ThemeDefEntry) {
        let index = self.entries.len();
        self.by_key.entry(entry.key.clone()).or_default().push(index);
        self.entries.push(entry);
    }

    /// Find the entry for `key` as seen from a bake of `mode` in `state`.
    ///
    /// With `exact_state_required` only an entry with exactly this mode and
    /// state matches. Otherwise entries scoped to `ThemeMode::All` and
    /// `ThemeState::Any` also match; an exact state outranks an exact mode,
    /// and among equally specific entries the last inserted wins.
    pub fn find(
        &self,
        mode: ThemeMode,
        state: ThemeState,
        key: &str,
        exact_state_required: bool,
    ) -> Option<usize> {
        let candidates = self.by_key.get(key)?;

        if exact_state_required {
            return candidates
                .iter()
                .rev()
                .copied()
                .find(|&i| self.entries[i].mode == mode && self.entries[i].state == state);
        }

        let mut best: Option<(u8, usize)> = None;
        for &i in candidates {
            let entry = &self.entries[i];
            if !entry.mode.applies_to(mode) {
                continue;
            }
            if entry.state != state && entry.state != ThemeState::Any {
                continue;
            }
            let score = 2 * u8::from(entry.state == state) + u8::from(entry.mode == mode);
            // Candidates ascend, so `>=` lets later entries win ties.
            if best.map_or(true, |(s, _)| score >= s) {
                best = Some((score, i));
            }
        }
        best.map(|(_, i)| i)
    }

    pub fn get(&self, index: usize) -> Option<&ThemeDefEntry> {
        self.entries.get(index)
    }

    pub fn entries(&self) -> &[ThemeDefEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &ThemeDefEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether a later entry has the same `(mode, state, key)`
    pub(crate) fn is_shadowed(&self, index: usize) -> bool {
        let entry = &self.entries[index];
        self.by_key.get(&entry.key).is_some_and(|candidates| {
            candidates.iter().any(|&i| {
                i > index
                    && self.entries[i].mode == entry.mode
                    && self.entries[i].state == entry.state
            })
        })
    }
}
