//! Resolver and baker
//!
//! Baking resolves every entry that applies to one mode by repeated passes
//! until nothing is pending, then copies one color per supported
//! `(slot, state)` into a dense [`BakedTheme`]. Resolution flags live in a
//! per-call [`Scratch`], so a definition can be baked from many threads at
//! once.

use flipdef_core::Color;
use smallvec::SmallVec;
use tracing::{debug, warn};

use crate::definition::{EntryRef, EntryValue, ThemeDefinition};
use crate::error::BakeError;
use crate::function::FuncArg;
use crate::tokens::{ThemeColor, ThemeMode, ThemeState};

type ColorTable = [[Color; ThemeState::COUNT]; ThemeColor::COUNT];

/// Colors used for every cell when baking [`ThemeMode::Debug`]
const DEBUG_PALETTE: [Color; 10] = [
    Color::rgb(0.90, 0.10, 0.10),
    Color::rgb(0.10, 0.75, 0.20),
    Color::rgb(0.15, 0.35, 0.95),
    Color::rgb(0.95, 0.85, 0.10),
    Color::rgb(0.10, 0.85, 0.85),
    Color::rgb(0.85, 0.15, 0.85),
    Color::rgb(1.00, 0.55, 0.00),
    Color::rgb(0.55, 0.25, 0.90),
    Color::rgb(0.95, 0.95, 0.95),
    Color::rgb(0.20, 0.20, 0.20),
];

/// A fully resolved color table for one mode
#[derive(Clone, Debug, PartialEq)]
pub struct BakedTheme {
    mode: ThemeMode,
    colors: ColorTable,
}

impl BakedTheme {
    pub fn mode(&self) -> ThemeMode {
        self.mode
    }

    /// Color of a supported cell, or `None` if `slot` is not baked for `state`
    pub fn try_get(&self, slot: ThemeColor, state: ThemeState) -> Option<Color> {
        slot.supports(state)
            .then(|| self.colors[slot.index()][state.index()])
    }

    /// Color of `slot` as seen in `state`.
    ///
    /// Slots baked only for `Any` answer every state from that cell; other
    /// unsupported states fall back to `Default`. The `None` sentinel is
    /// transparent.
    pub fn get(&self, slot: ThemeColor, state: ThemeState) -> Color {
        [state, ThemeState::Any, ThemeState::Default]
            .into_iter()
            .find_map(|s| self.try_get(slot, s))
            .unwrap_or(Color::TRANSPARENT)
    }

    /// Every supported `(slot, state, color)` in table order
    pub fn iter(&self) -> impl Iterator<Item = (ThemeColor, ThemeState, Color)> + '_ {
        ThemeColor::slots().flat_map(move |slot| {
            slot.states()
                .iter()
                .map(move |&state| (slot, state, self.colors[slot.index()][state.index()]))
        })
    }
}

/// An entry that no lookup touched during a bake
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnusedEntry {
    pub key: String,
    pub mode: ThemeMode,
    pub state: ThemeState,
}

/// Bake result plus advisory diagnostics
#[derive(Clone, Debug, PartialEq)]
pub struct BakeReport {
    pub theme: BakedTheme,
    /// Entries that were never referenced and do not name a slot
    pub unused: Vec<UnusedEntry>,
}

/// Per-bake working state, indexed by entry position
struct Scratch {
    colors: Vec<Option<Color>>,
    referenced: Vec<bool>,
}

/// Bake `def` for `mode`.
///
/// In debug builds unused entries are logged as warnings.
pub fn bake(def: &ThemeDefinition, mode: ThemeMode) -> Result<BakedTheme, BakeError> {
    let report = bake_with_report(def, mode)?;
    if cfg!(debug_assertions) {
        for entry in &report.unused {
            warn!(
                key = %entry.key,
                mode = %entry.mode,
                state = %entry.state,
                "Unused theme entry (possible typo)"
            );
        }
    }
    Ok(report.theme)
}

/// Bake `def` for `mode` and collect unused entries
pub fn bake_with_report(def: &ThemeDefinition, mode: ThemeMode) -> Result<BakeReport, BakeError> {
    if mode == ThemeMode::Debug {
        return Ok(BakeReport {
            theme: debug_theme(),
            unused: Vec::new(),
        });
    }

    let mut scratch = Scratch {
        colors: vec![None; def.len()],
        referenced: vec![false; def.len()],
    };
    resolve(def, mode, &mut scratch)?;
    let colors = fill_slots(def, mode, &mut scratch)?;

    let unused = def
        .iter()
        .enumerate()
        .filter(|&(i, entry)| {
            entry.mode.applies_to(mode)
                && !scratch.referenced[i]
                && ThemeColor::from_name(&entry.key).is_none()
                && !def.is_shadowed(i)
        })
        .map(|(_, entry)| UnusedEntry {
            key: entry.key.clone(),
            mode: entry.mode,
            state: entry.state,
        })
        .collect();

    Ok(BakeReport {
        theme: BakedTheme { mode, colors },
        unused,
    })
}

fn debug_theme() -> BakedTheme {
    let mut colors = [[Color::TRANSPARENT; ThemeState::COUNT]; ThemeColor::COUNT];
    for slot in ThemeColor::slots() {
        for state in ThemeState::ALL {
            colors[slot.index()][state.index()] =
                DEBUG_PALETTE[(slot.index() + state.index()) % DEBUG_PALETTE.len()];
        }
    }
    BakedTheme {
        mode: ThemeMode::Debug,
        colors,
    }
}

/// Fixed-point passes until every applicable entry has a color
fn resolve(def: &ThemeDefinition, mode: ThemeMode, scratch: &mut Scratch) -> Result<(), BakeError> {
    let mut pending: Vec<usize> = def
        .iter()
        .enumerate()
        .filter(|(_, entry)| entry.mode.applies_to(mode))
        .map(|(i, _)| i)
        .collect();

    let mut pass = 0;
    while !pending.is_empty() {
        pass += 1;
        let mut still = Vec::with_capacity(pending.len());
        for &i in &pending {
            match resolve_entry(def, mode, i, scratch)? {
                Some(color) => scratch.colors[i] = Some(color),
                None => still.push(i),
            }
        }
        debug!(
            pass,
            resolved = pending.len() - still.len(),
            pending = still.len(),
            "Theme bake pass"
        );

        if still.len() == pending.len() {
            let key = def.entries()[still[0]].qualified_key();
            return Err(BakeError::Unresolved {
                key,
                remaining: still.len() - 1,
            });
        }
        pending = still;
    }
    Ok(())
}

/// `Ok(None)` while a dependency is still pending
fn resolve_entry(
    def: &ThemeDefinition,
    mode: ThemeMode,
    index: usize,
    scratch: &mut Scratch,
) -> Result<Option<Color>, BakeError> {
    let entry = &def.entries()[index];
    let mut lookup = |target: &EntryRef| -> Result<Option<Color>, BakeError> {
        let found = def
            .find(mode, target.state, &target.key, false)
            .ok_or_else(|| BakeError::UnknownString {
                key: entry.qualified_key(),
                reference: target.to_string(),
            })?;
        scratch.referenced[found] = true;
        Ok(scratch.colors[found])
    };

    match &entry.value {
        EntryValue::Color(color) => Ok(Some(*color)),
        EntryValue::Reference(target) => lookup(target),
        EntryValue::Function { function, args } => {
            let mut concrete: SmallVec<[FuncArg; 4]> = SmallVec::with_capacity(args.len());
            for arg in args {
                match arg {
                    FuncArg::Identifier(target) => match lookup(target)? {
                        Some(color) => concrete.push(FuncArg::Color(color)),
                        None => return Ok(None),
                    },
                    other => concrete.push(other.clone()),
                }
            }
            Ok(Some(function.evaluate(&concrete)))
        }
    }
}

fn fill_slots(
    def: &ThemeDefinition,
    mode: ThemeMode,
    scratch: &mut Scratch,
) -> Result<ColorTable, BakeError> {
    let mut colors = [[Color::TRANSPARENT; ThemeState::COUNT]; ThemeColor::COUNT];
    for slot in ThemeColor::slots() {
        for &state in slot.states() {
            let missing = || BakeError::MissingItems { slot, state };
            let found = def.find(mode, state, slot.name(), false).ok_or_else(missing)?;
            scratch.referenced[found] = true;
            colors[slot.index()][state.index()] = scratch.colors[found].ok_or_else(missing)?;
        }
    }
    Ok(colors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Every slot/state filled with a plain literal
    fn complete() -> ThemeDefinition {
        let mut def = ThemeDefinition::new();
        for slot in ThemeColor::slots() {
            for &state in slot.states() {
                def.add_color(ThemeMode::All, state, slot.name(), Color::GRAY);
            }
        }
        def
    }

    #[test]
    fn complete_literal_definition_bakes() {
        let theme = bake(&complete(), ThemeMode::Dark).unwrap();
        assert_eq!(theme.mode(), ThemeMode::Dark);
        assert!(theme.iter().all(|(_, _, c)| c == Color::GRAY));
        assert_eq!(theme.iter().count(), ThemeColor::slots().map(|s| s.states().len()).sum::<usize>());
    }

    #[test]
    fn empty_definition_reports_first_missing_cell() {
        let err = bake(&ThemeDefinition::new(), ThemeMode::Light).unwrap_err();
        assert_eq!(
            err,
            BakeError::MissingItems {
                slot: ThemeColor::Background,
                state: ThemeState::Any,
            }
        );
    }

    #[test]
    fn wildcard_state_does_not_cover_state_slots() {
        let mut def = complete();
        let mut partial = ThemeDefinition::new();
        for entry in def.iter().filter(|e| e.key != "Selected") {
            partial.insert(entry.mode, entry.state, &entry.key, entry.value.clone());
        }
        partial.add_color(ThemeMode::All, ThemeState::Hovered, "Selected", Color::RED);
        let err = bake(&partial, ThemeMode::Dark).unwrap_err();
        assert_eq!(
            err,
            BakeError::MissingItems {
                slot: ThemeColor::Selected,
                state: ThemeState::Default,
            }
        );

        // `Selected: ...` under Any fills Default; Hovered keeps its own entry.
        def = partial;
        def.add_color(ThemeMode::All, ThemeState::Any, "Selected", Color::BLUE);
        let theme = bake(&def, ThemeMode::Dark).unwrap();
        assert_eq!(theme.get(ThemeColor::Selected, ThemeState::Default), Color::BLUE);
        assert_eq!(theme.get(ThemeColor::Selected, ThemeState::Hovered), Color::RED);
    }

    #[test]
    fn functions_wait_for_identifier_arguments() {
        let mut def = complete();
        // Listed before the entries it depends on.
        def.add_function(
            ThemeMode::All,
            ThemeState::Any,
            "Glow",
            crate::function::ThemeFunction::Mix,
            smallvec::smallvec![
                FuncArg::Identifier(EntryRef::new("Shadow", ThemeState::Any)),
                FuncArg::Color(Color::WHITE),
                FuncArg::R32(1.0),
            ],
        );
        def.add_reference(ThemeMode::All, ThemeState::Any, "Shadow", EntryRef::new("Ink", ThemeState::Any));
        def.add_color(ThemeMode::All, ThemeState::Any, "Ink", Color::BLACK);

        let report = bake_with_report(&def, ThemeMode::Dark).unwrap();
        // Glow is never consumed by a slot.
        assert_eq!(
            report.unused,
            vec![UnusedEntry {
                key: "Glow".to_string(),
                mode: ThemeMode::All,
                state: ThemeState::Any,
            }]
        );
    }

    #[test]
    fn unknown_reference_names_both_sides() {
        let mut def = complete();
        def.add_reference(
            ThemeMode::Dark,
            ThemeState::Hovered,
            "Selected",
            EntryRef::new("Nowhere", ThemeState::Pressed),
        );
        let err = bake(&def, ThemeMode::Dark).unwrap_err();
        assert_eq!(
            err,
            BakeError::UnknownString {
                key: "Selected_Hovered".to_string(),
                reference: "Nowhere_Pressed".to_string(),
            }
        );
        // Dark-only entries do not take part in a Light bake.
        assert!(bake(&def, ThemeMode::Light).is_ok());
    }

    #[test]
    fn self_reference_is_unresolved() {
        let mut def = complete();
        def.add_reference(ThemeMode::All, ThemeState::Any, "Loop", EntryRef::new("Loop", ThemeState::Any));
        assert_eq!(
            bake(&def, ThemeMode::Dark).unwrap_err(),
            BakeError::Unresolved {
                key: "Loop".to_string(),
                remaining: 0,
            }
        );
    }

    #[test]
    fn get_falls_back_for_unsupported_states() {
        let mut def = complete();
        let mut over = ThemeDefinition::new();
        over.add_color(ThemeMode::All, ThemeState::Default, "ButtonText", Color::GREEN);
        over.add_color(ThemeMode::All, ThemeState::Any, "Text", Color::WHITE);
        def = ThemeDefinition::combine(&def, &over);
        let theme = bake(&def, ThemeMode::Light).unwrap();

        assert_eq!(theme.try_get(ThemeColor::Text, ThemeState::Hovered), None);
        assert_eq!(theme.get(ThemeColor::Text, ThemeState::Hovered), Color::WHITE);
        assert_eq!(theme.try_get(ThemeColor::ButtonText, ThemeState::Pressed), None);
        assert_eq!(theme.get(ThemeColor::ButtonText, ThemeState::Pressed), Color::GREEN);
        assert_eq!(theme.get(ThemeColor::None, ThemeState::Any), Color::TRANSPARENT);
    }

    #[test]
    fn debug_mode_ignores_definition() {
        let a = bake(&ThemeDefinition::new(), ThemeMode::Debug).unwrap();
        let b = bake(&complete(), ThemeMode::Debug).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.mode(), ThemeMode::Debug);
        assert_ne!(
            a.get(ThemeColor::Background, ThemeState::Any),
            a.get(ThemeColor::Text, ThemeState::Any)
        );
    }
}
