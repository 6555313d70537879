//! Loading theme files and printing baked tables

use anyhow::{Context, Result};
use flipdef_theme::{
    BakedTheme, DuplicateEntry, ThemeColor, ThemeDefinition, ThemeMode, ThemePreset, ThemeState,
};
use serde::Serialize;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::config::ThemeConfig;

/// One parsed theme file
pub struct LoadedTheme {
    /// File path, or the preset name for built-in themes
    pub origin: String,
    pub definition: ThemeDefinition,
    pub duplicates: Vec<DuplicateEntry>,
}

fn parse_source(origin: String, src: &str) -> Result<LoadedTheme> {
    let (definition, outcome) = ThemeDefinition::parse_with_outcome(src)
        .with_context(|| format!("Failed to parse {origin}"))?;
    Ok(LoadedTheme {
        origin,
        definition,
        duplicates: outcome.duplicates,
    })
}

fn load_file(path: &Path) -> Result<LoadedTheme> {
    let src = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    parse_source(path.display().to_string(), &src)
}

/// Base theme: `base` if set, else the configured built-in preset
pub fn load_base(config: &ThemeConfig, base: Option<&Path>) -> Result<LoadedTheme> {
    if let Some(path) = base.or(config.base.as_deref()) {
        return load_file(path);
    }
    let preset = ThemePreset::from_id(&config.preset)
        .with_context(|| format!("Unknown theme preset `{}`", config.preset))?;
    parse_source(format!("preset `{}`", preset.id()), preset.source())
}

/// Override theme: `file` if given, else the configured override
pub fn load_override(config: &ThemeConfig, file: Option<&Path>) -> Result<Option<LoadedTheme>> {
    let path: Option<PathBuf> = file.map(Path::to_path_buf).or_else(|| config.override_path.clone());
    path.as_deref().map(load_file).transpose()
}

/// Base combined with the optional override
pub fn combine(base: &LoadedTheme, overrides: Option<&LoadedTheme>) -> ThemeDefinition {
    match overrides {
        Some(o) => ThemeDefinition::combine(&base.definition, &o.definition),
        None => base.definition.clone(),
    }
}

/// Parse a `--mode` value. `all` is a file directive, not a bake target.
pub fn parse_mode(value: &str) -> Result<ThemeMode, String> {
    match ThemeMode::from_name(value) {
        Some(ThemeMode::All) | None => Err(format!("expected dark, light or debug, got `{value}`")),
        Some(mode) => Ok(mode),
    }
}

/// `Slot_State` as it would be written in a theme file; `Slot` for `Any`
pub fn cell_name(slot: ThemeColor, state: ThemeState) -> String {
    match state {
        ThemeState::Any => slot.name().to_string(),
        state => format!("{slot}_{state}"),
    }
}

pub fn write_table(out: &mut impl Write, theme: &BakedTheme) -> io::Result<()> {
    for (slot, state, color) in theme.iter() {
        writeln!(out, "{}: {}", cell_name(slot, state), color)?;
    }
    Ok(())
}

#[derive(Serialize)]
struct JsonCell {
    slot: ThemeColor,
    state: ThemeState,
    color: String,
}

#[derive(Serialize)]
struct JsonTable {
    mode: ThemeMode,
    cells: Vec<JsonCell>,
}

pub fn write_json(out: &mut impl Write, theme: &BakedTheme) -> Result<()> {
    let table = JsonTable {
        mode: theme.mode(),
        cells: theme
            .iter()
            .map(|(slot, state, color)| JsonCell {
                slot,
                state,
                color: color.to_string(),
            })
            .collect(),
    };
    serde_json::to_writer_pretty(&mut *out, &table).context("Failed to write JSON")?;
    writeln!(out)?;
    Ok(())
}

pub fn write_slots(out: &mut impl Write) -> io::Result<()> {
    for slot in ThemeColor::slots() {
        let states: Vec<&str> = slot.states().iter().map(|s| s.name()).collect();
        writeln!(out, "{:<20} {}", slot.name(), states.join(", "))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use flipdef_theme::bake;
    use pretty_assertions::assert_eq;

    fn builtin() -> LoadedTheme {
        load_base(&ThemeConfig::default(), None).unwrap()
    }

    #[test]
    fn cell_names_match_key_syntax() {
        assert_eq!(cell_name(ThemeColor::Text, ThemeState::Any), "Text");
        assert_eq!(cell_name(ThemeColor::Selected, ThemeState::Hovered), "Selected_Hovered");
    }

    #[test]
    fn mode_flag_rejects_wildcard() {
        assert_eq!(parse_mode("Light"), Ok(ThemeMode::Light));
        assert!(parse_mode("all").is_err());
        assert!(parse_mode("sepia").is_err());
    }

    #[test]
    fn builtin_base_loads_without_duplicates() {
        let base = builtin();
        assert_eq!(base.origin, "preset `catppuccin`");
        assert!(base.duplicates.is_empty());
    }

    #[test]
    fn unknown_preset_is_an_error() {
        let config = ThemeConfig {
            preset: "sepia".to_string(),
            ..ThemeConfig::default()
        };
        assert!(load_base(&config, None).is_err());
    }

    #[test]
    fn table_lists_every_cell() {
        let def = combine(&builtin(), None);
        let theme = bake(&def, ThemeMode::Dark).unwrap();
        let mut out = Vec::new();
        write_table(&mut out, &theme).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(text.lines().count(), theme.iter().count());
        assert!(text.lines().any(|l| l == "Background: #1E1E2EFF"));
        assert!(text.lines().any(|l| l.starts_with("ButtonBackground_Pressed: #")));
    }

    #[test]
    fn json_output_names_slots_and_states() {
        let def = combine(&builtin(), None);
        let theme = bake(&def, ThemeMode::Light).unwrap();
        let mut out = Vec::new();
        write_json(&mut out, &theme).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["mode"], "light");
        assert_eq!(value["cells"][0]["slot"], "Background");
        assert_eq!(value["cells"][0]["state"], "Any");
        assert_eq!(value["cells"][0]["color"], "#EFF1F5FF");
    }
}
