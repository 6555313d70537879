//! flipdef configuration file handling

use anyhow::{Context, Result};
use flipdef_theme::{ThemeMode, ThemePreset};
use serde::{Deserialize, Deserializer};
use std::fs;
use std::path::{Path, PathBuf};

use crate::themes::parse_mode;

/// File looked up in the working directory when no `--config` is given
pub const DEFAULT_CONFIG_FILE: &str = "flipdef.toml";

/// Top-level configuration (flipdef.toml)
#[derive(Debug, Default, Deserialize)]
pub struct FlipdefConfig {
    #[serde(default)]
    pub theme: ThemeConfig,
}

/// Theme sources and bake mode
#[derive(Debug, Deserialize)]
pub struct ThemeConfig {
    /// Base theme file; the built-in preset is used when unset
    #[serde(default)]
    pub base: Option<PathBuf>,
    /// Built-in preset id used when `base` is unset
    #[serde(default = "default_preset")]
    pub preset: String,
    /// Override layered on top of the base
    #[serde(default, rename = "override")]
    pub override_path: Option<PathBuf>,
    /// Bake target; same values as `--mode`
    #[serde(default = "default_mode", deserialize_with = "deserialize_mode")]
    pub mode: ThemeMode,
}

fn default_preset() -> String {
    ThemePreset::default().id().to_string()
}

fn default_mode() -> ThemeMode {
    ThemeMode::Dark
}

fn deserialize_mode<'de, D: Deserializer<'de>>(deserializer: D) -> Result<ThemeMode, D::Error> {
    let name = String::deserialize(deserializer)?;
    parse_mode(&name).map_err(serde::de::Error::custom)
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            base: None,
            preset: default_preset(),
            override_path: None,
            mode: default_mode(),
        }
    }
}

impl FlipdefConfig {
    /// Load `path`, or `./flipdef.toml` if it exists, or defaults.
    ///
    /// An explicitly given path must exist.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(path) => {
                if !path.exists() {
                    anyhow::bail!("Config file {} does not exist", path.display());
                }
                path.to_path_buf()
            }
            None => {
                let path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !path.exists() {
                    return Ok(Self::default());
                }
                path
            }
        };

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;

        Self::from_toml(&content).with_context(|| format!("Failed to parse {}", config_path.display()))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_file_uses_defaults() {
        let config = FlipdefConfig::from_toml("").unwrap();
        assert_eq!(config.theme.base, None);
        assert_eq!(config.theme.preset, "catppuccin");
        assert_eq!(config.theme.override_path, None);
        assert_eq!(config.theme.mode, ThemeMode::Dark);
    }

    #[test]
    fn theme_section_is_read() {
        let config = FlipdefConfig::from_toml(
            r#"
            [theme]
            base = "themes/base.theme"
            override = "my.theme"
            mode = "light"
            "#,
        )
        .unwrap();
        assert_eq!(config.theme.base, Some(PathBuf::from("themes/base.theme")));
        assert_eq!(config.theme.override_path, Some(PathBuf::from("my.theme")));
        assert_eq!(config.theme.mode, ThemeMode::Light);
    }

    #[test]
    fn unknown_mode_is_rejected() {
        assert!(FlipdefConfig::from_toml("[theme]\nmode = \"sepia\"").is_err());
    }

    #[test]
    fn mode_follows_the_command_line_rule() {
        assert!(FlipdefConfig::from_toml("[theme]\nmode = \"all\"").is_err());
        let config = FlipdefConfig::from_toml("[theme]\nmode = \"Debug\"").unwrap();
        assert_eq!(config.theme.mode, ThemeMode::Debug);
    }

    #[test]
    fn missing_explicit_path_is_an_error() {
        assert!(FlipdefConfig::load(Some(Path::new("does/not/exist.toml"))).is_err());
    }
}
