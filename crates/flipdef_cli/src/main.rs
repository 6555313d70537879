//! flipdef-theme - check and bake flipdef theme definitions
//!
//! Reads an optional `flipdef.toml`:
//!
//! ```toml
//! [theme]
//! base = "themes/base.theme"   # optional, built-in preset otherwise
//! override = "my.theme"        # optional
//! mode = "dark"                # dark, light or debug
//! ```
//!
//! Command-line arguments take precedence over the file.

mod config;
mod themes;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use flipdef_theme::{bake, bake_with_report, ThemeMode};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

use config::FlipdefConfig;

/// Check and bake flipdef theme definitions
#[derive(Parser, Debug)]
#[command(name = "flipdef-theme")]
#[command(about = "Check and bake flipdef theme definitions")]
#[command(version)]
struct Cli {
    /// Config file (defaults to ./flipdef.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse and bake Dark and Light, reporting duplicates and unused entries
    Check {
        /// Override theme file
        file: Option<PathBuf>,

        /// Base theme file
        #[arg(long)]
        base: Option<PathBuf>,
    },

    /// Print every baked cell as `Slot_State: #RRGGBBAA`
    Bake {
        /// Override theme file
        file: Option<PathBuf>,

        /// Mode to bake (dark, light or debug)
        #[arg(short, long, value_parser = themes::parse_mode)]
        mode: Option<ThemeMode>,

        /// Base theme file
        #[arg(long)]
        base: Option<PathBuf>,

        /// Print JSON instead of theme-file lines
        #[arg(long)]
        json: bool,
    },

    /// List color slots and the states each is baked for
    Slots,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = FlipdefConfig::load(cli.config.as_deref())?;
    debug!(?config, "Loaded configuration");

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Command::Check { file, base } => check(&config, file, base, &mut out),
        Command::Bake {
            file,
            mode,
            base,
            json,
        } => {
            let base = themes::load_base(&config.theme, base.as_deref())?;
            let overrides = themes::load_override(&config.theme, file.as_deref())?;
            let def = themes::combine(&base, overrides.as_ref());
            let mode = mode.unwrap_or(config.theme.mode);

            let theme = bake(&def, mode).with_context(|| format!("Failed to bake {mode} theme"))?;
            if json {
                themes::write_json(&mut out, &theme)
            } else {
                themes::write_table(&mut out, &theme).context("Failed to write output")
            }
        }
        Command::Slots => themes::write_slots(&mut out).context("Failed to write output"),
    }
}

fn check(
    config: &FlipdefConfig,
    file: Option<PathBuf>,
    base: Option<PathBuf>,
    out: &mut impl Write,
) -> Result<()> {
    let base = themes::load_base(&config.theme, base.as_deref())?;
    let overrides = themes::load_override(&config.theme, file.as_deref())?;

    for loaded in std::iter::once(&base).chain(overrides.as_ref()) {
        for dup in &loaded.duplicates {
            writeln!(
                out,
                "{}:{}: duplicate `{}` ({}, {}) ignored",
                loaded.origin, dup.line, dup.key, dup.mode, dup.state
            )?;
        }
    }

    let def = themes::combine(&base, overrides.as_ref());
    let mut failed = 0;
    for mode in [ThemeMode::Dark, ThemeMode::Light] {
        match bake_with_report(&def, mode) {
            Ok(report) => {
                for entry in &report.unused {
                    warn!(key = %entry.key, %mode, "Unused theme entry (possible typo)");
                    writeln!(out, "{mode}: unused entry `{}` ({}, {})", entry.key, entry.mode, entry.state)?;
                }
                info!(%mode, entries = def.len(), "Theme bakes cleanly");
            }
            Err(err) => {
                error!(%mode, error = %err, "Theme bake failed");
                writeln!(out, "{mode}: {err}")?;
                failed += 1;
            }
        }
    }

    if failed > 0 {
        anyhow::bail!("Theme check failed for {failed} mode(s)");
    }
    writeln!(out, "ok")?;
    Ok(())
}
