//! Active theme holder
//!
//! [`ActiveTheme`] owns the base definition, the current override and mode,
//! and the last table that baked successfully. Readers take a cheap
//! `Arc<BakedTheme>` snapshot; a reload that fails keeps serving the
//! previous table.

use flipdef_core::Color;
use std::sync::{Arc, OnceLock, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, info, warn};

use crate::bake::{bake, BakedTheme};
use crate::definition::ThemeDefinition;
use crate::error::{BakeError, ThemeError};
use crate::parse::ParseOutcome;
use crate::presets::BASE_THEME;
use crate::tokens::{ThemeColor, ThemeMode, ThemeState};

/// Global active theme instance
static ACTIVE_THEME: OnceLock<ActiveTheme> = OnceLock::new();

struct Inputs {
    /// Base plus override
    combined: ThemeDefinition,
    override_src: Option<String>,
    mode: ThemeMode,
}

pub struct ActiveTheme {
    base: ThemeDefinition,
    inputs: RwLock<Inputs>,
    baked: RwLock<Arc<BakedTheme>>,
}

impl ActiveTheme {
    /// Bake `base` for `mode`. Fails if the base itself does not bake.
    pub fn new(base: ThemeDefinition, mode: ThemeMode) -> Result<Self, BakeError> {
        let baked = bake(&base, mode)?;
        Ok(Self {
            inputs: RwLock::new(Inputs {
                combined: base.clone(),
                override_src: None,
                mode,
            }),
            base,
            baked: RwLock::new(Arc::new(baked)),
        })
    }

    /// Start from the built-in base theme
    pub fn with_builtin(mode: ThemeMode) -> Result<Self, ThemeError> {
        let base = ThemeDefinition::parse(BASE_THEME)?;
        Ok(Self::new(base, mode)?)
    }

    /// Install the global instance. Returns `false` if one already exists.
    pub fn init(theme: ActiveTheme) -> bool {
        ACTIVE_THEME.set(theme).is_ok()
    }

    /// The global instance, if [`init`](Self::init) has been called
    pub fn try_get() -> Option<&'static ActiveTheme> {
        ACTIVE_THEME.get()
    }

    fn inputs(&self) -> RwLockReadGuard<'_, Inputs> {
        self.inputs.read().unwrap_or_else(|e| e.into_inner())
    }

    fn inputs_mut(&self) -> RwLockWriteGuard<'_, Inputs> {
        self.inputs.write().unwrap_or_else(|e| e.into_inner())
    }

    fn publish(&self, theme: BakedTheme) {
        *self.baked.write().unwrap_or_else(|e| e.into_inner()) = Arc::new(theme);
    }

    pub fn mode(&self) -> ThemeMode {
        self.inputs().mode
    }

    /// Current override text, if any
    pub fn override_source(&self) -> Option<String> {
        self.inputs().override_src.clone()
    }

    /// Snapshot of the last successful bake
    pub fn baked(&self) -> Arc<BakedTheme> {
        self.baked.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Shorthand for `baked().get(slot, state)`
    pub fn color(&self, slot: ThemeColor, state: ThemeState) -> Color {
        self.baked().get(slot, state)
    }

    /// Re-bake for `mode`. On failure the mode and table are unchanged.
    pub fn set_mode(&self, mode: ThemeMode) -> Result<(), BakeError> {
        let mut inputs = self.inputs_mut();
        if inputs.mode == mode {
            return Ok(());
        }
        match bake(&inputs.combined, mode) {
            Ok(theme) => {
                debug!(from = %inputs.mode, to = %mode, "Switched theme mode");
                inputs.mode = mode;
                self.publish(theme);
                Ok(())
            }
            Err(err) => {
                warn!(%mode, error = %err, "Theme mode switch rejected, keeping previous theme");
                Err(err)
            }
        }
    }

    /// Layer `src` over the base theme and re-bake.
    ///
    /// On any parse or bake failure the previous override and table stay
    /// active.
    pub fn apply_override(&self, src: &str) -> Result<ParseOutcome, ThemeError> {
        let mut inputs = self.inputs_mut();
        let result = ThemeDefinition::parse_with_outcome(src)
            .map_err(ThemeError::from)
            .and_then(|(overrides, outcome)| {
                let combined = ThemeDefinition::combine(&self.base, &overrides);
                let theme = bake(&combined, inputs.mode)?;
                Ok((combined, theme, outcome))
            });

        match result {
            Ok((combined, theme, outcome)) => {
                info!(
                    entries = outcome.added,
                    duplicates = outcome.duplicates.len(),
                    mode = %inputs.mode,
                    "Applied theme override"
                );
                inputs.combined = combined;
                inputs.override_src = Some(src.to_string());
                self.publish(theme);
                Ok(outcome)
            }
            Err(err) => {
                warn!(error = %err, "Theme override rejected, keeping previous theme");
                Err(err)
            }
        }
    }

    /// Drop the override and re-bake the base theme alone
    pub fn clear_override(&self) -> Result<(), BakeError> {
        let mut inputs = self.inputs_mut();
        if inputs.override_src.is_none() {
            return Ok(());
        }
        let theme = bake(&self.base, inputs.mode).map_err(|err| {
            warn!(error = %err, "Base theme failed to bake, keeping previous theme");
            err
        })?;
        inputs.combined = self.base.clone();
        inputs.override_src = None;
        self.publish(theme);
        Ok(())
    }
}
