//! Theme configuration
//!
//! Loaded from TOML. Every field is optional:
//!
//! ```toml
//! palette = "light"
//! density = "comfortable"
//! throttle_ms = 30
//! reference_font_size = 16.0
//!
//! [densities.roomy]
//! minimum_button_size = "3rem"
//! minimum_line_size = "2rem"
//! minimum_spacing = "0.75rem"
//! ```
//!
//! Palettes and densities declared here are merged over the built-in ones.
//! A declared palette must supply every color role.

use crate::compose::{ThemeComposer, ThemeSelection};
use crate::error::Result;
use crate::tokens::{densities, palettes, DensitySet, DensityTable, PaletteSet, PaletteTable};
use crate::viewport::{ViewportTracker, REFERENCE_FONT_SIZE};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

/// Default coalescing interval for resize listeners
pub const DEFAULT_THROTTLE_MS: u64 = 30;

/// Theme configuration
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThemeConfig {
    /// Active palette
    pub palette: String,
    /// Active density
    pub density: String,
    /// Resize listener coalescing interval in milliseconds
    pub throttle_ms: u64,
    /// Pixels per screen-size metric unit
    pub reference_font_size: f64,
    /// Additional or overriding palettes
    pub palettes: BTreeMap<String, PaletteSet>,
    /// Additional or overriding densities
    pub densities: BTreeMap<String, DensitySet>,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            palette: palettes::LIGHT.to_string(),
            density: densities::COMFORTABLE.to_string(),
            throttle_ms: DEFAULT_THROTTLE_MS,
            reference_font_size: REFERENCE_FONT_SIZE,
            palettes: BTreeMap::new(),
            densities: BTreeMap::new(),
        }
    }
}

impl ThemeConfig {
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: ThemeConfig = toml::from_str(source)?;
        config.validate()?;
        tracing::debug!(
            palette = %config.palette,
            density = %config.density,
            extra_palettes = config.palettes.len(),
            extra_densities = config.densities.len(),
            "parsed theme config"
        );
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)?;
        tracing::debug!(path = %path.display(), "loading theme config");
        Self::from_toml_str(&source)
    }

    /// Check the scalar settings. Palettes and densities are checked when
    /// their tables are built.
    pub fn validate(&self) -> Result<()> {
        self.tracker().validate()
    }

    pub fn selection(&self) -> ThemeSelection {
        ThemeSelection::new(self.palette.clone(), self.density.clone())
    }

    pub fn throttle_interval(&self) -> Duration {
        Duration::from_millis(self.throttle_ms)
    }

    pub fn tracker(&self) -> ViewportTracker {
        ViewportTracker::new(self.reference_font_size)
    }

    /// Built-in palettes with the configured ones merged over them
    pub fn palette_table(&self) -> PaletteTable {
        let mut table = PaletteTable::builtin();
        for (name, palette) in &self.palettes {
            table.insert(name.clone(), palette.clone());
        }
        table
    }

    /// Built-in densities with the configured ones merged over them
    pub fn density_table(&self) -> Result<DensityTable> {
        let mut table = DensityTable::builtin();
        for (name, density) in &self.densities {
            table.insert(name.clone(), density.clone())?;
        }
        Ok(table)
    }

    pub fn composer(&self) -> Result<ThemeComposer> {
        self.validate()?;
        Ok(ThemeComposer::new(self.palette_table(), self.density_table()?))
    }
}
