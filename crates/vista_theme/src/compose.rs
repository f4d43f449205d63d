//! Theme composition
//!
//! [`ThemeComposer`] merges one palette, one density, the spacing and
//! divider scales derived from that density, and the structural tokens into
//! a single [`ComposedTheme`]. Composition is pure: the same inputs always
//! produce the same theme, and an unknown name fails instead of producing a
//! partial theme.

use crate::error::{Result, ThemeError};
use crate::tokens::*;
use serde::Serialize;
use std::collections::HashMap;
use vista_core::Color;

/// Which palette and density to compose
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ThemeSelection {
    pub palette: String,
    pub density: String,
}

impl ThemeSelection {
    pub fn new(palette: impl Into<String>, density: impl Into<String>) -> Self {
        Self {
            palette: palette.into(),
            density: density.into(),
        }
    }
}

impl Default for ThemeSelection {
    fn default() -> Self {
        Self::new(palettes::LIGHT, densities::COMFORTABLE)
    }
}

/// Spacing steps at 1x, 2x and 3x the density's spacing unit
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SpacingScale {
    pub minimum: Length,
    pub medium: Length,
    pub large: Length,
}

impl SpacingScale {
    pub fn from_base(base: f64) -> Self {
        Self {
            minimum: Length::rem(base),
            medium: Length::rem(2.0 * base),
            large: Length::rem(3.0 * base),
        }
    }
}

/// Divider sizes at 1x and 3x the density's spacing unit
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DividerScale {
    pub height: Length,
    pub minimum_size: Length,
}

impl DividerScale {
    pub fn from_base(base: f64) -> Self {
        Self {
            height: Length::rem(base),
            minimum_size: Length::rem(3.0 * base),
        }
    }
}

/// The fully merged theme handed to descendant content
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ComposedTheme {
    /// Active palette name
    pub name: String,
    /// Active density name
    pub density_name: String,
    pub palette: PaletteSet,
    pub density: DensitySet,
    pub spacing: SpacingScale,
    pub dividers: DividerScale,
    pub border_radius: Length,
    pub breakpoints: Breakpoints,
    pub layers: ZIndexLayers,
    pub transitions: Transitions,
    pub fonts: FontSizes,
    pub opacity: OpacityTokens,
    pub background: Color,
    /// Viewport width in reference font units
    pub screen_size: f64,
}

impl ComposedTheme {
    /// Get a palette color by role
    pub fn color(&self, token: ColorToken) -> Color {
        self.palette.get(token)
    }

    /// `multiplier * base` rendered with `unit` (default `rem`).
    ///
    /// Only the numeric prefix of `base` is used, so `scale(2.0,
    /// "0.625rem", None)` gives `"1.25rem"` and `scale(3.0, "1px",
    /// Some("px"))` gives `"3px"`.
    pub fn scale(&self, multiplier: f64, base: &str, unit: Option<&str>) -> Result<String> {
        let (value, _) =
            leading_number(base.trim()).ok_or_else(|| ThemeError::InvalidLength {
                input: base.to_string(),
                reason: "expected a leading number",
            })?;
        let unit = unit.filter(|u| !u.is_empty()).unwrap_or("rem");
        Ok(format!("{}{}", multiplier * value, unit))
    }

    /// Whether the viewport is narrower than `threshold` (e.g. `"58.75rem"`).
    ///
    /// Strict comparison: a viewport exactly at the threshold is not below
    /// it. A threshold without a numeric prefix is never matched.
    pub fn is_screen_below(&self, threshold: &str) -> bool {
        match leading_number(threshold.trim()) {
            Some((value, _)) => self.screen_size < value,
            None => {
                tracing::warn!(threshold, "unparseable breakpoint threshold");
                false
            }
        }
    }

    /// Flatten into style variables keyed by their camelCase names
    pub fn to_variable_map(&self) -> HashMap<String, String> {
        let mut vars = HashMap::with_capacity(48);

        for token in ColorToken::ALL {
            vars.insert(
                token.variable_name().into(),
                self.palette.get(token).to_hex_string(),
            );
        }

        vars.insert("theme".into(), self.name.clone());
        vars.insert("density".into(), self.density_name.clone());
        vars.insert(
            "minimumButtonSize".into(),
            self.density.minimum_button_size.to_string(),
        );
        vars.insert(
            "minimumLineSize".into(),
            self.density.minimum_line_size.to_string(),
        );
        vars.insert("minimumSpacing".into(), self.spacing.minimum.to_string());
        vars.insert("mediumSpacing".into(), self.spacing.medium.to_string());
        vars.insert("largeSpacing".into(), self.spacing.large.to_string());
        vars.insert("dividerHeight".into(), self.dividers.height.to_string());
        vars.insert(
            "minimumDividerSize".into(),
            self.dividers.minimum_size.to_string(),
        );
        vars.insert("borderRadius".into(), self.border_radius.to_string());

        vars.insert(
            "minimumScreenSize".into(),
            self.breakpoints.minimum.to_string(),
        );
        vars.insert("mobileScreenSize".into(), self.breakpoints.mobile.to_string());
        vars.insert("smallScreenSize".into(), self.breakpoints.small.to_string());
        vars.insert("mediumScreenSize".into(), self.breakpoints.medium.to_string());

        for (name, z) in self.layers.variables() {
            vars.insert(name.into(), z.to_string());
        }

        vars.insert(
            "transitionTime".into(),
            format_seconds(self.transitions.transition_time),
        );
        vars.insert(
            "coreTransitionTime".into(),
            format_seconds(self.transitions.core_transition_time),
        );

        vars.insert("minimumFontSize".into(), self.fonts.minimum.to_string());
        vars.insert("mediumFontSize".into(), self.fonts.medium.to_string());
        vars.insert("largeFontSize".into(), self.fonts.large.to_string());

        vars.insert(
            "minimumOpacity".into(),
            self.opacity.get(OpacityToken::Minimum).to_string(),
        );
        vars.insert("background".into(), self.background.to_hex_string());
        vars.insert("screenSize".into(), self.screen_size.to_string());

        vars
    }
}

/// Builds [`ComposedTheme`]s from named palettes and densities
#[derive(Clone, Debug)]
pub struct ThemeComposer {
    palettes: PaletteTable,
    densities: DensityTable,
}

impl ThemeComposer {
    pub fn new(palettes: PaletteTable, densities: DensityTable) -> Self {
        Self {
            palettes,
            densities,
        }
    }

    /// Composer over the built-in palettes and densities
    pub fn builtin() -> Self {
        Self::new(PaletteTable::builtin(), DensityTable::builtin())
    }

    pub fn palettes(&self) -> &PaletteTable {
        &self.palettes
    }

    pub fn densities(&self) -> &DensityTable {
        &self.densities
    }

    /// Compose the theme for `palette_name` + `density_name`.
    ///
    /// The screen-size metric starts at zero; the theme store fills it in.
    pub fn compose(&self, palette_name: &str, density_name: &str) -> Result<ComposedTheme> {
        let palette = self.palettes.get(palette_name)?;
        let density = self.densities.get(density_name)?;
        density.validate()?;

        let base = density.minimum_spacing.value;

        Ok(ComposedTheme {
            name: palette_name.to_string(),
            density_name: density_name.to_string(),
            palette: palette.clone(),
            density: density.clone(),
            spacing: SpacingScale::from_base(base),
            dividers: DividerScale::from_base(base),
            border_radius: BORDER_RADIUS,
            breakpoints: Breakpoints::default(),
            layers: ZIndexLayers::default(),
            transitions: Transitions::default(),
            fonts: FontSizes::default(),
            opacity: OpacityTokens::default(),
            background: Color::BLACK,
            screen_size: 0.0,
        })
    }

    pub fn compose_selection(&self, selection: &ThemeSelection) -> Result<ComposedTheme> {
        self.compose(&selection.palette, &selection.density)
    }
}

impl Default for ThemeComposer {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Compose from the built-in tables
pub fn compose_theme(palette_name: &str, density_name: &str) -> Result<ComposedTheme> {
    ThemeComposer::builtin().compose(palette_name, density_name)
}
