//! Color palettes
//!
//! A palette assigns a color to each of the semantic roles below. Palettes
//! are looked up by name in a [`PaletteTable`]; the built-in table carries
//! `dark`, `sea`, `light` and `custom`.

use crate::error::{Result, ThemeError};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use vista_core::Color;

/// Built-in palette names
pub mod palettes {
    pub const DARK: &str = "dark";
    pub const SEA: &str = "sea";
    pub const LIGHT: &str = "light";
    pub const CUSTOM: &str = "custom";
}

/// Semantic color role keys for dynamic access
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub enum ColorToken {
    Primary,
    Positive,
    Negative,
    Warning,
    Favorite,
    BackgroundNavigation,
    BackgroundAccentContent,
    BackgroundDropdown,
    BackgroundContent,
    BackgroundModal,
    BackgroundSlideout,
}

impl ColorToken {
    pub const ALL: [ColorToken; 11] = [
        ColorToken::Primary,
        ColorToken::Positive,
        ColorToken::Negative,
        ColorToken::Warning,
        ColorToken::Favorite,
        ColorToken::BackgroundNavigation,
        ColorToken::BackgroundAccentContent,
        ColorToken::BackgroundDropdown,
        ColorToken::BackgroundContent,
        ColorToken::BackgroundModal,
        ColorToken::BackgroundSlideout,
    ];

    /// Style variable name of this role
    pub fn variable_name(self) -> &'static str {
        match self {
            Self::Primary => "primaryColor",
            Self::Positive => "positiveColor",
            Self::Negative => "negativeColor",
            Self::Warning => "warningColor",
            Self::Favorite => "favoriteColor",
            Self::BackgroundNavigation => "backgroundNavigation",
            Self::BackgroundAccentContent => "backgroundAccentContent",
            Self::BackgroundDropdown => "backgroundDropdown",
            Self::BackgroundContent => "backgroundContent",
            Self::BackgroundModal => "backgroundModal",
            Self::BackgroundSlideout => "backgroundSlideout",
        }
    }
}

/// Complete set of palette colors. Every role is required.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PaletteSet {
    pub primary: Color,
    pub positive: Color,
    pub negative: Color,
    pub warning: Color,
    pub favorite: Color,
    pub background_navigation: Color,
    pub background_accent_content: Color,
    pub background_dropdown: Color,
    pub background_content: Color,
    pub background_modal: Color,
    pub background_slideout: Color,
}

impl PaletteSet {
    /// Get a color by role
    pub fn get(&self, token: ColorToken) -> Color {
        match token {
            ColorToken::Primary => self.primary,
            ColorToken::Positive => self.positive,
            ColorToken::Negative => self.negative,
            ColorToken::Warning => self.warning,
            ColorToken::Favorite => self.favorite,
            ColorToken::BackgroundNavigation => self.background_navigation,
            ColorToken::BackgroundAccentContent => self.background_accent_content,
            ColorToken::BackgroundDropdown => self.background_dropdown,
            ColorToken::BackgroundContent => self.background_content,
            ColorToken::BackgroundModal => self.background_modal,
            ColorToken::BackgroundSlideout => self.background_slideout,
        }
    }

    pub fn dark() -> Self {
        Self {
            primary: Color::from_hex(0x3c6dd5),
            positive: Color::from_hex(0x428442),
            negative: Color::from_hex(0x8a423c),
            warning: Color::from_hex(0xc89600),
            favorite: Color::from_hex(0xd1d179),
            background_navigation: Color::from_hex(0x252529),
            background_accent_content: Color::from_hex(0x2a2a2e),
            background_dropdown: Color::from_hex(0x35353a),
            background_content: Color::from_hex(0x35353a),
            background_modal: Color::from_hex(0x252529),
            background_slideout: Color::from_hex(0x252529),
        }
    }

    pub fn sea() -> Self {
        Self {
            primary: Color::from_hex(0x32a6ad),
            positive: Color::from_hex(0x154e7d),
            negative: Color::from_hex(0xa32c00),
            warning: Color::from_hex(0xb65e1f),
            favorite: Color::from_hex(0x709e33),
            background_navigation: Color::from_hex(0x0f3757),
            background_accent_content: Color::from_hex(0xffffff),
            background_dropdown: Color::from_hex(0xffffff),
            background_content: Color::from_hex(0xffffff),
            background_modal: Color::from_hex(0xe5e6e6),
            background_slideout: Color::from_hex(0xe5e6e6),
        }
    }

    pub fn light() -> Self {
        Self {
            primary: Color::from_hex(0x3c6dd5),
            positive: Color::from_hex(0x428442),
            negative: Color::from_hex(0x8a423c),
            warning: Color::from_hex(0xc89600),
            favorite: Color::from_hex(0xd1d179),
            background_navigation: Color::from_hex(0x3c6dd5),
            background_accent_content: Color::from_hex(0xedf9fc),
            background_dropdown: Color::from_hex(0xf3fdff),
            background_content: Color::from_hex(0xf3fdff),
            background_modal: Color::from_hex(0xedf9fc),
            background_slideout: Color::from_hex(0xedf9fc),
        }
    }

    /// Starting point for user customization; mirrors `dark`
    pub fn custom() -> Self {
        Self::dark()
    }
}

/// Name -> palette lookup table
#[derive(Clone, Debug, Default)]
pub struct PaletteTable {
    entries: FxHashMap<String, PaletteSet>,
}

impl PaletteTable {
    /// An empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in palettes
    pub fn builtin() -> Self {
        let mut table = Self::new();
        table.insert(palettes::DARK, PaletteSet::dark());
        table.insert(palettes::SEA, PaletteSet::sea());
        table.insert(palettes::LIGHT, PaletteSet::light());
        table.insert(palettes::CUSTOM, PaletteSet::custom());
        table
    }

    /// Register or replace a palette
    pub fn insert(&mut self, name: impl Into<String>, palette: PaletteSet) -> Option<PaletteSet> {
        self.entries.insert(name.into(), palette)
    }

    pub fn get(&self, name: &str) -> Result<&PaletteSet> {
        self.entries
            .get(name)
            .ok_or_else(|| ThemeError::UnknownPalette(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
