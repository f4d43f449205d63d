//! Sizing densities
//!
//! A density fixes three base measurements from which control sizes and the
//! spacing scale are derived.

use super::length::Length;
use crate::error::{Result, ThemeError};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Built-in density names
pub mod densities {
    pub const COMFORTABLE: &str = "comfortable";
    pub const COZY: &str = "cozy";
    pub const COMPACT: &str = "compact";
}

/// Base measurements of a sizing profile
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DensitySet {
    /// Smallest interactive control size
    pub minimum_button_size: Length,
    /// Smallest line height
    pub minimum_line_size: Length,
    /// Spacing unit; base of the spacing and divider scales
    pub minimum_spacing: Length,
}

impl DensitySet {
    pub fn comfortable() -> Self {
        Self {
            minimum_button_size: Length::rem(2.75),
            minimum_line_size: Length::rem(1.875),
            minimum_spacing: Length::rem(0.625),
        }
    }

    pub fn cozy() -> Self {
        Self {
            minimum_button_size: Length::rem(2.275),
            minimum_line_size: Length::rem(1.6875),
            minimum_spacing: Length::rem(0.4625),
        }
    }

    pub fn compact() -> Self {
        Self {
            minimum_button_size: Length::rem(1.8),
            minimum_line_size: Length::rem(1.5),
            minimum_spacing: Length::rem(0.3),
        }
    }

    /// Check that every measurement is strictly positive
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("minimum_button_size", &self.minimum_button_size),
            ("minimum_line_size", &self.minimum_line_size),
            ("minimum_spacing", &self.minimum_spacing),
        ];
        for (field, length) in fields {
            if !length.is_positive() {
                return Err(ThemeError::NonPositiveLength {
                    field,
                    value: length.to_string(),
                });
            }
        }
        Ok(())
    }
}

/// Name -> density lookup table
#[derive(Clone, Debug, Default)]
pub struct DensityTable {
    entries: FxHashMap<String, DensitySet>,
}

impl DensityTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in densities
    pub fn builtin() -> Self {
        let mut entries = FxHashMap::default();
        entries.insert(densities::COMFORTABLE.to_string(), DensitySet::comfortable());
        entries.insert(densities::COZY.to_string(), DensitySet::cozy());
        entries.insert(densities::COMPACT.to_string(), DensitySet::compact());
        Self { entries }
    }

    /// Register or replace a density after validating it
    pub fn insert(&mut self, name: impl Into<String>, density: DensitySet) -> Result<()> {
        density.validate()?;
        self.entries.insert(name.into(), density);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Result<&DensitySet> {
        self.entries
            .get(name)
            .ok_or_else(|| ThemeError::UnknownDensity(name.to_string()))
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_densities_are_valid() {
        let table = DensityTable::builtin();
        assert_eq!(table.names(), vec!["comfortable", "compact", "cozy"]);
        for name in table.names() {
            table.get(name).unwrap().validate().unwrap();
        }
    }

    #[test]
    fn test_insert_rejects_non_positive() {
        let mut table = DensityTable::new();
        let mut density = DensitySet::compact();
        density.minimum_spacing = Length::rem(0.0);

        let err = table.insert("flat", density).unwrap_err();
        assert!(matches!(
            err,
            ThemeError::NonPositiveLength {
                field: "minimum_spacing",
                ..
            }
        ));
        assert!(!table.contains("flat"));
    }

    #[test]
    fn test_unknown_density() {
        assert!(matches!(
            DensityTable::builtin().get("spacious"),
            Err(ThemeError::UnknownDensity(_))
        ));
    }

    #[test]
    fn test_deserialize_from_strings() {
        let density: DensitySet = toml::from_str(
            r#"
            minimum_button_size = "3rem"
            minimum_line_size = "2rem"
            minimum_spacing = "0.75rem"
            "#,
        )
        .unwrap();
        assert_eq!(density.minimum_spacing, Length::rem(0.75));
    }
}
