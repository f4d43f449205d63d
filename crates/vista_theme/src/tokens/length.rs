//! CSS-style length values (`2.75rem`, `1px`, ...)

use crate::error::{Result, ThemeError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Unit suffix of a [`Length`]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LengthUnit {
    /// Relative to the root font size
    #[default]
    Rem,
    /// Relative to the element font size
    Em,
    /// Logical pixels
    Px,
    /// Bare number
    None,
}

impl LengthUnit {
    pub fn suffix(self) -> &'static str {
        match self {
            Self::Rem => "rem",
            Self::Em => "em",
            Self::Px => "px",
            Self::None => "",
        }
    }

    pub fn from_suffix(suffix: &str) -> Option<Self> {
        match suffix {
            "rem" => Some(Self::Rem),
            "em" => Some(Self::Em),
            "px" => Some(Self::Px),
            "" => Some(Self::None),
            _ => None,
        }
    }
}

/// A numeric measurement with a unit
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Length {
    pub value: f64,
    pub unit: LengthUnit,
}

impl Length {
    pub const fn new(value: f64, unit: LengthUnit) -> Self {
        Self { value, unit }
    }

    pub const fn rem(value: f64) -> Self {
        Self::new(value, LengthUnit::Rem)
    }

    pub const fn px(value: f64) -> Self {
        Self::new(value, LengthUnit::Px)
    }

    /// Parse `"<number><unit>"`, e.g. `"0.625rem"`, `"1px"` or `"20"`
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        let (value, rest) = leading_number(trimmed).ok_or_else(|| ThemeError::InvalidLength {
            input: input.to_string(),
            reason: "expected a leading number",
        })?;
        let unit = LengthUnit::from_suffix(rest.trim()).ok_or_else(|| {
            ThemeError::InvalidLength {
                input: input.to_string(),
                reason: "unsupported unit",
            }
        })?;
        Ok(Self { value, unit })
    }

    /// Same unit, value multiplied by `factor`
    pub fn scaled(self, factor: f64) -> Self {
        Self::new(self.value * factor, self.unit)
    }

    pub fn is_positive(&self) -> bool {
        self.value > 0.0
    }
}

/// Split the numeric prefix (`[+-]digits[.digits]`) off `input`
pub(crate) fn leading_number(input: &str) -> Option<(f64, &str)> {
    let bytes = input.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digit_count = end - digits_start;
    if end < bytes.len() && bytes[end] == b'.' {
        let fraction_start = end + 1;
        let mut fraction_end = fraction_start;
        while fraction_end < bytes.len() && bytes[fraction_end].is_ascii_digit() {
            fraction_end += 1;
        }
        digit_count += fraction_end - fraction_start;
        end = fraction_end;
    }
    if digit_count == 0 {
        return None;
    }
    let value = input[..end].parse().ok()?;
    Some((value, &input[end..]))
}

impl FromStr for Length {
    type Err = ThemeError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Length {
    type Error = ThemeError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<Length> for String {
    fn from(length: Length) -> Self {
        length.to_string()
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value, self.unit.suffix())
    }
}
