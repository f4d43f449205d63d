//! Theme error types

use thiserror::Error;

/// Theme-related errors
#[derive(Error, Debug)]
pub enum ThemeError {
    /// No palette registered under this name
    #[error("unknown palette `{0}`")]
    UnknownPalette(String),

    /// No density registered under this name
    #[error("unknown density `{0}`")]
    UnknownDensity(String),

    /// A length string could not be parsed
    #[error("invalid length `{input}`: {reason}")]
    InvalidLength { input: String, reason: &'static str },

    /// A density measurement must be strictly positive
    #[error("density measurement `{field}` must be positive, got {value}")]
    NonPositiveLength { field: &'static str, value: String },

    /// A color string could not be parsed
    #[error(transparent)]
    InvalidColor(#[from] vista_core::ColorParseError),

    /// Theme configuration is not valid TOML or misses required fields
    #[error("failed to parse theme config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Theme configuration could not be read
    #[error("failed to read theme config: {0}")]
    Io(#[from] std::io::Error),
}

impl ThemeError {
    /// Whether this error stems from bad configuration (as opposed to I/O).
    ///
    /// Configuration errors are fatal at composition time: no partially
    /// populated theme is ever produced.
    pub fn is_configuration(&self) -> bool {
        !matches!(self, Self::Io(_))
    }
}

/// Result type for theme operations
pub type Result<T> = std::result::Result<T, ThemeError>;
