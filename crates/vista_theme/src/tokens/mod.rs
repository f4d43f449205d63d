//! Design tokens for theming
//!
//! Tokens are the atomic values that make up a theme:
//! - Palettes (semantic colors)
//! - Densities (base control and spacing sizes)
//! - Lengths
//! - Opacity
//! - Structural constants (radius, breakpoints, layers, transitions, fonts)

mod density;
mod length;
mod opacity;
mod palette;
mod structural;

pub use density::*;
pub use length::*;
pub use opacity::*;
pub use palette::*;
pub use structural::*;

pub(crate) use length::leading_number;
pub(crate) use structural::format_seconds;
