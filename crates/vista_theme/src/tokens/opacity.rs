//! Opacity tokens for theming

use serde::Serialize;

/// Semantic opacity token keys for dynamic access
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub enum OpacityToken {
    /// Floor applied to de-emphasized content
    Minimum,
}

/// Complete set of opacity tokens
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct OpacityTokens {
    pub minimum: f32,
}

impl OpacityTokens {
    /// Get opacity value by token key
    pub fn get(&self, token: OpacityToken) -> f32 {
        match token {
            OpacityToken::Minimum => self.minimum,
        }
    }
}

impl Default for OpacityTokens {
    fn default() -> Self {
        Self { minimum: 0.6 }
    }
}
