//! Reproducible specification for an effect snapshot.
//!
//! A [`Recipe`] captures everything needed to recreate a rendered frame:
//! effect name, snapshot dimensions, parameter overrides, PRNG seed, and
//! the number of fixed ticks to advance before rasterizing.

use crate::error::BackdropError;
use serde::{Deserialize, Serialize};

/// Reproducible specification for a rendered background frame.
///
/// Two identical `Recipe` values fed to the same binary produce
/// bit-identical pixel output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recipe {
    pub effect: String,
    pub width: usize,
    pub height: usize,
    pub params: serde_json::Value,
    pub seed: u64,
    pub steps: usize,
}

impl Recipe {
    /// Creates a new recipe with default params (`{}`) and steps (`0`).
    pub fn new(effect: &str, width: usize, height: usize, seed: u64) -> Self {
        Self {
            effect: effect.to_string(),
            width,
            height,
            params: serde_json::Value::Object(serde_json::Map::new()),
            seed,
            steps: 0,
        }
    }

    /// Validates that the snapshot has non-zero dimensions and that the
    /// pixel count does not overflow.
    ///
    /// This guards the PNG path only; live effects tolerate degenerate
    /// viewports by rendering nothing.
    pub fn validate(&self) -> Result<(), BackdropError> {
        if self.width == 0 || self.height == 0 {
            return Err(BackdropError::InvalidDimensions);
        }
        self.width
            .checked_mul(self.height)
            .ok_or(BackdropError::InvalidDimensions)?;
        Ok(())
    }
}
