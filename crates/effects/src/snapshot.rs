//! CPU-side PNG rendering of an effect frame.
//!
//! This module is feature-gated behind `png` (default on) so that hosts
//! with their own presentation path can depend on the registry without
//! pulling in the `image` crate. The pixel buffer conversion itself lives
//! in [`crate::pixel`] (always available).

use backdrop_core::error::BackdropError;
use backdrop_core::Theme;
use std::path::Path;

use crate::pixel::effect_to_rgba;
use crate::EffectKind;

/// Writes the effect's current frame as a PNG over the theme background.
///
/// Returns `BackdropError::InvalidDimensions` if the dimensions are zero
/// or overflow `u32`, or `BackdropError::Io` on write failure.
pub fn write_png(
    effect: &EffectKind,
    theme: &Theme,
    width: usize,
    height: usize,
    path: &Path,
) -> Result<(), BackdropError> {
    if width == 0 || height == 0 {
        return Err(BackdropError::InvalidDimensions);
    }
    let rgba = effect_to_rgba(effect, theme, width, height);
    let w = u32::try_from(width).map_err(|_| BackdropError::InvalidDimensions)?;
    let h = u32::try_from(height).map_err(|_| BackdropError::InvalidDimensions)?;
    let img = image::RgbaImage::from_raw(w, h, rgba)
        .ok_or_else(|| BackdropError::Io("RGBA buffer size mismatch".into()))?;
    img.save(path).map_err(|e| BackdropError::Io(e.to_string()))
}
