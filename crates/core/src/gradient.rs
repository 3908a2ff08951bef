//! Three-stop height gradient for shading displaced points.
//!
//! The surface maps each point's height to a mix factor `t` in [0, 1] and
//! shades it as `mix(low, mix(base, accent, t), t)`: low color in the
//! troughs, base rising through the midrange, accent on the crests. The
//! nested mix happens in OKLCh with shortest-arc hue interpolation so that
//! nearby heights always produce nearby colors.

use crate::color::{oklch_to_srgb, srgb_to_oklch, OkLch, Srgb};
use crate::error::BackdropError;

/// A three-stop gradient sampled by a height-derived mix factor.
#[derive(Debug, Clone)]
pub struct HeightGradient {
    low: OkLch,
    base: OkLch,
    accent: OkLch,
}

impl HeightGradient {
    /// Creates a gradient from three sRGB stops.
    pub fn new(low: Srgb, base: Srgb, accent: Srgb) -> Self {
        Self {
            low: srgb_to_oklch(low),
            base: srgb_to_oklch(base),
            accent: srgb_to_oklch(accent),
        }
    }

    /// Creates a gradient by parsing three hex color strings.
    pub fn from_hex(low: &str, base: &str, accent: &str) -> Result<Self, BackdropError> {
        Ok(Self::new(
            Srgb::from_hex(low)?,
            Srgb::from_hex(base)?,
            Srgb::from_hex(accent)?,
        ))
    }

    /// The green palette of the displaced point field.
    ///
    /// Effect-intrinsic rather than themeable: the gradient is part of the
    /// surface's visual identity, not the host page's palette.
    pub fn emerald() -> Self {
        Self::from_hex("#21ad5c", "#17d46b", "#05f28c")
            .expect("emerald gradient hex values are valid")
    }

    /// Samples the gradient at mix factor `t`.
    ///
    /// `t` is clamped to [0, 1]; NaN maps to 0. `shade(0)` is the low stop
    /// and `shade(1)` is the accent stop; the base stop shapes the midrange.
    pub fn shade(&self, t: f64) -> Srgb {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let upper = mix_oklch(self.base, self.accent, t);
        oklch_to_srgb(mix_oklch(self.low, upper, t))
    }
}

/// Linear OKLCh interpolation with shortest-arc hue blending.
fn mix_oklch(a: OkLch, b: OkLch, t: f64) -> OkLch {
    OkLch {
        l: a.l + t * (b.l - a.l),
        c: a.c + t * (b.c - a.c),
        h: interpolate_hue(a.h, b.h, t),
    }
}

/// Interpolates hue using shortest-arc logic, handling wraparound at 360.
fn interpolate_hue(h0: f64, h1: f64, t: f64) -> f64 {
    let delta = match h1 - h0 {
        d if d > 180.0 => d - 360.0,
        d if d < -180.0 => d + 360.0,
        d => d,
    };
    (h0 + t * delta).rem_euclid(360.0)
}
