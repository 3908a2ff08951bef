//! Color types and conversion functions for the backdrop-engine.
//!
//! Provides `Srgb`, `LinearRgb`, `OkLab`, and `OkLch` with pure conversion
//! functions between them. Gradient and theme interpolation happens in OKLCh
//! for perceptually uniform blends; effects hand sRGB to the rasterizer.

use crate::error::BackdropError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// sRGB color with components in [0, 1].
///
/// Serializes as a hex string `"#rrggbb"` for human-readable formats.
/// The hex round-trip has 8-bit quantization (1/255 precision loss).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Srgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

/// Linear RGB color (gamma-decoded).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearRgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

/// OKLab perceptual color space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OkLab {
    pub l: f64,
    pub a: f64,
    pub b: f64,
}

/// OKLCh (cylindrical form of OKLab).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OkLch {
    pub l: f64,
    pub c: f64,
    pub h: f64,
}

impl Srgb {
    /// Parses a hex color string like "#ff00aa" or "ff00aa" (case insensitive).
    ///
    /// Returns `BackdropError::InvalidColor` if the input is not a valid
    /// 6-digit hex color.
    pub fn from_hex(hex: &str) -> Result<Srgb, BackdropError> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 {
            return Err(BackdropError::InvalidColor(format!(
                "expected 6 hex digits, got {}",
                hex.len()
            )));
        }
        let r = u8::from_str_radix(&hex[0..2], 16)
            .map_err(|e| BackdropError::InvalidColor(format!("invalid red component: {e}")))?;
        let g = u8::from_str_radix(&hex[2..4], 16)
            .map_err(|e| BackdropError::InvalidColor(format!("invalid green component: {e}")))?;
        let b = u8::from_str_radix(&hex[4..6], 16)
            .map_err(|e| BackdropError::InvalidColor(format!("invalid blue component: {e}")))?;
        Ok(Srgb {
            r: r as f64 / 255.0,
            g: g as f64 / 255.0,
            b: b as f64 / 255.0,
        })
    }

    /// Converts the color to a hex string like `"#rrggbb"`.
    ///
    /// Components are quantized to 8-bit with rounding.
    pub fn to_hex(self) -> String {
        let r = (self.r.clamp(0.0, 1.0) * 255.0).round() as u8;
        let g = (self.g.clamp(0.0, 1.0) * 255.0).round() as u8;
        let b = (self.b.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!("#{r:02x}{g:02x}{b:02x}")
    }

    /// Quantizes the color to an `[r, g, b]` byte triple for pixel buffers.
    pub fn to_bytes(self) -> [u8; 3] {
        [
            (self.r.clamp(0.0, 1.0) * 255.0).round() as u8,
            (self.g.clamp(0.0, 1.0) * 255.0).round() as u8,
            (self.b.clamp(0.0, 1.0) * 255.0).round() as u8,
        ]
    }
}

impl Serialize for Srgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Srgb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Srgb::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// Applies inverse sRGB gamma to convert a single sRGB component to linear.
fn srgb_component_to_linear(c: f64) -> f64 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Applies sRGB gamma to convert a single linear component to sRGB.
fn linear_component_to_srgb(c: f64) -> f64 {
    if c <= 0.0031308 {
        c * 12.92
    } else {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    }
}

/// Converts sRGB to linear RGB by applying inverse sRGB gamma.
pub fn srgb_to_linear(c: Srgb) -> LinearRgb {
    LinearRgb {
        r: srgb_component_to_linear(c.r),
        g: srgb_component_to_linear(c.g),
        b: srgb_component_to_linear(c.b),
    }
}

/// Converts linear RGB to sRGB by applying sRGB gamma.
pub fn linear_to_srgb(c: LinearRgb) -> Srgb {
    Srgb {
        r: linear_component_to_srgb(c.r),
        g: linear_component_to_srgb(c.g),
        b: linear_component_to_srgb(c.b),
    }
}

/// Converts linear RGB to OKLab via the OKLab matrix transform.
pub fn linear_to_oklab(c: LinearRgb) -> OkLab {
    let l_ = 0.4122214708 * c.r + 0.5363325363 * c.g + 0.0514459929 * c.b;
    let m_ = 0.2119034982 * c.r + 0.6806995451 * c.g + 0.1073969566 * c.b;
    let s_ = 0.0883024619 * c.r + 0.2817188376 * c.g + 0.6299787005 * c.b;

    let l_c = l_.cbrt();
    let m_c = m_.cbrt();
    let s_c = s_.cbrt();

    OkLab {
        l: 0.2104542553 * l_c + 0.7936177850 * m_c - 0.0040720468 * s_c,
        a: 1.9779984951 * l_c - 2.4285922050 * m_c + 0.4505937099 * s_c,
        b: 0.0259040371 * l_c + 0.7827717662 * m_c - 0.8086757660 * s_c,
    }
}

/// Converts OKLab back to linear RGB via the inverse matrix transform.
pub fn oklab_to_linear(c: OkLab) -> LinearRgb {
    let l_c = c.l + 0.3963377774 * c.a + 0.2158037573 * c.b;
    let m_c = c.l - 0.1055613458 * c.a - 0.0638541728 * c.b;
    let s_c = c.l - 0.0894841775 * c.a - 1.2914855480 * c.b;

    let l_ = l_c * l_c * l_c;
    let m_ = m_c * m_c * m_c;
    let s_ = s_c * s_c * s_c;

    LinearRgb {
        r: 4.0767416621 * l_ - 3.3077115913 * m_ + 0.2309699292 * s_,
        g: -1.2684380046 * l_ + 2.6097574011 * m_ - 0.3413193965 * s_,
        b: -0.0041960863 * l_ - 0.7034186147 * m_ + 1.7076147010 * s_,
    }
}

/// Converts OKLab to its cylindrical form OKLCh.
///
/// Hue is in degrees, normalized to [0, 360).
pub fn oklab_to_oklch(c: OkLab) -> OkLch {
    let chroma = (c.a * c.a + c.b * c.b).sqrt();
    let hue = c.b.atan2(c.a).to_degrees().rem_euclid(360.0);
    OkLch {
        l: c.l,
        c: chroma,
        h: hue,
    }
}

/// Converts OKLCh back to OKLab.
pub fn oklch_to_oklab(c: OkLch) -> OkLab {
    let h_rad = c.h.to_radians();
    OkLab {
        l: c.l,
        a: c.c * h_rad.cos(),
        b: c.c * h_rad.sin(),
    }
}

/// Full pipeline: sRGB -> linear -> OKLab -> OKLCh.
pub fn srgb_to_oklch(c: Srgb) -> OkLch {
    oklab_to_oklch(linear_to_oklab(srgb_to_linear(c)))
}

/// Full pipeline: OKLCh -> OKLab -> linear -> sRGB, clamped to gamut.
pub fn oklch_to_srgb(c: OkLch) -> Srgb {
    let linear = oklab_to_linear(oklch_to_oklab(c));
    let srgb = linear_to_srgb(linear);
    Srgb {
        r: srgb.r.clamp(0.0, 1.0),
        g: srgb.g.clamp(0.0, 1.0),
        b: srgb.b.clamp(0.0, 1.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-3;

    fn srgb_approx_eq(a: Srgb, b: Srgb) -> bool {
        (a.r - b.r).abs() < EPSILON && (a.g - b.g).abs() < EPSILON && (a.b - b.b).abs() < EPSILON
    }

    #[test]
    fn from_hex_parses_with_and_without_hash() {
        let with = Srgb::from_hex("#ff8000").unwrap();
        let without = Srgb::from_hex("ff8000").unwrap();
        assert_eq!(with, without);
        assert!((with.r - 1.0).abs() < EPSILON);
        assert!((with.g - 128.0 / 255.0).abs() < EPSILON);
        assert!((with.b - 0.0).abs() < EPSILON);
    }

    #[test]
    fn from_hex_is_case_insensitive() {
        let lower = Srgb::from_hex("#aabbcc").unwrap();
        let upper = Srgb::from_hex("#AABBCC").unwrap();
        assert_eq!(lower, upper);
    }

    #[test]
    fn from_hex_rejects_wrong_length() {
        assert!(Srgb::from_hex("#fff").is_err());
        assert!(Srgb::from_hex("#ff80001").is_err());
        assert!(Srgb::from_hex("").is_err());
    }

    #[test]
    fn from_hex_rejects_non_hex_digits() {
        assert!(Srgb::from_hex("#gg0000").is_err());
    }

    #[test]
    fn hex_round_trip_preserves_color() {
        for hex in ["#000000", "#ffffff", "#17d46b", "#306ee8", "#854ce6"] {
            let c = Srgb::from_hex(hex).unwrap();
            assert_eq!(c.to_hex(), hex);
        }
    }

    #[test]
    fn to_bytes_quantizes_endpoints() {
        let white = Srgb {
            r: 1.0,
            g: 1.0,
            b: 1.0,
        };
        assert_eq!(white.to_bytes(), [255, 255, 255]);
        let black = Srgb {
            r: 0.0,
            g: 0.0,
            b: 0.0,
        };
        assert_eq!(black.to_bytes(), [0, 0, 0]);
    }

    #[test]
    fn serde_round_trip_as_hex_string() {
        let c = Srgb::from_hex("#0af587").unwrap();
        let json = serde_json::to_string(&c).unwrap();
        assert_eq!(json, "\"#0af587\"");
        let restored: Srgb = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, c);
    }

    #[test]
    fn srgb_linear_round_trip() {
        let c = Srgb {
            r: 0.25,
            g: 0.5,
            b: 0.75,
        };
        let back = linear_to_srgb(srgb_to_linear(c));
        assert!(srgb_approx_eq(c, back), "got {back:?}");
    }

    #[test]
    fn oklch_round_trip_for_primary_colors() {
        for hex in ["#ff0000", "#00ff00", "#0000ff", "#808080"] {
            let c = Srgb::from_hex(hex).unwrap();
            let back = oklch_to_srgb(srgb_to_oklch(c));
            assert!(srgb_approx_eq(c, back), "{hex}: got {back:?}");
        }
    }

    #[test]
    fn white_maps_to_oklab_l_one() {
        let lab = linear_to_oklab(srgb_to_linear(Srgb {
            r: 1.0,
            g: 1.0,
            b: 1.0,
        }));
        assert!((lab.l - 1.0).abs() < 1e-3, "white L = {}", lab.l);
        assert!(lab.a.abs() < 1e-3 && lab.b.abs() < 1e-3, "white is neutral");
    }

    #[test]
    fn oklch_hue_is_normalized() {
        let c = srgb_to_oklch(Srgb::from_hex("#3366ff").unwrap());
        assert!((0.0..360.0).contains(&c.h), "hue {} out of range", c.h);
    }

    #[test]
    fn oklch_to_srgb_clamps_out_of_gamut() {
        // Extreme chroma at mid lightness lands outside sRGB; components
        // must still come back clamped to [0, 1].
        let c = oklch_to_srgb(OkLch {
            l: 0.6,
            c: 0.5,
            h: 150.0,
        });
        for comp in [c.r, c.g, c.b] {
            assert!((0.0..=1.0).contains(&comp), "component {comp} not clamped");
        }
    }
}
