//! Host-supplied color palette for themeable effect colors.
//!
//! Effects must not hardcode colors the host page themes (tile borders,
//! glow dots, particle tint); those come from a `Theme` handed in at
//! construction. Effect-intrinsic palettes (the surface's height gradient)
//! stay with the effect.

use crate::color::Srgb;
use crate::error::BackdropError;
use serde::{Deserialize, Serialize};

/// Names of the built-in themes, in `from_name` order.
const THEME_NAMES: &[&str] = &["dark", "light"];

/// Small fixed palette supplied by the host page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Theme {
    /// Accent color for interactive highlights (tile borders, glow dots).
    pub primary: Srgb,
    /// Secondary accent used for particle tinting.
    pub secondary: Srgb,
    /// Page background the effects composite over.
    pub background: Srgb,
}

impl Theme {
    /// The default dark theme.
    pub fn dark() -> Self {
        Self {
            primary: Srgb::from_hex("#854ce6").expect("dark theme hex values are valid"),
            secondary: Srgb::from_hex("#306ee8").expect("dark theme hex values are valid"),
            background: Srgb::from_hex("#1c1c27").expect("dark theme hex values are valid"),
        }
    }

    /// Light counterpart of [`Theme::dark`].
    pub fn light() -> Self {
        Self {
            primary: Srgb::from_hex("#be1adb").expect("light theme hex values are valid"),
            secondary: Srgb::from_hex("#306ee8").expect("light theme hex values are valid"),
            background: Srgb::from_hex("#ffffff").expect("light theme hex values are valid"),
        }
    }

    /// Looks up a built-in theme by name.
    ///
    /// Returns `BackdropError::UnknownTheme` for unrecognized names.
    pub fn from_name(name: &str) -> Result<Self, BackdropError> {
        match name {
            "dark" => Ok(Self::dark()),
            "light" => Ok(Self::light()),
            _ => Err(BackdropError::UnknownTheme(name.to_string())),
        }
    }

    /// Returns the built-in theme names.
    pub fn list_names() -> &'static [&'static str] {
        THEME_NAMES
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}
