//! Color values for scene markers, segments and legends.
//!
//! Colors are stored as 8-bit sRGB with alpha so that palettes can be
//! `const`, compared exactly in tests, and written out as hex strings any
//! renderer understands. CSS color strings from configuration are parsed
//! through the `color` crate.

use std::{fmt, str::FromStr};

use color::{DynamicColor, Srgb};
use serde::{Serialize, Serializer};

/// An 8-bit sRGB color with alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    r: u8,
    g: u8,
    b: u8,
    a: u8,
}

impl Color {
    /// Create a color from a CSS color string.
    ///
    /// Accepts anything the `color` crate understands: `"#1f77b4"`,
    /// `"rgb(31, 119, 180)"`, `"rgba(0, 0, 0, 0.5)"`, `"steelblue"`, ...
    pub fn new(color_str: &str) -> Result<Self, String> {
        let dynamic = DynamicColor::from_str(color_str)
            .map_err(|err| format!("Invalid color '{color_str}': {err}"))?;
        let rgba = dynamic.to_alpha_color::<Srgb>().to_rgba8();
        Ok(Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        })
    }

    /// Create an opaque color from its channels.
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Create a color from its channels and alpha.
    pub const fn from_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn r(self) -> u8 {
        self.r
    }

    pub fn g(self) -> u8 {
        self.g
    }

    pub fn b(self) -> u8 {
        self.b
    }

    pub fn alpha(self) -> u8 {
        self.a
    }

    /// Hex notation: `#rrggbb` when opaque, `#rrggbbaa` otherwise.
    pub fn to_hex(self) -> String {
        if self.a == u8::MAX {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!(
                "#{:02x}{:02x}{:02x}{:02x}",
                self.r, self.g, self.b, self.a
            )
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::from_rgb(0, 0, 0)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}
