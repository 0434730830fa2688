//! Packed ARGB colors.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// A color packed as `0xAARRGGBB`.
///
/// This is the representation stored in a [`Style`](crate::style::Style) and
/// handed to the paint routines. The zero value is fully transparent black,
/// which is also the fallback for an absent color property.
///
/// # Example
///
/// ```
/// use trellis_style::types::Color;
///
/// let c = Color::from_argb(0xFF, 0x20, 0x40, 0x60);
/// assert_eq!(c, Color(0xFF204060));
/// assert_eq!(c.r(), 0x20);
/// assert_eq!(Color::from_hex("#204060"), Some(c));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color(pub u32);

impl Color {
    /// Create a color from 8-bit alpha, red, green and blue components.
    #[inline]
    pub const fn from_argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self(((a as u32) << 24) | ((r as u32) << 16) | ((g as u32) << 8) | (b as u32))
    }

    /// Create an opaque color from 8-bit red, green and blue components.
    #[inline]
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self::from_argb(0xFF, r, g, b)
    }

    /// Parse `#RRGGBB` or `#AARRGGBB` (the `#` is optional).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim().trim_start_matches('#');
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let value = u32::from_str_radix(hex, 16).ok()?;
        match hex.len() {
            6 => Some(Self(0xFF00_0000 | value)),
            8 => Some(Self(value)),
            _ => None,
        }
    }

    /// Alpha channel.
    #[inline]
    pub const fn a(self) -> u8 {
        (self.0 >> 24) as u8
    }

    /// Red channel.
    #[inline]
    pub const fn r(self) -> u8 {
        (self.0 >> 16) as u8
    }

    /// Green channel.
    #[inline]
    pub const fn g(self) -> u8 {
        (self.0 >> 8) as u8
    }

    /// Blue channel.
    #[inline]
    pub const fn b(self) -> u8 {
        self.0 as u8
    }

    /// Whether the color contributes nothing when painted.
    #[inline]
    pub const fn is_transparent(self) -> bool {
        self.a() == 0
    }

    /// Return the same color with a different alpha.
    #[inline]
    pub const fn with_alpha(self, alpha: u8) -> Self {
        Self((self.0 & 0x00FF_FFFF) | ((alpha as u32) << 24))
    }

    /// Convert to non-premultiplied `[r, g, b, a]` in the 0.0-1.0 range.
    pub fn to_array(self) -> [f32; 4] {
        [
            self.r() as f32 / 255.0,
            self.g() as f32 / 255.0,
            self.b() as f32 / 255.0,
            self.a() as f32 / 255.0,
        ]
    }

    // Common colors
    pub const TRANSPARENT: Self = Self(0x0000_0000);
    pub const BLACK: Self = Self(0xFF00_0000);
    pub const WHITE: Self = Self(0xFFFF_FFFF);
    pub const RED: Self = Self(0xFFFF_0000);
    pub const GREEN: Self = Self(0xFF00_FF00);
    pub const BLUE: Self = Self(0xFF00_00FF);
    pub const GRAY: Self = Self(0xFF80_8080);
}

impl From<u32> for Color {
    fn from(argb: u32) -> Self {
        Self(argb)
    }
}

impl FromStr for Color {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s).ok_or_else(|| Error::InvalidColor(s.to_string()))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:08X}", self.0)
    }
}
