//! Packed ARGB colors
//!
//! `0xAARRGGBB` in a `u32`, the layout of the color buffer and of the
//! ARGB8888 streaming texture it is uploaded to.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(pub u32);

impl Color {
    pub const BLACK: Self = Self(0xFF000000);
    pub const WHITE: Self = Self(0xFFFFFFFF);
    pub const RED: Self = Self(0xFFFF0000);
    pub const GREEN: Self = Self(0xFF00FF00);
    pub const BLUE: Self = Self(0xFF0000FF);
    pub const YELLOW: Self = Self(0xFFFFFF00);
    pub const MAGENTA: Self = Self(0xFFFF00FF);
    pub const CYAN: Self = Self(0xFF00FFFF);
    pub const SILVER: Self = Self(0xFFC0C0C0);
    pub const GRID: Self = Self(0xFF333333);

    #[inline]
    pub const fn from_argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self((a as u32) << 24 | (r as u32) << 16 | (g as u32) << 8 | b as u32)
    }

    /// Opaque color from RGB
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::from_argb(255, r, g, b)
    }

    #[inline]
    pub const fn a(self) -> u8 {
        (self.0 >> 24) as u8
    }

    #[inline]
    pub const fn r(self) -> u8 {
        (self.0 >> 16) as u8
    }

    #[inline]
    pub const fn g(self) -> u8 {
        (self.0 >> 8) as u8
    }

    #[inline]
    pub const fn b(self) -> u8 {
        self.0 as u8
    }

    /// Scale r, g and b by `intensity` (clamped to 0.0-1.0). Alpha is untouched.
    pub fn with_intensity(self, intensity: f32) -> Self {
        let i = intensity.clamp(0.0, 1.0);
        let scale = |c: u8| (c as f32 * i) as u8;
        Self::from_argb(self.a(), scale(self.r()), scale(self.g()), scale(self.b()))
    }

    /// Byte order used by the RGBA image writer
    #[inline]
    pub const fn to_rgba_bytes(self) -> [u8; 4] {
        [self.r(), self.g(), self.b(), self.a()]
    }
}

impl From<u32> for Color {
    fn from(argb: u32) -> Self {
        Self(argb)
    }
}
