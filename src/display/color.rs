//! 8bpp colour with verified register split
//!
//! In 256-colour mode the controller takes the foreground as three register
//! fields: 3 bits red (FGCR0), 3 bits green (FGCR1), 2 bits blue (FGCR2).
//! A colour byte packs them low to high.

use verus_builtin_macros::verus;

verus! {

/// Split a 3:3:2 colour byte into its (red, green, blue) register fields
pub fn split_332(color: u8) -> (fields: (u8, u8, u8))
    ensures
        fields.0 < 8,
        fields.1 < 8,
        fields.2 < 4,
{
    assert((color & 7u8) < 8u8) by (bit_vector);
    assert(((color >> 3u8) & 7u8) < 8u8) by (bit_vector);
    assert(((color >> 6u8) & 3u8) < 4u8) by (bit_vector);
    (color & 7u8, (color >> 3u8) & 7u8, (color >> 6u8) & 3u8)
}

} // verus!

/// 3:3:2 colour byte
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color(pub u8);

impl Color {
    pub const BLACK: Self = Self(0);
    pub const WHITE: Self = Self(255);
    pub const GREEN: Self = Self(32);
    pub const RED: Self = Self(5);

    /// Quantize RGB888 components
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self((r >> 5) | ((g >> 5) << 3) | ((b >> 6) << 6))
    }

    /// Foreground register fields (FGCR0, FGCR1, FGCR2)
    pub fn fields(self) -> (u8, u8, u8) {
        split_332(self.0)
    }
}

impl From<u8> for Color {
    fn from(value: u8) -> Self {
        Self(value)
    }
}
