//! Solid paint colors handed to the drawing surface.
//!
//! Colors come in from configuration as packed `0xAARRGGBB` integers, the
//! format mobile resource systems use, and are kept as normalized `f32`
//! channels so a host renderer can use them directly.

/// A color with an alpha component, channels in `[0.0, 1.0]`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Color {
    /// Red channel.
    pub r: f32,
    /// Green channel.
    pub g: f32,
    /// Blue channel.
    pub b: f32,
    /// Alpha channel.
    pub a: f32,
}

impl Color {
    /// Fully transparent black.
    pub const TRANSPARENT: Color = Color::new(0.0, 0.0, 0.0, 0.0);
    /// Opaque white.
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0, 1.0);
    /// Opaque light grey.
    pub const LTGRAY: Color = Color::from_argb(0xFFCC_CCCC);

    /// Default color of the progress segment (`#FF33B5E5`).
    pub const DEFAULT_PROGRESS: Color = Color::from_argb(0xFF33_B5E5);
    /// Default color of the background track (`#FFC0C0C0`).
    pub const DEFAULT_BACKGROUND: Color = Color::from_argb(0xFFC0_C0C0);

    /// Creates a new `Color` from four `f32` values (red, green, blue, alpha).
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a new `Color` from four `u8` components (alpha first).
    #[inline]
    pub const fn argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: a as f32 / 255.0,
        }
    }

    /// Creates an opaque `Color` from three `u8` components.
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::argb(0xFF, r, g, b)
    }

    /// Unpacks a `0xAARRGGBB` integer.
    #[inline]
    pub const fn from_argb(argb: u32) -> Self {
        Self::argb(
            (argb >> 24) as u8,
            (argb >> 16) as u8,
            (argb >> 8) as u8,
            argb as u8,
        )
    }

    /// Packs the color back into a `0xAARRGGBB` integer.
    pub fn to_argb(self) -> u32 {
        let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u32;
        (channel(self.a) << 24) | (channel(self.r) << 16) | (channel(self.g) << 8) | channel(self.b)
    }

    /// Returns a copy with the alpha channel replaced.
    #[inline]
    pub fn with_alpha(self, alpha: f32) -> Self {
        Self {
            a: alpha.clamp(0.0, 1.0),
            ..self
        }
    }

    /// Converts the color to an array of `[f32; 4]`.
    #[inline]
    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// The default color is fully transparent.
impl Default for Color {
    #[inline]
    fn default() -> Self {
        Self::TRANSPARENT
    }
}

impl From<u32> for Color {
    #[inline]
    fn from(argb: u32) -> Self {
        Self::from_argb(argb)
    }
}

impl From<[u8; 4]> for Color {
    /// Components in `[a, r, g, b]` order.
    #[inline]
    fn from([a, r, g, b]: [u8; 4]) -> Self {
        Self::argb(a, r, g, b)
    }
}

impl From<[u8; 3]> for Color {
    #[inline]
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self::rgb(r, g, b)
    }
}

impl From<Color> for [f32; 4] {
    #[inline]
    fn from(color: Color) -> Self {
        color.to_array()
    }
}
