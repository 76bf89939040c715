//! Conversions between absolute domain values, normalized fractions and
//! screen-space x-coordinates.
//!
//! A [`ValueSpace`] is a snapshot of the domain bounds and the horizontal
//! layout. It holds no other state, so it is rebuilt on demand whenever a
//! conversion is needed.

use crate::range::Domain;

/// Domain bounds plus horizontal layout, the inputs of every conversion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueSpace {
    /// Absolute domain.
    pub domain: Domain,
    /// Widget width in pixels.
    pub width: f32,
    /// Margin reserved at each end of the track.
    pub padding: f32,
}

impl ValueSpace {
    /// Creates a value space.
    pub fn new(domain: Domain, width: f32, padding: f32) -> Self {
        Self {
            domain,
            width,
            padding,
        }
    }

    /// Maps an absolute value into `[0, 1]` (unclamped).
    ///
    /// Returns `0.0` when the domain is collapsed (`max == min`).
    pub fn to_normalized(&self, value: f32) -> f32 {
        let span = self.domain.span();
        if span == 0.0 {
            0.0
        } else {
            (value - self.domain.min) / span
        }
    }

    /// Maps a normalized fraction back to an absolute value.
    pub fn to_absolute(&self, normalized: f32) -> f32 {
        self.domain.min + normalized * self.domain.span()
    }

    /// Maps a normalized fraction to a screen x-coordinate.
    pub fn to_screen(&self, normalized: f32) -> f32 {
        self.padding + normalized * self.track_span()
    }

    /// Maps a screen x-coordinate to a normalized fraction clamped to `[0, 1]`.
    ///
    /// Returns `0.0` when the layout leaves no room for the track
    /// (`width <= 2 * padding`).
    pub fn to_normalized_from_screen(&self, screen_x: f32) -> f32 {
        if self.is_degenerate_layout() {
            return 0.0;
        }
        ((screen_x - self.padding) / self.track_span()).clamp(0.0, 1.0)
    }

    /// Whether the layout leaves no draggable span.
    pub fn is_degenerate_layout(&self) -> bool {
        self.width <= 2.0 * self.padding
    }

    fn track_span(&self) -> f32 {
        self.width - 2.0 * self.padding
    }
}
