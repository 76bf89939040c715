//! Screen-space geometry: density-independent lengths, rectangles, the
//! cached thumb/track metrics and measurement.
//!
//! The [`GeometryCache`] is derived state. It is recomputed whenever a thumb
//! image, the step radius or a track height changes, and everything that maps
//! values to pixels reads `padding` and the thumb half sizes from it.

use crate::config::ThumbImage;

/// Width reported by [`measure`] when the host imposes no width constraint.
pub const DEFAULT_MEASURED_WIDTH: f32 = 200.0;

/// Density-independent length.
///
/// One `Dp` equals one physical pixel at a density of `1.0`.
#[derive(Debug, Default, Clone, Copy, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dp(pub f32);

impl Dp {
    /// Zero length.
    pub const ZERO: Self = Self(0.0);

    /// Converts to physical pixels for the given display density.
    #[inline]
    pub fn to_px(self, density: f32) -> f32 {
        self.0 * density
    }

    /// Converts physical pixels back to `Dp` for the given display density.
    #[inline]
    pub fn from_px(px: f32, density: f32) -> Self {
        if density == 0.0 {
            Self::ZERO
        } else {
            Self(px / density)
        }
    }
}

impl From<f32> for Dp {
    fn from(value: f32) -> Self {
        Self(value)
    }
}

/// An axis-aligned rectangle in widget-local pixels.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Left edge.
    pub left: f32,
    /// Top edge.
    pub top: f32,
    /// Right edge.
    pub right: f32,
    /// Bottom edge.
    pub bottom: f32,
}

impl Rect {
    /// Creates a rectangle from its four edges.
    pub const fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// A rectangle of `thickness` centered vertically on `center_y`.
    pub fn centered_band(left: f32, right: f32, center_y: f32, thickness: f32) -> Self {
        Self::new(
            left,
            center_y - 0.5 * thickness,
            right,
            center_y + 0.5 * thickness,
        )
    }

    /// Horizontal extent.
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    /// Vertical extent.
    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }
}

/// A size constraint imposed by the host layout on one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DimensionValue {
    /// The host dictates this exact size.
    Fixed(f32),
    /// Size to content, optionally bounded by `max`.
    Wrap {
        /// Upper bound, if any.
        max: Option<f32>,
    },
    /// Fill the available space, optionally bounded by `max`.
    Fill {
        /// Available space, if known.
        max: Option<f32>,
    },
}

impl DimensionValue {
    /// Wrap content without an upper bound.
    pub const WRAP: Self = Self::Wrap { max: None };

    fn bound(self) -> Option<f32> {
        match self {
            Self::Fixed(px) => Some(px),
            Self::Wrap { max } | Self::Fill { max } => max,
        }
    }
}

/// Pixel metrics derived from the thumb images, track heights and step radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometryCache {
    /// Horizontal margin at each end of the track, excluded from the
    /// draggable span.
    pub padding: f32,
    /// Half width of the normal thumb image; also the hit-test radius.
    pub thumb_half_width: f32,
    /// Half height of the normal thumb image.
    pub thumb_half_height: f32,
    /// Half width of the pressed thumb image.
    pub thumb_pressed_half_width: f32,
    /// Half height of the pressed thumb image.
    pub thumb_pressed_half_height: f32,
    /// Thickness of the background track.
    pub background_height: f32,
    /// Thickness of the progress segment.
    pub progress_height: f32,
    /// Radius of the step markers.
    pub step_radius: f32,
}

impl GeometryCache {
    /// Derives all metrics from the current thumb images and heights.
    pub fn compute(
        normal: &ThumbImage,
        pressed: &ThumbImage,
        background_height: f32,
        progress_height: f32,
        step_radius: f32,
    ) -> Self {
        let mut cache = Self {
            padding: 0.0,
            thumb_half_width: 0.5 * normal.width() as f32,
            thumb_half_height: 0.5 * normal.height() as f32,
            thumb_pressed_half_width: 0.5 * pressed.width() as f32,
            thumb_pressed_half_height: 0.5 * pressed.height() as f32,
            background_height,
            progress_height,
            step_radius,
        };
        cache.update_padding();
        cache
    }

    /// Re-measures the normal thumb.
    pub fn measure_thumb(&mut self, normal: &ThumbImage) {
        self.thumb_half_width = 0.5 * normal.width() as f32;
        self.thumb_half_height = 0.5 * normal.height() as f32;
        self.update_padding();
    }

    /// Re-measures the pressed thumb.
    pub fn measure_thumb_pressed(&mut self, pressed: &ThumbImage) {
        self.thumb_pressed_half_width = 0.5 * pressed.width() as f32;
        self.thumb_pressed_half_height = 0.5 * pressed.height() as f32;
        self.update_padding();
    }

    /// Changes the step marker radius, which may widen the padding.
    pub fn set_step_radius(&mut self, radius: f32) {
        self.step_radius = radius;
        self.update_padding();
    }

    // The padding must fit the larger thumb variant on either axis (round
    // thumbs) and a full step marker at each end.
    fn update_padding(&mut self) {
        let thumb_width = self.thumb_half_width.max(self.thumb_pressed_half_width);
        let thumb_height = self.thumb_half_height.max(self.thumb_pressed_half_height);
        self.padding = thumb_width.max(thumb_height).max(self.step_radius);
    }

    /// Corner radius of the tracks: half the thicker track when rounded.
    pub fn corner_radius(&self, rounded: bool) -> f32 {
        if rounded {
            0.5 * self.background_height.max(self.progress_height)
        } else {
            0.0
        }
    }
}

/// Computes the preferred `(width, height)` under the host constraints.
///
/// The width follows the constraint, falling back to
/// [`DEFAULT_MEASURED_WIDTH`] when unbounded. The height is the tallest of the
/// thumb images, the track heights and the step marker (the radius is taken in
/// `Dp` and converted with `density`), capped by the height constraint.
pub fn measure(
    geometry: &GeometryCache,
    width: DimensionValue,
    height: DimensionValue,
    density: f32,
) -> (f32, f32) {
    let measured_width = width.bound().unwrap_or(DEFAULT_MEASURED_WIDTH);

    let max_thumb = (2.0 * geometry.thumb_half_height).max(2.0 * geometry.thumb_pressed_half_height);
    let max_track = geometry
        .background_height
        .max(geometry.progress_height)
        .trunc();
    let step = Dp(geometry.step_radius).to_px(density).ceil();
    let content_height = max_thumb.max(max_track).max(step);

    let measured_height = match height {
        DimensionValue::Fixed(px) => px,
        other => other
            .bound()
            .map_or(content_height, |max| content_height.min(max)),
    };

    (measured_width, measured_height)
}
