//! Construction-time configuration and thumb bitmaps.

use std::{fmt, path::Path, sync::Arc, time::Duration};

use derive_setters::Setters;
use image::{Rgba, RgbaImage};

use crate::{
    animation::DEFAULT_ANIMATION_DURATION,
    color::Color,
    error::{Result, SeekBarError, ensure_finite, ensure_non_negative},
    geometry::Dp,
    range::{DEFAULT_MAX_VALUE, DEFAULT_MIN_VALUE},
};

/// Default thickness of both tracks, in pixels.
pub const DEFAULT_PROGRESS_HEIGHT: f32 = 10.0;
/// Default step marker radius, in pixels.
pub const DEFAULT_STEP_RADIUS: f32 = DEFAULT_PROGRESS_HEIGHT + 2.0;
/// Default distance a pointer must travel before a press becomes a drag.
pub const DEFAULT_TOUCH_SLOP: Dp = Dp(8.0);

const DEFAULT_THUMB_DIAMETER: u32 = 36;
const DEFAULT_THUMB_PRESSED_DIAMETER: u32 = 48;

/// An immutable, cheaply clonable thumb bitmap.
#[derive(Clone)]
pub struct ThumbImage {
    image: Arc<RgbaImage>,
}

impl ThumbImage {
    /// Wraps a decoded bitmap. Zero-sized images are rejected.
    pub fn new(image: RgbaImage) -> Result<Self> {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(SeekBarError::EmptyThumbImage { width, height });
        }
        Ok(Self {
            image: Arc::new(image),
        })
    }

    /// Decodes an encoded image (png or jpeg).
    pub fn from_memory(bytes: &[u8]) -> Result<Self> {
        Self::new(image::load_from_memory(bytes)?.to_rgba8())
    }

    /// Loads and decodes an image file (png or jpeg).
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::new(image::open(path)?.to_rgba8())
    }

    /// The built-in unpressed thumb: a solid disc in the progress color.
    pub fn default_normal() -> Self {
        Self::procedural(disc(
            DEFAULT_THUMB_DIAMETER,
            Color::DEFAULT_PROGRESS,
            Color::WHITE,
        ))
    }

    /// The built-in pressed thumb: a larger disc with a translucent halo.
    pub fn default_pressed() -> Self {
        Self::procedural(disc(
            DEFAULT_THUMB_PRESSED_DIAMETER,
            Color::DEFAULT_PROGRESS.with_alpha(0.4),
            Color::DEFAULT_PROGRESS,
        ))
    }

    fn procedural(image: RgbaImage) -> Self {
        Self {
            image: Arc::new(image),
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// The pixel data.
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }
}

impl PartialEq for ThumbImage {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.image, &other.image) || *self.image == *other.image
    }
}

impl fmt::Debug for ThumbImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThumbImage")
            .field("width", &self.width())
            .field("height", &self.height())
            .finish()
    }
}

// Outer ring in `ring`, inner 60% in `core`, anti-aliased over one pixel.
fn disc(diameter: u32, ring: Color, core: Color) -> RgbaImage {
    let radius = diameter as f32 / 2.0;
    let core_radius = radius * 0.6;
    RgbaImage::from_fn(diameter, diameter, |x, y| {
        let dx = x as f32 + 0.5 - radius;
        let dy = y as f32 + 0.5 - radius;
        let distance = (dx * dx + dy * dy).sqrt();
        let color = if distance <= core_radius { core } else { ring };
        let coverage = (radius - distance + 0.5).clamp(0.0, 1.0);
        to_rgba(color.with_alpha(color.a * coverage))
    })
}

fn to_rgba(color: Color) -> Rgba<u8> {
    let [a, r, g, b] = color.to_argb().to_be_bytes();
    Rgba([r, g, b, a])
}

/// Everything a [`SeekBarRanged`](crate::SeekBarRanged) is built from.
///
/// Pixel-valued options are physical pixels; `touch_slop` is in `Dp` and
/// converted with `density`.
#[derive(Debug, Clone, PartialEq, Setters)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SeekBarConfig {
    /// Lower domain bound.
    pub min: f32,
    /// Initial selected minimum; defaults to `min`.
    #[setters(strip_option)]
    pub current_min: Option<f32>,
    /// Upper domain bound.
    pub max: f32,
    /// Initial selected maximum; defaults to `max`.
    #[setters(strip_option)]
    pub current_max: Option<f32>,
    /// Thickness of the progress segment.
    pub progress_height: f32,
    /// Thickness of the background track.
    pub background_height: f32,
    /// Whether the tracks get rounded ends.
    pub rounded: bool,
    /// Fill of the progress segment and of steps inside the selection.
    #[setters(into)]
    pub progress_color: Color,
    /// Fill of the background track and of steps outside the selection.
    #[setters(into)]
    pub background_color: Color,
    /// Unpressed thumb; the built-in disc when unset.
    #[setters(strip_option)]
    #[cfg_attr(feature = "serde", serde(skip))]
    pub thumb_normal_image: Option<ThumbImage>,
    /// Pressed thumb; the built-in disc when unset.
    #[setters(strip_option)]
    #[cfg_attr(feature = "serde", serde(skip))]
    pub thumb_pressed_image: Option<ThumbImage>,
    /// Radius of the step markers.
    pub step_radius: f32,
    /// Drag threshold.
    pub touch_slop: Dp,
    /// Physical pixels per `Dp`.
    pub density: f32,
    /// Duration used by animated setters when the caller passes none.
    pub animation_duration: Duration,
}

impl Default for SeekBarConfig {
    fn default() -> Self {
        Self {
            min: DEFAULT_MIN_VALUE,
            current_min: None,
            max: DEFAULT_MAX_VALUE,
            current_max: None,
            progress_height: DEFAULT_PROGRESS_HEIGHT,
            background_height: DEFAULT_PROGRESS_HEIGHT,
            rounded: false,
            progress_color: Color::DEFAULT_PROGRESS,
            background_color: Color::DEFAULT_BACKGROUND,
            thumb_normal_image: None,
            thumb_pressed_image: None,
            step_radius: DEFAULT_STEP_RADIUS,
            touch_slop: DEFAULT_TOUCH_SLOP,
            density: 1.0,
            animation_duration: DEFAULT_ANIMATION_DURATION,
        }
    }
}

impl SeekBarConfig {
    /// Checks every numeric option.
    pub fn validate(&self) -> Result<()> {
        let min = ensure_finite("min", self.min)?;
        let max = ensure_finite("max", self.max)?;
        if max < min {
            return Err(SeekBarError::InvertedDomain { min, max });
        }
        if let Some(value) = self.current_min {
            ensure_finite("current_min", value)?;
        }
        if let Some(value) = self.current_max {
            ensure_finite("current_max", value)?;
        }
        ensure_non_negative("progress_height", self.progress_height)?;
        ensure_non_negative("background_height", self.background_height)?;
        ensure_non_negative("step_radius", self.step_radius)?;
        ensure_non_negative("touch_slop", self.touch_slop.0)?;
        ensure_non_negative("density", self.density)?;
        Ok(())
    }

    /// Resolves the thumb pair, substituting one for the other or the
    /// built-in discs when missing.
    pub(crate) fn thumbs(&self) -> (ThumbImage, ThumbImage) {
        match (&self.thumb_normal_image, &self.thumb_pressed_image) {
            (Some(normal), Some(pressed)) => (normal.clone(), pressed.clone()),
            (Some(normal), None) => (normal.clone(), normal.clone()),
            (None, Some(pressed)) => (pressed.clone(), pressed.clone()),
            (None, None) => (ThumbImage::default_normal(), ThumbImage::default_pressed()),
        }
    }
}
