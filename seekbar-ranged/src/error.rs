//! Errors surfaced at construction and persistence time.
//!
//! Interaction (pointer events, animation ticks, drawing) never fails; only
//! malformed configuration, unusable thumb images or corrupt saved state do.

use thiserror::Error;

/// Errors produced by [`SeekBarRanged`](crate::SeekBarRanged) construction,
/// thumb image loading and saved-state decoding.
#[derive(Debug, Error)]
pub enum SeekBarError {
    /// A numeric configuration option was NaN or infinite.
    #[error("configuration option `{option}` must be finite, got {value}")]
    NonFinite {
        /// Name of the offending option.
        option: &'static str,
        /// The rejected value.
        value: f32,
    },
    /// A size-like configuration option was negative.
    #[error("configuration option `{option}` must not be negative, got {value}")]
    Negative {
        /// Name of the offending option.
        option: &'static str,
        /// The rejected value.
        value: f32,
    },
    /// The domain maximum lies below the domain minimum.
    #[error("domain max ({max}) is smaller than domain min ({min})")]
    InvertedDomain {
        /// Configured minimum.
        min: f32,
        /// Configured maximum.
        max: f32,
    },
    /// A thumb image has a zero width or height.
    #[error("thumb image must not be empty, got {width}x{height}")]
    EmptyThumbImage {
        /// Image width in pixels.
        width: u32,
        /// Image height in pixels.
        height: u32,
    },
    /// A thumb image could not be decoded.
    #[error("failed to decode thumb image: {0}")]
    Image(#[from] image::ImageError),
    /// Saved state could not be encoded or decoded.
    #[cfg(feature = "serde")]
    #[error("failed to (de)serialize saved state: {0}")]
    SavedState(#[from] serde_json::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T, E = SeekBarError> = std::result::Result<T, E>;

pub(crate) fn ensure_finite(option: &'static str, value: f32) -> Result<f32> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(SeekBarError::NonFinite { option, value })
    }
}

pub(crate) fn ensure_non_negative(option: &'static str, value: f32) -> Result<f32> {
    let value = ensure_finite(option, value)?;
    if value < 0.0 {
        Err(SeekBarError::Negative { option, value })
    } else {
        Ok(value)
    }
}
