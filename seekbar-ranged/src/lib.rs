//! seekbar-ranged is the platform-independent core of a dual-thumb range
//! slider for mobile UI toolkits.
//!
//! # Overview
//!
//! The user picks a sub-range `[selected_min, selected_max]` inside a
//! `[min, max]` domain, either by dragging two thumbs freely or by snapping
//! them to a set of progress steps. The widget draws a background track, the
//! highlighted segment between the thumbs, optional step markers and the two
//! thumb bitmaps, and reports values live while a thumb moves and once more
//! when the gesture settles.
//!
//! The host toolkit owns the window, the input pipeline, the clock and the
//! canvas. It feeds [`PointerEvent`]s to [`SeekBarRanged::handle_event`],
//! drives animations with [`SeekBarRanged::tick`] and paints through a
//! [`DrawSurface`] implementation.
//!
//! ```
//! use std::time::{Duration, Instant};
//!
//! use seekbar_ranged::{Bound, SeekBarConfig, SeekBarRanged};
//!
//! let mut seekbar = SeekBarRanged::new(SeekBarConfig::default().rounded(true))?;
//! seekbar.set_size(320.0, 48.0);
//!
//! let start = Instant::now();
//! seekbar.animate_selected(Bound::Max, 50.0, Duration::from_millis(300), start);
//! while seekbar.tick(start + Duration::from_millis(300)) {}
//! assert_eq!(seekbar.selected_max_value(), 50.0);
//! # Ok::<(), seekbar_ranged::SeekBarError>(())
//! ```
//!
//! # Values
//!
//! The normalized selection in `[0, 1]` is the source of truth and always
//! satisfies `normalized_min <= normalized_max`. Absolute values are derived
//! through the domain. A collapsed domain (`min == max`) and a layout too
//! narrow for the thumbs are handled without faults.
//!
//! # Steps
//!
//! [`SeekBarRanged::enable_progress_by_steps`] resets the domain to `0..100`
//! and locks it; dragged thumbs then snap to the nearest of
//! [`SeekBarRanged::set_progress_steps`] (with `0` and `100` always present).
//!
//! # Feature flags
//!
//! - `serde` (default): `Serialize`/`Deserialize` for the configuration and
//!   for [`SavedState`], plus JSON helpers on the latter.
#![deny(missing_docs, clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod animation;
pub mod color;
pub mod config;
pub mod error;
pub mod geometry;
pub mod listener;
pub mod range;
pub mod render;
mod seekbar;
pub mod state;
pub mod steps;
pub mod touch;
pub mod value_space;

pub use crate::{
    color::Color,
    config::{SeekBarConfig, ThumbImage},
    error::{Result, SeekBarError},
    geometry::{DimensionValue, Dp, Rect},
    hit_test::Thumb,
    listener::{RangeCallback, SeekBarListener},
    range::{Bound, Domain},
    render::{DrawPrimitive, DrawSurface, ThumbVariant},
    seekbar::SeekBarRanged,
    state::SavedState,
    touch::{EventResponse, Pointer, PointerAction, PointerEvent, PointerId, TouchPhase},
};
