//! Time-driven interpolation of the selected values.
//!
//! The widget owns no timer. The host calls
//! [`SeekBarRanged::tick`](crate::SeekBarRanged::tick) with the current
//! [`Instant`] while [`SeekBarRanged::is_animating`](crate::SeekBarRanged::is_animating)
//! is true, and every tick writes the interpolated value through the regular
//! setter.

use std::time::{Duration, Instant};

use smallvec::SmallVec;

use crate::range::Bound;

/// Default duration of an animated value change.
pub const DEFAULT_ANIMATION_DURATION: Duration = Duration::from_millis(1000);

/// Decelerating ease-out mapping: `1 - (1 - t)^2`.
/// Input: linear progress in [0.0, 1.0].
/// Output: eased progress in [0.0, 1.0].
pub fn decelerate(progress: f32) -> f32 {
    let t = progress.clamp(0.0, 1.0);
    1.0 - (1.0 - t) * (1.0 - t)
}

/// One in-flight interpolation between two absolute values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueAnimation {
    from: f32,
    to: f32,
    started_at: Instant,
    duration: Duration,
}

impl ValueAnimation {
    /// Starts an animation at `started_at`.
    pub fn new(from: f32, to: f32, duration: Duration, started_at: Instant) -> Self {
        Self {
            from,
            to,
            started_at,
            duration,
        }
    }

    /// Target value.
    pub fn target(&self) -> f32 {
        self.to
    }

    /// Linear progress at `now`, in `[0, 1]`.
    pub fn fraction(&self, now: Instant) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.started_at);
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
    }

    /// Eased value at `now`.
    pub fn value_at(&self, now: Instant) -> f32 {
        let eased = decelerate(self.fraction(now));
        self.from + (self.to - self.from) * eased
    }

    /// Whether the animation has reached its target at `now`.
    pub fn is_finished(&self, now: Instant) -> bool {
        self.fraction(now) >= 1.0
    }
}

/// A value produced by [`BoundAnimations::advance`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationFrame {
    /// Bound to write.
    pub bound: Bound,
    /// Absolute value to write.
    pub value: f32,
    /// Whether this was the last frame for the bound.
    pub finished: bool,
}

/// At most one animation per bound; the two run independently.
#[derive(Debug, Clone, Default)]
pub struct BoundAnimations {
    min: Option<ValueAnimation>,
    max: Option<ValueAnimation>,
}

impl BoundAnimations {
    fn slot(&mut self, bound: Bound) -> &mut Option<ValueAnimation> {
        match bound {
            Bound::Min => &mut self.min,
            Bound::Max => &mut self.max,
        }
    }

    /// Starts `animation` for `bound`, replacing any animation already
    /// running for it. Returns whether one was replaced.
    pub fn start(&mut self, bound: Bound, animation: ValueAnimation) -> bool {
        self.slot(bound).replace(animation).is_some()
    }

    /// Cancels the animation for `bound`. Returns whether one was running.
    pub fn cancel(&mut self, bound: Bound) -> bool {
        self.slot(bound).take().is_some()
    }

    /// Cancels both animations.
    pub fn cancel_all(&mut self) {
        self.min = None;
        self.max = None;
    }

    /// Whether either bound is animating.
    pub fn is_active(&self) -> bool {
        self.min.is_some() || self.max.is_some()
    }

    /// Whether `bound` is animating.
    pub fn is_running(&self, bound: Bound) -> bool {
        match bound {
            Bound::Min => self.min.is_some(),
            Bound::Max => self.max.is_some(),
        }
    }

    /// Samples every running animation at `now`, dropping the ones that
    /// finish. Min comes before max.
    pub fn advance(&mut self, now: Instant) -> SmallVec<[AnimationFrame; 2]> {
        let mut frames = SmallVec::new();
        for bound in [Bound::Min, Bound::Max] {
            let slot = self.slot(bound);
            if let Some(animation) = *slot {
                let finished = animation.is_finished(now);
                let value = if finished {
                    animation.target()
                } else {
                    animation.value_at(now)
                };
                if finished {
                    *slot = None;
                }
                frames.push(AnimationFrame {
                    bound,
                    value,
                    finished,
                });
            }
        }
        frames
    }
}
