//! Value change notification.

use std::{fmt, sync::Arc};

/// A shared `(min, max)` callback handle.
///
/// Cloning shares the closure; equality compares identity, not behavior.
pub struct RangeCallback {
    handler: Arc<dyn Fn(f32, f32) + Send + Sync>,
}

impl RangeCallback {
    /// Create a callback handle from a closure.
    pub fn new<F>(handler: F) -> Self
    where
        F: Fn(f32, f32) + Send + Sync + 'static,
    {
        Self {
            handler: Arc::new(handler),
        }
    }

    /// A callback that does nothing.
    pub fn noop() -> Self {
        Self::new(|_, _| {})
    }

    /// Invoke the callback with the selected values.
    pub fn call(&self, min: f32, max: f32) {
        (self.handler)(min, max)
    }
}

impl<F> From<F> for RangeCallback
where
    F: Fn(f32, f32) + Send + Sync + 'static,
{
    fn from(handler: F) -> Self {
        Self::new(handler)
    }
}

impl Clone for RangeCallback {
    fn clone(&self) -> Self {
        Self {
            handler: Arc::clone(&self.handler),
        }
    }
}

impl Default for RangeCallback {
    fn default() -> Self {
        Self::noop()
    }
}

impl PartialEq for RangeCallback {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.handler, &other.handler)
    }
}

impl Eq for RangeCallback {}

impl fmt::Debug for RangeCallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RangeCallback").finish_non_exhaustive()
    }
}

/// The pair of callbacks the widget reports to.
///
/// `on_changing` fires on every move of a pressed thumb; `on_changed` fires
/// when a gesture settles and after every programmatic change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeekBarListener {
    on_changed: RangeCallback,
    on_changing: RangeCallback,
}

impl SeekBarListener {
    /// A listener with both callbacks set.
    pub fn new(
        on_changed: impl Into<RangeCallback>,
        on_changing: impl Into<RangeCallback>,
    ) -> Self {
        Self {
            on_changed: on_changed.into(),
            on_changing: on_changing.into(),
        }
    }

    /// Replaces the settled-value callback.
    pub fn on_changed<F>(mut self, handler: F) -> Self
    where
        F: Fn(f32, f32) + Send + Sync + 'static,
    {
        self.on_changed = RangeCallback::new(handler);
        self
    }

    /// Replaces the live-value callback.
    pub fn on_changing<F>(mut self, handler: F) -> Self
    where
        F: Fn(f32, f32) + Send + Sync + 'static,
    {
        self.on_changing = RangeCallback::new(handler);
        self
    }

    pub(crate) fn changed(&self, min: f32, max: f32) {
        self.on_changed.call(min, max);
    }

    pub(crate) fn changing(&self, min: f32, max: f32) {
        self.on_changing.call(min, max);
    }
}
