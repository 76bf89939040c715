//! The widget itself.
//!
//! [`SeekBarRanged`] owns the range model, the geometry cache, the step set,
//! the touch session and the animations, and is the only place where their
//! effects meet the listener. Every mutation goes through the clamping setters
//! of [`RangeModel`], so the selection stays ordered whatever the caller, the
//! gesture or the animation clock does.
//!
//! # Example
//!
//! ```
//! use seekbar_ranged::{PointerEvent, SeekBarConfig, SeekBarRanged};
//!
//! let mut seekbar = SeekBarRanged::new(
//!     SeekBarConfig::default().current_min(20.0).current_max(80.0),
//! )?;
//! seekbar.set_size(424.0, 48.0);
//! seekbar.set_listener(
//!     |min, max| println!("changed {min}..{max}"),
//!     |min, max| println!("changing {min}..{max}"),
//! );
//!
//! let min_x = seekbar.thumb_x(seekbar_ranged::Thumb::Min);
//! seekbar.handle_event(&PointerEvent::down(0, min_x));
//! seekbar.handle_event(&PointerEvent::moved(0, min_x + 60.0));
//! seekbar.handle_event(&PointerEvent::up(0, min_x + 60.0));
//! assert!(seekbar.selected_min_value() > 20.0);
//! # Ok::<(), seekbar_ranged::SeekBarError>(())
//! ```

use std::time::{Duration, Instant};

use tracing::{debug, trace, warn};

use crate::{
    animation::{BoundAnimations, ValueAnimation},
    color::Color,
    config::{SeekBarConfig, ThumbImage},
    error::{Result, ensure_non_negative},
    geometry::{DimensionValue, Dp, GeometryCache, measure},
    hit_test::Thumb,
    listener::{RangeCallback, SeekBarListener},
    range::{Bound, DEFAULT_MAX_VALUE, DEFAULT_MIN_VALUE, Domain, RangeModel},
    render::{DrawList, DrawSurface, RenderInput, project, replay},
    state::SavedState,
    steps::StepSet,
    touch::{EventResponse, PointerEvent, TouchContext, TouchEffect, TouchPhase, TouchSession},
    value_space::ValueSpace,
};

/// A dual-thumb range slider.
///
/// The widget is driven by its host: pointer events go to
/// [`handle_event`](Self::handle_event), the animation clock to
/// [`tick`](Self::tick), layout to [`measure`](Self::measure) and
/// [`set_size`](Self::set_size), and painting to [`draw`](Self::draw). It is
/// meant to be owned and mutated by a single UI thread.
#[derive(Debug)]
pub struct SeekBarRanged {
    model: RangeModel,
    geometry: GeometryCache,
    steps: StepSet,
    step_mode: bool,
    session: TouchSession,
    animations: BoundAnimations,
    listener: SeekBarListener,
    thumb_normal: ThumbImage,
    thumb_pressed: ThumbImage,
    thumb_normal_set: bool,
    thumb_pressed_set: bool,
    rounded: bool,
    progress_color: Color,
    background_color: Color,
    width: f32,
    height: f32,
    density: f32,
    touch_slop: Dp,
    animation_duration: Duration,
    enabled: bool,
    redraw_requested: bool,
    layout_requested: bool,
}

impl Default for SeekBarRanged {
    fn default() -> Self {
        Self::build(SeekBarConfig::default())
    }
}

impl SeekBarRanged {
    /// Builds a widget, rejecting non-finite or negative options and an
    /// inverted domain.
    pub fn new(config: SeekBarConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: SeekBarConfig) -> Self {
        let (thumb_normal, thumb_pressed) = config.thumbs();
        let geometry = GeometryCache::compute(
            &thumb_normal,
            &thumb_pressed,
            config.background_height,
            config.progress_height,
            config.step_radius,
        );
        let mut model = RangeModel::new(Domain::new(config.min, config.max));
        model.set_selected_min(config.current_min.unwrap_or(config.min));
        model.set_selected_max(config.current_max.unwrap_or(config.max));
        debug!(
            min = config.min,
            max = config.max,
            selected_min = model.selected_min(),
            selected_max = model.selected_max(),
            "seekbar created"
        );

        Self {
            model,
            geometry,
            steps: StepSet::default(),
            step_mode: false,
            session: TouchSession::default(),
            animations: BoundAnimations::default(),
            listener: SeekBarListener::default(),
            thumb_normal_set: config.thumb_normal_image.is_some(),
            thumb_pressed_set: config.thumb_pressed_image.is_some(),
            thumb_normal,
            thumb_pressed,
            rounded: config.rounded,
            progress_color: config.progress_color,
            background_color: config.background_color,
            width: 0.0,
            height: 0.0,
            density: config.density,
            touch_slop: config.touch_slop,
            animation_duration: config.animation_duration,
            enabled: true,
            redraw_requested: true,
            layout_requested: true,
        }
    }

    // ---- values -------------------------------------------------------

    /// Lower domain bound.
    pub fn min_value(&self) -> f32 {
        self.model.domain().min
    }

    /// Upper domain bound.
    pub fn max_value(&self) -> f32 {
        self.model.domain().max
    }

    /// Absolute lower selected value.
    pub fn selected_min_value(&self) -> f32 {
        self.model.selected_min()
    }

    /// Absolute upper selected value.
    pub fn selected_max_value(&self) -> f32 {
        self.model.selected_max()
    }

    /// Lower selected value as a fraction of the domain.
    pub fn normalized_min_value(&self) -> f32 {
        self.model.normalized_min()
    }

    /// Upper selected value as a fraction of the domain.
    pub fn normalized_max_value(&self) -> f32 {
        self.model.normalized_max()
    }

    /// Changes the lower domain bound.
    ///
    /// Returns `false` without touching anything while step mode is on.
    /// Otherwise the selected fractions are kept, the lower one is written
    /// back through the clamping setter and `on_changed` fires.
    pub fn set_min_value(&mut self, value: f32) -> bool {
        if self.step_mode {
            warn!(value, "min value is fixed while progress by steps is enabled");
            return false;
        }
        self.model.set_domain_min(value);
        self.apply_selected(Bound::Min, self.model.selected_min());
        true
    }

    /// Changes the upper domain bound.
    ///
    /// Returns `false` without touching anything while step mode is on.
    /// Otherwise the selected fractions are kept, the upper one is written
    /// back through the clamping setter and `on_changed` fires.
    pub fn set_max_value(&mut self, value: f32) -> bool {
        if self.step_mode {
            warn!(value, "max value is fixed while progress by steps is enabled");
            return false;
        }
        self.model.set_domain_max(value);
        self.apply_selected(Bound::Max, self.model.selected_max());
        true
    }

    /// Sets the lower selected value, optionally animated.
    ///
    /// `duration` falls back to the configured animation duration.
    pub fn set_selected_min_value(&mut self, value: f32, animate: bool, duration: Option<Duration>) {
        self.set_selected_value(Bound::Min, value, animate, duration);
    }

    /// Sets the upper selected value, optionally animated.
    ///
    /// `duration` falls back to the configured animation duration.
    pub fn set_selected_max_value(&mut self, value: f32, animate: bool, duration: Option<Duration>) {
        self.set_selected_value(Bound::Max, value, animate, duration);
    }

    fn set_selected_value(
        &mut self,
        bound: Bound,
        value: f32,
        animate: bool,
        duration: Option<Duration>,
    ) {
        if animate {
            let duration = duration.unwrap_or(self.animation_duration);
            self.animate_selected(bound, value, duration, Instant::now());
        } else {
            self.apply_selected(bound, value);
        }
    }

    /// Starts an animation of `bound` towards `value`, measured from
    /// `started_at`. A running animation of the same bound is replaced.
    pub fn animate_selected(
        &mut self,
        bound: Bound,
        value: f32,
        duration: Duration,
        started_at: Instant,
    ) {
        let from = self.model.selected(bound);
        let animation = ValueAnimation::new(from, value, duration, started_at);
        if self.animations.start(bound, animation) {
            trace!(?bound, "previous animation replaced");
        }
        debug!(?bound, from, to = value, ?duration, "animation started");
    }

    /// Advances the running animations to `now`, writing each interpolated
    /// value through the regular setter. Returns whether any animation is
    /// still running.
    pub fn tick(&mut self, now: Instant) -> bool {
        for frame in self.animations.advance(now) {
            self.apply_selected(frame.bound, frame.value);
            if frame.finished {
                debug!(bound = ?frame.bound, value = frame.value, "animation finished");
            }
        }
        self.animations.is_active()
    }

    /// Whether an animation is running.
    pub fn is_animating(&self) -> bool {
        self.animations.is_active()
    }

    /// Stops both animations where they are. Owners call this on teardown.
    pub fn cancel_animations(&mut self) {
        if self.animations.is_active() {
            debug!("animations cancelled");
        }
        self.animations.cancel_all();
    }

    fn apply_selected(&mut self, bound: Bound, value: f32) {
        self.model.set_selected(bound, value);
        self.request_redraw();
        self.notify_changed();
    }

    // ---- steps --------------------------------------------------------

    /// Turns snapping to the progress steps on or off.
    ///
    /// Turning it on resets the domain to `0..100`, re-applying the selection
    /// and firing `on_changed`; the domain then stays locked until step mode
    /// is turned off.
    pub fn enable_progress_by_steps(&mut self, enable: bool) {
        if enable {
            self.step_mode = false;
            self.set_min_value(DEFAULT_MIN_VALUE);
            self.set_max_value(DEFAULT_MAX_VALUE);
        }
        self.step_mode = enable;
        debug!(enable, "progress by steps");
        self.request_redraw();
    }

    /// Whether positions snap to the progress steps.
    pub fn is_progress_by_steps(&self) -> bool {
        self.step_mode
    }

    /// Replaces the steps. `0` and `100` are always added around `values`.
    ///
    /// Steps are converted with the current domain and are not updated if
    /// the domain changes later.
    pub fn set_progress_steps(&mut self, values: &[f32]) {
        self.steps = StepSet::from_values(values, self.model.domain());
        self.request_redraw();
    }

    /// The steps as absolute values in the current domain.
    pub fn progress_steps(&self) -> Vec<f32> {
        self.steps.to_absolute(self.model.domain())
    }

    /// Changes the radius of the step markers, in pixels.
    pub fn set_progress_step_radius(&mut self, radius: f32) -> Result<()> {
        let radius = ensure_non_negative("step_radius", radius)?;
        self.geometry.set_step_radius(radius);
        self.request_redraw();
        Ok(())
    }

    // ---- listener -----------------------------------------------------

    /// Installs both callbacks.
    pub fn set_listener<C, G>(&mut self, on_changed: C, on_changing: G)
    where
        C: Fn(f32, f32) + Send + Sync + 'static,
        G: Fn(f32, f32) + Send + Sync + 'static,
    {
        self.listener = SeekBarListener::new(RangeCallback::new(on_changed), RangeCallback::new(on_changing));
    }

    /// Installs a prepared listener.
    pub fn set_action_listener(&mut self, listener: SeekBarListener) {
        self.listener = listener;
    }

    /// Removes the callbacks.
    pub fn clear_listener(&mut self) {
        self.listener = SeekBarListener::default();
    }

    fn notify_changed(&self) {
        self.listener
            .changed(self.model.selected_min(), self.model.selected_max());
    }

    fn notify_changing(&self) {
        self.listener
            .changing(self.model.selected_min(), self.model.selected_max());
    }

    // ---- appearance ---------------------------------------------------

    /// Rounds the track ends.
    pub fn set_rounded(&mut self, rounded: bool) {
        self.rounded = rounded;
        self.request_redraw();
    }

    /// Changes the background track thickness, in pixels.
    pub fn set_background_height(&mut self, height: f32) -> Result<()> {
        self.geometry.background_height = ensure_non_negative("background_height", height)?;
        self.request_layout();
        Ok(())
    }

    /// Changes the progress segment thickness, in pixels.
    pub fn set_progress_height(&mut self, height: f32) -> Result<()> {
        self.geometry.progress_height = ensure_non_negative("progress_height", height)?;
        self.request_layout();
        Ok(())
    }

    /// Changes the background track color.
    pub fn set_background_color(&mut self, color: impl Into<Color>) {
        self.background_color = color.into();
        self.request_redraw();
    }

    /// Changes the background track color from opaque components.
    pub fn set_background_color_rgb(&mut self, red: u8, green: u8, blue: u8) {
        self.set_background_color(Color::rgb(red, green, blue));
    }

    /// Changes the background track color from components, alpha first.
    pub fn set_background_color_argb(&mut self, alpha: u8, red: u8, green: u8, blue: u8) {
        self.set_background_color(Color::argb(alpha, red, green, blue));
    }

    /// Changes the progress segment color.
    pub fn set_progress_color(&mut self, color: impl Into<Color>) {
        self.progress_color = color.into();
        self.request_redraw();
    }

    /// Changes the progress segment color from opaque components.
    pub fn set_progress_color_rgb(&mut self, red: u8, green: u8, blue: u8) {
        self.set_progress_color(Color::rgb(red, green, blue));
    }

    /// Changes the progress segment color from components, alpha first.
    pub fn set_progress_color_argb(&mut self, alpha: u8, red: u8, green: u8, blue: u8) {
        self.set_progress_color(Color::argb(alpha, red, green, blue));
    }

    /// Uses `image` for both thumb states.
    pub fn set_thumbs_image(&mut self, image: ThumbImage) {
        self.set_thumb_normal_image(image.clone());
        self.set_thumb_pressed_image(image);
    }

    /// Replaces the unpressed thumb. If no pressed thumb was ever given, it
    /// is replaced as well.
    pub fn set_thumb_normal_image(&mut self, image: ThumbImage) {
        if !self.thumb_pressed_set {
            self.thumb_pressed = image.clone();
            self.geometry.measure_thumb_pressed(&self.thumb_pressed);
        }
        self.thumb_normal = image;
        self.thumb_normal_set = true;
        self.geometry.measure_thumb(&self.thumb_normal);
        self.request_layout();
    }

    /// Replaces the pressed thumb. If no unpressed thumb was ever given, it
    /// is replaced as well.
    pub fn set_thumb_pressed_image(&mut self, image: ThumbImage) {
        if !self.thumb_normal_set {
            self.thumb_normal = image.clone();
            self.geometry.measure_thumb(&self.thumb_normal);
        }
        self.thumb_pressed = image;
        self.thumb_pressed_set = true;
        self.geometry.measure_thumb_pressed(&self.thumb_pressed);
        self.request_layout();
    }

    /// Enables or disables touch handling. A gesture in progress is dropped.
    pub fn set_enabled(&mut self, enabled: bool) {
        if !enabled && self.session.phase() != TouchPhase::Idle {
            debug!("gesture dropped by disable");
            self.session.reset();
        }
        self.enabled = enabled;
        self.request_redraw();
    }

    /// Whether touch handling is enabled.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    // ---- layout -------------------------------------------------------

    /// Preferred size under the host constraints.
    pub fn measure(&self, width: DimensionValue, height: DimensionValue) -> (f32, f32) {
        measure(&self.geometry, width, height, self.density)
    }

    /// Applies the size chosen by the host.
    pub fn set_size(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
        self.request_redraw();
    }

    /// Current `(width, height)`.
    pub fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    /// Cached pixel metrics.
    pub fn geometry(&self) -> &GeometryCache {
        &self.geometry
    }

    /// Screen x of `thumb`'s center; `0.0` for [`Thumb::None`].
    pub fn thumb_x(&self, thumb: Thumb) -> f32 {
        thumb
            .bound()
            .map_or(0.0, |bound| self.space().to_screen(self.model.normalized(bound)))
    }

    fn space(&self) -> ValueSpace {
        ValueSpace::new(self.model.domain(), self.width, self.geometry.padding)
    }

    // ---- touch --------------------------------------------------------

    /// Feeds a pointer event to the gesture tracker.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn handle_event(&mut self, event: &PointerEvent) -> EventResponse {
        if !self.enabled {
            return EventResponse::PassThrough;
        }
        let ctx = TouchContext {
            space: self.space(),
            normalized_min: self.model.normalized_min(),
            normalized_max: self.model.normalized_max(),
            thumb_half_width: self.geometry.thumb_half_width,
            step_mode: self.step_mode,
            steps: &self.steps,
            touch_slop: self.touch_slop.to_px(self.density),
        };
        let outcome = self.session.handle(event, &ctx);
        for effect in outcome.effects {
            self.apply_touch_effect(effect);
        }
        outcome.response
    }

    fn apply_touch_effect(&mut self, effect: TouchEffect) {
        match effect {
            TouchEffect::SetNormalized { bound, value } => {
                self.model.set_normalized(bound, value);
                self.request_redraw();
            }
            TouchEffect::Redraw => self.request_redraw(),
            TouchEffect::NotifyChanging => self.notify_changing(),
            TouchEffect::NotifyChanged => self.notify_changed(),
        }
    }

    /// The thumb held by the current gesture.
    pub fn pressed_thumb(&self) -> Thumb {
        self.session.pressed_thumb()
    }

    /// Phase of the current gesture.
    pub fn touch_phase(&self) -> TouchPhase {
        self.session.phase()
    }

    // ---- drawing ------------------------------------------------------

    /// The paint operations for the current state.
    pub fn primitives(&self) -> DrawList {
        project(&RenderInput {
            model: &self.model,
            geometry: &self.geometry,
            steps: &self.steps,
            step_mode: self.step_mode,
            width: self.width,
            height: self.height,
            rounded: self.rounded,
            progress_color: self.progress_color,
            background_color: self.background_color,
            pressed: self.session.pressed_thumb(),
            thumb_normal: &self.thumb_normal,
            thumb_pressed: &self.thumb_pressed,
        })
    }

    /// Paints the widget and clears the redraw request.
    pub fn draw<S: DrawSurface + ?Sized>(&mut self, surface: &mut S) {
        replay(&self.primitives(), surface);
        self.redraw_requested = false;
    }

    /// Whether a repaint is pending.
    pub fn is_dirty(&self) -> bool {
        self.redraw_requested
    }

    /// Returns and clears the pending repaint flag.
    pub fn take_redraw_request(&mut self) -> bool {
        std::mem::take(&mut self.redraw_requested)
    }

    /// Returns and clears the pending re-measure flag.
    pub fn take_layout_request(&mut self) -> bool {
        std::mem::take(&mut self.layout_requested)
    }

    fn request_redraw(&mut self) {
        self.redraw_requested = true;
    }

    fn request_layout(&mut self) {
        self.layout_requested = true;
        self.redraw_requested = true;
    }

    // ---- persistence --------------------------------------------------

    /// Captures the selection and the domain, together with the host
    /// container's own opaque state.
    pub fn save_state(&self, parent: Option<Vec<u8>>) -> SavedState {
        SavedState::capture(&self.model, parent)
    }

    /// Reinstates a snapshot, then fires `on_changed` and `on_changing` once
    /// each. Returns the host container's state for it to restore.
    pub fn restore_state(&mut self, state: &SavedState) -> Option<Vec<u8>> {
        self.model
            .restore(state.domain(), state.normalized_min, state.normalized_max);
        debug!(
            selected_min = self.model.selected_min(),
            selected_max = self.model.selected_max(),
            "state restored"
        );
        self.request_redraw();
        self.notify_changed();
        self.notify_changing();
        state.parent.clone()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use approx::assert_abs_diff_eq;
    use image::RgbaImage;
    use parking_lot::Mutex;

    use super::*;
    use crate::touch::{Pointer, PointerAction};

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Call {
        Changed(f32, f32),
        Changing(f32, f32),
    }

    #[derive(Clone, Default)]
    struct Recorder(Arc<Mutex<Vec<Call>>>);

    impl Recorder {
        fn attach(&self, seekbar: &mut SeekBarRanged) {
            let (changed, changing) = (self.0.clone(), self.0.clone());
            seekbar.set_listener(
                move |min, max| changed.lock().push(Call::Changed(min, max)),
                move |min, max| changing.lock().push(Call::Changing(min, max)),
            );
        }

        fn take(&self) -> Vec<Call> {
            std::mem::take(&mut *self.0.lock())
        }

        fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
            self.0.lock().iter().filter(|call| pred(*call)).count()
        }
    }

    fn thumb(size: u32) -> ThumbImage {
        ThumbImage::new(RgbaImage::new(size, size)).unwrap()
    }

    // 220 px wide, 20 px thumbs and a 10 px step radius: padding 10, so the
    // track maps 0..1 onto 10..210 and one domain unit is 2 px.
    fn seekbar(config: SeekBarConfig) -> SeekBarRanged {
        let mut seekbar =
            SeekBarRanged::new(config.thumb_normal_image(thumb(20)).step_radius(10.0)).unwrap();
        seekbar.set_size(220.0, 40.0);
        seekbar
    }

    fn drag(seekbar: &mut SeekBarRanged, from: f32, to: f32) {
        seekbar.handle_event(&PointerEvent::down(0, from));
        seekbar.handle_event(&PointerEvent::moved(0, to));
        seekbar.handle_event(&PointerEvent::up(0, to));
    }

    #[test]
    fn test_defaults() {
        let seekbar = SeekBarRanged::default();
        assert_eq!(seekbar.min_value(), 0.0);
        assert_eq!(seekbar.max_value(), 100.0);
        assert_eq!(seekbar.selected_min_value(), 0.0);
        assert_eq!(seekbar.selected_max_value(), 100.0);
        assert!(seekbar.is_enabled());
        assert!(!seekbar.is_progress_by_steps());
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        assert!(SeekBarRanged::new(SeekBarConfig::default().min(10.0).max(0.0)).is_err());
        assert!(SeekBarRanged::new(SeekBarConfig::default().progress_height(f32::NAN)).is_err());
    }

    #[test]
    fn test_initial_selection_from_config() {
        let seekbar = seekbar(SeekBarConfig::default().current_min(20.0).current_max(80.0));
        assert_abs_diff_eq!(seekbar.selected_min_value(), 20.0, epsilon = 1e-4);
        assert_abs_diff_eq!(seekbar.selected_max_value(), 80.0, epsilon = 1e-4);
        assert_eq!(seekbar.thumb_x(Thumb::Min), 50.0);
    }

    #[test]
    fn test_drag_min_past_max_clamps() {
        let mut seekbar = seekbar(SeekBarConfig::default().current_min(20.0).current_max(80.0));
        // screen x of 90 is 190
        drag(&mut seekbar, 50.0, 190.0);
        assert_abs_diff_eq!(seekbar.selected_min_value(), 80.0, epsilon = 1e-4);
        assert_abs_diff_eq!(seekbar.selected_max_value(), 80.0, epsilon = 1e-4);
        assert!(seekbar.normalized_min_value() <= seekbar.normalized_max_value());
    }

    #[test]
    fn test_drag_reports_changing_then_changed() {
        let mut seekbar = seekbar(SeekBarConfig::default().current_min(20.0).current_max(80.0));
        let recorder = Recorder::default();
        recorder.attach(&mut seekbar);

        assert!(seekbar.handle_event(&PointerEvent::down(0, 50.0)).is_consumed());
        assert_eq!(seekbar.pressed_thumb(), Thumb::Min);
        assert!(seekbar.handle_event(&PointerEvent::moved(0, 70.0)).claims_drag());
        seekbar.handle_event(&PointerEvent::moved(0, 90.0));
        seekbar.handle_event(&PointerEvent::up(0, 90.0));

        let calls = recorder.take();
        assert_eq!(calls.len(), 3);
        assert!(matches!(calls[0], Call::Changing(min, _) if (min - 30.0).abs() < 1e-3));
        assert!(matches!(calls[1], Call::Changing(min, _) if (min - 40.0).abs() < 1e-3));
        assert!(matches!(calls[2], Call::Changed(min, max) if (min - 40.0).abs() < 1e-3 && (max - 80.0).abs() < 1e-3));
        assert_eq!(seekbar.pressed_thumb(), Thumb::None);
    }

    #[test]
    fn test_tap_seeks() {
        let mut seekbar = seekbar(SeekBarConfig::default().current_min(20.0).current_max(80.0));
        seekbar.handle_event(&PointerEvent::down(0, 166.0));
        seekbar.handle_event(&PointerEvent::up(0, 164.0));
        assert_abs_diff_eq!(seekbar.selected_max_value(), 77.0, epsilon = 1e-3);
    }

    #[test]
    fn test_cancel_keeps_dragged_value() {
        let mut seekbar = seekbar(SeekBarConfig::default().current_min(20.0).current_max(80.0));
        let recorder = Recorder::default();
        recorder.attach(&mut seekbar);
        seekbar.handle_event(&PointerEvent::down(0, 50.0));
        seekbar.handle_event(&PointerEvent::moved(0, 90.0));
        seekbar.handle_event(&PointerEvent::new(PointerAction::Cancel, 0, []));
        assert_abs_diff_eq!(seekbar.selected_min_value(), 40.0, epsilon = 1e-3);
        assert_eq!(recorder.count(|c| matches!(c, Call::Changed(..))), 1);
        assert_eq!(seekbar.touch_phase(), TouchPhase::Idle);
    }

    #[test]
    fn test_miss_passes_through() {
        let mut seekbar = seekbar(SeekBarConfig::default().current_min(20.0).current_max(80.0));
        let recorder = Recorder::default();
        recorder.attach(&mut seekbar);
        assert_eq!(
            seekbar.handle_event(&PointerEvent::down(0, 110.0)),
            EventResponse::PassThrough
        );
        assert_eq!(
            seekbar.handle_event(&PointerEvent::up(0, 110.0)),
            EventResponse::PassThrough
        );
        assert!(recorder.take().is_empty());
    }

    #[test]
    fn test_disabled_passes_through() {
        let mut seekbar = seekbar(SeekBarConfig::default());
        seekbar.handle_event(&PointerEvent::down(0, 10.0));
        seekbar.set_enabled(false);
        assert_eq!(seekbar.touch_phase(), TouchPhase::Idle);
        assert_eq!(
            seekbar.handle_event(&PointerEvent::down(0, 10.0)),
            EventResponse::PassThrough
        );
        assert_eq!(seekbar.pressed_thumb(), Thumb::None);
    }

    #[test]
    fn test_overlapping_thumbs_pick_by_side() {
        let mut seekbar = seekbar(SeekBarConfig::default().current_min(50.0).current_max(50.0));
        seekbar.set_thumbs_image(thumb(200));
        seekbar.set_size(400.0, 200.0);
        // padding 100, both thumbs at x=200; 70% of the width is 280
        seekbar.handle_event(&PointerEvent::down(0, 280.0));
        assert_eq!(seekbar.pressed_thumb(), Thumb::Min);
    }

    #[test]
    fn test_second_finger_takes_over() {
        let mut seekbar = seekbar(SeekBarConfig::default().current_min(20.0).current_max(80.0));
        seekbar.handle_event(&PointerEvent::down(0, 50.0));
        seekbar.handle_event(&PointerEvent::moved(0, 70.0));
        seekbar.handle_event(&PointerEvent::pointer_down(
            1,
            [Pointer::new(0, 70.0, 0.0), Pointer::new(1, 120.0, 0.0)],
        ));
        seekbar.handle_event(&PointerEvent::new(
            PointerAction::Move,
            0,
            [Pointer::new(0, 70.0, 0.0), Pointer::new(1, 130.0, 0.0)],
        ));
        assert_eq!(seekbar.pressed_thumb(), Thumb::Min);
        assert_abs_diff_eq!(seekbar.selected_min_value(), 60.0, epsilon = 1e-3);
    }

    #[test]
    fn test_step_mode_snaps_drag() {
        let mut seekbar = seekbar(SeekBarConfig::default());
        seekbar.enable_progress_by_steps(true);
        seekbar.set_progress_steps(&[25.0, 50.0, 75.0]);
        assert_eq!(seekbar.progress_steps(), vec![0.0f32, 25.0, 50.0, 75.0, 100.0]);

        // normalized 0.30 is screen 70
        drag(&mut seekbar, 10.0, 70.0);
        assert_eq!(seekbar.normalized_min_value(), 0.25);
        assert_eq!(seekbar.selected_min_value(), 25.0);
    }

    #[test]
    fn test_step_mode_locks_domain() {
        let mut seekbar = seekbar(SeekBarConfig::default().min(-50.0).max(50.0));
        let recorder = Recorder::default();
        recorder.attach(&mut seekbar);

        seekbar.enable_progress_by_steps(true);
        assert_eq!((seekbar.min_value(), seekbar.max_value()), (0.0, 100.0));
        assert_eq!(recorder.count(|c| matches!(c, Call::Changed(..))), 2);

        assert!(!seekbar.set_max_value(500.0));
        assert!(!seekbar.set_min_value(-5.0));
        assert_eq!((seekbar.min_value(), seekbar.max_value()), (0.0, 100.0));

        seekbar.enable_progress_by_steps(false);
        assert!(seekbar.set_max_value(500.0));
        assert_eq!(seekbar.max_value(), 500.0);
    }

    #[test]
    fn test_domain_change_reapplies_selection() {
        let mut seekbar = seekbar(SeekBarConfig::default().current_min(20.0).current_max(80.0));
        let recorder = Recorder::default();
        recorder.attach(&mut seekbar);

        // fractions are kept, so absolute values follow the domain
        assert!(seekbar.set_max_value(50.0));
        assert_abs_diff_eq!(seekbar.selected_max_value(), 40.0, epsilon = 1e-4);
        assert_abs_diff_eq!(seekbar.selected_min_value(), 10.0, epsilon = 1e-4);
        assert_eq!(recorder.take().len(), 1);
    }

    #[test]
    fn test_collapsed_domain() {
        let mut seekbar = seekbar(SeekBarConfig::default().min(5.0).max(5.0));
        seekbar.set_selected_min_value(5.0, false, None);
        seekbar.set_selected_max_value(5.0, false, None);
        assert_eq!(seekbar.selected_min_value(), 5.0);
        assert_eq!(seekbar.selected_max_value(), 5.0);
        drag(&mut seekbar, 10.0, 200.0);
        assert_eq!(seekbar.selected_min_value(), 5.0);
    }

    #[test]
    fn test_programmatic_set_clamps_and_notifies() {
        let mut seekbar = seekbar(SeekBarConfig::default());
        let recorder = Recorder::default();
        recorder.attach(&mut seekbar);
        seekbar.set_selected_max_value(30.0, false, None);
        seekbar.set_selected_min_value(60.0, false, None);
        assert_abs_diff_eq!(seekbar.selected_min_value(), 30.0, epsilon = 1e-4);
        let calls = recorder.take();
        assert_eq!(calls.len(), 2);
        assert!(calls.iter().all(|c| matches!(c, Call::Changed(..))));
    }

    #[test]
    fn test_animation_runs_to_target() {
        let mut seekbar = seekbar(SeekBarConfig::default());
        let recorder = Recorder::default();
        recorder.attach(&mut seekbar);
        let start = Instant::now();

        seekbar.animate_selected(Bound::Min, 40.0, Duration::from_millis(400), start);
        seekbar.animate_selected(Bound::Max, 60.0, Duration::from_millis(800), start);
        assert!(seekbar.is_animating());

        assert!(seekbar.tick(start + Duration::from_millis(200)));
        assert_abs_diff_eq!(seekbar.selected_min_value(), 30.0, epsilon = 1e-3);

        assert!(seekbar.tick(start + Duration::from_millis(400)));
        assert_abs_diff_eq!(seekbar.selected_min_value(), 40.0, epsilon = 1e-4);

        assert!(!seekbar.tick(start + Duration::from_millis(800)));
        assert_abs_diff_eq!(seekbar.selected_max_value(), 60.0, epsilon = 1e-4);
        assert!(!seekbar.is_animating());
        assert!(recorder.take().iter().all(|c| matches!(c, Call::Changed(..))));
    }

    #[test]
    fn test_new_animation_replaces_old() {
        let mut seekbar = seekbar(SeekBarConfig::default());
        let start = Instant::now();
        seekbar.animate_selected(Bound::Min, 80.0, Duration::from_secs(1), start);
        seekbar.animate_selected(Bound::Min, 10.0, Duration::from_secs(1), start);
        seekbar.tick(start + Duration::from_secs(1));
        assert_abs_diff_eq!(seekbar.selected_min_value(), 10.0, epsilon = 1e-4);
    }

    #[test]
    fn test_cancel_animations_freezes_value() {
        let mut seekbar = seekbar(SeekBarConfig::default());
        let start = Instant::now();
        seekbar.animate_selected(Bound::Max, 0.0, Duration::from_secs(1), start);
        seekbar.tick(start + Duration::from_millis(500));
        let frozen = seekbar.selected_max_value();
        seekbar.cancel_animations();
        assert!(!seekbar.tick(start + Duration::from_secs(2)));
        assert_eq!(seekbar.selected_max_value(), frozen);
    }

    #[test]
    fn test_animated_setter_uses_configured_duration() {
        let mut seekbar = seekbar(SeekBarConfig::default().animation_duration(Duration::ZERO));
        seekbar.set_selected_min_value(30.0, true, None);
        assert!(seekbar.is_animating());
        seekbar.tick(Instant::now());
        assert_abs_diff_eq!(seekbar.selected_min_value(), 30.0, epsilon = 1e-4);
    }

    #[test]
    fn test_save_and_restore() {
        let mut source = seekbar(SeekBarConfig::default().current_min(20.0).current_max(80.0));
        source.set_selected_min_value(20.0, false, None);
        let state = source.save_state(Some(b"parent".to_vec()));
        assert_abs_diff_eq!(state.normalized_min, 0.2, epsilon = 1e-6);
        assert_abs_diff_eq!(state.normalized_max, 0.8, epsilon = 1e-6);

        let mut restored = seekbar(SeekBarConfig::default());
        let recorder = Recorder::default();
        recorder.attach(&mut restored);
        let parent = restored.restore_state(&state);

        assert_eq!(parent.as_deref(), Some(&b"parent"[..]));
        assert_abs_diff_eq!(restored.selected_min_value(), 20.0, epsilon = 1e-4);
        assert_abs_diff_eq!(restored.selected_max_value(), 80.0, epsilon = 1e-4);
        let calls = recorder.take();
        assert_eq!(calls.len(), 2);
        assert!(matches!(calls[0], Call::Changed(..)));
        assert!(matches!(calls[1], Call::Changing(..)));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_restore_from_json() {
        let source = seekbar(SeekBarConfig::default().min(0.0).max(10.0).current_min(2.0));
        let json = source.save_state(None).to_json().unwrap();
        let mut restored = SeekBarRanged::default();
        restored.restore_state(&SavedState::from_json(&json).unwrap());
        assert_eq!(restored.max_value(), 10.0);
        assert_abs_diff_eq!(restored.selected_min_value(), 2.0, epsilon = 1e-4);
    }

    #[test]
    fn test_thumb_images_share_until_set() {
        let mut seekbar = SeekBarRanged::new(SeekBarConfig::default()).unwrap();
        seekbar.set_thumb_pressed_image(thumb(30));
        assert_eq!(seekbar.geometry().thumb_half_width, 15.0);
        assert_eq!(seekbar.geometry().thumb_pressed_half_width, 15.0);
        seekbar.set_thumb_normal_image(thumb(10));
        assert_eq!(seekbar.geometry().thumb_half_width, 5.0);
        assert_eq!(seekbar.geometry().thumb_pressed_half_width, 15.0);
        assert!(seekbar.take_layout_request());
        assert!(!seekbar.take_layout_request());
    }

    #[test]
    fn test_measure_and_redraw_flags() {
        let mut seekbar = seekbar(SeekBarConfig::default());
        assert_eq!(
            seekbar.measure(DimensionValue::WRAP, DimensionValue::WRAP),
            (200.0, 20.0)
        );
        assert!(seekbar.take_redraw_request());
        assert!(!seekbar.is_dirty());
        seekbar.set_progress_color_argb(0xFF, 0, 0, 0);
        assert!(seekbar.is_dirty());
        assert!(seekbar.set_progress_height(-1.0).is_err());
    }

    #[derive(Default)]
    struct Counter {
        rects: usize,
        circles: usize,
        bitmaps: usize,
    }

    impl DrawSurface for Counter {
        fn fill_round_rect(&mut self, _: crate::Rect, _: f32, _: Color) {
            self.rects += 1;
        }
        fn fill_circle(&mut self, _: f32, _: f32, _: f32, _: Color) {
            self.circles += 1;
        }
        fn draw_bitmap(&mut self, _: &RgbaImage, _: f32, _: f32) {
            self.bitmaps += 1;
        }
    }

    #[test]
    fn test_draw_clears_dirty() {
        let mut seekbar = seekbar(SeekBarConfig::default());
        seekbar.enable_progress_by_steps(true);
        seekbar.set_progress_steps(&[50.0]);
        let mut surface = Counter::default();
        seekbar.draw(&mut surface);
        assert_eq!((surface.rects, surface.circles, surface.bitmaps), (2, 3, 2));
        assert!(!seekbar.is_dirty());
    }

    mod properties {
        use proptest::prelude::*;

        use super::*;

        #[derive(Debug, Clone)]
        enum Action {
            SetMin(f32),
            SetMax(f32),
            Drag(f32, f32),
            Domain(f32, f32),
        }

        fn action() -> impl Strategy<Value = Action> {
            prop_oneof![
                (-50.0f32..150.0).prop_map(Action::SetMin),
                (-50.0f32..150.0).prop_map(Action::SetMax),
                (0.0f32..220.0, 0.0f32..220.0).prop_map(|(a, b)| Action::Drag(a, b)),
                (-100.0f32..0.0, 0.0f32..200.0).prop_map(|(a, b)| Action::Domain(a, b)),
            ]
        }

        proptest! {
            #[test]
            fn selection_stays_ordered(actions in prop::collection::vec(action(), 0..32)) {
                let mut seekbar = seekbar(SeekBarConfig::default());
                for action in actions {
                    match action {
                        Action::SetMin(v) => seekbar.set_selected_min_value(v, false, None),
                        Action::SetMax(v) => seekbar.set_selected_max_value(v, false, None),
                        Action::Drag(from, to) => drag(&mut seekbar, from, to),
                        Action::Domain(min, max) => {
                            seekbar.set_min_value(min);
                            seekbar.set_max_value(max);
                        }
                    }
                    prop_assert!(seekbar.normalized_min_value() <= seekbar.normalized_max_value());
                    prop_assert!((0.0..=1.0).contains(&seekbar.normalized_min_value()));
                    prop_assert!((0.0..=1.0).contains(&seekbar.normalized_max_value()));
                }
            }
        }
    }
}
