//! Multi-touch gesture tracking.
//!
//! A [`TouchSession`] lives for one gesture. It decides which thumb a press
//! grabs, follows the active pointer through the touch slop into a drag, and
//! translates pointer positions into normalized values. It never touches the
//! range model directly: every call returns a [`TouchOutcome`] whose
//! [`TouchEffect`]s the widget applies in order.
//!
//! # Phases
//!
//! ```text
//! Idle --down on a thumb--> PressedNoDrag --move past slop--> Dragging
//!   ^                            |                               |
//!   +------------ up / cancel ---+-------------------------------+
//! ```
//!
//! A press that misses both thumbs leaves the session idle, and every later
//! event of that gesture is passed through to the host.
//!
//! # Thread Safety
//!
//! A session is plain data owned by its widget and driven from the UI thread.

use smallvec::SmallVec;
use tracing::{debug, trace, warn};

use crate::{
    hit_test::{Thumb, eval_pressed_thumb},
    range::Bound,
    steps::StepSet,
    value_space::ValueSpace,
};

/// Identifier of a touch point, stable for the lifetime of that touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PointerId(pub u64);

/// One touch point in widget-local pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pointer {
    /// Touch identifier.
    pub id: PointerId,
    /// Horizontal position.
    pub x: f32,
    /// Vertical position.
    pub y: f32,
}

impl Pointer {
    /// Creates a pointer.
    pub const fn new(id: u64, x: f32, y: f32) -> Self {
        Self {
            id: PointerId(id),
            x,
            y,
        }
    }
}

/// What happened to the pointer set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerAction {
    /// The first pointer touched down.
    Down,
    /// One or more pointers moved.
    Move,
    /// The last pointer lifted.
    Up,
    /// An additional pointer touched down.
    PointerDown,
    /// A pointer lifted while others remain.
    PointerUp,
    /// The host aborted the gesture.
    Cancel,
}

/// Pointer list most gestures fit inline.
pub type Pointers = SmallVec<[Pointer; 4]>;

/// A pointer event as delivered by the host input pipeline.
///
/// `pointers` holds every pointer currently down, including the one the
/// action refers to, and `action_index` indexes that pointer for
/// [`PointerAction::PointerDown`] and [`PointerAction::PointerUp`].
#[derive(Debug, Clone, PartialEq)]
pub struct PointerEvent {
    /// The action.
    pub action: PointerAction,
    /// Index into `pointers` of the pointer the action refers to.
    pub action_index: usize,
    /// Every pointer down at the time of the event.
    pub pointers: Pointers,
}

impl PointerEvent {
    /// Creates an event from its parts.
    pub fn new(
        action: PointerAction,
        action_index: usize,
        pointers: impl IntoIterator<Item = Pointer>,
    ) -> Self {
        Self {
            action,
            action_index,
            pointers: pointers.into_iter().collect(),
        }
    }

    /// A single pointer touching down at `x`.
    pub fn down(id: u64, x: f32) -> Self {
        Self::new(PointerAction::Down, 0, [Pointer::new(id, x, 0.0)])
    }

    /// A single pointer moving to `x`.
    pub fn moved(id: u64, x: f32) -> Self {
        Self::new(PointerAction::Move, 0, [Pointer::new(id, x, 0.0)])
    }

    /// A single pointer lifting at `x`.
    pub fn up(id: u64, x: f32) -> Self {
        Self::new(PointerAction::Up, 0, [Pointer::new(id, x, 0.0)])
    }

    /// The gesture was aborted.
    pub fn cancel() -> Self {
        Self::new(PointerAction::Cancel, 0, [])
    }

    /// Pointer `pointers[action_index]` joined the gesture.
    pub fn pointer_down(action_index: usize, pointers: impl IntoIterator<Item = Pointer>) -> Self {
        Self::new(PointerAction::PointerDown, action_index, pointers)
    }

    /// Pointer `pointers[action_index]` left the gesture.
    pub fn pointer_up(action_index: usize, pointers: impl IntoIterator<Item = Pointer>) -> Self {
        Self::new(PointerAction::PointerUp, action_index, pointers)
    }

    /// Number of pointers down.
    pub fn pointer_count(&self) -> usize {
        self.pointers.len()
    }

    /// Looks up a pointer by id.
    pub fn find(&self, id: PointerId) -> Option<&Pointer> {
        self.pointers.iter().find(|pointer| pointer.id == id)
    }

    /// The pointer `action_index` refers to.
    pub fn action_pointer(&self) -> Option<&Pointer> {
        self.pointers.get(self.action_index)
    }
}

/// Gesture phase.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum TouchPhase {
    /// No gesture owns a thumb.
    #[default]
    Idle,
    /// A thumb is held but the pointer has not moved past the slop.
    PressedNoDrag,
    /// A thumb follows the active pointer.
    Dragging,
}

/// Whether the host should keep dispatching the event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResponse {
    /// The widget ignored the event.
    PassThrough,
    /// The widget handled the event.
    Consumed {
        /// Ancestors should stop intercepting this gesture.
        claim_drag: bool,
    },
}

impl EventResponse {
    const CONSUMED: Self = Self::Consumed { claim_drag: false };

    /// Whether the widget handled the event.
    pub fn is_consumed(self) -> bool {
        matches!(self, Self::Consumed { .. })
    }

    /// Whether the host should disallow ancestor interception.
    pub fn claims_drag(self) -> bool {
        matches!(self, Self::Consumed { claim_drag: true })
    }
}

/// A state change requested by the session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TouchEffect {
    /// Store a normalized value through the clamping setter.
    SetNormalized {
        /// Bound to write.
        bound: Bound,
        /// New normalized value.
        value: f32,
    },
    /// The widget must repaint.
    Redraw,
    /// Report live values.
    NotifyChanging,
    /// Report settled values.
    NotifyChanged,
}

/// Result of feeding one event to a [`TouchSession`].
#[derive(Debug, Clone, PartialEq)]
pub struct TouchOutcome {
    /// Dispatch decision for the host.
    pub response: EventResponse,
    /// Effects to apply in order.
    pub effects: SmallVec<[TouchEffect; 4]>,
}

impl TouchOutcome {
    fn pass_through() -> Self {
        Self {
            response: EventResponse::PassThrough,
            effects: SmallVec::new(),
        }
    }

    fn consumed() -> Self {
        Self {
            response: EventResponse::CONSUMED,
            effects: SmallVec::new(),
        }
    }

    fn push(&mut self, effect: TouchEffect) {
        self.effects.push(effect);
    }
}

/// Snapshot of the widget the session reads while handling an event.
#[derive(Debug, Clone, Copy)]
pub struct TouchContext<'a> {
    /// Domain and layout.
    pub space: ValueSpace,
    /// Current lower normalized value.
    pub normalized_min: f32,
    /// Current upper normalized value.
    pub normalized_max: f32,
    /// Hit radius around each thumb.
    pub thumb_half_width: f32,
    /// Whether positions snap to `steps`.
    pub step_mode: bool,
    /// Step fractions.
    pub steps: &'a StepSet,
    /// Drag threshold in pixels.
    pub touch_slop: f32,
}

impl TouchContext<'_> {
    fn position_to_normalized(&self, x: f32) -> f32 {
        let normalized = self.space.to_normalized_from_screen(x);
        if self.step_mode {
            self.steps.closest(normalized)
        } else {
            normalized
        }
    }
}

/// Per-gesture touch state.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct TouchSession {
    phase: TouchPhase,
    active_pointer: Option<PointerId>,
    down_x: f32,
    pressed_thumb: Thumb,
}

impl TouchSession {
    /// Current phase.
    pub fn phase(&self) -> TouchPhase {
        self.phase
    }

    /// The thumb held by the gesture.
    pub fn pressed_thumb(&self) -> Thumb {
        self.pressed_thumb
    }

    /// The pointer driving the held thumb.
    pub fn active_pointer(&self) -> Option<PointerId> {
        self.active_pointer
    }

    /// Where the active pointer was when it became active.
    pub fn down_x(&self) -> f32 {
        self.down_x
    }

    /// Whether the held thumb follows the pointer.
    pub fn is_dragging(&self) -> bool {
        self.phase == TouchPhase::Dragging
    }

    /// Drops any gesture in progress without reporting it.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Feeds one event through the state machine.
    #[tracing::instrument(level = "trace", skip(self, ctx), fields(phase = ?self.phase))]
    pub fn handle(&mut self, event: &PointerEvent, ctx: &TouchContext<'_>) -> TouchOutcome {
        match event.action {
            PointerAction::Down => self.on_down(event, ctx),
            _ if self.phase == TouchPhase::Idle => TouchOutcome::pass_through(),
            PointerAction::Move => self.on_move(event, ctx),
            PointerAction::Up => self.on_up(event, ctx),
            PointerAction::PointerDown => self.on_pointer_down(event),
            PointerAction::PointerUp => self.on_pointer_up(event),
            PointerAction::Cancel => self.on_cancel(),
        }
    }

    fn on_down(&mut self, event: &PointerEvent, ctx: &TouchContext<'_>) -> TouchOutcome {
        self.reset();
        let Some(pointer) = event.pointers.last() else {
            warn!("pointer down without pointers");
            return TouchOutcome::pass_through();
        };
        let thumb = eval_pressed_thumb(
            &ctx.space,
            pointer.x,
            ctx.normalized_min,
            ctx.normalized_max,
            ctx.thumb_half_width,
        );
        if thumb.is_none() {
            trace!(x = pointer.x, "press missed both thumbs");
            return TouchOutcome::pass_through();
        }

        self.phase = TouchPhase::PressedNoDrag;
        self.active_pointer = Some(pointer.id);
        self.down_x = pointer.x;
        self.pressed_thumb = thumb;
        debug!(?thumb, pointer = ?pointer.id, x = pointer.x, "thumb pressed");

        let mut outcome = TouchOutcome::consumed();
        outcome.push(TouchEffect::Redraw);
        outcome
    }

    fn on_move(&mut self, event: &PointerEvent, ctx: &TouchContext<'_>) -> TouchOutcome {
        let mut outcome = TouchOutcome::consumed();
        let Some(x) = self.active_x(event) else {
            warn!(pointer = ?self.active_pointer, "move without the active pointer, ignored");
            return outcome;
        };

        match self.phase {
            TouchPhase::PressedNoDrag if (x - self.down_x).abs() > ctx.touch_slop => {
                self.phase = TouchPhase::Dragging;
                debug!(thumb = ?self.pressed_thumb, "drag started");
                outcome.response = EventResponse::Consumed { claim_drag: true };
                outcome.push(TouchEffect::Redraw);
                self.track(x, ctx, &mut outcome);
            }
            TouchPhase::Dragging => self.track(x, ctx, &mut outcome),
            _ => {}
        }
        outcome.push(TouchEffect::NotifyChanging);
        outcome
    }

    fn on_up(&mut self, event: &PointerEvent, ctx: &TouchContext<'_>) -> TouchOutcome {
        let mut outcome = TouchOutcome::consumed();
        match self.active_x(event) {
            // A release inside the slop is a tap-seek to that spot.
            Some(x) => self.track(x, ctx, &mut outcome),
            None => warn!(pointer = ?self.active_pointer, "release without the active pointer"),
        }
        debug!(thumb = ?self.pressed_thumb, dragged = self.is_dragging(), "gesture finished");
        self.reset();
        outcome.push(TouchEffect::Redraw);
        outcome.push(TouchEffect::NotifyChanged);
        outcome
    }

    fn on_cancel(&mut self) -> TouchOutcome {
        debug!(thumb = ?self.pressed_thumb, "gesture cancelled");
        self.reset();
        let mut outcome = TouchOutcome::consumed();
        outcome.push(TouchEffect::Redraw);
        outcome.push(TouchEffect::NotifyChanged);
        outcome
    }

    // The newest finger takes over the held thumb.
    fn on_pointer_down(&mut self, event: &PointerEvent) -> TouchOutcome {
        let mut outcome = TouchOutcome::consumed();
        let Some(pointer) = event.action_pointer().or(event.pointers.last()) else {
            warn!("secondary pointer down without pointers");
            return outcome;
        };
        self.active_pointer = Some(pointer.id);
        self.down_x = pointer.x;
        debug!(pointer = ?pointer.id, x = pointer.x, "active pointer replaced");
        outcome.push(TouchEffect::Redraw);
        outcome
    }

    fn on_pointer_up(&mut self, event: &PointerEvent) -> TouchOutcome {
        let mut outcome = TouchOutcome::consumed();
        let lifted = event.action_pointer().map(|pointer| pointer.id);
        if lifted.is_some() && lifted == self.active_pointer {
            let next_index = if event.action_index == 0 { 1 } else { 0 };
            match event.pointers.get(next_index) {
                Some(next) => {
                    self.active_pointer = Some(next.id);
                    self.down_x = next.x;
                    debug!(pointer = ?next.id, x = next.x, "active pointer handed over");
                }
                None => warn!(?lifted, "active pointer lifted with no pointer left"),
            }
        }
        outcome.push(TouchEffect::Redraw);
        outcome
    }

    fn active_x(&self, event: &PointerEvent) -> Option<f32> {
        self.active_pointer
            .and_then(|id| event.find(id))
            .map(|pointer| pointer.x)
    }

    fn track(&self, x: f32, ctx: &TouchContext<'_>, outcome: &mut TouchOutcome) {
        let Some(bound) = self.pressed_thumb.bound() else {
            return;
        };
        let value = ctx.position_to_normalized(x);
        trace!(?bound, x, value, "tracking");
        outcome.push(TouchEffect::SetNormalized { bound, value });
    }
}
