// Carousel engine
//
// This module provides the Carousel, which owns every core component plus the
// rendering surface and serializes them against each other with guard checks.
// Every state change is broadcast as a CarouselEvent.

use crate::metrics::Metrics;
use crate::models::{
    CarouselConfig, CarouselError, CarouselState, DropReason, InputEvent, NavAction, Outcome,
};
use crate::services::{
    AutoplayScheduler, Commit, CompletedTransition, GesturePhase, GestureRecognizer,
    PaddedSequence, Positioner, SlideIndex, TransitionController,
};
use crate::surface::RenderingSurface;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::broadcast;

pub use crate::models::TransitionToken;

/// Buffer size of the event broadcast channel
const EVENT_CHANNEL_CAPACITY: usize = 100;

/// Events emitted when the carousel changes state
///
/// Subscribers (the GUI controller, tests) observe the carousel through these
/// instead of polling [`Carousel::snapshot`].
#[derive(Clone, Debug, PartialEq)]
pub enum CarouselEvent {
    DragStarted {
        start_x: f64,
    },

    DragReleased {
        delta: f64,
        commit: Commit,
    },

    TransitionStarted {
        token: TransitionToken,
        target_index: usize,
    },

    TransitionFinished {
        token: TransitionToken,
        active_index: usize,
    },

    /// The index was silently moved off a padding clone
    Wrapped {
        from: usize,
        to: usize,
    },

    AutoplayTick,

    AutoplaySuspended,

    AutoplayResumed,

    CommandDropped {
        reason: DropReason,
    },

    TornDown,
}

/// One carousel instance.
///
/// All methods take `&mut self` and are meant to be called from a single execution
/// context (see [`crate::driver::CarouselDriver`]); the guard checks at the top of
/// each operation are the only mutual exclusion.
///
/// # Guarantees
///
/// - At most one transition is in flight ([`TransitionController`] is single-flight).
/// - At most one autoplay deadline is pending ([`AutoplayScheduler`]).
/// - Once settled, `1 <= active_index <= total_slides`.
///
/// # Time
///
/// The carousel never reads the clock. Callers pass `now` into every operation and
/// call [`Carousel::poll_timers`] once [`Carousel::next_deadline`] has passed.
pub struct Carousel<S: RenderingSurface> {
    surface: S,
    container_id: String,
    index: SlideIndex,
    padding: PaddedSequence,
    positioner: Positioner,
    gesture: GestureRecognizer,
    transition: TransitionController,
    autoplay: AutoplayScheduler,
    metrics: Arc<Metrics>,
    events_tx: broadcast::Sender<CarouselEvent>,
    torn_down: bool,
}

impl<S: RenderingSurface> Carousel<S> {
    /// Build a carousel on top of `surface`.
    ///
    /// Queries the surface geometry once, positions the track on the first slide,
    /// renders both navigation affordances, materializes the loop padding, and arms
    /// autoplay.
    ///
    /// # Errors
    ///
    /// Returns a [`CarouselError`] if the configuration is invalid, the surface has
    /// no slides, or its viewport width is not a positive finite number.
    pub fn new(
        config: &CarouselConfig,
        mut surface: S,
        now: Instant,
    ) -> Result<Self, CarouselError> {
        config.validate()?;

        let total = surface.slide_count();
        if total == 0 {
            return Err(CarouselError::EmptyCarousel);
        }

        let width = surface.viewport_width();
        if !(width.is_finite() && width > 0.0) {
            return Err(CarouselError::InvalidViewportWidth(width));
        }

        let index = SlideIndex::new(total);
        let positioner = Positioner::new(width);
        let padding = PaddedSequence::new(total);

        surface.set_translation(positioner.offset_for(index.active()));
        surface.create_navigation_affordance(NavAction::Retreat);
        surface.create_navigation_affordance(NavAction::Advance);
        padding.materialize(&mut surface);

        let (events_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        let mut autoplay = AutoplayScheduler::new(config.auto_play, config.auto_play_duration());
        autoplay.arm(now);

        tracing::info!(
            "Carousel '{}' initialized: {} slides, width {}px, animation {}ms, autoplay {}",
            config.container_id,
            total,
            width,
            config.animation_duration_ms,
            if config.auto_play {
                format!("every {}ms", config.auto_play_duration_ms)
            } else {
                "off".to_string()
            }
        );

        Ok(Self {
            surface,
            container_id: config.container_id.clone(),
            index,
            padding,
            positioner,
            gesture: GestureRecognizer::new(),
            transition: TransitionController::new(config.animation_duration()),
            autoplay,
            metrics: Arc::new(Metrics::new()),
            events_tx,
            torn_down: false,
        })
    }

    /// Get a read-only snapshot of the current state
    pub fn snapshot(&self) -> CarouselState {
        CarouselState {
            active_index: self.index.active(),
            total_slides: self.index.total(),
            is_transitioning: self.transition.is_busy(),
            is_dragging: self.gesture.is_dragging(),
            viewport_width: self.positioner.viewport_width(),
        }
    }

    /// Subscribe to carousel events
    pub fn subscribe(&self) -> broadcast::Receiver<CarouselEvent> {
        self.events_tx.subscribe()
    }

    pub(crate) fn event_sender(&self) -> broadcast::Sender<CarouselEvent> {
        self.events_tx.clone()
    }

    pub fn metrics(&self) -> Arc<Metrics> {
        Arc::clone(&self.metrics)
    }

    pub fn container_id(&self) -> &str {
        &self.container_id
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn gesture_phase(&self) -> GesturePhase {
        self.gesture.phase()
    }

    pub fn padded_sequence(&self) -> PaddedSequence {
        self.padding
    }

    /// The real slide currently on screen, resolving padding clones
    pub fn displayed_slide(&self) -> usize {
        self.padding
            .displayed_slide(self.index.active())
            .unwrap_or(self.index.active())
    }

    /// Resting offset for the current index
    pub fn resting_offset(&self) -> f64 {
        self.positioner.offset_for(self.index.active())
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Earliest pending timer: transition completion or autoplay tick
    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.transition.deadline(), self.autoplay.deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Feed one raw input event.
    pub fn handle_input(&mut self, event: InputEvent, now: Instant) -> Outcome {
        if self.torn_down {
            return self.drop_command(DropReason::TornDown);
        }

        match event {
            InputEvent::PointerDown { x } | InputEvent::TouchStart { x, .. } => {
                self.begin_drag(x)
            }
            InputEvent::PointerMove { x } => self.drag_to(x),
            InputEvent::TouchMove { x, y } => {
                let outcome = self.drag_to(x);
                if outcome.is_applied() && !self.surface.is_inside_carousel(x, y) {
                    tracing::debug!("Touch drifted outside the carousel at ({}, {}), releasing", x, y);
                    return self.release_drag(now);
                }
                outcome
            }
            InputEvent::PointerUp { x } => {
                self.gesture.track(x);
                self.release_drag(now)
            }
            InputEvent::PointerLeave | InputEvent::TouchEnd => self.release_drag(now),
        }
    }

    /// Handle a navigation trigger. Behaves exactly like a committed drag in the
    /// same direction.
    pub fn navigate(&mut self, action: NavAction, now: Instant) -> Outcome {
        if self.torn_down {
            return self.drop_command(DropReason::TornDown);
        }
        if self.transition.is_busy() {
            return self.drop_command(DropReason::Transitioning);
        }
        if self.gesture.is_dragging() {
            return self.drop_command(DropReason::Dragging);
        }

        tracing::debug!("Navigation: {}", action);
        self.step(action);
        self.start_transition(now)
    }

    pub fn advance(&mut self, now: Instant) -> Outcome {
        self.navigate(NavAction::Advance, now)
    }

    pub fn retreat(&mut self, now: Instant) -> Outcome {
        self.navigate(NavAction::Retreat, now)
    }

    /// Fire every timer whose deadline is at or before `now`.
    ///
    /// Transition completion runs first, so an autoplay tick never observes a
    /// transition that has already finished.
    pub fn poll_timers(&mut self, now: Instant) {
        if self.torn_down {
            return;
        }

        if let Some(done) = self.transition.poll(now) {
            self.finish_transition(done, now);
        }

        if self.autoplay.take_due(now) {
            self.metrics.record_autoplay_tick();
            self.emit(CarouselEvent::AutoplayTick);
            // A tick that lands on a busy carousel is absorbed by the navigation guard
            let _ = self.navigate(NavAction::Advance, now);
        }
    }

    /// Cancel the live drag, in-flight transition, and autoplay timer. Every later
    /// command is dropped.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }

        self.gesture.cancel();
        if let Some(token) = self.transition.cancel() {
            tracing::debug!("Teardown cancelled transition {}", token.id());
        }
        self.autoplay.disable();
        self.torn_down = true;

        self.emit(CarouselEvent::TornDown);
        tracing::info!("Carousel '{}' torn down", self.container_id);
    }

    fn begin_drag(&mut self, x: f64) -> Outcome {
        if self.transition.is_busy() {
            return self.drop_command(DropReason::Transitioning);
        }

        let base_translate = self.positioner.offset_for(self.index.active());
        if !self.gesture.begin(x, base_translate) {
            return self.drop_command(DropReason::Dragging);
        }

        if self.autoplay.suspend() {
            self.emit(CarouselEvent::AutoplaySuspended);
        }
        self.metrics.record_drag_started();
        self.emit(CarouselEvent::DragStarted { start_x: x });
        Outcome::Applied
    }

    fn drag_to(&mut self, x: f64) -> Outcome {
        let Some(session) = self.gesture.track(x) else {
            return Self::ignore_stray_input();
        };
        self.surface
            .set_translation(self.positioner.offset_for_drag(&session));
        Outcome::Applied
    }

    fn release_drag(&mut self, now: Instant) -> Outcome {
        if !self.gesture.is_dragging() {
            return Self::ignore_stray_input();
        }
        if self.transition.is_busy() {
            self.gesture.cancel();
            return self.drop_command(DropReason::Transitioning);
        }

        let Some((commit, session)) = self.gesture.release(self.positioner.viewport_width())
        else {
            return Self::ignore_stray_input();
        };

        tracing::debug!("Drag released: delta {:.2}px -> {:?}", session.delta(), commit);
        self.emit(CarouselEvent::DragReleased {
            delta: session.delta(),
            commit,
        });

        match commit {
            Commit::Advance => {
                self.metrics.record_drag_commit();
                self.step(NavAction::Advance);
            }
            Commit::Retreat => {
                self.metrics.record_drag_commit();
                self.step(NavAction::Retreat);
            }
            Commit::SnapBack => self.metrics.record_snap_back(),
        }

        self.start_transition(now)
    }

    fn step(&mut self, action: NavAction) {
        match action {
            NavAction::Advance => self.index.advance(),
            NavAction::Retreat => self.index.retreat(),
        }
    }

    fn start_transition(&mut self, now: Instant) -> Outcome {
        if self.autoplay.suspend() {
            self.emit(CarouselEvent::AutoplaySuspended);
        }

        let target_index = self.index.active();
        let offset = self.positioner.offset_for(target_index);
        match self
            .transition
            .run(&mut self.surface, offset, target_index, now)
        {
            Ok(token) => {
                self.metrics.record_transition_started();
                self.emit(CarouselEvent::TransitionStarted {
                    token,
                    target_index,
                });
                Outcome::Applied
            }
            Err(busy) => {
                tracing::warn!(
                    "Transition rejected: transition {} still in flight",
                    busy.0.id()
                );
                self.gesture.settle();
                self.drop_command(DropReason::Transitioning)
            }
        }
    }

    fn finish_transition(&mut self, done: CompletedTransition, now: Instant) {
        self.surface.clear_animation();
        self.metrics.record_transition_completed();

        if let Some(wrap) = self.index.correct() {
            self.surface
                .set_translation(self.positioner.offset_for(wrap.to));
            self.metrics.record_wraparound();
            tracing::debug!("Wrapped index {} -> {}", wrap.from, wrap.to);
            self.emit(CarouselEvent::Wrapped {
                from: wrap.from,
                to: wrap.to,
            });
        }

        self.gesture.settle();
        self.emit(CarouselEvent::TransitionFinished {
            token: done.token,
            active_index: self.index.active(),
        });

        if self.autoplay.arm(now) {
            self.emit(CarouselEvent::AutoplayResumed);
        }
    }

    fn drop_command(&self, reason: DropReason) -> Outcome {
        self.metrics.record_command_dropped();
        tracing::debug!("Command dropped: {:?}", reason);
        self.emit(CarouselEvent::CommandDropped { reason });
        Outcome::Dropped(reason)
    }

    fn ignore_stray_input() -> Outcome {
        tracing::trace!("Ignoring move/release without a drag session");
        Outcome::Dropped(DropReason::NoDragSession)
    }

    fn emit(&self, event: CarouselEvent) {
        // Ignore send errors - it's OK if no one is listening
        let _ = self.events_tx.send(event);
    }
}
