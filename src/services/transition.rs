use crate::models::TransitionToken;
use crate::surface::RenderingSurface;
use std::time::{Duration, Instant};

/// Returned by [`TransitionController::run`] when a transition is already in flight
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TransitionBusy(pub TransitionToken);

#[derive(Clone, Copy, Debug)]
struct InFlight {
    token: TransitionToken,
    target_index: usize,
    deadline: Instant,
}

/// A transition whose deadline has passed
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CompletedTransition {
    pub token: TransitionToken,
    pub target_index: usize,
}

/// Drives one fixed-duration animated move at a time.
///
/// Completion is inferred from elapsed time: the same `duration` authors the
/// animation on the surface and schedules the completion deadline.
#[derive(Debug)]
pub struct TransitionController {
    duration: Duration,
    in_flight: Option<InFlight>,
    next_id: u64,
}

impl TransitionController {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            in_flight: None,
            next_id: 1,
        }
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn token(&self) -> Option<TransitionToken> {
        self.in_flight.map(|flight| flight.token)
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.in_flight.map(|flight| flight.deadline)
    }

    /// Animate the surface to `to_offset` and schedule completion.
    ///
    /// # Errors
    ///
    /// Returns [`TransitionBusy`] without touching the surface if another
    /// transition is still in flight.
    pub fn run<S: RenderingSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        to_offset: f64,
        target_index: usize,
        now: Instant,
    ) -> Result<TransitionToken, TransitionBusy> {
        if let Some(flight) = self.in_flight {
            return Err(TransitionBusy(flight.token));
        }

        let token = TransitionToken::new(self.next_id);
        self.next_id += 1;

        surface.set_animated_translation(to_offset, self.duration);
        self.in_flight = Some(InFlight {
            token,
            target_index,
            deadline: now + self.duration,
        });

        tracing::trace!(
            "Transition {} started towards index {} (offset {})",
            token.id(),
            target_index,
            to_offset
        );
        Ok(token)
    }

    /// Release the in-flight transition if its deadline has passed.
    pub fn poll(&mut self, now: Instant) -> Option<CompletedTransition> {
        let flight = self.in_flight?;
        if now < flight.deadline {
            return None;
        }
        self.in_flight = None;
        Some(CompletedTransition {
            token: flight.token,
            target_index: flight.target_index,
        })
    }

    /// Drop the in-flight transition without completing it. Teardown only.
    pub fn cancel(&mut self) -> Option<TransitionToken> {
        self.in_flight.take().map(|flight| flight.token)
    }
}
