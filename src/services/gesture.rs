use crate::models::DragSession;

/// Fraction of the viewport width a drag must exceed to commit
pub const COMMIT_THRESHOLD_FRACTION: f64 = 0.1;

/// Decision taken when a drag is released
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Commit {
    Advance,
    Retreat,
    SnapBack,
}

impl Commit {
    /// Apply the release rule to a drag delta.
    ///
    /// Dragging right past the threshold reveals the previous slide; dragging left
    /// past it reveals the next one. A delta exactly at the threshold snaps back.
    pub fn decide(delta: f64, viewport_width: f64) -> Commit {
        let threshold = COMMIT_THRESHOLD_FRACTION * viewport_width;
        if delta > threshold {
            Commit::Retreat
        } else if delta < -threshold {
            Commit::Advance
        } else {
            Commit::SnapBack
        }
    }
}

/// Gesture state machine phase
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GesturePhase {
    Idle,
    Dragging(DragSession),
    /// Released; waiting for the commit transition to finish
    Committing(Commit),
}

/// Tracks one pointer or touch drag from press to settle.
#[derive(Clone, Debug)]
pub struct GestureRecognizer {
    phase: GesturePhase,
}

impl Default for GestureRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

impl GestureRecognizer {
    pub fn new() -> Self {
        Self {
            phase: GesturePhase::Idle,
        }
    }

    pub fn phase(&self) -> GesturePhase {
        self.phase
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, GesturePhase::Dragging(_))
    }

    pub fn session(&self) -> Option<&DragSession> {
        match &self.phase {
            GesturePhase::Dragging(session) => Some(session),
            _ => None,
        }
    }

    /// Start a drag. Only possible from `Idle`.
    pub fn begin(&mut self, x: f64, base_translate: f64) -> bool {
        if self.phase != GesturePhase::Idle {
            return false;
        }
        self.phase = GesturePhase::Dragging(DragSession::new(x, base_translate));
        true
    }

    /// Record a new pointer position. Returns the updated session, or `None` when
    /// no drag is live.
    pub fn track(&mut self, x: f64) -> Option<DragSession> {
        match &mut self.phase {
            GesturePhase::Dragging(session) => {
                session.current_x = x;
                Some(*session)
            }
            _ => None,
        }
    }

    /// End the drag and decide the commit. The recognizer stays in `Committing`
    /// until [`GestureRecognizer::settle`] is called.
    pub fn release(&mut self, viewport_width: f64) -> Option<(Commit, DragSession)> {
        let GesturePhase::Dragging(session) = self.phase else {
            return None;
        };
        let commit = Commit::decide(session.delta(), viewport_width);
        self.phase = GesturePhase::Committing(commit);
        Some((commit, session))
    }

    /// Return to `Idle` after the commit transition completes. A live drag is
    /// left untouched.
    pub fn settle(&mut self) {
        if let GesturePhase::Committing(_) = self.phase {
            self.phase = GesturePhase::Idle;
        }
    }

    /// Abandon any drag without committing.
    pub fn cancel(&mut self) {
        self.phase = GesturePhase::Idle;
    }
}
