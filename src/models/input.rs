use std::fmt;

/// Raw input delivered by the host surface.
///
/// Touch variants carry the coordinates of the first active touch point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    PointerDown { x: f64 },
    PointerMove { x: f64 },
    PointerUp { x: f64 },
    /// Pointer left the carousel while pressed
    PointerLeave,
    TouchStart { x: f64, y: f64 },
    TouchMove { x: f64, y: f64 },
    TouchEnd,
}

/// The two navigation triggers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NavAction {
    Advance,
    Retreat,
}

impl NavAction {
    /// Feather icon name for the on-screen affordance
    pub fn icon_name(&self) -> &'static str {
        match self {
            NavAction::Advance => "arrow-right",
            NavAction::Retreat => "arrow-left",
        }
    }
}

impl fmt::Display for NavAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavAction::Advance => write!(f, "advance"),
            NavAction::Retreat => write!(f, "retreat"),
        }
    }
}

/// Why a command was dropped instead of applied
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DropReason {
    /// A transition is in flight
    Transitioning,
    /// A drag is live and owns the carousel
    Dragging,
    /// Move/up arrived with no drag session
    NoDragSession,
    /// The carousel has been torn down
    TornDown,
}

/// Result of feeding a command or input event to the carousel.
///
/// Dropped commands are not queued or replayed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    Dropped(DropReason),
}

impl Outcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Outcome::Applied)
    }
}
