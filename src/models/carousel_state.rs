/// Point-in-time view of a carousel.
///
/// Returned by [`crate::state::Carousel::snapshot`]. The live values are owned by the
/// individual components; `is_transitioning` and `is_dragging` are derived from the
/// transition token and the gesture phase so they can never disagree with them.
#[derive(Clone, Debug, PartialEq)]
pub struct CarouselState {
    /// Padded position of the active slide (1-based against the real slides)
    pub active_index: usize,

    pub total_slides: usize,

    pub is_transitioning: bool,

    pub is_dragging: bool,

    /// Viewport width in pixels, cached at construction
    pub viewport_width: f64,
}

impl CarouselState {
    /// No drag and no transition in flight
    pub fn is_settled(&self) -> bool {
        !self.is_transitioning && !self.is_dragging
    }

    /// Whether the active index points at a real slide rather than a padding clone
    pub fn is_on_real_slide(&self) -> bool {
        (1..=self.total_slides).contains(&self.active_index)
    }
}

/// A live drag, recorded on pointer/touch-down and dropped on release.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragSession {
    pub start_x: f64,
    pub current_x: f64,

    /// Resting offset at the moment the drag began
    pub base_translate: f64,
}

impl DragSession {
    pub fn new(start_x: f64, base_translate: f64) -> Self {
        Self {
            start_x,
            current_x: start_x,
            base_translate,
        }
    }

    /// Horizontal distance travelled; positive when dragged to the right
    pub fn delta(&self) -> f64 {
        self.current_x - self.start_x
    }
}

/// Opaque handle for one in-flight transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TransitionToken(u64);

impl TransitionToken {
    pub(crate) fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn id(&self) -> u64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drag_session_starts_without_delta() {
        let session = DragSession::new(120.0, -800.0);
        assert_eq!(session.current_x, 120.0);
        assert_eq!(session.delta(), 0.0);
    }

    #[test]
    fn test_settled_state() {
        let mut state = CarouselState {
            active_index: 3,
            total_slides: 3,
            is_transitioning: false,
            is_dragging: false,
            viewport_width: 640.0,
        };
        assert!(state.is_settled());
        assert!(state.is_on_real_slide());

        state.active_index = 4;
        state.is_transitioning = true;
        assert!(!state.is_settled());
        assert!(!state.is_on_real_slide());
    }
}
