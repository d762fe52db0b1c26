use crate::models::DragSession;

/// Maps padded positions and live drags to track translations.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Positioner {
    viewport_width: f64,
}

impl Positioner {
    pub fn new(viewport_width: f64) -> Self {
        Self { viewport_width }
    }

    pub fn viewport_width(&self) -> f64 {
        self.viewport_width
    }

    /// Resting offset for a padded position
    #[inline]
    pub fn offset_for(&self, index: usize) -> f64 {
        -(self.viewport_width * index as f64)
    }

    /// Live offset while dragging
    #[inline]
    pub fn offset_for_drag(&self, session: &DragSession) -> f64 {
        session.base_translate + session.delta()
    }
}
