use super::RenderingSurface;
use crate::models::NavAction;
use std::time::Duration;

/// One call received by a [`RecordingSurface`]
#[derive(Clone, Debug, PartialEq)]
pub enum SurfaceCall {
    SetTranslation(f64),
    SetAnimatedTranslation { x: f64, duration: Duration },
    ClearAnimation,
    PrependClone,
    AppendClone,
    NavigationAffordance(NavAction),
}

/// Headless surface that records every call it receives.
///
/// The carousel region is the rectangle `[0, width) x [0, height)`; points outside
/// it are reported as outside the carousel.
#[derive(Clone, Debug)]
pub struct RecordingSurface {
    width: f64,
    height: f64,
    slide_count: usize,
    calls: Vec<SurfaceCall>,
}

impl RecordingSurface {
    pub fn new(width: f64, height: f64, slide_count: usize) -> Self {
        Self {
            width,
            height,
            slide_count,
            calls: Vec::new(),
        }
    }

    pub fn calls(&self) -> &[SurfaceCall] {
        &self.calls
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    /// The most recent offset applied, animated or not
    pub fn current_translation(&self) -> Option<f64> {
        self.calls.iter().rev().find_map(|call| match call {
            SurfaceCall::SetTranslation(x) => Some(*x),
            SurfaceCall::SetAnimatedTranslation { x, .. } => Some(*x),
            _ => None,
        })
    }

    /// Number of slides currently materialized, clones included
    pub fn rendered_slides(&self) -> usize {
        let clones = self
            .calls
            .iter()
            .filter(|call| matches!(call, SurfaceCall::PrependClone | SurfaceCall::AppendClone))
            .count();
        self.slide_count + clones
    }

    pub fn animated_moves(&self) -> usize {
        self.calls
            .iter()
            .filter(|call| matches!(call, SurfaceCall::SetAnimatedTranslation { .. }))
            .count()
    }
}

impl RenderingSurface for RecordingSurface {
    fn viewport_width(&self) -> f64 {
        self.width
    }

    fn slide_count(&self) -> usize {
        self.slide_count
    }

    fn set_translation(&mut self, x: f64) {
        self.calls.push(SurfaceCall::SetTranslation(x));
    }

    fn set_animated_translation(&mut self, x: f64, duration: Duration) {
        self.calls.push(SurfaceCall::SetAnimatedTranslation { x, duration });
    }

    fn clear_animation(&mut self) {
        self.calls.push(SurfaceCall::ClearAnimation);
    }

    fn is_inside_carousel(&self, x: f64, y: f64) -> bool {
        (0.0..self.width).contains(&x) && (0.0..self.height).contains(&y)
    }

    fn prepend_clone(&mut self) {
        self.calls.push(SurfaceCall::PrependClone);
    }

    fn append_clone(&mut self) {
        self.calls.push(SurfaceCall::AppendClone);
    }

    fn create_navigation_affordance(&mut self, action: NavAction) {
        self.calls.push(SurfaceCall::NavigationAffordance(action));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_testing_uses_viewport_rectangle() {
        let surface = RecordingSurface::new(800.0, 450.0, 3);
        assert!(surface.is_inside_carousel(0.0, 0.0));
        assert!(surface.is_inside_carousel(799.0, 449.0));
        assert!(!surface.is_inside_carousel(800.0, 10.0));
        assert!(!surface.is_inside_carousel(10.0, -1.0));
    }

    #[test]
    fn test_current_translation_tracks_last_offset() {
        let mut surface = RecordingSurface::new(800.0, 450.0, 3);
        assert_eq!(surface.current_translation(), None);

        surface.set_translation(-800.0);
        surface.set_animated_translation(-1600.0, Duration::from_millis(300));
        surface.clear_animation();

        assert_eq!(surface.current_translation(), Some(-1600.0));
        assert_eq!(surface.animated_moves(), 1);
    }
}
