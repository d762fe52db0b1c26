use super::bridge::EventLoopBridgeHandle;
use super::{MainWindow, SlideData};
use crate::models::NavAction;
use crate::surface::RenderingSurface;
use slint::{Model, VecModel};
use std::time::Duration;

/// [`RenderingSurface`] backed by the Slint `MainWindow`.
///
/// Geometry is cached at construction, so queries never cross threads. Every
/// mutation is queued onto the Slint event loop through the bridge and applied in
/// order.
pub struct SlintSurface {
    bridge: EventLoopBridgeHandle<MainWindow>,
    viewport_width: f64,
    viewport_height: f64,
    slide_count: usize,
    show_navigation: bool,
}

impl SlintSurface {
    pub fn new(
        bridge: EventLoopBridgeHandle<MainWindow>,
        viewport_width: f64,
        viewport_height: f64,
        slide_count: usize,
    ) -> Self {
        Self {
            bridge,
            viewport_width,
            viewport_height,
            slide_count,
            show_navigation: true,
        }
    }

    /// Whether navigation affordances are rendered when the carousel asks for them
    pub fn with_navigation(mut self, show_navigation: bool) -> Self {
        self.show_navigation = show_navigation;
        self
    }

    fn with_slides<F>(&self, edit: F)
    where
        F: FnOnce(&VecModel<SlideData>) + Send + 'static,
    {
        self.bridge.update_ui(move |ui| {
            let slides = ui.get_slides();
            match slides.as_any().downcast_ref::<VecModel<SlideData>>() {
                Some(model) => edit(model),
                None => tracing::error!("Slide model is not a VecModel; cannot edit padding"),
            }
        });
    }
}

impl RenderingSurface for SlintSurface {
    fn viewport_width(&self) -> f64 {
        self.viewport_width
    }

    fn slide_count(&self) -> usize {
        self.slide_count
    }

    fn set_translation(&mut self, x: f64) {
        self.bridge.update_ui(move |ui| {
            ui.set_animated(false);
            ui.set_translation(x as f32);
        });
    }

    fn set_animated_translation(&mut self, x: f64, duration: Duration) {
        let millis = i64::try_from(duration.as_millis()).unwrap_or(i64::MAX);
        self.bridge.update_ui(move |ui| {
            ui.set_animation_duration(millis);
            ui.set_animated(true);
            ui.set_translation(x as f32);
        });
    }

    fn clear_animation(&mut self) {
        self.bridge.update_ui(|ui| ui.set_animated(false));
    }

    fn is_inside_carousel(&self, x: f64, y: f64) -> bool {
        (0.0..self.viewport_width).contains(&x) && (0.0..self.viewport_height).contains(&y)
    }

    fn prepend_clone(&mut self) {
        self.with_slides(|model| {
            let count = model.row_count();
            if let Some(last) = count.checked_sub(1).and_then(|i| model.row_data(i)) {
                model.insert(0, last);
            }
        });
    }

    fn append_clone(&mut self) {
        self.with_slides(|model| {
            // Position 0 now holds the clone of the last slide
            let first_real = if model.row_count() > 1 { 1 } else { 0 };
            if let Some(first) = model.row_data(first_real) {
                model.push(first);
            }
        });
    }

    fn create_navigation_affordance(&mut self, action: NavAction) {
        if !self.show_navigation {
            tracing::debug!("Navigation affordances disabled; not rendering {}", action);
            return;
        }
        tracing::debug!("Rendering {} affordance ({})", action, action.icon_name());
        self.bridge.update_ui(move |ui| match action {
            NavAction::Retreat => ui.set_show_previous(true),
            NavAction::Advance => ui.set_show_next(true),
        });
    }
}
