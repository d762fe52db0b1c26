//! Rendering surface - the view collaborator the carousel core drives.
//!
//! The core never touches widgets directly. Everything it needs from the host is
//! expressed by [`RenderingSurface`]:
//!
//! - geometry queried once at construction (`viewport_width`, `slide_count`)
//! - immediate and animated translation of the slide track
//! - hit-testing for the touch-drift release rule
//! - materializing the two loop-padding clones
//! - rendering the two navigation affordances
//!
//! Input flows the other way: the host feeds [`crate::models::InputEvent`]s into
//! [`crate::state::Carousel::handle_input`].
//!
//! Two implementations ship with the crate:
//! - [`RecordingSurface`]: headless, records every call (used by tests and benches)
//! - [`crate::ui::SlintSurface`]: marshals calls onto the Slint event loop

pub mod recording;

use crate::models::NavAction;
use std::time::Duration;

pub use recording::{RecordingSurface, SurfaceCall};

/// Host-side view of one carousel.
///
/// Animated translations must interpolate with a `cubic-bezier(.7,0,0,1)` timing
/// function over exactly the duration given.
#[cfg_attr(test, mockall::automock)]
pub trait RenderingSurface: Send {
    /// Width of the visible viewport in pixels
    fn viewport_width(&self) -> f64;

    /// Number of real slides, excluding padding clones
    fn slide_count(&self) -> usize;

    /// Apply an unanimated horizontal offset
    fn set_translation(&mut self, x: f64);

    /// Apply an offset that interpolates over `duration`
    fn set_animated_translation(&mut self, x: f64, duration: Duration);

    /// Drop the animated style so later offsets apply immediately
    fn clear_animation(&mut self);

    /// Whether the point lies inside the carousel's own element tree
    fn is_inside_carousel(&self, x: f64, y: f64) -> bool;

    /// Insert a copy of the last slide before the first one
    fn prepend_clone(&mut self);

    /// Insert a copy of the first slide after the last one
    fn append_clone(&mut self);

    fn create_navigation_affordance(&mut self, action: NavAction);
}
