//! Services module - the carousel's core components.
//!
//! Each component is a small, framework-agnostic piece of the interaction and
//! transition state machine. None of them knows about Slint or tokio; time is passed
//! in as [`std::time::Instant`] values and rendering goes through
//! [`crate::surface::RenderingSurface`].
//!
//! # Components
//!
//! - [`SlideIndex`]: active/total counters and wraparound correction
//! - [`PaddedSequence`]: the `[clone(last), 1..=n, clone(first)]` layout
//! - [`Positioner`]: padded index or drag session → track translation
//! - [`GestureRecognizer`]: press/move/release → [`Commit`] decision
//! - [`TransitionController`]: single-flight fixed-duration animation
//! - [`AutoplayScheduler`]: one periodic advance timer
//!
//! They are composed by [`crate::state::Carousel`], which owns the guard checks that
//! serialize them against each other.

pub mod autoplay;
pub mod gesture;
pub mod index;
pub mod padding;
pub mod positioner;
pub mod transition;

pub use autoplay::AutoplayScheduler;
pub use gesture::{COMMIT_THRESHOLD_FRACTION, Commit, GesturePhase, GestureRecognizer};
pub use index::{SlideIndex, Wraparound};
pub use padding::{PaddedSequence, PaddedSlot};
pub use positioner::Positioner;
pub use transition::{CompletedTransition, TransitionBusy, TransitionController};
