use thiserror::Error;

/// Errors raised while constructing a carousel.
///
/// Runtime commands never fail; they are dropped instead (see
/// [`crate::models::Outcome`]). Only a malformed configuration or a surface that
/// reports an unusable geometry is surfaced as an error.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CarouselError {
    #[error("Carousel has no slides")]
    EmptyCarousel,

    #[error("Viewport width must be a positive finite number, got {0}")]
    InvalidViewportWidth(f64),

    #[error("Animation duration must be greater than zero")]
    ZeroAnimationDuration,

    #[error("Auto-play is enabled but the auto-play duration is zero")]
    ZeroAutoPlayDuration,

    #[error("Invalid container id: {0:?}")]
    InvalidContainerId(String),
}
