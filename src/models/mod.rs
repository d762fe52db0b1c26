// Data models for the carousel
//
// This module contains the plain data types shared by the core components:
// - CarouselState: snapshot of the index/transition/drag state
// - Config: carousel, window, slide, and logging settings loaded from YAML
// - Input: raw input events, navigation actions, and command outcomes

pub mod carousel_state;
pub mod config;
pub mod error;
pub mod input;

pub use carousel_state::{CarouselState, DragSession, TransitionToken};
pub use self::config::{AppConfig, CarouselConfig, LoggingSettings, SlideSpec, WindowSettings};
pub use error::CarouselError;
pub use input::{DropReason, InputEvent, NavAction, Outcome};
