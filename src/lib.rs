// Loop Carousel - An infinitely looping, draggable slide carousel
//
// This is the library crate containing the carousel state machine, its tokio driver,
// and the Slint demo host. The binary crate (main.rs) provides the GUI entry point.

pub mod config;
pub mod driver;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod services;
pub mod state;
pub mod surface;
pub mod ui;

// Re-export commonly used types for convenience
pub use crate::config::ConfigManager;
pub use driver::{CarouselDriver, CarouselHandle};
pub use models::{AppConfig, CarouselConfig, CarouselError, InputEvent, NavAction, Outcome};
pub use state::{Carousel, CarouselEvent};
pub use surface::{RecordingSurface, RenderingSurface};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
