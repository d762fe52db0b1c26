// UI module - Slint demo host for the carousel
//
// This module contains:
// - EventLoopBridge: Marshals surface updates from the driver task onto the Slint event loop
// - SlintSurface: RenderingSurface implementation backed by the Slint window
// - GuiController: Builds the window, the carousel, and its driver, and wires input

// Include the generated Slint code (MainWindow, SlideData)
slint::include_modules!();

pub mod bridge;
pub mod controller;
pub mod surface;

pub use bridge::{EventLoopBridge, EventLoopBridgeHandle};
pub use controller::GuiController;
pub use surface::SlintSurface;
