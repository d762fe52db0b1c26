// GUI Controller - Bridges the Slint window with the carousel driver
//
// This module contains the GuiController which coordinates between:
// - Slint UI (MainWindow)
// - SlintSurface (the carousel's rendering surface)
// - CarouselDriver (the task that owns the carousel)
// - EventLoopBridge (driver/GUI coordination)
//
// It handles:
// - Populating the window from AppConfig
// - Forwarding pointer input and navigation clicks to the driver
// - Subscribing to carousel events → position label updates
// - Shutting the driver down when the window closes

use super::bridge::EventLoopBridge;
use super::surface::SlintSurface;
use super::{MainWindow, SlideData};
use crate::driver::{CarouselDriver, CarouselHandle};
use crate::metrics::Metrics;
use crate::models::{AppConfig, InputEvent, NavAction, SlideSpec};
use crate::services::PaddedSequence;
use crate::state::{Carousel, CarouselEvent};
use anyhow::{Context, Result};
use slint::{Color, ComponentHandle, ModelRc, VecModel};
use std::rc::Rc;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::broadcast;

/// Fallback background for slides whose color failed to parse
const FALLBACK_RGB: (u8, u8, u8) = (0x33, 0x33, 0x33);

/// GUI Controller that wires the Slint window to a running carousel
///
/// # Example
/// ```ignore
/// let runtime = tokio::runtime::Runtime::new()?;
/// let controller = GuiController::new(&app_config, runtime.handle().clone())?;
/// let handle = controller.handle();
/// controller.run()?;  // Blocks until window is closed
/// handle.shutdown();
/// ```
pub struct GuiController {
    /// The Slint UI window
    ui: MainWindow,

    /// Event loop bridge; keeps the UI update thread alive
    _bridge: EventLoopBridge<MainWindow>,

    /// Command side of the carousel driver
    handle: CarouselHandle,
}

impl GuiController {
    /// Create the window, build the carousel on a [`SlintSurface`], and spawn its
    /// driver on `tokio_handle`.
    ///
    /// # Errors
    ///
    /// Fails if the configuration is invalid, the Slint window cannot be created, or
    /// the carousel rejects the surface geometry.
    pub fn new(config: &AppConfig, tokio_handle: tokio::runtime::Handle) -> Result<Self> {
        config
            .validate()
            .context("Invalid carousel configuration")?;

        let ui = MainWindow::new().context("Failed to create Slint UI")?;

        let width = config.window.width as f32;
        let height = config.window.height as f32;
        let total = config.slides.len();

        ui.set_window_title(format!("Loop Carousel - {}", config.carousel.container_id).into());
        ui.set_viewport_width(width);
        ui.set_viewport_height(height);
        ui.set_animation_duration(
            i64::try_from(config.carousel.animation_duration_ms).unwrap_or(i64::MAX),
        );
        ui.set_slides(ModelRc::from(Rc::new(VecModel::from(slide_models(
            &config.slides,
        )))));
        ui.set_position_label(position_label(1, total).into());

        let bridge = EventLoopBridge::new(&ui, tokio_handle.clone());
        let surface = SlintSurface::new(
            bridge.clone_handle(),
            f64::from(width),
            f64::from(height),
            total,
        )
        .with_navigation(config.window.show_navigation);

        let carousel = Carousel::new(&config.carousel, surface, Instant::now())
            .context("Failed to initialize carousel")?;

        Self::setup_event_subscription(&bridge, carousel.subscribe(), total);

        let (handle, _task) = CarouselDriver::spawn(carousel, &tokio_handle);

        Self::setup_callbacks(&ui, &handle);

        tracing::info!("GUI controller initialized");

        Ok(Self {
            ui,
            _bridge: bridge,
            handle,
        })
    }

    /// Run the GUI (blocks until window is closed)
    pub fn run(self) -> Result<(), slint::PlatformError> {
        tracing::info!("Starting GUI event loop");
        self.ui.run()
    }

    pub fn handle(&self) -> CarouselHandle {
        self.handle.clone()
    }

    pub fn metrics(&self) -> Arc<Metrics> {
        self.handle.metrics()
    }

    /// Forward raw pointer input and navigation clicks to the driver.
    ///
    /// The desktop backend reports mouse and touch alike as pointer events, so only
    /// the pointer variants of [`InputEvent`] are produced here.
    fn setup_callbacks(ui: &MainWindow, handle: &CarouselHandle) {
        let h = handle.clone();
        ui.on_pointer_down(move |x, _y| {
            h.send_input(InputEvent::PointerDown { x: f64::from(x) });
        });

        let h = handle.clone();
        ui.on_pointer_move(move |x, _y| {
            h.send_input(InputEvent::PointerMove { x: f64::from(x) });
        });

        let h = handle.clone();
        ui.on_pointer_up(move |x, _y| {
            h.send_input(InputEvent::PointerUp { x: f64::from(x) });
        });

        let h = handle.clone();
        ui.on_pointer_leave(move || {
            h.send_input(InputEvent::PointerLeave);
        });

        let h = handle.clone();
        ui.on_navigate_previous(move || {
            h.navigate(NavAction::Retreat);
        });

        let h = handle.clone();
        ui.on_navigate_next(move || {
            h.navigate(NavAction::Advance);
        });

        let h = handle.clone();
        ui.window().on_close_requested(move || {
            tracing::info!("Window close requested - stopping carousel driver");
            h.shutdown();
            slint::CloseRequestResponse::HideWindow
        });
    }

    /// Keep the position label in step with the slide being animated to
    fn setup_event_subscription(
        bridge: &EventLoopBridge<MainWindow>,
        mut events: broadcast::Receiver<CarouselEvent>,
        total: usize,
    ) {
        let ui_handle = bridge.clone_handle();
        let padding = PaddedSequence::new(total);

        bridge.spawn_async(move || async move {
            loop {
                match events.recv().await {
                    Ok(CarouselEvent::TransitionStarted { target_index, .. }) => {
                        let shown = padding
                            .displayed_slide(target_index)
                            .unwrap_or(target_index);
                        let label = position_label(shown, total);
                        ui_handle.update_ui(move |ui| ui.set_position_label(label.into()));
                    }
                    Ok(CarouselEvent::TornDown) => break,
                    Ok(_) => {}
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        tracing::warn!("Carousel event subscriber lagged by {} events", skipped);
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
            tracing::debug!("Carousel event subscriber stopped");
        });
    }
}

fn position_label(shown: usize, total: usize) -> String {
    format!("{} / {}", shown, total)
}

fn slide_models(slides: &[SlideSpec]) -> Vec<SlideData> {
    slides
        .iter()
        .map(|slide| {
            let (r, g, b) = slide.rgb().unwrap_or(FALLBACK_RGB);
            SlideData {
                title: slide.title.as_str().into(),
                caption: slide.caption.as_str().into(),
                background: Color::from_rgb_u8(r, g, b),
            }
        })
        .collect()
}
