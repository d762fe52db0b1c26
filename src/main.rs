//! Loop Carousel - Slint demo host for the looping carousel
//!
//! Main entry point for the GUI application.
//!
//! # Overview
//!
//! This binary wires the carousel library to a desktop window. It initializes:
//! - Configuration loading ([`ConfigManager`], `config/carousel.yaml` plus `CAROUSEL_*` overrides)
//! - Logging infrastructure (file rotation + console output)
//! - Tokio runtime (hosts the carousel driver task and event subscribers)
//! - GUI controller ([`GuiController`] - bridges the Slint window with the driver)
//!
//! The application uses a hybrid threading model:
//! - **Main thread**: Runs the Slint event loop (blocking, synchronous)
//! - **Tokio workers**: Run the carousel driver, its timers, and event subscribers
//! - **UI bridge thread**: Forwards surface updates onto the Slint event loop
//!
//! # Execution Flow
//!
//! 1. Load `config/carousel.yaml` (written with defaults on first run)
//! 2. Initialize logging → `<logging.directory>/<logging.prefix>.<date>`
//! 3. Create the tokio runtime
//! 4. Create GuiController (builds the carousel and spawns its driver)
//! 5. Run Slint event loop (blocks until window closed)
//! 6. Stop the driver, log the metrics summary, shut the runtime down

use anyhow::Result;
use loop_carousel::ui::GuiController;
use loop_carousel::{APP_NAME, ConfigManager, VERSION};
use std::time::Duration;

const CONFIG_DIR: &str = "config";
const WORKER_THREADS: usize = 2;

fn main() -> Result<()> {
    let config_manager = ConfigManager::new(CONFIG_DIR)?;
    let config = config_manager.load()?;

    // Held until the end of main so buffered log lines are flushed
    let _log_guard = loop_carousel::logging::setup_logging(&config.logging)?;

    tracing::info!("Starting {} v{}", APP_NAME, VERSION);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .worker_threads(WORKER_THREADS)
        .thread_name("carousel-worker")
        .build()?;

    tracing::info!(
        "Tokio runtime initialized with {} worker threads",
        WORKER_THREADS
    );

    let gui_controller = GuiController::new(&config, runtime.handle().clone())?;
    let handle = gui_controller.handle();
    let metrics = gui_controller.metrics();

    tracing::info!("GUI controller initialized, launching window");

    // Blocks until the window is closed
    let result = gui_controller.run();

    tracing::info!("GUI closed, shutting down");

    // The close handler normally stops the driver already
    if !handle.is_closed() {
        handle.shutdown();
    }

    runtime.shutdown_timeout(Duration::from_secs(2));

    metrics.log_summary();
    tracing::info!("Application shutdown complete");

    result.map_err(|e| {
        tracing::error!("GUI error: {}", e);
        anyhow::anyhow!("GUI error: {}", e)
    })
}
