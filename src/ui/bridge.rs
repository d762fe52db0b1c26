// EventLoopBridge - Coordinates between the carousel driver and the Slint event loop
//
// The carousel runs on a tokio task while Slint widgets may only be touched from the
// Slint event loop thread. The bridge provides:
// - Surface updates from the driver task via upgrade_in_event_loop
// - Spawning async tasks (event subscribers) from the GUI thread
// - Ordered marshaling: updates are applied in the order they were queued

use slint::{ComponentHandle, Weak};
use std::future::Future;
use tokio::sync::mpsc;

/// Queue depth for pending UI updates. A drag produces one update per pointer move,
/// so this has to absorb a burst of moves while the event loop is busy painting.
const UI_UPDATE_CAPACITY: usize = 512;

type UiUpdate<T> = Box<dyn FnOnce(&T) + Send>;

/// Coordinates between the tokio runtime and the Slint event loop
///
/// # Example
/// ```ignore
/// let ui = MainWindow::new()?;
/// let bridge = EventLoopBridge::new(&ui, runtime.handle().clone());
/// let handle = bridge.clone_handle();
///
/// // From the driver task
/// handle.update_ui(move |ui| ui.set_translation(-800.0));
/// ```
pub struct EventLoopBridge<T: ComponentHandle> {
    /// Weak reference to the UI component to prevent circular references
    ui_weak: Weak<T>,

    /// Handle to the tokio runtime for spawning async tasks
    tokio_handle: tokio::runtime::Handle,

    /// Channel carrying UI updates to the handler thread
    ui_update_tx: mpsc::Sender<UiUpdate<T>>,
}

impl<T: ComponentHandle + 'static> EventLoopBridge<T> {
    /// Create a new EventLoopBridge
    ///
    /// Spawns a handler thread that forwards queued updates to the Slint event loop
    /// using `upgrade_in_event_loop`. The thread exits once the event loop is gone or
    /// every sender has been dropped.
    pub fn new(ui: &T, tokio_handle: tokio::runtime::Handle) -> Self {
        let ui_weak = ui.as_weak();
        let (ui_update_tx, mut ui_update_rx) = mpsc::channel::<UiUpdate<T>>(UI_UPDATE_CAPACITY);

        let ui_weak_clone = ui_weak.clone();
        std::thread::Builder::new()
            .name("carousel-ui-bridge".to_string())
            .spawn(move || {
                tracing::debug!("EventLoopBridge handler thread started");

                while let Some(update_fn) = ui_update_rx.blocking_recv() {
                    let result = ui_weak_clone.upgrade_in_event_loop(move |ui| {
                        update_fn(&ui);
                    });

                    if let Err(e) = result {
                        tracing::warn!("Failed to queue UI update to event loop: {:?}", e);
                        break;
                    }
                }

                tracing::debug!("EventLoopBridge handler thread terminated");
            })
            .map_err(|e| tracing::error!("Failed to spawn UI bridge thread: {}", e))
            .ok();

        Self {
            ui_weak,
            tokio_handle,
            ui_update_tx,
        }
    }

    /// Schedule a UI update from any thread
    pub fn update_ui<F>(&self, update: F)
    where
        F: FnOnce(&T) + Send + 'static,
    {
        queue_update(&self.ui_update_tx, Box::new(update));
    }

    /// Spawn an async task on the tokio runtime
    pub fn spawn_async<F, Fut>(&self, future_factory: F)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.tokio_handle.spawn(async move {
            future_factory().await;
        });
    }

    /// Lightweight cloneable handle for the surface and for event subscribers
    pub fn clone_handle(&self) -> EventLoopBridgeHandle<T> {
        EventLoopBridgeHandle {
            ui_weak: self.ui_weak.clone(),
            ui_update_tx: self.ui_update_tx.clone(),
        }
    }
}

/// Cloneable, `Send` half of an [`EventLoopBridge`]
pub struct EventLoopBridgeHandle<T: ComponentHandle> {
    ui_weak: Weak<T>,
    ui_update_tx: mpsc::Sender<UiUpdate<T>>,
}

// Manual Clone implementation to avoid requiring T: Clone
impl<T: ComponentHandle> Clone for EventLoopBridgeHandle<T> {
    fn clone(&self) -> Self {
        Self {
            ui_weak: self.ui_weak.clone(),
            ui_update_tx: self.ui_update_tx.clone(),
        }
    }
}

impl<T: ComponentHandle + 'static> EventLoopBridgeHandle<T> {
    /// Schedule a UI update from any thread
    ///
    /// See `EventLoopBridge::update_ui()` for details.
    pub fn update_ui<F>(&self, update: F)
    where
        F: FnOnce(&T) + Send + 'static,
    {
        queue_update(&self.ui_update_tx, Box::new(update));
    }

    pub fn ui_weak(&self) -> &Weak<T> {
        &self.ui_weak
    }
}

fn queue_update<T>(tx: &mpsc::Sender<UiUpdate<T>>, update: UiUpdate<T>) {
    match tx.try_send(update) {
        Ok(()) => {}
        Err(mpsc::error::TrySendError::Full(_)) => {
            tracing::warn!("UI update channel full - skipping update to prevent backpressure");
        }
        Err(mpsc::error::TrySendError::Closed(_)) => {
            tracing::warn!("Failed to send UI update - handler thread has stopped");
        }
    }
}
