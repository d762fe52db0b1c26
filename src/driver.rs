// Carousel driver - the single execution context that owns a Carousel
//
// Hosts never touch the Carousel directly. They hold a CarouselHandle and send
// commands over a bounded channel; one tokio task receives them, applies them in
// order, and sleeps until the carousel's next timer deadline in between. Because
// that task is the only owner, no lock guards the carousel state.

use crate::metrics::Metrics;
use crate::models::{InputEvent, NavAction};
use crate::state::{Carousel, CarouselEvent};
use crate::surface::RenderingSurface;
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;

/// Capacity of the command channel. Pointer moves are the bulk of the traffic.
const COMMAND_CHANNEL_CAPACITY: usize = 256;

/// Messages accepted by the driver task
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DriverCommand {
    Input(InputEvent),
    Navigate(NavAction),
    Shutdown,
}

/// Cloneable sender side of a running driver.
///
/// Safe to use from any thread, including Slint callbacks: sending never blocks.
/// When the channel is full the command is dropped with a warning, the same way
/// a carousel drops commands while busy.
#[derive(Clone, Debug)]
pub struct CarouselHandle {
    command_tx: mpsc::Sender<DriverCommand>,
    events_tx: broadcast::Sender<CarouselEvent>,
    metrics: Arc<Metrics>,
}

impl CarouselHandle {
    pub fn send_input(&self, event: InputEvent) -> bool {
        self.send(DriverCommand::Input(event))
    }

    pub fn navigate(&self, action: NavAction) -> bool {
        self.send(DriverCommand::Navigate(action))
    }

    /// Ask the driver to tear the carousel down and stop
    pub fn shutdown(&self) -> bool {
        self.send(DriverCommand::Shutdown)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<CarouselEvent> {
        self.events_tx.subscribe()
    }

    pub fn metrics(&self) -> Arc<Metrics> {
        Arc::clone(&self.metrics)
    }

    pub fn is_closed(&self) -> bool {
        self.command_tx.is_closed()
    }

    fn send(&self, command: DriverCommand) -> bool {
        match self.command_tx.try_send(command) {
            Ok(()) => true,
            Err(mpsc::error::TrySendError::Full(command)) => {
                self.metrics.record_input_dropped();
                tracing::warn!("Carousel command channel full - dropping {:?}", command);
                false
            }
            Err(mpsc::error::TrySendError::Closed(command)) => {
                self.metrics.record_input_dropped();
                tracing::warn!("Carousel driver has stopped - dropping {:?}", command);
                false
            }
        }
    }
}

/// Owns a [`Carousel`] and runs it as one tokio task.
///
/// # Example
/// ```ignore
/// let carousel = Carousel::new(&config, surface, Instant::now())?;
/// let (handle, task) = CarouselDriver::spawn(carousel, runtime.handle());
///
/// handle.navigate(NavAction::Advance);
/// handle.shutdown();
/// let carousel = task.await?;
/// ```
pub struct CarouselDriver<S: RenderingSurface> {
    carousel: Carousel<S>,
    command_rx: mpsc::Receiver<DriverCommand>,
}

impl<S: RenderingSurface + 'static> CarouselDriver<S> {
    pub fn new(carousel: Carousel<S>) -> (Self, CarouselHandle) {
        let (command_tx, command_rx) = mpsc::channel(COMMAND_CHANNEL_CAPACITY);
        let handle = CarouselHandle {
            command_tx,
            events_tx: carousel.event_sender(),
            metrics: carousel.metrics(),
        };
        (
            Self {
                carousel,
                command_rx,
            },
            handle,
        )
    }

    /// Spawn the driver onto `runtime`. The task returns the torn-down carousel
    /// once shut down.
    pub fn spawn(
        carousel: Carousel<S>,
        runtime: &tokio::runtime::Handle,
    ) -> (CarouselHandle, JoinHandle<Carousel<S>>) {
        let (driver, handle) = Self::new(carousel);
        let task = runtime.spawn(driver.run());
        (handle, task)
    }

    /// Process commands and timers until shutdown or until every handle is dropped.
    pub async fn run(mut self) -> Carousel<S> {
        tracing::debug!("Carousel driver started for '{}'", self.carousel.container_id());

        loop {
            let deadline = self.carousel.next_deadline();

            tokio::select! {
                biased;

                command = self.command_rx.recv() => {
                    let now = now();
                    // Timers due at this instant fire before the command is applied
                    self.carousel.poll_timers(now);

                    match command {
                        Some(DriverCommand::Input(event)) => {
                            self.carousel.handle_input(event, now);
                        }
                        Some(DriverCommand::Navigate(action)) => {
                            self.carousel.navigate(action, now);
                        }
                        Some(DriverCommand::Shutdown) | None => break,
                    }
                }

                () = sleep_until_deadline(deadline) => {
                    self.carousel.poll_timers(now());
                }
            }
        }

        self.carousel.teardown();
        tracing::debug!("Carousel driver stopped");
        self.carousel
    }
}

fn now() -> std::time::Instant {
    tokio::time::Instant::now().into_std()
}

async fn sleep_until_deadline(deadline: Option<std::time::Instant>) {
    match deadline {
        Some(deadline) => {
            tokio::time::sleep_until(tokio::time::Instant::from_std(deadline)).await;
        }
        None => std::future::pending().await,
    }
}
