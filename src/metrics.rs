// Carousel metrics module
//
// Provides lightweight counters for monitoring carousel activity

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Carousel activity metrics
///
/// Uses atomic operations so the driver task can record while the UI thread or
/// `main` reads. Shared as `Arc<Metrics>` between the engine and its owner and
/// logged on shutdown.
#[derive(Debug)]
pub struct Metrics {
    /// Transitions handed to the transition controller
    pub transitions_started: AtomicU64,

    /// Transitions whose completion deadline passed
    pub transitions_completed: AtomicU64,

    /// Silent index rewrites from a clone position to a real slide
    pub wraparounds: AtomicU64,

    pub drags_started: AtomicU64,

    /// Drags released past the commit threshold
    pub drag_commits: AtomicU64,

    /// Drags released inside the commit threshold
    pub snap_backs: AtomicU64,

    pub autoplay_ticks: AtomicU64,

    /// Commands dropped by a guard (busy, dragging, torn down)
    pub commands_dropped: AtomicU64,

    /// Input events dropped because the driver channel was full or closed
    pub input_dropped: AtomicU64,

    /// Creation time
    start_time: Instant,
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            transitions_started: AtomicU64::new(0),
            transitions_completed: AtomicU64::new(0),
            wraparounds: AtomicU64::new(0),
            drags_started: AtomicU64::new(0),
            drag_commits: AtomicU64::new(0),
            snap_backs: AtomicU64::new(0),
            autoplay_ticks: AtomicU64::new(0),
            commands_dropped: AtomicU64::new(0),
            input_dropped: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    pub fn record_transition_started(&self) {
        self.transitions_started.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_transition_completed(&self) {
        self.transitions_completed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_wraparound(&self) {
        self.wraparounds.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_drag_started(&self) {
        self.drags_started.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_drag_commit(&self) {
        self.drag_commits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_snap_back(&self) {
        self.snap_backs.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_autoplay_tick(&self) {
        self.autoplay_ticks.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_command_dropped(&self) {
        self.commands_dropped.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_input_dropped(&self) {
        self.input_dropped.fetch_add(1, Ordering::Relaxed);
    }

    /// Get total uptime
    pub fn uptime(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Share of released drags that committed, in `[0, 1]`
    pub fn commit_ratio(&self) -> f64 {
        let commits = self.drag_commits.load(Ordering::Relaxed);
        let total = commits + self.snap_backs.load(Ordering::Relaxed);
        if total > 0 {
            commits as f64 / total as f64
        } else {
            0.0
        }
    }

    /// Log metrics summary
    pub fn log_summary(&self) {
        tracing::info!("=== Carousel Metrics Summary ===");
        tracing::info!("Uptime: {:.2}s", self.uptime().as_secs_f64());
        tracing::info!(
            "Transitions: {} started, {} completed, {} wraparounds",
            self.transitions_started.load(Ordering::Relaxed),
            self.transitions_completed.load(Ordering::Relaxed),
            self.wraparounds.load(Ordering::Relaxed)
        );
        tracing::info!(
            "Drags: {} started, {} committed, {} snapped back (commit ratio {:.2})",
            self.drags_started.load(Ordering::Relaxed),
            self.drag_commits.load(Ordering::Relaxed),
            self.snap_backs.load(Ordering::Relaxed),
            self.commit_ratio()
        );
        tracing::info!(
            "Autoplay ticks: {}, dropped commands: {}, dropped input: {}",
            self.autoplay_ticks.load(Ordering::Relaxed),
            self.commands_dropped.load(Ordering::Relaxed),
            self.input_dropped.load(Ordering::Relaxed)
        );
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
