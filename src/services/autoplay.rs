use std::time::{Duration, Instant};

/// Single periodic timer that requests an advance when it fires.
///
/// There is never more than one pending deadline: arming replaces it and
/// suspending clears it.
#[derive(Debug)]
pub struct AutoplayScheduler {
    enabled: bool,
    period: Duration,
    next_tick: Option<Instant>,
}

impl AutoplayScheduler {
    pub fn new(enabled: bool, period: Duration) -> Self {
        Self {
            enabled,
            period,
            next_tick: None,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_armed(&self) -> bool {
        self.next_tick.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.next_tick
    }

    /// Schedule the next tick one period from `now`. No-op when disabled.
    pub fn arm(&mut self, now: Instant) -> bool {
        if !self.enabled {
            return false;
        }
        self.next_tick = Some(now + self.period);
        true
    }

    /// Cancel the pending tick. Returns whether one was pending.
    pub fn suspend(&mut self) -> bool {
        self.next_tick.take().is_some()
    }

    /// Consume a due tick, re-arming the interval.
    pub fn take_due(&mut self, now: Instant) -> bool {
        match self.next_tick {
            Some(deadline) if deadline <= now => {
                self.next_tick = Some(now + self.period);
                true
            }
            _ => false,
        }
    }

    /// Stop for good. Teardown only.
    pub fn disable(&mut self) {
        self.enabled = false;
        self.next_tick = None;
    }
}
