use std::time::{Duration, Instant};

pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// One firing of the tick source, stamped with the run segment that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    segment: u64,
}

/// Recurring one-second tick generator, polled against a monotonic clock.
///
/// Every `start` opens a new segment and cancels the previous one, so a tick
/// handed out before a restart is recognisably stale afterwards.
#[derive(Debug)]
pub struct TickSource {
    segment: u64,
    next_due: Option<Instant>,
}

impl TickSource {
    pub fn new() -> Self {
        Self {
            segment: 0,
            next_due: None,
        }
    }

    pub fn start(&mut self, now: Instant) {
        self.stop();
        self.segment += 1;
        self.next_due = Some(now + TICK_PERIOD);
    }

    pub fn stop(&mut self) {
        self.next_due = None;
    }

    pub fn is_active(&self) -> bool {
        self.next_due.is_some()
    }

    /// True when `tick` came from the segment that is currently running.
    pub fn accepts(&self, tick: Tick) -> bool {
        self.is_active() && tick.segment == self.segment
    }

    /// Hands out at most one due tick. Call repeatedly to catch up after a stall.
    pub fn poll(&mut self, now: Instant) -> Option<Tick> {
        let due = self.next_due?;
        if now < due {
            return None;
        }
        self.next_due = Some(due + TICK_PERIOD);
        Some(Tick {
            segment: self.segment,
        })
    }

    pub fn time_until_next(&self, now: Instant) -> Option<Duration> {
        self.next_due.map(|due| due.saturating_duration_since(now))
    }
}

impl Default for TickSource {
    fn default() -> Self {
        Self::new()
    }
}
