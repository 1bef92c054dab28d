use std::time::{Duration, Instant};

/// Stroke fraction of the progress ring, interpolated over wall-clock time.
/// Once finished it holds its target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressAnimation {
    from: f64,
    to: f64,
    started: Instant,
    duration: Duration,
}

impl ProgressAnimation {
    pub fn idle(value: f64, now: Instant) -> Self {
        let value = value.clamp(0.0, 1.0);
        Self {
            from: value,
            to: value,
            started: now,
            duration: Duration::ZERO,
        }
    }

    /// Starts at `from` when given, otherwise at the value presented at `now`.
    pub fn animate_to(&mut self, from: Option<f64>, target: f64, duration: Duration, now: Instant) {
        self.from = from.map_or_else(|| self.value_at(now), |v| v.clamp(0.0, 1.0));
        self.to = target.clamp(0.0, 1.0);
        self.started = now;
        self.duration = duration;
    }

    pub fn value_at(&self, now: Instant) -> f64 {
        if self.duration.is_zero() {
            return self.to;
        }
        let elapsed = now.saturating_duration_since(self.started).as_secs_f64();
        let t = (elapsed / self.duration.as_secs_f64()).clamp(0.0, 1.0);
        self.from + (self.to - self.from) * t
    }

    pub fn target(&self) -> f64 {
        self.to
    }
}
