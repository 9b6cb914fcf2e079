use std::time::{Duration, Instant};

/// Monotonic time source plus the blocking wait used when no new frame is due.
pub trait Clock {
    fn now(&mut self) -> Instant;

    /// Block the playback thread for roughly `dur`.
    fn sleep(&mut self, dur: Duration);
}

/// [`Clock`] backed by `std::time::Instant` and `std::thread::sleep`.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&mut self) -> Instant {
        Instant::now()
    }

    fn sleep(&mut self, dur: Duration) {
        std::thread::sleep(dur);
    }
}

/// Deterministic [`Clock`] whose time only moves when told to.
///
/// `sleep` advances the clock by the requested duration; [`ManualClock::advance`] models work
/// that takes time (e.g. slow frames).
#[derive(Clone, Debug)]
pub struct ManualClock {
    origin: Instant,
    elapsed: Duration,
    step_per_now: Duration,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            elapsed: Duration::ZERO,
            step_per_now: Duration::ZERO,
        }
    }

    /// Advance automatically by `step` on every [`Clock::now`] call.
    pub fn with_step(mut self, step: Duration) -> Self {
        self.step_per_now = step;
        self
    }

    pub fn advance(&mut self, dur: Duration) {
        self.elapsed += dur;
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&mut self) -> Instant {
        let now = self.origin + self.elapsed;
        self.elapsed += self.step_per_now;
        now
    }

    fn sleep(&mut self, dur: Duration) {
        self.elapsed += dur;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/clock.rs"]
mod tests;
