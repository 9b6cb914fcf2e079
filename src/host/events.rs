use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::Instant,
};

/// Outcome of draining the host's pending events.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HostSignal {
    Continue,
    Quit,
}

/// The host event loop, reduced to its only effect on playback: whether to stop.
pub trait HostEvents {
    /// Dispatch everything pending and report whether a quit was observed.
    ///
    /// `now` is the playback clock's reading for this tick.
    fn drain(&mut self, now: Instant) -> HostSignal;
}

impl<E: HostEvents + ?Sized> HostEvents for &mut E {
    fn drain(&mut self, now: Instant) -> HostSignal {
        (**self).drain(now)
    }
}

/// A host that never asks to quit.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoEvents;

impl HostEvents for NoEvents {
    fn drain(&mut self, _now: Instant) -> HostSignal {
        HostSignal::Continue
    }
}

/// Quit request that can be raised from anywhere, including another thread.
#[derive(Clone, Debug, Default)]
pub struct QuitFlag(Arc<AtomicBool>);

impl QuitFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_requested(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

impl HostEvents for QuitFlag {
    fn drain(&mut self, _now: Instant) -> HostSignal {
        if self.is_requested() {
            HostSignal::Quit
        } else {
            HostSignal::Continue
        }
    }
}

/// Quits once the playback clock reaches a deadline.
#[derive(Clone, Copy, Debug)]
pub struct QuitAt(pub Instant);

impl HostEvents for QuitAt {
    fn drain(&mut self, now: Instant) -> HostSignal {
        if now >= self.0 {
            HostSignal::Quit
        } else {
            HostSignal::Continue
        }
    }
}

/// Quits on the `n`-th drain (counting from one); `QuitAfter(0)` quits immediately.
#[derive(Clone, Copy, Debug)]
pub struct QuitAfter(pub u64);

impl HostEvents for QuitAfter {
    fn drain(&mut self, _now: Instant) -> HostSignal {
        if self.0 <= 1 {
            self.0 = 0;
            return HostSignal::Quit;
        }
        self.0 -= 1;
        HostSignal::Continue
    }
}

#[cfg(test)]
#[path = "../../tests/unit/host/events.rs"]
mod tests;
