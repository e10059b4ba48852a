//! Monotonic time source for pixel timing.

use std::{
    hint,
    time::{Duration, Instant},
};

pub trait Clock {
    /// Time since a fixed, arbitrary origin. Never goes backwards.
    fn now(&self) -> Duration;

    /// Busy-waits until `deadline` and returns the time it was reached.
    fn spin_until(&self, deadline: Duration) -> Duration {
        loop {
            let now = self.now();
            if now >= deadline {
                return now;
            }

            // Let the processor know that we are in a spin loop.
            hint::spin_loop();
        }
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> Duration {
        (**self).now()
    }

    fn spin_until(&self, deadline: Duration) -> Duration {
        (**self).spin_until(deadline)
    }
}

/// [`Instant`] based clock.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self { origin: Instant::now() }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}
