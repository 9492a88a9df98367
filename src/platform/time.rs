//! Fixed-rate frame pacing

use std::time::{Duration, Instant};

use crate::tick_interval;

/// Tracks when the next simulation tick is due
#[derive(Debug, Clone, Copy)]
pub struct FrameClock {
    last_tick: Instant,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            last_tick: Instant::now(),
        }
    }

    /// Time left before the next tick at `speed` ticks per second
    pub fn time_until_tick(&self, speed: f32) -> Duration {
        tick_interval(speed).saturating_sub(self.last_tick.elapsed())
    }

    pub fn is_due(&self, speed: f32) -> bool {
        self.time_until_tick(speed).is_zero()
    }

    /// Record that a tick just ran
    pub fn mark(&mut self) {
        self.last_tick = Instant::now();
    }
}
