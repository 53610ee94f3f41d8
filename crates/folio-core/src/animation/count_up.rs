#![forbid(unsafe_code)]

//! Count-up ramp for statistic counters.
//!
//! A [`CountUp`] shows `floor(end * progress)` while running and lands exactly
//! on `end` when complete, so the final frame never displays an off-by-one
//! value caused by float rounding.

use std::time::Duration;

use super::{Animation, progress};

/// Ramp length used by the statistics strip.
pub const COUNT_UP_DURATION: Duration = Duration::from_millis(2000);

/// Integer counter ramping from zero to a target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountUp {
    end: u32,
    duration: Duration,
    elapsed: Duration,
}

impl CountUp {
    /// Counter ramping to `end` over [`COUNT_UP_DURATION`].
    #[must_use]
    pub const fn new(end: u32) -> Self {
        Self::with_duration(end, COUNT_UP_DURATION)
    }

    /// Counter ramping to `end` over `duration`.
    #[must_use]
    pub const fn with_duration(end: u32, duration: Duration) -> Self {
        Self {
            end,
            duration,
            elapsed: Duration::ZERO,
        }
    }

    /// Target value.
    #[must_use]
    pub const fn end(&self) -> u32 {
        self.end
    }

    /// Value to display right now.
    #[must_use]
    pub fn current(&self) -> u32 {
        if self.is_complete() {
            return self.end;
        }
        let p = progress(self.elapsed, self.duration);
        (f64::from(self.end) * p).floor() as u32
    }
}

impl Animation for CountUp {
    fn tick(&mut self, dt: Duration) {
        self.elapsed = self.elapsed.saturating_add(dt);
    }

    fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }

    fn value(&self) -> f32 {
        progress(self.elapsed, self.duration) as f32
    }

    fn reset(&mut self) {
        self.elapsed = Duration::ZERO;
    }

    fn overshoot(&self) -> Duration {
        self.elapsed.saturating_sub(self.duration)
    }
}
