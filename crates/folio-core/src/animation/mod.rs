#![forbid(unsafe_code)]

//! Time-driven animation primitives.
//!
//! Animations advance only when the host calls [`Animation::tick`] with an
//! elapsed duration, which keeps them deterministic under test and under
//! session replay.

mod count_up;

pub use count_up::{COUNT_UP_DURATION, CountUp};

use std::time::Duration;

/// A value that evolves with elapsed time.
pub trait Animation {
    /// Advance by `dt`.
    fn tick(&mut self, dt: Duration);

    /// True once the animation reached its end state.
    fn is_complete(&self) -> bool;

    /// Normalized progress in `[0.0, 1.0]`.
    fn value(&self) -> f32;

    /// Return to the initial state.
    fn reset(&mut self);

    /// Time accumulated past completion.
    fn overshoot(&self) -> Duration {
        Duration::ZERO
    }
}

/// Linear progress of `elapsed` through `duration`, clamped to `[0, 1]`.
///
/// A zero duration is complete immediately.
#[must_use]
pub fn progress(elapsed: Duration, duration: Duration) -> f64 {
    if duration.is_zero() {
        return 1.0;
    }
    (elapsed.as_secs_f64() / duration.as_secs_f64()).clamp(0.0, 1.0)
}
