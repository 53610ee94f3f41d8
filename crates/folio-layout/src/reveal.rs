#![forbid(unsafe_code)]

//! Scroll-triggered reveal.
//!
//! Sections fade in once enough of them is on screen. A [`RevealTrigger`]
//! compares the visible fraction of an element against a threshold; with
//! `once` set it latches after the first reveal, so scrolling back up does not
//! replay the entrance animation.

use folio_core::geometry::Rect;

/// Visible fraction that reveals the resume and project sections.
pub const SECTION_REVEAL_RATIO: f64 = 0.1;

/// Visible fraction that starts the statistics counters.
pub const COUNTER_REVEAL_RATIO: f64 = 0.3;

/// Visibility latch for one element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealTrigger {
    ratio: f64,
    once: bool,
    revealed: bool,
}

impl RevealTrigger {
    /// Trigger at `ratio` visible (clamped to `0..=1`), re-arming when the
    /// element leaves the viewport.
    #[must_use]
    pub fn new(ratio: f64) -> Self {
        Self {
            ratio: ratio.clamp(0.0, 1.0),
            once: false,
            revealed: false,
        }
    }

    /// Trigger at `ratio` and stay revealed afterwards.
    #[must_use]
    pub fn once(ratio: f64) -> Self {
        Self {
            once: true,
            ..Self::new(ratio)
        }
    }

    #[must_use]
    pub const fn is_revealed(&self) -> bool {
        self.revealed
    }

    /// Feed the element's current rectangle; returns whether it is revealed.
    ///
    /// An unmounted element (`None`) counts as not visible.
    pub fn observe(&mut self, rect: Option<Rect>, viewport_height: f64) -> bool {
        if self.once && self.revealed {
            return true;
        }
        let visible = rect.map_or(0.0, |r| r.visible_ratio(viewport_height));
        self.revealed = visible > 0.0 && visible >= self.ratio;
        self.revealed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reveals_at_ratio() {
        let mut trigger = RevealTrigger::new(COUNTER_REVEAL_RATIO);
        // 1000px element, 200px visible: 0.2 < 0.3.
        assert!(!trigger.observe(Some(Rect::band(600.0, 1600.0)), 800.0));
        // 400px visible: 0.4.
        assert!(trigger.observe(Some(Rect::band(400.0, 1400.0)), 800.0));
    }

    #[test]
    fn once_latches() {
        let mut trigger = RevealTrigger::once(SECTION_REVEAL_RATIO);
        assert!(trigger.observe(Some(Rect::band(0.0, 500.0)), 800.0));
        assert!(trigger.observe(None, 800.0));
        assert!(trigger.is_revealed());
    }

    #[test]
    fn rearms_without_once() {
        let mut trigger = RevealTrigger::new(SECTION_REVEAL_RATIO);
        assert!(trigger.observe(Some(Rect::band(0.0, 500.0)), 800.0));
        assert!(!trigger.observe(Some(Rect::band(-900.0, -400.0)), 800.0));
    }

    #[test]
    fn zero_ratio_still_needs_some_visibility() {
        let mut trigger = RevealTrigger::new(0.0);
        assert!(!trigger.observe(Some(Rect::band(900.0, 1000.0)), 800.0));
        assert!(trigger.observe(Some(Rect::band(790.0, 1000.0)), 800.0));
    }
}
