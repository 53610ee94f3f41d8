#![forbid(unsafe_code)]

//! Scrollspy: which section currently occupies the reference line.
//!
//! On every scroll or resize tick the [`ViewportTracker`] walks its registry
//! in order and reads each section's viewport-relative rectangle. The first
//! rectangle crossing the horizontal reference line becomes active.
//!
//! # Invariants
//!
//! 1. Exactly one section is active at all times; before any match it is the
//!    first registered section.
//! 2. First match wins: on a shared border both neighbours span the line and
//!    the earlier one is chosen.
//! 3. Zero-height and unmounted sections never match.
//! 4. If no section matches, the previous active section is kept, so the
//!    highlight does not flicker across gaps between sections.
//! 5. `update` is idempotent: the same geometry yields the same result.
//!
//! # Failure Modes
//!
//! None. Missing geometry is a non-match, not an error.

use folio_core::geometry::Rect;

use crate::registry::{Section, SectionId, SectionRegistry};
use crate::source::GeometrySource;

/// First index in `rects` whose rectangle spans `reference_line`.
///
/// `None` entries (unmounted anchors) and degenerate rectangles are skipped.
#[must_use]
pub fn locate_active<I>(rects: I, reference_line: f64) -> Option<usize>
where
    I: IntoIterator<Item = Option<Rect>>,
{
    rects
        .into_iter()
        .position(|rect| rect.is_some_and(|r| r.spans_line(reference_line)))
}

/// Outcome of one tracker tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackerUpdate {
    /// Active index before the tick.
    pub previous: usize,
    /// Active index after the tick.
    pub active: usize,
    /// Whether any section matched (false means the previous one was kept).
    pub matched: bool,
}

impl TrackerUpdate {
    /// True when the active section moved.
    #[must_use]
    pub const fn changed(&self) -> bool {
        self.previous != self.active
    }
}

/// Tracks the active section for a fixed registry.
#[derive(Debug, Clone)]
pub struct ViewportTracker {
    registry: SectionRegistry,
    reference_line: f64,
    active: usize,
}

impl ViewportTracker {
    /// Create a tracker; the first section starts active.
    #[must_use]
    pub fn new(registry: SectionRegistry, reference_line: f64) -> Self {
        Self {
            registry,
            reference_line,
            active: 0,
        }
    }

    #[must_use]
    pub const fn registry(&self) -> &SectionRegistry {
        &self.registry
    }

    /// Reference line in pixels from the viewport top.
    #[must_use]
    pub const fn reference_line(&self) -> f64 {
        self.reference_line
    }

    #[must_use]
    pub const fn active_index(&self) -> usize {
        self.active
    }

    #[must_use]
    pub fn active_section(&self) -> &Section {
        self.registry.get(self.active).unwrap_or(self.registry.first())
    }

    #[must_use]
    pub fn active_id(&self) -> &SectionId {
        self.active_section().id()
    }

    /// Re-evaluate the active section against current geometry.
    pub fn update<G: GeometrySource + ?Sized>(&mut self, source: &G) -> TrackerUpdate {
        let previous = self.active;
        let found = locate_active(
            self.registry.iter().map(|s| source.rect(s.anchor())),
            self.reference_line,
        );
        if let Some(index) = found {
            self.active = index;
        }
        let update = TrackerUpdate {
            previous,
            active: self.active,
            matched: found.is_some(),
        };
        #[cfg(feature = "tracing")]
        {
            if update.changed() {
                self.log_switch(previous);
            }
        }
        update
    }

    /// Force the active section, e.g. when a nav entry is clicked.
    ///
    /// Returns false (and changes nothing) for an unknown id.
    pub fn select(&mut self, id: &str) -> bool {
        match self.registry.index_of(id) {
            Some(index) => {
                self.active = index;
                true
            }
            None => false,
        }
    }

    #[cfg(feature = "tracing")]
    fn log_switch(&self, previous: usize) {
        let from = self
            .registry
            .get(previous)
            .map_or("", |s| s.id().as_str());
        tracing::debug!(
            message = "scrollspy.switch",
            from,
            to = self.active_id().as_str(),
            reference_line = self.reference_line
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Anchor;
    use std::collections::BTreeMap;

    /// Three 800px sections stacked from document y=0, scrolled by `scroll_y`.
    fn stacked(scroll_y: f64) -> BTreeMap<Anchor, Rect> {
        ["home", "about", "projects"]
            .iter()
            .enumerate()
            .map(|(i, id)| {
                let top = i as f64 * 800.0 - scroll_y;
                (Anchor::new(format!("{id}-section")), Rect::band(top, top + 800.0))
            })
            .collect()
    }

    fn tracker() -> ViewportTracker {
        let registry = SectionRegistry::from_ids(["home", "about", "projects"]).unwrap();
        ViewportTracker::new(registry, 300.0)
    }

    #[test]
    fn first_section_is_active_before_any_tick() {
        assert_eq!(tracker().active_id().as_str(), "home");
    }

    #[test]
    fn scroll_moves_active_section() {
        let mut spy = tracker();
        let update = spy.update(&stacked(0.0));
        assert_eq!(spy.active_id().as_str(), "home");
        assert!(!update.changed());

        let update = spy.update(&stacked(700.0));
        assert_eq!(spy.active_id().as_str(), "about");
        assert!(update.changed());
        assert!(update.matched);
    }

    #[test]
    fn shared_border_prefers_earlier_section() {
        // home spans -500..300, about spans 300..1100: both touch the line.
        let mut spy = tracker();
        spy.update(&stacked(500.0));
        assert_eq!(spy.active_id().as_str(), "home");
    }

    #[test]
    fn no_match_keeps_previous() {
        let mut spy = tracker();
        spy.update(&stacked(700.0));
        assert_eq!(spy.active_id().as_str(), "about");

        // Everything scrolled far past the line.
        let update = spy.update(&stacked(10_000.0));
        assert!(!update.matched);
        assert!(!update.changed());
        assert_eq!(spy.active_id().as_str(), "about");
    }

    #[test]
    fn zero_height_and_unmounted_are_skipped() {
        let mut geometry = BTreeMap::new();
        geometry.insert(Anchor::new("home-section"), Rect::band(300.0, 300.0));
        geometry.insert(Anchor::new("projects-section"), Rect::band(0.0, 900.0));
        // about-section is not mounted.
        let mut spy = tracker();
        spy.update(&geometry);
        assert_eq!(spy.active_id().as_str(), "projects");
    }

    #[test]
    fn update_is_idempotent() {
        let mut spy = tracker();
        let geometry = stacked(1234.0);
        let first = spy.update(&geometry);
        let second = spy.update(&geometry);
        assert_eq!(first.active, second.active);
        assert!(!second.changed());
    }

    #[test]
    fn select_by_id() {
        let mut spy = tracker();
        assert!(spy.select("projects"));
        assert_eq!(spy.active_index(), 2);
        assert!(!spy.select("blog"));
        assert_eq!(spy.active_index(), 2);
    }

    #[test]
    fn locate_active_is_pure() {
        let rects = [None, Some(Rect::band(0.0, 0.0)), Some(Rect::band(0.0, 500.0))];
        assert_eq!(locate_active(rects, 300.0), Some(2));
        assert_eq!(locate_active(rects, 600.0), None);
    }
}
