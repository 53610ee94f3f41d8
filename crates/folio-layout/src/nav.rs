#![forbid(unsafe_code)]

//! Top navigation bar state and click-to-scroll targets.

use folio_core::geometry::Rect;

/// True once the page scrolled past `threshold` (compact nav style).
#[inline]
#[must_use]
pub fn nav_scrolled(scroll_y: f64, threshold: f64) -> bool {
    scroll_y > threshold
}

/// Document scroll offset that brings `target` just below the nav bar.
///
/// `target` is the anchor's current viewport-relative rectangle and
/// `scroll_y` the current document offset; `offset` is the space left above
/// the target. Returns `None` when the anchor is not mounted. The result is
/// never negative.
#[must_use]
pub fn scroll_target(target: Option<Rect>, scroll_y: f64, offset: f64) -> Option<f64> {
    let rect = target?;
    let document_top = rect.top + scroll_y;
    Some((document_top - offset).max(0.0))
}

/// Collapsible menu shown on narrow viewports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NavMenu {
    open: bool,
}

impl NavMenu {
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open
    }

    /// Hamburger button pressed.
    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    /// An entry was chosen; the menu closes.
    pub fn close(&mut self) {
        self.open = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scrolled_is_strictly_past_threshold() {
        assert!(!nav_scrolled(150.0, 150.0));
        assert!(nav_scrolled(150.5, 150.0));
        assert!(!nav_scrolled(0.0, 150.0));
    }

    #[test]
    fn target_accounts_for_current_scroll() {
        // Section is 400px below the viewport top while scrolled 1000px.
        let target = scroll_target(Some(Rect::band(400.0, 1200.0)), 1000.0, 70.0);
        assert_eq!(target, Some(1330.0));
    }

    #[test]
    fn target_never_negative() {
        let target = scroll_target(Some(Rect::band(20.0, 800.0)), 0.0, 70.0);
        assert_eq!(target, Some(0.0));
    }

    #[test]
    fn unmounted_target_is_none() {
        assert_eq!(scroll_target(None, 500.0, 70.0), None);
    }

    #[test]
    fn menu_toggles_and_closes() {
        let mut menu = NavMenu::default();
        menu.toggle();
        assert!(menu.is_open());
        menu.close();
        assert!(!menu.is_open());
    }
}
