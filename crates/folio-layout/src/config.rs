#![forbid(unsafe_code)]

//! Named scroll thresholds.
//!
//! The page uses several unrelated pixel lines: when the top nav bar turns
//! compact, where each scrollspy samples, where the side panel pins, and how
//! far a nav click lands above its target. [`ScrollConfig`] names all of them
//! in one place.
//!
//! Values can be overridden from the environment:
//!
//! | Variable                           | Field                          |
//! |------------------------------------|--------------------------------|
//! | `FOLIO_NAV_SCROLLED_AT_PX`         | `nav_scrolled_at`              |
//! | `FOLIO_PAGE_SPY_LINE_PX`           | `page_spy_line`                |
//! | `FOLIO_PANEL_SPY_LINE_PX`          | `panel_spy_line`               |
//! | `FOLIO_NAV_OFFSET_PX`              | `nav_offset`                   |
//! | `FOLIO_PANEL_NAV_OFFSET_PX`        | `panel_nav_offset`             |
//! | `FOLIO_STICKY_THRESHOLD_PX`        | `sticky.activation_threshold`  |
//! | `FOLIO_STICKY_TRAILING_MARGIN_PX`  | `sticky.trailing_margin`       |
//!
//! Unparseable values are ignored; everything is clamped by
//! [`ScrollConfig::validated`].

use crate::sticky::StickyConfig;

/// Largest accepted threshold, in pixels.
pub const MAX_THRESHOLD_PX: f64 = 10_000.0;

/// All scroll-related pixel thresholds of the page.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ScrollConfig {
    /// Scroll offset past which the top nav bar switches to its compact style.
    pub nav_scrolled_at: f64,
    /// Reference line of the page-level scrollspy (top nav highlight).
    pub page_spy_line: f64,
    /// Reference line of the side-panel scrollspy (resume tabs).
    pub panel_spy_line: f64,
    /// Space left above a section after a top-nav click.
    pub nav_offset: f64,
    /// Space left above a tab after a side-panel click.
    pub panel_nav_offset: f64,
    /// Side-panel pinning thresholds.
    pub sticky: StickyConfig,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            nav_scrolled_at: 150.0,
            page_spy_line: 300.0,
            panel_spy_line: 200.0,
            nav_offset: 70.0,
            panel_nav_offset: 100.0,
            sticky: StickyConfig::default(),
        }
    }
}

impl ScrollConfig {
    #[must_use]
    pub fn with_nav_scrolled_at(mut self, px: f64) -> Self {
        self.nav_scrolled_at = px;
        self
    }

    #[must_use]
    pub fn with_page_spy_line(mut self, px: f64) -> Self {
        self.page_spy_line = px;
        self
    }

    #[must_use]
    pub fn with_panel_spy_line(mut self, px: f64) -> Self {
        self.panel_spy_line = px;
        self
    }

    #[must_use]
    pub fn with_sticky(mut self, sticky: StickyConfig) -> Self {
        self.sticky = sticky;
        self
    }

    /// Load overrides from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_env_with(|key| std::env::var(key).ok())
    }

    /// Load overrides through a custom lookup (for tests).
    #[must_use]
    pub fn from_env_with<F>(get_env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        let px = |key: &str| get_env(key).and_then(|v| v.trim().parse::<f64>().ok());

        if let Some(v) = px("FOLIO_NAV_SCROLLED_AT_PX") {
            config.nav_scrolled_at = v;
        }
        if let Some(v) = px("FOLIO_PAGE_SPY_LINE_PX") {
            config.page_spy_line = v;
        }
        if let Some(v) = px("FOLIO_PANEL_SPY_LINE_PX") {
            config.panel_spy_line = v;
        }
        if let Some(v) = px("FOLIO_NAV_OFFSET_PX") {
            config.nav_offset = v;
        }
        if let Some(v) = px("FOLIO_PANEL_NAV_OFFSET_PX") {
            config.panel_nav_offset = v;
        }
        if let Some(v) = px("FOLIO_STICKY_THRESHOLD_PX") {
            config.sticky.activation_threshold = v;
        }
        if let Some(v) = px("FOLIO_STICKY_TRAILING_MARGIN_PX") {
            config.sticky.trailing_margin = v;
        }

        config.validated()
    }

    /// Clamp every threshold to `0..=MAX_THRESHOLD_PX`.
    ///
    /// Non-finite values fall back to their defaults.
    #[must_use]
    pub fn validated(self) -> Self {
        let defaults = Self::default();
        let clamp = |v: f64, fallback: f64| {
            if v.is_finite() {
                v.clamp(0.0, MAX_THRESHOLD_PX)
            } else {
                fallback
            }
        };
        Self {
            nav_scrolled_at: clamp(self.nav_scrolled_at, defaults.nav_scrolled_at),
            page_spy_line: clamp(self.page_spy_line, defaults.page_spy_line),
            panel_spy_line: clamp(self.panel_spy_line, defaults.panel_spy_line),
            nav_offset: clamp(self.nav_offset, defaults.nav_offset),
            panel_nav_offset: clamp(self.panel_nav_offset, defaults.panel_nav_offset),
            sticky: StickyConfig {
                activation_threshold: clamp(
                    self.sticky.activation_threshold,
                    defaults.sticky.activation_threshold,
                ),
                trailing_margin: clamp(
                    self.sticky.trailing_margin,
                    defaults.sticky.trailing_margin,
                ),
            },
        }
    }
}
