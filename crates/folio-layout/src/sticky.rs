#![forbid(unsafe_code)]

//! Sticky side-panel placement.
//!
//! A navigation panel sits in a static parent column next to a long content
//! column. While the content scrolls past, the panel is pinned just under the
//! top of the viewport; when the content runs out, the panel is pushed up with
//! it instead of overlapping whatever follows.
//!
//! [`compute_placement`] is a pure function of one geometry sample. The
//! rendering layer applies the resulting [`Placement`] declaratively.
//! [`StickyPositioner`] adds the little state that has to survive between
//! ticks: the panel width captured at first activation, and the current
//! [`StickyState`] for transition logging.
//!
//! # States
//!
//! With `limit = threshold + panel_height + trailing_margin`:
//!
//! | State      | Condition                                          | Rendered top            |
//! |------------|----------------------------------------------------|-------------------------|
//! | `Relative` | `region_top > threshold`                           | `region_top` (in flow)  |
//! | `Fixed`    | `region_top <= threshold && region_bottom > limit` | `threshold`             |
//! | `Trailing` | otherwise                                          | `threshold + offset`    |
//!
//! In `Trailing`, `offset = region_bottom - limit`, except that a region
//! shorter than `panel_height + trailing_margin` never pulls the panel above
//! its own flow position (`region_top - threshold`).
//!
//! # Invariants
//!
//! 1. The rendered top is continuous and non-increasing in scroll offset; a
//!    scroll delta `d` moves the panel by at most `|d|`.
//! 2. `offset <= 0` in `Trailing` and `0` in every other state.
//! 3. Placement depends only on the geometry and the captured width, so
//!    recomputing from the same sample is idempotent.
//! 4. The pinned width is captured once and reused, so the panel does not
//!    change width when it leaves the flow.
//!
//! # Failure Modes
//!
//! Unmounted or non-finite geometry makes [`StickyPositioner::update`] a
//! no-op for that tick.

use folio_core::geometry::Rect;

/// Default activation threshold in pixels from the viewport top.
pub const DEFAULT_ACTIVATION_THRESHOLD: f64 = 80.0;

/// Default gap kept between the panel bottom and the end of the content.
pub const DEFAULT_TRAILING_MARGIN: f64 = 200.0;

/// Sticky thresholds.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StickyConfig {
    /// Line (px from the viewport top) the panel pins to.
    pub activation_threshold: f64,
    /// Space reserved below the panel before it starts trailing.
    pub trailing_margin: f64,
}

impl Default for StickyConfig {
    fn default() -> Self {
        Self {
            activation_threshold: DEFAULT_ACTIVATION_THRESHOLD,
            trailing_margin: DEFAULT_TRAILING_MARGIN,
        }
    }
}

impl StickyConfig {
    #[must_use]
    pub fn with_activation_threshold(mut self, px: f64) -> Self {
        self.activation_threshold = px;
        self
    }

    #[must_use]
    pub fn with_trailing_margin(mut self, px: f64) -> Self {
        self.trailing_margin = px;
        self
    }

    /// Region bottom at which trailing starts for a panel of `panel_height`.
    #[must_use]
    pub fn trailing_limit(&self, panel_height: f64) -> f64 {
        self.activation_threshold + panel_height + self.trailing_margin
    }
}

/// One geometry sample, all values viewport-relative.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StickyGeometry {
    /// Top of the bounded region (the section hosting the panel).
    pub region_top: f64,
    /// Bottom of the content column the panel follows.
    pub region_bottom: f64,
    /// Current panel height.
    pub panel_height: f64,
    /// Bounds of the panel's static parent column.
    pub parent: Rect,
}

impl StickyGeometry {
    /// Assemble a sample from element rectangles.
    #[must_use]
    pub fn from_rects(region: Rect, content: Rect, panel: Rect, parent: Rect) -> Self {
        Self {
            region_top: region.top,
            region_bottom: content.bottom(),
            panel_height: panel.height,
            parent,
        }
    }

    /// Panel top while it flows with the page.
    #[must_use]
    pub const fn flow_top(&self) -> f64 {
        self.region_top
    }

    fn is_finite(&self) -> bool {
        self.region_top.is_finite()
            && self.region_bottom.is_finite()
            && self.panel_height.is_finite()
            && self.parent.left.is_finite()
            && self.parent.width.is_finite()
    }
}

/// Discrete placement state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum StickyState {
    #[default]
    Relative,
    Fixed,
    Trailing,
}

impl StickyState {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Relative => "relative",
            Self::Fixed => "fixed",
            Self::Trailing => "trailing",
        }
    }
}

/// Viewport frame of a pinned panel.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PinnedFrame {
    pub top: f64,
    pub left: f64,
    pub width: f64,
}

/// Panel placement for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "state", rename_all = "snake_case"))]
pub enum Placement {
    /// Normal flow, no offset.
    #[default]
    Relative,
    /// Pinned at the activation threshold.
    Fixed { frame: PinnedFrame },
    /// Pinned, translated upward by `offset` (`<= 0`).
    Trailing { frame: PinnedFrame, offset: f64 },
}

impl Placement {
    #[must_use]
    pub const fn state(&self) -> StickyState {
        match self {
            Self::Relative => StickyState::Relative,
            Self::Fixed { .. } => StickyState::Fixed,
            Self::Trailing { .. } => StickyState::Trailing,
        }
    }

    /// True when the panel is out of the flow.
    #[must_use]
    pub const fn is_pinned(&self) -> bool {
        !matches!(self, Self::Relative)
    }

    /// Vertical translation; zero unless trailing.
    #[must_use]
    pub const fn offset(&self) -> f64 {
        match self {
            Self::Trailing { offset, .. } => *offset,
            _ => 0.0,
        }
    }

    #[must_use]
    pub const fn frame(&self) -> Option<PinnedFrame> {
        match self {
            Self::Relative => None,
            Self::Fixed { frame } | Self::Trailing { frame, .. } => Some(*frame),
        }
    }

    /// Where the panel's top edge ends up in the viewport.
    ///
    /// `flow_top` is the panel top while in flow, see
    /// [`StickyGeometry::flow_top`].
    #[must_use]
    pub fn rendered_top(&self, flow_top: f64) -> f64 {
        match self {
            Self::Relative => flow_top,
            Self::Fixed { frame } => frame.top,
            Self::Trailing { frame, offset } => frame.top + offset,
        }
    }
}

/// State implied by one geometry sample.
#[must_use]
pub fn classify(geometry: &StickyGeometry, config: &StickyConfig) -> StickyState {
    if geometry.region_top > config.activation_threshold {
        StickyState::Relative
    } else if geometry.region_bottom > config.trailing_limit(geometry.panel_height) {
        StickyState::Fixed
    } else {
        StickyState::Trailing
    }
}

/// Pure placement for one geometry sample.
///
/// `captured_width` is the width recorded at first activation; when `None`
/// the parent's current width is used.
#[must_use]
pub fn compute_placement(
    geometry: &StickyGeometry,
    config: &StickyConfig,
    captured_width: Option<f64>,
) -> Placement {
    let threshold = config.activation_threshold;
    let frame = PinnedFrame {
        top: threshold,
        left: geometry.parent.left,
        width: captured_width.unwrap_or(geometry.parent.width),
    };
    match classify(geometry, config) {
        StickyState::Relative => Placement::Relative,
        StickyState::Fixed => Placement::Fixed { frame },
        StickyState::Trailing => {
            let to_content_end = geometry.region_bottom - config.trailing_limit(geometry.panel_height);
            let to_flow = geometry.region_top - threshold;
            Placement::Trailing {
                frame,
                offset: to_content_end.max(to_flow).min(0.0),
            }
        }
    }
}

/// Stateful wrapper that captures the pinned width once.
#[derive(Debug, Clone, Default)]
pub struct StickyPositioner {
    config: StickyConfig,
    state: StickyState,
    captured_width: Option<f64>,
    last: Placement,
}

impl StickyPositioner {
    #[must_use]
    pub fn new(config: StickyConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn config(&self) -> &StickyConfig {
        &self.config
    }

    #[must_use]
    pub const fn state(&self) -> StickyState {
        self.state
    }

    /// Last placement produced (initially `Relative`).
    #[must_use]
    pub const fn placement(&self) -> Placement {
        self.last
    }

    #[must_use]
    pub const fn captured_width(&self) -> Option<f64> {
        self.captured_width
    }

    /// Recompute for this tick.
    ///
    /// `None` (elements not mounted) or non-finite geometry leaves everything
    /// untouched and returns `None`.
    pub fn update(&mut self, geometry: Option<StickyGeometry>) -> Option<Placement> {
        let geometry = geometry.filter(StickyGeometry::is_finite)?;
        if self.captured_width.is_none()
            && classify(&geometry, &self.config) != StickyState::Relative
        {
            self.captured_width = Some(geometry.parent.width);
        }
        let placement = compute_placement(&geometry, &self.config, self.captured_width);
        let state = placement.state();
        if state != self.state {
            #[cfg(feature = "tracing")]
            tracing::debug!(
                message = "sticky.transition",
                from = self.state.as_str(),
                to = state.as_str(),
                offset = placement.offset()
            );
            self.state = state;
        }
        self.last = placement;
        Some(placement)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(region_top: f64, region_bottom: f64) -> StickyGeometry {
        StickyGeometry {
            region_top,
            region_bottom,
            panel_height: 400.0,
            parent: Rect::new(120.0, region_top, 260.0, 400.0),
        }
    }

    #[test]
    fn relative_before_activation() {
        let placement = compute_placement(&sample(300.0, 2000.0), &StickyConfig::default(), None);
        assert_eq!(placement, Placement::Relative);
        assert_eq!(placement.rendered_top(300.0), 300.0);
    }

    #[test]
    fn fixed_while_content_is_long() {
        let placement = compute_placement(&sample(-500.0, 1500.0), &StickyConfig::default(), None);
        let frame = PinnedFrame {
            top: 80.0,
            left: 120.0,
            width: 260.0,
        };
        assert_eq!(placement, Placement::Fixed { frame });
    }

    #[test]
    fn trailing_offset_matches_distance_to_content_end() {
        // limit = 80 + 400 + 200 = 680; 600 - 680 = -80.
        let placement = compute_placement(&sample(-2000.0, 600.0), &StickyConfig::default(), None);
        assert_eq!(placement.state(), StickyState::Trailing);
        assert_eq!(placement.offset(), -80.0);
        assert_eq!(placement.rendered_top(-2000.0), 0.0);
    }

    #[test]
    fn bottom_exactly_at_limit_is_trailing_with_zero_offset() {
        let placement = compute_placement(&sample(-100.0, 680.0), &StickyConfig::default(), None);
        assert_eq!(placement.state(), StickyState::Trailing);
        assert_eq!(placement.offset(), 0.0);
    }

    #[test]
    fn short_region_trails_with_its_flow() {
        // Region 300px tall: shorter than panel + margin.
        let placement = compute_placement(&sample(50.0, 350.0), &StickyConfig::default(), None);
        assert_eq!(placement.state(), StickyState::Trailing);
        assert_eq!(placement.rendered_top(50.0), 50.0);
    }

    #[test]
    fn activation_threshold_is_inclusive() {
        let config = StickyConfig::default();
        assert_eq!(classify(&sample(80.0, 5000.0), &config), StickyState::Fixed);
        assert_eq!(classify(&sample(80.5, 5000.0), &config), StickyState::Relative);
    }

    #[test]
    fn positioner_captures_width_once() {
        let mut positioner = StickyPositioner::new(StickyConfig::default());
        assert_eq!(positioner.update(Some(sample(200.0, 3000.0))), Some(Placement::Relative));
        assert_eq!(positioner.captured_width(), None);

        positioner.update(Some(sample(0.0, 3000.0)));
        assert_eq!(positioner.captured_width(), Some(260.0));

        let mut resized = sample(-100.0, 3000.0);
        resized.parent.width = 200.0;
        let placement = positioner.update(Some(resized)).unwrap();
        assert_eq!(placement.frame().map(|f| f.width), Some(260.0));
    }

    #[test]
    fn positioner_skips_unmounted_ticks() {
        let mut positioner = StickyPositioner::new(StickyConfig::default());
        positioner.update(Some(sample(0.0, 3000.0)));
        assert_eq!(positioner.state(), StickyState::Fixed);

        assert_eq!(positioner.update(None), None);
        assert_eq!(positioner.state(), StickyState::Fixed);

        let broken = sample(f64::NAN, 3000.0);
        assert_eq!(positioner.update(Some(broken)), None);
        assert_eq!(positioner.state(), StickyState::Fixed);
    }

    #[test]
    fn cycles_back_to_relative() {
        let mut positioner = StickyPositioner::new(StickyConfig::default());
        let states: Vec<_> = [200.0, 0.0, -2500.0, 0.0, 200.0]
            .into_iter()
            .map(|top| positioner.update(Some(sample(top, top + 3000.0))).unwrap().state())
            .collect();
        assert_eq!(
            states,
            [
                StickyState::Relative,
                StickyState::Fixed,
                StickyState::Trailing,
                StickyState::Fixed,
                StickyState::Relative,
            ]
        );
    }
}
