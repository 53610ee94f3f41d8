#![forbid(unsafe_code)]

//! Geometric primitives.

/// A viewport-relative rectangle in CSS pixels.
///
/// Mirrors what a host reports from `getBoundingClientRect`: the origin is the
/// top-left corner of the viewport, `y` grows downward, and coordinates may be
/// negative once an element has scrolled above the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    /// Left edge.
    pub left: f64,
    /// Top edge.
    pub top: f64,
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Create a full-width band spanning `top..bottom`.
    ///
    /// Most scroll geometry only cares about the vertical extent.
    #[inline]
    pub fn band(top: f64, bottom: f64) -> Self {
        Self::new(0.0, top, 0.0, bottom - top)
    }

    /// Bottom edge.
    #[inline]
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Right edge.
    #[inline]
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    /// True when the rectangle cannot take part in hit tests.
    ///
    /// Zero or negative height and any non-finite field are degenerate.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        !(self.left.is_finite()
            && self.top.is_finite()
            && self.width.is_finite()
            && self.height.is_finite())
            || self.height <= 0.0
    }

    /// Check whether the horizontal line at `y` crosses the rectangle.
    ///
    /// Both edges are inclusive, so a line exactly on a shared border matches
    /// the upper and the lower rectangle alike.
    #[inline]
    pub fn spans_line(&self, y: f64) -> bool {
        !self.is_degenerate() && self.top <= y && self.bottom() >= y
    }

    /// Shift the rectangle vertically.
    #[inline]
    #[must_use]
    pub fn translate_y(&self, dy: f64) -> Self {
        Self {
            top: self.top + dy,
            ..*self
        }
    }

    /// Height of the part of this rectangle inside the vertical range
    /// `0..viewport_height`.
    pub fn visible_height(&self, viewport_height: f64) -> f64 {
        if self.is_degenerate() || viewport_height <= 0.0 {
            return 0.0;
        }
        let top = self.top.max(0.0);
        let bottom = self.bottom().min(viewport_height);
        (bottom - top).max(0.0)
    }

    /// Fraction of the rectangle's height that is inside the viewport.
    ///
    /// Degenerate rectangles report `0.0`.
    pub fn visible_ratio(&self, viewport_height: f64) -> f64 {
        if self.is_degenerate() {
            return 0.0;
        }
        (self.visible_height(viewport_height) / self.height).clamp(0.0, 1.0)
    }
}

/// Viewport dimensions in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    /// Create a new size.
    #[inline]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

impl From<(f64, f64)> for Size {
    fn from((width, height): (f64, f64)) -> Self {
        Self::new(width, height)
    }
}

#[cfg(test)]
mod tests {
    use super::{Rect, Size};

    #[test]
    fn rect_edges() {
        let rect = Rect::new(10.0, 100.0, 300.0, 800.0);
        assert_eq!(rect.bottom(), 900.0);
        assert_eq!(rect.right(), 310.0);
    }

    #[test]
    fn spans_line_is_inclusive_on_both_edges() {
        let rect = Rect::band(100.0, 900.0);
        assert!(rect.spans_line(100.0));
        assert!(rect.spans_line(900.0));
        assert!(rect.spans_line(300.0));
        assert!(!rect.spans_line(99.9));
        assert!(!rect.spans_line(900.1));
    }

    #[test]
    fn zero_height_never_spans() {
        let rect = Rect::band(300.0, 300.0);
        assert!(rect.is_degenerate());
        assert!(!rect.spans_line(300.0));
    }

    #[test]
    fn non_finite_is_degenerate() {
        assert!(Rect::new(0.0, f64::NAN, 10.0, 10.0).is_degenerate());
        assert!(Rect::new(0.0, 0.0, 10.0, f64::INFINITY).is_degenerate());
        assert!(Rect::new(f64::NAN, 0.0, 10.0, 10.0).is_degenerate());
        assert!(Rect::new(0.0, 0.0, f64::NEG_INFINITY, 10.0).is_degenerate());
        assert!(!Rect::new(f64::NAN, 0.0, 10.0, 10.0).spans_line(5.0));
    }

    #[test]
    fn translate_keeps_height() {
        let rect = Rect::band(0.0, 800.0).translate_y(-700.0);
        assert_eq!(rect, Rect::band(-700.0, 100.0));
    }

    #[test]
    fn visible_ratio_clips_to_viewport() {
        // Half of a 400px element hangs below a 600px viewport.
        let rect = Rect::band(400.0, 800.0);
        assert_eq!(rect.visible_height(600.0), 200.0);
        assert_eq!(rect.visible_ratio(600.0), 0.5);

        let above = Rect::band(-500.0, -100.0);
        assert_eq!(above.visible_ratio(600.0), 0.0);

        let covering = Rect::band(-100.0, 1000.0);
        assert!((covering.visible_ratio(600.0) - 600.0 / 1100.0).abs() < 1e-12);
    }

    #[test]
    fn size_from_tuple() {
        assert_eq!(Size::from((1280.0, 720.0)), Size::new(1280.0, 720.0));
    }
}
