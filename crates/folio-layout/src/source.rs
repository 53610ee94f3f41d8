#![forbid(unsafe_code)]

//! Geometry lookup seam between the host and the layout logic.
//!
//! Layout code never touches a DOM. It asks a [`GeometrySource`] for the
//! viewport-relative rectangle of an [`Anchor`]; `None` means the element is
//! not mounted yet, and the caller skips it for this tick.

use std::collections::{BTreeMap, HashMap};

use folio_core::geometry::Rect;

use crate::registry::Anchor;

/// Read access to element rectangles at tick time.
pub trait GeometrySource {
    /// Bounding rectangle of `anchor`, or `None` if it is not mounted.
    fn rect(&self, anchor: &Anchor) -> Option<Rect>;
}

impl<T: GeometrySource + ?Sized> GeometrySource for &T {
    fn rect(&self, anchor: &Anchor) -> Option<Rect> {
        (**self).rect(anchor)
    }
}

impl GeometrySource for BTreeMap<Anchor, Rect> {
    fn rect(&self, anchor: &Anchor) -> Option<Rect> {
        self.get(anchor).copied()
    }
}

impl<S: std::hash::BuildHasher> GeometrySource for HashMap<Anchor, Rect, S> {
    fn rect(&self, anchor: &Anchor) -> Option<Rect> {
        self.get(anchor).copied()
    }
}

/// Adapter turning a closure into a [`GeometrySource`].
#[derive(Debug, Clone, Copy)]
pub struct FnSource<F>(pub F);

impl<F> GeometrySource for FnSource<F>
where
    F: Fn(&Anchor) -> Option<Rect>,
{
    fn rect(&self, anchor: &Anchor) -> Option<Rect> {
        (self.0)(anchor)
    }
}
