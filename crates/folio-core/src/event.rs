#![forbid(unsafe_code)]

//! Canonical viewport events.
//!
//! The host translates browser `scroll` and `resize` notifications into
//! [`ViewportEvent`] values and pushes them into a page session. Events carry
//! the window-level scroll offset and size; per-element geometry is read
//! separately through a geometry source at tick time.

use crate::geometry::Size;

/// Kind of host listener an event originates from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum EventKind {
    Scroll,
    Resize,
}

impl EventKind {
    /// Both kinds, in attach order.
    pub const ALL: [EventKind; 2] = [EventKind::Scroll, EventKind::Resize];

    /// DOM event name for this kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Scroll => "scroll",
            Self::Resize => "resize",
        }
    }
}

/// A scroll or resize notification from the host.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
pub enum ViewportEvent {
    /// The document scrolled; `scroll_y` is the new `window.scrollY`.
    Scroll { scroll_y: f64 },
    /// The viewport changed size.
    Resize { size: Size },
}

impl ViewportEvent {
    /// Build a scroll event.
    #[must_use]
    pub const fn scroll(scroll_y: f64) -> Self {
        Self::Scroll { scroll_y }
    }

    /// Build a resize event.
    #[must_use]
    pub const fn resize(width: f64, height: f64) -> Self {
        Self::Resize {
            size: Size::new(width, height),
        }
    }

    /// Which listener delivers this event.
    #[must_use]
    pub const fn kind(&self) -> EventKind {
        match self {
            Self::Scroll { .. } => EventKind::Scroll,
            Self::Resize { .. } => EventKind::Resize,
        }
    }
}
