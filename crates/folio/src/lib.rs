#![forbid(unsafe_code)]

//! folio public facade crate.
//!
//! This crate provides the stable surface for hosts embedding the portfolio
//! page logic. It re-exports the common types from the internal crates, owns
//! the project catalog, and offers a lightweight prelude.

pub mod catalog;
pub mod error;

// --- Core re-exports -------------------------------------------------------

pub use folio_core::animation::{Animation, COUNT_UP_DURATION, CountUp};
pub use folio_core::event::{EventKind, ViewportEvent};
pub use folio_core::geometry::{Rect, Size};

// --- Layout re-exports -----------------------------------------------------

pub use folio_layout::reveal::{COUNTER_REVEAL_RATIO, SECTION_REVEAL_RATIO};
pub use folio_layout::{
    Anchor, GeometrySource, NavMenu, Placement, RevealTrigger, ScrollConfig, SectionId,
    SectionRegistry, StickyConfig, StickyPositioner, StickyState, ViewportTracker,
};

// --- Web re-exports --------------------------------------------------------

pub use folio_web::listener::{EventTarget, ListenerGuard, MemoryTarget};
pub use folio_web::session_record::{SessionRecorder, SessionTrace, replay};
pub use folio_web::{
    GeometrySnapshot, MountedPage, PageSession, PageSpec, PanelAnchors, PanelSpec, ViewportState,
};

// --- Catalog and errors ----------------------------------------------------

pub use catalog::{Catalog, Project, ProjectCategory, ProjectFilter};
pub use error::{DegradationAction, Error, Result};

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Anchor, Catalog, Error, GeometrySnapshot, GeometrySource, PageSession, PageSpec,
        Placement, ProjectFilter, Rect, Result, ScrollConfig, SectionId, SectionRegistry,
        ViewportEvent, ViewportState,
    };

    pub use crate::{core, layout, web};
}

pub use folio_core as core;
pub use folio_layout as layout;
pub use folio_web as web;
