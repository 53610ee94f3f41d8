#![forbid(unsafe_code)]

//! Scroll-driven layout logic for folio.
//!
//! # Role in folio
//! `folio-layout` answers two questions on every scroll or resize tick:
//! which section is under the reference line ([`scrollspy`]), and where the
//! side navigation panel goes ([`sticky`]). Both are computed from
//! viewport-relative rectangles obtained through a [`GeometrySource`], so
//! they run unchanged in a browser shim, in WASM, or in a unit test.
//!
//! # Modules
//! - [`registry`]: the immutable, ordered list of sections.
//! - [`scrollspy`]: first-match section tracking with no-flicker retention.
//! - [`sticky`]: pure `Relative` / `Fixed` / `Trailing` panel placement.
//! - [`nav`]: compact nav bar and click-to-scroll targets.
//! - [`reveal`]: visible-fraction triggers for entrance animations.
//! - [`config`]: named pixel thresholds with environment overrides.

pub mod config;
pub mod nav;
pub mod registry;
pub mod reveal;
pub mod scrollspy;
pub mod source;
pub mod sticky;

pub use config::ScrollConfig;
pub use nav::{NavMenu, nav_scrolled, scroll_target};
pub use registry::{Anchor, RegistryBuilder, RegistryError, Section, SectionId, SectionRegistry};
pub use reveal::RevealTrigger;
pub use scrollspy::{TrackerUpdate, ViewportTracker, locate_active};
pub use source::{FnSource, GeometrySource};
pub use sticky::{
    Placement, PinnedFrame, StickyConfig, StickyGeometry, StickyPositioner, StickyState,
    classify, compute_placement,
};
