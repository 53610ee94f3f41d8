#![forbid(unsafe_code)]

//! Core: viewport geometry, events, animation, and logging for folio.
//!
//! # Role in folio
//! `folio-core` is the input layer. It defines the viewport-relative
//! [`geometry::Rect`] hosts report for page elements, the
//! [`event::ViewportEvent`] values pushed on scroll and resize, and small
//! time-driven animation primitives.
//!
//! # How it fits in the system
//! `folio-layout` consumes rectangles to decide the active section and the
//! side-panel placement; `folio-web` turns host events into ticks. Nothing
//! here touches a DOM, so every computation is testable without a browser.

pub mod animation;
pub mod event;
pub mod geometry;
pub mod logging;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};
