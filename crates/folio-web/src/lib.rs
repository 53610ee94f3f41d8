#![forbid(unsafe_code)]

//! `folio-web` drives the scroll logic of a mounted page from a host.
//!
//! Design goals:
//! - **Host-driven I/O**: the embedding environment (a JS shim) pushes
//!   scroll/resize events and answers geometry lookups.
//! - **Owned state**: the [`PageSession`] owns its trackers and exposes a
//!   read-only [`ViewportState`]; there is no global mutable state.
//! - **No blocking / no threads**: suitable for `wasm32-unknown-unknown`.
//!
//! This crate does not bind to `wasm-bindgen`. It provides the session,
//! listener lifetime ([`listener`]), and deterministic record/replay
//! ([`session_record`]) that a thin binding layer wraps.

pub mod listener;
pub mod session_record;

use std::collections::{BTreeMap, VecDeque};

use folio_core::event::ViewportEvent;
use folio_core::geometry::{Rect, Size};
use folio_layout::{
    Anchor, GeometrySource, NavMenu, Placement, ScrollConfig, SectionId, SectionRegistry,
    StickyGeometry, StickyPositioner, ViewportTracker, nav_scrolled, scroll_target,
};

use crate::listener::{EventTarget, ListenerGuard};

/// Elements the sticky side panel is measured from.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "trace-json", derive(serde::Serialize, serde::Deserialize))]
pub struct PanelAnchors {
    /// The navigation panel itself.
    pub panel: Anchor,
    /// Its static parent column.
    pub parent: Anchor,
    /// The section bounding the sticky behaviour.
    pub region: Anchor,
    /// The content column the panel follows to its end.
    pub content: Anchor,
}

/// A sticky side panel with its own scrollspy (the resume tabs).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelSpec {
    pub tabs: SectionRegistry,
    pub anchors: PanelAnchors,
}

/// Everything a page declares at mount time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSpec {
    /// Sections highlighted in the top nav bar.
    pub sections: SectionRegistry,
    /// Optional sticky side panel.
    pub panel: Option<PanelSpec>,
}

impl PageSpec {
    #[must_use]
    pub fn new(sections: SectionRegistry) -> Self {
        Self {
            sections,
            panel: None,
        }
    }

    #[must_use]
    pub fn with_panel(mut self, panel: PanelSpec) -> Self {
        self.panel = Some(panel);
        self
    }
}

/// What the navigation UI renders from.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewportState {
    /// Highlighted top-nav entry.
    pub active_section: SectionId,
    /// Highlighted side-panel tab, when the page has a panel.
    pub active_tab: Option<SectionId>,
    /// Side-panel placement.
    pub placement: Placement,
    /// Shorthand for `placement.is_pinned()`.
    pub is_panel_fixed: bool,
    /// Shorthand for `placement.offset()`.
    pub panel_offset_px: f64,
    /// Compact nav bar style.
    pub nav_scrolled: bool,
    /// Narrow-viewport menu expanded.
    pub menu_open: bool,
    /// Last reported document scroll offset.
    pub scroll_y: f64,
    /// Last reported viewport size.
    pub viewport: Size,
}

/// Viewport-relative rectangles captured at one instant.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "trace-json", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "trace-json", serde(transparent))]
pub struct GeometrySnapshot {
    rects: BTreeMap<Anchor, Rect>,
}

impl GeometrySnapshot {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, anchor: impl Into<Anchor>, rect: Rect) -> Self {
        self.insert(anchor, rect);
        self
    }

    pub fn insert(&mut self, anchor: impl Into<Anchor>, rect: Rect) {
        self.rects.insert(anchor.into(), rect);
    }

    pub fn remove(&mut self, anchor: &Anchor) -> Option<Rect> {
        self.rects.remove(anchor)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rects.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    /// Same layout seen after scrolling the document down by `dy`.
    #[must_use]
    pub fn scrolled_by(&self, dy: f64) -> Self {
        Self {
            rects: self
                .rects
                .iter()
                .map(|(anchor, rect)| (anchor.clone(), rect.translate_y(-dy)))
                .collect(),
        }
    }

    /// Capture the rectangles of `anchors` from any source.
    pub fn capture<'a, G, I>(source: &G, anchors: I) -> Self
    where
        G: GeometrySource + ?Sized,
        I: IntoIterator<Item = &'a Anchor>,
    {
        Self {
            rects: anchors
                .into_iter()
                .filter_map(|anchor| source.rect(anchor).map(|rect| (anchor.clone(), rect)))
                .collect(),
        }
    }
}

impl GeometrySource for GeometrySnapshot {
    fn rect(&self, anchor: &Anchor) -> Option<Rect> {
        self.rects.get(anchor).copied()
    }
}

#[derive(Debug, Clone)]
struct PanelTracker {
    spy: ViewportTracker,
    positioner: StickyPositioner,
    anchors: PanelAnchors,
}

impl PanelTracker {
    fn sample<G: GeometrySource + ?Sized>(&self, geometry: &G) -> Option<StickyGeometry> {
        let a = &self.anchors;
        Some(StickyGeometry::from_rects(
            geometry.rect(&a.region)?,
            geometry.rect(&a.content)?,
            geometry.rect(&a.panel)?,
            geometry.rect(&a.parent)?,
        ))
    }
}

/// Scroll state of one mounted page.
///
/// Events are processed in push order. Each tick re-derives the state from
/// the geometry it is given; the only memory carried between ticks is the
/// "keep the previous section when nothing matches" rule and the captured
/// panel width.
#[derive(Debug, Clone)]
pub struct PageSession {
    config: ScrollConfig,
    page_spy: ViewportTracker,
    panel: Option<PanelTracker>,
    menu: NavMenu,
    queue: VecDeque<ViewportEvent>,
    state: ViewportState,
    ticks: u64,
}

impl PageSession {
    /// Create a session; nothing is measured until the first tick.
    #[must_use]
    pub fn new(spec: PageSpec, config: ScrollConfig) -> Self {
        let config = config.validated();
        let page_spy = ViewportTracker::new(spec.sections, config.page_spy_line);
        let panel = spec.panel.map(|panel| PanelTracker {
            spy: ViewportTracker::new(panel.tabs, config.panel_spy_line),
            positioner: StickyPositioner::new(config.sticky),
            anchors: panel.anchors,
        });
        let state = ViewportState {
            active_section: page_spy.active_id().clone(),
            active_tab: panel.as_ref().map(|p| p.spy.active_id().clone()),
            placement: Placement::Relative,
            is_panel_fixed: false,
            panel_offset_px: 0.0,
            nav_scrolled: false,
            menu_open: false,
            scroll_y: 0.0,
            viewport: Size::default(),
        };
        Self {
            config,
            page_spy,
            panel,
            menu: NavMenu::default(),
            queue: VecDeque::new(),
            state,
            ticks: 0,
        }
    }

    /// Attach listeners to `target`, run the initial measurement, and return
    /// the mounted page. Listeners are removed when it is dropped.
    pub fn mount<T, G>(self, target: T, geometry: &G) -> MountedPage<T>
    where
        T: EventTarget,
        G: GeometrySource + ?Sized,
    {
        let guard = ListenerGuard::attach(target);
        let mut session = self;
        session.tick(geometry);
        MountedPage {
            session,
            _listeners: guard,
        }
    }

    #[must_use]
    pub const fn config(&self) -> &ScrollConfig {
        &self.config
    }

    #[must_use]
    pub const fn state(&self) -> &ViewportState {
        &self.state
    }

    /// Number of ticks run so far.
    #[must_use]
    pub const fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Anchors the session reads on every tick.
    pub fn anchors(&self) -> impl Iterator<Item = &Anchor> + '_ {
        let sections = self.page_spy.registry().iter().map(|s| s.anchor());
        let panel = self.panel.iter().flat_map(|p| {
            let a = &p.anchors;
            p.spy
                .registry()
                .iter()
                .map(|s| s.anchor())
                .chain([&a.panel, &a.parent, &a.region, &a.content])
        });
        sections.chain(panel)
    }

    /// Queue an event for the next [`step`](Self::step).
    pub fn push_event(&mut self, event: ViewportEvent) {
        self.queue.push_back(event);
    }

    /// Number of queued events.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Drain queued events, ticking once per event. Returns how many ran.
    pub fn step<G: GeometrySource + ?Sized>(&mut self, geometry: &G) -> usize {
        let mut processed = 0;
        while let Some(event) = self.queue.pop_front() {
            self.apply(event);
            self.tick(geometry);
            processed += 1;
        }
        processed
    }

    /// Apply one event and tick immediately.
    pub fn handle_event<G: GeometrySource + ?Sized>(
        &mut self,
        event: ViewportEvent,
        geometry: &G,
    ) -> &ViewportState {
        self.apply(event);
        self.tick(geometry)
    }

    /// Recompute everything from current geometry.
    pub fn tick<G: GeometrySource + ?Sized>(&mut self, geometry: &G) -> &ViewportState {
        self.ticks += 1;
        self.page_spy.update(geometry);
        self.state.active_section = self.page_spy.active_id().clone();
        self.state.nav_scrolled = nav_scrolled(self.state.scroll_y, self.config.nav_scrolled_at);

        if let Some(panel) = &mut self.panel {
            panel.spy.update(geometry);
            self.state.active_tab = Some(panel.spy.active_id().clone());
            let sample = panel.sample(geometry);
            if let Some(placement) = panel.positioner.update(sample) {
                self.state.placement = placement;
                self.state.is_panel_fixed = placement.is_pinned();
                self.state.panel_offset_px = placement.offset();
            }
        }
        &self.state
    }

    /// Toggle the narrow-viewport menu.
    pub fn toggle_menu(&mut self) {
        self.menu.toggle();
        self.state.menu_open = self.menu.is_open();
    }

    /// Handle a click on a top-nav entry.
    ///
    /// Closes the menu and returns the document offset the host should scroll
    /// to, or `None` if `id` is unknown or its anchor is not mounted. The
    /// highlight itself follows the scroll.
    pub fn navigate_to_section<G: GeometrySource + ?Sized>(
        &mut self,
        id: &str,
        geometry: &G,
    ) -> Option<f64> {
        self.menu.close();
        self.state.menu_open = false;

        let registry = self.page_spy.registry();
        let anchor = registry.get(registry.index_of(id)?)?.anchor();
        scroll_target(geometry.rect(anchor), self.state.scroll_y, self.config.nav_offset)
    }

    /// Handle a click on a side-panel tab.
    ///
    /// The tab becomes active right away. Returns the document offset to
    /// scroll to, or `None` if the page has no panel, `id` is not one of its
    /// tabs, or the tab's anchor is not mounted. Tab ids may repeat top-nav
    /// ids; the two namespaces are independent.
    pub fn select_tab<G: GeometrySource + ?Sized>(
        &mut self,
        id: &str,
        geometry: &G,
    ) -> Option<f64> {
        let panel = self.panel.as_mut()?;
        let index = panel.spy.registry().index_of(id)?;
        let anchor = panel.spy.registry().get(index)?.anchor().clone();
        panel.spy.select(id);
        self.state.active_tab = Some(panel.spy.active_id().clone());
        scroll_target(
            geometry.rect(&anchor),
            self.state.scroll_y,
            self.config.panel_nav_offset,
        )
    }

    fn apply(&mut self, event: ViewportEvent) {
        match event {
            ViewportEvent::Scroll { scroll_y } => self.state.scroll_y = scroll_y,
            ViewportEvent::Resize { size } => self.state.viewport = size,
        }
    }
}

/// A session with live host listeners.
///
/// Dropping it (or calling [`unmount`](Self::unmount)) removes the listeners.
#[derive(Debug)]
pub struct MountedPage<T: EventTarget> {
    session: PageSession,
    _listeners: ListenerGuard<T>,
}

impl<T: EventTarget> MountedPage<T> {
    #[must_use]
    pub const fn session(&self) -> &PageSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut PageSession {
        &mut self.session
    }

    #[must_use]
    pub const fn state(&self) -> &ViewportState {
        self.session.state()
    }

    /// Remove listeners and hand back the session.
    pub fn unmount(self) -> PageSession {
        let Self {
            session,
            _listeners: listeners,
        } = self;
        drop(listeners);
        session
    }
}
