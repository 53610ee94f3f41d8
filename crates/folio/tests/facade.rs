//! Building a page and its catalog through the facade.

use folio::prelude::*;
use folio::{DegradationAction, ProjectCategory, RevealTrigger, SECTION_REVEAL_RATIO};
use pretty_assertions::assert_eq;

const PROJECTS: &str = r##"[
    {"id": "lotto-map", "title": "Lotto Map", "desc": "Store map.", "category": "map"},
    {"id": "stage-3d", "title": "Stage 3D", "desc": "Seat views.", "category": "3d", "live": "#"},
    {"id": "booking", "title": "Booking", "desc": "Reservations.", "category": "web",
     "live": "https://booking.example"}
]"##;

fn build_page(ids: &[&str]) -> Result<PageSession> {
    let sections = SectionRegistry::from_ids(ids.iter().copied())?;
    Ok(PageSession::new(PageSpec::new(sections), ScrollConfig::default()))
}

fn document() -> GeometrySnapshot {
    GeometrySnapshot::new()
        .with("home-section", Rect::band(0.0, 900.0))
        .with("projects-section", Rect::band(900.0, 2100.0))
        .with("contact-section", Rect::band(2100.0, 2800.0))
}

#[test]
fn page_follows_scroll_and_navigates() -> Result<()> {
    let mut page = build_page(&["home", "projects", "contact"])?;
    let doc = document();

    let state = page.tick(&doc);
    assert_eq!(state.active_section.as_str(), "home");
    assert!(!state.nav_scrolled);

    let state = page.handle_event(ViewportEvent::scroll(1000.0), &doc.scrolled_by(1000.0));
    assert_eq!(state.active_section.as_str(), "projects");
    assert!(state.nav_scrolled);

    let target = page.navigate_to_section("contact", &doc.scrolled_by(1000.0));
    assert_eq!(target, Some(2030.0));
    assert_eq!(page.navigate_to_section("blog", &doc), None);
    Ok(())
}

#[test]
fn empty_page_degrades_to_static_nav() {
    let err = build_page(&[]).unwrap_err();
    assert_eq!(err.degradation(), DegradationAction::StaticNavigation);
}

#[test]
fn catalog_filters_by_tab() -> Result<()> {
    let catalog = Catalog::from_json(PROJECTS)?;
    let ids: Vec<_> = catalog
        .filter("3d".parse().unwrap_or_default())
        .map(|p| p.id.as_str())
        .collect();
    assert_eq!(ids, ["stage-3d"]);

    let web: Vec<_> = catalog
        .filter(ProjectFilter::Only(ProjectCategory::Web))
        .filter_map(|p| p.live_url())
        .collect();
    assert_eq!(web, ["https://booking.example"]);
    Ok(())
}

#[test]
fn broken_catalog_degrades_to_empty_grid() {
    let err = Error::from(Catalog::from_json("{").unwrap_err());
    assert_eq!(err.degradation(), DegradationAction::EmptyCatalog);
    let fallback = Catalog::default();
    assert_eq!(fallback.filter(ProjectFilter::All).count(), 0);
}

#[test]
fn sections_reveal_once_in_view() {
    let doc = document();
    let mut reveal = RevealTrigger::once(SECTION_REVEAL_RATIO);
    let anchor = Anchor::new("projects-section");
    assert!(!reveal.observe(doc.rect(&anchor), 800.0));
    assert!(reveal.observe(doc.scrolled_by(300.0).rect(&anchor), 800.0));
    assert!(reveal.observe(doc.scrolled_by(5000.0).rect(&anchor), 800.0));
}
