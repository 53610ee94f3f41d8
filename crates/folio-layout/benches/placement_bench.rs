//! Per-tick cost of scrollspy and sticky placement.

use std::collections::BTreeMap;
use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use folio_core::geometry::Rect;
use folio_layout::{
    Anchor, SectionRegistry, StickyConfig, StickyGeometry, ViewportTracker, compute_placement,
};

fn bench_scrollspy(c: &mut Criterion) {
    let ids: Vec<String> = (0..12).map(|i| format!("s{i}")).collect();
    let registry = SectionRegistry::from_ids(ids.iter().map(String::as_str)).unwrap();
    let mut tracker = ViewportTracker::new(registry, 300.0);
    let geometry: BTreeMap<Anchor, Rect> = (0..12)
        .map(|i| {
            let top = f64::from(i) * 700.0 - 5000.0;
            (Anchor::new(format!("s{i}-section")), Rect::band(top, top + 700.0))
        })
        .collect();

    c.bench_function("scrollspy/update_12_sections", |b| {
        b.iter(|| black_box(tracker.update(black_box(&geometry))))
    });
}

fn bench_placement(c: &mut Criterion) {
    let config = StickyConfig::default();
    let geometry = StickyGeometry {
        region_top: -1200.0,
        region_bottom: 620.0,
        panel_height: 380.0,
        parent: Rect::new(96.0, -1200.0, 260.0, 380.0),
    };

    c.bench_function("sticky/compute_placement", |b| {
        b.iter(|| black_box(compute_placement(black_box(&geometry), &config, Some(260.0))))
    });
}

criterion_group!(benches, bench_scrollspy, bench_placement);
criterion_main!(benches);
