#![forbid(unsafe_code)]

//! Deterministic session recording and replay.
//!
//! [`SessionRecorder`] wraps a [`PageSession`] and records every mount and
//! event together with the geometry the host reported for it. [`replay`]
//! feeds the same inputs through a fresh session and compares a checksum of
//! the resulting [`ViewportState`] after every tick.
//!
//! # Record layout
//!
//! - **Header**: schema version and the scroll configuration.
//! - **Mount**: initial geometry snapshot.
//! - **Event**: a scroll/resize event and the snapshot read during its tick.
//! - **Checkpoint**: FNV-1a checksum of the state after a tick, chained.
//! - **Summary**: tick count and final checksum chain.
//!
//! # Determinism contract
//!
//! Given the same page declaration and trace, replay must reproduce every
//! checkpoint. Geometry comes only from the recorded snapshots and ticks
//! never read clocks, so this holds on every platform.
//!
//! With the `trace-json` feature a trace converts to and from JSON lines.

use folio_core::event::ViewportEvent;
use folio_layout::{GeometrySource, Placement, ScrollConfig};

use crate::{GeometrySnapshot, PageSession, PageSpec, ViewportState};

/// Schema version for session traces.
pub const SCHEMA_VERSION: &str = "folio-trace-v1";

const FNV_OFFSET_BASIS: u64 = 0xcbf29ce484222325;
const FNV_PRIME: u64 = 0x100000001b3;

fn fnv1a64_bytes(mut hash: u64, bytes: &[u8]) -> u64 {
    for &b in bytes {
        hash ^= b as u64;
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}

fn fnv1a64_u64(hash: u64, v: u64) -> u64 {
    fnv1a64_bytes(hash, &v.to_le_bytes())
}

fn fnv1a64_f64(hash: u64, v: f64) -> u64 {
    fnv1a64_u64(hash, v.to_bits())
}

fn fnv1a64_pair(prev: u64, next: u64) -> u64 {
    let hash = FNV_OFFSET_BASIS;
    let hash = fnv1a64_u64(hash, prev);
    fnv1a64_u64(hash, next)
}

/// Checksum of everything the navigation UI renders from.
#[must_use]
pub fn state_checksum(state: &ViewportState) -> u64 {
    let mut hash = FNV_OFFSET_BASIS;
    hash = fnv1a64_bytes(hash, state.active_section.as_str().as_bytes());
    hash = fnv1a64_bytes(hash, &[0xff]);
    match &state.active_tab {
        Some(tab) => {
            hash = fnv1a64_bytes(hash, &[1]);
            hash = fnv1a64_bytes(hash, tab.as_str().as_bytes());
        }
        None => hash = fnv1a64_bytes(hash, &[0]),
    }
    hash = fnv1a64_bytes(hash, &[state.placement.state() as u8]);
    if let Some(frame) = state.placement.frame() {
        hash = fnv1a64_f64(hash, frame.top);
        hash = fnv1a64_f64(hash, frame.left);
        hash = fnv1a64_f64(hash, frame.width);
    }
    if let Placement::Trailing { offset, .. } = state.placement {
        hash = fnv1a64_f64(hash, offset);
    }
    hash = fnv1a64_bytes(hash, &[u8::from(state.nav_scrolled), u8::from(state.menu_open)]);
    hash = fnv1a64_f64(hash, state.scroll_y);
    hash = fnv1a64_f64(hash, state.viewport.width);
    fnv1a64_f64(hash, state.viewport.height)
}

/// A single record in a session trace.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "trace-json", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "trace-json", serde(tag = "kind", rename_all = "snake_case"))]
pub enum TraceRecord {
    /// Session header (must be first).
    Header {
        schema: String,
        config: ScrollConfig,
    },
    /// Initial measurement at mount.
    Mount { geometry: GeometrySnapshot },
    /// A host event and the geometry read while handling it.
    Event {
        seq: u64,
        event: ViewportEvent,
        geometry: GeometrySnapshot,
    },
    /// State checksum after a tick.
    Checkpoint {
        tick: u64,
        checksum: u64,
        checksum_chain: u64,
    },
    /// Trace summary (must be last).
    Summary {
        total_ticks: u64,
        final_checksum_chain: u64,
    },
}

/// A complete recorded session trace.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionTrace {
    pub records: Vec<TraceRecord>,
}

impl SessionTrace {
    /// Number of checkpoints in the trace.
    #[must_use]
    pub fn checkpoint_count(&self) -> u64 {
        self.records
            .iter()
            .filter(|r| matches!(r, TraceRecord::Checkpoint { .. }))
            .count() as u64
    }

    /// Final checksum chain from the summary record.
    #[must_use]
    pub fn final_checksum_chain(&self) -> Option<u64> {
        self.records.iter().rev().find_map(|r| match r {
            TraceRecord::Summary {
                final_checksum_chain,
                ..
            } => Some(*final_checksum_chain),
            _ => None,
        })
    }

    /// Encode as one JSON object per line.
    #[cfg(feature = "trace-json")]
    pub fn to_jsonl(&self) -> Result<String, serde_json::Error> {
        let mut out = String::new();
        for record in &self.records {
            out.push_str(&serde_json::to_string(record)?);
            out.push('\n');
        }
        Ok(out)
    }

    /// Decode JSON lines; blank lines are skipped.
    #[cfg(feature = "trace-json")]
    pub fn from_jsonl(input: &str) -> Result<Self, ReplayError> {
        let records = input
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(idx, line)| {
                serde_json::from_str(line).map_err(|err| ReplayError::Decode {
                    line: idx + 1,
                    message: err.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { records })
    }
}

/// Records a page session for deterministic replay.
#[derive(Debug)]
pub struct SessionRecorder {
    session: PageSession,
    records: Vec<TraceRecord>,
    checksum_chain: u64,
    seq: u64,
}

impl SessionRecorder {
    /// Create a recorder around a fresh session.
    #[must_use]
    pub fn new(spec: PageSpec, config: ScrollConfig) -> Self {
        let session = PageSession::new(spec, config);
        let records = vec![TraceRecord::Header {
            schema: SCHEMA_VERSION.to_string(),
            config: *session.config(),
        }];
        Self {
            session,
            records,
            checksum_chain: 0,
            seq: 0,
        }
    }

    /// Run and record the initial measurement.
    pub fn mount<G: GeometrySource + ?Sized>(&mut self, geometry: &G) {
        let snapshot = GeometrySnapshot::capture(geometry, self.session.anchors());
        self.session.tick(&snapshot);
        self.records.push(TraceRecord::Mount { geometry: snapshot });
        self.record_checkpoint();
    }

    /// Handle and record one event.
    pub fn handle_event<G: GeometrySource + ?Sized>(&mut self, event: ViewportEvent, geometry: &G) {
        let snapshot = GeometrySnapshot::capture(geometry, self.session.anchors());
        self.session.handle_event(event, &snapshot);
        self.records.push(TraceRecord::Event {
            seq: self.seq,
            event,
            geometry: snapshot,
        });
        self.seq += 1;
        self.record_checkpoint();
    }

    /// Access the recorded session.
    #[must_use]
    pub const fn session(&self) -> &PageSession {
        &self.session
    }

    /// Finish recording and return the completed trace.
    #[must_use]
    pub fn finish(mut self) -> SessionTrace {
        self.records.push(TraceRecord::Summary {
            total_ticks: self.session.ticks(),
            final_checksum_chain: self.checksum_chain,
        });
        SessionTrace {
            records: self.records,
        }
    }

    fn record_checkpoint(&mut self) {
        let checksum = state_checksum(self.session.state());
        let chain = fnv1a64_pair(self.checksum_chain, checksum);
        self.records.push(TraceRecord::Checkpoint {
            tick: self.session.ticks(),
            checksum,
            checksum_chain: chain,
        });
        self.checksum_chain = chain;
    }
}

/// Result of replaying a session trace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayResult {
    /// Checkpoints verified.
    pub total_checkpoints: u64,
    /// Final checksum chain from replay.
    pub final_checksum_chain: u64,
    /// First checkpoint whose checksum differed, if any.
    pub first_mismatch: Option<ReplayMismatch>,
}

impl ReplayResult {
    /// Whether the replay produced identical checksums.
    #[must_use]
    pub fn ok(&self) -> bool {
        self.first_mismatch.is_none()
    }
}

/// Description of a checksum mismatch during replay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayMismatch {
    pub tick: u64,
    pub expected: u64,
    pub actual: u64,
}

/// Errors that can occur during replay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplayError {
    /// The trace does not start with a header record.
    MissingHeader,
    /// The header names an unknown schema.
    SchemaMismatch { found: String },
    /// A JSON line failed to decode.
    Decode { line: usize, message: String },
}

impl core::fmt::Display for ReplayError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::MissingHeader => write!(f, "trace missing header record"),
            Self::SchemaMismatch { found } => {
                write!(f, "unsupported trace schema {found:?} (expected {SCHEMA_VERSION})")
            }
            Self::Decode { line, message } => write!(f, "trace line {line}: {message}"),
        }
    }
}

impl std::error::Error for ReplayError {}

/// Replay a recorded trace through a fresh session built from `spec`.
pub fn replay(spec: PageSpec, trace: &SessionTrace) -> Result<ReplayResult, ReplayError> {
    let (schema, config) = trace
        .records
        .first()
        .and_then(|r| match r {
            TraceRecord::Header { schema, config } => Some((schema, *config)),
            _ => None,
        })
        .ok_or(ReplayError::MissingHeader)?;
    if schema != SCHEMA_VERSION {
        return Err(ReplayError::SchemaMismatch {
            found: schema.clone(),
        });
    }

    let mut session = PageSession::new(spec, config);
    let mut checkpoints: u64 = 0;
    let mut checksum_chain: u64 = 0;
    let mut first_mismatch = None;

    for record in &trace.records {
        match record {
            TraceRecord::Mount { geometry } => {
                session.tick(geometry);
            }
            TraceRecord::Event {
                event, geometry, ..
            } => {
                session.handle_event(*event, geometry);
            }
            TraceRecord::Checkpoint { tick, checksum, .. } => {
                let actual = state_checksum(session.state());
                checksum_chain = fnv1a64_pair(checksum_chain, actual);
                if actual != *checksum && first_mismatch.is_none() {
                    first_mismatch = Some(ReplayMismatch {
                        tick: *tick,
                        expected: *checksum,
                        actual,
                    });
                }
                checkpoints += 1;
            }
            TraceRecord::Header { .. } | TraceRecord::Summary { .. } => {}
        }
    }

    Ok(ReplayResult {
        total_checkpoints: checkpoints,
        final_checksum_chain: checksum_chain,
        first_mismatch,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::geometry::Rect;
    use folio_layout::SectionRegistry;
    use pretty_assertions::assert_eq;

    fn spec() -> PageSpec {
        PageSpec::new(SectionRegistry::from_ids(["home", "about"]).unwrap())
    }

    fn layout() -> GeometrySnapshot {
        GeometrySnapshot::new()
            .with("home-section", Rect::band(0.0, 900.0))
            .with("about-section", Rect::band(900.0, 1800.0))
    }

    fn record() -> SessionTrace {
        let mut recorder = SessionRecorder::new(spec(), ScrollConfig::default());
        recorder.mount(&layout());
        for y in [200.0, 700.0, 1200.0] {
            recorder.handle_event(ViewportEvent::scroll(y), &layout().scrolled_by(y));
        }
        recorder.finish()
    }

    #[test]
    fn trace_shape() {
        let trace = record();
        assert!(matches!(trace.records[0], TraceRecord::Header { .. }));
        assert!(matches!(trace.records[1], TraceRecord::Mount { .. }));
        assert_eq!(trace.checkpoint_count(), 4);
        assert!(trace.final_checksum_chain().is_some());
    }

    #[test]
    fn replay_matches_recording() {
        let trace = record();
        let result = replay(spec(), &trace).unwrap();
        assert!(result.ok());
        assert_eq!(result.total_checkpoints, 4);
        assert_eq!(Some(result.final_checksum_chain), trace.final_checksum_chain());
    }

    #[test]
    fn replay_detects_tampered_geometry() {
        let mut trace = record();
        for record in &mut trace.records {
            if let TraceRecord::Event { seq: 1, geometry, .. } = record {
                *geometry = GeometrySnapshot::new();
            }
        }
        // With no geometry the tracker keeps "home" instead of moving to
        // "about" at scroll 700.
        let result = replay(spec(), &trace).unwrap();
        let mismatch = result.first_mismatch.expect("mismatch");
        assert_eq!(mismatch.tick, 3);
    }

    #[test]
    fn replay_requires_header() {
        let trace = SessionTrace { records: Vec::new() };
        assert_eq!(replay(spec(), &trace), Err(ReplayError::MissingHeader));
    }

    #[test]
    fn replay_rejects_unknown_schema() {
        let mut trace = record();
        trace.records[0] = TraceRecord::Header {
            schema: "folio-trace-v0".to_string(),
            config: ScrollConfig::default(),
        };
        assert!(matches!(
            replay(spec(), &trace),
            Err(ReplayError::SchemaMismatch { .. })
        ));
    }

    #[test]
    fn checksum_tracks_placement() {
        let session = PageSession::new(spec(), ScrollConfig::default());
        let mut state = session.state().clone();
        let before = state_checksum(&state);
        state.panel_offset_px = -5.0;
        // Only fields derived from the placement are hashed.
        assert_eq!(state_checksum(&state), before);
        state.nav_scrolled = true;
        assert_ne!(state_checksum(&state), before);
    }

    #[cfg(feature = "trace-json")]
    #[test]
    fn jsonl_round_trip_replays() {
        let trace = record();
        let text = trace.to_jsonl().unwrap();
        assert_eq!(text.lines().count(), trace.records.len());
        let decoded = SessionTrace::from_jsonl(&text).unwrap();
        assert!(replay(spec(), &decoded).unwrap().ok());
    }

    #[cfg(feature = "trace-json")]
    #[test]
    fn jsonl_keeps_fractional_offsets_exact() {
        let mut recorder = SessionRecorder::new(spec(), ScrollConfig::default());
        recorder.mount(&layout());
        recorder.handle_event(ViewportEvent::resize(1366.4, 768.7), &layout());
        for step in 0..2000u32 {
            let y = f64::from(step) * 0.917_3 + 123.456_789;
            recorder.handle_event(ViewportEvent::scroll(y), &layout().scrolled_by(y));
        }
        let trace = recorder.finish();

        let decoded = SessionTrace::from_jsonl(&trace.to_jsonl().unwrap()).unwrap();
        assert_eq!(decoded, trace);
        let result = replay(spec(), &decoded).unwrap();
        assert_eq!(result.first_mismatch, None);
        assert_eq!(result.total_checkpoints, 2002);
    }

    #[cfg(feature = "trace-json")]
    #[test]
    fn jsonl_reports_bad_line() {
        let err = SessionTrace::from_jsonl("{\"kind\":\"summary\"}\n").unwrap_err();
        assert!(matches!(err, ReplayError::Decode { line: 1, .. }));
    }
}
