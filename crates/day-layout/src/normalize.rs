//! Event normalization: parse, filter and clamp raw events to the view window.
//!
//! Bad records never fail the batch. Each one is dropped with a
//! [`DroppedEvent`] warning so a single malformed upstream row cannot blank
//! the whole day view.

use chrono::{DateTime, Utc};

use crate::event::{DropReason, DroppedEvent, NormalizedEvent, RawEvent};
use crate::window::ViewWindow;

/// Result of [`normalize_events`]: surviving events plus drop warnings.
#[derive(Debug, Clone, Default)]
pub struct Normalized {
    pub events: Vec<NormalizedEvent>,
    pub dropped: Vec<DroppedEvent>,
}

/// Parse and clamp `events` against `window`.
///
/// - unparseable start or end → [`DropReason::InvalidDate`]
/// - end before start → [`DropReason::InvertedRange`]
/// - `end <= window.start || start >= window.end` → [`DropReason::OutsideWindow`]
/// - id shared with another surviving event → [`DropReason::DuplicateId`]
///   for all but the one with the smallest `(start, end, name, status)`
///
/// Survivors get `clamped_start = max(start, window.start)` and
/// `clamped_end = min(end, window.end)`. Callers must not rely on the output
/// order.
pub fn normalize_events(events: &[RawEvent], window: &ViewWindow) -> Normalized {
    let mut out = Normalized::default();
    let mut candidates: Vec<NormalizedEvent> = Vec::with_capacity(events.len());

    for (input_index, raw) in events.iter().enumerate() {
        let start = raw.start.resolve(&window.timezone);
        let end = raw.end.resolve(&window.timezone);
        let (start, end) = match (start, end) {
            (Some(s), Some(e)) => (s, e),
            (s, _) => {
                let field = if s.is_none() { "start" } else { "end" };
                tracing::warn!(id = %raw.id, field, "dropping event with unparseable time");
                out.dropped.push(DroppedEvent {
                    id: raw.id.clone(),
                    reason: DropReason::InvalidDate,
                    detail: format!("unparseable {field} time"),
                });
                continue;
            }
        };

        if end < start {
            tracing::warn!(id = %raw.id, %start, %end, "dropping event that ends before it starts");
            out.dropped.push(DroppedEvent {
                id: raw.id.clone(),
                reason: DropReason::InvertedRange,
                detail: format!("end {} precedes start {}", end.to_rfc3339(), start.to_rfc3339()),
            });
            continue;
        }

        if end <= window.start || start >= window.end {
            tracing::debug!(id = %raw.id, %start, %end, "event outside view window");
            out.dropped.push(DroppedEvent {
                id: raw.id.clone(),
                reason: DropReason::OutsideWindow,
                detail: format!(
                    "{} to {} does not intersect the view window",
                    start.to_rfc3339(),
                    end.to_rfc3339()
                ),
            });
            continue;
        }

        candidates.push(NormalizedEvent {
            id: raw.id.clone(),
            name: raw.name.clone(),
            status: raw.status.clone(),
            original_start: start,
            original_end: end,
            clamped_start: start.max(window.start),
            clamped_end: end.min(window.end),
            input_index,
        });
    }

    // Duplicate ids resolve by content, never by input position.
    candidates.sort_by(|a, b| {
        a.id.cmp(&b.id)
            .then_with(|| survivor_key(a).cmp(&survivor_key(b)))
            .then_with(|| a.input_index.cmp(&b.input_index))
    });
    for event in candidates {
        match out.events.last() {
            Some(kept) if kept.id == event.id => {
                tracing::warn!(id = %event.id, "dropping event with duplicate id");
                out.dropped.push(DroppedEvent {
                    id: event.id.clone(),
                    reason: DropReason::DuplicateId,
                    detail: format!(
                        "{} to {} shares its id with the event kept at {}",
                        event.original_start.to_rfc3339(),
                        event.original_end.to_rfc3339(),
                        kept.original_start.to_rfc3339()
                    ),
                });
            }
            _ => out.events.push(event),
        }
    }

    out
}

type SurvivorKey<'a> = (
    DateTime<Utc>,
    DateTime<Utc>,
    Option<&'a str>,
    Option<&'a str>,
);

/// Earliest start wins among events sharing an id, then earliest end.
fn survivor_key(e: &NormalizedEvent) -> SurvivorKey<'_> {
    (
        e.original_start,
        e.original_end,
        e.name.as_deref(),
        e.status.as_deref(),
    )
}

// ── Tests ───────────────────────────────────────────────────────────────────
