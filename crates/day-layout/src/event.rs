//! Event types flowing through the layout pipeline.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::LayoutError;
use crate::window::resolve_local;

/// Formats accepted for naive (offset-less) event times, read in the view's zone.
const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// A start or end time as supplied by the event source.
///
/// JSON integers are epoch milliseconds; JSON strings are kept as text and
/// parsed during normalization. Any other JSON value (null, fractional or
/// out-of-range numbers, objects) and a missing field are kept as
/// [`EventTime::Unusable`], so a malformed value drops one event instead of
/// rejecting the whole batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EventTime {
    EpochMillis(i64),
    Text(String),
    #[serde(skip_deserializing)]
    Instant(DateTime<Utc>),
    Unusable(serde_json::Value),
}

impl Default for EventTime {
    fn default() -> Self {
        EventTime::Unusable(serde_json::Value::Null)
    }
}

impl EventTime {
    /// Resolve to an instant. Naive text is interpreted in `tz`.
    pub fn resolve(&self, tz: &Tz) -> Option<DateTime<Utc>> {
        match self {
            EventTime::Instant(dt) => Some(*dt),
            EventTime::EpochMillis(ms) => Utc.timestamp_millis_opt(*ms).single(),
            EventTime::Text(s) => parse_event_time(s, tz),
            EventTime::Unusable(_) => None,
        }
    }
}

impl From<DateTime<Utc>> for EventTime {
    fn from(dt: DateTime<Utc>) -> Self {
        EventTime::Instant(dt)
    }
}

impl From<&str> for EventTime {
    fn from(s: &str) -> Self {
        EventTime::Text(s.to_string())
    }
}

impl From<String> for EventTime {
    fn from(s: String) -> Self {
        EventTime::Text(s)
    }
}

/// An event as delivered by the event source. Never mutated by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawEvent {
    pub id: String,
    #[serde(default)]
    pub start: EventTime,
    #[serde(default)]
    pub end: EventTime,
    /// Display name; not read by the layout.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Display status (e.g. "approved"); not read by the layout.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl RawEvent {
    pub fn new(id: impl Into<String>, start: impl Into<EventTime>, end: impl Into<EventTime>) -> Self {
        Self {
            id: id.into(),
            start: start.into(),
            end: end.into(),
            name: None,
            status: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }
}

/// An event that survived normalization, clamped to the view window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedEvent {
    pub id: String,
    pub name: Option<String>,
    pub status: Option<String>,
    pub original_start: DateTime<Utc>,
    pub original_end: DateTime<Utc>,
    /// `max(original_start, window.start)`.
    pub clamped_start: DateTime<Utc>,
    /// `min(original_end, window.end)`.
    pub clamped_end: DateTime<Utc>,
    /// Position in the caller's input, used only as a last-resort tie-break.
    pub input_index: usize,
}

impl NormalizedEvent {
    /// Strict overlap of clamped intervals. Touching endpoints do not overlap.
    pub fn overlaps(&self, other: &NormalizedEvent) -> bool {
        self.clamped_start < other.clamped_end && other.clamped_start < self.clamped_end
    }

    pub fn clipped_start(&self) -> bool {
        self.clamped_start > self.original_start
    }

    pub fn clipped_end(&self) -> bool {
        self.clamped_end < self.original_end
    }
}

/// Why an input event is absent from the layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DropReason {
    /// Start or end could not be parsed into an instant.
    InvalidDate,
    /// The event has no overlap with the view window.
    OutsideWindow,
    /// The end precedes the start.
    InvertedRange,
    /// Another surviving event with the same id was kept instead.
    DuplicateId,
}

impl std::fmt::Display for DropReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            DropReason::InvalidDate => "invalid-date",
            DropReason::OutsideWindow => "outside-window",
            DropReason::InvertedRange => "inverted-range",
            DropReason::DuplicateId => "duplicate-id",
        })
    }
}

/// A warning record for an event that was left out of the layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DroppedEvent {
    pub id: String,
    pub reason: DropReason,
    pub detail: String,
}

/// Parse a JSON array of events.
///
/// Individual time values are not validated here, and a missing `start` or
/// `end` is accepted; see [`normalize_events`](crate::normalize::normalize_events).
///
/// # Errors
///
/// Returns [`LayoutError::InvalidInput`] if the JSON is not an array of event
/// objects with a string `id`.
pub fn events_from_json(s: &str) -> Result<Vec<RawEvent>, LayoutError> {
    serde_json::from_str(s).map_err(|e| LayoutError::InvalidInput(e.to_string()))
}

/// Parse an event time: RFC 3339 first, then naive local formats read in `tz`.
fn parse_event_time(s: &str, tz: &Tz) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|naive| resolve_local(tz, naive))
}

// ── Tests ───────────────────────────────────────────────────────────────────
