//! Day layout entry points.
//!
//! [`layout_day`] runs the whole pipeline: define the window, normalize and
//! clamp events, pack overlap clusters into columns, and resolve geometry.
//! It is a pure function of its inputs and never fails; bad records come
//! back as [`DroppedEvent`] warnings next to the result.

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::Serialize;

use crate::columns::{assign_columns, ColumnAssignment};
use crate::config::LayoutConfig;
use crate::event::{DroppedEvent, RawEvent};
use crate::geometry::{compute_layout, Layout};
use crate::normalize::normalize_events;
use crate::window::define_window_in;

/// Options for [`layout_day_with_options`].
#[derive(Debug, Clone)]
pub struct LayoutOptions {
    /// Zone in which the reference day and naive event times are read.
    pub timezone: Tz,
    /// Window bounds, minimum duration and padding.
    pub config: LayoutConfig,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            timezone: Tz::UTC,
            config: LayoutConfig::default(),
        }
    }
}

/// One event placed in the day view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionedEvent {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    pub original_start: DateTime<Utc>,
    pub original_end: DateTime<Utc>,
    pub clamped_start: DateTime<Utc>,
    pub clamped_end: DateTime<Utc>,
    /// The event began before the window opened.
    pub clipped_start: bool,
    /// The event continues after the window closes.
    pub clipped_end: bool,
    pub column: ColumnAssignment,
    pub layout: Layout,
}

/// The laid-out day: positioned events plus warnings for dropped ones.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayLayout {
    pub day: NaiveDate,
    pub timezone: String,
    pub window_start: DateTime<Utc>,
    pub window_end: DateTime<Utc>,
    /// Sorted by clamped start, then column, then id.
    pub events: Vec<PositionedEvent>,
    pub dropped: Vec<DroppedEvent>,
}

impl DayLayout {
    pub fn get(&self, id: &str) -> Option<&PositionedEvent> {
        self.events.iter().find(|e| e.id == id)
    }
}

/// Lay out `events` for `day` using UTC and the default 06:00–23:30 window.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use day_layout::{layout_day, RawEvent};
///
/// let events = vec![
///     RawEvent::new("a", "2026-03-16T09:00:00Z", "2026-03-16T10:00:00Z"),
///     RawEvent::new("b", "2026-03-16T09:30:00Z", "2026-03-16T10:30:00Z"),
/// ];
/// let day = layout_day(&events, NaiveDate::from_ymd_opt(2026, 3, 16).unwrap());
/// assert_eq!(day.get("a").unwrap().column.num_columns, 2);
/// assert_eq!(day.get("b").unwrap().column.column_index, 1);
/// ```
pub fn layout_day(events: &[RawEvent], day: NaiveDate) -> DayLayout {
    layout_day_with_options(events, day, &LayoutOptions::default())
}

/// Lay out `events` for `day` with an explicit timezone and config.
pub fn layout_day_with_options(
    events: &[RawEvent],
    day: NaiveDate,
    options: &LayoutOptions,
) -> DayLayout {
    let window = define_window_in(day, options.timezone, &options.config);
    let normalized = normalize_events(events, &window);
    let columns = assign_columns(&normalized.events);

    let mut positioned: Vec<PositionedEvent> = normalized
        .events
        .iter()
        .filter_map(|event| {
            let column = *columns.get(&event.id)?;
            Some(PositionedEvent {
                id: event.id.clone(),
                name: event.name.clone(),
                status: event.status.clone(),
                original_start: event.original_start,
                original_end: event.original_end,
                clamped_start: event.clamped_start,
                clamped_end: event.clamped_end,
                clipped_start: event.clipped_start(),
                clipped_end: event.clipped_end(),
                column,
                layout: compute_layout(event, &column, &window, &options.config),
            })
        })
        .collect();
    positioned.sort_by(|a, b| {
        a.clamped_start
            .cmp(&b.clamped_start)
            .then_with(|| a.column.column_index.cmp(&b.column.column_index))
            .then_with(|| a.id.cmp(&b.id))
    });

    let mut dropped = normalized.dropped;
    dropped.sort_by(|a, b| {
        a.id.cmp(&b.id)
            .then_with(|| a.reason.cmp(&b.reason))
            .then_with(|| a.detail.cmp(&b.detail))
    });

    tracing::debug!(
        %day,
        positioned = positioned.len(),
        dropped = dropped.len(),
        "laid out day"
    );

    DayLayout {
        day,
        timezone: options.timezone.name().to_string(),
        window_start: window.start,
        window_end: window.end,
        events: positioned,
        dropped,
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
