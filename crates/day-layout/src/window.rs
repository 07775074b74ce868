//! The visible time-of-day window for a calendar day.
//!
//! A [`ViewWindow`] is recomputed for every render from the reference day and
//! a [`LayoutConfig`]. It is never persisted.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::config::LayoutConfig;
use crate::error::LayoutError;

/// The visible interval `[start, end)` of one day in the day view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewWindow {
    /// Reference day at the configured window start (06:00 by default).
    pub start: DateTime<Utc>,
    /// Reference day at the configured window end (23:30 by default).
    pub end: DateTime<Utc>,
    /// Zone in which the reference day and naive event times are read.
    pub timezone: Tz,
}

impl ViewWindow {
    /// Length of the window in minutes (1050 for the default window).
    pub fn total_minutes(&self) -> f64 {
        minutes_between(self.start, self.end)
    }

    /// Minutes from the window start to `t` (negative before the window).
    pub fn minutes_from_start(&self, t: DateTime<Utc>) -> f64 {
        minutes_between(self.start, t)
    }

    /// Whether `t` lies inside `[start, end)`.
    pub fn contains(&self, t: DateTime<Utc>) -> bool {
        self.start <= t && t < self.end
    }
}

/// Define the default 06:00–23:30 window of `day` in UTC.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use day_layout::window::define_window;
///
/// let window = define_window(NaiveDate::from_ymd_opt(2026, 3, 16).unwrap());
/// assert_eq!(window.total_minutes(), 1050.0);
/// ```
pub fn define_window(day: NaiveDate) -> ViewWindow {
    define_window_in(day, Tz::UTC, &LayoutConfig::default())
}

/// Define the window of `day` in the zone `tz` using the bounds in `config`.
///
/// Always succeeds. A bound that falls in a DST gap resolves to the first
/// valid local instant after it; an ambiguous bound resolves to the earlier
/// instant. If DST pushes the end to or before the start, the end is placed
/// one minute after the start.
pub fn define_window_in(day: NaiveDate, tz: Tz, config: &LayoutConfig) -> ViewWindow {
    let start = resolve_local(&tz, day.and_time(config.window_start));
    let mut end = resolve_local(&tz, day.and_time(config.window_end));
    if end <= start {
        end = start + Duration::minutes(1);
    }
    tracing::debug!(%day, %tz, %start, %end, "defined view window");
    ViewWindow {
        start,
        end,
        timezone: tz,
    }
}

/// Parse an IANA timezone name into [`Tz`].
///
/// # Errors
///
/// Returns [`LayoutError::InvalidTimezone`] if the name is not a known zone.
pub fn parse_timezone(s: &str) -> Result<Tz, LayoutError> {
    s.trim()
        .parse::<Tz>()
        .map_err(|_| LayoutError::InvalidTimezone(format!("'{}'", s)))
}

/// Parse a `YYYY-MM-DD` reference day.
///
/// # Errors
///
/// Returns [`LayoutError::InvalidDate`] if the string is not a calendar date.
pub fn parse_day(s: &str) -> Result<NaiveDate, LayoutError> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|e| LayoutError::InvalidDate(format!("'{}': {}", s, e)))
}

/// Minutes between two instants, with sub-minute precision.
pub(crate) fn minutes_between(from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
    (to - from).num_milliseconds() as f64 / 60_000.0
}

/// Map a local wall-clock time to an instant, stepping past DST gaps.
pub(crate) fn resolve_local(tz: &Tz, naive: NaiveDateTime) -> DateTime<Utc> {
    if let Some(dt) = tz.from_local_datetime(&naive).earliest() {
        return dt.with_timezone(&Utc);
    }
    // Inside a gap: walk forward until the wall clock exists again.
    let mut probe = naive;
    for _ in 0..(4 * 60) {
        probe += Duration::minutes(1);
        if let Some(dt) = tz.from_local_datetime(&probe).earliest() {
            return dt.with_timezone(&Utc);
        }
    }
    Utc.from_utc_datetime(&naive)
}

// ── Tests ───────────────────────────────────────────────────────────────────
