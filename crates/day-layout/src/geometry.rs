//! Percentage geometry for positioned events.
//!
//! All values are percentages of the view window; the rendering surface maps
//! them to pixels at draw time.

use serde::Serialize;

use crate::columns::ColumnAssignment;
use crate::config::LayoutConfig;
use crate::event::NormalizedEvent;
use crate::window::{minutes_between, ViewWindow};

/// Position and size of one event inside the day view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Layout {
    /// Offset from the window start, in percent of the window height.
    pub top: f64,
    /// Rendered duration, in percent of the window height.
    pub height: f64,
    /// Offset from the left edge, in percent of the day column width.
    pub left: f64,
    /// Width, in percent of the day column width.
    pub width: f64,
    /// Pixel floor for the rendered height.
    pub min_height_px: u32,
}

/// [`Layout`] rendered as CSS-ready strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LayoutStyle {
    pub top: String,
    pub height: String,
    pub left: String,
    pub width: String,
    pub min_height: String,
}

impl Layout {
    pub fn style(&self) -> LayoutStyle {
        LayoutStyle {
            top: percent(self.top),
            height: percent(self.height),
            left: percent(self.left),
            width: percent(self.width),
            min_height: format!("{}px", self.min_height_px),
        }
    }

    /// Inline CSS declarations for absolute positioning.
    pub fn css(&self) -> String {
        let s = self.style();
        format!(
            "top: {}; height: {}; left: {}; width: {}; min-height: {}",
            s.top, s.height, s.left, s.width, s.min_height
        )
    }
}

/// Resolve the geometry of `event` in `window`.
///
/// Height uses `max(duration, config.min_duration_minutes)` and is capped so
/// that `top + height <= 100`. Width is the column width less padding on both
/// sides, floored at zero.
pub fn compute_layout(
    event: &NormalizedEvent,
    assignment: &ColumnAssignment,
    window: &ViewWindow,
    config: &LayoutConfig,
) -> Layout {
    let total = window.total_minutes();
    let offset = window.minutes_from_start(event.clamped_start);
    let duration = minutes_between(event.clamped_start, event.clamped_end);
    let display = duration.max(config.min_duration_minutes as f64);

    let top = clamp_percent(offset / total * 100.0);
    let height = (display / total * 100.0).clamp(0.0, 100.0 - top);

    let pad = config.horizontal_padding_percent;
    let column_width = 100.0 / assignment.num_columns.max(1) as f64;
    let width = clamp_percent(column_width - 2.0 * pad);
    let left = clamp_percent(assignment.column_index as f64 * column_width + pad);

    Layout {
        top,
        height,
        left,
        width,
        min_height_px: config.min_height_px,
    }
}

fn clamp_percent(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 100.0)
}

fn percent(value: f64) -> String {
    let s = format!("{value:.4}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    format!("{s}%")
}

// ── Tests ───────────────────────────────────────────────────────────────────
