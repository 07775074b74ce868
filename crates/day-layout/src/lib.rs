//! # day-layout
//!
//! Deterministic day-view layout for calendar events.
//!
//! Given events that may arbitrarily overlap, the engine places each one in a
//! rectangle on a single time axis so that overlapping events never collide
//! and non-overlapping events keep the full width. It is a pure function of
//! `(events, reference day)`: no clock access, no I/O, no shared state.
//!
//! ## Modules
//!
//! - [`window`] — the visible 06:00–23:30 interval of a reference day
//! - [`event`] — raw input events, normalized events, drop warnings
//! - [`normalize`] — parse, filter and clamp events to the window
//! - [`columns`] — pack overlap clusters into columns
//! - [`geometry`] — percentage top/height/left/width per event
//! - [`engine`] — the [`layout_day`] pipeline
//! - [`config`] — layout constants
//! - [`error`] — error types for boundary parsing

pub mod columns;
pub mod config;
pub mod engine;
pub mod error;
pub mod event;
pub mod geometry;
pub mod normalize;
pub mod window;

pub use columns::{assign_columns, overlap_clusters, ColumnAssignment};
pub use config::LayoutConfig;
pub use engine::{layout_day, layout_day_with_options, DayLayout, LayoutOptions, PositionedEvent};
pub use error::LayoutError;
pub use event::{events_from_json, DropReason, DroppedEvent, EventTime, NormalizedEvent, RawEvent};
pub use geometry::{compute_layout, Layout, LayoutStyle};
pub use normalize::{normalize_events, Normalized};
pub use window::{define_window, define_window_in, parse_day, parse_timezone, ViewWindow};
