//! WASM bindings for the day layout engine.
//!
//! Browser rendering surfaces pass events as a JSON string and receive the
//! [`DayLayout`](day_layout::DayLayout) back as JSON.

use day_layout::{events_from_json, layout_day_with_options, parse_day, parse_timezone, LayoutOptions};
use wasm_bindgen::prelude::*;

/// Lay out a day of events.
///
/// `events_json` is a JSON array of `{id, start, end, name?, status?}`,
/// `day` is `YYYY-MM-DD`, `timezone` is an IANA zone name.
#[wasm_bindgen(js_name = layoutDay)]
pub fn layout_day(events_json: &str, day: &str, timezone: &str) -> Result<String, JsValue> {
    layout_day_json(events_json, day, timezone).map_err(|e| JsValue::from_str(&e))
}

/// JSON-in/JSON-out core of [`layout_day`], usable off the WASM target.
pub fn layout_day_json(events_json: &str, day: &str, timezone: &str) -> Result<String, String> {
    let timezone = parse_timezone(timezone).map_err(|e| e.to_string())?;
    let day = parse_day(day).map_err(|e| e.to_string())?;
    let events = events_from_json(events_json).map_err(|e| e.to_string())?;
    let options = LayoutOptions {
        timezone,
        ..Default::default()
    };
    let layout = layout_day_with_options(&events, day, &options);
    serde_json::to_string(&layout).map_err(|e| e.to_string())
}
