//! Layout constants.
//!
//! A [`LayoutConfig`] is the fixed constant set a render uses for every event:
//! the visible time-of-day window, the minimum visual duration, and the
//! horizontal padding between columns. [`LayoutConfig::default`] is the
//! day view's standard 06:00–23:30 window.

use chrono::{Duration, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::LayoutError;

/// `(hour, minute)` at which the day view opens.
pub const DEFAULT_WINDOW_START: (u32, u32) = (6, 0);
/// `(hour, minute)` at which the day view closes.
pub const DEFAULT_WINDOW_END: (u32, u32) = (23, 30);
/// Events shorter than this are drawn at this height.
pub const DEFAULT_MIN_DURATION_MINUTES: i64 = 15;
/// Padding on each side of an event inside its column, in percent.
pub const DEFAULT_HORIZONTAL_PADDING_PERCENT: f64 = 0.5;
/// Pixel floor for rendered height, independent of the percentage height.
pub const DEFAULT_MIN_HEIGHT_PX: u32 = 20;

/// Padding must leave room for a visible event in a single column.
const MAX_HORIZONTAL_PADDING_PERCENT: f64 = 25.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Local time-of-day at which the visible window opens.
    #[serde(with = "time_of_day")]
    pub window_start: NaiveTime,
    /// Local time-of-day at which the visible window closes.
    #[serde(with = "time_of_day")]
    pub window_end: NaiveTime,
    /// Minimum rendered duration in minutes. Affects height only, never overlap.
    pub min_duration_minutes: i64,
    /// Horizontal padding applied to both sides of each event, in percent.
    pub horizontal_padding_percent: f64,
    /// Pixel floor for rendered height.
    pub min_height_px: u32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            window_start: clock(DEFAULT_WINDOW_START),
            window_end: clock(DEFAULT_WINDOW_END),
            min_duration_minutes: DEFAULT_MIN_DURATION_MINUTES,
            horizontal_padding_percent: DEFAULT_HORIZONTAL_PADDING_PERCENT,
            min_height_px: DEFAULT_MIN_HEIGHT_PX,
        }
    }
}

/// Time of day `hour:minute` past midnight.
fn clock((hour, minute): (u32, u32)) -> NaiveTime {
    NaiveTime::MIN + Duration::minutes(i64::from(hour) * 60 + i64::from(minute))
}

impl LayoutConfig {
    /// Parse a JSON config (every field optional) and validate it.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::InvalidConfig`] if the JSON is malformed or the
    /// resulting config fails [`LayoutConfig::validate`].
    pub fn from_json_str(s: &str) -> Result<Self, LayoutError> {
        let config: LayoutConfig =
            serde_json::from_str(s).map_err(|e| LayoutError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check the invariants the engine relies on.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::InvalidConfig`] when the window is empty or
    /// inverted, the minimum duration is negative, or the padding is not in
    /// `[0, 25)` percent.
    pub fn validate(&self) -> Result<(), LayoutError> {
        if self.window_end <= self.window_start {
            return Err(LayoutError::InvalidConfig(format!(
                "window end {} must be after window start {}",
                self.window_end, self.window_start
            )));
        }
        if self.min_duration_minutes < 0 {
            return Err(LayoutError::InvalidConfig(format!(
                "minimum duration must not be negative: {}",
                self.min_duration_minutes
            )));
        }
        let pad = self.horizontal_padding_percent;
        if !pad.is_finite() || !(0.0..MAX_HORIZONTAL_PADDING_PERCENT).contains(&pad) {
            return Err(LayoutError::InvalidConfig(format!(
                "horizontal padding must be in [0, {MAX_HORIZONTAL_PADDING_PERCENT}) percent: {pad}"
            )));
        }
        Ok(())
    }
}

/// Serde adapter accepting `HH:MM` or `HH:MM:SS` and writing `HH:MM:SS`.
mod time_of_day {
    use chrono::{Duration, NaiveTime};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(t: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&t.format("%H:%M:%S").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let s = String::deserialize(deserializer)?;
        parse(&s).ok_or_else(|| de::Error::custom(format!("invalid time of day: '{s}'")))
    }

    pub(crate) fn parse(s: &str) -> Option<NaiveTime> {
        let s = s.trim();
        NaiveTime::parse_from_str(s, "%H:%M:%S")
            .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M"))
            .ok()
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn test_default_window_is_six_to_half_past_eleven() {
        let config = LayoutConfig::default();
        assert_eq!(config.window_start, NaiveTime::from_hms_opt(6, 0, 0).unwrap());
        assert_eq!(config.window_end, NaiveTime::from_hms_opt(23, 30, 0).unwrap());
        assert_eq!(config.min_duration_minutes, 15);
        assert_eq!(config.horizontal_padding_percent, 0.5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_window_constants_match_default() {
        let config = LayoutConfig::default();
        let hm = |t: NaiveTime| (t.hour(), t.minute());
        assert_eq!(hm(config.window_start), DEFAULT_WINDOW_START);
        assert_eq!(hm(config.window_end), DEFAULT_WINDOW_END);
        assert_eq!(clock((0, 0)), NaiveTime::MIN);
        assert_eq!(clock((23, 59)), NaiveTime::from_hms_opt(23, 59, 0).unwrap());
    }

    #[test]
    fn test_from_json_partial_overrides() {
        let config = LayoutConfig::from_json_str(r#"{"window_start": "08:00"}"#).unwrap();
        assert_eq!(config.window_start, NaiveTime::from_hms_opt(8, 0, 0).unwrap());
        assert_eq!(config.window_end, LayoutConfig::default().window_end);
        assert_eq!(config.min_height_px, DEFAULT_MIN_HEIGHT_PX);
    }

    #[test]
    fn test_from_json_accepts_seconds() {
        let config = LayoutConfig::from_json_str(r#"{"window_end": "22:15:30"}"#).unwrap();
        assert_eq!(config.window_end, NaiveTime::from_hms_opt(22, 15, 30).unwrap());
    }

    #[test]
    fn test_from_json_rejects_inverted_window() {
        let err = LayoutConfig::from_json_str(r#"{"window_start": "20:00", "window_end": "08:00"}"#)
            .unwrap_err()
            .to_string();
        assert!(err.contains("Invalid config"), "got: {err}");
    }

    #[test]
    fn test_from_json_rejects_bad_time() {
        let result = LayoutConfig::from_json_str(r#"{"window_start": "6am"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_rejects_negative_duration() {
        let config = LayoutConfig {
            min_duration_minutes: -5,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_oversized_padding() {
        let config = LayoutConfig {
            horizontal_padding_percent: 30.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = LayoutConfig {
            horizontal_padding_percent: f64::NAN,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_serializes_times_with_seconds() {
        let json = serde_json::to_value(LayoutConfig::default()).unwrap();
        assert_eq!(json["window_start"], "06:00:00");
        assert_eq!(json["window_end"], "23:30:00");
    }
}
