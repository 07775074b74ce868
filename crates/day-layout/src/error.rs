//! Error types for day-layout boundary parsing.
//!
//! The layout engine itself never fails; these errors come only from the
//! helpers that turn user-supplied text (timezones, dates, config, event
//! JSON) into typed inputs.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LayoutError {
    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, LayoutError>;
