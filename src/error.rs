//! Error types for the Stay Cost & Points Calculation Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur during a stay calculation.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the Stay Cost & Points Calculation Engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use stay_engine::error::EngineError;
///
/// let error = EngineError::CatalogNotFound {
///     path: "/missing/file.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Catalog file not found: /missing/file.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Catalog file was not found at the specified path.
    #[error("Catalog file not found: {path}")]
    CatalogNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Catalog file could not be parsed or failed validation.
    #[error("Failed to parse catalog file '{path}': {message}")]
    CatalogParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse or validation error.
        message: String,
    },

    /// A resort's calendar data is inconsistent (overlapping season
    /// periods, inverted date ranges).
    #[error("Invalid calendar for resort '{resort}': {message}")]
    InvalidCalendar {
        /// The resort whose calendar failed validation.
        resort: String,
        /// A description of the inconsistency.
        message: String,
    },

    /// Resort id was not found in the catalog.
    #[error("Resort not found: {id}")]
    ResortNotFound {
        /// The resort id that was not found.
        id: String,
    },

    /// A date falls outside every configured season period and holiday.
    ///
    /// Not retryable without changing the date or resort.
    #[error("Date {date} is outside the configured calendars of resort '{resort}'")]
    DateOutOfRange {
        /// The resort whose calendars were consulted.
        resort: String,
        /// The unsupported date.
        date: NaiveDate,
    },

    /// A season tier covers the date but carries no rate for the room type.
    #[error("No rate configured for room type '{room_type}' on date {date}")]
    RateNotFound {
        /// The room type id.
        room_type: String,
        /// The date for which the rate was requested.
        date: NaiveDate,
    },

    /// A stay request was malformed: non-positive night count, unknown
    /// room type id, or invalid settings. Surfaced immediately as a
    /// caller bug.
    #[error("Invalid stay request: {message}")]
    InvalidStay {
        /// A description of what made the request invalid.
        message: String,
    },

    /// A general calculation error occurred.
    #[error("Calculation error: {message}")]
    CalculationError {
        /// A description of the calculation error.
        message: String,
    },
}

impl EngineError {
    /// A stable machine-readable code for this error.
    ///
    /// Used in per-row failure outcomes and API error responses, where the
    /// display message is for humans and the code is for callers.
    pub fn code(&self) -> &'static str {
        match self {
            EngineError::CatalogNotFound { .. } => "CATALOG_NOT_FOUND",
            EngineError::CatalogParseError { .. } => "CATALOG_PARSE_ERROR",
            EngineError::InvalidCalendar { .. } => "INVALID_CALENDAR",
            EngineError::ResortNotFound { .. } => "RESORT_NOT_FOUND",
            EngineError::DateOutOfRange { .. } => "DATE_OUT_OF_RANGE",
            EngineError::RateNotFound { .. } => "RATE_NOT_FOUND",
            EngineError::InvalidStay { .. } => "INVALID_STAY",
            EngineError::CalculationError { .. } => "CALCULATION_ERROR",
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
