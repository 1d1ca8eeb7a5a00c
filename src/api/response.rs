//! Response types for the Stay Cost & Points Engine API.
//!
//! This module defines the success envelopes for the three endpoints and
//! the error response structures for the HTTP API.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::EngineError;
use crate::models::{ReferenceEntry, RoomTypeSummary, StayBreakdown};

/// Response body for the `/breakdown` endpoint.
///
/// Carries the stay as actually priced: when the requested dates clipped
/// a holiday, `check_in` and `nights` reflect the widened stay and
/// `holiday_adjusted` is set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreakdownResponse {
    /// Unique id for this calculation.
    pub calculation_id: Uuid,
    /// The engine version that produced the result.
    pub engine_version: String,
    /// The resort the stay was priced at.
    pub resort_id: String,
    /// The check-in date as requested.
    pub requested_check_in: NaiveDate,
    /// The night count as requested.
    pub requested_nights: u32,
    /// The check-in date actually priced.
    pub check_in: NaiveDate,
    /// The night count actually priced.
    pub nights: u32,
    /// Whether the stay was widened to cover a holiday whole.
    pub holiday_adjusted: bool,
    /// The per-night ledger and totals.
    pub breakdown: StayBreakdown,
}

/// Response body for the `/compare` endpoint.
///
/// Holiday widening applies exactly as in `/breakdown`, so both endpoints
/// price the same stay for the same request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompareResponse {
    /// Unique id for this calculation.
    pub calculation_id: Uuid,
    /// The engine version that produced the result.
    pub engine_version: String,
    /// The resort the stay was priced at.
    pub resort_id: String,
    /// The check-in date as requested.
    pub requested_check_in: NaiveDate,
    /// The night count as requested.
    pub requested_nights: u32,
    /// The check-in date actually priced.
    pub check_in: NaiveDate,
    /// The night count actually priced.
    pub nights: u32,
    /// Whether the stay was widened to cover a holiday whole.
    pub holiday_adjusted: bool,
    /// One row per room type, in display order.
    pub rows: Vec<RoomTypeSummary>,
}

/// Response body for the `/reference` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferenceResponse {
    /// Unique id for this calculation.
    pub calculation_id: Uuid,
    /// The engine version that produced the result.
    pub engine_version: String,
    /// The resort sampled.
    pub resort_id: String,
    /// The room type sampled.
    pub room_type_id: String,
    /// The sample window length in nights.
    pub window_nights: u32,
    /// One row per season tier and holiday, sorted by anchor date.
    pub entries: Vec<ReferenceEntry>,
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let code = error.code().to_string();
        let status = match &error {
            EngineError::ResortNotFound { .. } => StatusCode::NOT_FOUND,
            EngineError::DateOutOfRange { .. }
            | EngineError::RateNotFound { .. }
            | EngineError::InvalidStay { .. } => StatusCode::BAD_REQUEST,
            EngineError::CatalogNotFound { .. }
            | EngineError::CatalogParseError { .. }
            | EngineError::InvalidCalendar { .. }
            | EngineError::CalculationError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };
        ApiErrorResponse {
            status,
            error: ApiError::new(code, error.to_string()),
        }
    }
}
