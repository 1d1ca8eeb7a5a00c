//! HTTP request handlers for the Stay Cost & Points Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{
    adjust_stay_for_holidays, build_reference_table, build_room_type_comparison,
    build_stay_breakdown, REFERENCE_WINDOW_NIGHTS,
};
use crate::models::Settings;

use super::request::{BreakdownRequest, CompareRequest, ReferenceRequest};
use super::response::{
    ApiError, ApiErrorResponse, BreakdownResponse, CompareResponse, ReferenceResponse,
};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/breakdown", post(breakdown_handler))
        .route("/compare", post(compare_handler))
        .route("/reference", post(reference_handler))
        .with_state(state)
}

/// Unpacks a JSON body, mapping rejections to a 400 response.
fn parse_json<T>(
    payload: Result<Json<T>, JsonRejection>,
    correlation_id: Uuid,
) -> Result<T, Response> {
    match payload {
        Ok(Json(req)) => Ok(req),
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
                    let body_text = err.body_text();
                    warn!(
                        correlation_id = %correlation_id,
                        error = %body_text,
                        "JSON data error"
                    );
                    if body_text.contains("missing field") {
                        ApiError::new("VALIDATION_ERROR", body_text)
                    } else {
                        ApiError::malformed_json(body_text)
                    }
                }
                JsonRejection::JsonSyntaxError(err) => {
                    warn!(
                        correlation_id = %correlation_id,
                        error = %err,
                        "JSON syntax error"
                    );
                    ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
                }
                JsonRejection::MissingJsonContentType(_) => ApiError::new(
                    "MISSING_CONTENT_TYPE",
                    "Content-Type must be application/json",
                ),
                _ => ApiError::malformed_json("Failed to parse request body"),
            };
            Err((
                StatusCode::BAD_REQUEST,
                [(header::CONTENT_TYPE, "application/json")],
                Json(error),
            )
                .into_response())
        }
    }
}

/// The request's settings, or the catalog defaults when omitted.
fn effective_settings(state: &AppState, settings: Option<Settings>) -> Settings {
    settings.unwrap_or_else(|| state.catalog().default_settings().clone())
}

fn engine_error_response(correlation_id: Uuid, err: crate::error::EngineError) -> Response {
    warn!(correlation_id = %correlation_id, error = %err, "Calculation failed");
    let api_error: ApiErrorResponse = err.into();
    (
        api_error.status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(api_error.error),
    )
        .into_response()
}

/// Handler for POST /breakdown endpoint.
///
/// Prices one stay in one room type. Stays clipping a holiday edge are
/// widened to cover the holiday whole; the response reports both the
/// requested and the priced dates.
async fn breakdown_handler(
    State(state): State<AppState>,
    payload: Result<Json<BreakdownRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing breakdown request");

    let request = match parse_json(payload, correlation_id) {
        Ok(req) => req,
        Err(response) => return response,
    };
    let settings = effective_settings(&state, request.settings);

    let resort = match state.catalog().get_resort(&request.resort_id) {
        Ok(resort) => resort,
        Err(err) => return engine_error_response(correlation_id, err),
    };

    let (check_in, nights, holiday_adjusted) =
        adjust_stay_for_holidays(resort, request.check_in, request.nights);

    let start_time = Instant::now();
    match build_stay_breakdown(resort, &request.room_type_id, check_in, nights, &settings) {
        Ok(breakdown) => {
            info!(
                correlation_id = %correlation_id,
                resort_id = %request.resort_id,
                room_type_id = %request.room_type_id,
                nights,
                holiday_adjusted,
                total_points = %breakdown.total_points,
                duration_us = start_time.elapsed().as_micros(),
                "Breakdown completed successfully"
            );
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                Json(BreakdownResponse {
                    calculation_id: correlation_id,
                    engine_version: env!("CARGO_PKG_VERSION").to_string(),
                    resort_id: request.resort_id,
                    requested_check_in: request.check_in,
                    requested_nights: request.nights,
                    check_in,
                    nights,
                    holiday_adjusted,
                    breakdown,
                }),
            )
                .into_response()
        }
        Err(err) => engine_error_response(correlation_id, err),
    }
}

/// Handler for POST /compare endpoint.
///
/// Prices the same stay across every room type of the resort, with the
/// same holiday widening as `/breakdown`. Row-level failures are reported
/// inside the rows; only request-level problems produce an error status.
async fn compare_handler(
    State(state): State<AppState>,
    payload: Result<Json<CompareRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing compare request");

    let request = match parse_json(payload, correlation_id) {
        Ok(req) => req,
        Err(response) => return response,
    };
    let settings = effective_settings(&state, request.settings);

    let resort = match state.catalog().get_resort(&request.resort_id) {
        Ok(resort) => resort,
        Err(err) => return engine_error_response(correlation_id, err),
    };

    let (check_in, nights, holiday_adjusted) =
        adjust_stay_for_holidays(resort, request.check_in, request.nights);

    match build_room_type_comparison(resort, check_in, nights, &settings) {
        Ok(rows) => {
            info!(
                correlation_id = %correlation_id,
                resort_id = %request.resort_id,
                rows = rows.len(),
                holiday_adjusted,
                "Comparison completed successfully"
            );
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                Json(CompareResponse {
                    calculation_id: correlation_id,
                    engine_version: env!("CARGO_PKG_VERSION").to_string(),
                    resort_id: request.resort_id,
                    requested_check_in: request.check_in,
                    requested_nights: request.nights,
                    check_in,
                    nights,
                    holiday_adjusted,
                    rows,
                }),
            )
                .into_response()
        }
        Err(err) => engine_error_response(correlation_id, err),
    }
}

/// Handler for POST /reference endpoint.
///
/// Builds the season/holiday reference table for one room type.
async fn reference_handler(
    State(state): State<AppState>,
    payload: Result<Json<ReferenceRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing reference request");

    let request = match parse_json(payload, correlation_id) {
        Ok(req) => req,
        Err(response) => return response,
    };
    let settings = effective_settings(&state, request.settings);

    let resort = match state.catalog().get_resort(&request.resort_id) {
        Ok(resort) => resort,
        Err(err) => return engine_error_response(correlation_id, err),
    };

    match build_reference_table(resort, &request.room_type_id, &settings) {
        Ok(entries) => {
            info!(
                correlation_id = %correlation_id,
                resort_id = %request.resort_id,
                room_type_id = %request.room_type_id,
                entries = entries.len(),
                "Reference table completed successfully"
            );
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                Json(ReferenceResponse {
                    calculation_id: correlation_id,
                    engine_version: env!("CARGO_PKG_VERSION").to_string(),
                    resort_id: request.resort_id,
                    room_type_id: request.room_type_id,
                    window_nights: REFERENCE_WINDOW_NIGHTS,
                    entries,
                }),
            )
                .into_response()
        }
        Err(err) => engine_error_response(correlation_id, err),
    }
}
