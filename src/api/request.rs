//! Request types for the Stay Cost & Points Engine API.
//!
//! This module defines the JSON request structures for the `/breakdown`,
//! `/compare`, and `/reference` endpoints. All three accept an optional
//! `settings` object; when omitted, the catalog's default settings apply.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::Settings;

/// Request body for the `/breakdown` endpoint.
///
/// Prices one stay in one room type and returns the per-night ledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreakdownRequest {
    /// The resort id (e.g., "harbor_pines").
    pub resort_id: String,
    /// The room type id within the resort.
    pub room_type_id: String,
    /// The check-in date.
    pub check_in: NaiveDate,
    /// The number of nights (>= 1).
    pub nights: u32,
    /// Settings snapshot; catalog defaults when omitted.
    #[serde(default)]
    pub settings: Option<Settings>,
}

/// Request body for the `/compare` endpoint.
///
/// Prices the same stay across every room type of the resort.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompareRequest {
    /// The resort id.
    pub resort_id: String,
    /// The check-in date.
    pub check_in: NaiveDate,
    /// The number of nights (>= 1).
    pub nights: u32,
    /// Settings snapshot; catalog defaults when omitted.
    #[serde(default)]
    pub settings: Option<Settings>,
}

/// Request body for the `/reference` endpoint.
///
/// Builds the season/holiday reference table for one room type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferenceRequest {
    /// The resort id.
    pub resort_id: String,
    /// The room type id within the resort.
    pub room_type_id: String,
    /// Settings snapshot; catalog defaults when omitted.
    #[serde(default)]
    pub settings: Option<Settings>,
}
