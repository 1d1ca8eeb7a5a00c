//! Comprehensive integration tests for the Stay Cost & Points Engine.
//!
//! This test suite covers all calculation scenarios including:
//! - Season tier pricing (per-night ledger)
//! - Holiday override precedence
//! - Holiday span widening at the API boundary
//! - Discount stacking (order-sensitive)
//! - Owner vs renter cost modes
//! - Room type comparison with per-row failure isolation
//! - Season/holiday reference tables
//! - Error cases

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use proptest::prelude::*;
use rust_decimal::Decimal;
use serde_json::{json, Value};
use std::str::FromStr;
use tower::ServiceExt;

use stay_engine::api::{create_router, AppState};
use stay_engine::calculation::build_stay_breakdown;
use stay_engine::config::CatalogLoader;

// =============================================================================
// Test Helpers
// =============================================================================

fn create_test_state() -> AppState {
    let catalog = CatalogLoader::load("./config/catalog").expect("Failed to load catalog");
    AppState::new(catalog)
}

fn create_router_for_test() -> Router {
    create_router(create_test_state())
}

fn decimal(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

async fn post_json(router: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value: Value = serde_json::from_slice(&bytes).unwrap();
    (status, value)
}

/// Owner settings with maintenance as the only nonzero component.
fn owner_settings_json() -> Value {
    json!({
        "mode": "owner",
        "base_rate": "0.20",
        "maintenance_rate": "0.75",
        "capital_cost_rate": "0",
        "depreciation_rate": "0",
        "useful_life_years": 40,
        "rental_rate_per_point": "0.86"
    })
}

fn field_decimal(value: &Value, field: &str) -> Decimal {
    decimal(value[field].as_str().unwrap_or_else(|| {
        panic!("field {} missing or not a string in {}", field, value)
    }))
}

// =============================================================================
// Breakdown: season pricing and cost modes
// =============================================================================

#[tokio::test]
async fn test_owner_mode_three_night_stay() {
    let router = create_router_for_test();

    let (status, body) = post_json(
        router,
        "/breakdown",
        json!({
            "resort_id": "harbor_pines",
            "room_type_id": "studio",
            "check_in": "2026-03-02",
            "nights": 3,
            "settings": owner_settings_json()
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let breakdown = &body["breakdown"];
    assert_eq!(field_decimal(breakdown, "total_points"), decimal("30"));
    assert_eq!(field_decimal(breakdown, "total_cost"), decimal("22.50"));
    assert_eq!(breakdown["cost_components"]["mode"], "owner");
    assert_eq!(
        field_decimal(&breakdown["cost_components"], "maintenance"),
        decimal("22.50")
    );
}

#[tokio::test]
async fn test_renter_mode_uses_catalog_defaults() {
    let router = create_router_for_test();

    // No settings in the request: defaults.yaml applies (renter, 0.86/point).
    let (status, body) = post_json(
        router,
        "/breakdown",
        json!({
            "resort_id": "harbor_pines",
            "room_type_id": "one_bedroom",
            "check_in": "2026-03-02",
            "nights": 2
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let breakdown = &body["breakdown"];
    // 2 nights x 14 points in value season.
    assert_eq!(field_decimal(breakdown, "total_points"), decimal("28"));
    assert_eq!(field_decimal(breakdown, "total_cost"), decimal("24.08"));
    assert_eq!(breakdown["cost_components"]["mode"], "renter");
}

#[tokio::test]
async fn test_nightly_lines_are_chronological_and_reconcile() {
    let router = create_router_for_test();

    let (status, body) = post_json(
        router,
        "/breakdown",
        json!({
            "resort_id": "harbor_pines",
            "room_type_id": "studio",
            "check_in": "2026-04-28",
            "nights": 5
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let lines = body["breakdown"]["nightly_lines"].as_array().unwrap();
    assert_eq!(lines.len(), 5);

    let dates: Vec<&str> = lines.iter().map(|l| l["date"].as_str().unwrap()).collect();
    assert_eq!(
        dates,
        vec!["2026-04-28", "2026-04-29", "2026-04-30", "2026-05-01", "2026-05-02"]
    );

    // The stay crosses from value into peak season mid-stay.
    assert_eq!(lines[2]["source"]["id"], "value");
    assert_eq!(lines[3]["source"]["id"], "peak");

    let sum: Decimal = lines
        .iter()
        .map(|l| field_decimal(l, "discounted_points"))
        .sum();
    assert_eq!(field_decimal(&body["breakdown"], "total_points"), sum);
}

// =============================================================================
// Breakdown: holiday handling
// =============================================================================

#[tokio::test]
async fn test_holiday_override_applies_mid_stay() {
    let router = create_router_for_test();

    // The stay fully contains Independence Week, so no widening happens;
    // the holiday nights price at the override rate.
    let (status, body) = post_json(
        router,
        "/breakdown",
        json!({
            "resort_id": "sandpiper_cove",
            "room_type_id": "studio",
            "check_in": "2026-06-28",
            "nights": 9
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["holiday_adjusted"], false);

    let lines = body["breakdown"]["nightly_lines"].as_array().unwrap();
    assert_eq!(lines[0]["source"]["kind"], "season");
    assert_eq!(lines[1]["source"]["kind"], "holiday");
    assert_eq!(lines[7]["source"]["kind"], "holiday");
    assert_eq!(lines[8]["source"]["kind"], "season");

    // 2 prime nights at 13 plus 7 holiday nights at 18.
    assert_eq!(
        field_decimal(&body["breakdown"], "total_points"),
        decimal("152")
    );
}

#[tokio::test]
async fn test_room_without_override_falls_back_to_season() {
    let router = create_router_for_test();

    let (status, body) = post_json(
        router,
        "/breakdown",
        json!({
            "resort_id": "sandpiper_cove",
            "room_type_id": "two_bedroom",
            "check_in": "2026-06-28",
            "nights": 9
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let lines = body["breakdown"]["nightly_lines"].as_array().unwrap();
    // The two-bedroom has no Independence Week override; every night
    // resolves to the prime tier.
    assert!(lines.iter().all(|l| l["source"]["kind"] == "season"));
    assert_eq!(
        field_decimal(&body["breakdown"], "total_points"),
        decimal("234")
    );
}

#[tokio::test]
async fn test_stay_clipping_holiday_is_widened() {
    let router = create_router_for_test();

    // Two nights starting mid-holiday widen to cover the whole week.
    let (status, body) = post_json(
        router,
        "/breakdown",
        json!({
            "resort_id": "sandpiper_cove",
            "room_type_id": "studio",
            "check_in": "2026-07-04",
            "nights": 2
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["holiday_adjusted"], true);
    assert_eq!(body["requested_check_in"], "2026-07-04");
    assert_eq!(body["requested_nights"], 2);
    assert_eq!(body["check_in"], "2026-06-29");
    assert_eq!(body["nights"], 7);
    assert_eq!(
        body["breakdown"]["nightly_lines"].as_array().unwrap().len(),
        7
    );
}

#[tokio::test]
async fn test_date_outside_all_calendars_returns_400() {
    let router = create_router_for_test();

    let (status, body) = post_json(
        router,
        "/breakdown",
        json!({
            "resort_id": "sandpiper_cove",
            "room_type_id": "studio",
            "check_in": "2030-01-01",
            "nights": 2
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "DATE_OUT_OF_RANGE");
    assert!(body["message"].as_str().unwrap().contains("2030-01-01"));
}

// =============================================================================
// Discount stacking
// =============================================================================

#[tokio::test]
async fn test_discounts_stack_sequentially_in_order() {
    let router = create_router_for_test();

    let settings = json!({
        "mode": "renter",
        "base_rate": "13.10",
        "maintenance_rate": "0.75",
        "capital_cost_rate": "0.05",
        "depreciation_rate": "0.04",
        "useful_life_years": 40,
        "rental_rate_per_point": "1.00",
        "discount_rules": [
            { "id": "ten_off", "condition": { "type": "always" },
              "effect": { "type": "percent_off", "percent": "10" } },
            { "id": "two_points", "condition": { "type": "always" },
              "effect": { "type": "points_off", "points": "2" } }
        ]
    });

    let (status, body) = post_json(
        router,
        "/breakdown",
        json!({
            "resort_id": "harbor_pines",
            "room_type_id": "studio",
            "check_in": "2026-03-02",
            "nights": 3,
            "settings": settings
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    // Per night: 10 -> 9 -> 7; three nights total 21.
    assert_eq!(
        field_decimal(&body["breakdown"], "total_points"),
        decimal("21")
    );
    assert_eq!(
        field_decimal(&body["breakdown"], "total_cost"),
        decimal("21.00")
    );
}

#[tokio::test]
async fn test_booking_window_discount_applies_from_booking_date() {
    let router = create_router_for_test();

    // A booking date 20 days before check-in falls inside the 30-day
    // window, so the rule fires.
    let settings = json!({
        "mode": "renter",
        "base_rate": "13.10",
        "maintenance_rate": "0.75",
        "capital_cost_rate": "0.05",
        "depreciation_rate": "0.04",
        "useful_life_years": 40,
        "rental_rate_per_point": "1.00",
        "booking_date": "2026-02-10",
        "discount_rules": [
            { "id": "executive_window", "condition": { "type": "booked_within_days", "days": 30 },
              "effect": { "type": "percent_off", "percent": "25" } }
        ]
    });

    let (status, body) = post_json(
        router,
        "/breakdown",
        json!({
            "resort_id": "harbor_pines",
            "room_type_id": "studio",
            "check_in": "2026-03-02",
            "nights": 2,
            "settings": settings
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    // 10 points -> 7.5 per night.
    assert_eq!(
        field_decimal(&body["breakdown"], "total_points"),
        decimal("15.0")
    );
}

#[tokio::test]
async fn test_misconfigured_rule_skipped_with_warning() {
    let router = create_router_for_test();

    let settings = json!({
        "mode": "renter",
        "base_rate": "13.10",
        "maintenance_rate": "0.75",
        "capital_cost_rate": "0.05",
        "depreciation_rate": "0.04",
        "useful_life_years": 40,
        "rental_rate_per_point": "1.00",
        "discount_rules": [
            { "id": "broken", "condition": { "type": "always" },
              "effect": { "type": "percent_off", "percent": "150" } },
            { "id": "ten_off", "condition": { "type": "always" },
              "effect": { "type": "percent_off", "percent": "10" } }
        ]
    });

    let (status, body) = post_json(
        router,
        "/breakdown",
        json!({
            "resort_id": "harbor_pines",
            "room_type_id": "studio",
            "check_in": "2026-03-02",
            "nights": 2,
            "settings": settings
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let warnings = body["breakdown"]["discount_warnings"].as_array().unwrap();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0]["rule_id"], "broken");
    // Only the valid rule affected the arithmetic: 2 x 10 x 0.9.
    assert_eq!(
        field_decimal(&body["breakdown"], "total_points"),
        decimal("18.0")
    );
}

// =============================================================================
// Comparison
// =============================================================================

#[tokio::test]
async fn test_compare_prices_every_room_type() {
    let router = create_router_for_test();

    let (status, body) = post_json(
        router,
        "/compare",
        json!({
            "resort_id": "harbor_pines",
            "check_in": "2026-03-02",
            "nights": 2
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let rows = body["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 3);

    let ids: Vec<&str> = rows
        .iter()
        .map(|r| r["room_type_id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["studio", "one_bedroom", "two_bedroom"]);

    assert_eq!(
        field_decimal(&rows[0]["outcome"], "total_points"),
        decimal("20")
    );
    assert_eq!(
        field_decimal(&rows[2]["outcome"], "total_points"),
        decimal("40")
    );
}

#[tokio::test]
async fn test_compare_widens_stays_like_breakdown() {
    // The same stay clipping a holiday edge must be widened identically
    // on both endpoints, so their totals agree.
    let request = json!({
        "resort_id": "sandpiper_cove",
        "room_type_id": "studio",
        "check_in": "2026-07-04",
        "nights": 2
    });

    let (status, breakdown_body) =
        post_json(create_router_for_test(), "/breakdown", request.clone()).await;
    assert_eq!(status, StatusCode::OK);

    let (status, compare_body) = post_json(
        create_router_for_test(),
        "/compare",
        json!({
            "resort_id": "sandpiper_cove",
            "check_in": "2026-07-04",
            "nights": 2
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(compare_body["holiday_adjusted"], true);
    assert_eq!(compare_body["requested_nights"], 2);
    assert_eq!(compare_body["check_in"], "2026-06-29");
    assert_eq!(compare_body["nights"], 7);

    // The studio row totals match the widened single-room breakdown:
    // 7 holiday nights at 18 points.
    let studio_row = &compare_body["rows"].as_array().unwrap()[0];
    assert_eq!(studio_row["room_type_id"], "studio");
    assert_eq!(
        field_decimal(&studio_row["outcome"], "total_points"),
        field_decimal(&breakdown_body["breakdown"], "total_points")
    );
    assert_eq!(
        field_decimal(&studio_row["outcome"], "total_points"),
        decimal("126")
    );
}

#[tokio::test]
async fn test_excessive_nights_returns_400() {
    let router = create_router_for_test();

    let (status, body) = post_json(
        router,
        "/breakdown",
        json!({
            "resort_id": "harbor_pines",
            "room_type_id": "studio",
            "check_in": "2026-03-02",
            "nights": 4_000_000_000u32
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_STAY");
    assert!(body["message"].as_str().unwrap().contains("maximum"));
}

#[tokio::test]
async fn test_compare_row_failures_do_not_fail_the_call() {
    let router = create_router_for_test();

    // The last nights run past the configured calendars; every row fails
    // independently but the call itself still succeeds.
    let (status, body) = post_json(
        router,
        "/compare",
        json!({
            "resort_id": "sandpiper_cove",
            "check_in": "2026-12-30",
            "nights": 4
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let rows = body["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 2);
    for row in rows {
        assert_eq!(row["outcome"]["status"], "failed");
        assert_eq!(row["outcome"]["code"], "DATE_OUT_OF_RANGE");
    }
}

// =============================================================================
// Reference tables
// =============================================================================

#[tokio::test]
async fn test_reference_table_samples_each_tier_and_holiday() {
    let router = create_router_for_test();

    let (status, body) = post_json(
        router,
        "/reference",
        json!({
            "resort_id": "sandpiper_cove",
            "room_type_id": "studio"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["window_nights"], 7);

    let entries = body["entries"].as_array().unwrap();
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0]["source"]["id"], "quiet");
    assert_eq!(entries[1]["source"]["id"], "prime");
    assert_eq!(entries[2]["source"]["id"], "independence");

    // Quiet tier: 7 nights x 8 points.
    assert_eq!(
        field_decimal(&entries[0]["outcome"], "total_points"),
        decimal("56")
    );
    // Independence Week: 7 nights x 18 points.
    assert_eq!(
        field_decimal(&entries[2]["outcome"], "total_points"),
        decimal("126")
    );
}

#[tokio::test]
async fn test_reference_unknown_room_type_returns_400() {
    let router = create_router_for_test();

    let (status, body) = post_json(
        router,
        "/reference",
        json!({
            "resort_id": "sandpiper_cove",
            "room_type_id": "penthouse"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_STAY");
}

// =============================================================================
// Error cases
// =============================================================================

#[tokio::test]
async fn test_unknown_resort_returns_404() {
    let router = create_router_for_test();

    let (status, body) = post_json(
        router,
        "/compare",
        json!({
            "resort_id": "atlantis",
            "check_in": "2026-03-02",
            "nights": 2
        }),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "RESORT_NOT_FOUND");
}

#[tokio::test]
async fn test_zero_nights_returns_400() {
    let router = create_router_for_test();

    let (status, body) = post_json(
        router,
        "/breakdown",
        json!({
            "resort_id": "harbor_pines",
            "room_type_id": "studio",
            "check_in": "2026-03-02",
            "nights": 0
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_STAY");
}

#[tokio::test]
async fn test_missing_field_returns_400() {
    let router = create_router_for_test();

    let (status, body) = post_json(
        router,
        "/breakdown",
        json!({
            "resort_id": "harbor_pines",
            "check_in": "2026-03-02",
            "nights": 2
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("missing field"));
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    /// Totals always reconcile exactly with the nightly lines, for any
    /// stay inside the configured calendars.
    #[test]
    fn prop_totals_reconcile_with_lines(offset in 0i64..300, nights in 1u32..=14) {
        let catalog = CatalogLoader::load("./config/catalog").unwrap();
        let resort = catalog.get_resort("harbor_pines").unwrap();
        let settings = catalog.default_settings();

        let check_in = chrono::NaiveDate::from_ymd_opt(2026, 1, 5).unwrap()
            + chrono::Duration::days(offset);
        let breakdown =
            build_stay_breakdown(resort, "studio", check_in, nights, settings).unwrap();

        let points_sum: Decimal = breakdown
            .nightly_lines
            .iter()
            .map(|l| l.discounted_points)
            .sum();
        let cost_sum: Decimal = breakdown.nightly_lines.iter().map(|l| l.cost.total()).sum();

        prop_assert_eq!(breakdown.nightly_lines.len(), nights as usize);
        prop_assert_eq!(breakdown.total_points, points_sum);
        prop_assert_eq!(breakdown.total_cost, cost_sum);
        prop_assert_eq!(breakdown.cost_components.total(), cost_sum);
    }

    /// Percentage discounts never increase points and never push them
    /// below zero.
    #[test]
    fn prop_discounted_points_bounded(percent in 0u32..=100) {
        let catalog = CatalogLoader::load("./config/catalog").unwrap();
        let resort = catalog.get_resort("harbor_pines").unwrap();
        let mut settings = catalog.default_settings().clone();
        settings.discount_rules = vec![stay_engine::models::DiscountRule {
            id: "pct".to_string(),
            condition: stay_engine::models::DiscountCondition::Always,
            effect: stay_engine::models::DiscountEffect::PercentOff {
                percent: Decimal::from(percent),
            },
        }];

        let check_in = chrono::NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
        let breakdown =
            build_stay_breakdown(resort, "studio", check_in, 3, &settings).unwrap();

        prop_assert!(breakdown.total_points >= Decimal::ZERO);
        prop_assert!(breakdown.total_points <= decimal("30"));
        for line in &breakdown.nightly_lines {
            prop_assert!(line.discounted_points <= line.raw_points);
        }
    }
}
