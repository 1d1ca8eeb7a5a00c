//! Season/holiday reference table: a rate card built from real breakdowns.
//!
//! Each season tier and holiday contributes one sample row: a fixed
//! 7-night window anchored at its first configured date, priced through
//! the same breakdown path a real stay would take. Rows are sorted by
//! anchor date and fail independently.

use chrono::NaiveDate;
use tracing::warn;

use crate::error::{EngineError, EngineResult};
use crate::models::{RateSource, ReferenceEntry, Resort, Settings, SummaryOutcome};

use super::breakdown::build_stay_breakdown;

/// The sample window length for reference table rows.
pub const REFERENCE_WINDOW_NIGHTS: u32 = 7;

/// Builds the season/holiday reference table for one room type.
///
/// One row per season tier (anchored at the tier's earliest period start)
/// and one per holiday (anchored at the holiday's start), each pricing a
/// [`REFERENCE_WINDOW_NIGHTS`]-night stay through the normal breakdown
/// path. Rows are sorted by anchor date; a window running off the
/// configured calendar fails that row only.
///
/// # Errors
///
/// [`EngineError::InvalidStay`] when the room type id is unknown or the
/// settings snapshot is invalid. These would fail every row identically.
pub fn build_reference_table(
    resort: &Resort,
    room_type_id: &str,
    settings: &Settings,
) -> EngineResult<Vec<ReferenceEntry>> {
    settings.validate()?;
    if resort.room_type(room_type_id).is_none() {
        return Err(EngineError::InvalidStay {
            message: format!(
                "unknown room type '{}' at resort '{}'",
                room_type_id,
                resort.id()
            ),
        });
    }

    let mut anchors: Vec<(RateSource, NaiveDate)> = Vec::new();
    for season in resort.seasons() {
        // A season with no periods has no sample window; skip it.
        if let Some(start) = season.first_date() {
            anchors.push((
                RateSource::Season {
                    id: season.id.clone(),
                    name: season.name.clone(),
                },
                start,
            ));
        }
    }
    for holiday in resort.holidays() {
        anchors.push((
            RateSource::Holiday {
                id: holiday.id.clone(),
                name: holiday.name.clone(),
            },
            holiday.range.start,
        ));
    }
    anchors.sort_by_key(|(_, start)| *start);

    let mut rows = Vec::with_capacity(anchors.len());
    for (source, start_date) in anchors {
        let outcome = match build_stay_breakdown(
            resort,
            room_type_id,
            start_date,
            REFERENCE_WINDOW_NIGHTS,
            settings,
        ) {
            Ok(breakdown) => SummaryOutcome::Computed {
                total_points: breakdown.total_points,
                total_cost: breakdown.total_cost,
            },
            Err(error) => {
                warn!(
                    resort = %resort.id(),
                    room_type = %room_type_id,
                    start = %start_date,
                    %error,
                    "Reference window failed"
                );
                SummaryOutcome::Failed {
                    code: error.code().to_string(),
                    message: error.to_string(),
                }
            }
        };
        rows.push(ReferenceEntry {
            source,
            start_date,
            outcome,
        });
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CostMode, DateRange, Holiday, RoomType, Season};
    use rust_decimal::Decimal;
    use std::collections::HashMap;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn create_test_resort() -> Resort {
        let seasons = vec![
            Season {
                id: "peak".to_string(),
                name: "Peak".to_string(),
                periods: vec![DateRange {
                    start: date(2026, 7, 1),
                    end: date(2026, 12, 18),
                }],
            },
            Season {
                id: "value".to_string(),
                name: "Value".to_string(),
                periods: vec![DateRange {
                    start: date(2026, 1, 1),
                    end: date(2026, 6, 30),
                }],
            },
        ];
        let holidays = vec![Holiday {
            id: "christmas".to_string(),
            name: "Christmas Week".to_string(),
            range: DateRange {
                start: date(2026, 12, 19),
                end: date(2026, 12, 27),
            },
        }];
        let room_types = vec![RoomType {
            id: "studio".to_string(),
            name: "Studio".to_string(),
            season_rates: HashMap::from([
                ("value".to_string(), dec("10")),
                ("peak".to_string(), dec("15")),
            ]),
            holiday_rates: HashMap::from([("christmas".to_string(), dec("25"))]),
        }];

        Resort::new(
            "r1".to_string(),
            "Test Resort".to_string(),
            seasons,
            holidays,
            room_types,
        )
        .unwrap()
    }

    fn renter_settings() -> Settings {
        Settings {
            mode: CostMode::Renter,
            base_rate: dec("13.10"),
            maintenance_rate: dec("0.75"),
            capital_cost_rate: dec("0.05"),
            depreciation_rate: dec("0.04"),
            useful_life_years: 40,
            rental_rate_per_point: dec("0.86"),
            booking_date: None,
            discount_rules: vec![],
        }
    }

    /// RT-001: one row per tier and holiday, sorted by anchor date
    #[test]
    fn test_rows_sorted_by_anchor_date() {
        let resort = create_test_resort();

        let rows = build_reference_table(&resort, "studio", &renter_settings()).unwrap();

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].start_date, date(2026, 1, 1));
        assert_eq!(rows[1].start_date, date(2026, 7, 1));
        assert_eq!(rows[2].start_date, date(2026, 12, 19));
        assert!(matches!(rows[0].source, RateSource::Season { .. }));
        assert!(matches!(rows[2].source, RateSource::Holiday { .. }));
    }

    /// RT-002: each row prices a 7-night window through the breakdown path
    #[test]
    fn test_rows_price_seven_night_windows() {
        let resort = create_test_resort();

        let rows = build_reference_table(&resort, "studio", &renter_settings()).unwrap();

        // Value: 7 x 10 = 70 points at 0.86/point.
        assert_eq!(
            rows[0].outcome,
            SummaryOutcome::Computed {
                total_points: dec("70"),
                total_cost: dec("60.20"),
            }
        );
        // Christmas: 7 x 25 = 175 points.
        assert_eq!(
            rows[2].outcome,
            SummaryOutcome::Computed {
                total_points: dec("175"),
                total_cost: dec("150.50"),
            }
        );
    }

    /// RT-003: a window running off the calendar fails that row only
    #[test]
    fn test_window_past_calendar_fails_row_only() {
        let resort = create_test_resort();

        // Shrink the holiday so its window runs past December 31.
        let seasons = resort.seasons().to_vec();
        let room_types = resort.room_types().to_vec();
        let holidays = vec![Holiday {
            id: "new_year".to_string(),
            name: "New Year".to_string(),
            range: DateRange {
                start: date(2026, 12, 28),
                end: date(2026, 12, 31),
            },
        }];
        let resort = Resort::new(
            "r1".to_string(),
            "Test Resort".to_string(),
            seasons,
            holidays,
            room_types,
        )
        .unwrap();

        let rows = build_reference_table(&resort, "studio", &renter_settings()).unwrap();

        assert_eq!(rows.len(), 3);
        assert!(matches!(rows[0].outcome, SummaryOutcome::Computed { .. }));
        assert!(matches!(rows[1].outcome, SummaryOutcome::Computed { .. }));
        match &rows[2].outcome {
            SummaryOutcome::Failed { code, .. } => assert_eq!(code, "DATE_OUT_OF_RANGE"),
            other => panic!("Expected Failed outcome, got {:?}", other),
        }
    }

    /// RT-004: unknown room type fails the whole call
    #[test]
    fn test_unknown_room_type_fails_whole_call() {
        let resort = create_test_resort();

        let result = build_reference_table(&resort, "penthouse", &renter_settings());

        assert!(matches!(
            result.unwrap_err(),
            EngineError::InvalidStay { .. }
        ));
    }
}
