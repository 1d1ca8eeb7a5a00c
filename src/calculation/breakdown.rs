//! Breakdown builder: the per-night ledger for one stay.
//!
//! Orchestrates the calendar resolver, discount policy, and cost model
//! across every night of a stay. Nights are walked by date arithmetic, not
//! index arithmetic, so a stay crossing a season or holiday boundary picks
//! up each night's correct rate. Any per-night failure aborts the whole
//! breakdown; no partial result is ever returned.

use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{CostComponents, NightlyLine, Resort, Settings, StayBreakdown};

use super::calendar::resolve_nightly_rate;
use super::cost_model::nightly_cost;
use super::discount::{apply_discounts, screen_rules, StayContext};

/// The upper bound on a single stay's night count.
///
/// Calendars cover at most a year or two; the bound also caps the ledger
/// allocation before an unvalidated request-supplied count reaches it.
pub const MAX_STAY_NIGHTS: u32 = 366;

/// Builds the complete breakdown for one stay in one room type.
///
/// For each of the `nights` consecutive dates starting at `check_in`:
/// resolve the raw nightly rate, apply the discount stack, and price the
/// night under the settings' cost mode. Totals are exact sums of the
/// nightly values.
///
/// # Errors
///
/// * [`EngineError::InvalidStay`] when `nights` is zero or exceeds
///   [`MAX_STAY_NIGHTS`], the room type id is unknown at the resort, or
///   the settings snapshot is invalid.
/// * [`EngineError::DateOutOfRange`] / [`EngineError::RateNotFound`] from
///   the calendar resolver, propagated unmodified; the breakdown fails
///   atomically.
pub fn build_stay_breakdown(
    resort: &Resort,
    room_type_id: &str,
    check_in: NaiveDate,
    nights: u32,
    settings: &Settings,
) -> EngineResult<StayBreakdown> {
    if nights == 0 {
        return Err(EngineError::InvalidStay {
            message: "night count must be at least 1".to_string(),
        });
    }
    if nights > MAX_STAY_NIGHTS {
        return Err(EngineError::InvalidStay {
            message: format!(
                "night count {} exceeds the {}-night maximum",
                nights, MAX_STAY_NIGHTS
            ),
        });
    }
    settings.validate()?;

    let room_type = resort
        .room_type(room_type_id)
        .ok_or_else(|| EngineError::InvalidStay {
            message: format!(
                "unknown room type '{}' at resort '{}'",
                room_type_id,
                resort.id()
            ),
        })?;

    let screened = screen_rules(&settings.discount_rules);
    let ctx = StayContext {
        check_in,
        nights,
        mode: settings.mode,
        booking_date: settings.booking_date,
    };

    let mut nightly_lines = Vec::with_capacity(nights as usize);
    let mut total_points = Decimal::ZERO;
    let mut total_cost = Decimal::ZERO;
    let mut cost_components = CostComponents::zero(settings.mode);

    let mut date = check_in;
    for _ in 0..nights {
        let resolved = resolve_nightly_rate(resort, room_type, date)?;
        let discounted = apply_discounts(&screened.rules, &ctx, resolved.points);
        let cost = nightly_cost(settings, discounted);

        total_points += discounted;
        total_cost += cost.total();
        cost_components.accumulate(&cost);
        nightly_lines.push(NightlyLine {
            date,
            source: resolved.source,
            raw_points: resolved.points,
            discounted_points: discounted,
            cost,
        });

        date = date
            .checked_add_days(Days::new(1))
            .ok_or_else(|| EngineError::CalculationError {
                message: format!("date overflow advancing past {}", date),
            })?;
    }

    Ok(StayBreakdown {
        room_type_id: room_type.id.clone(),
        room_type_name: room_type.name.clone(),
        check_in,
        nightly_lines,
        total_points,
        total_cost,
        cost_components,
        discount_warnings: screened.warnings,
    })
}

/// Widens a requested stay so that any partially-overlapped holiday is
/// included whole.
///
/// Holiday weeks are booked as a unit; a stay clipping the edge of one is
/// extended to cover it. Returns the possibly-adjusted `(check_in, nights)`
/// plus whether an adjustment happened. Never shrinks a stay, and returns
/// the request unchanged when no holiday overlaps it.
pub fn adjust_stay_for_holidays(
    resort: &Resort,
    check_in: NaiveDate,
    nights: u32,
) -> (NaiveDate, u32, bool) {
    // Out-of-bounds counts pass through unchanged so the breakdown
    // rejects them; widening their date span could overflow.
    if nights == 0 || nights > MAX_STAY_NIGHTS {
        return (check_in, nights, false);
    }
    let stay_end = check_in + chrono::Duration::days(i64::from(nights) - 1);

    let overlapping: Vec<_> = resort
        .holidays()
        .iter()
        .filter(|h| h.range.start <= stay_end && h.range.end >= check_in)
        .collect();
    if overlapping.is_empty() {
        return (check_in, nights, false);
    }

    let earliest = overlapping.iter().map(|h| h.range.start).min().unwrap();
    let latest = overlapping.iter().map(|h| h.range.end).max().unwrap();
    let new_start = check_in.min(earliest);
    let new_end = stay_end.max(latest);
    let new_nights = (new_end - new_start).num_days() as u32 + 1;

    (new_start, new_nights, new_nights != nights || new_start != check_in)
}
