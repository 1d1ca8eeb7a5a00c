//! Calendar resolution: mapping a date to its applicable nightly rate.
//!
//! Holidays take precedence over season tiers: a holiday date always
//! resolves to the holiday's override rate, even when the holiday spans a
//! season boundary. Overlapping holiday definitions resolve first-match in
//! configured list order.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{RateSource, Resort, RoomType};

/// The outcome of resolving one calendar date for one room type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRate {
    /// Where the rate came from (season tier or holiday).
    pub source: RateSource,
    /// Points per night before discounts.
    pub points: Decimal,
}

/// Resolves the nightly point rate for a room type on a given date.
///
/// Checks the holiday calendar first; when no holiday covers the date (or
/// the room type has no override for the covering holiday), falls back to
/// the season tier covering the date.
///
/// # Errors
///
/// * [`EngineError::DateOutOfRange`] when the date falls outside all
///   configured season periods and no holiday covers it. There is no
///   silent default.
/// * [`EngineError::RateNotFound`] when a season tier covers the date but
///   the room type has no rate configured for that tier.
pub fn resolve_nightly_rate(
    resort: &Resort,
    room_type: &RoomType,
    date: NaiveDate,
) -> EngineResult<ResolvedRate> {
    if let Some(holiday) = resort.holiday_for(date) {
        if let Some(points) = room_type.holiday_rate(&holiday.id) {
            return Ok(ResolvedRate {
                source: RateSource::Holiday {
                    id: holiday.id.clone(),
                    name: holiday.name.clone(),
                },
                points,
            });
        }
        // No override for this room type: fall through to the season tier
        // rather than reporting a zero rate.
    }

    let season = resort
        .season_for(date)
        .ok_or_else(|| EngineError::DateOutOfRange {
            resort: resort.id().to_string(),
            date,
        })?;

    let points = room_type
        .season_rate(&season.id)
        .ok_or_else(|| EngineError::RateNotFound {
            room_type: room_type.id.clone(),
            date,
        })?;

    Ok(ResolvedRate {
        source: RateSource::Season {
            id: season.id.clone(),
            name: season.name.clone(),
        },
        points,
    })
}
