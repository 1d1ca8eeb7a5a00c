//! Resort reference data models.
//!
//! This module contains the calendar and rate reference data for a resort:
//! season tiers with their date periods, holiday weeks with per-room-type
//! point overrides, and the room types themselves. All of it is read-only
//! input to the engine; the surrounding application owns it.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{EngineError, EngineResult};

/// An inclusive calendar date range.
///
/// # Example
///
/// ```
/// use stay_engine::models::DateRange;
/// use chrono::NaiveDate;
///
/// let range = DateRange {
///     start: NaiveDate::from_ymd_opt(2026, 4, 1).unwrap(),
///     end: NaiveDate::from_ymd_opt(2026, 10, 31).unwrap(),
/// };
/// assert!(range.contains(NaiveDate::from_ymd_opt(2026, 7, 10).unwrap()));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// The first date of the range (inclusive).
    pub start: NaiveDate,
    /// The last date of the range (inclusive).
    pub end: NaiveDate,
}

impl DateRange {
    /// Returns true when the date falls within this range.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Returns true when this range shares at least one date with `other`.
    pub fn overlaps(&self, other: &DateRange) -> bool {
        self.start <= other.end && other.start <= self.end
    }
}

/// A named season tier with one or more date periods.
///
/// Periods are contiguous, non-overlapping within a resort-year; every
/// supported date maps to exactly one tier unless a holiday overrides it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Season {
    /// Stable identifier referenced by room type rates (e.g. "peak").
    pub id: String,
    /// The human-readable tier name (e.g. "Peak Season").
    pub name: String,
    /// The date periods this tier covers.
    pub periods: Vec<DateRange>,
}

impl Season {
    /// Returns the earliest start date across all periods, if any.
    pub fn first_date(&self) -> Option<NaiveDate> {
        self.periods.iter().map(|p| p.start).min()
    }
}

/// A holiday week whose point rates supersede the season tier for its dates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Holiday {
    /// Stable identifier referenced by room type overrides (e.g. "christmas").
    pub id: String,
    /// The human-readable holiday name (e.g. "Christmas Week").
    pub name: String,
    /// The dates the override applies to.
    pub range: DateRange,
}

/// A bookable room type with its per-season and per-holiday point rates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomType {
    /// Stable identifier (e.g. "one_bedroom_ov").
    pub id: String,
    /// The display name (e.g. "1BR Ocean View").
    pub name: String,
    /// Points per night keyed by season id.
    pub season_rates: HashMap<String, Decimal>,
    /// Optional points-per-night overrides keyed by holiday id.
    #[serde(default)]
    pub holiday_rates: HashMap<String, Decimal>,
}

impl RoomType {
    /// Returns the points-per-night rate for a season tier, if configured.
    pub fn season_rate(&self, season_id: &str) -> Option<Decimal> {
        self.season_rates.get(season_id).copied()
    }

    /// Returns the points-per-night override for a holiday, if configured.
    pub fn holiday_rate(&self, holiday_id: &str) -> Option<Decimal> {
        self.holiday_rates.get(holiday_id).copied()
    }
}

/// A resort with its season calendar, holiday calendar, and room types.
///
/// Constructed through [`Resort::new`], which validates the season calendar
/// and builds a sorted period index so per-date season lookups are a binary
/// search rather than a scan. Room type order is the display order used by
/// the comparison table.
#[derive(Debug, Clone)]
pub struct Resort {
    id: String,
    name: String,
    seasons: Vec<Season>,
    holidays: Vec<Holiday>,
    room_types: Vec<RoomType>,
    // (period, index into seasons) sorted by period start.
    span_index: Vec<(DateRange, usize)>,
}

impl Resort {
    /// Creates a resort from its component parts, validating the calendar.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidCalendar`] when a date range is
    /// inverted or two season periods overlap. Overlapping *holidays* are
    /// permitted; resolution is first-match in list order.
    pub fn new(
        id: String,
        name: String,
        seasons: Vec<Season>,
        holidays: Vec<Holiday>,
        room_types: Vec<RoomType>,
    ) -> EngineResult<Self> {
        for holiday in &holidays {
            if holiday.range.start > holiday.range.end {
                return Err(EngineError::InvalidCalendar {
                    resort: id.clone(),
                    message: format!("holiday '{}' has an inverted date range", holiday.id),
                });
            }
        }

        let mut span_index = Vec::new();
        for (season_idx, season) in seasons.iter().enumerate() {
            for period in &season.periods {
                if period.start > period.end {
                    return Err(EngineError::InvalidCalendar {
                        resort: id.clone(),
                        message: format!("season '{}' has an inverted date range", season.id),
                    });
                }
                span_index.push((*period, season_idx));
            }
        }
        span_index.sort_by_key(|(period, _)| period.start);

        for pair in span_index.windows(2) {
            let (prev, prev_idx) = &pair[0];
            let (next, next_idx) = &pair[1];
            if prev.overlaps(next) {
                return Err(EngineError::InvalidCalendar {
                    resort: id.clone(),
                    message: format!(
                        "season periods overlap: '{}' ({} to {}) and '{}' ({} to {})",
                        seasons[*prev_idx].id,
                        prev.start,
                        prev.end,
                        seasons[*next_idx].id,
                        next.start,
                        next.end
                    ),
                });
            }
        }

        Ok(Self {
            id,
            name,
            seasons,
            holidays,
            room_types,
            span_index,
        })
    }

    /// Returns the resort id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the resort display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the season tiers in configured order.
    pub fn seasons(&self) -> &[Season] {
        &self.seasons
    }

    /// Returns the holidays in configured (resolution) order.
    pub fn holidays(&self) -> &[Holiday] {
        &self.holidays
    }

    /// Returns the room types in display order.
    pub fn room_types(&self) -> &[RoomType] {
        &self.room_types
    }

    /// Looks up a room type by id.
    pub fn room_type(&self, id: &str) -> Option<&RoomType> {
        self.room_types.iter().find(|rt| rt.id == id)
    }

    /// Returns the season tier covering a date, ignoring holidays.
    ///
    /// Binary search over the sorted period index; periods are validated
    /// non-overlapping at construction.
    pub fn season_for(&self, date: NaiveDate) -> Option<&Season> {
        let idx = self
            .span_index
            .partition_point(|(period, _)| period.start <= date);
        if idx == 0 {
            return None;
        }
        let (period, season_idx) = &self.span_index[idx - 1];
        period.contains(date).then(|| &self.seasons[*season_idx])
    }

    /// Returns the first holiday in list order covering a date.
    pub fn holiday_for(&self, date: NaiveDate) -> Option<&Holiday> {
        self.holidays.iter().find(|h| h.range.contains(date))
    }
}
