//! Calculation output models.
//!
//! This module contains the value structures a calculation produces: the
//! per-night ledger ([`NightlyLine`]), the single-stay result
//! ([`StayBreakdown`]), the all-room-types comparison row
//! ([`RoomTypeSummary`]), and the season/holiday reference table entry
//! ([`ReferenceEntry`]). All are plain values freshly constructed per call
//! and owned by the caller; the engine holds no state between calls.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::CostMode;

/// The calendar source a nightly rate was resolved from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RateSource {
    /// The rate came from a season tier.
    Season {
        /// The season tier id.
        id: String,
        /// The season tier display name.
        name: String,
    },
    /// The rate came from a holiday override.
    Holiday {
        /// The holiday id.
        id: String,
        /// The holiday display name.
        name: String,
    },
}

/// Mode-specific cost components for some number of points.
///
/// An explicit tagged variant rather than a trait hierarchy, so both cost
/// formulas stay visible and independently testable.
///
/// # Example
///
/// ```
/// use stay_engine::models::CostComponents;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let cost = CostComponents::Owner {
///     maintenance: Decimal::from_str("22.50").unwrap(),
///     capital: Decimal::ZERO,
///     depreciation: Decimal::ZERO,
/// };
/// assert_eq!(cost.total(), Decimal::from_str("22.50").unwrap());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum CostComponents {
    /// Amortized ownership cost components.
    Owner {
        /// Maintenance fees: points x maintenance rate.
        maintenance: Decimal,
        /// Cost of capital: points x base rate x capital cost rate.
        capital: Decimal,
        /// Depreciation: points x base rate x depreciation rate / useful life.
        depreciation: Decimal,
    },
    /// Cash rental cost.
    Renter {
        /// Rent: points x rental rate per point.
        rent: Decimal,
    },
}

impl CostComponents {
    /// A zero-valued component set for the given mode.
    pub fn zero(mode: CostMode) -> Self {
        match mode {
            CostMode::Owner => CostComponents::Owner {
                maintenance: Decimal::ZERO,
                capital: Decimal::ZERO,
                depreciation: Decimal::ZERO,
            },
            CostMode::Renter => CostComponents::Renter { rent: Decimal::ZERO },
        }
    }

    /// The total monetary cost across all components.
    pub fn total(&self) -> Decimal {
        match self {
            CostComponents::Owner {
                maintenance,
                capital,
                depreciation,
            } => *maintenance + *capital + *depreciation,
            CostComponents::Renter { rent } => *rent,
        }
    }

    /// Component-wise accumulation. Both values must share a mode; mixing
    /// modes within one calculation is a programming error.
    pub fn accumulate(&mut self, other: &CostComponents) {
        match (self, other) {
            (
                CostComponents::Owner {
                    maintenance,
                    capital,
                    depreciation,
                },
                CostComponents::Owner {
                    maintenance: m,
                    capital: c,
                    depreciation: d,
                },
            ) => {
                *maintenance += *m;
                *capital += *c;
                *depreciation += *d;
            }
            (CostComponents::Renter { rent }, CostComponents::Renter { rent: r }) => {
                *rent += *r;
            }
            _ => unreachable!("cost components of mixed modes in one calculation"),
        }
    }
}

/// A warning recording that a misconfigured discount rule was skipped.
///
/// Non-fatal: the calculation proceeds using the remaining valid rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountWarning {
    /// The id of the skipped rule.
    pub rule_id: String,
    /// A description of the misconfiguration.
    pub message: String,
}

/// One night of a stay: date, resolved rate source, points, and cost.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NightlyLine {
    /// The calendar date of the night.
    pub date: NaiveDate,
    /// The season tier or holiday the rate was resolved from.
    pub source: RateSource,
    /// Points per night before discounts.
    pub raw_points: Decimal,
    /// Points per night after the discount stack.
    pub discounted_points: Decimal,
    /// Monetary cost of this night under the current mode.
    pub cost: CostComponents,
}

/// The complete breakdown of one stay in one room type.
///
/// Totals reconcile exactly with the nightly lines: `total_points` is the
/// sum of discounted points and `total_cost` the sum of nightly costs, with
/// no rounding drift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StayBreakdown {
    /// The room type this breakdown is for.
    pub room_type_id: String,
    /// The room type display name.
    pub room_type_name: String,
    /// The check-in date.
    pub check_in: NaiveDate,
    /// One line per night, chronological.
    pub nightly_lines: Vec<NightlyLine>,
    /// Total discounted points for the stay.
    pub total_points: Decimal,
    /// Total monetary cost for the stay.
    pub total_cost: Decimal,
    /// Mode-specific cost components summed over the stay.
    pub cost_components: CostComponents,
    /// Warnings for discount rules skipped as misconfigured.
    pub discount_warnings: Vec<DiscountWarning>,
}

/// The per-row outcome in a comparison or reference table.
///
/// A failed row is visibly distinct from a legitimately free stay; errors
/// are never folded into zero-cost results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SummaryOutcome {
    /// The calculation succeeded.
    Computed {
        /// Total discounted points.
        total_points: Decimal,
        /// Total monetary cost.
        total_cost: Decimal,
    },
    /// The calculation failed for this row only.
    Failed {
        /// A stable error code (e.g. "DATE_OUT_OF_RANGE").
        code: String,
        /// A human-readable description of the failure.
        message: String,
    },
}

/// One row of the all-room-types comparison table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomTypeSummary {
    /// The room type id.
    pub room_type_id: String,
    /// The room type display name.
    pub room_type_name: String,
    /// Totals, or the per-row failure.
    pub outcome: SummaryOutcome,
}

/// One row of the season/holiday reference table: the cost of a fixed
/// 7-night window anchored at the first date of a tier or holiday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceEntry {
    /// The season tier or holiday the window samples.
    pub source: RateSource,
    /// The first night of the sample window.
    pub start_date: NaiveDate,
    /// Totals for the window, or the per-row failure.
    pub outcome: SummaryOutcome,
}
