//! Session settings and discount rule models.
//!
//! [`Settings`] is the mutable session configuration: cost mode, ownership
//! financing parameters, rental rate, and the configured discount rules.
//! The engine treats a `Settings` value as a read-only snapshot for the
//! duration of one calculation.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// The cost perspective a calculation is priced under.
///
/// Mode is a configuration value, not a type: the cost model dispatches on
/// it explicitly so both formulas stay auditable side by side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostMode {
    /// Amortized ownership cost: maintenance + capital + depreciation.
    Owner,
    /// Cash rental cost: rent per point.
    Renter,
}

/// The condition gating a discount rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DiscountCondition {
    /// The rule always applies.
    Always,
    /// Applies to stays of at least this many nights.
    MinNights {
        /// The night-count threshold (inclusive).
        nights: u32,
    },
    /// Applies when check-in falls within `days` days of the booking date.
    ///
    /// Never matches when the settings snapshot carries no booking date.
    BookedWithinDays {
        /// The advance-booking window in days (inclusive).
        days: i64,
    },
    /// Applies only under the given cost mode.
    ModeIs {
        /// The required mode.
        mode: CostMode,
    },
}

/// The effect a matching discount rule has on the running points value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DiscountEffect {
    /// Reduces the running value by a percentage (0-100).
    PercentOff {
        /// The percentage to subtract.
        percent: Decimal,
    },
    /// Reduces the running value by a flat number of points.
    PointsOff {
        /// The points to subtract.
        points: Decimal,
    },
}

/// A configured condition-effect pair reducing points cost.
///
/// Rules stack in declaration order: each matching rule's effect applies to
/// the output of the previous rule, not to the original raw value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscountRule {
    /// Stable identifier used in warnings and applied-rule reporting.
    pub id: String,
    /// The condition gating this rule.
    pub condition: DiscountCondition,
    /// The effect applied when the condition matches.
    pub effect: DiscountEffect,
}

/// The mutable session configuration, passed as a read-only snapshot into
/// every calculation.
///
/// # Example
///
/// ```
/// use stay_engine::models::{CostMode, Settings};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let settings = Settings {
///     mode: CostMode::Renter,
///     base_rate: Decimal::from_str("13.10").unwrap(),
///     maintenance_rate: Decimal::from_str("0.75").unwrap(),
///     capital_cost_rate: Decimal::from_str("0.05").unwrap(),
///     depreciation_rate: Decimal::from_str("0.04").unwrap(),
///     useful_life_years: 40,
///     rental_rate_per_point: Decimal::from_str("0.86").unwrap(),
///     booking_date: None,
///     discount_rules: vec![],
/// };
/// assert!(settings.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// The cost perspective to price under.
    pub mode: CostMode,
    /// Purchase price per point in dollars (capital and depreciation base).
    pub base_rate: Decimal,
    /// Annual maintenance cost per point in dollars.
    pub maintenance_rate: Decimal,
    /// Capital cost rate as a fraction of the base rate (e.g. 0.05).
    pub capital_cost_rate: Decimal,
    /// Depreciation rate as a fraction of the base rate (e.g. 0.04).
    pub depreciation_rate: Decimal,
    /// Amortization horizon for depreciation, in years.
    pub useful_life_years: u32,
    /// Cash rent per point in dollars (renter mode).
    pub rental_rate_per_point: Decimal,
    /// Reference date for advance-booking discount conditions, typically
    /// the date the quote is prepared. `None` disables those conditions.
    #[serde(default)]
    pub booking_date: Option<NaiveDate>,
    /// Discount rules in stacking order.
    #[serde(default)]
    pub discount_rules: Vec<DiscountRule>,
}

impl Settings {
    /// Re-validates the invariants the engine depends on.
    ///
    /// Callers pre-validate settings, but every calculation entry point
    /// calls this again before doing arithmetic.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidStay`] when `useful_life_years` is
    /// zero or any rate is negative.
    pub fn validate(&self) -> EngineResult<()> {
        if self.useful_life_years == 0 {
            return Err(EngineError::InvalidStay {
                message: "useful_life_years must be at least 1".to_string(),
            });
        }
        let rates = [
            ("base_rate", self.base_rate),
            ("maintenance_rate", self.maintenance_rate),
            ("capital_cost_rate", self.capital_cost_rate),
            ("depreciation_rate", self.depreciation_rate),
            ("rental_rate_per_point", self.rental_rate_per_point),
        ];
        for (field, value) in rates {
            if value < Decimal::ZERO {
                return Err(EngineError::InvalidStay {
                    message: format!("{} must not be negative", field),
                });
            }
        }
        Ok(())
    }
}
