//! Cost model: converting points into monetary cost.
//!
//! One function, one explicit dispatch on [`CostMode`]. Owner mode
//! amortizes ownership (maintenance, capital, depreciation); renter mode
//! prices cash rent per point. Both formulas sit side by side here so they
//! stay auditable together.

use rust_decimal::Decimal;

use crate::models::{CostComponents, CostMode, Settings};

/// Computes the mode-specific cost components for a points value.
///
/// * Owner: maintenance = points x `maintenance_rate`;
///   capital = points x `base_rate` x `capital_cost_rate`;
///   depreciation = points x `base_rate` x `depreciation_rate` /
///   `useful_life_years`.
/// * Renter: rent = points x `rental_rate_per_point`.
///
/// Assumes `settings` passed [`Settings::validate`]; the calculation entry
/// points enforce that before any arithmetic.
pub fn nightly_cost(settings: &Settings, points: Decimal) -> CostComponents {
    match settings.mode {
        CostMode::Owner => CostComponents::Owner {
            maintenance: points * settings.maintenance_rate,
            capital: points * settings.base_rate * settings.capital_cost_rate,
            depreciation: points * settings.base_rate * settings.depreciation_rate
                / Decimal::from(settings.useful_life_years),
        },
        CostMode::Renter => CostComponents::Renter {
            rent: points * settings.rental_rate_per_point,
        },
    }
}
