//! The calculation engine.
//!
//! Stateless functions over the reference data in [`crate::models`]:
//!
//! * [`resolve_nightly_rate`] — calendar resolution (holiday over season)
//! * [`screen_rules`] / [`apply_discounts`] — the discount policy
//! * [`nightly_cost`] — the owner/renter cost model
//! * [`build_stay_breakdown`] — the per-night ledger for one stay
//! * [`build_room_type_comparison`] — the same stay across all room types
//! * [`build_reference_table`] — 7-night sample windows per tier/holiday
//!
//! Every function takes its inputs by reference and returns owned values;
//! nothing here holds state between calls, so the engine is safe to share
//! behind an `Arc` and call concurrently.

mod breakdown;
mod calendar;
mod comparison;
mod cost_model;
mod discount;
mod reference;

pub use breakdown::{adjust_stay_for_holidays, build_stay_breakdown, MAX_STAY_NIGHTS};
pub use calendar::{resolve_nightly_rate, ResolvedRate};
pub use comparison::build_room_type_comparison;
pub use cost_model::nightly_cost;
pub use discount::{apply_discounts, screen_rules, ScreenedRules, StayContext};
pub use reference::{build_reference_table, REFERENCE_WINDOW_NIGHTS};
