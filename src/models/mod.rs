//! Domain models for the Stay Cost & Points Calculation Engine.
//!
//! Reference data ([`Resort`], [`Season`], [`Holiday`], [`RoomType`]) and
//! the session settings snapshot ([`Settings`]) flow into the engine;
//! breakdown and summary values flow out.

mod breakdown;
mod resort;
mod settings;

pub use breakdown::{
    CostComponents, DiscountWarning, NightlyLine, RateSource, ReferenceEntry, RoomTypeSummary,
    StayBreakdown, SummaryOutcome,
};
pub use resort::{DateRange, Holiday, Resort, RoomType, Season};
pub use settings::{CostMode, DiscountCondition, DiscountEffect, DiscountRule, Settings};
