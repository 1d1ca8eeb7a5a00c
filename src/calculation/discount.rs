//! Discount policy: rule screening and sequential stacking.
//!
//! Rules are screened once per calculation so that each misconfigured rule
//! yields exactly one warning, then applied per night in declaration order.
//! Each matching rule's effect applies to the output of the previous rule,
//! never to the original raw value, and the final result is clamped at
//! zero.

use rust_decimal::Decimal;
use tracing::warn;

use crate::models::{
    CostMode, DiscountCondition, DiscountEffect, DiscountRule, DiscountWarning,
};
use chrono::NaiveDate;

/// The stay parameters discount conditions may inspect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StayContext {
    /// The check-in date.
    pub check_in: NaiveDate,
    /// The number of nights (>= 1).
    pub nights: u32,
    /// The cost mode the stay is priced under.
    pub mode: CostMode,
    /// Reference date for advance-booking conditions, when known.
    pub booking_date: Option<NaiveDate>,
}

/// The result of screening a rule list: the rules that survived, in their
/// original order, plus one warning per skipped rule.
#[derive(Debug, Clone)]
pub struct ScreenedRules<'a> {
    /// Valid rules in declaration order.
    pub rules: Vec<&'a DiscountRule>,
    /// One warning per misconfigured (skipped) rule.
    pub warnings: Vec<DiscountWarning>,
}

/// Screens discount rules, dropping misconfigured ones with a warning.
///
/// A rule is misconfigured when its percentage is negative or above 100,
/// or its flat reduction is negative. Skipping is non-fatal: the
/// calculation proceeds with the remaining valid rules.
pub fn screen_rules(rules: &[DiscountRule]) -> ScreenedRules<'_> {
    let mut valid = Vec::with_capacity(rules.len());
    let mut warnings = Vec::new();

    for rule in rules {
        let problem = match &rule.effect {
            DiscountEffect::PercentOff { percent } if *percent < Decimal::ZERO => {
                Some(format!("percentage {} is negative", percent))
            }
            DiscountEffect::PercentOff { percent } if *percent > Decimal::ONE_HUNDRED => {
                Some(format!("percentage {} exceeds 100", percent))
            }
            DiscountEffect::PointsOff { points } if *points < Decimal::ZERO => {
                Some(format!("flat reduction {} is negative", points))
            }
            _ => None,
        };

        match problem {
            Some(message) => {
                warn!(rule_id = %rule.id, %message, "Skipping misconfigured discount rule");
                warnings.push(DiscountWarning {
                    rule_id: rule.id.clone(),
                    message,
                });
            }
            None => valid.push(rule),
        }
    }

    ScreenedRules {
        rules: valid,
        warnings,
    }
}

/// Returns true when a rule's condition matches the stay context.
fn condition_matches(condition: &DiscountCondition, ctx: &StayContext) -> bool {
    match condition {
        DiscountCondition::Always => true,
        DiscountCondition::MinNights { nights } => ctx.nights >= *nights,
        DiscountCondition::BookedWithinDays { days } => match ctx.booking_date {
            Some(booked) => {
                let lead = (ctx.check_in - booked).num_days();
                (0..=*days).contains(&lead)
            }
            None => false,
        },
        DiscountCondition::ModeIs { mode } => ctx.mode == *mode,
    }
}

/// Applies screened discount rules to a raw nightly points value.
///
/// Rules are evaluated in order; matching rules stack sequentially
/// (percentages compound against the running value, flat reductions
/// subtract from it). The result is clamped to a zero minimum.
pub fn apply_discounts(
    rules: &[&DiscountRule],
    ctx: &StayContext,
    raw_points: Decimal,
) -> Decimal {
    let mut running = raw_points;

    for rule in rules {
        if !condition_matches(&rule.condition, ctx) {
            continue;
        }
        running = match &rule.effect {
            DiscountEffect::PercentOff { percent } => {
                running * (Decimal::ONE - *percent / Decimal::ONE_HUNDRED)
            }
            DiscountEffect::PointsOff { points } => running - *points,
        };
    }

    running.max(Decimal::ZERO)
}
