//! Room type aggregator: the same stay priced across every room type.
//!
//! One row per room type in the resort's configured display order. A
//! failure pricing one room type (a missing tier rate, say) marks that row
//! failed and leaves the rest intact; only request-level problems fail the
//! whole call.

use chrono::NaiveDate;
use tracing::warn;

use crate::error::{EngineError, EngineResult};
use crate::models::{Resort, RoomTypeSummary, Settings, SummaryOutcome};

use super::breakdown::{build_stay_breakdown, MAX_STAY_NIGHTS};

/// Prices the same stay across all of a resort's room types.
///
/// Returns one [`RoomTypeSummary`] per room type, in the resort's
/// configured display order. Rows fail independently; a row-level error is
/// recorded as [`SummaryOutcome::Failed`] with the error's stable code.
///
/// # Errors
///
/// [`EngineError::InvalidStay`] when the request itself is malformed (a
/// night count of zero or above [`MAX_STAY_NIGHTS`], or invalid
/// settings). Request-level problems would fail every row identically, so
/// they fail the call instead.
pub fn build_room_type_comparison(
    resort: &Resort,
    check_in: NaiveDate,
    nights: u32,
    settings: &Settings,
) -> EngineResult<Vec<RoomTypeSummary>> {
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

    let mut rows = Vec::with_capacity(resort.room_types().len());
    for room_type in resort.room_types() {
        let outcome = match build_stay_breakdown(resort, &room_type.id, check_in, nights, settings)
        {
            Ok(breakdown) => SummaryOutcome::Computed {
                total_points: breakdown.total_points,
                total_cost: breakdown.total_cost,
            },
            Err(error) => {
                warn!(
                    resort = %resort.id(),
                    room_type = %room_type.id,
                    %error,
                    "Room type failed in comparison"
                );
                SummaryOutcome::Failed {
                    code: error.code().to_string(),
                    message: error.to_string(),
                }
            }
        };
        rows.push(RoomTypeSummary {
            room_type_id: room_type.id.clone(),
            room_type_name: room_type.name.clone(),
            outcome,
        });
    }

    Ok(rows)
}
