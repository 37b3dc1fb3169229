pub mod drafts;
pub mod health;
pub mod products;
pub mod schedules;

use tracing::warn;
use validator::Validate;

use crate::entities::common::ErrorResponse;

// Re-export handlers for easier imports
pub use drafts::{
    add_reminder_time, create_draft, remove_reminder_time, set_recurrence, toggle_weekday,
    update_reminder_time, validate_draft,
};
pub use health::health_check;
pub use products::{list_categories, scan_product};
pub use schedules::{
    get_schedule, list_schedules, next_occurrence, revise_schedule, schedule_occurrences,
    submit_schedule,
};

/// Reject oversized request payloads before they reach the domain
pub(crate) fn check_payload<T: Validate>(payload: &T) -> Result<(), ErrorResponse> {
    payload.validate().map_err(|errors| {
        warn!("Rejected request payload: {}", errors);
        ErrorResponse::bad_request(&errors.to_string())
    })
}
