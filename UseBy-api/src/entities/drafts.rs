use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use use_by_domain::entities::{RecurrenceMode, ReminderTime, Schedule, Weekday};

use super::common::ValidationErrorDetail;

/// Append a reminder time to a draft
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct AddReminderTimeRequest {
    /// Current draft
    #[validate]
    pub draft: Schedule,

    /// Time to add; defaults to 12:00
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<ReminderTime>,
}

/// Replace the reminder time at `index`
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateReminderTimeRequest {
    /// Current draft
    #[validate]
    pub draft: Schedule,

    /// Position of the time to replace
    pub index: usize,

    /// New time
    pub time: ReminderTime,
}

/// Remove the reminder time at `index`
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct RemoveReminderTimeRequest {
    /// Current draft
    #[validate]
    pub draft: Schedule,

    /// Position of the time to remove
    pub index: usize,
}

/// Toggle one weekday in the selection
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct ToggleWeekdayRequest {
    /// Current draft
    #[validate]
    pub draft: Schedule,

    /// Weekday to toggle
    pub day: Weekday,
}

/// Switch between daily and selected-day recurrence
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct SetRecurrenceRequest {
    /// Current draft
    #[validate]
    pub draft: Schedule,

    /// New recurrence mode
    pub recurrence: RecurrenceMode,
}

/// Outcome of validating a draft
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ValidationReport {
    /// Whether the draft can be submitted
    pub valid: bool,

    /// The normalized schedule when valid
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule: Option<Schedule>,

    /// Every violated invariant when invalid
    pub errors: Vec<ValidationErrorDetail>,
}
