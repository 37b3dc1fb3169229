use serde::{Deserialize, Serialize};
use chrono::{DateTime, NaiveDate, Utc};

/// Storage model for a schedule accepted by the reminder backend
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoredSchedule {
    /// Unique identifier assigned on acceptance
    pub id: String,

    /// Name of the medicine
    pub medicine_name: String,

    /// Free-form dosage text (e.g. "500mg", "1 tablet")
    pub dosage: String,

    /// Intake relation code ("with_food" or "empty_stomach")
    pub intake: String,

    /// Reminder times in "HH:MM" form, in the order the user added them
    pub reminder_times: Vec<String>,

    /// Recurrence code ("daily" or "selected_days")
    pub recurrence: String,

    /// Selected weekday ordinals, Monday = 0
    pub selected_days: Vec<u8>,

    /// First day the schedule is active
    pub start_date: Option<NaiveDate>,

    /// Last day the schedule is active
    pub end_date: Option<NaiveDate>,

    /// When the backend accepted the schedule
    pub committed_at: DateTime<Utc>,
}

/// Input data for handing a validated schedule to the backend
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewStoredSchedule {
    pub medicine_name: String,
    pub dosage: String,
    pub intake: String,
    pub reminder_times: Vec<String>,
    pub recurrence: String,
    pub selected_days: Vec<u8>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}
