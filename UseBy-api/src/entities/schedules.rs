use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use use_by_domain::entities::{CommittedSchedule, Schedule};

/// Query parameters for expanding schedule occurrences
#[derive(Debug, Clone, Deserialize, IntoParams, ToSchema)]
pub struct OccurrencesQuery {
    /// First day of the range (YYYY-MM-DD)
    pub from: NaiveDate,

    /// Last day of the range, inclusive (default: six days after `from`)
    pub to: Option<NaiveDate>,
}

/// Query parameters for looking up the next reminder
#[derive(Debug, Clone, Deserialize, IntoParams, ToSchema)]
pub struct NextOccurrenceQuery {
    /// Local date-time to search from, exclusive (default: now)
    pub after: Option<NaiveDateTime>,
}

/// The next reminder a committed schedule fires
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NextOccurrenceResponse {
    pub schedule_id: Uuid,
    pub after: NaiveDateTime,

    /// Absent once the schedule has ended
    pub next: Option<NaiveDateTime>,
}

/// Reminders a committed schedule fires in a date range
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OccurrencesResponse {
    /// Schedule the occurrences belong to
    pub schedule_id: Uuid,

    /// First day of the range
    pub from: NaiveDate,

    /// Last day of the range
    pub to: NaiveDate,

    /// Local date-times, chronological
    pub occurrences: Vec<NaiveDateTime>,
}

/// A schedule accepted by the reminder backend
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CommittedScheduleResponse {
    /// Identifier assigned by the reminder backend
    pub id: Uuid,

    /// When the schedule was accepted
    pub committed_at: DateTime<Utc>,

    /// The accepted, normalized schedule
    pub schedule: Schedule,
}

impl From<CommittedSchedule> for CommittedScheduleResponse {
    fn from(committed: CommittedSchedule) -> Self {
        Self {
            id: committed.id(),
            committed_at: committed.committed_at(),
            schedule: committed.revise(),
        }
    }
}
