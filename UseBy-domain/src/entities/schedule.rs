use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;
use validator::Validate;

#[cfg(feature = "with-api")]
use utoipa::ToSchema;

/// Errors raised when building schedule value objects from raw input
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueError {
    /// Text that is not of the form HH:MM
    #[error("Invalid reminder time '{0}', expected HH:MM")]
    MalformedTime(String),

    /// Hour or minute outside the wall-clock range
    #[error("Reminder time out of range: {0}")]
    TimeOutOfRange(String),

    /// Weekday ordinal outside 0..=6
    #[error("Invalid weekday {0}, expected 0 (Monday) to 6 (Sunday)")]
    InvalidWeekday(u8),
}

/// A wall-clock time of day with no date or timezone attached
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Validate)]
#[serde(try_from = "String", into = "String")]
pub struct ReminderTime {
    #[validate(range(max = 23, message = "Hour must be between 0 and 23"))]
    hour: u8,

    #[validate(range(max = 59, message = "Minute must be between 0 and 59"))]
    minute: u8,
}

impl ReminderTime {
    /// Time a fresh draft starts with
    pub const DEFAULT: ReminderTime = ReminderTime { hour: 9, minute: 0 };

    /// Time used when the user adds another reminder without picking one
    pub const ADDED_DEFAULT: ReminderTime = ReminderTime { hour: 12, minute: 0 };

    /// Create a reminder time, rejecting hours above 23 and minutes above 59
    pub fn new(hour: u8, minute: u8) -> Result<Self, ValueError> {
        let time = Self { hour, minute };
        if let Err(errors) = time.validate() {
            let message = errors
                .field_errors()
                .values()
                .flat_map(|errs| errs.iter())
                .filter_map(|err| err.message.as_ref().map(|m| m.to_string()))
                .collect::<Vec<String>>()
                .join("; ");
            return Err(ValueError::TimeOutOfRange(message));
        }
        Ok(time)
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }

    /// This time of day on the given date
    pub fn on(&self, date: NaiveDate) -> Option<NaiveDateTime> {
        date.and_hms_opt(u32::from(self.hour), u32::from(self.minute), 0)
    }
}

impl fmt::Display for ReminderTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for ReminderTime {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || ValueError::MalformedTime(s.to_string());

        let (hour, minute) = s.split_once(':').ok_or_else(malformed)?;
        let two_digits = |part: &str| part.len() == 2 && part.bytes().all(|b| b.is_ascii_digit());
        if !two_digits(hour) || !two_digits(minute) {
            return Err(malformed());
        }

        let hour = hour.parse::<u8>().map_err(|_| malformed())?;
        let minute = minute.parse::<u8>().map_err(|_| malformed())?;
        Self::new(hour, minute)
    }
}

impl TryFrom<String> for ReminderTime {
    type Error = ValueError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ReminderTime> for String {
    fn from(time: ReminderTime) -> Self {
        time.to_string()
    }
}

#[cfg(feature = "with-api")]
impl<'s> ToSchema<'s> for ReminderTime {
    fn schema() -> (&'s str, utoipa::openapi::RefOr<utoipa::openapi::schema::Schema>) {
        let object = utoipa::openapi::ObjectBuilder::new()
            .schema_type(utoipa::openapi::SchemaType::String)
            .description(Some("Time of day in HH:MM form"))
            .pattern(Some("^([01][0-9]|2[0-3]):[0-5][0-9]$"))
            .example(Some(serde_json::json!("09:00")))
            .build();
        (
            "ReminderTime",
            utoipa::openapi::RefOr::T(utoipa::openapi::schema::Schema::Object(object)),
        )
    }
}

/// Day of the week, ordinal 0 (Monday) to 6 (Sunday)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    /// All weekdays, Monday first
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    pub fn ordinal(self) -> u8 {
        self as u8
    }

    pub fn from_ordinal(ordinal: u8) -> Option<Self> {
        Self::ALL.get(usize::from(ordinal)).copied()
    }

    /// Short label as shown on the day picker
    pub fn label(self) -> &'static str {
        match self {
            Weekday::Monday => "Mon",
            Weekday::Tuesday => "Tue",
            Weekday::Wednesday => "Wed",
            Weekday::Thursday => "Thu",
            Weekday::Friday => "Fri",
            Weekday::Saturday => "Sat",
            Weekday::Sunday => "Sun",
        }
    }
}

impl TryFrom<u8> for Weekday {
    type Error = ValueError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_ordinal(value).ok_or(ValueError::InvalidWeekday(value))
    }
}

impl From<Weekday> for u8 {
    fn from(day: Weekday) -> Self {
        day.ordinal()
    }
}

impl From<chrono::Weekday> for Weekday {
    fn from(day: chrono::Weekday) -> Self {
        // num_days_from_monday is always in 0..=6
        Self::ALL[day.num_days_from_monday() as usize]
    }
}

impl From<Weekday> for chrono::Weekday {
    fn from(day: Weekday) -> Self {
        match day {
            Weekday::Monday => chrono::Weekday::Mon,
            Weekday::Tuesday => chrono::Weekday::Tue,
            Weekday::Wednesday => chrono::Weekday::Wed,
            Weekday::Thursday => chrono::Weekday::Thu,
            Weekday::Friday => chrono::Weekday::Fri,
            Weekday::Saturday => chrono::Weekday::Sat,
            Weekday::Sunday => chrono::Weekday::Sun,
        }
    }
}

#[cfg(feature = "with-api")]
impl<'s> ToSchema<'s> for Weekday {
    fn schema() -> (&'s str, utoipa::openapi::RefOr<utoipa::openapi::schema::Schema>) {
        let object = utoipa::openapi::ObjectBuilder::new()
            .schema_type(utoipa::openapi::SchemaType::Integer)
            .description(Some("Weekday ordinal, 0 = Monday ... 6 = Sunday"))
            .minimum(Some(0.0))
            .maximum(Some(6.0))
            .example(Some(serde_json::json!(0)))
            .build();
        (
            "Weekday",
            utoipa::openapi::RefOr::T(utoipa::openapi::schema::Schema::Object(object)),
        )
    }
}

/// Whether the medicine is taken with food or on an empty stomach
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum IntakeRelation {
    #[default]
    WithFood,
    EmptyStomach,
}

impl IntakeRelation {
    pub fn as_code(&self) -> &'static str {
        match self {
            IntakeRelation::WithFood => "with_food",
            IntakeRelation::EmptyStomach => "empty_stomach",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "with_food" => Some(IntakeRelation::WithFood),
            "empty_stomach" => Some(IntakeRelation::EmptyStomach),
            _ => None,
        }
    }
}

/// Rule deciding which calendar days a schedule is active on
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum RecurrenceMode {
    /// Every calendar day between start and end date
    #[default]
    Daily,

    /// Only on the weekdays in `selected_days`
    SelectedDays,
}

impl RecurrenceMode {
    pub fn as_code(&self) -> &'static str {
        match self {
            RecurrenceMode::Daily => "daily",
            RecurrenceMode::SelectedDays => "selected_days",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "daily" => Some(RecurrenceMode::Daily),
            "selected_days" => Some(RecurrenceMode::SelectedDays),
            _ => None,
        }
    }
}

/// Most reminder times a single schedule may carry
pub const MAX_REMINDER_TIMES: usize = 24;

/// A medicine reminder schedule.
///
/// While it is a draft the presentation layer edits it through the pure
/// functions in [`crate::services::schedule`]; each of them consumes the
/// current value and returns the next one.
///
/// The `Validate` derive only bounds payload sizes; the schedule invariants
/// are checked by [`crate::services::schedule::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct Schedule {
    /// Name of the medicine
    #[validate(length(max = 200, message = "Medicine name cannot exceed 200 characters"))]
    pub medicine_name: String,

    /// Dosage text, e.g. "500mg" or "1 tablet"
    #[validate(length(max = 100, message = "Dosage cannot exceed 100 characters"))]
    pub dosage: String,

    /// Intake relation
    #[serde(default)]
    pub intake: IntakeRelation,

    /// Reminder times in the order the user added them
    #[validate(length(max = 24, message = "A schedule cannot have more than 24 reminder times"))]
    pub reminder_times: Vec<ReminderTime>,

    /// Recurrence rule
    #[serde(default)]
    pub recurrence: RecurrenceMode,

    /// Weekdays the schedule fires on when `recurrence` is `selected_days`
    #[serde(default)]
    #[cfg_attr(feature = "with-api", schema(value_type = Vec<Weekday>))]
    pub selected_days: BTreeSet<Weekday>,

    /// First active day; absent means the schedule starts immediately
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,

    /// Last active day; absent means open-ended
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
}

impl Default for Schedule {
    fn default() -> Self {
        Self {
            medicine_name: String::new(),
            dosage: String::new(),
            intake: IntakeRelation::WithFood,
            reminder_times: vec![ReminderTime::DEFAULT],
            recurrence: RecurrenceMode::Daily,
            selected_days: Weekday::ALL.into_iter().collect(),
            start_date: None,
            end_date: None,
        }
    }
}

/// Structural errors from draft mutations. No partial change is ever applied;
/// the untouched draft travels back inside the error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    #[error("Invalid operation: {reason}")]
    InvalidOperation {
        reason: String,
        draft: Box<Schedule>,
    },
}

impl ScheduleError {
    pub(crate) fn invalid_operation(reason: impl Into<String>, draft: Schedule) -> Self {
        ScheduleError::InvalidOperation {
            reason: reason.into(),
            draft: Box::new(draft),
        }
    }

    /// Recover the unchanged draft
    pub fn into_draft(self) -> Schedule {
        match self {
            ScheduleError::InvalidOperation { draft, .. } => *draft,
        }
    }
}

/// One violated schedule invariant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Error)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum ValidationError {
    #[error("Medicine name is required")]
    MissingName,

    #[error("Dosage is required")]
    MissingDosage,

    #[error("At least one reminder time is required")]
    NoReminderTimes,

    #[error("Select at least one day")]
    NoSelectedDays,

    #[error("End date must not be before the start date")]
    EndBeforeStart,
}

impl ValidationError {
    /// Schedule field the error belongs to
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::MissingName => "medicine_name",
            ValidationError::MissingDosage => "dosage",
            ValidationError::NoReminderTimes => "reminder_times",
            ValidationError::NoSelectedDays => "selected_days",
            ValidationError::EndBeforeStart => "end_date",
        }
    }

    /// Machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::MissingName => "missing_name",
            ValidationError::MissingDosage => "missing_dosage",
            ValidationError::NoReminderTimes => "no_reminder_times",
            ValidationError::NoSelectedDays => "no_selected_days",
            ValidationError::EndBeforeStart => "end_before_start",
        }
    }
}

/// A schedule that passed validation and may be handed to the reminder backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmittableSchedule(Schedule);

impl SubmittableSchedule {
    pub fn schedule(&self) -> &Schedule {
        &self.0
    }

    pub fn into_inner(self) -> Schedule {
        self.0
    }
}

impl TryFrom<Schedule> for SubmittableSchedule {
    type Error = Vec<ValidationError>;

    fn try_from(schedule: Schedule) -> Result<Self, Self::Error> {
        crate::services::schedule::validate(schedule).map(SubmittableSchedule)
    }
}

/// A schedule accepted by the reminder backend. Read-only; use
/// [`CommittedSchedule::revise`] to start a new draft from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct CommittedSchedule {
    /// Identifier assigned by the reminder backend
    id: Uuid,

    /// When the backend accepted the schedule
    committed_at: DateTime<Utc>,

    /// The accepted schedule
    schedule: Schedule,
}

impl CommittedSchedule {
    pub(crate) fn new(id: Uuid, committed_at: DateTime<Utc>, schedule: Schedule) -> Self {
        Self {
            id,
            committed_at,
            schedule,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn committed_at(&self) -> DateTime<Utc> {
        self.committed_at
    }

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    /// Copy-on-write: a fresh draft holding the committed values
    pub fn revise(&self) -> Schedule {
        self.schedule.clone()
    }
}
