use std::collections::BTreeSet;

use crate::entities::schedule::{
    CommittedSchedule, IntakeRelation, RecurrenceMode, ReminderTime, Schedule, SubmittableSchedule,
    Weekday,
};
use use_by_data::models::schedule::{NewStoredSchedule, StoredSchedule};
use uuid::Uuid;

// Conversion functions between domain entities and data models
// These functions follow the pattern convert_to_[target_layer]_[model_name]

/// Parse a string ID into a UUID with a descriptive error message
pub fn parse_string_to_uuid(id: &str) -> Result<Uuid, String> {
    Uuid::parse_str(id).map_err(|_| format!("Invalid UUID format: {}", id))
}

/// Convert a validated schedule into the backend's input model
pub fn convert_to_data_new_schedule(submittable: &SubmittableSchedule) -> NewStoredSchedule {
    let schedule = submittable.schedule();
    NewStoredSchedule {
        medicine_name: schedule.medicine_name.clone(),
        dosage: schedule.dosage.clone(),
        intake: schedule.intake.as_code().to_string(),
        reminder_times: schedule.reminder_times.iter().map(ToString::to_string).collect(),
        recurrence: schedule.recurrence.as_code().to_string(),
        selected_days: schedule.selected_days.iter().map(|day| day.ordinal()).collect(),
        start_date: schedule.start_date,
        end_date: schedule.end_date,
    }
}

/// Convert a stored record back into a committed domain schedule
pub fn convert_to_domain_committed(stored: StoredSchedule) -> Result<CommittedSchedule, String> {
    let id = parse_string_to_uuid(&stored.id)?;

    let intake = IntakeRelation::from_code(&stored.intake)
        .ok_or_else(|| format!("Invalid intake relation: {}", stored.intake))?;
    let recurrence = RecurrenceMode::from_code(&stored.recurrence)
        .ok_or_else(|| format!("Invalid recurrence mode: {}", stored.recurrence))?;

    let reminder_times = stored
        .reminder_times
        .iter()
        .map(|time| time.parse::<ReminderTime>().map_err(|e| e.to_string()))
        .collect::<Result<Vec<_>, _>>()?;

    let selected_days = stored
        .selected_days
        .iter()
        .map(|&day| Weekday::try_from(day).map_err(|e| e.to_string()))
        .collect::<Result<BTreeSet<Weekday>, String>>()?;

    let schedule = Schedule {
        medicine_name: stored.medicine_name,
        dosage: stored.dosage,
        intake,
        reminder_times,
        recurrence,
        selected_days,
        start_date: stored.start_date,
        end_date: stored.end_date,
    };

    Ok(CommittedSchedule::new(id, stored.committed_at, schedule))
}
