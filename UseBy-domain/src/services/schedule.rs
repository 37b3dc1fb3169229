//! Draft editing and validation for medicine reminder schedules.
//!
//! Every operation takes the current draft by value and hands back the next
//! one, so the caller decides when a change becomes visible.

use std::collections::HashSet;

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::entities::schedule::{
    IntakeRelation, RecurrenceMode, ReminderTime, Schedule, ScheduleError, ValidationError, Weekday,
};

/// A new draft: one reminder at 09:00, daily, every weekday selected, taken with food
pub fn create_draft() -> Schedule {
    Schedule::default()
}

/// Append a reminder time. Duplicates are allowed.
pub fn add_reminder_time(mut draft: Schedule, time: ReminderTime) -> Schedule {
    draft.reminder_times.push(time);
    draft
}

/// Remove the reminder time at `index`.
///
/// Fails when `index` is out of bounds or when it would remove the only
/// remaining time.
pub fn remove_reminder_time(mut draft: Schedule, index: usize) -> Result<Schedule, ScheduleError> {
    let len = draft.reminder_times.len();
    if index >= len {
        return Err(ScheduleError::invalid_operation(
            format!("reminder time index {} is out of bounds ({} entries)", index, len),
            draft,
        ));
    }
    if len == 1 {
        return Err(ScheduleError::invalid_operation(
            "a schedule must keep at least one reminder time",
            draft,
        ));
    }

    draft.reminder_times.remove(index);
    Ok(draft)
}

/// Replace the reminder time at `index` in place
pub fn update_reminder_time(
    mut draft: Schedule,
    index: usize,
    time: ReminderTime,
) -> Result<Schedule, ScheduleError> {
    let len = draft.reminder_times.len();
    match draft.reminder_times.get_mut(index) {
        Some(slot) => {
            *slot = time;
            Ok(draft)
        }
        None => Err(ScheduleError::invalid_operation(
            format!("reminder time index {} is out of bounds ({} entries)", index, len),
            draft,
        )),
    }
}

/// Select `day` if it is not selected, otherwise deselect it.
/// An empty selection is allowed while editing.
pub fn toggle_weekday(mut draft: Schedule, day: Weekday) -> Schedule {
    if draft.selected_days.remove(&day) {
        debug!("Deselected {}", day.label());
    } else {
        draft.selected_days.insert(day);
        debug!("Selected {}", day.label());
    }
    draft
}

/// Switch the recurrence mode. The weekday selection is left as it is in both directions.
pub fn set_recurrence_mode(mut draft: Schedule, mode: RecurrenceMode) -> Schedule {
    draft.recurrence = mode;
    draft
}

pub fn set_medicine_name(mut draft: Schedule, name: impl Into<String>) -> Schedule {
    draft.medicine_name = name.into();
    draft
}

pub fn set_dosage(mut draft: Schedule, dosage: impl Into<String>) -> Schedule {
    draft.dosage = dosage.into();
    draft
}

pub fn set_intake(mut draft: Schedule, intake: IntakeRelation) -> Schedule {
    draft.intake = intake;
    draft
}

pub fn set_start_date(mut draft: Schedule, start_date: Option<NaiveDate>) -> Schedule {
    draft.start_date = start_date;
    draft
}

pub fn set_end_date(mut draft: Schedule, end_date: Option<NaiveDate>) -> Schedule {
    draft.end_date = end_date;
    draft
}

/// Check every schedule invariant and report all violations at once.
///
/// Surrounding whitespace is trimmed from the medicine name and dosage before
/// the empty checks; on success the trimmed schedule is returned. Errors are
/// listed in field order.
pub fn validate(mut schedule: Schedule) -> Result<Schedule, Vec<ValidationError>> {
    trim_in_place(&mut schedule.medicine_name);
    trim_in_place(&mut schedule.dosage);

    let mut errors = Vec::new();

    if schedule.medicine_name.is_empty() {
        errors.push(ValidationError::MissingName);
    }
    if schedule.dosage.is_empty() {
        errors.push(ValidationError::MissingDosage);
    }
    if schedule.reminder_times.is_empty() {
        errors.push(ValidationError::NoReminderTimes);
    }
    if schedule.recurrence == RecurrenceMode::SelectedDays && schedule.selected_days.is_empty() {
        errors.push(ValidationError::NoSelectedDays);
    }
    if let (Some(start), Some(end)) = (schedule.start_date, schedule.end_date) {
        if end < start {
            errors.push(ValidationError::EndBeforeStart);
        }
    }

    if !errors.is_empty() {
        debug!("Schedule failed validation with {} error(s)", errors.len());
        return Err(errors);
    }

    let duplicates = duplicate_times(&schedule.reminder_times);
    if !duplicates.is_empty() {
        let listed: Vec<String> = duplicates.iter().map(ToString::to_string).collect();
        warn!(
            "Schedule for {} repeats reminder times: {}",
            schedule.medicine_name,
            listed.join(", ")
        );
    }

    Ok(schedule)
}

fn trim_in_place(value: &mut String) {
    let trimmed = value.trim();
    if trimmed.len() != value.len() {
        *value = trimmed.to_string();
    }
}

/// Reminder times that appear more than once, in first-seen order
fn duplicate_times(times: &[ReminderTime]) -> Vec<ReminderTime> {
    let mut seen = HashSet::new();
    let mut duplicates = Vec::new();
    for time in times {
        if !seen.insert(*time) && !duplicates.contains(time) {
            duplicates.push(*time);
        }
    }
    duplicates
}
