use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate, NaiveDateTime};

use crate::entities::schedule::{RecurrenceMode, ReminderTime, Schedule, Weekday};

/// Whether the schedule is active on `date`
pub fn fires_on(schedule: &Schedule, date: NaiveDate) -> bool {
    if schedule.start_date.map_or(false, |start| date < start) {
        return false;
    }
    if schedule.end_date.map_or(false, |end| date > end) {
        return false;
    }

    match schedule.recurrence {
        RecurrenceMode::Daily => true,
        RecurrenceMode::SelectedDays => schedule
            .selected_days
            .contains(&Weekday::from(date.weekday())),
    }
}

/// Every reminder the schedule fires between `from` and `to`, both inclusive,
/// in chronological order. A time listed twice fires once per day.
pub fn occurrences_between(schedule: &Schedule, from: NaiveDate, to: NaiveDate) -> Vec<NaiveDateTime> {
    let times = distinct_times(schedule);
    let first = schedule.start_date.map_or(from, |start| start.max(from));
    let last = schedule.end_date.map_or(to, |end| end.min(to));

    let mut occurrences = Vec::new();
    if times.is_empty() || last < first {
        return occurrences;
    }

    let mut day = first;
    loop {
        if fires_on(schedule, day) {
            occurrences.extend(times.iter().filter_map(|time| time.on(day)));
        }
        match day.succ_opt() {
            Some(next) if next <= last => day = next,
            _ => break,
        }
    }
    occurrences
}

/// The first reminder strictly after `after`, or `None` if the schedule never
/// fires again.
pub fn next_occurrence(schedule: &Schedule, after: NaiveDateTime) -> Option<NaiveDateTime> {
    let times = distinct_times(schedule);
    if times.is_empty() {
        return None;
    }

    let mut day = schedule
        .start_date
        .map_or(after.date(), |start| start.max(after.date()));

    // Any selected weekday comes round within a week
    for _ in 0..8 {
        if schedule.end_date.map_or(false, |end| day > end) {
            return None;
        }
        if fires_on(schedule, day) {
            let next = times
                .iter()
                .filter_map(|time| time.on(day))
                .find(|candidate| *candidate > after);
            if next.is_some() {
                return next;
            }
        }
        day = day.succ_opt()?;
    }
    None
}

fn distinct_times(schedule: &Schedule) -> BTreeSet<ReminderTime> {
    schedule.reminder_times.iter().copied().collect()
}
