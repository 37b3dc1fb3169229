use axum::{http::StatusCode, response::IntoResponse, Json};
use tracing::{debug, info, instrument};

use use_by_domain::entities::{ReminderTime, Schedule, ScheduleError, MAX_REMINDER_TIMES};
use use_by_domain::services::schedule;

use super::check_payload;
use crate::entities::common::{ErrorResponse, ValidationErrorDetail};
use crate::entities::drafts::{
    AddReminderTimeRequest, RemoveReminderTimeRequest, SetRecurrenceRequest, ToggleWeekdayRequest,
    UpdateReminderTimeRequest, ValidationReport,
};

fn invalid_operation(err: ScheduleError) -> ErrorResponse {
    let message = err.to_string();
    info!("Draft operation rejected: {}", message);
    let draft = serde_json::to_value(err.into_draft()).unwrap_or(serde_json::Value::Null);
    ErrorResponse::invalid_operation(&message, draft)
}

/// Start a new draft with the default values
#[utoipa::path(
    post,
    path = "/api/v1/drafts",
    responses(
        (status = 200, description = "A fresh draft", body = Schedule),
    ),
    tag = "drafts"
)]
#[instrument]
pub async fn create_draft() -> impl IntoResponse {
    debug!("Creating a new draft");
    (StatusCode::OK, Json(schedule::create_draft()))
}

/// Append a reminder time to a draft
#[utoipa::path(
    post,
    path = "/api/v1/drafts/reminder-times",
    request_body = AddReminderTimeRequest,
    responses(
        (status = 200, description = "Draft with the time appended", body = Schedule),
        (status = 400, description = "Invalid request or the draft is already full", body = ErrorResponse),
    ),
    tag = "drafts"
)]
#[instrument(skip(request))]
pub async fn add_reminder_time(
    Json(request): Json<AddReminderTimeRequest>,
) -> Result<Json<Schedule>, ErrorResponse> {
    check_payload(&request)?;
    // Appending must not push the draft past the payload bound
    if request.draft.reminder_times.len() >= MAX_REMINDER_TIMES {
        info!("Draft already holds {} reminder times", MAX_REMINDER_TIMES);
        return Err(ErrorResponse::bad_request(&format!(
            "A schedule cannot have more than {} reminder times",
            MAX_REMINDER_TIMES
        )));
    }
    let time = request.time.unwrap_or(ReminderTime::ADDED_DEFAULT);
    debug!("Adding reminder time {}", time);
    Ok(Json(schedule::add_reminder_time(request.draft, time)))
}

/// Replace the reminder time at an index
#[utoipa::path(
    post,
    path = "/api/v1/drafts/reminder-times/update",
    request_body = UpdateReminderTimeRequest,
    responses(
        (status = 200, description = "Draft with the time replaced", body = Schedule),
        (status = 400, description = "Index out of bounds; the unchanged draft is in details", body = ErrorResponse),
    ),
    tag = "drafts"
)]
#[instrument(skip(request))]
pub async fn update_reminder_time(
    Json(request): Json<UpdateReminderTimeRequest>,
) -> Result<Json<Schedule>, ErrorResponse> {
    check_payload(&request)?;
    schedule::update_reminder_time(request.draft, request.index, request.time)
        .map(Json)
        .map_err(invalid_operation)
}

/// Remove the reminder time at an index
#[utoipa::path(
    post,
    path = "/api/v1/drafts/reminder-times/remove",
    request_body = RemoveReminderTimeRequest,
    responses(
        (status = 200, description = "Draft with the time removed", body = Schedule),
        (status = 400, description = "Index out of bounds or last remaining time; the unchanged draft is in details", body = ErrorResponse),
    ),
    tag = "drafts"
)]
#[instrument(skip(request))]
pub async fn remove_reminder_time(
    Json(request): Json<RemoveReminderTimeRequest>,
) -> Result<Json<Schedule>, ErrorResponse> {
    check_payload(&request)?;
    schedule::remove_reminder_time(request.draft, request.index)
        .map(Json)
        .map_err(invalid_operation)
}

/// Select or deselect a weekday
#[utoipa::path(
    post,
    path = "/api/v1/drafts/weekdays/toggle",
    request_body = ToggleWeekdayRequest,
    responses(
        (status = 200, description = "Draft with the weekday toggled", body = Schedule),
        (status = 400, description = "Invalid request", body = ErrorResponse),
    ),
    tag = "drafts"
)]
#[instrument(skip(request))]
pub async fn toggle_weekday(
    Json(request): Json<ToggleWeekdayRequest>,
) -> Result<Json<Schedule>, ErrorResponse> {
    check_payload(&request)?;
    Ok(Json(schedule::toggle_weekday(request.draft, request.day)))
}

/// Switch the recurrence mode
#[utoipa::path(
    post,
    path = "/api/v1/drafts/recurrence",
    request_body = SetRecurrenceRequest,
    responses(
        (status = 200, description = "Draft with the new recurrence mode", body = Schedule),
        (status = 400, description = "Invalid request", body = ErrorResponse),
    ),
    tag = "drafts"
)]
#[instrument(skip(request))]
pub async fn set_recurrence(
    Json(request): Json<SetRecurrenceRequest>,
) -> Result<Json<Schedule>, ErrorResponse> {
    check_payload(&request)?;
    Ok(Json(schedule::set_recurrence_mode(request.draft, request.recurrence)))
}

/// Check a draft against every schedule invariant without committing it
#[utoipa::path(
    post,
    path = "/api/v1/drafts/validate",
    request_body = Schedule,
    responses(
        (status = 200, description = "Validation outcome", body = ValidationReport),
        (status = 400, description = "Invalid request", body = ErrorResponse),
    ),
    tag = "drafts"
)]
#[instrument(skip(draft))]
pub async fn validate_draft(Json(draft): Json<Schedule>) -> Result<Json<ValidationReport>, ErrorResponse> {
    check_payload(&draft)?;

    let report = match schedule::validate(draft) {
        Ok(schedule) => ValidationReport {
            valid: true,
            schedule: Some(schedule),
            errors: Vec::new(),
        },
        Err(errors) => {
            debug!("Draft has {} validation error(s)", errors.len());
            ValidationReport {
                valid: false,
                schedule: None,
                errors: errors.iter().map(ValidationErrorDetail::from).collect(),
            }
        }
    };
    Ok(Json(report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use use_by_domain::entities::Weekday;
    use use_by_domain::testing::sample_valid_draft;

    #[tokio::test]
    async fn test_add_reminder_time_defaults_to_noon() {
        let request = AddReminderTimeRequest {
            draft: schedule::create_draft(),
            time: None,
        };
        let Json(draft) = add_reminder_time(Json(request)).await.unwrap();
        assert_eq!(
            draft.reminder_times,
            vec![ReminderTime::DEFAULT, ReminderTime::ADDED_DEFAULT]
        );
    }

    #[tokio::test]
    async fn test_add_stops_at_reminder_time_cap() {
        let mut draft = schedule::create_draft();
        draft.reminder_times = vec![ReminderTime::DEFAULT; MAX_REMINDER_TIMES - 1];

        let request = AddReminderTimeRequest { draft, time: None };
        let Json(full) = add_reminder_time(Json(request)).await.unwrap();
        assert_eq!(full.reminder_times.len(), MAX_REMINDER_TIMES);

        let request = AddReminderTimeRequest {
            draft: full.clone(),
            time: None,
        };
        let err = add_reminder_time(Json(request)).await.unwrap_err();
        assert_eq!(err.error, "bad_request");

        // The full draft is still accepted everywhere else
        let request = RemoveReminderTimeRequest { draft: full.clone(), index: 0 };
        let Json(shrunk) = remove_reminder_time(Json(request)).await.unwrap();
        assert_eq!(shrunk.reminder_times.len(), MAX_REMINDER_TIMES - 1);

        let draft = schedule::set_dosage(schedule::set_medicine_name(full, "Insulin"), "4 units");
        let Json(report) = validate_draft(Json(draft)).await.unwrap();
        assert!(report.valid);
    }

    #[tokio::test]
    async fn test_remove_last_time_returns_unchanged_draft() {
        let draft = schedule::create_draft();
        let request = RemoveReminderTimeRequest {
            draft: draft.clone(),
            index: 0,
        };

        let err = remove_reminder_time(Json(request)).await.unwrap_err();
        assert_eq!(err.error, "invalid_operation");

        let details = err.details.unwrap();
        let returned: Schedule = serde_json::from_value(details["draft"].clone()).unwrap();
        assert_eq!(returned, draft);
    }

    #[tokio::test]
    async fn test_toggle_weekday() {
        let request = ToggleWeekdayRequest {
            draft: schedule::create_draft(),
            day: Weekday::Sunday,
        };
        let Json(draft) = toggle_weekday(Json(request)).await.unwrap();
        assert_eq!(draft.selected_days.len(), 6);
        assert!(!draft.selected_days.contains(&Weekday::Sunday));
    }

    #[tokio::test]
    async fn test_validate_draft_reports_errors() {
        let Json(report) = validate_draft(Json(schedule::create_draft())).await.unwrap();
        assert!(!report.valid);
        assert!(report.schedule.is_none());
        let codes: Vec<&str> = report.errors.iter().map(|e| e.code.as_str()).collect();
        assert_eq!(codes, vec!["missing_name", "missing_dosage"]);

        let Json(report) = validate_draft(Json(sample_valid_draft())).await.unwrap();
        assert!(report.valid);
        assert!(report.errors.is_empty());
    }

    #[tokio::test]
    async fn test_oversized_payload_is_rejected() {
        let draft = schedule::set_medicine_name(sample_valid_draft(), "x".repeat(201));
        let err = validate_draft(Json(draft)).await.unwrap_err();
        assert_eq!(err.error, "bad_request");
    }
}
