use std::sync::Arc;

use axum::{
    extract::{Json, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::{Duration, Local};
use uuid::Uuid;
use tracing::{error, info, instrument, warn};

use use_by_domain::entities::Schedule;
use use_by_domain::services::{MedicineScheduleServiceError, MedicineScheduleServiceTrait};

use super::check_payload;
use crate::entities::common::ErrorResponse;
use crate::entities::schedules::{
    CommittedScheduleResponse, NextOccurrenceQuery, NextOccurrenceResponse, OccurrencesQuery,
    OccurrencesResponse,
};

/// Service type for dependency injection
pub type ScheduleService = Arc<dyn MedicineScheduleServiceTrait + Send + Sync>;

/// Days covered by an occurrence query that gives no end date
const DEFAULT_OCCURRENCE_SPAN_DAYS: i64 = 6;

impl From<MedicineScheduleServiceError> for ErrorResponse {
    fn from(err: MedicineScheduleServiceError) -> Self {
        match err {
            MedicineScheduleServiceError::Validation(errors) => {
                info!("Schedule rejected with {} validation error(s)", errors.len());
                ErrorResponse::validation_error(&errors)
            }
            MedicineScheduleServiceError::InvalidId(id) => {
                ErrorResponse::bad_request(&format!("Invalid schedule id: {}", id))
            }
            MedicineScheduleServiceError::NotFound(msg) => {
                info!("{}", msg);
                ErrorResponse::not_found("schedule")
            }
            MedicineScheduleServiceError::InvalidRange(msg) => ErrorResponse::bad_request(&msg),
            MedicineScheduleServiceError::Backend(msg) => {
                error!("Reminder backend failure: {}", msg);
                ErrorResponse::internal_error()
            }
        }
    }
}

/// Validate a draft and commit it to the reminder backend
#[utoipa::path(
    post,
    path = "/api/v1/schedules",
    request_body = Schedule,
    responses(
        (status = 201, description = "Schedule committed", body = CommittedScheduleResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 422, description = "Draft violates schedule rules", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "schedules"
)]
#[instrument(skip(service, draft))]
pub async fn submit_schedule(
    State(service): State<ScheduleService>,
    Json(draft): Json<Schedule>,
) -> Result<impl IntoResponse, ErrorResponse> {
    check_payload(&draft)?;

    let committed = service.submit(draft).await?;
    info!("Schedule {} committed", committed.id());
    Ok((StatusCode::CREATED, Json(CommittedScheduleResponse::from(committed))))
}

/// List committed schedules, oldest first
#[utoipa::path(
    get,
    path = "/api/v1/schedules",
    responses(
        (status = 200, description = "Committed schedules", body = [CommittedScheduleResponse]),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "schedules"
)]
#[instrument(skip(service))]
pub async fn list_schedules(
    State(service): State<ScheduleService>,
) -> Result<Json<Vec<CommittedScheduleResponse>>, ErrorResponse> {
    let schedules = service.get_all().await?;
    Ok(Json(schedules.into_iter().map(CommittedScheduleResponse::from).collect()))
}

/// Get a committed schedule by ID
#[utoipa::path(
    get,
    path = "/api/v1/schedules/{id}",
    params(
        ("id" = String, Path, description = "Schedule ID")
    ),
    responses(
        (status = 200, description = "Schedule found", body = CommittedScheduleResponse),
        (status = 400, description = "Malformed ID", body = ErrorResponse),
        (status = 404, description = "Schedule not found", body = ErrorResponse),
    ),
    tag = "schedules"
)]
#[instrument(skip(service))]
pub async fn get_schedule(
    State(service): State<ScheduleService>,
    Path(id): Path<String>,
) -> Result<Json<CommittedScheduleResponse>, ErrorResponse> {
    let committed = service.get_by_id(&id).await?;
    Ok(Json(CommittedScheduleResponse::from(committed)))
}

/// Start a new draft from a committed schedule. The committed schedule is not changed.
#[utoipa::path(
    post,
    path = "/api/v1/schedules/{id}/revise",
    params(
        ("id" = String, Path, description = "Schedule ID")
    ),
    responses(
        (status = 200, description = "Draft holding the committed values", body = Schedule),
        (status = 400, description = "Malformed ID", body = ErrorResponse),
        (status = 404, description = "Schedule not found", body = ErrorResponse),
    ),
    tag = "schedules"
)]
#[instrument(skip(service))]
pub async fn revise_schedule(
    State(service): State<ScheduleService>,
    Path(id): Path<String>,
) -> Result<Json<Schedule>, ErrorResponse> {
    let draft = service.revise(&id).await?;
    Ok(Json(draft))
}

/// Reminders a committed schedule fires between two dates, both inclusive
#[utoipa::path(
    get,
    path = "/api/v1/schedules/{id}/occurrences",
    params(
        ("id" = Uuid, Path, description = "Schedule ID"),
        OccurrencesQuery
    ),
    responses(
        (status = 200, description = "Occurrences in chronological order", body = OccurrencesResponse),
        (status = 400, description = "Malformed ID or range", body = ErrorResponse),
        (status = 404, description = "Schedule not found", body = ErrorResponse),
    ),
    tag = "schedules"
)]
#[instrument(skip(service))]
pub async fn schedule_occurrences(
    State(service): State<ScheduleService>,
    Path(id): Path<Uuid>,
    Query(query): Query<OccurrencesQuery>,
) -> Result<Json<OccurrencesResponse>, ErrorResponse> {
    let from = query.from;
    let to = match query.to {
        Some(to) => to,
        None => from
            .checked_add_signed(Duration::days(DEFAULT_OCCURRENCE_SPAN_DAYS))
            .ok_or_else(|| {
                warn!("Occurrence range starting {} overflows the calendar", from);
                ErrorResponse::bad_request("Date range is out of bounds")
            })?,
    };

    let occurrences = service.occurrences(&id.to_string(), from, to).await?;

    Ok(Json(OccurrencesResponse {
        schedule_id: id,
        from,
        to,
        occurrences,
    }))
}

/// The next reminder a committed schedule fires
#[utoipa::path(
    get,
    path = "/api/v1/schedules/{id}/next",
    params(
        ("id" = Uuid, Path, description = "Schedule ID"),
        NextOccurrenceQuery
    ),
    responses(
        (status = 200, description = "Next reminder, absent once the schedule has ended", body = NextOccurrenceResponse),
        (status = 400, description = "Malformed ID", body = ErrorResponse),
        (status = 404, description = "Schedule not found", body = ErrorResponse),
    ),
    tag = "schedules"
)]
#[instrument(skip(service))]
pub async fn next_occurrence(
    State(service): State<ScheduleService>,
    Path(id): Path<Uuid>,
    Query(query): Query<NextOccurrenceQuery>,
) -> Result<Json<NextOccurrenceResponse>, ErrorResponse> {
    let after = query.after.unwrap_or_else(|| Local::now().naive_local());
    let next = service.next_occurrence(&id.to_string(), after).await?;

    Ok(Json(NextOccurrenceResponse {
        schedule_id: id,
        after,
        next,
    }))
}
