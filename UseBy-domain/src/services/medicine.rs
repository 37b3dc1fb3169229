use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use thiserror::Error;
use tracing::{error, info};

use crate::entities::conversions;
use crate::entities::schedule::{CommittedSchedule, Schedule, SubmittableSchedule, ValidationError};
use crate::services::occurrences;
use use_by_data::repository::{ReminderBackendTrait, RepositoryError};

/// Longest range, in days, for which occurrences are expanded
pub const MAX_OCCURRENCE_RANGE_DAYS: i64 = 366;

/// Medicine schedule service errors
#[derive(Debug, Error)]
pub enum MedicineScheduleServiceError {
    /// The draft violates one or more schedule invariants
    #[error("Validation error: {}", join_messages(.0))]
    Validation(Vec<ValidationError>),

    /// Malformed schedule identifier
    #[error("Invalid schedule id: {0}")]
    InvalidId(String),

    /// Not found error
    #[error("Schedule not found: {0}")]
    NotFound(String),

    /// Bad occurrence range
    #[error("Invalid range: {0}")]
    InvalidRange(String),

    /// Reminder backend error
    #[error("Reminder backend error: {0}")]
    Backend(String),
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<String>>()
        .join("; ")
}

/// Trait for committing medicine schedules and reading them back
#[async_trait]
pub trait MedicineScheduleServiceTrait {
    /// Validate a draft and hand it to the reminder backend
    async fn submit(&self, draft: Schedule) -> Result<CommittedSchedule, MedicineScheduleServiceError>;

    /// Get all committed schedules, oldest first
    async fn get_all(&self) -> Result<Vec<CommittedSchedule>, MedicineScheduleServiceError>;

    /// Get a committed schedule by ID
    async fn get_by_id(&self, id: &str) -> Result<CommittedSchedule, MedicineScheduleServiceError>;

    /// Start a new draft from a committed schedule
    async fn revise(&self, id: &str) -> Result<Schedule, MedicineScheduleServiceError>;

    /// Reminders a committed schedule fires between two dates, inclusive
    async fn occurrences(
        &self,
        id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<NaiveDateTime>, MedicineScheduleServiceError>;

    /// First reminder strictly after `after`, `None` once the schedule has ended
    async fn next_occurrence(
        &self,
        id: &str,
        after: NaiveDateTime,
    ) -> Result<Option<NaiveDateTime>, MedicineScheduleServiceError>;
}

/// Medicine schedule service backed by a reminder backend
pub struct MedicineScheduleService<R: ReminderBackendTrait> {
    backend: R,
}

impl<R: ReminderBackendTrait> MedicineScheduleService<R> {
    pub fn new(backend: R) -> Self {
        Self { backend }
    }

    fn map_repo_error(&self, err: RepositoryError) -> MedicineScheduleServiceError {
        match err {
            RepositoryError::NotFound(msg) => MedicineScheduleServiceError::NotFound(msg),
            _ => MedicineScheduleServiceError::Backend(err.to_string()),
        }
    }

    fn map_conversion_error(&self, err: String) -> MedicineScheduleServiceError {
        error!("Reminder backend returned an unreadable schedule: {}", err);
        MedicineScheduleServiceError::Backend(err)
    }
}

#[async_trait]
impl<R: ReminderBackendTrait> MedicineScheduleServiceTrait for MedicineScheduleService<R> {
    async fn submit(&self, draft: Schedule) -> Result<CommittedSchedule, MedicineScheduleServiceError> {
        let submittable = SubmittableSchedule::try_from(draft)
            .map_err(MedicineScheduleServiceError::Validation)?;

        let data_schedule = conversions::convert_to_data_new_schedule(&submittable);
        let stored = self
            .backend
            .accept(data_schedule)
            .await
            .map_err(|e| self.map_repo_error(e))?;

        let committed = conversions::convert_to_domain_committed(stored)
            .map_err(|e| self.map_conversion_error(e))?;

        info!(
            "Committed schedule {} for {}",
            committed.id(),
            committed.schedule().medicine_name
        );
        Ok(committed)
    }

    async fn get_all(&self) -> Result<Vec<CommittedSchedule>, MedicineScheduleServiceError> {
        let stored = self
            .backend
            .get_all()
            .await
            .map_err(|e| self.map_repo_error(e))?;

        stored
            .into_iter()
            .map(|s| conversions::convert_to_domain_committed(s).map_err(|e| self.map_conversion_error(e)))
            .collect()
    }

    async fn get_by_id(&self, id: &str) -> Result<CommittedSchedule, MedicineScheduleServiceError> {
        let id_uuid = conversions::parse_string_to_uuid(id)
            .map_err(MedicineScheduleServiceError::InvalidId)?;

        let stored = self
            .backend
            .get_by_id(id_uuid)
            .await
            .map_err(|e| self.map_repo_error(e))?
            .ok_or_else(|| {
                MedicineScheduleServiceError::NotFound(format!("Schedule with ID {} not found", id))
            })?;

        conversions::convert_to_domain_committed(stored).map_err(|e| self.map_conversion_error(e))
    }

    async fn revise(&self, id: &str) -> Result<Schedule, MedicineScheduleServiceError> {
        let committed = self.get_by_id(id).await?;
        Ok(committed.revise())
    }

    async fn occurrences(
        &self,
        id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<NaiveDateTime>, MedicineScheduleServiceError> {
        if to < from {
            return Err(MedicineScheduleServiceError::InvalidRange(format!(
                "end {} is before start {}",
                to, from
            )));
        }
        if (to - from).num_days() >= MAX_OCCURRENCE_RANGE_DAYS {
            return Err(MedicineScheduleServiceError::InvalidRange(format!(
                "range may cover at most {} days",
                MAX_OCCURRENCE_RANGE_DAYS
            )));
        }

        let committed = self.get_by_id(id).await?;
        Ok(occurrences::occurrences_between(committed.schedule(), from, to))
    }

    async fn next_occurrence(
        &self,
        id: &str,
        after: NaiveDateTime,
    ) -> Result<Option<NaiveDateTime>, MedicineScheduleServiceError> {
        let committed = self.get_by_id(id).await?;
        Ok(occurrences::next_occurrence(committed.schedule(), after))
    }
}

/// Create a medicine schedule service over a fresh in-memory reminder backend
pub fn create_default_medicine_schedule_service() -> impl MedicineScheduleServiceTrait + Send + Sync {
    MedicineScheduleService::new(use_by_data::repository::ReminderBackend::new())
}

/// Create a mock medicine schedule service for testing
#[cfg(feature = "mock")]
pub fn create_mock_medicine_schedule_service() -> impl MedicineScheduleServiceTrait + Send + Sync {
    crate::testing::MockMedicineScheduleService::new()
}
