use chrono::Utc;
use tracing::debug;
use uuid::Uuid;
use async_trait::async_trait;

use crate::models::schedule::{NewStoredSchedule, StoredSchedule};
use super::errors::RepositoryError;
use super::in_memory::InMemoryStorage;

/// Reminder backend that receives committed medicine schedules
#[async_trait]
pub trait ReminderBackendTrait: Send + Sync {
    /// Accept a validated schedule, assigning its identity and commit time
    async fn accept(&self, schedule: NewStoredSchedule) -> Result<StoredSchedule, RepositoryError>;

    /// Get all accepted schedules, oldest first
    async fn get_all(&self) -> Result<Vec<StoredSchedule>, RepositoryError>;

    /// Get an accepted schedule by ID
    async fn get_by_id(&self, id: Uuid) -> Result<Option<StoredSchedule>, RepositoryError>;

    /// Number of accepted schedules
    async fn count(&self) -> Result<usize, RepositoryError>;
}

/// In-memory reminder backend. Clones share the same storage.
#[derive(Debug, Clone, Default)]
pub struct ReminderBackend {
    storage: InMemoryStorage,
}

impl ReminderBackend {
    /// Create a new, empty backend
    pub fn new() -> Self {
        Self {
            storage: InMemoryStorage::new(),
        }
    }
}

#[async_trait]
impl ReminderBackendTrait for ReminderBackend {
    async fn accept(&self, schedule: NewStoredSchedule) -> Result<StoredSchedule, RepositoryError> {
        if schedule.reminder_times.is_empty() {
            return Err(RepositoryError::Validation(
                "a schedule needs at least one reminder time".to_string(),
            ));
        }

        let stored = StoredSchedule {
            id: Uuid::new_v4().to_string(),
            medicine_name: schedule.medicine_name,
            dosage: schedule.dosage,
            intake: schedule.intake,
            reminder_times: schedule.reminder_times,
            recurrence: schedule.recurrence,
            selected_days: schedule.selected_days,
            start_date: schedule.start_date,
            end_date: schedule.end_date,
            committed_at: Utc::now(),
        };

        debug!("Accepting schedule {} for {}", stored.id, stored.medicine_name);
        self.storage.store_schedule(&stored).await
    }

    async fn get_all(&self) -> Result<Vec<StoredSchedule>, RepositoryError> {
        self.storage.get_all().await
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<StoredSchedule>, RepositoryError> {
        debug!("Looking up schedule {}", id);
        self.storage.get_by_id(&id).await
    }

    async fn count(&self) -> Result<usize, RepositoryError> {
        self.storage.count().await
    }
}
