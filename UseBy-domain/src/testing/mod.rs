// Testing utilities and mock implementations for the domain layer
// This module is only available when the "mock" feature is enabled

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime, Utc};
use uuid::Uuid;

use crate::entities::schedule::{CommittedSchedule, Schedule, SubmittableSchedule};
use crate::health::{ComponentStatus, HealthComponent, HealthServiceTrait, SystemHealth, SystemStatus};
use crate::services::medicine::{MedicineScheduleServiceError, MedicineScheduleServiceTrait};
use crate::services::{occurrences, schedule};

/// A draft that passes validation
pub fn sample_valid_draft() -> Schedule {
    let draft = schedule::set_medicine_name(schedule::create_draft(), "Vitamin D3");
    schedule::set_dosage(draft, "1 tablet")
}

/// Mock implementation of the MedicineScheduleServiceTrait for testing.
/// Validation is real; storage is a local map.
pub struct MockMedicineScheduleService {
    schedules: RwLock<HashMap<Uuid, CommittedSchedule>>,
    should_fail_backend: bool,
}

impl Default for MockMedicineScheduleService {
    fn default() -> Self {
        Self::new()
    }
}

impl MockMedicineScheduleService {
    pub fn new() -> Self {
        Self {
            schedules: RwLock::new(HashMap::new()),
            should_fail_backend: false,
        }
    }

    /// Configure the mock so every backend call fails
    pub fn with_backend_failure(mut self) -> Self {
        self.should_fail_backend = true;
        self
    }

    /// Add a pre-committed schedule to the mock
    pub fn with_committed(self, schedule: Schedule) -> Self {
        let committed = CommittedSchedule::new(Uuid::new_v4(), Utc::now(), schedule);
        if let Ok(mut schedules) = self.schedules.write() {
            schedules.insert(committed.id(), committed);
        }
        self
    }

    fn backend_check(&self) -> Result<(), MedicineScheduleServiceError> {
        if self.should_fail_backend {
            Err(MedicineScheduleServiceError::Backend(
                "mock is configured to fail".to_string(),
            ))
        } else {
            Ok(())
        }
    }

    fn lock_error<T>(err: std::sync::PoisonError<T>) -> MedicineScheduleServiceError {
        MedicineScheduleServiceError::Backend(err.to_string())
    }
}

#[async_trait]
impl MedicineScheduleServiceTrait for MockMedicineScheduleService {
    async fn submit(&self, draft: Schedule) -> Result<CommittedSchedule, MedicineScheduleServiceError> {
        let submittable = SubmittableSchedule::try_from(draft)
            .map_err(MedicineScheduleServiceError::Validation)?;
        self.backend_check()?;

        let committed = CommittedSchedule::new(Uuid::new_v4(), Utc::now(), submittable.into_inner());
        self.schedules
            .write()
            .map_err(Self::lock_error)?
            .insert(committed.id(), committed.clone());
        Ok(committed)
    }

    async fn get_all(&self) -> Result<Vec<CommittedSchedule>, MedicineScheduleServiceError> {
        self.backend_check()?;
        let mut all: Vec<CommittedSchedule> = self
            .schedules
            .read()
            .map_err(Self::lock_error)?
            .values()
            .cloned()
            .collect();
        all.sort_by_key(|s| s.committed_at());
        Ok(all)
    }

    async fn get_by_id(&self, id: &str) -> Result<CommittedSchedule, MedicineScheduleServiceError> {
        self.backend_check()?;
        let id = Uuid::parse_str(id)
            .map_err(|_| MedicineScheduleServiceError::InvalidId(id.to_string()))?;
        self.schedules
            .read()
            .map_err(Self::lock_error)?
            .get(&id)
            .cloned()
            .ok_or_else(|| MedicineScheduleServiceError::NotFound(id.to_string()))
    }

    async fn revise(&self, id: &str) -> Result<Schedule, MedicineScheduleServiceError> {
        Ok(self.get_by_id(id).await?.revise())
    }

    async fn occurrences(
        &self,
        id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<NaiveDateTime>, MedicineScheduleServiceError> {
        if to < from {
            return Err(MedicineScheduleServiceError::InvalidRange(
                "end is before start".to_string(),
            ));
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

/// Health service returning a fixed status
#[derive(Debug, Clone)]
pub struct MockHealthService {
    backend_status: ComponentStatus,
}

impl Default for MockHealthService {
    fn default() -> Self {
        Self::new()
    }
}

impl MockHealthService {
    pub fn new() -> Self {
        Self {
            backend_status: ComponentStatus::Healthy,
        }
    }

    pub fn with_backend_status(mut self, status: ComponentStatus) -> Self {
        self.backend_status = status;
        self
    }
}

#[async_trait]
impl HealthServiceTrait for MockHealthService {
    async fn get_system_health(&self) -> SystemHealth {
        let mut components = HashMap::new();
        components.insert(
            "reminder_backend".to_string(),
            HealthComponent {
                status: self.backend_status.clone(),
                details: None,
            },
        );
        components.insert(
            "api".to_string(),
            HealthComponent {
                status: ComponentStatus::Healthy,
                details: None,
            },
        );

        let status = match self.backend_status {
            ComponentStatus::Healthy => SystemStatus::Healthy,
            ComponentStatus::Degraded => SystemStatus::Degraded,
            ComponentStatus::Unhealthy => SystemStatus::Unhealthy,
        };
        SystemHealth { status, components }
    }

    async fn check_backend_status(&self) -> Result<usize, String> {
        match self.backend_status {
            ComponentStatus::Unhealthy => Err("mock backend is down".to_string()),
            _ => Ok(0),
        }
    }
}
