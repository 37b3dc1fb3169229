use std::sync::{Arc, Mutex};
use std::collections::HashMap;
use uuid::Uuid;

use crate::models::schedule::StoredSchedule;
use super::errors::RepositoryError;

/// In-memory storage for committed schedules
#[derive(Debug, Clone)]
pub struct InMemoryStorage {
    schedules: Arc<Mutex<HashMap<String, StoredSchedule>>>,
}

impl Default for InMemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStorage {
    /// Create a new in-memory storage
    pub fn new() -> Self {
        Self {
            schedules: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Store a schedule in memory
    pub async fn store_schedule(&self, schedule: &StoredSchedule) -> Result<StoredSchedule, RepositoryError> {
        let mut store = self.schedules.lock()?;
        if store.contains_key(&schedule.id) {
            return Err(RepositoryError::Validation(format!(
                "schedule {} has already been committed",
                schedule.id
            )));
        }
        store.insert(schedule.id.clone(), schedule.clone());
        Ok(schedule.clone())
    }

    /// Get all schedules, oldest commit first
    pub async fn get_all(&self) -> Result<Vec<StoredSchedule>, RepositoryError> {
        let store = self.schedules.lock()?;
        let mut schedules: Vec<StoredSchedule> = store.values().cloned().collect();
        schedules.sort_by(|a, b| {
            a.committed_at
                .cmp(&b.committed_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(schedules)
    }

    /// Get a schedule by ID
    pub async fn get_by_id(&self, id: &Uuid) -> Result<Option<StoredSchedule>, RepositoryError> {
        let store = self.schedules.lock()?;
        Ok(store.get(&id.to_string()).cloned())
    }

    /// Number of stored schedules
    pub async fn count(&self) -> Result<usize, RepositoryError> {
        let store = self.schedules.lock()?;
        Ok(store.len())
    }
}
