//! Domain layer health check functionality
//! This module provides health check services for the application

use std::collections::HashMap;
use std::fmt::Debug;
use async_trait::async_trait;
use tracing::warn;

use use_by_data::repository::ReminderBackendTrait;

/// System health status
#[derive(Debug, Clone, PartialEq)]
pub enum SystemStatus {
    /// All components are healthy
    Healthy,
    /// Some components are degraded but the system is functional
    Degraded,
    /// System is not functioning properly
    Unhealthy,
}

/// Component health status
#[derive(Debug, Clone, PartialEq)]
pub enum ComponentStatus {
    /// Component is functioning normally
    Healthy,
    /// Component is functioning but with reduced performance
    Degraded,
    /// Component is not functioning
    Unhealthy,
}

/// Represents a health component with status and optional details
#[derive(Debug, Clone)]
pub struct HealthComponent {
    /// Status of the component
    pub status: ComponentStatus,
    /// Optional details about the component status
    pub details: Option<String>,
}

/// Represents the overall health of the system
#[derive(Debug, Clone)]
pub struct SystemHealth {
    /// Overall system status
    pub status: SystemStatus,
    /// Map of component names to their health status
    pub components: HashMap<String, HealthComponent>,
}

/// Trait for health services
#[async_trait]
pub trait HealthServiceTrait: Send + Sync + Debug {
    /// Get the overall system health
    async fn get_system_health(&self) -> SystemHealth;

    /// Check that the reminder backend answers.
    /// Returns the number of committed schedules it holds.
    async fn check_backend_status(&self) -> Result<usize, String>;
}

/// Health service that probes the reminder backend
#[derive(Debug, Clone)]
pub struct HealthService<R: ReminderBackendTrait + Debug> {
    backend: R,
}

impl<R: ReminderBackendTrait + Debug> HealthService<R> {
    pub fn new(backend: R) -> Self {
        Self { backend }
    }
}

#[async_trait]
impl<R: ReminderBackendTrait + Debug> HealthServiceTrait for HealthService<R> {
    async fn get_system_health(&self) -> SystemHealth {
        let backend_component = match self.check_backend_status().await {
            Ok(count) => HealthComponent {
                status: ComponentStatus::Healthy,
                details: Some(format!("{} committed schedule(s)", count)),
            },
            Err(e) => {
                warn!("Reminder backend health check failed: {}", e);
                HealthComponent {
                    status: ComponentStatus::Unhealthy,
                    details: Some(e),
                }
            }
        };

        let api_component = HealthComponent {
            status: ComponentStatus::Healthy,
            details: None,
        };

        let components: HashMap<String, HealthComponent> = vec![
            ("reminder_backend".to_string(), backend_component),
            ("api".to_string(), api_component),
        ]
        .into_iter()
        .collect();

        SystemHealth {
            status: overall_status(&components),
            components,
        }
    }

    async fn check_backend_status(&self) -> Result<usize, String> {
        self.backend
            .count()
            .await
            .map_err(|e| format!("Reminder backend error: {}", e))
    }
}

/// Worst component status wins
pub fn overall_status(components: &HashMap<String, HealthComponent>) -> SystemStatus {
    let statuses: Vec<&ComponentStatus> = components.values().map(|c| &c.status).collect();
    if statuses.contains(&&ComponentStatus::Unhealthy) {
        SystemStatus::Unhealthy
    } else if statuses.contains(&&ComponentStatus::Degraded) {
        SystemStatus::Degraded
    } else {
        SystemStatus::Healthy
    }
}
