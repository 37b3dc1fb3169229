pub mod schedule;
pub mod occurrences;
pub mod medicine;
pub mod scan;

// Domain services
// This module contains business logic implementations.

// Re-export service traits and factory functions
pub use medicine::{
    create_default_medicine_schedule_service, MedicineScheduleService, MedicineScheduleServiceError,
    MedicineScheduleServiceTrait,
};
pub use scan::{ProductScannerTrait, ScanError, SimulatedScanner};

// Re-export mock service factory functions when the mock feature is enabled
#[cfg(feature = "mock")]
pub use medicine::create_mock_medicine_schedule_service;
