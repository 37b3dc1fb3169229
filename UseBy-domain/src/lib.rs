// UseBy Domain
// This crate contains the business logic for UseBy medicine reminder schedules

// Services that implement business logic
pub mod services;

// Domain entities
pub mod entities;

// Health checks and system status
pub mod health;

// Re-export the data layer repository for convenience
pub use use_by_data::repository;

// Testing utilities - only available with mock feature
#[cfg(feature = "mock")]
pub mod testing;
