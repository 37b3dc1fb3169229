// Repository module structure
pub mod errors;
mod in_memory;
mod reminders;

// Re-export commonly used types
pub use errors::RepositoryError;
pub use reminders::{ReminderBackend, ReminderBackendTrait};
