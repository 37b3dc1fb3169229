// Domain entities and value objects
pub mod schedule;
pub mod product;
pub mod conversions;

// Re-export common types for easier imports
pub use schedule::{
    CommittedSchedule, IntakeRelation, RecurrenceMode, ReminderTime, Schedule, ScheduleError,
    SubmittableSchedule, ValidationError, ValueError, Weekday, MAX_REMINDER_TIMES,
};
pub use product::{PriceQuote, ProductCategory, ScannedProduct};
