// Public entities for the UseBy API
// Request and response bodies that cross the HTTP boundary

// Common entities for error handling
pub mod common;

// Draft editing requests
pub mod drafts;

// Committed schedule responses
pub mod schedules;

// Product catalogue and scan responses
pub mod products;
