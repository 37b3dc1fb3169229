// UseBy Data
// This crate holds the storage side of the reminder backend

// Repository implementations for data access
pub mod repository;

// Data storage models
pub mod models;
