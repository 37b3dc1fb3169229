// UseBy API library
//
// HTTP surface over the medicine schedule core: draft editing, committing to
// the reminder backend, occurrence expansion and the product scanner.

pub mod api;
pub mod config;
pub mod entities;
pub mod openapi;
