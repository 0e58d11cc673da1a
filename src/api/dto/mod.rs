//! Request and response DTOs for the API surface.

pub mod health;
pub mod urls;
