//! Repository trait definitions for the domain layer.
//!
//! The single data-access boundary is [`RecordStore`]; concrete
//! implementations live in `crate::infrastructure::persistence`, and a mock
//! is auto-generated via `mockall` for unit tests.

pub mod record_store;

pub use record_store::RecordStore;

#[cfg(test)]
pub use record_store::MockRecordStore;
