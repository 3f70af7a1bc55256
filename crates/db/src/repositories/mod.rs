//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept an executor as the first argument: `&PgPool` for standalone reads,
//! `&mut PgConnection` for writes the caller wants inside its own
//! transaction.

pub mod regulation_repo;

pub use regulation_repo::{InsertOutcome, RegulationRepo};
