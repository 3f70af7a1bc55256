//! Pure domain logic for the regulatory-records pipeline.
//!
//! This crate has no database access and no async code. It provides:
//!
//! - The fixed record schema and its raw/typed record forms ([`record`]).
//! - Ruleset loading from YAML configuration ([`validation::loader`]).
//! - The rule evaluator that turns raw records into accepted or rejected
//!   ones, collecting every violation per record ([`validation::evaluator`]).
//! - Text normalization helpers shared by extraction and validation
//!   ([`text`]).

pub mod record;
pub mod text;
pub mod types;
pub mod validation;

pub use record::{AcceptedRecord, RawRecord};
pub use validation::evaluator::{validate, validate_batch, BatchOutcome};
pub use validation::loader::ConfigError;
pub use validation::rules::{FieldRule, FieldType, FieldViolation, RejectionReason, RuleSet};
