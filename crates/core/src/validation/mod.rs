//! Rule-driven record validation.
//!
//! - [`rules`] — rule set and violation types.
//! - [`loader`] — YAML ruleset loading with fail-fast config errors.
//! - [`coerce`] — type-tag dispatched coercions shared by rule checks and
//!   typed-record construction.
//! - [`evaluator`] — per-record and per-batch validation, pure logic.

pub mod coerce;
pub mod evaluator;
pub mod loader;
pub mod rules;
