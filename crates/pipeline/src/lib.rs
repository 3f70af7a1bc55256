//! Validation-and-idempotent-persistence pipeline.
//!
//! - [`IdempotentWriter`] — insert-or-skip persistence of accepted records
//!   and their component links.
//! - [`PipelineRunner`] — sequences validation and writing over one batch
//!   and produces the reconciliation report.

pub mod report;
pub mod runner;
pub mod writer;

pub use report::{PipelineReport, RecordError, WriteReport};
pub use runner::{PipelineError, PipelineRunner};
pub use writer::IdempotentWriter;
