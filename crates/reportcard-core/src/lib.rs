//! reportcard-core — Data model, dataset loading, and the report engine.
//!
//! This crate defines the typed assessment datasets, loads them from disk,
//! and computes the Diagnostic, Progress, and Feedback reports as pure
//! functions over a loaded [`dataset::Dataset`].

pub mod config;
pub mod dataset;
pub mod diagnostic;
pub mod error;
pub mod feedback;
pub mod loader;
pub mod model;
pub mod progress;
pub mod prompt;
pub mod report;
pub mod timestamp;

pub use dataset::Dataset;
pub use error::{ReportError, ReportResult};
pub use model::ReportKind;
pub use report::Report;
