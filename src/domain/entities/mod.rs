//! Core domain entities for a single monitor run.
//!
//! Entities are plain data. None of them outlives a run.
//!
//! # Entity Types
//!
//! - [`MonitorTarget`] - The validated product URL
//! - [`PageSnapshot`] - Observed page state after the page settled
//! - [`ControlSnapshot`] - One actionable element reported by a page
//! - [`VerificationResult`], [`AvailabilityResult`] - Stage results
//! - [`RunOutcome`] - Terminal state of a run
//! - [`StructuredAlert`] - Transport-neutral alert message

pub mod alert;
pub mod control;
pub mod outcome;
pub mod snapshot;
pub mod target;

pub use alert::{AlertField, StructuredAlert};
pub use control::ControlSnapshot;
pub use outcome::{AvailabilityResult, RunOutcome, VerificationResult};
pub use snapshot::{ABSENT_FIELD, BLANK_URL, PageSnapshot};
pub use target::MonitorTarget;
