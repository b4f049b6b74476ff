//! Application layer: the monitor run and its stages.
//!
//! Services consume the traits in [`crate::domain::ports`] and know nothing
//! about Chromium or Discord.
//!
//! # Available Services
//!
//! - [`services::MonitorService`] - Sequences one run and picks its terminal state
//! - [`services::AvailabilityProbe`] - Purchase control lookup
//! - [`services::DiagnosticsCollector`] - Page state capture

pub mod services;
