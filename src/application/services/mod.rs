//! Run stages and orchestration.
//!
//! - [`AvailabilityProbe`] - Bounded polling for the purchase control
//! - [`DiagnosticsCollector`] - Page snapshots for logs and alerts
//! - [`MonitorService`] - One monitor run, start to terminal state

pub mod availability_probe;
pub mod diagnostics;
pub mod monitor_service;

pub use availability_probe::AvailabilityProbe;
pub use diagnostics::DiagnosticsCollector;
pub use monitor_service::{MonitorService, MonitorSettings};
