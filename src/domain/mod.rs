//! Domain layer: run entities and collaborator contracts.
//!
//! The domain layer has no dependency on the browser or the alert transport.
//!
//! # Architecture
//!
//! - [`entities`] - Targets, snapshots, stage results and alerts
//! - [`ports`] - Traits implemented by `crate::infrastructure`
//!
//! The run itself is orchestrated by
//! [`crate::application::services::MonitorService`].

pub mod entities;
pub mod ports;
