//! Infrastructure layer for external integrations.
//!
//! This layer implements the collaborator traits defined in
//! [`crate::domain::ports`].
//!
//! # Modules
//!
//! - [`browser`] - Chromium page loading over DevTools
//! - [`notify`] - Alert delivery (Discord webhook and no-op implementations)

pub mod browser;
pub mod notify;
