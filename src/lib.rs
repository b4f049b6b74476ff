//! # Cart Watch
//!
//! A single-shot product page monitor. One run loads a product page in a
//! headless Chromium, confirms the shop did not redirect away from the
//! product, looks for an enabled add-to-cart control, and posts an alert to
//! a Discord webhook when the product can be bought.
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture principles with clear layer separation:
//!
//! - **Domain Layer** ([`domain`]) - Run entities and collaborator traits
//! - **Application Layer** ([`application`]) - Run stages and orchestration
//! - **Infrastructure Layer** ([`infrastructure`]) - Chromium and webhook adapters
//! - **Runner** ([`runner`]) - Wires configuration into one run
//!
//! ## Run Outcomes
//!
//! Every run ends in exactly one [`domain::entities::RunOutcome`]:
//! `load_failed`, `redirect_rejected`, `not_available`, `disabled_seen` or
//! `alerted`. Runs share no state, so scheduling repeated checks is left to
//! cron or a systemd timer.
//!
//! ## Quick Start
//!
//! ```bash
//! export PRODUCT_URL="https://shop.example/p/phone-x?variant=BLUE"
//! export DISCORD_WEBHOOK_URL="https://discord.com/api/webhooks/..."  # Optional
//!
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! Configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod utils;

pub mod config;
pub mod runner;

pub use error::ConfigError;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{MonitorService, MonitorSettings};
    pub use crate::domain::entities::{
        ControlSnapshot, MonitorTarget, PageSnapshot, RunOutcome, StructuredAlert,
    };
    pub use crate::domain::ports::{AlertDispatcher, PageLoader, RenderedPage};
    pub use crate::error::{ConfigError, DeliveryError, LoadError, PageError};
}
