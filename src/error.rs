//! Error taxonomy for a monitor run.
//!
//! Only [`ConfigError`] ever reaches the process boundary. Every other error is
//! local to one stage of [`crate::application::services::MonitorService`] and is
//! converted into a terminal [`crate::domain::entities::RunOutcome`] or a
//! degraded snapshot field before the run ends.

use std::time::Duration;

/// Startup configuration problems. Fatal: no run is attempted.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} is not a valid http(s) URL: {reason}")]
    InvalidUrl { name: &'static str, reason: String },

    #[error("{name} has an invalid value: {reason}")]
    InvalidValue { name: &'static str, reason: String },
}

impl ConfigError {
    pub fn invalid_url(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidUrl {
            name,
            reason: reason.into(),
        }
    }

    pub fn invalid_value(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            name,
            reason: reason.into(),
        }
    }
}

/// The page could not be loaded or rendered within its budget.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to launch browser: {0}")]
    Launch(String),

    #[error("navigation to {url} failed: {reason}")]
    Navigation { url: String, reason: String },

    #[error("navigation to {url} timed out after {budget:?}")]
    Timeout { url: String, budget: Duration },
}

/// A single read against a rendered page failed.
///
/// Never propagated out of a stage: diagnostics degrade the field to a
/// sentinel and the availability probe treats it as "not found yet".
#[derive(Debug, thiserror::Error)]
pub enum PageError {
    #[error("browser protocol error: {0}")]
    Protocol(String),

    #[error("unexpected script result: {0}")]
    Script(String),
}

/// The alert transport failed. Logged only; the run outcome is unaffected.
#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    #[error("failed to reach alert endpoint: {0}")]
    Transport(String),

    #[error("alert endpoint rejected message with status {status}")]
    Rejected { status: u16 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_messages_name_the_variable() {
        let err = ConfigError::Missing("PRODUCT_URL");
        assert_eq!(err.to_string(), "PRODUCT_URL must be set");

        let err = ConfigError::invalid_url("DISCORD_WEBHOOK_URL", "relative URL without a base");
        assert!(err.to_string().starts_with("DISCORD_WEBHOOK_URL is not a valid"));
    }

    #[test]
    fn test_load_error_timeout_message() {
        let err = LoadError::Timeout {
            url: "https://shop.test/p/x".to_string(),
            budget: Duration::from_secs(30),
        };
        assert_eq!(
            err.to_string(),
            "navigation to https://shop.test/p/x timed out after 30s"
        );
    }

    #[test]
    fn test_delivery_error_rejected_message() {
        let err = DeliveryError::Rejected { status: 429 };
        assert_eq!(
            err.to_string(),
            "alert endpoint rejected message with status 429"
        );
    }
}
