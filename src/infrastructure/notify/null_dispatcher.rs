//! No-op dispatcher for runs without an alert endpoint.

use crate::domain::entities::StructuredAlert;
use crate::domain::ports::AlertDispatcher;
use crate::error::DeliveryError;
use async_trait::async_trait;
use tracing::{debug, warn};

/// A dispatcher that drops every alert.
///
/// Used when `DISCORD_WEBHOOK_URL` is not set or `--dry-run` is passed. The
/// run still reaches `Alerted`; the alert is logged instead of delivered.
pub struct NullDispatcher;

impl NullDispatcher {
    /// Creates a new NullDispatcher instance.
    pub fn new() -> Self {
        debug!("Using NullDispatcher (alert delivery disabled)");
        Self
    }
}

impl Default for NullDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AlertDispatcher for NullDispatcher {
    async fn send(&self, alert: StructuredAlert) -> Result<(), DeliveryError> {
        warn!(
            title = %alert.title,
            url = %alert.url,
            "No alert endpoint configured; alert not delivered"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_send_always_succeeds() {
        let alert = StructuredAlert {
            mention: None,
            title: "Click to buy!".to_string(),
            url: "https://shop.test/p/x".to_string(),
            color: 0,
            fields: vec![],
            footer: String::new(),
        };

        assert!(NullDispatcher::new().send(alert).await.is_ok());
    }
}
