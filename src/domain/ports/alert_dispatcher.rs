//! Alert delivery collaborator.

use async_trait::async_trait;

use crate::domain::entities::StructuredAlert;
use crate::error::DeliveryError;

/// Delivers an alert to a messaging endpoint.
///
/// Delivery is best-effort. Callers log a [`DeliveryError`] and carry on;
/// nothing is retried.
///
/// # Implementations
///
/// - [`crate::infrastructure::notify::DiscordWebhook`] - Discord-compatible webhook
/// - [`crate::infrastructure::notify::NullDispatcher`] - Dispatch disabled
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AlertDispatcher: Send + Sync {
    async fn send(&self, alert: StructuredAlert) -> Result<(), DeliveryError>;
}
