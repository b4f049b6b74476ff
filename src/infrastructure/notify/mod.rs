//! Alert delivery adapters.
//!
//! Provides two [`crate::domain::ports::AlertDispatcher`] implementations:
//! - [`DiscordWebhook`] - Production webhook delivery
//! - [`NullDispatcher`] - No-op used when no endpoint is configured

mod discord_webhook;
mod null_dispatcher;

pub use discord_webhook::DiscordWebhook;
pub use null_dispatcher::NullDispatcher;
