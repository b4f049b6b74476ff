//! Process wiring for a single monitor run.
//!
//! Builds the browser loader and alert dispatcher from configuration and
//! drives one [`MonitorService::run`].

use std::sync::Arc;

use anyhow::{Context, Result};

use crate::application::services::MonitorService;
use crate::config::Config;
use crate::domain::entities::RunOutcome;
use crate::domain::ports::AlertDispatcher;
use crate::infrastructure::browser::ChromePageLoader;
use crate::infrastructure::notify::{DiscordWebhook, NullDispatcher};

/// Builds the alert dispatcher for `config`.
///
/// Falls back to [`NullDispatcher`] when no webhook is configured or the run
/// is a dry run.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be built.
pub fn build_dispatcher(config: &Config) -> Result<Arc<dyn AlertDispatcher>> {
    let dispatcher: Arc<dyn AlertDispatcher> = match &config.webhook_url {
        Some(url) => {
            let webhook = DiscordWebhook::new(url.as_str(), config.delivery_timeout())
                .context("Failed to build webhook client")?;
            tracing::info!("Alert delivery enabled (Discord webhook)");
            Arc::new(webhook)
        }
        None if config.dry_run => {
            tracing::info!("Dry run: alerts will be logged, not delivered");
            Arc::new(NullDispatcher::new())
        }
        None => {
            tracing::warn!("DISCORD_WEBHOOK_URL not set: alerts will be logged, not delivered");
            Arc::new(NullDispatcher::new())
        }
    };
    Ok(dispatcher)
}

/// Runs one availability check with the given configuration.
///
/// Every terminal state of the run, including load failures and redirects,
/// is returned as `Ok`. Only wiring failures surface as errors.
///
/// # Errors
///
/// Returns an error if the alert dispatcher cannot be built.
pub async fn run(config: Config) -> Result<RunOutcome> {
    let dispatcher = build_dispatcher(&config)?;
    let loader = Arc::new(ChromePageLoader::new(config.browser_settings()));

    let service = MonitorService::new(loader, dispatcher, config.monitor_settings());

    tracing::info!(target_url = %config.target, "Starting availability check");
    let outcome = service.run(&config.target).await;
    tracing::debug!(outcome = %outcome, "Run finished");

    Ok(outcome)
}
