//! Discord-compatible webhook dispatcher.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::info;

use crate::domain::entities::StructuredAlert;
use crate::domain::ports::AlertDispatcher;
use crate::error::DeliveryError;

const MAX_TITLE_CHARS: usize = 256;
const MAX_FIELD_VALUE_CHARS: usize = 1024;
const MAX_FOOTER_CHARS: usize = 2048;

/// Posts alerts as a single embed to a Discord webhook URL.
pub struct DiscordWebhook {
    client: Client,
    url: String,
}

impl DiscordWebhook {
    /// Creates a dispatcher whose requests give up after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns [`DeliveryError::Transport`] if the HTTP client cannot be built.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, DeliveryError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DeliveryError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl AlertDispatcher for DiscordWebhook {
    async fn send(&self, alert: StructuredAlert) -> Result<(), DeliveryError> {
        let message = DiscordMessage::from(&alert);

        let response = self
            .client
            .post(&self.url)
            .json(&message)
            .send()
            .await
            .map_err(|e| DeliveryError::Transport(e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DeliveryError::Rejected {
                status: status.as_u16(),
            });
        }

        info!(status = status.as_u16(), "Alert delivered");
        Ok(())
    }
}

/// Webhook execute payload.
#[derive(Debug, Serialize)]
struct DiscordMessage<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    content: Option<&'a str>,
    embeds: Vec<DiscordEmbed<'a>>,
}

#[derive(Debug, Serialize)]
struct DiscordEmbed<'a> {
    title: String,
    url: &'a str,
    color: u32,
    fields: Vec<DiscordField<'a>>,
    footer: DiscordFooter,
}

#[derive(Debug, Serialize)]
struct DiscordField<'a> {
    name: &'a str,
    value: String,
    inline: bool,
}

#[derive(Debug, Serialize)]
struct DiscordFooter {
    text: String,
}

impl<'a> From<&'a StructuredAlert> for DiscordMessage<'a> {
    fn from(alert: &'a StructuredAlert) -> Self {
        let fields = alert
            .fields
            .iter()
            .map(|f| DiscordField {
                name: &f.name,
                value: truncate(&f.value, MAX_FIELD_VALUE_CHARS),
                inline: false,
            })
            .collect();

        Self {
            content: alert.mention.as_deref(),
            embeds: vec![DiscordEmbed {
                title: truncate(&alert.title, MAX_TITLE_CHARS),
                url: &alert.url,
                color: alert.color,
                fields,
                footer: DiscordFooter {
                    text: truncate(&alert.footer, MAX_FOOTER_CHARS),
                },
            }],
        }
    }
}

/// Cuts `text` to at most `max` characters, marking the cut with `…`.
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max.saturating_sub(1)).collect();
    cut.push('…');
    cut
}
