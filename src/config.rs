//! Monitor configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the run.
//! A `.env` file in the working directory is honoured (see `main.rs`).
//!
//! ## Required Variables
//!
//! - `PRODUCT_URL` - Product page to monitor (absolute http(s) URL with a path)
//!
//! ## Optional Variables
//!
//! - `DISCORD_WEBHOOK_URL` - Alert endpoint (alerts are logged only when unset)
//! - `CART_LABEL` - Purchase button label (default: `do koszyka`)
//! - `ALERT_MENTION` - Line prepended to alerts (default: `@everyone`, empty disables)
//! - `LOAD_TIMEOUT_SECS` - Navigation budget (default: 30)
//! - `SETTLE_DELAY_MS` - Wait after navigation before observing (default: 5000)
//! - `PROBE_TIMEOUT_SECS` - Purchase control poll budget (default: 20)
//! - `PROBE_POLL_INTERVAL_MS` - Poll interval (default: 500)
//! - `DELIVERY_TIMEOUT_SECS` - Webhook request timeout (default: 10)
//! - `MONITOR_TIMEZONE` - IANA zone for timestamps (default: `Europe/Warsaw`)
//! - `CHROME_EXECUTABLE` - Browser binary (default: auto-detect)
//! - `HEADLESS` - `false` or `0` shows the browser window (default: `true`)
//! - `USER_AGENT` - Identifying client string (default: desktop Chrome 115)
//! - `RUST_LOG` - Log filter, read by the tracing subscriber (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use chrono_tz::Tz;
use url::Url;

use crate::application::services::MonitorSettings;
use crate::domain::entities::MonitorTarget;
use crate::error::ConfigError;
use crate::infrastructure::browser::{BrowserSettings, DEFAULT_USER_AGENT};

/// Upper bound for every timeout and delay, one hour.
pub const MAX_TIMEOUT_SECS: u64 = 3_600;

/// Command-line values that take priority over the environment.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub target_url: Option<String>,
    pub webhook_url: Option<String>,
    /// Disables alert delivery even when a webhook is configured.
    pub dry_run: bool,
}

/// Monitor configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub target: MonitorTarget,
    /// `None` disables alert delivery.
    pub webhook_url: Option<String>,
    pub dry_run: bool,
    pub cart_label: String,
    pub alert_mention: Option<String>,
    pub load_timeout_secs: u64,
    pub settle_delay_ms: u64,
    pub probe_timeout_secs: u64,
    pub probe_poll_interval_ms: u64,
    pub delivery_timeout_secs: u64,
    pub timezone: Tz,
    pub chrome_executable: Option<PathBuf>,
    pub headless: bool,
    pub user_agent: String,
    pub log_format: String,
}

impl Config {
    /// Loads configuration from environment variables, applying `overrides`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] if no product URL is configured and
    /// [`ConfigError::InvalidUrl`] / [`ConfigError::InvalidValue`] for values
    /// that cannot be parsed at all.
    pub fn from_env(overrides: &ConfigOverrides) -> Result<Self, ConfigError> {
        let target = Self::load_target(overrides)?;

        let webhook_url = if overrides.dry_run {
            None
        } else {
            Self::load_webhook_url(overrides)
        };

        let cart_label = env::var("CART_LABEL").unwrap_or_else(|_| "do koszyka".to_string());

        let alert_mention = match env::var("ALERT_MENTION") {
            Ok(m) if m.trim().is_empty() => None,
            Ok(m) => Some(m),
            Err(_) => Some("@everyone".to_string()),
        };

        let timezone = env::var("MONITOR_TIMEZONE")
            .unwrap_or_else(|_| "Europe/Warsaw".to_string())
            .parse::<Tz>()
            .map_err(|e| ConfigError::invalid_value("MONITOR_TIMEZONE", e.to_string()))?;

        let chrome_executable = env::var("CHROME_EXECUTABLE")
            .ok()
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);

        let headless = env::var("HEADLESS")
            .map(|v| !(v.eq_ignore_ascii_case("false") || v == "0"))
            .unwrap_or(true);

        let user_agent = env::var("USER_AGENT").unwrap_or_else(|_| DEFAULT_USER_AGENT.to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        Ok(Self {
            target,
            webhook_url,
            dry_run: overrides.dry_run,
            cart_label,
            alert_mention,
            load_timeout_secs: env_or("LOAD_TIMEOUT_SECS", 30),
            settle_delay_ms: env_or("SETTLE_DELAY_MS", 5_000),
            probe_timeout_secs: env_or("PROBE_TIMEOUT_SECS", 20),
            probe_poll_interval_ms: env_or("PROBE_POLL_INTERVAL_MS", 500),
            delivery_timeout_secs: env_or("DELIVERY_TIMEOUT_SECS", 10),
            timezone,
            chrome_executable,
            headless,
            user_agent,
            log_format,
        })
    }

    /// Loads the product URL.
    ///
    /// Priority:
    /// 1. `--target` override
    /// 2. `PRODUCT_URL` environment variable
    fn load_target(overrides: &ConfigOverrides) -> Result<MonitorTarget, ConfigError> {
        let raw = match &overrides.target_url {
            Some(url) => url.clone(),
            None => env::var("PRODUCT_URL").map_err(|_| ConfigError::Missing("PRODUCT_URL"))?,
        };
        MonitorTarget::parse(&raw)
    }

    /// Loads the webhook URL. Returns `None` if no endpoint is configured.
    ///
    /// Priority:
    /// 1. `--webhook` override
    /// 2. `DISCORD_WEBHOOK_URL` environment variable
    fn load_webhook_url(overrides: &ConfigOverrides) -> Option<String> {
        overrides
            .webhook_url
            .clone()
            .or_else(|| env::var("DISCORD_WEBHOOK_URL").ok())
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty())
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - the webhook URL is not an absolute http(s) URL
    /// - `cart_label` is blank
    /// - any timeout is zero or longer than [`MAX_TIMEOUT_SECS`]
    /// - the poll interval exceeds the probe timeout
    /// - `log_format` is not `text` or `json`
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(ref webhook_url) = self.webhook_url {
            let parsed = Url::parse(webhook_url)
                .map_err(|e| ConfigError::invalid_url("DISCORD_WEBHOOK_URL", e.to_string()))?;
            if parsed.scheme() != "http" && parsed.scheme() != "https" {
                return Err(ConfigError::invalid_url(
                    "DISCORD_WEBHOOK_URL",
                    format!("unsupported scheme '{}'", parsed.scheme()),
                ));
            }
        }

        if self.cart_label.trim().is_empty() {
            return Err(ConfigError::invalid_value("CART_LABEL", "must not be blank"));
        }

        for (name, value) in [
            ("LOAD_TIMEOUT_SECS", self.load_timeout_secs),
            ("PROBE_TIMEOUT_SECS", self.probe_timeout_secs),
            ("PROBE_POLL_INTERVAL_MS", self.probe_poll_interval_ms),
            ("DELIVERY_TIMEOUT_SECS", self.delivery_timeout_secs),
        ] {
            if value == 0 {
                return Err(ConfigError::invalid_value(name, "must be greater than 0"));
            }
        }

        for (name, secs) in [
            ("LOAD_TIMEOUT_SECS", self.load_timeout_secs),
            ("SETTLE_DELAY_MS", self.settle_delay_ms / 1_000),
            ("PROBE_TIMEOUT_SECS", self.probe_timeout_secs),
            ("DELIVERY_TIMEOUT_SECS", self.delivery_timeout_secs),
        ] {
            if secs > MAX_TIMEOUT_SECS {
                return Err(ConfigError::invalid_value(
                    name,
                    format!("must be at most {MAX_TIMEOUT_SECS} seconds"),
                ));
            }
        }

        if self.probe_poll_interval() > self.probe_timeout() {
            return Err(ConfigError::invalid_value(
                "PROBE_POLL_INTERVAL_MS",
                format!(
                    "must not exceed PROBE_TIMEOUT_SECS ({}s), got {}ms",
                    self.probe_timeout_secs, self.probe_poll_interval_ms
                ),
            ));
        }

        if self.log_format != "text" && self.log_format != "json" {
            return Err(ConfigError::invalid_value(
                "LOG_FORMAT",
                format!("must be 'text' or 'json', got '{}'", self.log_format),
            ));
        }

        Ok(())
    }

    /// Returns whether alerts are delivered anywhere.
    pub fn is_dispatch_enabled(&self) -> bool {
        self.webhook_url.is_some()
    }

    pub fn load_timeout(&self) -> Duration {
        Duration::from_secs(self.load_timeout_secs)
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_secs)
    }

    pub fn probe_poll_interval(&self) -> Duration {
        Duration::from_millis(self.probe_poll_interval_ms)
    }

    pub fn delivery_timeout(&self) -> Duration {
        Duration::from_secs(self.delivery_timeout_secs)
    }

    pub fn browser_settings(&self) -> BrowserSettings {
        BrowserSettings {
            executable: self.chrome_executable.clone(),
            headless: self.headless,
            user_agent: self.user_agent.clone(),
            load_timeout: self.load_timeout(),
            ..BrowserSettings::default()
        }
    }

    pub fn monitor_settings(&self) -> MonitorSettings {
        MonitorSettings {
            cart_label: self.cart_label.clone(),
            alert_mention: self.alert_mention.clone(),
            settle_delay: Duration::from_millis(self.settle_delay_ms),
            probe_timeout: self.probe_timeout(),
            probe_poll_interval: self.probe_poll_interval(),
            timezone: self.timezone,
        }
    }

    /// Prints configuration summary (without secrets).
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Product: {}", self.target);

        match &self.webhook_url {
            Some(url) => tracing::info!("  Alerts: {} (enabled)", mask_webhook_url(url)),
            None if self.dry_run => tracing::info!("  Alerts: disabled (dry run)"),
            None => tracing::info!("  Alerts: disabled"),
        }

        tracing::info!("  Cart label: {:?}", self.cart_label);
        tracing::info!(
            "  Timeouts: load {}s, settle {}ms, probe {}s (every {}ms)",
            self.load_timeout_secs,
            self.settle_delay_ms,
            self.probe_timeout_secs,
            self.probe_poll_interval_ms
        );
        tracing::info!("  Time zone: {}", self.timezone);
        tracing::info!(
            "  Browser: {} ({})",
            self.chrome_executable
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "auto-detect".to_string()),
            if self.headless { "headless" } else { "headed" }
        );
        tracing::info!("  Log format: {}", self.log_format);
    }
}

/// Parses an environment variable, falling back to `default` when unset or unparsable.
fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

/// Masks the secret part of a webhook URL for logging.
///
/// Webhook URLs carry their token as the last path segment:
/// - `https://discord.com/api/webhooks/123/secret` → `https://discord.com/api/webhooks/123/***`
///
/// Query strings and credentials are dropped. Unparsable input is masked entirely.
fn mask_webhook_url(url: &str) -> String {
    let Ok(mut parsed) = Url::parse(url) else {
        return "***".to_string();
    };

    parsed.set_query(None);
    parsed.set_fragment(None);
    let _ = parsed.set_password(None);

    let segments: Vec<String> = parsed
        .path_segments()
        .map(|s| s.filter(|s| !s.is_empty()).map(str::to_string).collect())
        .unwrap_or_default();

    if let Some((_, kept)) = segments.split_last() {
        let mut masked = kept.to_vec();
        masked.push("***".to_string());
        parsed.set_path(&masked.join("/"));
    }

    parsed.to_string()
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if required variables are missing or validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env(overrides: &ConfigOverrides) -> Result<Config, ConfigError> {
    let config = Config::from_env(overrides)?;
    config.validate()?;
    Ok(config)
}
