//! Monitored product URL.

use std::fmt;
use url::Url;

use crate::error::ConfigError;

/// The product page a run checks.
///
/// Constructed once from configuration and never mutated. Construction is
/// the only place the URL is validated, so a `MonitorTarget` in hand is
/// always an absolute http(s) URL with a non-root path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorTarget {
    url: Url,
    raw: String,
}

impl MonitorTarget {
    /// Parses and validates a target URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] for a blank value and
    /// [`ConfigError::InvalidUrl`] when the value is not an absolute http(s)
    /// URL or points at the site root.
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(ConfigError::Missing("PRODUCT_URL"));
        }

        let url = Url::parse(raw)
            .map_err(|e| ConfigError::invalid_url("PRODUCT_URL", e.to_string()))?;

        match url.scheme() {
            "http" | "https" => {}
            other => {
                return Err(ConfigError::invalid_url(
                    "PRODUCT_URL",
                    format!("unsupported scheme '{other}'"),
                ));
            }
        }

        if url.path().trim_end_matches('/').is_empty() {
            return Err(ConfigError::invalid_url(
                "PRODUCT_URL",
                "path must identify a product page, not the site root",
            ));
        }

        Ok(Self {
            url,
            raw: raw.to_string(),
        })
    }

    /// The URL exactly as configured.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

impl fmt::Display for MonitorTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
