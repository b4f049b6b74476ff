//! Chromium [`PageLoader`] over the DevTools protocol.

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use chromiumoxide::handler::viewport::Viewport;
use chromiumoxide::{Browser, BrowserConfig, Handler};
use futures::StreamExt;
use tokio::task::JoinHandle;
use tokio::time::timeout;
use tracing::{debug, info, trace, warn};

use super::{ChromePage, process};
use crate::domain::ports::{PageLoader, RenderedPage};
use crate::error::LoadError;

/// Identifying client string sent by default.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/115.0.0.0 Safari/537.36";

const LAUNCH_TIMEOUT: Duration = Duration::from_secs(20);

/// Browser launch settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserSettings {
    /// Browser binary. `None` lets chromiumoxide auto-detect one.
    pub executable: Option<PathBuf>,
    pub headless: bool,
    pub window_width: u32,
    pub window_height: u32,
    pub user_agent: String,
    /// Budget for navigation; also bounds each DevTools request.
    pub load_timeout: Duration,
}

impl Default for BrowserSettings {
    fn default() -> Self {
        Self {
            executable: None,
            headless: true,
            window_width: 1920,
            window_height: 1080,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            load_timeout: Duration::from_secs(30),
        }
    }
}

impl BrowserSettings {
    /// Extra command-line switches for a non-interactive container run.
    pub fn launch_args(&self) -> Vec<String> {
        vec![
            "--disable-dev-shm-usage".to_string(),
            "--disable-extensions".to_string(),
            "--no-first-run".to_string(),
            "--no-default-browser-check".to_string(),
            "--mute-audio".to_string(),
            format!("--user-agent={}", self.user_agent),
        ]
    }
}

/// Launches a fresh browser for every load.
///
/// The browser belongs to the returned [`ChromePage`]; nothing is shared
/// between loads.
pub struct ChromePageLoader {
    settings: BrowserSettings,
}

impl ChromePageLoader {
    pub fn new(settings: BrowserSettings) -> Self {
        Self { settings }
    }

    fn browser_config(&self) -> Result<BrowserConfig, LoadError> {
        let settings = &self.settings;

        let mut builder = BrowserConfig::builder()
            .no_sandbox()
            .window_size(settings.window_width, settings.window_height)
            .viewport(Viewport {
                width: settings.window_width,
                height: settings.window_height,
                ..Viewport::default()
            })
            .request_timeout(settings.load_timeout)
            .launch_timeout(LAUNCH_TIMEOUT)
            .args(settings.launch_args());

        if !settings.headless {
            builder = builder.with_head();
        }

        if let Some(executable) = &settings.executable {
            builder = builder.chrome_executable(executable);
        }

        builder
            .build()
            .map_err(|e| LoadError::Launch(format!("browser config error: {e}")))
    }
}

#[async_trait]
impl PageLoader for ChromePageLoader {
    async fn load(&self, url: &str) -> Result<Box<dyn RenderedPage>, LoadError> {
        let config = self.browser_config()?;

        let (mut browser, handler) = Browser::launch(config)
            .await
            .map_err(|e| LoadError::Launch(e.to_string()))?;
        let handler_task = spawn_handler_task(handler);
        debug!("Browser launched");

        let page = match browser.new_page("about:blank").await {
            Ok(page) => page,
            Err(e) => {
                if let Err(close_err) = process::shutdown(&mut browser).await {
                    trace!(error = %close_err, "Failed to close browser after tab error");
                }
                handler_task.abort();
                return Err(LoadError::Launch(format!("failed to open tab: {e}")));
            }
        };

        let session = ChromePage::new(browser, page, handler_task);
        let budget = self.settings.load_timeout;

        let navigation = timeout(budget, session.page().goto(url))
            .await
            .map(|res| res.map(|_| ()));
        let error = match navigation {
            Ok(Ok(())) => {
                info!(url, "Product page loaded");
                return Ok(Box::new(session));
            }
            Ok(Err(e)) => LoadError::Navigation {
                url: url.to_string(),
                reason: e.to_string(),
            },
            Err(_) => LoadError::Timeout {
                url: url.to_string(),
                budget,
            },
        };

        if let Err(e) = session.close().await {
            warn!(error = %e, "Failed to release browser after load error");
        }
        Err(error)
    }
}

/// Drives chromiumoxide's DevTools event loop until the connection closes.
fn spawn_handler_task(mut handler: Handler) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(event) = handler.next().await {
            if let Err(e) = event {
                trace!(error = %e, "DevTools handler event error");
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_match_desktop_profile() {
        let settings = BrowserSettings::default();

        assert!(settings.headless);
        assert_eq!((settings.window_width, settings.window_height), (1920, 1080));
        assert!(settings.user_agent.contains("Chrome/115.0.0.0"));
    }

    #[test]
    fn test_launch_args_carry_user_agent() {
        let settings = BrowserSettings {
            user_agent: "cart-watch-test/1.0".to_string(),
            ..BrowserSettings::default()
        };

        let args = settings.launch_args();

        assert!(args.contains(&"--disable-dev-shm-usage".to_string()));
        assert!(args.contains(&"--user-agent=cart-watch-test/1.0".to_string()));
    }
}
