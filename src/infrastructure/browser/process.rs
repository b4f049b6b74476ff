//! Browser process shutdown.

use std::io;
use std::process::ExitStatus;

use async_trait::async_trait;
use chromiumoxide::Browser;
use tracing::{debug, trace};

/// Lifecycle calls needed to stop a browser process.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub(crate) trait BrowserProcess: Send {
    /// Asks the browser to exit over DevTools.
    async fn request_close(&mut self) -> Result<(), String>;

    /// Kills the child process. `None` when the browser was not launched by us.
    async fn kill_process(&mut self) -> Option<io::Result<()>>;

    /// Reaps the child process.
    async fn wait_exit(&mut self) -> io::Result<Option<ExitStatus>>;
}

#[async_trait]
impl BrowserProcess for Browser {
    async fn request_close(&mut self) -> Result<(), String> {
        self.close().await.map(|_| ()).map_err(|e| e.to_string())
    }

    async fn kill_process(&mut self) -> Option<io::Result<()>> {
        self.kill().await
    }

    async fn wait_exit(&mut self) -> io::Result<Option<ExitStatus>> {
        self.wait().await
    }
}

/// Stops `browser` and reaps its process.
///
/// A browser that did not accept the close request is killed before waiting,
/// so the wait cannot block on a process that was never told to exit. Returns
/// the close request's error, if any.
pub(crate) async fn shutdown<B: BrowserProcess + ?Sized>(browser: &mut B) -> Result<(), String> {
    let closed = browser.request_close().await;

    if let Err(ref e) = closed {
        debug!(error = %e, "Browser refused close request; killing process");
        if let Some(Err(kill_err)) = browser.kill_process().await {
            trace!(error = %kill_err, "Failed to kill browser process");
        }
    }

    match browser.wait_exit().await {
        Ok(status) => debug!(?status, "Browser process exited"),
        Err(e) => trace!(error = %e, "Failed to wait for browser process"),
    }

    closed
}
