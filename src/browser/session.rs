use crate::browser::config::ScraperConfig;
use crate::error::{Result, ScraperError};
use headless_chrome::protocol::cdp::Page::CaptureScreenshotFormatOption;
use headless_chrome::{Browser, Tab};
use std::{ffi::OsStr, sync::Arc, time::Duration};

/// Browser session that owns a Chrome/Chromium instance for one pipeline run.
///
/// The session is the only component allowed to terminate the underlying
/// process. Every stage drives it by reference; [`BrowserSession::stop`] is
/// idempotent and also runs from `Drop`, so teardown happens on every exit
/// path, including early `?` returns and panics.
pub struct BrowserSession {
    /// The underlying headless_chrome Browser instance
    browser: Option<Browser>,

    /// The tab all stages operate on
    tab: Option<Arc<Tab>>,

    /// Child process id captured at launch, for the forced-kill step
    process_id: Option<u32>,

    /// Set by the first `stop` call; later calls are no-ops
    stopped: bool,
}

impl BrowserSession {
    /// Launch a new browser instance configured for scraping
    pub fn launch(config: &ScraperConfig) -> Result<Self> {
        log::info!(
            "Launching browser (headless={}, locale={})",
            config.headless,
            config.preferred_locale
        );

        let mut launch_opts = headless_chrome::LaunchOptions::default();

        // Ignore default arguments to prevent detection by anti-bot services
        launch_opts.ignore_default_args.push(OsStr::new("--enable-automation"));
        launch_opts.args.push(OsStr::new("--disable-blink-features=AutomationControlled"));
        launch_opts.args.push(OsStr::new("--no-first-run"));
        launch_opts.args.push(OsStr::new("--no-service-autorun"));
        launch_opts.args.push(OsStr::new("--password-store=basic"));
        launch_opts.args.push(OsStr::new("--disable-extensions"));
        launch_opts.args.push(OsStr::new("--disable-dev-shm-usage"));

        let lang_arg = format!("--lang={}", config.preferred_locale);
        launch_opts.args.push(OsStr::new(&lang_arg));
        let ua_arg = format!("--user-agent={}", config.user_agent());
        launch_opts.args.push(OsStr::new(&ua_arg));

        // Long idle timeout (default is 30 seconds) so slow consent flows and
        // settle sleeps never lose the session underneath us
        launch_opts.idle_browser_timeout = Duration::from_secs(60 * 60);

        launch_opts.headless = config.headless;
        launch_opts.window_size = Some((config.window_width, config.window_height));
        launch_opts.sandbox = config.sandbox;

        if let Some(ref path) = config.chrome_path {
            launch_opts.path = Some(path.clone());
        }

        if let Some(ref dir) = config.user_data_dir {
            launch_opts.user_data_dir = Some(dir.clone());
        }

        let browser = Browser::new(launch_opts).map_err(|e| ScraperError::LaunchFailed(e.to_string()))?;

        let tab = browser
            .new_tab()
            .map_err(|e| ScraperError::LaunchFailed(format!("Failed to create tab: {}", e)))?;

        let process_id = browser.get_process_id();
        log::debug!("Browser started (pid {:?})", process_id);

        Ok(Self { browser: Some(browser), tab: Some(tab), process_id, stopped: false })
    }

    /// Get the tab the pipeline operates on
    pub fn tab(&self) -> Result<&Arc<Tab>> {
        self.tab
            .as_ref()
            .ok_or_else(|| ScraperError::TabOperationFailed("Session already stopped".to_string()))
    }

    /// Navigate the tab to a URL and wait for the navigation to settle
    pub fn navigate(&self, url: &str) -> Result<()> {
        let tab = self.tab()?;
        tab.navigate_to(url)
            .map_err(|e| ScraperError::NavigationFailed(format!("Failed to navigate to {}: {}", url, e)))?;
        tab.wait_until_navigated()
            .map_err(|e| ScraperError::NavigationFailed(format!("Navigation timeout on {}: {}", url, e)))?;
        Ok(())
    }

    /// Full markup of the current page
    pub fn page_source(&self) -> Result<String> {
        self.tab()?
            .get_content()
            .map_err(|e| ScraperError::TabOperationFailed(format!("Failed to read page content: {}", e)))
    }

    /// PNG screenshot of the current viewport
    pub fn screenshot(&self) -> Result<Vec<u8>> {
        self.tab()?
            .capture_screenshot(CaptureScreenshotFormatOption::Png, None, None, true)
            .map_err(|e| ScraperError::TabOperationFailed(format!("Failed to capture screenshot: {}", e)))
    }

    /// Whether `stop` has already run
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Shut the browser down. Idempotent: the first call tears down, every
    /// later call returns immediately.
    ///
    /// Teardown is staged and each stage is guarded on its own, so a failure
    /// never skips the stages after it: close every tab, drop the browser
    /// handle (terminates the child), then force-kill the child process if a
    /// pid is still known.
    pub fn stop(&mut self) {
        if self.stopped {
            log::debug!("stop() already called; skipping");
            return;
        }
        self.stopped = true;
        log::info!("Stopping browser...");

        if let Some(ref browser) = self.browser {
            if let Ok(tabs) = browser.get_tabs().lock() {
                for tab in tabs.iter() {
                    // Ignore errors on individual tab closes
                    let _ = tab.close(false);
                }
            }
        }
        self.tab = None;

        // Dropping the handle terminates the child and reaps it
        drop(self.browser.take());

        // The child can outlive a failed transport shutdown; the pid captured
        // at launch lets us put it down regardless
        if let Some(pid) = self.process_id.take() {
            force_kill(pid);
        }

        log::info!("Browser stopped.");
    }
}

impl Drop for BrowserSession {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(unix)]
fn force_kill(pid: u32) {
    let _ = std::process::Command::new("kill").arg("-9").arg(pid.to_string()).status();
}

#[cfg(windows)]
fn force_kill(pid: u32) {
    let _ = std::process::Command::new("taskkill").args(["/F", "/PID", &pid.to_string()]).status();
}

#[cfg(not(any(unix, windows)))]
fn force_kill(_pid: u32) {}
