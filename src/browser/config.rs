use std::path::PathBuf;
use std::time::Duration;

use rand::seq::SliceRandom;

/// Desktop user agents rotated per launch so repeated runs do not present an
/// identical fingerprint.
const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/123.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/123.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:124.0) Gecko/20100101 Firefox/124.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10.15; rv:124.0) Gecko/20100101 Firefox/124.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.4 Safari/605.1.15",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Edge/123.0.0.0 Safari/537.36",
];

/// Configuration for a scraping pipeline instance.
///
/// Everything here is a payload handed to the browser process or to the
/// stage timeouts; the pipeline itself is configured nowhere else.
#[derive(Debug, Clone)]
pub struct ScraperConfig {
    /// Run the browser without a visible window
    pub headless: bool,

    /// Upper bound for stage-level waits (results signature, navigation)
    pub timeout: Duration,

    /// Per-candidate bound while probing domain entry points
    pub probe_timeout: Duration,

    /// Preferred UI locale, e.g. "en-US" or "de-DE". The leading segment
    /// becomes the `hl` parameter, the trailing segment (if any) `gl`.
    pub preferred_locale: String,

    /// Write page snapshots, screenshots and candidate fragments to disk
    pub debug: bool,

    /// Directory receiving debug artifacts
    pub debug_dir: PathBuf,

    /// Browser window size
    pub window_width: u32,
    pub window_height: u32,

    /// Path to a custom Chrome/Chromium binary
    pub chrome_path: Option<PathBuf>,

    /// Persistent profile directory
    pub user_data_dir: Option<PathBuf>,

    /// Run Chrome with its sandbox enabled
    pub sandbox: bool,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            headless: true,
            timeout: Duration::from_secs(10),
            probe_timeout: Duration::from_secs(6),
            preferred_locale: "en-US".to_string(),
            debug: false,
            debug_dir: PathBuf::from("debug"),
            window_width: 1920,
            window_height: 1080,
            chrome_path: None,
            user_data_dir: None,
            sandbox: false,
        }
    }
}

impl ScraperConfig {
    /// Create a configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set headless mode
    pub fn headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    /// Builder method: set the stage timeout in seconds
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout = Duration::from_secs(secs);
        self
    }

    /// Builder method: set the preferred locale
    pub fn locale(mut self, locale: impl Into<String>) -> Self {
        self.preferred_locale = locale.into();
        self
    }

    /// Builder method: enable debug artifacts in the given directory
    pub fn debug_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.debug = true;
        self.debug_dir = dir.into();
        self
    }

    /// Builder method: set window size
    pub fn window_size(mut self, width: u32, height: u32) -> Self {
        self.window_width = width;
        self.window_height = height;
        self
    }

    /// Builder method: set a custom browser binary
    pub fn chrome_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.chrome_path = Some(path.into());
        self
    }

    /// Builder method: set a persistent profile directory
    pub fn user_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.user_data_dir = Some(dir.into());
        self
    }

    /// Split the preferred locale into the `hl` language parameter and the
    /// optional `gl` region parameter. The leading segment is the language,
    /// the trailing segment the region: `"de-DE"` yields `("de", Some("DE"))`,
    /// `"en"` yields `("en", None)`.
    pub fn locale_params(&self) -> (&str, Option<&str>) {
        let locale = self.preferred_locale.as_str();
        let lang = locale.split('-').next().unwrap_or(locale);
        let region = locale.rsplit_once('-').map(|(_, r)| r).filter(|r| !r.is_empty());
        (lang, region)
    }

    /// Pick a user agent for this launch
    pub fn user_agent(&self) -> &'static str {
        USER_AGENTS
            .choose(&mut rand::thread_rng())
            .copied()
            .unwrap_or(USER_AGENTS[0])
    }
}
