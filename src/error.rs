use thiserror::Error;

/// Errors produced by the scraping pipeline.
///
/// Only [`ScraperError::LaunchFailed`] and [`ScraperError::OpenFailed`] abort a
/// run; every other variant is handled internally by degrading to a narrower
/// fallback path (typically the direct `/search` URL).
#[derive(Debug, Error)]
pub enum ScraperError {
    /// The Chrome/Chromium process could not be started
    #[error("Failed to launch browser: {0}")]
    LaunchFailed(String),

    /// No candidate domain rendered a usable search input
    #[error("Could not open any search domain: {0}")]
    OpenFailed(String),

    /// No locator pass matched a visible search input
    #[error("Search input not found on the page")]
    InputNotFound,

    /// Interactive query submission raised
    #[error("Query submission failed: {0}")]
    SubmissionFailed(String),

    /// Navigation to a URL failed or timed out
    #[error("Navigation failed: {0}")]
    NavigationFailed(String),

    /// A tab-level operation (content fetch, key press, screenshot) failed
    #[error("Tab operation failed: {0}")]
    TabOperationFailed(String),

    /// A JavaScript snippet could not be evaluated
    #[error("Script evaluation failed: {0}")]
    ScriptFailed(String),
}

impl ScraperError {
    /// Pipeline stage the error belongs to, as reported in the CLI error
    /// document.
    pub fn stage(&self) -> &'static str {
        match self {
            ScraperError::LaunchFailed(_) => "startup",
            ScraperError::OpenFailed(_) => "open",
            ScraperError::InputNotFound => "locate",
            ScraperError::SubmissionFailed(_) => "submit",
            ScraperError::NavigationFailed(_) => "navigate",
            ScraperError::TabOperationFailed(_) => "session",
            ScraperError::ScriptFailed(_) => "script",
        }
    }
}

/// Result type alias using [`ScraperError`]
pub type Result<T> = std::result::Result<T, ScraperError>;
