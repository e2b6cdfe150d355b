//! Find a site entry point that renders a usable search input.
//!
//! Candidates are tried strictly in order; the first one where any search
//! input selector becomes present wins and the rest are never visited.

use crate::browser::{BrowserSession, ScraperConfig};
use crate::error::{Result, ScraperError};
use crate::selectors::{combined_input_selector, SEARCH_INPUT_SELECTORS};
use std::thread;
use std::time::Duration;

/// Probe `candidates` until one shows a search input.
///
/// Returns the winning base address. When every candidate fails the run
/// cannot proceed: the error carries the last failure seen.
pub fn probe(session: &BrowserSession, candidates: &[&str], config: &ScraperConfig) -> Result<String> {
    let combined = combined_input_selector();
    let mut last_error = String::from("no candidates configured");

    for base in candidates {
        let url = candidate_url(base, config);
        log::debug!("Probing {}", url);
        match try_candidate(session, &url, &combined, config.probe_timeout) {
            Ok(()) => {
                log::info!("Search input detected on {}", base);
                return Ok((*base).to_string());
            }
            Err(e) => {
                log::debug!("Candidate {} failed: {}", base, e);
                last_error = e.to_string();
            }
        }
    }

    Err(ScraperError::OpenFailed(last_error))
}

fn try_candidate(
    session: &BrowserSession,
    url: &str,
    combined: &str,
    timeout: Duration,
) -> Result<()> {
    session.navigate(url)?;

    let tab = session.tab()?;
    if tab.wait_for_element_with_custom_timeout(combined, timeout).is_ok() {
        return Ok(());
    }

    // The page may still be hydrating; give it one short grace period and
    // re-poll every selector once before writing the candidate off.
    thread::sleep(Duration::from_secs(1));
    for selector in SEARCH_INPUT_SELECTORS {
        if let Ok(elements) = tab.find_elements(selector) {
            if !elements.is_empty() {
                log::debug!("Search input present via {} after re-poll", selector);
                return Ok(());
            }
        }
    }

    Err(ScraperError::OpenFailed(format!("No search input on {}", url)))
}

/// Candidate address with the locale parameters appended.
fn candidate_url(base: &str, config: &ScraperConfig) -> String {
    let (lang, region) = config.locale_params();
    let mut url = format!("{}/?hl={}", base, urlencoding::encode(lang));
    if let Some(region) = region {
        url.push_str("&gl=");
        url.push_str(&urlencoding::encode(region));
    }
    url
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_url_language_and_region() {
        let config = ScraperConfig::new().locale("de-DE");
        assert_eq!(
            candidate_url("https://www.google.de", &config),
            "https://www.google.de/?hl=de&gl=DE"
        );
    }

    #[test]
    fn test_candidate_url_language_only() {
        let config = ScraperConfig::new().locale("en");
        assert_eq!(candidate_url("https://www.google.com", &config), "https://www.google.com/?hl=en");
    }
}
