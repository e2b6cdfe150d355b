//! The scraping pipeline: probe → consent → submit → extract.
//!
//! Stages run strictly in sequence against one owned browser session.
//! Session teardown is unconditional: the orchestrator calls `stop` on every
//! return path and the session's `Drop` covers panics.

pub mod consent;
mod element;
pub mod extract;
pub mod locate;
pub mod probe;
pub mod submit;

pub use extract::{host_of, parse_results, SearchResult};
pub use submit::SubmitOutcome;

use crate::browser::{BrowserSession, ScraperConfig};
use crate::debug::DebugCapture;
use crate::error::Result;
use crate::selectors::DOMAIN_CANDIDATES;
use serde::Serialize;
use std::thread;
use std::time::Duration;

/// Pause between stages so the page can settle after navigation or a click
const SETTLE_DELAY: Duration = Duration::from_millis(400);

/// What a completed run produced.
#[derive(Debug, Clone, Serialize)]
pub struct RunOutcome {
    /// Base address that rendered a usable search input
    pub domain_used: String,
    /// Extracted results, at most the requested maximum, possibly empty
    pub results: Vec<SearchResult>,
}

/// One-query-at-a-time scraping pipeline.
///
/// Each [`Scraper::run`] call launches its own browser, so a `Scraper` can be
/// reused (or shared across server connections) without any state bleeding
/// between runs.
pub struct Scraper {
    config: ScraperConfig,
}

impl Scraper {
    /// Create a pipeline with the given configuration
    pub fn new(config: ScraperConfig) -> Self {
        Self { config }
    }

    /// The pipeline's configuration
    pub fn config(&self) -> &ScraperConfig {
        &self.config
    }

    /// Run the full pipeline for one query.
    ///
    /// Only a failed browser launch or the exhaustion of every domain
    /// candidate abort the run; a missing input surface or a failed
    /// interactive submission degrade to the direct query URL, and an empty
    /// results page returns an empty list.
    pub fn run(&self, query: &str, max_results: usize, human_typing: bool) -> Result<RunOutcome> {
        let mut session = BrowserSession::launch(&self.config)?;
        let mut capture = DebugCapture::new(self.config.debug, &self.config.debug_dir);

        let outcome = self.run_stages(&session, query, max_results, human_typing, &mut capture);

        // Unconditional teardown; `Drop` is the backstop for panic unwinds
        session.stop();
        outcome
    }

    fn run_stages(
        &self,
        session: &BrowserSession,
        query: &str,
        max_results: usize,
        human_typing: bool,
        capture: &mut DebugCapture,
    ) -> Result<RunOutcome> {
        let domain_used = probe::probe(session, DOMAIN_CANDIDATES, &self.config)?;

        if consent::dismiss(session) {
            log::info!("Consent overlay dismissed");
        }
        thread::sleep(SETTLE_DELAY);

        let submitted = submit::search(session, &self.config, query, human_typing, capture);
        log::debug!("Submission outcome: {:?}", submitted);
        thread::sleep(SETTLE_DELAY);

        let results = extract::extract(session, max_results, capture);

        Ok(RunOutcome { domain_used, results })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_outcome_serializes_with_contract_field_names() {
        let outcome = RunOutcome {
            domain_used: "https://www.google.com".to_string(),
            results: vec![SearchResult {
                rank: 1,
                title: "T".into(),
                snippet: String::new(),
                url: "https://example.com/".into(),
                domain: "example.com".into(),
            }],
        };

        let json = serde_json::to_value(&outcome).unwrap();
        assert!(json.get("domain_used").is_some());
        assert_eq!(json["results"][0]["rank"], 1);
    }
}
