//! # serp-scraper
//!
//! Resilient Google SERP automation via Chrome DevTools Protocol (CDP). The
//! target markup changes class names, element kinds, domains and consent
//! flows without notice, so every stage of the pipeline is built around
//! layered fallbacks:
//!
//! - **Domain probing**: a list of base addresses is tried in order until
//!   one renders a usable search input.
//! - **Consent dismissal**: best-effort, covers overlays in the top document
//!   and inside same-origin iframes, never fatal.
//! - **Input location**: CSS selector table, then XPath table, then a
//!   generic visible-input scan.
//! - **Submission**: native keystrokes or scripted value injection depending
//!   on the element; any failure degrades to a direct query URL.
//! - **Extraction**: prioritized container/snippet selector tables, with
//!   malformed blocks skipped instead of failing the run.
//! - **Teardown**: staged, idempotent browser shutdown that runs on every
//!   exit path.
//!
//! ## MCP Server
//!
//! The pipeline can be served to another process via the Model Context
//! Protocol (MCP):
//!
//! ```bash
//! # stdio transport (default)
//! cargo run --features mcp-server --bin mcp-server
//!
//! # SSE transport on a local port
//! cargo run --features mcp-server --bin mcp-server -- --transport sse --port 4444
//! ```
//!
//! ## CLI
//!
//! ```bash
//! cargo run --bin serp-scraper -- --query "zumba" --headless --max 5
//! ```
//!
//! Prints one JSON document: `{"domain_used": ..., "results": [...]}` on
//! success, `{"error": ..., "stage": ...}` on failure.
//!
//! ## Library Usage
//!
//! ```rust,no_run
//! use serp_scraper::{Scraper, ScraperConfig};
//!
//! # fn main() -> serp_scraper::Result<()> {
//! let scraper = Scraper::new(ScraperConfig::new().headless(true).locale("de-DE"));
//! let outcome = scraper.run("zumba", 10, false)?;
//!
//! println!("served by {}", outcome.domain_used);
//! for result in &outcome.results {
//!     println!("{}. {} ({})", result.rank, result.title, result.domain);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! Results are parsed offline as well: [`search::parse_results`] takes raw
//! markup, which is how the selector tables are tested.
//!
//! ## Module Overview
//!
//! - [`browser`]: browser session lifecycle and configuration
//! - [`search`]: the pipeline stages and the [`search::Scraper`] orchestrator
//! - [`selectors`]: the ordered selector tables every stage draws from
//! - [`debug`]: best-effort capture of page state for selector maintenance
//! - [`error`]: error types and result alias
//! - [`mcp`]: Model Context Protocol server (requires `mcp-handler` feature)

pub mod browser;
pub mod debug;
pub mod error;
pub mod search;
pub mod selectors;

#[cfg(feature = "mcp-handler")]
pub mod mcp;

pub use browser::{BrowserSession, ScraperConfig};
pub use debug::DebugCapture;
pub use error::{Result, ScraperError};
pub use search::{host_of, parse_results, RunOutcome, Scraper, SearchResult, SubmitOutcome};

#[cfg(feature = "mcp-handler")]
pub use mcp::SearchServer;
#[cfg(feature = "mcp-handler")]
pub use rmcp::ServiceExt;
