//! MCP (Model Context Protocol) server implementation for the scraper.
//!
//! This is a pass-through boundary: a tool call is unmarshaled, handed to
//! the pipeline as-is, and the [`crate::search::RunOutcome`] (or the error)
//! is marshaled back. No pipeline semantics live here.

pub mod handler;
pub use handler::SearchServer;

use crate::search::Scraper;
use rmcp::{
    tool_router, tool,
    ErrorData as McpError,
    model::{CallToolResult, Content},
    handler::server::wrapper::Parameters,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Search tool parameters
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SearchParams {
    /// Query to search for
    pub query: String,

    /// Maximum number of results to return (default: 10)
    #[serde(default = "default_max_results")]
    pub max_results: usize,

    /// Type the query character by character with a human-like delay
    #[serde(default)]
    pub human_typing: bool,
}

fn default_max_results() -> usize {
    10
}

#[tool_router]
impl SearchServer {
    /// Run the full pipeline for one query
    #[tool(description = "Search Google for a query and return ranked results \
                          (title, snippet, url, domain) plus the domain that served them")]
    fn search(&self, params: Parameters<SearchParams>) -> Result<CallToolResult, McpError> {
        let scraper = Scraper::new(self.config().clone());

        let outcome = scraper
            .run(&params.0.query, params.0.max_results, params.0.human_typing)
            .map_err(|e| McpError::internal_error(format!("{} stage failed: {}", e.stage(), e), None))?;

        let text = serde_json::to_string_pretty(&outcome)
            .map_err(|e| McpError::internal_error(e.to_string(), None))?;

        Ok(CallToolResult::success(vec![Content::text(text)]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_params_defaults() {
        let json = serde_json::json!({ "query": "zumba" });

        let params: SearchParams = serde_json::from_value(json).unwrap();
        assert_eq!(params.query, "zumba");
        assert_eq!(params.max_results, 10);
        assert!(!params.human_typing);
    }

    #[test]
    fn test_search_params_explicit() {
        let json = serde_json::json!({
            "query": "rust scraping",
            "max_results": 3,
            "human_typing": true
        });

        let params: SearchParams = serde_json::from_value(json).unwrap();
        assert_eq!(params.max_results, 3);
        assert!(params.human_typing);
    }
}
