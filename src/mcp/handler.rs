//! MCP server handler owning the pipeline configuration.

use crate::browser::ScraperConfig;
use rmcp::{
    handler::server::router::tool::ToolRouter,
    model::{Implementation, ProtocolVersion, ServerCapabilities, ServerInfo},
    tool_handler, ServerHandler,
};

/// MCP server exposing the scraping pipeline as tools.
///
/// The server only holds configuration; every tool call runs a pipeline with
/// its own browser session, so concurrent clients never share mutable state.
#[derive(Clone)]
pub struct SearchServer {
    config: ScraperConfig,
    tool_router: ToolRouter<Self>,
}

impl SearchServer {
    /// Create a server with default configuration
    pub fn new() -> Self {
        Self::with_config(ScraperConfig::default())
    }

    /// Create a server with the given pipeline configuration
    pub fn with_config(config: ScraperConfig) -> Self {
        Self { config, tool_router: Self::tool_router() }
    }

    /// The configuration applied to each tool call
    pub fn config(&self) -> &ScraperConfig {
        &self.config
    }
}

impl Default for SearchServer {
    fn default() -> Self {
        Self::new()
    }
}

#[tool_handler]
impl ServerHandler for SearchServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(
                "Google search scraping tools. Each call drives an isolated browser \
                 session and returns ranked results as JSON."
                    .to_string(),
            ),
        }
    }
}
