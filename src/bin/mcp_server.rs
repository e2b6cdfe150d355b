//! Serp-scraper MCP Server
//!
//! This binary serves the scraping pipeline over the Model Context Protocol
//! so a separate process can invoke it as plain request/response calls. The
//! transport is selectable: stdio for subprocess embedding, SSE or
//! streamable HTTP for a host/port socket.

use clap::{Parser, ValueEnum};
use rmcp::{ServiceExt, transport::stdio};
use rmcp::transport::{
    sse_server::{SseServer, SseServerConfig},
    streamable_http_server::{StreamableHttpService, session::local::LocalSessionManager},
};
use serp_scraper::mcp::SearchServer;
use serp_scraper::ScraperConfig;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Transport {
    /// Standard input/output transport (default)
    Stdio,
    /// Server-Sent Events transport
    Sse,
    /// HTTP streamable transport
    Http,
}

#[derive(Parser)]
#[command(name = "serp-scraper")]
#[command(version)]
#[command(about = "Google search scraping MCP server", long_about = None)]
struct Cli {
    /// Launch the browser in headed mode (default: headless)
    #[arg(long, short = 'H')]
    headed: bool,

    /// Path to a custom browser executable
    #[arg(long, value_name = "PATH")]
    chrome_path: Option<String>,

    /// Persistent browser profile directory
    #[arg(long, value_name = "DIR")]
    user_data_dir: Option<String>,

    /// Preferred language (e.g. en-US, de-DE)
    #[arg(long, default_value = "en-US")]
    lang: String,

    /// Directory for debug artifacts (enables debug capture)
    #[arg(long, value_name = "DIR")]
    debug_dir: Option<String>,

    /// Transport type to use
    #[arg(long, short = 't', value_enum, default_value = "stdio")]
    transport: Transport,

    /// Port for SSE or HTTP transport (default: 3000)
    #[arg(long, short = 'p', default_value = "3000")]
    port: u16,

    /// SSE endpoint path (default: /sse)
    #[arg(long, default_value = "/sse")]
    sse_path: String,

    /// SSE POST path for messages (default: /message)
    #[arg(long, default_value = "/message")]
    sse_post_path: String,

    /// HTTP streamable endpoint path (default: /mcp)
    #[arg(long, default_value = "/mcp")]
    http_path: String,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = ScraperConfig::new().headless(!cli.headed).locale(cli.lang.as_str());
    if let Some(ref path) = cli.chrome_path {
        config = config.chrome_path(path.as_str());
    }
    if let Some(ref dir) = cli.user_data_dir {
        config = config.user_data_dir(dir.as_str());
    }
    if let Some(ref dir) = cli.debug_dir {
        config = config.debug_dir(dir.as_str());
    }

    eprintln!("Serp-scraper MCP Server v{}", env!("CARGO_PKG_VERSION"));
    eprintln!(
        "Browser mode: {}",
        if config.headless { "headless" } else { "headed" }
    );
    eprintln!("Locale: {}", config.preferred_locale);

    match cli.transport {
        Transport::Stdio => {
            eprintln!("Transport: stdio");
            eprintln!("Ready to accept MCP connections via stdio");
            let service = SearchServer::with_config(config);
            let server = service.serve(stdio()).await?;
            let quit_reason = server.waiting().await?;
            eprintln!("Server quit with reason: {:?}", quit_reason);
        }
        Transport::Sse => {
            eprintln!("Transport: SSE");
            eprintln!("Port: {}", cli.port);

            let bind_addr = format!("127.0.0.1:{}", cli.port);

            let sse_config = SseServerConfig {
                bind: bind_addr.parse()?,
                sse_path: cli.sse_path.clone(),
                post_path: cli.sse_post_path.clone(),
                ct: CancellationToken::new(),
                sse_keep_alive: None,
            };

            let (sse_server, router) = SseServer::new(sse_config);

            eprintln!(
                "Ready to accept MCP connections at http://{}{}",
                bind_addr, cli.sse_path
            );

            // Every connection gets its own server value; pipeline runs never
            // share a browser session across clients
            let _cancellation_token =
                sse_server.with_service(move || SearchServer::with_config(config.clone()));

            let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
            axum::serve(listener, router.into_make_service()).await?;
        }
        Transport::Http => {
            eprintln!("Transport: HTTP streamable");
            eprintln!("Port: {}", cli.port);

            let bind_addr = format!("127.0.0.1:{}", cli.port);

            let service_factory = move || -> Result<SearchServer, std::io::Error> {
                Ok(SearchServer::with_config(config.clone()))
            };

            let http_service = StreamableHttpService::new(
                service_factory,
                LocalSessionManager::default().into(),
                Default::default(),
            );

            let router = axum::Router::new().nest_service(&cli.http_path, http_service);

            eprintln!(
                "Ready to accept MCP connections at http://{}{}",
                bind_addr, cli.http_path
            );

            let listener = tokio::net::TcpListener::bind(bind_addr).await?;
            axum::serve(listener, router).await?;
        }
    }

    Ok(())
}
