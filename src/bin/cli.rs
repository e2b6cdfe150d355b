//! Command-line wrapper around the scraping pipeline.
//!
//! One query in, one JSON document on stdout: `{"domain_used", "results"}`
//! on success, `{"error", "stage"}` (plus a trace when `--debug`) on
//! failure. Logging goes to stderr and never mixes into the document.

use clap::Parser;
use serde_json::json;
use serp_scraper::{Scraper, ScraperConfig};

#[derive(Parser)]
#[command(name = "serp-scraper")]
#[command(version)]
#[command(about = "Resilient Google search scraper", long_about = None)]
struct Cli {
    /// Search query
    #[arg(long, short = 'q')]
    query: String,

    /// Run the browser in headless mode
    #[arg(long)]
    headless: bool,

    /// Maximum number of results to return
    #[arg(long, default_value = "10")]
    max: usize,

    /// Simulate human typing (slower)
    #[arg(long)]
    human: bool,

    /// Save page snapshots, screenshots and candidate blocks
    #[arg(long)]
    debug: bool,

    /// Directory receiving debug artifacts
    #[arg(long, value_name = "DIR", default_value = "debug")]
    debug_dir: String,

    /// Preferred language (e.g. en-US, de-DE)
    #[arg(long, default_value = "en-US")]
    lang: String,

    /// Stage timeout in seconds
    #[arg(long, default_value = "10")]
    timeout: u64,
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.debug { log::LevelFilter::Debug } else { log::LevelFilter::Info };
    env_logger::Builder::new().filter_level(level).parse_default_env().init();

    let mut config = ScraperConfig::new()
        .headless(cli.headless)
        .timeout_secs(cli.timeout)
        .locale(cli.lang.as_str());
    if cli.debug {
        config = config.debug_dir(cli.debug_dir.as_str());
    }

    let scraper = Scraper::new(config);

    match scraper.run(&cli.query, cli.max, cli.human) {
        Ok(outcome) => {
            let doc = serde_json::to_string_pretty(&outcome)
                .unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e));
            println!("{}", doc);
        }
        Err(e) => {
            let mut payload = json!({
                "error": e.to_string(),
                "stage": e.stage(),
            });
            if cli.debug {
                payload["trace"] = json!(format!("{:?}", e));
            }
            let doc = serde_json::to_string_pretty(&payload)
                .unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e));
            println!("{}", doc);
            std::process::exit(1);
        }
    }
}
