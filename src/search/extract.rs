//! Parse rendered SERP markup into structured results.
//!
//! Parsing is pure (string in, records out) so the selector tables can be
//! exercised against static fixtures without a browser. Extraction never
//! fails the caller: a malformed candidate block is skipped, an unreadable
//! page yields an empty list.

use crate::browser::BrowserSession;
use crate::debug::DebugCapture;
use crate::selectors::{
    RESULT_CONTAINER_SELECTORS, RESULT_HEADING_SELECTOR, RESULT_LINK_SELECTOR, SNIPPET_SELECTORS,
};
use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};

/// One organic search result.
///
/// `rank` is 1-based and counts emitted records only; skipped candidate
/// blocks leave no gap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub rank: u32,
    pub title: String,
    pub snippet: String,
    pub url: String,
    pub domain: String,
}

/// Host component of a URL, or the empty string when the URL is empty,
/// relative or otherwise unparseable.
pub fn host_of(url: &str) -> String {
    url::Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
        .unwrap_or_default()
}

/// Parse up to `max_results` results out of full page markup.
pub fn parse_results(html: &str, max_results: usize) -> Vec<SearchResult> {
    parse_blocks(html, max_results).into_iter().map(|(result, _)| result).collect()
}

/// Parse results keeping each accepted block's markup for debug capture.
fn parse_blocks(html: &str, max_results: usize) -> Vec<(SearchResult, String)> {
    let document = Html::parse_document(html);

    // Scope to the primary results container when present, else the whole tree
    let scope = match Selector::parse("div#search") {
        Ok(sel) => document.select(&sel).next().unwrap_or_else(|| document.root_element()),
        Err(_) => document.root_element(),
    };

    let mut parsed = Vec::new();
    for block in candidate_blocks(scope) {
        if parsed.len() >= max_results {
            break;
        }
        if let Some(mut record) = parse_candidate(block) {
            record.rank = parsed.len() as u32 + 1;
            parsed.push((record, block.html()));
        }
    }
    parsed
}

/// Candidate blocks from the first container selector that matches anything.
fn candidate_blocks(scope: ElementRef<'_>) -> Vec<ElementRef<'_>> {
    for selector_str in RESULT_CONTAINER_SELECTORS {
        let Ok(selector) = Selector::parse(selector_str) else {
            continue;
        };
        let blocks: Vec<_> = scope.select(&selector).collect();
        if !blocks.is_empty() {
            log::debug!("Using result container selector {} ({} blocks)", selector_str, blocks.len());
            return blocks;
        }
    }
    Vec::new()
}

/// Parse one candidate block. A block without both a primary link and a
/// heading is not a result and yields `None`.
fn parse_candidate(block: ElementRef<'_>) -> Option<SearchResult> {
    let link_sel = Selector::parse(RESULT_LINK_SELECTOR).ok()?;
    let heading_sel = Selector::parse(RESULT_HEADING_SELECTOR).ok()?;

    let link = block.select(&link_sel).next()?;
    let heading = block.select(&heading_sel).next()?;

    let url = link.value().attr("href").unwrap_or_default().to_string();
    let title = heading.text().collect::<String>().trim().to_string();

    let snippet = SNIPPET_SELECTORS
        .iter()
        .filter_map(|s| Selector::parse(s).ok())
        .find_map(|sel| block.select(&sel).next())
        .map(|el| el.text().collect::<String>().trim().to_string())
        .unwrap_or_default();

    let domain = host_of(&url);

    Some(SearchResult { rank: 0, title, snippet, url, domain })
}

/// Read the rendered page from the session and parse it.
///
/// Never errors: a page that cannot be read or parsed produces an empty
/// list. Zero results is logged as a warning (block markup has likely
/// drifted past every container selector) but is a legitimate outcome.
pub fn extract(
    session: &BrowserSession,
    max_results: usize,
    capture: &mut DebugCapture,
) -> Vec<SearchResult> {
    let html = match session.page_source() {
        Ok(html) => html,
        Err(e) => {
            log::warn!("Could not read page for extraction: {}", e);
            return Vec::new();
        }
    };

    capture.html("extract", "page.html", &html);
    capture.pretty_html("extract", "page_pretty.html", &html);

    let parsed = parse_blocks(&html, max_results);
    for (result, fragment) in &parsed {
        capture.html("extract", &format!("candidate_{}.html", result.rank), fragment);
    }

    if parsed.is_empty() {
        log::warn!(
            "No results extracted with container selectors {:?}",
            RESULT_CONTAINER_SELECTORS
        );
    } else {
        log::info!("Extracted {} results", parsed.len());
    }

    parsed.into_iter().map(|(result, _)| result).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(title: &str, href: &str, snippet: &str) -> String {
        format!(
            "<div class=\"MjjYud\"><div class=\"yuRUbf\"><a href=\"{}\"><h3>{}</h3></a></div>\
             <div class=\"VwiC3b\">{}</div></div>",
            href, title, snippet
        )
    }

    fn page(blocks: &[String]) -> String {
        format!(
            "<html><body><div id=\"search\"><div id=\"rso\">{}</div></div></body></html>",
            blocks.join("")
        )
    }

    #[test]
    fn test_parse_well_formed_results() {
        let html = page(&[
            block("Zumba classes", "https://example.com/zumba", "Dance workout"),
            block("Zumba wiki", "https://en.wikipedia.org/wiki/Zumba", "Fitness program"),
        ]);

        let results = parse_results(&html, 10);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].rank, 1);
        assert_eq!(results[0].title, "Zumba classes");
        assert_eq!(results[0].url, "https://example.com/zumba");
        assert_eq!(results[0].domain, "example.com");
        assert_eq!(results[0].snippet, "Dance workout");
        assert_eq!(results[1].rank, 2);
        assert_eq!(results[1].domain, "en.wikipedia.org");
    }

    #[test]
    fn test_max_results_caps_output() {
        let blocks: Vec<String> = (0..12)
            .map(|i| block(&format!("Result {}", i), &format!("https://host{}.test/", i), "s"))
            .collect();
        let results = parse_results(&page(&blocks), 5);

        assert_eq!(results.len(), 5);
        let ranks: Vec<u32> = results.iter().map(|r| r.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3, 4, 5]);
        assert_eq!(results[0].title, "Result 0");
        assert_eq!(results[4].title, "Result 4");
    }

    #[test]
    fn test_malformed_blocks_are_skipped_without_rank_gap() {
        let no_link = "<div class=\"MjjYud\"><h3>Headline only</h3></div>".to_string();
        let no_heading =
            "<div class=\"MjjYud\"><div class=\"yuRUbf\"><a href=\"https://x.test/\"></a></div></div>"
                .to_string();
        let html = page(&[
            block("First", "https://a.test/", "sa"),
            no_link,
            no_heading,
            block("Second", "https://b.test/", "sb"),
        ]);

        let results = parse_results(&html, 10);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].rank, 1);
        assert_eq!(results[0].title, "First");
        assert_eq!(results[1].rank, 2);
        assert_eq!(results[1].title, "Second");
    }

    #[test]
    fn test_empty_page_yields_empty_results() {
        let results = parse_results("<html><body><div id=\"search\"></div></body></html>", 10);
        assert!(results.is_empty());
    }

    #[test]
    fn test_falls_back_to_whole_tree_without_search_div() {
        let html = format!(
            "<html><body><main>{}</main></body></html>",
            block("Loose result", "https://c.test/page", "sc")
        );
        let results = parse_results(&html, 10);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, "Loose result");
    }

    #[test]
    fn test_secondary_container_class() {
        let html = "<html><body><div id=\"search\">\
            <div class=\"g\"><div class=\"yuRUbf\"><a href=\"https://old.test/\"><h3>Old markup</h3></a></div></div>\
            </div></body></html>";
        let results = parse_results(html, 10);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, "Old markup");
    }

    #[test]
    fn test_snippet_priority_order() {
        let html = page(&[
            "<div class=\"MjjYud\"><div class=\"yuRUbf\"><a href=\"https://p.test/\"><h3>T</h3></a></div>\
             <div class=\"VwiC3b\">newer</div><span class=\"aCOpRe\">older</span></div>"
                .to_string(),
        ]);
        let results = parse_results(&html, 10);
        assert_eq!(results[0].snippet, "newer");
    }

    #[test]
    fn test_missing_snippet_is_empty_string() {
        let html = page(&[
            "<div class=\"MjjYud\"><div class=\"yuRUbf\"><a href=\"https://q.test/\"><h3>T</h3></a></div></div>"
                .to_string(),
        ]);
        let results = parse_results(&html, 10);
        assert_eq!(results[0].snippet, "");
    }

    #[test]
    fn test_host_of() {
        assert_eq!(host_of("https://example.com/path?q=1"), "example.com");
        assert_eq!(host_of("http://sub.example.co.uk/"), "sub.example.co.uk");
        assert_eq!(host_of(""), "");
        assert_eq!(host_of("not a url"), "");
        assert_eq!(host_of("/relative/path"), "");
    }

    #[test]
    fn test_result_serialization() {
        let result = SearchResult {
            rank: 1,
            title: "T".into(),
            snippet: "S".into(),
            url: "https://example.com/".into(),
            domain: "example.com".into(),
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["rank"], 1);
        assert_eq!(json["domain"], "example.com");
    }
}
