//! Selector tables used by the locator, consent and extraction stages.
//!
//! The target markup changes its class names, element kinds and consent flow
//! without notice, so every lookup is expressed as an ordered table of
//! [`Locator`]s: entries are tried strictly in order and a later entry is only
//! consulted when all earlier ones matched nothing visible. Adding a new
//! fallback means appending a row, not touching control flow.

/// A single element lookup: the query string plus the dialect it is written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Locator {
    /// CSS selector, resolved via `querySelector`-style lookup
    Css(&'static str),
    /// XPath expression, for targets CSS cannot express (text predicates)
    XPath(&'static str),
}

impl Locator {
    /// The raw query string, regardless of dialect
    pub fn query(&self) -> &'static str {
        match self {
            Locator::Css(q) | Locator::XPath(q) => q,
        }
    }
}

/// Candidate base addresses, probed in order until one renders a usable
/// search input. The `/ncr` entry suppresses country redirects.
pub const DOMAIN_CANDIDATES: &[&str] = &[
    "https://www.google.com",
    "https://www.google.com/ncr",
    "https://www.google.co.uk",
    "https://www.google.de",
    "https://www.google.fr",
    "https://www.google.es",
    "https://www.google.nl",
    "https://www.google.it",
    "https://www.google.ca",
    "https://www.google.com.au",
];

/// Search-input lookups, CSS pass. Covers the classic `input[name=q]`, the
/// textarea variants newer frontends ship, and the combobox/contenteditable
/// surfaces used by some A/B buckets.
pub const SEARCH_INPUT_SELECTORS: &[&str] = &[
    "input[name='q']",
    "input#APjFqb",
    "textarea#APjFqb",
    "textarea.gLFyf",
    "textarea[role='combobox']",
    "textarea[jsname]",
    "div[role='combobox']",
    "div[contenteditable='true']",
    "input[type='search']",
    "input[aria-label*='Search']",
    "input[title*='Search']",
    "form[action*='/search'] input",
    "input.gsfi",
];

/// Search-input lookups, XPath pass. Same semantic targets through a second
/// dialect; only reached when the CSS pass found nothing visible.
pub const SEARCH_INPUT_XPATHS: &[&str] = &[
    "//textarea[contains(@aria-label,'Search')]",
    "//input[contains(@aria-label,'Search')]",
    "//div[@role='combobox' and @contenteditable='true']",
    "//input[contains(@name,'q')]",
    "//input[@type='search']",
    "//textarea[@role='combobox']",
];

/// Consent-overlay buttons, broad on purpose: stable ids first, then text
/// heuristics for the localized variants.
pub const CONSENT_SELECTORS: &[Locator] = &[
    Locator::Css("#L2AGLb"),
    Locator::XPath(
        "//button[contains(., 'I agree') or contains(., 'Accept all') or contains(., 'Alle akzeptieren')]",
    ),
    Locator::XPath("//button[contains(., 'Agree')]"),
    Locator::XPath("//button[contains(., 'Accept')]"),
    Locator::Css("button[aria-label='Accept all']"),
    Locator::Css("form[action*='consent'] button"),
    Locator::Css("button[jsname='higCR']"),
];

/// Containers that signal a rendered results page. Absence is tolerated;
/// extraction still runs against whatever markup is present.
pub const RESULTS_READY_SELECTOR: &str = "div#search, div#rso, div#main";

/// Result-block containers, most current class first.
pub const RESULT_CONTAINER_SELECTORS: &[&str] = &["div.MjjYud", "div.g", "div.Gx5Zad"];

/// Primary link inside a result block. A block without one is not a result.
pub const RESULT_LINK_SELECTOR: &str = "div.yuRUbf a";

/// Heading inside a result block. A block without one is not a result.
pub const RESULT_HEADING_SELECTOR: &str = "h3";

/// Snippet holders, ordered newest class to oldest.
pub const SNIPPET_SELECTORS: &[&str] = &[".IsZvec", ".VwiC3b", "span.aCOpRe", ".s3v9rd", ".st"];

/// The CSS pass joined into one group selector, for presence polling.
pub fn combined_input_selector() -> String {
    SEARCH_INPUT_SELECTORS.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locator_query() {
        assert_eq!(Locator::Css("#L2AGLb").query(), "#L2AGLb");
        assert_eq!(Locator::XPath("//button").query(), "//button");
    }

    #[test]
    fn test_combined_selector_covers_every_entry() {
        let combined = combined_input_selector();
        for sel in SEARCH_INPUT_SELECTORS {
            assert!(combined.contains(sel), "missing {} in combined selector", sel);
        }
    }

    #[test]
    fn test_primary_candidate_is_main_domain() {
        assert_eq!(DOMAIN_CANDIDATES[0], "https://www.google.com");
    }

    #[test]
    fn test_consent_table_prefers_stable_id() {
        assert_eq!(CONSENT_SELECTORS[0], Locator::Css("#L2AGLb"));
    }

    #[test]
    fn test_all_selector_tables_parse_as_css() {
        for sel in RESULT_CONTAINER_SELECTORS
            .iter()
            .chain(SNIPPET_SELECTORS)
            .chain(SEARCH_INPUT_SELECTORS)
        {
            assert!(scraper::Selector::parse(sel).is_ok(), "bad selector: {}", sel);
        }
        assert!(scraper::Selector::parse(RESULT_LINK_SELECTOR).is_ok());
        assert!(scraper::Selector::parse(RESULT_HEADING_SELECTOR).is_ok());
        assert!(scraper::Selector::parse(RESULTS_READY_SELECTOR).is_ok());
    }
}
