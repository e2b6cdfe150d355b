//! Commit the query and trigger the search.
//!
//! Two interaction models: native keystrokes for input/textarea elements,
//! scripted value assignment plus a synthesized Enter for the combobox and
//! contenteditable surfaces that do not take keystroke focus reliably. Any
//! unrecoverable failure (including not finding an input at all) degrades
//! to navigating a fully-parameterized query URL, so submission never aborts
//! the run.

use crate::browser::{BrowserSession, ScraperConfig};
use crate::debug::DebugCapture;
use crate::error::{Result, ScraperError};
use crate::search::locate::locate;
use crate::selectors::RESULTS_READY_SELECTOR;
use headless_chrome::Element;
use serde_json::json;
use std::thread;
use std::time::Duration;

/// Pause between characters when simulating human typing
const TYPING_DELAY: Duration = Duration::from_millis(120);

/// How the query ended up submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The interactive input surface accepted the query
    Submitted,
    /// Interaction was impossible or raised; a direct query URL was loaded
    DirectUrl,
}

/// Locate the input and submit `query`, falling back to the direct URL when
/// anything goes wrong. Infallible by design: the page the session displays
/// afterwards is always worth handing to the extractor.
pub fn search(
    session: &BrowserSession,
    config: &ScraperConfig,
    query: &str,
    human_typing: bool,
    capture: &mut DebugCapture,
) -> SubmitOutcome {
    log::info!("Searching for query: {}", query);

    let tab = match session.tab() {
        Ok(tab) => tab,
        Err(e) => {
            log::warn!("No tab available for interactive submission: {}", e);
            return direct_search(session, config, query, capture);
        }
    };

    let Some((element, matched)) = locate(tab) else {
        log::warn!("{}; falling back to direct query URL", ScraperError::InputNotFound);
        snapshot_missing_input(session, capture);
        return direct_search(session, config, query, capture);
    };

    log::debug!("Submitting via element matched by {}", matched);
    match submit_interactive(session, &element, query, human_typing) {
        Ok(()) => {
            await_results(session, config);
            SubmitOutcome::Submitted
        }
        Err(e) => {
            log::warn!("Interactive submission failed ({}); falling back to direct query URL", e);
            capture.text(
                "submit",
                "search_interaction_error.txt",
                &format!("query: {}\nmatched: {}\nerror: {}\n", query, matched, e),
            );
            direct_search(session, config, query, capture)
        }
    }
}

/// Drive the located element according to its interaction model.
fn submit_interactive(
    session: &BrowserSession,
    element: &Element,
    query: &str,
    human_typing: bool,
) -> Result<()> {
    // Focus click; some surfaces refuse it and still accept input
    if let Err(e) = element.click() {
        log::debug!("Focus click failed: {}", e);
    }

    let tag = element.tag_name.to_ascii_lowercase();
    if tag == "input" || tag == "textarea" {
        type_and_commit(session, element, query, human_typing)
    } else if set_value_js(element, query) {
        // Scripted assignment succeeded; commit with a synthesized Enter,
        // with the native key press as the backstop
        if let Err(e) = dispatch_enter_js(element) {
            log::debug!("Synthesized Enter failed ({}); trying native key press", e);
            press_enter(session)?;
        }
        Ok(())
    } else {
        log::debug!("Scripted value assignment failed; retrying with native keystrokes");
        type_and_commit(session, element, query, human_typing)
    }
}

/// Native-text model: clear, type, Enter.
fn type_and_commit(
    session: &BrowserSession,
    element: &Element,
    query: &str,
    human_typing: bool,
) -> Result<()> {
    // Best effort; a pristine box has nothing to clear
    let _ = element.call_js_fn("function() { if ('value' in this) { this.value = ''; } }", vec![], false);

    if human_typing {
        let tab = session.tab()?;
        for ch in query.chars() {
            tab.type_str(&ch.to_string())
                .map_err(|e| ScraperError::SubmissionFailed(format!("Typing failed: {}", e)))?;
            thread::sleep(TYPING_DELAY);
        }
    } else {
        element
            .type_into(query)
            .map_err(|e| ScraperError::SubmissionFailed(format!("Typing failed: {}", e)))?;
    }

    press_enter(session)
}

fn press_enter(session: &BrowserSession) -> Result<()> {
    session
        .tab()?
        .press_key("Enter")
        .map_err(|e| ScraperError::SubmissionFailed(format!("Enter key failed: {}", e)))?;
    Ok(())
}

/// Script-injection model, step 1: assign the text and raise an input event.
fn set_value_js(element: &Element, value: &str) -> bool {
    const SET_VALUE_FN: &str = r#"
function(value) {
    this.focus();
    if (this.tagName === 'INPUT' || this.tagName === 'TEXTAREA') {
        this.value = value;
    } else {
        try { this.innerText = value; } catch (e) { this.textContent = value; }
    }
    this.dispatchEvent(new Event('input', { bubbles: true }));
    return true;
}
"#;

    match element.call_js_fn(SET_VALUE_FN, vec![json!(value)], false) {
        Ok(obj) => obj.value.and_then(|v| v.as_bool()).unwrap_or(false),
        Err(e) => {
            log::debug!("JS value set failed: {}", e);
            false
        }
    }
}

/// Script-injection model, step 2: synthesized keydown/keypress/keyup Enter.
fn dispatch_enter_js(element: &Element) -> Result<()> {
    for kind in ["keydown", "keypress", "keyup"] {
        let declaration = format!(
            "function() {{ this.dispatchEvent(new KeyboardEvent('{}', \
             {{ key: 'Enter', keyCode: 13, which: 13, bubbles: true }})); }}",
            kind
        );
        element
            .call_js_fn(&declaration, vec![], false)
            .map_err(|e| ScraperError::ScriptFailed(format!("{} dispatch failed: {}", kind, e)))?;
        thread::sleep(Duration::from_millis(50));
    }
    Ok(())
}

/// Wait for the results container; absence is not fatal, extraction runs on
/// whatever rendered.
fn await_results(session: &BrowserSession, config: &ScraperConfig) {
    let Ok(tab) = session.tab() else {
        return;
    };
    if tab.wait_for_element_with_custom_timeout(RESULTS_READY_SELECTOR, config.timeout).is_err() {
        log::debug!("Results container not detected within timeout; settling briefly");
        thread::sleep(Duration::from_millis(1500));
    }
}

/// Navigate straight to a parameterized query URL, bypassing the input
/// surface entirely.
fn direct_search(
    session: &BrowserSession,
    config: &ScraperConfig,
    query: &str,
    capture: &mut DebugCapture,
) -> SubmitOutcome {
    let url = direct_search_url(query, config);
    log::info!("Falling back to direct search URL: {}", url);

    if let Err(e) = session.navigate(&url) {
        log::warn!("Direct search navigation failed: {}", e);
    }
    await_results(session, config);

    if capture.is_enabled() {
        if let Ok(html) = session.page_source() {
            capture.html("submit", "direct_search_page.html", &html);
        }
        capture.screenshot("submit", "direct_search.png", session);
    }

    SubmitOutcome::DirectUrl
}

/// The fully-parameterized query URL used by the fallback path.
pub fn direct_search_url(query: &str, config: &ScraperConfig) -> String {
    let (lang, region) = config.locale_params();
    let mut url = format!(
        "https://www.google.com/search?q={}&hl={}",
        urlencoding::encode(query),
        urlencoding::encode(lang)
    );
    if let Some(region) = region {
        url.push_str("&gl=");
        url.push_str(&urlencoding::encode(region));
    }
    url
}

fn snapshot_missing_input(session: &BrowserSession, capture: &mut DebugCapture) {
    if !capture.is_enabled() {
        return;
    }
    if let Ok(html) = session.page_source() {
        capture.html("locate", "no_input_page.html", &html);
    }
    capture.screenshot("locate", "no_input_screenshot.png", session);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direct_url_carries_query_and_locale() {
        let config = ScraperConfig::new().locale("de-DE");
        let url = direct_search_url("zumba", &config);
        assert!(url.contains("q=zumba"));
        assert!(url.contains("hl=de"));
        assert!(url.contains("gl=DE"));
    }

    #[test]
    fn test_direct_url_without_region() {
        let config = ScraperConfig::new().locale("fr");
        let url = direct_search_url("crêpes", &config);
        assert!(url.starts_with("https://www.google.com/search?q=cr%C3%AApes"));
        assert!(url.contains("hl=fr"));
        assert!(!url.contains("gl="));
    }

    #[test]
    fn test_direct_url_percent_encodes_query() {
        let config = ScraperConfig::new();
        let url = direct_search_url("rust web scraping", &config);
        assert!(url.contains("q=rust%20web%20scraping"));
    }
}
