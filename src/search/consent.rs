//! Best-effort dismissal of the consent interstitial.
//!
//! The overlay appears in some regions, in some sessions, sometimes inside
//! an iframe, and sometimes not at all. Nothing in here may fail the run:
//! the outcome is a plain bool and every lookup or click error is logged
//! and swallowed.

use crate::browser::BrowserSession;
use crate::search::element::{find_all, is_clickable};
use crate::selectors::{Locator, CONSENT_SELECTORS};
use std::thread;
use std::time::Duration;

/// Click-through JS run inside each iframe's content document. Cross-origin
/// frames throw on `contentDocument` access and count as "not matched".
const FRAME_CONSENT_FN: &str = r#"
function(selectors) {
    const doc = this.contentDocument;
    if (!doc) return false;
    for (const sel of selectors) {
        let el = null;
        if (sel.startsWith('//')) {
            const found = doc.evaluate(sel, doc, null, XPathResult.FIRST_ORDERED_NODE_TYPE, null);
            el = found.singleNodeValue;
        } else {
            el = doc.querySelector(sel);
        }
        if (el && el.offsetParent !== null && !el.disabled) {
            el.click();
            return true;
        }
    }
    return false;
}
"#;

/// Try to dismiss a consent overlay. Returns true iff something was clicked.
pub fn dismiss(session: &BrowserSession) -> bool {
    log::debug!("Checking for consent overlay");

    let Ok(tab) = session.tab() else {
        return false;
    };

    // Pass 1: the top-level document
    for locator in CONSENT_SELECTORS {
        for element in find_all(tab, locator) {
            if !is_clickable(&element) {
                continue;
            }
            match element.click() {
                Ok(_) => {
                    log::debug!("Clicked consent element {}", locator.query());
                    thread::sleep(Duration::from_millis(500));
                    return true;
                }
                Err(e) => log::debug!("Consent click failed for {}: {}", locator.query(), e),
            }
        }
    }

    // Pass 2: the same selectors inside each (same-origin) iframe. The top
    // document stays the operating context either way.
    let selectors: Vec<&str> = CONSENT_SELECTORS.iter().map(Locator::query).collect();
    let selectors_json = match serde_json::to_value(&selectors) {
        Ok(v) => v,
        Err(_) => return false,
    };

    for (i, frame) in find_all(tab, &Locator::Css("iframe")).iter().enumerate() {
        let clicked = frame
            .call_js_fn(FRAME_CONSENT_FN, vec![selectors_json.clone()], false)
            .ok()
            .and_then(|obj| obj.value)
            .and_then(|v| v.as_bool())
            .unwrap_or(false);
        if clicked {
            log::debug!("Clicked consent element inside iframe {}", i);
            thread::sleep(Duration::from_millis(500));
            return true;
        }
    }

    log::debug!("No consent overlay found");
    false
}
