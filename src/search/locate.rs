//! Locate the active search input.
//!
//! Three passes, each exhausted in order before the next is tried: the CSS
//! table, the XPath table, then a generic scan over native input-like
//! elements. Within a pass the first *visible* match wins: present but
//! hidden inputs (offscreen mirrors, template nodes) are common on the
//! target pages and must not be picked.

use crate::search::element::{find_all, input_type, is_visible};
use crate::selectors::{Locator, SEARCH_INPUT_SELECTORS, SEARCH_INPUT_XPATHS};
use headless_chrome::{Element, Tab};
use std::sync::Arc;

/// Find the query input. Returns the element and the query string that
/// matched it, for logging and debug artifacts.
pub fn locate<'a>(tab: &'a Arc<Tab>) -> Option<(Element<'a>, &'static str)> {
    for query in SEARCH_INPUT_SELECTORS {
        if let Some(element) = first_visible(tab, &Locator::Css(query)) {
            log::debug!("Search input located via CSS selector {}", query);
            return Some((element, query));
        }
    }

    for query in SEARCH_INPUT_XPATHS {
        if let Some(element) = first_visible(tab, &Locator::XPath(query)) {
            log::debug!("Search input located via XPath {}", query);
            return Some((element, query));
        }
    }

    generic_fallback(tab)
}

fn first_visible<'a>(tab: &'a Arc<Tab>, locator: &Locator) -> Option<Element<'a>> {
    find_all(tab, locator).into_iter().find(|element| is_visible(element))
}

/// Last resort: any visible text-accepting input, then any visible textarea.
fn generic_fallback<'a>(tab: &'a Arc<Tab>) -> Option<(Element<'a>, &'static str)> {
    for element in find_all(tab, &Locator::Css("input")) {
        let kind = input_type(&element);
        if matches!(kind.as_str(), "text" | "search" | "") && is_visible(&element) {
            log::debug!("Falling back to generic visible input");
            return Some((element, "generic-input"));
        }
    }

    for element in find_all(tab, &Locator::Css("textarea")) {
        if is_visible(&element) {
            log::debug!("Falling back to generic visible textarea");
            return Some((element, "generic-textarea"));
        }
    }

    None
}
