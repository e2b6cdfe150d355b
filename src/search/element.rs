//! Element lookup and state helpers shared by the pipeline stages.
//!
//! State checks go through small JS predicates on the element rather than
//! CDP attribute plumbing; an element we cannot interrogate counts as not
//! visible, which keeps every selector table resilient to odd nodes.

use crate::selectors::Locator;
use headless_chrome::{Element, Tab};
use std::sync::Arc;

/// All elements matching a locator. Lookup failures mean "nothing matched".
pub(crate) fn find_all<'a>(tab: &'a Arc<Tab>, locator: &Locator) -> Vec<Element<'a>> {
    let found = match locator {
        Locator::Css(query) => tab.find_elements(query),
        Locator::XPath(query) => tab.find_elements_by_xpath(query),
    };
    match found {
        Ok(elements) => elements,
        Err(e) => {
            log::trace!("Lookup {:?} matched nothing: {}", locator.query(), e);
            Vec::new()
        }
    }
}

/// Whether the element takes up layout space and is not hidden.
pub(crate) fn is_visible(element: &Element) -> bool {
    js_predicate(
        element,
        "function() { \
            if (this.offsetParent === null) return false; \
            const style = window.getComputedStyle(this); \
            return style.visibility !== 'hidden' && style.display !== 'none'; \
        }",
    )
}

/// Whether the element is visible and not disabled.
pub(crate) fn is_clickable(element: &Element) -> bool {
    is_visible(element) && js_predicate(element, "function() { return !this.disabled; }")
}

/// Lower-cased `type` attribute, empty when absent.
pub(crate) fn input_type(element: &Element) -> String {
    element
        .call_js_fn("function() { return (this.getAttribute('type') || '').toLowerCase(); }", vec![], false)
        .ok()
        .and_then(|obj| obj.value)
        .and_then(|v| v.as_str().map(str::to_string))
        .unwrap_or_default()
}

fn js_predicate(element: &Element, declaration: &str) -> bool {
    element
        .call_js_fn(declaration, vec![], false)
        .ok()
        .and_then(|obj| obj.value)
        .and_then(|v| v.as_bool())
        .unwrap_or(false)
}
