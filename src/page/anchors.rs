use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Document, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition};

use crate::error::PageError;
use crate::util::{document_root, query_all_html};

/// In-page selector an anchor `href` points at, if it points anywhere.
pub fn anchor_target(href: &str) -> Option<&str> {
    match href {
        "" | "#" => None,
        h if h.starts_with('#') => Some(h),
        _ => None,
    }
}

/// Smooth-scroll every `a[href^="#"]` to its section.
pub fn mount(doc: &Document) -> Result<(), PageError> {
    let root = document_root(doc)?;
    for link in query_all_html(&root, "a[href^=\"#\"]") {
        let doc = doc.clone();
        let target_link = link.clone();
        let click_cb = Closure::wrap(Box::new(move |e: web_sys::MouseEvent| {
            let Some(href) = target_link.get_attribute("href") else {
                return;
            };
            let Some(selector) = anchor_target(&href) else {
                return;
            };
            if let Ok(Some(section)) = doc.query_selector(selector) {
                e.prevent_default();
                let opts = ScrollIntoViewOptions::new();
                opts.set_behavior(ScrollBehavior::Smooth);
                opts.set_block(ScrollLogicalPosition::Start);
                section.scroll_into_view_with_scroll_into_view_options(&opts);
            }
        }) as Box<dyn FnMut(_)>);
        link.add_event_listener_with_callback("click", click_cb.as_ref().unchecked_ref())?;
        click_cb.forget();
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_hash_is_ignored() {
        assert_eq!(anchor_target("#"), None);
        assert_eq!(anchor_target(""), None);
    }

    #[test]
    fn section_ids_resolve() {
        assert_eq!(anchor_target("#contact"), Some("#contact"));
        assert_eq!(anchor_target("/about"), None);
    }
}
