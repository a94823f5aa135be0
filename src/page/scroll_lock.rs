//! Freezes the page behind an overlay without losing the reader's place.

use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

use crate::util::{defer, document_root};

/// Inline styles written to `<body>` while locked. Cleared on release.
const BODY_PROPS: [&str; 5] = ["position", "top", "width", "overflow", "padding-right"];

/// Active lock on the body scroll. Dropping it without [`ScrollLock::release`]
/// leaves the page locked.
#[derive(Debug)]
pub struct ScrollLock {
    scroll_y: f64,
}

pub fn lock_styles(scroll_y: f64, scrollbar_px: f64) -> [(&'static str, String); 5] {
    [
        ("position", "fixed".to_string()),
        ("top", format!("-{scroll_y}px")),
        ("width", "100%".to_string()),
        ("overflow", "hidden".to_string()),
        ("padding-right", format!("{}px", scrollbar_px.max(0.0))),
    ]
}

impl ScrollLock {
    pub fn engage(scroll_y: f64) -> Self {
        let lock = Self { scroll_y };
        let Some(win) = web_sys::window() else {
            return lock;
        };
        let Some(doc) = win.document() else {
            return lock;
        };
        let page_width = win.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        let client_width = doc.document_element().map(|e| e.client_width() as f64).unwrap_or(page_width);
        if let Some(body) = doc.body() {
            let style = body.style();
            for (prop, value) in lock_styles(scroll_y, page_width - client_width) {
                let _ = style.set_property(prop, &value);
            }
        }
        lock
    }

    /// Unlock and jump back to where the page was, without the smooth-scroll
    /// animation the stylesheet normally applies.
    pub fn release(self, behavior_restore_ms: u32) {
        let Some(win) = web_sys::window() else {
            return;
        };
        let Some(doc) = win.document() else {
            return;
        };
        let Ok(html) = document_root(&doc) else {
            return;
        };
        let html_style = html.dyn_ref::<HtmlElement>().map(|h| h.style());
        let previous = html_style
            .as_ref()
            .and_then(|s| s.get_property_value("scroll-behavior").ok())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| "smooth".to_string());
        if let Some(s) = &html_style {
            let _ = s.set_property("scroll-behavior", "auto");
        }
        if let Some(body) = doc.body() {
            let style = body.style();
            for prop in BODY_PROPS {
                let _ = style.remove_property(prop);
            }
        }
        win.scroll_to_with_x_and_y(0.0, self.scroll_y);
        if let Some(s) = html_style {
            defer(behavior_restore_ms, move || {
                let _ = s.set_property("scroll-behavior", &previous);
            });
        }
    }
}
