// Console logging, timers and DOM lookups shared by the page glue and components.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement};

use crate::error::PageError;

pub fn clog(msg: &str) {
    web_sys::console::log_1(&JsValue::from_str(msg));
}

pub fn cwarn(msg: &str) {
    web_sys::console::warn_1(&JsValue::from_str(msg));
}

/// Run `f` once after `ms` milliseconds. Fire-and-forget.
pub fn defer(ms: u32, f: impl FnOnce() + 'static) {
    let Some(win) = web_sys::window() else {
        return;
    };
    let cb = Closure::once_into_js(f);
    let _ = win.set_timeout_with_callback_and_timeout_and_arguments_0(
        cb.unchecked_ref(),
        ms.min(i32::MAX as u32) as i32,
    );
}

/// Run `f` on the next animation frame.
pub fn next_frame(f: impl FnOnce() + 'static) {
    let Some(win) = web_sys::window() else {
        return;
    };
    let cb = Closure::once_into_js(f);
    let _ = win.request_animation_frame(cb.unchecked_ref());
}

pub fn document() -> Result<Document, PageError> {
    web_sys::window()
        .and_then(|w| w.document())
        .ok_or(PageError::MissingElement("document"))
}

/// First element matching `selector` under `root`, as an `HtmlElement`.
pub fn query_html(root: &Element, selector: &'static str) -> Result<HtmlElement, PageError> {
    root.query_selector(selector)?
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        .ok_or(PageError::MissingElement(selector))
}

/// Every `HtmlElement` matching `selector` under `root`, in document order.
pub fn query_all_html(root: &Element, selector: &str) -> Vec<HtmlElement> {
    let Ok(list) = root.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|n| n.dyn_into::<HtmlElement>().ok())
        .collect()
}

pub fn document_root(doc: &Document) -> Result<Element, PageError> {
    doc.document_element().ok_or(PageError::MissingElement("html"))
}

pub fn viewport_width() -> f64 {
    web_sys::window()
        .and_then(|w| w.inner_width().ok())
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0)
}

pub fn set_class(el: &Element, class: &str, on: bool) {
    let _ = el.class_list().toggle_with_force(class, on);
}
