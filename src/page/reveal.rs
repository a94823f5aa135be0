//! Scroll-triggered reveals. The motion itself lives in the stylesheet; this
//! module only decides *when* (`IntersectionObserver`) and with what
//! `transition-delay` the `is-revealed` class lands.

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Document, Element, HtmlElement, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use crate::error::PageError;
use crate::util::{document_root, query_all_html, query_html, set_class};

pub const REVEALED_CLASS: &str = "is-revealed";
const SLIDE_STAGGER_SECS: f64 = 0.12;

/// Root margin that fires once an element's top crosses `percent` of the viewport height.
pub fn trigger_margin(percent: u32) -> String {
    format!("0px 0px -{}% 0px", 100u32.saturating_sub(percent.min(100)))
}

pub fn stagger_delay(index: usize, base_secs: f64, step_secs: f64) -> f64 {
    base_secs + step_secs * index as f64
}

/// Write a growing `transition-delay` onto each element.
pub fn stagger(elements: &[HtmlElement], base_secs: f64, step_secs: f64) {
    for (i, el) in elements.iter().enumerate() {
        let delay = stagger_delay(i, base_secs, step_secs);
        let _ = el.style().set_property("transition-delay", &format!("{delay:.3}s"));
    }
}

/// Observe `targets`; the first time one intersects, `on_enter` runs for it and
/// it is no longer watched.
fn observe_once(
    targets: &[Element],
    margin: &str,
    on_enter: impl Fn(&Element) + 'static,
) -> Result<(), PageError> {
    let cb = Closure::wrap(Box::new(move |entries: js_sys::Array, observer: IntersectionObserver| {
        for entry in entries.iter() {
            let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                continue;
            };
            if entry.is_intersecting() {
                let target = entry.target();
                on_enter(&target);
                observer.unobserve(&target);
            }
        }
    }) as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>);

    let init = IntersectionObserverInit::new();
    init.set_root_margin(margin);
    let observer = IntersectionObserver::new_with_options(cb.as_ref().unchecked_ref(), &init)?;
    for t in targets {
        observer.observe(t);
    }
    cb.forget();
    Ok(())
}

pub fn mount(doc: &Document) -> Result<(), PageError> {
    let root = document_root(doc)?;

    // Carousel slides reveal together, keyed off the section that holds them.
    let slides = query_all_html(&root, ".carousel-slide.scroll-animate");
    if !slides.is_empty() {
        if let Ok(section) = query_html(&root, ".selected-work") {
            observe_once(&[section.into()], &trigger_margin(80), move |_| {
                stagger(&slides, 0.0, SLIDE_STAGGER_SECS);
                for s in &slides {
                    set_class(s, REVEALED_CLASS, true);
                }
            })?;
        }
    }

    let singles: Vec<Element> = query_all_html(&root, ".scroll-animate:not(.carousel-slide), .scroll-animate-fade")
        .into_iter()
        .map(Element::from)
        .collect();
    if !singles.is_empty() {
        observe_once(&singles, &trigger_margin(85), |el| set_class(el, REVEALED_CLASS, true))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn margins_match_trigger_lines() {
        assert_eq!(trigger_margin(80), "0px 0px -20% 0px");
        assert_eq!(trigger_margin(85), "0px 0px -15% 0px");
        assert_eq!(trigger_margin(150), "0px 0px -0% 0px");
    }

    #[test]
    fn stagger_grows_linearly() {
        assert!((stagger_delay(0, 0.0, 0.12) - 0.0).abs() < 1e-9);
        assert!((stagger_delay(4, 0.0, 0.12) - 0.48).abs() < 1e-9);
        assert!((stagger_delay(2, 1.0, 0.02) - 1.04).abs() < 1e-9);
    }
}
