//! Skill icon tiles: hover dims the orbit behind them on desktop, taps expand
//! one tile at a time on touch tablets. Phones show every tile expanded and
//! get no behaviour here.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement};

use crate::config::Timings;
use crate::error::PageError;
use crate::state::{Backdrop, TileDeck};
use crate::util::{document_root, next_frame, query_all_html, query_html, set_class, viewport_width};

const ACTIVE_CLASS: &str = "active";

fn paint_backdrop(backdrop: &HtmlElement, state: Backdrop) {
    let (opacity, blur, background) = match state {
        Backdrop::Shown => ("1", "blur(15px)", "rgba(0, 0, 0, 0.3)"),
        Backdrop::Hidden => ("0", "blur(0px)", "rgba(0, 0, 0, 0)"),
    };
    let style = backdrop.style();
    let _ = style.set_property("opacity", opacity);
    let _ = style.set_property("backdrop-filter", blur);
    let _ = style.set_property("background", background);
}

fn is_touch_device() -> bool {
    let Some(win) = web_sys::window() else {
        return false;
    };
    let has_ontouch = js_sys::Reflect::has(&win, &JsValue::from_str("ontouchstart")).unwrap_or(false);
    has_ontouch || win.navigator().max_touch_points() > 0
}

struct Tiles {
    tiles: Vec<HtmlElement>,
    backdrop: Option<HtmlElement>,
    deck: RefCell<TileDeck>,
    timings: Timings,
}

impl Tiles {
    fn is_mobile(&self) -> bool {
        self.timings.is_mobile_width(viewport_width())
    }

    fn apply(&self, state: Backdrop) {
        let deck = self.deck.borrow();
        for (i, tile) in self.tiles.iter().enumerate() {
            set_class(tile, ACTIVE_CLASS, deck.is_active(i));
        }
        if let Some(b) = self.backdrop.clone() {
            next_frame(move || paint_backdrop(&b, state));
        }
    }
}

pub fn mount(doc: &Document, timings: Timings) -> Result<(), PageError> {
    let root = document_root(doc)?;
    let tiles = query_all_html(&root, ".icon-tile");
    if tiles.is_empty() {
        return Err(PageError::MissingElement(".icon-tile"));
    }
    let backdrop = query_html(&root, ".skill-orbit-backdrop").ok();
    let touch = is_touch_device();
    let shared = Rc::new(Tiles {
        tiles: tiles.clone(),
        backdrop,
        deck: RefCell::new(TileDeck::default()),
        timings,
    });

    for (i, tile) in tiles.iter().enumerate() {
        if touch {
            let s = shared.clone();
            let tap_cb = Closure::wrap(Box::new(move |e: web_sys::MouseEvent| {
                if s.is_mobile() {
                    return;
                }
                let state = s.deck.borrow_mut().toggle(i);
                s.apply(state);
                e.stop_propagation();
            }) as Box<dyn FnMut(_)>);
            tile.add_event_listener_with_callback("click", tap_cb.as_ref().unchecked_ref())?;
            tap_cb.forget();
            continue;
        }
        for (kind, state) in [("mouseenter", Backdrop::Shown), ("mouseleave", Backdrop::Hidden)] {
            let s = shared.clone();
            let hover_cb = Closure::wrap(Box::new(move |_e: web_sys::MouseEvent| {
                if s.is_mobile() {
                    return;
                }
                if let Some(b) = &s.backdrop {
                    paint_backdrop(b, state);
                }
            }) as Box<dyn FnMut(_)>);
            tile.add_event_listener_with_callback(kind, hover_cb.as_ref().unchecked_ref())?;
            hover_cb.forget();
        }
    }

    if touch {
        let s = shared.clone();
        let outside_cb = Closure::wrap(Box::new(move |e: web_sys::MouseEvent| {
            if s.is_mobile() {
                return;
            }
            let inside = e
                .target()
                .and_then(|t| t.dyn_into::<Element>().ok())
                .and_then(|el| el.closest(".icon-tile").ok().flatten())
                .is_some();
            if !inside {
                let state = s.deck.borrow_mut().dismiss();
                s.apply(state);
            }
        }) as Box<dyn FnMut(_)>);
        doc.add_event_listener_with_callback("click", outside_cb.as_ref().unchecked_ref())?;
        outside_cb.forget();
    }
    Ok(())
}
