//! Binds the pure [`Carousel`] engine to the `.carousel-viewport` markup.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{AddEventListenerOptions, Document, HtmlElement, MouseEvent, TouchEvent};

use crate::config::CarouselConfig;
use crate::error::PageError;
use crate::state::{Carousel, PointerSample, Scheduled};
use crate::util::{clog, cwarn, defer, document_root, query_all_html, query_html, set_class};

const DRAGGING_CLASS: &str = "dragging";
const NO_TRANSITION_CLASS: &str = "no-transition";

/// Track's left edge relative to the viewport at offset 0. Valid whenever the
/// track sits exactly at the engine offset: at rest, or mid-drag with
/// transitions off.
#[derive(Debug, Default)]
struct TrackOrigin(Cell<f64>);

impl TrackOrigin {
    fn calibrate(&self, track_left: f64, offset: f64) {
        self.0.set(track_left - offset);
    }

    fn offset_at(&self, track_left: f64) -> f64 {
        track_left - self.0.get()
    }
}

struct View {
    viewport: HtmlElement,
    track: HtmlElement,
    first_slide: HtmlElement,
    origin: TrackOrigin,
}

impl View {
    fn slide_width(&self) -> f64 {
        self.first_slide.offset_width() as f64
    }

    fn track_left(&self) -> f64 {
        self.track.get_bounding_client_rect().left() - self.viewport.get_bounding_client_rect().left()
    }

    /// Where the track is on screen right now, mid-transition included.
    fn live_offset(&self) -> f64 {
        self.origin.offset_at(self.track_left())
    }

    fn recalibrate(&self, offset: f64) {
        self.origin.calibrate(self.track_left(), offset);
    }

    fn render(&self, engine: &Carousel) {
        set_class(&self.viewport, DRAGGING_CLASS, engine.is_dragging());
        set_class(&self.track, NO_TRANSITION_CLASS, !engine.transition_enabled());
        let _ = self
            .track
            .style()
            .set_property("transform", &format!("translateX({}px)", engine.offset()));
    }
}

struct Binding {
    view: View,
    engine: RefCell<Carousel>,
}

impl Binding {
    fn schedule(self: &Rc<Self>, job: Option<Scheduled>) {
        let Some(job) = job else {
            return;
        };
        let this = Rc::clone(self);
        defer(job.delay_ms, move || {
            let mut engine = this.engine.borrow_mut();
            engine.run_deferred(job.task);
            this.view.render(&engine);
        });
    }

    fn start(&self, sample: PointerSample) {
        let mut engine = self.engine.borrow_mut();
        if engine.slide_width() <= 0.0 {
            engine.set_slide_width(self.view.slide_width());
        }
        let live = self.view.live_offset();
        if engine.gesture_start(sample, Some(live)) {
            self.view.render(&engine);
        }
    }

    /// Returns whether the event's default action should be cancelled.
    fn drag(&self, sample: PointerSample) -> bool {
        let mut engine = self.engine.borrow_mut();
        match engine.gesture_move(sample) {
            Some(step) => {
                self.view.render(&engine);
                step.suppress_default
            }
            None => false,
        }
    }

    fn end(self: &Rc<Self>) {
        let job = {
            let mut engine = self.engine.borrow_mut();
            let job = engine.gesture_end();
            if job.is_some() {
                self.view.render(&engine);
            }
            job
        };
        self.schedule(job);
    }

    fn resize(self: &Rc<Self>) {
        let job = {
            let mut engine = self.engine.borrow_mut();
            let job = engine.resize(self.view.slide_width());
            self.view.render(&engine);
            self.view.recalibrate(engine.offset());
            job
        };
        self.schedule(job);
    }
}

fn read_config(viewport: &HtmlElement) -> CarouselConfig {
    let Some(raw) = viewport.get_attribute("data-carousel-config") else {
        return CarouselConfig::default();
    };
    match CarouselConfig::parse(&raw) {
        Ok(parsed) => {
            let config = parsed.sanitized();
            if config != parsed {
                cwarn(&format!("carousel: out-of-range values in data-carousel-config replaced: {config:?}"));
            }
            config
        }
        Err(e) => {
            cwarn(&format!("carousel: ignoring data-carousel-config: {e}"));
            CarouselConfig::default()
        }
    }
}

/// Attach drag, click-guard and resize handling to the page's carousel.
/// The listeners live for the rest of the page.
pub fn mount(doc: &Document) -> Result<(), PageError> {
    let root = document_root(doc)?;
    let viewport = query_html(&root, ".carousel-viewport")?;
    let track = query_html(&viewport, ".carousel-track")?;
    let slides = query_all_html(&track, ".carousel-slide");
    let first_slide = slides
        .first()
        .cloned()
        .ok_or(PageError::MissingElement(".carousel-slide"))?;
    let window = web_sys::window().ok_or(PageError::MissingElement("window"))?;

    let config = read_config(&viewport);
    let view = View {
        viewport: viewport.clone(),
        track,
        first_slide,
        origin: TrackOrigin::default(),
    };
    let width = view.slide_width();
    if width <= 0.0 {
        cwarn(&format!("carousel: {}; will re-measure", PageError::DegenerateGeometry));
    }
    let engine = Carousel::new(slides.len(), width, config);
    view.render(&engine);
    view.recalibrate(engine.offset());
    let binding = Rc::new(Binding {
        view,
        engine: RefCell::new(engine),
    });

    // Press on the viewport
    let mousedown_cb = {
        let b = binding.clone();
        Closure::wrap(Box::new(move |e: MouseEvent| {
            b.start(PointerSample::from_mouse(&e));
        }) as Box<dyn FnMut(_)>)
    };
    viewport.add_event_listener_with_callback("mousedown", mousedown_cb.as_ref().unchecked_ref())?;

    let touchstart_cb = {
        let b = binding.clone();
        Closure::wrap(Box::new(move |e: TouchEvent| {
            if let Some(sample) = PointerSample::from_touch(&e) {
                b.start(sample);
            }
        }) as Box<dyn FnMut(_)>)
    };
    let passive = AddEventListenerOptions::new();
    passive.set_passive(true);
    viewport.add_event_listener_with_callback_and_add_event_listener_options(
        "touchstart",
        touchstart_cb.as_ref().unchecked_ref(),
        &passive,
    )?;

    // Move/release anywhere on the document
    let mousemove_cb = {
        let b = binding.clone();
        Closure::wrap(Box::new(move |e: MouseEvent| {
            if b.drag(PointerSample::from_mouse(&e)) {
                e.prevent_default();
            }
        }) as Box<dyn FnMut(_)>)
    };
    doc.add_event_listener_with_callback("mousemove", mousemove_cb.as_ref().unchecked_ref())?;

    let touchmove_cb = {
        let b = binding.clone();
        Closure::wrap(Box::new(move |e: TouchEvent| {
            if let Some(sample) = PointerSample::from_touch(&e) {
                if b.drag(sample) {
                    e.prevent_default();
                }
            }
        }) as Box<dyn FnMut(_)>)
    };
    let active = AddEventListenerOptions::new();
    active.set_passive(false);
    doc.add_event_listener_with_callback_and_add_event_listener_options(
        "touchmove",
        touchmove_cb.as_ref().unchecked_ref(),
        &active,
    )?;

    let release_cb = {
        let b = binding.clone();
        Closure::wrap(Box::new(move |_e: web_sys::Event| {
            b.end();
        }) as Box<dyn FnMut(_)>)
    };
    for kind in ["mouseup", "touchend", "touchcancel"] {
        doc.add_event_listener_with_callback(kind, release_cb.as_ref().unchecked_ref())?;
    }

    // Swallow the click that trails a drag before anything inside the slide sees it
    let click_guard_cb = {
        let b = binding.clone();
        Closure::wrap(Box::new(move |e: web_sys::Event| {
            if b.engine.borrow().should_suppress_click() {
                e.prevent_default();
                e.stop_immediate_propagation();
            }
        }) as Box<dyn FnMut(_)>)
    };
    for slide in &slides {
        slide.add_event_listener_with_callback_and_bool(
            "click",
            click_guard_cb.as_ref().unchecked_ref(),
            true,
        )?;
    }

    let resize_cb = {
        let b = binding.clone();
        Closure::wrap(Box::new(move |_e: web_sys::Event| {
            b.resize();
        }) as Box<dyn FnMut(_)>)
    };
    window.add_event_listener_with_callback("resize", resize_cb.as_ref().unchecked_ref())?;

    mousedown_cb.forget();
    touchstart_cb.forget();
    mousemove_cb.forget();
    touchmove_cb.forget();
    release_cb.forget();
    click_guard_cb.forget();
    resize_cb.forget();

    clog(&format!("carousel: {} slides bound", slides.len()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn origin_maps_track_edge_back_to_offset() {
        let origin = TrackOrigin::default();
        origin.calibrate(24.0, 0.0);
        assert!((origin.offset_at(24.0 - 320.0) - -320.0).abs() < EPS);
    }

    #[test]
    fn resize_mid_drag_keeps_next_gesture_under_the_finger() {
        let mut engine = Carousel::new(5, 300.0, CarouselConfig::default());
        let origin = TrackOrigin::default();
        let mut resting_left = 0.0;
        origin.calibrate(resting_left + engine.offset(), engine.offset());

        engine.gesture_start(PointerSample::new(500.0), Some(origin.offset_at(resting_left + engine.offset())));
        let _ = engine.gesture_move(PointerSample::new(400.0));

        // Viewport padding grows while the finger is down; the track is pinned to the offset.
        resting_left = 40.0;
        assert!(engine.resize(280.0).is_none());
        origin.calibrate(resting_left + engine.offset(), engine.offset());

        let _ = engine.gesture_end();
        let settled = engine.offset();
        let live = origin.offset_at(resting_left + settled);
        assert!((live - settled).abs() < EPS);

        engine.gesture_start(PointerSample::new(200.0), Some(live));
        let step = engine.gesture_move(PointerSample::new(190.0)).map(|m| m.offset);
        assert_eq!(step.map(|o| (o - (settled - 10.0)).abs() < EPS), Some(true));
    }
}
