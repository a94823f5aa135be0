//! Page-load sequence: fade the loader out, stagger the hero copy in, then
//! show the floating glass pills.

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Document, HtmlElement};

use crate::config::Timings;
use crate::error::PageError;
use crate::page::letters::split_words_and_chars;
use crate::page::reveal::{REVEALED_CLASS, stagger};
use crate::util::{defer, document_root, query_all_html, query_html, set_class};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoaderStep {
    RevealPage,
    RemoveLoader,
    StartHero,
    ShowPills,
}

/// Steps in firing order with their delays from the load event.
pub fn schedule(t: &Timings) -> Vec<(u32, LoaderStep)> {
    let mut steps = vec![
        (t.loader_reveal_ms, LoaderStep::RevealPage),
        (t.loader_remove_ms, LoaderStep::RemoveLoader),
        (t.hero_start_ms, LoaderStep::StartHero),
        (t.pills_ms, LoaderStep::ShowPills),
    ];
    steps.sort_by_key(|(ms, _)| *ms);
    steps
}

/// Start offsets (seconds) of the three hero groups.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeroTimeline {
    pub title_start: f64,
    pub body_start: f64,
    pub cta_start: f64,
}

pub const TITLE_CHAR_SECS: f64 = 0.6;
pub const TITLE_STAGGER_SECS: f64 = 0.03;
pub const BODY_WORD_SECS: f64 = 0.5;
pub const BODY_STAGGER_SECS: f64 = 0.02;
const GROUP_GAP_SECS: f64 = 0.1;

fn group_end(start: f64, count: usize, each: f64, stagger: f64) -> f64 {
    if count == 0 {
        return start;
    }
    start + stagger * (count - 1) as f64 + each
}

pub fn hero_timeline(title_chars: usize, body_words: usize) -> HeroTimeline {
    let title_end = group_end(0.0, title_chars, TITLE_CHAR_SECS, TITLE_STAGGER_SECS);
    let body_start = title_end + GROUP_GAP_SECS;
    let body_end = group_end(body_start, body_words, BODY_WORD_SECS, BODY_STAGGER_SECS);
    HeroTimeline {
        title_start: 0.0,
        body_start,
        cta_start: body_end + GROUP_GAP_SECS,
    }
}

fn start_hero(root: &web_sys::Element) {
    let (Ok(title), Ok(_body), Ok(cta)) = (
        query_html(root, ".hero-title"),
        query_html(root, ".hero-body"),
        query_html(root, ".hero-cta"),
    ) else {
        return;
    };
    let chars = query_all_html(&title, ".char");
    let words = query_all_html(root, ".hero-body .word");
    let tl = hero_timeline(chars.len(), words.len());

    stagger(&chars, tl.title_start, TITLE_STAGGER_SECS);
    stagger(&words, tl.body_start, BODY_STAGGER_SECS);
    stagger(std::slice::from_ref(&cta), tl.cta_start, 0.0);
    for el in chars.iter().chain(words.iter()).chain(std::iter::once(&cta)) {
        set_class(el, REVEALED_CLASS, true);
    }
}

/// Break the hero title and body into `.word`/`.char` spans for the stagger.
fn split_hero(doc: &Document, root: &web_sys::Element) -> Result<(), PageError> {
    for sel in [".hero-title", ".hero-body"] {
        if let Ok(host) = query_html(root, sel) {
            split_words_and_chars(doc, &host)?;
        }
    }
    Ok(())
}

fn run_sequence(doc: &Document, timings: Timings) -> Result<(), PageError> {
    let root = document_root(doc)?;
    split_hero(doc, &root)?;
    let body = doc.body().ok_or(PageError::MissingElement("body"))?;
    let loader = query_html(&root, ".page-loader").ok();
    set_class(&body, "loading", true);

    for (ms, step) in schedule(&timings) {
        let root = root.clone();
        let body = body.clone();
        let loader: Option<HtmlElement> = loader.clone();
        defer(ms, move || match step {
            LoaderStep::RevealPage => {
                if let Some(l) = &loader {
                    set_class(l, "loaded", true);
                }
                set_class(&body, "loading", false);
            }
            LoaderStep::RemoveLoader => {
                if let Some(l) = &loader {
                    let _ = l.style().set_property("display", "none");
                }
            }
            LoaderStep::StartHero => start_hero(&root),
            LoaderStep::ShowPills => {
                for pill in query_all_html(&root, ".liquid-glass-pill") {
                    set_class(&pill, "visible", true);
                }
            }
        });
    }
    Ok(())
}

/// Run the sequence on window `load`, or right away if it already fired.
pub fn mount(doc: &Document, timings: Timings) -> Result<(), PageError> {
    if doc.ready_state() == "complete" {
        return run_sequence(doc, timings);
    }
    let window = web_sys::window().ok_or(PageError::MissingElement("window"))?;
    let doc = doc.clone();
    let load_cb = Closure::once_into_js(move || {
        if let Err(e) = run_sequence(&doc, timings) {
            crate::util::cwarn(&format!("loader: {e}"));
        }
    });
    window.add_event_listener_with_callback("load", load_cb.unchecked_ref())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schedule_is_ordered() {
        let steps = schedule(&Timings::default());
        let delays: Vec<u32> = steps.iter().map(|(ms, _)| *ms).collect();
        assert_eq!(delays, vec![300, 1100, 1100, 1200]);
        assert_eq!(steps[0].1, LoaderStep::RevealPage);
        assert_eq!(steps[3].1, LoaderStep::ShowPills);
    }

    #[test]
    fn hero_groups_follow_each_other() {
        let tl = hero_timeline(10, 20);
        // title: 9 * 0.03 + 0.6 = 0.87, body starts 0.1 later
        assert!((tl.body_start - 0.97).abs() < 1e-9);
        // body: 19 * 0.02 + 0.5 = 0.88
        assert!((tl.cta_start - (0.97 + 0.88 + 0.1)).abs() < 1e-9);
    }

    #[test]
    fn empty_groups_collapse() {
        let tl = hero_timeline(0, 0);
        assert!((tl.body_start - 0.1).abs() < 1e-9);
        assert!((tl.cta_start - 0.2).abs() < 1e-9);
    }
}
