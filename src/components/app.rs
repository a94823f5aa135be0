use super::{cookie_banner::CookieBanner, dev_popup::DevPopup, project_modal::ProjectModal};
use crate::config::Timings;
use crate::model::{Catalog, LiveSiteAction, PROJECTS_JSON};
use crate::page::scroll_lock::ScrollLock;
use crate::state::{ModalAction, ModalState};
use crate::util::{clog, cwarn, defer};
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Element, HtmlElement};
use yew::prelude::*;

/// Which carousel button was clicked, and on which project.
#[derive(Clone, Debug, PartialEq, Eq)]
enum SlideButton {
    OpenProject(String),
    LiveSite(String),
}

fn slide_button(target: &Element) -> Option<SlideButton> {
    let button = target.closest(".slide-btn").ok()??;
    let project = button.closest(".carousel-slide").ok()??.get_attribute("data-project")?;
    let cls = button.class_list();
    if cls.contains("primary") {
        Some(SlideButton::OpenProject(project))
    } else if cls.contains("secondary") {
        Some(SlideButton::LiveSite(project))
    } else {
        None
    }
}

fn open_in_new_tab(url: &str) {
    if let Some(win) = web_sys::window() {
        let _ = win.open_with_url_and_target_and_features(url, "_blank", "noopener,noreferrer");
    }
}

#[derive(Properties, PartialEq, Clone)]
pub struct AppProps {
    pub timings: Timings,
}

/// Overlays for the portfolio page: the project case-study modal, the
/// dev-site popup and the cookie banner. Carousel buttons live in the static
/// markup, so their clicks are picked up by delegation on the document.
#[function_component(App)]
pub fn app(props: &AppProps) -> Html {
    let timings = props.timings;
    let catalog = use_memo((), |_| match Catalog::from_json(PROJECTS_JSON) {
        Ok(c) => c,
        Err(e) => {
            cwarn(&format!("project catalog unreadable: {e}"));
            Catalog::default()
        }
    });
    let modal = use_reducer(ModalState::default);
    let modal_ref = use_mut_ref(|| ModalState::default()); // latest state for document listeners
    let scroll_lock = use_mut_ref(|| None::<ScrollLock>);
    let panel_ref = use_node_ref();
    let content_ref = use_node_ref();
    let dev_popup = use_state(|| false);
    let dev_popup_gen = use_mut_ref(|| 0u32);

    *modal_ref.borrow_mut() = (*modal).clone();

    let close = {
        let modal = modal.clone();
        let modal_ref = modal_ref.clone();
        let delay = timings.modal_close_ms;
        Callback::from(move |_: ()| {
            if !modal_ref.borrow().is_open() {
                return;
            }
            let epoch = modal_ref.borrow().epoch;
            modal.dispatch(ModalAction::BeginClose);
            let modal = modal.clone();
            defer(delay, move || modal.dispatch(ModalAction::FinishClose { epoch }));
        })
    };

    let show_dev_popup = {
        let dev_popup = dev_popup.clone();
        let dev_popup_gen = dev_popup_gen.clone();
        let ms = timings.dev_popup_ms;
        Callback::from(move |_: ()| {
            let token = {
                let mut g = dev_popup_gen.borrow_mut();
                *g = g.wrapping_add(1);
                *g
            };
            dev_popup.set(true);
            let dev_popup = dev_popup.clone();
            let dev_popup_gen = dev_popup_gen.clone();
            defer(ms, move || {
                if *dev_popup_gen.borrow() == token {
                    dev_popup.set(false);
                }
            });
        })
    };

    // Lock the page behind the overlay while it is up; give the scroll back
    // once the fade-out has finished.
    {
        let scroll_lock = scroll_lock.clone();
        let panel_ref = panel_ref.clone();
        let content_ref = content_ref.clone();
        let restore_ms = timings.scroll_behavior_restore_ms;
        let phase = modal.phase.clone();
        let scroll_y = modal.scroll_y;
        use_effect_with(phase, move |phase| {
            use crate::state::ModalPhase::*;
            match phase {
                Open { .. } => {
                    if scroll_lock.borrow().is_none() {
                        *scroll_lock.borrow_mut() = Some(ScrollLock::engage(scroll_y));
                    }
                    for scroller in [&panel_ref, &content_ref] {
                        if let Some(el) = scroller.cast::<HtmlElement>() {
                            el.set_scroll_top(0);
                        }
                    }
                }
                Closed => {
                    if let Some(lock) = scroll_lock.borrow_mut().take() {
                        lock.release(restore_ms);
                    }
                }
                Closing { .. } => {}
            }
            || ()
        });
    }

    // Delegated clicks on carousel buttons + ESC to close
    {
        let modal = modal.clone();
        let catalog = catalog.clone();
        let close = close.clone();
        let show_dev_popup = show_dev_popup.clone();
        let modal_ref = modal_ref.clone();
        use_effect_with((), move |_| {
            let document = web_sys::window().and_then(|w| w.document());
            let click_cb = {
                let catalog: Rc<Catalog> = catalog.clone();
                Closure::wrap(Box::new(move |e: web_sys::MouseEvent| {
                    let Some(target) = e.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
                        return;
                    };
                    let Some(button) = slide_button(&target) else {
                        return;
                    };
                    e.prevent_default();
                    match button {
                        SlideButton::OpenProject(id) => {
                            if catalog.get(&id).is_none() {
                                clog(&format!("no case study for {id:?}"));
                                return;
                            }
                            let scroll_y = web_sys::window().and_then(|w| w.scroll_y().ok()).unwrap_or(0.0);
                            modal.dispatch(ModalAction::Open { project: id, scroll_y });
                        }
                        SlideButton::LiveSite(id) => match catalog.get(&id).map(|p| p.live_site_action()) {
                            Some(LiveSiteAction::OpenUrl(url)) => open_in_new_tab(&url),
                            Some(LiveSiteAction::ShowInDevelopment) => show_dev_popup.emit(()),
                            _ => {}
                        },
                    }
                }) as Box<dyn FnMut(_)>)
            };
            let keydown_cb = {
                Closure::wrap(Box::new(move |e: web_sys::KeyboardEvent| {
                    if e.key() == "Escape" && modal_ref.borrow().is_open() {
                        close.emit(());
                    }
                }) as Box<dyn FnMut(_)>)
            };
            if let Some(doc) = &document {
                let _ = doc.add_event_listener_with_callback("click", click_cb.as_ref().unchecked_ref());
                let _ = doc.add_event_listener_with_callback("keydown", keydown_cb.as_ref().unchecked_ref());
            }
            // Cleanup
            move || {
                if let Some(doc) = document {
                    let _ = doc.remove_event_listener_with_callback("click", click_cb.as_ref().unchecked_ref());
                    let _ = doc.remove_event_listener_with_callback("keydown", keydown_cb.as_ref().unchecked_ref());
                }
            }
        });
    }

    let project = modal.project().and_then(|id| catalog.get(id)).cloned();

    html! {
        <>
            <ProjectModal project={project} open={modal.is_open()} panel_ref={panel_ref} content_ref={content_ref} on_close={close} />
            <DevPopup show={*dev_popup} />
            <CookieBanner delay_ms={timings.consent_banner_ms} />
        </>
    }
}

