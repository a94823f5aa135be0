mod components;
mod config;
mod error;
mod model;
mod page;
mod state;
mod util;

use components::App;
use components::app::AppProps;
use config::Timings;
use web_sys::Element;

const OVERLAY_ROOT_ID: &str = "interactions-root";

/// Host element for the yew overlays; created at the end of `<body>` if the
/// page does not provide one.
fn overlay_root() -> Option<Element> {
    let document = web_sys::window()?.document()?;
    if let Some(el) = document.get_element_by_id(OVERLAY_ROOT_ID) {
        return Some(el);
    }
    let el = document.create_element("div").ok()?;
    el.set_id(OVERLAY_ROOT_ID);
    document.body()?.append_child(&el).ok()?;
    Some(el)
}

fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    let timings = Timings::for_page();
    page::enhance(timings);

    match overlay_root() {
        Some(root) => {
            yew::Renderer::<App>::with_root_and_props(root, AppProps { timings }).render();
        }
        None => util::cwarn("overlays: no document body to mount into"),
    }
}
