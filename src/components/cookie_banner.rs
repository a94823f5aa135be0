use crate::model::ConsentChoice;
use crate::util::{clog, defer};
use wasm_bindgen::{JsCast, JsValue};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct CookieBannerProps {
    /// Delay before the banner slides in for visitors without a stored choice.
    pub delay_ms: u32,
}

fn already_decided() -> bool {
    web_sys::window()
        .and_then(|w| w.local_storage().ok().flatten())
        .is_some_and(|store| ConsentChoice::decided(&store))
}

fn persist(choice: ConsentChoice) {
    if let Some(win) = web_sys::window() {
        if let Ok(Some(store)) = win.local_storage() {
            choice.save(&store);
        }
    }
}

/// Call `window[name](...args)` if the page defined such a function.
fn call_global(name: &str, args: &[JsValue]) {
    let Some(win) = web_sys::window() else {
        return;
    };
    let Ok(f) = js_sys::Reflect::get(&win, &JsValue::from_str(name)) else {
        return;
    };
    let Some(f) = f.dyn_ref::<js_sys::Function>() else {
        return;
    };
    let _ = f.apply(&JsValue::NULL, &args.iter().collect::<js_sys::Array>());
}

fn start_analytics() {
    call_global("loadGoogleAnalytics", &[]);
    let params = js_sys::Object::new();
    let _ = js_sys::Reflect::set(&params, &"consent_action".into(), &"accepted".into());
    call_global("gtag", &["event".into(), "cookie_consent".into(), params.into()]);
}

#[function_component]
pub fn CookieBanner(props: &CookieBannerProps) -> Html {
    let show = use_state(|| false);

    {
        let show = show.clone();
        let delay = props.delay_ms;
        use_effect_with((), move |_| {
            if !already_decided() {
                defer(delay, move || show.set(true));
            }
            || ()
        });
    }

    let choose = |choice: ConsentChoice| {
        let show = show.clone();
        Callback::from(move |_: MouseEvent| {
            persist(choice);
            show.set(false);
            match choice {
                ConsentChoice::Accepted => start_analytics(),
                ConsentChoice::Declined => clog("cookie consent declined"),
            }
        })
    };

    html! {
        <div id="cookieBanner" class={classes!("cookie-banner", (*show).then_some("show"))}>
            <p class="cookie-text">
                {"This site uses cookies for anonymous analytics. You can accept or decline."}
            </p>
            <div class="cookie-actions">
                <button id="cookieDecline" class="cookie-btn decline" onclick={choose(ConsentChoice::Declined)}>{"Decline"}</button>
                <button id="cookieAccept" class="cookie-btn accept" onclick={choose(ConsentChoice::Accepted)}>{"Accept"}</button>
            </div>
        </div>
    }
}
