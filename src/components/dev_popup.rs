use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct DevPopupProps {
    pub show: bool,
}

/// "Still in development" notice for projects without a public site yet.
#[function_component]
pub fn DevPopup(props: &DevPopupProps) -> Html {
    html! {
        <div id="devPopup" class={classes!("dev-popup", props.show.then_some("active"))} role="status">
            <p>{"This site is still in development. Check back soon!"}</p>
        </div>
    }
}
