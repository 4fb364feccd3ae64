use leptos::prelude::*;

use crate::models::AppState;

/// Page chrome: header with the location button, routed content below.
#[component]
pub fn Layout(set_show_side_bar: WriteSignal<bool>, children: Children) -> impl IntoView {
    let state = use_context::<AppState>().expect("AppState context missing");

    view! {
        <header class="layout-header">
            <h1>"Nearby Restaurants"</h1>
            <button
                type="button"
                class="location-button"
                on:click=move |_| set_show_side_bar.set(true)
            >
                {move || state.location_label()}
            </button>
        </header>
        <div class="layout-content">{children()}</div>
    }
}
