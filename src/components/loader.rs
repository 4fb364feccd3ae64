use leptos::prelude::*;

/// Spinner shown under the list while more restaurants may arrive.
#[component]
pub fn Loader() -> impl IntoView {
    view! { <div class="loader" role="status" aria-label="Loading restaurants"></div> }
}
