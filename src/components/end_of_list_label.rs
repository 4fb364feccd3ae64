use leptos::prelude::*;

const DEFAULT_LABEL: &str = "That's all the restaurants around you";

/// Centered message closing the list, also used for the "pick a location" prompt.
#[component]
pub fn EndOfListLabel(#[prop(optional, into)] label: Option<String>) -> impl IntoView {
    let text = label.unwrap_or_else(|| DEFAULT_LABEL.to_string());

    view! { <div class="end-of-list-label">{text}</div> }
}
