use leptos::prelude::*;

use crate::api_client::ApiClient;
use crate::components::{Home, Layout, LocationPicker};
use crate::config::load_api_config;
use crate::models::AppState;

/// Root application component that provides global context and mounts the page.
#[component]
pub fn App() -> impl IntoView {
    // Shared location/notification state, dropped with the app
    let state = AppState::new();
    provide_context(state);
    provide_context(ApiClient::new(load_api_config()));

    let (show_side_bar, set_show_side_bar) = signal(false);

    view! {
        <main class="app">
            <Layout set_show_side_bar=set_show_side_bar>
                <Home />
                <Show when=move || show_side_bar.get()>
                    <LocationPicker set_show_side_bar=set_show_side_bar />
                </Show>
            </Layout>
        </main>
    }
}
