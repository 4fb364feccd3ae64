use leptos::prelude::*;
use nearby_core::Filters;

use crate::components::{NotificationBar, RestaurantList};

/// Landing page: restaurants around the selected location.
#[component]
pub fn Home() -> impl IntoView {
    view! {
        <section class="home">
            <NotificationBar />
            <h2>"Restaurants near you"</h2>
            <RestaurantList filters=Signal::derive(Filters::new) />
        </section>
    }
}
