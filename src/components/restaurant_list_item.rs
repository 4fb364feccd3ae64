use leptos::prelude::*;
use nearby_core::Restaurant;

/// Card for a single restaurant.
///
/// The slot reserves ~150px and uses `content-visibility: auto`, so the
/// browser skips rendering cards that are off screen.
#[component]
pub fn RestaurantListItem(restaurant: Restaurant) -> impl IntoView {
    let name = restaurant.display_name().to_string();
    let locality = restaurant
        .location
        .as_ref()
        .and_then(|l| l.locality.clone().or_else(|| l.address.clone()));
    let cuisines = restaurant.cuisines.clone();
    let rating = restaurant.rating_label();
    let cost = restaurant.cost_label();
    let thumb = restaurant.thumb.clone().filter(|t| !t.is_empty());

    view! {
        <div class="restaurant-list-item-slot">
            <article class="restaurant-card">
                {thumb.map(|src| view! { <img src=src alt="" loading="lazy" /> })}
                <div class="details">
                    <h3>{name}</h3>
                    {locality.map(|l| view! { <div class="meta">{l}</div> })}
                    {cuisines.map(|c| view! { <div class="meta">{c}</div> })}
                    {rating.map(|r| view! { <div class="rating">{r}</div> })}
                    {cost.map(|c| view! { <div class="meta">{c}</div> })}
                </div>
            </article>
        </div>
    }
}
