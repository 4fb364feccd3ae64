use leptos::prelude::*;
use leptos::task::spawn_local;
use nearby_core::{fetch_page, FetchOutcome, Filters, ListFooter, ListView, RestaurantListState};

use crate::api_client::ApiClient;
use crate::components::{EndOfListLabel, Loader, RestaurantListItem};
use crate::models::AppState;
use crate::scroll_listener::use_scrolled_to_end;

const CHOOSE_LOCATION_PROMPT: &str = "Please choose a location to find all restaurants";

/// Infinitely scrolling list of restaurants near the selected location.
#[component]
pub fn RestaurantList(#[prop(into)] filters: Signal<Filters>) -> impl IntoView {
    let state = use_context::<AppState>().expect("AppState context missing");
    let client = use_context::<ApiClient>().expect("ApiClient context missing");

    let list = RwSignal::new(RestaurantListState::new(client.settings()));

    // New location or filters: restart pagination and load the first page
    Effect::new({
        let client = client.clone();
        move |_| {
            let location = state.user_location.get();
            let filters = filters.get();
            let changed = apply(list, |l| {
                let filters_changed = l.set_filters(filters);
                let location_changed = l.set_location(location);
                filters_changed || location_changed
            });

            if changed {
                request_page(list, client.clone(), state);
            }
        }
    });

    use_scrolled_to_end({
        let client = client.clone();
        move || {
            if apply(list, RestaurantListState::on_scroll_end) {
                request_page(list, client.clone(), state);
            }
        }
    });

    // Copy handle so the retry button can be rebuilt with the footer
    let retry_client = StoredValue::new(client);
    let on_retry = move |_| {
        if apply(list, RestaurantListState::retry) {
            request_page(list, retry_client.get_value(), state);
        }
    };

    // Items only change on append (length) or restart (generation)
    let item_version = Memo::new(move |_| list.with(|l| (l.generation(), l.items().len())));
    let prompting =
        Memo::new(move |_| list.with(|l| matches!(l.view(), ListView::PromptForLocation)));
    let footer = Memo::new(move |_| list.with(|l| l.view().footer()));

    view! {
        <Show
            when=move || !prompting.get()
            fallback=|| view! { <EndOfListLabel label=CHOOSE_LOCATION_PROMPT /> }
        >
            <div class="restaurant-list-container">
                <For
                    each=move || {
                        item_version.track();
                        list.with_untracked(|l| {
                            l.items().iter().cloned().enumerate().collect::<Vec<_>>()
                        })
                    }
                    key=|(position, restaurant)| (*position, restaurant.id.clone())
                    children=move |(_, restaurant)| {
                        view! { <RestaurantListItem restaurant=restaurant /> }
                    }
                />
            </div>
            <div>
                {move || match footer.get() {
                    Some(ListFooter::EndOfList) => view! { <EndOfListLabel /> }.into_any(),
                    Some(ListFooter::Retry) => {
                        view! {
                            <div class="list-retry">
                                <button type="button" on:click=on_retry>
                                    "Couldn't load restaurants. Try again"
                                </button>
                            </div>
                        }
                            .into_any()
                    }
                    _ => view! { <Loader /> }.into_any(),
                }}
            </div>
        </Show>
    }
}

/// Run a transition and notify subscribers only if it reported a change.
fn apply(
    list: RwSignal<RestaurantListState>,
    transition: impl FnOnce(&mut RestaurantListState) -> bool,
) -> bool {
    list.try_maybe_update(|l| {
        let changed = transition(l);
        (changed, changed)
    })
    .unwrap_or(false)
}

/// Issue the queued page request, if any, and fold the response back in.
fn request_page(list: RwSignal<RestaurantListState>, client: ApiClient, state: AppState) {
    let Some(request) = list
        .try_maybe_update(|l| {
            let request = l.begin_fetch();
            (request.is_some(), request)
        })
        .flatten()
    else {
        return;
    };

    spawn_local(async move {
        let result = fetch_page(&client, &request).await;
        let outcome = list.try_maybe_update(|l| {
            let outcome = l.complete_fetch(&request, result);
            (outcome != FetchOutcome::Stale, outcome)
        });

        match outcome {
            Some(FetchOutcome::Failed(err)) => {
                state.show_notification(format!("Could not load restaurants: {err}"));
            }
            Some(FetchOutcome::Stale) => {
                tracing::debug!("Dropped response for a previous location");
            }
            None => tracing::debug!("Restaurant list disposed before response arrived"),
            Some(_) => {}
        }
    });
}
