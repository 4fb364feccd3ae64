use leptos::prelude::*;
use nearby_core::Location;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::models::AppState;

/// Side panel for choosing the search location.
#[component]
pub fn LocationPicker(set_show_side_bar: WriteSignal<bool>) -> impl IntoView {
    let state = use_context::<AppState>().expect("AppState context missing");

    let current = state.user_location.get_untracked();
    let latitude = RwSignal::new(current.map(|l| l.latitude.to_string()).unwrap_or_default());
    let longitude = RwSignal::new(current.map(|l| l.longitude.to_string()).unwrap_or_default());
    let error = RwSignal::new(None::<String>);
    let locating = RwSignal::new(false);

    let choose = move |location: Location| {
        state.set_user_location(Some(location));
        set_show_side_bar.set(false);
    };

    let on_apply = move |_| match Location::parse(&latitude.get(), &longitude.get()) {
        Ok(location) => {
            error.set(None);
            choose(location);
        }
        Err(e) => error.set(Some(e.to_string())),
    };

    let on_locate = move |_| {
        locating.set(true);
        error.set(None);
        request_current_position(
            move |location| {
                locating.set(false);
                choose(location);
            },
            move |message| {
                locating.set(false);
                error.set(Some(message));
            },
        );
    };

    view! {
        <aside class="location-picker">
            <h2>"Choose a location"</h2>
            <button type="button" on:click=on_locate prop:disabled=move || locating.get()>
                {move || if locating.get() { "Locating..." } else { "Use my current location" }}
            </button>
            <label>
                "Latitude"
                <input
                    type="text"
                    inputmode="decimal"
                    prop:value=move || latitude.get()
                    on:input=move |ev| latitude.set(event_target_value(&ev))
                />
            </label>
            <label>
                "Longitude"
                <input
                    type="text"
                    inputmode="decimal"
                    prop:value=move || longitude.get()
                    on:input=move |ev| longitude.set(event_target_value(&ev))
                />
            </label>
            <button type="button" on:click=on_apply>
                "Show restaurants here"
            </button>
            {move || error.get().map(|message| view! { <div class="error">{message}</div> })}
            <button type="button" class="close" on:click=move |_| set_show_side_bar.set(false)>
                "Close"
            </button>
        </aside>
    }
}

/// Ask the browser Geolocation API for the current position.
fn request_current_position(
    on_found: impl FnOnce(Location) + 'static,
    on_error: impl FnOnce(String) + 'static,
) {
    let geolocation = match web_sys::window()
        .ok_or_else(|| JsValue::from_str("No window object"))
        .and_then(|w| w.navigator().geolocation())
    {
        Ok(geolocation) => geolocation,
        Err(e) => {
            tracing::warn!("Geolocation unavailable: {e:?}");
            on_error("Location services are not available in this browser".to_string());
            return;
        }
    };

    // Only one of the two callbacks fires; the browser owns both closures.
    let on_error = std::rc::Rc::new(std::cell::Cell::new(Some(on_error)));
    let on_error_for_success = std::rc::Rc::clone(&on_error);

    let success = Closure::once_into_js(move |position: web_sys::Position| {
        let coords = position.coords();
        match Location::new(coords.latitude(), coords.longitude()) {
            Ok(location) => {
                tracing::info!(location = %location.label(), "Got position from browser");
                on_found(location);
            }
            Err(e) => {
                if let Some(on_error) = on_error_for_success.take() {
                    on_error(format!("Browser reported an invalid position: {e}"));
                }
            }
        }
    });

    let on_error_for_failure = std::rc::Rc::clone(&on_error);
    let failure = Closure::once_into_js(move |err: web_sys::PositionError| {
        tracing::warn!(code = err.code(), "Geolocation failed: {}", err.message());
        if let Some(on_error) = on_error_for_failure.take() {
            on_error(format!("Could not get your location: {}", err.message()));
        }
    });

    if let Err(e) = geolocation.get_current_position_with_error_callback(
        success.unchecked_ref::<js_sys::Function>(),
        Some(failure.unchecked_ref::<js_sys::Function>()),
    ) {
        tracing::warn!("getCurrentPosition failed: {e:?}");
        if let Some(on_error) = on_error.take() {
            on_error("Could not request your location".to_string());
        }
    }
}
