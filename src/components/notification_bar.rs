use std::time::Duration;

use leptos::prelude::*;

use crate::models::AppState;

const MIN_VISIBLE_MS: u64 = 3000;
const MAX_VISIBLE_MS: u64 = 8000;
const MS_PER_CHAR: u64 = 50;

/// Toast for transient messages such as a failed page load.
///
/// Each new message restarts the dismissal timer; the user can also close it.
#[component]
pub fn NotificationBar() -> impl IntoView {
    let state = use_context::<AppState>().expect("AppState context missing");
    let pending = StoredValue::new(None::<TimeoutHandle>);

    let cancel_pending = move || {
        if let Some(handle) = pending.try_update_value(Option::take).flatten() {
            handle.clear();
        }
    };

    Effect::new(move |_| {
        cancel_pending();

        let Some(message) = state.notification.get() else {
            return;
        };
        match set_timeout_with_handle(move || state.clear_notification(), dismiss_after(&message)) {
            Ok(handle) => pending.set_value(Some(handle)),
            Err(e) => tracing::warn!("Failed to schedule notification dismissal: {e:?}"),
        }
    });

    on_cleanup(cancel_pending);

    view! {
        {move || {
            state
                .notification
                .get()
                .map(|message| {
                    view! {
                        <div class="notification-bar" role="alert">
                            <span>{message}</span>
                            <button
                                type="button"
                                class="dismiss"
                                aria-label="Dismiss"
                                on:click=move |_| state.clear_notification()
                            >
                                "×"
                            </button>
                        </div>
                    }
                })
        }}
    }
}

/// Longer messages stay up longer, within bounds.
fn dismiss_after(message: &str) -> Duration {
    let chars = u64::try_from(message.chars().count()).unwrap_or(u64::MAX);
    let ms = chars
        .saturating_mul(MS_PER_CHAR)
        .clamp(MIN_VISIBLE_MS, MAX_VISIBLE_MS);
    Duration::from_millis(ms)
}
