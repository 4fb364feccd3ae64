use leptos::ev;
use leptos::prelude::*;
use nearby_core::viewport::{is_scrolled_to_end, SCROLL_END_THRESHOLD_PX};

/// Invoke `on_end` whenever the window is scrolled to the bottom of the page.
///
/// The listener is removed when the owning component is disposed.
pub fn use_scrolled_to_end(on_end: impl Fn() + 'static) {
    let handle = window_event_listener(ev::scroll, move |_| {
        if window_at_end() {
            on_end();
        }
    });
    on_cleanup(move || handle.remove());
}

fn window_at_end() -> bool {
    let Some(window) = web_sys::window() else {
        return false;
    };
    let Some(root) = window.document().and_then(|d| d.document_element()) else {
        return false;
    };

    let scroll_top = window.scroll_y().unwrap_or(0.0);
    let viewport_height = window
        .inner_height()
        .ok()
        .and_then(|h| h.as_f64())
        .unwrap_or(0.0);
    let content_height = f64::from(root.scroll_height());

    is_scrolled_to_end(
        scroll_top,
        viewport_height,
        content_height,
        SCROLL_END_THRESHOLD_PX,
    )
}
