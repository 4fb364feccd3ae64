/// Distance from the bottom (px) at which the list counts as scrolled to the end.
pub const SCROLL_END_THRESHOLD_PX: f64 = 10.0;

/// True when the visible window reaches the bottom of the content.
pub fn is_scrolled_to_end(
    scroll_top: f64,
    viewport_height: f64,
    content_height: f64,
    threshold_px: f64,
) -> bool {
    if ![scroll_top, viewport_height, content_height, threshold_px]
        .iter()
        .all(|v| v.is_finite())
    {
        return false;
    }
    scroll_top + viewport_height >= content_height - threshold_px
}
