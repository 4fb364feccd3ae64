use tracing::{debug, info, trace, warn};

use crate::config::SearchSettings;
use crate::error::FetchError;
use crate::models::{FetchParams, Filters, Location, Restaurant};

/// A fetch handed out by [`RestaurantListState::begin_fetch`].
///
/// The generation ties the eventual response to the location/filters it was
/// issued for; a response from an older generation is discarded.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchRequest {
    generation: u64,
    pub params: FetchParams,
}

impl FetchRequest {
    pub const fn generation(&self) -> u64 {
        self.generation
    }
}

/// What [`RestaurantListState::complete_fetch`] did with a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// This many restaurants were appended
    Appended(usize),
    /// Empty page: no more data for this location
    Exhausted,
    /// The request failed; `has_more` is untouched and the next scroll retries
    Failed(FetchError),
    /// The response belongs to an abandoned request and was dropped
    Stale,
}

/// What to show under the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListFooter {
    Loader,
    /// The last page failed; offer a way to load it again
    Retry,
    EndOfList,
}

/// Render-ready projection of the list state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ListView<'a> {
    PromptForLocation,
    Showing {
        items: &'a [Restaurant],
        footer: ListFooter,
    },
}

impl ListView<'_> {
    pub const fn footer(&self) -> Option<ListFooter> {
        match self {
            Self::PromptForLocation => None,
            Self::Showing { footer, .. } => Some(*footer),
        }
    }
}

/// Infinite-scroll state for the restaurants near the user's location.
///
/// Pure state: the caller feeds in location/filter changes, scroll-end
/// events and fetch completions, and performs the network requests that
/// [`begin_fetch`](Self::begin_fetch) hands out.
#[derive(Debug, Clone)]
pub struct RestaurantListState {
    settings: SearchSettings,
    location: Option<Location>,
    filters: Filters,
    offset: u32,
    items: Vec<Restaurant>,
    fetch_in_flight: bool,
    has_more: bool,
    /// Parameters changed and no request has been handed out for them yet
    fetch_queued: bool,
    /// The last request failed; the next accepted scroll repeats it
    retry_pending: bool,
    generation: u64,
    last_error: Option<FetchError>,
}

impl RestaurantListState {
    pub fn new(settings: SearchSettings) -> Self {
        Self {
            settings,
            location: None,
            filters: Filters::new(),
            offset: 0,
            items: Vec::new(),
            fetch_in_flight: false,
            has_more: true,
            fetch_queued: false,
            retry_pending: false,
            generation: 0,
            last_error: None,
        }
    }

    pub const fn settings(&self) -> &SearchSettings {
        &self.settings
    }

    pub const fn location(&self) -> Option<Location> {
        self.location
    }

    pub const fn filters(&self) -> &Filters {
        &self.filters
    }

    pub const fn offset(&self) -> u32 {
        self.offset
    }

    pub fn items(&self) -> &[Restaurant] {
        &self.items
    }

    pub const fn fetch_in_flight(&self) -> bool {
        self.fetch_in_flight
    }

    pub const fn has_more(&self) -> bool {
        self.has_more
    }

    pub const fn generation(&self) -> u64 {
        self.generation
    }

    pub const fn last_error(&self) -> Option<&FetchError> {
        self.last_error.as_ref()
    }

    /// True when a request is waiting to be handed out by `begin_fetch`
    pub const fn fetch_queued(&self) -> bool {
        self.fetch_queued
    }

    /// Parameters the next request would be sent with.
    pub fn fetch_params(&self) -> FetchParams {
        FetchParams::derive(&self.filters, self.location, self.offset, &self.settings)
    }

    /// Apply a location change. Returns false when the location is unchanged.
    ///
    /// A new location starts pagination over and queues the first page.
    pub fn set_location(&mut self, location: Option<Location>) -> bool {
        if self.location == location {
            return false;
        }
        self.location = location;

        match location {
            Some(location) => {
                info!(
                    latitude = location.latitude,
                    longitude = location.longitude,
                    "Location changed, restarting restaurant list"
                );
                self.reset_pagination();
            }
            None => {
                info!("Location cleared");
                self.abandon_in_flight();
                self.fetch_queued = false;
            }
        }
        true
    }

    /// Apply a filter change. Returns false when the filters are unchanged.
    ///
    /// Results for the old filters are no longer valid, so a located list
    /// starts over the same way it does for a new location.
    pub fn set_filters(&mut self, filters: Filters) -> bool {
        if self.filters == filters {
            return false;
        }
        self.filters = filters;

        if self.location.is_some() {
            debug!("Filters changed, restarting restaurant list");
            self.reset_pagination();
        } else {
            self.abandon_in_flight();
        }
        true
    }

    /// The user reached the bottom of the list. Returns true if a page was queued.
    ///
    /// Ignored without a location, while a page is queued or in flight, and
    /// once the data is exhausted.
    pub fn on_scroll_end(&mut self) -> bool {
        if self.location.is_none() || self.fetch_in_flight || self.fetch_queued || !self.has_more
        {
            trace!(
                in_flight = self.fetch_in_flight,
                has_more = self.has_more,
                "Ignoring scroll end"
            );
            return false;
        }

        if self.retry_pending {
            self.retry_pending = false;
            debug!(offset = self.offset, "Retrying failed page");
        } else {
            self.offset = self.offset.saturating_add(self.settings.page_step);
            debug!(offset = self.offset, "Advancing to next page");
        }
        self.fetch_queued = true;
        true
    }

    /// Re-queue the page that last failed, without needing a scroll.
    ///
    /// An empty list cannot be scrolled, so this is the way out after the
    /// first page fails. Returns false when there is nothing to retry.
    pub fn retry(&mut self) -> bool {
        if !self.retry_pending || self.fetch_in_flight || self.fetch_queued {
            return false;
        }
        self.retry_pending = false;
        self.fetch_queued = self.location.is_some();
        debug!(offset = self.offset, "Retrying failed page on request");
        self.fetch_queued
    }

    /// True after a failed page until it is retried or the list restarts
    pub const fn can_retry(&self) -> bool {
        self.retry_pending && !self.fetch_in_flight && !self.fetch_queued
    }

    /// Hand out the queued request, if any. At most one request is out at a time.
    pub fn begin_fetch(&mut self) -> Option<FetchRequest> {
        if !self.fetch_queued || self.fetch_in_flight {
            return None;
        }
        self.fetch_queued = false;

        let params = self.fetch_params();
        if !params.is_located() {
            return None;
        }

        self.fetch_in_flight = true;
        debug!(
            generation = self.generation,
            start = self.offset,
            "Issuing restaurant fetch"
        );
        Some(FetchRequest {
            generation: self.generation,
            params,
        })
    }

    /// Fold a finished request back into the list.
    pub fn complete_fetch(
        &mut self,
        request: &FetchRequest,
        result: Result<Vec<Restaurant>, FetchError>,
    ) -> FetchOutcome {
        if request.generation != self.generation || !self.fetch_in_flight {
            debug!(
                request_generation = request.generation,
                current_generation = self.generation,
                "Discarding stale restaurant response"
            );
            return FetchOutcome::Stale;
        }
        self.fetch_in_flight = false;

        match result {
            Ok(page) if page.is_empty() => {
                info!(
                    offset = self.offset,
                    total = self.items.len(),
                    "Reached end of restaurant list"
                );
                self.last_error = None;
                self.has_more = false;
                FetchOutcome::Exhausted
            }
            Ok(page) => {
                let count = page.len();
                self.last_error = None;
                self.items.extend(page);
                debug!(count, total = self.items.len(), "Appended restaurants");
                FetchOutcome::Appended(count)
            }
            Err(err) => {
                warn!(offset = self.offset, error = %err, "Restaurant fetch failed");
                self.retry_pending = true;
                self.last_error = Some(err.clone());
                FetchOutcome::Failed(err)
            }
        }
    }

    /// Projection used by the rendering layer.
    pub fn view(&self) -> ListView<'_> {
        if self.location.is_none() {
            return ListView::PromptForLocation;
        }

        let footer = if !self.has_more {
            ListFooter::EndOfList
        } else if self.can_retry() {
            ListFooter::Retry
        } else {
            ListFooter::Loader
        };
        ListView::Showing {
            items: &self.items,
            footer,
        }
    }

    fn reset_pagination(&mut self) {
        self.abandon_in_flight();
        self.items.clear();
        self.has_more = true;
        self.offset = 0;
        self.retry_pending = false;
        self.last_error = None;
        self.fetch_queued = self.location.is_some();
    }

    /// Any outstanding request now belongs to an older generation.
    fn abandon_in_flight(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.fetch_in_flight = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    fn location_a() -> Location {
        Location::new(12.9, 77.6).unwrap()
    }

    fn location_b() -> Location {
        Location::new(19.07, 72.87).unwrap()
    }

    fn page(prefix: &str, n: usize) -> Vec<Restaurant> {
        (0..n)
            .map(|i| Restaurant::with_id(format!("{prefix}{i}")))
            .collect()
    }

    fn located() -> RestaurantListState {
        let mut state = RestaurantListState::new(SearchSettings::default());
        state.set_location(Some(location_a()));
        state
    }

    #[test]
    fn test_new_state_prompts_for_location() {
        let mut state = RestaurantListState::new(SearchSettings::default());

        assert_eq!(state.view(), ListView::PromptForLocation);
        assert!(state.has_more());
        assert_eq!(state.offset(), 0);
        assert!(state.begin_fetch().is_none());
    }

    #[test]
    fn test_location_queues_first_page() {
        let mut state = located();

        let request = state.begin_fetch().expect("first page should be requested");
        assert_eq!(request.params.start(), Some(0));
        assert!(state.fetch_in_flight());

        // only one request at a time
        assert!(state.begin_fetch().is_none());
    }

    #[test]
    fn test_first_page_then_scroll() {
        let mut state = located();
        let first = state.begin_fetch().unwrap();

        let outcome = state.complete_fetch(&first, Ok(page("a", 20)));

        assert_eq!(outcome, FetchOutcome::Appended(20));
        assert_eq!(state.items().len(), 20);
        assert_eq!(state.offset(), 0);
        assert!(state.has_more());
        assert!(!state.fetch_in_flight());

        assert!(state.on_scroll_end());
        assert_eq!(state.offset(), 20);
        let second = state.begin_fetch().unwrap();
        assert_eq!(second.params.start(), Some(20));
    }

    #[test]
    fn test_scroll_ignored_while_in_flight() {
        let mut state = located();
        let _request = state.begin_fetch().unwrap();

        assert!(!state.on_scroll_end());
        assert!(!state.on_scroll_end());
        assert_eq!(state.offset(), 0);
    }

    #[test]
    fn test_scroll_ignored_while_queued() {
        let mut state = located();
        let first = state.begin_fetch().unwrap();
        state.complete_fetch(&first, Ok(page("a", 5)));

        assert!(state.on_scroll_end());
        // second scroll before the page was handed out
        assert!(!state.on_scroll_end());
        assert_eq!(state.offset(), 20);
    }

    #[test]
    fn test_empty_page_exhausts() {
        let mut state = located();
        for _ in 0..2 {
            let request = state.begin_fetch().unwrap();
            state.complete_fetch(&request, Ok(page("x", 20)));
            state.on_scroll_end();
        }
        let request = state.begin_fetch().unwrap();
        assert_eq!(request.params.start(), Some(40));

        let outcome = state.complete_fetch(&request, Ok(Vec::new()));

        assert_eq!(outcome, FetchOutcome::Exhausted);
        assert!(!state.has_more());
        assert_eq!(state.items().len(), 40);
        assert_eq!(state.view().footer(), Some(ListFooter::EndOfList));

        for _ in 0..5 {
            assert!(!state.on_scroll_end());
            assert!(state.begin_fetch().is_none());
        }
        assert_eq!(state.offset(), 40);
    }

    #[test]
    fn test_items_keep_arrival_order_without_dedup() {
        let mut state = located();
        let first = state.begin_fetch().unwrap();
        state.complete_fetch(&first, Ok(page("r", 3)));
        state.on_scroll_end();
        let second = state.begin_fetch().unwrap();
        state.complete_fetch(&second, Ok(page("r", 2)));

        let ids: Vec<_> = state.items().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["r0", "r1", "r2", "r0", "r1"]);
    }

    #[test]
    fn test_location_change_resets() {
        let mut state = located();
        let request = state.begin_fetch().unwrap();
        state.complete_fetch(&request, Ok(page("a", 20)));
        state.on_scroll_end();
        let request = state.begin_fetch().unwrap();
        state.complete_fetch(&request, Ok(Vec::new()));
        assert!(!state.has_more());

        assert!(state.set_location(Some(location_b())));

        assert!(state.items().is_empty());
        assert_eq!(state.offset(), 0);
        assert!(state.has_more());
        let request = state.begin_fetch().unwrap();
        assert_eq!(request.params.start(), Some(0));
        assert_eq!(request.params.nearby().unwrap().lat, 19.07);
    }

    #[test]
    fn test_same_location_is_noop() {
        let mut state = located();
        let generation = state.generation();
        assert!(!state.set_location(Some(location_a())));
        assert_eq!(state.generation(), generation);
    }

    #[test]
    #[traced_test]
    fn test_stale_response_after_location_change_is_dropped() {
        let mut state = located();
        let request_a = state.begin_fetch().unwrap();

        state.set_location(Some(location_b()));
        let request_b = state.begin_fetch().expect("new location must fetch immediately");
        assert_ne!(request_a.generation(), request_b.generation());

        let outcome = state.complete_fetch(&request_a, Ok(page("a", 20)));
        assert_eq!(outcome, FetchOutcome::Stale);
        assert!(state.items().is_empty());
        // B is still outstanding
        assert!(state.fetch_in_flight());
        assert!(logs_contain("Discarding stale restaurant response"));

        let outcome = state.complete_fetch(&request_b, Ok(page("b", 3)));
        assert_eq!(outcome, FetchOutcome::Appended(3));
        assert!(state.items().iter().all(|r| r.id.starts_with('b')));
    }

    #[test]
    fn test_duplicate_completion_is_stale() {
        let mut state = located();
        let request = state.begin_fetch().unwrap();
        state.complete_fetch(&request, Ok(page("a", 2)));

        assert_eq!(
            state.complete_fetch(&request, Ok(page("a", 2))),
            FetchOutcome::Stale
        );
        assert_eq!(state.items().len(), 2);
    }

    #[test]
    #[traced_test]
    fn test_failure_keeps_has_more_and_retries_same_page() {
        let mut state = located();
        let request = state.begin_fetch().unwrap();
        state.complete_fetch(&request, Ok(page("a", 20)));
        state.on_scroll_end();
        let request = state.begin_fetch().unwrap();

        let err = FetchError::Status { status: 503 };
        let outcome = state.complete_fetch(&request, Err(err.clone()));

        assert_eq!(outcome, FetchOutcome::Failed(err.clone()));
        assert!(state.has_more());
        assert!(!state.fetch_in_flight());
        assert_eq!(state.last_error(), Some(&err));
        assert_eq!(state.items().len(), 20);
        assert!(logs_contain("Restaurant fetch failed"));

        // re-scroll repeats start=20 rather than skipping ahead
        assert!(state.on_scroll_end());
        let retry = state.begin_fetch().unwrap();
        assert_eq!(retry.params.start(), Some(20));

        state.complete_fetch(&retry, Ok(page("b", 1)));
        assert!(state.last_error().is_none());
    }

    #[test]
    fn test_first_page_failure_can_be_retried_without_scrolling() {
        let mut state = located();
        let request = state.begin_fetch().unwrap();

        let outcome = state.complete_fetch(&request, Err(FetchError::Network("x".into())));

        assert_eq!(outcome, FetchOutcome::Failed(FetchError::Network("x".into())));
        assert!(state.items().is_empty());
        assert!(state.can_retry());
        assert_eq!(state.view().footer(), Some(ListFooter::Retry));

        assert!(state.retry());
        assert!(!state.can_retry());
        assert_eq!(state.view().footer(), Some(ListFooter::Loader));
        let again = state.begin_fetch().expect("retry must issue the failed page");
        assert_eq!(again.params.start(), Some(0));

        assert_eq!(
            state.complete_fetch(&again, Ok(page("a", 3))),
            FetchOutcome::Appended(3)
        );
        assert!(!state.retry());
    }

    #[test]
    fn test_retry_is_noop_without_failure() {
        let mut state = located();
        assert!(!state.retry());
        let request = state.begin_fetch().unwrap();
        assert!(!state.retry());
        state.complete_fetch(&request, Ok(page("a", 2)));
        assert!(!state.retry());
        assert_eq!(state.view().footer(), Some(ListFooter::Loader));
    }

    #[test]
    fn test_scroll_without_location_is_ignored() {
        let mut state = RestaurantListState::new(SearchSettings::default());

        for _ in 0..3 {
            assert!(!state.on_scroll_end());
        }
        assert_eq!(state.offset(), 0);
        assert!(state.begin_fetch().is_none());
    }

    #[test]
    fn test_clearing_location_drops_in_flight() {
        let mut state = located();
        let request = state.begin_fetch().unwrap();

        assert!(state.set_location(None));

        assert_eq!(state.view(), ListView::PromptForLocation);
        assert_eq!(
            state.complete_fetch(&request, Ok(page("a", 1))),
            FetchOutcome::Stale
        );
        assert!(state.begin_fetch().is_none());
    }

    #[test]
    fn test_filter_change_restarts_located_list() {
        let mut state = located();
        let request = state.begin_fetch().unwrap();
        state.complete_fetch(&request, Ok(page("a", 20)));
        state.on_scroll_end();

        let mut filters = Filters::new();
        filters.insert("cuisines".to_string(), "1".to_string());
        assert!(state.set_filters(filters.clone()));

        assert!(state.items().is_empty());
        let request = state.begin_fetch().unwrap();
        assert_eq!(request.params.start(), Some(0));
        assert_eq!(request.params.filters(), &filters);
        assert!(!state.set_filters(filters));
    }

    #[test]
    fn test_filters_without_location_do_not_fetch() {
        let mut state = RestaurantListState::new(SearchSettings::default());
        let mut filters = Filters::new();
        filters.insert("q".to_string(), "biryani".to_string());

        assert!(state.set_filters(filters));
        assert!(state.begin_fetch().is_none());
        assert_eq!(state.view(), ListView::PromptForLocation);
    }

    #[test]
    fn test_view_showing_loader() {
        let mut state = located();
        let request = state.begin_fetch().unwrap();
        state.complete_fetch(&request, Ok(page("a", 2)));

        match state.view() {
            ListView::Showing { items, footer } => {
                assert_eq!(items.len(), 2);
                assert_eq!(footer, ListFooter::Loader);
            }
            ListView::PromptForLocation => panic!("expected list"),
        }
    }

    #[test]
    fn test_custom_page_step() {
        let settings = SearchSettings {
            radius_m: 500,
            page_size: 10,
            page_step: 10,
        };
        let mut state = RestaurantListState::new(settings);
        state.set_location(Some(location_a()));
        let request = state.begin_fetch().unwrap();
        state.complete_fetch(&request, Ok(page("a", 10)));

        state.on_scroll_end();
        let request = state.begin_fetch().unwrap();
        let nearby = request.params.nearby().unwrap();
        assert_eq!(nearby.start, 10);
        assert_eq!(nearby.count, 10);
        assert_eq!(nearby.radius, 500);
    }
}
