use tracing::debug;

use crate::error::FetchError;
use crate::models::{FetchParams, Restaurant, SearchResponse};
use crate::state::FetchRequest;

/// Anything that can answer a nearby-restaurant search.
///
/// The browser client implements this over `fetch`; tests script it.
#[allow(async_fn_in_trait)]
pub trait RestaurantSource {
    async fn search(&self, params: &FetchParams) -> Result<SearchResponse, FetchError>;
}

/// Run a request handed out by the list state and unwrap the page.
#[allow(clippy::future_not_send)]
pub async fn fetch_page<S>(
    source: &S,
    request: &FetchRequest,
) -> Result<Vec<Restaurant>, FetchError>
where
    S: RestaurantSource,
{
    let response = source.search(&request.params).await?;
    debug!(
        generation = request.generation(),
        start = ?request.params.start(),
        found = ?response.results_found,
        shown = response.restaurants.len(),
        "Received restaurant page"
    );
    Ok(response.into_restaurants())
}
