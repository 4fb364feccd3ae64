pub mod fetch_params;
pub mod location;
pub mod restaurant;

pub use fetch_params::{FetchParams, Filters, NearbyQuery};
pub use location::Location;
pub use restaurant::{Restaurant, RestaurantEntry, SearchResponse};
