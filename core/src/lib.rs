pub mod config;
pub mod error;
pub mod models;
pub mod source;
pub mod state;
pub mod viewport;

pub use config::{ApiConfig, SearchSettings};
pub use error::{ConfigError, FetchError, LocationError};
pub use models::{FetchParams, Filters, Location, Restaurant, SearchResponse};
pub use source::{fetch_page, RestaurantSource};
pub use state::{FetchOutcome, FetchRequest, ListFooter, ListView, RestaurantListState};
