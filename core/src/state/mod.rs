pub mod restaurant_list;

pub use restaurant_list::{FetchOutcome, FetchRequest, ListFooter, ListView, RestaurantListState};
