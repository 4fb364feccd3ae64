pub mod end_of_list_label;
pub mod home;
pub mod layout;
pub mod loader;
pub mod location_picker;
pub mod notification_bar;
pub mod restaurant_list;
pub mod restaurant_list_item;

pub use end_of_list_label::EndOfListLabel;
pub use home::Home;
pub use layout::Layout;
pub use loader::Loader;
pub use location_picker::LocationPicker;
pub use notification_bar::NotificationBar;
pub use restaurant_list::RestaurantList;
pub use restaurant_list_item::RestaurantListItem;
