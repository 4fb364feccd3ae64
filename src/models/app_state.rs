use leptos::prelude::*;
use nearby_core::Location;

const LOCATION_STORAGE_KEY: &str = "nearby.user_location";

/// App-wide reactive state shared with every component via `use_context()`.
#[derive(Clone, Copy)]
pub struct AppState {
    /// Coordinates picked by the user, if any
    pub user_location: RwSignal<Option<Location>>,
    /// Active notification (if any)
    pub notification: RwSignal<Option<String>>,
}

impl AppState {
    /// Create the app state, restoring the last saved location
    pub fn new() -> Self {
        Self {
            user_location: RwSignal::new(load_saved_location()),
            notification: RwSignal::new(None),
        }
    }

    /// Update (and persist) the selected location
    pub fn set_user_location(&self, location: Option<Location>) {
        save_location(location);
        self.user_location.set(location);
    }

    /// Header text for the location button
    pub fn location_label(&self) -> String {
        self.user_location
            .get()
            .map_or_else(|| "Choose location".to_string(), |l| l.label())
    }

    /// Show a notification (auto-dismiss is handled by `NotificationBar`)
    pub fn show_notification(&self, message: impl Into<String>) {
        self.notification.set(Some(message.into()));
    }

    /// Clear the current notification
    pub fn clear_notification(&self) {
        self.notification.set(None);
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

fn load_saved_location() -> Option<Location> {
    let raw = local_storage()?.get_item(LOCATION_STORAGE_KEY).ok().flatten()?;
    match serde_json::from_str::<Location>(&raw) {
        Ok(saved) => Location::new(saved.latitude, saved.longitude).ok(),
        Err(e) => {
            tracing::warn!("Ignoring unreadable saved location: {e}");
            None
        }
    }
}

fn save_location(location: Option<Location>) {
    let Some(storage) = local_storage() else {
        return;
    };

    let result = match location {
        Some(location) => match serde_json::to_string(&location) {
            Ok(json) => storage.set_item(LOCATION_STORAGE_KEY, &json),
            Err(e) => {
                tracing::warn!("Failed to serialize location: {e}");
                return;
            }
        },
        None => storage.remove_item(LOCATION_STORAGE_KEY),
    };

    if let Err(e) = result {
        tracing::warn!("Failed to persist location in localStorage: {e:?}");
    }
}
