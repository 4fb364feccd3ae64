use nearby_core::config::{
    API_URL_VAR, PAGE_SIZE_VAR, PAGE_STEP_VAR, SEARCH_RADIUS_VAR, USER_KEY_VAR,
};
use nearby_core::ApiConfig;

/// Resolve the API configuration: `localStorage` overrides first, then
/// values baked in at build time. Falls back to defaults if anything is invalid.
pub fn load_api_config() -> ApiConfig {
    match ApiConfig::from_lookup(lookup) {
        Ok(config) => {
            tracing::info!(
                base_url = %config.base_url,
                has_user_key = config.user_key.is_some(),
                "API configuration loaded"
            );
            config
        }
        Err(e) => {
            tracing::error!("Invalid API configuration, using defaults: {e}");
            ApiConfig::default()
        }
    }
}

fn lookup(key: &str) -> Option<String> {
    stored_setting(key).or_else(|| build_setting(key).map(str::to_string))
}

fn stored_setting(key: &str) -> Option<String> {
    let storage = web_sys::window()?.local_storage().ok().flatten()?;
    storage.get_item(key).ok().flatten()
}

fn build_setting(key: &str) -> Option<&'static str> {
    match key {
        API_URL_VAR => option_env!("NEARBY_API_URL"),
        USER_KEY_VAR => option_env!("NEARBY_API_USER_KEY"),
        SEARCH_RADIUS_VAR => option_env!("NEARBY_SEARCH_RADIUS"),
        PAGE_SIZE_VAR => option_env!("NEARBY_PAGE_SIZE"),
        PAGE_STEP_VAR => option_env!("NEARBY_PAGE_STEP"),
        _ => None,
    }
}
