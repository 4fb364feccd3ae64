use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, FetchError};
use crate::models::FetchParams;

pub const DEFAULT_API_URL: &str = "https://developers.zomato.com/api/v2.1";

pub const API_URL_VAR: &str = "NEARBY_API_URL";
pub const USER_KEY_VAR: &str = "NEARBY_API_USER_KEY";
pub const SEARCH_RADIUS_VAR: &str = "NEARBY_SEARCH_RADIUS";
pub const PAGE_SIZE_VAR: &str = "NEARBY_PAGE_SIZE";
pub const PAGE_STEP_VAR: &str = "NEARBY_PAGE_STEP";

/// Shape of a nearby search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchSettings {
    /// Search radius around the user, in metres
    pub radius_m: u32,
    /// `count` sent with every request
    pub page_size: u32,
    /// How far the offset advances per scroll-triggered page
    pub page_step: u32,
}

impl SearchSettings {
    pub const DEFAULT_RADIUS_M: u32 = 3000;
    pub const DEFAULT_PAGE_SIZE: u32 = 30;
    pub const DEFAULT_PAGE_STEP: u32 = 20;
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            radius_m: Self::DEFAULT_RADIUS_M,
            page_size: Self::DEFAULT_PAGE_SIZE,
            page_step: Self::DEFAULT_PAGE_STEP,
        }
    }
}

/// Where and how to reach the restaurant search API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    /// Sent as the `user-key` header when present
    pub user_key: Option<String>,
    pub search: SearchSettings,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            user_key: None,
            search: SearchSettings::default(),
        }
    }
}

impl ApiConfig {
    /// Build a config from a key lookup (environment, browser storage, ...).
    /// Missing or blank keys fall back to the defaults.
    ///
    /// # Errors
    /// Returns an error if a present value is malformed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let base_url = get(API_URL_VAR).unwrap_or_else(|| DEFAULT_API_URL.to_string());
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ConfigError::InvalidUrl(base_url));
        }

        let defaults = SearchSettings::default();
        let search = SearchSettings {
            radius_m: parse_positive(
                SEARCH_RADIUS_VAR,
                get(SEARCH_RADIUS_VAR),
                defaults.radius_m,
            )?,
            page_size: parse_positive(PAGE_SIZE_VAR, get(PAGE_SIZE_VAR), defaults.page_size)?,
            page_step: parse_positive(PAGE_STEP_VAR, get(PAGE_STEP_VAR), defaults.page_step)?,
        };

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            user_key: get(USER_KEY_VAR),
            search,
        })
    }

    /// Full URL of the search endpoint for the given parameters.
    pub fn search_url(&self, params: &FetchParams) -> Result<String, FetchError> {
        let base = self.base_url.trim_end_matches('/');
        let query = params.query_string()?;
        if query.is_empty() {
            Ok(format!("{base}/search"))
        } else {
            Ok(format!("{base}/search?{query}"))
        }
    }
}

fn parse_positive(
    key: &'static str,
    raw: Option<String>,
    default: u32,
) -> Result<u32, ConfigError> {
    let Some(raw) = raw else {
        return Ok(default);
    };

    match raw.parse::<u32>() {
        Ok(0) => Err(ConfigError::InvalidValue {
            key,
            value: raw,
            reason: "must be greater than zero".to_string(),
        }),
        Ok(value) => Ok(value),
        Err(e) => Err(ConfigError::InvalidValue {
            key,
            value: raw,
            reason: e.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::models::{Filters, Location};

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_nothing_set() {
        let config = ApiConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, ApiConfig::default());
        assert_eq!(config.search.radius_m, 3000);
        assert_eq!(config.search.page_size, 30);
        assert_eq!(config.search.page_step, 20);
    }

    #[test]
    fn test_overrides() {
        let config = ApiConfig::from_lookup(lookup_from(&[
            (API_URL_VAR, "http://localhost:8080/api/"),
            (USER_KEY_VAR, " secret "),
            (SEARCH_RADIUS_VAR, "1500"),
            (PAGE_SIZE_VAR, "10"),
        ]))
        .unwrap();

        assert_eq!(config.base_url, "http://localhost:8080/api");
        assert_eq!(config.user_key.as_deref(), Some("secret"));
        assert_eq!(config.search.radius_m, 1500);
        assert_eq!(config.search.page_size, 10);
        assert_eq!(config.search.page_step, 20);
    }

    #[test]
    fn test_blank_values_use_defaults() {
        let config =
            ApiConfig::from_lookup(lookup_from(&[(USER_KEY_VAR, "  "), (PAGE_SIZE_VAR, "")]))
                .unwrap();
        assert!(config.user_key.is_none());
        assert_eq!(config.search.page_size, 30);
    }

    #[test]
    fn test_rejects_bad_url() {
        let err = ApiConfig::from_lookup(lookup_from(&[(API_URL_VAR, "ftp://example.com")]))
            .unwrap_err();
        assert_eq!(err, ConfigError::InvalidUrl("ftp://example.com".to_string()));
    }

    #[test]
    fn test_rejects_zero_and_garbage() {
        let err = ApiConfig::from_lookup(lookup_from(&[(PAGE_STEP_VAR, "0")])).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                key: PAGE_STEP_VAR,
                ..
            }
        ));

        let err =
            ApiConfig::from_lookup(lookup_from(&[(SEARCH_RADIUS_VAR, "far")])).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                key: SEARCH_RADIUS_VAR,
                ..
            }
        ));
    }

    #[test]
    fn test_search_url() {
        let config = ApiConfig::default();
        let params = FetchParams::derive(
            &Filters::new(),
            Some(Location::new(12.9, 77.6).unwrap()),
            40,
            &config.search,
        );

        let url = config.search_url(&params).unwrap();
        assert!(url.starts_with("https://developers.zomato.com/api/v2.1/search?"));
        assert!(url.contains("start=40"));
        assert!(url.contains("count=30"));
    }

    #[test]
    fn test_search_url_without_query() {
        let config = ApiConfig::default();
        let params = FetchParams::derive(&Filters::new(), None, 0, &config.search);
        assert_eq!(
            config.search_url(&params).unwrap(),
            "https://developers.zomato.com/api/v2.1/search"
        );
    }
}
