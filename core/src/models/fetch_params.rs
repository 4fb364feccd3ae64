use std::collections::BTreeMap;

use crate::config::SearchSettings;
use crate::error::FetchError;
use crate::models::Location;

/// Caller supplied search filters, merged into every request as-is.
pub type Filters = BTreeMap<String, String>;

/// Sort key asking the server to order results by distance from `lat`/`lon`.
pub const SORT_BY_DISTANCE: &str = "real_distance";
/// Ascending order, nearest first.
pub const ORDER_ASCENDING: &str = "asc";

/// Location-dependent part of a search request.
#[derive(Debug, Clone, PartialEq)]
pub struct NearbyQuery {
    pub lat: f64,
    pub lon: f64,
    pub radius: u32,
    pub sort: &'static str,
    pub order: &'static str,
    pub start: u32,
    pub count: u32,
}

/// Parameters of one "restaurants near me" request.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchParams {
    filters: Filters,
    nearby: Option<NearbyQuery>,
}

impl FetchParams {
    /// Derive request parameters from the list's current inputs.
    ///
    /// Without a location only the filters are sent.
    pub fn derive(
        filters: &Filters,
        location: Option<Location>,
        offset: u32,
        settings: &SearchSettings,
    ) -> Self {
        let nearby = location.map(|location| NearbyQuery {
            lat: location.latitude,
            lon: location.longitude,
            radius: settings.radius_m,
            sort: SORT_BY_DISTANCE,
            order: ORDER_ASCENDING,
            start: offset,
            count: settings.page_size,
        });

        Self {
            filters: filters.clone(),
            nearby,
        }
    }

    pub const fn filters(&self) -> &Filters {
        &self.filters
    }

    pub const fn nearby(&self) -> Option<&NearbyQuery> {
        self.nearby.as_ref()
    }

    pub const fn is_located(&self) -> bool {
        self.nearby.is_some()
    }

    /// Pagination offset requested, if the request is location based
    pub fn start(&self) -> Option<u32> {
        self.nearby.as_ref().map(|n| n.start)
    }

    /// Flatten into query pairs sorted by key. Location fields win over filters.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut merged = self.filters.clone();

        if let Some(nearby) = &self.nearby {
            merged.insert("lat".to_string(), nearby.lat.to_string());
            merged.insert("lon".to_string(), nearby.lon.to_string());
            merged.insert("radius".to_string(), nearby.radius.to_string());
            merged.insert("sort".to_string(), nearby.sort.to_string());
            merged.insert("order".to_string(), nearby.order.to_string());
            merged.insert("start".to_string(), nearby.start.to_string());
            merged.insert("count".to_string(), nearby.count.to_string());
        }

        merged.into_iter().collect()
    }

    /// URL-encoded query string (without the leading `?`).
    pub fn query_string(&self) -> Result<String, FetchError> {
        serde_urlencoded::to_string(self.query_pairs())
            .map_err(|e| FetchError::InvalidRequest(e.to_string()))
    }
}
