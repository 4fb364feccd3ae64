use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// A restaurant record as returned by the search API.
///
/// Only `id` matters to the list logic. The handful of typed fields feed the
/// list item card; everything else is carried through untouched in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Restaurant {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub cuisines: Option<String>,
    #[serde(default)]
    pub thumb: Option<String>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub average_cost_for_two: Option<f64>,
    #[serde(default)]
    pub location: Option<RestaurantAddress>,
    #[serde(default)]
    pub user_rating: Option<UserRating>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestaurantAddress {
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub locality: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRating {
    /// Sent as either `"4.2"` or `4.2` depending on the endpoint
    #[serde(default)]
    pub aggregate_rating: Option<Value>,
    #[serde(default)]
    pub rating_text: Option<String>,
}

impl Restaurant {
    /// Minimal record, mostly useful for tests and placeholders.
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            cuisines: None,
            thumb: None,
            currency: None,
            average_cost_for_two: None,
            location: None,
            user_rating: None,
            extra: Map::new(),
        }
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("Unnamed restaurant")
    }

    /// e.g. `4.2 Very Good`; `None` when the server sent no usable rating.
    pub fn rating_label(&self) -> Option<String> {
        let rating = self.user_rating.as_ref()?;
        let score = match rating.aggregate_rating.as_ref()? {
            Value::String(s) if !s.trim().is_empty() => s.trim().to_string(),
            Value::Number(n) => n.to_string(),
            _ => return None,
        };

        match rating.rating_text.as_deref().map(str::trim) {
            Some(text) if !text.is_empty() => Some(format!("{score} {text}")),
            _ => Some(score),
        }
    }

    /// e.g. `₹700 for two`
    pub fn cost_label(&self) -> Option<String> {
        let cost = self.average_cost_for_two?;
        if cost <= 0.0 {
            return None;
        }
        let currency = self.currency.as_deref().unwrap_or("");
        Some(format!("{currency}{cost} for two"))
    }
}

/// One element of the `restaurants` array; the API wraps each record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestaurantEntry {
    pub restaurant: Restaurant,
}

/// Body of a `/search` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub results_found: Option<u64>,
    #[serde(default)]
    pub results_start: Option<u64>,
    #[serde(default)]
    pub results_shown: Option<u64>,
    #[serde(default)]
    pub restaurants: Vec<RestaurantEntry>,
}

impl SearchResponse {
    pub fn from_restaurants(restaurants: Vec<Restaurant>) -> Self {
        Self {
            results_found: None,
            results_start: None,
            results_shown: None,
            restaurants: restaurants
                .into_iter()
                .map(|restaurant| RestaurantEntry { restaurant })
                .collect(),
        }
    }

    /// Unwrap the entries, keeping server order.
    pub fn into_restaurants(self) -> Vec<Restaurant> {
        self.restaurants
            .into_iter()
            .map(|entry| entry.restaurant)
            .collect()
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected restaurant id as string or number, got {other}"
        ))),
    }
}
