use serde::{Deserialize, Serialize};

use crate::error::LocationError;

/// Geographic coordinates chosen by the user.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    /// Build a location, rejecting non-finite or out-of-range coordinates.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, LocationError> {
        check_range("latitude", latitude, -90, 90)?;
        check_range("longitude", longitude, -180, 180)?;
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Parse user-entered latitude/longitude text.
    pub fn parse(latitude: &str, longitude: &str) -> Result<Self, LocationError> {
        let latitude = parse_coordinate("latitude", latitude)?;
        let longitude = parse_coordinate("longitude", longitude)?;
        Self::new(latitude, longitude)
    }

    /// Short human readable form, e.g. `12.9000, 77.6000`
    pub fn label(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

fn parse_coordinate(field: &'static str, raw: &str) -> Result<f64, LocationError> {
    let trimmed = raw.trim();
    trimmed
        .parse::<f64>()
        .map_err(|_| LocationError::InvalidNumber {
            field,
            value: trimmed.to_string(),
        })
}

fn check_range(field: &'static str, value: f64, min: i16, max: i16) -> Result<(), LocationError> {
    if !value.is_finite() {
        return Err(LocationError::InvalidNumber {
            field,
            value: value.to_string(),
        });
    }
    if value < f64::from(min) || value > f64::from(max) {
        return Err(LocationError::OutOfRange {
            field,
            value: value.to_string(),
            min,
            max,
        });
    }
    Ok(())
}
