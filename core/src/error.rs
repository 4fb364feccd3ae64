use thiserror::Error;

/// Why a page of restaurants could not be loaded.
///
/// Kept `Clone + Eq` so the last failure can sit inside reactive list state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The request never produced a response (offline, CORS, DNS...)
    #[error("network error: {0}")]
    Network(String),
    /// The server answered with a non-success status code
    #[error("server responded with status {status}")]
    Status { status: u16 },
    /// The response body was not a search result
    #[error("failed to decode response: {0}")]
    Decode(String),
    /// The request could not be built from the current parameters
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

/// Rejected configuration value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}: {reason}")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
    #[error("API base URL must start with http:// or https://, got {0:?}")]
    InvalidUrl(String),
}

/// Rejected coordinate input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocationError {
    #[error("{field} is not a number: {value:?}")]
    InvalidNumber { field: &'static str, value: String },
    #[error("{field} {value} is out of range ({min} to {max})")]
    OutOfRange {
        field: &'static str,
        value: String,
        min: i16,
        max: i16,
    },
}
