use thiserror::Error;

/// A present value failed a domain constraint. The only failure the core raises.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidInput {
    #[error("{field} must be a finite number, got {value}")]
    NotFinite { field: &'static str, value: f64 },

    #[error("{field} must be numeric, got {raw}")]
    NotNumeric { field: &'static str, raw: String },

    #[error("humidity must lie in [0, 100], got {0}")]
    HumidityOutOfRange(f64),

    #[error("uv_index must not be negative, got {0}")]
    NegativeUvIndex(f64),

    #[error("wind_speed must not be negative, got {0}")]
    NegativeWindSpeed(f64),
}

/// Failure at the transport boundary, before or during evaluation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RequestError {
    #[error("Missing weather data field: {0}")]
    MissingField(&'static str),

    #[error(transparent)]
    Invalid(#[from] InvalidInput),
}

/// Failure of an external collaborator (image search, translation).
///
/// Scoped to the collaborator; never affects a computed recommendation.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("No API key configured for service '{0}'")]
    MissingCredentials(&'static str),

    #[error("{service} request failed: {source}")]
    Transport {
        service: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{service} request failed with status {status}: {body}")]
    Status {
        service: &'static str,
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Failed to parse {service} response: {message}")]
    Decode { service: &'static str, message: String },
}
