use thiserror::Error;

/// Anything that prevents us from getting a JSON payload out of OpenWeather.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("no OpenWeather API key configured")]
    MissingApiKey,

    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("OpenWeather API returned status: {0}")]
    Status(reqwest::StatusCode),

    #[error("OpenWeather API returned an empty body")]
    EmptyBody,
}

/// The payload arrived but does not have the shape a report needs.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("missing or invalid field: {0}")]
    Payload(#[from] serde_json::Error),

    #[error("payload has no weather conditions")]
    NoConditions,

    #[error("timezone offset out of range: {0}s")]
    InvalidOffset(i64),

    #[error("timestamp out of range: {0}")]
    InvalidTimestamp(i64),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("OPENWEATHER_TIMEOUT_SECS must be a positive number of seconds, got {0:?}")]
    InvalidTimeout(String),
}
