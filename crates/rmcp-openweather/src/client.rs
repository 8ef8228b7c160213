use serde_json::Value;

use crate::config::WeatherConfig;
use crate::error::FetchError;

const USER_AGENT: &str = "weather-app/1.0";
const ACCEPT: &str = "application/geo+json";

/// URL for the current-weather endpoint, metric units.
pub fn current_weather_url(api_base: &str, city: &str, api_key: &str) -> String {
    format!(
        "{}/weather?q={}&appid={}&units=metric",
        api_base,
        urlencoding::encode(city),
        urlencoding::encode(api_key)
    )
}

#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    http: reqwest::Client,
    config: WeatherConfig,
}

impl OpenWeatherClient {
    pub fn new(config: WeatherConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    pub fn config(&self) -> &WeatherConfig {
        &self.config
    }

    /// One GET against `/weather` for `city`. Returns the raw JSON document.
    pub async fn fetch_current(&self, city: &str) -> Result<Value, FetchError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(FetchError::MissingApiKey)?;
        let url = current_weather_url(&self.config.api_base, city, api_key);

        tracing::debug!(city, base = %self.config.api_base, "requesting current weather");

        let response = self
            .http
            .get(&url)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .header(reqwest::header::ACCEPT, ACCEPT)
            .timeout(self.config.timeout)
            .send()
            .await
            // reqwest errors carry the URL, which carries the key
            .map_err(|e| FetchError::Request(e.without_url()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let data = response
            .json::<Value>()
            .await
            .map_err(|e| FetchError::Request(e.without_url()))?;

        match &data {
            Value::Null => Err(FetchError::EmptyBody),
            Value::Object(map) if map.is_empty() => Err(FetchError::EmptyBody),
            _ => Ok(data),
        }
    }
}
