//! rmcp-openweather: MCP server reporting current conditions from OpenWeather

use rmcp::{
    handler::server::{router::tool::ToolRouter, ServerHandler, wrapper::Parameters},
    model::*,
    ErrorData as McpError,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub mod client;
pub mod config;
pub mod error;
pub mod report;

pub use client::OpenWeatherClient;
pub use config::WeatherConfig;
pub use error::{ConfigError, FetchError, ReportError};

#[derive(Debug)]
pub struct WeatherServer {
    pub tool_router: ToolRouter<Self>,
    client: OpenWeatherClient,
}

impl Default for WeatherServer {
    fn default() -> Self {
        Self::new(WeatherConfig::default())
    }
}

impl WeatherServer {
    pub fn new(config: WeatherConfig) -> Self {
        Self {
            tool_router: Self::tool_router(),
            client: OpenWeatherClient::new(config),
        }
    }

    /// Full text answer for `city`: the report, or one of the two fallback messages.
    pub async fn current_weather_text(&self, city: &str) -> String {
        let data = match self.client.fetch_current(city).await {
            Ok(data) => data,
            Err(e) => {
                tracing::warn!(city, error = %e, "weather fetch failed");
                return fetch_failed(city);
            }
        };

        match report::format_report(&data) {
            Ok(report) => report,
            Err(e) => {
                tracing::warn!(city, error = %e, "weather payload could not be formatted");
                parse_failed(city)
            }
        }
    }
}

pub fn fetch_failed(city: &str) -> String {
    format!(
        "Unable to fetch weather data for {}. The city may not exist or there might be an API issue.",
        city
    )
}

pub fn parse_failed(city: &str) -> String {
    format!(
        "Unable to parse weather data for {}. The city may not exist or there might be an API issue.",
        city
    )
}

// Tool parameter structs
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct CityParams {
    #[schemars(description = "Name of the city (e.g. London, New York, etc.)")]
    pub city: String,
}

#[rmcp::tool_router]
impl WeatherServer {
    #[rmcp::tool(description = "Get current weather for a city")]
    pub async fn get_forecast(
        &self,
        Parameters(params): Parameters<CityParams>,
    ) -> Result<CallToolResult, McpError> {
        let output = self.current_weather_text(&params.city).await;
        Ok(CallToolResult::success(vec![Content::text(output)]))
    }
}

#[rmcp::tool_handler]
impl ServerHandler for WeatherServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .build(),
            server_info: Implementation::from_build_env(),
            instructions: Some("Current weather for a city using OpenWeather".into()),
        }
    }
}
