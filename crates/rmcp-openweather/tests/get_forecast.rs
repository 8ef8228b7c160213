use std::time::Duration;

use rmcp_openweather::{fetch_failed, parse_failed, FetchError, OpenWeatherClient, WeatherConfig, WeatherServer};
use serde_json::{json, Value};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn sample_payload() -> Value {
    json!({
        "weather": [{ "id": 800, "main": "Clear", "description": "clear sky", "icon": "01d" }],
        "main": {
            "temp": 21.34,
            "feels_like": 20.91,
            "temp_min": 19.82,
            "temp_max": 22.77,
            "pressure": 1018,
            "humidity": 47,
            "sea_level": 1018,
            "grnd_level": 1011
        },
        "visibility": 10000,
        "wind": { "speed": 3.6, "deg": 10 },
        "clouds": { "all": 0 },
        "dt": 1700000000,
        "sys": { "country": "US", "sunrise": 1699961700, "sunset": 1699997700 },
        "timezone": -18000,
        "name": "New York"
    })
}

fn config_for(server: &MockServer) -> WeatherConfig {
    WeatherConfig::default()
        .with_api_key("test-key")
        .with_api_base(server.uri())
}

#[tokio::test]
async fn renders_report_from_upstream() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("q", "New York"))
        .and(query_param("appid", "test-key"))
        .and(query_param("units", "metric"))
        .and(header("user-agent", "weather-app/1.0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_payload()))
        .expect(1)
        .mount(&upstream)
        .await;

    let server = WeatherServer::new(config_for(&upstream));
    let text = server.current_weather_text("New York").await;

    let expected = "\
Current Weather for New York, US (as of 2023-11-14 17:13:20)
Temperature: 21.3°C (Feels like: 20.9°C)
Temp Range: 19.8°C - 22.8°C
Conditions: Clear Sky (Icon: 01d)
Humidity: 47%
Visibility: 10.0 km
Precipitation (1h): No precipitation
Snow (1h): No snow
Cloud Coverage: 0%
Wind: 3.6 m/s, Direction: N (10°)
Wind Gusts: N/A m/s
Atmospheric pressure: 1018 hPa
Sunrise: 06:35:00
Sunset: 16:35:00
Sea level: 1018 hPa
Ground level: 1011 hPa";
    assert_eq!(text, expected);
}

#[tokio::test]
async fn not_found_gives_fetch_fallback() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({ "cod": "404", "message": "city not found" })),
        )
        .mount(&upstream)
        .await;

    let server = WeatherServer::new(config_for(&upstream));
    assert_eq!(server.current_weather_text("Atlantis").await, fetch_failed("Atlantis"));
}

#[tokio::test]
async fn non_json_body_gives_fetch_fallback() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&upstream)
        .await;

    let server = WeatherServer::new(config_for(&upstream));
    assert_eq!(server.current_weather_text("Paris").await, fetch_failed("Paris"));
}

#[tokio::test]
async fn empty_object_gives_fetch_fallback() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&upstream)
        .await;

    let client = OpenWeatherClient::new(config_for(&upstream));
    let err = client.fetch_current("Paris").await.unwrap_err();
    assert!(matches!(err, FetchError::EmptyBody));
}

#[tokio::test]
async fn unreachable_host_gives_fetch_fallback() {
    let config = WeatherConfig::default()
        .with_api_key("test-key")
        .with_api_base("http://127.0.0.1:1");

    let server = WeatherServer::new(config);
    assert_eq!(server.current_weather_text("Oslo").await, fetch_failed("Oslo"));
}

#[tokio::test]
async fn slow_upstream_times_out() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(sample_payload())
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&upstream)
        .await;

    let mut config = config_for(&upstream);
    config.timeout = Duration::from_millis(200);

    let client = OpenWeatherClient::new(config);
    let err = client.fetch_current("New York").await.unwrap_err();
    assert!(matches!(err, FetchError::Request(ref e) if e.is_timeout()));
}

#[tokio::test]
async fn missing_wind_gives_parse_fallback() {
    let mut payload = sample_payload();
    payload.as_object_mut().unwrap().remove("wind");

    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(payload))
        .mount(&upstream)
        .await;

    let server = WeatherServer::new(config_for(&upstream));
    assert_eq!(server.current_weather_text("New York").await, parse_failed("New York"));
}

#[tokio::test]
async fn no_api_key_never_hits_upstream() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_payload()))
        .expect(0)
        .mount(&upstream)
        .await;

    let config = WeatherConfig::default().with_api_base(upstream.uri());
    let server = WeatherServer::new(config);
    assert_eq!(server.current_weather_text("London").await, fetch_failed("London"));
}
