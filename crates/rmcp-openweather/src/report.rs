//! Turns an OpenWeather `/weather` payload into the text report handed back to the host.

use chrono::{DateTime, FixedOffset};
use serde::Deserialize;
use serde_json::{Number, Value};

use crate::error::ReportError;

const DIRECTIONS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

const TIME_FORMAT: &str = "%H:%M:%S";
const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// OpenWeather current weather response (only the fields we report on)
#[derive(Debug, Deserialize)]
pub struct CurrentWeather {
    pub weather: Vec<Condition>,
    pub main: MainReadings,
    pub wind: Wind,
    #[serde(default)]
    pub visibility: Option<Number>,
    #[serde(default)]
    pub rain: Option<Precipitation>,
    #[serde(default)]
    pub snow: Option<Precipitation>,
    #[serde(default)]
    pub clouds: Option<Clouds>,
    pub sys: Sys,
    /// Shift from UTC in seconds.
    #[serde(default)]
    pub timezone: Option<i64>,
    pub dt: i64,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct Condition {
    pub description: String,
    pub icon: String,
}

#[derive(Debug, Deserialize)]
pub struct MainReadings {
    pub temp: f64,
    pub feels_like: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub humidity: Number,
    pub pressure: Number,
    pub sea_level: Number,
    pub grnd_level: Number,
}

#[derive(Debug, Deserialize)]
pub struct Wind {
    pub speed: Number,
    pub deg: Number,
    #[serde(default)]
    pub gust: Option<Number>,
}

#[derive(Debug, Deserialize)]
pub struct Precipitation {
    #[serde(rename = "1h", default)]
    pub one_hour: Option<Number>,
}

#[derive(Debug, Deserialize)]
pub struct Clouds {
    #[serde(default)]
    pub all: Option<Number>,
}

#[derive(Debug, Deserialize)]
pub struct Sys {
    pub country: String,
    pub sunrise: i64,
    pub sunset: i64,
}

/// 16-point compass name for a bearing in degrees.
///
/// Halfway bearings round to the even sector, so 11.25° is `N` and 33.75° is `NE`.
pub fn cardinal_direction(deg: f64) -> &'static str {
    let sector = (deg / 22.5).round_ties_even().rem_euclid(16.0);
    DIRECTIONS[sector as usize % 16]
}

/// Render a UTC epoch timestamp at a fixed offset from UTC.
pub fn format_timestamp(
    timestamp: i64,
    offset_secs: i64,
    format: &str,
) -> Result<String, ReportError> {
    let offset = i32::try_from(offset_secs)
        .ok()
        .and_then(FixedOffset::east_opt)
        .ok_or(ReportError::InvalidOffset(offset_secs))?;
    let utc = DateTime::from_timestamp(timestamp, 0)
        .ok_or(ReportError::InvalidTimestamp(timestamp))?;

    Ok(utc.with_timezone(&offset).format(format).to_string())
}

/// Capitalise the first letter of each word, lower-case the rest.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_word = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}

fn format_km(meters: f64) -> String {
    let km = meters / 1000.0;
    if km.fract() == 0.0 {
        format!("{:.1} km", km)
    } else {
        format!("{} km", km)
    }
}

fn or_placeholder(value: Option<&Number>, placeholder: &str) -> String {
    value
        .map(|v| v.to_string())
        .unwrap_or_else(|| placeholder.to_string())
}

fn per_hour(value: Option<&Number>, placeholder: &str) -> String {
    value
        .map(|v| format!("{} mm/h", v))
        .unwrap_or_else(|| placeholder.to_string())
}

impl CurrentWeather {
    pub fn from_value(data: &Value) -> Result<Self, ReportError> {
        Ok(Self::deserialize(data)?)
    }

    pub fn render(&self) -> Result<String, ReportError> {
        let condition = self.weather.first().ok_or(ReportError::NoConditions)?;
        let main = &self.main;
        let wind = &self.wind;

        let offset = self.timezone.unwrap_or(0);
        let local_time = format_timestamp(self.dt, offset, DATETIME_FORMAT)?;
        let sunrise = format_timestamp(self.sys.sunrise, offset, TIME_FORMAT)?;
        let sunset = format_timestamp(self.sys.sunset, offset, TIME_FORMAT)?;

        let direction = cardinal_direction(wind.deg.as_f64().unwrap_or_default());

        let visibility = self
            .visibility
            .as_ref()
            .and_then(Number::as_f64)
            .map(format_km)
            .unwrap_or_else(|| "N/A".to_string());
        let rain = per_hour(
            self.rain.as_ref().and_then(|r| r.one_hour.as_ref()),
            "No precipitation",
        );
        let snow = per_hour(
            self.snow.as_ref().and_then(|s| s.one_hour.as_ref()),
            "No snow",
        );
        let clouds = or_placeholder(self.clouds.as_ref().and_then(|c| c.all.as_ref()), "N/A");
        let gust = or_placeholder(wind.gust.as_ref(), "N/A");

        Ok(format!(
            "Current Weather for {}, {} (as of {})\n\
             Temperature: {:.1}°C (Feels like: {:.1}°C)\n\
             Temp Range: {:.1}°C - {:.1}°C\n\
             Conditions: {} (Icon: {})\n\
             Humidity: {}%\n\
             Visibility: {}\n\
             Precipitation (1h): {}\n\
             Snow (1h): {}\n\
             Cloud Coverage: {}%\n\
             Wind: {} m/s, Direction: {} ({}°)\n\
             Wind Gusts: {} m/s\n\
             Atmospheric pressure: {} hPa\n\
             Sunrise: {}\n\
             Sunset: {}\n\
             Sea level: {} hPa\n\
             Ground level: {} hPa",
            self.name, self.sys.country, local_time,
            main.temp, main.feels_like,
            main.temp_min, main.temp_max,
            title_case(&condition.description), condition.icon,
            main.humidity,
            visibility,
            rain,
            snow,
            clouds,
            wind.speed, direction, wind.deg,
            gust,
            main.pressure,
            sunrise,
            sunset,
            main.sea_level,
            main.grnd_level
        ))
    }
}

/// Parse and render in one go.
pub fn format_report(data: &Value) -> Result<String, ReportError> {
    CurrentWeather::from_value(data)?.render()
}
