//! Open-Meteo weather client
//!
//! HTTP client for the Open-Meteo forecast API. One request returns both the
//! `current_weather` block and the hourly `temperature_2m` series.

use chrono::{DateTime, NaiveDateTime};
use domain::{DomainError, GeoLocation, Series, Timezone};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::models::{
    ApiResponse, CurrentWeather, CurrentWeatherData, HourlyData, HourlyTemperatures,
    TemperatureReport, WeatherCondition,
};

/// Weather client errors
#[derive(Debug, Error)]
pub enum WeatherError {
    /// The HTTP client could not be built
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request to the weather service failed
    #[error("Failed to fetch weather data: {0}")]
    RequestFailed(String),

    /// Service is temporarily unavailable
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Failed to decode the response or a value inside it
    #[error("Parse error: {0}")]
    ParseError(String),

    /// The response lacks an expected field
    #[error("Weather API response missing {0}")]
    MissingData(String),
}

impl WeatherError {
    /// Whether the failure happened before a response body was obtained
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::ConnectionFailed(_)
                | Self::RequestFailed(_)
                | Self::ServiceUnavailable(_)
                | Self::RateLimitExceeded
        )
    }

    /// Whether the response was received but did not have the expected shape
    #[must_use]
    pub const fn is_schema(&self) -> bool {
        matches!(self, Self::ParseError(_) | Self::MissingData(_))
    }
}

/// Weather service configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Open-Meteo API base URL (default: <https://api.open-meteo.com/v1>)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds (default: 10)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Days of history before today (0-92, default: 1)
    #[serde(default = "default_past_days")]
    pub past_days: u8,

    /// Number of forecast days (1-16, default: 7)
    #[serde(default = "default_forecast_days")]
    pub forecast_days: u8,
}

fn default_base_url() -> String {
    "https://api.open-meteo.com/v1".to_string()
}

const fn default_timeout() -> u64 {
    10
}

const fn default_past_days() -> u8 {
    1
}

const fn default_forecast_days() -> u8 {
    7
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            past_days: default_past_days(),
            forecast_days: default_forecast_days(),
        }
    }
}

/// Open-Meteo HTTP client
#[derive(Debug)]
pub struct OpenMeteoClient {
    client: Client,
    config: WeatherConfig,
}

impl OpenMeteoClient {
    /// Create a new Open-Meteo client with the given configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: WeatherConfig) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| WeatherError::ConnectionFailed(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Build the forecast endpoint URL
    fn forecast_url(&self) -> String {
        format!("{}/forecast", self.config.base_url.trim_end_matches('/'))
    }

    /// Query parameters for a forecast request
    fn forecast_query(
        &self,
        location: &GeoLocation,
        timezone: &Timezone,
    ) -> Vec<(&'static str, String)> {
        vec![
            ("latitude", location.latitude().to_string()),
            ("longitude", location.longitude().to_string()),
            ("hourly", "temperature_2m".to_string()),
            ("current_weather", "true".to_string()),
            ("timezone", timezone.as_str().to_string()),
            ("past_days", self.config.past_days.min(92).to_string()),
            (
                "forecast_days",
                self.config.forecast_days.clamp(1, 16).to_string(),
            ),
        ]
    }

    /// Issue the forecast request and decode the body
    async fn fetch(
        &self,
        location: &GeoLocation,
        timezone: &Timezone,
    ) -> Result<ApiResponse, WeatherError> {
        let url = self.forecast_url();
        let query = self.forecast_query(location, timezone);
        debug!(url = %url, ?query, "Fetching forecast");

        let response = self
            .client
            .get(&url)
            .query(&query)
            .send()
            .await
            .map_err(|e| WeatherError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(WeatherError::RateLimitExceeded);
        }
        if status.is_server_error() {
            return Err(WeatherError::ServiceUnavailable(format!("HTTP {status}")));
        }
        if !status.is_success() {
            return Err(WeatherError::RequestFailed(format!("HTTP {status}")));
        }

        response
            .json::<ApiResponse>()
            .await
            .map_err(|e| WeatherError::ParseError(e.to_string()))
    }

    /// Fetch current weather for a location
    ///
    /// # Errors
    ///
    /// Returns a transport error if the request fails, or a schema error if
    /// the response has no `current_weather.temperature`.
    #[instrument(skip(self, location, timezone), fields(lat = location.latitude(), lon = location.longitude(), tz = %timezone))]
    pub async fn get_current(
        &self,
        location: &GeoLocation,
        timezone: &Timezone,
    ) -> Result<CurrentWeather, WeatherError> {
        let response = self.fetch(location, timezone).await?;
        let tz = Self::response_timezone(&response, timezone)?;
        let current = Self::parse_current_weather(response.current_weather.as_ref(), &tz)?;
        debug!(temperature = current.temperature, "Retrieved current weather");
        Ok(current)
    }

    /// Fetch the hourly temperature series for a location
    ///
    /// # Errors
    ///
    /// Returns a transport error if the request fails, or a schema error if
    /// the hourly arrays are missing, empty, or of different lengths.
    #[instrument(skip(self, location, timezone), fields(lat = location.latitude(), lon = location.longitude(), tz = %timezone))]
    pub async fn get_hourly(
        &self,
        location: &GeoLocation,
        timezone: &Timezone,
    ) -> Result<HourlyTemperatures, WeatherError> {
        let response = self.fetch(location, timezone).await?;
        let tz = Self::response_timezone(&response, timezone)?;
        let series = Self::parse_hourly(response.hourly.as_ref(), &tz)?;
        debug!(samples = series.len(), "Retrieved hourly temperatures");
        Ok(HourlyTemperatures {
            timezone: tz,
            series,
        })
    }

    /// Fetch current weather and the hourly series in one request
    ///
    /// # Errors
    ///
    /// Fails on any transport error, or if either part of the response is
    /// missing or malformed.
    #[instrument(skip(self, location, timezone), fields(lat = location.latitude(), lon = location.longitude(), tz = %timezone))]
    pub async fn get_report(
        &self,
        location: &GeoLocation,
        timezone: &Timezone,
    ) -> Result<TemperatureReport, WeatherError> {
        let response = self.fetch(location, timezone).await?;
        let tz = Self::response_timezone(&response, timezone)?;
        let current = Self::parse_current_weather(response.current_weather.as_ref(), &tz)?;
        let hourly = Self::parse_hourly(response.hourly.as_ref(), &tz)?;

        let resolved = GeoLocation::new(response.latitude, response.longitude)
            .map_err(|e| WeatherError::ParseError(e.to_string()))?;

        debug!(
            temperature = current.temperature,
            samples = hourly.len(),
            "Retrieved temperature report"
        );

        Ok(TemperatureReport {
            location: resolved,
            elevation: response.elevation,
            timezone: tz,
            current,
            hourly,
        })
    }

    /// Timezone the response timestamps are in, falling back to the requested one
    fn response_timezone(
        response: &ApiResponse,
        requested: &Timezone,
    ) -> Result<Timezone, WeatherError> {
        response.timezone.as_deref().map_or(Ok(*requested), |name| {
            Timezone::new(name).map_err(|e| WeatherError::ParseError(e.to_string()))
        })
    }

    /// Parse the `current_weather` block
    fn parse_current_weather(
        data: Option<&CurrentWeatherData>,
        timezone: &Timezone,
    ) -> Result<CurrentWeather, WeatherError> {
        let data = data.ok_or_else(|| WeatherError::MissingData("temperature data.".to_string()))?;
        let temperature = data
            .temperature
            .ok_or_else(|| WeatherError::MissingData("temperature data.".to_string()))?;

        let time = data
            .time
            .as_deref()
            .map(|s| Self::parse_local_datetime(s, timezone))
            .transpose()?;

        Ok(CurrentWeather {
            time,
            temperature,
            wind_speed: data.windspeed,
            wind_direction: data.winddirection,
            condition: data.weathercode.map(WeatherCondition::from_wmo_code),
            is_day: data.is_day.map(|d| d != 0),
        })
    }

    /// Parse the hourly arrays into an ordered series
    ///
    /// `null` temperatures are dropped; every other sample is kept.
    fn parse_hourly(
        data: Option<&HourlyData>,
        timezone: &Timezone,
    ) -> Result<Series<NaiveDateTime>, WeatherError> {
        let missing = || WeatherError::MissingData("hourly temperature data.".to_string());

        let data = data.ok_or_else(missing)?;
        let times = data.time.as_ref().filter(|t| !t.is_empty()).ok_or_else(missing)?;
        let temps = data
            .temperature_2m
            .as_ref()
            .filter(|t| !t.is_empty())
            .ok_or_else(missing)?;
        if times.len() != temps.len() {
            return Err(WeatherError::MissingData(format!(
                "hourly temperature data ({} timestamps, {} temperatures).",
                times.len(),
                temps.len()
            )));
        }

        let mut instants = Vec::with_capacity(times.len());
        let mut values = Vec::with_capacity(temps.len());
        for (raw_time, temp) in times.iter().zip(temps) {
            let Some(value) = temp else {
                warn!(time = %raw_time, "Skipping hour without temperature");
                continue;
            };
            instants.push(Self::parse_local_datetime(raw_time, timezone)?);
            values.push(*value);
        }

        Series::from_columns(instants, values).map_err(|e| match e {
            DomainError::LengthMismatch { .. } => WeatherError::MissingData(e.to_string()),
            other => WeatherError::ParseError(other.to_string()),
        })
    }

    /// Parse an API timestamp into local wall-clock time
    fn parse_local_datetime(s: &str, timezone: &Timezone) -> Result<NaiveDateTime, WeatherError> {
        // Open-Meteo default (2024-01-15T14:00)
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M") {
            return Ok(dt);
        }

        if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
            return Ok(dt);
        }

        // Offset-qualified timestamps are converted to the location's wall clock
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Ok(dt.with_timezone(&timezone.tz()).naive_local());
        }

        Err(WeatherError::ParseError(format!(
            "Invalid datetime format: {s}"
        )))
    }
}
