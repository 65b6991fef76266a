//! Application configuration
//!
//! Layered with the `config` crate: serde defaults, then an optional TOML
//! file, then `TEMPWINDOW_*` environment variables (`__` separates nested
//! keys, e.g. `TEMPWINDOW_LOCATION__LATITUDE=50.06`).

use std::path::{Path, PathBuf};

use domain::{DEFAULT_WINDOW_HOURS, GeoLocation, TimeWindow, Timezone};
use integration_weather::WeatherConfig;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::AppError;

/// Config file looked up in the working directory when `--config` is absent
pub const DEFAULT_CONFIG_FILE: &str = "tempwindow";

/// Environment variable prefix
pub const ENV_PREFIX: &str = "TEMPWINDOW";

/// Main application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Location the temperatures are fetched for
    #[serde(default)]
    pub location: LocationConfig,

    /// Open-Meteo client settings
    #[serde(default)]
    pub weather: WeatherConfig,

    /// Window around the reference hour
    #[serde(default)]
    pub window: WindowConfig,

    /// Chart output
    #[serde(default)]
    pub chart: ChartConfig,
}

/// Location configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationConfig {
    /// Display name used in output and chart title
    #[serde(default = "default_location_name")]
    pub name: String,

    /// Latitude (-90.0 to 90.0)
    #[serde(default = "default_latitude")]
    pub latitude: f64,

    /// Longitude (-180.0 to 180.0)
    #[serde(default = "default_longitude")]
    pub longitude: f64,

    /// IANA timezone the API reports local times in
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

fn default_location_name() -> String {
    "Wroclaw".to_string()
}

const fn default_latitude() -> f64 {
    GeoLocation::wroclaw().latitude()
}

const fn default_longitude() -> f64 {
    GeoLocation::wroclaw().longitude()
}

fn default_timezone() -> String {
    Timezone::warsaw().as_str().to_string()
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            name: default_location_name(),
            latitude: default_latitude(),
            longitude: default_longitude(),
            timezone: default_timezone(),
        }
    }
}

impl LocationConfig {
    /// Convert to domain `GeoLocation` value object
    ///
    /// # Errors
    ///
    /// Returns `AppError::InvalidConfig` if coordinates are out of range.
    pub fn to_geo_location(&self) -> Result<GeoLocation, AppError> {
        GeoLocation::new(self.latitude, self.longitude)
            .map_err(|e| AppError::InvalidConfig(format!("location: {e}")))
    }

    /// Parse the configured timezone
    ///
    /// # Errors
    ///
    /// Returns `AppError::InvalidConfig` if the name is not a known IANA zone.
    pub fn to_timezone(&self) -> Result<Timezone, AppError> {
        Timezone::new(&self.timezone).map_err(|e| AppError::InvalidConfig(format!("location: {e}")))
    }
}

/// Window configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowConfig {
    /// Hours before the reference hour
    #[serde(default = "default_window_hours")]
    pub past_hours: u32,

    /// Hours after the reference hour
    #[serde(default = "default_window_hours")]
    pub future_hours: u32,
}

const fn default_window_hours() -> u32 {
    DEFAULT_WINDOW_HOURS
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            past_hours: default_window_hours(),
            future_hours: default_window_hours(),
        }
    }
}

impl WindowConfig {
    /// Convert to domain `TimeWindow`
    #[must_use]
    pub fn to_time_window(&self) -> TimeWindow {
        TimeWindow::from_hours(self.past_hours, self.future_hours)
    }
}

/// Chart configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartConfig {
    /// Render a chart in the `report` command
    #[serde(default = "default_chart_enabled")]
    pub enabled: bool,

    /// SVG output path
    #[serde(default = "default_chart_output")]
    pub output: PathBuf,

    /// Width in pixels
    #[serde(default = "default_chart_width")]
    pub width: u32,

    /// Height in pixels
    #[serde(default = "default_chart_height")]
    pub height: u32,
}

const fn default_chart_enabled() -> bool {
    true
}

fn default_chart_output() -> PathBuf {
    PathBuf::from("temperature_window.svg")
}

const fn default_chart_width() -> u32 {
    1000
}

const fn default_chart_height() -> u32 {
    500
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            enabled: default_chart_enabled(),
            output: default_chart_output(),
            width: default_chart_width(),
            height: default_chart_height(),
        }
    }
}

impl AppConfig {
    /// Load configuration from file and environment
    ///
    /// With `path`, that file must exist. Without it, `tempwindow.toml` in
    /// the working directory is used if present.
    ///
    /// # Errors
    ///
    /// Returns `config::ConfigError` if a source cannot be read or a value
    /// has the wrong type.
    pub fn load(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let builder = config::Config::builder()
            .add_source(file)
            // Override with environment variables (e.g., TEMPWINDOW_WINDOW__PAST_HOURS)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        let config: Self = builder.build()?.try_deserialize()?;
        debug!(?path, location = %config.location.name, "Configuration loaded");
        Ok(config)
    }

    /// Check values the type system cannot
    ///
    /// # Errors
    ///
    /// Returns `AppError::InvalidConfig` describing the first bad value.
    pub fn validate(&self) -> Result<(), AppError> {
        self.location.to_geo_location()?;
        self.location.to_timezone()?;

        if self.location.name.trim().is_empty() {
            return Err(AppError::InvalidConfig(
                "location.name must not be empty".to_string(),
            ));
        }
        if self.weather.timeout_secs == 0 {
            return Err(AppError::InvalidConfig(
                "weather.timeout_secs must be greater than 0".to_string(),
            ));
        }
        if self.weather.past_days > 92 {
            return Err(AppError::InvalidConfig(
                "weather.past_days must be between 0 and 92".to_string(),
            ));
        }
        if !(1..=16).contains(&self.weather.forecast_days) {
            return Err(AppError::InvalidConfig(
                "weather.forecast_days must be between 1 and 16".to_string(),
            ));
        }
        if self.chart.width == 0 || self.chart.height == 0 {
            return Err(AppError::InvalidConfig(
                "chart.width and chart.height must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}
