//! Weather data models
//!
//! Types for the Open-Meteo forecast response (`current_weather` plus the
//! hourly `temperature_2m` series) and the parsed values built from it.

use chrono::NaiveDateTime;
use domain::{GeoLocation, Series, Timezone};
use serde::{Deserialize, Serialize};

/// Weather condition derived from WMO weather codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeatherCondition {
    /// Clear sky (WMO 0)
    ClearSky,
    /// Mainly clear (WMO 1)
    MainlyClear,
    /// Partly cloudy (WMO 2)
    PartlyCloudy,
    /// Overcast (WMO 3)
    Overcast,
    /// Fog (WMO 45, 48)
    Fog,
    /// Drizzle (WMO 51, 53, 55)
    Drizzle,
    /// Freezing drizzle (WMO 56, 57)
    FreezingDrizzle,
    /// Rain (WMO 61, 63, 65)
    Rain,
    /// Freezing rain (WMO 66, 67)
    FreezingRain,
    /// Snow (WMO 71, 73, 75)
    Snow,
    /// Snow grains (WMO 77)
    SnowGrains,
    /// Rain showers (WMO 80, 81, 82)
    RainShowers,
    /// Snow showers (WMO 85, 86)
    SnowShowers,
    /// Thunderstorm (WMO 95)
    Thunderstorm,
    /// Thunderstorm with hail (WMO 96, 99)
    ThunderstormWithHail,
    /// Unknown condition
    Unknown,
}

impl WeatherCondition {
    /// Convert WMO weather code to `WeatherCondition`
    ///
    /// See: <https://open-meteo.com/en/docs> for WMO code reference
    #[must_use]
    pub const fn from_wmo_code(code: u8) -> Self {
        match code {
            0 => Self::ClearSky,
            1 => Self::MainlyClear,
            2 => Self::PartlyCloudy,
            3 => Self::Overcast,
            45 | 48 => Self::Fog,
            51 | 53 | 55 => Self::Drizzle,
            56 | 57 => Self::FreezingDrizzle,
            61 | 63 | 65 => Self::Rain,
            66 | 67 => Self::FreezingRain,
            71 | 73 | 75 => Self::Snow,
            77 => Self::SnowGrains,
            80..=82 => Self::RainShowers,
            85 | 86 => Self::SnowShowers,
            95 => Self::Thunderstorm,
            96 | 99 => Self::ThunderstormWithHail,
            _ => Self::Unknown,
        }
    }

    /// Get a human-readable description of the weather condition
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::ClearSky => "Clear sky",
            Self::MainlyClear => "Mainly clear",
            Self::PartlyCloudy => "Partly cloudy",
            Self::Overcast => "Overcast",
            Self::Fog => "Fog",
            Self::Drizzle => "Drizzle",
            Self::FreezingDrizzle => "Freezing drizzle",
            Self::Rain => "Rain",
            Self::FreezingRain => "Freezing rain",
            Self::Snow => "Snow",
            Self::SnowGrains => "Snow grains",
            Self::RainShowers => "Rain showers",
            Self::SnowShowers => "Snow showers",
            Self::Thunderstorm => "Thunderstorm",
            Self::ThunderstormWithHail => "Thunderstorm with hail",
            Self::Unknown => "Unknown",
        }
    }

    /// Get an emoji representation of the weather condition
    #[must_use]
    pub const fn emoji(&self) -> &'static str {
        match self {
            Self::ClearSky => "☀️",
            Self::MainlyClear => "🌤️",
            Self::PartlyCloudy => "⛅",
            Self::Overcast => "☁️",
            Self::Fog => "🌫️",
            Self::Drizzle | Self::Rain | Self::RainShowers => "🌧️",
            Self::FreezingDrizzle | Self::FreezingRain => "🌨️",
            Self::Snow | Self::SnowGrains | Self::SnowShowers => "❄️",
            Self::Thunderstorm | Self::ThunderstormWithHail => "⛈️",
            Self::Unknown => "❓",
        }
    }
}

impl std::fmt::Display for WeatherCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// Current weather observation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentWeather {
    /// Observation time, local wall clock of the location
    pub time: Option<NaiveDateTime>,
    /// Temperature in Celsius
    pub temperature: f64,
    /// Wind speed in km/h
    pub wind_speed: Option<f64>,
    /// Wind direction in degrees (0-360)
    pub wind_direction: Option<f64>,
    /// Weather condition, when the API reported a code
    pub condition: Option<WeatherCondition>,
    /// Whether it is daytime at the location
    pub is_day: Option<bool>,
}

impl CurrentWeather {
    /// Temperature with an optional condition suffix, e.g. `5.5°C (☁️ Overcast)`
    #[must_use]
    pub fn summary(&self) -> String {
        match self.condition {
            Some(condition) => format!(
                "{:.1}°C ({} {})",
                self.temperature,
                condition.emoji(),
                condition.description()
            ),
            None => format!("{:.1}°C", self.temperature),
        }
    }
}

/// Hourly temperatures keyed by local wall-clock time
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourlyTemperatures {
    /// Timezone the timestamps are expressed in
    pub timezone: Timezone,
    /// Ordered temperature samples
    pub series: Series<NaiveDateTime>,
}

/// Current conditions and hourly series from a single request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemperatureReport {
    /// Grid cell the API resolved the request to
    pub location: GeoLocation,
    /// Elevation of the grid cell in meters
    pub elevation: Option<f64>,
    /// Timezone of all local timestamps in this report
    pub timezone: Timezone,
    /// Current weather
    pub current: CurrentWeather,
    /// Hourly temperatures
    pub hourly: Series<NaiveDateTime>,
}

/// Raw `current_weather` object
#[derive(Debug, Clone, Deserialize)]
pub struct CurrentWeatherData {
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub temperature: Option<f64>,
    #[serde(default)]
    pub windspeed: Option<f64>,
    #[serde(default)]
    pub winddirection: Option<f64>,
    #[serde(default)]
    pub weathercode: Option<u8>,
    #[serde(default)]
    pub is_day: Option<u8>,
}

/// Raw `hourly` object
#[derive(Debug, Clone, Deserialize)]
pub struct HourlyData {
    #[serde(default)]
    pub time: Option<Vec<String>>,
    #[serde(default)]
    pub temperature_2m: Option<Vec<Option<f64>>>,
}

/// Raw API response
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default)]
    pub elevation: Option<f64>,
    #[serde(default)]
    pub current_weather: Option<CurrentWeatherData>,
    #[serde(default)]
    pub hourly: Option<HourlyData>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wmo_code_clear() {
        assert_eq!(
            WeatherCondition::from_wmo_code(0),
            WeatherCondition::ClearSky
        );
        assert_eq!(
            WeatherCondition::from_wmo_code(1),
            WeatherCondition::MainlyClear
        );
        assert_eq!(
            WeatherCondition::from_wmo_code(2),
            WeatherCondition::PartlyCloudy
        );
        assert_eq!(
            WeatherCondition::from_wmo_code(3),
            WeatherCondition::Overcast
        );
    }

    #[test]
    fn test_wmo_code_precipitation() {
        assert_eq!(
            WeatherCondition::from_wmo_code(51),
            WeatherCondition::Drizzle
        );
        assert_eq!(WeatherCondition::from_wmo_code(61), WeatherCondition::Rain);
        assert_eq!(WeatherCondition::from_wmo_code(71), WeatherCondition::Snow);
        assert_eq!(
            WeatherCondition::from_wmo_code(81),
            WeatherCondition::RainShowers
        );
        assert_eq!(
            WeatherCondition::from_wmo_code(99),
            WeatherCondition::ThunderstormWithHail
        );
    }

    #[test]
    fn test_wmo_code_unknown() {
        assert_eq!(
            WeatherCondition::from_wmo_code(100),
            WeatherCondition::Unknown
        );
        assert_eq!(
            WeatherCondition::from_wmo_code(255),
            WeatherCondition::Unknown
        );
    }

    #[test]
    fn test_weather_condition_display() {
        assert_eq!(format!("{}", WeatherCondition::Fog), "Fog");
        assert_eq!(
            format!("{}", WeatherCondition::FreezingRain),
            "Freezing rain"
        );
    }

    #[test]
    fn test_weather_condition_serialization() {
        let json = serde_json::to_string(&WeatherCondition::ClearSky).expect("serialize");
        assert_eq!(json, "\"clear_sky\"");
    }

    #[test]
    fn test_current_weather_summary_with_condition() {
        let weather = CurrentWeather {
            time: None,
            temperature: 5.46,
            wind_speed: Some(12.5),
            wind_direction: Some(225.0),
            condition: Some(WeatherCondition::Overcast),
            is_day: Some(true),
        };
        assert_eq!(weather.summary(), "5.5°C (☁️ Overcast)");
    }

    #[test]
    fn test_current_weather_summary_without_condition() {
        let weather = CurrentWeather {
            time: None,
            temperature: -3.04,
            wind_speed: None,
            wind_direction: None,
            condition: None,
            is_day: None,
        };
        assert_eq!(weather.summary(), "-3.0°C");
    }

    #[test]
    fn test_api_response_tolerates_missing_sections() {
        let response: ApiResponse =
            serde_json::from_str(r#"{"latitude": 51.1, "longitude": 17.04}"#).expect("parse");
        assert!(response.current_weather.is_none());
        assert!(response.hourly.is_none());
        assert!(response.timezone.is_none());
    }

    #[test]
    fn test_hourly_data_accepts_nulls() {
        let hourly: HourlyData = serde_json::from_str(
            r#"{"time": ["2024-01-15T00:00", "2024-01-15T01:00"], "temperature_2m": [1.5, null]}"#,
        )
        .expect("parse");
        assert_eq!(hourly.temperature_2m, Some(vec![Some(1.5), None]));
    }
}
