//! CLI error type

use domain::DomainError;
use integration_weather::WeatherError;
use thiserror::Error;

/// Errors surfaced by the `tempwindow` commands
#[derive(Debug, Error)]
pub enum AppError {
    /// A configuration source could not be read or deserialized
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// A configuration value is out of range
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Fetching or decoding weather data failed
    #[error(transparent)]
    Weather(#[from] WeatherError),

    /// Domain invariant violated
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// The window around the reference hour holds no samples
    #[error("No data available for the selected time window ({window} around {reference})")]
    EmptyWindow {
        /// Reference hour, local time
        reference: String,
        /// Window extent, e.g. `-8h/+8h`
        window: String,
    },

    /// Chart rendering failed
    #[error("Failed to render chart: {0}")]
    Chart(String),

    /// JSON output failed
    #[error("Failed to serialize output: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_window_message() {
        let err = AppError::EmptyWindow {
            reference: "2024-01-15 12:00".to_string(),
            window: "-8h/+8h".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "No data available for the selected time window (-8h/+8h around 2024-01-15 12:00)"
        );
    }

    #[test]
    fn weather_error_is_transparent() {
        let err: AppError = WeatherError::MissingData("temperature data.".to_string()).into();
        assert_eq!(err.to_string(), "Weather API response missing temperature data.");
    }

    #[test]
    fn domain_error_converts() {
        let err: AppError = DomainError::length_mismatch(3, 2).into();
        assert!(matches!(err, AppError::Domain(_)));
    }
}
