//! Text and JSON rendering of fetched temperatures

use std::fmt::Write as _;

use integration_weather::CurrentWeather;
use serde_json::json;

use crate::error::AppError;
use crate::report::{REFERENCE_FORMAT, TemperatureWindow};

/// One-line current temperature, e.g.
/// `Current temperature in Wroclaw: 5.5°C (☁️ Overcast)`
#[must_use]
pub fn current_line(location_name: &str, current: &CurrentWeather) -> String {
    format!(
        "Current temperature in {location_name}: {}",
        current.summary()
    )
}

/// Table of the windowed samples with a min/max/mean footer
///
/// # Errors
///
/// Returns `AppError::EmptyWindow` if the window holds no samples.
pub fn window_table(window: &TemperatureWindow) -> Result<String, AppError> {
    let samples = window.non_empty_samples()?;

    let mut out = format!(
        "Temperatures in {} ({} around {}, {})\n",
        window.location_name,
        window.window,
        window.reference.format(REFERENCE_FORMAT),
        window.timezone,
    );

    for sample in samples {
        let marker = if sample.instant == window.reference {
            "  <- now"
        } else {
            ""
        };
        // Writing to a String cannot fail
        let _ = writeln!(
            out,
            "  {}  {:>6.1}°C{marker}",
            sample.instant.format(REFERENCE_FORMAT),
            sample.value
        );
    }

    if let (Some(min), Some(max), Some(mean)) =
        (samples.min_value(), samples.max_value(), samples.mean_value())
    {
        let _ = write!(
            out,
            "min {min:.1}°C  max {max:.1}°C  mean {mean:.1}°C ({} samples)",
            samples.len()
        );
    }

    Ok(out)
}

/// Pretty JSON document of the window
///
/// # Errors
///
/// Returns `AppError::EmptyWindow` if the window holds no samples, or
/// `AppError::Serialization` if encoding fails.
pub fn window_json(window: &TemperatureWindow) -> Result<String, AppError> {
    let samples = window.non_empty_samples()?;

    let document = json!({
        "location": window.location_name,
        "timezone": window.timezone,
        "reference": window.reference,
        "past_hours": window.window.past().num_hours(),
        "future_hours": window.window.future().num_hours(),
        "current": window.current,
        "samples": samples,
        "stats": {
            "min": samples.min_value(),
            "max": samples.max_value(),
            "mean": samples.mean_value(),
        },
    });

    Ok(serde_json::to_string_pretty(&document)?)
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime};
    use domain::{Sample, Series, TimeWindow, Timezone};
    use integration_weather::WeatherCondition;

    use super::*;

    fn at(hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 15)
            .and_then(|d| d.and_hms_opt(hour, 0, 0))
            .expect("valid date")
    }

    fn window_with(samples: Vec<Sample<NaiveDateTime>>) -> TemperatureWindow {
        TemperatureWindow {
            location_name: "Wroclaw".to_string(),
            timezone: Timezone::warsaw(),
            reference: at(11),
            window: TimeWindow::from_hours(1, 1),
            current: None,
            samples: Series::new(samples).expect("ordered"),
        }
    }

    fn current() -> CurrentWeather {
        CurrentWeather {
            time: Some(at(11)),
            temperature: 5.5,
            wind_speed: Some(12.0),
            wind_direction: Some(200.0),
            condition: Some(WeatherCondition::Overcast),
            is_day: Some(true),
        }
    }

    #[test]
    fn current_line_includes_condition() {
        assert_eq!(
            current_line("Wroclaw", &current()),
            "Current temperature in Wroclaw: 5.5°C (☁️ Overcast)"
        );
    }

    #[test]
    fn table_lists_samples_and_stats() {
        let window = window_with(vec![
            Sample::new(at(10), 4.0),
            Sample::new(at(11), 5.0),
            Sample::new(at(12), 9.0),
        ]);
        let table = window_table(&window).expect("non-empty");

        assert!(table.starts_with(
            "Temperatures in Wroclaw (-1h/+1h around 2024-01-15 11:00, Europe/Warsaw)"
        ));
        assert!(table.contains("2024-01-15 10:00     4.0°C\n"));
        assert!(table.contains("2024-01-15 11:00     5.0°C  <- now"));
        assert!(table.ends_with("min 4.0°C  max 9.0°C  mean 6.0°C (3 samples)"));
    }

    #[test]
    fn table_rejects_empty_window() {
        let err = window_table(&window_with(Vec::new())).unwrap_err();
        assert!(matches!(err, AppError::EmptyWindow { .. }));
    }

    #[test]
    fn json_contains_samples_and_stats() {
        let mut window = window_with(vec![Sample::new(at(10), 4.0), Sample::new(at(12), 8.0)]);
        window.current = Some(current());

        let rendered = window_json(&window).expect("non-empty");
        let value: serde_json::Value = serde_json::from_str(&rendered).expect("valid json");

        assert_eq!(value["location"], "Wroclaw");
        assert_eq!(value["timezone"], "Europe/Warsaw");
        assert_eq!(value["reference"], "2024-01-15T11:00:00");
        assert_eq!(value["past_hours"], 1);
        assert_eq!(value["samples"].as_array().map(Vec::len), Some(2));
        assert_eq!(value["samples"][1]["value"], 8.0);
        assert_eq!(value["stats"]["mean"], 6.0);
        assert_eq!(value["current"]["condition"], "overcast");
    }

    #[test]
    fn json_rejects_empty_window() {
        assert!(window_json(&window_with(Vec::new())).is_err());
    }
}
