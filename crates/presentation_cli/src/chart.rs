//! SVG line chart of the windowed temperatures

use std::ops::Range;
use std::path::Path;

use chrono::{NaiveDateTime, TimeDelta};
use plotters::coord::types::RangedDateTime;
use plotters::prelude::*;
use tracing::{debug, instrument};

use crate::error::AppError;
use crate::report::{REFERENCE_FORMAT, TemperatureWindow};

/// Pixel size of the rendered chart
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartSize {
    pub width: u32,
    pub height: u32,
}

/// Chart caption, e.g. `Temperature in Wroclaw (8h back, 8h ahead)`
#[must_use]
pub fn chart_title(window: &TemperatureWindow) -> String {
    format!(
        "Temperature in {} ({}h back, {}h ahead)",
        window.location_name,
        window.window.past().num_hours(),
        window.window.future().num_hours()
    )
}

/// X and Y ranges covering every sample and the reference hour
///
/// A single point is padded by an hour on the time axis; a flat series by
/// one degree on the value axis.
#[must_use]
pub fn axis_ranges(window: &TemperatureWindow) -> Option<(Range<NaiveDateTime>, Range<f64>)> {
    let first = window.samples.first()?.instant;
    let last = window.samples.last()?.instant;
    let min = window.samples.min_value()?;
    let max = window.samples.max_value()?;

    let mut start = first.min(window.reference);
    let mut end = last.max(window.reference);
    if start == end {
        start -= TimeDelta::hours(1);
        end += TimeDelta::hours(1);
    }

    let padding = if (max - min).abs() > 1e-6 {
        (max - min) * 0.1
    } else {
        1.0
    };

    Some((start..end, (min - padding)..(max + padding)))
}

fn chart_error(e: impl std::fmt::Display) -> AppError {
    AppError::Chart(e.to_string())
}

/// Render the window as an SVG file at `path`
///
/// # Errors
///
/// Returns `AppError::EmptyWindow` if there is nothing to plot, or
/// `AppError::Chart` if drawing or writing the file fails.
#[instrument(skip(window), fields(samples = window.samples.len()))]
pub fn render_svg(window: &TemperatureWindow, path: &Path, size: ChartSize) -> Result<(), AppError> {
    let samples = window.non_empty_samples()?;
    let (x_range, y_range) = axis_ranges(window).ok_or_else(|| AppError::EmptyWindow {
        reference: window.reference.format(REFERENCE_FORMAT).to_string(),
        window: window.window.to_string(),
    })?;

    let root = SVGBackend::new(path, (size.width, size.height)).into_drawing_area();
    root.fill(&WHITE).map_err(chart_error)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(chart_title(window), ("sans-serif", 24))
        .margin(12)
        .x_label_area_size(48)
        .y_label_area_size(56)
        .build_cartesian_2d(RangedDateTime::from(x_range), y_range.clone())
        .map_err(chart_error)?;

    chart
        .configure_mesh()
        .x_desc(format!("Local time ({})", window.timezone))
        .y_desc("Temperature (°C)")
        .x_label_formatter(&|dt: &NaiveDateTime| dt.format("%d.%m %H:%M").to_string())
        .light_line_style(BLACK.mix(0.15))
        .draw()
        .map_err(chart_error)?;

    let points: Vec<(NaiveDateTime, f64)> = samples.iter().map(|s| (s.instant, s.value)).collect();

    chart
        .draw_series(LineSeries::new(points.iter().copied(), BLUE.stroke_width(2)))
        .map_err(chart_error)?;
    chart
        .draw_series(
            points
                .iter()
                .map(|&(instant, value)| Circle::new((instant, value), 3, BLUE.filled())),
        )
        .map_err(chart_error)?;

    // Reference hour marker
    chart
        .draw_series(LineSeries::new(
            [
                (window.reference, y_range.start),
                (window.reference, y_range.end),
            ],
            RED.mix(0.6),
        ))
        .map_err(chart_error)?;

    root.present().map_err(chart_error)?;
    debug!(path = %path.display(), "Chart written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use domain::{Sample, Series, TimeWindow, Timezone};

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
            reference: at(12),
            window: TimeWindow::from_hours(8, 8),
            current: None,
            samples: Series::new(samples).expect("ordered"),
        }
    }

    const SIZE: ChartSize = ChartSize {
        width: 640,
        height: 320,
    };

    #[test]
    fn title_names_location_and_extent() {
        assert_eq!(
            chart_title(&window_with(Vec::new())),
            "Temperature in Wroclaw (8h back, 8h ahead)"
        );
    }

    #[test]
    fn ranges_cover_samples_and_reference() {
        let window = window_with(vec![Sample::new(at(13), 2.0), Sample::new(at(15), 12.0)]);
        let (x, y) = axis_ranges(&window).expect("non-empty");
        assert_eq!(x, at(12)..at(15));
        assert!((y.start - 1.0).abs() < 1e-9);
        assert!((y.end - 13.0).abs() < 1e-9);
    }

    #[test]
    fn single_point_is_padded() {
        let window = window_with(vec![Sample::new(at(12), 4.0)]);
        let (x, y) = axis_ranges(&window).expect("non-empty");
        assert_eq!(x, at(11)..at(13));
        assert!((y.start - 3.0).abs() < 1e-9);
        assert!((y.end - 5.0).abs() < 1e-9);
    }

    #[test]
    fn empty_window_has_no_ranges() {
        assert!(axis_ranges(&window_with(Vec::new())).is_none());
    }

    #[test]
    fn renders_svg_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("chart.svg");
        let window = window_with(
            (4..=20)
                .map(|h| Sample::new(at(h), f64::from(h) / 2.0))
                .collect(),
        );

        render_svg(&window, &path, SIZE).expect("render");

        let svg = std::fs::read_to_string(&path).expect("read chart");
        assert!(svg.contains("<svg"));
        assert!(svg.contains("Temperature in Wroclaw"));
    }

    #[test]
    fn empty_window_writes_nothing() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("chart.svg");

        let err = render_svg(&window_with(Vec::new()), &path, SIZE).unwrap_err();
        assert!(matches!(err, AppError::EmptyWindow { .. }));
        assert!(!path.exists());
    }
}
