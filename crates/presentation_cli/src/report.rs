//! Fetch and slice pipeline shared by the `current`, `window` and `report`
//! commands

use chrono::{DateTime, NaiveDateTime, Utc};
use domain::{GeoLocation, Series, TimeWindow, Timezone};
use integration_weather::{CurrentWeather, OpenMeteoClient};
use tracing::{info, instrument, warn};

use crate::config::AppConfig;
use crate::error::AppError;

/// Format used for reference hours in output and errors
pub const REFERENCE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// What to fetch and how to slice it
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRequest {
    /// Display name of the location
    pub location_name: String,
    /// Coordinates sent to the API
    pub location: GeoLocation,
    /// Timezone the API reports local times in
    pub timezone: Timezone,
    /// Extent around the reference hour
    pub window: TimeWindow,
    /// Fixed reference hour; `None` means the current local hour
    pub reference: Option<NaiveDateTime>,
}

impl ReportRequest {
    /// Build a request from validated configuration
    ///
    /// # Errors
    ///
    /// Returns `AppError::InvalidConfig` for bad coordinates or timezone.
    pub fn from_config(config: &AppConfig) -> Result<Self, AppError> {
        Ok(Self {
            location_name: config.location.name.clone(),
            location: config.location.to_geo_location()?,
            timezone: config.location.to_timezone()?,
            window: config.window.to_time_window(),
            reference: None,
        })
    }

    /// Override the hours on either side of the reference
    #[must_use]
    pub fn with_hours(mut self, past_hours: Option<u32>, future_hours: Option<u32>) -> Self {
        let past = past_hours.map_or_else(|| self.window.past().num_hours(), i64::from);
        let future = future_hours.map_or_else(|| self.window.future().num_hours(), i64::from);
        self.window = TimeWindow::from_hours(
            u32::try_from(past).unwrap_or(u32::MAX),
            u32::try_from(future).unwrap_or(u32::MAX),
        );
        self
    }

    /// Pin the reference hour instead of using the current time
    #[must_use]
    pub const fn with_reference(mut self, reference: Option<NaiveDateTime>) -> Self {
        self.reference = reference;
        self
    }

    /// Reference hour: the pinned one, or the start of the current hour in
    /// `timezone`
    #[must_use]
    pub fn resolve_reference(&self, timezone: &Timezone, now: DateTime<Utc>) -> NaiveDateTime {
        self.reference
            .unwrap_or_else(|| timezone.local_hour_start(now))
    }
}

/// Temperatures inside the window around a reference hour
#[derive(Debug, Clone, PartialEq)]
pub struct TemperatureWindow {
    /// Display name of the location
    pub location_name: String,
    /// Timezone of `reference` and every sample
    pub timezone: Timezone,
    /// Reference hour, local wall clock
    pub reference: NaiveDateTime,
    /// Extent around `reference`
    pub window: TimeWindow,
    /// Current conditions, when fetched
    pub current: Option<CurrentWeather>,
    /// Samples inside the window, ascending
    pub samples: Series<NaiveDateTime>,
}

impl TemperatureWindow {
    /// Slice `series` to the window of `request`
    #[must_use]
    pub fn build(
        request: &ReportRequest,
        timezone: Timezone,
        series: &Series<NaiveDateTime>,
        current: Option<CurrentWeather>,
        now: DateTime<Utc>,
    ) -> Self {
        let reference = request.resolve_reference(&timezone, now);
        let samples = series.window(&reference, &request.window);

        if samples.is_empty() {
            warn!(
                reference = %reference.format(REFERENCE_FORMAT),
                window = %request.window,
                available = series.len(),
                "No hourly samples inside window"
            );
        } else {
            info!(
                reference = %reference.format(REFERENCE_FORMAT),
                window = %request.window,
                samples = samples.len(),
                "Sliced hourly temperatures"
            );
        }

        Self {
            location_name: request.location_name.clone(),
            timezone,
            reference,
            window: request.window,
            current,
            samples,
        }
    }

    /// Samples for display, or `AppError::EmptyWindow`
    ///
    /// # Errors
    ///
    /// Returns `AppError::EmptyWindow` if no sample fell inside the window.
    pub fn non_empty_samples(&self) -> Result<&Series<NaiveDateTime>, AppError> {
        if self.samples.is_empty() {
            return Err(AppError::EmptyWindow {
                reference: self.reference.format(REFERENCE_FORMAT).to_string(),
                window: self.window.to_string(),
            });
        }
        Ok(&self.samples)
    }
}

/// Fetch current conditions only
///
/// # Errors
///
/// Returns `AppError::Weather` on transport or schema failure.
#[instrument(skip(client, request), fields(location = %request.location_name))]
pub async fn fetch_current(
    client: &OpenMeteoClient,
    request: &ReportRequest,
) -> Result<CurrentWeather, AppError> {
    Ok(client
        .get_current(&request.location, &request.timezone)
        .await?)
}

/// Fetch the hourly series and slice it, without current conditions
///
/// # Errors
///
/// Returns `AppError::Weather` on transport or schema failure.
#[instrument(skip(client, request), fields(location = %request.location_name))]
pub async fn fetch_window(
    client: &OpenMeteoClient,
    request: &ReportRequest,
    now: DateTime<Utc>,
) -> Result<TemperatureWindow, AppError> {
    let hourly = client
        .get_hourly(&request.location, &request.timezone)
        .await?;
    Ok(TemperatureWindow::build(
        request,
        hourly.timezone,
        &hourly.series,
        None,
        now,
    ))
}

/// Fetch current conditions and the hourly series in one request, then slice
///
/// # Errors
///
/// Returns `AppError::Weather` on transport or schema failure.
#[instrument(skip(client, request), fields(location = %request.location_name))]
pub async fn fetch_report(
    client: &OpenMeteoClient,
    request: &ReportRequest,
    now: DateTime<Utc>,
) -> Result<TemperatureWindow, AppError> {
    let report = client
        .get_report(&request.location, &request.timezone)
        .await?;
    Ok(TemperatureWindow::build(
        request,
        report.timezone,
        &report.hourly,
        Some(report.current),
        now,
    ))
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use domain::Sample;

    use super::*;

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, day)
            .and_then(|d| d.and_hms_opt(hour, 0, 0))
            .expect("valid date")
    }

    fn hourly_two_days() -> Series<NaiveDateTime> {
        let samples = (0..48_u32)
            .map(|i| Sample::new(at(15 + i / 24, i % 24), f64::from(i)))
            .collect();
        Series::new(samples).expect("ordered")
    }

    fn request() -> ReportRequest {
        ReportRequest::from_config(&AppConfig::default()).expect("default config is valid")
    }

    #[test]
    fn from_config_uses_defaults() {
        let request = request();
        assert_eq!(request.location_name, "Wroclaw");
        assert_eq!(request.timezone, Timezone::warsaw());
        assert_eq!(request.window, TimeWindow::from_hours(8, 8));
        assert!(request.reference.is_none());
    }

    #[test]
    fn with_hours_overrides_one_side() {
        let request = request().with_hours(Some(2), None);
        assert_eq!(request.window, TimeWindow::from_hours(2, 8));
    }

    #[test]
    fn reference_defaults_to_local_hour() {
        let now = DateTime::parse_from_rfc3339("2024-01-15T11:37:12Z")
            .expect("valid")
            .with_timezone(&Utc);
        let reference = request().resolve_reference(&Timezone::warsaw(), now);
        assert_eq!(reference, at(15, 12));
    }

    #[test]
    fn pinned_reference_wins() {
        let request = request().with_reference(Some(at(16, 3)));
        let reference = request.resolve_reference(&Timezone::warsaw(), Utc::now());
        assert_eq!(reference, at(16, 3));
    }

    #[test]
    fn build_slices_seventeen_hours() {
        let request = request().with_reference(Some(at(15, 12)));
        let window = TemperatureWindow::build(
            &request,
            Timezone::warsaw(),
            &hourly_two_days(),
            None,
            Utc::now(),
        );

        assert_eq!(window.samples.len(), 17);
        assert_eq!(window.samples.first().map(|s| s.instant), Some(at(15, 4)));
        assert_eq!(window.samples.last().map(|s| s.instant), Some(at(15, 20)));
        assert!(window.non_empty_samples().is_ok());
    }

    #[test]
    fn build_clips_at_series_start() {
        let request = request().with_reference(Some(at(15, 2)));
        let window = TemperatureWindow::build(
            &request,
            Timezone::warsaw(),
            &hourly_two_days(),
            None,
            Utc::now(),
        );
        assert_eq!(window.samples.len(), 11);
    }

    #[test]
    fn empty_window_is_error_at_display() {
        let request = request().with_reference(Some(at(20, 12)));
        let window = TemperatureWindow::build(
            &request,
            Timezone::warsaw(),
            &hourly_two_days(),
            None,
            Utc::now(),
        );

        assert!(window.samples.is_empty());
        let err = window.non_empty_samples().unwrap_err();
        assert!(matches!(err, AppError::EmptyWindow { .. }));
        assert!(err.to_string().contains("2024-01-20 12:00"));
    }
}
