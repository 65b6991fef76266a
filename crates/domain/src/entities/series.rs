//! Temperature series entity
//!
//! A `Series` is an immutable, time-ordered run of `(instant, value)`
//! samples. Windowing never mutates the source; it returns a new series.

use serde::Serialize;

use crate::errors::DomainError;
use crate::value_objects::{TimePoint, TimeWindow};

/// A single `(instant, value)` observation, value in degrees Celsius
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sample<T> {
    /// When the value applies
    pub instant: T,
    /// Temperature in Celsius
    pub value: f64,
}

impl<T> Sample<T> {
    /// Create a new sample
    pub const fn new(instant: T, value: f64) -> Self {
        Self { instant, value }
    }
}

/// Samples ordered non-decreasing by instant
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Series<T> {
    samples: Vec<Sample<T>>,
}

impl<T> Default for Series<T> {
    fn default() -> Self {
        Self {
            samples: Vec::new(),
        }
    }
}

impl<T: TimePoint> Series<T> {
    /// Create a series from samples that are already in order
    ///
    /// # Errors
    ///
    /// Returns `DomainError::UnorderedSeries` naming the first sample whose
    /// instant is earlier than its predecessor's.
    pub fn new(samples: Vec<Sample<T>>) -> Result<Self, DomainError> {
        if let Some(pos) = samples
            .windows(2)
            .position(|pair| pair[1].instant < pair[0].instant)
        {
            return Err(DomainError::UnorderedSeries { index: pos + 1 });
        }
        Ok(Self { samples })
    }

    /// Create a series from parallel instant and value columns
    ///
    /// # Errors
    ///
    /// Returns `DomainError::LengthMismatch` if the columns differ in length,
    /// or `DomainError::UnorderedSeries` if the instants are out of order.
    pub fn from_columns(instants: Vec<T>, values: Vec<f64>) -> Result<Self, DomainError> {
        if instants.len() != values.len() {
            return Err(DomainError::length_mismatch(instants.len(), values.len()));
        }
        let samples = instants
            .into_iter()
            .zip(values)
            .map(|(instant, value)| Sample::new(instant, value))
            .collect();
        Self::new(samples)
    }

    /// Samples within `window` around `reference`, in original order
    ///
    /// The result is empty when nothing falls inside the window. Both
    /// endpoints are inclusive.
    #[must_use]
    pub fn window(&self, reference: &T, window: &TimeWindow) -> Self {
        let (start, end) = window.bounds(reference);
        let from = start.map_or(0, |s| self.samples.partition_point(|x| x.instant < s));
        let to = end.map_or(self.samples.len(), |e| {
            self.samples.partition_point(|x| x.instant <= e)
        });
        if from >= to {
            return Self::default();
        }
        Self {
            samples: self.samples[from..to].to_vec(),
        }
    }
}

impl<T> Series<T> {
    /// Number of samples
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the series has no samples
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Iterate over samples in order
    pub fn iter(&self) -> std::slice::Iter<'_, Sample<T>> {
        self.samples.iter()
    }

    /// All samples as a slice
    #[must_use]
    pub fn samples(&self) -> &[Sample<T>] {
        &self.samples
    }

    /// Earliest sample
    #[must_use]
    pub fn first(&self) -> Option<&Sample<T>> {
        self.samples.first()
    }

    /// Latest sample
    #[must_use]
    pub fn last(&self) -> Option<&Sample<T>> {
        self.samples.last()
    }

    /// Lowest value, `None` when empty
    #[must_use]
    pub fn min_value(&self) -> Option<f64> {
        self.samples.iter().map(|s| s.value).reduce(f64::min)
    }

    /// Highest value, `None` when empty
    #[must_use]
    pub fn max_value(&self) -> Option<f64> {
        self.samples.iter().map(|s| s.value).reduce(f64::max)
    }

    /// Arithmetic mean, `None` when empty
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn mean_value(&self) -> Option<f64> {
        if self.samples.is_empty() {
            return None;
        }
        let sum: f64 = self.samples.iter().map(|s| s.value).sum();
        Some(sum / self.samples.len() as f64)
    }

    /// Consume the series and return its samples
    #[must_use]
    pub fn into_samples(self) -> Vec<Sample<T>> {
        self.samples
    }
}

impl<'a, T> IntoIterator for &'a Series<T> {
    type Item = &'a Sample<T>;
    type IntoIter = std::slice::Iter<'a, Sample<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}
