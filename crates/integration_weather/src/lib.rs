//! Open-Meteo weather integration
//!
//! Client for the Open-Meteo Weather API (<https://open-meteo.com>).
//! Fetches the current temperature and the hourly temperature series for a
//! location without requiring an API key.

pub mod client;
mod models;

pub use client::{OpenMeteoClient, WeatherConfig, WeatherError};
pub use models::{CurrentWeather, HourlyTemperatures, TemperatureReport, WeatherCondition};
