//! tempwindow
//!
//! Fetches current and hourly temperatures from Open-Meteo, keeps the hours
//! around the present, and prints or charts them.

pub mod chart;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod report;

pub use cli::{Cli, Commands, OutputFormat, WindowArgs};
pub use config::AppConfig;
pub use error::AppError;
pub use report::{ReportRequest, TemperatureWindow};
