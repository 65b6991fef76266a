//! Command-line arguments

use std::path::PathBuf;

use chrono::NaiveDateTime;
use clap::{Args, Parser, Subcommand, ValueEnum};

/// tempwindow CLI
#[derive(Parser, Debug)]
#[command(name = "tempwindow")]
#[command(author, version, about = "Current and hourly temperatures around the present hour", long_about = None)]
pub struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Configuration file (default: ./tempwindow.toml if present)
    #[arg(short, long, global = true, env = "TEMPWINDOW_CONFIG")]
    pub config: Option<PathBuf>,

    /// Command to run (default: report)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Print the current temperature
    Current,

    /// Print hourly temperatures around the reference hour
    Window {
        #[command(flatten)]
        window: WindowArgs,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Print the current temperature and the window, then chart it
    ///
    /// Example: tempwindow report --past-hours 12 --output today.svg
    Report {
        #[command(flatten)]
        window: WindowArgs,

        /// Chart output path (default from config: temperature_window.svg)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Skip writing the chart
        #[arg(long)]
        no_chart: bool,
    },

    /// Print the effective configuration as TOML
    Config,
}

impl Default for Commands {
    fn default() -> Self {
        Self::Report {
            window: WindowArgs::default(),
            output: None,
            no_chart: false,
        }
    }
}

/// Window overrides shared by `window` and `report`
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct WindowArgs {
    /// Hours before the reference hour
    #[arg(long)]
    pub past_hours: Option<u32>,

    /// Hours after the reference hour
    #[arg(long)]
    pub future_hours: Option<u32>,

    /// Reference hour in local time, e.g. 2024-01-15T12:00
    #[arg(long, value_parser = parse_reference)]
    pub at: Option<NaiveDateTime>,
}

/// Output format of the `window` command
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Aligned table with min/max/mean footer
    #[default]
    Text,
    /// Pretty-printed JSON document with samples and stats
    Json,
}

/// Parse a local reference time
///
/// Accepts `YYYY-MM-DDTHH:MM`, `YYYY-MM-DD HH:MM` and the same with seconds.
///
/// # Errors
///
/// Returns a message naming the accepted formats.
pub fn parse_reference(value: &str) -> Result<NaiveDateTime, String> {
    const FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S",
    ];
    FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .ok_or_else(|| format!("invalid reference time '{value}', expected YYYY-MM-DDTHH:MM"))
}

/// Determine log filter level from verbosity count
#[must_use]
pub const fn log_filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn log_filter_verbosity_zero() {
        assert_eq!(log_filter_from_verbosity(0), "warn");
    }

    #[test]
    fn log_filter_verbosity_one() {
        assert_eq!(log_filter_from_verbosity(1), "info");
    }

    #[test]
    fn log_filter_verbosity_two() {
        assert_eq!(log_filter_from_verbosity(2), "debug");
    }

    #[test]
    fn log_filter_verbosity_three_or_more() {
        assert_eq!(log_filter_from_verbosity(3), "trace");
        assert_eq!(log_filter_from_verbosity(255), "trace");
    }

    #[test]
    fn parse_reference_accepts_all_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 15)
            .and_then(|d| d.and_hms_opt(12, 0, 0))
            .expect("valid");
        for input in [
            "2024-01-15T12:00",
            "2024-01-15 12:00",
            "2024-01-15T12:00:00",
            "2024-01-15 12:00:00",
        ] {
            assert_eq!(parse_reference(input), Ok(expected), "input {input}");
        }
    }

    #[test]
    fn parse_reference_rejects_garbage() {
        let err = parse_reference("tomorrow").unwrap_err();
        assert!(err.contains("tomorrow"));
        assert!(parse_reference("2024-01-15").is_err());
    }

    #[test]
    fn default_command_is_report() {
        assert!(matches!(
            Commands::default(),
            Commands::Report {
                no_chart: false,
                output: None,
                ..
            }
        ));
    }
}
