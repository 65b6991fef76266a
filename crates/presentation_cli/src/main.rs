//! tempwindow CLI
//!
//! Prints the current temperature and the hourly temperatures around the
//! present hour, and charts them.

#![allow(clippy::print_stdout)]

use anyhow::Context;
use chrono::Utc;
use clap::Parser;
use integration_weather::OpenMeteoClient;
use presentation_cli::chart::{self, ChartSize};
use presentation_cli::cli::log_filter_from_verbosity;
use presentation_cli::{
    AppConfig, Cli, Commands, OutputFormat, ReportRequest, WindowArgs, display, report,
};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Logs go to stderr so stdout stays clean for piping
fn init_tracing(verbose: u8, json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_filter_from_verbosity(verbose)));

    tracing_subscriber::registry()
        .with(filter)
        .with(json.then(|| tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr)))
        .with((!json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr)))
        .init();
}

fn request_for(config: &AppConfig, args: &WindowArgs) -> anyhow::Result<ReportRequest> {
    Ok(ReportRequest::from_config(config)?
        .with_hours(args.past_hours, args.future_hours)
        .with_reference(args.at))
}

fn weather_client(config: &AppConfig) -> anyhow::Result<OpenMeteoClient> {
    OpenMeteoClient::new(config.weather.clone()).context("Failed to create HTTP client")
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.log_json);

    let config = AppConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    config.validate()?;

    match cli.command.unwrap_or_default() {
        Commands::Config => {
            print!("{}", toml::to_string_pretty(&config)?);
        },
        Commands::Current => {
            let client = weather_client(&config)?;
            let request = ReportRequest::from_config(&config)?;
            let current = report::fetch_current(&client, &request).await?;
            println!("{}", display::current_line(&request.location_name, &current));
        },
        Commands::Window { window, format } => {
            let client = weather_client(&config)?;
            let request = request_for(&config, &window)?;
            let temperatures = report::fetch_window(&client, &request, Utc::now()).await?;
            match format {
                OutputFormat::Text => println!("{}", display::window_table(&temperatures)?),
                OutputFormat::Json => println!("{}", display::window_json(&temperatures)?),
            }
        },
        Commands::Report {
            window,
            output,
            no_chart,
        } => {
            let client = weather_client(&config)?;
            let request = request_for(&config, &window)?;
            let temperatures = report::fetch_report(&client, &request, Utc::now()).await?;

            if let Some(current) = &temperatures.current {
                println!("{}", display::current_line(&request.location_name, current));
            }
            println!("{}", display::window_table(&temperatures)?);

            if !no_chart && config.chart.enabled {
                let path = output.unwrap_or_else(|| config.chart.output.clone());
                let size = ChartSize {
                    width: config.chart.width,
                    height: config.chart.height,
                };
                chart::render_svg(&temperatures, &path, size)
                    .with_context(|| format!("Failed to write chart to {}", path.display()))?;
                info!(path = %path.display(), "Chart saved");
                println!("Chart saved to {}", path.display());
            }
        },
    }

    Ok(())
}
