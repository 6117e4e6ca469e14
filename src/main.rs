// Main entry point - Dependency injection and command dispatch
mod application;
mod domain;
mod infrastructure;
mod presentation;

use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;

use crate::application::pipeline::HliPipeline;
use crate::application::scoring_service::ScoringService;
use crate::application::weather_source::WeatherSource;
use crate::infrastructure::config::{load_config, AppConfig};
use crate::infrastructure::csv_store::CsvWeatherSource;
use crate::infrastructure::logging::init_tracing;
use crate::infrastructure::simulated_source::SimulatedWeatherSource;
use crate::presentation::cli::{self, Cli, Commands};

fn weather_source(config: &AppConfig, input: Option<PathBuf>) -> Arc<dyn WeatherSource> {
    match input {
        Some(path) => Arc::new(CsvWeatherSource::new(path)),
        None => Arc::new(SimulatedWeatherSource::new(config.generator.clone())),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    // Load configuration
    let config = load_config(args.config.as_deref())?;

    // Initialize tracing
    let level = if args.verbose {
        "debug"
    } else {
        config.logging.level.as_str()
    };
    init_tracing(args.json || config.logging.json, level);

    let pipeline = HliPipeline::new(config.pipeline.policy, config.pipeline.chunk_size);

    match args.command {
        Commands::Serve => {
            let service = ScoringService::new(weather_source(&config, None), pipeline);
            cli::serve(&config, service).await
        }
        Commands::Export { output, input } => {
            let service = ScoringService::new(weather_source(&config, input), pipeline);
            cli::export(&service, &output).await
        }
        Commands::Summary { input } => {
            let service = ScoringService::new(weather_source(&config, input), pipeline);
            cli::summary(&service).await
        }
        Commands::Config => {
            print!("{}", config.to_toml()?);
            Ok(())
        }
    }
}
