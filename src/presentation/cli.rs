// Command-line interface
use crate::application::scoring_service::ScoringService;
use crate::domain::risk::RiskTier;
use crate::domain::summary::RiskSummary;
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::csv_store::export_to_path;
use crate::presentation::app_state::AppState;
use crate::presentation::routes::router;
use anyhow::Context;
use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "heat-load-index")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Livestock Heat Load Index scoring", long_about = None)]
pub struct Cli {
    /// Configuration file (defaults to config/hli.toml when present)
    #[arg(short, long, global = true, env = "HLI_CONFIG")]
    pub config: Option<PathBuf>,

    /// Emit JSON-formatted log lines
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Serve the scoring API over HTTP
    Serve,

    /// Score observations and write the results as CSV
    Export {
        /// Destination CSV file
        #[arg(short, long, default_value = "hli_results.csv")]
        output: PathBuf,

        /// Re-score a previously exported or hand-edited CSV instead of simulated data
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Print the risk distribution as JSON
    Summary {
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Print the effective configuration as TOML
    Config,
}

pub async fn serve(config: &AppConfig, scoring_service: ScoringService) -> anyhow::Result<()> {
    let state = Arc::new(AppState {
        scoring_service,
        compress: config.server.compress,
    });

    let addr: SocketAddr = config
        .server
        .bind
        .parse()
        .with_context(|| format!("Invalid bind address {}", config.server.bind))?;
    tracing::info!("Starting heat-load-index service on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router(state)).await?;
    Ok(())
}

pub async fn export(scoring_service: &ScoringService, output: &Path) -> anyhow::Result<()> {
    let report = scoring_service.score_source().await?;
    export_to_path(output, &report.scored)?;

    let summary = RiskSummary::from_scored(&report.scored);
    tracing::info!(
        "{} of {} days at extreme risk",
        summary.days_in(RiskTier::Extreme),
        summary.observations
    );
    print_summary(&summary)?;
    for rejected in &report.rejected {
        eprintln!("skipped day {}: {}", rejected.day, rejected.reason);
    }
    Ok(())
}

pub async fn summary(scoring_service: &ScoringService) -> anyhow::Result<()> {
    let summary = scoring_service.summary().await?;
    print_summary(&summary)
}

fn print_summary(summary: &RiskSummary) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(summary)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_export() {
        let cli = Cli::try_parse_from([
            "heat-load-index",
            "--json",
            "export",
            "--output",
            "out.csv",
            "--input",
            "in.csv",
        ])
        .unwrap();

        assert!(cli.json);
        match cli.command {
            Commands::Export { output, input } => {
                assert_eq!(output, PathBuf::from("out.csv"));
                assert_eq!(input, Some(PathBuf::from("in.csv")));
            }
            _ => panic!("expected export"),
        }
    }
}
