// Scoring service - Use cases for scoring, summarising and charting a weather source
use crate::application::pipeline::{BatchReport, HliPipeline};
use crate::application::weather_source::WeatherSource;
use crate::domain::chart::{ChartData, ChartKind, ChartPoint, HliCharts, OverlayLine, SeriesData};
use crate::domain::risk::RiskTier;
use crate::domain::summary::RiskSummary;
use crate::domain::weather::{ScoredObservation, WeatherObservation};
use std::sync::Arc;

#[derive(Clone)]
pub struct ScoringService {
    source: Arc<dyn WeatherSource>,
    pipeline: HliPipeline,
}

impl ScoringService {
    pub fn new(source: Arc<dyn WeatherSource>, pipeline: HliPipeline) -> Self {
        Self { source, pipeline }
    }

    /// Load the configured source and score it.
    pub async fn score_source(&self) -> anyhow::Result<BatchReport> {
        let observations = self.source.load_observations().await?;
        tracing::info!(
            "Scoring {} observations from {}",
            observations.len(),
            self.source.describe()
        );
        self.score(observations).await
    }

    /// Score caller-supplied observations with the configured policy.
    pub async fn score(&self, observations: Vec<WeatherObservation>) -> anyhow::Result<BatchReport> {
        let report = self.pipeline.process_parallel(observations).await?;
        if !report.rejected.is_empty() {
            tracing::warn!(
                "{} observations rejected under {:?}",
                report.rejected.len(),
                self.pipeline.policy()
            );
        }
        Ok(report)
    }

    pub async fn summary(&self) -> anyhow::Result<RiskSummary> {
        let report = self.score_source().await?;
        Ok(RiskSummary::from_scored(&report.scored))
    }

    pub async fn charts(&self) -> anyhow::Result<HliCharts> {
        let report = self.score_source().await?;
        Ok(build_charts(&report.scored))
    }
}

pub fn build_charts(scored: &[ScoredObservation]) -> HliCharts {
    // Infinite HLI has no place on an axis
    let plottable = || scored.iter().filter(|s| s.hli.is_finite());

    let by_day: Vec<ChartPoint> = plottable()
        .map(|s| ChartPoint::new(s.day() as f64, s.hli))
        .collect();
    let by_temperature: Vec<ChartPoint> = plottable()
        .map(|s| ChartPoint::new(s.observation().ambient_temperature, s.hli))
        .collect();

    let overlays = [(RiskTier::Mild, "red"), (RiskTier::Moderate, "orange")]
        .into_iter()
        .filter_map(|(tier, color)| {
            tier.lower_bound().map(|value| OverlayLine {
                id: format!("{}_threshold", tier.key()),
                name: format!("{} threshold", tier.label()),
                color: Some(color.to_string()),
                value,
            })
        })
        .collect();

    HliCharts {
        hli_by_day: ChartData {
            id: "hli_by_day".to_string(),
            title: "Heat Load Index by day".to_string(),
            x_label: "Day".to_string(),
            y_label: "HLI".to_string(),
            kind: ChartKind::Line,
            series: vec![SeriesData::new("hli", "HLI", Some("blue"), by_day)],
            overlays,
        },
        hli_by_temperature: ChartData {
            id: "hli_by_temperature".to_string(),
            title: "Ambient temperature vs HLI".to_string(),
            x_label: "Ambient temperature (°C)".to_string(),
            y_label: "HLI".to_string(),
            kind: ChartKind::Scatter,
            series: vec![SeriesData::new("hli", "HLI", Some("green"), by_temperature)],
            overlays: Vec::new(),
        },
    }
}
