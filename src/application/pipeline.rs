// Scoring pipeline - black globe, then HLI, then risk tier per observation
use crate::domain::error::HliError;
use crate::domain::heat_load::{calculate_hli, estimate_black_globe};
use crate::domain::risk::classify_risk;
use crate::domain::weather::{DerivedObservation, ScoredObservation, WeatherObservation};
use futures::future::join_all;
use serde::{Deserialize, Serialize};

/// What a batch does when one observation cannot be scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchPolicy {
    #[default]
    FailBatch,
    SkipAndReport,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RejectedObservation {
    pub day: u32,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BatchReport {
    pub scored: Vec<ScoredObservation>,
    pub rejected: Vec<RejectedObservation>,
}

impl BatchReport {
    fn append(&mut self, mut other: BatchReport) {
        self.scored.append(&mut other.scored);
        self.rejected.append(&mut other.rejected);
    }
}

pub fn derive_observation(observation: &WeatherObservation) -> DerivedObservation {
    DerivedObservation {
        observation: *observation,
        black_globe_temperature: estimate_black_globe(
            observation.ambient_temperature,
            observation.solar_radiation,
            observation.wind_speed,
        ),
    }
}

pub fn score_observation(observation: &WeatherObservation) -> Result<ScoredObservation, HliError> {
    observation
        .ensure_defined()
        .map_err(|e| e.for_day(observation.day))?;

    let derived = derive_observation(observation);
    let hli = calculate_hli(
        derived.black_globe_temperature,
        observation.relative_humidity,
        observation.wind_speed,
    )
    .map_err(|e| e.for_day(observation.day))?;
    let risk_tier = classify_risk(hli).map_err(|e| e.for_day(observation.day))?;

    if hli.is_infinite() {
        tracing::debug!("HLI overflowed to {} on day {}", hli, observation.day);
    }

    Ok(ScoredObservation {
        derived,
        hli,
        risk_tier,
    })
}

/// Score every observation in order; the first failure aborts the batch.
pub fn process(observations: &[WeatherObservation]) -> Result<Vec<ScoredObservation>, HliError> {
    observations.iter().map(score_observation).collect()
}

#[derive(Debug, Clone, Copy)]
pub struct HliPipeline {
    policy: BatchPolicy,
    chunk_size: usize,
}

impl HliPipeline {
    pub fn new(policy: BatchPolicy, chunk_size: usize) -> Self {
        Self {
            policy,
            chunk_size: chunk_size.max(1),
        }
    }

    pub fn policy(&self) -> BatchPolicy {
        self.policy
    }

    /// Score a batch on the current thread, applying the batch policy.
    pub fn process_batch(&self, observations: &[WeatherObservation]) -> Result<BatchReport, HliError> {
        match self.policy {
            BatchPolicy::FailBatch => Ok(BatchReport {
                scored: process(observations)?,
                rejected: Vec::new(),
            }),
            BatchPolicy::SkipAndReport => {
                let mut report = BatchReport::default();
                for observation in observations {
                    match score_observation(observation) {
                        Ok(scored) => report.scored.push(scored),
                        Err(e) => {
                            tracing::warn!("Skipping observation: {}", e);
                            report.rejected.push(RejectedObservation {
                                day: observation.day,
                                reason: e.to_string(),
                            });
                        }
                    }
                }
                Ok(report)
            }
        }
    }

    /// Score chunks on the blocking pool and reassemble them in input order.
    pub async fn process_parallel(
        &self,
        observations: Vec<WeatherObservation>,
    ) -> anyhow::Result<BatchReport> {
        if observations.len() <= self.chunk_size {
            return Ok(self.process_batch(&observations)?);
        }

        let handles = observations
            .chunks(self.chunk_size)
            .map(|chunk| {
                let chunk = chunk.to_vec();
                let pipeline = *self;
                tokio::task::spawn_blocking(move || pipeline.process_batch(&chunk))
            })
            .collect::<Vec<_>>();

        tracing::debug!(
            "Scoring {} observations in {} chunks",
            observations.len(),
            handles.len()
        );

        let mut report = BatchReport::default();
        for result in join_all(handles).await {
            report.append(result??);
        }

        Ok(report)
    }
}
