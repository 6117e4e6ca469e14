// Source trait for weather observation data
use crate::domain::weather::WeatherObservation;
use async_trait::async_trait;

#[async_trait]
pub trait WeatherSource: Send + Sync {
    /// Human-readable origin, used in logs
    fn describe(&self) -> String;

    /// Load observations ordered by day
    async fn load_observations(&self) -> anyhow::Result<Vec<WeatherObservation>>;
}
