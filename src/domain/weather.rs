// Weather observation records flowing through the scoring pipeline
use super::error::{ensure_defined, HliError};
use super::risk::RiskTier;
use serde::{Deserialize, Serialize};

/// One day of ambient conditions, as produced by a generator or importer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeatherObservation {
    pub day: u32,
    /// °C
    pub ambient_temperature: f64,
    /// %
    pub relative_humidity: f64,
    /// m/s
    pub wind_speed: f64,
    /// W/m²
    pub solar_radiation: f64,
}

impl WeatherObservation {
    pub fn new(
        day: u32,
        ambient_temperature: f64,
        relative_humidity: f64,
        wind_speed: f64,
        solar_radiation: f64,
    ) -> Self {
        Self {
            day,
            ambient_temperature,
            relative_humidity,
            wind_speed,
            solar_radiation,
        }
    }

    /// Fails on the first NaN field. Range plausibility is not checked.
    pub fn ensure_defined(&self) -> Result<(), HliError> {
        ensure_defined("ambient_temperature", self.ambient_temperature)?;
        ensure_defined("relative_humidity", self.relative_humidity)?;
        ensure_defined("wind_speed", self.wind_speed)?;
        ensure_defined("solar_radiation", self.solar_radiation)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DerivedObservation {
    #[serde(flatten)]
    pub observation: WeatherObservation,
    pub black_globe_temperature: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoredObservation {
    #[serde(flatten)]
    pub derived: DerivedObservation,
    pub hli: f64,
    pub risk_tier: RiskTier,
}

impl ScoredObservation {
    pub fn day(&self) -> u32 {
        self.derived.observation.day
    }

    pub fn observation(&self) -> &WeatherObservation {
        &self.derived.observation
    }

    pub fn black_globe_temperature(&self) -> f64 {
        self.derived.black_globe_temperature
    }
}
