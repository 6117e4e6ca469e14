// Seeded weather generator standing in for field measurements
use crate::application::weather_source::WeatherSource;
use crate::domain::weather::WeatherObservation;
use crate::infrastructure::config::{GeneratorSettings, Range};
use async_trait::async_trait;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

#[derive(Debug, Clone)]
pub struct SimulatedWeatherSource {
    settings: GeneratorSettings,
}

impl SimulatedWeatherSource {
    pub fn new(settings: GeneratorSettings) -> Self {
        Self { settings }
    }

    /// Same settings, same observations.
    pub fn generate(&self) -> Vec<WeatherObservation> {
        let mut rng = ChaCha8Rng::seed_from_u64(self.settings.seed);
        let s = &self.settings;

        (1..=s.days)
            .map(|day| {
                let ambient_temperature = sample(&mut rng, s.ambient_temperature);
                let relative_humidity = sample(&mut rng, s.relative_humidity);
                let wind_speed = sample(&mut rng, s.wind_speed);
                let solar_radiation = sample(&mut rng, s.solar_radiation);
                WeatherObservation::new(
                    day,
                    ambient_temperature,
                    relative_humidity,
                    wind_speed,
                    solar_radiation,
                )
            })
            .collect()
    }
}

fn sample(rng: &mut ChaCha8Rng, range: Range) -> f64 {
    if range.max > range.min {
        rng.gen_range(range.min..range.max)
    } else {
        range.min
    }
}

#[async_trait]
impl WeatherSource for SimulatedWeatherSource {
    fn describe(&self) -> String {
        format!(
            "simulated weather ({} days, seed {})",
            self.settings.days, self.settings.seed
        )
    }

    async fn load_observations(&self) -> anyhow::Result<Vec<WeatherObservation>> {
        Ok(self.generate())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_within_ranges() {
        let settings = GeneratorSettings::default();
        let observations = SimulatedWeatherSource::new(settings.clone()).generate();

        assert_eq!(observations.len(), 180);
        for (i, obs) in observations.iter().enumerate() {
            assert_eq!(obs.day, i as u32 + 1);
            assert!((25.0..35.0).contains(&obs.ambient_temperature));
            assert!((60.0..90.0).contains(&obs.relative_humidity));
            assert!((0.5..5.0).contains(&obs.wind_speed));
            assert!((200.0..800.0).contains(&obs.solar_radiation));
        }
    }

    #[test]
    fn test_seed_is_reproducible() {
        let settings = GeneratorSettings {
            days: 20,
            ..GeneratorSettings::default()
        };
        let a = SimulatedWeatherSource::new(settings.clone()).generate();
        let b = SimulatedWeatherSource::new(settings.clone()).generate();
        assert_eq!(a, b);

        let c = SimulatedWeatherSource::new(GeneratorSettings { seed: 7, ..settings }).generate();
        assert_ne!(a, c);
    }

    #[test]
    fn test_degenerate_range() {
        let settings = GeneratorSettings {
            days: 3,
            wind_speed: Range::new(2.0, 2.0),
            ..GeneratorSettings::default()
        };
        let observations = SimulatedWeatherSource::new(settings).generate();
        assert!(observations.iter().all(|o| o.wind_speed == 2.0));
    }

    #[tokio::test]
    async fn test_load_observations() {
        let source = SimulatedWeatherSource::new(GeneratorSettings {
            days: 5,
            ..GeneratorSettings::default()
        });
        assert_eq!(source.load_observations().await.unwrap().len(), 5);
        assert!(source.describe().contains("5 days"));
    }
}
