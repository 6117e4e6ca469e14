use crate::application::pipeline::BatchPolicy;
use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::path::Path;

const DEFAULT_CONFIG: &str = "config/hli";
const ENV_PREFIX: &str = "HLI";

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct AppConfig {
    pub generator: GeneratorSettings,
    pub pipeline: PipelineSettings,
    pub server: ServerSettings,
    pub logging: LoggingSettings,
}

/// Half-open `[min, max)` sampling range.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct GeneratorSettings {
    pub seed: u64,
    pub days: u32,
    pub ambient_temperature: Range,
    pub relative_humidity: Range,
    pub wind_speed: Range,
    pub solar_radiation: Range,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            seed: 42,
            days: 180,
            ambient_temperature: Range::new(25.0, 35.0),
            relative_humidity: Range::new(60.0, 90.0),
            wind_speed: Range::new(0.5, 5.0),
            solar_radiation: Range::new(200.0, 800.0),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct PipelineSettings {
    pub policy: BatchPolicy,
    pub chunk_size: usize,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            policy: BatchPolicy::FailBatch,
            chunk_size: 256,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ServerSettings {
    pub bind: String,
    pub compress: bool,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:8080".to_string(),
            compress: true,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct LoggingSettings {
    pub level: String,
    pub json: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl AppConfig {
    pub fn validate(&self) -> anyhow::Result<()> {
        let generator = &self.generator;
        if generator.days == 0 {
            bail!("generator.days must be positive");
        }
        for (name, range) in [
            ("ambient_temperature", generator.ambient_temperature),
            ("relative_humidity", generator.relative_humidity),
            ("wind_speed", generator.wind_speed),
            ("solar_radiation", generator.solar_radiation),
        ] {
            if !(range.min.is_finite() && range.max.is_finite() && range.min < range.max) {
                bail!(
                    "generator.{} must satisfy min < max, got [{}, {})",
                    name,
                    range.min,
                    range.max
                );
            }
        }
        if self.pipeline.chunk_size == 0 {
            bail!("pipeline.chunk_size must be positive");
        }
        Ok(())
    }

    pub fn to_toml(&self) -> anyhow::Result<String> {
        toml::to_string_pretty(self).context("Failed to render configuration as TOML")
    }
}

/// Defaults, then the config file, then `HLI__SECTION__KEY` environment overrides.
///
/// An explicit `path` must exist; the default `config/hli` file is optional.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<AppConfig> {
    let file = match path {
        Some(path) => config::File::from(path).required(true),
        None => config::File::with_name(DEFAULT_CONFIG).required(false),
    };

    let settings = config::Config::builder()
        .add_source(config::Config::try_from(&AppConfig::default())?)
        .add_source(file)
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()
        .context("Failed to load configuration")?;

    let config: AppConfig = settings.try_deserialize()?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.generator.seed, 42);
        assert_eq!(config.generator.days, 180);
        assert_eq!(config.pipeline.policy, BatchPolicy::FailBatch);
    }

    #[test]
    fn test_load_file_overrides_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[generator]
days = 30

[generator.wind_speed]
min = 1.0
max = 2.0

[pipeline]
policy = "skip_and_report"
"#
        )
        .unwrap();

        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.generator.days, 30);
        assert_eq!(config.generator.seed, 42);
        assert_eq!(config.generator.wind_speed, Range::new(1.0, 2.0));
        assert_eq!(config.generator.solar_radiation, Range::new(200.0, 800.0));
        assert_eq!(config.pipeline.policy, BatchPolicy::SkipAndReport);
        assert_eq!(config.pipeline.chunk_size, 256);
    }

    #[test]
    fn test_missing_explicit_file_fails() {
        assert!(load_config(Some(Path::new("does/not/exist.toml"))).is_err());
    }

    #[test]
    fn test_validate_rejects_bad_range() {
        let mut config = AppConfig::default();
        config.generator.relative_humidity = Range::new(90.0, 60.0);
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("relative_humidity"));

        let mut config = AppConfig::default();
        config.pipeline.chunk_size = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_to_toml() {
        let rendered = AppConfig::default().to_toml().unwrap();
        assert!(rendered.contains("[generator]"));
        assert!(rendered.contains("policy = \"fail_batch\""));
        assert!(rendered.contains("bind = \"0.0.0.0:8080\""));
    }
}
