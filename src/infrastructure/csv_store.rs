// Tabular import/export of scored observations
use crate::application::pipeline::score_observation;
use crate::application::weather_source::WeatherSource;
use crate::domain::risk::RiskTier;
use crate::domain::weather::{ScoredObservation, WeatherObservation};
use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};

pub const EXPORT_HEADER: [&str; 8] = [
    "day",
    "ambient_temperature",
    "relative_humidity",
    "wind_speed",
    "solar_radiation",
    "black_globe_temperature",
    "hli",
    "risk_tier",
];

const REQUIRED_COLUMNS: [&str; 5] = [
    "day",
    "ambient_temperature",
    "relative_humidity",
    "wind_speed",
    "solar_radiation",
];

/// Floats use `Display`, which is the shortest text that parses back to the same bits.
pub fn write_scored<W: Write>(mut writer: W, scored: &[ScoredObservation]) -> Result<()> {
    writeln!(writer, "{}", EXPORT_HEADER.join(","))?;
    for row in scored {
        let obs = row.observation();
        writeln!(
            writer,
            "{},{},{},{},{},{},{},{}",
            obs.day,
            obs.ambient_temperature,
            obs.relative_humidity,
            obs.wind_speed,
            obs.solar_radiation,
            row.black_globe_temperature(),
            row.hli,
            row.risk_tier.key()
        )?;
    }
    writer.flush()?;
    Ok(())
}

pub fn export_to_path(path: &Path, scored: &[ScoredObservation]) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    write_scored(std::io::BufWriter::new(file), scored)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::info!("Exported {} rows to {}", scored.len(), path.display());
    Ok(())
}

/// A parsed row; derived columns are kept only to compare against a recomputation.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportedRow {
    pub observation: WeatherObservation,
    pub hli: Option<f64>,
    pub risk_tier: Option<RiskTier>,
}

struct Record<'a> {
    line_no: usize,
    columns: &'a HashMap<&'a str, usize>,
    fields: Vec<&'a str>,
}

impl<'a> Record<'a> {
    fn field(&self, name: &str) -> Option<&'a str> {
        self.columns
            .get(name)
            .and_then(|&i| self.fields.get(i).copied())
            .filter(|value| !value.is_empty())
    }

    fn required(&self, name: &str) -> Result<&'a str> {
        self.field(name)
            .with_context(|| format!("line {}: missing {}", self.line_no, name))
    }

    fn number(&self, name: &str) -> Result<f64> {
        let raw = self.required(name)?;
        raw.parse::<f64>()
            .with_context(|| format!("line {}: invalid {} '{}'", self.line_no, name, raw))
    }

    fn into_row(self, previous_day: Option<u32>) -> Result<ImportedRow> {
        let line_no = self.line_no;
        let day_raw = self.required("day")?;
        let day: u32 = day_raw
            .parse()
            .with_context(|| format!("line {}: invalid day '{}'", line_no, day_raw))?;
        if day == 0 {
            bail!("line {}: day index must be positive", line_no);
        }
        if let Some(previous) = previous_day.filter(|previous| day <= *previous) {
            bail!("line {}: day {} does not follow day {}", line_no, day, previous);
        }

        let observation = WeatherObservation::new(
            day,
            self.number("ambient_temperature")?,
            self.number("relative_humidity")?,
            self.number("wind_speed")?,
            self.number("solar_radiation")?,
        );
        let hli = match self.field("hli") {
            Some(_) => Some(self.number("hli")?),
            None => None,
        };
        let risk_tier = self
            .field("risk_tier")
            .map(|raw| {
                raw.parse::<RiskTier>()
                    .with_context(|| format!("line {}: invalid risk_tier", line_no))
            })
            .transpose()?;

        Ok(ImportedRow {
            observation,
            hli,
            risk_tier,
        })
    }
}

/// Columns are matched by header name; unknown columns are ignored.
pub fn parse_rows(text: &str) -> Result<Vec<ImportedRow>> {
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty());

    let Some((_, header)) = lines.next() else {
        bail!("CSV input is empty");
    };
    let columns: HashMap<&str, usize> = header
        .split(',')
        .enumerate()
        .map(|(i, name)| (name.trim(), i))
        .collect();

    for name in REQUIRED_COLUMNS {
        if !columns.contains_key(name) {
            bail!("CSV header is missing column '{}'", name);
        }
    }

    let mut rows: Vec<ImportedRow> = Vec::new();
    for (line_no, line) in lines {
        let record = Record {
            line_no,
            columns: &columns,
            fields: line.split(',').map(str::trim).collect(),
        };
        let previous_day = rows.last().map(|row| row.observation.day);
        rows.push(record.into_row(previous_day)?);
    }

    Ok(rows)
}

/// Reads observations from a CSV file. Any stored HLI or tier is recomputed, never trusted.
#[derive(Debug, Clone)]
pub struct CsvWeatherSource {
    path: PathBuf,
}

impl CsvWeatherSource {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

fn warn_on_stale(row: &ImportedRow) {
    let Ok(fresh) = score_observation(&row.observation) else {
        return;
    };
    let day = row.observation.day;

    if let Some(hli) = row.hli {
        if (hli - fresh.hli).abs() > 1e-9 {
            tracing::warn!(
                "Day {}: imported HLI {} replaced by recomputed {}",
                day,
                hli,
                fresh.hli
            );
        }
    }
    if let Some(tier) = row.risk_tier {
        if tier != fresh.risk_tier {
            tracing::warn!(
                "Day {}: imported tier {} replaced by recomputed {}",
                day,
                tier.key(),
                fresh.risk_tier.key()
            );
        }
    }
}

#[async_trait]
impl WeatherSource for CsvWeatherSource {
    fn describe(&self) -> String {
        format!("CSV file {}", self.path.display())
    }

    async fn load_observations(&self) -> Result<Vec<WeatherObservation>> {
        let text = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        let rows = parse_rows(&text).with_context(|| format!("Failed to parse {}", self.path.display()))?;

        rows.iter().for_each(warn_on_stale);
        Ok(rows.into_iter().map(|row| row.observation).collect())
    }
}
