// Domain errors raised by the heat load core
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum HliError {
    /// A value the core cannot score (NaN) reached a calculation step.
    #[error("invalid input: {field} is {value}")]
    InvalidInput { field: &'static str, value: f64 },

    /// An observation in a batch failed to score.
    #[error("observation for day {day} rejected: {source}")]
    InvalidObservation {
        day: u32,
        #[source]
        source: Box<HliError>,
    },
}

impl HliError {
    pub fn for_day(self, day: u32) -> Self {
        match self {
            HliError::InvalidObservation { .. } => self,
            other => HliError::InvalidObservation {
                day,
                source: Box::new(other),
            },
        }
    }
}

/// Reject NaN while letting infinities through.
pub fn ensure_defined(field: &'static str, value: f64) -> Result<f64, HliError> {
    if value.is_nan() {
        Err(HliError::InvalidInput { field, value })
    } else {
        Ok(value)
    }
}
