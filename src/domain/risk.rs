// Risk tiers derived from the Heat Load Index
use super::error::{ensure_defined, HliError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Heat stress risk, ordered by increasing severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskTier {
    None,
    Mild,
    Moderate,
    High,
    Extreme,
}

/// Inclusive lower bound of every tier above `None`, ascending.
const THRESHOLDS: [(f64, RiskTier); 4] = [
    (92.0, RiskTier::Mild),
    (102.0, RiskTier::Moderate),
    (108.0, RiskTier::High),
    (113.0, RiskTier::Extreme),
];

impl RiskTier {
    pub const ALL: [RiskTier; 5] = [
        RiskTier::None,
        RiskTier::Mild,
        RiskTier::Moderate,
        RiskTier::High,
        RiskTier::Extreme,
    ];

    pub fn key(self) -> &'static str {
        match self {
            RiskTier::None => "none",
            RiskTier::Mild => "mild",
            RiskTier::Moderate => "moderate",
            RiskTier::High => "high",
            RiskTier::Extreme => "extreme",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RiskTier::None => "No risk",
            RiskTier::Mild => "Mild risk",
            RiskTier::Moderate => "Moderate risk",
            RiskTier::High => "High risk",
            RiskTier::Extreme => "Extreme risk",
        }
    }

    /// HLI at which this tier starts; `None` has no lower bound.
    pub fn lower_bound(self) -> Option<f64> {
        THRESHOLDS
            .iter()
            .find(|(_, tier)| *tier == self)
            .map(|(bound, _)| *bound)
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown risk tier: {0}")]
pub struct ParseRiskTierError(pub String);

impl FromStr for RiskTier {
    type Err = ParseRiskTierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        RiskTier::ALL
            .into_iter()
            .find(|tier| {
                tier.key().eq_ignore_ascii_case(wanted) || tier.label().eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| ParseRiskTierError(s.to_string()))
    }
}

/// Map an HLI value to its tier. `+inf` is Extreme, `-inf` is None, NaN is rejected.
pub fn classify_risk(hli: f64) -> Result<RiskTier, HliError> {
    let hli = ensure_defined("hli", hli)?;
    let above = THRESHOLDS.partition_point(|(bound, _)| *bound <= hli);

    Ok(above
        .checked_sub(1)
        .map(|index| THRESHOLDS[index].1)
        .unwrap_or(RiskTier::None))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundaries() {
        let cases = [
            (91.999, RiskTier::None),
            (92.0, RiskTier::Mild),
            (101.999, RiskTier::Mild),
            (102.0, RiskTier::Moderate),
            (107.999, RiskTier::Moderate),
            (108.0, RiskTier::High),
            (112.999, RiskTier::High),
            (113.0, RiskTier::Extreme),
        ];

        for (hli, expected) in cases {
            assert_eq!(classify_risk(hli).unwrap(), expected, "hli = {hli}");
        }
    }

    #[test]
    fn test_infinities() {
        assert_eq!(classify_risk(f64::INFINITY).unwrap(), RiskTier::Extreme);
        assert_eq!(classify_risk(f64::NEG_INFINITY).unwrap(), RiskTier::None);
        assert_eq!(classify_risk(-12.0).unwrap(), RiskTier::None);
    }

    #[test]
    fn test_nan_rejected() {
        assert!(matches!(
            classify_risk(f64::NAN),
            Err(HliError::InvalidInput { field: "hli", .. })
        ));
    }

    #[test]
    fn test_monotonic() {
        let mut values: Vec<f64> = (0..=240).map(|i| 80.0 + i as f64 * 0.25).collect();
        values.insert(0, f64::NEG_INFINITY);
        values.push(f64::INFINITY);

        let tiers: Vec<RiskTier> = values.iter().map(|v| classify_risk(*v).unwrap()).collect();
        for pair in tiers.windows(2) {
            assert!(pair[0] <= pair[1], "{:?} > {:?}", pair[0], pair[1]);
        }
        assert_eq!(tiers.first(), Some(&RiskTier::None));
        assert_eq!(tiers.last(), Some(&RiskTier::Extreme));
    }

    #[test]
    fn test_ordering_and_bounds() {
        assert!(RiskTier::None < RiskTier::Mild);
        assert!(RiskTier::High < RiskTier::Extreme);
        assert_eq!(RiskTier::None.lower_bound(), None);
        assert_eq!(RiskTier::Moderate.lower_bound(), Some(102.0));
        assert_eq!(RiskTier::Extreme.lower_bound(), Some(113.0));
    }

    #[test]
    fn test_parse() {
        assert_eq!("moderate".parse::<RiskTier>().unwrap(), RiskTier::Moderate);
        assert_eq!("Extreme Risk".parse::<RiskTier>().unwrap(), RiskTier::Extreme);
        assert_eq!(" none ".parse::<RiskTier>().unwrap(), RiskTier::None);
        assert!("severe".parse::<RiskTier>().is_err());
    }

    #[test]
    fn test_serde_key() {
        assert_eq!(serde_json::to_string(&RiskTier::High).unwrap(), "\"high\"");
        for tier in RiskTier::ALL {
            assert_eq!(serde_json::to_value(tier).unwrap(), tier.key());
        }
    }
}
