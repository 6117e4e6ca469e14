// Risk distribution over a scored batch
use super::risk::RiskTier;
use super::weather::ScoredObservation;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TierCount {
    pub tier: RiskTier,
    pub label: &'static str,
    pub days: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskSummary {
    pub observations: usize,
    /// Extremes and mean skip infinite HLI values.
    pub min_hli: Option<f64>,
    pub max_hli: Option<f64>,
    pub mean_hli: Option<f64>,
    pub tiers: Vec<TierCount>,
    pub days_at_or_above_mild: usize,
    pub days_at_or_above_moderate: usize,
}

impl RiskSummary {
    pub fn from_scored(scored: &[ScoredObservation]) -> Self {
        let tiers = RiskTier::ALL
            .into_iter()
            .map(|tier| TierCount {
                tier,
                label: tier.label(),
                days: scored.iter().filter(|s| s.risk_tier == tier).count(),
            })
            .collect();

        let finite: Vec<f64> = scored
            .iter()
            .map(|s| s.hli)
            .filter(|hli| hli.is_finite())
            .collect();

        let min_hli = finite.iter().copied().reduce(f64::min);
        let max_hli = finite.iter().copied().reduce(f64::max);
        let mean_hli = if finite.is_empty() {
            None
        } else {
            Some(finite.iter().sum::<f64>() / finite.len() as f64)
        };

        Self {
            observations: scored.len(),
            min_hli,
            max_hli,
            mean_hli,
            tiers,
            days_at_or_above_mild: scored.iter().filter(|s| s.risk_tier >= RiskTier::Mild).count(),
            days_at_or_above_moderate: scored
                .iter()
                .filter(|s| s.risk_tier >= RiskTier::Moderate)
                .count(),
        }
    }

    pub fn days_in(&self, tier: RiskTier) -> usize {
        self.tiers
            .iter()
            .find(|count| count.tier == tier)
            .map(|count| count.days)
            .unwrap_or(0)
    }
}
