// ABOUTME: Configuration-driven parameters for compliance scoring and goal analytics
// ABOUTME: Replaces magic numbers with auditable, independently testable config structs
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration for the analytics engines.
//!
//! Every tunable the rule tables depend on lives here as a named,
//! `Default`-able struct so the rule set is auditable and individual
//! thresholds can be overridden without touching the algorithms.

use crate::errors::{AppError, AppResult};
use crate::models::Intensity;
use serde::{Deserialize, Serialize};

/// Weights applied to the compliance sub-scores.
///
/// A sub-score participates in the weighted mean only when the corresponding
/// planned field is present; the weights of the applicable subset are
/// renormalized over their sum.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ComplianceWeights {
    /// Weight of the duration sub-score
    pub duration: f64,
    /// Weight of the intensity sub-score
    pub intensity: f64,
    /// Weight of the exercise-completion sub-score
    pub completion: f64,
}

impl Default for ComplianceWeights {
    fn default() -> Self {
        Self {
            duration: 0.4,
            intensity: 0.3,
            completion: 0.3,
        }
    }
}

/// A target average-heart-rate band in BPM
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HeartRateZone {
    /// Lower bound (inclusive)
    pub min: u32,
    /// Upper bound (inclusive)
    pub max: u32,
}

impl HeartRateZone {
    /// Whether an observed average heart rate falls inside the band
    #[must_use]
    pub const fn contains(&self, bpm: u32) -> bool {
        bpm >= self.min && bpm <= self.max
    }
}

/// Heart-rate bands associated with each planned intensity level
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HeartRateZones {
    /// Band for low intensity
    pub low: HeartRateZone,
    /// Band for medium intensity
    pub medium: HeartRateZone,
    /// Band for high intensity
    pub high: HeartRateZone,
}

impl HeartRateZones {
    /// The band for a given planned intensity
    #[must_use]
    pub const fn zone_for(&self, intensity: Intensity) -> HeartRateZone {
        match intensity {
            Intensity::Low => self.low,
            Intensity::Medium => self.medium,
            Intensity::High => self.high,
        }
    }
}

impl Default for HeartRateZones {
    fn default() -> Self {
        Self {
            low: HeartRateZone { min: 60, max: 130 },
            medium: HeartRateZone { min: 130, max: 160 },
            high: HeartRateZone { min: 160, max: 200 },
        }
    }
}

/// Weights of the composite overtraining-risk score
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RiskWeights {
    /// Weight of the consistency sub-score
    pub consistency: f64,
    /// Weight of the intensity-variability sub-score
    pub intensity_variability: f64,
    /// Weight of the recovery sub-score
    pub recovery: f64,
    /// Weight of the progress placeholder sub-score
    pub progress: f64,
}

impl Default for RiskWeights {
    fn default() -> Self {
        Self {
            consistency: 0.30,
            intensity_variability: 0.25,
            recovery: 0.25,
            progress: 0.20,
        }
    }
}

/// Default completion targets used by the trend goal snapshot
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GoalDefaults {
    /// Completed activities targeted per week
    pub weekly_target: u32,
    /// Completed activities targeted per month
    pub monthly_target: u32,
}

impl Default for GoalDefaults {
    fn default() -> Self {
        Self {
            weekly_target: 5,
            monthly_target: 20,
        }
    }
}

/// Aggregate configuration for both engines
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalyticsConfig {
    /// Compliance sub-score weights
    pub weights: ComplianceWeights,
    /// Intensity heart-rate bands
    pub heart_rate_zones: HeartRateZones,
    /// Composite risk weights
    pub risk_weights: RiskWeights,
    /// Default goal targets
    pub goal_defaults: GoalDefaults,
}

impl AnalyticsConfig {
    /// Validate internal consistency of the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`AppError`] when the compliance or risk weights do not sum
    /// to 1.0, or when a heart-rate band is inverted.
    pub fn validate(&self) -> AppResult<()> {
        let weight_sum = self.weights.duration + self.weights.intensity + self.weights.completion;
        if (weight_sum - 1.0).abs() > 1e-9 {
            return Err(AppError::value_out_of_range(format!(
                "compliance weights must sum to 1.0, got {weight_sum}"
            )));
        }

        let risk_sum = self.risk_weights.consistency
            + self.risk_weights.intensity_variability
            + self.risk_weights.recovery
            + self.risk_weights.progress;
        if (risk_sum - 1.0).abs() > 1e-9 {
            return Err(AppError::value_out_of_range(format!(
                "risk weights must sum to 1.0, got {risk_sum}"
            )));
        }

        for (label, zone) in [
            ("low", self.heart_rate_zones.low),
            ("medium", self.heart_rate_zones.medium),
            ("high", self.heart_rate_zones.high),
        ] {
            if zone.min >= zone.max {
                return Err(AppError::invalid_input(format!(
                    "heart-rate zone {label} is inverted: {}..{}",
                    zone.min, zone.max
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(AnalyticsConfig::default().validate().is_ok());
    }

    #[test]
    fn test_invalid_weights_rejected() {
        let config = AnalyticsConfig {
            weights: ComplianceWeights {
                duration: 0.5,
                intensity: 0.5,
                completion: 0.5,
            },
            ..AnalyticsConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_inverted_zone_rejected() {
        let mut config = AnalyticsConfig::default();
        config.heart_rate_zones.medium = HeartRateZone { min: 160, max: 130 };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zone_lookup_matches_intensity() {
        let zones = HeartRateZones::default();
        assert!(zones.zone_for(Intensity::Medium).contains(145));
        assert!(!zones.zone_for(Intensity::Low).contains(200));
    }
}
