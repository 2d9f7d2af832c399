// ABOUTME: Overtraining risk scoring from consistency, intensity variability and recovery balance
// ABOUTME: Sub-scores are neutral (50) when the history is too short to judge
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Risk assessment over a training history.
//!
//! Three independent `[0, 100]` sub-scores (consistency, intensity
//! variability, recovery balance) combine into a weighted composite risk
//! score bucketed into four levels. A short history produces neutral
//! sub-scores rather than an error.

use crate::config::RiskWeights;
use crate::models::{ActivityType, Intensity, TrainingActivity};
use crate::scoring_constants::{performance_bands, risk};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Composite risk level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    /// Training pattern looks sustainable
    Low,
    /// Some warning signs
    Moderate,
    /// Pattern needs correction
    High,
    /// Likely overreaching
    Critical,
}

/// Qualitative performance band for a `[0, 100]` score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PerformanceBand {
    /// Score at or above 90
    Excellent,
    /// Score at or above 75
    Good,
    /// Score at or above 60
    Average,
    /// Score at or above 40
    Poor,
    /// Everything below
    Critical,
}

impl fmt::Display for PerformanceBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Excellent => "excellent",
            Self::Good => "good",
            Self::Average => "average",
            Self::Poor => "poor",
            Self::Critical => "critical",
        };
        f.write_str(label)
    }
}

/// One contributing factor of the composite risk score
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskFactor {
    /// Factor name
    pub factor: String,
    /// The factor's sub-score
    pub impact: f64,
    /// Human-readable interpretation
    pub description: String,
}

/// Composite risk assessment result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskAssessment {
    /// Bucketed risk level
    pub risk_level: RiskLevel,
    /// Weighted composite score
    pub risk_score: f64,
    /// The contributing sub-scores
    pub factors: Vec<RiskFactor>,
}

/// Bucket a `[0, 100]` score into a qualitative band.
#[must_use]
pub fn categorize_performance(score: f64) -> PerformanceBand {
    if score >= performance_bands::EXCELLENT {
        PerformanceBand::Excellent
    } else if score >= performance_bands::GOOD {
        PerformanceBand::Good
    } else if score >= performance_bands::AVERAGE {
        PerformanceBand::Average
    } else if score >= performance_bands::POOR {
        PerformanceBand::Poor
    } else {
        PerformanceBand::Critical
    }
}

/// Workout regularity: inverse function of the standard deviation of day
/// gaps between consecutive completed activities. Too little history scores
/// zero.
#[must_use]
pub fn calculate_consistency_score(activities: &[TrainingActivity]) -> f64 {
    if activities.len() < risk::MIN_ACTIVITIES_FOR_ASSESSMENT {
        return 0.0;
    }

    let mut completed: Vec<&TrainingActivity> =
        activities.iter().filter(|a| a.completed).collect();
    completed.sort_by_key(|a| a.date);

    if completed.len() < risk::MIN_COMPLETED_FOR_GAPS {
        return 0.0;
    }

    let gaps: Vec<f64> = completed
        .windows(2)
        .map(|pair| (pair[1].date - pair[0].date).num_days().abs() as f64)
        .collect();

    let avg_gap = gaps.iter().sum::<f64>() / gaps.len() as f64;
    let variance = gaps
        .iter()
        .map(|gap| (gap - avg_gap).powi(2))
        .sum::<f64>()
        / gaps.len() as f64;
    let standard_deviation = variance.sqrt();

    (100.0 - standard_deviation * risk::GAP_STDDEV_PENALTY)
        .max(0.0)
        .round()
}

/// Training load distribution: penalizes deviation of the intensity variance
/// (1-3 scale) from the optimal mix.
#[must_use]
pub fn calculate_intensity_variability_score(activities: &[TrainingActivity]) -> f64 {
    let scores: Vec<f64> = activities
        .iter()
        .filter(|a| a.completed)
        .filter_map(|a| a.intensity.map(|i| i.as_score()))
        .collect();
    if scores.len() < risk::MIN_COMPLETED_FOR_VARIABILITY {
        return risk::NEUTRAL_SCORE;
    }

    let avg = scores.iter().sum::<f64>() / scores.len() as f64;
    let variance = scores.iter().map(|s| (s - avg).powi(2)).sum::<f64>() / scores.len() as f64;

    let variance_diff = (variance - risk::OPTIMAL_INTENSITY_VARIANCE).abs();
    (100.0 - variance_diff * risk::VARIANCE_PENALTY_FACTOR)
        .max(0.0)
        .round()
}

/// Rest day distribution: each run of more than three consecutive completed
/// high-intensity activities accrues a violation. Rest-type or uncompleted
/// activities reset the run.
#[must_use]
pub fn calculate_recovery_score(activities: &[TrainingActivity]) -> f64 {
    if activities.len() < risk::MIN_ACTIVITIES_FOR_ASSESSMENT {
        return risk::NEUTRAL_SCORE;
    }

    let mut sorted: Vec<&TrainingActivity> = activities.iter().collect();
    sorted.sort_by_key(|a| a.date);

    let mut consecutive_high = 0_u32;
    let mut violations = 0_u32;

    for activity in sorted {
        if activity.completed && activity.intensity == Some(Intensity::High) {
            consecutive_high += 1;
            if consecutive_high > risk::MAX_CONSECUTIVE_HIGH_INTENSITY {
                violations += 1;
            }
        } else if activity.activity_type == ActivityType::Rest || !activity.completed {
            consecutive_high = 0;
        }
    }

    (100.0 - f64::from(violations) * risk::RECOVERY_VIOLATION_PENALTY)
        .max(0.0)
        .round()
}

/// Weighted composite of the three sub-scores plus a constant progress
/// placeholder, bucketed into a risk level.
#[must_use]
pub fn assess_risk(activities: &[TrainingActivity], weights: &RiskWeights) -> RiskAssessment {
    let consistency = calculate_consistency_score(activities);
    let intensity = calculate_intensity_variability_score(activities);
    let recovery = calculate_recovery_score(activities);

    let risk_score = (consistency * weights.consistency
        + intensity * weights.intensity_variability
        + recovery * weights.recovery
        + risk::NEUTRAL_PROGRESS_SCORE * weights.progress)
        .round();

    debug!(
        consistency,
        intensity, recovery, risk_score, "assessed training risk"
    );

    let factors = vec![
        RiskFactor {
            factor: "Consistency".into(),
            impact: consistency,
            description: if consistency < 60.0 {
                "Irregular workout pattern detected".into()
            } else {
                "Good workout consistency".into()
            },
        },
        RiskFactor {
            factor: "Intensity Balance".into(),
            impact: intensity,
            description: if intensity < 60.0 {
                "Poor intensity distribution".into()
            } else {
                "Well-balanced training intensity".into()
            },
        },
        RiskFactor {
            factor: "Recovery Balance".into(),
            impact: recovery,
            description: if recovery < 70.0 {
                "Insufficient recovery periods".into()
            } else {
                "Adequate recovery management".into()
            },
        },
    ];

    let risk_level = if risk_score >= risk::LOW_RISK_THRESHOLD {
        RiskLevel::Low
    } else if risk_score >= risk::MODERATE_RISK_THRESHOLD {
        RiskLevel::Moderate
    } else if risk_score >= risk::HIGH_RISK_THRESHOLD {
        RiskLevel::High
    } else {
        RiskLevel::Critical
    };

    RiskAssessment {
        risk_level,
        risk_score,
        factors,
    }
}

/// Up to three rule-based insight strings personalized to the training
/// history.
#[must_use]
pub fn generate_personalized_insights(activities: &[TrainingActivity]) -> Vec<String> {
    let mut insights = Vec::new();

    let consistency = calculate_consistency_score(activities);
    let intensity = calculate_intensity_variability_score(activities);
    let recovery = calculate_recovery_score(activities);

    let completed: Vec<&TrainingActivity> = activities.iter().filter(|a| a.completed).collect();
    let avg_duration = if completed.is_empty() {
        0.0
    } else {
        completed
            .iter()
            .map(|a| f64::from(a.duration_minutes))
            .sum::<f64>()
            / completed.len() as f64
    };

    if consistency < 50.0 {
        insights.push(
            "Your workout schedule is irregular. Try to establish a consistent routine for better results."
                .into(),
        );
    } else if consistency > 85.0 {
        insights
            .push("Excellent workout consistency! You're building strong training habits.".into());
    }

    if intensity < 50.0 {
        insights.push(
            "Consider varying your workout intensities more for balanced training adaptation."
                .into(),
        );
    } else if intensity > 80.0 {
        insights.push(
            "Great intensity balance! You're effectively mixing high and low intensity sessions."
                .into(),
        );
    }

    if recovery < 60.0 {
        insights.push(
            "You may be overtraining. Consider adding more rest days for better recovery.".into(),
        );
    }

    if avg_duration > risk::LONG_SESSION_MINUTES {
        insights.push(
            "Your workouts are quite long. Consider shorter, more focused sessions for consistency."
                .into(),
        );
    } else if avg_duration < risk::SHORT_SESSION_MINUTES && !completed.is_empty() {
        insights.push(
            "Your average workout duration is short. Consider extending sessions for greater training effect."
                .into(),
        );
    }

    insights.truncate(risk::MAX_INSIGHTS);
    insights
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ActivityStatus, ActivityType};
    use chrono::{Duration, NaiveDate};

    fn base_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 5, 1).unwrap()
    }

    fn activity(day_offset: i64, completed: bool, intensity: Intensity) -> TrainingActivity {
        TrainingActivity {
            title: "session".into(),
            activity_type: ActivityType::Cardio,
            duration_minutes: 60,
            intensity: Some(intensity),
            date: base_date() + Duration::days(day_offset),
            completed,
            status: if completed {
                ActivityStatus::Completed
            } else {
                ActivityStatus::Skipped
            },
            ..TrainingActivity::default()
        }
    }

    #[test]
    fn test_short_history_scores_are_neutral_or_zero() {
        let activities: Vec<TrainingActivity> = (0..4)
            .map(|d| activity(d, true, Intensity::Medium))
            .collect();
        assert_eq!(calculate_consistency_score(&activities), 0.0);
        assert_eq!(calculate_recovery_score(&activities), risk::NEUTRAL_SCORE);

        let two = &activities[..2];
        assert_eq!(
            calculate_intensity_variability_score(two),
            risk::NEUTRAL_SCORE
        );
    }

    #[test]
    fn test_perfectly_regular_schedule_scores_full_consistency() {
        // Every other day, constant gap, zero standard deviation
        let activities: Vec<TrainingActivity> = (0..8)
            .map(|i| activity(i * 2, true, Intensity::Medium))
            .collect();
        assert_eq!(calculate_consistency_score(&activities), 100.0);
    }

    #[test]
    fn test_irregular_schedule_is_penalized() {
        let offsets = [0, 1, 2, 14, 15, 30, 31, 45];
        let activities: Vec<TrainingActivity> = offsets
            .iter()
            .map(|&d| activity(d, true, Intensity::Medium))
            .collect();
        let score = calculate_consistency_score(&activities);
        assert!(score < 70.0);
    }

    #[test]
    fn test_monotone_intensity_is_penalized() {
        // All-medium training has zero variance, far from the optimal 0.75
        let activities: Vec<TrainingActivity> = (0..10)
            .map(|d| activity(d, true, Intensity::Medium))
            .collect();
        let score = calculate_intensity_variability_score(&activities);
        assert_eq!(score, 40.0);
    }

    #[test]
    fn test_recovery_violations_cost_points() {
        // Seven consecutive completed high-intensity days: days 4 through 7
        // each accrue a violation.
        let activities: Vec<TrainingActivity> = (0..7)
            .map(|d| activity(d, true, Intensity::High))
            .collect();
        let score = calculate_recovery_score(&activities);
        assert_eq!(score, 100.0 - 4.0 * risk::RECOVERY_VIOLATION_PENALTY);
    }

    #[test]
    fn test_rest_day_resets_high_intensity_run() {
        let mut activities: Vec<TrainingActivity> = (0..3)
            .map(|d| activity(d, true, Intensity::High))
            .collect();
        let mut rest = activity(3, false, Intensity::Low);
        rest.activity_type = ActivityType::Rest;
        activities.push(rest);
        activities.extend((4..7).map(|d| activity(d, true, Intensity::High)));

        assert_eq!(calculate_recovery_score(&activities), 100.0);
    }

    #[test]
    fn test_assess_risk_on_sparse_data_is_well_formed() {
        let activities: Vec<TrainingActivity> = (0..2)
            .map(|d| activity(d, true, Intensity::Medium))
            .collect();
        let assessment = assess_risk(&activities, &RiskWeights::default());
        assert_eq!(assessment.factors.len(), 3);
        assert!((0.0..=100.0).contains(&assessment.risk_score));
        // Consistency is 0 on sparse data, dragging the composite down
        assert_eq!(assessment.factors[0].impact, 0.0);
        assert_eq!(assessment.factors[1].impact, risk::NEUTRAL_SCORE);
        assert_eq!(assessment.factors[2].impact, risk::NEUTRAL_SCORE);
    }

    #[test]
    fn test_balanced_history_assesses_low_risk() {
        // Regular cadence with a mixed intensity distribution
        let pattern = [
            Intensity::Low,
            Intensity::Medium,
            Intensity::High,
            Intensity::Medium,
        ];
        let activities: Vec<TrainingActivity> = (0..12)
            .map(|i| activity(i * 2, true, pattern[i as usize % 4]))
            .collect();
        let assessment = assess_risk(&activities, &RiskWeights::default());
        assert_eq!(assessment.risk_level, RiskLevel::Low);
    }

    #[test]
    fn test_categorize_performance_bands() {
        assert_eq!(categorize_performance(95.0), PerformanceBand::Excellent);
        assert_eq!(categorize_performance(80.0), PerformanceBand::Good);
        assert_eq!(categorize_performance(65.0), PerformanceBand::Average);
        assert_eq!(categorize_performance(45.0), PerformanceBand::Poor);
        assert_eq!(categorize_performance(10.0), PerformanceBand::Critical);
    }

    #[test]
    fn test_personalized_insights_capped_at_three() {
        let offsets = [0, 1, 2, 20, 21, 40, 41, 60];
        let mut activities: Vec<TrainingActivity> = offsets
            .iter()
            .map(|&d| activity(d, true, Intensity::Medium))
            .collect();
        for a in &mut activities {
            a.duration_minutes = 20;
        }
        let insights = generate_personalized_insights(&activities);
        assert!(!insights.is_empty());
        assert!(insights.len() <= 3);
    }
}
