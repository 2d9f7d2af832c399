// ABOUTME: Population-level compliance analytics over weekly and monthly windows
// ABOUTME: Computes counts, averages, the improvement trend and threshold-driven risk factors
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Population-level performance analytics.
//!
//! Aggregates a collection of activities into weekly/monthly compliance
//! averages, counts, and a simple improvement trend, plus rule-based risk
//! factors and recommendations. All divisors are guarded; an empty
//! collection yields a zeroed result rather than an error.

use crate::models::{ActivityStatus, TrainingActivity};
use crate::scoring_constants::analytics;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Direction of the recent compliance trend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImprovementTrend {
    /// Recent scores are more than 5% above earlier scores
    Improving,
    /// Recent scores are more than 5% below earlier scores
    Declining,
    /// No meaningful change, or not enough data to tell
    Stable,
}

impl fmt::Display for ImprovementTrend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Improving => "improving",
            Self::Declining => "declining",
            Self::Stable => "stable",
        };
        f.write_str(label)
    }
}

/// Aggregate compliance analytics over a time window
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceAnalytics {
    /// Mean overall score of scored activities in the last 7 days
    pub weekly_compliance: f64,
    /// Mean overall score of scored activities in the last 30 days
    pub monthly_compliance: f64,
    /// Total activities supplied
    pub total_workouts: usize,
    /// Completed activities
    pub completed_workouts: usize,
    /// Explicitly skipped activities
    pub skipped_workouts: usize,
    /// Mean actual (fallback planned) duration of completed activities
    pub average_duration: f64,
    /// Mean intensity of completed activities on the 1-3 scale
    pub average_intensity: f64,
    /// Direction of the recent compliance trend
    pub improvement_trend: ImprovementTrend,
    /// Threshold-triggered risk flags
    pub risk_factors: Vec<String>,
    /// Threshold-triggered recommendations
    pub recommendations: Vec<String>,
}

/// Compute aggregate analytics for an activity collection as of `now`.
#[must_use]
pub fn calculate_performance_analytics(
    activities: &[TrainingActivity],
    now: DateTime<Utc>,
) -> PerformanceAnalytics {
    debug!(
        total = activities.len(),
        "computing performance analytics"
    );

    let today = now.date_naive();
    let week_start = today - Duration::days(analytics::WEEK_WINDOW_DAYS);
    let month_start = today - Duration::days(analytics::MONTH_WINDOW_DAYS);

    let weekly_scores: Vec<f64> = activities
        .iter()
        .filter(|a| a.date >= week_start)
        .filter_map(TrainingActivity::overall_score)
        .collect();

    // Monthly scores sorted by date so the trend comparison looks at the
    // most recent points, not input order.
    let mut monthly_scored: Vec<(&TrainingActivity, f64)> = activities
        .iter()
        .filter(|a| a.date >= month_start)
        .filter_map(|a| a.overall_score().map(|s| (a, s)))
        .collect();
    monthly_scored.sort_by_key(|(a, _)| a.date);
    let monthly_scores: Vec<f64> = monthly_scored.iter().map(|(_, s)| *s).collect();

    let completed: Vec<&TrainingActivity> = activities.iter().filter(|a| a.completed).collect();
    let skipped_workouts = activities
        .iter()
        .filter(|a| a.status == ActivityStatus::Skipped)
        .count();

    let weekly_compliance = mean(&weekly_scores).round();
    let monthly_compliance = mean(&monthly_scores).round();

    let average_duration = if completed.is_empty() {
        0.0
    } else {
        let total: f64 = completed
            .iter()
            .map(|a| f64::from(a.effective_duration_minutes()))
            .sum();
        (total / completed.len() as f64).round()
    };

    let intensities: Vec<f64> = completed
        .iter()
        .filter_map(|a| a.intensity.map(|i| i.as_score()))
        .collect();
    let average_intensity = mean(&intensities);

    let improvement_trend = classify_trend(&monthly_scores);

    let mut risk_factors = Vec::new();
    let mut recommendations = Vec::new();

    if weekly_compliance < analytics::LOW_WEEKLY_COMPLIANCE {
        risk_factors.push("Low weekly compliance".into());
        recommendations.push("Focus on consistency rather than intensity".into());
    }

    if skipped_workouts as f64 > completed.len() as f64 * analytics::HIGH_SKIP_RATE {
        risk_factors.push("High skip rate".into());
        recommendations.push("Review workout difficulty and scheduling".into());
    }

    if improvement_trend == ImprovementTrend::Declining {
        risk_factors.push("Declining performance trend".into());
        recommendations.push("Consider rest days or reduce training intensity".into());
    }

    if average_duration < analytics::SHORT_AVERAGE_DURATION_MINUTES {
        recommendations.push("Consider increasing workout duration for better results".into());
    }

    PerformanceAnalytics {
        weekly_compliance,
        monthly_compliance,
        total_workouts: activities.len(),
        completed_workouts: completed.len(),
        skipped_workouts,
        average_duration,
        average_intensity,
        improvement_trend,
        risk_factors,
        recommendations,
    }
}

/// Compare the most recent 14 monthly data points against all earlier ones.
/// Defined only when both subsets are non-empty; otherwise stable.
fn classify_trend(monthly_scores: &[f64]) -> ImprovementTrend {
    if monthly_scores.len() <= analytics::TREND_RECENT_POINTS {
        return ImprovementTrend::Stable;
    }

    let split = monthly_scores.len() - analytics::TREND_RECENT_POINTS;
    let earlier = &monthly_scores[..split];
    let recent = &monthly_scores[split..];

    let earlier_avg = mean(earlier);
    if earlier_avg <= 0.0 {
        return ImprovementTrend::Stable;
    }
    let recent_avg = mean(recent);
    let change_percent = (recent_avg - earlier_avg) / earlier_avg * 100.0;

    if change_percent > analytics::TREND_IMPROVING_PERCENT {
        ImprovementTrend::Improving
    } else if change_percent < analytics::TREND_DECLINING_PERCENT {
        ImprovementTrend::Declining
    } else {
        ImprovementTrend::Stable
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}
