// ABOUTME: Multi-horizon heuristic predictions for frequency, compliance and overall performance
// ABOUTME: Confidence decays with horizon and improves with available data volume
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Performance prediction.
//!
//! Three predictors share a pattern: derive a current metric value from
//! recent history, derive a trend from a comparable earlier window, then
//! project the value forward at one week, one month and three months with a
//! horizon-decaying confidence. The confidence values are heuristic labels,
//! not calibrated probabilities. With fewer than five activities every
//! predictor returns a flat low-confidence placeholder.

use crate::models::TrainingActivity;
use crate::scoring_constants::prediction;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Prediction horizon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PredictionTimeframe {
    /// One week out
    #[serde(rename = "1_week")]
    OneWeek,
    /// One month out
    #[serde(rename = "1_month")]
    OneMonth,
    /// Three months out
    #[serde(rename = "3_months")]
    ThreeMonths,
}

/// Qualitative level used for recommendation impact and effort
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationLevel {
    /// Minor
    Low,
    /// Moderate
    Medium,
    /// Major
    High,
}

/// A single forward-looking prediction point
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionPoint {
    /// Horizon this point projects to
    pub timeframe: PredictionTimeframe,
    /// Projected metric value
    pub predicted_value: f64,
    /// Heuristic confidence (percent)
    pub confidence: f64,
    /// Labels of the factors feeding the projection
    pub factors: Vec<String>,
}

/// A threshold-gated recommendation attached to a prediction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionRecommendation {
    /// Suggested action
    pub action: String,
    /// Expected impact of taking the action
    pub impact: RecommendationLevel,
    /// Effort the action requires
    pub effort: RecommendationLevel,
}

/// Predictions for one metric across all horizons
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformancePrediction {
    /// Metric name
    pub metric: String,
    /// Current metric value
    pub current_value: f64,
    /// One point per horizon
    pub predictions: Vec<PredictionPoint>,
    /// Threshold-gated recommendations
    pub recommendations: Vec<PredictionRecommendation>,
}

/// Generate the three standard predictions (workout frequency, compliance
/// rate, overall performance) as of `now`.
#[must_use]
pub fn generate_performance_predictions(
    activities: &[TrainingActivity],
    now: DateTime<Utc>,
) -> Vec<PerformancePrediction> {
    debug!(
        total = activities.len(),
        "generating performance predictions"
    );

    if activities.len() < prediction::MIN_ACTIVITIES {
        return vec![
            default_prediction("workout_frequency", weekly_frequency(activities, now)),
            default_prediction("compliance_rate", recent_compliance(activities, now)),
            default_prediction(
                "overall_performance",
                prediction::DEFAULT_PERFORMANCE_SCORE,
            ),
        ];
    }

    vec![
        predict_workout_frequency(activities, now),
        predict_compliance_rate(activities, now),
        predict_overall_performance(activities, now),
    ]
}

/// Completed activities in the trailing seven days
fn weekly_frequency(activities: &[TrainingActivity], now: DateTime<Utc>) -> f64 {
    let week_start = now.date_naive() - Duration::days(7);
    activities
        .iter()
        .filter(|a| a.completed && a.date >= week_start)
        .count() as f64
}

/// Completion rate (percent) over the trailing fourteen days
fn recent_compliance(activities: &[TrainingActivity], now: DateTime<Utc>) -> f64 {
    compliance_for_window(activities, now, 14, 0)
}

/// Completion rate (percent) for a window of `length` days ending `days_ago`
/// days before now
fn compliance_for_window(
    activities: &[TrainingActivity],
    now: DateTime<Utc>,
    length: i64,
    days_ago: i64,
) -> f64 {
    let end = now.date_naive() - Duration::days(days_ago);
    let start = end - Duration::days(length);
    let in_window: Vec<&TrainingActivity> = activities
        .iter()
        .filter(|a| a.date >= start && a.date <= end)
        .collect();
    if in_window.is_empty() {
        return 0.0;
    }
    let completed = in_window.iter().filter(|a| a.completed).count();
    completed as f64 / in_window.len() as f64 * 100.0
}

fn predict_workout_frequency(
    activities: &[TrainingActivity],
    now: DateTime<Utc>,
) -> PerformancePrediction {
    let frequency = weekly_frequency(activities, now);

    // Trend: this week's count against the week before
    let previous_week = {
        let end = now.date_naive() - Duration::days(7);
        let start = end - Duration::days(7);
        activities
            .iter()
            .filter(|a| a.completed && a.date >= start && a.date < end)
            .count() as f64
    };
    let trend = (frequency - previous_week) / previous_week.max(1.0);

    let week_start = now.date_naive() - Duration::days(7);
    let recent_skipped = activities
        .iter()
        .filter(|a| a.date >= week_start && !a.completed)
        .count();
    let mut base_factors = vec![
        "Historical workout patterns".to_owned(),
        "Seasonal trends".to_owned(),
    ];
    if recent_skipped > prediction::RECENT_SKIPPED_THRESHOLD {
        base_factors.push("Recent missed sessions".to_owned());
    }

    let predictions = vec![
        PredictionPoint {
            timeframe: PredictionTimeframe::OneWeek,
            predicted_value: frequency.min(prediction::MAX_WEEKLY_FREQUENCY),
            confidence: 90.0,
            factors: {
                let mut f = base_factors.clone();
                f.push("Established routine".to_owned());
                f
            },
        },
        PredictionPoint {
            timeframe: PredictionTimeframe::OneMonth,
            predicted_value: (frequency * 1.1).min(prediction::MAX_WEEKLY_FREQUENCY),
            confidence: 75.0,
            factors: {
                let mut f = base_factors.clone();
                f.push("Habit formation".to_owned());
                f
            },
        },
        PredictionPoint {
            timeframe: PredictionTimeframe::ThreeMonths,
            predicted_value: (frequency * 1.2).min(prediction::MAX_WEEKLY_FREQUENCY),
            confidence: 60.0,
            factors: {
                let mut f = base_factors;
                f.push("Long-term commitment".to_owned());
                f
            },
        },
    ];

    let mut recommendations = Vec::new();
    if frequency < prediction::LOW_WEEKLY_FREQUENCY {
        recommendations.push(PredictionRecommendation {
            action: "Increase workout frequency to at least 3 times per week".into(),
            impact: RecommendationLevel::High,
            effort: RecommendationLevel::Medium,
        });
    }
    if trend < -prediction::FREQUENCY_TREND_THRESHOLD {
        recommendations.push(PredictionRecommendation {
            action: "Address recent decline in workout frequency".into(),
            impact: RecommendationLevel::High,
            effort: RecommendationLevel::High,
        });
    } else if trend > prediction::FREQUENCY_TREND_THRESHOLD {
        recommendations.push(PredictionRecommendation {
            action: "Maintain current positive momentum".into(),
            impact: RecommendationLevel::Medium,
            effort: RecommendationLevel::Low,
        });
    }

    PerformancePrediction {
        metric: "workout_frequency".into(),
        current_value: frequency,
        predictions,
        recommendations,
    }
}

fn predict_compliance_rate(
    activities: &[TrainingActivity],
    now: DateTime<Utc>,
) -> PerformancePrediction {
    let current = recent_compliance(activities, now);
    // Daily slope: change between the trailing two weeks and the two weeks
    // before, spread over fourteen days
    let older = compliance_for_window(activities, now, 14, 14);
    let slope = (current - older) / 14.0;

    let projected = |days: f64| (slope.mul_add(days, current)).clamp(0.0, 100.0);

    let predictions = vec![
        PredictionPoint {
            timeframe: PredictionTimeframe::OneWeek,
            predicted_value: projected(7.0),
            confidence: 85.0,
            factors: vec![
                "Recent performance".into(),
                "Consistency trend".into(),
                "Seasonal patterns".into(),
            ],
        },
        PredictionPoint {
            timeframe: PredictionTimeframe::OneMonth,
            predicted_value: projected(30.0),
            confidence: 70.0,
            factors: vec![
                "Long-term trend".into(),
                "Goal trajectory".into(),
                "Historical patterns".into(),
            ],
        },
        PredictionPoint {
            timeframe: PredictionTimeframe::ThreeMonths,
            predicted_value: projected(90.0),
            confidence: 55.0,
            factors: vec![
                "Training adaptation".into(),
                "Motivation cycles".into(),
                "External factors".into(),
            ],
        },
    ];

    let mut recommendations = Vec::new();
    if current < prediction::LOW_COMPLIANCE {
        recommendations.push(PredictionRecommendation {
            action: "Focus on completing planned workout durations".into(),
            impact: RecommendationLevel::High,
            effort: RecommendationLevel::Medium,
        });
    }
    if slope < prediction::DECLINING_COMPLIANCE_SLOPE {
        recommendations.push(PredictionRecommendation {
            action: "Review and adjust workout intensity levels".into(),
            impact: RecommendationLevel::Medium,
            effort: RecommendationLevel::Low,
        });
    }
    if recommendations.is_empty() {
        recommendations.push(PredictionRecommendation {
            action: "Maintain current consistency".into(),
            impact: RecommendationLevel::Medium,
            effort: RecommendationLevel::Low,
        });
    }

    PerformancePrediction {
        metric: "compliance_rate".into(),
        current_value: current,
        predictions,
        recommendations,
    }
}

fn predict_overall_performance(
    activities: &[TrainingActivity],
    now: DateTime<Utc>,
) -> PerformancePrediction {
    let mut sorted: Vec<&TrainingActivity> = activities.iter().collect();
    sorted.sort_by_key(|a| a.date);

    let recent_window = &sorted[sorted.len().saturating_sub(prediction::RECENT_WINDOW)..];
    let older_start = sorted.len().saturating_sub(prediction::RECENT_WINDOW * 2);
    let older_end = sorted.len().saturating_sub(prediction::RECENT_WINDOW);
    let older_window = &sorted[older_start..older_end];

    let current = performance_score(recent_window);
    let older = performance_score(older_window);
    let trend = (current - older) / older.max(1.0);

    let factors = || {
        vec![
            "Overall compliance trends".to_owned(),
            "Workout completion rates".to_owned(),
            "Training consistency".to_owned(),
            "Goal achievement pace".to_owned(),
        ]
    };
    let window_len = recent_window.len() as f64;

    let predictions = vec![
        PredictionPoint {
            timeframe: PredictionTimeframe::OneWeek,
            predicted_value: (current * trend.mul_add(0.5, 1.0)).clamp(0.0, 100.0),
            confidence: window_len.mul_add(3.0, 50.0).min(88.0),
            factors: factors(),
        },
        PredictionPoint {
            timeframe: PredictionTimeframe::OneMonth,
            predicted_value: (current * trend.mul_add(1.5, 1.0)).clamp(0.0, 100.0),
            confidence: window_len.mul_add(2.5, 45.0).min(82.0),
            factors: factors(),
        },
        PredictionPoint {
            timeframe: PredictionTimeframe::ThreeMonths,
            predicted_value: (current * trend.mul_add(3.0, 1.0)).clamp(0.0, 100.0),
            confidence: window_len.mul_add(2.0, 40.0).min(75.0),
            factors: factors(),
        },
    ];

    let mut recommendations = Vec::new();
    if current < prediction::LOW_PERFORMANCE {
        recommendations.push(PredictionRecommendation {
            action: "Implement structured workout plan".into(),
            impact: RecommendationLevel::High,
            effort: RecommendationLevel::High,
        });
    }
    if trend < prediction::DECLINING_PERFORMANCE_TREND {
        recommendations.push(PredictionRecommendation {
            action: "Add recovery periods to prevent burnout".into(),
            impact: RecommendationLevel::Medium,
            effort: RecommendationLevel::Low,
        });
    }

    PerformancePrediction {
        metric: "overall_performance".into(),
        current_value: current,
        predictions,
        recommendations,
    }
}

/// Weighted blend of the completion rate and the mean compliance score over
/// a window of activities
fn performance_score(window: &[&TrainingActivity]) -> f64 {
    if window.is_empty() {
        return 0.0;
    }
    let completion_rate = window.iter().filter(|a| a.completed).count() as f64 / window.len() as f64;

    let scores: Vec<f64> = window
        .iter()
        .filter_map(|a| a.overall_score())
        .collect();
    let average_compliance = scores.iter().sum::<f64>() / scores.len().max(1) as f64;

    (completion_rate * 40.0 + average_compliance * 0.6).round()
}

fn default_prediction(metric: &str, current_value: f64) -> PerformancePrediction {
    let point = |timeframe, confidence| PredictionPoint {
        timeframe,
        predicted_value: current_value,
        confidence,
        factors: vec!["Insufficient historical data".to_owned()],
    };

    PerformancePrediction {
        metric: metric.to_owned(),
        current_value,
        predictions: vec![
            point(PredictionTimeframe::OneWeek, 30.0),
            point(PredictionTimeframe::OneMonth, 25.0),
            point(PredictionTimeframe::ThreeMonths, 20.0),
        ],
        recommendations: vec![PredictionRecommendation {
            action: "Continue tracking workouts for better predictions".into(),
            impact: RecommendationLevel::Medium,
            effort: RecommendationLevel::Low,
        }],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ActivityStatus, ActivityType, ComplianceMetrics, Intensity};
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 5, 15, 8, 0, 0).unwrap()
    }

    fn activity(days_ago: i64, completed: bool, score: f64) -> TrainingActivity {
        TrainingActivity {
            title: "session".into(),
            activity_type: ActivityType::Cardio,
            duration_minutes: 60,
            intensity: Some(Intensity::Medium),
            date: now().date_naive() - Duration::days(days_ago),
            completed,
            status: if completed {
                ActivityStatus::Completed
            } else {
                ActivityStatus::Skipped
            },
            compliance: completed.then(|| ComplianceMetrics {
                duration_match: score,
                intensity_match: score,
                completion_match: score,
                overall_score: score,
                completed: true,
                notes: vec![],
            }),
            ..TrainingActivity::default()
        }
    }

    #[test]
    fn test_sparse_history_returns_insufficient_data_placeholders() {
        let activities = vec![activity(1, true, 90.0), activity(2, true, 85.0)];
        let predictions = generate_performance_predictions(&activities, now());
        assert_eq!(predictions.len(), 3);
        for prediction in &predictions {
            assert_eq!(prediction.predictions.len(), 3);
            for point in &prediction.predictions {
                assert_eq!(point.predicted_value, prediction.current_value);
                assert!(point.confidence <= 30.0);
                assert!(point
                    .factors
                    .iter()
                    .any(|f| f.contains("Insufficient historical data")));
            }
        }
    }

    #[test]
    fn test_three_metrics_are_predicted() {
        let activities: Vec<TrainingActivity> =
            (0..10).map(|d| activity(d, true, 90.0)).collect();
        let predictions = generate_performance_predictions(&activities, now());
        let metrics: Vec<&str> = predictions.iter().map(|p| p.metric.as_str()).collect();
        assert_eq!(
            metrics,
            vec!["workout_frequency", "compliance_rate", "overall_performance"]
        );
    }

    #[test]
    fn test_frequency_projection_capped_at_seven() {
        let activities: Vec<TrainingActivity> =
            (0..14).map(|d| activity(d / 2, true, 90.0)).collect();
        let predictions = generate_performance_predictions(&activities, now());
        let frequency = &predictions[0];
        for point in &frequency.predictions {
            assert!(point.predicted_value <= 7.0);
        }
    }

    #[test]
    fn test_low_frequency_triggers_recommendation() {
        let mut activities: Vec<TrainingActivity> =
            (0..6).map(|d| activity(d + 20, true, 80.0)).collect();
        activities.push(activity(1, true, 80.0));
        let predictions = generate_performance_predictions(&activities, now());
        let frequency = &predictions[0];
        assert_eq!(frequency.current_value, 1.0);
        assert!(frequency
            .recommendations
            .iter()
            .any(|r| r.action.contains("at least 3 times per week")));
    }

    #[test]
    fn test_compliance_predictions_stay_in_range() {
        // Older window fully compliant, recent window mostly missed:
        // a steep negative slope must still clamp at zero.
        let mut activities: Vec<TrainingActivity> =
            (15..29).map(|d| activity(d, true, 95.0)).collect();
        activities.extend((0..14).map(|d| activity(d, d % 4 == 0, 40.0)));
        let predictions = generate_performance_predictions(&activities, now());
        let compliance = &predictions[1];
        for point in &compliance.predictions {
            assert!((0.0..=100.0).contains(&point.predicted_value));
        }
    }

    #[test]
    fn test_confidence_decays_with_horizon() {
        let activities: Vec<TrainingActivity> =
            (0..20).map(|d| activity(d, true, 85.0)).collect();
        let predictions = generate_performance_predictions(&activities, now());
        for prediction in &predictions {
            let confidences: Vec<f64> = prediction
                .predictions
                .iter()
                .map(|p| p.confidence)
                .collect();
            assert!(confidences[0] >= confidences[1]);
            assert!(confidences[1] >= confidences[2]);
        }
    }

    #[test]
    fn test_declining_performance_recommends_recovery() {
        let mut activities: Vec<TrainingActivity> =
            (14..28).map(|d| activity(d, true, 95.0)).collect();
        activities.extend((0..14).map(|d| activity(d, d % 3 == 0, 30.0)));
        let predictions = generate_performance_predictions(&activities, now());
        let overall = &predictions[2];
        assert!(overall
            .recommendations
            .iter()
            .any(|r| r.action.contains("recovery periods")));
    }
}
