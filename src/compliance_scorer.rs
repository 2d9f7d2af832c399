// ABOUTME: Per-activity compliance scoring against the planned duration, intensity and exercises
// ABOUTME: Produces ComplianceMetrics with conditionally renormalized sub-score weights
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-activity compliance scoring.
//!
//! [`ComplianceScorer::calculate_compliance`] converts one planned activity
//! and its logged outcome into a [`ComplianceMetrics`] record. Each sub-score
//! is only evaluated when the plan specifies the corresponding field, and the
//! weighted overall score renormalizes over the applicable subset.

use crate::config::{AnalyticsConfig, ComplianceWeights, HeartRateZones};
use crate::models::{ComplianceMetrics, Intensity, TrainingActivity};
use crate::scoring_constants::scoring::DURATION_VARIANCE_NOTE_THRESHOLD;

/// Scores a planned/actual pair into compliance metrics
#[derive(Debug, Clone, Default)]
pub struct ComplianceScorer {
    weights: ComplianceWeights,
    zones: HeartRateZones,
}

impl ComplianceScorer {
    /// Create a scorer from the aggregate configuration
    #[must_use]
    pub const fn new(config: &AnalyticsConfig) -> Self {
        Self {
            weights: config.weights,
            zones: config.heart_rate_zones,
        }
    }

    /// Score how closely a logged outcome matched its plan.
    ///
    /// `outcome` is the logged version of the activity record; when it is
    /// absent or not completed the universal not-attempted record is
    /// returned. Sub-scores default to 100 and are only adjusted when both
    /// the planned field and the corresponding observation are present.
    #[must_use]
    pub fn calculate_compliance(
        &self,
        planned: &TrainingActivity,
        outcome: Option<&TrainingActivity>,
    ) -> ComplianceMetrics {
        let Some(outcome) = outcome else {
            return ComplianceMetrics::not_completed();
        };
        if !outcome.completed {
            return ComplianceMetrics::not_completed();
        }

        let mut notes = Vec::new();
        let mut duration_match = 100.0;
        let mut intensity_match = 100.0;
        let mut completion_match = 100.0;

        if planned.duration_minutes > 0 {
            if let Some(actual_minutes) =
                outcome.actual.as_ref().and_then(|a| a.duration_minutes)
            {
                duration_match =
                    Self::score_duration(planned.duration_minutes, actual_minutes, &mut notes);
            }
        }

        if let Some(intensity) = planned.intensity {
            if let Some(avg_hr) = outcome
                .actual
                .as_ref()
                .and_then(|a| a.heart_rate.as_ref())
                .map(|hr| hr.avg)
            {
                intensity_match = self.score_intensity(intensity, avg_hr, &mut notes);
            }
        }

        if let (Some(planned_exercises), Some(done_exercises)) =
            (planned.exercises.as_ref(), outcome.exercises.as_ref())
        {
            completion_match =
                Self::score_completion(planned_exercises.len(), done_exercises.len(), &mut notes);
        }

        // Weighted mean over the applicable sub-scores only; weights
        // renormalize over their sum.
        let mut weighted = completion_match * self.weights.completion;
        let mut total_weight = self.weights.completion;
        if planned.duration_minutes > 0 {
            weighted += duration_match * self.weights.duration;
            total_weight += self.weights.duration;
        }
        if planned.intensity.is_some() {
            weighted += intensity_match * self.weights.intensity;
            total_weight += self.weights.intensity;
        }
        let overall_score = if total_weight > 0.0 {
            (weighted / total_weight).round()
        } else {
            0.0
        };

        ComplianceMetrics {
            duration_match,
            intensity_match,
            completion_match,
            overall_score,
            completed: true,
            notes,
        }
    }

    fn score_duration(planned_minutes: u32, actual_minutes: u32, notes: &mut Vec<String>) -> f64 {
        let planned = f64::from(planned_minutes);
        let actual = f64::from(actual_minutes);
        let variance = (actual - planned).abs() / planned;
        let score = (100.0 - variance * 100.0).max(0.0).round();

        if variance > DURATION_VARIANCE_NOTE_THRESHOLD {
            let diff = actual - planned;
            let direction = if diff > 0.0 { "exceeded" } else { "under" };
            notes.push(format!(
                "Duration {direction} target by {} minutes",
                diff.abs().round()
            ));
        }

        score
    }

    fn score_intensity(&self, intensity: Intensity, avg_hr: u32, notes: &mut Vec<String>) -> f64 {
        let zone = self.zones.zone_for(intensity);
        if zone.contains(avg_hr) {
            return 100.0;
        }

        let distance_from_zone = if avg_hr < zone.min {
            f64::from(zone.min - avg_hr) / f64::from(zone.min)
        } else {
            f64::from(avg_hr - zone.max) / f64::from(zone.max)
        };
        let score = (100.0 - distance_from_zone * 100.0).max(0.0).round();

        let direction = if avg_hr < zone.min { "lower" } else { "higher" };
        notes.push(format!(
            "Heart rate {direction} than target {intensity} zone"
        ));

        score
    }

    fn score_completion(planned_count: usize, done_count: usize, notes: &mut Vec<String>) -> f64 {
        if planned_count == 0 {
            return 100.0;
        }
        let score = (done_count as f64 / planned_count as f64 * 100.0).round();
        if done_count < planned_count {
            notes.push(format!("Completed {done_count}/{planned_count} exercises"));
        }
        score
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        ActivityStatus, ActivityType, ActualResult, Exercise, HeartRateSummary, Intensity,
        TrainingActivity,
    };
    use chrono::NaiveDate;

    fn scorer() -> ComplianceScorer {
        ComplianceScorer::new(&AnalyticsConfig::default())
    }

    fn planned(duration: u32, intensity: Option<Intensity>) -> TrainingActivity {
        TrainingActivity {
            title: "Zone 2 run".into(),
            activity_type: ActivityType::Cardio,
            duration_minutes: duration,
            intensity,
            date: NaiveDate::from_ymd_opt(2025, 4, 7).unwrap(),
            ..TrainingActivity::default()
        }
    }

    fn completed(planned: &TrainingActivity, actual: ActualResult) -> TrainingActivity {
        TrainingActivity {
            completed: true,
            status: ActivityStatus::Completed,
            actual: Some(actual),
            ..planned.clone()
        }
    }

    fn exercise(name: &str) -> Exercise {
        Exercise {
            name: name.into(),
            sets: 3,
            reps: 10,
            rpe: None,
            weight_kg: None,
            rest_seconds: Some(90),
        }
    }

    #[test]
    fn test_missing_outcome_returns_not_completed() {
        let plan = planned(60, Some(Intensity::Medium));
        let metrics = scorer().calculate_compliance(&plan, None);
        assert_eq!(metrics.duration_match, 0.0);
        assert_eq!(metrics.intensity_match, 0.0);
        assert_eq!(metrics.completion_match, 0.0);
        assert_eq!(metrics.overall_score, 0.0);
        assert!(!metrics.completed);
    }

    #[test]
    fn test_uncompleted_outcome_returns_not_completed() {
        let plan = planned(60, Some(Intensity::Medium));
        let outcome = plan.clone();
        let metrics = scorer().calculate_compliance(&plan, Some(&outcome));
        assert!(!metrics.completed);
        assert_eq!(metrics.overall_score, 0.0);
    }

    #[test]
    fn test_exact_duration_scores_full_without_note() {
        let plan = planned(60, None);
        let outcome = completed(
            &plan,
            ActualResult {
                duration_minutes: Some(60),
                ..ActualResult::default()
            },
        );
        let metrics = scorer().calculate_compliance(&plan, Some(&outcome));
        assert_eq!(metrics.duration_match, 100.0);
        assert!(metrics.notes.is_empty());
    }

    #[test]
    fn test_duration_variance_scores_and_clamps() {
        let plan = planned(60, None);
        let outcome = completed(
            &plan,
            ActualResult {
                duration_minutes: Some(90),
                ..ActualResult::default()
            },
        );
        let metrics = scorer().calculate_compliance(&plan, Some(&outcome));
        assert_eq!(metrics.duration_match, 50.0);
        assert!(metrics.notes.iter().any(|n| n.contains("exceeded target by 30 minutes")));

        let outcome = completed(
            &plan,
            ActualResult {
                duration_minutes: Some(150),
                ..ActualResult::default()
            },
        );
        let metrics = scorer().calculate_compliance(&plan, Some(&outcome));
        assert_eq!(metrics.duration_match, 0.0);
    }

    #[test]
    fn test_heart_rate_inside_zone_scores_full() {
        let plan = planned(45, Some(Intensity::Medium));
        let outcome = completed(
            &plan,
            ActualResult {
                duration_minutes: Some(45),
                heart_rate: Some(HeartRateSummary { avg: 145, max: 168 }),
                ..ActualResult::default()
            },
        );
        let metrics = scorer().calculate_compliance(&plan, Some(&outcome));
        assert_eq!(metrics.intensity_match, 100.0);
    }

    #[test]
    fn test_heart_rate_above_low_zone_is_penalized_with_note() {
        let plan = planned(45, Some(Intensity::Low));
        let outcome = completed(
            &plan,
            ActualResult {
                duration_minutes: Some(45),
                heart_rate: Some(HeartRateSummary { avg: 200, max: 205 }),
                ..ActualResult::default()
            },
        );
        let metrics = scorer().calculate_compliance(&plan, Some(&outcome));
        assert!(metrics.intensity_match < 100.0);
        assert!(metrics
            .notes
            .iter()
            .any(|n| n.contains("higher than target low zone")));
    }

    #[test]
    fn test_heart_rate_below_zone_notes_lower() {
        let plan = planned(45, Some(Intensity::High));
        let outcome = completed(
            &plan,
            ActualResult {
                duration_minutes: Some(45),
                heart_rate: Some(HeartRateSummary { avg: 120, max: 140 }),
                ..ActualResult::default()
            },
        );
        let metrics = scorer().calculate_compliance(&plan, Some(&outcome));
        assert!(metrics.intensity_match < 100.0);
        assert!(metrics
            .notes
            .iter()
            .any(|n| n.contains("lower than target high zone")));
    }

    #[test]
    fn test_partial_exercise_completion() {
        let mut plan = planned(40, None);
        plan.activity_type = ActivityType::Strength;
        plan.exercises = Some(vec![
            exercise("Squat"),
            exercise("Deadlift"),
            exercise("Pull-up"),
            exercise("Press"),
        ]);
        let mut outcome = completed(
            &plan,
            ActualResult {
                duration_minutes: Some(40),
                ..ActualResult::default()
            },
        );
        outcome.exercises = Some(vec![exercise("Squat"), exercise("Deadlift"), exercise("Pull-up")]);

        let metrics = scorer().calculate_compliance(&plan, Some(&outcome));
        assert_eq!(metrics.completion_match, 75.0);
        assert!(metrics.notes.iter().any(|n| n.contains("Completed 3/4 exercises")));
    }

    #[test]
    fn test_overall_weights_renormalize_without_intensity() {
        // Only duration (0.4) and completion (0.3) apply; a perfect duration
        // with default completion must yield 100, not a score diluted by the
        // missing intensity weight.
        let plan = planned(60, None);
        let outcome = completed(
            &plan,
            ActualResult {
                duration_minutes: Some(60),
                ..ActualResult::default()
            },
        );
        let metrics = scorer().calculate_compliance(&plan, Some(&outcome));
        assert_eq!(metrics.overall_score, 100.0);

        // A duration score of 50 should renormalize to
        // (50*0.4 + 100*0.3) / 0.7 = 71 (rounded), not (50*0.4 + 100*0.3) = 50.
        let outcome = completed(
            &plan,
            ActualResult {
                duration_minutes: Some(90),
                ..ActualResult::default()
            },
        );
        let metrics = scorer().calculate_compliance(&plan, Some(&outcome));
        assert_eq!(metrics.duration_match, 50.0);
        assert_eq!(metrics.overall_score, 71.0);
    }

    #[test]
    fn test_all_sub_scores_stay_in_range() {
        let plan = planned(30, Some(Intensity::Low));
        let outcome = completed(
            &plan,
            ActualResult {
                duration_minutes: Some(300),
                heart_rate: Some(HeartRateSummary { avg: 250, max: 250 }),
                ..ActualResult::default()
            },
        );
        let metrics = scorer().calculate_compliance(&plan, Some(&outcome));
        for score in [
            metrics.duration_match,
            metrics.intensity_match,
            metrics.completion_match,
            metrics.overall_score,
        ] {
            assert!((0.0..=100.0).contains(&score));
        }
    }
}
