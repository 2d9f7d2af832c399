// ABOUTME: Achievability scoring, time-to-completion and risk/accelerator identification for goals
// ABOUTME: Benchmarks against static completion rates by goal category
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Goal insight generation.
//!
//! [`generate_goal_insights`] scores how achievable a goal looks given its
//! current trajectory, estimates days to completion at the required rate,
//! and lists rule-based risk factors and accelerators. The
//! similar-goals benchmark is a static per-category reference, not a
//! computation.

use crate::goal_projector::{calculate_goal_progress, filter_activities_for_goal, GoalTrend};
use crate::models::{GoalCategory, TrainingActivity, TrainingGoal};
use crate::scoring_constants::{achievability, benchmarks, goals};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Achievability insights for one goal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalInsights {
    /// Heuristic 0-100 estimate of how likely the goal is to be met
    pub achievability_score: f64,
    /// Days to completion at the required daily rate
    pub time_to_completion: i64,
    /// Rule-based risk factor strings
    pub risk_factors: Vec<String>,
    /// Rule-based accelerator strings
    pub accelerators: Vec<String>,
    /// Static completion-rate benchmark for similar goals (percent)
    pub similar_goals_completion: f64,
}

/// Static completion-rate benchmark by goal category.
#[must_use]
pub const fn similar_goals_completion_rate(category: GoalCategory) -> f64 {
    match category {
        GoalCategory::Fitness => benchmarks::FITNESS_COMPLETION,
        GoalCategory::Strength => benchmarks::STRENGTH_COMPLETION,
        GoalCategory::Endurance => benchmarks::ENDURANCE_COMPLETION,
        GoalCategory::Weight => benchmarks::WEIGHT_COMPLETION,
        GoalCategory::Skill => benchmarks::SKILL_COMPLETION,
    }
}

/// Completion rate (percent) over the trailing two weeks
fn recent_compliance_rate(activities: &[&TrainingActivity], now: DateTime<Utc>) -> f64 {
    let window_start = now.date_naive() - Duration::days(goals::TRAILING_RATE_WINDOW_DAYS);
    let recent: Vec<&&TrainingActivity> = activities
        .iter()
        .filter(|a| a.date >= window_start)
        .collect();
    if recent.is_empty() {
        return 0.0;
    }
    let completed = recent.iter().filter(|a| a.completed).count();
    completed as f64 / recent.len() as f64 * 100.0
}

/// Fraction of the past 30 days with at least one completed activity
fn workout_day_consistency(activities: &[&TrainingActivity], now: DateTime<Utc>) -> f64 {
    let window_start = now.date_naive() - Duration::days(achievability::CONSISTENCY_WINDOW_DAYS);
    let days_with_workouts: HashSet<_> = activities
        .iter()
        .filter(|a| a.completed && a.date >= window_start)
        .map(|a| a.date)
        .collect();
    days_with_workouts.len() as f64 / achievability::CONSISTENCY_WINDOW_DAYS as f64
}

/// Generate achievability insights for a goal as of `now`.
#[must_use]
pub fn generate_goal_insights(
    goal: &TrainingGoal,
    activities: &[TrainingActivity],
    now: DateTime<Utc>,
) -> GoalInsights {
    let relevant = filter_activities_for_goal(goal, activities);
    let progress = calculate_goal_progress(goal, activities, now);
    let recent_compliance = recent_compliance_rate(&relevant, now);

    // Base score adjusted by progress bands, trend, and recent compliance
    let mut score = achievability::BASE_SCORE;
    if progress.progress > 75.0 {
        score += achievability::HIGH_PROGRESS_BONUS;
    } else if progress.progress > 50.0 {
        score += achievability::MID_PROGRESS_BONUS;
    } else if progress.progress > 25.0 {
        score += achievability::LOW_PROGRESS_BONUS;
    }
    score += match progress.trend {
        GoalTrend::Ahead => achievability::AHEAD_ADJUSTMENT,
        GoalTrend::OnTrack => achievability::ON_TRACK_ADJUSTMENT,
        GoalTrend::Behind => achievability::BEHIND_ADJUSTMENT,
        GoalTrend::AtRisk => achievability::AT_RISK_ADJUSTMENT,
    };
    score += (recent_compliance - 50.0) * achievability::COMPLIANCE_WEIGHT;
    let achievability_score = score.clamp(0.0, 100.0);

    let time_to_completion = if progress.projection.required_daily_rate == 0.0 {
        0
    } else {
        let remaining_value = goal.target.value * (1.0 - progress.progress / 100.0);
        (remaining_value / progress.projection.required_daily_rate).ceil() as i64
    };

    let mut risk_factors = Vec::new();
    if matches!(progress.trend, GoalTrend::Behind | GoalTrend::AtRisk) {
        risk_factors.push("Behind target timeline".into());
    }
    if progress.projection.confidence < achievability::LOW_CONFIDENCE_RISK {
        risk_factors.push("Low projection confidence".into());
    }
    if recent_compliance < achievability::LOW_COMPLIANCE_RISK {
        risk_factors.push("Low recent compliance rate".into());
    }
    if workout_day_consistency(&relevant, now) < achievability::LOW_CONSISTENCY_RATIO {
        risk_factors.push("Inconsistent workout schedule".into());
    }

    let mut accelerators = Vec::new();
    if progress.trend == GoalTrend::Ahead {
        accelerators.push("Ahead of schedule - maintain momentum".into());
    }
    if recent_compliance > achievability::HIGH_COMPLIANCE_ACCELERATOR {
        accelerators.push("High compliance rate - consider increasing intensity".into());
    }
    let completed: Vec<&&TrainingActivity> = relevant.iter().filter(|a| a.completed).collect();
    if !completed.is_empty() {
        let avg_duration = completed
            .iter()
            .map(|a| f64::from(a.effective_duration_minutes()))
            .sum::<f64>()
            / completed.len() as f64;
        if avg_duration < achievability::SHORT_DURATION_ACCELERATOR {
            accelerators.push("Room to increase workout duration".into());
        }
    }

    GoalInsights {
        achievability_score,
        time_to_completion,
        risk_factors,
        accelerators,
        similar_goals_completion: similar_goals_completion_rate(goal.category),
    }
}
