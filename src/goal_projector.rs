// ABOUTME: Goal progress tracking with relevance filtering, per-kind value strategies and milestones
// ABOUTME: Projects completion dates from the trailing two-week completion rate
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Goal progress tracking and projection.
//!
//! [`GoalEngine`] filters the activities relevant to a [`TrainingGoal`],
//! derives the goal's current value through a per-kind strategy function,
//! classifies the trend against a time-elapsed expectation, projects a
//! completion date from the trailing two-week rate, and records achieved
//! milestones.

use crate::clock::{Clock, SystemClock};
use crate::goal_insights::{generate_goal_insights, GoalInsights};
use crate::models::{ActivityType, GoalCategory, GoalKind, TrainingActivity, TrainingGoal};
use crate::performance_prediction::{generate_performance_predictions, PerformancePrediction};
use crate::scoring_constants::goals;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Progress relative to the time-elapsed expectation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalTrend {
    /// More than 20 points ahead of expected progress
    Ahead,
    /// Within the tolerated band around expected progress
    OnTrack,
    /// 10 to 30 points behind expected progress
    Behind,
    /// More than 30 points behind expected progress
    AtRisk,
}

/// Completion projection for a goal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressProjection {
    /// Estimated completion instant at the recent rate
    pub estimated_completion: DateTime<Utc>,
    /// Heuristic confidence in the estimate (percent)
    pub confidence: f64,
    /// Daily rate needed to finish by the deadline
    pub required_daily_rate: f64,
}

/// An achieved fractional checkpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MilestoneRecord {
    /// Date the checkpoint was reached
    pub date: NaiveDate,
    /// Checkpoint value in goal units
    pub value: f64,
    /// Checkpoint annotation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Current progress of a goal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalProgress {
    /// Goal id this progress belongs to
    pub goal_id: String,
    /// Progress percentage, capped at 100
    pub progress: f64,
    /// Trend relative to the time-elapsed expectation
    pub trend: GoalTrend,
    /// Completion projection
    pub projection: ProgressProjection,
    /// Achieved checkpoints, ascending by date
    pub milestones: Vec<MilestoneRecord>,
}

/// Seam consumed by the (excluded) transport layer
pub trait GoalEngineTrait {
    /// Track progress of a goal against an activity collection
    fn calculate_goal_progress(
        &self,
        goal: &TrainingGoal,
        activities: &[TrainingActivity],
    ) -> GoalProgress;

    /// Generate achievability insights for a goal
    fn generate_goal_insights(
        &self,
        goal: &TrainingGoal,
        activities: &[TrainingActivity],
    ) -> GoalInsights;

    /// Multi-horizon performance predictions over an activity collection
    fn generate_performance_predictions(
        &self,
        activities: &[TrainingActivity],
    ) -> Vec<PerformancePrediction>;
}

/// Goal engine with an injectable clock
#[derive(Debug, Clone)]
pub struct GoalEngine<C: Clock = SystemClock> {
    clock: C,
}

impl GoalEngine {
    /// Engine with the system clock
    #[must_use]
    pub const fn new() -> Self {
        Self { clock: SystemClock }
    }
}

impl Default for GoalEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> GoalEngine<C> {
    /// Engine with a custom clock
    #[must_use]
    pub const fn with_clock(clock: C) -> Self {
        Self { clock }
    }
}

impl<C: Clock> GoalEngineTrait for GoalEngine<C> {
    fn calculate_goal_progress(
        &self,
        goal: &TrainingGoal,
        activities: &[TrainingActivity],
    ) -> GoalProgress {
        calculate_goal_progress(goal, activities, self.clock.now())
    }

    fn generate_goal_insights(
        &self,
        goal: &TrainingGoal,
        activities: &[TrainingActivity],
    ) -> GoalInsights {
        generate_goal_insights(goal, activities, self.clock.now())
    }

    fn generate_performance_predictions(
        &self,
        activities: &[TrainingActivity],
    ) -> Vec<PerformancePrediction> {
        generate_performance_predictions(activities, self.clock.now())
    }
}

/// The activities a goal is tracked against.
///
/// The literal tag `all` matches everything. Fitness goals track every
/// completed activity, strength and endurance goals track completed
/// activities of matching types, and remaining categories match tags against
/// the activity type or title.
#[must_use]
pub fn filter_activities_for_goal<'a>(
    goal: &TrainingGoal,
    activities: &'a [TrainingActivity],
) -> Vec<&'a TrainingActivity> {
    activities
        .iter()
        .filter(|activity| {
            if goal.tags.iter().any(|t| t == "all") {
                return true;
            }
            match goal.category {
                GoalCategory::Fitness => activity.completed,
                GoalCategory::Strength => {
                    activity.activity_type == ActivityType::Strength && activity.completed
                }
                GoalCategory::Endurance => {
                    matches!(
                        activity.activity_type,
                        ActivityType::Cardio | ActivityType::Expedition
                    ) && activity.completed
                }
                GoalCategory::Weight | GoalCategory::Skill => {
                    let title = activity.title.to_lowercase();
                    goal.tags.iter().any(|tag| {
                        activity.activity_type.as_str().contains(tag.as_str())
                            || title.contains(&tag.to_lowercase())
                    })
                }
            }
        })
        .collect()
}

/// Derive a goal's current value from its relevant activities, dispatching
/// on the goal kind.
#[must_use]
pub fn calculate_current_value(
    goal: &TrainingGoal,
    relevant: &[&TrainingActivity],
    now: DateTime<Utc>,
) -> f64 {
    match goal.goal_type {
        GoalKind::Frequency => frequency_value(goal, relevant, now),
        GoalKind::Duration => duration_value(relevant),
        GoalKind::Numeric => numeric_value(goal, relevant),
        GoalKind::Milestone => completed_count(relevant),
    }
}

/// Completed activities within the goal's timeframe window ending now
fn frequency_value(goal: &TrainingGoal, relevant: &[&TrainingActivity], now: DateTime<Utc>) -> f64 {
    let window_start = now.date_naive() - Duration::days(goal.target.timeframe.days());
    relevant
        .iter()
        .filter(|a| a.completed && a.date >= window_start)
        .count() as f64
}

/// Sum of actual (fallback planned) durations of completed activities
fn duration_value(relevant: &[&TrainingActivity]) -> f64 {
    relevant
        .iter()
        .filter(|a| a.completed)
        .map(|a| f64::from(a.effective_duration_minutes()))
        .sum()
}

/// Numeric goals: `compliance_rate` measures the completed percentage of the
/// relevant set, everything else falls back to the completed count
fn numeric_value(goal: &TrainingGoal, relevant: &[&TrainingActivity]) -> f64 {
    if goal.target.unit == "compliance_rate" {
        if relevant.is_empty() {
            return 0.0;
        }
        let completed = relevant.iter().filter(|a| a.completed).count();
        return completed as f64 / relevant.len() as f64 * 100.0;
    }
    completed_count(relevant)
}

fn completed_count(relevant: &[&TrainingActivity]) -> f64 {
    relevant.iter().filter(|a| a.completed).count() as f64
}

fn goal_deadline(goal: &TrainingGoal) -> DateTime<Utc> {
    goal.deadline.map_or_else(
        || goal.created_at + Duration::days(goals::DEFAULT_HORIZON_DAYS),
        |date| {
            date.and_hms_opt(0, 0, 0)
                .map_or(goal.created_at, |dt| dt.and_utc())
        },
    )
}

fn classify_trend(goal: &TrainingGoal, progress: f64, now: DateTime<Utc>) -> GoalTrend {
    let deadline = goal_deadline(goal);
    let total_seconds = (deadline - goal.created_at).num_seconds();
    let expected_progress = if total_seconds > 0 {
        let elapsed_seconds = (now - goal.created_at).num_seconds();
        elapsed_seconds as f64 / total_seconds as f64 * 100.0
    } else {
        100.0
    };

    let difference = progress - expected_progress;
    if difference > goals::AHEAD_MARGIN {
        GoalTrend::Ahead
    } else if difference > goals::ON_TRACK_MARGIN {
        GoalTrend::OnTrack
    } else if difference > goals::BEHIND_MARGIN {
        GoalTrend::Behind
    } else {
        GoalTrend::AtRisk
    }
}

fn generate_projection(
    goal: &TrainingGoal,
    relevant: &[&TrainingActivity],
    current_value: f64,
    now: DateTime<Utc>,
) -> ProgressProjection {
    let window_start = now.date_naive() - Duration::days(goals::TRAILING_RATE_WINDOW_DAYS);
    let recent_count = relevant
        .iter()
        .filter(|a| a.completed && a.date >= window_start)
        .count();

    let recent_rate = recent_count as f64 / goals::TRAILING_RATE_WINDOW_DAYS as f64;
    let remaining_value = (goal.target.value - current_value).max(0.0);
    let days_to_goal = remaining_value / recent_rate.max(goals::MIN_DAILY_RATE);

    let estimated_completion = now + Duration::seconds((days_to_goal * 86_400.0) as i64);
    let confidence = (recent_count as f64 * goals::CONFIDENCE_PER_ACTIVITY)
        .clamp(goals::MIN_PROJECTION_CONFIDENCE, goals::MAX_PROJECTION_CONFIDENCE);

    let deadline = goal_deadline(goal);
    let days_until_deadline = (deadline - now).num_seconds() as f64 / 86_400.0;
    let required_daily_rate = remaining_value / days_until_deadline.max(1.0);

    ProgressProjection {
        estimated_completion,
        confidence,
        required_daily_rate,
    }
}

fn generate_milestones(
    goal: &TrainingGoal,
    relevant: &[&TrainingActivity],
    current_value: f64,
    now: DateTime<Utc>,
) -> Vec<MilestoneRecord> {
    let mut sorted: Vec<&&TrainingActivity> =
        relevant.iter().filter(|a| a.completed).collect();
    sorted.sort_by_key(|a| a.date);

    let mut milestones = Vec::new();
    for percentage in goals::MILESTONE_PERCENTAGES {
        let checkpoint_value = goal.target.value * percentage / 100.0;
        if current_value < checkpoint_value {
            continue;
        }

        // Earliest activity at which the running completed count reached the
        // checkpoint; falls back to today for checkpoints reached through
        // externally recorded values.
        let mut running_total = 0.0;
        let mut achieved_on = now.date_naive();
        for activity in &sorted {
            running_total += 1.0;
            if running_total >= checkpoint_value {
                achieved_on = activity.date;
                break;
            }
        }

        milestones.push(MilestoneRecord {
            date: achieved_on,
            value: checkpoint_value,
            notes: Some(format!("{percentage}% milestone achieved")),
        });
    }

    milestones.sort_by_key(|m| m.date);
    milestones
}

/// Track a goal's progress against an activity collection as of `now`.
#[must_use]
pub fn calculate_goal_progress(
    goal: &TrainingGoal,
    activities: &[TrainingActivity],
    now: DateTime<Utc>,
) -> GoalProgress {
    let relevant = filter_activities_for_goal(goal, activities);
    debug!(
        goal_id = %goal.id,
        relevant = relevant.len(),
        "tracking goal progress"
    );

    let current_value = calculate_current_value(goal, &relevant, now);
    let progress = if goal.target.value > 0.0 {
        (current_value / goal.target.value * 100.0).min(100.0)
    } else {
        warn!(goal_id = %goal.id, "goal has a non-positive target value");
        0.0
    };

    let trend = classify_trend(goal, progress, now);
    let projection = generate_projection(goal, &relevant, current_value, now);
    let milestones = generate_milestones(goal, &relevant, current_value, now);

    GoalProgress {
        goal_id: goal.id.clone(),
        progress,
        trend,
        projection,
        milestones,
    }
}
