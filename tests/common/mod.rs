// ABOUTME: Shared builders for integration tests
// ABOUTME: Provides a pinned clock plus activity and goal constructors

use ascent_analytics::{
    ActivityStatus, ActivityType, ActualResult, ComplianceMetrics, GoalCategory, GoalKind,
    GoalSnapshot, GoalTarget, Intensity, Priority, Timeframe, TrainingActivity, TrainingGoal,
};
use chrono::{DateTime, Duration, TimeZone, Utc};

/// The pinned "now" used by every integration test: Thursday 2025-05-15.
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 5, 15, 8, 0, 0).unwrap()
}

/// A completed activity `days_ago` days back carrying a precomputed
/// compliance record with the given overall score.
pub fn scored_activity(days_ago: i64, score: f64) -> TrainingActivity {
    let mut activity = planned_activity(days_ago, 60, Some(Intensity::Medium));
    activity.completed = true;
    activity.status = ActivityStatus::Completed;
    activity.actual = Some(ActualResult {
        duration_minutes: Some(60),
        completed_at: Some(fixed_now() - Duration::days(days_ago)),
        ..ActualResult::default()
    });
    activity.compliance = Some(ComplianceMetrics {
        duration_match: score,
        intensity_match: score,
        completion_match: score,
        overall_score: score,
        completed: true,
        notes: vec![],
    });
    activity
}

/// A skipped activity `days_ago` days back.
pub fn skipped_activity(days_ago: i64) -> TrainingActivity {
    let mut activity = planned_activity(days_ago, 60, Some(Intensity::Medium));
    activity.status = ActivityStatus::Skipped;
    activity
}

/// A pending planned activity `days_ago` days back.
pub fn planned_activity(
    days_ago: i64,
    duration_minutes: u32,
    intensity: Option<Intensity>,
) -> TrainingActivity {
    TrainingActivity::new(
        "Training session",
        ActivityType::Cardio,
        duration_minutes,
        intensity,
        fixed_now().date_naive() - Duration::days(days_ago),
    )
}

/// A goal created `created_days_ago` days back.
pub fn goal(
    category: GoalCategory,
    kind: GoalKind,
    target: f64,
    created_days_ago: i64,
) -> TrainingGoal {
    TrainingGoal {
        id: "goal-1".into(),
        title: "Build the base".into(),
        description: "Consistent volume before the climbing season".into(),
        category,
        goal_type: kind,
        target: GoalTarget {
            value: target,
            unit: "workouts".into(),
            timeframe: Timeframe::Monthly,
        },
        current: GoalSnapshot {
            value: 0.0,
            last_updated: fixed_now(),
        },
        deadline: None,
        priority: Priority::High,
        created_at: fixed_now() - Duration::days(created_days_ago),
        tags: vec![],
    }
}
