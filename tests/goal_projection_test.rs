// ABOUTME: End-to-end tests for goal progress, insights and performance predictions
// ABOUTME: Exercises relevance filtering, trend bands, milestones and prediction horizons

use ascent_analytics::{
    ActivityType, FixedClock, GoalCategory, GoalEngine, GoalEngineTrait, GoalKind, GoalTrend,
    PredictionTimeframe, Timeframe,
};
use chrono::Duration;

mod common;
use common::{fixed_now, goal, scored_activity, skipped_activity};

fn engine() -> GoalEngine<FixedClock> {
    GoalEngine::with_clock(FixedClock(fixed_now()))
}

#[test]
fn test_milestone_goal_progress_with_milestones() {
    // Twelve completed sessions against a 20-workout goal created a month ago
    let activities: Vec<_> = (0..12).map(|d| scored_activity(d * 2, 90.0)).collect();
    let g = goal(GoalCategory::Fitness, GoalKind::Milestone, 20.0, 30);

    let progress = engine().calculate_goal_progress(&g, &activities);

    assert_eq!(progress.goal_id, "goal-1");
    assert!((progress.progress - 60.0).abs() < 1e-9);
    // 60% actual vs ~8% expected over a year-long horizon
    assert_eq!(progress.trend, GoalTrend::Ahead);

    // Checkpoints 25% (5) and 50% (10) are reached, 75% (15) and 90% (18)
    // are not; dates ascend.
    assert_eq!(progress.milestones.len(), 2);
    assert!(progress.milestones[0].value < progress.milestones[1].value);
    assert!(progress.milestones[0].date <= progress.milestones[1].date);
    for milestone in &progress.milestones {
        assert!(milestone.notes.as_ref().unwrap().contains("milestone achieved"));
    }
}

#[test]
fn test_frequency_goal_counts_inside_timeframe_window() {
    // Five completed sessions inside the monthly window, two outside
    let mut activities: Vec<_> = (0..5).map(|d| scored_activity(d * 3, 90.0)).collect();
    activities.push(scored_activity(40, 90.0));
    activities.push(scored_activity(45, 90.0));

    let mut g = goal(GoalCategory::Fitness, GoalKind::Frequency, 10.0, 20);
    g.target.timeframe = Timeframe::Monthly;

    let progress = engine().calculate_goal_progress(&g, &activities);
    assert!((progress.progress - 50.0).abs() < 1e-9);
}

#[test]
fn test_duration_goal_accumulates_minutes() {
    let activities: Vec<_> = (0..4).map(|d| scored_activity(d, 90.0)).collect();
    let mut g = goal(GoalCategory::Fitness, GoalKind::Duration, 480.0, 10);
    g.target.unit = "minutes".into();

    let progress = engine().calculate_goal_progress(&g, &activities);
    // Four 60-minute sessions out of 480 minutes
    assert!((progress.progress - 50.0).abs() < 1e-9);
}

#[test]
fn test_strength_goal_ignores_cardio_sessions() {
    let mut strength = scored_activity(1, 90.0);
    strength.activity_type = ActivityType::Strength;
    let cardio = scored_activity(2, 90.0);

    let g = goal(GoalCategory::Strength, GoalKind::Milestone, 10.0, 10);
    let progress = engine().calculate_goal_progress(&g, &[strength, cardio]);
    assert!((progress.progress - 10.0).abs() < 1e-9);
}

#[test]
fn test_stale_goal_with_no_activity_is_at_risk() {
    let g = goal(GoalCategory::Fitness, GoalKind::Milestone, 20.0, 200);
    let progress = engine().calculate_goal_progress(&g, &[]);
    assert_eq!(progress.trend, GoalTrend::AtRisk);
    assert!((progress.projection.confidence - 10.0).abs() < 1e-9);
    assert!(progress.milestones.is_empty());
}

#[test]
fn test_insights_for_healthy_goal() {
    let activities: Vec<_> = (0..10).map(|d| scored_activity(d, 90.0)).collect();
    let g = goal(GoalCategory::Fitness, GoalKind::Milestone, 15.0, 30);

    let insights = engine().generate_goal_insights(&g, &activities);

    assert!((0.0..=100.0).contains(&insights.achievability_score));
    assert!(insights.achievability_score > 70.0);
    assert_eq!(insights.similar_goals_completion, 72.0);
    assert!(insights
        .accelerators
        .iter()
        .any(|a| a.contains("High compliance rate")));
}

#[test]
fn test_insights_for_stalled_goal_list_risks() {
    let g = goal(GoalCategory::Fitness, GoalKind::Milestone, 20.0, 200);
    let insights = engine().generate_goal_insights(&g, &[]);

    assert!(insights.achievability_score < 40.0);
    assert!(insights
        .risk_factors
        .iter()
        .any(|r| r.contains("Behind target timeline")));
    assert!(insights
        .risk_factors
        .iter()
        .any(|r| r.contains("Low recent compliance rate")));
}

#[test]
fn test_predictions_cover_three_metrics_and_horizons() {
    let activities: Vec<_> = (0..15).map(|d| scored_activity(d, 85.0)).collect();
    let predictions = engine().generate_performance_predictions(&activities);

    assert_eq!(predictions.len(), 3);
    for prediction in &predictions {
        assert_eq!(prediction.predictions.len(), 3);
        assert_eq!(
            prediction.predictions[0].timeframe,
            PredictionTimeframe::OneWeek
        );
        assert_eq!(
            prediction.predictions[2].timeframe,
            PredictionTimeframe::ThreeMonths
        );
        for point in &prediction.predictions {
            assert!(point.confidence > 0.0 && point.confidence <= 100.0);
            assert!(!point.factors.is_empty());
        }
    }
}

#[test]
fn test_sparse_history_predictions_hold_flat() {
    let activities = vec![scored_activity(1, 90.0), skipped_activity(2)];
    let predictions = engine().generate_performance_predictions(&activities);

    for prediction in &predictions {
        for point in &prediction.predictions {
            assert_eq!(point.predicted_value, prediction.current_value);
            assert!(point.confidence <= 30.0);
        }
    }
}

#[test]
fn test_goal_progress_serializes_to_json_contract() {
    let activities: Vec<_> = (0..6).map(|d| scored_activity(d, 90.0)).collect();
    let g = goal(GoalCategory::Fitness, GoalKind::Milestone, 10.0, 30);
    let progress = engine().calculate_goal_progress(&g, &activities);

    let json = serde_json::to_value(&progress).unwrap();
    assert_eq!(json["goal_id"], "goal-1");
    assert_eq!(json["trend"], "ahead");
    assert!(json["projection"]["confidence"].is_number());
    assert!(json["milestones"].is_array());
}

#[test]
fn test_week_timeframe_goal_deadline_projection() {
    // Goal created two days ago with a deadline ten days out: the required
    // daily rate spreads the remaining work over the days left.
    let mut g = goal(GoalCategory::Fitness, GoalKind::Milestone, 10.0, 2);
    g.deadline = Some(fixed_now().date_naive() + Duration::days(10));

    let activities: Vec<_> = (0..5).map(|d| scored_activity(d, 90.0)).collect();
    let progress = engine().calculate_goal_progress(&g, &activities);

    // Five completed of ten: half remaining over roughly ten days
    assert!(progress.projection.required_daily_rate > 0.0);
    assert!(progress.projection.required_daily_rate < 1.0);
}
