// ABOUTME: Chronological compliance history, weekday patterns, streaks and goal projections
// ABOUTME: Groups activities by calendar date and weekday to surface training patterns
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trend analysis over an activity collection.
//!
//! Builds the chronological compliance history, ranks weekdays by mean
//! compliance, estimates the optimal session duration and preferred
//! intensity, and snapshots goal progress including completion streaks and
//! short-horizon projections.

use crate::config::GoalDefaults;
use crate::models::{Intensity, TrainingActivity};
use crate::scoring_constants::patterns;
use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One day of compliance history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplianceHistoryPoint {
    /// Calendar date
    pub date: NaiveDate,
    /// Mean overall score of completed, scored activities that day
    pub score: f64,
    /// Completed activities that day
    pub workouts_completed: usize,
    /// Planned activities that day
    pub workouts_planned: usize,
}

/// Recurring patterns extracted from the activity history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformancePatterns {
    /// Weekdays with the highest mean compliance, best first
    pub best_days: Vec<String>,
    /// Weekdays with the lowest mean compliance, worst last
    pub worst_days: Vec<String>,
    /// Mean duration of high-scoring completed activities (minutes)
    pub optimal_duration: f64,
    /// Intensity level with the highest mean compliance
    pub preferred_intensity: Intensity,
}

/// Current goal progress counters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalMetrics {
    /// Completed activities targeted per week
    pub weekly_target: u32,
    /// Completed activities targeted per month
    pub monthly_target: u32,
    /// Completed activities since the start of the current week
    pub current_week_progress: usize,
    /// Completed activities since the start of the current month
    pub current_month_progress: usize,
    /// Length of the most recent completion streak
    pub streak_days: usize,
    /// Longest completion streak observed
    pub longest_streak: usize,
}

/// Projection horizon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectionTimeframe {
    /// Current week
    Week,
    /// Current month
    Month,
    /// Current quarter
    Quarter,
}

/// Short-horizon goal projection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalProjection {
    /// Horizon the projection applies to
    pub timeframe: ProjectionTimeframe,
    /// Target completed-activity count
    pub target: u32,
    /// Projected completed-activity count at the current completion rate
    pub projected: f64,
    /// Heuristic confidence in meeting the target (percent)
    pub confidence: f64,
    /// Completions per week needed to hit the target
    pub required_weekly_rate: u32,
}

/// Goal snapshot plus projections
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalOutlook {
    /// Current progress counters
    pub current: GoalMetrics,
    /// Week and month projections
    pub projections: Vec<GoalProjection>,
}

/// Full trend analysis result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendAnalysis {
    /// Chronological per-day compliance history
    pub compliance_history: Vec<ComplianceHistoryPoint>,
    /// Recurring weekday/duration/intensity patterns
    pub performance_patterns: PerformancePatterns,
    /// Goal counters and projections
    pub goals: GoalOutlook,
}

/// Analyze trends across an activity collection as of `now`.
#[must_use]
pub fn analyze_trends(
    activities: &[TrainingActivity],
    defaults: &GoalDefaults,
    now: DateTime<Utc>,
) -> TrendAnalysis {
    TrendAnalysis {
        compliance_history: build_compliance_history(activities),
        performance_patterns: extract_patterns(activities),
        goals: build_goal_outlook(activities, defaults, now),
    }
}

fn build_compliance_history(activities: &[TrainingActivity]) -> Vec<ComplianceHistoryPoint> {
    let mut by_date: HashMap<NaiveDate, (usize, usize, Vec<f64>)> = HashMap::new();

    for activity in activities {
        let entry = by_date.entry(activity.date).or_default();
        entry.0 += 1;
        if activity.completed {
            entry.1 += 1;
            if let Some(score) = activity.overall_score() {
                entry.2.push(score);
            }
        }
    }

    let mut history: Vec<ComplianceHistoryPoint> = by_date
        .into_iter()
        .map(|(date, (planned, completed, scores))| ComplianceHistoryPoint {
            date,
            score: if scores.is_empty() {
                0.0
            } else {
                (scores.iter().sum::<f64>() / scores.len() as f64).round()
            },
            workouts_completed: completed,
            workouts_planned: planned,
        })
        .collect();
    history.sort_by_key(|p| p.date);
    history
}

fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

fn extract_patterns(activities: &[TrainingActivity]) -> PerformancePatterns {
    #[derive(Default)]
    struct DayBucket {
        completed: usize,
        score_total: f64,
    }

    let mut buckets: HashMap<Weekday, DayBucket> = HashMap::new();
    for activity in activities {
        let bucket = buckets.entry(activity.date.weekday()).or_default();
        if activity.completed {
            bucket.completed += 1;
            if let Some(score) = activity.overall_score() {
                bucket.score_total += score;
            }
        }
    }

    // Mean over completed activities: completed-but-unscored sessions
    // dilute the average.
    let mut ranked: Vec<(Weekday, f64)> = buckets
        .iter()
        .map(|(day, bucket)| {
            let avg = if bucket.completed > 0 {
                bucket.score_total / bucket.completed as f64
            } else {
                0.0
            };
            (*day, avg)
        })
        .collect();
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    let best_days: Vec<String> = ranked
        .iter()
        .take(patterns::BEST_DAY_COUNT)
        .map(|(day, _)| weekday_name(*day).to_owned())
        .collect();
    let worst_days: Vec<String> = ranked
        .iter()
        .rev()
        .take(patterns::WORST_DAY_COUNT)
        .rev()
        .map(|(day, _)| weekday_name(*day).to_owned())
        .collect();

    // Optimal duration: mean duration of completed activities scoring at
    // least 80, defaulting when no scored data exists.
    let scored_completed: Vec<&TrainingActivity> = activities
        .iter()
        .filter(|a| a.completed && a.compliance.is_some())
        .collect();
    let optimal_duration = if scored_completed.is_empty() {
        patterns::DEFAULT_OPTIMAL_DURATION_MINUTES
    } else {
        let high_scoring: Vec<&&TrainingActivity> = scored_completed
            .iter()
            .filter(|a| {
                a.overall_score()
                    .is_some_and(|s| s >= patterns::OPTIMAL_DURATION_MIN_SCORE)
            })
            .collect();
        let total: f64 = high_scoring
            .iter()
            .map(|a| f64::from(a.effective_duration_minutes()))
            .sum();
        (total / high_scoring.len().max(1) as f64).round()
    };

    let mut by_intensity: HashMap<Intensity, (f64, usize)> = HashMap::new();
    for activity in &scored_completed {
        if let (Some(intensity), Some(score)) = (activity.intensity, activity.overall_score()) {
            let entry = by_intensity.entry(intensity).or_default();
            entry.0 += score;
            entry.1 += 1;
        }
    }
    let preferred_intensity = by_intensity
        .into_iter()
        .map(|(intensity, (total, count))| (intensity, total / count.max(1) as f64))
        .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
        .map_or(Intensity::Medium, |(intensity, _)| intensity);

    PerformancePatterns {
        best_days,
        worst_days,
        optimal_duration,
        preferred_intensity,
    }
}

fn build_goal_outlook(
    activities: &[TrainingActivity],
    defaults: &GoalDefaults,
    now: DateTime<Utc>,
) -> GoalOutlook {
    let today = now.date_naive();
    // Week starts on Sunday, matching the upstream calendar convention.
    let week_start = today - Duration::days(i64::from(today.weekday().num_days_from_sunday()));
    let month_start = today.with_day(1).unwrap_or(today);

    let this_week: Vec<&TrainingActivity> =
        activities.iter().filter(|a| a.date >= week_start).collect();
    let this_month: Vec<&TrainingActivity> =
        activities.iter().filter(|a| a.date >= month_start).collect();

    let current_week_progress = this_week.iter().filter(|a| a.completed).count();
    let current_month_progress = this_month.iter().filter(|a| a.completed).count();

    let (streak_days, longest_streak) = calculate_streaks(activities);

    let weekly_rate = current_week_progress as f64 / this_week.len().max(1) as f64;
    let monthly_rate = current_month_progress as f64 / this_month.len().max(1) as f64;

    let projections = vec![
        GoalProjection {
            timeframe: ProjectionTimeframe::Week,
            target: defaults.weekly_target,
            projected: (weekly_rate * f64::from(defaults.weekly_target)).round(),
            confidence: (weekly_rate * 100.0).min(patterns::MAX_PROJECTION_CONFIDENCE),
            required_weekly_rate: defaults.weekly_target,
        },
        GoalProjection {
            timeframe: ProjectionTimeframe::Month,
            target: defaults.monthly_target,
            projected: (monthly_rate * f64::from(defaults.monthly_target)).round(),
            confidence: (monthly_rate * 100.0).min(patterns::MAX_PROJECTION_CONFIDENCE),
            required_weekly_rate: defaults.monthly_target.div_ceil(4),
        },
    ];

    GoalOutlook {
        current: GoalMetrics {
            weekly_target: defaults.weekly_target,
            monthly_target: defaults.monthly_target,
            current_week_progress,
            current_month_progress,
            streak_days,
            longest_streak,
        },
        projections,
    }
}

/// Walk activities most-recent-first: the first contiguous run of completed
/// activities is the current streak, the longest run anywhere is the record.
fn calculate_streaks(activities: &[TrainingActivity]) -> (usize, usize) {
    let mut sorted: Vec<&TrainingActivity> = activities.iter().collect();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));

    let mut streak_days = 0;
    let mut longest = 0;
    let mut current = 0;
    let mut first_run_closed = false;

    for activity in sorted {
        if activity.completed {
            current += 1;
            if !first_run_closed {
                streak_days = current;
            }
        } else {
            first_run_closed = true;
            longest = longest.max(current);
            current = 0;
        }
    }
    longest = longest.max(current);

    (streak_days, longest)
}
