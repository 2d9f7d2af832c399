// ABOUTME: Deterministic alert rules over analytics and trends plus the composed summary report
// ABOUTME: Each rule triggers independently; alerts carry ordered action items
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Compliance alerting.
//!
//! [`generate_alerts`] evaluates a fixed rule list over the computed
//! analytics and trends. Rules are not mutually exclusive; each produces a
//! typed [`ComplianceAlert`] with a severity and ordered action items.

use crate::performance_analytics::{ImprovementTrend, PerformanceAnalytics};
use crate::scoring_constants::alerts;
use crate::trend_analysis::{ProjectionTimeframe, TrendAnalysis};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Category of a compliance alert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    /// Weekly compliance fell well below target
    MissedWorkout,
    /// The recent compliance trend is declining
    DecliningPerformance,
    /// A goal projection has low confidence
    GoalAtRisk,
    /// Compliance is strong enough to absorb more training
    ImprovementOpportunity,
}

/// Alert severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertSeverity {
    /// Informational
    Low,
    /// Needs attention soon
    Medium,
    /// Needs attention now
    High,
}

/// A single compliance alert
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplianceAlert {
    /// Alert category
    #[serde(rename = "type")]
    pub kind: AlertKind,
    /// Severity
    pub severity: AlertSeverity,
    /// Short title
    pub title: String,
    /// Longer message with the triggering numbers
    pub message: String,
    /// Ordered suggested actions, most impactful first
    pub action_items: Vec<String>,
    /// Optional due date for time-bound alerts
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
}

/// Evaluate the alert rule list. Rules trigger independently, in a fixed
/// order.
#[must_use]
pub fn generate_alerts(
    analytics: &PerformanceAnalytics,
    trends: &TrendAnalysis,
) -> Vec<ComplianceAlert> {
    let mut result = Vec::new();

    if analytics.weekly_compliance < alerts::WEEKLY_COMPLIANCE_ALERT {
        result.push(ComplianceAlert {
            kind: AlertKind::MissedWorkout,
            severity: AlertSeverity::High,
            title: "Low Weekly Compliance".into(),
            message: format!(
                "Your weekly compliance is {}%, significantly below target.",
                analytics.weekly_compliance
            ),
            action_items: vec![
                "Review your weekly schedule for better workout timing".into(),
                "Consider shorter but more frequent sessions".into(),
                "Identify and remove scheduling conflicts".into(),
            ],
            due_date: None,
        });
    }

    if analytics.improvement_trend == ImprovementTrend::Declining {
        result.push(ComplianceAlert {
            kind: AlertKind::DecliningPerformance,
            severity: AlertSeverity::Medium,
            title: "Performance Decline Detected".into(),
            message: "Your performance metrics show a declining trend over the past two weeks."
                .into(),
            action_items: vec![
                "Consider adding more rest days".into(),
                "Review workout intensity levels".into(),
                "Ensure adequate nutrition and sleep".into(),
            ],
            due_date: None,
        });
    }

    let weekly_projection = trends
        .goals
        .projections
        .iter()
        .find(|p| p.timeframe == ProjectionTimeframe::Week);
    if let Some(projection) = weekly_projection {
        if projection.confidence < alerts::GOAL_CONFIDENCE_ALERT {
            let remaining = (projection.target as usize)
                .saturating_sub(trends.goals.current.current_week_progress);
            result.push(ComplianceAlert {
                kind: AlertKind::GoalAtRisk,
                severity: AlertSeverity::Medium,
                title: "Weekly Goal at Risk".into(),
                message: format!(
                    "Only {:.0}% confidence in meeting weekly goal.",
                    projection.confidence
                ),
                action_items: vec![
                    format!("Complete {remaining} more workouts this week"),
                    "Focus on high-impact, shorter sessions".into(),
                    "Prioritize remaining planned workouts".into(),
                ],
                due_date: None,
            });
        }
    }

    if analytics.weekly_compliance > alerts::STRONG_WEEKLY_COMPLIANCE
        && analytics.average_duration < alerts::SHORT_DURATION_OPPORTUNITY
    {
        result.push(ComplianceAlert {
            kind: AlertKind::ImprovementOpportunity,
            severity: AlertSeverity::Low,
            title: "Opportunity to Increase Duration".into(),
            message: "You're consistently completing workouts. Consider increasing duration for better results.".into(),
            action_items: vec![
                "Gradually increase workout duration by 5-10 minutes".into(),
                "Add warm-up and cool-down periods".into(),
                "Include additional exercises in strength sessions".into(),
            ],
            due_date: None,
        });
    }

    result
}
