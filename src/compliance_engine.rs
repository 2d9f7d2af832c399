// ABOUTME: Compliance engine facade composing scoring, analytics, trends and alerts
// ABOUTME: Generic over a Clock so every date-windowed computation is deterministic in tests
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The compliance engine.
//!
//! [`ComplianceEngine`] wires the per-activity scorer, the population
//! analytics, the trend analysis and the alert rules behind one seam,
//! injecting the configured clock into every date-windowed computation.
//! [`ComplianceEngine::analyze_compliance`] composes all of them into a
//! single report with an overall-health summary.

use crate::alert_engine::{generate_alerts, ComplianceAlert};
use crate::clock::{Clock, SystemClock};
use crate::compliance_scorer::ComplianceScorer;
use crate::config::AnalyticsConfig;
use crate::models::{ComplianceMetrics, TrainingActivity};
use crate::performance_analytics::{calculate_performance_analytics, PerformanceAnalytics};
use crate::risk_assessment::{
    assess_risk, calculate_consistency_score, calculate_intensity_variability_score,
    calculate_recovery_score, generate_personalized_insights, RiskAssessment,
};
use crate::scoring_constants::{alerts, health};
use crate::trend_analysis::{analyze_trends, TrendAnalysis};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Bucketed overall training health
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverallHealth {
    /// Monthly compliance at or above 80
    Excellent,
    /// Monthly compliance at or above 60
    Good,
    /// Everything below
    NeedsImprovement,
}

/// Condensed takeaways of a compliance analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplianceSummary {
    /// Bucketed overall health
    pub overall_health: OverallHealth,
    /// Up to three headline insight strings
    pub key_insights: Vec<String>,
    /// First action item of each of the first three alerts
    pub next_actions: Vec<String>,
}

/// Full output of [`ComplianceEngineTrait::analyze_compliance`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplianceReport {
    /// Population-level analytics
    pub analytics: PerformanceAnalytics,
    /// Trend analysis
    pub trends: TrendAnalysis,
    /// Triggered alerts
    pub alerts: Vec<ComplianceAlert>,
    /// Condensed summary
    pub summary: ComplianceSummary,
}

/// Seam consumed by the (excluded) transport layer
pub trait ComplianceEngineTrait {
    /// Score one planned/actual pair
    fn calculate_compliance(
        &self,
        planned: &TrainingActivity,
        outcome: Option<&TrainingActivity>,
    ) -> ComplianceMetrics;

    /// Aggregate analytics over an activity collection
    fn calculate_performance_analytics(
        &self,
        activities: &[TrainingActivity],
    ) -> PerformanceAnalytics;

    /// Trend analysis over an activity collection
    fn analyze_trends(&self, activities: &[TrainingActivity]) -> TrendAnalysis;

    /// Evaluate the alert rules
    fn generate_alerts(
        &self,
        analytics: &PerformanceAnalytics,
        trends: &TrendAnalysis,
    ) -> Vec<ComplianceAlert>;

    /// Compose analytics, trends, alerts and a summary
    fn analyze_compliance(&self, activities: &[TrainingActivity]) -> ComplianceReport;
}

/// Compliance engine with an injectable clock
#[derive(Debug, Clone)]
pub struct ComplianceEngine<C: Clock = SystemClock> {
    config: AnalyticsConfig,
    scorer: ComplianceScorer,
    clock: C,
}

impl ComplianceEngine {
    /// Engine with default configuration and the system clock
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for ComplianceEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> ComplianceEngine<C> {
    /// Engine with default configuration and a custom clock
    #[must_use]
    pub fn with_clock(clock: C) -> Self {
        Self::with_config(AnalyticsConfig::default(), clock)
    }

    /// Engine with custom configuration and clock
    #[must_use]
    pub fn with_config(config: AnalyticsConfig, clock: C) -> Self {
        let scorer = ComplianceScorer::new(&config);
        Self {
            config,
            scorer,
            clock,
        }
    }

    /// The active configuration
    #[must_use]
    pub const fn config(&self) -> &AnalyticsConfig {
        &self.config
    }

    /// Composite overtraining-risk assessment
    #[must_use]
    pub fn assess_risk(&self, activities: &[TrainingActivity]) -> RiskAssessment {
        assess_risk(activities, &self.config.risk_weights)
    }

    /// Workout regularity sub-score
    #[must_use]
    pub fn consistency_score(&self, activities: &[TrainingActivity]) -> f64 {
        calculate_consistency_score(activities)
    }

    /// Intensity distribution sub-score
    #[must_use]
    pub fn intensity_variability_score(&self, activities: &[TrainingActivity]) -> f64 {
        calculate_intensity_variability_score(activities)
    }

    /// Recovery balance sub-score
    #[must_use]
    pub fn recovery_score(&self, activities: &[TrainingActivity]) -> f64 {
        calculate_recovery_score(activities)
    }

    /// Up to three rule-based insight strings
    #[must_use]
    pub fn personalized_insights(&self, activities: &[TrainingActivity]) -> Vec<String> {
        generate_personalized_insights(activities)
    }
}

impl<C: Clock> ComplianceEngineTrait for ComplianceEngine<C> {
    fn calculate_compliance(
        &self,
        planned: &TrainingActivity,
        outcome: Option<&TrainingActivity>,
    ) -> ComplianceMetrics {
        self.scorer.calculate_compliance(planned, outcome)
    }

    fn calculate_performance_analytics(
        &self,
        activities: &[TrainingActivity],
    ) -> PerformanceAnalytics {
        calculate_performance_analytics(activities, self.clock.now())
    }

    fn analyze_trends(&self, activities: &[TrainingActivity]) -> TrendAnalysis {
        analyze_trends(activities, &self.config.goal_defaults, self.clock.now())
    }

    fn generate_alerts(
        &self,
        analytics: &PerformanceAnalytics,
        trends: &TrendAnalysis,
    ) -> Vec<ComplianceAlert> {
        generate_alerts(analytics, trends)
    }

    fn analyze_compliance(&self, activities: &[TrainingActivity]) -> ComplianceReport {
        debug!(total = activities.len(), "running full compliance analysis");

        let analytics = self.calculate_performance_analytics(activities);
        let trends = self.analyze_trends(activities);
        let alerts = self.generate_alerts(&analytics, &trends);

        let overall_health = if analytics.monthly_compliance >= health::EXCELLENT_MONTHLY_COMPLIANCE
        {
            OverallHealth::Excellent
        } else if analytics.monthly_compliance >= health::GOOD_MONTHLY_COMPLIANCE {
            OverallHealth::Good
        } else {
            OverallHealth::NeedsImprovement
        };

        let key_insights = vec![
            format!("{}% weekly compliance", analytics.weekly_compliance),
            format!("{} performance trend", analytics.improvement_trend),
            format!(
                "{} day current streak",
                trends.goals.current.streak_days
            ),
        ];

        let next_actions = alerts
            .iter()
            .take(alerts::MAX_SUMMARY_ACTIONS)
            .filter_map(|alert| alert.action_items.first().cloned())
            .collect();

        ComplianceReport {
            analytics,
            trends,
            alerts,
            summary: ComplianceSummary {
                overall_health,
                key_insights,
                next_actions,
            },
        }
    }
}
