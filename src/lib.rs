// ABOUTME: Library entry point for the training compliance and goal analytics engine
// ABOUTME: Pure, clock-injected computation over planned vs actual training logs
//
// SPDX-License-Identifier: MIT OR Apache-2.0

#![deny(unsafe_code)]

//! # Ascent Analytics
//!
//! A training compliance and goal analytics engine for mountaineering
//! training plans. The crate turns a log of planned vs actual training
//! activities into compliance scores, trend and risk analysis, alerts, and
//! forward-looking goal projections.
//!
//! ## Architecture
//!
//! Two cooperating, stateless computation components:
//!
//! - [`ComplianceEngine`]: scores one planned/actual pair into
//!   [`ComplianceMetrics`], aggregates a collection into
//!   [`PerformanceAnalytics`], [`TrendAnalysis`] and alerts, and assesses
//!   overtraining risk.
//! - [`GoalEngine`]: tracks a [`TrainingGoal`] against a filtered subset of
//!   activities, producing [`GoalProgress`], [`GoalInsights`] and
//!   multi-horizon [`PerformancePrediction`]s.
//!
//! The engines never call each other and never mutate their inputs; a caller
//! may invoke both over the same collection concurrently without
//! synchronization. There is no I/O, no persistence and no hidden global
//! state: the ambient current time is injected through the [`Clock`] trait
//! so every date-windowed computation is deterministic under test.
//!
//! Malformed or empty inputs degrade to zeroed or neutral results instead of
//! errors; input-shape validation belongs to the transport layer in front of
//! this crate.
//!
//! ## Example
//!
//! ```
//! use ascent_analytics::{
//!     ActivityStatus, ActivityType, ComplianceEngine, ComplianceEngineTrait, FixedClock,
//!     Intensity, TrainingActivity,
//! };
//! use chrono::{TimeZone, Utc};
//!
//! let now = Utc.with_ymd_and_hms(2025, 5, 15, 8, 0, 0).unwrap();
//! let engine = ComplianceEngine::with_clock(FixedClock(now));
//!
//! let mut session = TrainingActivity::new(
//!     "Zone 2 run",
//!     ActivityType::Cardio,
//!     60,
//!     Some(Intensity::Medium),
//!     now.date_naive(),
//! );
//! session.completed = true;
//! session.status = ActivityStatus::Completed;
//!
//! let report = engine.analyze_compliance(std::slice::from_ref(&session));
//! assert_eq!(report.analytics.completed_workouts, 1);
//! ```

/// Deterministic alert rules over analytics and trends
pub mod alert_engine;
/// Injectable time source
pub mod clock;
/// Compliance engine facade and composed report
pub mod compliance_engine;
/// Per-activity compliance scoring
pub mod compliance_scorer;
/// Engine configuration structs
pub mod config;
/// Unified error handling
pub mod errors;
/// Goal achievability insights
pub mod goal_insights;
/// Goal progress tracking and projection
pub mod goal_projector;
/// Core data models
pub mod models;
/// Population-level compliance analytics
pub mod performance_analytics;
/// Multi-horizon performance predictions
pub mod performance_prediction;
/// Overtraining risk assessment
pub mod risk_assessment;
/// Named threshold constants for the rule tables
pub mod scoring_constants;
/// Trend analysis, streaks and short-horizon projections
pub mod trend_analysis;

pub use alert_engine::{generate_alerts, AlertKind, AlertSeverity, ComplianceAlert};
pub use clock::{Clock, FixedClock, SystemClock};
pub use compliance_engine::{
    ComplianceEngine, ComplianceEngineTrait, ComplianceReport, ComplianceSummary, OverallHealth,
};
pub use compliance_scorer::ComplianceScorer;
pub use config::{
    AnalyticsConfig, ComplianceWeights, GoalDefaults, HeartRateZone, HeartRateZones, RiskWeights,
};
pub use errors::{AppError, AppResult, ErrorCode};
pub use goal_insights::{generate_goal_insights, similar_goals_completion_rate, GoalInsights};
pub use goal_projector::{
    calculate_goal_progress, filter_activities_for_goal, GoalEngine, GoalEngineTrait, GoalProgress,
    GoalTrend, MilestoneRecord, ProgressProjection,
};
pub use models::{
    ActivityStatus, ActivityType, ActualResult, ComplianceMetrics, Exercise, GoalCategory,
    GoalKind, GoalSnapshot, GoalTarget, HeartRateSummary, Intensity, Priority, Timeframe,
    TrainingActivity, TrainingGoal,
};
pub use performance_analytics::{
    calculate_performance_analytics, ImprovementTrend, PerformanceAnalytics,
};
pub use performance_prediction::{
    generate_performance_predictions, PerformancePrediction, PredictionPoint,
    PredictionRecommendation, PredictionTimeframe, RecommendationLevel,
};
pub use risk_assessment::{
    assess_risk, calculate_consistency_score, calculate_intensity_variability_score,
    calculate_recovery_score, categorize_performance, generate_personalized_insights,
    PerformanceBand, RiskAssessment, RiskFactor, RiskLevel,
};
pub use trend_analysis::{
    analyze_trends, ComplianceHistoryPoint, GoalMetrics, GoalOutlook, GoalProjection,
    PerformancePatterns, ProjectionTimeframe, TrendAnalysis,
};
