// ABOUTME: Core data models for planned and logged training activities and user goals
// ABOUTME: All types are immutable serde values; the engines never mutate their inputs
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core data models for the training analytics engine.
//!
//! A [`TrainingActivity`] carries both the plan (duration, intensity,
//! exercises) and, once logged, the outcome (`actual`, `compliance`).
//! A [`TrainingGoal`] is a user-authored target tracked against a filtered
//! subset of activities. Everything here is a plain value: cloning is cheap,
//! nothing holds identity beyond an opaque id.

use crate::errors::AppError;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Type of a training activity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityType {
    /// Aerobic base work (running, cycling, uphill hiking)
    Cardio,
    /// Gym or bodyweight strength session
    Strength,
    /// Technical skills session (rock, ice, rope work)
    Technical,
    /// Planned rest day
    Rest,
    /// Multi-hour expedition or mountain day
    Expedition,
}

impl ActivityType {
    /// Lowercase label matching the wire format
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Cardio => "cardio",
            Self::Strength => "strength",
            Self::Technical => "technical",
            Self::Rest => "rest",
            Self::Expedition => "expedition",
        }
    }
}

impl fmt::Display for ActivityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActivityType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cardio" => Ok(Self::Cardio),
            "strength" => Ok(Self::Strength),
            "technical" => Ok(Self::Technical),
            "rest" => Ok(Self::Rest),
            "expedition" => Ok(Self::Expedition),
            other => Err(AppError::invalid_format(format!(
                "unknown activity type: {other}"
            ))),
        }
    }
}

/// Planned intensity level, each mapped to a target heart-rate zone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intensity {
    /// Recovery / easy aerobic effort
    Low,
    /// Sustained aerobic effort
    Medium,
    /// Threshold and above
    High,
}

impl Intensity {
    /// Numeric 1-3 scale used for averages and variance calculations
    #[must_use]
    pub const fn as_score(&self) -> f64 {
        match self {
            Self::Low => 1.0,
            Self::Medium => 2.0,
            Self::High => 3.0,
        }
    }

    /// Lowercase label matching the wire format
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for Intensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Intensity {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            other => Err(AppError::invalid_format(format!(
                "unknown intensity: {other}"
            ))),
        }
    }
}

/// Lifecycle status of a planned activity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityStatus {
    /// Logged with an actual result
    Completed,
    /// Explicitly skipped
    Skipped,
    /// Still planned
    Pending,
}

/// A single planned exercise within a strength session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Exercise {
    /// Exercise name
    pub name: String,
    /// Planned number of sets
    pub sets: u32,
    /// Planned repetitions per set
    pub reps: u32,
    /// Rate of perceived exertion target, free-form ("7", "8-9")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rpe: Option<String>,
    /// Working weight in kilograms, if prescribed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight_kg: Option<f64>,
    /// Rest between sets in seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rest_seconds: Option<u32>,
}

/// Average and maximum heart rate observed during an activity
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HeartRateSummary {
    /// Average heart rate (BPM)
    pub avg: u32,
    /// Maximum heart rate (BPM)
    pub max: u32,
}

/// Logged outcome of a completed activity
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActualResult {
    /// Actual duration in minutes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<u32>,
    /// Heart-rate summary, when a device recorded one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heart_rate: Option<HeartRateSummary>,
    /// Estimated calories burned
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calories: Option<u32>,
    /// When the activity was logged as completed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

/// Per-activity compliance scores, all in `[0, 100]`.
///
/// Computed on demand from a planned/actual pair by the compliance scorer;
/// never mutated afterward, only replaced by a fresh computation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplianceMetrics {
    /// How closely the actual duration matched the plan
    pub duration_match: f64,
    /// How closely the observed heart rate matched the planned intensity zone
    pub intensity_match: f64,
    /// Fraction of planned exercises completed, expressed as a score.
    /// Historically serialized as `distanceMatch` despite measuring exercise
    /// completion; both legacy spellings are accepted on input.
    #[serde(alias = "distance_match", alias = "distanceMatch")]
    pub completion_match: f64,
    /// Weighted combination of the sub-scores
    pub overall_score: f64,
    /// Whether the activity was completed at all
    pub completed: bool,
    /// Human-readable observations about the deviations
    pub notes: Vec<String>,
}

impl ComplianceMetrics {
    /// The universal not-attempted record: all scores zero, one note
    #[must_use]
    pub fn not_completed() -> Self {
        Self {
            duration_match: 0.0,
            intensity_match: 0.0,
            completion_match: 0.0,
            overall_score: 0.0,
            completed: false,
            notes: vec!["Workout not completed".into()],
        }
    }
}

/// A planned training activity, optionally carrying its logged outcome
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingActivity {
    /// Opaque unique identifier
    pub id: String,
    /// Human-readable title
    pub title: String,
    /// Activity type
    #[serde(rename = "type")]
    pub activity_type: ActivityType,
    /// Planned duration in minutes
    pub duration_minutes: u32,
    /// Planned intensity, absent for unstructured sessions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intensity: Option<Intensity>,
    /// Calendar date of the activity
    pub date: NaiveDate,
    /// Whether the activity has been completed
    pub completed: bool,
    /// Lifecycle status
    pub status: ActivityStatus,
    /// Where the session took place
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Free-form notes from the plan or the log
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Planned exercises, for strength sessions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exercises: Option<Vec<Exercise>>,
    /// Logged outcome; present only when `completed` is true
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual: Option<ActualResult>,
    /// Compliance scores; present only after a compliance calculation ran
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compliance: Option<ComplianceMetrics>,
}

impl TrainingActivity {
    /// Create a pending activity with a freshly minted id
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        activity_type: ActivityType,
        duration_minutes: u32,
        intensity: Option<Intensity>,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            activity_type,
            duration_minutes,
            intensity,
            date,
            completed: false,
            status: ActivityStatus::Pending,
            location: None,
            notes: None,
            exercises: None,
            actual: None,
            compliance: None,
        }
    }

    /// Actual duration when logged, planned duration otherwise
    #[must_use]
    pub fn effective_duration_minutes(&self) -> u32 {
        self.actual
            .as_ref()
            .and_then(|a| a.duration_minutes)
            .unwrap_or(self.duration_minutes)
    }

    /// Overall compliance score, when the activity has been scored
    #[must_use]
    pub fn overall_score(&self) -> Option<f64> {
        self.compliance.as_ref().map(|c| c.overall_score)
    }
}

impl Default for TrainingActivity {
    fn default() -> Self {
        Self {
            id: String::new(),
            title: String::new(),
            activity_type: ActivityType::Cardio,
            duration_minutes: 0,
            intensity: None,
            date: NaiveDate::default(),
            completed: false,
            status: ActivityStatus::Pending,
            location: None,
            notes: None,
            exercises: None,
            actual: None,
            compliance: None,
        }
    }
}

/// High-level category of a training goal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalCategory {
    /// General fitness / adherence
    Fitness,
    /// Strength development
    Strength,
    /// Aerobic endurance
    Endurance,
    /// Body weight management
    Weight,
    /// Technical skill acquisition
    Skill,
}

/// How a goal's current value is measured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalKind {
    /// Arbitrary numeric metric (e.g. a compliance rate)
    Numeric,
    /// Accumulated training minutes
    Duration,
    /// Completed-session count within the target timeframe
    Frequency,
    /// Checkpoint-style goal tracked by completed-session count
    Milestone,
}

/// Target window for a goal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Timeframe {
    /// One day
    Daily,
    /// Seven days
    Weekly,
    /// Thirty days
    Monthly,
    /// Ninety days
    Quarterly,
    /// A full year
    Yearly,
}

impl Timeframe {
    /// Window length in days
    #[must_use]
    pub const fn days(&self) -> i64 {
        match self {
            Self::Daily => 1,
            Self::Weekly => 7,
            Self::Monthly => 30,
            Self::Quarterly => 90,
            Self::Yearly => 365,
        }
    }
}

/// Goal priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    /// Nice to have
    Low,
    /// Standard
    Medium,
    /// Primary objective
    High,
}

/// Quantitative target of a goal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalTarget {
    /// Target value in `unit`
    pub value: f64,
    /// Unit label; `compliance_rate` selects percentage semantics for
    /// numeric goals
    pub unit: String,
    /// Window the target applies to
    pub timeframe: Timeframe,
}

/// Last externally recorded value of a goal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalSnapshot {
    /// Recorded value
    pub value: f64,
    /// When the value was recorded
    pub last_updated: DateTime<Utc>,
}

/// A user-authored training goal, read-only to this engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingGoal {
    /// Opaque unique identifier
    pub id: String,
    /// Short title
    pub title: String,
    /// Longer description
    pub description: String,
    /// Goal category, driving activity relevance filtering
    pub category: GoalCategory,
    /// Measurement strategy
    #[serde(rename = "type")]
    pub goal_type: GoalKind,
    /// Quantitative target
    pub target: GoalTarget,
    /// Last externally recorded progress snapshot
    pub current: GoalSnapshot,
    /// Hard deadline; defaults to one year after creation when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<NaiveDate>,
    /// Priority
    pub priority: Priority,
    /// When the goal was created
    pub created_at: DateTime<Utc>,
    /// Tags used for relevance matching; the literal tag `all` matches
    /// every activity
    pub tags: Vec<String>,
}
