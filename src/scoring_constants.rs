// ABOUTME: Named threshold constants for compliance scoring, risk and goal analytics
// ABOUTME: Grouped by concern so each rule table can be audited in one place

//! Threshold constants used by the analytics rule tables.
//!
//! These are deliberately plain constants rather than configuration: they
//! define the semantics of the scores and alerts, not user-tunable targets.

/// Per-activity compliance scoring thresholds
pub mod scoring {
    /// Relative duration variance above which a note is emitted
    pub const DURATION_VARIANCE_NOTE_THRESHOLD: f64 = 0.2;
}

/// Windowing and trend classification for population analytics
pub mod analytics {
    /// "This week" window in days
    pub const WEEK_WINDOW_DAYS: i64 = 7;

    /// "This month" window in days
    pub const MONTH_WINDOW_DAYS: i64 = 30;

    /// Most recent data points compared against earlier history for the
    /// improvement trend
    pub const TREND_RECENT_POINTS: usize = 14;

    /// Relative score change (percent) above which the trend is improving
    pub const TREND_IMPROVING_PERCENT: f64 = 5.0;

    /// Relative score change (percent) below which the trend is declining
    pub const TREND_DECLINING_PERCENT: f64 = -5.0;

    /// Weekly compliance below this flags a consistency risk
    pub const LOW_WEEKLY_COMPLIANCE: f64 = 70.0;

    /// Skipped count above this fraction of completed count flags a high
    /// skip rate
    pub const HIGH_SKIP_RATE: f64 = 0.2;

    /// Average duration below this many minutes triggers a duration
    /// recommendation
    pub const SHORT_AVERAGE_DURATION_MINUTES: f64 = 30.0;
}

/// Trend-analysis pattern extraction
pub mod patterns {
    /// Number of top-ranked weekdays reported as best days
    pub const BEST_DAY_COUNT: usize = 3;

    /// Number of bottom-ranked weekdays reported as worst days
    pub const WORST_DAY_COUNT: usize = 2;

    /// Minimum overall score for an activity to contribute to the optimal
    /// duration estimate
    pub const OPTIMAL_DURATION_MIN_SCORE: f64 = 80.0;

    /// Optimal duration reported when no scored activities exist
    pub const DEFAULT_OPTIMAL_DURATION_MINUTES: f64 = 60.0;

    /// Projection confidence ceiling (percent)
    pub const MAX_PROJECTION_CONFIDENCE: f64 = 95.0;
}

/// Alert rule thresholds
pub mod alerts {
    /// Weekly compliance below this raises a high-severity alert
    pub const WEEKLY_COMPLIANCE_ALERT: f64 = 60.0;

    /// Weekly goal projection confidence below this raises a goal-at-risk
    /// alert
    pub const GOAL_CONFIDENCE_ALERT: f64 = 70.0;

    /// Weekly compliance above this qualifies for an improvement opportunity
    pub const STRONG_WEEKLY_COMPLIANCE: f64 = 80.0;

    /// Average duration below this many minutes qualifies for an improvement
    /// opportunity
    pub const SHORT_DURATION_OPPORTUNITY: f64 = 45.0;

    /// Alerts whose first action item feeds the summary next-actions list
    pub const MAX_SUMMARY_ACTIONS: usize = 3;
}

/// Overall health bucketing for the compliance summary
pub mod health {
    /// Monthly compliance at or above this is excellent
    pub const EXCELLENT_MONTHLY_COMPLIANCE: f64 = 80.0;

    /// Monthly compliance at or above this is good
    pub const GOOD_MONTHLY_COMPLIANCE: f64 = 60.0;
}

/// Score bands for performance categorization
pub mod performance_bands {
    /// Excellent performance threshold
    pub const EXCELLENT: f64 = 90.0;

    /// Good performance threshold
    pub const GOOD: f64 = 75.0;

    /// Average performance threshold
    pub const AVERAGE: f64 = 60.0;

    /// Poor performance threshold; anything below is critical
    pub const POOR: f64 = 40.0;
}

/// Risk sub-score thresholds and penalties
pub mod risk {
    /// Minimum activity count before consistency or recovery can be judged
    pub const MIN_ACTIVITIES_FOR_ASSESSMENT: usize = 7;

    /// Minimum completed count needed to compute day-gap statistics
    pub const MIN_COMPLETED_FOR_GAPS: usize = 2;

    /// Points deducted per unit of gap standard deviation
    pub const GAP_STDDEV_PENALTY: f64 = 10.0;

    /// Minimum completed count before intensity variability is meaningful
    pub const MIN_COMPLETED_FOR_VARIABILITY: usize = 3;

    /// Neutral score returned when data is insufficient
    pub const NEUTRAL_SCORE: f64 = 50.0;

    /// Empirically chosen optimal variance of the 1-3 intensity scale,
    /// reflecting a healthy mix of intensities
    pub const OPTIMAL_INTENSITY_VARIANCE: f64 = 0.75;

    /// Points deducted per unit of variance deviation from optimal
    pub const VARIANCE_PENALTY_FACTOR: f64 = 80.0;

    /// Consecutive completed high-intensity activities tolerated before
    /// recovery violations accrue
    pub const MAX_CONSECUTIVE_HIGH_INTENSITY: u32 = 3;

    /// Points deducted per recovery violation
    pub const RECOVERY_VIOLATION_PENALTY: f64 = 20.0;

    /// Placeholder progress sub-score until goal attainment feeds in
    pub const NEUTRAL_PROGRESS_SCORE: f64 = 75.0;

    /// Composite score at or above this is low risk
    pub const LOW_RISK_THRESHOLD: f64 = 80.0;

    /// Composite score at or above this is moderate risk
    pub const MODERATE_RISK_THRESHOLD: f64 = 65.0;

    /// Composite score at or above this is high risk; below is critical
    pub const HIGH_RISK_THRESHOLD: f64 = 50.0;

    /// Maximum personalized insights returned
    pub const MAX_INSIGHTS: usize = 3;

    /// Average planned duration above this many minutes reads as overly long
    pub const LONG_SESSION_MINUTES: f64 = 90.0;

    /// Average planned duration below this many minutes reads as short
    pub const SHORT_SESSION_MINUTES: f64 = 30.0;
}

/// Goal progress and projection thresholds
pub mod goals {
    /// Default goal horizon when no deadline is set
    pub const DEFAULT_HORIZON_DAYS: i64 = 365;

    /// Progress points above expectation for an ahead trend
    pub const AHEAD_MARGIN: f64 = 20.0;

    /// Progress points below expectation tolerated for an on-track trend
    pub const ON_TRACK_MARGIN: f64 = -10.0;

    /// Progress points below expectation tolerated for a behind trend;
    /// anything lower is at risk
    pub const BEHIND_MARGIN: f64 = -30.0;

    /// Trailing window used to estimate the recent completion rate
    pub const TRAILING_RATE_WINDOW_DAYS: i64 = 14;

    /// Floor applied to the daily rate when projecting days to goal
    pub const MIN_DAILY_RATE: f64 = 0.1;

    /// Confidence points granted per recent completed activity
    pub const CONFIDENCE_PER_ACTIVITY: f64 = 10.0;

    /// Projection confidence floor (percent)
    pub const MIN_PROJECTION_CONFIDENCE: f64 = 10.0;

    /// Projection confidence ceiling (percent)
    pub const MAX_PROJECTION_CONFIDENCE: f64 = 95.0;

    /// Fractional checkpoints recorded as milestones
    pub const MILESTONE_PERCENTAGES: [f64; 4] = [25.0, 50.0, 75.0, 90.0];
}

/// Achievability scoring and goal insight thresholds
pub mod achievability {
    /// Base achievability score before adjustments
    pub const BASE_SCORE: f64 = 50.0;

    /// Bonus for progress above 75 percent
    pub const HIGH_PROGRESS_BONUS: f64 = 30.0;

    /// Bonus for progress above 50 percent
    pub const MID_PROGRESS_BONUS: f64 = 20.0;

    /// Bonus for progress above 25 percent
    pub const LOW_PROGRESS_BONUS: f64 = 10.0;

    /// Trend adjustment when ahead of schedule
    pub const AHEAD_ADJUSTMENT: f64 = 25.0;

    /// Trend adjustment when on track
    pub const ON_TRACK_ADJUSTMENT: f64 = 15.0;

    /// Trend adjustment when behind
    pub const BEHIND_ADJUSTMENT: f64 = -10.0;

    /// Trend adjustment when at risk
    pub const AT_RISK_ADJUSTMENT: f64 = -25.0;

    /// Weight of the recent-compliance deviation from 50
    pub const COMPLIANCE_WEIGHT: f64 = 0.4;

    /// Projection confidence below this is a risk factor
    pub const LOW_CONFIDENCE_RISK: f64 = 60.0;

    /// Recent compliance below this is a risk factor
    pub const LOW_COMPLIANCE_RISK: f64 = 60.0;

    /// Workout-day consistency ratio below this is a risk factor
    pub const LOW_CONSISTENCY_RATIO: f64 = 0.7;

    /// Days considered for the workout-day consistency ratio
    pub const CONSISTENCY_WINDOW_DAYS: i64 = 30;

    /// Recent compliance above this is an accelerator
    pub const HIGH_COMPLIANCE_ACCELERATOR: f64 = 80.0;

    /// Average duration below this many minutes is an accelerator
    pub const SHORT_DURATION_ACCELERATOR: f64 = 45.0;
}

/// Static completion-rate benchmarks by goal category (percent)
pub mod benchmarks {
    /// Fitness goals
    pub const FITNESS_COMPLETION: f64 = 72.0;

    /// Strength goals
    pub const STRENGTH_COMPLETION: f64 = 68.0;

    /// Endurance goals
    pub const ENDURANCE_COMPLETION: f64 = 75.0;

    /// Weight goals
    pub const WEIGHT_COMPLETION: f64 = 65.0;

    /// Skill goals
    pub const SKILL_COMPLETION: f64 = 58.0;
}

/// Performance prediction horizons and confidence schedules
pub mod prediction {
    /// Minimum activity count before predictions are attempted
    pub const MIN_ACTIVITIES: usize = 5;

    /// Recent window, in activities, feeding current values and trends
    pub const RECENT_WINDOW: usize = 14;

    /// Weekly frequency ceiling applied to projected values
    pub const MAX_WEEKLY_FREQUENCY: f64 = 7.0;

    /// Weekly frequency below this triggers a frequency recommendation
    pub const LOW_WEEKLY_FREQUENCY: f64 = 3.0;

    /// Compliance below this triggers a compliance recommendation
    pub const LOW_COMPLIANCE: f64 = 60.0;

    /// Daily compliance slope below this triggers an intensity review
    pub const DECLINING_COMPLIANCE_SLOPE: f64 = -0.5;

    /// Performance score below this triggers a structure recommendation
    pub const LOW_PERFORMANCE: f64 = 70.0;

    /// Performance trend below this triggers a recovery recommendation
    pub const DECLINING_PERFORMANCE_TREND: f64 = -0.1;

    /// Frequency trend magnitude considered meaningful
    pub const FREQUENCY_TREND_THRESHOLD: f64 = 0.2;

    /// Skipped sessions within the last week flagging missed-session factor
    pub const RECENT_SKIPPED_THRESHOLD: usize = 2;

    /// Fallback current value for the overall-performance default prediction
    pub const DEFAULT_PERFORMANCE_SCORE: f64 = 70.0;
}
