//! Transition rules shared by progress reporting and direct status updates
//!
//! Everything here is a pure function of its inputs. The entities call into
//! these rules so that a status set through the progress tracker and a status
//! set through a direct enrollment update always agree.

use chrono::{DateTime, Utc};

use crate::entities::{EnrollmentStatus, ProgressStatus};
use crate::value_objects::Percentage;

/// Progress status derived from a completion percentage
///
/// `>= 100` is Completed, anything above zero is InProgress, zero is NotStarted.
pub fn progress_status_for(percentage: Percentage) -> ProgressStatus {
    if percentage.is_complete() {
        ProgressStatus::Completed
    } else if percentage.is_zero() {
        ProgressStatus::NotStarted
    } else {
        ProgressStatus::InProgress
    }
}

/// Enrollment status that mirrors a progress status
///
/// Completion always wins. Below completion, a Dropped or Suspended
/// enrollment keeps its administrative status, and a Pending enrollment is
/// not promoted by a zero report.
pub fn enrollment_status_for(
    progress: ProgressStatus,
    current: EnrollmentStatus,
) -> EnrollmentStatus {
    use EnrollmentStatus as E;

    match (progress, current) {
        (ProgressStatus::Completed, _) => E::Completed,
        (_, E::Dropped | E::Suspended) => current,
        (ProgressStatus::InProgress, _) => E::InProgress,
        (ProgressStatus::NotStarted, E::Pending) => E::Pending,
        (ProgressStatus::NotStarted, _) => E::Enrolled,
    }
}

/// Outcome of applying a target enrollment status
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatusOutcome {
    pub status: EnrollmentStatus,
    pub percentage: Percentage,
    pub completed_at: Option<DateTime<Utc>>,
}

/// Enrollment status rule
///
/// A Completed target forces the percentage to 100 and stamps `completed_at`
/// if it is not already set. Every other target passes through unchanged.
pub fn apply_enrollment_status(
    target: EnrollmentStatus,
    percentage: Percentage,
    completed_at: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> StatusOutcome {
    match target {
        EnrollmentStatus::Completed => StatusOutcome {
            status: target,
            percentage: Percentage::FULL,
            completed_at: completed_at.or(Some(now)),
        },
        _ => StatusOutcome {
            status: target,
            percentage,
            completed_at,
        },
    }
}

/// Minutes spent implied by a percentage of a course of known length
pub fn derived_time_spent(duration_minutes: Option<i32>, percentage: Percentage) -> Option<i32> {
    duration_minutes.map(|total| percentage.of(total))
}

/// Letter grade for a score out of `max`
pub fn letter_grade(score: f64, max: f64) -> &'static str {
    if max <= 0.0 {
        return "F";
    }
    let ratio = score / max * 100.0;
    match ratio {
        r if r >= 90.0 => "A",
        r if r >= 80.0 => "B",
        r if r >= 70.0 => "C",
        r if r >= 60.0 => "D",
        _ => "F",
    }
}

/// Rescale `score / max` onto `target_max`, rounded to two decimals
pub fn scale_score(score: f64, max: f64, target_max: f64) -> f64 {
    if max <= 0.0 {
        return 0.0;
    }
    (score / max * target_max * 100.0).round() / 100.0
}
