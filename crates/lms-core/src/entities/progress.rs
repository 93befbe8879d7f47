//! Progress entity - fine-grained completion tracking for a (user, course) pair

use chrono::{DateTime, Utc};

use crate::error::DomainError;
use crate::rules;
use crate::value_objects::{labelled_enum, Percentage, Snowflake};

labelled_enum! {
    pub enum ProgressStatus {
        NotStarted => "NOT_STARTED",
        InProgress => "IN_PROGRESS",
        Completed => "COMPLETED",
    }
}

/// A single progress report from a learner's client
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressReport {
    pub percentage: Percentage,
    /// Minutes to add to the accumulated time spent
    pub time_spent_delta: Option<i32>,
    pub quiz_score: Option<f64>,
    pub max_quiz_score: Option<f64>,
}

impl ProgressReport {
    pub fn new(percentage: Percentage) -> Self {
        Self {
            percentage,
            time_spent_delta: None,
            quiz_score: None,
            max_quiz_score: None,
        }
    }

    /// Check the optional fields; the percentage is validated on construction
    pub fn validate(&self) -> Result<(), DomainError> {
        if let Some(delta) = self.time_spent_delta {
            if delta < 0 {
                return Err(DomainError::ValidationError(
                    "time spent must not be negative".to_string(),
                ));
            }
        }

        if let Some(max) = self.max_quiz_score {
            if !max.is_finite() || max <= 0.0 {
                return Err(DomainError::InvalidQuizScore(format!(
                    "max score must be positive, got {max}"
                )));
            }
        }

        if let Some(score) = self.quiz_score {
            if !score.is_finite() || score < 0.0 {
                return Err(DomainError::InvalidQuizScore(format!(
                    "score must not be negative, got {score}"
                )));
            }
            if let Some(max) = self.max_quiz_score {
                if score > max {
                    return Err(DomainError::InvalidQuizScore(format!(
                        "score {score} exceeds max {max}"
                    )));
                }
            }
        }

        Ok(())
    }
}

/// Status before and after a mutation of a Progress record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressTransition {
    pub previous: ProgressStatus,
    pub current: ProgressStatus,
}

impl ProgressTransition {
    /// True only on the edge into Completed
    #[inline]
    pub fn entered_completed(self) -> bool {
        self.current == ProgressStatus::Completed && self.previous != ProgressStatus::Completed
    }
}

/// Progress entity
#[derive(Debug, Clone, PartialEq)]
pub struct Progress {
    pub id: Snowflake,
    pub user_id: Snowflake,
    pub course_id: Snowflake,
    pub completion_percentage: Percentage,
    pub status: ProgressStatus,
    /// Never decreases
    pub time_spent_minutes: i32,
    pub quiz_score: Option<f64>,
    pub max_quiz_score: Option<f64>,
    pub notes: Option<String>,
    pub started_at: DateTime<Utc>,
    pub last_accessed_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Progress {
    /// Create a NotStarted record, started now
    pub fn new(id: Snowflake, user_id: Snowflake, course_id: Snowflake) -> Self {
        let now = Utc::now();
        Self {
            id,
            user_id,
            course_id,
            completion_percentage: Percentage::ZERO,
            status: ProgressStatus::NotStarted,
            time_spent_minutes: 0,
            quiz_score: None,
            max_quiz_score: None,
            notes: None,
            started_at: now,
            last_accessed_at: now,
            completed_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[inline]
    pub fn is_completed(&self) -> bool {
        self.status == ProgressStatus::Completed
    }

    /// Apply a progress report
    ///
    /// The percentage is last-write-wins. An explicit time delta accumulates;
    /// otherwise time is derived from the course length and never lowered.
    pub fn apply_report(
        &mut self,
        report: &ProgressReport,
        course_minutes: Option<i32>,
        now: DateTime<Utc>,
    ) -> ProgressTransition {
        self.completion_percentage = report.percentage;

        match report.time_spent_delta {
            Some(delta) => {
                self.time_spent_minutes = self.time_spent_minutes.saturating_add(delta);
            }
            None => {
                if let Some(derived) = rules::derived_time_spent(course_minutes, report.percentage)
                {
                    self.time_spent_minutes = self.time_spent_minutes.max(derived);
                }
            }
        }

        if report.quiz_score.is_some() {
            self.quiz_score = report.quiz_score;
        }
        if report.max_quiz_score.is_some() {
            self.max_quiz_score = report.max_quiz_score;
        }

        self.settle_status(now)
    }

    /// Force the record to 100 % / Completed
    ///
    /// Time spent defaults to the full course length when nothing was tracked.
    pub fn force_complete(
        &mut self,
        course_minutes: Option<i32>,
        now: DateTime<Utc>,
    ) -> ProgressTransition {
        self.completion_percentage = Percentage::FULL;
        if self.time_spent_minutes == 0 {
            if let Some(total) = course_minutes {
                self.time_spent_minutes = total;
            }
        }
        self.settle_status(now)
    }

    fn settle_status(&mut self, now: DateTime<Utc>) -> ProgressTransition {
        let previous = self.status;
        self.status = rules::progress_status_for(self.completion_percentage);

        if self.status == ProgressStatus::Completed {
            self.completed_at.get_or_insert(now);
        } else {
            self.completed_at = None;
        }

        self.last_accessed_at = now;
        self.updated_at = now;

        ProgressTransition {
            previous,
            current: self.status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn progress() -> Progress {
        Progress::new(Snowflake::new(1), Snowflake::new(2), Snowflake::new(3))
    }

    fn report(p: f64) -> ProgressReport {
        ProgressReport::new(Percentage::new(p).unwrap())
    }

    fn timed(p: f64, minutes: i32) -> ProgressReport {
        ProgressReport {
            time_spent_delta: Some(minutes),
            ..report(p)
        }
    }

    fn quiz(p: f64, score: f64, max: f64) -> ProgressReport {
        ProgressReport {
            quiz_score: Some(score),
            max_quiz_score: Some(max),
            ..report(p)
        }
    }

    #[test]
    fn test_new_progress_not_started() {
        let p = progress();
        assert_eq!(p.status, ProgressStatus::NotStarted);
        assert_eq!(p.completion_percentage, Percentage::ZERO);
        assert!(p.completed_at.is_none());
    }

    #[test]
    fn test_partial_report() {
        let mut p = progress();
        let t = p.apply_report(&report(45.0), None, Utc::now());

        assert_eq!(p.status, ProgressStatus::InProgress);
        assert_eq!(p.completion_percentage.value(), 45.0);
        assert_eq!(t.previous, ProgressStatus::NotStarted);
        assert_eq!(t.current, ProgressStatus::InProgress);
        assert!(!t.entered_completed());
    }

    #[test]
    fn test_completion_edge_only_once() {
        let mut p = progress();
        let first = p.apply_report(&report(100.0), None, Utc::now());
        let stamped = p.completed_at;
        let second = p.apply_report(&report(100.0), None, Utc::now());

        assert!(first.entered_completed());
        assert!(!second.entered_completed());
        assert_eq!(p.completed_at, stamped);
    }

    #[test]
    fn test_lower_percentage_is_accepted() {
        let mut p = progress();
        p.apply_report(&report(100.0), None, Utc::now());
        p.apply_report(&report(60.0), None, Utc::now());

        assert_eq!(p.completion_percentage.value(), 60.0);
        assert_eq!(p.status, ProgressStatus::InProgress);
        assert!(p.completed_at.is_none());
    }

    #[test]
    fn test_derived_time_never_decreases() {
        let mut p = progress();
        p.apply_report(&report(50.0), Some(120), Utc::now());
        assert_eq!(p.time_spent_minutes, 60);

        p.apply_report(&report(25.0), Some(120), Utc::now());
        assert_eq!(p.time_spent_minutes, 60);
    }

    #[test]
    fn test_explicit_time_accumulates() {
        let mut p = progress();
        p.apply_report(&timed(10.0, 15), Some(120), Utc::now());
        p.apply_report(&timed(20.0, 20), Some(120), Utc::now());
        assert_eq!(p.time_spent_minutes, 35);
    }

    #[test]
    fn test_quiz_recorded() {
        let mut p = progress();
        p.apply_report(&quiz(30.0, 8.0, 10.0), None, Utc::now());
        assert_eq!(p.quiz_score, Some(8.0));
        assert_eq!(p.max_quiz_score, Some(10.0));

        // later reports without a quiz keep the last score
        p.apply_report(&report(40.0), None, Utc::now());
        assert_eq!(p.quiz_score, Some(8.0));
    }

    #[test]
    fn test_report_validation() {
        assert!(timed(10.0, -1).validate().is_err());
        assert!(quiz(10.0, 11.0, 10.0).validate().is_err());
        assert!(quiz(10.0, 1.0, 0.0).validate().is_err());
        assert!(quiz(10.0, -1.0, 10.0).validate().is_err());
        assert!(quiz(10.0, 10.0, 10.0).validate().is_ok());
    }

    #[test]
    fn test_force_complete_fills_time() {
        let mut p = progress();
        let t = p.force_complete(Some(90), Utc::now());

        assert!(t.entered_completed());
        assert_eq!(p.time_spent_minutes, 90);
        assert_eq!(p.completion_percentage, Percentage::FULL);

        let mut tracked = progress();
        tracked.apply_report(&timed(10.0, 5), None, Utc::now());
        tracked.force_complete(Some(90), Utc::now());
        assert_eq!(tracked.time_spent_minutes, 5);
    }

    #[test]
    fn test_last_accessed_restamped() {
        let mut p = progress();
        let later = Utc::now() + chrono::Duration::minutes(5);
        p.apply_report(&report(0.0), None, later);
        assert_eq!(p.last_accessed_at, later);
        assert_eq!(p.status, ProgressStatus::NotStarted);
    }
}
