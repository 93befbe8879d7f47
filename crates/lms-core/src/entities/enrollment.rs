//! Enrollment entity - a user's registration in a course

use chrono::{DateTime, Utc};

use super::progress::{Progress, ProgressStatus};
use crate::error::DomainError;
use crate::rules;
use crate::value_objects::{labelled_enum, Percentage, Snowflake};

labelled_enum! {
    pub enum EnrollmentStatus {
        Pending => "PENDING",
        Enrolled => "ENROLLED",
        InProgress => "IN_PROGRESS",
        Completed => "COMPLETED",
        Dropped => "DROPPED",
        Suspended => "SUSPENDED",
    }
}

impl EnrollmentStatus {
    /// Whether the enrollment occupies a seat in the course
    #[inline]
    pub fn is_active(self) -> bool {
        !matches!(self, Self::Dropped)
    }
}

labelled_enum! {
    #[derive(Default)]
    pub enum EnrollmentType {
        Mandatory => "MANDATORY",
        #[default]
        Optional => "OPTIONAL",
        SelfEnrolled => "SELF_ENROLLED",
        ManagerAssigned => "MANAGER_ASSIGNED",
    }
}

/// Enrollment entity
#[derive(Debug, Clone, PartialEq)]
pub struct Enrollment {
    pub id: Snowflake,
    pub user_id: Snowflake,
    pub course_id: Snowflake,
    pub status: EnrollmentStatus,
    pub enrollment_type: EnrollmentType,
    pub completion_percentage: Percentage,
    pub grade: Option<String>,
    pub notes: Option<String>,
    pub total_time_spent_minutes: i32,
    pub certificate_earned: bool,
    pub certificate_id: Option<Snowflake>,
    pub enrolled_at: DateTime<Utc>,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub last_accessed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Enrollment {
    /// Create a fresh Enrolled record at 0 %
    pub fn new(
        id: Snowflake,
        user_id: Snowflake,
        course_id: Snowflake,
        enrollment_type: EnrollmentType,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            user_id,
            course_id,
            status: EnrollmentStatus::Enrolled,
            enrollment_type,
            completion_percentage: Percentage::ZERO,
            grade: None,
            notes: None,
            total_time_spent_minutes: 0,
            certificate_earned: false,
            certificate_id: None,
            enrolled_at: now,
            started_at: None,
            completed_at: None,
            last_accessed_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[inline]
    pub fn is_completed(&self) -> bool {
        self.status == EnrollmentStatus::Completed
    }

    /// Set the status directly, applying the enrollment status rule
    ///
    /// A Completed enrollment only leaves Completed through a lower progress
    /// report; any other direct target is rejected. Returns true when this
    /// call moved the enrollment into Completed.
    pub fn apply_status(
        &mut self,
        target: EnrollmentStatus,
        now: DateTime<Utc>,
    ) -> Result<bool, DomainError> {
        if self.is_completed() && target != EnrollmentStatus::Completed {
            return Err(DomainError::EnrollmentAlreadyCompleted(target));
        }
        Ok(self.transition(target, now))
    }

    fn transition(&mut self, target: EnrollmentStatus, now: DateTime<Utc>) -> bool {
        let was_completed = self.is_completed();
        let outcome =
            rules::apply_enrollment_status(target, self.completion_percentage, self.completed_at, now);

        self.status = outcome.status;
        self.completion_percentage = outcome.percentage;
        self.completed_at = outcome.completed_at;
        if self.status == EnrollmentStatus::InProgress {
            self.started_at.get_or_insert(now);
        }
        self.updated_at = now;

        self.is_completed() && !was_completed
    }

    /// Mirror a progress record onto this enrollment
    pub fn mirror_progress(&mut self, progress: &Progress, now: DateTime<Utc>) {
        let target = rules::enrollment_status_for(progress.status, self.status);
        if target == EnrollmentStatus::Completed {
            self.completed_at = self.completed_at.or(progress.completed_at);
        } else if self.is_completed() {
            // leaving Completed through a lower report
            self.completed_at = None;
        }

        self.completion_percentage = progress.completion_percentage;
        self.transition(target, now);

        if progress.status != ProgressStatus::NotStarted {
            self.started_at.get_or_insert(progress.started_at);
        }
        self.total_time_spent_minutes = self
            .total_time_spent_minutes
            .max(progress.time_spent_minutes);
        self.last_accessed_at = Some(now);
    }

    /// Record that a certificate exists for this enrollment
    pub fn record_certificate(&mut self, certificate_id: Snowflake, grade: Option<&str>) {
        self.certificate_earned = true;
        self.certificate_id = Some(certificate_id);
        if self.grade.is_none() {
            self.grade = grade.map(str::to_string);
        }
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::ProgressReport;

    fn enrollment() -> Enrollment {
        Enrollment::new(
            Snowflake::new(1),
            Snowflake::new(2),
            Snowflake::new(3),
            EnrollmentType::SelfEnrolled,
        )
    }

    fn progress_at(p: f64) -> Progress {
        let mut progress = Progress::new(Snowflake::new(9), Snowflake::new(2), Snowflake::new(3));
        progress.apply_report(
            &ProgressReport::new(Percentage::new(p).unwrap()),
            Some(60),
            Utc::now(),
        );
        progress
    }

    #[test]
    fn test_new_enrollment() {
        let e = enrollment();
        assert_eq!(e.status, EnrollmentStatus::Enrolled);
        assert_eq!(e.completion_percentage, Percentage::ZERO);
        assert!(!e.certificate_earned);
    }

    #[test]
    fn test_direct_completion_forces_full() {
        let mut e = enrollment();
        e.completion_percentage = Percentage::new(30.0).unwrap();

        let entered = e.apply_status(EnrollmentStatus::Completed, Utc::now()).unwrap();

        assert!(entered);
        assert_eq!(e.completion_percentage, Percentage::FULL);
        assert!(e.completed_at.is_some());
        assert!(!e.apply_status(EnrollmentStatus::Completed, Utc::now()).unwrap());
    }

    #[test]
    fn test_completed_rejects_direct_downgrade() {
        let mut e = enrollment();
        e.apply_status(EnrollmentStatus::Completed, Utc::now()).unwrap();
        let stamped = e.completed_at;

        for target in [
            EnrollmentStatus::InProgress,
            EnrollmentStatus::Enrolled,
            EnrollmentStatus::Dropped,
        ] {
            let err = e.apply_status(target, Utc::now()).unwrap_err();
            assert!(matches!(err, DomainError::EnrollmentAlreadyCompleted(t) if t == target));
        }

        assert_eq!(e.status, EnrollmentStatus::Completed);
        assert_eq!(e.completion_percentage, Percentage::FULL);
        assert_eq!(e.completed_at, stamped);
    }

    #[test]
    fn test_direct_status_passes_through() {
        let mut e = enrollment();
        e.completion_percentage = Percentage::new(30.0).unwrap();
        e.apply_status(EnrollmentStatus::Suspended, Utc::now()).unwrap();

        assert_eq!(e.status, EnrollmentStatus::Suspended);
        assert_eq!(e.completion_percentage.value(), 30.0);
        assert!(e.completed_at.is_none());
    }

    #[test]
    fn test_mirror_partial_progress() {
        let mut e = enrollment();
        let p = progress_at(45.0);
        e.mirror_progress(&p, Utc::now());

        assert_eq!(e.status, EnrollmentStatus::InProgress);
        assert_eq!(e.completion_percentage.value(), 45.0);
        assert_eq!(e.total_time_spent_minutes, 27);
        assert!(e.started_at.is_some());
        assert!(e.last_accessed_at.is_some());
    }

    #[test]
    fn test_mirror_completion_uses_progress_timestamp() {
        let mut e = enrollment();
        let p = progress_at(100.0);
        e.mirror_progress(&p, Utc::now() + chrono::Duration::seconds(5));

        assert_eq!(e.status, EnrollmentStatus::Completed);
        assert_eq!(e.completed_at, p.completed_at);
    }

    #[test]
    fn test_mirror_regression_clears_completion() {
        let mut e = enrollment();
        e.mirror_progress(&progress_at(100.0), Utc::now());
        e.mirror_progress(&progress_at(70.0), Utc::now());

        assert_eq!(e.status, EnrollmentStatus::InProgress);
        assert_eq!(e.completion_percentage.value(), 70.0);
        assert!(e.completed_at.is_none());
    }

    #[test]
    fn test_mirror_keeps_dropped() {
        let mut e = enrollment();
        e.apply_status(EnrollmentStatus::Dropped, Utc::now()).unwrap();
        e.mirror_progress(&progress_at(50.0), Utc::now());

        assert_eq!(e.status, EnrollmentStatus::Dropped);
        assert_eq!(e.completion_percentage.value(), 50.0);
    }

    #[test]
    fn test_record_certificate_keeps_existing_grade() {
        let mut e = enrollment();
        e.grade = Some("B".to_string());
        e.record_certificate(Snowflake::new(77), Some("A"));

        assert!(e.certificate_earned);
        assert_eq!(e.certificate_id, Some(Snowflake::new(77)));
        assert_eq!(e.grade.as_deref(), Some("B"));
    }

    #[test]
    fn test_dropped_is_inactive() {
        assert!(!EnrollmentStatus::Dropped.is_active());
        assert!(EnrollmentStatus::Suspended.is_active());
    }
}
