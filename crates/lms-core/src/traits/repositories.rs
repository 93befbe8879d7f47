//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation (PostgreSQL or in-memory).

use async_trait::async_trait;
use serde::Serialize;

use crate::entities::{
    Certificate, CertificateStatus, Course, Enrollment, Notification, Progress, User,
};
use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<User>>;

    /// Create a new user
    async fn create(&self, user: &User) -> RepoResult<()>;
}

// ============================================================================
// Course Repository
// ============================================================================

#[async_trait]
pub trait CourseRepository: Send + Sync {
    /// Find course by ID, including inactive courses
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Course>>;

    /// Create a new course
    async fn create(&self, course: &Course) -> RepoResult<()>;
}

// ============================================================================
// Enrollment Repository
// ============================================================================

/// Enrollment counts across all users and courses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct EnrollmentStats {
    pub total_enrollments: i64,
    pub completed_enrollments: i64,
    pub in_progress_enrollments: i64,
}

#[async_trait]
pub trait EnrollmentRepository: Send + Sync {
    /// Find enrollment by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Enrollment>>;

    /// Find the enrollment for a (user, course) pair
    async fn find_by_user_and_course(
        &self,
        user_id: Snowflake,
        course_id: Snowflake,
    ) -> RepoResult<Option<Enrollment>>;

    /// List a user's enrollments, newest first
    async fn find_by_user(&self, user_id: Snowflake) -> RepoResult<Vec<Enrollment>>;

    /// List a course's enrollments
    async fn find_by_course(&self, course_id: Snowflake) -> RepoResult<Vec<Enrollment>>;

    /// Completed enrollments with no certificate recorded
    async fn find_completed_without_certificate(&self) -> RepoResult<Vec<Enrollment>>;

    /// Number of enrollments occupying a seat (everything but Dropped)
    async fn count_active_by_course(&self, course_id: Snowflake) -> RepoResult<i64>;

    /// Create a new enrollment; fails with `AlreadyEnrolled` on a duplicate pair
    async fn create(&self, enrollment: &Enrollment) -> RepoResult<()>;

    /// Update an existing enrollment
    async fn update(&self, enrollment: &Enrollment) -> RepoResult<()>;

    /// Remove an enrollment; fails with `EnrollmentNotFound` when absent
    async fn delete(&self, id: Snowflake) -> RepoResult<()>;

    /// Counts by status over every enrollment
    async fn stats(&self) -> RepoResult<EnrollmentStats>;
}

// ============================================================================
// Progress Repository
// ============================================================================

/// Aggregate figures over all of a user's progress records
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ProgressStats {
    pub total_courses: i64,
    /// Records at or above 100 %
    pub completed_courses: i64,
    pub average_completion: f64,
    pub total_time_spent_minutes: i64,
}

#[async_trait]
pub trait ProgressRepository: Send + Sync {
    /// Find progress for a (user, course) pair
    async fn find_by_user_and_course(
        &self,
        user_id: Snowflake,
        course_id: Snowflake,
    ) -> RepoResult<Option<Progress>>;

    /// List a user's progress records, most recently accessed first
    async fn find_by_user(&self, user_id: Snowflake) -> RepoResult<Vec<Progress>>;

    /// List progress records for a course
    async fn find_by_course(&self, course_id: Snowflake) -> RepoResult<Vec<Progress>>;

    /// Persist a progress record and, when given, its enrollment as one unit
    ///
    /// Inserts the progress on first save and updates it afterwards (keyed by
    /// the (user, course) pair). Either both writes land or neither does.
    /// Returns the stored progress row.
    async fn save_with_enrollment(
        &self,
        progress: &Progress,
        enrollment: Option<&Enrollment>,
    ) -> RepoResult<Progress>;

    /// Aggregate statistics for a user
    async fn stats_for_user(&self, user_id: Snowflake) -> RepoResult<ProgressStats>;
}

// ============================================================================
// Certificate Repository
// ============================================================================

#[async_trait]
pub trait CertificateRepository: Send + Sync {
    /// Find certificate by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Certificate>>;

    /// Find certificate by its public number
    async fn find_by_number(&self, number: &str) -> RepoResult<Option<Certificate>>;

    /// Find the certificate for a (user, course) pair
    async fn find_by_user_and_course(
        &self,
        user_id: Snowflake,
        course_id: Snowflake,
    ) -> RepoResult<Option<Certificate>>;

    /// List a user's certificates, newest first
    async fn find_by_user(&self, user_id: Snowflake) -> RepoResult<Vec<Certificate>>;

    /// Create a certificate
    ///
    /// Fails with `CertificateAlreadyExists` when the pair already has one.
    async fn create(&self, certificate: &Certificate) -> RepoResult<()>;

    /// Change the status of a certificate; `notes` replaces the notes when given
    async fn update_status(
        &self,
        id: Snowflake,
        status: CertificateStatus,
        notes: Option<&str>,
    ) -> RepoResult<()>;
}

// ============================================================================
// Notification Repository
// ============================================================================

#[async_trait]
pub trait NotificationRepository: Send + Sync {
    /// Find notification by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Notification>>;

    /// List a user's notifications, newest first
    async fn find_by_user(&self, user_id: Snowflake) -> RepoResult<Vec<Notification>>;

    /// List a user's unread notifications, newest first
    async fn find_unread_by_user(&self, user_id: Snowflake) -> RepoResult<Vec<Notification>>;

    /// Count a user's unread notifications
    async fn count_unread(&self, user_id: Snowflake) -> RepoResult<i64>;

    /// Create a new notification
    async fn create(&self, notification: &Notification) -> RepoResult<()>;

    /// Persist read state and status changes
    async fn update(&self, notification: &Notification) -> RepoResult<()>;

    /// Mark every unread notification of a user as read, returning how many changed
    async fn mark_all_read(&self, user_id: Snowflake) -> RepoResult<u64>;
}
