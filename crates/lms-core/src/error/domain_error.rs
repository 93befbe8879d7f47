//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::entities::EnrollmentStatus;
use crate::value_objects::{ParseEnumError, Snowflake};

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("User not found: {0}")]
    UserNotFound(Snowflake),

    #[error("Course not found: {0}")]
    CourseNotFound(Snowflake),

    #[error("Enrollment not found: {0}")]
    EnrollmentNotFound(Snowflake),

    #[error("Progress not found for user {user_id} in course {course_id}")]
    ProgressNotFound {
        user_id: Snowflake,
        course_id: Snowflake,
    },

    #[error("Certificate not found: {0}")]
    CertificateNotFound(String),

    #[error("Notification not found: {0}")]
    NotificationNotFound(Snowflake),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Completion percentage must be between 0 and 100, got {0}")]
    InvalidPercentage(f64),

    #[error("Invalid quiz score: {0}")]
    InvalidQuizScore(String),

    #[error(transparent)]
    InvalidEnumValue(#[from] ParseEnumError),

    #[error("Enrollment is completed and cannot be set to {0}; report lower progress to reopen it")]
    EnrollmentAlreadyCompleted(EnrollmentStatus),

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Access denied: {0}")]
    Forbidden(String),

    #[error("Notification belongs to another user")]
    NotNotificationOwner,

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("User is already enrolled in this course")]
    AlreadyEnrolled,

    #[error("Certificate already exists for this user and course")]
    CertificateAlreadyExists,

    #[error("Progress already exists for this user and course")]
    ProgressAlreadyExists,

    // =========================================================================
    // Business Rule Violations
    // =========================================================================
    #[error("Course is full: maximum {max} participants")]
    CourseFull { max: i32 },

    #[error("Course is not active: {0}")]
    CourseInactive(Snowflake),

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Cache error: {0}")]
    CacheError(String),

    #[error("Notification delivery failed: {0}")]
    NotificationError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::CourseNotFound(_) => "UNKNOWN_COURSE",
            Self::EnrollmentNotFound(_) => "UNKNOWN_ENROLLMENT",
            Self::ProgressNotFound { .. } => "UNKNOWN_PROGRESS",
            Self::CertificateNotFound(_) => "UNKNOWN_CERTIFICATE",
            Self::NotificationNotFound(_) => "UNKNOWN_NOTIFICATION",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InvalidPercentage(_) => "INVALID_PERCENTAGE",
            Self::InvalidQuizScore(_) => "INVALID_QUIZ_SCORE",
            Self::InvalidEnumValue(_) => "INVALID_ENUM_VALUE",
            Self::EnrollmentAlreadyCompleted(_) => "ENROLLMENT_ALREADY_COMPLETED",

            // Authorization
            Self::Forbidden(_) => "FORBIDDEN",
            Self::NotNotificationOwner => "NOT_NOTIFICATION_OWNER",

            // Conflict
            Self::AlreadyEnrolled => "ALREADY_ENROLLED",
            Self::CertificateAlreadyExists => "CERTIFICATE_ALREADY_EXISTS",
            Self::ProgressAlreadyExists => "PROGRESS_ALREADY_EXISTS",

            // Business Rules
            Self::CourseFull { .. } => "COURSE_FULL",
            Self::CourseInactive(_) => "COURSE_INACTIVE",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::CacheError(_) => "CACHE_ERROR",
            Self::NotificationError(_) => "NOTIFICATION_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UserNotFound(_)
                | Self::CourseNotFound(_)
                | Self::EnrollmentNotFound(_)
                | Self::ProgressNotFound { .. }
                | Self::CertificateNotFound(_)
                | Self::NotificationNotFound(_)
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_)
                | Self::InvalidPercentage(_)
                | Self::InvalidQuizScore(_)
                | Self::InvalidEnumValue(_)
                | Self::EnrollmentAlreadyCompleted(_)
        )
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(self, Self::Forbidden(_) | Self::NotNotificationOwner)
    }

    /// Check if this is a conflict error
    ///
    /// Business rule violations on enrollment are reported as conflicts too.
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::AlreadyEnrolled
                | Self::CertificateAlreadyExists
                | Self::ProgressAlreadyExists
                | Self::CourseFull { .. }
                | Self::CourseInactive(_)
        )
    }
}
