//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.

use lms_core::{DomainError, Percentage, ProgressReport, Snowflake};
use serde::Deserialize;
use validator::Validate;

// ============================================================================
// Progress Requests
// ============================================================================

/// Progress report from a learner's client
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ReportProgressRequest {
    /// Defaults to the caller
    pub user_id: Option<Snowflake>,

    pub course_id: Snowflake,

    #[validate(range(min = 0.0, max = 100.0, message = "Completion percentage must be between 0 and 100"))]
    pub completion_percentage: f64,

    /// Minutes to add to the time already spent
    #[validate(range(min = 0, message = "Time spent must not be negative"))]
    pub time_spent_minutes: Option<i32>,

    #[validate(range(min = 0.0, message = "Quiz score must not be negative"))]
    pub quiz_score: Option<f64>,

    #[validate(range(exclusive_min = 0.0, message = "Max quiz score must be positive"))]
    pub max_quiz_score: Option<f64>,

    #[validate(length(max = 2000, message = "Notes must be at most 2000 characters"))]
    pub notes: Option<String>,
}

impl ReportProgressRequest {
    /// Domain report carried by this request
    pub fn to_report(&self) -> Result<ProgressReport, DomainError> {
        let report = ProgressReport {
            percentage: Percentage::new(self.completion_percentage)?,
            time_spent_delta: self.time_spent_minutes,
            quiz_score: self.quiz_score,
            max_quiz_score: self.max_quiz_score,
        };
        report.validate()?;
        Ok(report)
    }
}

/// Force a course to completion
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct MarkCompletedRequest {
    /// Defaults to the caller
    pub user_id: Option<Snowflake>,

    pub course_id: Snowflake,
}

// ============================================================================
// Enrollment Requests
// ============================================================================

/// Enroll a user in a course
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct EnrollRequest {
    /// Defaults to the caller; enrolling someone else requires a staff role
    pub user_id: Option<Snowflake>,

    pub course_id: Snowflake,

    /// `MANDATORY`, `OPTIONAL`, `SELF_ENROLLED`, or `MANAGER_ASSIGNED`
    pub enrollment_type: Option<String>,

    #[validate(length(max = 2000, message = "Notes must be at most 2000 characters"))]
    pub notes: Option<String>,
}

/// Set an enrollment's status directly
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateEnrollmentStatusRequest {
    #[validate(length(min = 1, message = "Status is required"))]
    pub status: String,
}

// ============================================================================
// Certificate Requests
// ============================================================================

/// Staff-initiated certificate issuance
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct IssueCertificateRequest {
    pub user_id: Snowflake,

    pub course_id: Snowflake,

    /// Defaults to 100
    #[validate(range(min = 0.0, max = 100.0, message = "Completion percentage must be between 0 and 100"))]
    pub completion_percentage: Option<f64>,

    #[validate(range(min = 0.0, message = "Score must not be negative"))]
    pub score: Option<f64>,

    #[validate(range(exclusive_min = 0.0, message = "Max score must be positive"))]
    pub max_score: Option<f64>,

    /// Used when no score is given
    #[validate(length(min = 1, max = 10, message = "Grade must be between 1 and 10 characters"))]
    pub grade: Option<String>,

    /// Defaults to the configured issuer
    #[validate(length(min = 1, max = 200, message = "Issuer must be between 1 and 200 characters"))]
    pub issued_by: Option<String>,
}

impl IssueCertificateRequest {
    /// Percentage and score checked the way a progress report is
    pub fn to_report(&self) -> Result<ProgressReport, DomainError> {
        let percentage = match self.completion_percentage {
            Some(value) => Percentage::new(value)?,
            None => Percentage::FULL,
        };
        let report = ProgressReport {
            percentage,
            time_spent_delta: None,
            quiz_score: self.score,
            max_quiz_score: self.max_score,
        };
        report.validate()?;
        Ok(report)
    }
}

/// Change a certificate's status (e.g. revoke it)
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateCertificateStatusRequest {
    #[validate(length(min = 1, message = "Status is required"))]
    pub status: String,

    #[validate(length(max = 2000, message = "Notes must be at most 2000 characters"))]
    pub notes: Option<String>,
}
