//! Request bodies and response shapes for integration tests

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// Progress report body
#[derive(Debug, Default, Serialize)]
pub struct ReportProgressRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub course_id: String,
    pub completion_percentage: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_spent_minutes: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quiz_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_quiz_score: Option<f64>,
}

impl ReportProgressRequest {
    pub fn percent(course_id: &str, completion_percentage: f64) -> Self {
        Self {
            course_id: course_id.to_string(),
            completion_percentage,
            ..Default::default()
        }
    }

    pub fn for_user(mut self, user_id: &str) -> Self {
        self.user_id = Some(user_id.to_string());
        self
    }

    pub fn with_quiz(mut self, score: f64, max: f64) -> Self {
        self.quiz_score = Some(score);
        self.max_quiz_score = Some(max);
        self
    }
}

/// Forced completion body
#[derive(Debug, Serialize)]
pub struct MarkCompletedRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub course_id: String,
}

/// Enrollment body
#[derive(Debug, Default, Serialize)]
pub struct EnrollRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub course_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enrollment_type: Option<String>,
}

impl EnrollRequest {
    pub fn course(course_id: &str) -> Self {
        Self {
            course_id: course_id.to_string(),
            ..Default::default()
        }
    }

    pub fn for_user(mut self, user_id: &str) -> Self {
        self.user_id = Some(user_id.to_string());
        self
    }
}

/// Status change body for enrollments and certificates
#[derive(Debug, Serialize)]
pub struct StatusRequest {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl StatusRequest {
    pub fn new(status: &str) -> Self {
        Self {
            status: status.to_string(),
            notes: None,
        }
    }
}

/// Staff certificate issuance body
#[derive(Debug, Default, Serialize)]
pub struct IssueCertificateRequest {
    pub user_id: String,
    pub course_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grade: Option<String>,
}

impl IssueCertificateRequest {
    pub fn pair(user_id: &str, course_id: &str) -> Self {
        Self {
            user_id: user_id.to_string(),
            course_id: course_id.to_string(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ProgressResponse {
    pub id: String,
    pub user_id: String,
    pub course_id: String,
    pub completion_percentage: f64,
    pub status: String,
    pub time_spent_minutes: i32,
    pub completed_at: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MarkCompletedResponse {
    pub message: String,
    pub progress: ProgressResponse,
}

#[derive(Debug, Deserialize)]
pub struct ProgressStatsResponse {
    pub user_id: String,
    pub total_courses: i64,
    pub completed_courses: i64,
    pub average_completion: f64,
    pub total_time_spent_minutes: i64,
}

#[derive(Debug, Deserialize)]
pub struct EnrollmentResponse {
    pub id: String,
    pub user_id: String,
    pub course_id: String,
    pub status: String,
    pub enrollment_type: String,
    pub completion_percentage: f64,
    pub grade: Option<String>,
    pub certificate_earned: bool,
    pub certificate_id: Option<String>,
    pub completed_at: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct EnrollmentStatsResponse {
    pub total_enrollments: i64,
    pub completed_enrollments: i64,
    pub in_progress_enrollments: i64,
}

#[derive(Debug, Deserialize)]
pub struct CertificateResponse {
    pub id: String,
    pub user_id: String,
    pub course_id: String,
    pub certificate_number: String,
    pub score: f64,
    pub max_score: f64,
    pub grade: String,
    pub issued_by: String,
    pub status: String,
    pub is_valid: bool,
}

#[derive(Debug, Deserialize)]
pub struct BackfillResponse {
    pub generated: u32,
    pub skipped: u32,
}

#[derive(Debug, Deserialize)]
pub struct NotificationResponse {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub notification_type: String,
    pub is_read: bool,
}

#[derive(Debug, Deserialize)]
pub struct UnreadCountResponse {
    pub count: i64,
}

#[derive(Debug, Deserialize)]
pub struct MarkAllReadResponse {
    pub updated: u64,
}

#[derive(Debug, Deserialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub checks: ReadinessChecks,
}

#[derive(Debug, Deserialize)]
pub struct ReadinessChecks {
    pub store: String,
    pub redis: String,
}

/// Error response
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
    pub details: Option<serde_json::Value>,
}
