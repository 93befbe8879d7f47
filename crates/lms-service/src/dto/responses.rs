//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output.
//! Snowflake IDs are serialized as strings for JavaScript compatibility.

use chrono::{DateTime, Utc};
use lms_core::{
    CertificateStatus, EnrollmentStatus, EnrollmentType, NotificationPriority, NotificationStatus,
    NotificationType, ProgressStatus,
};
use serde::Serialize;

// ============================================================================
// Progress Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct ProgressResponse {
    pub id: String,
    pub user_id: String,
    pub course_id: String,
    pub completion_percentage: f64,
    pub status: ProgressStatus,
    pub time_spent_minutes: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quiz_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_quiz_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub started_at: DateTime<Utc>,
    pub last_accessed_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Result of forcing a course to completion
#[derive(Debug, Clone, Serialize)]
pub struct MarkCompletedResponse {
    pub message: String,
    pub progress: ProgressResponse,
}

/// Aggregates over a user's progress records
#[derive(Debug, Clone, Serialize)]
pub struct ProgressStatsResponse {
    pub user_id: String,
    pub total_courses: i64,
    pub completed_courses: i64,
    pub average_completion: f64,
    pub total_time_spent_minutes: i64,
}

// ============================================================================
// Enrollment Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct EnrollmentResponse {
    pub id: String,
    pub user_id: String,
    pub course_id: String,
    pub status: EnrollmentStatus,
    pub enrollment_type: EnrollmentType,
    pub completion_percentage: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grade: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub total_time_spent_minutes: i32,
    pub certificate_earned: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certificate_id: Option<String>,
    pub enrolled_at: DateTime<Utc>,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub last_accessed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ============================================================================
// Certificate Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct CertificateResponse {
    pub id: String,
    pub user_id: String,
    pub course_id: String,
    pub certificate_number: String,
    pub score: f64,
    pub max_score: f64,
    pub grade: String,
    pub completion_percentage: f64,
    pub issued_by: String,
    pub status: CertificateStatus,
    /// Issued and inside its validity window right now
    pub is_valid: bool,
    pub issued_at: DateTime<Utc>,
    pub completion_date: DateTime<Utc>,
    pub valid_until: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Outcome of issuing certificates for completed enrollments
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BackfillResponse {
    pub generated: u32,
    pub skipped: u32,
}

// ============================================================================
// Notification Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct NotificationResponse {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub message: String,
    pub notification_type: NotificationType,
    pub priority: NotificationPriority,
    pub status: NotificationStatus,
    pub is_read: bool,
    pub read_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub related_entity_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub related_entity_id: Option<String>,
    pub sent_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct UnreadCountResponse {
    pub count: i64,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct MarkAllReadResponse {
    pub updated: u64,
}

// ============================================================================
// Health Responses
// ============================================================================

/// Basic health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Health check status for each backing service
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub store: String,
    pub redis: String,
}

fn check_label(state: Option<bool>) -> &'static str {
    match state {
        Some(true) => "healthy",
        Some(false) => "unhealthy",
        None => "disabled",
    }
}

impl ReadinessResponse {
    /// `None` marks a backend that is not configured and so cannot fail
    pub fn ready(store_healthy: bool, redis_healthy: Option<bool>) -> Self {
        let all_healthy = store_healthy && redis_healthy.unwrap_or(true);
        Self {
            status: if all_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                store: check_label(Some(store_healthy)).to_string(),
                redis: check_label(redis_healthy).to_string(),
            },
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}
