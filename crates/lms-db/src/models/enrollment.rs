//! Enrollment database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for enrollments table
#[derive(Debug, Clone, FromRow)]
pub struct EnrollmentModel {
    pub id: i64,
    pub user_id: i64,
    pub course_id: i64,
    pub status: String,
    pub enrollment_type: String,
    pub completion_percentage: f64,
    pub grade: Option<String>,
    pub notes: Option<String>,
    pub total_time_spent_minutes: i32,
    pub certificate_earned: bool,
    pub certificate_id: Option<i64>,
    pub enrolled_at: DateTime<Utc>,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub last_accessed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Aggregate row for enrollment counts
#[derive(Debug, Clone, FromRow)]
pub struct EnrollmentStatsModel {
    pub total_enrollments: i64,
    pub completed_enrollments: i64,
    pub in_progress_enrollments: i64,
}
