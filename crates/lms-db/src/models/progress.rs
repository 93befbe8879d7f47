//! Progress database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for progress table
#[derive(Debug, Clone, FromRow)]
pub struct ProgressModel {
    pub id: i64,
    pub user_id: i64,
    pub course_id: i64,
    pub completion_percentage: f64,
    pub status: String,
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

/// Aggregate row for a user's progress statistics
#[derive(Debug, Clone, FromRow)]
pub struct ProgressStatsModel {
    pub total_courses: i64,
    pub completed_courses: i64,
    pub average_completion: Option<f64>,
    pub total_time_spent_minutes: Option<i64>,
}
