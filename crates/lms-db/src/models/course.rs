//! Course database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for courses table
#[derive(Debug, Clone, FromRow)]
pub struct CourseModel {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub category: String,
    pub course_type: String,
    pub duration_hours: Option<i32>,
    pub max_participants: Option<i32>,
    pub is_mandatory: bool,
    pub is_active: bool,
    pub trainer_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
