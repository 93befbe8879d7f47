//! Certificate database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for certificates table
#[derive(Debug, Clone, FromRow)]
pub struct CertificateModel {
    pub id: i64,
    pub user_id: i64,
    pub course_id: i64,
    pub certificate_number: String,
    pub score: f64,
    pub max_score: f64,
    pub grade: String,
    pub completion_percentage: f64,
    pub issued_by: String,
    pub status: String,
    pub issued_at: DateTime<Utc>,
    pub completion_date: DateTime<Utc>,
    pub valid_until: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
