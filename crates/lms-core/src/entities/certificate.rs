//! Certificate entity - one-time proof of course completion

use chrono::{DateTime, Months, Utc};
use uuid::Uuid;

use crate::value_objects::{labelled_enum, Percentage, Snowflake};

/// Prefix of every certificate number
pub const CERTIFICATE_PREFIX: &str = "CERT-";

labelled_enum! {
    pub enum CertificateStatus {
        Issued => "ISSUED",
        Expired => "EXPIRED",
        Revoked => "REVOKED",
        Pending => "PENDING",
    }
}

/// Generate a human-readable certificate number: `CERT-` + 8 uppercase hex chars
///
/// Drawn from a v4 UUID. Collisions are not retried here; the store's unique
/// index on the number rejects them.
pub fn generate_certificate_number() -> String {
    let token = Uuid::new_v4().simple().to_string();
    format!("{CERTIFICATE_PREFIX}{}", token[..8].to_ascii_uppercase())
}

/// Certificate entity
#[derive(Debug, Clone, PartialEq)]
pub struct Certificate {
    pub id: Snowflake,
    pub user_id: Snowflake,
    pub course_id: Snowflake,
    pub certificate_number: String,
    pub score: f64,
    pub max_score: f64,
    pub grade: String,
    pub completion_percentage: Percentage,
    pub issued_by: String,
    pub status: CertificateStatus,
    pub issued_at: DateTime<Utc>,
    pub completion_date: DateTime<Utc>,
    pub valid_until: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Certificate {
    /// Create an Issued certificate stamped now
    pub fn new(
        id: Snowflake,
        user_id: Snowflake,
        course_id: Snowflake,
        certificate_number: String,
        issued_by: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            user_id,
            course_id,
            certificate_number,
            score: 0.0,
            max_score: 0.0,
            grade: String::new(),
            completion_percentage: Percentage::FULL,
            issued_by,
            status: CertificateStatus::Issued,
            issued_at: now,
            completion_date: now,
            valid_until: None,
            notes: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_score(mut self, score: f64, max_score: f64, grade: impl Into<String>) -> Self {
        self.score = score;
        self.max_score = max_score;
        self.grade = grade.into();
        self
    }

    pub fn with_completion(mut self, percentage: Percentage, completed_at: DateTime<Utc>) -> Self {
        self.completion_percentage = percentage;
        self.completion_date = completed_at;
        self
    }

    /// Expire `years` after issue
    ///
    /// A window past the representable date range leaves the certificate
    /// without an expiry.
    pub fn with_validity_years(mut self, years: u32) -> Self {
        self.valid_until = years
            .checked_mul(12)
            .and_then(|months| self.issued_at.checked_add_months(Months::new(months)));
        self
    }

    /// Issued and not past its validity window
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        self.status == CertificateStatus::Issued && self.valid_until.map_or(true, |until| now < until)
    }

    pub fn set_status(&mut self, status: CertificateStatus) {
        self.status = status;
        self.updated_at = Utc::now();
    }
}
