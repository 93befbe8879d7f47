//! PostgreSQL implementation of CertificateRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use lms_core::entities::{Certificate, CertificateStatus};
use lms_core::error::DomainError;
use lms_core::traits::{CertificateRepository, RepoResult};
use lms_core::value_objects::Snowflake;

use crate::models::CertificateModel;

use super::error::{certificate_not_found, collect_rows, map_db_error, map_unique_violation};

/// PostgreSQL implementation of CertificateRepository
#[derive(Clone)]
pub struct PgCertificateRepository {
    pool: PgPool,
}

impl PgCertificateRepository {
    /// Create a new PgCertificateRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CertificateRepository for PgCertificateRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Certificate>> {
        let result = sqlx::query_as::<_, CertificateModel>(
            r"
            SELECT id, user_id, course_id, certificate_number, score, max_score, grade,
                   completion_percentage, issued_by, status, issued_at, completion_date,
                   valid_until, notes, created_at, updated_at
            FROM certificates
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Certificate::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_by_number(&self, number: &str) -> RepoResult<Option<Certificate>> {
        let result = sqlx::query_as::<_, CertificateModel>(
            r"
            SELECT id, user_id, course_id, certificate_number, score, max_score, grade,
                   completion_percentage, issued_by, status, issued_at, completion_date,
                   valid_until, notes, created_at, updated_at
            FROM certificates
            WHERE certificate_number = $1
            ",
        )
        .bind(number)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Certificate::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_by_user_and_course(
        &self,
        user_id: Snowflake,
        course_id: Snowflake,
    ) -> RepoResult<Option<Certificate>> {
        let result = sqlx::query_as::<_, CertificateModel>(
            r"
            SELECT id, user_id, course_id, certificate_number, score, max_score, grade,
                   completion_percentage, issued_by, status, issued_at, completion_date,
                   valid_until, notes, created_at, updated_at
            FROM certificates
            WHERE user_id = $1 AND course_id = $2
            ",
        )
        .bind(user_id.into_inner())
        .bind(course_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Certificate::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_by_user(&self, user_id: Snowflake) -> RepoResult<Vec<Certificate>> {
        let rows = sqlx::query_as::<_, CertificateModel>(
            r"
            SELECT id, user_id, course_id, certificate_number, score, max_score, grade,
                   completion_percentage, issued_by, status, issued_at, completion_date,
                   valid_until, notes, created_at, updated_at
            FROM certificates
            WHERE user_id = $1
            ORDER BY issued_at DESC
            ",
        )
        .bind(user_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        collect_rows(rows)
    }

    #[instrument(skip(self), fields(certificate_number = %certificate.certificate_number))]
    async fn create(&self, certificate: &Certificate) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO certificates (id, user_id, course_id, certificate_number, score,
                                      max_score, grade, completion_percentage, issued_by,
                                      status, issued_at, completion_date, valid_until, notes,
                                      created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            ",
        )
        .bind(certificate.id.into_inner())
        .bind(certificate.user_id.into_inner())
        .bind(certificate.course_id.into_inner())
        .bind(&certificate.certificate_number)
        .bind(certificate.score)
        .bind(certificate.max_score)
        .bind(&certificate.grade)
        .bind(certificate.completion_percentage.value())
        .bind(&certificate.issued_by)
        .bind(certificate.status.as_str())
        .bind(certificate.issued_at)
        .bind(certificate.completion_date)
        .bind(certificate.valid_until)
        .bind(&certificate.notes)
        .bind(certificate.created_at)
        .bind(certificate.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::CertificateAlreadyExists))?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn update_status(
        &self,
        id: Snowflake,
        status: CertificateStatus,
        notes: Option<&str>,
    ) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE certificates
            SET status = $2, notes = COALESCE($3, notes), updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .bind(status.as_str())
        .bind(notes)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(certificate_not_found(id));
        }

        Ok(())
    }
}
