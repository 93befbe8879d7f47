//! PostgreSQL implementation of EnrollmentRepository

use async_trait::async_trait;
use sqlx::postgres::{PgExecutor, PgQueryResult};
use sqlx::PgPool;
use tracing::instrument;

use lms_core::entities::Enrollment;
use lms_core::error::DomainError;
use lms_core::traits::{EnrollmentRepository, EnrollmentStats, RepoResult};
use lms_core::value_objects::Snowflake;

use crate::models::{EnrollmentModel, EnrollmentStatsModel};

use super::error::{collect_rows, enrollment_not_found, map_db_error, map_unique_violation};

/// PostgreSQL implementation of EnrollmentRepository
#[derive(Clone)]
pub struct PgEnrollmentRepository {
    pool: PgPool,
}

impl PgEnrollmentRepository {
    /// Create a new PgEnrollmentRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Write every mutable enrollment column
///
/// Shared with the progress repository, which runs it inside its transaction.
pub(super) async fn write_enrollment<'e, E>(
    executor: E,
    enrollment: &Enrollment,
) -> Result<PgQueryResult, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query(
        r"
        UPDATE enrollments
        SET status = $2, completion_percentage = $3, grade = $4, notes = $5,
            total_time_spent_minutes = $6, certificate_earned = $7, certificate_id = $8,
            started_at = $9, completed_at = $10, last_accessed_at = $11, updated_at = $12
        WHERE id = $1
        ",
    )
    .bind(enrollment.id.into_inner())
    .bind(enrollment.status.as_str())
    .bind(enrollment.completion_percentage.value())
    .bind(&enrollment.grade)
    .bind(&enrollment.notes)
    .bind(enrollment.total_time_spent_minutes)
    .bind(enrollment.certificate_earned)
    .bind(enrollment.certificate_id.map(Snowflake::into_inner))
    .bind(enrollment.started_at)
    .bind(enrollment.completed_at)
    .bind(enrollment.last_accessed_at)
    .bind(enrollment.updated_at)
    .execute(executor)
    .await
}

#[async_trait]
impl EnrollmentRepository for PgEnrollmentRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Enrollment>> {
        let result = sqlx::query_as::<_, EnrollmentModel>(
            r"
            SELECT id, user_id, course_id, status, enrollment_type, completion_percentage,
                   grade, notes, total_time_spent_minutes, certificate_earned, certificate_id,
                   enrolled_at, started_at, completed_at, last_accessed_at, created_at, updated_at
            FROM enrollments
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Enrollment::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_by_user_and_course(
        &self,
        user_id: Snowflake,
        course_id: Snowflake,
    ) -> RepoResult<Option<Enrollment>> {
        let result = sqlx::query_as::<_, EnrollmentModel>(
            r"
            SELECT id, user_id, course_id, status, enrollment_type, completion_percentage,
                   grade, notes, total_time_spent_minutes, certificate_earned, certificate_id,
                   enrolled_at, started_at, completed_at, last_accessed_at, created_at, updated_at
            FROM enrollments
            WHERE user_id = $1 AND course_id = $2
            ",
        )
        .bind(user_id.into_inner())
        .bind(course_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Enrollment::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_by_user(&self, user_id: Snowflake) -> RepoResult<Vec<Enrollment>> {
        let rows = sqlx::query_as::<_, EnrollmentModel>(
            r"
            SELECT id, user_id, course_id, status, enrollment_type, completion_percentage,
                   grade, notes, total_time_spent_minutes, certificate_earned, certificate_id,
                   enrolled_at, started_at, completed_at, last_accessed_at, created_at, updated_at
            FROM enrollments
            WHERE user_id = $1
            ORDER BY enrolled_at DESC
            ",
        )
        .bind(user_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        collect_rows(rows)
    }

    #[instrument(skip(self))]
    async fn find_by_course(&self, course_id: Snowflake) -> RepoResult<Vec<Enrollment>> {
        let rows = sqlx::query_as::<_, EnrollmentModel>(
            r"
            SELECT id, user_id, course_id, status, enrollment_type, completion_percentage,
                   grade, notes, total_time_spent_minutes, certificate_earned, certificate_id,
                   enrolled_at, started_at, completed_at, last_accessed_at, created_at, updated_at
            FROM enrollments
            WHERE course_id = $1
            ORDER BY enrolled_at
            ",
        )
        .bind(course_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        collect_rows(rows)
    }

    #[instrument(skip(self))]
    async fn find_completed_without_certificate(&self) -> RepoResult<Vec<Enrollment>> {
        let rows = sqlx::query_as::<_, EnrollmentModel>(
            r"
            SELECT id, user_id, course_id, status, enrollment_type, completion_percentage,
                   grade, notes, total_time_spent_minutes, certificate_earned, certificate_id,
                   enrolled_at, started_at, completed_at, last_accessed_at, created_at, updated_at
            FROM enrollments
            WHERE status = 'COMPLETED' AND certificate_earned = FALSE
            ORDER BY completed_at NULLS LAST, id
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        collect_rows(rows)
    }

    #[instrument(skip(self))]
    async fn count_active_by_course(&self, course_id: Snowflake) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>(
            r"
            SELECT COUNT(*) FROM enrollments WHERE course_id = $1 AND status <> 'DROPPED'
            ",
        )
        .bind(course_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self), fields(enrollment_id = %enrollment.id))]
    async fn create(&self, enrollment: &Enrollment) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO enrollments (id, user_id, course_id, status, enrollment_type,
                                     completion_percentage, grade, notes,
                                     total_time_spent_minutes, certificate_earned, certificate_id,
                                     enrolled_at, started_at, completed_at, last_accessed_at,
                                     created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
            ",
        )
        .bind(enrollment.id.into_inner())
        .bind(enrollment.user_id.into_inner())
        .bind(enrollment.course_id.into_inner())
        .bind(enrollment.status.as_str())
        .bind(enrollment.enrollment_type.as_str())
        .bind(enrollment.completion_percentage.value())
        .bind(&enrollment.grade)
        .bind(&enrollment.notes)
        .bind(enrollment.total_time_spent_minutes)
        .bind(enrollment.certificate_earned)
        .bind(enrollment.certificate_id.map(Snowflake::into_inner))
        .bind(enrollment.enrolled_at)
        .bind(enrollment.started_at)
        .bind(enrollment.completed_at)
        .bind(enrollment.last_accessed_at)
        .bind(enrollment.created_at)
        .bind(enrollment.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::AlreadyEnrolled))?;

        Ok(())
    }

    #[instrument(skip(self), fields(enrollment_id = %enrollment.id))]
    async fn update(&self, enrollment: &Enrollment) -> RepoResult<()> {
        let result = write_enrollment(&self.pool, enrollment)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(enrollment_not_found(enrollment.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM enrollments WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(enrollment_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn stats(&self) -> RepoResult<EnrollmentStats> {
        let row = sqlx::query_as::<_, EnrollmentStatsModel>(
            r"
            SELECT COUNT(*) AS total_enrollments,
                   COUNT(*) FILTER (WHERE status = 'COMPLETED') AS completed_enrollments,
                   COUNT(*) FILTER (WHERE status = 'IN_PROGRESS') AS in_progress_enrollments
            FROM enrollments
            ",
        )
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(EnrollmentStats {
            total_enrollments: row.total_enrollments,
            completed_enrollments: row.completed_enrollments,
            in_progress_enrollments: row.in_progress_enrollments,
        })
    }
}
