//! PostgreSQL implementation of ProgressRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, instrument};

use lms_core::entities::{Enrollment, Progress};
use lms_core::traits::{ProgressRepository, ProgressStats, RepoResult};
use lms_core::value_objects::Snowflake;

use crate::mappers::stats_from_model;
use crate::models::{ProgressModel, ProgressStatsModel};

use super::enrollment::write_enrollment;
use super::error::{collect_rows, enrollment_not_found, map_db_error};

/// PostgreSQL implementation of ProgressRepository
#[derive(Clone)]
pub struct PgProgressRepository {
    pool: PgPool,
}

impl PgProgressRepository {
    /// Create a new PgProgressRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProgressRepository for PgProgressRepository {
    #[instrument(skip(self))]
    async fn find_by_user_and_course(
        &self,
        user_id: Snowflake,
        course_id: Snowflake,
    ) -> RepoResult<Option<Progress>> {
        let result = sqlx::query_as::<_, ProgressModel>(
            r"
            SELECT id, user_id, course_id, completion_percentage, status, time_spent_minutes,
                   quiz_score, max_quiz_score, notes, started_at, last_accessed_at,
                   completed_at, created_at, updated_at
            FROM progress
            WHERE user_id = $1 AND course_id = $2
            ",
        )
        .bind(user_id.into_inner())
        .bind(course_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Progress::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_by_user(&self, user_id: Snowflake) -> RepoResult<Vec<Progress>> {
        let rows = sqlx::query_as::<_, ProgressModel>(
            r"
            SELECT id, user_id, course_id, completion_percentage, status, time_spent_minutes,
                   quiz_score, max_quiz_score, notes, started_at, last_accessed_at,
                   completed_at, created_at, updated_at
            FROM progress
            WHERE user_id = $1
            ORDER BY last_accessed_at DESC
            ",
        )
        .bind(user_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        collect_rows(rows)
    }

    #[instrument(skip(self))]
    async fn find_by_course(&self, course_id: Snowflake) -> RepoResult<Vec<Progress>> {
        let rows = sqlx::query_as::<_, ProgressModel>(
            r"
            SELECT id, user_id, course_id, completion_percentage, status, time_spent_minutes,
                   quiz_score, max_quiz_score, notes, started_at, last_accessed_at,
                   completed_at, created_at, updated_at
            FROM progress
            WHERE course_id = $1
            ORDER BY completion_percentage DESC, user_id
            ",
        )
        .bind(course_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        collect_rows(rows)
    }

    #[instrument(
        skip(self, progress, enrollment),
        fields(user_id = %progress.user_id, course_id = %progress.course_id)
    )]
    async fn save_with_enrollment(
        &self,
        progress: &Progress,
        enrollment: Option<&Enrollment>,
    ) -> RepoResult<Progress> {
        // Progress and its enrollment mirror commit together
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let stored = sqlx::query_as::<_, ProgressModel>(
            r"
            INSERT INTO progress (id, user_id, course_id, completion_percentage, status,
                                  time_spent_minutes, quiz_score, max_quiz_score, notes,
                                  started_at, last_accessed_at, completed_at,
                                  created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            ON CONFLICT (user_id, course_id) DO UPDATE
            SET completion_percentage = EXCLUDED.completion_percentage,
                status = EXCLUDED.status,
                time_spent_minutes = EXCLUDED.time_spent_minutes,
                quiz_score = EXCLUDED.quiz_score,
                max_quiz_score = EXCLUDED.max_quiz_score,
                notes = EXCLUDED.notes,
                last_accessed_at = EXCLUDED.last_accessed_at,
                completed_at = EXCLUDED.completed_at,
                updated_at = EXCLUDED.updated_at
            RETURNING id, user_id, course_id, completion_percentage, status, time_spent_minutes,
                      quiz_score, max_quiz_score, notes, started_at, last_accessed_at,
                      completed_at, created_at, updated_at
            ",
        )
        .bind(progress.id.into_inner())
        .bind(progress.user_id.into_inner())
        .bind(progress.course_id.into_inner())
        .bind(progress.completion_percentage.value())
        .bind(progress.status.as_str())
        .bind(progress.time_spent_minutes)
        .bind(progress.quiz_score)
        .bind(progress.max_quiz_score)
        .bind(&progress.notes)
        .bind(progress.started_at)
        .bind(progress.last_accessed_at)
        .bind(progress.completed_at)
        .bind(progress.created_at)
        .bind(progress.updated_at)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_db_error)?;

        if let Some(enrollment) = enrollment {
            let result = write_enrollment(&mut *tx, enrollment)
                .await
                .map_err(map_db_error)?;

            if result.rows_affected() == 0 {
                // Dropping the transaction rolls back the progress write
                return Err(enrollment_not_found(enrollment.id));
            }
        }

        tx.commit().await.map_err(map_db_error)?;
        debug!("Progress and enrollment committed");

        Progress::try_from(stored)
    }

    #[instrument(skip(self))]
    async fn stats_for_user(&self, user_id: Snowflake) -> RepoResult<ProgressStats> {
        let row = sqlx::query_as::<_, ProgressStatsModel>(
            r"
            SELECT COUNT(*) AS total_courses,
                   COUNT(*) FILTER (WHERE completion_percentage >= 100) AS completed_courses,
                   AVG(completion_percentage) AS average_completion,
                   SUM(time_spent_minutes)::BIGINT AS total_time_spent_minutes
            FROM progress
            WHERE user_id = $1
            ",
        )
        .bind(user_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(stats_from_model(row))
    }
}
