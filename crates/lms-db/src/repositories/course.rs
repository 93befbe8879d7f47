//! PostgreSQL implementation of CourseRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use lms_core::entities::Course;
use lms_core::traits::{CourseRepository, RepoResult};
use lms_core::value_objects::Snowflake;

use crate::models::CourseModel;

use super::error::map_db_error;

/// PostgreSQL implementation of CourseRepository
#[derive(Clone)]
pub struct PgCourseRepository {
    pool: PgPool,
}

impl PgCourseRepository {
    /// Create a new PgCourseRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CourseRepository for PgCourseRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Course>> {
        let result = sqlx::query_as::<_, CourseModel>(
            r"
            SELECT id, title, description, category, course_type, duration_hours,
                   max_participants, is_mandatory, is_active, trainer_id, created_at, updated_at
            FROM courses
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Course::try_from).transpose()
    }

    #[instrument(skip(self), fields(course_id = %course.id))]
    async fn create(&self, course: &Course) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO courses (id, title, description, category, course_type, duration_hours,
                                 max_participants, is_mandatory, is_active, trainer_id,
                                 created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            ",
        )
        .bind(course.id.into_inner())
        .bind(&course.title)
        .bind(&course.description)
        .bind(course.category.as_str())
        .bind(course.course_type.as_str())
        .bind(course.duration_hours)
        .bind(course.max_participants)
        .bind(course.is_mandatory)
        .bind(course.is_active)
        .bind(course.trainer_id.map(Snowflake::into_inner))
        .bind(course.created_at)
        .bind(course.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }
}
