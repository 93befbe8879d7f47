//! PostgreSQL implementation of NotificationRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use lms_core::entities::Notification;
use lms_core::traits::{NotificationRepository, RepoResult};
use lms_core::value_objects::Snowflake;

use crate::models::NotificationModel;

use super::error::{collect_rows, map_db_error, notification_not_found};

/// PostgreSQL implementation of NotificationRepository
#[derive(Clone)]
pub struct PgNotificationRepository {
    pool: PgPool,
}

impl PgNotificationRepository {
    /// Create a new PgNotificationRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NotificationRepository for PgNotificationRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Notification>> {
        let result = sqlx::query_as::<_, NotificationModel>(
            r"
            SELECT id, user_id, title, message, notification_type, priority, status, is_read,
                   read_at, related_entity_type, related_entity_id, scheduled_at, sent_at,
                   created_at, updated_at
            FROM notifications
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Notification::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_by_user(&self, user_id: Snowflake) -> RepoResult<Vec<Notification>> {
        let rows = sqlx::query_as::<_, NotificationModel>(
            r"
            SELECT id, user_id, title, message, notification_type, priority, status, is_read,
                   read_at, related_entity_type, related_entity_id, scheduled_at, sent_at,
                   created_at, updated_at
            FROM notifications
            WHERE user_id = $1
            ORDER BY created_at DESC, id DESC
            ",
        )
        .bind(user_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        collect_rows(rows)
    }

    #[instrument(skip(self))]
    async fn find_unread_by_user(&self, user_id: Snowflake) -> RepoResult<Vec<Notification>> {
        let rows = sqlx::query_as::<_, NotificationModel>(
            r"
            SELECT id, user_id, title, message, notification_type, priority, status, is_read,
                   read_at, related_entity_type, related_entity_id, scheduled_at, sent_at,
                   created_at, updated_at
            FROM notifications
            WHERE user_id = $1 AND is_read = FALSE
            ORDER BY created_at DESC, id DESC
            ",
        )
        .bind(user_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        collect_rows(rows)
    }

    #[instrument(skip(self))]
    async fn count_unread(&self, user_id: Snowflake) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>(
            r"
            SELECT COUNT(*) FROM notifications WHERE user_id = $1 AND is_read = FALSE
            ",
        )
        .bind(user_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self, notification), fields(user_id = %notification.user_id))]
    async fn create(&self, notification: &Notification) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO notifications (id, user_id, title, message, notification_type, priority,
                                       status, is_read, read_at, related_entity_type,
                                       related_entity_id, scheduled_at, sent_at,
                                       created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            ",
        )
        .bind(notification.id.into_inner())
        .bind(notification.user_id.into_inner())
        .bind(&notification.title)
        .bind(&notification.message)
        .bind(notification.notification_type.as_str())
        .bind(notification.priority.as_str())
        .bind(notification.status.as_str())
        .bind(notification.is_read)
        .bind(notification.read_at)
        .bind(&notification.related_entity_type)
        .bind(notification.related_entity_id.map(Snowflake::into_inner))
        .bind(notification.scheduled_at)
        .bind(notification.sent_at)
        .bind(notification.created_at)
        .bind(notification.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, notification), fields(notification_id = %notification.id))]
    async fn update(&self, notification: &Notification) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE notifications
            SET status = $2, is_read = $3, read_at = $4, updated_at = $5
            WHERE id = $1
            ",
        )
        .bind(notification.id.into_inner())
        .bind(notification.status.as_str())
        .bind(notification.is_read)
        .bind(notification.read_at)
        .bind(notification.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(notification_not_found(notification.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn mark_all_read(&self, user_id: Snowflake) -> RepoResult<u64> {
        let result = sqlx::query(
            r"
            UPDATE notifications
            SET is_read = TRUE, read_at = NOW(), updated_at = NOW()
            WHERE user_id = $1 AND is_read = FALSE
            ",
        )
        .bind(user_id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }
}
