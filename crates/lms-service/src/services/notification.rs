//! Notification service
//!
//! In-app notification queries and read state for the calling user.

use lms_core::{DomainError, Snowflake};
use tracing::{debug, instrument};

use crate::dto::{MarkAllReadResponse, NotificationResponse, UnreadCountResponse};

use super::access::Caller;
use super::context::ServiceContext;
use super::error::ServiceResult;

/// Notification service
pub struct NotificationService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> NotificationService<'a> {
    /// Create a new NotificationService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// The caller's notifications, newest first
    #[instrument(skip(self))]
    pub async fn list(&self, caller: &Caller) -> ServiceResult<Vec<NotificationResponse>> {
        let notifications = self.ctx.notification_repo().find_by_user(caller.user_id).await?;
        Ok(notifications.iter().map(NotificationResponse::from).collect())
    }

    /// The caller's unread notifications, newest first
    #[instrument(skip(self))]
    pub async fn unread(&self, caller: &Caller) -> ServiceResult<Vec<NotificationResponse>> {
        let notifications = self
            .ctx
            .notification_repo()
            .find_unread_by_user(caller.user_id)
            .await?;
        Ok(notifications.iter().map(NotificationResponse::from).collect())
    }

    #[instrument(skip(self))]
    pub async fn unread_count(&self, caller: &Caller) -> ServiceResult<UnreadCountResponse> {
        let count = self.ctx.notification_repo().count_unread(caller.user_id).await?;
        Ok(UnreadCountResponse { count })
    }

    /// Mark one of the caller's notifications as read
    #[instrument(skip(self))]
    pub async fn mark_read(
        &self,
        caller: &Caller,
        notification_id: Snowflake,
    ) -> ServiceResult<NotificationResponse> {
        let mut notification = self
            .ctx
            .notification_repo()
            .find_by_id(notification_id)
            .await?
            .ok_or(DomainError::NotificationNotFound(notification_id))?;

        if notification.user_id != caller.user_id {
            return Err(DomainError::NotNotificationOwner.into());
        }

        if !notification.is_read {
            notification.mark_read();
            self.ctx.notification_repo().update(&notification).await?;
        }

        Ok(NotificationResponse::from(&notification))
    }

    /// Mark every unread notification of the caller as read
    #[instrument(skip(self))]
    pub async fn mark_all_read(&self, caller: &Caller) -> ServiceResult<MarkAllReadResponse> {
        let updated = self.ctx.notification_repo().mark_all_read(caller.user_id).await?;
        debug!(updated, "Notifications marked read");
        Ok(MarkAllReadResponse { updated })
    }
}
