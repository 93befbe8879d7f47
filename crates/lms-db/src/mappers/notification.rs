//! Notification entity <-> model mapper

use lms_core::entities::Notification;
use lms_core::error::DomainError;
use lms_core::value_objects::Snowflake;

use super::{parse_label, snowflake_opt};
use crate::models::NotificationModel;

impl TryFrom<NotificationModel> for Notification {
    type Error = DomainError;

    fn try_from(model: NotificationModel) -> Result<Self, Self::Error> {
        Ok(Notification {
            id: Snowflake::new(model.id),
            user_id: Snowflake::new(model.user_id),
            title: model.title,
            message: model.message,
            notification_type: parse_label(&model.notification_type)?,
            priority: parse_label(&model.priority)?,
            status: parse_label(&model.status)?,
            is_read: model.is_read,
            read_at: model.read_at,
            related_entity_type: model.related_entity_type,
            related_entity_id: snowflake_opt(model.related_entity_id),
            scheduled_at: model.scheduled_at,
            sent_at: model.sent_at,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}
