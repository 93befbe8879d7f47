//! Notification entity - an in-app message addressed to one user

use chrono::{DateTime, Utc};

use crate::value_objects::{labelled_enum, Snowflake};

labelled_enum! {
    pub enum NotificationType {
        CourseAssignment => "COURSE_ASSIGNMENT",
        CourseReminder => "COURSE_REMINDER",
        CourseCompletion => "COURSE_COMPLETION",
        SessionReminder => "SESSION_REMINDER",
        AttendanceReminder => "ATTENDANCE_REMINDER",
        CertificateIssued => "CERTIFICATE_ISSUED",
        FeedbackRequest => "FEEDBACK_REQUEST",
        SystemAnnouncement => "SYSTEM_ANNOUNCEMENT",
        OverdueTraining => "OVERDUE_TRAINING",
    }
}

labelled_enum! {
    #[derive(Default)]
    pub enum NotificationPriority {
        Low => "LOW",
        #[default]
        Medium => "MEDIUM",
        High => "HIGH",
        Urgent => "URGENT",
    }
}

labelled_enum! {
    pub enum NotificationStatus {
        Pending => "PENDING",
        Sent => "SENT",
        Delivered => "DELIVERED",
        Failed => "FAILED",
    }
}

/// Notification content before it is assigned an id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationDraft {
    pub user_id: Snowflake,
    pub title: String,
    pub message: String,
    pub notification_type: NotificationType,
    pub priority: NotificationPriority,
    pub related_entity_type: Option<String>,
    pub related_entity_id: Option<Snowflake>,
}

impl NotificationDraft {
    pub fn new(
        user_id: Snowflake,
        notification_type: NotificationType,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            user_id,
            title: title.into(),
            message: message.into(),
            notification_type,
            priority: NotificationPriority::default(),
            related_entity_type: None,
            related_entity_id: None,
        }
    }

    pub fn with_priority(mut self, priority: NotificationPriority) -> Self {
        self.priority = priority;
        self
    }

    pub fn related_to(mut self, entity_type: impl Into<String>, entity_id: Snowflake) -> Self {
        self.related_entity_type = Some(entity_type.into());
        self.related_entity_id = Some(entity_id);
        self
    }
}

/// Notification entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: Snowflake,
    pub user_id: Snowflake,
    pub title: String,
    pub message: String,
    pub notification_type: NotificationType,
    pub priority: NotificationPriority,
    pub status: NotificationStatus,
    pub is_read: bool,
    pub read_at: Option<DateTime<Utc>>,
    pub related_entity_type: Option<String>,
    pub related_entity_id: Option<Snowflake>,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub sent_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Notification {
    /// Materialize a draft; stored in-app notifications count as sent
    pub fn from_draft(id: Snowflake, draft: NotificationDraft) -> Self {
        let now = Utc::now();
        Self {
            id,
            user_id: draft.user_id,
            title: draft.title,
            message: draft.message,
            notification_type: draft.notification_type,
            priority: draft.priority,
            status: NotificationStatus::Sent,
            is_read: false,
            read_at: None,
            related_entity_type: draft.related_entity_type,
            related_entity_id: draft.related_entity_id,
            scheduled_at: None,
            sent_at: Some(now),
            created_at: now,
            updated_at: now,
        }
    }

    /// Mark as read; a second call keeps the first read time
    pub fn mark_read(&mut self) {
        if !self.is_read {
            let now = Utc::now();
            self.is_read = true;
            self.read_at = Some(now);
            self.updated_at = now;
        }
    }
}
