//! Domain events - emitted when a learner's state changes
//!
//! These events are used for:
//! - Building the in-app notification for the affected user
//! - Fanning out real-time updates over pub/sub

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::{NotificationDraft, NotificationPriority, NotificationType};
use crate::value_objects::Snowflake;

/// All possible domain events
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DomainEvent {
    EnrollmentCreated(EnrollmentCreatedEvent),
    CourseCompleted(CourseCompletedEvent),
    CertificateIssued(CertificateIssuedEvent),
}

impl DomainEvent {
    /// Get the event type name
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::EnrollmentCreated(_) => "ENROLLMENT_CREATED",
            Self::CourseCompleted(_) => "COURSE_COMPLETED",
            Self::CertificateIssued(_) => "CERTIFICATE_ISSUED",
        }
    }

    /// Get the timestamp of the event
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Self::EnrollmentCreated(e) => e.timestamp,
            Self::CourseCompleted(e) => e.timestamp,
            Self::CertificateIssued(e) => e.timestamp,
        }
    }

    /// The user the event concerns
    pub fn user_id(&self) -> Snowflake {
        match self {
            Self::EnrollmentCreated(e) => e.user_id,
            Self::CourseCompleted(e) => e.user_id,
            Self::CertificateIssued(e) => e.user_id,
        }
    }

    /// In-app notification announcing this event to its user
    pub fn notification(&self) -> NotificationDraft {
        match self {
            Self::EnrollmentCreated(e) => NotificationDraft::new(
                e.user_id,
                NotificationType::CourseAssignment,
                "Course Enrolled",
                format!("You have enrolled in the course: {}", e.course_title),
            )
            .related_to("COURSE", e.course_id),
            Self::CourseCompleted(e) => NotificationDraft::new(
                e.user_id,
                NotificationType::CourseCompletion,
                "Course Completed",
                format!("You have completed in the course: {}", e.course_title),
            )
            .related_to("COURSE", e.course_id),
            Self::CertificateIssued(e) => NotificationDraft::new(
                e.user_id,
                NotificationType::CertificateIssued,
                "Certificate Issued",
                format!(
                    "Your certificate for {} has been issued. Certificate ID: {}",
                    e.course_title, e.certificate_number
                ),
            )
            .with_priority(NotificationPriority::High)
            .related_to("CERTIFICATE", e.certificate_id),
        }
    }
}

// ============================================================================
// Event Structs
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrollmentCreatedEvent {
    pub enrollment_id: Snowflake,
    pub user_id: Snowflake,
    pub course_id: Snowflake,
    pub course_title: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseCompletedEvent {
    pub user_id: Snowflake,
    pub course_id: Snowflake,
    pub course_title: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CertificateIssuedEvent {
    pub certificate_id: Snowflake,
    pub certificate_number: String,
    pub user_id: Snowflake,
    pub course_id: Snowflake,
    pub course_title: String,
    pub timestamp: DateTime<Utc>,
}

impl DomainEvent {
    pub fn enrollment_created(
        enrollment_id: Snowflake,
        user_id: Snowflake,
        course_id: Snowflake,
        course_title: impl Into<String>,
    ) -> Self {
        Self::EnrollmentCreated(EnrollmentCreatedEvent {
            enrollment_id,
            user_id,
            course_id,
            course_title: course_title.into(),
            timestamp: Utc::now(),
        })
    }

    pub fn course_completed(
        user_id: Snowflake,
        course_id: Snowflake,
        course_title: impl Into<String>,
    ) -> Self {
        Self::CourseCompleted(CourseCompletedEvent {
            user_id,
            course_id,
            course_title: course_title.into(),
            timestamp: Utc::now(),
        })
    }

    pub fn certificate_issued(
        certificate_id: Snowflake,
        certificate_number: impl Into<String>,
        user_id: Snowflake,
        course_id: Snowflake,
        course_title: impl Into<String>,
    ) -> Self {
        Self::CertificateIssued(CertificateIssuedEvent {
            certificate_id,
            certificate_number: certificate_number.into(),
            user_id,
            course_id,
            course_title: course_title.into(),
            timestamp: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_serialization() {
        let event = DomainEvent::certificate_issued(
            Snowflake::new(1),
            "CERT-ABCD1234",
            Snowflake::new(2),
            Snowflake::new(3),
            "Workplace Safety",
        );

        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"type\":\"CERTIFICATE_ISSUED\""));

        let parsed: DomainEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.event_type(), "CERTIFICATE_ISSUED");
        assert_eq!(parsed.user_id(), Snowflake::new(2));
    }

    #[test]
    fn test_certificate_notification_text() {
        let event = DomainEvent::certificate_issued(
            Snowflake::new(1),
            "CERT-ABCD1234",
            Snowflake::new(2),
            Snowflake::new(3),
            "Workplace Safety",
        );
        let draft = event.notification();

        assert_eq!(draft.title, "Certificate Issued");
        assert_eq!(
            draft.message,
            "Your certificate for Workplace Safety has been issued. Certificate ID: CERT-ABCD1234"
        );
        assert_eq!(draft.priority, NotificationPriority::High);
        assert_eq!(draft.related_entity_id, Some(Snowflake::new(1)));
    }

    #[test]
    fn test_completion_notification_text() {
        let event =
            DomainEvent::course_completed(Snowflake::new(2), Snowflake::new(3), "Rust 101");
        let draft = event.notification();

        assert_eq!(draft.title, "Course Completed");
        assert_eq!(draft.message, "You have completed in the course: Rust 101");
        assert_eq!(draft.notification_type, NotificationType::CourseCompletion);
        assert_eq!(draft.priority, NotificationPriority::Medium);
        assert_eq!(draft.related_entity_type.as_deref(), Some("COURSE"));
    }

    #[test]
    fn test_enrollment_notification_text() {
        let event = DomainEvent::enrollment_created(
            Snowflake::new(9),
            Snowflake::new(2),
            Snowflake::new(3),
            "Rust 101",
        );
        assert_eq!(event.event_type(), "ENROLLMENT_CREATED");
        assert_eq!(
            event.notification().message,
            "You have enrolled in the course: Rust 101"
        );
    }
}
