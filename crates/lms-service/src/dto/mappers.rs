//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use chrono::Utc;
use lms_core::entities::{Certificate, Enrollment, Notification, Progress};
use lms_core::{ProgressStats, Snowflake};

use super::responses::{
    CertificateResponse, EnrollmentResponse, NotificationResponse, ProgressResponse,
    ProgressStatsResponse,
};

// ============================================================================
// Progress Mappers
// ============================================================================

impl From<&Progress> for ProgressResponse {
    fn from(progress: &Progress) -> Self {
        Self {
            id: progress.id.to_string(),
            user_id: progress.user_id.to_string(),
            course_id: progress.course_id.to_string(),
            completion_percentage: progress.completion_percentage.value(),
            status: progress.status,
            time_spent_minutes: progress.time_spent_minutes,
            quiz_score: progress.quiz_score,
            max_quiz_score: progress.max_quiz_score,
            notes: progress.notes.clone(),
            started_at: progress.started_at,
            last_accessed_at: progress.last_accessed_at,
            completed_at: progress.completed_at,
            created_at: progress.created_at,
            updated_at: progress.updated_at,
        }
    }
}

impl From<Progress> for ProgressResponse {
    fn from(progress: Progress) -> Self {
        Self::from(&progress)
    }
}

impl ProgressStatsResponse {
    pub fn new(user_id: Snowflake, stats: ProgressStats) -> Self {
        Self {
            user_id: user_id.to_string(),
            total_courses: stats.total_courses,
            completed_courses: stats.completed_courses,
            average_completion: stats.average_completion,
            total_time_spent_minutes: stats.total_time_spent_minutes,
        }
    }
}

// ============================================================================
// Enrollment Mappers
// ============================================================================

impl From<&Enrollment> for EnrollmentResponse {
    fn from(enrollment: &Enrollment) -> Self {
        Self {
            id: enrollment.id.to_string(),
            user_id: enrollment.user_id.to_string(),
            course_id: enrollment.course_id.to_string(),
            status: enrollment.status,
            enrollment_type: enrollment.enrollment_type,
            completion_percentage: enrollment.completion_percentage.value(),
            grade: enrollment.grade.clone(),
            notes: enrollment.notes.clone(),
            total_time_spent_minutes: enrollment.total_time_spent_minutes,
            certificate_earned: enrollment.certificate_earned,
            certificate_id: enrollment.certificate_id.map(|id| id.to_string()),
            enrolled_at: enrollment.enrolled_at,
            started_at: enrollment.started_at,
            completed_at: enrollment.completed_at,
            last_accessed_at: enrollment.last_accessed_at,
            created_at: enrollment.created_at,
            updated_at: enrollment.updated_at,
        }
    }
}

impl From<Enrollment> for EnrollmentResponse {
    fn from(enrollment: Enrollment) -> Self {
        Self::from(&enrollment)
    }
}

// ============================================================================
// Certificate Mappers
// ============================================================================

impl From<&Certificate> for CertificateResponse {
    fn from(certificate: &Certificate) -> Self {
        Self {
            id: certificate.id.to_string(),
            user_id: certificate.user_id.to_string(),
            course_id: certificate.course_id.to_string(),
            certificate_number: certificate.certificate_number.clone(),
            score: certificate.score,
            max_score: certificate.max_score,
            grade: certificate.grade.clone(),
            completion_percentage: certificate.completion_percentage.value(),
            issued_by: certificate.issued_by.clone(),
            status: certificate.status,
            is_valid: certificate.is_valid_at(Utc::now()),
            issued_at: certificate.issued_at,
            completion_date: certificate.completion_date,
            valid_until: certificate.valid_until,
            notes: certificate.notes.clone(),
            created_at: certificate.created_at,
            updated_at: certificate.updated_at,
        }
    }
}

impl From<Certificate> for CertificateResponse {
    fn from(certificate: Certificate) -> Self {
        Self::from(&certificate)
    }
}

// ============================================================================
// Notification Mappers
// ============================================================================

impl From<&Notification> for NotificationResponse {
    fn from(notification: &Notification) -> Self {
        Self {
            id: notification.id.to_string(),
            user_id: notification.user_id.to_string(),
            title: notification.title.clone(),
            message: notification.message.clone(),
            notification_type: notification.notification_type,
            priority: notification.priority,
            status: notification.status,
            is_read: notification.is_read,
            read_at: notification.read_at,
            related_entity_type: notification.related_entity_type.clone(),
            related_entity_id: notification.related_entity_id.map(|id| id.to_string()),
            sent_at: notification.sent_at,
            created_at: notification.created_at,
        }
    }
}

impl From<Notification> for NotificationResponse {
    fn from(notification: Notification) -> Self {
        Self::from(&notification)
    }
}
