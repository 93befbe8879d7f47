//! Enrollment entity <-> model mapper

use lms_core::entities::Enrollment;
use lms_core::error::DomainError;
use lms_core::value_objects::Snowflake;

use super::{parse_label, snowflake_opt, stored_percentage};
use crate::models::EnrollmentModel;

impl TryFrom<EnrollmentModel> for Enrollment {
    type Error = DomainError;

    fn try_from(model: EnrollmentModel) -> Result<Self, Self::Error> {
        Ok(Enrollment {
            id: Snowflake::new(model.id),
            user_id: Snowflake::new(model.user_id),
            course_id: Snowflake::new(model.course_id),
            status: parse_label(&model.status)?,
            enrollment_type: parse_label(&model.enrollment_type)?,
            completion_percentage: stored_percentage(model.completion_percentage)?,
            grade: model.grade,
            notes: model.notes,
            total_time_spent_minutes: model.total_time_spent_minutes,
            certificate_earned: model.certificate_earned,
            certificate_id: snowflake_opt(model.certificate_id),
            enrolled_at: model.enrolled_at,
            started_at: model.started_at,
            completed_at: model.completed_at,
            last_accessed_at: model.last_accessed_at,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}
