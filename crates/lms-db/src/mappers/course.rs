//! Course entity <-> model mapper

use lms_core::entities::Course;
use lms_core::error::DomainError;
use lms_core::value_objects::Snowflake;

use super::{parse_label, snowflake_opt};
use crate::models::CourseModel;

impl TryFrom<CourseModel> for Course {
    type Error = DomainError;

    fn try_from(model: CourseModel) -> Result<Self, Self::Error> {
        Ok(Course {
            id: Snowflake::new(model.id),
            title: model.title,
            description: model.description,
            category: parse_label(&model.category)?,
            course_type: parse_label(&model.course_type)?,
            duration_hours: model.duration_hours,
            max_participants: model.max_participants,
            is_mandatory: model.is_mandatory,
            is_active: model.is_active,
            trainer_id: snowflake_opt(model.trainer_id),
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}
