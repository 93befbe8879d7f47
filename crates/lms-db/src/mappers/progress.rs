//! Progress entity <-> model mapper

use lms_core::entities::Progress;
use lms_core::error::DomainError;
use lms_core::traits::ProgressStats;
use lms_core::value_objects::Snowflake;

use super::{parse_label, stored_percentage};
use crate::models::{ProgressModel, ProgressStatsModel};

impl TryFrom<ProgressModel> for Progress {
    type Error = DomainError;

    fn try_from(model: ProgressModel) -> Result<Self, Self::Error> {
        Ok(Progress {
            id: Snowflake::new(model.id),
            user_id: Snowflake::new(model.user_id),
            course_id: Snowflake::new(model.course_id),
            completion_percentage: stored_percentage(model.completion_percentage)?,
            status: parse_label(&model.status)?,
            time_spent_minutes: model.time_spent_minutes,
            quiz_score: model.quiz_score,
            max_quiz_score: model.max_quiz_score,
            notes: model.notes,
            started_at: model.started_at,
            last_accessed_at: model.last_accessed_at,
            completed_at: model.completed_at,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

/// Aggregates over zero rows come back as NULL
pub fn stats_from_model(model: ProgressStatsModel) -> ProgressStats {
    ProgressStats {
        total_courses: model.total_courses,
        completed_courses: model.completed_courses,
        average_completion: model.average_completion.unwrap_or(0.0),
        total_time_spent_minutes: model.total_time_spent_minutes.unwrap_or(0),
    }
}
