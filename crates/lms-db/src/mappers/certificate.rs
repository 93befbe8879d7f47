//! Certificate entity <-> model mapper

use lms_core::entities::Certificate;
use lms_core::error::DomainError;
use lms_core::value_objects::Snowflake;

use super::{parse_label, stored_percentage};
use crate::models::CertificateModel;

impl TryFrom<CertificateModel> for Certificate {
    type Error = DomainError;

    fn try_from(model: CertificateModel) -> Result<Self, Self::Error> {
        Ok(Certificate {
            id: Snowflake::new(model.id),
            user_id: Snowflake::new(model.user_id),
            course_id: Snowflake::new(model.course_id),
            certificate_number: model.certificate_number,
            score: model.score,
            max_score: model.max_score,
            grade: model.grade,
            completion_percentage: stored_percentage(model.completion_percentage)?,
            issued_by: model.issued_by,
            status: parse_label(&model.status)?,
            issued_at: model.issued_at,
            completion_date: model.completion_date,
            valid_until: model.valid_until,
            notes: model.notes,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}
