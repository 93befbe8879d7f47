//! User entity <-> model mapper

use lms_core::entities::User;
use lms_core::error::DomainError;
use lms_core::value_objects::Snowflake;

use super::parse_label;
use crate::models::UserModel;

impl TryFrom<UserModel> for User {
    type Error = DomainError;

    fn try_from(model: UserModel) -> Result<Self, Self::Error> {
        Ok(User {
            id: Snowflake::new(model.id),
            username: model.username,
            email: model.email,
            full_name: model.full_name,
            role: parse_label(&model.role)?,
            department: model.department,
            is_active: model.is_active,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}
