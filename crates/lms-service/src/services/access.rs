//! Access policy for learner records
//!
//! Learners act on their own records; Admin, Manager, and Trainer may act on
//! anyone's. Some operations are narrowed further to explicit role lists.

use lms_common::Claims;
use lms_core::{Role, Snowflake};

use super::error::{ServiceError, ServiceResult};

/// Authenticated identity making a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caller {
    pub user_id: Snowflake,
    pub role: Role,
}

impl Caller {
    pub const fn new(user_id: Snowflake, role: Role) -> Self {
        Self { user_id, role }
    }

    #[inline]
    pub fn is_staff(&self) -> bool {
        self.role.is_staff()
    }
}

impl TryFrom<&Claims> for Caller {
    type Error = ServiceError;

    fn try_from(claims: &Claims) -> Result<Self, Self::Error> {
        Ok(Self::new(claims.user_id()?, claims.role))
    }
}

/// Allow the target user themself or any staff member
pub fn require_self_or_staff(caller: &Caller, target: Snowflake) -> ServiceResult<()> {
    if caller.user_id == target || caller.is_staff() {
        Ok(())
    } else {
        Err(ServiceError::permission_denied(
            "cannot access another user's records",
        ))
    }
}

/// Allow only the listed roles
pub fn require_roles(caller: &Caller, roles: &[Role]) -> ServiceResult<()> {
    if roles.contains(&caller.role) {
        Ok(())
    } else {
        let allowed: Vec<&str> = roles.iter().map(|r| r.as_str()).collect();
        Err(ServiceError::permission_denied(format!(
            "requires one of: {}",
            allowed.join(", ")
        )))
    }
}

/// Allow Admin, Manager, and Trainer
pub fn require_staff(caller: &Caller) -> ServiceResult<()> {
    require_roles(caller, &[Role::Admin, Role::Manager, Role::Trainer])
}
