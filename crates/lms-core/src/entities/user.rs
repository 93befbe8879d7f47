//! User entity - a learner or staff member of the training platform

use chrono::{DateTime, Utc};

use crate::value_objects::{labelled_enum, Snowflake};

labelled_enum! {
    /// Platform role, gates what a caller may do to other users' records
    #[derive(Default)]
    pub enum Role {
        Admin => "ADMIN",
        Manager => "MANAGER",
        Trainer => "TRAINER",
        #[default]
        Employee => "EMPLOYEE",
    }
}

impl Role {
    /// Admin, Manager, and Trainer may act on any learner's records
    #[inline]
    pub fn is_staff(self) -> bool {
        !matches!(self, Self::Employee)
    }
}

/// User entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Snowflake,
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub role: Role,
    pub department: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new active User
    pub fn new(
        id: Snowflake,
        username: String,
        email: String,
        full_name: String,
        role: Role,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            username,
            email,
            full_name,
            role,
            department: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: Role) -> User {
        User::new(
            Snowflake::new(1),
            "jdoe".to_string(),
            "jdoe@example.com".to_string(),
            "Jane Doe".to_string(),
            role,
        )
    }

    #[test]
    fn test_staff_roles() {
        assert!(Role::Admin.is_staff());
        assert!(Role::Manager.is_staff());
        assert!(Role::Trainer.is_staff());
        assert!(!Role::Employee.is_staff());
    }

    #[test]
    fn test_role_labels() {
        assert_eq!(Role::Trainer.as_str(), "TRAINER");
        assert_eq!("manager".parse::<Role>().unwrap(), Role::Manager);
        assert!("root".parse::<Role>().is_err());
    }

    #[test]
    fn test_new_user_is_active() {
        let u = user(Role::Trainer);
        assert!(u.is_active);
        assert!(u.department.is_none());
        assert_eq!(u.created_at, u.updated_at);
    }
}
