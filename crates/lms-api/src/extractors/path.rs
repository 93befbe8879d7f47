//! Path parameter extractors
//!
//! Path segments arrive as strings; ids are parsed into Snowflakes here so
//! a malformed id is a 400 instead of a lookup miss.

use lms_core::Snowflake;
use serde::Deserialize;

use crate::response::ApiError;

/// Parse one path segment as a Snowflake
pub fn parse_snowflake(raw: &str, field: &str) -> Result<Snowflake, ApiError> {
    Snowflake::parse(raw).map_err(|_| ApiError::invalid_path(format!("Invalid {field} format")))
}

/// `/:id`
#[derive(Debug, Deserialize)]
pub struct IdPath {
    pub id: String,
}

impl IdPath {
    pub fn id(&self) -> Result<Snowflake, ApiError> {
        parse_snowflake(&self.id, "id")
    }
}

/// `/users/:user_id`
#[derive(Debug, Deserialize)]
pub struct UserIdPath {
    pub user_id: String,
}

impl UserIdPath {
    pub fn user_id(&self) -> Result<Snowflake, ApiError> {
        parse_snowflake(&self.user_id, "user_id")
    }
}

/// `/courses/:course_id`
#[derive(Debug, Deserialize)]
pub struct CourseIdPath {
    pub course_id: String,
}

impl CourseIdPath {
    pub fn course_id(&self) -> Result<Snowflake, ApiError> {
        parse_snowflake(&self.course_id, "course_id")
    }
}

/// `/users/:user_id/courses/:course_id`
#[derive(Debug, Deserialize)]
pub struct UserCoursePath {
    pub user_id: String,
    pub course_id: String,
}

impl UserCoursePath {
    pub fn user_id(&self) -> Result<Snowflake, ApiError> {
        parse_snowflake(&self.user_id, "user_id")
    }

    pub fn course_id(&self) -> Result<Snowflake, ApiError> {
        parse_snowflake(&self.course_id, "course_id")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_snowflake() {
        assert_eq!(parse_snowflake("42", "id").unwrap(), Snowflake::new(42));

        let err = parse_snowflake("abc", "course_id").unwrap_err();
        assert_eq!(err.error_code(), "INVALID_PATH_PARAMETER");
        assert!(err.to_string().contains("course_id"));
    }

    #[test]
    fn test_user_course_path() {
        let path = UserCoursePath {
            user_id: "7".to_string(),
            course_id: "x".to_string(),
        };
        assert_eq!(path.user_id().unwrap(), Snowflake::new(7));
        assert!(path.course_id().is_err());
    }
}
