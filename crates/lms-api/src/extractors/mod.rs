//! Axum extractors for request handling
//!
//! Custom extractors for authentication, validation, and typed path ids.

mod auth;
mod path;
mod validated;

pub use auth::AuthUser;
pub use path::{parse_snowflake, CourseIdPath, IdPath, UserCoursePath, UserIdPath};
pub use validated::ValidatedJson;
