//! Entity to model mappers
//!
//! Rows convert into domain entities with `TryFrom<Model>`. Enum columns are
//! stored as labels, so a row holding an unknown label surfaces as a
//! `DatabaseError` instead of a panic.

mod certificate;
mod course;
mod enrollment;
mod notification;
mod progress;
mod user;

use std::str::FromStr;

use lms_core::error::DomainError;
use lms_core::value_objects::{ParseEnumError, Percentage, Snowflake};

pub use progress::stats_from_model;

/// Parse a stored enum label
pub(crate) fn parse_label<T>(value: &str) -> Result<T, DomainError>
where
    T: FromStr<Err = ParseEnumError>,
{
    value
        .parse()
        .map_err(|e: ParseEnumError| DomainError::DatabaseError(format!("corrupt row: {e}")))
}

/// Read a stored percentage column
pub(crate) fn stored_percentage(value: f64) -> Result<Percentage, DomainError> {
    Percentage::new(value)
        .map_err(|_| DomainError::DatabaseError(format!("corrupt row: percentage {value}")))
}

pub(crate) fn snowflake_opt(value: Option<i64>) -> Option<Snowflake> {
    value.map(Snowflake::new)
}
