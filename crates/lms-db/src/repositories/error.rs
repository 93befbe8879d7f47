//! Error handling utilities for repositories

use lms_core::error::DomainError;
use lms_core::value_objects::Snowflake;
use sqlx::Error as SqlxError;

/// Convert SQLx error to DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::DatabaseError(e.to_string())
}

/// Check for unique violation and return appropriate error or fallback
pub fn map_unique_violation<F>(e: SqlxError, on_unique: F) -> DomainError
where
    F: FnOnce() -> DomainError,
{
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return on_unique();
        }
    }
    DomainError::DatabaseError(e.to_string())
}

/// Convert a list of rows, failing on the first corrupt one
pub fn collect_rows<M, E>(rows: Vec<M>) -> Result<Vec<E>, DomainError>
where
    E: TryFrom<M, Error = DomainError>,
{
    rows.into_iter().map(E::try_from).collect()
}

/// Create an "enrollment not found" error
pub fn enrollment_not_found(id: Snowflake) -> DomainError {
    DomainError::EnrollmentNotFound(id)
}

/// Create a "certificate not found" error
pub fn certificate_not_found(id: Snowflake) -> DomainError {
    DomainError::CertificateNotFound(id.to_string())
}

/// Create a "notification not found" error
pub fn notification_not_found(id: Snowflake) -> DomainError {
    DomainError::NotificationNotFound(id)
}
