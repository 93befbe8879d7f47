//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for API inputs
//! - Response DTOs for serializing API outputs
//! - Mappers for converting domain entities to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

// Re-export commonly used request types
pub use requests::{
    EnrollRequest, IssueCertificateRequest, MarkCompletedRequest, ReportProgressRequest,
    UpdateCertificateStatusRequest, UpdateEnrollmentStatusRequest,
};

// Re-export commonly used response types
pub use responses::{
    BackfillResponse, CertificateResponse, EnrollmentResponse, HealthChecks,
    HealthResponse, MarkAllReadResponse, MarkCompletedResponse, NotificationResponse,
    ProgressResponse, ProgressStatsResponse, ReadinessResponse, UnreadCountResponse,
};
