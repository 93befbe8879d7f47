//! # lms-service
//!
//! Application layer: the progress tracker, certificate issuer, enrollment
//! workflow, notification sink, and the DTOs the API speaks.

pub mod dto;
pub mod services;

pub use services::{
    Caller, CertificateService, EnrollmentService, NotificationService, ProgressService,
    ServiceContext, ServiceContextBuilder, ServiceError, ServiceResult,
};
