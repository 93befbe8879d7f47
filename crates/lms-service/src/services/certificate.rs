//! Certificate service
//!
//! Issues at most one certificate per (user, course) pair, backfills missing
//! certificates for completed enrollments, and serves certificate lookups.

use chrono::Utc;
use lms_core::entities::{generate_certificate_number, Certificate, Course, Enrollment};
use lms_core::rules;
use lms_core::{CertificateStatus, DomainError, DomainEvent, Percentage, Progress, Role, Snowflake};
use tracing::{error, info, instrument, warn};

use crate::dto::{
    BackfillResponse, CertificateResponse, IssueCertificateRequest, UpdateCertificateStatusRequest,
};

use super::access::{require_roles, require_self_or_staff, Caller};
use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::sink::notify;

/// What a certificate is being issued for
#[derive(Debug, Clone, PartialEq)]
pub struct IssueCertificate {
    pub user_id: Snowflake,
    pub course_id: Snowflake,
    pub completion_percentage: Percentage,
    pub quiz_score: Option<f64>,
    pub max_quiz_score: Option<f64>,
    /// Overrides the policy grade when no quiz result is available
    pub grade: Option<String>,
    pub issued_by: String,
}

impl IssueCertificate {
    pub fn new(user_id: Snowflake, course_id: Snowflake, issued_by: impl Into<String>) -> Self {
        Self {
            user_id,
            course_id,
            completion_percentage: Percentage::FULL,
            quiz_score: None,
            max_quiz_score: None,
            grade: None,
            issued_by: issued_by.into(),
        }
    }

    /// Carry the percentage and quiz result of a progress record
    pub fn from_progress(progress: &Progress, issued_by: impl Into<String>) -> Self {
        Self {
            completion_percentage: progress.completion_percentage,
            quiz_score: progress.quiz_score,
            max_quiz_score: progress.max_quiz_score,
            ..Self::new(progress.user_id, progress.course_id, issued_by)
        }
    }

    pub fn with_grade(mut self, grade: Option<String>) -> Self {
        self.grade = grade;
        self
    }
}

/// Certificate service
pub struct CertificateService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CertificateService<'a> {
    /// Create a new CertificateService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Return the pair's certificate, minting one if none exists
    #[instrument(skip(self, request), fields(user_id = %request.user_id, course_id = %request.course_id))]
    pub async fn issue_if_absent(&self, request: &IssueCertificate) -> ServiceResult<Certificate> {
        let (certificate, _) = self.issue(request).await?;
        Ok(certificate)
    }

    /// Staff-initiated issuance; returns the existing certificate if the pair has one
    #[instrument(skip(self, request), fields(user_id = %request.user_id, course_id = %request.course_id))]
    pub async fn issue_for(
        &self,
        caller: &Caller,
        request: IssueCertificateRequest,
    ) -> ServiceResult<CertificateResponse> {
        require_roles(caller, &[Role::Admin, Role::Manager, Role::Trainer])?;

        let report = request.to_report()?;
        if self.ctx.user_repo().find_by_id(request.user_id).await?.is_none() {
            return Err(ServiceError::not_found("User", request.user_id.to_string()));
        }

        let issued_by = request
            .issued_by
            .unwrap_or_else(|| self.ctx.certificate_policy().issued_by.clone());
        let issue = IssueCertificate {
            completion_percentage: report.percentage,
            quiz_score: report.quiz_score,
            max_quiz_score: report.max_quiz_score,
            ..IssueCertificate::new(request.user_id, request.course_id, issued_by)
        }
        .with_grade(request.grade);

        let certificate = self.issue_if_absent(&issue).await?;
        Ok(CertificateResponse::from(&certificate))
    }

    /// Issue once the triggering state change has committed
    ///
    /// The caller's operation already succeeded, so a failure is only logged.
    /// The enrollment backfill repairs any pair left without a certificate.
    pub async fn issue_after_commit(&self, request: &IssueCertificate) -> Option<Certificate> {
        match self.issue(request).await {
            Ok((certificate, _)) => Some(certificate),
            Err(e) => {
                error!(
                    error = %e,
                    user_id = %request.user_id,
                    course_id = %request.course_id,
                    "Certificate issuance failed after completion"
                );
                None
            }
        }
    }

    /// Issue, reporting whether this call created the certificate
    async fn issue(&self, request: &IssueCertificate) -> ServiceResult<(Certificate, bool)> {
        let enrollment = self
            .ctx
            .enrollment_repo()
            .find_by_user_and_course(request.user_id, request.course_id)
            .await?;

        if let Some(existing) = self
            .ctx
            .certificate_repo()
            .find_by_user_and_course(request.user_id, request.course_id)
            .await?
        {
            self.record_on_enrollment(enrollment, &existing).await?;
            return Ok((existing, false));
        }

        let course = self.course(request.course_id).await?;
        let certificate = self.mint(request, enrollment.as_ref());

        match self.ctx.certificate_repo().create(&certificate).await {
            Ok(()) => {}
            Err(DomainError::CertificateAlreadyExists) => {
                // Lost a race for the pair, or drew a number already in use
                let existing = self
                    .ctx
                    .certificate_repo()
                    .find_by_user_and_course(request.user_id, request.course_id)
                    .await?
                    .ok_or_else(|| {
                        error!(
                            certificate_number = %certificate.certificate_number,
                            "Certificate number collision"
                        );
                        ServiceError::internal("certificate number collision")
                    })?;
                self.record_on_enrollment(enrollment, &existing).await?;
                return Ok((existing, false));
            }
            Err(e) => return Err(e.into()),
        }

        self.record_on_enrollment(enrollment, &certificate).await?;

        info!(
            certificate_id = %certificate.id,
            certificate_number = %certificate.certificate_number,
            grade = %certificate.grade,
            "Certificate issued"
        );

        notify(
            self.ctx,
            DomainEvent::certificate_issued(
                certificate.id,
                certificate.certificate_number.clone(),
                certificate.user_id,
                certificate.course_id,
                course.title,
            ),
        )
        .await;

        Ok((certificate, true))
    }

    fn mint(&self, request: &IssueCertificate, enrollment: Option<&Enrollment>) -> Certificate {
        let policy = self.ctx.certificate_policy();

        let (score, grade) = match (request.quiz_score, request.max_quiz_score) {
            (Some(score), Some(max)) if max > 0.0 => {
                let scaled = rules::scale_score(score, max, policy.max_score);
                (scaled, rules::letter_grade(scaled, policy.max_score).to_string())
            }
            _ => (
                policy.default_score,
                request
                    .grade
                    .clone()
                    .unwrap_or_else(|| policy.default_grade.clone()),
            ),
        };

        let completion_date = enrollment
            .and_then(|e| e.completed_at)
            .unwrap_or_else(Utc::now);

        let certificate = Certificate::new(
            self.ctx.generate_id(),
            request.user_id,
            request.course_id,
            generate_certificate_number(),
            request.issued_by.clone(),
        )
        .with_score(score, policy.max_score, grade)
        .with_completion(request.completion_percentage, completion_date);

        match policy.validity_years {
            Some(years) => certificate.with_validity_years(years),
            None => certificate,
        }
    }

    async fn record_on_enrollment(
        &self,
        enrollment: Option<Enrollment>,
        certificate: &Certificate,
    ) -> ServiceResult<()> {
        let Some(mut enrollment) = enrollment else {
            return Ok(());
        };
        if enrollment.certificate_earned && enrollment.certificate_id == Some(certificate.id) {
            return Ok(());
        }

        enrollment.record_certificate(certificate.id, Some(&certificate.grade));
        self.ctx.enrollment_repo().update(&enrollment).await?;
        Ok(())
    }

    async fn course(&self, course_id: Snowflake) -> ServiceResult<Course> {
        self.ctx
            .course_repo()
            .find_by_id(course_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Course", course_id.to_string()))
    }

    /// Issue certificates for completed enrollments that have none
    #[instrument(skip(self))]
    pub async fn backfill_from_enrollments(&self, caller: &Caller) -> ServiceResult<BackfillResponse> {
        require_roles(caller, &[Role::Admin, Role::Manager, Role::Trainer])?;

        let pending = self
            .ctx
            .enrollment_repo()
            .find_completed_without_certificate()
            .await?;

        let issued_by = self.ctx.certificate_policy().backfill_issued_by.clone();
        let mut result = BackfillResponse::default();

        for enrollment in pending {
            let request = IssueCertificate::new(enrollment.user_id, enrollment.course_id, issued_by.clone())
                .with_grade(enrollment.grade.clone());

            match self.issue(&request).await {
                Ok((_, true)) => result.generated += 1,
                Ok((_, false)) => result.skipped += 1,
                Err(e) => {
                    warn!(
                        error = %e,
                        enrollment_id = %enrollment.id,
                        "Skipping enrollment during certificate backfill"
                    );
                    result.skipped += 1;
                }
            }
        }

        info!(
            generated = result.generated,
            skipped = result.skipped,
            "Certificate backfill finished"
        );

        Ok(result)
    }

    /// Change a certificate's status
    #[instrument(skip(self, request))]
    pub async fn update_status(
        &self,
        caller: &Caller,
        certificate_id: Snowflake,
        request: UpdateCertificateStatusRequest,
    ) -> ServiceResult<CertificateResponse> {
        require_roles(caller, &[Role::Admin, Role::Manager])?;

        let status: CertificateStatus = request.status.parse().map_err(DomainError::from)?;

        let mut certificate = self.get_entity(certificate_id).await?;
        self.ctx
            .certificate_repo()
            .update_status(certificate_id, status, request.notes.as_deref())
            .await?;

        certificate.set_status(status);
        if request.notes.is_some() {
            certificate.notes = request.notes;
        }

        info!(certificate_id = %certificate_id, status = %status, "Certificate status updated");

        Ok(CertificateResponse::from(&certificate))
    }

    /// Get a certificate by ID
    #[instrument(skip(self))]
    pub async fn get(&self, caller: &Caller, certificate_id: Snowflake) -> ServiceResult<CertificateResponse> {
        let certificate = self.get_entity(certificate_id).await?;
        require_self_or_staff(caller, certificate.user_id)?;
        Ok(CertificateResponse::from(&certificate))
    }

    /// Look a certificate up by its public number
    #[instrument(skip(self))]
    pub async fn verify(&self, certificate_number: &str) -> ServiceResult<CertificateResponse> {
        let certificate = self
            .ctx
            .certificate_repo()
            .find_by_number(certificate_number)
            .await?
            .ok_or_else(|| ServiceError::not_found("Certificate", certificate_number))?;

        Ok(CertificateResponse::from(&certificate))
    }

    /// List a user's certificates, newest first
    #[instrument(skip(self))]
    pub async fn list_for_user(
        &self,
        caller: &Caller,
        user_id: Snowflake,
    ) -> ServiceResult<Vec<CertificateResponse>> {
        require_self_or_staff(caller, user_id)?;

        let certificates = self.ctx.certificate_repo().find_by_user(user_id).await?;
        Ok(certificates.iter().map(CertificateResponse::from).collect())
    }

    /// Get certificate entity by ID
    pub async fn get_entity(&self, certificate_id: Snowflake) -> ServiceResult<Certificate> {
        self.ctx
            .certificate_repo()
            .find_by_id(certificate_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Certificate", certificate_id.to_string()))
    }
}
