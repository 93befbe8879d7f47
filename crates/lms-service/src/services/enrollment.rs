//! Enrollment service
//!
//! Registers learners in courses and applies direct status updates with the
//! same completion rule the progress tracker uses.

use chrono::Utc;
use lms_core::{
    Course, DomainError, DomainEvent, Enrollment, EnrollmentStats, EnrollmentStatus,
    EnrollmentType, Role, Snowflake,
};
use tracing::{info, instrument};

use crate::dto::{EnrollRequest, EnrollmentResponse, UpdateEnrollmentStatusRequest};

use super::access::{require_roles, require_self_or_staff, require_staff, Caller};
use super::certificate::{CertificateService, IssueCertificate};
use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::sink::notify;

/// Enrollment service
pub struct EnrollmentService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> EnrollmentService<'a> {
    /// Create a new EnrollmentService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Enroll a user in a course
    #[instrument(skip(self, request), fields(course_id = %request.course_id))]
    pub async fn enroll(
        &self,
        caller: &Caller,
        request: EnrollRequest,
    ) -> ServiceResult<EnrollmentResponse> {
        let user_id = request.user_id.unwrap_or(caller.user_id);
        require_self_or_staff(caller, user_id)?;

        let enrollment_type = match request.enrollment_type.as_deref() {
            Some(raw) => raw.parse::<EnrollmentType>().map_err(DomainError::from)?,
            None if user_id == caller.user_id => EnrollmentType::SelfEnrolled,
            None => EnrollmentType::ManagerAssigned,
        };

        self.ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::UserNotFound(user_id))?;

        let course = self.course(request.course_id).await?;
        if !course.is_active {
            return Err(DomainError::CourseInactive(course.id).into());
        }

        if self
            .ctx
            .enrollment_repo()
            .find_by_user_and_course(user_id, course.id)
            .await?
            .is_some()
        {
            return Err(DomainError::AlreadyEnrolled.into());
        }

        let active = self.ctx.enrollment_repo().count_active_by_course(course.id).await?;
        if !course.has_capacity(active) {
            return Err(DomainError::CourseFull {
                max: course.max_participants.unwrap_or_default(),
            }
            .into());
        }

        let mut enrollment = Enrollment::new(self.ctx.generate_id(), user_id, course.id, enrollment_type);
        enrollment.notes = request.notes;
        self.ctx.enrollment_repo().create(&enrollment).await?;

        info!(
            enrollment_id = %enrollment.id,
            user_id = %user_id,
            enrollment_type = %enrollment_type,
            "User enrolled"
        );

        notify(
            self.ctx,
            DomainEvent::enrollment_created(enrollment.id, user_id, course.id, course.title),
        )
        .await;

        Ok(EnrollmentResponse::from(&enrollment))
    }

    /// Set an enrollment's status directly
    #[instrument(skip(self, request))]
    pub async fn update_status(
        &self,
        caller: &Caller,
        enrollment_id: Snowflake,
        request: UpdateEnrollmentStatusRequest,
    ) -> ServiceResult<EnrollmentResponse> {
        require_staff(caller)?;

        let status: EnrollmentStatus = request.status.parse().map_err(DomainError::from)?;
        let enrollment = self.set_status(enrollment_id, status).await?;

        Ok(EnrollmentResponse::from(&enrollment))
    }

    /// Apply a target status; entering Completed completes progress and issues a certificate
    #[instrument(skip(self))]
    pub async fn set_status(
        &self,
        enrollment_id: Snowflake,
        status: EnrollmentStatus,
    ) -> ServiceResult<Enrollment> {
        let mut enrollment = self.get_entity(enrollment_id).await?;
        let previous = enrollment.status;

        let now = Utc::now();
        let entered_completed = enrollment.apply_status(status, now)?;

        if !entered_completed {
            self.ctx.enrollment_repo().update(&enrollment).await?;
            info!(previous = %previous, status = %status, "Enrollment status updated");
            return Ok(enrollment);
        }

        let course = self.ctx.course_repo().find_by_id(enrollment.course_id).await?;
        let progress = self
            .ctx
            .progress_repo()
            .find_by_user_and_course(enrollment.user_id, enrollment.course_id)
            .await?;

        let policy = self.ctx.certificate_policy();
        let (request, progress_completed_now) = match progress {
            Some(mut progress) => {
                let transition = progress
                    .force_complete(course.as_ref().and_then(Course::duration_minutes), now);
                enrollment.mirror_progress(&progress, now);
                let saved = self
                    .ctx
                    .progress_repo()
                    .save_with_enrollment(&progress, Some(&enrollment))
                    .await?;
                (
                    IssueCertificate::from_progress(&saved, policy.issued_by.clone()),
                    transition.entered_completed(),
                )
            }
            None => {
                self.ctx.enrollment_repo().update(&enrollment).await?;
                let request = IssueCertificate::new(
                    enrollment.user_id,
                    enrollment.course_id,
                    policy.issued_by.clone(),
                );
                (request, true)
            }
        };

        info!(previous = %previous, "Enrollment completed by status update");

        CertificateService::new(self.ctx)
            .issue_after_commit(&request.with_grade(enrollment.grade.clone()))
            .await;

        // The completion was already announced when progress reached 100 %
        if progress_completed_now {
            let title = course.map_or_else(|| enrollment.course_id.to_string(), |c| c.title);
            notify(
                self.ctx,
                DomainEvent::course_completed(enrollment.user_id, enrollment.course_id, title),
            )
            .await;
        }

        // Re-read so the certificate flag set by the issuer is visible
        self.get_entity(enrollment_id).await
    }

    /// Get an enrollment by ID
    #[instrument(skip(self))]
    pub async fn get(&self, caller: &Caller, enrollment_id: Snowflake) -> ServiceResult<EnrollmentResponse> {
        let enrollment = self.get_entity(enrollment_id).await?;
        require_self_or_staff(caller, enrollment.user_id)?;
        Ok(EnrollmentResponse::from(&enrollment))
    }

    /// List a user's enrollments, newest first
    #[instrument(skip(self))]
    pub async fn list_for_user(
        &self,
        caller: &Caller,
        user_id: Snowflake,
    ) -> ServiceResult<Vec<EnrollmentResponse>> {
        require_self_or_staff(caller, user_id)?;

        let enrollments = self.ctx.enrollment_repo().find_by_user(user_id).await?;
        Ok(enrollments.iter().map(EnrollmentResponse::from).collect())
    }

    /// List a course's enrollments
    #[instrument(skip(self))]
    pub async fn list_for_course(
        &self,
        caller: &Caller,
        course_id: Snowflake,
    ) -> ServiceResult<Vec<EnrollmentResponse>> {
        require_staff(caller)?;
        self.course(course_id).await?;

        let enrollments = self.ctx.enrollment_repo().find_by_course(course_id).await?;
        Ok(enrollments.iter().map(EnrollmentResponse::from).collect())
    }

    /// Delete an enrollment; progress and certificates for the pair are kept
    #[instrument(skip(self))]
    pub async fn remove(&self, caller: &Caller, enrollment_id: Snowflake) -> ServiceResult<()> {
        require_roles(caller, &[Role::Admin, Role::Manager])?;

        self.ctx.enrollment_repo().delete(enrollment_id).await?;
        info!(enrollment_id = %enrollment_id, "Enrollment deleted");
        Ok(())
    }

    /// Enrollment counts across the platform
    #[instrument(skip(self))]
    pub async fn stats(&self, caller: &Caller) -> ServiceResult<EnrollmentStats> {
        require_roles(caller, &[Role::Admin, Role::Manager])?;
        Ok(self.ctx.enrollment_repo().stats().await?)
    }

    /// Get enrollment entity by ID
    pub async fn get_entity(&self, enrollment_id: Snowflake) -> ServiceResult<Enrollment> {
        self.ctx
            .enrollment_repo()
            .find_by_id(enrollment_id)
            .await?
            .ok_or_else(|| DomainError::EnrollmentNotFound(enrollment_id).into())
    }

    async fn course(&self, course_id: Snowflake) -> ServiceResult<Course> {
        self.ctx
            .course_repo()
            .find_by_id(course_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Course", course_id.to_string()))
    }
}
