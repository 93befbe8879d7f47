//! Progress service
//!
//! Turns percentage reports into Progress and Enrollment transitions and
//! fires certificate issuance on the edge into Completed.

use chrono::Utc;
use lms_core::{Course, DomainError, DomainEvent, Progress, ProgressReport, Snowflake};
use tracing::{debug, info, instrument};

use crate::dto::{
    MarkCompletedRequest, MarkCompletedResponse, ProgressResponse, ProgressStatsResponse,
    ReportProgressRequest,
};

use super::access::{require_self_or_staff, require_staff, Caller};
use super::certificate::{CertificateService, IssueCertificate};
use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::sink::notify;

pub const MARK_COMPLETED_MESSAGE: &str = "Course marked as completed successfully";

/// Progress service
pub struct ProgressService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ProgressService<'a> {
    /// Create a new ProgressService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Record a progress report on behalf of a caller
    #[instrument(skip(self, request), fields(course_id = %request.course_id))]
    pub async fn report_progress(
        &self,
        caller: &Caller,
        request: ReportProgressRequest,
    ) -> ServiceResult<ProgressResponse> {
        let user_id = request.user_id.unwrap_or(caller.user_id);
        require_self_or_staff(caller, user_id)?;

        let report = request.to_report()?;
        let progress = self
            .report(user_id, request.course_id, &report, request.notes)
            .await?;

        Ok(ProgressResponse::from(&progress))
    }

    /// Apply a validated report to the pair's progress
    ///
    /// Creates the record on first report. The enrollment, when one exists,
    /// is mirrored and saved in the same unit of work.
    #[instrument(skip(self, report, notes))]
    pub async fn report(
        &self,
        user_id: Snowflake,
        course_id: Snowflake,
        report: &ProgressReport,
        notes: Option<String>,
    ) -> ServiceResult<Progress> {
        let existing = self
            .ctx
            .progress_repo()
            .find_by_user_and_course(user_id, course_id)
            .await?;
        let course = self.ctx.course_repo().find_by_id(course_id).await?;

        let mut progress = match existing {
            Some(progress) => progress,
            None => {
                if course.is_none() {
                    return Err(DomainError::CourseNotFound(course_id).into());
                }
                self.ctx
                    .user_repo()
                    .find_by_id(user_id)
                    .await?
                    .ok_or(DomainError::UserNotFound(user_id))?;

                debug!("Starting progress record");
                Progress::new(self.ctx.generate_id(), user_id, course_id)
            }
        };

        let now = Utc::now();
        let course_minutes = course.as_ref().and_then(Course::duration_minutes);
        let transition = progress.apply_report(report, course_minutes, now);
        if notes.is_some() {
            progress.notes = notes;
        }

        let mut enrollment = self
            .ctx
            .enrollment_repo()
            .find_by_user_and_course(user_id, course_id)
            .await?;
        if let Some(enrollment) = enrollment.as_mut() {
            enrollment.mirror_progress(&progress, now);
        }

        let saved = self
            .ctx
            .progress_repo()
            .save_with_enrollment(&progress, enrollment.as_ref())
            .await?;

        info!(
            percentage = saved.completion_percentage.value(),
            status = %saved.status,
            previous = %transition.previous,
            "Progress recorded"
        );

        if transition.entered_completed() {
            let request =
                IssueCertificate::from_progress(&saved, self.ctx.certificate_policy().issued_by.clone());
            self.on_completed(&saved, course.as_ref(), request).await;
        }

        Ok(saved)
    }

    /// Force the pair's progress to 100 %
    #[instrument(skip(self, request), fields(course_id = %request.course_id))]
    pub async fn mark_completed(
        &self,
        caller: &Caller,
        request: MarkCompletedRequest,
    ) -> ServiceResult<MarkCompletedResponse> {
        let user_id = request.user_id.unwrap_or(caller.user_id);
        require_self_or_staff(caller, user_id)?;

        let progress = self.complete(user_id, request.course_id).await?;

        Ok(MarkCompletedResponse {
            message: MARK_COMPLETED_MESSAGE.to_string(),
            progress: ProgressResponse::from(&progress),
        })
    }

    /// Complete an existing progress record and make sure a certificate exists
    #[instrument(skip(self))]
    pub async fn complete(&self, user_id: Snowflake, course_id: Snowflake) -> ServiceResult<Progress> {
        let mut progress = self
            .ctx
            .progress_repo()
            .find_by_user_and_course(user_id, course_id)
            .await?
            .ok_or(DomainError::ProgressNotFound { user_id, course_id })?;
        let course = self.ctx.course_repo().find_by_id(course_id).await?;

        let now = Utc::now();
        let transition =
            progress.force_complete(course.as_ref().and_then(Course::duration_minutes), now);

        let policy = self.ctx.certificate_policy();
        let mut enrollment = self
            .ctx
            .enrollment_repo()
            .find_by_user_and_course(user_id, course_id)
            .await?;
        if let Some(enrollment) = enrollment.as_mut() {
            enrollment.mirror_progress(&progress, now);
            enrollment
                .grade
                .get_or_insert_with(|| policy.default_grade.clone());
        }

        let saved = self
            .ctx
            .progress_repo()
            .save_with_enrollment(&progress, enrollment.as_ref())
            .await?;

        info!(previous = %transition.previous, "Progress marked completed");

        let request = IssueCertificate::from_progress(&saved, policy.issued_by.clone())
            .with_grade(enrollment.and_then(|e| e.grade));
        if transition.entered_completed() {
            self.on_completed(&saved, course.as_ref(), request).await;
        } else {
            CertificateService::new(self.ctx)
                .issue_after_commit(&request)
                .await;
        }

        Ok(saved)
    }

    /// Certificate first, then the "completed" notification
    async fn on_completed(&self, progress: &Progress, course: Option<&Course>, request: IssueCertificate) {
        CertificateService::new(self.ctx)
            .issue_after_commit(&request)
            .await;

        let title = course.map_or_else(|| progress.course_id.to_string(), |c| c.title.clone());
        notify(
            self.ctx,
            DomainEvent::course_completed(progress.user_id, progress.course_id, title),
        )
        .await;
    }

    /// Get progress for a (user, course) pair
    #[instrument(skip(self))]
    pub async fn get(
        &self,
        caller: &Caller,
        user_id: Snowflake,
        course_id: Snowflake,
    ) -> ServiceResult<ProgressResponse> {
        require_self_or_staff(caller, user_id)?;

        let progress = self
            .ctx
            .progress_repo()
            .find_by_user_and_course(user_id, course_id)
            .await?
            .ok_or(DomainError::ProgressNotFound { user_id, course_id })?;

        Ok(ProgressResponse::from(&progress))
    }

    /// List a user's progress, most recently accessed first
    #[instrument(skip(self))]
    pub async fn list_for_user(
        &self,
        caller: &Caller,
        user_id: Snowflake,
    ) -> ServiceResult<Vec<ProgressResponse>> {
        require_self_or_staff(caller, user_id)?;

        let records = self.ctx.progress_repo().find_by_user(user_id).await?;
        Ok(records.iter().map(ProgressResponse::from).collect())
    }

    /// List every learner's progress in a course
    #[instrument(skip(self))]
    pub async fn list_for_course(
        &self,
        caller: &Caller,
        course_id: Snowflake,
    ) -> ServiceResult<Vec<ProgressResponse>> {
        require_staff(caller)?;

        self.ctx
            .course_repo()
            .find_by_id(course_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Course", course_id.to_string()))?;

        let records = self.ctx.progress_repo().find_by_course(course_id).await?;
        Ok(records.iter().map(ProgressResponse::from).collect())
    }

    /// Aggregate figures over a user's progress
    #[instrument(skip(self))]
    pub async fn stats(&self, caller: &Caller, user_id: Snowflake) -> ServiceResult<ProgressStatsResponse> {
        require_self_or_staff(caller, user_id)?;

        let stats = self.ctx.progress_repo().stats_for_user(user_id).await?;
        Ok(ProgressStatsResponse::new(user_id, stats))
    }
}
