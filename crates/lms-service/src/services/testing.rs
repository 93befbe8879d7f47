//! Shared fixtures for service tests over the in-memory store

use std::sync::Arc;

use async_trait::async_trait;
use lms_common::JwtService;
use lms_core::traits::{NotificationSink, RepoResult};
use lms_core::{
    Course, CourseCategory, CourseType, DomainError, DomainEvent, Enrollment, EnrollmentType,
    NotificationType, Role, Snowflake, SnowflakeGenerator, User,
};
use lms_db::MemoryStore;

use super::access::Caller;
use super::context::{ServiceContext, ServiceContextBuilder};

pub(crate) const STAFF: Caller = Caller::new(Snowflake::new(1), Role::Admin);

/// Sink that refuses every event
pub(crate) struct FailingSink;

#[async_trait]
impl NotificationSink for FailingSink {
    async fn deliver(&self, _event: &DomainEvent) -> RepoResult<()> {
        Err(DomainError::NotificationError("sink offline".to_string()))
    }
}

pub(crate) struct Fixture {
    pub ctx: ServiceContext,
    pub learner: Snowflake,
}

impl Fixture {
    pub async fn new() -> Self {
        Self::build(|builder| builder).await
    }

    pub async fn with_failing_sink() -> Self {
        Self::build(|builder| builder.notification_sink(Arc::new(FailingSink))).await
    }

    async fn build(customize: impl FnOnce(ServiceContextBuilder) -> ServiceContextBuilder) -> Self {
        let builder = ServiceContext::builder()
            .memory(MemoryStore::new())
            .jwt_service(Arc::new(JwtService::new("service-test-secret", 900)))
            .snowflake_generator(Arc::new(SnowflakeGenerator::new(1)));
        let ctx = customize(builder).build().unwrap();

        let learner = ctx.generate_id();
        ctx.user_repo()
            .create(&User::new(
                learner,
                "learner".to_string(),
                "learner@example.com".to_string(),
                "Lee Learner".to_string(),
                Role::Employee,
            ))
            .await
            .unwrap();

        Self { ctx, learner }
    }

    pub fn learner_caller(&self) -> Caller {
        Caller::new(self.learner, Role::Employee)
    }

    pub async fn user(&self, name: &str, role: Role) -> Snowflake {
        let id = self.ctx.generate_id();
        self.ctx
            .user_repo()
            .create(&User::new(
                id,
                name.to_string(),
                format!("{name}@example.com"),
                name.to_string(),
                role,
            ))
            .await
            .unwrap();
        id
    }

    pub async fn course(&self, title: &str, duration_hours: Option<i32>) -> Snowflake {
        let mut course = Course::new(
            self.ctx.generate_id(),
            title.to_string(),
            CourseCategory::Technical,
            CourseType::SelfPaced,
        );
        course.duration_hours = duration_hours;
        self.ctx.course_repo().create(&course).await.unwrap();
        course.id
    }

    pub async fn save_course(&self, course: &Course) {
        self.ctx.course_repo().create(course).await.unwrap();
    }

    pub async fn enroll(&self, user_id: Snowflake, course_id: Snowflake) -> Snowflake {
        let enrollment = Enrollment::new(
            self.ctx.generate_id(),
            user_id,
            course_id,
            EnrollmentType::SelfEnrolled,
        );
        self.ctx.enrollment_repo().create(&enrollment).await.unwrap();
        enrollment.id
    }

    /// Learner enrolled in a fresh ten hour course
    pub async fn enrolled_learner(&self) -> (Snowflake, Snowflake) {
        let course = self.course("Rust Basics", Some(10)).await;
        self.enroll(self.learner, course).await;
        (self.learner, course)
    }

    pub async fn enrollment(&self, user_id: Snowflake, course_id: Snowflake) -> Enrollment {
        self.ctx
            .enrollment_repo()
            .find_by_user_and_course(user_id, course_id)
            .await
            .unwrap()
            .unwrap()
    }

    pub async fn notifications_of(&self, user_id: Snowflake, kind: NotificationType) -> usize {
        self.ctx
            .notification_repo()
            .find_by_user(user_id)
            .await
            .unwrap()
            .iter()
            .filter(|n| n.notification_type == kind)
            .count()
    }

    pub async fn certificate_count(&self, user_id: Snowflake) -> usize {
        self.ctx
            .certificate_repo()
            .find_by_user(user_id)
            .await
            .unwrap()
            .len()
    }
}
