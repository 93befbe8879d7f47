//! Service context - dependency container for services
//!
//! Holds all repositories, the notification sink, and the other dependencies
//! needed by services.

use std::sync::Arc;

use lms_cache::{Publisher, RedisPool};
use lms_common::{CertificateConfig, JwtService};
use lms_core::traits::{
    CertificateRepository, CourseRepository, EnrollmentRepository, NotificationRepository,
    NotificationSink, ProgressRepository, UserRepository,
};
use lms_core::{Snowflake, SnowflakeGenerator};
use lms_db::{
    MemoryCertificateRepository, MemoryCourseRepository, MemoryEnrollmentRepository,
    MemoryNotificationRepository, MemoryProgressRepository, MemoryStore, MemoryUserRepository,
    PgCertificateRepository, PgCourseRepository, PgEnrollmentRepository,
    PgNotificationRepository, PgPool, PgProgressRepository, PgUserRepository,
};

use super::error::{ServiceError, ServiceResult};
use super::sink::StoreNotificationSink;

/// Service context containing all dependencies
///
/// This is the main dependency container that gets passed to all services.
/// It provides access to:
/// - Entity repositories (PostgreSQL or in-memory)
/// - The notification sink
/// - JWT service for authentication
/// - Snowflake generator for ID generation
/// - The certificate policy
#[derive(Clone)]
pub struct ServiceContext {
    // Pools, kept for readiness probes
    pool: Option<PgPool>,
    redis_pool: Option<RedisPool>,

    // Repositories
    user_repo: Arc<dyn UserRepository>,
    course_repo: Arc<dyn CourseRepository>,
    enrollment_repo: Arc<dyn EnrollmentRepository>,
    progress_repo: Arc<dyn ProgressRepository>,
    certificate_repo: Arc<dyn CertificateRepository>,
    notification_repo: Arc<dyn NotificationRepository>,

    notification_sink: Arc<dyn NotificationSink>,

    // Services
    jwt_service: Arc<JwtService>,
    snowflake_generator: Arc<SnowflakeGenerator>,

    certificate_policy: CertificateConfig,
}

impl ServiceContext {
    /// Start building a context
    pub fn builder() -> ServiceContextBuilder {
        ServiceContextBuilder::new()
    }

    // === Pools ===

    /// PostgreSQL pool, absent on the in-memory store
    pub fn pool(&self) -> Option<&PgPool> {
        self.pool.as_ref()
    }

    /// Redis pool, absent when pub/sub fan-out is disabled
    pub fn redis_pool(&self) -> Option<&RedisPool> {
        self.redis_pool.as_ref()
    }

    // === Repositories ===

    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    pub fn course_repo(&self) -> &dyn CourseRepository {
        self.course_repo.as_ref()
    }

    pub fn enrollment_repo(&self) -> &dyn EnrollmentRepository {
        self.enrollment_repo.as_ref()
    }

    pub fn progress_repo(&self) -> &dyn ProgressRepository {
        self.progress_repo.as_ref()
    }

    pub fn certificate_repo(&self) -> &dyn CertificateRepository {
        self.certificate_repo.as_ref()
    }

    pub fn notification_repo(&self) -> &dyn NotificationRepository {
        self.notification_repo.as_ref()
    }

    // === Notifications ===

    /// Get the sink that receives workflow events
    pub fn notification_sink(&self) -> &dyn NotificationSink {
        self.notification_sink.as_ref()
    }

    // === Services ===

    /// Get the JWT service
    pub fn jwt_service(&self) -> &JwtService {
        self.jwt_service.as_ref()
    }

    /// Get the snowflake ID generator
    pub fn snowflake_generator(&self) -> &SnowflakeGenerator {
        self.snowflake_generator.as_ref()
    }

    /// Generate a new Snowflake ID
    pub fn generate_id(&self) -> Snowflake {
        self.snowflake_generator.generate()
    }

    /// Score, grade, issuer, and validity defaults for new certificates
    pub fn certificate_policy(&self) -> &CertificateConfig {
        &self.certificate_policy
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("pool", &self.pool.as_ref().map(|_| "PgPool"))
            .field("redis_pool", &self.redis_pool.as_ref().map(|_| "RedisPool"))
            .field("repositories", &"...")
            .field("certificate_policy", &self.certificate_policy)
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
#[derive(Default)]
pub struct ServiceContextBuilder {
    pool: Option<PgPool>,
    redis_pool: Option<RedisPool>,
    user_repo: Option<Arc<dyn UserRepository>>,
    course_repo: Option<Arc<dyn CourseRepository>>,
    enrollment_repo: Option<Arc<dyn EnrollmentRepository>>,
    progress_repo: Option<Arc<dyn ProgressRepository>>,
    certificate_repo: Option<Arc<dyn CertificateRepository>>,
    notification_repo: Option<Arc<dyn NotificationRepository>>,
    notification_sink: Option<Arc<dyn NotificationSink>>,
    jwt_service: Option<Arc<JwtService>>,
    snowflake_generator: Option<Arc<SnowflakeGenerator>>,
    certificate_policy: Option<CertificateConfig>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wire every repository to PostgreSQL
    pub fn postgres(mut self, pool: PgPool) -> Self {
        self.user_repo = Some(Arc::new(PgUserRepository::new(pool.clone())));
        self.course_repo = Some(Arc::new(PgCourseRepository::new(pool.clone())));
        self.enrollment_repo = Some(Arc::new(PgEnrollmentRepository::new(pool.clone())));
        self.progress_repo = Some(Arc::new(PgProgressRepository::new(pool.clone())));
        self.certificate_repo = Some(Arc::new(PgCertificateRepository::new(pool.clone())));
        self.notification_repo = Some(Arc::new(PgNotificationRepository::new(pool.clone())));
        self.pool = Some(pool);
        self
    }

    /// Wire every repository to one in-memory store
    pub fn memory(mut self, store: Arc<MemoryStore>) -> Self {
        self.user_repo = Some(Arc::new(MemoryUserRepository::new(store.clone())));
        self.course_repo = Some(Arc::new(MemoryCourseRepository::new(store.clone())));
        self.enrollment_repo = Some(Arc::new(MemoryEnrollmentRepository::new(store.clone())));
        self.progress_repo = Some(Arc::new(MemoryProgressRepository::new(store.clone())));
        self.certificate_repo = Some(Arc::new(MemoryCertificateRepository::new(store.clone())));
        self.notification_repo = Some(Arc::new(MemoryNotificationRepository::new(store)));
        self
    }

    /// Fan stored notifications out over Redis pub/sub
    pub fn redis_pool(mut self, redis_pool: RedisPool) -> Self {
        self.redis_pool = Some(redis_pool);
        self
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn course_repo(mut self, repo: Arc<dyn CourseRepository>) -> Self {
        self.course_repo = Some(repo);
        self
    }

    pub fn enrollment_repo(mut self, repo: Arc<dyn EnrollmentRepository>) -> Self {
        self.enrollment_repo = Some(repo);
        self
    }

    pub fn progress_repo(mut self, repo: Arc<dyn ProgressRepository>) -> Self {
        self.progress_repo = Some(repo);
        self
    }

    pub fn certificate_repo(mut self, repo: Arc<dyn CertificateRepository>) -> Self {
        self.certificate_repo = Some(repo);
        self
    }

    pub fn notification_repo(mut self, repo: Arc<dyn NotificationRepository>) -> Self {
        self.notification_repo = Some(repo);
        self
    }

    /// Replace the default store-backed sink
    pub fn notification_sink(mut self, sink: Arc<dyn NotificationSink>) -> Self {
        self.notification_sink = Some(sink);
        self
    }

    pub fn jwt_service(mut self, service: Arc<JwtService>) -> Self {
        self.jwt_service = Some(service);
        self
    }

    pub fn snowflake_generator(mut self, generator: Arc<SnowflakeGenerator>) -> Self {
        self.snowflake_generator = Some(generator);
        self
    }

    pub fn certificate_policy(mut self, policy: CertificateConfig) -> Self {
        self.certificate_policy = Some(policy);
        self
    }

    /// Build the ServiceContext
    ///
    /// Without an explicit sink, notifications are stored through the
    /// notification repository and published when a Redis pool is set.
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        let notification_repo = self
            .notification_repo
            .ok_or_else(|| ServiceError::validation("notification_repo is required"))?;
        let snowflake_generator = self
            .snowflake_generator
            .ok_or_else(|| ServiceError::validation("snowflake_generator is required"))?;

        let notification_sink = match self.notification_sink {
            Some(sink) => sink,
            None => Arc::new(StoreNotificationSink::new(
                notification_repo.clone(),
                snowflake_generator.clone(),
                self.redis_pool.clone().map(Publisher::new),
            )),
        };

        Ok(ServiceContext {
            pool: self.pool,
            redis_pool: self.redis_pool,
            user_repo: self
                .user_repo
                .ok_or_else(|| ServiceError::validation("user_repo is required"))?,
            course_repo: self
                .course_repo
                .ok_or_else(|| ServiceError::validation("course_repo is required"))?,
            enrollment_repo: self
                .enrollment_repo
                .ok_or_else(|| ServiceError::validation("enrollment_repo is required"))?,
            progress_repo: self
                .progress_repo
                .ok_or_else(|| ServiceError::validation("progress_repo is required"))?,
            certificate_repo: self
                .certificate_repo
                .ok_or_else(|| ServiceError::validation("certificate_repo is required"))?,
            notification_repo,
            notification_sink,
            jwt_service: self
                .jwt_service
                .ok_or_else(|| ServiceError::validation("jwt_service is required"))?,
            snowflake_generator,
            certificate_policy: self.certificate_policy.unwrap_or_default(),
        })
    }
}
