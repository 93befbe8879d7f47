//! Memory implementations of the repository traits

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use tracing::{debug, instrument};

use lms_core::entities::{
    Certificate, CertificateStatus, Course, Enrollment, EnrollmentStatus, Notification, Progress,
    User,
};
use lms_core::error::DomainError;
use lms_core::traits::{
    CertificateRepository, CourseRepository, EnrollmentRepository, EnrollmentStats,
    NotificationRepository, ProgressRepository, ProgressStats, RepoResult, UserRepository,
};
use lms_core::value_objects::Snowflake;

use super::store::MemoryStore;

macro_rules! memory_repository {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone)]
        pub struct $name {
            store: Arc<MemoryStore>,
        }

        impl $name {
            pub fn new(store: Arc<MemoryStore>) -> Self {
                Self { store }
            }
        }
    };
}

memory_repository!(
    /// In-memory implementation of UserRepository
    MemoryUserRepository
);
memory_repository!(
    /// In-memory implementation of CourseRepository
    MemoryCourseRepository
);
memory_repository!(
    /// In-memory implementation of EnrollmentRepository
    MemoryEnrollmentRepository
);
memory_repository!(
    /// In-memory implementation of ProgressRepository
    MemoryProgressRepository
);
memory_repository!(
    /// In-memory implementation of CertificateRepository
    MemoryCertificateRepository
);
memory_repository!(
    /// In-memory implementation of NotificationRepository
    MemoryNotificationRepository
);

// ============================================================================
// Users
// ============================================================================

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<User>> {
        Ok(self.store.users.get(&id).map(|u| u.value().clone()))
    }

    #[instrument(skip(self, user), fields(user_id = %user.id))]
    async fn create(&self, user: &User) -> RepoResult<()> {
        let _guard = self.store.write_guard();

        let taken = self.store.users.iter().any(|u| {
            u.username == user.username || u.email.eq_ignore_ascii_case(&user.email)
        });
        if taken || self.store.users.contains_key(&user.id) {
            return Err(DomainError::ValidationError(
                "username or email already registered".to_string(),
            ));
        }

        self.store.users.insert(user.id, user.clone());
        Ok(())
    }
}

// ============================================================================
// Courses
// ============================================================================

#[async_trait]
impl CourseRepository for MemoryCourseRepository {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Course>> {
        Ok(self.store.courses.get(&id).map(|c| c.value().clone()))
    }

    async fn create(&self, course: &Course) -> RepoResult<()> {
        self.store.courses.insert(course.id, course.clone());
        Ok(())
    }
}

// ============================================================================
// Enrollments
// ============================================================================

#[async_trait]
impl EnrollmentRepository for MemoryEnrollmentRepository {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Enrollment>> {
        Ok(self.store.enrollments.get(&id).map(|e| e.value().clone()))
    }

    async fn find_by_user_and_course(
        &self,
        user_id: Snowflake,
        course_id: Snowflake,
    ) -> RepoResult<Option<Enrollment>> {
        let Some(id) = self
            .store
            .enrollment_pairs
            .get(&(user_id, course_id))
            .map(|id| *id)
        else {
            return Ok(None);
        };
        Ok(self.store.enrollments.get(&id).map(|e| e.value().clone()))
    }

    async fn find_by_user(&self, user_id: Snowflake) -> RepoResult<Vec<Enrollment>> {
        let mut enrollments: Vec<Enrollment> = self
            .store
            .enrollments
            .iter()
            .filter(|e| e.user_id == user_id)
            .map(|e| e.value().clone())
            .collect();
        enrollments.sort_by(|a, b| b.enrolled_at.cmp(&a.enrolled_at));
        Ok(enrollments)
    }

    async fn find_by_course(&self, course_id: Snowflake) -> RepoResult<Vec<Enrollment>> {
        let mut enrollments: Vec<Enrollment> = self
            .store
            .enrollments
            .iter()
            .filter(|e| e.course_id == course_id)
            .map(|e| e.value().clone())
            .collect();
        enrollments.sort_by(|a, b| a.enrolled_at.cmp(&b.enrolled_at));
        Ok(enrollments)
    }

    async fn find_completed_without_certificate(&self) -> RepoResult<Vec<Enrollment>> {
        let mut enrollments: Vec<Enrollment> = self
            .store
            .enrollments
            .iter()
            .filter(|e| e.status == EnrollmentStatus::Completed && !e.certificate_earned)
            .map(|e| e.value().clone())
            .collect();
        enrollments.sort_by_key(|e| e.id);
        Ok(enrollments)
    }

    async fn count_active_by_course(&self, course_id: Snowflake) -> RepoResult<i64> {
        let count = self
            .store
            .enrollments
            .iter()
            .filter(|e| e.course_id == course_id && e.status.is_active())
            .count();
        Ok(i64::try_from(count).unwrap_or(i64::MAX))
    }

    #[instrument(skip(self, enrollment), fields(enrollment_id = %enrollment.id))]
    async fn create(&self, enrollment: &Enrollment) -> RepoResult<()> {
        let _guard = self.store.write_guard();

        match self
            .store
            .enrollment_pairs
            .entry((enrollment.user_id, enrollment.course_id))
        {
            Entry::Occupied(_) => Err(DomainError::AlreadyEnrolled),
            Entry::Vacant(slot) => {
                slot.insert(enrollment.id);
                self.store
                    .enrollments
                    .insert(enrollment.id, enrollment.clone());
                Ok(())
            }
        }
    }

    async fn update(&self, enrollment: &Enrollment) -> RepoResult<()> {
        let _guard = self.store.write_guard();

        let mut stored = self
            .store
            .enrollments
            .get_mut(&enrollment.id)
            .ok_or(DomainError::EnrollmentNotFound(enrollment.id))?;
        *stored = enrollment.clone();
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let _guard = self.store.write_guard();

        let (_, removed) = self
            .store
            .enrollments
            .remove(&id)
            .ok_or(DomainError::EnrollmentNotFound(id))?;
        self.store
            .enrollment_pairs
            .remove(&(removed.user_id, removed.course_id));
        debug!(enrollment_id = %id, "Enrollment removed");
        Ok(())
    }

    async fn stats(&self) -> RepoResult<EnrollmentStats> {
        let mut stats = EnrollmentStats::default();
        for enrollment in self.store.enrollments.iter() {
            stats.total_enrollments += 1;
            match enrollment.status {
                EnrollmentStatus::Completed => stats.completed_enrollments += 1,
                EnrollmentStatus::InProgress => stats.in_progress_enrollments += 1,
                _ => {}
            }
        }
        Ok(stats)
    }
}

// ============================================================================
// Progress
// ============================================================================

#[async_trait]
impl ProgressRepository for MemoryProgressRepository {
    async fn find_by_user_and_course(
        &self,
        user_id: Snowflake,
        course_id: Snowflake,
    ) -> RepoResult<Option<Progress>> {
        Ok(self
            .store
            .progress
            .get(&(user_id, course_id))
            .map(|p| p.value().clone()))
    }

    async fn find_by_user(&self, user_id: Snowflake) -> RepoResult<Vec<Progress>> {
        let mut records: Vec<Progress> = self
            .store
            .progress
            .iter()
            .filter(|p| p.user_id == user_id)
            .map(|p| p.value().clone())
            .collect();
        records.sort_by(|a, b| b.last_accessed_at.cmp(&a.last_accessed_at));
        Ok(records)
    }

    async fn find_by_course(&self, course_id: Snowflake) -> RepoResult<Vec<Progress>> {
        let mut records: Vec<Progress> = self
            .store
            .progress
            .iter()
            .filter(|p| p.course_id == course_id)
            .map(|p| p.value().clone())
            .collect();
        records.sort_by(|a, b| {
            b.completion_percentage
                .value()
                .total_cmp(&a.completion_percentage.value())
                .then(a.user_id.cmp(&b.user_id))
        });
        Ok(records)
    }

    #[instrument(
        skip(self, progress, enrollment),
        fields(user_id = %progress.user_id, course_id = %progress.course_id)
    )]
    async fn save_with_enrollment(
        &self,
        progress: &Progress,
        enrollment: Option<&Enrollment>,
    ) -> RepoResult<Progress> {
        let _guard = self.store.write_guard();

        // Validate both writes before applying either
        if let Some(enrollment) = enrollment {
            if !self.store.enrollments.contains_key(&enrollment.id) {
                return Err(DomainError::EnrollmentNotFound(enrollment.id));
            }
        }

        let key = (progress.user_id, progress.course_id);
        let stored = match self.store.progress.entry(key) {
            Entry::Occupied(mut existing) => {
                // The first row keeps its id and creation stamps
                let first = existing.get();
                let merged = Progress {
                    id: first.id,
                    started_at: first.started_at,
                    created_at: first.created_at,
                    ..progress.clone()
                };
                existing.insert(merged.clone());
                merged
            }
            Entry::Vacant(slot) => slot.insert(progress.clone()).value().clone(),
        };

        if let Some(enrollment) = enrollment {
            self.store
                .enrollments
                .insert(enrollment.id, enrollment.clone());
        }

        debug!("Progress and enrollment stored");
        Ok(stored)
    }

    async fn stats_for_user(&self, user_id: Snowflake) -> RepoResult<ProgressStats> {
        let mut stats = ProgressStats::default();
        let mut completion_sum = 0.0;

        for record in self.store.progress.iter().filter(|p| p.user_id == user_id) {
            stats.total_courses += 1;
            if record.completion_percentage.is_complete() {
                stats.completed_courses += 1;
            }
            completion_sum += record.completion_percentage.value();
            stats.total_time_spent_minutes += i64::from(record.time_spent_minutes);
        }

        if stats.total_courses > 0 {
            #[allow(clippy::cast_precision_loss)]
            let total = stats.total_courses as f64;
            stats.average_completion = completion_sum / total;
        }

        Ok(stats)
    }
}

// ============================================================================
// Certificates
// ============================================================================

#[async_trait]
impl CertificateRepository for MemoryCertificateRepository {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Certificate>> {
        Ok(self.store.certificates.get(&id).map(|c| c.value().clone()))
    }

    async fn find_by_number(&self, number: &str) -> RepoResult<Option<Certificate>> {
        let Some(id) = self
            .store
            .certificate_numbers
            .get(number)
            .map(|id| *id)
        else {
            return Ok(None);
        };
        Ok(self.store.certificates.get(&id).map(|c| c.value().clone()))
    }

    async fn find_by_user_and_course(
        &self,
        user_id: Snowflake,
        course_id: Snowflake,
    ) -> RepoResult<Option<Certificate>> {
        let Some(id) = self
            .store
            .certificate_pairs
            .get(&(user_id, course_id))
            .map(|id| *id)
        else {
            return Ok(None);
        };
        Ok(self.store.certificates.get(&id).map(|c| c.value().clone()))
    }

    async fn find_by_user(&self, user_id: Snowflake) -> RepoResult<Vec<Certificate>> {
        let mut certificates: Vec<Certificate> = self
            .store
            .certificates
            .iter()
            .filter(|c| c.user_id == user_id)
            .map(|c| c.value().clone())
            .collect();
        certificates.sort_by(|a, b| b.issued_at.cmp(&a.issued_at));
        Ok(certificates)
    }

    #[instrument(skip(self, certificate), fields(certificate_number = %certificate.certificate_number))]
    async fn create(&self, certificate: &Certificate) -> RepoResult<()> {
        let _guard = self.store.write_guard();

        let pair = (certificate.user_id, certificate.course_id);
        if self.store.certificate_pairs.contains_key(&pair)
            || self
                .store
                .certificate_numbers
                .contains_key(&certificate.certificate_number)
        {
            return Err(DomainError::CertificateAlreadyExists);
        }

        self.store.certificate_pairs.insert(pair, certificate.id);
        self.store
            .certificate_numbers
            .insert(certificate.certificate_number.clone(), certificate.id);
        self.store
            .certificates
            .insert(certificate.id, certificate.clone());
        Ok(())
    }

    async fn update_status(
        &self,
        id: Snowflake,
        status: CertificateStatus,
        notes: Option<&str>,
    ) -> RepoResult<()> {
        let mut stored = self
            .store
            .certificates
            .get_mut(&id)
            .ok_or_else(|| DomainError::CertificateNotFound(id.to_string()))?;
        stored.set_status(status);
        if let Some(notes) = notes {
            stored.notes = Some(notes.to_string());
        }
        Ok(())
    }
}

// ============================================================================
// Notifications
// ============================================================================

impl MemoryNotificationRepository {
    fn collect_for(&self, user_id: Snowflake, unread_only: bool) -> Vec<Notification> {
        let mut notifications: Vec<Notification> = self
            .store
            .notifications
            .iter()
            .filter(|n| n.user_id == user_id && (!unread_only || !n.is_read))
            .map(|n| n.value().clone())
            .collect();
        notifications.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        notifications
    }
}

#[async_trait]
impl NotificationRepository for MemoryNotificationRepository {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Notification>> {
        Ok(self.store.notifications.get(&id).map(|n| n.value().clone()))
    }

    async fn find_by_user(&self, user_id: Snowflake) -> RepoResult<Vec<Notification>> {
        Ok(self.collect_for(user_id, false))
    }

    async fn find_unread_by_user(&self, user_id: Snowflake) -> RepoResult<Vec<Notification>> {
        Ok(self.collect_for(user_id, true))
    }

    async fn count_unread(&self, user_id: Snowflake) -> RepoResult<i64> {
        let count = self
            .store
            .notifications
            .iter()
            .filter(|n| n.user_id == user_id && !n.is_read)
            .count();
        Ok(i64::try_from(count).unwrap_or(i64::MAX))
    }

    async fn create(&self, notification: &Notification) -> RepoResult<()> {
        self.store
            .notifications
            .insert(notification.id, notification.clone());
        Ok(())
    }

    async fn update(&self, notification: &Notification) -> RepoResult<()> {
        let mut stored = self
            .store
            .notifications
            .get_mut(&notification.id)
            .ok_or(DomainError::NotificationNotFound(notification.id))?;

        stored.status = notification.status;
        stored.is_read = notification.is_read;
        stored.read_at = notification.read_at;
        stored.updated_at = notification.updated_at;
        Ok(())
    }

    async fn mark_all_read(&self, user_id: Snowflake) -> RepoResult<u64> {
        let mut changed = 0;
        self.store.notifications.alter_all(|_, mut n| {
            if n.user_id == user_id && !n.is_read {
                n.mark_read();
                changed += 1;
            }
            n
        });
        Ok(changed)
    }
}
