//! Shared in-memory tables
//!
//! Every table is a `DashMap`; the pair indexes mirror the UNIQUE
//! constraints of the SQL schema. Writes that touch more than one map take
//! `write_lock` so the indexes never disagree with their tables.

use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::{Mutex, MutexGuard};

use lms_core::entities::{Certificate, Course, Enrollment, Notification, Progress, User};
use lms_core::value_objects::Snowflake;

/// (user, course) key
pub(crate) type Pair = (Snowflake, Snowflake);

/// Process-local storage backing the memory repositories
#[derive(Default)]
pub struct MemoryStore {
    pub(crate) users: DashMap<Snowflake, User>,
    pub(crate) courses: DashMap<Snowflake, Course>,
    pub(crate) enrollments: DashMap<Snowflake, Enrollment>,
    pub(crate) enrollment_pairs: DashMap<Pair, Snowflake>,
    pub(crate) progress: DashMap<Pair, Progress>,
    pub(crate) certificates: DashMap<Snowflake, Certificate>,
    pub(crate) certificate_pairs: DashMap<Pair, Snowflake>,
    pub(crate) certificate_numbers: DashMap<String, Snowflake>,
    pub(crate) notifications: DashMap<Snowflake, Notification>,
    write_lock: Mutex<()>,
}

impl MemoryStore {
    /// Create an empty shared store
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub(crate) fn write_guard(&self) -> MutexGuard<'_, ()> {
        self.write_lock.lock()
    }

    /// Row counts per table, for diagnostics
    pub fn table_sizes(&self) -> [(&'static str, usize); 6] {
        [
            ("users", self.users.len()),
            ("courses", self.courses.len()),
            ("enrollments", self.enrollments.len()),
            ("progress", self.progress.len()),
            ("certificates", self.certificates.len()),
            ("notifications", self.notifications.len()),
        ]
    }
}

impl std::fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryStore")
            .field("tables", &self.table_sizes())
            .finish_non_exhaustive()
    }
}
