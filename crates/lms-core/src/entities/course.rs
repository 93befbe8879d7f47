//! Course entity - a catalog entry learners enroll in

use chrono::{DateTime, Utc};

use crate::value_objects::{labelled_enum, Snowflake};

labelled_enum! {
    pub enum CourseCategory {
        Technical => "TECHNICAL",
        SoftSkills => "SOFT_SKILLS",
        Compliance => "COMPLIANCE",
        Leadership => "LEADERSHIP",
        Productivity => "PRODUCTIVITY",
    }
}

labelled_enum! {
    /// How the course is delivered
    pub enum CourseType {
        InPerson => "IN_PERSON",
        Virtual => "VIRTUAL",
        Hybrid => "HYBRID",
        SelfPaced => "SELF_PACED",
    }
}

/// Course entity
///
/// Courses are never hard-deleted; `is_active = false` retires them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    pub id: Snowflake,
    pub title: String,
    pub description: Option<String>,
    pub category: CourseCategory,
    pub course_type: CourseType,
    pub duration_hours: Option<i32>,
    pub max_participants: Option<i32>,
    pub is_mandatory: bool,
    pub is_active: bool,
    /// Weak reference; deactivating the trainer leaves the course in place
    pub trainer_id: Option<Snowflake>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Course {
    /// Create a new active, optional course
    pub fn new(
        id: Snowflake,
        title: String,
        category: CourseCategory,
        course_type: CourseType,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            title,
            description: None,
            category,
            course_type,
            duration_hours: None,
            max_participants: None,
            is_mandatory: false,
            is_active: true,
            trainer_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Total course length in minutes, when the duration is known
    pub fn duration_minutes(&self) -> Option<i32> {
        self.duration_hours
            .filter(|h| *h > 0)
            .map(|h| h.saturating_mul(60))
    }

    /// Whether another learner fits given the number of active enrollments
    pub fn has_capacity(&self, active_enrollments: i64) -> bool {
        match self.max_participants {
            Some(max) if max > 0 => active_enrollments < i64::from(max),
            _ => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn course() -> Course {
        Course::new(
            Snowflake::new(10),
            "Rust Fundamentals".to_string(),
            CourseCategory::Technical,
            CourseType::SelfPaced,
        )
    }

    #[test]
    fn test_duration_minutes() {
        let mut c = course();
        assert_eq!(c.duration_minutes(), None);
        c.duration_hours = Some(2);
        assert_eq!(c.duration_minutes(), Some(120));
        c.duration_hours = Some(0);
        assert_eq!(c.duration_minutes(), None);
    }

    #[test]
    fn test_capacity() {
        let unlimited = course();
        assert!(unlimited.has_capacity(10_000));

        let mut limited = course();
        limited.max_participants = Some(2);
        assert!(limited.has_capacity(1));
        assert!(!limited.has_capacity(2));
    }

    #[test]
    fn test_category_labels() {
        assert_eq!(CourseCategory::SoftSkills.as_str(), "SOFT_SKILLS");
        assert_eq!("self paced".parse::<CourseType>().unwrap(), CourseType::SelfPaced);
    }
}
