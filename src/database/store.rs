use async_trait::async_trait;

use super::manager::DatabaseError;
use super::models::{Course, CourseChanges, CourseWithOwner, NewCourse, NewUser, User};

/// Credential store: persisted users keyed by unique email address
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a user. A taken email yields `DatabaseError::UniqueViolation`
    /// and leaves the store unchanged.
    async fn create_user(&self, user: NewUser) -> Result<User, DatabaseError>;

    async fn find_user_by_email(&self, email_address: &str) -> Result<Option<User>, DatabaseError>;
}

/// Resource store: courses, each owned by exactly one user
#[async_trait]
pub trait CourseStore: Send + Sync {
    async fn list_courses(&self) -> Result<Vec<CourseWithOwner>, DatabaseError>;

    async fn find_course(&self, id: i64) -> Result<Option<CourseWithOwner>, DatabaseError>;

    async fn create_course(&self, owner_id: i64, course: NewCourse) -> Result<Course, DatabaseError>;

    /// Returns `DatabaseError::NotFound` if the course vanished in the meantime
    async fn update_course(&self, id: i64, changes: CourseChanges) -> Result<Course, DatabaseError>;

    async fn delete_course(&self, id: i64) -> Result<(), DatabaseError>;
}

#[async_trait]
pub trait HealthCheck: Send + Sync {
    async fn ping(&self) -> Result<(), DatabaseError>;
}
