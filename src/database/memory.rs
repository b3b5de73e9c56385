use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::manager::DatabaseError;
use super::models::{Course, CourseChanges, CourseWithOwner, NewCourse, NewUser, User, UserSummary};
use super::store::{CourseStore, HealthCheck, UserStore};

#[derive(Debug, Default)]
struct Tables {
    users: BTreeMap<i64, User>,
    courses: BTreeMap<i64, Course>,
    next_user_id: i64,
    next_course_id: i64,
}

impl Tables {
    fn with_owner(&self, course: &Course) -> Result<CourseWithOwner, DatabaseError> {
        let owner = self.users.get(&course.user_id).ok_or_else(|| {
            DatabaseError::NotFound(format!("owner {} of course {}", course.user_id, course.id))
        })?;

        Ok(CourseWithOwner {
            course: course.clone(),
            owner: UserSummary::from(owner),
        })
    }
}

/// In-process store with the same semantics as `PgStore`.
///
/// Intended for tests and local runs without a database.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn user_count(&self) -> usize {
        self.tables.read().await.users.len()
    }

    pub async fn course_count(&self) -> usize {
        self.tables.read().await.courses.len()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn create_user(&self, user: NewUser) -> Result<User, DatabaseError> {
        let mut tables = self.tables.write().await;

        if tables.users.values().any(|u| u.email_address == user.email_address) {
            return Err(DatabaseError::UniqueViolation("emailAddress".to_string()));
        }

        tables.next_user_id += 1;
        let now = Utc::now();
        let created = User {
            id: tables.next_user_id,
            first_name: user.first_name,
            last_name: user.last_name,
            email_address: user.email_address,
            password: user.password,
            created_at: now,
            updated_at: now,
        };
        tables.users.insert(created.id, created.clone());

        Ok(created)
    }

    async fn find_user_by_email(&self, email_address: &str) -> Result<Option<User>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .values()
            .find(|u| u.email_address == email_address)
            .cloned())
    }
}

#[async_trait]
impl CourseStore for MemoryStore {
    async fn list_courses(&self) -> Result<Vec<CourseWithOwner>, DatabaseError> {
        let tables = self.tables.read().await;
        tables.courses.values().map(|c| tables.with_owner(c)).collect()
    }

    async fn find_course(&self, id: i64) -> Result<Option<CourseWithOwner>, DatabaseError> {
        let tables = self.tables.read().await;
        tables.courses.get(&id).map(|c| tables.with_owner(c)).transpose()
    }

    async fn create_course(&self, owner_id: i64, course: NewCourse) -> Result<Course, DatabaseError> {
        let mut tables = self.tables.write().await;

        // foreign key: courses.user_id -> users.id
        if !tables.users.contains_key(&owner_id) {
            return Err(DatabaseError::NotFound(format!("user {}", owner_id)));
        }

        tables.next_course_id += 1;
        let now = Utc::now();
        let created = Course {
            id: tables.next_course_id,
            title: course.title,
            description: course.description,
            estimated_time: course.estimated_time,
            materials_needed: course.materials_needed,
            user_id: owner_id,
            created_at: now,
            updated_at: now,
        };
        tables.courses.insert(created.id, created.clone());

        Ok(created)
    }

    async fn update_course(&self, id: i64, changes: CourseChanges) -> Result<Course, DatabaseError> {
        let mut tables = self.tables.write().await;
        let course = tables
            .courses
            .get_mut(&id)
            .ok_or_else(|| DatabaseError::NotFound(format!("course {}", id)))?;

        course.title = changes.title;
        course.description = changes.description;
        if let Some(estimated_time) = changes.estimated_time {
            course.estimated_time = estimated_time;
        }
        if let Some(materials_needed) = changes.materials_needed {
            course.materials_needed = materials_needed;
        }
        course.updated_at = Utc::now();

        Ok(course.clone())
    }

    async fn delete_course(&self, id: i64) -> Result<(), DatabaseError> {
        let mut tables = self.tables.write().await;
        tables
            .courses
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| DatabaseError::NotFound(format!("course {}", id)))
    }
}

#[async_trait]
impl HealthCheck for MemoryStore {
    async fn ping(&self) -> Result<(), DatabaseError> {
        Ok(())
    }
}
