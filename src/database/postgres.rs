use async_trait::async_trait;
use sqlx::PgPool;

use super::manager::{DatabaseError, DatabaseManager};
use super::models::{Course, CourseChanges, CourseOwnerRow, CourseWithOwner, NewCourse, NewUser, User};
use super::store::{CourseStore, HealthCheck, UserStore};

const USER_COLUMNS: &str =
    "id, first_name, last_name, email_address, password, created_at, updated_at";

const COURSE_COLUMNS: &str =
    "id, title, description, estimated_time, materials_needed, user_id, created_at, updated_at";

const COURSE_WITH_OWNER_SELECT: &str = r#"
    SELECT
        c.id, c.title, c.description, c.estimated_time, c.materials_needed,
        c.user_id, c.created_at, c.updated_at,
        u.first_name AS owner_first_name,
        u.last_name AS owner_last_name,
        u.email_address AS owner_email_address
    FROM courses c
    JOIN users u ON u.id = c.user_id
"#;

/// Postgres-backed store for users and courses
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn create_user(&self, user: NewUser) -> Result<User, DatabaseError> {
        let sql = format!(
            "INSERT INTO users (first_name, last_name, email_address, password)
             VALUES ($1, $2, $3, $4)
             RETURNING {USER_COLUMNS}"
        );

        sqlx::query_as::<_, User>(&sql)
            .bind(&user.first_name)
            .bind(&user.last_name)
            .bind(&user.email_address)
            .bind(&user.password)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DatabaseManager::classify(e, "emailAddress"))
    }

    async fn find_user_by_email(&self, email_address: &str) -> Result<Option<User>, DatabaseError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE email_address = $1");

        let user = sqlx::query_as::<_, User>(&sql)
            .bind(email_address)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }
}

#[async_trait]
impl CourseStore for PgStore {
    async fn list_courses(&self) -> Result<Vec<CourseWithOwner>, DatabaseError> {
        let sql = format!("{COURSE_WITH_OWNER_SELECT} ORDER BY c.id");

        let rows = sqlx::query_as::<_, CourseOwnerRow>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(CourseWithOwner::from).collect())
    }

    async fn find_course(&self, id: i64) -> Result<Option<CourseWithOwner>, DatabaseError> {
        let sql = format!("{COURSE_WITH_OWNER_SELECT} WHERE c.id = $1");

        let row = sqlx::query_as::<_, CourseOwnerRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(CourseWithOwner::from))
    }

    async fn create_course(&self, owner_id: i64, course: NewCourse) -> Result<Course, DatabaseError> {
        let sql = format!(
            "INSERT INTO courses (title, description, estimated_time, materials_needed, user_id)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COURSE_COLUMNS}"
        );

        let created = sqlx::query_as::<_, Course>(&sql)
            .bind(&course.title)
            .bind(&course.description)
            .bind(&course.estimated_time)
            .bind(&course.materials_needed)
            .bind(owner_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(created)
    }

    async fn update_course(&self, id: i64, changes: CourseChanges) -> Result<Course, DatabaseError> {
        let sql = format!(
            "UPDATE courses SET
                title = $2,
                description = $3,
                estimated_time = CASE WHEN $4 THEN $5 ELSE estimated_time END,
                materials_needed = CASE WHEN $6 THEN $7 ELSE materials_needed END,
                updated_at = now()
             WHERE id = $1
             RETURNING {COURSE_COLUMNS}"
        );

        let set_estimated_time = changes.estimated_time.is_some();
        let set_materials_needed = changes.materials_needed.is_some();

        sqlx::query_as::<_, Course>(&sql)
            .bind(id)
            .bind(&changes.title)
            .bind(&changes.description)
            .bind(set_estimated_time)
            .bind(changes.estimated_time.flatten())
            .bind(set_materials_needed)
            .bind(changes.materials_needed.flatten())
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("course {}", id)))
    }

    async fn delete_course(&self, id: i64) -> Result<(), DatabaseError> {
        let result = sqlx::query("DELETE FROM courses WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound(format!("course {}", id)));
        }
        Ok(())
    }
}

#[async_trait]
impl HealthCheck for PgStore {
    async fn ping(&self) -> Result<(), DatabaseError> {
        DatabaseManager::health_check(&self.pool).await
    }
}
