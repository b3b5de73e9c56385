use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

use super::user::UserSummary;

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub estimated_time: Option<String>,
    pub materials_needed: Option<String>,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCourse {
    pub title: String,
    pub description: String,
    pub estimated_time: Option<String>,
    pub materials_needed: Option<String>,
}

/// Changes applied by an update. The optional columns use `None` for
/// "leave as is" and `Some(None)` for "clear".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseChanges {
    pub title: String,
    pub description: String,
    pub estimated_time: Option<Option<String>>,
    pub materials_needed: Option<Option<String>>,
}

/// A course with its owner embedded, as returned by the read endpoints
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CourseWithOwner {
    #[serde(flatten)]
    pub course: Course,
    pub owner: UserSummary,
}

/// Flat row produced by the courses/users join
#[derive(Debug, FromRow)]
pub struct CourseOwnerRow {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub estimated_time: Option<String>,
    pub materials_needed: Option<String>,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub owner_first_name: String,
    pub owner_last_name: String,
    pub owner_email_address: String,
}

impl From<CourseOwnerRow> for CourseWithOwner {
    fn from(row: CourseOwnerRow) -> Self {
        Self {
            owner: UserSummary {
                id: row.user_id,
                first_name: row.owner_first_name,
                last_name: row.owner_last_name,
                email_address: row.owner_email_address,
            },
            course: Course {
                id: row.id,
                title: row.title,
                description: row.description,
                estimated_time: row.estimated_time,
                materials_needed: row.materials_needed,
                user_id: row.user_id,
                created_at: row.created_at,
                updated_at: row.updated_at,
            },
        }
    }
}
