use thiserror::Error;

use super::auth::AuthUser;
use crate::database::models::{Course, CourseWithOwner};
use crate::database::CourseStore;
use crate::error::{ApiError, NOT_COURSE_OWNER};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("user {user_id} does not own course {course_id} (owner {owner_id})")]
pub struct OwnershipError {
    pub user_id: i64,
    pub course_id: i64,
    pub owner_id: i64,
}

impl From<OwnershipError> for ApiError {
    fn from(err: OwnershipError) -> Self {
        tracing::warn!("Ownership check failed: {}", err);
        ApiError::forbidden(NOT_COURSE_OWNER)
    }
}

/// Succeeds iff the authenticated user owns the course
pub fn authorize_owner(user: &AuthUser, course: &Course) -> Result<(), OwnershipError> {
    if user.id == course.user_id {
        Ok(())
    } else {
        Err(OwnershipError {
            user_id: user.id,
            course_id: course.id,
            owner_id: course.user_id,
        })
    }
}

/// Load a course for mutation. Existence is checked before ownership, so a
/// missing course is always reported as not found.
pub async fn load_owned_course(
    courses: &dyn CourseStore,
    id: Option<i64>,
    user: &AuthUser,
) -> Result<CourseWithOwner, ApiError> {
    let id = id.ok_or_else(ApiError::course_not_found)?;
    let course = courses.find_course(id).await?.ok_or_else(ApiError::course_not_found)?;
    authorize_owner(user, &course.course)?;
    Ok(course)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn user(id: i64) -> AuthUser {
        AuthUser {
            id,
            first_name: "Joe".to_string(),
            last_name: "Smith".to_string(),
            email_address: format!("user{}@x.com", id),
        }
    }

    fn course_owned_by(user_id: i64) -> Course {
        let now = Utc::now();
        Course {
            id: 9,
            title: "Title".to_string(),
            description: "Description".to_string(),
            estimated_time: None,
            materials_needed: None,
            user_id,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn owner_passes() {
        assert!(authorize_owner(&user(1), &course_owned_by(1)).is_ok());
    }

    #[test]
    fn non_owner_is_forbidden() {
        let err = authorize_owner(&user(2), &course_owned_by(1)).unwrap_err();
        assert_eq!(err.owner_id, 1);

        let api_error = ApiError::from(err);
        assert_eq!(api_error.status_code(), axum::http::StatusCode::FORBIDDEN);
    }
}
