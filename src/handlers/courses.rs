use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header::LOCATION, StatusCode},
    response::IntoResponse,
    Json,
};
use serde_json::{json, Value};

use super::{json_body, parse_id};
use crate::database::models::{CourseChanges, NewCourse};
use crate::error::ApiError;
use crate::middleware::{load_owned_course, AuthUser};
use crate::state::AppState;
use crate::validation::{optional_text, text, validate_course};

/// GET /courses - every course with its owner embedded
pub async fn courses_list(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let courses = state.courses.list_courses().await?;
    Ok(Json(json!({ "courses": courses })))
}

/// GET /courses/:id
///
/// The body keeps the `course: [...]` list shape clients already parse, but
/// the lookup itself is by unique key.
pub async fn course_get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = parse_id(&id).ok_or_else(ApiError::course_not_found)?;

    match state.courses.find_course(id).await? {
        Some(course) => Ok(Json(json!({ "course": [course] }))),
        None => Err(ApiError::course_not_found()),
    }
}

/// POST /courses - create a course owned by the caller
pub async fn course_post(
    State(state): State<AppState>,
    user: AuthUser,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let body = json_body(payload)?;

    let messages = validate_course(&body);
    if !messages.is_empty() {
        return Err(ApiError::validation_error(messages));
    }

    // Ownership comes from the credentials; any userId in the body is ignored
    let course = state
        .courses
        .create_course(
            user.id,
            NewCourse {
                title: text(&body, "title").unwrap_or_default(),
                description: text(&body, "description").unwrap_or_default(),
                estimated_time: optional_text(&body, "estimatedTime").flatten(),
                materials_needed: optional_text(&body, "materialsNeeded").flatten(),
            },
        )
        .await?;

    tracing::info!("User {} created course {}", user.id, course.id);

    Ok((
        StatusCode::CREATED,
        [(LOCATION, format!("/api/course/{}", course.id))],
    ))
}

/// PUT /courses/:id - owner-only update
pub async fn course_put(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let existing = load_owned_course(state.courses.as_ref(), parse_id(&id), &user).await?;

    let body = json_body(payload)?;
    let messages = validate_course(&body);
    if !messages.is_empty() {
        return Err(ApiError::validation_error(messages));
    }

    state
        .courses
        .update_course(
            existing.course.id,
            CourseChanges {
                title: text(&body, "title").unwrap_or_default(),
                description: text(&body, "description").unwrap_or_default(),
                estimated_time: optional_text(&body, "estimatedTime"),
                materials_needed: optional_text(&body, "materialsNeeded"),
            },
        )
        .await?;

    tracing::info!("User {} updated course {}", user.id, existing.course.id);

    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /courses/:id - owner-only delete
pub async fn course_delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let existing = load_owned_course(state.courses.as_ref(), parse_id(&id), &user).await?;

    state.courses.delete_course(existing.course.id).await?;

    tracing::info!("User {} deleted course {}", user.id, existing.course.id);

    Ok(StatusCode::NO_CONTENT)
}
